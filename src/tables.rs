//! Wind vane lookup tables.
//!
//! The vane switches one of sixteen resistors into a divider with an external
//! pull-up, so each compass point produces a distinct voltage ratio. Entries
//! are ordered by ascending resistance, which makes the derived divider
//! ratios (and the thresholds between them) ascending too.
//!
//! Resistances and angles come from the weather meter kit datasheet. Angles
//! are truncated to whole degrees (112.5° is listed as 112°).

/// Number of distinct positions the vane can report.
pub const DIRECTIONS: usize = 16;

/// Maximum divider ratio, in permille.
pub const PERMILLE_MAX: i32 = 1000;

/// One vane position: its resistance, its compass angle, and the unit vector
/// for that angle scaled by [`UNIT`].
#[derive(Debug, Clone, Copy)]
pub struct VanePosition {
    pub resistance_ohms: u32,
    pub degrees: u16,
    pub cos: i32,
    pub sin: i32,
}

/// Scale of the [`VanePosition`] unit vector components.
pub const UNIT: i32 = 1000;

const fn position(resistance_ohms: u32, degrees: u16, cos: i32, sin: i32) -> VanePosition {
    VanePosition {
        resistance_ohms,
        degrees,
        cos,
        sin,
    }
}

#[rustfmt::skip]
const POSITIONS: [VanePosition; DIRECTIONS] = [
    position(688,    112, -375,   927),
    position(891,     67,  391,   921),
    position(1000,    90,    0,  1000),
    position(1410,   157, -921,   391),
    position(2200,   135, -707,   707),
    position(3140,   202, -927,  -375),
    position(3900,   180, -1000,    0),
    position(6570,    22,  927,   375),
    position(8200,    45,  707,   707),
    position(14120,  247, -391,  -921),
    position(16000,  225, -707,  -707),
    position(21880,  337,  921,  -391),
    position(33000,    0, 1000,     0),
    position(42120,  292,  375,  -927),
    position(64900,  315,  707,  -707),
    position(120000, 270,    0, -1000),
];

pub static VANE_POSITIONS: [VanePosition; DIRECTIONS] = POSITIONS;

/// Divider ratio in permille for the given vane resistance.
const fn divider_ratio(resistance_ohms: u32, pull_up_ohms: u32) -> i32 {
    // 1000 * 120 kΩ stays well inside u64 even for large pull-ups.
    ((PERMILLE_MAX as u64 * resistance_ohms as u64)
        / (resistance_ohms as u64 + pull_up_ohms as u64)) as i32
}

/// Ascending divider ratio thresholds separating adjacent vane positions.
///
/// Entry `i` is the midpoint between the ratios of positions `i` and `i + 1`,
/// and the last entry is [`PERMILLE_MAX`], so every ratio in
/// `0..=PERMILLE_MAX` falls under some threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RatioThresholds([i32; DIRECTIONS]);

impl RatioThresholds {
    pub const fn for_pull_up(pull_up_ohms: u32) -> Self {
        let mut thresholds = [PERMILLE_MAX; DIRECTIONS];
        let mut idx = 0;
        while idx < DIRECTIONS - 1 {
            let low = divider_ratio(POSITIONS[idx].resistance_ohms, pull_up_ohms);
            let high = divider_ratio(POSITIONS[idx + 1].resistance_ohms, pull_up_ohms);
            thresholds[idx] = (low + high) >> 1;
            idx += 1;
        }
        Self(thresholds)
    }

    /// Vane position for the given ratio: the first position whose threshold
    /// is at or above it. `None` when the ratio is above every threshold.
    pub fn position(&self, ratio_permille: i32) -> Option<&'static VanePosition> {
        self.0
            .iter()
            .position(|&threshold| ratio_permille <= threshold)
            .map(|idx| &VANE_POSITIONS[idx])
    }

    pub fn as_array(&self) -> &[i32; DIRECTIONS] {
        &self.0
    }
}
