//! Measurement arithmetic.
//!
//! Everything here runs in the processing context and never touches the
//! interrupt-shared state. The sampler hands over captured edge counts and
//! vane ratios; the engine turns them into speed, peak, average and the
//! speed-weighted direction vector.

use crate::common::{WindDirection, WindSpeed};
use crate::math::{atan2_degrees, rolling_mean};
use crate::tables::RatioThresholds;

/// Speed in m/h produced by one edge per second. The anemometer closes its
/// switch once per second at 2.4 km/h.
pub const WIND_SPEED_1HZ_TO_MH: u32 = 2400;

/// Rain collected per bucket tip, in µm.
pub const RAIN_EDGE_TO_UM: u32 = 279;

/// Wind speed for `edges` anemometer edges counted over `period_seconds`.
pub fn wind_speed_mh(edges: u32, period_seconds: u8) -> u32 {
    edges.saturating_mul(WIND_SPEED_1HZ_TO_MH) / u32::from(period_seconds.max(1))
}

/// Rainfall for `edges` rain gauge tips.
pub fn rainfall_um(edges: u32) -> u32 {
    edges.saturating_mul(RAIN_EDGE_TO_UM)
}

/// The vane ratio fell outside every threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct UnmatchedRatio(pub i32);

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Engine {
    speed_sample_count: u32,
    speed_mh: u32,
    speed_mh_average: u32,
    speed_mh_peak: u32,
    vane_degrees: u16,
    trend_x: i64,
    trend_y: i64,
}

impl Engine {
    pub(crate) const fn new() -> Self {
        Self {
            speed_sample_count: 0,
            speed_mh: 0,
            speed_mh_average: 0,
            speed_mh_peak: 0,
            vane_degrees: 0,
            trend_x: 0,
            trend_y: 0,
        }
    }

    /// Close a speed window of `period_seconds` in which `edges` were counted.
    pub(crate) fn update_speed(&mut self, edges: u32, period_seconds: u8) {
        self.speed_mh = wind_speed_mh(edges, period_seconds);
        if self.speed_mh > self.speed_mh_peak {
            self.speed_mh_peak = self.speed_mh;
        }
        (self.speed_mh_average, self.speed_sample_count) =
            rolling_mean(self.speed_mh_average, self.speed_sample_count, self.speed_mh);
    }

    /// Latest speed truncated to whole km/h, used to weight direction samples.
    pub(crate) fn speed_kmh(&self) -> u32 {
        self.speed_mh / 1000
    }

    /// Direction samples are only worth taking while the cups are turning.
    pub(crate) fn is_windy(&self) -> bool {
        self.speed_kmh() > 0
    }

    /// Resolve a vane ratio and add its unit vector, weighted by the latest
    /// speed, to the direction trend.
    pub(crate) fn update_direction(
        &mut self,
        ratio_permille: i32,
        thresholds: &RatioThresholds,
    ) -> Result<(), UnmatchedRatio> {
        let position = thresholds
            .position(ratio_permille)
            .ok_or(UnmatchedRatio(ratio_permille))?;
        self.vane_degrees = position.degrees;
        let weight = i64::from(self.speed_kmh());
        self.trend_x += weight * i64::from(position.cos);
        self.trend_y += weight * i64::from(position.sin);
        Ok(())
    }

    pub(crate) fn wind_speed(&self) -> WindSpeed {
        WindSpeed {
            latest_mh: self.speed_mh,
            average_mh: self.speed_mh_average,
            peak_mh: self.speed_mh_peak,
        }
    }

    /// Speed-weighted circular mean of every direction sample since reset.
    pub(crate) fn wind_direction(&self) -> WindDirection {
        if self.trend_x == 0 && self.trend_y == 0 {
            return WindDirection::Undefined;
        }
        WindDirection::Available(atan2_degrees(self.trend_x, self.trend_y))
    }

    pub(crate) fn latest_vane_degrees(&self) -> u16 {
        self.vane_degrees
    }

    #[cfg(test)]
    pub(crate) fn trend(&self) -> (i64, i64) {
        (self.trend_x, self.trend_y)
    }
}
