use core::cell::Cell;
use core::num::NonZeroU8;

use critical_section::Mutex;

use crate::engine::{Engine, rainfall_um};
use crate::error::Error;
use crate::log::{log_debug, log_trace};
use crate::tables::RatioThresholds;

/// Measurement windows and wind vane wiring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    /// Length of the window over which anemometer edges are counted before
    /// a new instantaneous wind speed is computed.
    pub wind_speed_sampling_seconds: NonZeroU8,
    /// Interval between two wind vane readings.
    ///
    /// The vane is only read at the end of this interval if the most recent
    /// wind speed is at least 1 km/h; a resting vane says nothing useful.
    pub wind_direction_sampling_seconds: NonZeroU8,
    /// Pull-up resistor forming the divider with the vane, in ohms. The
    /// direction thresholds are derived from it.
    pub pull_up_resistor_ohms: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            wind_speed_sampling_seconds: NonZeroU8::MIN,
            wind_direction_sampling_seconds: NonZeroU8::new(10).unwrap_or(NonZeroU8::MIN),
            pull_up_resistor_ohms: 10_000,
        }
    }
}

/// Wind speeds since the last reset, in m/h.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WindSpeed {
    /// Speed over the most recent sampling window.
    pub latest_mh: u32,
    pub average_mh: u32,
    pub peak_mh: u32,
}

impl WindSpeed {
    pub fn average_kmh(&self) -> f32 {
        crate::conversions::speed_mh_to_kmh(self.average_mh)
    }

    pub fn peak_kmh(&self) -> f32 {
        crate::conversions::speed_mh_to_kmh(self.peak_mh)
    }
}

/// Average wind direction since the last reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WindDirection {
    /// Compass degrees in `0..360`, 0 being north and 90 east.
    Available(u16),
    /// No direction sample was taken since the last reset, or the samples
    /// cancelled out exactly.
    Undefined,
}

impl WindDirection {
    pub fn degrees(&self) -> Option<u16> {
        match self {
            WindDirection::Available(degrees) => Some(*degrees),
            WindDirection::Undefined => None,
        }
    }
}

/// Driver state written from interrupt context.
///
/// Create one in a `static` and hand it to the driver; the [`Hooks`] given to
/// the hardware shim refer back to it. Every access goes through a critical
/// section, so reads and read-then-clear sequences from the processing side
/// cannot interleave with an interrupt.
pub struct Shared {
    wind_measurement_enabled: Mutex<Cell<bool>>,
    tick_second_flag: Mutex<Cell<bool>>,
    wind_speed_seconds: Mutex<Cell<u8>>,
    wind_speed_edge_count: Mutex<Cell<u32>>,
    wind_direction_seconds: Mutex<Cell<u8>>,
    rain_edge_count: Mutex<Cell<u32>>,
}

impl Default for Shared {
    fn default() -> Self {
        Self::new()
    }
}

/// What a process call has to do after consuming a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct DueWindows {
    /// Edges captured for a completed speed window.
    pub(crate) wind_speed_edges: Option<u32>,
    pub(crate) direction_due: bool,
}

impl Shared {
    pub const fn new() -> Self {
        Self {
            wind_measurement_enabled: Mutex::new(Cell::new(false)),
            tick_second_flag: Mutex::new(Cell::new(false)),
            wind_speed_seconds: Mutex::new(Cell::new(0)),
            wind_speed_edge_count: Mutex::new(Cell::new(0)),
            wind_direction_seconds: Mutex::new(Cell::new(0)),
            rain_edge_count: Mutex::new(Cell::new(0)),
        }
    }

    fn wind_speed_edge(&self) {
        critical_section::with(|cs| {
            let count = self.wind_speed_edge_count.borrow(cs);
            count.set(count.get().wrapping_add(1));
        });
    }

    fn rainfall_edge(&self) {
        critical_section::with(|cs| {
            let count = self.rain_edge_count.borrow(cs);
            count.set(count.get().wrapping_add(1));
        });
    }

    /// Count a second if wind measurement is on. Returns whether it was.
    fn tick_second(&self) -> bool {
        critical_section::with(|cs| {
            if !self.wind_measurement_enabled.borrow(cs).get() {
                return false;
            }
            for seconds in [
                self.wind_speed_seconds.borrow(cs),
                self.wind_direction_seconds.borrow(cs),
            ] {
                seconds.set(seconds.get().saturating_add(1));
            }
            self.tick_second_flag.borrow(cs).set(true);
            true
        })
    }

    /// Turn wind measurement on or off, restarting both windows.
    pub(crate) fn set_wind_measurement(&self, enable: bool) {
        critical_section::with(|cs| {
            self.wind_measurement_enabled.borrow(cs).set(enable);
            self.wind_speed_seconds.borrow(cs).set(0);
            self.wind_direction_seconds.borrow(cs).set(0);
            self.tick_second_flag.borrow(cs).set(false);
        });
    }

    /// Consume a pending tick, closing whichever windows have elapsed.
    ///
    /// Returns `None` if no tick is pending. Closing the speed window resets
    /// its seconds and captures-and-clears the edge count in the same
    /// critical section, so no edge is lost or counted twice.
    pub(crate) fn take_tick(&self, config: &Config) -> Option<DueWindows> {
        critical_section::with(|cs| {
            if !self.tick_second_flag.borrow(cs).replace(false) {
                return None;
            }
            let speed_seconds = self.wind_speed_seconds.borrow(cs);
            let wind_speed_edges = if speed_seconds.get() >= config.wind_speed_sampling_seconds.get() {
                speed_seconds.set(0);
                Some(self.wind_speed_edge_count.borrow(cs).replace(0))
            } else {
                None
            };
            let direction_seconds = self.wind_direction_seconds.borrow(cs);
            let direction_due =
                direction_seconds.get() >= config.wind_direction_sampling_seconds.get();
            if direction_due {
                direction_seconds.set(0);
            }
            Some(DueWindows {
                wind_speed_edges,
                direction_due,
            })
        })
    }

    pub(crate) fn rain_edge_count(&self) -> u32 {
        critical_section::with(|cs| self.rain_edge_count.borrow(cs).get())
    }

    /// Zero every counter. The enable flag and a pending tick are kept.
    pub(crate) fn reset(&self) {
        critical_section::with(|cs| {
            self.wind_speed_seconds.borrow(cs).set(0);
            self.wind_speed_edge_count.borrow(cs).set(0);
            self.wind_direction_seconds.borrow(cs).set(0);
            self.rain_edge_count.borrow(cs).set(0);
        });
    }
}

/// Callbacks for the hardware shim's interrupt handlers.
///
/// Each hook does a bounded amount of work: an increment, a flag, and for
/// the tick, a call to the process-request function registered with the
/// driver. The host must not call the driver's `process` from that function
/// directly; it should schedule it for the main loop.
#[derive(Clone, Copy)]
pub struct Hooks {
    shared: &'static Shared,
    process_request: fn(),
}

impl Hooks {
    pub(crate) fn new(shared: &'static Shared, process_request: fn()) -> Self {
        Self {
            shared,
            process_request,
        }
    }

    /// Call on every anemometer switch closure.
    pub fn on_wind_speed_edge(&self) {
        self.shared.wind_speed_edge();
    }

    /// Call on every rain gauge bucket tip.
    pub fn on_rainfall_edge(&self) {
        self.shared.rainfall_edge();
    }

    /// Call once per second from the hardware timer.
    pub fn on_tick_second(&self) {
        if self.shared.tick_second() {
            (self.process_request)();
        }
    }
}

/// Interrupt plumbing the driver needs from the board, shared by the
/// blocking and async drivers.
pub trait InterruptControl {
    type Error: core::fmt::Debug;

    /// Configure the anemometer and rain gauge inputs and the one-second
    /// timer, keeping `hooks` for their interrupt handlers. Interrupts stay
    /// disarmed until requested.
    fn init(&mut self, hooks: Hooks) -> Result<(), Self::Error>;

    /// Release the peripherals claimed by [`init`](Self::init).
    fn de_init(&mut self) -> Result<(), Self::Error>;

    /// Arm or disarm the anemometer edge interrupt and the one-second tick.
    fn set_wind_speed_interrupt(&mut self, enable: bool) -> Result<(), Self::Error>;

    /// Arm or disarm the rain gauge edge interrupt.
    fn set_rainfall_interrupt(&mut self, enable: bool) -> Result<(), Self::Error>;
}

/// State and logic common to the blocking and async drivers. They differ
/// only in how the vane ratio is acquired.
pub(crate) struct Core {
    pub(crate) shared: &'static Shared,
    pub(crate) config: Config,
    thresholds: RatioThresholds,
    engine: Engine,
}

impl Core {
    pub(crate) fn new(shared: &'static Shared, config: Config) -> Self {
        Self {
            shared,
            config,
            thresholds: RatioThresholds::for_pull_up(config.pull_up_resistor_ohms),
            engine: Engine::new(),
        }
    }

    pub(crate) fn hooks(&self, process_request: fn()) -> Hooks {
        Hooks::new(self.shared, process_request)
    }

    pub(crate) fn set_wind_measurement<I: InterruptControl>(
        &self,
        hardware: &mut I,
        enable: bool,
    ) -> Result<(), Error<I::Error>> {
        log_debug!("wind measurement enabled: {}", enable);
        self.shared.set_wind_measurement(enable);
        hardware.set_wind_speed_interrupt(enable)?;
        Ok(())
    }

    /// First half of a process call: consume the tick and update the wind
    /// speed. Returns whether a direction sample should now be taken.
    pub(crate) fn begin_process(&mut self) -> bool {
        let Some(due) = self.shared.take_tick(&self.config) else {
            return false;
        };
        if let Some(edges) = due.wind_speed_edges {
            self.engine
                .update_speed(edges, self.config.wind_speed_sampling_seconds.get());
            log_trace!("wind speed window closed: {} edges", edges);
        }
        due.direction_due && self.engine.is_windy()
    }

    /// Second half of a process call: fold in the vane ratio just read.
    pub(crate) fn finish_process<E: core::fmt::Debug>(
        &mut self,
        ratio_permille: i32,
    ) -> Result<(), Error<E>> {
        self.engine
            .update_direction(ratio_permille, &self.thresholds)
            .map_err(|unmatched| Error::InvalidDividerRatio(unmatched.0))?;
        log_trace!("wind direction sampled: {} permille", ratio_permille);
        Ok(())
    }

    pub(crate) fn wind_speed(&self) -> WindSpeed {
        self.engine.wind_speed()
    }

    pub(crate) fn wind_direction(&self) -> WindDirection {
        self.engine.wind_direction()
    }

    pub(crate) fn latest_vane_degrees(&self) -> u16 {
        self.engine.latest_vane_degrees()
    }

    pub(crate) fn rainfall_um(&self) -> u32 {
        rainfall_um(self.shared.rain_edge_count())
    }

    pub(crate) fn reset(&mut self) {
        log_debug!("measurements reset");
        self.shared.reset();
        self.engine = Engine::new();
    }
}
