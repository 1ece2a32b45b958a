use crate::common::{Config, Core, InterruptControl, Shared, WindDirection, WindSpeed};
use crate::error::Error;

/// Board support for the blocking driver.
pub trait Hardware: InterruptControl {
    /// Read the wind vane divider output as a ratio of its supply, in
    /// permille (`0..=1000`). May block for the duration of the conversion.
    fn wind_direction_ratio(&mut self) -> Result<i32, Self::Error>;
}

pub struct SEN15901<H: Hardware> {
    hardware: H,
    core: Core,
}

impl<H: Hardware> SEN15901<H> {
    /// Create the driver. Nothing is touched until [`init`](Self::init).
    ///
    /// `shared` holds the state updated by the interrupt hooks and would
    /// normally be a `static`.
    pub fn new(hardware: H, shared: &'static Shared, config: Config) -> Self {
        Self {
            hardware,
            core: Core::new(shared, config),
        }
    }

    pub fn destroy(self) -> H {
        self.hardware
    }

    pub fn config(&self) -> &Config {
        &self.core.config
    }

    /// Reset all measurements and hand the interrupt hooks to the hardware.
    ///
    /// `process_request` is called from the one-second tick interrupt
    /// whenever [`process`](Self::process) should be run.
    pub fn init(&mut self, process_request: fn()) -> Result<(), Error<H::Error>> {
        self.core.reset();
        let hooks = self.core.hooks(process_request);
        self.hardware.init(hooks)?;
        Ok(())
    }

    pub fn de_init(&mut self) -> Result<(), Error<H::Error>> {
        self.hardware.de_init()?;
        Ok(())
    }

    /// Start or stop wind speed and direction measurement. Either way, the
    /// current sampling windows are abandoned.
    pub fn set_wind_measurement(&mut self, enable: bool) -> Result<(), Error<H::Error>> {
        self.core.set_wind_measurement(&mut self.hardware, enable)
    }

    pub fn set_rainfall_measurement(&mut self, enable: bool) -> Result<(), Error<H::Error>> {
        self.hardware.set_rainfall_interrupt(enable)?;
        Ok(())
    }

    /// Start both wind and rainfall measurement.
    pub fn start_measurements(&mut self) -> Result<(), Error<H::Error>> {
        self.set_wind_measurement(true)?;
        self.set_rainfall_measurement(true)
    }

    /// Stop both wind and rainfall measurement.
    pub fn stop_measurements(&mut self) -> Result<(), Error<H::Error>> {
        self.set_wind_measurement(false)?;
        self.set_rainfall_measurement(false)
    }

    /// Update the measurements after a one-second tick.
    ///
    /// Call this after the process request fires. Calling it at any other
    /// time is harmless: without a pending tick it returns immediately.
    ///
    /// If reading the wind vane fails, the wind speed update made in the
    /// same call is kept and the error is returned.
    pub fn process(&mut self) -> Result<(), Error<H::Error>> {
        if !self.core.begin_process() {
            return Ok(());
        }
        let ratio = self.hardware.wind_direction_ratio()?;
        self.core.finish_process(ratio)
    }

    pub fn wind_speed(&self) -> WindSpeed {
        self.core.wind_speed()
    }

    pub fn wind_direction(&self) -> WindDirection {
        self.core.wind_direction()
    }

    /// Position of the vane at the last direction sample, in degrees.
    pub fn latest_vane_degrees(&self) -> u16 {
        self.core.latest_vane_degrees()
    }

    /// Rainfall since the last reset, in µm.
    pub fn rainfall_um(&self) -> u32 {
        self.core.rainfall_um()
    }

    /// Zero every measurement. Enabled measurements keep running.
    pub fn reset_measurements(&mut self) {
        self.core.reset();
    }
}
