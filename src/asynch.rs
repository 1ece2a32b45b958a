use crate::common::{Config, Core, InterruptControl, Shared, WindDirection, WindSpeed};
use crate::error::Error;

/// Board support for the async driver.
#[allow(async_fn_in_trait)]
pub trait Hardware: InterruptControl {
    /// Read the wind vane divider output as a ratio of its supply, in
    /// permille (`0..=1000`).
    async fn wind_direction_ratio(&mut self) -> Result<i32, Self::Error>;
}

pub struct SEN15901<H: Hardware> {
    hardware: H,
    core: Core,
}

impl<H: Hardware> SEN15901<H> {
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

    pub fn set_wind_measurement(&mut self, enable: bool) -> Result<(), Error<H::Error>> {
        self.core.set_wind_measurement(&mut self.hardware, enable)
    }

    pub fn set_rainfall_measurement(&mut self, enable: bool) -> Result<(), Error<H::Error>> {
        self.hardware.set_rainfall_interrupt(enable)?;
        Ok(())
    }

    pub fn start_measurements(&mut self) -> Result<(), Error<H::Error>> {
        self.set_wind_measurement(true)?;
        self.set_rainfall_measurement(true)
    }

    pub fn stop_measurements(&mut self) -> Result<(), Error<H::Error>> {
        self.set_wind_measurement(false)?;
        self.set_rainfall_measurement(false)
    }

    /// Update the measurements after a one-second tick, awaiting the wind
    /// vane conversion when a direction sample is due.
    pub async fn process(&mut self) -> Result<(), Error<H::Error>> {
        if !self.core.begin_process() {
            return Ok(());
        }
        let ratio = self.hardware.wind_direction_ratio().await?;
        self.core.finish_process(ratio)
    }

    pub fn wind_speed(&self) -> WindSpeed {
        self.core.wind_speed()
    }

    pub fn wind_direction(&self) -> WindDirection {
        self.core.wind_direction()
    }

    pub fn latest_vane_degrees(&self) -> u16 {
        self.core.latest_vane_degrees()
    }

    pub fn rainfall_um(&self) -> u32 {
        self.core.rainfall_um()
    }

    pub fn reset_measurements(&mut self) {
        self.core.reset();
    }
}
