//! Power-switched wind vane divider.
//!
//! The vane's pull-up draws current for as long as it is powered, which adds
//! up on a battery-powered station. Boards that feed the divider from a GPIO
//! (directly or through a load switch) can wrap the reading in
//! [`SwitchedDivider::read`]: the divider is powered, given time to settle,
//! sampled, and powered down again. Use it inside your
//! `Hardware::wind_direction_ratio` implementation.

use embedded_hal::digital::OutputPin;

/// Settle time after powering the divider, long enough for the ADC input
/// filter on typical boards.
pub const DEFAULT_SETTLE_US: u32 = 100;

pub struct SwitchedDivider<P, D> {
    power: P,
    delay: D,
    settle_us: u32,
}

impl<P: OutputPin, D> SwitchedDivider<P, D> {
    pub fn new(power: P, delay: D) -> Self {
        Self::with_settle_time(power, delay, DEFAULT_SETTLE_US)
    }

    pub fn with_settle_time(power: P, delay: D, settle_us: u32) -> Self {
        Self {
            power,
            delay,
            settle_us,
        }
    }

    pub fn destroy(self) -> (P, D) {
        (self.power, self.delay)
    }

    /// Power the divider down again, keeping the sampling error over the pin
    /// error if both failed.
    fn power_down<T, E>(&mut self, sampled: Result<T, E>) -> Result<T, E>
    where
        E: From<P::Error>,
    {
        let powered_down = self.power.set_low();
        let value = sampled?;
        powered_down?;
        Ok(value)
    }
}

impl<P: OutputPin, D: embedded_hal::delay::DelayNs> SwitchedDivider<P, D> {
    /// Run `sample` with the divider powered.
    ///
    /// The divider is powered down afterwards even if `sample` fails.
    pub fn read<T, E>(&mut self, sample: impl FnOnce() -> Result<T, E>) -> Result<T, E>
    where
        E: From<P::Error>,
    {
        self.power.set_high()?;
        self.delay.delay_us(self.settle_us);
        let sampled = sample();
        self.power_down(sampled)
    }
}

#[cfg(feature = "async")]
impl<P: OutputPin, D: embedded_hal_async::delay::DelayNs> SwitchedDivider<P, D> {
    /// Async version of [`read`](Self::read): the settle delay and the
    /// sampling are awaited.
    pub async fn read_async<T, E, F>(&mut self, sample: impl FnOnce() -> F) -> Result<T, E>
    where
        E: From<P::Error>,
        F: core::future::Future<Output = Result<T, E>>,
    {
        self.power.set_high()?;
        self.delay.delay_us(self.settle_us).await;
        let sampled = sample().await;
        self.power_down(sampled)
    }
}
