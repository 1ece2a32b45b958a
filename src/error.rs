#[derive(Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<HardwareError>
where
    HardwareError: core::fmt::Debug,
{
    /// The wind vane divider ratio (in permille) did not fall under any of
    /// the direction thresholds. Valid ratios lie in `0..=1000`, so this
    /// points to a misbehaving ADC or a corrupted threshold table.
    InvalidDividerRatio(i32),
    Hardware(HardwareError),
}

impl<HardwareError> From<HardwareError> for Error<HardwareError>
where
    HardwareError: core::fmt::Debug,
{
    fn from(value: HardwareError) -> Self {
        Error::Hardware(value)
    }
}

impl<HardwareError> core::fmt::Display for Error<HardwareError>
where
    HardwareError: core::fmt::Debug,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::InvalidDividerRatio(ratio) => {
                write!(f, "No wind direction matches divider ratio {ratio}‰")
            }
            Error::Hardware(e) => write!(f, "Received hardware error: {:?}", e),
        }
    }
}

impl<E> core::error::Error for Error<E> where E: core::fmt::Debug {}
