//! Driver units to everyday units.
//!
//! The driver works in integers: wind speed in metres per hour and rainfall
//! in micrometres. These functions are used by the methods on [`WindSpeed`]
//! but are provided here should you need to use them directly.
//!
//! The conversions in the root of this module return `f32`s. If you prefer
//! fixed-point numbers, use the `fixed` feature and the [`fixed_point`]
//! submodule.
//!
//! [`WindSpeed`]: crate::common::WindSpeed

use crate::tables::PERMILLE_MAX;

/// Convert a wind speed in m/h to km/h.
pub fn speed_mh_to_kmh(speed_mh: u32) -> f32 {
    speed_mh as f32 / 1000.0
}

/// Convert a wind speed in m/h to metres per second.
pub fn speed_mh_to_ms(speed_mh: u32) -> f32 {
    speed_mh as f32 / 3600.0
}

/// Convert rainfall in µm to mm (equivalently, litres per square metre).
pub fn rainfall_um_to_mm(rainfall_um: u32) -> f32 {
    rainfall_um as f32 / 1000.0
}

/// Scale a raw ADC code to the permille divider ratio the driver expects
/// from the hardware shim's wind vane reading.
///
/// `full_scale` is the code read with the divider output at the reference
/// voltage, e.g. 4095 for a 12-bit converter referenced to the divider
/// supply. Codes above full scale are clamped.
pub fn adc_code_to_permille(code: u16, full_scale: u16) -> i32 {
    if full_scale == 0 {
        return PERMILLE_MAX;
    }
    let code = code.min(full_scale);
    ((u32::from(code) * PERMILLE_MAX as u32) / u32::from(full_scale)) as i32
}

/// Fixed-point conversions from driver units.
///
/// The same conversions as the parent module, returning numbers from the
/// `fixed` crate. Speeds use 16 fractional bits, enough to represent each
/// m/h step exactly to within a rounding of the last bit.
#[cfg(feature = "fixed")]
pub mod fixed_point {
    use fixed::types::{U16F16, U32F32};

    /// Convert a wind speed in m/h to km/h.
    ///
    /// Saturates at the largest representable value (just under 65536 km/h).
    pub fn speed_mh_to_kmh(speed_mh: u32) -> U16F16 {
        let kmh = U32F32::from_num(speed_mh) / U32F32::from_num(1000);
        U16F16::saturating_from_num(kmh)
    }

    /// Convert rainfall in µm to mm.
    pub fn rainfall_um_to_mm(rainfall_um: u32) -> U32F32 {
        U32F32::from_num(rainfall_um) / U32F32::from_num(1000)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn speed_units() {
        assert_eq!(speed_mh_to_kmh(2400), 2.4);
        assert_eq!(speed_mh_to_ms(36_000), 10.0);
    }

    #[test]
    fn rainfall_units() {
        assert_eq!(rainfall_um_to_mm(2790), 2.79);
    }

    #[test]
    fn adc_codes() {
        assert_eq!(adc_code_to_permille(0, 4095), 0);
        assert_eq!(adc_code_to_permille(4095, 4095), 1000);
        assert_eq!(adc_code_to_permille(2048, 4095), 500);
        assert_eq!(adc_code_to_permille(5000, 4095), 1000);
        assert_eq!(adc_code_to_permille(12, 0), 1000);
    }

    #[cfg(feature = "fixed")]
    #[test]
    fn fixed_point_units() {
        use fixed::types::{U16F16, U32F32};

        assert_eq!(fixed_point::speed_mh_to_kmh(12_000), U16F16::from_num(12));
        assert_eq!(fixed_point::speed_mh_to_kmh(u32::MAX), U16F16::MAX);
        assert_eq!(fixed_point::rainfall_um_to_mm(279_000), U32F32::from_num(279));
    }
}
