/// Angle of the vector `(x, y)` in whole degrees, in `0..360`.
///
/// Uses the compass convention of the vane tables: `x` carries the cosine
/// component and `y` the sine component of each angle. The zero vector has
/// no angle and maps to 0; callers treat it as "undefined" before getting here.
pub(crate) fn atan2_degrees(x: i64, y: i64) -> u16 {
    let degrees = libm::atan2(y as f64, x as f64).to_degrees();
    let rounded = libm::round(degrees) as i32;
    rounded.rem_euclid(360) as u16
}

/// Fold `sample` into the running `average` of `count` earlier samples.
///
/// Computes `average + (sample - average) / (count + 1)` in signed
/// arithmetic, truncating towards zero, and returns the new average and count.
pub(crate) fn rolling_mean(average: u32, count: u32, sample: u32) -> (u32, u32) {
    let average = i64::from(average);
    let delta = i64::from(sample) - average;
    let updated = average + delta / (i64::from(count) + 1);
    (updated as u32, count.saturating_add(1))
}
