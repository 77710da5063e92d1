use num::{Float, One, Zero};

/// Maps `value` onto the [0, 1] range defined by `min` and `max`, values outside of the range are clamped
#[inline]
pub fn linear_map_to_float<T, TFloat>(value: T, min: T, max: T) -> TFloat
where
    T: Float,
    TFloat: Float + Zero + One,
{
    debug_assert!(min <= max);

    if min >= max || value <= min {
        return TFloat::zero();
    } else if value >= max {
        return TFloat::one();
    }

    let range_width: TFloat = num::cast(max - min).unwrap_or(TFloat::one());
    let offset: TFloat = num::cast(value - min).unwrap_or(TFloat::zero());
    offset / range_width
}

/// Linear interpolation between two byte values
#[inline]
pub fn lerp_u8(start: u8, end: u8, t: f64) -> u8 {
    let value = f64::from(start) + (f64::from(end) - f64::from(start)) * t;
    value.round().clamp(0.0, 255.0) as u8
}
