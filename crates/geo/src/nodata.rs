use num::ToPrimitive;

/// Trait for types that can represent a no-data value in raster data.
/// Typically used for pixel values in rasters, where a specific value indicates that the pixel does not contain valid data.
/// Floating point types use NaN as the no-data value, while integer types use their maximum value for unsigned types
/// and minimum value for signed types.
pub trait Nodata: ToPrimitive + PartialEq + Sized + Copy {
    const NODATA: Self;

    #[inline]
    fn is_nodata(self) -> bool {
        self == Self::NODATA
    }

    /// For importing foreign data that may contain nodata values not adhering to the predefined `Self::NODATA` value.
    fn init_nodata(&mut self, nodata: Self) {
        if *self == nodata {
            *self = Self::NODATA;
        }
    }
}

macro_rules! impl_nodata_fixed_point {
    ( $t:ident, $nodata:ident ) => {
        impl Nodata for $t {
            const NODATA: $t = $t::$nodata;
        }
    };
}

macro_rules! impl_nodata_floating_point {
    ( $t:ident ) => {
        impl Nodata for $t {
            const NODATA: $t = $t::NAN;

            fn is_nodata(self) -> bool {
                self.is_nan()
            }
        }
    };
}

impl_nodata_fixed_point!(u8, MAX);
impl_nodata_fixed_point!(u16, MAX);
impl_nodata_fixed_point!(u32, MAX);
impl_nodata_fixed_point!(u64, MAX);
impl_nodata_fixed_point!(i8, MIN);
impl_nodata_fixed_point!(i16, MIN);
impl_nodata_fixed_point!(i32, MIN);
impl_nodata_fixed_point!(i64, MIN);

impl_nodata_floating_point!(f32);
impl_nodata_floating_point!(f64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nodata_values() {
        assert!(u8::MAX.is_nodata());
        assert!(i32::MIN.is_nodata());
        assert!(f32::NAN.is_nodata());
        assert!(!0.0f32.is_nodata());
        assert!(!0u8.is_nodata());
    }

    #[test]
    fn init_nodata() {
        let mut value = -9999.0f32;
        value.init_nodata(-9999.0);
        assert!(value.is_nan());

        let mut value = 3.0f32;
        value.init_nodata(-9999.0);
        assert_eq!(value, 3.0);

        let mut value = 0u8;
        value.init_nodata(0);
        assert_eq!(value, u8::MAX);
    }
}
