use std::fmt::Debug;

use num::NumCast;

use crate::Nodata;

/// Pixel types that can be stored in an array
pub trait ArrayNum: Nodata + NumCast + PartialOrd + Debug + Default + Send + Sync + 'static {
    /// Convert from another numeric type, values that do not fit become nodata
    #[inline]
    fn from_num<U: num::ToPrimitive>(value: U) -> Self {
        NumCast::from(value).unwrap_or(Self::NODATA)
    }
}

macro_rules! impl_array_num {
    ( $( $t:ident ),* ) => {
        $( impl ArrayNum for $t {} )*
    };
}

impl_array_num!(u8, u16, u32, u64, i8, i16, i32, i64, f32, f64);
