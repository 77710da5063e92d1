use std::fmt::Debug;

use crate::{Cell, RasterSize};

/// Number of rows of an array
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Rows(pub i32);

/// Number of columns of an array
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Columns(pub i32);

impl Rows {
    pub const fn count(&self) -> i32 {
        self.0
    }
}

impl Columns {
    pub const fn count(&self) -> i32 {
        self.0
    }
}

impl std::ops::Mul<Columns> for Rows {
    type Output = usize;

    fn mul(self, rhs: Columns) -> usize {
        self.0.max(0) as usize * rhs.0.max(0) as usize
    }
}

impl std::fmt::Display for Rows {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::fmt::Display for Columns {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Metadata that describes the layout of an array
/// Plain arrays only need their size, rasters additionally carry their georeferencing
pub trait ArrayMetadata: Clone + Debug + PartialEq {
    fn size(&self) -> RasterSize;

    /// The nodata value as declared by the data source, `None` if not set
    fn nodata(&self) -> Option<f64>;

    fn sized(size: RasterSize) -> Self;

    fn sized_with_nodata(size: RasterSize, nodata: Option<f64>) -> Self;

    /// Metadata for the sub window of `size` cells that starts at the `top_left` cell
    fn window(&self, top_left: Cell, size: RasterSize) -> Self;
}

impl ArrayMetadata for RasterSize {
    fn size(&self) -> RasterSize {
        *self
    }

    fn nodata(&self) -> Option<f64> {
        None
    }

    fn sized(size: RasterSize) -> Self {
        size
    }

    fn sized_with_nodata(size: RasterSize, _nodata: Option<f64>) -> Self {
        size
    }

    fn window(&self, _top_left: Cell, size: RasterSize) -> Self {
        size
    }
}
