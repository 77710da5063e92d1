//! Rasters are arrays with a [`GeoReference`] attached.

pub mod algo;
mod formats;
pub mod io;

use std::path::Path;

use crate::{ArrayNum, DenseArray, GeoReference, Result};

/// Raster implementation using a dense data structure.
pub type DenseRaster<T> = DenseArray<T, GeoReference>;

/// Read the first band of a raster file
pub trait RasterRead: Sized {
    fn read(path: impl AsRef<Path>) -> Result<Self>;
}

impl<T: ArrayNum> RasterRead for DenseRaster<T> {
    fn read(path: impl AsRef<Path>) -> Result<Self> {
        let (georef, data) = io::read_raster_band::<T>(path.as_ref())?;
        DenseRaster::new_init_nodata(georef, data)
    }
}
