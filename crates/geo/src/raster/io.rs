//! Low-level functions to read raster data.
//! For general use, the [`crate::raster::RasterRead`] trait should be used.

use std::path::{Path, PathBuf};

use crate::{ArrayNum, Error, GeoReference, Result};

/// Read the first band of the raster, the data is returned as stored in the file
/// so nodata values are not yet converted to [`crate::Nodata::NODATA`].
/// When the `gdal` feature is enabled, gdal is used to read the file, otherwise the builtin geotiff reader is used.
pub fn read_raster_band<T: ArrayNum>(path: &Path) -> Result<(GeoReference, Vec<T>)> {
    if !path.is_file() {
        return Err(Error::InvalidPath(PathBuf::from(path)));
    }

    log::debug!("Read raster: {}", path.display());

    cfg_if::cfg_if! {
        if #[cfg(feature = "gdal")] {
            super::formats::gdal::read_band(path)
        } else if #[cfg(feature = "raster-io-geotiff")] {
            super::formats::geotiff::read_band(path)
        } else {
            Err(Error::Runtime(format!(
                "No raster format support compiled in, failed to read {}",
                path.display()
            )))
        }
    }
}

pub fn read_raster_georeference(path: &Path) -> Result<GeoReference> {
    if !path.is_file() {
        return Err(Error::InvalidPath(PathBuf::from(path)));
    }

    cfg_if::cfg_if! {
        if #[cfg(feature = "gdal")] {
            super::formats::gdal::read_georeference(path)
        } else if #[cfg(feature = "raster-io-geotiff")] {
            super::formats::geotiff::read_georeference(path)
        } else {
            Err(Error::Runtime(format!(
                "No raster format support compiled in, failed to read {}",
                path.display()
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file() {
        let path = Path::new("/this/path/does/not/exist.tif");
        assert!(matches!(read_raster_band::<f32>(path), Err(Error::InvalidPath(_))));
        assert!(matches!(read_raster_georeference(path), Err(Error::InvalidPath(_))));
    }
}
