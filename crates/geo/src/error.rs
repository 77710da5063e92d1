use thiserror::Error;

use crate::RasterSize;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid path: {0}")]
    InvalidPath(std::path::PathBuf),
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("Runtime error: {0}")]
    Runtime(String),
    #[error("Raster dimensions do not match {size1} <-> {size2}")]
    SizeMismatch { size1: RasterSize, size2: RasterSize },
    #[error("IO error: {0}")]
    IOError(#[from] std::io::Error),
    #[cfg(feature = "raster-io-geotiff")]
    #[error("Tiff error: {0}")]
    TiffError(#[from] tiff::TiffError),
    #[cfg(feature = "gdal")]
    #[error("GDAL error: {0}")]
    GdalError(#[from] gdal::errors::GdalError),
    #[error("{0}")]
    InfError(#[from] inf::Error),
}
