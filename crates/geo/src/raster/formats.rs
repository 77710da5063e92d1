#[cfg(feature = "gdal")]
pub mod gdal;
#[cfg(feature = "raster-io-geotiff")]
pub mod geotiff;
