#![warn(clippy::unwrap_used)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub type Result<T = ()> = std::result::Result<T, Error>;

mod array;
mod arraynum;
mod cell;
pub mod crs;
mod densearray;
mod error;
mod georeference;
mod nodata;
pub mod raster;
mod rastersize;
#[cfg(any(test, feature = "test-utils"))]
pub mod testutils;

#[doc(inline)]
pub use array::{ArrayMetadata, Columns, Rows};
#[doc(inline)]
pub use arraynum::ArrayNum;
#[doc(inline)]
pub use cell::Cell;
#[doc(inline)]
pub use densearray::DenseArray;
#[doc(inline)]
pub use error::Error;
#[doc(inline)]
pub use georeference::{CellSize, Extent, GeoReference};
#[doc(inline)]
pub use nodata::Nodata;
#[doc(inline)]
pub use raster::{DenseRaster, RasterRead};
#[doc(inline)]
pub use rastersize::RasterSize;

pub type Point<T = f64> = geo_types::Point<T>;
