#![warn(clippy::unwrap_used)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub use error::Error;
pub type Result<T = ()> = std::result::Result<T, Error>;

pub mod color;
mod error;
pub mod interpolate;
pub mod legend;

#[doc(inline)]
pub use color::Color;

#[doc(inline)]
pub use legend::CategoricLegend;
#[doc(inline)]
pub use legend::LinearLegend;
