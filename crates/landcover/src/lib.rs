#![warn(clippy::unwrap_used)]

//! Land cover scenario analysis: harmonization of differently coded land cover rasters
//! and detection of the land cover transitions between two rasters.

pub type Result<T = ()> = std::result::Result<T, Error>;

pub mod catalog;
mod classcode;
pub mod display;
mod error;
mod harmonize;
mod loader;
pub mod summary;
pub mod transition;

#[doc(inline)]
pub use catalog::{CatalogEntry, RasterCatalog, ScenarioFamily};
#[doc(inline)]
pub use classcode::ClassCode;
#[doc(inline)]
pub use error::Error;
#[doc(inline)]
pub use harmonize::{EncodingVariant, harmonize, harmonize_value};
#[doc(inline)]
pub use loader::{InMemorySource, RasterSource, SourceRaster};
#[doc(inline)]
pub use summary::{TransitionSummary, summarize};
#[doc(inline)]
pub use transition::{TransitionResult, TransitionSpec, UrbanTransition, compute_transition, detect_transition};
