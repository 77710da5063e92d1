//! Detection of land cover transitions between two rasters.
//!
//! Both rasters are harmonized and aligned before the transition is detected.
//! Alignment crops both rasters to their common size keeping the bottom right corners aligned,
//! this only co-registers rasters that share their bottom right corner and cell size.

use std::collections::BTreeSet;

use geo::{DenseRaster, GeoReference, Nodata, raster::algo};

use crate::{ClassCode, EncodingVariant, Error, RasterSource, Result};

/// Labels of the binary urban transition map
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum UrbanTransition {
    /// No urban pixel in either raster, or nodata
    Background = 0,
    /// Urban in both rasters
    StableUrban = 1,
    /// Non-urban in the first raster, urban in the second
    NewUrban = 2,
    /// Urban in the first raster, non-urban in the second (only when loss tracking is enabled)
    LostUrban = 3,
}

impl UrbanTransition {
    pub const fn label(self) -> u8 {
        self as u8
    }

    pub fn from_label(label: u8) -> Option<Self> {
        match label {
            0 => Some(UrbanTransition::Background),
            1 => Some(UrbanTransition::StableUrban),
            2 => Some(UrbanTransition::NewUrban),
            3 => Some(UrbanTransition::LostUrban),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            UrbanTransition::Background => "No urban change",
            UrbanTransition::StableUrban => "Stable urban",
            UrbanTransition::NewUrban => "New urban",
            UrbanTransition::LostUrban => "Lost urban",
        }
    }
}

/// Label of the set to target map for pixels that transitioned
pub const TRANSITION_LABEL: u8 = 1;
/// Label for pixels without transition
pub const BACKGROUND_LABEL: u8 = 0;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TransitionSpec {
    /// Pixels that changed from any of the source classes into the target class
    SetToTarget { sources: BTreeSet<ClassCode>, target: ClassCode },
    /// Urban gain (and optionally loss) between two rasters
    BinaryUrban { urban: ClassCode, track_loss: bool },
    /// Signed change of the pixel values (percentage points for impervious surface rasters)
    ContinuousDelta,
}

impl TransitionSpec {
    pub fn set_to_target(sources: impl IntoIterator<Item = ClassCode>, target: ClassCode) -> Self {
        TransitionSpec::SetToTarget {
            sources: sources.into_iter().collect(),
            target,
        }
    }

    pub fn binary_urban() -> Self {
        TransitionSpec::BinaryUrban {
            urban: ClassCode::URBAN,
            track_loss: false,
        }
    }

    /// Binary urban transition that also labels the pixels that lost their urban class
    pub fn binary_urban_with_loss() -> Self {
        TransitionSpec::BinaryUrban {
            urban: ClassCode::URBAN,
            track_loss: true,
        }
    }

    pub fn is_categoric(&self) -> bool {
        !matches!(self, TransitionSpec::ContinuousDelta)
    }

    /// Reject degenerate specifications
    pub fn validate(&self) -> Result<()> {
        if let TransitionSpec::SetToTarget { sources, target } = self {
            if sources.is_empty() {
                return Err(Error::InvalidSpecification("No source classes selected".to_string()));
            }

            if sources.len() == 1 && sources.contains(target) {
                return Err(Error::InvalidSpecification(format!(
                    "The only source class is the target class {target}"
                )));
            }
        }

        Ok(())
    }
}

/// The detected transition, georeferenced by the aligned window of the first raster
#[derive(Clone, Debug, PartialEq)]
pub enum TransitionResult {
    /// Categoric transition labels
    Labels(DenseRaster<u8>),
    /// Signed change, NaN where either input has no data
    Delta(DenseRaster<f32>),
}

impl TransitionResult {
    pub fn georeference(&self) -> &GeoReference {
        match self {
            TransitionResult::Labels(ras) => ras.metadata(),
            TransitionResult::Delta(ras) => ras.metadata(),
        }
    }

    pub fn extent(&self) -> geo::Extent {
        self.georeference().extent()
    }

    pub fn projection(&self) -> &str {
        self.georeference().projection()
    }

    pub fn size(&self) -> geo::RasterSize {
        self.georeference().raster_size()
    }

    pub fn labels(&self) -> Option<&DenseRaster<u8>> {
        match self {
            TransitionResult::Labels(ras) => Some(ras),
            TransitionResult::Delta(_) => None,
        }
    }

    pub fn delta(&self) -> Option<&DenseRaster<f32>> {
        match self {
            TransitionResult::Delta(ras) => Some(ras),
            TransitionResult::Labels(_) => None,
        }
    }
}

fn set_to_target(a: &DenseRaster<f32>, b: &DenseRaster<f32>, sources: &BTreeSet<ClassCode>, target: ClassCode) -> Result<DenseRaster<u8>> {
    Ok(a.binary(b, |va, vb| {
        if va.is_nodata() || vb.is_nodata() {
            return BACKGROUND_LABEL;
        }

        if target.matches(vb) && sources.iter().any(|src| src.matches(va)) {
            TRANSITION_LABEL
        } else {
            BACKGROUND_LABEL
        }
    })?)
}

fn binary_urban(a: &DenseRaster<f32>, b: &DenseRaster<f32>, urban: ClassCode, track_loss: bool) -> Result<DenseRaster<u8>> {
    Ok(a.binary(b, |va, vb| {
        if va.is_nodata() || vb.is_nodata() {
            return UrbanTransition::Background.label();
        }

        let label = match (urban.matches(va), urban.matches(vb)) {
            (true, true) => UrbanTransition::StableUrban,
            (false, true) => UrbanTransition::NewUrban,
            (true, false) if track_loss => UrbanTransition::LostUrban,
            _ => UrbanTransition::Background,
        };

        label.label()
    })?)
}

fn continuous_delta(a: &DenseRaster<f32>, b: &DenseRaster<f32>) -> Result<DenseRaster<f32>> {
    Ok(a.binary(b, |va, vb| vb - va)?)
}

/// Detect the transitions between two harmonized rasters.
/// Rasters of different sizes are cropped to their common size keeping the bottom right corners aligned.
pub fn detect_transition(raster_a: &DenseRaster<f32>, raster_b: &DenseRaster<f32>, spec: &TransitionSpec) -> Result<TransitionResult> {
    spec.validate()?;

    let (a, b) = algo::align_bottom_right(raster_a, raster_b)?;
    let georef = a.metadata().copy_with_nodata::<f64>(None);

    Ok(match spec {
        TransitionSpec::SetToTarget { sources, target } => {
            TransitionResult::Labels(set_to_target(&a, &b, sources, *target)?.with_metadata(georef)?)
        }
        TransitionSpec::BinaryUrban { urban, track_loss } => {
            TransitionResult::Labels(binary_urban(&a, &b, *urban, *track_loss)?.with_metadata(georef)?)
        }
        TransitionSpec::ContinuousDelta => TransitionResult::Delta(continuous_delta(&a, &b)?.with_metadata(georef)?),
    })
}

/// Load, harmonize and compare two rasters of the source.
///
/// The request is validated before any raster is loaded:
/// a degenerate specification or identical raster identifiers are an [`Error::InvalidSpecification`].
pub fn compute_transition<S: RasterSource + ?Sized>(source: &S, raster_a: &str, raster_b: &str, spec: &TransitionSpec) -> Result<TransitionResult> {
    spec.validate()?;

    if raster_a == raster_b {
        return Err(Error::InvalidSpecification(format!(
            "A transition needs two different rasters, got '{raster_a}' twice"
        )));
    }

    if matches!(spec, TransitionSpec::ContinuousDelta) {
        for id in [raster_a, raster_b] {
            let encoding = source.encoding(id)?;
            if encoding != EncodingVariant::ImperviousPercentage {
                log::warn!("Continuous delta on raster '{id}' with {encoding} encoding");
            }
        }
    }

    let a = source.load_harmonized(raster_a)?;
    let b = source.load_harmonized(raster_b)?;
    log::debug!("Transition '{raster_a}' -> '{raster_b}': {} and {}", a.size(), b.size());

    detect_transition(&a, &b, spec)
}
