//! Harmonization of the differently coded source rasters onto the canonical class codes.

use geo::{DenseRaster, Nodata};
use serde::{Deserialize, Serialize};

/// How the pixel values of a raster are encoded, determined by the scenario family of the raster
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EncodingVariant {
    /// The 17 class scheme of the historical land use statistics
    Legacy,
    /// Categoric scenario projections using the post 2014 class codes
    RcpSsp,
    /// Continuous percentage of impervious surface [0, 100]
    ImperviousPercentage,
}

impl EncodingVariant {
    pub fn is_categoric(&self) -> bool {
        !matches!(self, EncodingVariant::ImperviousPercentage)
    }
}

impl std::fmt::Display for EncodingVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EncodingVariant::Legacy => write!(f, "legacy"),
            EncodingVariant::RcpSsp => write!(f, "RCP/SSP"),
            EncodingVariant::ImperviousPercentage => write!(f, "impervious percentage"),
        }
    }
}

/// Legacy code → canonical code, standing and flowing water (13, 14) merge into water
#[rustfmt::skip]
const LEGACY_CLASS_MAPPING: [(u8, u8); 17] = [
    (1, 1),   // Industry
    (2, 2),   // Building
    (3, 15),  // Transportation
    (4, 3),   // Special urban
    (5, 4),   // Urban green
    (6, 5),   // Horticulture
    (7, 6),   // Arable
    (8, 7),   // Grassland
    (9, 8),   // Alpine grassland
    (10, 9),  // Forest
    (11, 10), // Brush
    (12, 11), // Trees
    (13, 16), // Water (standing)
    (14, 16), // Water (flowing)
    (15, 12), // Unproductive vegetation
    (16, 13), // Bare land
    (17, 14), // Glacier
];

fn harmonize_legacy(value: f32) -> f32 {
    if value == 0.0 {
        return f32::NODATA;
    }

    LEGACY_CLASS_MAPPING
        .iter()
        .find(|(legacy, _)| f32::from(*legacy) == value)
        .map_or(value, |(_, canonical)| f32::from(*canonical))
}

fn harmonize_rcp_ssp(value: f32) -> f32 {
    if value <= 0.0 {
        f32::NODATA
    } else if value > 14.0 && value < 24.0 {
        15.0
    } else if value >= 24.0 {
        16.0
    } else {
        value
    }
}

/// Harmonize a single pixel value, nodata stays nodata
#[inline]
pub fn harmonize_value(value: f32, encoding: EncodingVariant) -> f32 {
    if value.is_nodata() {
        return value;
    }

    match encoding {
        EncodingVariant::Legacy => harmonize_legacy(value),
        EncodingVariant::RcpSsp => harmonize_rcp_ssp(value),
        EncodingVariant::ImperviousPercentage => value,
    }
}

/// Map the pixel values of a raster onto the canonical class codes.
/// Codes that are not known to the encoding are preserved.
/// For the categoric encodings 0 is nodata, for the impervious percentages 0 is a valid value.
pub fn harmonize(raster: DenseRaster<f32>, encoding: EncodingVariant) -> DenseRaster<f32> {
    raster.unary_mut(|v| harmonize_value(v, encoding))
}

#[cfg(test)]
mod tests {
    use geo::{Columns, GeoReference, RasterSize, Rows};

    use super::*;

    #[test]
    fn legacy_table() {
        #[rustfmt::skip]
        let expected = [
            (1.0, 1.0), (2.0, 2.0), (3.0, 15.0), (4.0, 3.0), (5.0, 4.0), (6.0, 5.0),
            (7.0, 6.0), (8.0, 7.0), (9.0, 8.0), (10.0, 9.0), (11.0, 10.0), (12.0, 11.0),
            (13.0, 16.0), (14.0, 16.0), (15.0, 12.0), (16.0, 13.0), (17.0, 14.0),
        ];

        for (legacy, canonical) in expected {
            assert_eq!(harmonize_value(legacy, EncodingVariant::Legacy), canonical, "legacy code {legacy}");
        }
    }

    #[test]
    fn legacy_unknown_codes_pass_through() {
        assert_eq!(harmonize_value(18.0, EncodingVariant::Legacy), 18.0);
        assert_eq!(harmonize_value(255.0, EncodingVariant::Legacy), 255.0);
        assert_eq!(harmonize_value(-3.0, EncodingVariant::Legacy), -3.0);
        assert_eq!(harmonize_value(2.5, EncodingVariant::Legacy), 2.5);
        assert!(harmonize_value(0.0, EncodingVariant::Legacy).is_nan());
        assert!(harmonize_value(f32::NAN, EncodingVariant::Legacy).is_nan());
    }

    #[test]
    fn rcp_ssp_ranges() {
        for v in -5..=0 {
            assert!(harmonize_value(v as f32, EncodingVariant::RcpSsp).is_nan(), "value {v}");
        }

        for v in 1..=14 {
            assert_eq!(harmonize_value(v as f32, EncodingVariant::RcpSsp), v as f32);
        }

        for v in 15..=23 {
            assert_eq!(harmonize_value(v as f32, EncodingVariant::RcpSsp), 15.0, "value {v}");
        }

        for v in [24, 25, 100, 255] {
            assert_eq!(harmonize_value(v as f32, EncodingVariant::RcpSsp), 16.0, "value {v}");
        }

        assert_eq!(harmonize_value(14.5, EncodingVariant::RcpSsp), 15.0);
        assert_eq!(harmonize_value(23.5, EncodingVariant::RcpSsp), 15.0);
    }

    #[test]
    fn impervious_percentage_keeps_zero() {
        for v in [0.0, 0.5, 42.0, 100.0] {
            assert_eq!(harmonize_value(v, EncodingVariant::ImperviousPercentage), v);
        }

        assert!(harmonize_value(f32::NAN, EncodingVariant::ImperviousPercentage).is_nan());
    }

    #[test]
    fn harmonize_raster() -> geo::Result<()> {
        let size = RasterSize::with_rows_cols(Rows(2), Columns(3));
        let georef = GeoReference::without_spatial_reference(size, None);

        #[rustfmt::skip]
        let raster = DenseRaster::<f32>::new(georef.clone(), vec![
            0.0, 3.0, 13.0,
            14.0, 17.0, 42.0,
        ])?;

        let harmonized = harmonize(raster.clone(), EncodingVariant::Legacy);
        assert_eq!(harmonized.metadata(), &georef);
        assert_eq!(
            harmonized.iter_opt().collect::<Vec<_>>(),
            vec![None, Some(15.0), Some(16.0), Some(16.0), Some(14.0), Some(42.0)]
        );

        let harmonized = harmonize(raster.clone(), EncodingVariant::RcpSsp);
        assert_eq!(
            harmonized.iter_opt().collect::<Vec<_>>(),
            vec![None, Some(3.0), Some(13.0), Some(14.0), Some(15.0), Some(16.0)]
        );

        assert_eq!(harmonize(raster.clone(), EncodingVariant::ImperviousPercentage), raster);
        Ok(())
    }

    #[test]
    fn categoric_encodings() {
        assert!(EncodingVariant::Legacy.is_categoric());
        assert!(EncodingVariant::RcpSsp.is_categoric());
        assert!(!EncodingVariant::ImperviousPercentage.is_categoric());
    }
}
