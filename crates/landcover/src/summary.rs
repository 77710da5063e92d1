//! Statistics of transition results, used to describe and scale the rendered maps.

use std::collections::BTreeMap;

use geo::raster::algo;

use crate::{Result, TransitionResult};

/// Quantile of the absolute change used to scale the color ramp of delta maps
pub const DISPLAY_QUANTILE: f64 = 0.99;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DeltaStatistics {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    /// 99th percentile of the absolute change
    pub abs_p99: f64,
    pub data_count: usize,
    pub nodata_count: usize,
}

#[derive(Clone, Debug, PartialEq)]
pub enum TransitionSummary {
    /// Number of pixels per transition label
    Labels(BTreeMap<u8, usize>),
    /// `None` when no pixel has data in both rasters
    Delta(Option<DeltaStatistics>),
}

impl TransitionSummary {
    pub fn label_count(&self, label: u8) -> usize {
        match self {
            TransitionSummary::Labels(counts) => counts.get(&label).copied().unwrap_or(0),
            TransitionSummary::Delta(_) => 0,
        }
    }

    /// Upper bound of the color ramp for delta maps
    pub fn display_max(&self) -> f64 {
        match self {
            TransitionSummary::Delta(Some(stats)) => stats.abs_p99,
            _ => 0.0,
        }
    }
}

pub fn summarize(result: &TransitionResult) -> Result<TransitionSummary> {
    match result {
        TransitionResult::Labels(labels) => {
            let mut counts = BTreeMap::new();
            for &label in labels.iter() {
                *counts.entry(label).or_insert(0) += 1;
            }

            Ok(TransitionSummary::Labels(counts))
        }
        TransitionResult::Delta(delta) => {
            let data_count = delta.len() - delta.nodata_count();
            if data_count == 0 {
                return Ok(TransitionSummary::Delta(None));
            }

            let (mut min, mut max, mut sum) = (f64::INFINITY, f64::NEG_INFINITY, 0.0);
            for v in delta.iter_values().map(f64::from) {
                min = min.min(v);
                max = max.max(v);
                sum += v;
            }

            let abs_delta = delta.unary(|v| v.abs());
            let abs_p99 = algo::quantiles(&abs_delta, &[DISPLAY_QUANTILE])?
                .and_then(|q| q.first().copied())
                .unwrap_or(0.0);

            Ok(TransitionSummary::Delta(Some(DeltaStatistics {
                min,
                max,
                mean: sum / data_count as f64,
                abs_p99,
                data_count,
                nodata_count: delta.nodata_count(),
            })))
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use geo::{Columns, DenseRaster, GeoReference, RasterSize, Rows};

    use super::*;

    fn georef(cols: i32) -> GeoReference {
        GeoReference::without_spatial_reference(RasterSize::with_rows_cols(Rows(1), Columns(cols)), None)
    }

    #[test]
    fn label_counts() -> Result<()> {
        let labels = DenseRaster::<u8>::new(georef(6), vec![0, 1, 2, 2, 0, 2])?;
        let summary = summarize(&TransitionResult::Labels(labels))?;

        assert_eq!(summary.label_count(0), 2);
        assert_eq!(summary.label_count(1), 1);
        assert_eq!(summary.label_count(2), 3);
        assert_eq!(summary.label_count(3), 0);
        assert_eq!(summary.display_max(), 0.0);
        Ok(())
    }

    #[test]
    fn delta_statistics() -> Result<()> {
        let delta = DenseRaster::<f32>::new(georef(5), vec![5.0, -2.0, f32::NAN, 0.0, -9.0])?;
        let summary = summarize(&TransitionResult::Delta(delta))?;

        let TransitionSummary::Delta(Some(stats)) = summary else {
            panic!("Delta statistics expected");
        };

        assert_eq!(stats.min, -9.0);
        assert_eq!(stats.max, 5.0);
        assert_relative_eq!(stats.mean, -1.5);
        assert_eq!(stats.data_count, 4);
        assert_eq!(stats.nodata_count, 1);
        // sorted absolute values: 0, 2, 5, 9 → position 2.97
        assert_relative_eq!(stats.abs_p99, 5.0 * 0.03 + 9.0 * 0.97, epsilon = 1e-9);
        Ok(())
    }

    #[test]
    fn delta_without_data() -> Result<()> {
        let delta = DenseRaster::<f32>::new(georef(2), vec![f32::NAN, f32::NAN])?;
        let summary = summarize(&TransitionResult::Delta(delta))?;
        assert_eq!(summary, TransitionSummary::Delta(None));
        assert_eq!(summary.display_max(), 0.0);
        Ok(())
    }
}
