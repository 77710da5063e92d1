use std::cmp::Ordering;

use crate::{ArrayMetadata, ArrayNum, DenseArray, Error, Result};

fn to_f64<T>(value: T) -> Result<f64>
where
    T: ArrayNum,
{
    value
        .to_f64()
        .ok_or_else(|| Error::InvalidArgument(format!("Failed to convert raster value to f64: '{value:?}'")))
}

/// Linear interpolated quantiles of sorted data
fn sorted_quantiles<T>(data: &[T], quantile_vals: &[f64]) -> Result<Option<Vec<f64>>>
where
    T: ArrayNum,
{
    if data.is_empty() {
        return Ok(None);
    }

    let mut results = Vec::with_capacity(quantile_vals.len());
    let len = data.len() as f64;

    for &q in quantile_vals {
        let pos = q * (len - 1.0);
        let lower = pos.floor() as usize;
        let upper = pos.ceil() as usize;

        let value = if lower == upper {
            to_f64(data[lower])?
        } else {
            let lower_val = to_f64(data[lower])?;
            let upper_val = to_f64(data[upper])?;
            let weight = pos - lower as f64;
            lower_val * (1.0 - weight) + upper_val * weight
        };

        results.push(value);
    }

    Ok(Some(results))
}

/// Computes the quantiles of the array values, ignoring nodata values.
/// Returns `None` when the array contains no data.
pub fn quantiles<T, Metadata>(array: &DenseArray<T, Metadata>, quantile_vals: &[f64]) -> Result<Option<Vec<f64>>>
where
    T: ArrayNum,
    Metadata: ArrayMetadata,
{
    if quantile_vals.iter().any(|&q| !(0.0..=1.0).contains(&q)) {
        return Err(Error::InvalidArgument("Quantile values must be between 0 and 1".to_string()));
    }

    let mut data: Vec<T> = array.iter_values().collect();
    if data.is_empty() {
        return Ok(None);
    }

    data.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    sorted_quantiles(&data, quantile_vals)
}
