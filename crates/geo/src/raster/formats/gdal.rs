use std::path::Path;

use crate::{ArrayNum, Columns, GeoReference, RasterSize, Result, Rows, crs::Epsg};

fn read_band_metadata(ds: &gdal::Dataset, band_index: usize) -> Result<GeoReference> {
    let rasterband = ds.rasterband(band_index)?;

    let (width, height) = ds.raster_size();
    let projection = match ds.spatial_ref().and_then(|srs| srs.auth_code()) {
        Ok(code) => Epsg::new(code as u32).to_string(),
        Err(_) => ds.projection(),
    };

    Ok(GeoReference::new(
        projection,
        RasterSize::with_rows_cols(Rows(height as i32), Columns(width as i32)),
        ds.geo_transform()?,
        rasterband.no_data_value(),
    ))
}

pub fn read_georeference(path: &Path) -> Result<GeoReference> {
    let ds = gdal::Dataset::open(path)?;
    read_band_metadata(&ds, 1)
}

pub fn read_band<T: ArrayNum>(path: &Path) -> Result<(GeoReference, Vec<T>)> {
    let ds = gdal::Dataset::open(path)?;
    let georef = read_band_metadata(&ds, 1)?;

    let buffer = ds.rasterband(1)?.read_band_as::<f64>()?;
    let data = buffer.data().iter().map(|&v| T::from_num(v)).collect();

    Ok((georef, data))
}
