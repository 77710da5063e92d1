//! Helpers to create test data, available for other crates using the `test-utils` feature.

use std::{fs::File, path::Path};

use approx::relative_eq;
use tiff::{
    encoder::{TiffEncoder, TiffValue, colortype},
    tags::Tag,
};

use crate::{ArrayNum, GeoReference, RasterSize, Result};

pub const NOD: f64 = 255.0;

/// Create a vector of the requested type, [`NOD`] values are replaced by the nodata value of the type
pub fn create_vec<T: ArrayNum>(data: &[f64]) -> Vec<T> {
    data.iter()
        .map(|&v| {
            if relative_eq!(v, NOD) {
                T::NODATA
            } else {
                num::NumCast::from(v).expect("f64 could not be converted to the specified type")
            }
        })
        .collect()
}

/// Write a single band geotiff with the georeferencing of `georef` stored in the geotiff tags
pub fn write_geotiff<C: colortype::ColorType>(path: &Path, georef: &GeoReference, data: &[C::Inner]) -> Result<()>
where
    [C::Inner]: TiffValue,
{
    let size = georef.raster_size();
    let mut encoder = TiffEncoder::new(File::create(path)?)?;
    let mut image = encoder.new_image::<C>(size.cols.count() as u32, size.rows.count() as u32)?;

    let top_left = georef.top_left();
    let cell_size = georef.cell_size();
    image
        .encoder()
        .write_tag(Tag::ModelPixelScaleTag, &[cell_size.x(), -cell_size.y(), 0.0][..])?;
    image
        .encoder()
        .write_tag(Tag::ModelTiepointTag, &[0.0, 0.0, 0.0, top_left.x(), top_left.y(), 0.0][..])?;

    if let Some(epsg) = georef.epsg() {
        #[rustfmt::skip]
        let key_directory = [
            1, 1, 0, 2,
            1024, 0, 1, 1, // projected model
            3072, 0, 1, epsg.code() as u16,
        ];
        image.encoder().write_tag(Tag::GeoKeyDirectoryTag, &key_directory[..])?;
    }

    if let Some(nodata) = georef.nodata() {
        image.encoder().write_tag(Tag::GdalNodata, nodata.to_string().as_str())?;
    }

    image.write_data(data)?;
    Ok(())
}

/// Write a byte tiff without any georeferencing tags
pub fn write_plain_tiff(path: &Path, size: RasterSize, data: &[u8]) -> Result<()> {
    let mut encoder = TiffEncoder::new(File::create(path)?)?;
    encoder.write_image::<colortype::Gray8>(size.cols.count() as u32, size.rows.count() as u32, data)?;
    Ok(())
}
