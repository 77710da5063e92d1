//! Pure rust geotiff reader, supports single band images with the georeferencing stored in the geotiff tags.

use std::{
    fs::File,
    io::{BufReader, Read, Seek},
    path::Path,
};

use tiff::{
    decoder::{Decoder, DecodingResult, Limits},
    tags::Tag,
};

use crate::{ArrayNum, Columns, Error, GeoReference, RasterSize, Result, Rows, crs::Epsg};

const GEOKEY_GEOGRAPHIC_TYPE: u16 = 2048;
const GEOKEY_PROJECTED_CS_TYPE: u16 = 3072;

fn open_decoder(path: &Path) -> Result<Decoder<BufReader<File>>> {
    let file = BufReader::new(File::open(path)?);
    Ok(Decoder::new(file)?.with_limits(Limits::unlimited()))
}

fn read_raster_size<R: Read + Seek>(decoder: &mut Decoder<R>) -> Result<RasterSize> {
    let (width, height) = decoder.dimensions()?;
    Ok(RasterSize::with_rows_cols(Rows(height as i32), Columns(width as i32)))
}

fn read_pixel_scale<R: Read + Seek>(decoder: &mut Decoder<R>) -> Option<(f64, f64)> {
    match decoder.get_tag_f64_vec(Tag::ModelPixelScaleTag) {
        Ok(values) if values.len() >= 2 => Some((values[0], values[1])),
        _ => None,
    }
}

fn read_geo_transform<R: Read + Seek>(decoder: &mut Decoder<R>) -> Result<Option<[f64; 6]>> {
    if let Ok(transform) = decoder.get_tag_f64_vec(Tag::ModelTransformationTag) {
        if transform.len() < 8 {
            return Err(Error::Runtime("ModelTransformation must have 16 values".into()));
        }

        return Ok(Some([transform[3], transform[0], transform[1], transform[7], transform[4], transform[5]]));
    }

    let Some((pixel_scale_x, pixel_scale_y)) = read_pixel_scale(decoder) else {
        log::debug!("No pixel scale info");
        return Ok(None);
    };

    let tie_points = match decoder.get_tag_f64_vec(Tag::ModelTiepointTag) {
        Ok(values) if values.len() >= 6 => values,
        Ok(_) => return Err(Error::Runtime("ModelTiepoint must have 6 values".into())),
        Err(_) => {
            log::debug!("No tie points info");
            return Ok(None);
        }
    };

    if pixel_scale_x == 0.0 || pixel_scale_y == 0.0 {
        return Err(Error::Runtime("No cell sizes present in geotiff".into()));
    }

    Ok(Some([
        tie_points[3] - tie_points[0] * pixel_scale_x,
        pixel_scale_x,
        0.0,
        tie_points[4] + tie_points[1] * pixel_scale_y,
        0.0,
        -pixel_scale_y,
    ]))
}

/// The EPSG code from the geokey directory, projected systems take precedence over geographic ones
fn read_epsg<R: Read + Seek>(decoder: &mut Decoder<R>) -> Option<Epsg> {
    let key_dir = decoder.get_tag_u16_vec(Tag::GeoKeyDirectoryTag).ok()?;
    if key_dir.len() < 4 || key_dir[0] != 1 {
        return None;
    }

    let mut projected = None;
    let mut geographic = None;
    for key in key_dir[4..].chunks_exact(4) {
        // only inline values are supported (tag location 0)
        if key[1] != 0 {
            continue;
        }

        match key[0] {
            GEOKEY_PROJECTED_CS_TYPE => projected = Some(Epsg::new(key[3] as u32)),
            GEOKEY_GEOGRAPHIC_TYPE => geographic = Some(Epsg::new(key[3] as u32)),
            _ => {}
        }
    }

    projected.or(geographic)
}

fn read_nodata_value<R: Read + Seek>(decoder: &mut Decoder<R>) -> Option<f64> {
    decoder
        .get_tag_ascii_string(Tag::GdalNodata)
        .ok()
        .and_then(|nodata| nodata.trim_matches(char::from(0)).trim().parse::<f64>().ok())
}

fn read_metadata<R: Read + Seek>(decoder: &mut Decoder<R>) -> Result<GeoReference> {
    let size = read_raster_size(decoder)?;
    let nodata = read_nodata_value(decoder);

    Ok(match read_geo_transform(decoder)? {
        Some(geo_transform) => {
            let projection = read_epsg(decoder).map(|epsg| epsg.to_string()).unwrap_or_default();
            GeoReference::new(projection, size, geo_transform, nodata)
        }
        None => GeoReference::without_spatial_reference(size, nodata),
    })
}

fn convert_image<T: ArrayNum>(image: DecodingResult) -> Vec<T> {
    macro_rules! convert {
        ( $data:ident ) => {
            $data.into_iter().map(T::from_num).collect()
        };
    }

    match image {
        DecodingResult::U8(data) => convert!(data),
        DecodingResult::U16(data) => convert!(data),
        DecodingResult::U32(data) => convert!(data),
        DecodingResult::U64(data) => convert!(data),
        DecodingResult::I8(data) => convert!(data),
        DecodingResult::I16(data) => convert!(data),
        DecodingResult::I32(data) => convert!(data),
        DecodingResult::I64(data) => convert!(data),
        DecodingResult::F32(data) => convert!(data),
        DecodingResult::F64(data) => convert!(data),
    }
}

pub fn read_georeference(path: &Path) -> Result<GeoReference> {
    read_metadata(&mut open_decoder(path)?)
}

pub fn read_band<T: ArrayNum>(path: &Path) -> Result<(GeoReference, Vec<T>)> {
    let mut decoder = open_decoder(path)?;
    let georef = read_metadata(&mut decoder)?;

    let data = convert_image(decoder.read_image()?);
    if data.len() != georef.raster_size().cell_count() {
        return Err(Error::Runtime(format!(
            "Only single band geotiffs are supported ({})",
            path.display()
        )));
    }

    Ok((georef, data))
}
