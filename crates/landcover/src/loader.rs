//! Loading of rasters by identifier.

use std::collections::HashMap;

use geo::{DenseRaster, raster::io};

use crate::{EncodingVariant, Error, RasterCatalog, Result, harmonize};

/// A raster as stored in its source, not yet harmonized
#[derive(Clone, Debug)]
pub struct SourceRaster {
    pub raster: DenseRaster<f32>,
    pub encoding: EncodingVariant,
}

impl SourceRaster {
    /// The raster mapped onto the canonical class codes
    pub fn harmonized(self) -> DenseRaster<f32> {
        harmonize(self.raster, self.encoding)
    }
}

/// Provides rasters by identifier.
/// Every call reads the raster again, nothing is cached between requests.
pub trait RasterSource {
    /// The encoding of the raster, without loading the data
    fn encoding(&self, id: &str) -> Result<EncodingVariant>;

    /// Load the full raster, declared nodata values are converted to NaN.
    /// Identifiers without backing data result in [`Error::ResourceNotFound`].
    fn load(&self, id: &str) -> Result<SourceRaster>;

    fn load_harmonized(&self, id: &str) -> Result<DenseRaster<f32>> {
        Ok(self.load(id)?.harmonized())
    }
}

impl RasterSource for RasterCatalog {
    fn encoding(&self, id: &str) -> Result<EncodingVariant> {
        Ok(self.get(id)?.encoding())
    }

    fn load(&self, id: &str) -> Result<SourceRaster> {
        let entry = self.get(id)?;
        let encoding = entry.encoding();
        log::debug!("Load raster '{id}' from {}", entry.path.display());

        let (mut georef, data) = io::read_raster_band::<f32>(&entry.path).map_err(|err| match err {
            geo::Error::InvalidPath(path) => Error::ResourceNotFound(format!("Raster '{id}' ({})", path.display())),
            err => Error::Geo(err),
        })?;

        // 0% impervious surface is a valid measurement
        if !encoding.is_categoric() && georef.nodata() == Some(0.0) {
            log::debug!("Ignoring nodata value 0 of percentage raster '{id}'");
            georef.set_nodata(None);
        }

        Ok(SourceRaster {
            raster: DenseRaster::new_init_nodata(georef, data)?,
            encoding,
        })
    }
}

/// Raster source backed by rasters that are already in memory
#[derive(Clone, Debug, Default)]
pub struct InMemorySource {
    rasters: HashMap<String, SourceRaster>,
}

impl InMemorySource {
    pub fn new() -> Self {
        InMemorySource::default()
    }

    pub fn with_raster(mut self, id: impl Into<String>, encoding: EncodingVariant, raster: DenseRaster<f32>) -> Self {
        self.rasters.insert(id.into(), SourceRaster { raster, encoding });
        self
    }
}

impl RasterSource for InMemorySource {
    fn encoding(&self, id: &str) -> Result<EncodingVariant> {
        self.rasters
            .get(id)
            .map(|src| src.encoding)
            .ok_or_else(|| Error::ResourceNotFound(format!("Unknown raster id '{id}'")))
    }

    fn load(&self, id: &str) -> Result<SourceRaster> {
        self.rasters
            .get(id)
            .cloned()
            .ok_or_else(|| Error::ResourceNotFound(format!("Unknown raster id '{id}'")))
    }
}

#[cfg(test)]
mod tests {
    use geo::{CellSize, Columns, GeoReference, Point, RasterSize, Rows, crs::epsg, testutils::write_geotiff};
    use tiff::encoder::colortype;

    use super::*;
    use crate::{CatalogEntry, ScenarioFamily};

    fn test_georef() -> GeoReference {
        GeoReference::with_origin(
            epsg::SWISS_LV95.to_string(),
            RasterSize::with_rows_cols(Rows(2), Columns(2)),
            Point::new(2_530_000.0, 1_150_000.0),
            CellSize::square(100.0),
            Some(255.0),
        )
    }

    #[test_log::test]
    fn load_from_catalog() -> Result<()> {
        let tmp = tempfile::tempdir()?;
        write_geotiff::<colortype::Gray8>(&tmp.path().join("old.tif"), &test_georef(), &[0, 13, 255, 3])?;

        let catalog = RasterCatalog::builder()
            .data_dir(tmp.path())
            .add(CatalogEntry::new("old", "old.tif", ScenarioFamily::Historical, "1979_1985"))
            .add(CatalogEntry::new("gone", "gone.tif", ScenarioFamily::Historical, "1992_1997"))
            .build()?;

        let src = catalog.load("old")?;
        assert_eq!(src.encoding, EncodingVariant::Legacy);
        assert_eq!(src.raster.metadata().epsg(), Some(epsg::SWISS_LV95));
        assert_eq!(
            src.raster.iter_opt().collect::<Vec<_>>(),
            vec![Some(0.0), Some(13.0), None, Some(3.0)]
        );

        let harmonized = catalog.load_harmonized("old")?;
        assert_eq!(
            harmonized.iter_opt().collect::<Vec<_>>(),
            vec![None, Some(16.0), None, Some(15.0)]
        );

        assert!(matches!(catalog.load("gone"), Err(Error::ResourceNotFound(_))));
        assert!(matches!(catalog.load("unknown"), Err(Error::ResourceNotFound(_))));
        Ok(())
    }

    #[test]
    fn declared_zero_nodata_depends_on_encoding() -> Result<()> {
        let tmp = tempfile::tempdir()?;
        let georef = test_georef().copy_with_nodata(Some(0.0));
        write_geotiff::<colortype::Gray32Float>(&tmp.path().join("isa.tif"), &georef, &[0.0, 12.5, 100.0, 0.0])?;
        write_geotiff::<colortype::Gray32Float>(&tmp.path().join("ssp.tif"), &georef, &[0.0, 2.0, 9.0, 0.0])?;

        let catalog = RasterCatalog::builder()
            .data_dir(tmp.path())
            .add(CatalogEntry::new("isa", "isa.tif", ScenarioFamily::RcpSsp, "2020"))
            .add(CatalogEntry::new("ssp", "ssp.tif", ScenarioFamily::Ssp, "2020"))
            .build()?;

        let isa = catalog.load("isa")?;
        assert_eq!(isa.raster.metadata().nodata(), None);
        assert_eq!(isa.raster.as_slice(), &[0.0, 12.5, 100.0, 0.0]);

        let ssp = catalog.load("ssp")?;
        assert_eq!(
            ssp.raster.iter_opt().collect::<Vec<_>>(),
            vec![None, Some(2.0), Some(9.0), None]
        );
        Ok(())
    }

    #[test]
    fn in_memory_source() -> Result<()> {
        let raster = DenseRaster::<f32>::new(test_georef(), vec![1.0, 2.0, 24.0, -1.0])?;
        let source = InMemorySource::new().with_raster("ssp", EncodingVariant::RcpSsp, raster);

        assert_eq!(source.encoding("ssp")?, EncodingVariant::RcpSsp);
        assert_eq!(
            source.load_harmonized("ssp")?.iter_opt().collect::<Vec<_>>(),
            vec![Some(1.0), Some(2.0), Some(16.0), None]
        );
        assert!(matches!(source.load("other"), Err(Error::ResourceNotFound(_))));
        Ok(())
    }
}
