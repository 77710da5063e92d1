//! Catalog of the available land cover rasters.
//!
//! Every raster is identified by a string id and carries an explicit [`EncodingVariant`],
//! so the encoding never has to be guessed from the identifier or the file name.

use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::{EncodingVariant, Error, Result};

pub const HISTORICAL_PERIODS: [&str; 4] = ["1979_1985", "1992_1997", "2004_2009", "2013_2018"];

pub const RCP_SCENARIOS: [&str; 2] = ["RCP45", "RCP85"];
pub const RCP_PERIODS: [&str; 3] = ["2020_2045", "2045_2074", "2070_2099"];

pub const SSP_SCENARIOS: [&str; 5] = ["SSP1", "SSP2", "SSP3", "SSP4", "SSP5"];
pub const SSP_YEARS: [u16; 9] = [2020, 2030, 2040, 2050, 2060, 2070, 2080, 2090, 2100];

pub const RCP_SSP_SCENARIOS: [&str; 7] = [
    "SSP1-RCP2.6",
    "SSP2-RCP4.5",
    "SSP3-RPC7.0",
    "SSP4-RCP3.4",
    "SSP4-RCP6.0",
    "SSP5-RCP3.4",
    "SSP5-RCP8.5",
];
pub const RCP_SSP_YEARS: [u16; 17] = [
    2020, 2025, 2030, 2035, 2040, 2045, 2050, 2055, 2060, 2065, 2070, 2075, 2080, 2085, 2090, 2095, 2100,
];

const RASTER_DIR: &str = "clipped_raster";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioFamily {
    /// Observed land use statistics
    Historical,
    /// Land cover projections for the representative concentration pathways
    Rcp,
    /// Binary urban projections for the shared socioeconomic pathways
    Ssp,
    /// Impervious surface percentage projections for the combined pathways
    RcpSsp,
}

impl ScenarioFamily {
    /// The encoding used by the rasters of the family
    pub fn encoding(&self) -> EncodingVariant {
        match self {
            ScenarioFamily::Historical => EncodingVariant::Legacy,
            ScenarioFamily::Rcp | ScenarioFamily::Ssp => EncodingVariant::RcpSsp,
            ScenarioFamily::RcpSsp => EncodingVariant::ImperviousPercentage,
        }
    }
}

impl std::fmt::Display for ScenarioFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScenarioFamily::Historical => write!(f, "Historical"),
            ScenarioFamily::Rcp => write!(f, "RCP"),
            ScenarioFamily::Ssp => write!(f, "SSP"),
            ScenarioFamily::RcpSsp => write!(f, "RCP-SSP"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub id: String,
    /// Location of the raster, relative paths are resolved against the data directory of the catalog
    pub path: PathBuf,
    pub family: ScenarioFamily,
    /// Defaults to the encoding of the family
    #[serde(default)]
    pub encoding: Option<EncodingVariant>,
    /// Time period or year of the raster
    pub period: String,
    #[serde(default)]
    pub scenario: Option<String>,
}

impl CatalogEntry {
    pub fn new(id: impl Into<String>, path: impl Into<PathBuf>, family: ScenarioFamily, period: impl Into<String>) -> Self {
        CatalogEntry {
            id: id.into(),
            path: path.into(),
            family,
            encoding: None,
            period: period.into(),
            scenario: None,
        }
    }

    pub fn with_scenario(mut self, scenario: impl Into<String>) -> Self {
        self.scenario = Some(scenario.into());
        self
    }

    pub fn with_encoding(mut self, encoding: EncodingVariant) -> Self {
        self.encoding = Some(encoding);
        self
    }

    pub fn encoding(&self) -> EncodingVariant {
        self.encoding.unwrap_or_else(|| self.family.encoding())
    }

    /// Display title, e.g. `RCP45 - 2020_2045`
    pub fn title(&self) -> String {
        match &self.scenario {
            Some(scenario) => format!("{scenario} - {}", self.period),
            None => self.period.clone(),
        }
    }
}

/// On disk representation of a catalog
#[derive(Debug, Default, Serialize, Deserialize)]
struct CatalogDocument {
    #[serde(default)]
    data_dir: Option<PathBuf>,
    rasters: Vec<CatalogEntry>,
}

/// Immutable lookup table from raster identifiers to their location and encoding
#[derive(Clone, Debug, Default)]
pub struct RasterCatalog {
    entries: Vec<CatalogEntry>,
    index: HashMap<String, usize>,
}

#[derive(Debug, Default)]
pub struct RasterCatalogBuilder {
    data_dir: Option<PathBuf>,
    entries: Vec<CatalogEntry>,
}

impl RasterCatalogBuilder {
    /// Directory used to resolve relative entry paths
    pub fn data_dir(mut self, data_dir: impl Into<PathBuf>) -> Self {
        self.data_dir = Some(data_dir.into());
        self
    }

    pub fn add(mut self, entry: CatalogEntry) -> Self {
        self.entries.push(entry);
        self
    }

    pub fn extend(mut self, entries: impl IntoIterator<Item = CatalogEntry>) -> Self {
        self.entries.extend(entries);
        self
    }

    pub fn build(self) -> Result<RasterCatalog> {
        let mut index = HashMap::with_capacity(self.entries.len());
        let mut entries = Vec::with_capacity(self.entries.len());

        for mut entry in self.entries {
            if entry.id.is_empty() {
                return Err(Error::InvalidCatalog(format!("Raster without id ({})", entry.path.display())));
            }

            if index.insert(entry.id.clone(), entries.len()).is_some() {
                return Err(Error::InvalidCatalog(format!("Duplicate raster id: {}", entry.id)));
            }

            if let Some(data_dir) = &self.data_dir {
                if entry.path.is_relative() {
                    entry.path = data_dir.join(&entry.path);
                }
            }

            entries.push(entry);
        }

        Ok(RasterCatalog { entries, index })
    }
}

impl RasterCatalog {
    pub fn builder() -> RasterCatalogBuilder {
        RasterCatalogBuilder::default()
    }

    /// The scenario rasters of the land cover viewer, located in the `clipped_raster` directory of `data_dir`
    pub fn standard(data_dir: impl Into<PathBuf>) -> Result<RasterCatalog> {
        let raster_path = |file: String| PathBuf::from(RASTER_DIR).join(file);

        let historical = HISTORICAL_PERIODS.iter().map(|period| {
            CatalogEntry::new(
                *period,
                raster_path(format!("{period}_clipped.tif")),
                ScenarioFamily::Historical,
                *period,
            )
        });

        let rcp = RCP_PERIODS.iter().flat_map(|period| {
            RCP_SCENARIOS.iter().map(move |scenario| {
                CatalogEntry::new(
                    format!("{period}_{scenario}"),
                    raster_path(format!("{period}_{scenario}_clipped.tif")),
                    ScenarioFamily::Rcp,
                    *period,
                )
                .with_scenario(*scenario)
            })
        });

        let ssp = SSP_SCENARIOS.iter().flat_map(|scenario| {
            SSP_YEARS.iter().map(move |year| {
                CatalogEntry::new(
                    format!("{scenario}_{year}"),
                    raster_path(format!("clipped_global_{scenario}_{year}.tif")),
                    ScenarioFamily::Ssp,
                    year.to_string(),
                )
                .with_scenario(*scenario)
            })
        });

        let rcp_ssp = RCP_SSP_YEARS.iter().flat_map(|year| {
            RCP_SSP_SCENARIOS.iter().map(move |scenario| {
                CatalogEntry::new(
                    format!("{year}_{scenario}"),
                    raster_path(format!("clipped_{scenario}_gISA_{year}_1km.tif")),
                    ScenarioFamily::RcpSsp,
                    year.to_string(),
                )
                .with_scenario(*scenario)
            })
        });

        RasterCatalog::builder()
            .data_dir(data_dir)
            .extend(historical)
            .extend(rcp)
            .extend(ssp)
            .extend(rcp_ssp)
            .build()
    }

    /// Parse a JSON catalog, a relative `data_dir` is resolved against `base_dir`
    pub fn from_json_str(json: &str, base_dir: &Path) -> Result<RasterCatalog> {
        let doc: CatalogDocument = serde_json::from_str(json)?;
        let data_dir = match doc.data_dir {
            Some(dir) if dir.is_relative() => base_dir.join(dir),
            Some(dir) => dir,
            None => base_dir.to_path_buf(),
        };

        RasterCatalog::builder().data_dir(data_dir).extend(doc.rasters).build()
    }

    /// Read a JSON catalog, relative paths are resolved against the directory of the catalog file
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<RasterCatalog> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|err| match err.kind() {
            std::io::ErrorKind::NotFound => Error::ResourceNotFound(format!("Raster catalog {}", path.display())),
            _ => Error::IOError(err),
        })?;

        let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
        log::debug!("Read raster catalog: {}", path.display());
        RasterCatalog::from_json_str(&json, base_dir)
    }

    pub fn to_json(&self) -> Result<String> {
        let doc = CatalogDocument {
            data_dir: None,
            rasters: self.entries.clone(),
        };

        Ok(serde_json::to_string_pretty(&doc)?)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Lookup a raster, unknown identifiers are a [`Error::ResourceNotFound`]
    pub fn get(&self, id: &str) -> Result<&CatalogEntry> {
        self.index
            .get(id)
            .map(|&i| &self.entries[i])
            .ok_or_else(|| Error::ResourceNotFound(format!("Unknown raster id '{id}'")))
    }

    pub fn entries(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.entries.iter()
    }

    pub fn ids_for_family(&self, family: ScenarioFamily) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|entry| entry.family == family)
            .map(|entry| entry.id.as_str())
            .collect()
    }

    /// The rasters that can be compared in a transition analysis of the family.
    /// The land cover projections of the RCP family are comparable with the historical observations.
    pub fn transition_candidates(&self, family: ScenarioFamily) -> Vec<&str> {
        let families: &[ScenarioFamily] = match family {
            ScenarioFamily::Rcp => &[ScenarioFamily::Historical, ScenarioFamily::Rcp],
            _ => std::slice::from_ref(&family),
        };

        self.entries
            .iter()
            .filter(|entry| families.contains(&entry.family))
            .map(|entry| entry.id.as_str())
            .collect()
    }
}
