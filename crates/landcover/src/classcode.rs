use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Land cover class in the canonical classification scheme.
/// Code 0 is reserved for nodata and can not be used as a class.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub struct ClassCode(u16);

impl ClassCode {
    pub const INDUSTRY: ClassCode = ClassCode(1);
    pub const BUILDING: ClassCode = ClassCode(2);
    pub const SPECIAL_URBAN: ClassCode = ClassCode(3);
    pub const URBAN_GREEN: ClassCode = ClassCode(4);
    pub const HORTICULTURE: ClassCode = ClassCode(5);
    pub const ARABLE: ClassCode = ClassCode(6);
    pub const GRASSLAND: ClassCode = ClassCode(7);
    pub const ALPINE_GRASSLAND: ClassCode = ClassCode(8);
    pub const FOREST: ClassCode = ClassCode(9);
    pub const BRUSH: ClassCode = ClassCode(10);
    pub const TREES: ClassCode = ClassCode(11);
    pub const UNPRODUCTIVE_VEGETATION: ClassCode = ClassCode(12);
    pub const BARE_LAND: ClassCode = ClassCode(13);
    pub const GLACIER: ClassCode = ClassCode(14);
    /// Aggregate of transportation and other impervious surfaces
    pub const TRANSPORTATION: ClassCode = ClassCode(15);
    /// Aggregate of standing and flowing water
    pub const WATER: ClassCode = ClassCode(16);

    /// Urban code of the binary urban scenario rasters (1 is non-urban, 2 is urban)
    pub const URBAN: ClassCode = ClassCode(2);

    pub const CANONICAL: [ClassCode; 16] = [
        Self::INDUSTRY,
        Self::BUILDING,
        Self::SPECIAL_URBAN,
        Self::URBAN_GREEN,
        Self::HORTICULTURE,
        Self::ARABLE,
        Self::GRASSLAND,
        Self::ALPINE_GRASSLAND,
        Self::FOREST,
        Self::BRUSH,
        Self::TREES,
        Self::UNPRODUCTIVE_VEGETATION,
        Self::BARE_LAND,
        Self::GLACIER,
        Self::TRANSPORTATION,
        Self::WATER,
    ];

    pub fn new(code: u16) -> Result<Self> {
        if code == 0 {
            return Err(Error::InvalidSpecification(
                "Class code 0 is reserved for nodata".to_string(),
            ));
        }

        Ok(ClassCode(code))
    }

    pub const fn code(&self) -> u16 {
        self.0
    }

    /// Check if a harmonized pixel value is this class, nodata never matches
    #[inline]
    pub fn matches(&self, value: f32) -> bool {
        value == f32::from(self.0)
    }

    /// Name of the class in the canonical scheme, `None` for codes outside of it
    pub fn canonical_name(&self) -> Option<&'static str> {
        Some(match self.0 {
            1 => "Industry",
            2 => "Building",
            3 => "Special urban",
            4 => "Urban green",
            5 => "Horticulture",
            6 => "Arable",
            7 => "Grassland",
            8 => "Alpine grassland",
            9 => "Forest",
            10 => "Brush",
            11 => "Trees",
            12 => "Unproductive vegetation",
            13 => "Bare land",
            14 => "Glacier",
            15 => "Transportation",
            16 => "Water",
            _ => return None,
        })
    }
}

impl TryFrom<u16> for ClassCode {
    type Error = Error;

    fn try_from(code: u16) -> Result<Self> {
        ClassCode::new(code)
    }
}

impl From<ClassCode> for u16 {
    fn from(code: ClassCode) -> Self {
        code.0
    }
}

impl From<ClassCode> for i64 {
    fn from(code: ClassCode) -> Self {
        i64::from(code.0)
    }
}

impl std::fmt::Display for ClassCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.canonical_name() {
            Some(name) => write!(f, "{} ({name})", self.0),
            None => write!(f, "{}", self.0),
        }
    }
}

impl std::str::FromStr for ClassCode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let code = s
            .trim()
            .parse::<u16>()
            .map_err(|_| Error::InvalidSpecification(format!("Invalid class code: '{s}'")))?;
        ClassCode::new(code)
    }
}
