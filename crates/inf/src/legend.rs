use std::{collections::BTreeMap, ops::Range, path::Path};

use num::NumCast;

use crate::{
    Error, Result,
    color::{self, Color},
    interpolate::{lerp_u8, linear_map_to_float},
};

/// Options for mapping values that can not be mapped by the legend
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MappingConfig {
    /// The color of the nodata pixels
    pub nodata_color: Color,
    /// The color of values that have no category in the legend
    pub unknown_color: Color,
}

impl Default for MappingConfig {
    fn default() -> Self {
        MappingConfig {
            nodata_color: color::TRANSPARENT,
            unknown_color: color::BLACK,
        }
    }
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Default, Clone, Debug, PartialEq)]
pub struct LegendCategory {
    pub color: Color,
    pub name: String,
}

impl LegendCategory {
    pub fn new(color: Color, name: impl Into<String>) -> Self {
        LegendCategory { color, name: name.into() }
    }
}

/// Categoric legend: every integer class code maps to a color and a label.
///
/// The legend is immutable once created, lookups are total:
/// codes without a category get the `unknown_color` of the [`MappingConfig`] and an empty label.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Default, Clone, Debug, PartialEq)]
pub struct CategoricLegend {
    pub title: String,
    categories: BTreeMap<i64, LegendCategory>,
    mapping_config: MappingConfig,
}

impl CategoricLegend {
    pub fn new(categories: impl IntoIterator<Item = (i64, LegendCategory)>, mapping_config: MappingConfig) -> Self {
        CategoricLegend {
            title: String::default(),
            categories: categories.into_iter().collect(),
            mapping_config,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Parses a palette text: one `class_code, r, g, b, a, label...` record per line.
    /// The color components are in the [0, 255] range, the label is the remainder of the line joined with spaces.
    /// Lines with fewer than 6 fields are skipped, lines with unparsable numbers are skipped with a warning.
    pub fn from_palette_str(palette: &str) -> Self {
        let categories = palette
            .lines()
            .enumerate()
            .filter_map(|(line_nr, line)| match parse_palette_line(line) {
                Ok(entry) => entry,
                Err(err) => {
                    log::warn!("Skipping palette line {}: {err}", line_nr + 1);
                    None
                }
            });

        CategoricLegend::new(categories, MappingConfig::default())
    }

    pub fn from_palette_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(Error::InvalidPath(path.to_path_buf()));
        }

        let legend = CategoricLegend::from_palette_str(&std::fs::read_to_string(path)?);
        log::debug!("Loaded {} legend categories from {}", legend.category_count(), path.display());
        Ok(legend)
    }

    pub fn mapping_config(&self) -> &MappingConfig {
        &self.mapping_config
    }

    pub fn category_count(&self) -> usize {
        self.categories.len()
    }

    pub fn contains(&self, code: i64) -> bool {
        self.categories.contains_key(&code)
    }

    /// The categories ordered by class code
    pub fn entries(&self) -> impl Iterator<Item = (i64, &LegendCategory)> {
        self.categories.iter().map(|(code, cat)| (*code, cat))
    }

    pub fn codes(&self) -> impl Iterator<Item = i64> + '_ {
        self.categories.keys().copied()
    }

    pub fn color_of(&self, code: i64) -> Color {
        match self.categories.get(&code) {
            Some(cat) => cat.color,
            None => {
                log::debug!("No legend category for class code {code}");
                self.mapping_config.unknown_color
            }
        }
    }

    pub fn label_of(&self, code: i64) -> &str {
        self.categories.get(&code).map_or("", |cat| cat.name.as_str())
    }

    /// Reverse lookup of a class code by its label, the first matching code is returned
    pub fn code_for_label(&self, label: &str) -> Option<i64> {
        self.categories.iter().find(|(_, cat)| cat.name == label).map(|(code, _)| *code)
    }

    /// Color for a pixel value, nan and nodata values get the nodata color
    pub fn color_for_value<T: Copy + NumCast>(&self, value: T, nodata: Option<T>) -> Color {
        let Some(value) = value.to_f64() else {
            return self.mapping_config.nodata_color;
        };

        if value.is_nan() || nodata.and_then(|nod| nod.to_f64()) == Some(value) {
            return self.mapping_config.nodata_color;
        }

        if value.fract() != 0.0 {
            return self.mapping_config.unknown_color;
        }

        self.color_of(value as i64)
    }

    pub fn apply_to_data<T: Copy + NumCast>(&self, data: &[T], nodata: Option<T>) -> Vec<Color> {
        data.iter().map(|&value| self.color_for_value(value, nodata)).collect()
    }
}

fn parse_palette_line(line: &str) -> Result<Option<(i64, LegendCategory)>> {
    let parts: Vec<&str> = line.trim().split(',').collect();
    if parts.len() < 6 {
        return Ok(None);
    }

    let code = parts[0].trim().parse::<i64>()?;
    let mut rgba = [0.0f32; 4];
    for (component, part) in rgba.iter_mut().zip(&parts[1..5]) {
        *component = part.trim().parse::<f32>()? / 255.0;
    }

    let label = parts[5..].join(" ").trim().to_string();
    Ok(Some((
        code,
        LegendCategory::new(Color::from_normalized(rgba[0], rgba[1], rgba[2], rgba[3]), label),
    )))
}

/// Linear legend: values are mapped on a color ramp with evenly spaced color stops.
/// Values below or above the value range get the first or last color of the ramp.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct LinearLegend {
    pub title: String,
    value_range: Range<f64>,
    color_stops: Vec<Color>,
    mapping_config: MappingConfig,
}

impl LinearLegend {
    pub fn new(color_stops: Vec<Color>, value_range: Range<f64>, mapping_config: MappingConfig) -> Result<Self> {
        if color_stops.is_empty() {
            return Err(Error::InvalidArgument("A linear legend needs at least one color".into()));
        }

        if !value_range.start.is_finite() || !value_range.end.is_finite() || value_range.start > value_range.end {
            return Err(Error::InvalidArgument(format!(
                "Invalid linear legend value range: {:?}",
                value_range
            )));
        }

        Ok(LinearLegend {
            title: String::default(),
            value_range,
            color_stops,
            mapping_config,
        })
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn value_range(&self) -> Range<f64> {
        self.value_range.clone()
    }

    /// Color at the relative position [0, 1] of the color ramp
    fn ramp_color(&self, position: f64) -> Color {
        let segments = self.color_stops.len() - 1;
        if segments == 0 {
            return self.color_stops[0];
        }

        let scaled = position.clamp(0.0, 1.0) * segments as f64;
        let index = (scaled.floor() as usize).min(segments - 1);
        let t = scaled - index as f64;

        let (from, to) = (self.color_stops[index], self.color_stops[index + 1]);
        Color::rgba(
            lerp_u8(from.r, to.r, t),
            lerp_u8(from.g, to.g, t),
            lerp_u8(from.b, to.b, t),
            lerp_u8(from.a, to.a, t),
        )
    }

    pub fn color_for_value<T: Copy + NumCast>(&self, value: T, nodata: Option<T>) -> Color {
        let Some(value) = value.to_f64() else {
            return self.mapping_config.nodata_color;
        };

        if value.is_nan() || nodata.and_then(|nod| nod.to_f64()) == Some(value) {
            return self.mapping_config.nodata_color;
        }

        let position = linear_map_to_float::<f64, f64>(value, self.value_range.start, self.value_range.end);
        self.ramp_color(position)
    }

    pub fn apply_to_data<T: Copy + NumCast>(&self, data: &[T], nodata: Option<T>) -> Vec<Color> {
        data.iter().map(|&value| self.color_for_value(value, nodata)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PALETTE: &str = "\
1,200,0,0,255,Industry
2,255,0,51,255,Building
9,0,128,0,255,Forest
16,0,0,255,255,Water
";

    #[test]
    fn parse_palette() {
        let legend = CategoricLegend::from_palette_str(PALETTE);
        assert_eq!(legend.category_count(), 4);
        assert_eq!(legend.label_of(9), "Forest");
        assert_eq!(legend.color_of(1), Color::rgb(200, 0, 0));
        assert_eq!(legend.color_of(2).normalized(), [1.0, 0.0, 0.2, 1.0]);
        assert_eq!(legend.codes().collect::<Vec<_>>(), vec![1, 2, 9, 16]);
    }

    #[test]
    fn label_containing_delimiter() {
        let legend = CategoricLegend::from_palette_str("12,10,20,30,255,Unproductive,vegetation\n");
        assert_eq!(legend.label_of(12), "Unproductive vegetation");
        assert_eq!(legend.code_for_label("Unproductive vegetation"), Some(12));
    }

    #[test_log::test]
    fn malformed_lines_are_skipped() {
        let legend = CategoricLegend::from_palette_str(
            "\
# comment line
3,1,2,3
\n
x,1,2,3,255,Not a number
4,1,2,3,255,Valid
",
        );

        assert_eq!(legend.category_count(), 1);
        assert!(legend.contains(4));
        assert!(!legend.contains(3));
    }

    #[test]
    fn unknown_code_fallback() {
        let legend = CategoricLegend::from_palette_str(PALETTE);
        assert_eq!(legend.color_of(42), color::BLACK);
        assert_eq!(legend.color_of(42).a, 255);
        assert_eq!(legend.label_of(42), "");
        assert_eq!(legend.code_for_label("Glacier"), None);
    }

    #[test]
    fn empty_legend_is_total() {
        let legend = CategoricLegend::default();
        assert_eq!(legend.color_of(1), color::BLACK);
        assert_eq!(legend.label_of(1), "");
    }

    #[test]
    fn apply_to_data_with_nodata() {
        let legend = CategoricLegend::from_palette_str(PALETTE);
        let colors = legend.apply_to_data(&[1.0f32, f32::NAN, 16.0, 7.0, 2.5], None);
        assert_eq!(
            colors,
            vec![
                Color::rgb(200, 0, 0),
                color::TRANSPARENT,
                Color::rgb(0, 0, 255),
                color::BLACK,
                color::BLACK,
            ]
        );

        let colors = legend.apply_to_data(&[1u8, 255], Some(255));
        assert_eq!(colors, vec![Color::rgb(200, 0, 0), color::TRANSPARENT]);
    }

    #[test]
    fn palette_file() -> Result<()> {
        let tmp = tempfile::tempdir()?;
        let path = tmp.path().join("palette.txt");
        std::fs::write(&path, PALETTE)?;

        let legend = CategoricLegend::from_palette_file(&path)?;
        assert_eq!(legend, CategoricLegend::from_palette_str(PALETTE));

        assert!(matches!(
            CategoricLegend::from_palette_file(tmp.path().join("missing.txt")),
            Err(Error::InvalidPath(_))
        ));

        Ok(())
    }

    #[test]
    fn linear_legend_ramp() -> Result<()> {
        let legend = LinearLegend::new(vec![color::TRANSPARENT, color::RED], 0.0..100.0, MappingConfig::default())?;

        assert_eq!(legend.color_for_value(0.0, None), color::TRANSPARENT);
        assert_eq!(legend.color_for_value(100.0, None), color::RED);
        assert_eq!(legend.color_for_value(50.0, None), Color::rgba(128, 0, 0, 128));
        // clamped
        assert_eq!(legend.color_for_value(-10.0, None), color::TRANSPARENT);
        assert_eq!(legend.color_for_value(250.0, None), color::RED);
        assert_eq!(legend.color_for_value(f32::NAN, None), color::TRANSPARENT);

        Ok(())
    }

    #[test]
    fn linear_legend_multiple_stops() -> Result<()> {
        let legend = LinearLegend::new(vec![color::TRANSPARENT, color::YELLOW, color::RED], 0.0..100.0, MappingConfig::default())?;

        assert_eq!(legend.color_for_value(25.0, None), Color::rgba(128, 128, 0, 128));
        assert_eq!(legend.color_for_value(50.0, None), color::YELLOW);
        assert_eq!(legend.color_for_value(75.0, None), Color::rgb(255, 128, 0));
        assert_eq!(legend.color_for_value(100.0, None), color::RED);

        Ok(())
    }

    #[test]
    fn linear_legend_invalid() {
        assert!(LinearLegend::new(vec![], 0.0..1.0, MappingConfig::default()).is_err());
        assert!(LinearLegend::new(vec![color::RED], 10.0..1.0, MappingConfig::default()).is_err());
        assert!(LinearLegend::new(vec![color::RED], 0.0..f64::NAN, MappingConfig::default()).is_err());
    }
}
