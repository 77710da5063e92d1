//! Display legends for scenario rasters and transition maps.

use inf::{
    CategoricLegend, Color, LinearLegend,
    color,
    legend::{LegendCategory, MappingConfig},
};

use crate::{
    ClassCode, Result, ScenarioFamily, TransitionResult, TransitionSpec, UrbanTransition,
    summary::TransitionSummary,
    transition::TRANSITION_LABEL,
};

const IMPERVIOUS_ORANGE: Color = Color::rgb(255, 166, 0);

/// Legend used to render a raster
#[derive(Clone, Debug, PartialEq)]
pub enum DisplayLegend {
    Categoric(CategoricLegend),
    Linear(LinearLegend),
}

impl DisplayLegend {
    pub fn title(&self) -> &str {
        match self {
            DisplayLegend::Categoric(legend) => &legend.title,
            DisplayLegend::Linear(legend) => &legend.title,
        }
    }

    /// Colors for the pixels, NaN pixels are transparent
    pub fn colorize(&self, data: &[f32]) -> Vec<Color> {
        match self {
            DisplayLegend::Categoric(legend) => legend.apply_to_data(data, None),
            DisplayLegend::Linear(legend) => legend.apply_to_data(data, None),
        }
    }

    pub fn colorize_result(&self, result: &TransitionResult) -> Vec<Color> {
        match (self, result) {
            (DisplayLegend::Categoric(legend), TransitionResult::Labels(labels)) => legend.apply_to_data(labels.as_slice(), None),
            (DisplayLegend::Linear(legend), TransitionResult::Labels(labels)) => legend.apply_to_data(labels.as_slice(), None),
            (_, TransitionResult::Delta(delta)) => self.colorize(delta.as_slice()),
        }
    }
}

fn transparent_background() -> MappingConfig {
    MappingConfig {
        nodata_color: color::TRANSPARENT,
        unknown_color: color::TRANSPARENT,
    }
}

/// Highlights the pixels that transitioned, the background is transparent
pub fn set_to_target_legend(title: impl Into<String>) -> CategoricLegend {
    CategoricLegend::new(
        [(i64::from(TRANSITION_LABEL), LegendCategory::new(color::RED, "Transition"))],
        transparent_background(),
    )
    .with_title(title)
}

pub fn urban_transition_legend() -> CategoricLegend {
    let category = |transition: UrbanTransition, color: Color| (i64::from(transition.label()), LegendCategory::new(color, transition.name()));

    CategoricLegend::new(
        [
            category(UrbanTransition::Background, color::TRANSPARENT),
            category(UrbanTransition::StableUrban, color::RED),
            category(UrbanTransition::NewUrban, color::ORANGE),
            category(UrbanTransition::LostUrban, color::BLUE),
        ],
        transparent_background(),
    )
    .with_title("Urban transition")
}

/// Binary urban scenario rasters, only the urban pixels are drawn
pub fn urban_legend() -> CategoricLegend {
    CategoricLegend::new(
        [(i64::from(ClassCode::URBAN), LegendCategory::new(color::RED, "Urban"))],
        transparent_background(),
    )
}

/// Color ramp for the change in impervious surface, from transparent (no change) to red at `display_max`
pub fn delta_legend(display_max: f64) -> Result<LinearLegend> {
    Ok(LinearLegend::new(
        vec![color::TRANSPARENT, color::YELLOW, IMPERVIOUS_ORANGE, color::RED],
        0.0..display_max.max(0.0),
        MappingConfig::default(),
    )?
    .with_title("Change in impervious surface (percentage points)"))
}

pub fn impervious_percentage_legend() -> Result<LinearLegend> {
    Ok(LinearLegend::new(
        vec![color::TRANSPARENT, color::YELLOW, IMPERVIOUS_ORANGE, color::RED],
        0.0..100.0,
        MappingConfig::default(),
    )?
    .with_title("Percentage of impervious surface area"))
}

/// Legend to render a harmonized raster of the scenario family
pub fn scenario_legend(family: ScenarioFamily, palette: &CategoricLegend) -> Result<DisplayLegend> {
    Ok(match family {
        ScenarioFamily::Historical | ScenarioFamily::Rcp => {
            DisplayLegend::Categoric(palette.clone().with_title("Land Cover Classes"))
        }
        ScenarioFamily::Ssp => DisplayLegend::Categoric(urban_legend()),
        ScenarioFamily::RcpSsp => DisplayLegend::Linear(impervious_percentage_legend()?),
    })
}

fn class_labels(codes: impl IntoIterator<Item = ClassCode>, palette: &CategoricLegend) -> String {
    codes
        .into_iter()
        .map(|code| match palette.label_of(code.into()) {
            "" => code.to_string(),
            label => label.to_string(),
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// Legend to render the transition result, the class labels in the title come from the palette
pub fn transition_legend(spec: &TransitionSpec, summary: &TransitionSummary, palette: &CategoricLegend) -> Result<DisplayLegend> {
    Ok(match spec {
        TransitionSpec::SetToTarget { sources, target } => DisplayLegend::Categoric(set_to_target_legend(format!(
            "Transition from {} to {}",
            class_labels(sources.iter().copied(), palette),
            class_labels([*target], palette)
        ))),
        TransitionSpec::BinaryUrban { .. } => DisplayLegend::Categoric(urban_transition_legend()),
        TransitionSpec::ContinuousDelta => DisplayLegend::Linear(delta_legend(summary.display_max())?),
    })
}
