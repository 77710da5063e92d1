use std::path::PathBuf;

use anyhow::{Context, anyhow, bail};
use clap::{Parser, Subcommand};
use env_logger::{Env, TimestampPrecision};
use inf::CategoricLegend;
use landcover::{
    ClassCode, RasterCatalog, ScenarioFamily, TransitionResult, TransitionSpec, TransitionSummary, UrbanTransition,
    compute_transition, display, summarize,
};
use strum::EnumString;

pub type Result<T> = anyhow::Result<T>;

#[derive(Clone, Copy, Debug, EnumString)]
#[strum(serialize_all = "kebab_case")]
enum Family {
    Historical,
    Rcp,
    Ssp,
    RcpSsp,
}

impl From<Family> for ScenarioFamily {
    fn from(family: Family) -> Self {
        match family {
            Family::Historical => ScenarioFamily::Historical,
            Family::Rcp => ScenarioFamily::Rcp,
            Family::Ssp => ScenarioFamily::Ssp,
            Family::RcpSsp => ScenarioFamily::RcpSsp,
        }
    }
}

#[derive(Clone, Copy, Debug, EnumString)]
#[strum(serialize_all = "kebab_case")]
enum TransitionKind {
    SetToTarget,
    BinaryUrban,
    Delta,
}

#[derive(Parser, Debug)]
#[command(name = "lctransition", about = "Land cover scenario transition analysis")]
struct Cli {
    /// Directory containing the `clipped_raster` scenario rasters
    #[arg(long = "data-dir", env = "LC_DATA_DIR", default_value = ".")]
    data_dir: PathBuf,

    /// Palette with the land cover classes (`code,r,g,b,a,label`)
    #[arg(long = "palette", env = "LC_PALETTE", default_value = "Visualization/ColourPalette.txt")]
    palette: PathBuf,

    /// JSON raster catalog, the standard scenario layout in the data directory is used when omitted
    #[arg(long = "catalog", env = "LC_CATALOG")]
    catalog: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(name = "catalog", about = "List the available rasters")]
    Catalog {
        #[arg(short = 'f', long = "family", value_name = "historical|rcp|ssp|rcp-ssp")]
        family: Option<Family>,
        #[arg(long = "transitions", help = "List the rasters that can be compared in a transition analysis of the family")]
        transitions: bool,
    },
    #[command(name = "legend", about = "Print the land cover classes of the palette")]
    Legend,
    #[command(name = "transition", about = "Detect the transitions between two rasters")]
    Transition {
        #[arg(long = "from", help = "Identifier of the earlier raster")]
        from: String,
        #[arg(long = "to", help = "Identifier of the later raster")]
        to: String,
        #[arg(short = 'k', long = "kind", default_value = "set-to-target", value_name = "set-to-target|binary-urban|delta")]
        kind: TransitionKind,
        #[arg(short = 's', long = "source", help = "Source class (code or palette label), can be repeated")]
        sources: Vec<String>,
        #[arg(short = 't', long = "target", help = "Target class (code or palette label)")]
        target: Option<String>,
        #[arg(long = "track-loss", help = "Also label the pixels that lost their urban class")]
        track_loss: bool,
    },
}

fn load_catalog(cli: &Cli) -> Result<RasterCatalog> {
    Ok(match &cli.catalog {
        Some(path) => RasterCatalog::from_json_file(path)?,
        None => RasterCatalog::standard(&cli.data_dir)?,
    })
}

fn load_palette(cli: &Cli) -> Result<CategoricLegend> {
    CategoricLegend::from_palette_file(&cli.palette).with_context(|| format!("Failed to load palette {}", cli.palette.display()))
}

/// A class is selected by its code or by its palette label
fn resolve_class(class: &str, palette: &CategoricLegend) -> Result<ClassCode> {
    if let Ok(code) = class.parse::<u16>() {
        return Ok(ClassCode::new(code)?);
    }

    let code = palette
        .code_for_label(class)
        .ok_or_else(|| anyhow!("Unknown land cover class: '{class}'"))?;
    Ok(ClassCode::new(u16::try_from(code)?)?)
}

fn transition_spec(kind: TransitionKind, sources: &[String], target: Option<&str>, track_loss: bool, palette: &CategoricLegend) -> Result<TransitionSpec> {
    Ok(match kind {
        TransitionKind::SetToTarget => {
            let Some(target) = target else {
                bail!("A target class is required for a set to target transition");
            };

            let sources = sources.iter().map(|src| resolve_class(src, palette)).collect::<Result<Vec<_>>>()?;
            TransitionSpec::set_to_target(sources, resolve_class(target, palette)?)
        }
        TransitionKind::BinaryUrban if track_loss => TransitionSpec::binary_urban_with_loss(),
        TransitionKind::BinaryUrban => TransitionSpec::binary_urban(),
        TransitionKind::Delta => TransitionSpec::ContinuousDelta,
    })
}

fn print_summary(spec: &TransitionSpec, result: &TransitionResult, summary: &TransitionSummary, palette: &CategoricLegend) -> Result<()> {
    let legend = display::transition_legend(spec, summary, palette)?;
    let extent = result.extent();

    println!("{}", legend.title());
    println!("Size: {}", result.size());
    println!("Projection: {}", result.projection());
    println!(
        "Extent: left {} right {} bottom {} top {}",
        extent.left, extent.right, extent.bottom, extent.top
    );

    match summary {
        TransitionSummary::Labels(counts) => {
            for (label, count) in counts {
                let name = match spec {
                    TransitionSpec::BinaryUrban { .. } => UrbanTransition::from_label(*label).map_or("", UrbanTransition::name),
                    _ if *label == landcover::transition::TRANSITION_LABEL => "Transition",
                    _ => "No transition",
                };

                println!("  {label} {name}: {count} pixels");
            }
        }
        TransitionSummary::Delta(Some(stats)) => {
            println!("  min: {:.2} max: {:.2} mean: {:.2}", stats.min, stats.max, stats.mean);
            println!("  99th percentile absolute change: {:.2}", stats.abs_p99);
            println!("  pixels with data: {} nodata: {}", stats.data_count, stats.nodata_count);
        }
        TransitionSummary::Delta(None) => println!("  No overlapping data"),
    }

    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::from_env(Env::default().default_filter_or("warn"))
        .format_timestamp(Some(TimestampPrecision::Millis))
        .init();

    match &cli.command {
        Commands::Catalog { family, transitions } => {
            let catalog = load_catalog(&cli)?;
            match family {
                Some(family) if *transitions => catalog
                    .transition_candidates((*family).into())
                    .iter()
                    .for_each(|id| println!("{id}")),
                Some(family) => catalog
                    .ids_for_family((*family).into())
                    .iter()
                    .for_each(|id| println!("{id}")),
                None => {
                    for entry in catalog.entries() {
                        let status = if entry.path.is_file() { "" } else { " (missing)" };
                        println!("{}\t{}\t{}{status}", entry.id, entry.family, entry.path.display());
                    }
                }
            }
        }
        Commands::Legend => {
            let palette = load_palette(&cli)?;
            for (code, category) in palette.entries() {
                println!("{code:>3} {} {}", category.color.to_hex_rgba(), category.name);
            }
        }
        Commands::Transition {
            from,
            to,
            kind,
            sources,
            target,
            track_loss,
        } => {
            let palette = load_palette(&cli)?;
            let catalog = load_catalog(&cli)?;
            let spec = transition_spec(*kind, sources, target.as_deref(), *track_loss, &palette)?;

            log::info!("Transition {from} -> {to}: {spec:?}");
            let result = compute_transition(&catalog, from, to, &spec)?;
            let summary = summarize(&result)?;
            print_summary(&spec, &result, &summary, &palette)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn class_resolution() -> Result<()> {
        let palette = CategoricLegend::from_palette_str("6,255,255,0,255,Arable\n2,200,0,0,255,Building\n");
        assert_eq!(resolve_class("6", &palette)?, ClassCode::ARABLE);
        assert_eq!(resolve_class("Building", &palette)?, ClassCode::BUILDING);
        assert!(resolve_class("0", &palette).is_err());
        assert!(resolve_class("Forest", &palette).is_err());
        Ok(())
    }

    #[test]
    fn set_to_target_requires_target() {
        let palette = CategoricLegend::default();
        assert!(transition_spec(TransitionKind::SetToTarget, &["6".to_string()], None, false, &palette).is_err());
        assert!(transition_spec(TransitionKind::SetToTarget, &["6".to_string()], Some("2"), false, &palette).is_ok());
    }
}
