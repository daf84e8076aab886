//! # Inkmap
//!
//! Converts labelled Inkscape drawings into positioned HMI view components.
//!
//! ## Architecture
//!
//! Inkmap is organized as a workspace with multiple crates:
//!
//! 1. **inkmap-core** - Affine geometry, mapping-rule model, error types
//! 2. **inkmap-engine** - SVG import, document walk, rule mapping, output records
//! 3. **inkmap-settings** - Mapping configuration files and their persistence
//! 4. **inkmap** - Command-line binary that integrates all crates
//!
//! ## Labels
//!
//! An element labelled `PPI_Conveyor1_d` is matched against rules for prefix `PPI`, named
//! `Conveyor1`, and rotated 90 degrees by its `_d` suffix. Unlabelled elements inherit the
//! prefix of the nearest labelled group.

pub mod cli;
pub mod validate;

pub use inkmap_core::{
    AffineMatrix, Error, GeometryError, MappingRule, Offset, Point, Result, RuleTable, Size,
    SvgElementType, TransformError,
};

pub use inkmap_engine::{
    convert, parse_svg, to_json_string, to_view_components, Container, Conversion,
    ConversionStats, Converter, Document, DocumentNode, Drawable, OutputRecord, ViewComponent,
    Warning, WarningKind,
};

pub use inkmap_settings::{Config, SettingsPersistence};

use anyhow::Context;
use cli::Cli;
use validate::ValidationReport;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Console output on stderr, leaving stdout for JSON
/// - RUST_LOG environment variable support (default `info`)
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .context("Failed to install the tracing subscriber")?;

    Ok(())
}

fn load_config(cli: &Cli) -> anyhow::Result<Config> {
    let persistence = match &cli.config {
        Some(path) => SettingsPersistence::load_from_file(path),
        None => SettingsPersistence::load_default(),
    }
    .context("Failed to load mapping configuration")?;
    Ok(persistence.config().clone())
}

/// Outcome of one [`run`]
#[derive(Debug)]
pub struct RunSummary {
    pub conversion: Conversion,
    /// Present when `--validate` named a baseline file
    pub validation: Option<ValidationReport>,
}

/// Run one conversion as described by the command line
///
/// The baseline named by `--validate` is compared before any output is written, so it
/// may be the same file as the output.
pub fn run(cli: &Cli) -> anyhow::Result<RunSummary> {
    tracing::info!("Processing SVG file: {}", cli.svg.display());

    let config = load_config(cli)?;
    let svg = std::fs::read_to_string(&cli.svg)
        .with_context(|| format!("Failed to read {}", cli.svg.display()))?;
    let document = parse_svg(&svg)?;
    let conversion = convert(&document, &config.rule_table())?;

    let validation = match &cli.validate {
        Some(baseline) => {
            let components = to_view_components(&conversion.records);
            let report = validate::compare_with_file(&components, baseline)?;
            report.log();
            Some(report)
        }
        None => None,
    };

    let pretty = config.output.pretty && !cli.compact;
    let json = to_json_string(&conversion.records, pretty)?;

    if cli.print_only {
        println!("{}", json);
    } else {
        let output = cli
            .output
            .clone()
            .unwrap_or_else(|| config.output.default_file.clone());
        std::fs::write(&output, &json)
            .with_context(|| format!("Failed to write {}", output.display()))?;
        tracing::info!("Wrote {}", output.display());
    }

    tracing::info!(
        "Successfully processed {} elements from the SVG file",
        conversion.records.len()
    );
    Ok(RunSummary {
        conversion,
        validation,
    })
}
