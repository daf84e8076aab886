//! Command-line interface definitions.

use clap::Parser;
use std::path::PathBuf;

/// Convert labelled Inkscape drawings into positioned view components
#[derive(Parser, Debug, Clone)]
#[command(name = "inkmap", version, about, long_about = None)]
pub struct Cli {
    /// SVG file to convert
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub svg: PathBuf,

    /// Mapping configuration (.json or .toml); defaults to the persisted configuration
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Output JSON file (default: the configured output file)
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    pub output: Option<PathBuf>,

    /// Print the JSON to stdout instead of writing a file
    #[arg(long)]
    pub print_only: bool,

    /// Compare the result against an existing output file
    #[arg(long, value_name = "FILE", value_hint = clap::ValueHint::FilePath)]
    pub validate: Option<PathBuf>,

    /// Write compact JSON regardless of the configured style
    #[arg(long)]
    pub compact: bool,
}
