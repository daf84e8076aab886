use clap::Parser;
use inkmap::cli::Cli;
use inkmap::{init_logging, run, BUILD_DATE, VERSION};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    init_logging()?;
    tracing::debug!("inkmap {} (built {})", VERSION, BUILD_DATE);

    run(&cli)?;

    Ok(())
}
