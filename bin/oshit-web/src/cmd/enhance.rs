//! Enhance command - patches version and plugin count and writes the enhanced report

use std::path::Path;

use color_eyre::eyre::{Result, WrapErr};
use oshit_web_generator::Builder;

use super::{load_config, print_stats};

/// Run the enhance command.
pub fn run(config_path: &Path) -> Result<()> {
    tracing::info!(?config_path, "Starting enhance");

    let config = load_config(config_path)?;
    let stats = Builder::new(config)
        .enhance()
        .wrap_err("Enhanced generation failed")?;

    let plugins = &stats.metadata.plugins;
    print_stats("Enhanced content generated successfully!", &stats);
    for (category, count) in plugins.counts() {
        println!("  {category:<14} {count}");
    }
    println!();

    tracing::info!(plugins = plugins.total(), "Enhance completed");

    Ok(())
}
