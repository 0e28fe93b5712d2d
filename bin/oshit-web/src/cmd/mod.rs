//! Command implementations.

pub mod enhance;
pub mod generate;
pub mod lighthouse;
pub mod optimize;

use std::path::Path;

use color_eyre::eyre::{Result, WrapErr};
use oshit_web_core::Config;
use oshit_web_generator::BuildStats;

/// Load `site.toml` (optional) layered with `OSHIT__` environment overrides.
pub(crate) fn load_config(config_path: &Path) -> Result<Config> {
    let config = Config::load_or_default(config_path).wrap_err_with(|| {
        format!("Failed to load configuration from {}", config_path.display())
    })?;
    tracing::debug!(?config, "Loaded configuration");
    Ok(config)
}

/// Print the metadata summary shared by `generate` and `enhance`.
pub(crate) fn print_stats(title: &str, stats: &BuildStats) {
    let metadata = &stats.metadata;

    println!();
    println!("  {title}");
    println!();
    println!("  Version:  {}", metadata.version);
    println!("  Plugins:  {}", metadata.plugin_count);
    println!("  Features: {}", metadata.features.len());
    println!("  Changes:  {}", metadata.changes.len());
    if stats.html.is_none() {
        println!("  ⚠ index.html was not updated (see log)");
    }
    println!();
    for path in &stats.artifacts {
        println!("  ✓ {}", path.display());
    }
    println!();
    println!("  Duration: {}ms", stats.duration_ms);
    println!();
}
