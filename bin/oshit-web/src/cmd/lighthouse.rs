//! Lighthouse command - writes the Lighthouse CI configuration

use std::path::Path;

use color_eyre::eyre::{Result, WrapErr};
use oshit_web_generator::Builder;

use super::load_config;

/// Run the lighthouse command.
pub fn run(config_path: &Path) -> Result<()> {
    let config = load_config(config_path)?;
    let assertions = config.lighthouse.assertions.len();

    let path = Builder::new(config)
        .lighthouse()
        .wrap_err("Failed to write Lighthouse CI config")?;

    println!();
    println!("  ✓ {} ({assertions} assertions)", path.display());
    println!();

    Ok(())
}
