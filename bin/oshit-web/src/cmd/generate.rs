//! Generate command - patches the page and writes the SEO files

use std::path::Path;

use color_eyre::eyre::{Result, WrapErr};
use oshit_web_generator::Builder;

use super::{load_config, print_stats};

/// Run the generate command.
///
/// Refreshes version, plugin count and social meta in `index.html`, then
/// writes sitemap, robots.txt, manifest and the performance report.
pub fn run(config_path: &Path) -> Result<()> {
    tracing::info!(?config_path, "Starting generate");

    let config = load_config(config_path)?;
    let stats = Builder::new(config)
        .generate()
        .wrap_err("Website generation failed")?;

    print_stats("Website content generated successfully!", &stats);
    tracing::info!(artifacts = stats.artifacts.len(), "Generate completed");

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_generate_with_config_file() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("site.toml");
        fs::write(
            &config_path,
            format!("[paths]\nrepo_root = {:?}\n", dir.path().display().to_string()),
        )
        .unwrap();

        run(&config_path).unwrap();

        assert!(dir.path().join("docs/sitemap.xml").exists());
        assert!(dir.path().join("docs/performance-report.json").exists());
    }
}
