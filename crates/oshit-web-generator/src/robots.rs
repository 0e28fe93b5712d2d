//! Robots.txt generation.
//!
//! Generates the robots.txt file for search engine crawlers.

use std::path::{Path, PathBuf};

use oshit_web_core::Config;
use thiserror::Error;
use tracing::info;

use crate::output::{self, OutputError};

/// Robots file name.
pub const ROBOTS_FILE: &str = "robots.txt";

/// Robots generation errors.
#[derive(Debug, Error)]
pub enum RobotsError {
    /// Output error.
    #[error(transparent)]
    Output(#[from] OutputError),
}

/// Result type for robots generation.
pub type Result<T> = std::result::Result<T, RobotsError>;

/// Robots.txt generator.
#[derive(Debug)]
pub struct RobotsGenerator {
    config: Config,
}

impl RobotsGenerator {
    /// Create a new robots generator.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Render robots.txt.
    pub fn render(&self) -> String {
        let robots = &self.config.robots;
        let mut text = String::from("User-agent: *\n");

        for path in &robots.disallow {
            text.push_str(&format!("Disallow: {path}\n"));
        }

        for path in &robots.allow {
            text.push_str(&format!("Allow: {path}\n"));
        }

        text.push_str(&format!("\nSitemap: {}", robots.sitemap_url));
        text
    }

    /// Write robots.txt into `output_dir`.
    pub fn generate(&self, output_dir: &Path) -> Result<PathBuf> {
        let path = output_dir.join(ROBOTS_FILE);
        output::write_atomic(&path, self.render())?;

        info!(path = %path.display(), "generated robots.txt");
        Ok(path)
    }
}
