//! PWA web app manifest generation.

use std::path::{Path, PathBuf};

use oshit_web_core::Config;
use serde::Serialize;
use thiserror::Error;
use tracing::info;

use crate::output::{self, OutputError};

/// Manifest file name.
pub const MANIFEST_FILE: &str = "manifest.json";

/// Manifest generation errors.
#[derive(Debug, Error)]
pub enum ManifestError {
    /// JSON serialization error.
    #[error("manifest serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// Output error.
    #[error(transparent)]
    Output(#[from] OutputError),
}

/// Result type for manifest generation.
pub type Result<T> = std::result::Result<T, ManifestError>;

/// Web app manifest.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WebManifest {
    pub name: String,
    pub short_name: String,
    pub description: String,
    pub start_url: String,
    pub display: String,
    pub background_color: String,
    pub theme_color: String,
    pub icons: Vec<ManifestIcon>,
}

/// Icon entry of a manifest.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ManifestIcon {
    pub src: String,
    pub sizes: String,
    #[serde(rename = "type")]
    pub mime_type: String,
}

/// Manifest generator.
#[derive(Debug)]
pub struct ManifestGenerator {
    config: Config,
}

impl ManifestGenerator {
    /// Create a new manifest generator.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Build the manifest from configuration.
    pub fn manifest(&self) -> WebManifest {
        let manifest = &self.config.manifest;
        WebManifest {
            name: manifest.name.clone(),
            short_name: manifest.short_name.clone(),
            description: manifest.description.clone(),
            start_url: manifest.start_url.clone(),
            display: manifest.display.clone(),
            background_color: manifest.background_color.clone(),
            theme_color: manifest.theme_color.clone(),
            icons: vec![ManifestIcon {
                src: self.config.site.favicon.clone(),
                sizes: manifest.icon_sizes.clone(),
                mime_type: manifest.icon_type.clone(),
            }],
        }
    }

    /// Write manifest.json into `output_dir`.
    pub fn generate(&self, output_dir: &Path) -> Result<PathBuf> {
        let path = output_dir.join(MANIFEST_FILE);
        let json = serde_json::to_string_pretty(&self.manifest())?;
        output::write_atomic(&path, json)?;

        info!(path = %path.display(), "generated manifest.json");
        Ok(path)
    }
}
