//! Lighthouse CI configuration generation.

use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

use oshit_web_core::config::LighthouseConfig;
use serde::Serialize;
use thiserror::Error;
use tracing::info;

use crate::output::{self, OutputError};

/// Lighthouse CI config file name.
pub const LIGHTHOUSE_FILE: &str = "lighthouserc.json";

/// Lighthouse generation errors.
#[derive(Debug, Error)]
pub enum LighthouseError {
    /// JSON serialization error.
    #[error("lighthouse serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// Output error.
    #[error(transparent)]
    Output(#[from] OutputError),
}

/// Result type for lighthouse generation.
pub type Result<T> = std::result::Result<T, LighthouseError>;

/// Top level of `lighthouserc.json`.
#[derive(Debug, Clone, Serialize)]
pub struct LighthouseRc {
    pub ci: CiSection,
}

#[derive(Debug, Clone, Serialize)]
pub struct CiSection {
    pub collect: CollectSection,
    pub assert: AssertSection,
    pub upload: UploadSection,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectSection {
    pub url: Vec<String>,
    pub start_server_command: String,
    pub start_server_ready_pattern: String,
    pub start_server_ready_timeout: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct AssertSection {
    /// `categories:<name>` to `[level, { minScore }]`.
    pub assertions: BTreeMap<String, (String, MinScore)>,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MinScore {
    pub min_score: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct UploadSection {
    pub target: String,
}

impl From<&LighthouseConfig> for LighthouseRc {
    fn from(config: &LighthouseConfig) -> Self {
        let assertions = config
            .assertions
            .iter()
            .map(|a| {
                (
                    format!("categories:{}", a.category),
                    (a.level.clone(), MinScore {
                        min_score: a.min_score,
                    }),
                )
            })
            .collect();

        Self {
            ci: CiSection {
                collect: CollectSection {
                    url: config.urls.clone(),
                    start_server_command: config.start_server_command.clone(),
                    start_server_ready_pattern: config.start_server_ready_pattern.clone(),
                    start_server_ready_timeout: config.start_server_ready_timeout,
                },
                assert: AssertSection { assertions },
                upload: UploadSection {
                    target: config.upload_target.clone(),
                },
            },
        }
    }
}

/// Write `lighthouserc.json` into `output_dir`.
pub fn generate(config: &LighthouseConfig, output_dir: &Path) -> Result<PathBuf> {
    let path = output_dir.join(LIGHTHOUSE_FILE);
    let json = serde_json::to_string_pretty(&LighthouseRc::from(config))?;
    output::write_atomic(&path, json)?;

    info!(path = %path.display(), "generated Lighthouse CI config");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_default_config_shape() {
        let rc = LighthouseRc::from(&LighthouseConfig::default());
        let value = serde_json::to_value(&rc).unwrap();

        let collect = &value["ci"]["collect"];
        assert_eq!(collect["url"][0], "https://oiahoon.github.io/osh.it/");
        assert_eq!(collect["startServerCommand"], "cd docs && python3 -m http.server 8000");
        assert_eq!(collect["startServerReadyPattern"], "Serving HTTP");
        assert_eq!(collect["startServerReadyTimeout"], 10_000);

        let assertions = &value["ci"]["assert"]["assertions"];
        assert_eq!(assertions["categories:accessibility"][0], "error");
        assert_eq!(assertions["categories:accessibility"][1]["minScore"], 0.9);
        assert_eq!(assertions["categories:pwa"][1]["minScore"], 0.7);

        assert_eq!(value["ci"]["upload"]["target"], "temporary-public-storage");
    }

    #[test]
    fn test_generate_writes_file() {
        let dir = TempDir::new().unwrap();
        let path = generate(&LighthouseConfig::default(), dir.path()).unwrap();

        assert_eq!(path, dir.path().join(LIGHTHOUSE_FILE));
        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();
        assert_eq!(value["ci"]["assert"]["assertions"].as_object().unwrap().len(), 5);
    }
}
