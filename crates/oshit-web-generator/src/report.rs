//! Metadata reports.
//!
//! Two write-only JSON snapshots of the extracted metadata: the performance
//! report written by `generate` and the enhanced report written by `enhance`.

use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

use chrono::{DateTime, SecondsFormat, Utc};
use oshit_web_core::{PluginCatalog, SiteMetadata, config::ReportConfig};
use serde::Serialize;
use thiserror::Error;
use tracing::info;

use crate::output::{self, OutputError};

/// Performance report file name.
pub const PERFORMANCE_REPORT_FILE: &str = "performance-report.json";

/// Enhanced report file name.
pub const ENHANCED_REPORT_FILE: &str = "enhanced-report.json";

/// Report errors.
#[derive(Debug, Error)]
pub enum ReportError {
    /// JSON serialization error.
    #[error("report serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// Output error.
    #[error(transparent)]
    Output(#[from] OutputError),
}

/// Result type for report operations.
pub type Result<T> = std::result::Result<T, ReportError>;

/// ISO-8601 timestamp with millisecond precision, e.g. `2026-10-19T08:00:00.000Z`.
pub fn iso_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Snapshot written by the `generate` command.
#[derive(Debug, Clone, Serialize)]
pub struct PerformanceReport {
    pub generated: String,
    pub version: String,
    pub metrics: PerformanceMetrics,
    pub features: Vec<String>,
    pub latest_changes: Vec<String>,
}

/// Marketing metrics plus derived counts.
#[derive(Debug, Clone, Serialize)]
pub struct PerformanceMetrics {
    pub lazy_loading_improvement: String,
    pub startup_time_traditional: String,
    pub startup_time_oshit: String,
    pub plugin_count: usize,
    pub features_count: usize,
}

impl PerformanceReport {
    /// Build the report.
    pub fn new(metrics: &ReportConfig, metadata: &SiteMetadata, generated: DateTime<Utc>) -> Self {
        Self {
            generated: iso_timestamp(generated),
            version: metadata.version.clone(),
            metrics: PerformanceMetrics {
                lazy_loading_improvement: metrics.lazy_loading_improvement.clone(),
                startup_time_traditional: metrics.startup_time_traditional.clone(),
                startup_time_oshit: metrics.startup_time_oshit.clone(),
                plugin_count: metadata.plugin_count,
                features_count: metadata.features.len(),
            },
            features: metadata.features.clone(),
            latest_changes: metadata.changes.clone(),
        }
    }
}

/// Snapshot written by the `enhance` command.
#[derive(Debug, Clone, Serialize)]
pub struct EnhancedReport {
    pub generated: String,
    pub version: String,
    pub plugins: PluginSummary,
    pub features: ListSummary,
    pub changes: ListSummary,
}

/// Plugin totals and the full catalog.
#[derive(Debug, Clone, Serialize)]
pub struct PluginSummary {
    pub total: usize,
    pub by_category: BTreeMap<String, usize>,
    pub details: PluginCatalog,
}

/// A list with its length.
#[derive(Debug, Clone, Serialize)]
pub struct ListSummary {
    pub count: usize,
    pub list: Vec<String>,
}

impl From<&[String]> for ListSummary {
    fn from(list: &[String]) -> Self {
        Self {
            count: list.len(),
            list: list.to_vec(),
        }
    }
}

impl EnhancedReport {
    /// Build the report.
    pub fn new(metadata: &SiteMetadata, generated: DateTime<Utc>) -> Self {
        Self {
            generated: iso_timestamp(generated),
            version: metadata.version.clone(),
            plugins: PluginSummary {
                total: metadata.plugins.total(),
                by_category: metadata.plugins.counts(),
                details: metadata.plugins.clone(),
            },
            features: metadata.features.as_slice().into(),
            changes: metadata.changes.as_slice().into(),
        }
    }
}

/// Write any report as pretty JSON to `output_dir/file_name`.
pub fn write_report<T: Serialize>(report: &T, output_dir: &Path, file_name: &str) -> Result<PathBuf> {
    let path = output_dir.join(file_name);
    let json = serde_json::to_string_pretty(report)?;
    output::write_atomic(&path, json)?;

    info!(path = %path.display(), "generated report");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use chrono::TimeZone;
    use oshit_web_core::PluginRecord;
    use tempfile::TempDir;

    use super::*;

    fn metadata() -> SiteMetadata {
        let mut plugins = PluginCatalog::new();
        plugins.insert(PluginRecord {
            name: "foo".to_string(),
            description: "Foo does X".to_string(),
            version: "2.1.0".to_string(),
            category: "stable".to_string(),
            path: PathBuf::from("plugins/foo"),
        });

        SiteMetadata {
            version: "2.0.0".to_string(),
            plugins,
            plugin_count: 1,
            features: vec!["Fast".to_string(), "Simple".to_string()],
            changes: vec!["Added foo".to_string()],
        }
    }

    fn generated() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 19, 8, 30, 0).unwrap()
    }

    #[test]
    fn test_iso_timestamp() {
        assert_eq!(iso_timestamp(generated()), "2026-10-19T08:30:00.000Z");
    }

    #[test]
    fn test_enhanced_report_shape() {
        let report = EnhancedReport::new(&metadata(), generated());
        let value = serde_json::to_value(&report).unwrap();

        assert_eq!(value["version"], "2.0.0");
        assert_eq!(value["plugins"]["total"], 1);
        assert_eq!(value["plugins"]["by_category"]["stable"], 1);
        assert_eq!(value["plugins"]["by_category"]["beta"], 0);
        assert_eq!(value["plugins"]["by_category"]["experimental"], 0);
        assert_eq!(value["plugins"]["details"]["stable"][0]["name"], "foo");
        assert_eq!(value["plugins"]["details"]["stable"][0]["version"], "2.1.0");
        assert_eq!(value["features"]["count"], 2);
        assert_eq!(value["changes"]["list"][0], "Added foo");
    }

    #[test]
    fn test_performance_report_shape() {
        let report = PerformanceReport::new(&ReportConfig::default(), &metadata(), generated());
        let value = serde_json::to_value(&report).unwrap();

        assert_eq!(value["generated"], "2026-10-19T08:30:00.000Z");
        assert_eq!(value["metrics"]["lazy_loading_improvement"], "92%");
        assert_eq!(value["metrics"]["plugin_count"], 1);
        assert_eq!(value["metrics"]["features_count"], 2);
        assert_eq!(value["latest_changes"][0], "Added foo");
    }

    #[test]
    fn test_write_report() {
        let dir = TempDir::new().unwrap();
        let report = EnhancedReport::new(&metadata(), generated());

        let path = write_report(&report, dir.path(), ENHANCED_REPORT_FILE).unwrap();

        let text = std::fs::read_to_string(path).unwrap();
        assert!(text.contains("\n  \"version\": \"2.0.0\""));
    }
}
