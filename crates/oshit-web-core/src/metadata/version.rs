//! Version string resolution.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, warn};

use super::read_source;
use crate::error::{CoreError, Result};

/// A place a version string may come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionSource {
    /// A file whose trimmed content is the version (`VERSION`).
    PlainText(PathBuf),
    /// The `version` field of an npm manifest.
    PackageJson(PathBuf),
}

#[derive(Debug, Deserialize)]
struct PackageManifest {
    #[serde(default)]
    version: Option<String>,
}

impl VersionSource {
    /// Path read by this source.
    pub fn path(&self) -> &Path {
        match self {
            Self::PlainText(path) | Self::PackageJson(path) => path,
        }
    }

    /// Version provided by this source, if any.
    ///
    /// Absent files and empty values are `Ok(None)`; unreadable JSON is an error.
    pub fn read(&self) -> Result<Option<String>> {
        let Some(content) = read_source(self.path()) else {
            return Ok(None);
        };

        let version = match self {
            Self::PlainText(_) => Some(content.trim().to_string()),
            Self::PackageJson(path) => {
                let manifest: PackageManifest = serde_json::from_str(&content)
                    .map_err(|e| CoreError::parse(path, e.to_string()))?;
                manifest.version.map(|v| v.trim().to_string())
            }
        };

        Ok(version.filter(|v| !v.is_empty()))
    }
}

/// Resolve the version from the first source that provides one.
///
/// Sources are consulted in order and never merged. A source that fails to
/// parse is logged and skipped.
pub fn resolve_version(sources: &[VersionSource], fallback: &str) -> String {
    for source in sources {
        match source.read() {
            Ok(Some(version)) => {
                debug!(path = %source.path().display(), %version, "resolved version");
                return version;
            }
            Ok(None) => {}
            Err(e) => warn!(error = %e, "skipping version source"),
        }
    }

    debug!(fallback, "no version source, using fallback");
    fallback.to_string()
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    fn sources(root: &Path) -> Vec<VersionSource> {
        vec![
            VersionSource::PlainText(root.join("VERSION")),
            VersionSource::PackageJson(root.join("package.json")),
        ]
    }

    #[test]
    fn test_version_file_takes_precedence() {
        let root = TempDir::new().unwrap();
        fs::write(root.path().join("VERSION"), "2.0.0").unwrap();
        fs::write(root.path().join("package.json"), r#"{"version": "1.9.0"}"#).unwrap();

        assert_eq!(resolve_version(&sources(root.path()), "1.4.0"), "2.0.0");
    }

    #[test]
    fn test_version_file_is_trimmed() {
        let root = TempDir::new().unwrap();
        fs::write(root.path().join("VERSION"), "  1.7.3-beta\n\n").unwrap();

        assert_eq!(resolve_version(&sources(root.path()), "1.4.0"), "1.7.3-beta");
    }

    #[test]
    fn test_blank_version_file_defers_to_package_json() {
        let root = TempDir::new().unwrap();
        fs::write(root.path().join("VERSION"), "   \n").unwrap();
        fs::write(root.path().join("package.json"), r#"{"version": "1.9.0"}"#).unwrap();

        assert_eq!(resolve_version(&sources(root.path()), "1.4.0"), "1.9.0");
    }

    #[test]
    fn test_malformed_package_json_falls_back() {
        let root = TempDir::new().unwrap();
        fs::write(root.path().join("package.json"), "{ not json").unwrap();

        let source = VersionSource::PackageJson(root.path().join("package.json"));
        assert!(source.read().is_err());
        assert_eq!(resolve_version(&sources(root.path()), "1.4.0"), "1.4.0");
    }

    #[test]
    fn test_package_json_without_version() {
        let root = TempDir::new().unwrap();
        fs::write(root.path().join("package.json"), r#"{"name": "osh.it"}"#).unwrap();

        assert_eq!(resolve_version(&sources(root.path()), "1.4.0"), "1.4.0");
    }

    #[test]
    fn test_no_sources_uses_fallback() {
        assert_eq!(resolve_version(&[], "0.0.1"), "0.0.1");
    }
}
