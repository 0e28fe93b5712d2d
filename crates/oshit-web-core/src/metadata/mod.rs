//! Repository metadata extraction.
//!
//! Reads README.md, CHANGELOG.md, VERSION, package.json and the plugin
//! tree, and derives everything the website build splices into its
//! artifacts. Extraction never fails: a missing or malformed source is
//! logged and contributes its default instead.

pub mod changes;
pub mod features;
mod markdown;
pub mod plugins;
pub mod version;

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info, warn};

pub use changes::{MAX_CHANGES, extract_changes};
pub use features::{FEATURE_HEADINGS, extract_features};
pub use plugins::{PluginCatalog, PluginRecord, count_plugin_mentions, discover_plugins};
pub use version::{VersionSource, resolve_version};

/// Values used when the repository provides nothing better.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractDefaults {
    /// Fallback version string.
    pub version: String,

    /// Fallback plugin count.
    pub plugin_count: usize,
}

/// Everything derived from one scan of the repository.
#[derive(Debug, Clone, Serialize)]
pub struct SiteMetadata {
    /// Resolved version string.
    pub version: String,

    /// Plugins bucketed by category.
    pub plugins: PluginCatalog,

    /// Count shown on the website.
    pub plugin_count: usize,

    /// Feature bullets from the README.
    pub features: Vec<String>,

    /// Unreleased changelog bullets.
    pub changes: Vec<String>,
}

/// Extracts [`SiteMetadata`] from a repository checkout.
#[derive(Debug, Clone)]
pub struct MetadataExtractor {
    repo_root: PathBuf,
    site_dir: Option<PathBuf>,
    plugins_dir: PathBuf,
    defaults: ExtractDefaults,
}

impl MetadataExtractor {
    /// Create an extractor for `repo_root`, with plugins expected under `plugins/`.
    #[must_use]
    pub fn new(repo_root: impl Into<PathBuf>, defaults: ExtractDefaults) -> Self {
        let repo_root = repo_root.into();
        Self {
            plugins_dir: repo_root.join("plugins"),
            repo_root,
            site_dir: None,
            defaults,
        }
    }

    /// Also consult `<site_dir>/package.json` for the version.
    #[must_use]
    pub fn with_site_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.site_dir = Some(dir.into());
        self
    }

    /// Override the plugin tree location.
    #[must_use]
    pub fn with_plugins_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.plugins_dir = dir.into();
        self
    }

    /// Version sources in precedence order.
    fn version_sources(&self) -> Vec<VersionSource> {
        let mut sources = vec![
            VersionSource::PlainText(self.repo_root.join("VERSION")),
            VersionSource::PackageJson(self.repo_root.join("package.json")),
        ];
        if let Some(site_dir) = &self.site_dir {
            sources.push(VersionSource::PackageJson(site_dir.join("package.json")));
        }
        sources
    }

    /// Scan the repository.
    pub fn extract(&self) -> SiteMetadata {
        info!(root = %self.repo_root.display(), "extracting repository metadata");

        let version = resolve_version(&self.version_sources(), &self.defaults.version);
        let plugins = discover_plugins(&self.plugins_dir);

        let readme = read_source(&self.repo_root.join("README.md"));
        let features = readme.as_deref().map(extract_features).unwrap_or_default();

        let changelog = read_source(&self.repo_root.join("CHANGELOG.md"));
        let changes = changelog.as_deref().map(extract_changes).unwrap_or_default();

        let plugin_count = if plugins.total() > 0 {
            plugins.total()
        } else {
            match readme.as_deref().map(count_plugin_mentions) {
                Some(mentions) if mentions > 0 => mentions,
                _ => self.defaults.plugin_count,
            }
        };

        info!(
            version = %version,
            plugins = plugins.total(),
            plugin_count,
            features = features.len(),
            changes = changes.len(),
            "metadata extracted"
        );

        SiteMetadata {
            version,
            plugins,
            plugin_count,
            features,
            changes,
        }
    }
}

/// Read a text source, treating absence and read failures as "no data".
pub(crate) fn read_source(path: &Path) -> Option<String> {
    if !path.exists() {
        debug!(path = %path.display(), "source not present");
        return None;
    }

    match std::fs::read_to_string(path) {
        Ok(content) => Some(content),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "could not read source");
            None
        }
    }
}
