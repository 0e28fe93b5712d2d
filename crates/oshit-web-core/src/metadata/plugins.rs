//! Plugin discovery.
//!
//! Every immediate subdirectory of the plugin tree is a plugin. Its
//! metadata comes from comment tags in `<name>/<name>.plugin.*`:
//!
//! ```text
//! # Description: Show system information
//! # Version: 2.1.0
//! # Category: stable
//! ```
//!
//! with the first heading of `<name>/README.md` as a description fallback.

use std::{
    collections::{BTreeMap, BTreeSet},
    fs,
    path::{Path, PathBuf},
    sync::LazyLock,
};

use regex::Regex;
use serde::Serialize;
use tracing::{debug, warn};

use super::read_source;

/// Category labels every catalog carries, even when empty.
pub const KNOWN_CATEGORIES: [&str; 3] = ["stable", "beta", "experimental"];

/// Category of a plugin that does not declare one.
pub const DEFAULT_CATEGORY: &str = "experimental";

/// Version of a plugin that does not declare one.
pub const DEFAULT_VERSION: &str = "1.0.0";

/// Description of a plugin that has neither a tag nor a README heading.
pub const PLACEHOLDER_DESCRIPTION: &str = "Plugin description not available";

static TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?im)^[ \t]*#[ \t]*(description|version|category):[ \t]*(.*)$")
        .expect("valid plugin tag regex")
});

static README_HEADING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^#[ \t]+(.+)$").expect("valid heading regex"));

static MENTION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"plugins/(\w+)").expect("valid plugin mention regex"));

/// One discovered plugin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PluginRecord {
    /// Directory name, unique within the catalog.
    pub name: String,
    pub description: String,
    pub version: String,
    /// Lower-cased category label, not restricted to [`KNOWN_CATEGORIES`].
    pub category: String,
    /// Plugin directory.
    pub path: PathBuf,
}

/// Tag values read from a plugin file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PluginTags {
    pub description: Option<String>,
    pub version: Option<String>,
    pub category: Option<String>,
}

/// Plugins bucketed by category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PluginCatalog {
    buckets: BTreeMap<String, Vec<PluginRecord>>,
}

impl Default for PluginCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl PluginCatalog {
    /// Create a catalog with the known (empty) buckets.
    #[must_use]
    pub fn new() -> Self {
        let buckets = KNOWN_CATEGORIES
            .iter()
            .map(|c| ((*c).to_string(), Vec::new()))
            .collect();
        Self { buckets }
    }

    /// Add a record to its category bucket, keeping buckets sorted by name.
    pub fn insert(&mut self, record: PluginRecord) {
        let bucket = self.buckets.entry(record.category.clone()).or_default();
        let pos = bucket.partition_point(|r| r.name < record.name);
        bucket.insert(pos, record);
    }

    /// Records in one category.
    #[must_use]
    pub fn category(&self, category: &str) -> &[PluginRecord] {
        self.buckets.get(category).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Total number of plugins across categories.
    #[must_use]
    pub fn total(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    /// Whether no plugin was found.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// Plugin count per category, including empty known categories.
    #[must_use]
    pub fn counts(&self) -> BTreeMap<String, usize> {
        self.buckets
            .iter()
            .map(|(category, records)| (category.clone(), records.len()))
            .collect()
    }

    /// Iterate over all records, grouped by category.
    pub fn iter(&self) -> impl Iterator<Item = &PluginRecord> {
        self.buckets.values().flatten()
    }
}

/// Parse `# Description:`, `# Version:` and `# Category:` tags.
///
/// Keys are case-insensitive and the first non-empty occurrence of each wins.
pub fn parse_plugin_tags(content: &str) -> PluginTags {
    let mut tags = PluginTags::default();

    for caps in TAG_RE.captures_iter(content) {
        let value = caps[2].trim();
        if value.is_empty() {
            continue;
        }

        let slot = match caps[1].to_ascii_lowercase().as_str() {
            "description" => &mut tags.description,
            "version" => &mut tags.version,
            _ => &mut tags.category,
        };
        if slot.is_none() {
            *slot = Some(value.to_string());
        }
    }

    tags
}

/// Text of the first level-1 heading of a README.
pub fn readme_heading(content: &str) -> Option<String> {
    README_HEADING_RE
        .captures(content)
        .map(|caps| caps[1].trim().to_string())
        .filter(|heading| !heading.is_empty())
}

/// Count distinct `plugins/<name>` references in a README.
pub fn count_plugin_mentions(readme: &str) -> usize {
    MENTION_RE
        .find_iter(readme)
        .map(|m| m.as_str())
        .collect::<BTreeSet<_>>()
        .len()
}

/// Scan the plugin tree.
///
/// A missing tree yields an empty catalog. Hidden directories are skipped.
pub fn discover_plugins(plugins_dir: &Path) -> PluginCatalog {
    let mut catalog = PluginCatalog::new();

    let entries = match fs::read_dir(plugins_dir) {
        Ok(entries) => entries,
        Err(e) => {
            warn!(dir = %plugins_dir.display(), error = %e, "plugins directory not readable");
            return catalog;
        }
    };

    for entry in entries.flatten() {
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }

        let Some(name) = path.file_name().map(|n| n.to_string_lossy().to_string()) else {
            continue;
        };
        if name.starts_with('.') {
            continue;
        }

        catalog.insert(read_plugin(&name, &path));
    }

    debug!(total = catalog.total(), counts = ?catalog.counts(), "plugins discovered");
    catalog
}

/// Build the record for one plugin directory.
fn read_plugin(name: &str, dir: &Path) -> PluginRecord {
    let tags = find_plugin_file(name, dir)
        .and_then(|file| read_source(&file))
        .map(|content| parse_plugin_tags(&content))
        .unwrap_or_default();

    let description = tags.description.or_else(|| {
        read_source(&dir.join("README.md")).and_then(|readme| readme_heading(&readme))
    });

    PluginRecord {
        name: name.to_string(),
        description: description.unwrap_or_else(|| PLACEHOLDER_DESCRIPTION.to_string()),
        version: tags.version.unwrap_or_else(|| DEFAULT_VERSION.to_string()),
        category: tags
            .category
            .map(|c| c.to_lowercase())
            .unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
        path: dir.to_path_buf(),
    }
}

/// Locate `<name>.plugin.*`, preferring the `.zsh` file.
fn find_plugin_file(name: &str, dir: &Path) -> Option<PathBuf> {
    let prefix = format!("{name}.plugin.");
    let mut candidates: Vec<PathBuf> = fs::read_dir(dir)
        .ok()?
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| {
            path.is_file()
                && path
                    .file_name()
                    .is_some_and(|n| n.to_string_lossy().starts_with(&prefix))
        })
        .collect();
    candidates.sort();

    let zsh = candidates
        .iter()
        .position(|p| p.extension().is_some_and(|ext| ext == "zsh"));
    match zsh {
        Some(i) => Some(candidates.swap_remove(i)),
        None => candidates.into_iter().next(),
    }
}
