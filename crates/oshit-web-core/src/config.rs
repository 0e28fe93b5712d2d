//! Website build configuration.
//!
//! Every value has a default matching the published OSH.IT site, so a
//! missing `site.toml` is not an error for [`Config::load_or_default`].

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{
    error::{CoreError, Result},
    metadata::ExtractDefaults,
};

/// Prefix for environment overrides, e.g. `OSHIT__SITE__URL`.
pub const ENV_PREFIX: &str = "OSHIT";

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Site identity and URLs.
    #[serde(default)]
    pub site: SiteConfig,

    /// Input and output locations.
    #[serde(default)]
    pub paths: PathsConfig,

    /// Fallbacks used when repository metadata is missing.
    #[serde(default)]
    pub defaults: DefaultsConfig,

    /// PWA manifest settings.
    #[serde(default)]
    pub manifest: ManifestConfig,

    /// robots.txt settings.
    #[serde(default)]
    pub robots: RobotsConfig,

    /// Static marketing metrics for the performance report.
    #[serde(default)]
    pub report: ReportConfig,

    /// Lighthouse CI settings.
    #[serde(default)]
    pub lighthouse: LighthouseConfig,
}

/// Site identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Product name shown in the terminal title, e.g. "OSH.IT".
    pub name: String,

    /// Page title used for social cards.
    pub title: String,

    /// Canonical site URL.
    pub url: String,

    /// Source repository URL.
    pub repository: String,

    /// Long description for social cards.
    pub description: String,

    /// Description for the structured data block.
    pub app_description: String,

    /// Social preview image.
    pub og_image: String,

    /// Favicon referenced by the injected link tag and the manifest.
    pub favicon: String,

    pub author: String,

    pub author_url: String,

    /// Operating systems listed in the structured data block.
    pub operating_system: String,
}

/// Input and output locations, relative to the working directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Repository root holding README.md, CHANGELOG.md, VERSION and package.json.
    pub repo_root: PathBuf,

    /// Website directory, relative to the repository root.
    pub site_dir: PathBuf,

    /// Plugin tree, relative to the repository root.
    pub plugins_dir: PathBuf,
}

/// Explicit fallback values for metadata extraction.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultsConfig {
    /// Version used when no VERSION or package.json provides one.
    pub version: String,

    /// Plugin count used when neither the plugin tree nor the README yields one.
    pub plugin_count: usize,
}

/// PWA manifest settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ManifestConfig {
    pub name: String,
    pub short_name: String,
    pub description: String,
    pub start_url: String,
    pub display: String,
    pub background_color: String,
    pub theme_color: String,
    pub icon_sizes: String,
    pub icon_type: String,
}

/// robots.txt settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RobotsConfig {
    /// Paths crawlers may visit.
    pub allow: Vec<String>,

    /// Paths crawlers must skip.
    pub disallow: Vec<String>,

    /// Absolute sitemap URL advertised to crawlers.
    pub sitemap_url: String,
}

/// Static metrics copied into `performance-report.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub lazy_loading_improvement: String,
    pub startup_time_traditional: String,
    pub startup_time_oshit: String,
}

/// Lighthouse CI settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LighthouseConfig {
    /// URLs to audit.
    pub urls: Vec<String>,

    /// Command that serves the site during collection.
    pub start_server_command: String,

    /// Output line that signals the server is ready.
    pub start_server_ready_pattern: String,

    /// Milliseconds to wait for the ready pattern.
    pub start_server_ready_timeout: u64,

    /// Category score assertions.
    pub assertions: Vec<LighthouseAssertion>,

    /// Where reports are uploaded.
    pub upload_target: String,
}

/// Minimum score asserted for one Lighthouse category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LighthouseAssertion {
    /// Category name, e.g. "performance".
    pub category: String,

    /// Assertion level, "warn" or "error".
    pub level: String,

    /// Minimum score between 0 and 1.
    pub min_score: f64,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            name: "OSH.IT".to_string(),
            title: "OSH.IT - A Lightweight Zsh Plugin Framework".to_string(),
            url: "https://osh.it.miaowu.org/".to_string(),
            repository: "https://github.com/oiahoon/osh.it".to_string(),
            description: "Lightning fast Zsh framework with 92% performance improvement through \
                          advanced lazy loading. Smart plugin system for developers."
                .to_string(),
            app_description: "A lightweight Zsh plugin framework with advanced lazy loading and \
                              92% performance improvement"
                .to_string(),
            og_image: "https://osh.it.miaowu.org/og-image.png".to_string(),
            favicon: "favicon.svg".to_string(),
            author: "oiahoon".to_string(),
            author_url: "https://github.com/oiahoon".to_string(),
            operating_system: "Linux, macOS".to_string(),
        }
    }
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            repo_root: PathBuf::from("."),
            site_dir: PathBuf::from("docs"),
            plugins_dir: PathBuf::from("plugins"),
        }
    }
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            version: "1.4.0".to_string(),
            plugin_count: 6,
        }
    }
}

impl Default for ManifestConfig {
    fn default() -> Self {
        Self {
            name: "OSH.IT - Zsh Plugin Framework".to_string(),
            short_name: "OSH.IT".to_string(),
            description: "A lightweight Zsh plugin framework with advanced lazy loading"
                .to_string(),
            start_url: "/".to_string(),
            display: "standalone".to_string(),
            background_color: "#0d1117".to_string(),
            theme_color: "#667eea".to_string(),
            icon_sizes: "any".to_string(),
            icon_type: "image/svg+xml".to_string(),
        }
    }
}

impl Default for RobotsConfig {
    fn default() -> Self {
        Self {
            allow: vec!["/".to_string()],
            disallow: Vec::new(),
            sitemap_url: "https://oiahoon.github.io/osh.it/sitemap.xml".to_string(),
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            lazy_loading_improvement: "92%".to_string(),
            startup_time_traditional: "138ms".to_string(),
            startup_time_oshit: "11ms".to_string(),
        }
    }
}

impl Default for LighthouseConfig {
    fn default() -> Self {
        let assertion = |category: &str, level: &str, min_score: f64| LighthouseAssertion {
            category: category.to_string(),
            level: level.to_string(),
            min_score,
        };

        Self {
            urls: vec!["https://oiahoon.github.io/osh.it/".to_string()],
            start_server_command: "cd docs && python3 -m http.server 8000".to_string(),
            start_server_ready_pattern: "Serving HTTP".to_string(),
            start_server_ready_timeout: 10_000,
            assertions: vec![
                assertion("performance", "warn", 0.9),
                assertion("accessibility", "error", 0.9),
                assertion("best-practices", "warn", 0.9),
                assertion("seo", "warn", 0.9),
                assertion("pwa", "warn", 0.7),
            ],
            upload_target: "temporary-public-storage".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file that must exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(CoreError::config(format!(
                "Configuration file not found: {}",
                path.display()
            )));
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content).map_err(|e| {
            CoreError::config_with_source(
                format!("Failed to parse config file: {}", path.display()),
                e,
            )
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from an optional TOML file layered with `OSHIT__`
    /// environment variables (`OSHIT__SITE__URL` sets `site.url`).
    ///
    /// A missing file yields the defaults.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
        }

        let settings = config::Config::builder()
            .add_source(config::File::from(path).required(false))
            .add_source(config::Environment::with_prefix(ENV_PREFIX).separator("__"))
            .build()?;

        let config: Config = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    fn validate(&self) -> Result<()> {
        if self.site.name.trim().is_empty() {
            return Err(CoreError::config("site.name cannot be empty"));
        }

        if self.site.title.trim().is_empty() {
            return Err(CoreError::config("site.title cannot be empty"));
        }

        if self.site.url.trim().is_empty() {
            return Err(CoreError::config("site.url cannot be empty"));
        }

        if self.lighthouse.assertions.iter().any(|a| !(0.0..=1.0).contains(&a.min_score)) {
            return Err(CoreError::config(
                "lighthouse.assertions min_score must be between 0 and 1",
            ));
        }

        Ok(())
    }

    /// Get the full site URL for a path.
    pub fn url_for(&self, path: &str) -> String {
        let base = self.site.url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{base}/{path}")
    }

    /// Repository root.
    pub fn repo_root(&self) -> &Path {
        &self.paths.repo_root
    }

    /// Website directory.
    pub fn site_dir(&self) -> PathBuf {
        self.paths.repo_root.join(&self.paths.site_dir)
    }

    /// Plugin tree.
    pub fn plugins_dir(&self) -> PathBuf {
        self.paths.repo_root.join(&self.paths.plugins_dir)
    }

    /// Fallbacks handed to the metadata extractor.
    pub fn extract_defaults(&self) -> ExtractDefaults {
        ExtractDefaults {
            version: self.defaults.version.clone(),
            plugin_count: self.defaults.plugin_count,
        }
    }
}
