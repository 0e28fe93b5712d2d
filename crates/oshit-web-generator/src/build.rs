//! Build orchestration.
//!
//! Each public method of [`Builder`] is one independent entry point: it
//! extracts metadata, transforms in memory and writes its artifacts.

use std::{
    fs,
    path::{Path, PathBuf},
    time::Instant,
};

use chrono::Utc;
use oshit_web_core::{Config, MetadataExtractor, SiteMetadata};
use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::{
    assets::{AssetError, AssetOptimizer, OptimizeOutcome},
    lighthouse::{self, LighthouseError},
    manifest::{ManifestError, ManifestGenerator},
    output::{self, OutputError},
    patch::{PatchReport, PatchStatus, PatchValues, TemplatePatcher, render_social_meta},
    report::{
        ENHANCED_REPORT_FILE, EnhancedReport, PERFORMANCE_REPORT_FILE, PerformanceReport,
        ReportError, write_report,
    },
    robots::{RobotsError, RobotsGenerator},
    sitemap::{SitemapError, SitemapGenerator},
};

/// Page patched by `generate` and `enhance`.
pub const INDEX_FILE: &str = "index.html";

/// Build errors.
#[derive(Debug, Error)]
pub enum BuildError {
    /// Reading the page failed.
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Output error.
    #[error("output error: {0}")]
    Output(#[from] OutputError),

    /// Sitemap generation error.
    #[error("sitemap error: {0}")]
    Sitemap(#[from] SitemapError),

    /// Robots generation error.
    #[error("robots error: {0}")]
    Robots(#[from] RobotsError),

    /// Manifest generation error.
    #[error("manifest error: {0}")]
    Manifest(#[from] ManifestError),

    /// Report generation error.
    #[error("report error: {0}")]
    Report(#[from] ReportError),

    /// Lighthouse config generation error.
    #[error("lighthouse error: {0}")]
    Lighthouse(#[from] LighthouseError),

    /// Asset error.
    #[error("asset error: {0}")]
    Asset(#[from] AssetError),
}

/// Result type for build operations.
pub type Result<T> = std::result::Result<T, BuildError>;

/// Build statistics.
#[derive(Debug, Clone)]
pub struct BuildStats {
    /// Metadata the run was based on.
    pub metadata: SiteMetadata,

    /// Outcome of the page patch; `None` when the page could not be updated.
    pub html: Option<PatchReport>,

    /// Files written, in order.
    pub artifacts: Vec<PathBuf>,

    /// Build duration in milliseconds.
    pub duration_ms: u64,
}

/// Runs the website build steps against one repository checkout.
#[derive(Debug)]
pub struct Builder {
    config: Config,
    repo_root: PathBuf,
    site_dir: PathBuf,
    plugins_dir: PathBuf,
}

impl Builder {
    /// Create a builder using the locations from `config.paths`.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            repo_root: config.repo_root().to_path_buf(),
            site_dir: config.site_dir(),
            plugins_dir: config.plugins_dir(),
            config,
        }
    }

    /// Override the website directory.
    #[must_use]
    pub fn with_site_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.site_dir = dir.into();
        self
    }

    /// Website directory.
    pub fn site_dir(&self) -> &Path {
        &self.site_dir
    }

    fn extract(&self) -> SiteMetadata {
        MetadataExtractor::new(&self.repo_root, self.config.extract_defaults())
            .with_site_dir(&self.site_dir)
            .with_plugins_dir(&self.plugins_dir)
            .extract()
    }

    /// Patch the page and write sitemap, robots.txt, manifest and performance report.
    pub fn generate(&self) -> Result<BuildStats> {
        let start = Instant::now();
        info!(site = %self.site_dir.display(), "generating website content");

        let metadata = self.extract();
        let values = PatchValues {
            version: &metadata.version,
            plugin_count: metadata.plugin_count,
            social_meta: Some(render_social_meta(&self.config, &metadata.version)),
        };
        let html = self.try_patch_html(&values);

        let mut artifacts = Vec::new();
        if html.is_some() {
            artifacts.push(self.site_dir.join(INDEX_FILE));
        }

        artifacts.push(SitemapGenerator::new(self.config.clone()).generate(&self.site_dir)?);
        artifacts.push(RobotsGenerator::new(self.config.clone()).generate(&self.site_dir)?);
        artifacts.push(ManifestGenerator::new(self.config.clone()).generate(&self.site_dir)?);

        let report = PerformanceReport::new(&self.config.report, &metadata, Utc::now());
        artifacts.push(write_report(&report, &self.site_dir, PERFORMANCE_REPORT_FILE)?);

        Ok(self.finish(metadata, html, artifacts, start))
    }

    /// Patch version and plugin count, then write the enhanced report.
    pub fn enhance(&self) -> Result<BuildStats> {
        let start = Instant::now();
        info!(site = %self.site_dir.display(), "generating enhanced content");

        let metadata = self.extract();
        let values = PatchValues {
            version: &metadata.version,
            plugin_count: metadata.plugin_count,
            social_meta: None,
        };
        let html = self.try_patch_html(&values);

        let mut artifacts = Vec::new();
        if html.is_some() {
            artifacts.push(self.site_dir.join(INDEX_FILE));
        }

        let report = EnhancedReport::new(&metadata, Utc::now());
        artifacts.push(write_report(&report, &self.site_dir, ENHANCED_REPORT_FILE)?);

        Ok(self.finish(metadata, html, artifacts, start))
    }

    /// Write `lighthouserc.json` at the repository root.
    pub fn lighthouse(&self) -> Result<PathBuf> {
        Ok(lighthouse::generate(&self.config.lighthouse, &self.repo_root)?)
    }

    /// Minify the site's assets; `production` allows rewriting the page.
    pub fn optimize(&self, production: bool) -> Result<OptimizeOutcome> {
        Ok(AssetOptimizer::new(&self.site_dir, production).run()?)
    }

    /// Patch the page, logging instead of failing.
    fn try_patch_html(&self, values: &PatchValues) -> Option<PatchReport> {
        match self.patch_html(values) {
            Ok(report) => Some(report),
            Err(e) => {
                error!(error = %e, "could not update HTML, continuing");
                None
            }
        }
    }

    /// Read, patch and rewrite the page.
    fn patch_html(&self, values: &PatchValues) -> Result<PatchReport> {
        let path = self.site_dir.join(INDEX_FILE);
        let original = fs::read_to_string(&path).map_err(|source| BuildError::Read {
            path: path.clone(),
            source,
        })?;

        let patcher = TemplatePatcher::new(&self.config.site.name);
        let (patched, report) = patcher.apply(&original, values);

        for (region, status) in [
            ("version", Some(report.version)),
            ("plugin count", Some(report.plugin_count)),
            ("social meta", report.social_meta),
        ] {
            match status {
                Some(PatchStatus::NotFound) => warn!(region, "pattern not found, left unchanged"),
                Some(status) => debug!(region, ?status, "patched"),
                None => {}
            }
        }

        if patched != original {
            output::write_atomic(&path, &patched)?;
            info!(path = %path.display(), "updated HTML with dynamic content");
        } else {
            debug!(path = %path.display(), "HTML already up to date");
        }

        Ok(report)
    }

    fn finish(
        &self,
        metadata: SiteMetadata,
        html: Option<PatchReport>,
        artifacts: Vec<PathBuf>,
        start: Instant,
    ) -> BuildStats {
        let duration_ms = start.elapsed().as_millis() as u64;

        info!(
            version = %metadata.version,
            plugins = metadata.plugin_count,
            features = metadata.features.len(),
            changes = metadata.changes.len(),
            artifacts = artifacts.len(),
            duration_ms,
            "build complete"
        );

        BuildStats {
            metadata,
            html,
            artifacts,
            duration_ms,
        }
    }
}
