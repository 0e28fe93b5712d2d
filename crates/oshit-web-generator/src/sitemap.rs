//! Sitemap generation.
//!
//! Generates the XML sitemap for search engine optimization.

use std::path::{Path, PathBuf};

use chrono::{NaiveDate, Utc};
use oshit_web_core::Config;
use thiserror::Error;
use tracing::info;

use crate::output::{self, OutputError};

/// Sitemap file name.
pub const SITEMAP_FILE: &str = "sitemap.xml";

/// Sitemap generation errors.
#[derive(Debug, Error)]
pub enum SitemapError {
    /// Output error.
    #[error(transparent)]
    Output(#[from] OutputError),
}

/// Result type for sitemap operations.
pub type Result<T> = std::result::Result<T, SitemapError>;

/// Change frequency advertised for every entry.
pub const CHANGE_FREQ: &str = "weekly";

/// A sitemap URL entry.
#[derive(Debug, Clone)]
pub struct SitemapUrl {
    /// URL location.
    pub loc: String,

    /// Last modification date.
    pub lastmod: Option<NaiveDate>,

    /// Change frequency.
    pub changefreq: Option<&'static str>,

    /// Priority (0.0 to 1.0).
    pub priority: Option<f32>,
}

/// Sitemap generator.
#[derive(Debug)]
pub struct SitemapGenerator {
    config: Config,
}

impl SitemapGenerator {
    /// Create a new sitemap generator.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// The site home page and the source repository, both modified on `date`.
    pub fn entries(&self, date: NaiveDate) -> Vec<SitemapUrl> {
        vec![
            SitemapUrl {
                loc: self.config.site.url.clone(),
                lastmod: Some(date),
                changefreq: Some(CHANGE_FREQ),
                priority: Some(1.0),
            },
            SitemapUrl {
                loc: self.config.site.repository.clone(),
                lastmod: Some(date),
                changefreq: Some(CHANGE_FREQ),
                priority: Some(0.8),
            },
        ]
    }

    /// Render the sitemap for `date`.
    pub fn render(&self, date: NaiveDate) -> String {
        let mut xml = String::from(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
        xml.push('\n');
        xml.push_str(r#"<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">"#);
        xml.push('\n');

        for url in self.entries(date) {
            xml.push_str(&url_to_xml(&url));
        }

        xml.push_str("</urlset>\n");
        xml
    }

    /// Write `sitemap.xml` dated today (UTC) into `output_dir`.
    pub fn generate(&self, output_dir: &Path) -> Result<PathBuf> {
        let path = output_dir.join(SITEMAP_FILE);
        output::write_atomic(&path, self.render(Utc::now().date_naive()))?;

        info!(path = %path.display(), "generated sitemap");
        Ok(path)
    }
}

/// Convert a URL entry to XML.
fn url_to_xml(url: &SitemapUrl) -> String {
    let mut xml = String::from("  <url>\n");

    xml.push_str(&format!("    <loc>{}</loc>\n", escape_xml(&url.loc)));

    if let Some(lastmod) = &url.lastmod {
        xml.push_str(&format!(
            "    <lastmod>{}</lastmod>\n",
            lastmod.format("%Y-%m-%d")
        ));
    }

    if let Some(changefreq) = url.changefreq {
        xml.push_str(&format!("    <changefreq>{changefreq}</changefreq>\n"));
    }

    if let Some(priority) = &url.priority {
        xml.push_str(&format!("    <priority>{priority:.1}</priority>\n"));
    }

    xml.push_str("  </url>\n");
    xml
}

/// Escape special XML characters.
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
