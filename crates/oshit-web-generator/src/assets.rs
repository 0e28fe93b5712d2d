//! Asset optimization.
//!
//! Produces minified variants of the site stylesheet and script and an
//! optimization report. Minification is a fixed sequence of regex passes,
//! not a parser: comment-like text inside string literals or URLs (for
//! example `"https://..."` in JavaScript) is stripped along with real
//! comments.

use std::{
    collections::BTreeMap,
    fs,
    path::PathBuf,
    sync::LazyLock,
};

use chrono::Utc;
use regex::{NoExpand, Regex};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::{
    output::{self, OutputError},
    report::iso_timestamp,
};

/// Page the optimizer reports on and, in production, rewrites.
pub const HTML_FILE: &str = "index.html";
/// Stylesheet source.
pub const CSS_FILE: &str = "styles.css";
/// Minified stylesheet.
pub const CSS_MIN_FILE: &str = "styles.min.css";
/// Script source.
pub const JS_FILE: &str = "script.js";
/// Minified script.
pub const JS_MIN_FILE: &str = "script.min.js";
/// Optimization report file name.
pub const OPTIMIZATION_REPORT_FILE: &str = "optimization-report.json";

/// Asset processing errors.
#[derive(Debug, Error)]
pub enum AssetError {
    /// IO error.
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Output error.
    #[error(transparent)]
    Output(#[from] OutputError),

    /// JSON serialization error.
    #[error("report serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for asset operations.
pub type Result<T> = std::result::Result<T, AssetError>;

/// One regex substitution.
struct Pass {
    re: Regex,
    replacement: &'static str,
}

fn passes(spec: &[(&str, &'static str)]) -> Vec<Pass> {
    spec.iter()
        .map(|&(pattern, replacement)| Pass {
            re: Regex::new(pattern).expect("valid minification regex"),
            replacement,
        })
        .collect()
}

fn run_passes(text: &str, passes: &[Pass]) -> String {
    let mut out = text.to_string();
    for pass in passes {
        out = pass.re.replace_all(&out, NoExpand(pass.replacement)).into_owned();
    }
    out.trim().to_string()
}

static CSS_PASSES: LazyLock<Vec<Pass>> = LazyLock::new(|| {
    passes(&[
        (r"(?s)/\*.*?\*/", ""),
        (r"\s+", " "),
        (r";\s*\}", "}"),
        (r"\s*\{\s*", "{"),
        (r"\s*\}\s*", "}"),
        (r"\s*;\s*", ";"),
        (r"\s*,\s*", ","),
        (r"\s*:\s*", ":"),
    ])
});

static JS_PASSES: LazyLock<Vec<Pass>> = LazyLock::new(|| {
    passes(&[
        (r"(?s)/\*.*?\*/", ""),
        (r"(?m)//.*$", ""),
        (r"\s+", " "),
        (r";\s*\}", "}"),
        (r"\s*\{\s*", "{"),
        (r"\s*\}\s*", "}"),
        (r"\s*;\s*", ";"),
        (r"\s*,\s*", ","),
    ])
});

static HTML_PASSES: LazyLock<Vec<Pass>> =
    LazyLock::new(|| passes(&[(r">\s+<", "><"), (r"\s+", " ")]));

/// Minify CSS: drop comments, collapse whitespace, tighten punctuation.
pub fn minify_css(css: &str) -> String {
    run_passes(css, &CSS_PASSES)
}

/// Minify JavaScript: drop block and line comments, collapse whitespace, tighten punctuation.
pub fn minify_js(js: &str) -> String {
    run_passes(js, &JS_PASSES)
}

/// Minify HTML: drop whitespace between tags, collapse the rest.
pub fn minify_html(html: &str) -> String {
    run_passes(html, &HTML_PASSES)
}

/// Point the first stylesheet and script references at their minified files.
pub fn rewrite_asset_references(html: &str) -> String {
    html.replacen(CSS_FILE, CSS_MIN_FILE, 1)
        .replacen(JS_FILE, JS_MIN_FILE, 1)
}

/// Byte sizes before and after a transformation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeChange {
    pub original: usize,
    pub optimized: usize,
}

impl SizeChange {
    /// Bytes saved.
    #[must_use]
    pub fn saved(&self) -> usize {
        self.original.saturating_sub(self.optimized)
    }

    /// Percentage saved, 0 for empty input.
    #[must_use]
    pub fn percent(&self) -> f64 {
        percent(self.saved() as u64, self.original as u64)
    }
}

fn percent(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}

/// What happened to `index.html`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HtmlOutcome {
    pub change: SizeChange,
    /// Whether the page was rewritten in place.
    pub written: bool,
}

/// Sizes of one source file and its minified variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileSizes {
    pub size: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minified_size: Option<u64>,
}

/// Contents of `optimization-report.json`.
///
/// `index.html` has no minified variant, so it adds its full size to both
/// `total_original` and `total_optimized`, and `total_savings` comes only
/// from CSS and JS.
#[derive(Debug, Clone, Serialize)]
pub struct OptimizationReport {
    pub timestamp: String,
    pub files: BTreeMap<String, FileSizes>,
    pub total_original: u64,
    /// Sum of minified sizes, or the source size for files without a minified variant.
    pub total_optimized: u64,
    pub total_savings: u64,
    /// Savings with one decimal, e.g. `"23.4"`.
    pub savings_percentage: String,
}

/// Result of an optimizer run.
#[derive(Debug, Clone)]
pub struct OptimizeOutcome {
    pub css: Option<SizeChange>,
    pub js: Option<SizeChange>,
    pub html: Option<HtmlOutcome>,
    pub report: OptimizationReport,
}

/// Minifies the site's assets in place.
#[derive(Debug)]
pub struct AssetOptimizer {
    site_dir: PathBuf,
    production: bool,
}

impl AssetOptimizer {
    /// Create an optimizer for `site_dir`. Outside production the HTML is only measured.
    #[must_use]
    pub fn new(site_dir: impl Into<PathBuf>, production: bool) -> Self {
        Self {
            site_dir: site_dir.into(),
            production,
        }
    }

    /// Minify CSS and JS, handle the HTML, and write the report.
    pub fn run(&self) -> Result<OptimizeOutcome> {
        info!(
            dir = %self.site_dir.display(),
            production = self.production,
            "optimizing assets"
        );

        let css = self.minify_file(CSS_FILE, CSS_MIN_FILE, minify_css)?;
        let js = self.minify_file(JS_FILE, JS_MIN_FILE, minify_js)?;
        let html = self.optimize_html()?;

        let report = self.build_report()?;
        let json = serde_json::to_string_pretty(&report)?;
        output::write_atomic(&self.site_dir.join(OPTIMIZATION_REPORT_FILE), json)?;

        info!(
            total_original = report.total_original,
            total_optimized = report.total_optimized,
            total_savings = report.total_savings,
            "asset optimization complete"
        );

        Ok(OptimizeOutcome {
            css,
            js,
            html,
            report,
        })
    }

    fn read(&self, name: &str) -> Result<Option<String>> {
        let path = self.site_dir.join(name);
        if !path.exists() {
            debug!(path = %path.display(), "asset not present, skipping");
            return Ok(None);
        }
        fs::read_to_string(&path)
            .map(Some)
            .map_err(|source| AssetError::Read { path, source })
    }

    fn minify_file(
        &self,
        source: &str,
        target: &str,
        minify: fn(&str) -> String,
    ) -> Result<Option<SizeChange>> {
        let Some(text) = self.read(source)? else {
            return Ok(None);
        };

        let minified = minify(&text);
        output::write_atomic(&self.site_dir.join(target), &minified)?;

        let change = SizeChange {
            original: text.len(),
            optimized: minified.len(),
        };
        info!(
            file = source,
            original = change.original,
            optimized = change.optimized,
            percent = change.percent(),
            "minified asset"
        );
        Ok(Some(change))
    }

    fn optimize_html(&self) -> Result<Option<HtmlOutcome>> {
        let Some(text) = self.read(HTML_FILE)? else {
            return Ok(None);
        };

        let html = if self.production {
            rewrite_asset_references(&text)
        } else {
            text
        };
        let optimized = minify_html(&html);
        let change = SizeChange {
            original: html.len(),
            optimized: optimized.len(),
        };

        if self.production {
            output::write_atomic(&self.site_dir.join(HTML_FILE), &optimized)?;
            info!(saved = change.saved(), "optimized HTML written");
        } else {
            info!(saved = change.saved(), "HTML would be optimized (production only)");
        }

        Ok(Some(HtmlOutcome {
            change,
            written: self.production,
        }))
    }

    fn file_size(&self, name: &str) -> Result<Option<u64>> {
        let path = self.site_dir.join(name);
        match fs::metadata(&path) {
            Ok(meta) => Ok(Some(meta.len())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(AssetError::Read { path, source }),
        }
    }

    fn build_report(&self) -> Result<OptimizationReport> {
        let mut files = BTreeMap::new();
        let mut total_original = 0;
        let mut total_optimized = 0;

        for (source, minified) in [
            (HTML_FILE, None),
            (CSS_FILE, Some(CSS_MIN_FILE)),
            (JS_FILE, Some(JS_MIN_FILE)),
        ] {
            let Some(size) = self.file_size(source)? else {
                continue;
            };
            let minified_size = match minified {
                Some(name) => self.file_size(name)?,
                None => None,
            };

            total_original += size;
            total_optimized += minified_size.unwrap_or(size);
            files.insert(
                source.to_string(),
                FileSizes {
                    size,
                    minified_size,
                },
            );
        }

        let total_savings = total_original.saturating_sub(total_optimized);
        Ok(OptimizationReport {
            timestamp: iso_timestamp(Utc::now()),
            files,
            total_original,
            total_optimized,
            total_savings,
            savings_percentage: format!("{:.1}", percent(total_savings, total_original)),
        })
    }
}
