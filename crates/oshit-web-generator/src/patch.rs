//! Targeted rewrites of the website's `index.html`.
//!
//! The page is not parsed. Each substitution is a regex tied to the exact
//! markup around the value it replaces; when the markup changes the pattern
//! stops matching and the substitution becomes a no-op reported as
//! [`PatchStatus::NotFound`].
//!
//! | Substitution | Pattern |
//! |---|---|
//! | version | `<div class="terminal-title">{NAME} v[^<]*</div>` (all occurrences) |
//! | plugin count | `<span class="stat-value">\d+</span>\s*<span class="stat-label">Built-in Plugins</span>` (first) |
//! | social meta | inserted after the first `<link rel="icon"[^>]*>` unless `property="og:type"` is present |

use std::{borrow::Cow, sync::LazyLock};

use oshit_web_core::Config;
use regex::{Captures, NoExpand, Regex};
use serde_json::json;

/// Marker whose presence means the social block was already injected.
pub const SOCIAL_META_MARKER: &str = r#"property="og:type""#;

static PLUGIN_COUNT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"<span class="stat-value">\d+</span>\s*<span class="stat-label">Built-in Plugins</span>"#,
    )
    .expect("valid plugin count regex")
});

static ICON_LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"<link rel="icon"[^>]*>"#).expect("valid icon link regex"));

/// Result of one substitution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatchStatus {
    /// The pattern matched and the text was replaced.
    Applied,
    /// The pattern did not match; the text is unchanged.
    NotFound,
    /// Nothing to do; the content is already there.
    AlreadyPresent,
}

/// Patched text plus what happened.
#[derive(Debug, Clone)]
pub struct Patched<'h> {
    pub html: Cow<'h, str>,
    pub status: PatchStatus,
}

impl<'h> Patched<'h> {
    fn unchanged(html: &'h str, status: PatchStatus) -> Self {
        Self {
            html: Cow::Borrowed(html),
            status,
        }
    }
}

/// Outcome of a full patch pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatchReport {
    pub version: PatchStatus,
    pub plugin_count: PatchStatus,
    /// `None` when the pass did not ask for the social block.
    pub social_meta: Option<PatchStatus>,
}

/// Values spliced into the page.
#[derive(Debug, Clone)]
pub struct PatchValues<'a> {
    pub version: &'a str,
    pub plugin_count: usize,
    /// Rendered social block, see [`render_social_meta`].
    pub social_meta: Option<String>,
}

/// Rewrites the version, plugin count and social block of the page.
#[derive(Debug, Clone)]
pub struct TemplatePatcher {
    name: String,
    version_re: Regex,
}

impl TemplatePatcher {
    /// Create a patcher for the product name shown in the terminal title.
    #[must_use]
    pub fn new(name: &str) -> Self {
        let name = escape_html(name);
        let pattern = format!(
            r#"<div class="terminal-title">{} v[^<]*</div>"#,
            regex::escape(&name)
        );
        let version_re = Regex::new(&pattern).expect("escaped name yields a valid regex");
        Self { name, version_re }
    }

    /// Replace the version shown in every terminal title.
    pub fn patch_version<'h>(&self, html: &'h str, version: &str) -> Patched<'h> {
        if !self.version_re.is_match(html) {
            return Patched::unchanged(html, PatchStatus::NotFound);
        }

        let replacement = format!(
            r#"<div class="terminal-title">{} v{}</div>"#,
            self.name,
            escape_html(version)
        );
        Patched {
            html: self.version_re.replace_all(html, NoExpand(&replacement)),
            status: PatchStatus::Applied,
        }
    }

    /// Replace the first "Built-in Plugins" stat value.
    pub fn patch_plugin_count<'h>(&self, html: &'h str, count: usize) -> Patched<'h> {
        if !PLUGIN_COUNT_RE.is_match(html) {
            return Patched::unchanged(html, PatchStatus::NotFound);
        }

        let replacement = format!(
            "<span class=\"stat-value\">{count}</span>\n                <span class=\"stat-label\">Built-in Plugins</span>"
        );
        Patched {
            html: PLUGIN_COUNT_RE.replace(html, NoExpand(&replacement)),
            status: PatchStatus::Applied,
        }
    }

    /// Insert `block` right after the favicon link, once.
    pub fn inject_social_meta<'h>(&self, html: &'h str, block: &str) -> Patched<'h> {
        if html.contains(SOCIAL_META_MARKER) {
            return Patched::unchanged(html, PatchStatus::AlreadyPresent);
        }
        if !ICON_LINK_RE.is_match(html) {
            return Patched::unchanged(html, PatchStatus::NotFound);
        }

        Patched {
            html: ICON_LINK_RE.replace(html, |caps: &Captures| format!("{}{block}", &caps[0])),
            status: PatchStatus::Applied,
        }
    }

    /// Run every substitution. Misses leave their region untouched while the others still apply.
    pub fn apply(&self, html: &str, values: &PatchValues) -> (String, PatchReport) {
        let version = self.patch_version(html, values.version);
        let count = self.patch_plugin_count(&version.html, values.plugin_count);

        let (html, social_meta) = match &values.social_meta {
            Some(block) => {
                let meta = self.inject_social_meta(&count.html, block);
                (meta.html.into_owned(), Some(meta.status))
            }
            None => (count.html.into_owned(), None),
        };

        let report = PatchReport {
            version: version.status,
            plugin_count: count.status,
            social_meta,
        };
        (html, report)
    }
}

/// Render the Open Graph, Twitter card and JSON-LD block.
pub fn render_social_meta(config: &Config, version: &str) -> String {
    let site = &config.site;
    let structured = json!({
        "@context": "https://schema.org",
        "@type": "SoftwareApplication",
        "name": site.name,
        "description": site.app_description,
        "url": site.url,
        "downloadUrl": site.repository,
        "version": version,
        "operatingSystem": site.operating_system,
        "applicationCategory": "DeveloperApplication",
        "offers": {
            "@type": "Offer",
            "price": "0",
            "priceCurrency": "USD"
        },
        "author": {
            "@type": "Person",
            "name": site.author,
            "url": site.author_url
        }
    });
    // `<` escaped so no value can close the surrounding <script> element.
    let structured = serde_json::to_string_pretty(&structured)
        .unwrap_or_default()
        .replace('<', "\\u003c")
        .lines()
        .map(|line| format!("  {line}"))
        .collect::<Vec<_>>()
        .join("\n");

    let url = escape_html(&site.url);
    let title = escape_html(&site.title);
    let description = escape_html(&site.description);
    let image = escape_html(&site.og_image);

    format!(
        r#"
  <!-- Open Graph / Facebook -->
  <meta property="og:type" content="website">
  <meta property="og:url" content="{url}">
  <meta property="og:title" content="{title}">
  <meta property="og:description" content="{description}">
  <meta property="og:image" content="{image}">

  <!-- Twitter -->
  <meta property="twitter:card" content="summary_large_image">
  <meta property="twitter:url" content="{url}">
  <meta property="twitter:title" content="{title}">
  <meta property="twitter:description" content="{description}">
  <meta property="twitter:image" content="{image}">

  <!-- Structured Data -->
  <script type="application/ld+json">
{structured}
  </script>"#
    )
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
