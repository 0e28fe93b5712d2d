//! OSH.IT Website Generator Library
//!
//! Turns extracted repository metadata into website artifacts.
//!
//! # Modules
//!
//! - [`patch`] - Regex patches of the page's version, plugin count and social meta
//! - [`sitemap`] - XML sitemap generation
//! - [`robots`] - robots.txt generation
//! - [`manifest`] - PWA manifest generation
//! - [`report`] - JSON metadata reports
//! - [`lighthouse`] - Lighthouse CI configuration
//! - [`assets`] - CSS/JS/HTML minification and size report
//! - [`output`] - Atomic file writes
//! - [`build`] - Build orchestration

pub mod assets;
pub mod build;
pub mod lighthouse;
pub mod manifest;
pub mod output;
pub mod patch;
pub mod report;
pub mod robots;
pub mod sitemap;

pub use assets::{AssetOptimizer, OptimizeOutcome, minify_css, minify_html, minify_js};
pub use build::{BuildStats, Builder};
pub use manifest::ManifestGenerator;
pub use patch::{PatchReport, PatchStatus, TemplatePatcher};
pub use report::{EnhancedReport, PerformanceReport};
pub use robots::RobotsGenerator;
pub use sitemap::SitemapGenerator;
