//! End-to-end tests for the website build.
//!
//! These tests lay out a small repository checkout and run every entry point against it.

use std::{fs, path::Path};

use oshit_web_core::Config;
use oshit_web_generator::{Builder, PatchStatus};
use tempfile::TempDir;

const INDEX: &str = r#"<!DOCTYPE html>
<html>
<head>
    <link rel="icon" type="image/svg+xml" href="favicon.svg">
    <link rel="stylesheet" href="styles.css">
</head>
<body>
    <div class="terminal-title">OSH.IT v1.0.0</div>
    <div class="stat">
        <span class="stat-value">3</span>
        <span class="stat-label">Built-in Plugins</span>
    </div>
    <script src="script.js"></script>
</body>
</html>
"#;

const README: &str = "# OSH.IT

A lightweight zsh framework.

## ✨ Features

- Lazy loading
- Fast startup
- Lazy loading

## Installation

- not a feature
";

const CHANGELOG: &str = "# Changelog

## [Unreleased]

### Added
- Added foo
- Added bar

## [1.4.0] - 2025-01-01
- Old entry
";

fn write(root: &Path, rel: &str, contents: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

fn checkout() -> TempDir {
    let root = TempDir::new().unwrap();
    let r = root.path();

    write(r, "VERSION", "2.0.0\n");
    write(r, "package.json", r#"{"version": "1.9.0"}"#);
    write(r, "README.md", README);
    write(r, "CHANGELOG.md", CHANGELOG);
    write(
        r,
        "plugins/foo/foo.plugin.zsh",
        "# Description: Foo does X\n# Version: 2.1.0\n# Category: Stable\n",
    );
    write(r, "plugins/bar/README.md", "# Bar helper\n");
    write(r, "docs/index.html", INDEX);
    write(r, "docs/styles.css", "body {\n  color: red;\n}\n");
    write(r, "docs/script.js", "// hi\nfunction hi() {\n  return 1;\n}\n");

    root
}

fn config(root: &Path) -> Config {
    let mut config = Config::default();
    config.paths.repo_root = root.to_path_buf();
    config
}

fn read_json(path: &Path) -> serde_json::Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn test_enhance_reports_catalog() {
    let root = checkout();
    let docs = root.path().join("docs");

    let stats = Builder::new(config(root.path())).enhance().unwrap();

    assert_eq!(stats.metadata.version, "2.0.0");
    assert_eq!(stats.metadata.plugin_count, 2);
    assert_eq!(stats.metadata.features, vec!["Lazy loading", "Fast startup"]);
    assert_eq!(stats.metadata.changes, vec!["Added foo", "Added bar"]);

    let report = read_json(&docs.join("enhanced-report.json"));
    assert_eq!(report["version"], "2.0.0");
    assert_eq!(report["plugins"]["total"], 2);
    assert_eq!(report["plugins"]["by_category"]["stable"], 1);
    assert_eq!(report["plugins"]["by_category"]["experimental"], 1);

    let foo = &report["plugins"]["details"]["stable"][0];
    assert_eq!(foo["name"], "foo");
    assert_eq!(foo["description"], "Foo does X");
    assert_eq!(foo["version"], "2.1.0");
    assert_eq!(foo["category"], "stable");

    let bar = &report["plugins"]["details"]["experimental"][0];
    assert_eq!(bar["description"], "Bar helper");
    assert_eq!(bar["version"], "1.0.0");

    let html = fs::read_to_string(docs.join("index.html")).unwrap();
    assert!(html.contains(r#"<div class="terminal-title">OSH.IT v2.0.0</div>"#));
    assert!(html.contains(r#"<span class="stat-value">2</span>"#));
}

#[test]
fn test_generate_is_idempotent_for_social_meta() {
    let root = checkout();
    let docs = root.path().join("docs");
    let builder = Builder::new(config(root.path()));

    let first = builder.generate().unwrap();
    assert_eq!(first.html.unwrap().social_meta, Some(PatchStatus::Applied));

    write(root.path(), "VERSION", "2.1.0\n");
    let second = builder.generate().unwrap();
    let report = second.html.unwrap();
    assert_eq!(report.version, PatchStatus::Applied);
    assert_eq!(report.social_meta, Some(PatchStatus::AlreadyPresent));

    let html = fs::read_to_string(docs.join("index.html")).unwrap();
    assert_eq!(html.matches(r#"property="og:type""#).count(), 1);
    assert!(html.contains("OSH.IT v2.1.0"));
    assert!(!html.contains("OSH.IT v2.0.0"));

    let sitemap = fs::read_to_string(docs.join("sitemap.xml")).unwrap();
    assert!(sitemap.contains("<loc>https://osh.it.miaowu.org/</loc>"));

    let robots = fs::read_to_string(docs.join("robots.txt")).unwrap();
    assert!(robots.starts_with("User-agent: *\n"));
    assert!(robots.ends_with("Sitemap: https://oiahoon.github.io/osh.it/sitemap.xml"));

    let manifest = read_json(&docs.join("manifest.json"));
    assert_eq!(manifest["short_name"], "OSH.IT");

    let performance = read_json(&docs.join("performance-report.json"));
    assert_eq!(performance["version"], "2.1.0");
    assert_eq!(performance["metrics"]["plugin_count"], 2);
    assert_eq!(performance["metrics"]["features_count"], 2);
}

#[test]
fn test_optimize_development_leaves_page() {
    let root = checkout();
    let docs = root.path().join("docs");

    let outcome = Builder::new(config(root.path())).optimize(false).unwrap();

    assert_eq!(
        fs::read_to_string(docs.join("styles.min.css")).unwrap(),
        "body{color:red}"
    );
    assert_eq!(
        fs::read_to_string(docs.join("script.min.js")).unwrap(),
        "function hi(){return 1}"
    );
    assert!(!outcome.html.unwrap().written);
    assert_eq!(fs::read_to_string(docs.join("index.html")).unwrap(), INDEX);

    let report = read_json(&docs.join("optimization-report.json"));
    assert!(report["total_savings"].as_u64().unwrap() > 0);
}

#[test]
fn test_optimize_production_rewrites_references() {
    let root = checkout();
    let docs = root.path().join("docs");

    let outcome = Builder::new(config(root.path())).optimize(true).unwrap();

    assert!(outcome.html.unwrap().written);
    let html = fs::read_to_string(docs.join("index.html")).unwrap();
    assert!(html.contains(r#"href="styles.min.css""#));
    assert!(html.contains(r#"src="script.min.js""#));
}

#[test]
fn test_lighthouse_config() {
    let root = checkout();

    let path = Builder::new(config(root.path())).lighthouse().unwrap();

    let rc = read_json(&path);
    assert_eq!(rc["ci"]["collect"]["startServerReadyTimeout"], 10_000);
    assert_eq!(
        rc["ci"]["assert"]["assertions"]["categories:performance"][1]["minScore"],
        0.9
    );
}
