//! Optimize command - minifies assets and writes the optimization report

use std::path::Path;

use color_eyre::eyre::{Result, WrapErr};
use oshit_web_generator::{Builder, assets::SizeChange};

use super::load_config;

/// Whether `NODE_ENV` asks for a production build.
pub fn production_from_env() -> bool {
    is_production(std::env::var("NODE_ENV").ok().as_deref())
}

fn is_production(node_env: Option<&str>) -> bool {
    node_env == Some("production")
}

/// Run the optimize command.
///
/// In production the page is rewritten to reference the minified assets.
pub fn run(config_path: &Path, production: bool) -> Result<()> {
    tracing::info!(?config_path, production, "Starting asset optimization");

    let config = load_config(config_path)?;
    let outcome = Builder::new(config)
        .optimize(production)
        .wrap_err("Asset optimization failed")?;

    println!();
    println!("  Asset optimization completed!");
    println!();
    print_change("styles.css", outcome.css.as_ref());
    print_change("script.js", outcome.js.as_ref());
    print_change("index.html", outcome.html.as_ref().map(|h| &h.change));
    if outcome.html.as_ref().is_some_and(|h| h.written) {
        println!("  ✓ index.html now references the minified assets");
    }
    println!();

    let report = &outcome.report;
    println!("  Original:  {} bytes", report.total_original);
    println!("  Optimized: {} bytes", report.total_optimized);
    println!(
        "  Saved:     {} bytes ({}%)",
        report.total_savings, report.savings_percentage
    );
    println!();

    Ok(())
}

fn print_change(name: &str, change: Option<&SizeChange>) {
    match change {
        Some(change) => println!(
            "  {name:<11} {} -> {} bytes ({:.1}% smaller)",
            change.original,
            change.optimized,
            change.percent()
        ),
        None => println!("  {name:<11} not found, skipped"),
    }
}
