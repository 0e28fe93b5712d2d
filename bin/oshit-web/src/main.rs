//! OSH.IT website tooling CLI
//!
//! Regenerates the dynamic parts of the OSH.IT marketing site from the
//! framework repository.
//!
//! This is the binary entry point. The library functionality is in `lib.rs`.

use clap::Parser;
use color_eyre::eyre::Result;

/// Command-line interface for the website tooling.
#[derive(Parser)]
#[command(
    name = "oshit-web",
    version,
    about = "Build tooling for the OSH.IT website"
)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "site.toml")]
    config: std::path::PathBuf,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Available CLI commands.
#[derive(clap::Subcommand)]
enum Commands {
    /// Patch the page and write sitemap, robots.txt, manifest and performance report
    Generate,
    /// Patch version and plugin count and write the enhanced report
    Enhance,
    /// Minify CSS and JS and write the optimization report
    Optimize,
    /// Write the Lighthouse CI configuration
    Lighthouse,
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    oshit_web::init_tracing(cli.verbose);

    match cli.command {
        Commands::Generate => oshit_web::cmd::generate::run(&cli.config)?,
        Commands::Enhance => oshit_web::cmd::enhance::run(&cli.config)?,
        Commands::Optimize => {
            let production = oshit_web::cmd::optimize::production_from_env();
            oshit_web::cmd::optimize::run(&cli.config, production)?;
        }
        Commands::Lighthouse => oshit_web::cmd::lighthouse::run(&cli.config)?,
    }

    Ok(())
}
