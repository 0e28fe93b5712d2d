//! OSH.IT website tooling CLI library
//!
//! Command implementations used by the `oshit-web` binary.
//!
//! # Modules
//!
//! - [`cmd`] - Command implementations (generate, enhance, optimize, lighthouse)
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//!
//! use oshit_web::cmd;
//!
//! // Refresh the page and write the SEO files
//! cmd::generate::run(Path::new("site.toml")).unwrap();
//! ```

pub mod cmd;

pub use oshit_web_core::Config;
pub use oshit_web_generator::{BuildStats, Builder};

/// Initialize tracing with the specified verbosity level.
///
/// # Arguments
///
/// * `verbose` - Verbosity level (0 = WARN, 1 = INFO, 2 = DEBUG, 3+ = TRACE)
///
/// # Example
///
/// ```no_run
/// oshit_web::init_tracing(2); // Enable DEBUG level logging
/// ```
pub fn init_tracing(verbose: u8) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();
}
