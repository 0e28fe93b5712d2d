//! OSH.IT Website Core Library
//!
//! Configuration, error handling, and repository metadata extraction for the
//! OSH.IT website build.

pub mod config;
pub mod error;
pub mod metadata;

pub use config::Config;
pub use error::{CoreError, Result};
pub use metadata::{
    ExtractDefaults, MetadataExtractor, PluginCatalog, PluginRecord, SiteMetadata,
};
