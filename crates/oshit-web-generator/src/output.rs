//! Atomic output writing.
//!
//! Outputs are written to a temporary file next to the destination and
//! renamed into place, so readers see either the old or the new file.

use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};

use thiserror::Error;
use tracing::debug;

/// Output errors.
#[derive(Debug, Error)]
pub enum OutputError {
    /// Writing or renaming the file failed.
    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for output operations.
pub type Result<T> = std::result::Result<T, OutputError>;

/// Replace `path` with `contents`.
pub fn write_atomic(path: &Path, contents: impl AsRef<[u8]>) -> Result<()> {
    let wrap = |source: std::io::Error| OutputError::Write {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir).map_err(wrap)?;

    let mut builder = tempfile::Builder::new();
    builder.prefix(".oshit-web-");
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(fs::Permissions::from_mode(0o644));
    }

    let mut tmp = builder.tempfile_in(dir).map_err(wrap)?;
    tmp.write_all(contents.as_ref()).map_err(wrap)?;
    tmp.as_file().sync_all().map_err(wrap)?;
    tmp.persist(path).map_err(|e| wrap(e.error))?;

    debug!(path = %path.display(), "wrote file");
    Ok(())
}
