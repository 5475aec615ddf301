//! Writing artifacts to disk.

use std::path::Path;

use tracing::info;

use depviz_error::{Error, Result};

/// Create the parent directory of `path` if it has one and it is missing.
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            std::fs::create_dir_all(parent).map_err(|err| {
                Error::io_at(err, parent.display().to_string())
                    .with_operation("output::ensure_parent_dir")
            })
        }
        _ => Ok(()),
    }
}

/// Write a text artifact, replacing any existing file.
pub fn write_artifact(path: &Path, contents: &str) -> Result<()> {
    ensure_parent_dir(path)?;
    std::fs::write(path, contents).map_err(|err| {
        Error::io_at(err, path.display().to_string()).with_operation("output::write_artifact")
    })?;
    info!(path = %path.display(), bytes = contents.len(), "output written");
    Ok(())
}
