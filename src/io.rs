//! Plain text file helpers used by the CLI and by callers persisting results.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::PersistenceError;

/// Read a UTF-8 file. A path that is not an existing regular file is
/// reported as [`PersistenceError::NotFound`].
pub fn read_from_file(path: impl AsRef<Path>) -> Result<String, PersistenceError> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(PersistenceError::NotFound {
            path: path.to_path_buf(),
        });
    }

    fs::read_to_string(path).map_err(|source| PersistenceError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Write `content` to `path`, creating missing parent directories.
pub fn write_to_file(path: impl AsRef<Path>, content: &str) -> Result<(), PersistenceError> {
    let path = path.as_ref();
    let io_err = |source: std::io::Error| PersistenceError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_err)?;
    }
    fs::write(path, content).map_err(io_err)?;

    debug!(path = %path.display(), bytes = content.len(), "Wrote file");
    Ok(())
}
