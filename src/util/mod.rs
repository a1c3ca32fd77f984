//! Shared utilities.
//!
//! Currently just atomic file output, so a partially written report can
//! never clobber an existing one.

use std::io::{self, Write};
use std::path::Path;

use tempfile::NamedTempFile;

use crate::error::{Result, ScanError};

/// Atomically write content to a file.
///
/// Writes to a temporary file in the same directory, flushes, then renames
/// it over the target path. If any step fails, the original file (if it
/// exists) remains unchanged.
///
/// # Errors
///
/// Returns an error if the parent directory cannot be determined or
/// created, or if any file operation fails.
pub fn atomic_write(path: impl AsRef<Path>, content: &[u8]) -> Result<()> {
    let path = path.as_ref();

    // Temp file must live in the same directory for the rename to be atomic.
    let parent = path.parent().ok_or_else(|| ScanError::Io {
        context: format!("Cannot determine parent directory for: {}", path.display()),
        source: io::Error::new(io::ErrorKind::InvalidInput, "No parent directory"),
    })?;
    let parent = if parent.as_os_str().is_empty() {
        Path::new(".")
    } else {
        parent
    };

    if !parent.exists() {
        std::fs::create_dir_all(parent).map_err(|e| {
            ScanError::io(
                format!("Failed to create directory: {}", parent.display()),
                e,
            )
        })?;
    }

    let mut temp_file = NamedTempFile::new_in(parent).map_err(|e| {
        ScanError::io(
            format!("Failed to create temporary file in: {}", parent.display()),
            e,
        )
    })?;

    temp_file.write_all(content).map_err(|e| {
        ScanError::io(
            format!("Failed to write to temporary file for: {}", path.display()),
            e,
        )
    })?;

    temp_file.flush().map_err(|e| {
        ScanError::io(
            format!("Failed to flush temporary file for: {}", path.display()),
            e,
        )
    })?;

    temp_file.persist(path).map_err(|e| {
        ScanError::io(
            format!("Failed to atomically write file: {}", path.display()),
            e.error,
        )
    })?;

    Ok(())
}
