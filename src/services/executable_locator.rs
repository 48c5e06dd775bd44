//! Recursive search for an installed executable.

use std::path::{Path, PathBuf};

use tracing::warn;
use walkdir::WalkDir;

use crate::domain::AppError;

/// First non-directory entry named `name` under `root`.
///
/// The walk is depth-first with entries sorted by file name, so the result is
/// stable across runs. A missing `root` yields `None`. Unreadable entries
/// below `root` are logged and skipped.
pub fn locate_executable(root: &Path, name: &str) -> Result<Option<PathBuf>, AppError> {
    if !root.is_dir() {
        return Ok(None);
    }

    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) if err.depth() > 0 => {
                warn!(error = %err, "Skipping unreadable entry during executable search");
                continue;
            }
            Err(err) => return Err(err.into()),
        };
        if !entry.file_type().is_dir() && entry.file_name() == name {
            return Ok(Some(entry.into_path()));
        }
    }

    Ok(None)
}

/// Like [`locate_executable`], but absence is an error.
pub fn require_executable(root: &Path, name: &str) -> Result<PathBuf, AppError> {
    locate_executable(root, name)?
        .ok_or_else(|| AppError::ExecutableNotFound { name: name.to_string(), root: root.to_path_buf() })
}
