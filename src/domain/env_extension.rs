//! Declarative request to extend the runtime process environment.

use std::path::PathBuf;

use serde::Serialize;

/// Directories to append to the hosting runtime's `PATH` at process start.
///
/// This is the record that gets injected; the shell artifacts that carry it
/// to the runtime are rendered from it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EnvExtension {
    path_append: Vec<PathBuf>,
}

impl EnvExtension {
    pub fn append_path<P: Into<PathBuf>>(dir: P) -> Self {
        Self { path_append: vec![dir.into()] }
    }

    pub fn path_entries(&self) -> &[PathBuf] {
        &self.path_append
    }

    pub fn is_empty(&self) -> bool {
        self.path_append.is_empty()
    }

    /// The appended portion of `PATH`, joined with `:`.
    pub fn joined_entries(&self) -> String {
        self.path_append.iter().map(|p| p.display().to_string()).collect::<Vec<_>>().join(":")
    }
}
