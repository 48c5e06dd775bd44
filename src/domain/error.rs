use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Library-wide error type for funcdeploy operations.
#[derive(Debug, Error)]
pub enum AppError {
    /// Underlying I/O failure.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// Configuration or environment issue.
    #[error("{0}")]
    Configuration(String),

    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    TomlParseError(#[from] toml::de::Error),

    /// An external tool could not be started at all.
    #[error("Failed to launch '{command}': {details}")]
    ToolLaunch { command: String, details: String },

    /// The package installer exited with a non-zero status.
    #[error("Package installation failed with exit code {code}: {command}")]
    InstallFailed { command: String, code: i32 },

    /// No file with the requested name exists under the installed tree.
    #[error("Executable '{name}' not found under {}", root.display())]
    ExecutableNotFound { name: String, root: PathBuf },

    /// The file synchronization tool exited with a non-zero status.
    #[error("File synchronization failed with exit code {code}: {command}")]
    SyncFailed { command: String, code: i32 },

    /// Startup artifact template failed to render.
    #[error("Template rendering failed: {0}")]
    Template(String),
}

impl AppError {
    pub fn config_error<S: Into<String>>(message: S) -> Self {
        AppError::Configuration(message.into())
    }
}

impl From<minijinja::Error> for AppError {
    fn from(value: minijinja::Error) -> Self {
        AppError::Template(value.to_string())
    }
}

impl From<walkdir::Error> for AppError {
    fn from(value: walkdir::Error) -> Self {
        AppError::Io(value.into())
    }
}
