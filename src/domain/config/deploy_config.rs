//! Deployment configuration models (`funcdeploy.toml`).

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::config::paths::DEFAULT_PACKAGE_TARGET;
use crate::domain::{AppError, ErrorPolicy, RollbackPolicy, Strategy};

/// Root configuration. Every section is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DeployConfig {
    #[serde(default)]
    pub installer: InstallerConfig,
    #[serde(default)]
    pub install_if_missing: InstallIfMissingConfig,
    #[serde(default)]
    pub configure_path: ConfigurePathConfig,
    #[serde(default)]
    pub sync: SyncConfig,
    #[serde(default)]
    pub policy: PolicyConfig,
}

impl DeployConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        self.installer.validate()?;
        self.install_if_missing.validate()?;
        self.configure_path.validate()?;
        self.sync.validate()?;
        Ok(())
    }

    /// Error policy for `strategy`: the configured one, else the strategy default.
    pub fn error_policy(&self, strategy: Strategy) -> ErrorPolicy {
        self.policy.error.unwrap_or_else(|| strategy.default_error_policy())
    }
}

/// Package installer settings shared by both strategies.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InstallerConfig {
    /// Installer program (looked up on `PATH` unless absolute).
    #[serde(default = "default_installer_program")]
    pub program: String,
}

impl Default for InstallerConfig {
    fn default() -> Self {
        Self { program: default_installer_program() }
    }
}

impl InstallerConfig {
    fn validate(&self) -> Result<(), AppError> {
        ensure_non_empty("installer.program", &self.program)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InstallIfMissingConfig {
    /// Package passed to the installer.
    #[serde(default = "default_package")]
    pub package: String,
    /// File whose presence means the package is already installed.
    #[serde(default = "default_marker")]
    pub marker: PathBuf,
    /// Directory receiving installer output.
    #[serde(default = "default_target")]
    pub target: PathBuf,
}

impl Default for InstallIfMissingConfig {
    fn default() -> Self {
        Self { package: default_package(), marker: default_marker(), target: default_target() }
    }
}

impl InstallIfMissingConfig {
    fn validate(&self) -> Result<(), AppError> {
        ensure_non_empty("install_if_missing.package", &self.package)?;
        ensure_non_empty_path("install_if_missing.marker", &self.marker)?;
        ensure_non_empty_path("install_if_missing.target", &self.target)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigurePathConfig {
    /// Requirements file handed to the installer.
    #[serde(default = "default_requirements")]
    pub requirements: PathBuf,
    #[serde(default = "default_target")]
    pub target: PathBuf,
    /// File name searched for in the installed tree.
    #[serde(default = "default_executable")]
    pub executable: String,
    /// Run the sync tool after writing startup artifacts.
    #[serde(default)]
    pub sync: bool,
}

impl Default for ConfigurePathConfig {
    fn default() -> Self {
        Self {
            requirements: default_requirements(),
            target: default_target(),
            executable: default_executable(),
            sync: false,
        }
    }
}

impl ConfigurePathConfig {
    fn validate(&self) -> Result<(), AppError> {
        ensure_non_empty_path("configure_path.requirements", &self.requirements)?;
        ensure_non_empty_path("configure_path.target", &self.target)?;
        ensure_non_empty("configure_path.executable", &self.executable)?;
        if self.executable.contains('/') {
            return Err(AppError::config_error(format!(
                "configure_path.executable must be a file name, got '{}'",
                self.executable
            )));
        }
        Ok(())
    }
}

/// Kudu sync invocation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SyncConfig {
    #[serde(default = "default_sync_command")]
    pub command: String,
    /// Directory holding the source-controlled application files.
    #[serde(default = "default_sync_source")]
    pub source: PathBuf,
    /// Serving directory.
    #[serde(default = "default_sync_target")]
    pub target: PathBuf,
    #[serde(default)]
    pub next_manifest: Option<PathBuf>,
    #[serde(default)]
    pub previous_manifest: Option<PathBuf>,
    /// Appended to the fixed deployment-control ignore entries.
    #[serde(default)]
    pub extra_ignore: Vec<String>,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            command: default_sync_command(),
            source: default_sync_source(),
            target: default_sync_target(),
            next_manifest: None,
            previous_manifest: None,
            extra_ignore: Vec::new(),
        }
    }
}

impl SyncConfig {
    fn validate(&self) -> Result<(), AppError> {
        ensure_non_empty("sync.command", &self.command)?;
        ensure_non_empty_path("sync.source", &self.source)?;
        ensure_non_empty_path("sync.target", &self.target)?;
        if let Some(next) = &self.next_manifest {
            ensure_utf8_path("sync.next_manifest", next)?;
        }
        if let Some(previous) = &self.previous_manifest {
            ensure_utf8_path("sync.previous_manifest", previous)?;
        }
        if let Some(entry) = self.extra_ignore.iter().find(|e| e.trim().is_empty() || e.contains(';'))
        {
            return Err(AppError::config_error(format!(
                "sync.extra_ignore entries must be non-empty and must not contain ';', got '{}'",
                entry
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PolicyConfig {
    /// Overrides the per-strategy default when set.
    #[serde(default)]
    pub error: Option<ErrorPolicy>,
    #[serde(default)]
    pub rollback: RollbackPolicy,
}

fn ensure_non_empty(field: &str, value: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::config_error(format!("{} must not be empty", field)));
    }
    Ok(())
}

/// Paths end up as tool arguments and shell text, so they must be non-empty UTF-8.
fn ensure_non_empty_path(field: &str, value: &Path) -> Result<(), AppError> {
    if value.as_os_str().is_empty() {
        return Err(AppError::config_error(format!("{} must not be empty", field)));
    }
    ensure_utf8_path(field, value)
}

fn ensure_utf8_path(field: &str, value: &Path) -> Result<(), AppError> {
    if value.to_str().is_none() {
        return Err(AppError::config_error(format!(
            "{} is not valid UTF-8: {}",
            field,
            value.display()
        )));
    }
    Ok(())
}

fn default_installer_program() -> String {
    "pip".to_string()
}

fn default_package() -> String {
    "azure-cli".to_string()
}

fn default_marker() -> PathBuf {
    PathBuf::from(DEFAULT_PACKAGE_TARGET).join("bin").join("az")
}

fn default_target() -> PathBuf {
    PathBuf::from(DEFAULT_PACKAGE_TARGET)
}

fn default_requirements() -> PathBuf {
    PathBuf::from("requirements.txt")
}

fn default_executable() -> String {
    "az".to_string()
}

fn default_sync_command() -> String {
    "kudusync".to_string()
}

fn default_sync_source() -> PathBuf {
    PathBuf::from(".")
}

fn default_sync_target() -> PathBuf {
    PathBuf::from("/home/site/wwwroot")
}
