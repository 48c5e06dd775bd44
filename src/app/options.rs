//! Options shared by every command, and how they become a loaded config.

use std::path::{Path, PathBuf};

use crate::domain::config::{self, kudu_env};
use crate::domain::{AppError, DeployConfig, ErrorPolicy, RollbackPolicy};

/// Global options (project location, config file, policy overrides).
#[derive(Debug, Clone, Default)]
pub struct DeployOptions {
    /// Project root; the current directory when unset.
    pub project_root: Option<PathBuf>,
    /// Config file; `funcdeploy.toml` under the project root when unset.
    pub config_path: Option<PathBuf>,
    pub error_policy: Option<ErrorPolicy>,
    pub rollback: Option<RollbackPolicy>,
}

impl DeployOptions {
    /// Absolute project root.
    pub fn resolve_project_root(&self) -> Result<PathBuf, AppError> {
        let root = match &self.project_root {
            Some(root) => root.clone(),
            None => std::env::current_dir()?,
        };
        let root = std::path::absolute(&root)?;
        if root.to_str().is_none() {
            return Err(AppError::config_error(format!(
                "Project root is not valid UTF-8: {}",
                root.display()
            )));
        }
        if !root.is_dir() {
            return Err(AppError::config_error(format!(
                "Project root is not a directory: {}",
                root.display()
            )));
        }
        Ok(root)
    }

    /// Defaults < config file < Kudu environment < `customize` and policy overrides.
    pub fn load_config<F>(&self, project_root: &Path, customize: F) -> Result<DeployConfig, AppError>
    where
        F: FnOnce(&mut DeployConfig),
    {
        let mut config = config::load_config(self.config_path.as_deref(), project_root)?;
        kudu_env::apply_process_env(&mut config);
        customize(&mut config);

        if let Some(policy) = self.error_policy {
            config.policy.error = Some(policy);
        }
        if let Some(rollback) = self.rollback {
            config.policy.rollback = rollback;
        }

        config.validate()?;
        Ok(config)
    }
}
