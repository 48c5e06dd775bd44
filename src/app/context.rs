use std::path::{Path, PathBuf};

use crate::domain::config::paths;
use crate::domain::{DeployConfig, ErrorPolicy, RollbackPolicy, Strategy};
use crate::ports::ProcessRunner;

/// Application context holding dependencies for command execution.
pub struct AppContext<P: ProcessRunner> {
    project_root: PathBuf,
    config: DeployConfig,
    runner: P,
}

impl<P: ProcessRunner> AppContext<P> {
    /// Create a new application context. `project_root` should be absolute.
    pub fn new(project_root: PathBuf, config: DeployConfig, runner: P) -> Self {
        Self { project_root, config, runner }
    }

    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    pub fn config(&self) -> &DeployConfig {
        &self.config
    }

    pub fn runner(&self) -> &P {
        &self.runner
    }

    /// Resolve a configured path against the project root.
    pub fn resolve(&self, configured: &Path) -> PathBuf {
        paths::resolve(&self.project_root, configured)
    }

    pub fn error_policy(&self, strategy: Strategy) -> ErrorPolicy {
        self.config.error_policy(strategy)
    }

    pub fn rollback_policy(&self) -> RollbackPolicy {
        self.config.policy.rollback
    }
}
