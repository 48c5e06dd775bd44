//! Pure parse/validate for deployment configuration (`funcdeploy.toml`).

use std::fs;
use std::path::Path;

use crate::domain::config::paths;
use crate::domain::{AppError, DeployConfig};

/// Parse and validate deployment configuration from TOML content.
pub fn parse_config_content(content: &str) -> Result<DeployConfig, AppError> {
    let config: DeployConfig = toml::from_str(content)?;
    config.validate()?;
    Ok(config)
}

/// Load configuration for a project.
///
/// An explicit path must exist. Without one, `funcdeploy.toml` under the
/// project root is used when present and built-in defaults otherwise.
pub fn load_config(explicit: Option<&Path>, project_root: &Path) -> Result<DeployConfig, AppError> {
    let path = match explicit {
        Some(path) => {
            let path = paths::resolve(project_root, path);
            if !path.is_file() {
                return Err(AppError::config_error(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            path
        }
        None => {
            let path = paths::config(project_root);
            if !path.is_file() {
                return Ok(DeployConfig::default());
            }
            path
        }
    };

    let content = fs::read_to_string(&path)?;
    parse_config_content(&content)
}
