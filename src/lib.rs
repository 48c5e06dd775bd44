//! funcdeploy: deployment hooks for Python function apps that need a CLI
//! dependency on the runtime `PATH`.

pub mod app;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
pub(crate) mod testing;

use app::{AppContext, commands};
use services::SystemProcessRunner;

pub use app::DeployOptions;
pub use app::commands::configure_path::ConfigurePathOverrides;
pub use app::commands::install_if_missing::InstallIfMissingOverrides;
pub use domain::{
    AppError, DeployPlan, DeployReport, ErrorPolicy, InstallOutcome, PlannedAction, RollbackPolicy,
    StepStatus, Strategy,
};

/// Install the CLI package unless its marker is present, then sync the
/// deployment source to the target.
pub fn install_if_missing(
    options: &DeployOptions,
    overrides: &InstallIfMissingOverrides,
) -> Result<DeployReport, AppError> {
    let project_root = options.resolve_project_root()?;
    let config = options
        .load_config(&project_root, |config| overrides.apply(&mut config.install_if_missing))?;
    let ctx = AppContext::new(project_root, config, SystemProcessRunner);

    commands::install_if_missing::execute(&ctx)
}

/// Install requirements, locate the CLI executable, and write the startup
/// artifacts that put it on `PATH`.
pub fn configure_path(
    options: &DeployOptions,
    overrides: &ConfigurePathOverrides,
) -> Result<DeployReport, AppError> {
    let project_root = options.resolve_project_root()?;
    let config =
        options.load_config(&project_root, |config| overrides.apply(&mut config.configure_path))?;
    let ctx = AppContext::new(project_root, config, SystemProcessRunner);

    commands::configure_path::execute(&ctx)
}

/// Describe what a strategy would do. Nothing is executed or written.
pub fn plan(options: &DeployOptions, strategy: Strategy) -> Result<DeployPlan, AppError> {
    let project_root = options.resolve_project_root()?;
    let config = options.load_config(&project_root, |_| {})?;
    let ctx = AppContext::new(project_root, config, SystemProcessRunner);

    Ok(commands::plan::execute(&ctx, strategy))
}
