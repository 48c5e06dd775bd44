//! `configure-path`: reinstall requirements, locate the CLI executable, and
//! inject its directory into the runtime `PATH` through startup artifacts.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::app::AppContext;
use crate::app::commands::{steps, sync};
use crate::app::deploy_run::{DeployRun, prepare_dir};
use crate::domain::config::ConfigurePathConfig;
use crate::domain::{AppError, DeployPlan, DeployReport, EnvExtension, PlannedAction, Strategy};
use crate::ports::ProcessRunner;
use crate::services::executable_locator::require_executable;
use crate::services::startup_artifacts::{self, StartupArtifacts};
use crate::services::PackageInstaller;

const STRATEGY: Strategy = Strategy::ConfigurePath;

/// Sync is normally performed by the platform after this hook returns.
const SYNC_SKIPPED_REASON: &str = "disabled; the platform synchronizes files";

/// Command-line overrides for the `[configure_path]` section.
#[derive(Debug, Clone, Default)]
pub struct ConfigurePathOverrides {
    pub requirements: Option<PathBuf>,
    pub target: Option<PathBuf>,
    pub executable: Option<String>,
    /// Enables sync; absence keeps the configured value.
    pub sync: bool,
}

impl ConfigurePathOverrides {
    pub fn apply(&self, config: &mut ConfigurePathConfig) {
        if let Some(requirements) = &self.requirements {
            config.requirements = requirements.clone();
        }
        if let Some(target) = &self.target {
            config.target = target.clone();
        }
        if let Some(executable) = &self.executable {
            config.executable = executable.clone();
        }
        if self.sync {
            config.sync = true;
        }
    }
}

pub fn execute<P: ProcessRunner>(ctx: &AppContext<P>) -> Result<DeployReport, AppError> {
    let config = &ctx.config().configure_path;
    let mut run = DeployRun::new(STRATEGY, ctx.error_policy(STRATEGY), ctx.rollback_policy());
    let requirements = ctx.resolve(&config.requirements);
    let target = ctx.resolve(&config.target);

    info!(
        requirements = %requirements.display(),
        target = %target.display(),
        "Installing requirements"
    );
    if let Some(created) = run.require(steps::PREPARE_TARGET, prepare_dir(&target))? {
        run.note_created_dir(created);
    }
    let command = PackageInstaller::new(&ctx.config().installer.program)
        .requirements_command(&requirements, &target);
    run.check(steps::INSTALL, true, PackageInstaller::run(ctx.runner(), &command, ctx.project_root()))?;

    let executable =
        run.require(steps::LOCATE_EXECUTABLE, require_executable(&target, &config.executable))?;
    let bin_dir = executable.parent().map(Path::to_path_buf).unwrap_or_else(|| target.clone());
    info!(executable = %executable.display(), "Located executable");

    inject_environment(ctx, &mut run, &EnvExtension::append_path(bin_dir))?;

    if config.sync {
        // Unchecked step: only abort-on-first-error stops the run here.
        sync::execute(ctx, &mut run, false)?;
    } else {
        run.skip(steps::SYNC, SYNC_SKIPPED_REASON);
    }

    Ok(run.finish())
}

/// Write the startup fragment, then the `.env` file that sources it.
fn inject_environment<P: ProcessRunner>(
    ctx: &AppContext<P>,
    run: &mut DeployRun,
    extension: &EnvExtension,
) -> Result<(), AppError> {
    let artifacts = StartupArtifacts::for_project(ctx.project_root());

    run.note_written(&artifacts.startup_script);
    run.require(
        steps::WRITE_STARTUP_SCRIPT,
        startup_artifacts::write_startup_script(&artifacts.startup_script, extension),
    )?;

    run.note_written(&artifacts.env_file);
    run.require(
        steps::WRITE_ENV_FILE,
        startup_artifacts::write_env_file(&artifacts.env_file, &artifacts.startup_script),
    )?;

    info!(path = %extension.joined_entries(), "Runtime PATH extension written");
    run.report_mut().path_entries = extension.path_entries().to_vec();
    Ok(())
}

pub fn plan<P: ProcessRunner>(ctx: &AppContext<P>) -> DeployPlan {
    let config = &ctx.config().configure_path;
    let requirements = ctx.resolve(&config.requirements);
    let target = ctx.resolve(&config.target);
    let artifacts = StartupArtifacts::for_project(ctx.project_root());
    let mut actions = Vec::new();

    if !target.is_dir() {
        actions.push(PlannedAction::CreateDir { path: target.clone() });
    }
    let command = PackageInstaller::new(&ctx.config().installer.program)
        .requirements_command(&requirements, &target);
    actions.push(PlannedAction::Run { step: steps::INSTALL.to_string(), command });
    actions.push(PlannedAction::Search { root: target, name: config.executable.clone() });
    actions.push(PlannedAction::Write { path: artifacts.startup_script });
    actions.push(PlannedAction::Write { path: artifacts.env_file });

    if config.sync {
        actions.push(PlannedAction::Run { step: steps::SYNC.to_string(), command: sync::command(ctx) });
    } else {
        actions.push(PlannedAction::Skip {
            step: steps::SYNC.to_string(),
            reason: SYNC_SKIPPED_REASON.to_string(),
        });
    }

    DeployPlan { strategy: STRATEGY, actions }
}
