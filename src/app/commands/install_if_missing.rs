//! `install-if-missing`: install the CLI package unless its marker file is
//! present, then hand off to Kudu sync.

use std::path::PathBuf;

use tracing::info;

use crate::app::AppContext;
use crate::app::commands::{steps, sync};
use crate::app::deploy_run::{DeployRun, prepare_dir};
use crate::domain::config::InstallIfMissingConfig;
use crate::domain::{AppError, DeployPlan, DeployReport, InstallOutcome, PlannedAction, Strategy};
use crate::ports::ProcessRunner;
use crate::services::PackageInstaller;

const STRATEGY: Strategy = Strategy::InstallIfMissing;

/// Command-line overrides for the `[install_if_missing]` section.
#[derive(Debug, Clone, Default)]
pub struct InstallIfMissingOverrides {
    pub package: Option<String>,
    pub marker: Option<PathBuf>,
    pub target: Option<PathBuf>,
}

impl InstallIfMissingOverrides {
    pub fn apply(&self, config: &mut InstallIfMissingConfig) {
        if let Some(package) = &self.package {
            config.package = package.clone();
        }
        if let Some(marker) = &self.marker {
            config.marker = marker.clone();
        }
        if let Some(target) = &self.target {
            config.target = target.clone();
        }
    }
}

pub fn execute<P: ProcessRunner>(ctx: &AppContext<P>) -> Result<DeployReport, AppError> {
    let config = &ctx.config().install_if_missing;
    let mut run = DeployRun::new(STRATEGY, ctx.error_policy(STRATEGY), ctx.rollback_policy());
    let marker = ctx.resolve(&config.marker);
    let target = ctx.resolve(&config.target);

    if marker.exists() {
        info!(marker = %marker.display(), "CLI already installed; skipping package installation");
        run.skip(steps::INSTALL, format!("marker present at {}", marker.display()));
        run.report_mut().install = Some(InstallOutcome::AlreadySatisfied);
    } else {
        info!(package = %config.package, target = %target.display(), "Installing package");
        if let Some(created) = run.require(steps::PREPARE_TARGET, prepare_dir(&target))? {
            run.note_created_dir(created);
        }

        let command = PackageInstaller::new(&ctx.config().installer.program)
            .package_command(&config.package, &target);
        run.check(
            steps::INSTALL,
            true,
            PackageInstaller::run(ctx.runner(), &command, ctx.project_root()),
        )?;
        run.report_mut().install = Some(InstallOutcome::Installed);
    }

    sync::execute(ctx, &mut run, true)?;
    Ok(run.finish())
}

pub fn plan<P: ProcessRunner>(ctx: &AppContext<P>) -> DeployPlan {
    let config = &ctx.config().install_if_missing;
    let marker = ctx.resolve(&config.marker);
    let target = ctx.resolve(&config.target);
    let mut actions = Vec::new();

    if marker.exists() {
        actions.push(PlannedAction::Skip {
            step: steps::INSTALL.to_string(),
            reason: format!("marker present at {}", marker.display()),
        });
    } else {
        if !target.is_dir() {
            actions.push(PlannedAction::CreateDir { path: target.clone() });
        }
        let command = PackageInstaller::new(&ctx.config().installer.program)
            .package_command(&config.package, &target);
        actions.push(PlannedAction::Run { step: steps::INSTALL.to_string(), command });
    }

    actions.push(PlannedAction::Run { step: steps::SYNC.to_string(), command: sync::command(ctx) });
    DeployPlan { strategy: STRATEGY, actions }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DeployConfig, RollbackPolicy, StepStatus};
    use crate::testing::FakeProcessRunner;
    use std::fs;
    use std::path::Path;
    use tempfile::tempdir;

    fn context(root: &Path, runner: FakeProcessRunner) -> AppContext<FakeProcessRunner> {
        AppContext::new(root.to_path_buf(), DeployConfig::default(), runner)
    }

    fn install_marker(root: &Path) {
        let marker = root.join(".python_packages/lib/site-packages/bin/az");
        fs::create_dir_all(marker.parent().unwrap()).unwrap();
        fs::write(marker, "#!/bin/sh\n").unwrap();
    }

    #[test]
    fn installs_when_marker_is_absent() {
        let temp = tempdir().unwrap();
        let ctx = context(temp.path(), FakeProcessRunner::new());

        let report = execute(&ctx).unwrap();

        assert_eq!(report.install, Some(InstallOutcome::Installed));
        let pip = ctx.runner().last_for("pip").unwrap();
        assert_eq!(pip.args[..2], ["install".to_string(), "azure-cli".to_string()]);
        let target = temp.path().join(".python_packages/lib/site-packages");
        assert_eq!(pip.flag_value("--target"), Some(target.to_str().unwrap()));
        assert!(target.is_dir());
        assert_eq!(ctx.runner().invocations("kudusync"), 1);
    }

    #[test]
    fn second_run_with_marker_present_skips_installer() {
        let temp = tempdir().unwrap();
        let ctx = context(temp.path(), FakeProcessRunner::new().with_installed_file("pip", "bin/az"));

        execute(&ctx).unwrap();
        assert_eq!(ctx.runner().invocations("pip"), 1);

        let report = execute(&ctx).unwrap();

        assert_eq!(ctx.runner().invocations("pip"), 1);
        assert_eq!(report.install, Some(InstallOutcome::AlreadySatisfied));
        assert_eq!(report.step(steps::INSTALL).unwrap().status, StepStatus::Skipped);
        assert_eq!(ctx.runner().invocations("kudusync"), 2);
    }

    #[test]
    fn preinstalled_marker_means_no_install_attempt() {
        let temp = tempdir().unwrap();
        install_marker(temp.path());
        let ctx = context(temp.path(), FakeProcessRunner::new());

        execute(&ctx).unwrap();

        assert_eq!(ctx.runner().invocations("pip"), 0);
    }

    #[test]
    fn installer_failure_is_fatal_and_skips_sync() {
        let temp = tempdir().unwrap();
        let ctx = context(temp.path(), FakeProcessRunner::new().with_exit_code("pip", 1));

        let result = execute(&ctx);

        assert!(matches!(result, Err(AppError::InstallFailed { code: 1, .. })));
        assert_eq!(ctx.runner().invocations("kudusync"), 0);
    }

    #[test]
    fn missing_installer_program_is_fatal() {
        let temp = tempdir().unwrap();
        let ctx = context(temp.path(), FakeProcessRunner::new().with_unlaunchable("pip"));

        let result = execute(&ctx);

        assert!(matches!(result, Err(AppError::ToolLaunch { .. })));
        assert_eq!(ctx.runner().invocations("kudusync"), 0);
    }

    #[test]
    fn sync_failure_is_fatal() {
        let temp = tempdir().unwrap();
        install_marker(temp.path());
        let ctx = context(temp.path(), FakeProcessRunner::new().with_exit_code("kudusync", 2));

        let result = execute(&ctx);

        assert!(matches!(result, Err(AppError::SyncFailed { code: 2, .. })));
    }

    #[test]
    fn sync_ignores_deployment_control_files() {
        let temp = tempdir().unwrap();
        install_marker(temp.path());
        let ctx = context(temp.path(), FakeProcessRunner::new());

        execute(&ctx).unwrap();

        let sync = ctx.runner().last_for("kudusync").unwrap();
        let ignores: Vec<&str> = sync.flag_value("-i").unwrap().split(';').collect();
        for required in [".git", ".deployment", "deploy.sh"] {
            assert!(ignores.contains(&required), "missing {required} in {ignores:?}");
        }
    }

    #[test]
    fn rollback_removes_target_created_by_failed_install() {
        let temp = tempdir().unwrap();
        let mut config = DeployConfig::default();
        config.policy.rollback = RollbackPolicy::RemoveGenerated;
        let runner = FakeProcessRunner::new().with_exit_code("pip", 1);
        let ctx = AppContext::new(temp.path().to_path_buf(), config, runner);

        assert!(execute(&ctx).is_err());
        assert!(!temp.path().join(".python_packages").exists());
    }

    #[test]
    fn overrides_replace_configured_values() {
        let mut config = InstallIfMissingConfig::default();
        let overrides = InstallIfMissingOverrides {
            package: Some("azure-cli==2.61.0".into()),
            marker: None,
            target: Some(PathBuf::from("/srv/pkgs")),
        };

        overrides.apply(&mut config);

        assert_eq!(config.package, "azure-cli==2.61.0");
        assert_eq!(config.target, PathBuf::from("/srv/pkgs"));
        assert_eq!(config.marker, InstallIfMissingConfig::default().marker);
    }

    #[test]
    fn plan_reflects_marker_state_without_running_anything() {
        let temp = tempdir().unwrap();
        let ctx = context(temp.path(), FakeProcessRunner::new());

        let before = plan(&ctx);
        assert_eq!(before.commands().count(), 2);
        assert!(matches!(before.actions[0], PlannedAction::CreateDir { .. }));

        install_marker(temp.path());
        let after = plan(&ctx);
        assert!(matches!(after.actions[0], PlannedAction::Skip { .. }));
        assert_eq!(after.commands().count(), 1);

        assert!(ctx.runner().recorded().is_empty());
    }
}
