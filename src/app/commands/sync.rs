//! File synchronization handoff shared by both strategies.

use tracing::info;

use crate::app::AppContext;
use crate::app::commands::steps;
use crate::app::deploy_run::DeployRun;
use crate::domain::{AppError, CommandLine};
use crate::ports::ProcessRunner;
use crate::services::kudu_sync;

pub fn command<P: ProcessRunner>(ctx: &AppContext<P>) -> CommandLine {
    kudu_sync::sync_command(&ctx.config().sync, ctx.project_root())
}

/// Invoke the sync tool; `checked` marks the step as fatal under `check-listed-steps`.
pub fn execute<P: ProcessRunner>(
    ctx: &AppContext<P>,
    run: &mut DeployRun,
    checked: bool,
) -> Result<(), AppError> {
    let command = command(ctx);
    info!(%command, "Synchronizing application files");
    run.check(steps::SYNC, checked, kudu_sync::run(ctx.runner(), &command, ctx.project_root()))
}
