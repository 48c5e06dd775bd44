//! Kudu sync command construction and execution.

use std::path::Path;

use crate::domain::config::{SyncConfig, paths};
use crate::domain::{AppError, CommandLine};
use crate::ports::ProcessRunner;

/// Deployment-control paths that must never reach the serving directory.
pub const REQUIRED_IGNORES: [&str; 4] = [".git", ".hg", ".deployment", "deploy.sh"];

/// Verbosity passed to `-v`.
const VERBOSITY: &str = "50";

/// Semicolon-separated ignore list: the fixed entries, then `extra` without duplicates.
pub fn ignore_list(extra: &[String]) -> String {
    let mut entries: Vec<&str> = REQUIRED_IGNORES.to_vec();
    for entry in extra {
        let entry = entry.trim();
        if !entries.contains(&entry) {
            entries.push(entry);
        }
    }
    entries.join(";")
}

/// Build the sync invocation; relative source/target resolve against `project_root`.
pub fn sync_command(config: &SyncConfig, project_root: &Path) -> CommandLine {
    let mut command = CommandLine::new(&config.command)
        .arg("-v")
        .arg(VERBOSITY)
        .arg("-f")
        .path_arg(&paths::resolve(project_root, &config.source))
        .arg("-t")
        .path_arg(&paths::resolve(project_root, &config.target));

    if let Some(next) = &config.next_manifest {
        command = command.arg("-n").path_arg(next);
    }
    if let Some(previous) = &config.previous_manifest {
        command = command.arg("-p").path_arg(previous);
    }

    command.arg("-i").arg(ignore_list(&config.extra_ignore))
}

/// Run a sync command; any non-zero exit is a sync failure.
pub fn run<R: ProcessRunner>(runner: &R, command: &CommandLine, cwd: &Path) -> Result<(), AppError> {
    let code = runner.run(command, cwd)?;
    if code != 0 {
        return Err(AppError::SyncFailed { command: command.to_string(), code });
    }
    Ok(())
}
