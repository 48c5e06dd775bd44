use std::path::Path;
use std::process::Command;

use tracing::{debug, warn};

use crate::domain::{AppError, CommandLine};
use crate::ports::ProcessRunner;

/// Runs tools with `std::process::Command`, inheriting stdio so their output
/// lands in the deployment log.
#[derive(Debug, Clone, Default)]
pub struct SystemProcessRunner;

impl SystemProcessRunner {
    pub fn new() -> Self {
        Self
    }
}

impl ProcessRunner for SystemProcessRunner {
    fn run(&self, command: &CommandLine, cwd: &Path) -> Result<i32, AppError> {
        debug!(%command, cwd = %cwd.display(), "spawning");

        let status = Command::new(&command.program)
            .args(&command.args)
            .current_dir(cwd)
            .status()
            .map_err(|e| AppError::ToolLaunch {
                command: command.to_string(),
                details: e.to_string(),
            })?;

        match status.code() {
            Some(code) => Ok(code),
            None => {
                warn!(%command, "terminated by signal");
                Ok(-1)
            }
        }
    }
}
