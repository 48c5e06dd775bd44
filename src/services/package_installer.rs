//! pip command construction and execution.

use std::path::Path;

use crate::domain::{AppError, CommandLine};
use crate::ports::ProcessRunner;

/// Builds `install --target` invocations for a pip-compatible installer.
#[derive(Debug, Clone)]
pub struct PackageInstaller {
    program: String,
}

impl PackageInstaller {
    pub fn new<S: Into<String>>(program: S) -> Self {
        Self { program: program.into() }
    }

    /// `<program> install <package> --target <target>`
    pub fn package_command(&self, package: &str, target: &Path) -> CommandLine {
        CommandLine::new(&self.program).arg("install").arg(package).arg("--target").path_arg(target)
    }

    /// `<program> install -r <requirements> --target <target>`
    pub fn requirements_command(&self, requirements: &Path, target: &Path) -> CommandLine {
        CommandLine::new(&self.program)
            .arg("install")
            .arg("-r")
            .path_arg(requirements)
            .arg("--target")
            .path_arg(target)
    }

    /// Run an install command; any non-zero exit is an install failure.
    pub fn run<R: ProcessRunner>(
        runner: &R,
        command: &CommandLine,
        cwd: &Path,
    ) -> Result<(), AppError> {
        let code = runner.run(command, cwd)?;
        if code != 0 {
            return Err(AppError::InstallFailed { command: command.to_string(), code });
        }
        Ok(())
    }
}
