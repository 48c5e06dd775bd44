//! Child-process execution.
//!
//! Deployment steps construct a [`CommandLine`] and hand it to this port, so
//! tests can observe exactly what would have been spawned.

use std::path::Path;

use crate::domain::{AppError, CommandLine};

/// Port for running external tools to completion.
pub trait ProcessRunner {
    /// Run `command` in `cwd`, blocking until it exits, and return its exit code.
    ///
    /// A process terminated by a signal reports `-1`. Failing to start the
    /// program at all is an error, not an exit code.
    fn run(&self, command: &CommandLine, cwd: &Path) -> Result<i32, AppError>;
}
