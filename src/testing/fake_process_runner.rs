use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::domain::{AppError, CommandLine};
use crate::ports::ProcessRunner;

/// Records every command instead of spawning it.
///
/// Exit codes default to 0 and can be scripted per program. A program can
/// also be told to create files under the directory passed to its
/// `--target` flag, standing in for what pip would install.
#[derive(Default)]
pub struct FakeProcessRunner {
    pub commands: Mutex<Vec<(CommandLine, PathBuf)>>,
    exit_codes: HashMap<String, i32>,
    installs: HashMap<String, Vec<PathBuf>>,
    unlaunchable: Vec<String>,
}

impl FakeProcessRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_exit_code(mut self, program: &str, code: i32) -> Self {
        self.exit_codes.insert(program.to_string(), code);
        self
    }

    pub fn with_installed_file(mut self, program: &str, relative: &str) -> Self {
        self.installs.entry(program.to_string()).or_default().push(PathBuf::from(relative));
        self
    }

    pub fn with_unlaunchable(mut self, program: &str) -> Self {
        self.unlaunchable.push(program.to_string());
        self
    }

    pub fn recorded(&self) -> Vec<CommandLine> {
        self.commands.lock().unwrap().iter().map(|(command, _)| command.clone()).collect()
    }

    pub fn invocations(&self, program: &str) -> usize {
        self.commands.lock().unwrap().iter().filter(|(command, _)| command.program == program).count()
    }

    pub fn last_for(&self, program: &str) -> Option<CommandLine> {
        self.commands
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|(command, _)| command.program == program)
            .map(|(command, _)| command.clone())
    }
}

impl ProcessRunner for FakeProcessRunner {
    fn run(&self, command: &CommandLine, cwd: &Path) -> Result<i32, AppError> {
        if self.unlaunchable.contains(&command.program) {
            return Err(AppError::ToolLaunch {
                command: command.to_string(),
                details: "No such file or directory (os error 2)".to_string(),
            });
        }

        self.commands.lock().unwrap().push((command.clone(), cwd.to_path_buf()));

        let code = self.exit_codes.get(&command.program).copied().unwrap_or(0);
        if code == 0
            && let Some(files) = self.installs.get(&command.program)
            && let Some(target) = command.flag_value("--target")
        {
            for relative in files {
                let path = Path::new(target).join(relative);
                if let Some(parent) = path.parent() {
                    fs::create_dir_all(parent)?;
                }
                fs::write(&path, "#!/bin/sh\n")?;
            }
        }

        Ok(code)
    }
}
