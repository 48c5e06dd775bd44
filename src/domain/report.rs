//! Records of what a deployment run did.

use std::path::PathBuf;

use serde::Serialize;

use crate::domain::{CommandLine, Strategy};

/// Result of the install step of `install-if-missing`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum InstallOutcome {
    /// Marker file present; the installer was not invoked.
    AlreadySatisfied,
    /// The installer ran and succeeded.
    Installed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum StepStatus {
    Ok,
    Skipped,
    /// Failed, but the error policy let the run continue.
    Warned,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepRecord {
    pub step: String,
    pub status: StepStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// Summary of a completed deployment run.
#[derive(Debug, Clone, Serialize)]
pub struct DeployReport {
    pub strategy: Strategy,
    pub steps: Vec<StepRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub install: Option<InstallOutcome>,
    pub path_entries: Vec<PathBuf>,
    pub generated: Vec<PathBuf>,
}

impl DeployReport {
    pub fn new(strategy: Strategy) -> Self {
        Self { strategy, steps: Vec::new(), install: None, path_entries: Vec::new(), generated: Vec::new() }
    }

    pub fn step(&self, name: &str) -> Option<&StepRecord> {
        self.steps.iter().find(|record| record.step == name)
    }

    pub fn has_warnings(&self) -> bool {
        self.steps.iter().any(|record| record.status == StepStatus::Warned)
    }
}

/// One action a strategy would take, as reported by `plan`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "kebab-case")]
pub enum PlannedAction {
    Skip { step: String, reason: String },
    CreateDir { path: PathBuf },
    Run { step: String, command: CommandLine },
    Search { root: PathBuf, name: String },
    Write { path: PathBuf },
}

impl std::fmt::Display for PlannedAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlannedAction::Skip { step, reason } => write!(f, "skip {}: {}", step, reason),
            PlannedAction::CreateDir { path } => write!(f, "mkdir -p {}", path.display()),
            PlannedAction::Run { command, .. } => write!(f, "{}", command),
            PlannedAction::Search { root, name } => {
                write!(f, "find {} -name {}", root.display(), name)
            }
            PlannedAction::Write { path } => write!(f, "write {}", path.display()),
        }
    }
}

/// Dry-run listing for a strategy.
#[derive(Debug, Clone, Serialize)]
pub struct DeployPlan {
    pub strategy: Strategy,
    pub actions: Vec<PlannedAction>,
}

impl DeployPlan {
    pub fn commands(&self) -> impl Iterator<Item = &CommandLine> {
        self.actions.iter().filter_map(|action| match action {
            PlannedAction::Run { command, .. } => Some(command),
            _ => None,
        })
    }
}
