//! Step bookkeeping for a single deployment run.
//!
//! Every step result passes through [`DeployRun`], which records it in the
//! report and decides, according to the error policy, whether the failure
//! ends the run. On a fatal failure the rollback policy is applied before the
//! error is returned.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{error, info, warn};

use crate::domain::{
    AppError, DeployReport, ErrorPolicy, RollbackPolicy, StepRecord, StepStatus, Strategy,
};

pub struct DeployRun {
    error_policy: ErrorPolicy,
    rollback: RollbackPolicy,
    report: DeployReport,
    written_files: Vec<PathBuf>,
    created_dirs: Vec<PathBuf>,
}

impl DeployRun {
    pub fn new(strategy: Strategy, error_policy: ErrorPolicy, rollback: RollbackPolicy) -> Self {
        info!(%strategy, %error_policy, %rollback, "Starting deployment");
        Self {
            error_policy,
            rollback,
            report: DeployReport::new(strategy),
            written_files: Vec::new(),
            created_dirs: Vec::new(),
        }
    }

    /// A step later steps depend on. Failure is fatal under every policy.
    pub fn require<T>(&mut self, step: &str, result: Result<T, AppError>) -> Result<T, AppError> {
        match result {
            Ok(value) => {
                self.record(step, StepStatus::Ok, None);
                Ok(value)
            }
            Err(err) => Err(self.fail(step, err)),
        }
    }

    /// A step whose failure is fatal only if the policy says so.
    pub fn check(
        &mut self,
        step: &str,
        checked: bool,
        result: Result<(), AppError>,
    ) -> Result<(), AppError> {
        match result {
            Ok(()) => {
                self.record(step, StepStatus::Ok, None);
                Ok(())
            }
            Err(err) if self.error_policy.is_fatal(checked) => Err(self.fail(step, err)),
            Err(err) => {
                warn!(step, error = %err, policy = %self.error_policy, "Step failed; continuing");
                self.record(step, StepStatus::Warned, Some(err.to_string()));
                Ok(())
            }
        }
    }

    pub fn skip<S: Into<String>>(&mut self, step: &str, reason: S) {
        self.record(step, StepStatus::Skipped, Some(reason.into()));
    }

    /// Register a file this run is about to write. Only files that do not
    /// exist yet are eligible for rollback.
    pub fn note_written(&mut self, path: &Path) {
        if self.report.generated.iter().any(|p| p == path) {
            return;
        }
        if !path.exists() {
            self.written_files.push(path.to_path_buf());
        }
        self.report.generated.push(path.to_path_buf());
    }

    /// Register a directory this run created.
    pub fn note_created_dir(&mut self, path: PathBuf) {
        self.created_dirs.push(path);
    }

    pub fn report_mut(&mut self) -> &mut DeployReport {
        &mut self.report
    }

    pub fn finish(self) -> DeployReport {
        let report = self.report;
        if report.has_warnings() {
            warn!(strategy = %report.strategy, "Deployment finished with tolerated failures");
        } else {
            info!(strategy = %report.strategy, "Deployment finished");
        }
        report
    }

    fn record(&mut self, step: &str, status: StepStatus, detail: Option<String>) {
        self.report.steps.push(StepRecord { step: step.to_string(), status, detail });
    }

    fn fail(&mut self, step: &str, err: AppError) -> AppError {
        error!(step, error = %err, "Step failed");
        self.record(step, StepStatus::Failed, Some(err.to_string()));
        self.roll_back();
        err
    }

    fn roll_back(&mut self) {
        if self.rollback == RollbackPolicy::Keep {
            if !self.written_files.is_empty() || !self.created_dirs.is_empty() {
                info!("Leaving partial deployment state in place");
            }
            return;
        }

        for path in self.written_files.drain(..).rev() {
            match fs::remove_file(&path) {
                Ok(()) => info!(path = %path.display(), "Removed generated file"),
                Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                Err(e) => warn!(path = %path.display(), error = %e, "Could not remove generated file"),
            }
        }
        for dir in self.created_dirs.drain(..).rev() {
            match fs::remove_dir_all(&dir) {
                Ok(()) => info!(path = %dir.display(), "Removed created directory"),
                Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                Err(e) => warn!(path = %dir.display(), error = %e, "Could not remove created directory"),
            }
        }
    }
}

/// Create `dir` and any missing ancestors.
///
/// Returns the topmost directory that did not exist before, or `None` if
/// `dir` was already present.
pub fn prepare_dir(dir: &Path) -> Result<Option<PathBuf>, AppError> {
    if dir.is_dir() {
        return Ok(None);
    }

    let topmost = dir
        .ancestors()
        .take_while(|ancestor| !ancestor.as_os_str().is_empty() && !ancestor.exists())
        .last()
        .map(Path::to_path_buf);

    fs::create_dir_all(dir)?;
    Ok(topmost)
}
