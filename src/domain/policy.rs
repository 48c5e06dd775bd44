//! Failure handling policies for a deployment run.

use std::fmt::{self, Display};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Which step failures end a deployment run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ErrorPolicy {
    /// Every failing step is fatal.
    AbortOnFirstError,
    /// Only steps marked as checked are fatal; other failures are logged and tolerated.
    CheckListedSteps,
}

impl ErrorPolicy {
    /// Whether a failure of a step with the given check flag ends the run.
    pub fn is_fatal(self, checked: bool) -> bool {
        match self {
            ErrorPolicy::AbortOnFirstError => true,
            ErrorPolicy::CheckListedSteps => checked,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ErrorPolicy::AbortOnFirstError => "abort-on-first-error",
            ErrorPolicy::CheckListedSteps => "check-listed-steps",
        }
    }
}

impl Display for ErrorPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ErrorPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "abort-on-first-error" => Ok(ErrorPolicy::AbortOnFirstError),
            "check-listed-steps" => Ok(ErrorPolicy::CheckListedSteps),
            other => Err(format!(
                "Unknown error policy '{}': expected abort-on-first-error or check-listed-steps",
                other
            )),
        }
    }
}

/// What happens to state written by a run that ends in failure.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RollbackPolicy {
    /// Leave partial state in place; the next deployment overwrites it.
    #[default]
    Keep,
    /// Remove files written by this run and directories it created.
    RemoveGenerated,
}

impl RollbackPolicy {
    pub fn as_str(self) -> &'static str {
        match self {
            RollbackPolicy::Keep => "keep",
            RollbackPolicy::RemoveGenerated => "remove-generated",
        }
    }
}

impl Display for RollbackPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RollbackPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "keep" => Ok(RollbackPolicy::Keep),
            "remove-generated" => Ok(RollbackPolicy::RemoveGenerated),
            other => {
                Err(format!("Unknown rollback policy '{}': expected keep or remove-generated", other))
            }
        }
    }
}
