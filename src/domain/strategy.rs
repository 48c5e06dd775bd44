use std::fmt::{self, Display};
use std::str::FromStr;

use serde::Serialize;

use crate::domain::ErrorPolicy;

/// The two deployment step sequences funcdeploy knows how to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    /// Install the CLI package only when its marker file is absent, then sync.
    InstallIfMissing,
    /// Reinstall requirements, locate the CLI, and extend the runtime PATH.
    ConfigurePath,
}

impl Strategy {
    /// Policy used when neither the config file nor the command line sets one.
    ///
    /// `install-if-missing` checks the install and sync steps individually;
    /// `configure-path` stops on any failure.
    pub fn default_error_policy(self) -> ErrorPolicy {
        match self {
            Strategy::InstallIfMissing => ErrorPolicy::CheckListedSteps,
            Strategy::ConfigurePath => ErrorPolicy::AbortOnFirstError,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Strategy::InstallIfMissing => "install-if-missing",
            Strategy::ConfigurePath => "configure-path",
        }
    }
}

impl Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Strategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "install-if-missing" => Ok(Strategy::InstallIfMissing),
            "configure-path" => Ok(Strategy::ConfigurePath),
            other => Err(format!(
                "Unknown strategy '{}': expected install-if-missing or configure-path",
                other
            )),
        }
    }
}
