//! `plan`: list what a strategy would do without doing it.

use crate::app::AppContext;
use crate::app::commands::{configure_path, install_if_missing};
use crate::domain::{DeployPlan, Strategy};
use crate::ports::ProcessRunner;

pub fn execute<P: ProcessRunner>(ctx: &AppContext<P>, strategy: Strategy) -> DeployPlan {
    match strategy {
        Strategy::InstallIfMissing => install_if_missing::plan(ctx),
        Strategy::ConfigurePath => configure_path::plan(ctx),
    }
}
