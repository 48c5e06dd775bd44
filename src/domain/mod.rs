pub mod command_line;
pub mod config;
pub mod env_extension;
pub mod error;
pub mod policy;
pub mod report;
pub mod strategy;

pub use command_line::CommandLine;
pub use config::DeployConfig;
pub use env_extension::EnvExtension;
pub use error::AppError;
pub use policy::{ErrorPolicy, RollbackPolicy};
pub use report::{DeployPlan, DeployReport, InstallOutcome, PlannedAction, StepRecord, StepStatus};
pub use strategy::Strategy;
