pub mod commands;
mod context;
pub mod deploy_run;
pub mod options;

pub use context::AppContext;
pub use options::DeployOptions;
