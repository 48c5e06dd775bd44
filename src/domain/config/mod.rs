pub mod deploy_config;
pub mod kudu_env;
pub mod parse;
pub mod paths;

pub use deploy_config::{
    ConfigurePathConfig, DeployConfig, InstallIfMissingConfig, InstallerConfig, PolicyConfig,
    SyncConfig,
};
pub use parse::{load_config, parse_config_content};
