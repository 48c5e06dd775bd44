pub mod configure_path;
pub mod install_if_missing;
pub mod plan;
pub mod sync;

/// Step names as they appear in reports and logs.
pub mod steps {
    pub const PREPARE_TARGET: &str = "prepare-target";
    pub const INSTALL: &str = "install";
    pub const LOCATE_EXECUTABLE: &str = "locate-executable";
    pub const WRITE_STARTUP_SCRIPT: &str = "write-startup-script";
    pub const WRITE_ENV_FILE: &str = "write-env-file";
    pub const SYNC: &str = "sync";
}
