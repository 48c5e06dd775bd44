use std::path::{Path, PathBuf};

/// Package tree the Functions Python worker adds to its module search path.
pub const DEFAULT_PACKAGE_TARGET: &str = ".python_packages/lib/site-packages";

pub const CONFIG_FILE: &str = "funcdeploy.toml";
pub const STARTUP_SCRIPT_FILE: &str = "startup.sh";
pub const ENV_FILE: &str = ".env";

/// `funcdeploy.toml`
pub fn config(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE)
}

/// `startup.sh`
pub fn startup_script(root: &Path) -> PathBuf {
    root.join(STARTUP_SCRIPT_FILE)
}

/// `.env`
pub fn env_file(root: &Path) -> PathBuf {
    root.join(ENV_FILE)
}

/// Resolve a configured path against the project root; absolute paths pass through.
pub fn resolve(root: &Path, configured: &Path) -> PathBuf {
    if configured == Path::new(".") { root.to_path_buf() } else { root.join(configured) }
}
