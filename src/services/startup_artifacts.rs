//! Rendering and writing of the startup fragment and its `.env` companion.
//!
//! The hosting runtime sources `.env` at process start; `.env` sources
//! `startup.sh`, which appends the [`EnvExtension`] directories to `PATH`.

use std::fs;
use std::path::{Path, PathBuf};

use include_dir::{Dir, include_dir};
use minijinja::{AutoEscape, Environment, UndefinedBehavior, context};

use crate::domain::command_line::shell_quote;
use crate::domain::config::paths;
use crate::domain::{AppError, EnvExtension};

static STARTUP_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/src/assets/startup");

const STARTUP_TEMPLATE: &str = "startup.sh.j2";
const ENV_TEMPLATE: &str = "env.j2";

/// Paths of the two files written for the runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartupArtifacts {
    pub startup_script: PathBuf,
    pub env_file: PathBuf,
}

impl StartupArtifacts {
    pub fn for_project(project_root: &Path) -> Self {
        Self {
            startup_script: paths::startup_script(project_root),
            env_file: paths::env_file(project_root),
        }
    }
}

pub fn render_startup_script(extension: &EnvExtension) -> Result<String, AppError> {
    if extension.is_empty() {
        return Err(AppError::config_error("No PATH entries to inject"));
    }
    let entries = extension
        .path_entries()
        .iter()
        .map(|entry| shell_path(entry))
        .collect::<Result<Vec<_>, _>>()?
        .join(":");
    render(STARTUP_TEMPLATE, context! { path_entries => entries })
}

pub fn render_env_file(startup_script: &Path) -> Result<String, AppError> {
    render(ENV_TEMPLATE, context! { startup_script => shell_path(startup_script)? })
}

/// Shell-quoted form of `path`; paths that are not valid UTF-8 are rejected.
fn shell_path(path: &Path) -> Result<String, AppError> {
    let value = path.to_str().ok_or_else(|| {
        AppError::config_error(format!("Path is not valid UTF-8: {}", path.display()))
    })?;
    Ok(shell_quote(value).into_owned())
}

/// Write `startup.sh` and mark it executable. Overwrites any previous copy.
pub fn write_startup_script(path: &Path, extension: &EnvExtension) -> Result<(), AppError> {
    let content = render_startup_script(extension)?;
    fs::write(path, content)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mut perms = fs::metadata(path)?.permissions();
        perms.set_mode(0o755);
        fs::set_permissions(path, perms)?;
    }

    Ok(())
}

/// Write `.env` pointing at `startup_script`. Overwrites any previous copy.
pub fn write_env_file(path: &Path, startup_script: &Path) -> Result<(), AppError> {
    let content = render_env_file(startup_script)?;
    fs::write(path, content)?;
    Ok(())
}

fn render(name: &str, ctx: minijinja::Value) -> Result<String, AppError> {
    let source = STARTUP_DIR
        .get_file(name)
        .and_then(|file| file.contents_utf8())
        .ok_or_else(|| AppError::Template(format!("Missing embedded template: {}", name)))?;

    let mut env = Environment::new();
    env.set_undefined_behavior(UndefinedBehavior::Strict);
    env.set_keep_trailing_newline(true);
    env.set_auto_escape_callback(|_| AutoEscape::None);
    env.add_template(name, source)?;

    Ok(env.get_template(name)?.render(ctx)?)
}
