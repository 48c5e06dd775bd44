//! Shared testing utilities for funcdeploy CLI tests.
//!
//! Every context owns a temporary project directory, a serving directory
//! standing in for `/home/site/wwwroot`, and fake `pip` and `kudusync`
//! scripts that log their arguments instead of touching the network.

use assert_cmd::Command;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const SITE_PACKAGES: &str = ".python_packages/lib/site-packages";

/// Testing harness providing an isolated deployment environment.
#[allow(dead_code)]
pub struct TestContext {
    root: TempDir,
    project: PathBuf,
    bin: PathBuf,
    wwwroot: PathBuf,
}

#[allow(dead_code)]
impl TestContext {
    /// Create a new environment with a succeeding installer and sync tool.
    pub fn new() -> Self {
        let root = TempDir::new().expect("Failed to create temp directory for tests");
        let project = root.path().join("repository");
        let bin = root.path().join("bin");
        let wwwroot = root.path().join("wwwroot");
        for dir in [&project, &bin, &wwwroot] {
            fs::create_dir_all(dir).expect("Failed to create test directory");
        }
        fs::write(project.join("requirements.txt"), "azure-cli\n")
            .expect("Failed to write requirements.txt");

        let ctx = Self { root, project, bin, wwwroot };
        ctx.fake_pip(0, None);
        ctx.fake_kudusync(0);
        ctx.write_config("");
        ctx
    }

    /// Project directory the deployment runs against.
    pub fn project(&self) -> &Path {
        &self.project
    }

    pub fn wwwroot(&self) -> &Path {
        &self.wwwroot
    }

    pub fn site_packages(&self) -> PathBuf {
        self.project.join(SITE_PACKAGES)
    }

    pub fn pip_path(&self) -> PathBuf {
        self.bin.join("pip")
    }

    pub fn kudusync_path(&self) -> PathBuf {
        self.bin.join("kudusync")
    }

    /// Build a command for the compiled `funcdeploy` binary against the project.
    pub fn cli(&self) -> Command {
        let mut cmd = Command::cargo_bin("funcdeploy").expect("Failed to locate funcdeploy binary");
        cmd.current_dir(&self.project)
            .arg("--project-root")
            .arg(&self.project)
            .env("KUDU_SYNC_CMD", self.kudusync_path())
            .env("DEPLOYMENT_TARGET", &self.wwwroot)
            .env_remove("DEPLOYMENT_SOURCE")
            .env_remove("NEXT_MANIFEST_PATH")
            .env_remove("PREVIOUS_MANIFEST_PATH")
            .env_remove("RUST_LOG");
        cmd
    }

    /// Write `funcdeploy.toml` pointing the installer at the fake `pip`,
    /// followed by `extra` TOML.
    pub fn write_config(&self, extra: &str) {
        let content =
            format!("[installer]\nprogram = '{}'\n\n{}", self.pip_path().display(), extra);
        fs::write(self.project.join("funcdeploy.toml"), content)
            .expect("Failed to write funcdeploy.toml");
    }

    /// Replace the fake installer. On success it creates `installs` (relative
    /// to the `--target` directory) as an executable file.
    pub fn fake_pip(&self, exit_code: i32, installs: Option<&str>) {
        let create = match installs {
            Some(relative) if exit_code == 0 => {
                let parent = Path::new(relative)
                    .parent()
                    .map(|p| p.display().to_string())
                    .unwrap_or_default();
                format!(
                    "mkdir -p \"$target/{parent}\"\nprintf '#!/bin/sh\\n' > \"$target/{relative}\"\nchmod +x \"$target/{relative}\"\n"
                )
            }
            _ => String::new(),
        };
        let script = format!(
            r##"#!/bin/sh
printf '%s\n' "$*" >> '{log}'
target=""
while [ "$#" -gt 0 ]; do
  if [ "$1" = "--target" ]; then target="$2"; fi
  shift
done
{create}exit {exit_code}
"##,
            log = self.bin.join("pip.log").display(),
        );
        write_script(&self.pip_path(), &script);
    }

    /// Replace the fake sync tool with one exiting `exit_code`.
    pub fn fake_kudusync(&self, exit_code: i32) {
        let script = format!(
            r##"#!/bin/sh
printf '%s\n' "$*" >> '{log}'
exit {exit_code}
"##,
            log = self.bin.join("kudusync.log").display(),
        );
        write_script(&self.kudusync_path(), &script);
    }

    /// Argument lines of every `pip` invocation so far.
    pub fn pip_calls(&self) -> Vec<String> {
        read_log(&self.bin.join("pip.log"))
    }

    /// Argument lines of every `kudusync` invocation so far.
    pub fn sync_calls(&self) -> Vec<String> {
        read_log(&self.bin.join("kudusync.log"))
    }

    /// Place a file under the install target before the run.
    pub fn preinstall(&self, relative: &str) {
        let path = self.site_packages().join(relative);
        fs::create_dir_all(path.parent().expect("relative path has a parent"))
            .expect("Failed to create preinstall directory");
        fs::write(&path, "#!/bin/sh\n").expect("Failed to write preinstalled file");
    }

    pub fn startup_script(&self) -> PathBuf {
        self.project.join("startup.sh")
    }

    pub fn env_file(&self) -> PathBuf {
        self.project.join(".env")
    }

    pub fn temp_root(&self) -> &Path {
        self.root.path()
    }
}

fn write_script(path: &Path, content: &str) {
    fs::write(path, content).expect("Failed to write fake tool");
    fs::set_permissions(path, fs::Permissions::from_mode(0o755))
        .expect("Failed to mark fake tool executable");
}

fn read_log(path: &Path) -> Vec<String> {
    match fs::read_to_string(path) {
        Ok(content) => content.lines().map(str::to_string).collect(),
        Err(_) => Vec::new(),
    }
}
