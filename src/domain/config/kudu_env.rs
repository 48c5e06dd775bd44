//! Overrides taken from the environment Kudu sets for deployment hooks.

use std::path::PathBuf;

use crate::domain::DeployConfig;

pub const KUDU_SYNC_CMD: &str = "KUDU_SYNC_CMD";
pub const DEPLOYMENT_SOURCE: &str = "DEPLOYMENT_SOURCE";
pub const DEPLOYMENT_TARGET: &str = "DEPLOYMENT_TARGET";
pub const NEXT_MANIFEST_PATH: &str = "NEXT_MANIFEST_PATH";
pub const PREVIOUS_MANIFEST_PATH: &str = "PREVIOUS_MANIFEST_PATH";

/// Apply Kudu variables on top of `config`. Empty values are ignored.
pub fn apply_kudu_env<F>(config: &mut DeployConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

    if let Some(command) = get(KUDU_SYNC_CMD) {
        config.sync.command = command;
    }
    if let Some(source) = get(DEPLOYMENT_SOURCE) {
        config.sync.source = PathBuf::from(source);
    }
    if let Some(target) = get(DEPLOYMENT_TARGET) {
        config.sync.target = PathBuf::from(target);
    }
    if let Some(next) = get(NEXT_MANIFEST_PATH) {
        config.sync.next_manifest = Some(PathBuf::from(next));
    }
    if let Some(previous) = get(PREVIOUS_MANIFEST_PATH) {
        config.sync.previous_manifest = Some(PathBuf::from(previous));
    }
}

/// [`apply_kudu_env`] against the current process environment.
pub fn apply_process_env(config: &mut DeployConfig) {
    apply_kudu_env(config, |key| std::env::var(key).ok());
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> =
            vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn kudu_variables_override_sync_settings() {
        let mut config = DeployConfig::default();
        apply_kudu_env(
            &mut config,
            lookup(&[
                (KUDU_SYNC_CMD, "/opt/Kudu/node_modules/.bin/kuduSync"),
                (DEPLOYMENT_SOURCE, "/home/site/repository"),
                (DEPLOYMENT_TARGET, "/home/site/wwwroot"),
                (NEXT_MANIFEST_PATH, "/home/site/deployments/abc/manifest"),
                (PREVIOUS_MANIFEST_PATH, "/home/site/deployments/prev/manifest"),
            ]),
        );

        assert_eq!(config.sync.command, "/opt/Kudu/node_modules/.bin/kuduSync");
        assert_eq!(config.sync.source, PathBuf::from("/home/site/repository"));
        assert_eq!(config.sync.target, PathBuf::from("/home/site/wwwroot"));
        assert_eq!(
            config.sync.next_manifest,
            Some(PathBuf::from("/home/site/deployments/abc/manifest"))
        );
        assert_eq!(
            config.sync.previous_manifest,
            Some(PathBuf::from("/home/site/deployments/prev/manifest"))
        );
    }

    #[test]
    fn blank_variables_keep_configured_values() {
        let mut config = DeployConfig::default();
        config.sync.command = "custom-sync".into();

        apply_kudu_env(&mut config, lookup(&[(KUDU_SYNC_CMD, "   ")]));

        assert_eq!(config.sync.command, "custom-sync");
    }

    #[test]
    #[serial]
    fn process_environment_is_consulted() {
        unsafe {
            std::env::set_var(DEPLOYMENT_TARGET, "/srv/from-env");
        }

        let mut config = DeployConfig::default();
        apply_process_env(&mut config);

        unsafe {
            std::env::remove_var(DEPLOYMENT_TARGET);
        }

        assert_eq!(config.sync.target, PathBuf::from("/srv/from-env"));
    }
}
