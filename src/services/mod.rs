pub mod adapters;
pub mod executable_locator;
pub mod kudu_sync;
pub mod package_installer;
pub mod startup_artifacts;

pub use adapters::SystemProcessRunner;
pub use package_installer::PackageInstaller;
pub use startup_artifacts::StartupArtifacts;
