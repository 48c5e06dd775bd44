use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use funcdeploy::{
    AppError, ConfigurePathOverrides, DeployOptions, DeployPlan, DeployReport, ErrorPolicy,
    InstallIfMissingOverrides, InstallOutcome, RollbackPolicy, StepStatus, Strategy,
};
use serde::Serialize;
use tracing_subscriber::prelude::*;

#[derive(Parser)]
#[command(name = "funcdeploy")]
#[command(version)]
#[command(
    about = "Deployment hooks that put a CLI dependency on a function app's PATH",
    long_about = None
)]
struct Cli {
    /// Project root (defaults to the current directory)
    #[arg(long, global = true)]
    project_root: Option<PathBuf>,
    /// Config file (defaults to funcdeploy.toml under the project root)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Output format for the run report
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
    /// abort-on-first-error or check-listed-steps
    #[arg(long, global = true)]
    error_policy: Option<ErrorPolicy>,
    /// keep or remove-generated
    #[arg(long, global = true)]
    rollback: Option<RollbackPolicy>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Install the CLI package unless its marker file exists, then run Kudu sync
    #[clap(visible_alias = "i")]
    InstallIfMissing {
        /// Package to install
        #[arg(long)]
        package: Option<String>,
        /// File whose presence means the package is installed
        #[arg(long)]
        marker: Option<PathBuf>,
        /// Install target directory
        #[arg(long)]
        target: Option<PathBuf>,
    },
    /// Install requirements, locate the CLI, and write startup.sh and .env
    #[clap(visible_alias = "c")]
    ConfigurePath {
        /// Requirements file
        #[arg(long)]
        requirements: Option<PathBuf>,
        /// Install target directory
        #[arg(long)]
        target: Option<PathBuf>,
        /// Executable name to search for under the target
        #[arg(long)]
        executable: Option<String>,
        /// Run Kudu sync after writing the startup artifacts
        #[arg(long)]
        sync: bool,
    },
    /// Show what a strategy would do without running it
    #[clap(visible_alias = "p")]
    Plan {
        /// install-if-missing or configure-path
        strategy: Strategy,
    },
}

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "funcdeploy=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let options = DeployOptions {
        project_root: cli.project_root,
        config_path: cli.config,
        error_policy: cli.error_policy,
        rollback: cli.rollback,
    };
    let format = cli.format;

    let result: Result<(), AppError> = match cli.command {
        Commands::InstallIfMissing { package, marker, target } => {
            let overrides = InstallIfMissingOverrides { package, marker, target };
            funcdeploy::install_if_missing(&options, &overrides)
                .and_then(|report| print_report(&report, format))
        }
        Commands::ConfigurePath { requirements, target, executable, sync } => {
            let overrides = ConfigurePathOverrides { requirements, target, executable, sync };
            funcdeploy::configure_path(&options, &overrides)
                .and_then(|report| print_report(&report, format))
        }
        Commands::Plan { strategy } => {
            funcdeploy::plan(&options, strategy).and_then(|plan| print_plan(&plan, format))
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn print_report(report: &DeployReport, format: OutputFormat) -> Result<(), AppError> {
    if let OutputFormat::Json = format {
        return print_json(report);
    }

    match report.install {
        Some(InstallOutcome::AlreadySatisfied) => println!("✅ CLI already installed"),
        Some(InstallOutcome::Installed) => println!("✅ Installed CLI package"),
        None => {}
    }
    for entry in &report.path_entries {
        println!("✅ Added {} to PATH", entry.display());
    }
    for path in &report.generated {
        println!("✅ Wrote {}", path.display());
    }
    for record in &report.steps {
        if record.status == StepStatus::Warned {
            let detail = record.detail.as_deref().unwrap_or("failed");
            println!("⚠️  {} failed: {}", record.step, detail);
        }
    }
    if report.has_warnings() {
        println!("⚠️  {} finished with warnings", report.strategy);
    } else {
        println!("✅ {} finished", report.strategy);
    }
    Ok(())
}

fn print_plan(plan: &DeployPlan, format: OutputFormat) -> Result<(), AppError> {
    if let OutputFormat::Json = format {
        return print_json(plan);
    }

    println!("Plan for {}:", plan.strategy);
    for action in &plan.actions {
        println!("  {}", action);
    }
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<(), AppError> {
    let rendered = serde_json::to_string_pretty(value).map_err(std::io::Error::from)?;
    println!("{}", rendered);
    Ok(())
}
