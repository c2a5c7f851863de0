//! buildport - import community gear builds from build-planner pages.
//!
//! Main entry point for the buildport CLI.

mod cli;
mod cmd_builds;
mod cmd_import;

use std::path::Path;

use clap::Parser;
use tracing::{info, warn};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use buildport_config::{Config, ConfigLoader, ConfigValidator, buildport_dir};

use crate::cli::{Cli, Commands};

/// Initialize tracing with console and file output.
///
/// Log files are written to ~/.buildport/logs/ with daily rotation.
fn init_tracing() -> Result<(), Box<dyn std::error::Error>> {
    let log_dir = buildport_dir().join("logs");
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix("buildport")
        .filename_suffix("log")
        .max_log_files(14)
        .build(&log_dir)?;

    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    // Keeps the file writer flushing until exit.
    static GUARD: std::sync::OnceLock<tracing_appender::non_blocking::WorkerGuard> =
        std::sync::OnceLock::new();
    let _ = GUARD.set(guard);

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(true).with_ansi(true))
        .with(fmt::layer().with_writer(non_blocking).with_ansi(false))
        .init();

    Ok(())
}

/// Load, validate and report the configuration at `path`.
fn load_config(path: &Path) -> Result<Config, Box<dyn std::error::Error>> {
    if path.exists() {
        info!("Loading configuration from {}", path.display());
    } else {
        info!("No configuration at {}, using defaults", path.display());
    }

    let config = ConfigLoader::load_or_default(path)?;
    let warnings = ConfigValidator::validate(&config)?.into_result()?;
    for warning in warnings {
        warn!("Config {}: {}", warning.path, warning.message);
    }
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing()?;

    let cli = Cli::parse();
    let config = load_config(&cli.config)?;

    match cli.command {
        Commands::Import { url } => cmd_import::import(&config, &url).await,
        Commands::List { format } => cmd_builds::list(&config, &format).await,
        Commands::Show { id } => cmd_builds::show(&config, &id).await,
        Commands::Delete { id } => cmd_builds::delete(&config, &id).await,
        Commands::Preset { id, variant, name } => {
            cmd_builds::preset(&config, &id, &variant, name.as_deref()).await
        }
    }
}
