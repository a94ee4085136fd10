//! jobfill - job application form detection and autofill.
//!
//! Main entry point for the jobfill CLI.

mod cli;
mod cmd_page;
mod cmd_profile;

use std::path::PathBuf;

use clap::Parser;
use tracing::warn;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use jobfill_config::{Config, ConfigLoader, ConfigValidator, LoggingConfig};

use crate::cli::{Cli, Commands};

/// Get the .jobfill directory path.
fn jobfill_dir() -> PathBuf {
    Config::home_dir()
}

/// Initialize tracing with console and, optionally, file output.
///
/// Log files are written to ~/.jobfill/debug/ with daily rotation.
fn init_tracing(logging: &LoggingConfig) -> Result<(), Box<dyn std::error::Error>> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&logging.level));

    let console = fmt::layer().with_target(true).with_writer(std::io::stderr);

    if !logging.file {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(console)
            .init();
        return Ok(());
    }

    let log_dir = jobfill_dir().join("debug");
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix("jobfill")
        .filename_suffix("log")
        .max_log_files(14)
        .build(&log_dir)?;
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    // Dropping the guard stops the writer thread.
    static GUARD: std::sync::OnceLock<tracing_appender::non_blocking::WorkerGuard> =
        std::sync::OnceLock::new();
    let _ = GUARD.set(guard);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console)
        .with(fmt::layer().with_writer(non_blocking).with_ansi(false))
        .init();

    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = ConfigLoader::load_or_default(cli.config.as_deref())?;
    init_tracing(&config.logging)?;

    for warning in ConfigValidator::validate(&config)?.into_result()? {
        warn!(path = %warning.path, "{}", warning.message);
    }

    match cli.command {
        Commands::Analyze { page, format } => cmd_page::analyze(&config, &page, &format).await,
        Commands::Fill {
            page,
            profile,
            out,
            paced,
            legacy,
        } => {
            let options = cmd_page::FillArgs {
                profile,
                out,
                paced,
                legacy,
            };
            cmd_page::fill(&config, &page, options).await
        }
        Commands::Detect { page } => cmd_page::detect(&config, &page),
        Commands::Profile { action } => cmd_profile::handle_profile_command(&config, action).await,
        Commands::History { errors, limit } => cmd_profile::history(&config, errors, limit).await,
        Commands::AtsMode { state } => cmd_profile::ats_mode(&config, state).await,
    }
}
