//! Homework bot CLI
//!
//! Command-line entry point for the Practicum homework status notifier.

use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;

use clap::Parser;
use homework_bot::{load_config, Config};
use tracing::level_filters::LevelFilter;
use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "homework-bot")]
#[command(about = "Practicum homework status notifier for Telegram")]
#[command(version)]
struct Args {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log file, appended to (overrides config file)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Seconds between polls (overrides config file)
    #[arg(long)]
    retry_period: Option<u64>,

    /// Log level
    #[arg(short, long, default_value = "debug")]
    log_level: Level,
}

/// Log to stdout and to `log_file`; `RUST_LOG` overrides `level`
fn init_tracing(level: Level, file: File) {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(level).into())
        .from_env_lossy();

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false))
        .with(
            fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .with_file(true)
                .with_line_number(true),
        )
        .init();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let dotenv = dotenvy::dotenv();

    let mut config = if let Some(config_path) = &args.config {
        load_config(config_path)?
    } else {
        Config::default()
    };

    if let Some(log_file) = args.log_file {
        config.log_file = log_file;
    }
    if let Some(retry_period) = args.retry_period {
        config.retry_period_seconds = retry_period;
    }

    config.validate()?;
    init_tracing(args.log_level, config.open_log_file()?);

    tracing::debug!(
        "Parsed command line arguments: config={:?}, log_level={:?}",
        args.config,
        args.log_level
    );
    match dotenv {
        Ok(path) => tracing::debug!("Loaded environment from {:?}", path),
        Err(e) => tracing::debug!("No .env file loaded: {}", e),
    }

    if let Err(e) = config.resolve_secrets() {
        tracing::error!("{}. Программа будет принудительно остановлена", e);
        return Err(e.into());
    }

    tracing::info!("Starting homework bot");
    tracing::debug!(
        "Endpoint: {}, retry period: {}s, request timeout: {}s",
        config.practicum.endpoint,
        config.retry_period_seconds,
        config.practicum.request_timeout_seconds
    );

    homework_bot::run(config).await?;

    Ok(())
}
