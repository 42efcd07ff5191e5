//! Homework bot - Practicum review status notifications
//!
//! Polls the Practicum homework API, detects review status changes, and sends
//! them to a Telegram chat.

pub mod config;
pub mod engine;
pub mod error;
pub mod io;
pub mod notifier;
pub mod practicum;
pub mod response;
pub mod telegram;
pub mod verdict;

pub use config::{load_config, Config};
pub use error::{BotError, Result};

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::engine::{current_epoch_secs, Engine};
use crate::io::ReqwestHttpClient;
use crate::practicum::PracticumClient;
use crate::telegram::TelegramNotifier;

/// Run the homework bot with the given configuration.
///
/// `config` must already carry resolved secrets.
pub async fn run(config: Config) -> Result<()> {
    let timeout = Duration::from_secs(config.practicum.request_timeout_seconds);
    let http: Arc<dyn io::HttpClient> = Arc::new(ReqwestHttpClient::new(timeout)?);
    let cancel = CancellationToken::new();

    let api = Arc::new(PracticumClient::new(&config, Arc::clone(&http)));
    let notifier = Arc::new(TelegramNotifier::new(&config, Arc::clone(&http)));

    let mut engine = Engine::new(
        api,
        notifier,
        Duration::from_secs(config.retry_period_seconds),
        current_epoch_secs(),
    );

    // Setup shutdown handler
    let cancel_for_signal = cancel.clone();
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for ctrl-c: {}", e);
            return;
        }
        tracing::info!("Shutdown signal received");
        cancel_for_signal.cancel();
    });

    tracing::info!(
        "Homework bot started, polling every {}s",
        config.retry_period_seconds
    );

    // Blocks until cancelled
    engine.run(cancel).await;

    tracing::info!("Homework bot stopped");
    Ok(())
}
