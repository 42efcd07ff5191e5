//! Engine: the fetch, validate, format and notify polling loop

use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use tokio_util::sync::CancellationToken;

use crate::notifier::Notifier;
use crate::practicum::HomeworkApi;
use crate::response::check_response;
use crate::verdict::parse_status;

/// How a single polling cycle ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    /// Every record was formatted and handed to the notifier
    Completed { notified: usize },
    /// A homework error was hit; `reported` is false when it was a repeat
    HomeworkFailed { error: String, reported: bool },
    /// A failure outside the homework family, only logged
    Unexpected { error: String },
}

/// Polls the homework API and forwards status changes to the notifier
#[derive(Debug)]
pub struct Engine {
    api: Arc<dyn HomeworkApi>,
    notifier: Arc<dyn Notifier>,
    retry_period: Duration,
    cursor: i64,
    last_error: Option<String>,
}

impl Engine {
    pub fn new(
        api: Arc<dyn HomeworkApi>,
        notifier: Arc<dyn Notifier>,
        retry_period: Duration,
        cursor: i64,
    ) -> Self {
        Self {
            api,
            notifier,
            retry_period,
            cursor,
            last_error: None,
        }
    }

    /// The `from_date` the next fetch will use
    pub fn cursor(&self) -> i64 {
        self.cursor
    }

    /// Text of the last error reported to the chat, if any
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Run cycles until the cancellation token is triggered.
    ///
    /// The retry period is slept after every cycle, whatever its outcome.
    pub async fn run(&mut self, cancel: CancellationToken) {
        tracing::debug!("Starting polling loop, timestamp = {}", self.cursor);

        loop {
            let outcome = self.run_cycle().await;
            tracing::debug!("Cycle finished: {:?}", outcome);

            tokio::select! {
                _ = tokio::time::sleep(self.retry_period) => {}
                _ = cancel.cancelled() => {
                    tracing::debug!("Polling loop cancelled");
                    break;
                }
            }
        }
    }

    /// Run one fetch, validate, format and notify cycle
    pub async fn run_cycle(&mut self) -> CycleOutcome {
        match self.process().await {
            Ok(notified) => {
                self.last_error = None;
                CycleOutcome::Completed { notified }
            }
            Err(e) if e.is_homework_error() => {
                let error = e.to_string();
                tracing::error!("{}", error);
                let reported = self.last_error.as_deref() != Some(error.as_str());
                if reported {
                    self.send(&error).await;
                } else {
                    tracing::debug!("Error already reported, not notifying again");
                }
                self.last_error = Some(error.clone());
                CycleOutcome::HomeworkFailed { error, reported }
            }
            Err(e) => {
                let error = e.to_string();
                tracing::error!("Unexpected failure: {}", error);
                CycleOutcome::Unexpected { error }
            }
        }
    }

    async fn process(&mut self) -> crate::Result<usize> {
        let payload = self.api.fetch(self.cursor).await?;
        let response = check_response(&payload)?;
        self.advance_cursor(response.current_date);

        if response.homeworks.is_empty() {
            tracing::debug!("No new statuses in the response");
            return Ok(0);
        }

        for homework in &response.homeworks {
            let message = parse_status(homework)?;
            self.send(&message).await;
        }
        Ok(response.homeworks.len())
    }

    fn advance_cursor(&mut self, current_date: i64) {
        if current_date < self.cursor {
            tracing::warn!(
                "Server current_date {} is older than cursor {}, keeping cursor",
                current_date,
                self.cursor
            );
            return;
        }
        self.cursor = current_date;
    }

    /// Deliver a message; failures are logged and swallowed
    async fn send(&self, message: &str) {
        tracing::debug!("Sending message via '{}'", self.notifier.type_name());
        match self.notifier.notify(message).await {
            Ok(()) => tracing::debug!("Message sent"),
            Err(e) => tracing::error!("Failed to send message: {}", e),
        }
    }
}

/// Current wall-clock time in unix seconds
pub fn current_epoch_secs() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs() as i64
}
