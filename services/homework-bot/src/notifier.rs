//! Notifier trait for delivering chat messages

use async_trait::async_trait;

/// Trait for sending a text message to the bot's fixed destination
#[async_trait]
pub trait Notifier: Send + Sync + std::fmt::Debug {
    /// Get the notifier type name (e.g. "telegram")
    fn type_name(&self) -> &str;

    /// Send a message. Failures are returned as [`crate::BotError::Notification`].
    async fn notify(&self, message: &str) -> crate::Result<()>;
}
