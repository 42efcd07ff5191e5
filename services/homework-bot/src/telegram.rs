//! Telegram Bot API notification client

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;

use crate::config::Config;
use crate::io::HttpClient;
use crate::notifier::Notifier;

/// Envelope every Bot API method answers with
#[derive(Debug, Deserialize)]
struct TelegramResponse {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
}

/// Sends messages to a single Telegram chat
pub struct TelegramNotifier {
    send_url: String,
    chat_id: String,
    http: Arc<dyn HttpClient>,
}

impl std::fmt::Debug for TelegramNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramNotifier")
            .field("chat_id", &self.chat_id)
            .finish()
    }
}

impl TelegramNotifier {
    pub fn new(config: &Config, http: Arc<dyn HttpClient>) -> Self {
        let send_url = format!(
            "{}/bot{}/sendMessage",
            config.telegram.api_url.trim_end_matches('/'),
            config.secrets.telegram_token
        );

        tracing::debug!(
            "Created TelegramNotifier for chat '{}'",
            config.secrets.telegram_chat_id
        );

        Self {
            send_url,
            chat_id: config.secrets.telegram_chat_id.clone(),
            http,
        }
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    fn type_name(&self) -> &str {
        "telegram"
    }

    async fn notify(&self, message: &str) -> crate::Result<()> {
        let params = [("chat_id", self.chat_id.as_str()), ("text", message)];

        tracing::debug!("Sending Telegram message to chat '{}'", self.chat_id);

        let response = self
            .http
            .post_form(&self.send_url, &params)
            .await
            .map_err(|e| crate::BotError::Notification(e.to_string()))?;

        let parsed = serde_json::from_str::<TelegramResponse>(&response.body).ok();
        if response.status != 200 || !parsed.as_ref().is_some_and(|r| r.ok) {
            let reason = parsed
                .and_then(|r| r.description)
                .unwrap_or_else(|| response.body.clone());
            return Err(crate::BotError::Notification(format!(
                "Telegram API returned status {}: {}",
                response.status, reason
            )));
        }

        tracing::debug!("Telegram message sent successfully");
        Ok(())
    }
}
