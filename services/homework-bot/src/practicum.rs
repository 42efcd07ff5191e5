//! Practicum homework status API client

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::config::Config;
use crate::io::HttpClient;

/// Source of raw homework status payloads
#[async_trait]
pub trait HomeworkApi: Send + Sync + std::fmt::Debug {
    /// Fetch every status change since `from_date` (unix seconds).
    ///
    /// Returns the decoded JSON unmodified; shape checks belong to
    /// [`crate::response::check_response`].
    async fn fetch(&self, from_date: i64) -> crate::Result<Value>;
}

/// Client for the Practicum homework statuses endpoint
pub struct PracticumClient {
    endpoint: String,
    authorization: String,
    http: Arc<dyn HttpClient>,
}

impl std::fmt::Debug for PracticumClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PracticumClient")
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

impl PracticumClient {
    pub fn new(config: &Config, http: Arc<dyn HttpClient>) -> Self {
        tracing::debug!("Created PracticumClient for {}", config.practicum.endpoint);

        Self {
            endpoint: config.practicum.endpoint.clone(),
            authorization: format!("OAuth {}", config.secrets.practicum_token),
            http,
        }
    }
}

#[async_trait]
impl HomeworkApi for PracticumClient {
    async fn fetch(&self, from_date: i64) -> crate::Result<Value> {
        tracing::debug!("Requesting homework statuses from_date={}", from_date);

        let from_date_str = from_date.to_string();
        let response = self
            .http
            .get(
                &self.endpoint,
                &[("Authorization", self.authorization.as_str())],
                &[("from_date", from_date_str.as_str())],
            )
            .await
            .map_err(|e| match e {
                crate::BotError::Http(reason) => crate::BotError::Request(reason),
                other => crate::BotError::Request(other.to_string()),
            })?;

        if response.status != 200 {
            tracing::debug!(
                "Homework API returned status {} for from_date={}: {}",
                response.status,
                from_date,
                response.body
            );
            return Err(crate::BotError::Request(format!(
                "API вернул статус {}",
                response.status
            )));
        }

        let payload: Value = serde_json::from_str(&response.body).map_err(|e| {
            crate::BotError::Request(format!("некорректный JSON в ответе: {}", e))
        })?;

        tracing::debug!("Homework statuses received");
        Ok(payload)
    }
}
