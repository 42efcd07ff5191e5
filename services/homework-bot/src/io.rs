//! HTTP client abstraction for testability

use std::time::Duration;

use async_trait::async_trait;

/// HTTP response from a request
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

/// Abstraction over HTTP client for dependency injection
#[async_trait]
#[cfg_attr(test, mockall::automock)]
pub trait HttpClient: Send + Sync {
    /// Send a GET request with extra headers and query parameters
    async fn get(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        query: &[(&str, &str)],
    ) -> crate::Result<HttpResponse>;

    /// Send a POST request with form-encoded body
    async fn post_form(&self, url: &str, params: &[(&str, &str)]) -> crate::Result<HttpResponse>;
}

/// Production HTTP client using reqwest
pub struct ReqwestHttpClient {
    client: reqwest::Client,
}

impl ReqwestHttpClient {
    /// Build a client whose requests give up after `timeout`
    pub fn new(timeout: Duration) -> crate::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| crate::BotError::Http(format!("Building HTTP client: {}", e)))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn get(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        query: &[(&str, &str)],
    ) -> crate::Result<HttpResponse> {
        let target = reqwest::Url::parse_with_params(url, query)
            .map_err(|e| crate::BotError::Http(format!("Invalid URL {}: {}", url, e)))?;

        tracing::debug!("GET {}", target);
        let mut request = self.client.get(target.clone());
        for (name, value) in headers {
            request = request.header(*name, *value);
        }

        let response = request
            .send()
            .await
            .map_err(|e| crate::BotError::Http(format!("GET {} failed: {}", target, e)))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| {
                crate::BotError::Http(format!("Reading response body: {}", e.without_url()))
            })?;

        tracing::debug!("GET {} -> {} ({} bytes)", target, status, body.len());
        Ok(HttpResponse { status, body })
    }

    async fn post_form(&self, url: &str, params: &[(&str, &str)]) -> crate::Result<HttpResponse> {
        // The Telegram URL embeds the bot token, so only the path tail is logged
        let shown = url.rsplit('/').next().unwrap_or_default();
        tracing::debug!("POST .../{}", shown);
        let response = self
            .client
            .post(url)
            .form(params)
            .send()
            .await
            .map_err(|e| {
                crate::BotError::Http(format!("POST .../{} failed: {}", shown, e.without_url()))
            })?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| {
                crate::BotError::Http(format!("Reading response body: {}", e.without_url()))
            })?;

        tracing::debug!("POST .../{} -> {} ({} bytes)", shown, status, body.len());
        Ok(HttpResponse { status, body })
    }
}
