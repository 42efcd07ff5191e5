//! Configuration types for the homework bot

use serde::{Deserialize, Serialize};
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

pub const PRACTICUM_TOKEN_VAR: &str = "PRACTICUM_TOKEN";
pub const TELEGRAM_TOKEN_VAR: &str = "TELEGRAM_TOKEN";
pub const TELEGRAM_CHAT_ID_VAR: &str = "TELEGRAM_CHAT_ID";

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub practicum: PracticumConfig,
    #[serde(default)]
    pub telegram: TelegramConfig,
    #[serde(default = "default_retry_period")]
    pub retry_period_seconds: u64,
    #[serde(default = "default_log_file")]
    pub log_file: PathBuf,
    /// Filled from the environment by [`Config::resolve_secrets`], never from the file
    #[serde(skip)]
    pub secrets: Secrets,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            practicum: PracticumConfig::default(),
            telegram: TelegramConfig::default(),
            retry_period_seconds: default_retry_period(),
            log_file: default_log_file(),
            secrets: Secrets::default(),
        }
    }
}

/// Practicum homework API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PracticumConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,
}

impl Default for PracticumConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            request_timeout_seconds: default_request_timeout(),
        }
    }
}

/// Telegram Bot API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelegramConfig {
    #[serde(default = "default_telegram_api_url")]
    pub api_url: String,
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            api_url: default_telegram_api_url(),
        }
    }
}

/// The three credentials the bot cannot run without
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Secrets {
    pub practicum_token: String,
    pub telegram_token: String,
    pub telegram_chat_id: String,
}

impl std::fmt::Debug for Secrets {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Secrets")
            .field("practicum_token", &redact(&self.practicum_token))
            .field("telegram_token", &redact(&self.telegram_token))
            .field("telegram_chat_id", &self.telegram_chat_id)
            .finish()
    }
}

fn redact(value: &str) -> &'static str {
    if value.is_empty() {
        "<missing>"
    } else {
        "<redacted>"
    }
}

impl Config {
    /// Reject settings the polling loop cannot run with
    pub fn validate(&self) -> crate::Result<()> {
        if self.retry_period_seconds == 0 {
            return Err(crate::BotError::Config(
                "retry_period_seconds must be at least 1".to_string(),
            ));
        }
        if self.practicum.request_timeout_seconds == 0 {
            return Err(crate::BotError::Config(
                "practicum.request_timeout_seconds must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Open the log file for appending, creating it if needed
    pub fn open_log_file(&self) -> crate::Result<File> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_file)?;
        Ok(file)
    }

    /// Resolve the credentials from the process environment
    pub fn resolve_secrets(&mut self) -> crate::Result<()> {
        self.resolve_secrets_with(|name| std::env::var(name).ok())
    }

    /// Resolve the credentials through `lookup`. Empty values count as missing.
    pub fn resolve_secrets_with<F>(&mut self, lookup: F) -> crate::Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut missing = Vec::new();
        let mut fetch = |name: &'static str| match lookup(name) {
            Some(value) if !value.trim().is_empty() => value,
            _ => {
                missing.push(name);
                String::new()
            }
        };

        let secrets = Secrets {
            practicum_token: fetch(PRACTICUM_TOKEN_VAR),
            telegram_token: fetch(TELEGRAM_TOKEN_VAR),
            telegram_chat_id: fetch(TELEGRAM_CHAT_ID_VAR),
        };

        if !missing.is_empty() {
            return Err(crate::BotError::Config(format!(
                "Missing required environment variables: {}",
                missing.join(", ")
            )));
        }

        tracing::debug!("Resolved credentials: {:?}", secrets);
        self.secrets = secrets;
        Ok(())
    }
}

fn default_endpoint() -> String {
    "https://practicum.yandex.ru/api/user_api/homework_statuses/".to_string()
}

fn default_request_timeout() -> u64 {
    30
}

fn default_telegram_api_url() -> String {
    "https://api.telegram.org".to_string()
}

fn default_retry_period() -> u64 {
    600
}

fn default_log_file() -> PathBuf {
    PathBuf::from("blackbox.log")
}

/// Load configuration from a JSON file
pub fn load_config(path: &Path) -> crate::Result<Config> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        crate::BotError::Config(format!("Failed to read config file {:?}: {}", path, e))
    })?;
    let config: Config = serde_json::from_str(&content)?;
    Ok(config)
}
