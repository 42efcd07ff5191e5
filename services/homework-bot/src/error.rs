//! Error types for the homework bot

/// Errors that can occur in the homework bot
///
/// `Request`, `Schema` and `UnknownVerdict` are the homework errors: they are
/// reported to the chat, so their text is addressed to the chat audience.
/// The remaining variants are only ever logged.
#[derive(Debug, thiserror::Error)]
pub enum BotError {
    #[error("Ошибка запроса к Практикум.Домашка: {0}")]
    Request(String),

    #[error("Ошибка проверки ответа, {0}")]
    Schema(String),

    #[error("Ошибка парсинга ответа Практикум.Домашка: {0}")]
    UnknownVerdict(String),

    #[error("Notification failed: {0}")]
    Notification(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP request failed: {0}")]
    Http(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

impl BotError {
    /// Whether this error belongs to the family that is reported to the chat
    pub fn is_homework_error(&self) -> bool {
        matches!(
            self,
            BotError::Request(_) | BotError::Schema(_) | BotError::UnknownVerdict(_)
        )
    }
}

/// Result type alias for homework bot operations
pub type Result<T> = std::result::Result<T, BotError>;
