//! BDD test world for the homework bot

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use cucumber::World;
use homework_bot::engine::{CycleOutcome, Engine};
use homework_bot::io::{HttpClient, HttpResponse};
use homework_bot::notifier::Notifier;
use homework_bot::BotError;

/// HTTP client that replays scripted replies in order
#[derive(Debug, Default)]
pub struct ScriptedHttp {
    replies: Mutex<VecDeque<Result<HttpResponse, String>>>,
    requests: Mutex<Vec<String>>,
}

impl ScriptedHttp {
    pub fn push_ok(&self, status: u16, body: &str) {
        self.replies.lock().unwrap().push_back(Ok(HttpResponse {
            status,
            body: body.to_string(),
        }));
    }

    pub fn push_failure(&self, reason: &str) {
        self.replies
            .lock()
            .unwrap()
            .push_back(Err(reason.to_string()));
    }

    /// Rendered query strings of every request made so far
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    fn next(&self) -> homework_bot::Result<HttpResponse> {
        match self.replies.lock().unwrap().pop_front() {
            Some(Ok(response)) => Ok(response),
            Some(Err(reason)) => Err(BotError::Http(reason)),
            None => Err(BotError::Http("no scripted reply".to_string())),
        }
    }
}

#[async_trait::async_trait]
impl HttpClient for ScriptedHttp {
    async fn get(
        &self,
        _url: &str,
        _headers: &[(&str, &str)],
        query: &[(&str, &str)],
    ) -> homework_bot::Result<HttpResponse> {
        let rendered = query
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join("&");
        self.requests.lock().unwrap().push(rendered);
        self.next()
    }

    async fn post_form(
        &self,
        _url: &str,
        params: &[(&str, &str)],
    ) -> homework_bot::Result<HttpResponse> {
        let rendered = params
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join("&");
        self.requests.lock().unwrap().push(rendered);
        self.next()
    }
}

/// A notifier that records every message and optionally fails
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    pub fail: bool,
    pub sent: Mutex<Vec<String>>,
}

#[async_trait::async_trait]
impl Notifier for RecordingNotifier {
    fn type_name(&self) -> &str {
        "recording"
    }

    async fn notify(&self, message: &str) -> homework_bot::Result<()> {
        self.sent.lock().unwrap().push(message.to_string());
        if self.fail {
            Err(BotError::Notification("chat unavailable".to_string()))
        } else {
            Ok(())
        }
    }
}

#[derive(Debug, Default, World)]
pub struct HomeworkWorld {
    // Polling
    pub start_cursor: Option<i64>,
    pub chat_fails: bool,
    pub api_http: Arc<ScriptedHttp>,
    pub chat: Option<Arc<RecordingNotifier>>,
    pub engine: Option<Engine>,
    pub outcomes: Vec<CycleOutcome>,

    // Telegram notifier
    pub telegram_http: Option<Arc<ScriptedHttp>>,
    pub notification_result: Option<homework_bot::Result<()>>,
}

impl HomeworkWorld {
    pub fn sent_messages(&self) -> Vec<String> {
        self.chat
            .as_ref()
            .map(|c| c.sent.lock().unwrap().clone())
            .unwrap_or_default()
    }
}
