//! BDD step definitions for the Telegram notification feature

use std::sync::Arc;

use cucumber::{given, then, when};

use homework_bot::config::{Config, Secrets};
use homework_bot::io::HttpClient;
use homework_bot::notifier::Notifier;
use homework_bot::telegram::TelegramNotifier;
use homework_bot::BotError;

use crate::world::{HomeworkWorld, ScriptedHttp};

fn telegram_config() -> Config {
    let mut config = Config::default();
    config.secrets = Secrets {
        practicum_token: "p-token".to_string(),
        telegram_token: "123:ABC".to_string(),
        telegram_chat_id: "42".to_string(),
    };
    config
}

#[given(expr = "the Telegram API answers with status {int} and body {string}")]
fn telegram_answers(world: &mut HomeworkWorld, status: u16, body: String) {
    let http = Arc::new(ScriptedHttp::default());
    http.push_ok(status, &body);
    world.telegram_http = Some(http);
}

#[given("the Telegram API is unreachable")]
fn telegram_unreachable(world: &mut HomeworkWorld) {
    let http = Arc::new(ScriptedHttp::default());
    http.push_failure("connection refused");
    world.telegram_http = Some(http);
}

#[when(expr = "the message {string} is sent to Telegram")]
async fn send_to_telegram(world: &mut HomeworkWorld, message: String) {
    let http: Arc<dyn HttpClient> = world
        .telegram_http
        .clone()
        .expect("Telegram API not configured");
    let notifier = TelegramNotifier::new(&telegram_config(), http);
    world.notification_result = Some(notifier.notify(&message).await);
}

#[then("the notification should succeed")]
fn notification_succeeds(world: &mut HomeworkWorld) {
    let result = world.notification_result.as_ref().expect("no result");
    result.as_ref().unwrap();
}

#[then(expr = "the notification should fail mentioning {string}")]
fn notification_fails(world: &mut HomeworkWorld, needle: String) {
    let result = world.notification_result.as_ref().expect("no result");
    match result {
        Err(err @ BotError::Notification(_)) => {
            assert!(err.to_string().contains(&needle), "{err}");
        }
        other => panic!("expected a notification error, got {:?}", other),
    }
}

#[then(expr = "Telegram should have received {string}")]
fn telegram_received(world: &mut HomeworkWorld, form: String) {
    let http = world
        .telegram_http
        .as_ref()
        .expect("Telegram API not configured");
    let requests = http.requests();
    assert!(
        requests.contains(&form),
        "expected form '{}', got {:?}",
        form,
        requests
    );
}
