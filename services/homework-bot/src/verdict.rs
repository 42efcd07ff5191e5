//! Verdict table and status message formatting

use crate::response::HomeworkRecord;

/// Review status codes the bot knows how to report, with their chat text
pub const HOMEWORK_VERDICTS: [(&str, &str); 3] = [
    ("approved", "Работа проверена: ревьюеру всё понравилось. Ура!"),
    ("reviewing", "Работа взята на проверку ревьюером."),
    ("rejected", "Работа проверена: у ревьюера есть замечания."),
];

/// Look up the verdict text for a status code
pub fn verdict_for(status: &str) -> Option<&'static str> {
    HOMEWORK_VERDICTS
        .iter()
        .find(|(code, _)| *code == status)
        .map(|(_, verdict)| *verdict)
}

/// Build the chat message announcing the record's new status
pub fn parse_status(homework: &HomeworkRecord) -> crate::Result<String> {
    tracing::debug!("Formatting status of '{}'", homework.homework_name);

    if homework.homework_name.is_empty() {
        return Err(crate::BotError::UnknownVerdict(
            "отсутствует 'homework_name'".to_string(),
        ));
    }

    let verdict = verdict_for(&homework.status).ok_or_else(|| {
        crate::BotError::UnknownVerdict(format!("неизвестный статус '{}'", homework.status))
    })?;

    tracing::debug!(
        "Formatted status of '{}': {}",
        homework.homework_name,
        homework.status
    );

    Ok(format!(
        "Изменился статус проверки работы \"{}\". {}",
        homework.homework_name, verdict
    ))
}
