//! Validation of raw homework API payloads
//!
//! The checks are deliberately shallow: they guard against contract drift
//! in the two fields the bot consumes and stop at the first violation.

use serde_json::Value;

/// A validated homework API response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub current_date: i64,
    pub homeworks: Vec<HomeworkRecord>,
}

/// A single homework entry with the fields the bot reads
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HomeworkRecord {
    pub homework_name: String,
    pub status: String,
}

/// JSON type name used in validation messages
fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(n) if n.is_f64() => "float",
        Value::Number(n) if n.is_u64() && !n.is_i64() => "integer out of range",
        Value::Number(_) => "integer",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn schema_error(field: &str, value: Option<&Value>) -> crate::BotError {
    match value {
        Some(value) => {
            crate::BotError::Schema(format!("{}: {} = `{}`", field, type_name(value), value))
        }
        None => crate::BotError::Schema(format!("{}: отсутствует", field)),
    }
}

/// Validate a decoded payload and narrow it to an [`ApiResponse`]
pub fn check_response(payload: &Value) -> crate::Result<ApiResponse> {
    tracing::debug!("Validating homework API response");

    let object = payload
        .as_object()
        .ok_or_else(|| schema_error("response", Some(payload)))?;

    let current_date = object.get("current_date");
    let current_date = current_date
        .and_then(Value::as_i64)
        .ok_or_else(|| schema_error("current_date", current_date))?;

    let homeworks = object.get("homeworks");
    let entries = homeworks
        .and_then(Value::as_array)
        .ok_or_else(|| schema_error("homeworks", homeworks))?;

    let homeworks = entries
        .iter()
        .enumerate()
        .map(|(index, entry)| check_homework(index, entry))
        .collect::<crate::Result<Vec<_>>>()?;

    tracing::debug!(
        "Homework API response is valid: current_date={}, homeworks={}",
        current_date,
        homeworks.len()
    );

    Ok(ApiResponse {
        current_date,
        homeworks,
    })
}

fn check_homework(index: usize, entry: &Value) -> crate::Result<HomeworkRecord> {
    let object = entry
        .as_object()
        .ok_or_else(|| schema_error(&format!("homeworks[{}]", index), Some(entry)))?;

    let field = |name: &str| -> crate::Result<String> {
        let value = object.get(name);
        match value.and_then(Value::as_str) {
            Some(s) if !s.is_empty() => Ok(s.to_string()),
            _ => Err(schema_error(&format!("homeworks[{}].{}", index, name), value)),
        }
    };

    Ok(HomeworkRecord {
        homework_name: field("homework_name")?,
        status: field("status")?,
    })
}
