//! Status translator — renders a homework record as a chat message.

use reviewbot_common::error::{BotError, Result};
use reviewbot_common::types::{HomeworkRecord, HomeworkStatus};

/// Build the status-change message for a homework record.
///
/// Fails with `MissingField` when the name or status is absent or empty and
/// with `UndocumentedStatus` for codes outside the known set.
pub fn translate(record: &HomeworkRecord) -> Result<String> {
    let name = non_empty(record.homework_name.as_deref())
        .ok_or_else(|| BotError::MissingField("homework_name".to_string()))?;

    let code = non_empty(record.status.as_deref())
        .ok_or_else(|| BotError::MissingField("status".to_string()))?;

    let status = HomeworkStatus::from_code(code)
        .ok_or_else(|| BotError::UndocumentedStatus(code.to_string()))?;

    Ok(format!(
        "Changed review status of \"{}\". {}",
        name,
        status.verdict()
    ))
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
