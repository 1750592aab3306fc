use serde::Deserialize;

/// Review status codes documented by the homework API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HomeworkStatus {
    Approved,
    Reviewing,
    Rejected,
}

impl HomeworkStatus {
    /// Parse a raw status code. Unknown codes yield `None`.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "approved" => Some(HomeworkStatus::Approved),
            "reviewing" => Some(HomeworkStatus::Reviewing),
            "rejected" => Some(HomeworkStatus::Rejected),
            _ => None,
        }
    }

    /// Human-readable verdict sent to the chat.
    pub fn verdict(&self) -> &'static str {
        match self {
            HomeworkStatus::Approved => "Работа проверена: ревьюеру всё понравилось. Ура!",
            HomeworkStatus::Reviewing => "Работа взята на проверку ревьюером.",
            HomeworkStatus::Rejected => "Работа проверена: у ревьюера есть замечания.",
        }
    }
}

impl std::fmt::Display for HomeworkStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HomeworkStatus::Approved => write!(f, "approved"),
            HomeworkStatus::Reviewing => write!(f, "reviewing"),
            HomeworkStatus::Rejected => write!(f, "rejected"),
        }
    }
}

/// A single homework entry as returned by the API.
///
/// Both fields are optional at this layer: presence is checked when the
/// record is translated, so an incomplete entry is reported instead of
/// silently dropped.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct HomeworkRecord {
    #[serde(default)]
    pub homework_name: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    /// Fields the bot does not interpret (`id`, `reviewer_comment`, ...).
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl HomeworkRecord {
    pub fn new(homework_name: impl Into<String>, status: impl Into<String>) -> Self {
        Self {
            homework_name: Some(homework_name.into()),
            status: Some(status.into()),
            extra: serde_json::Map::new(),
        }
    }
}
