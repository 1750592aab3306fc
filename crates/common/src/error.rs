use thiserror::Error;

/// Errors raised while polling the review endpoint or delivering notifications.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BotError {
    #[error("Endpoint unavailable: {0}")]
    EndpointUnavailable(String),

    #[error("Empty response from the review API")]
    EmptyResponse,

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Missing field: {0}")]
    MissingField(String),

    #[error("Undocumented homework status: {0}")]
    UndocumentedStatus(String),

    #[error("Notification delivery failed: {0}")]
    NotificationDelivery(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Failure category used to de-duplicate operator notifications.
///
/// Two errors of the same kind are considered repeats regardless of
/// the message text they carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    EndpointUnavailable,
    EmptyResponse,
    MalformedResponse,
    MissingField,
    UndocumentedStatus,
    NotificationDelivery,
    Config,
}

impl BotError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            BotError::EndpointUnavailable(_) => ErrorKind::EndpointUnavailable,
            BotError::EmptyResponse => ErrorKind::EmptyResponse,
            BotError::MalformedResponse(_) => ErrorKind::MalformedResponse,
            BotError::MissingField(_) => ErrorKind::MissingField,
            BotError::UndocumentedStatus(_) => ErrorKind::UndocumentedStatus,
            BotError::NotificationDelivery(_) => ErrorKind::NotificationDelivery,
            BotError::Config(_) => ErrorKind::Config,
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::EndpointUnavailable => write!(f, "endpoint_unavailable"),
            ErrorKind::EmptyResponse => write!(f, "empty_response"),
            ErrorKind::MalformedResponse => write!(f, "malformed_response"),
            ErrorKind::MissingField => write!(f, "missing_field"),
            ErrorKind::UndocumentedStatus => write!(f, "undocumented_status"),
            ErrorKind::NotificationDelivery => write!(f, "notification_delivery"),
            ErrorKind::Config => write!(f, "config"),
        }
    }
}

/// Result alias for fallible bot operations.
pub type Result<T> = std::result::Result<T, BotError>;
