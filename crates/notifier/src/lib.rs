//! Notification delivery.
//!
//! The poller talks to a `NotificationSink`; `TelegramSink` delivers through
//! the Telegram Bot API.

mod telegram;

use async_trait::async_trait;

use reviewbot_common::error::Result;

pub use telegram::TelegramSink;

/// Delivers plain-text messages to a single chat.
#[async_trait]
pub trait NotificationSink: Send + Sync {
    /// Send one message. Failures are returned as `BotError::NotificationDelivery`.
    async fn send(&self, text: &str) -> Result<()>;
}
