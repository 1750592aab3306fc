use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use reviewbot_common::config::AppConfig;
use reviewbot_common::error::{BotError, Result};

use crate::NotificationSink;

/// `sendMessage` request body.
#[derive(Debug, Serialize)]
struct SendMessage<'a> {
    chat_id: &'a str,
    text: &'a str,
}

/// Envelope every Bot API response is wrapped in.
#[derive(Debug, Deserialize)]
struct BotApiResponse {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
}

/// Sends messages to one chat through the Telegram Bot API.
pub struct TelegramSink {
    client: reqwest::Client,
    api_url: String,
    token: String,
    chat_id: String,
}

impl TelegramSink {
    pub fn new(
        api_url: impl Into<String>,
        token: impl Into<String>,
        chat_id: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| BotError::Config(format!("failed to build Telegram client: {}", e)))?;

        Ok(Self {
            client,
            api_url: api_url.into(),
            token: token.into(),
            chat_id: chat_id.into(),
        })
    }

    pub fn from_config(config: &AppConfig) -> Result<Self> {
        Self::new(
            config.telegram_api_url.clone(),
            config.telegram_token.clone(),
            config.telegram_chat_id.clone(),
            Duration::from_secs(config.http_timeout_secs),
        )
    }

    fn send_message_url(&self) -> String {
        format!(
            "{}/bot{}/sendMessage",
            self.api_url.trim_end_matches('/'),
            self.token
        )
    }
}

#[async_trait]
impl NotificationSink for TelegramSink {
    async fn send(&self, text: &str) -> Result<()> {
        let body = SendMessage {
            chat_id: &self.chat_id,
            text,
        };

        // The request URL embeds the bot token, keep it out of error messages
        let response = self
            .client
            .post(self.send_message_url())
            .json(&body)
            .send()
            .await
            .map_err(|e| BotError::NotificationDelivery(e.without_url().to_string()))?;

        let status = response.status();
        let reply = response.json::<BotApiResponse>().await.ok();

        if !status.is_success() {
            let description = reply.and_then(|r| r.description).unwrap_or_default();
            return Err(BotError::NotificationDelivery(format!(
                "Telegram returned {}: {}",
                status, description
            )));
        }

        match reply {
            Some(BotApiResponse { ok: true, .. }) => {
                tracing::info!(chat_id = %self.chat_id, "Message delivered");
                Ok(())
            }
            Some(BotApiResponse { description, .. }) => Err(BotError::NotificationDelivery(
                format!("Telegram rejected the message: {}", description.unwrap_or_default()),
            )),
            None => Err(BotError::NotificationDelivery(
                "unreadable Telegram response".to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::extract::State;
    use axum::http::StatusCode;
    use axum::routing::post;
    use axum::{Json, Router};
    use serde_json::{Value, json};

    use super::*;

    type Captured = Arc<Mutex<Vec<Value>>>;

    async fn spawn_server(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn sink(api_url: &str) -> TelegramSink {
        TelegramSink::new(api_url, "test-token", "42", Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_send_posts_chat_and_text() {
        let captured: Captured = Arc::default();
        let app = Router::new()
            .route(
                "/bottest-token/sendMessage",
                post(|State(captured): State<Captured>, Json(body): Json<Value>| async move {
                    captured.lock().unwrap().push(body);
                    Json(json!({"ok": true, "result": {"message_id": 1}}))
                }),
            )
            .with_state(captured.clone());
        let url = spawn_server(app).await;

        sink(&url).send("hello").await.unwrap();

        let bodies = captured.lock().unwrap();
        assert_eq!(bodies.len(), 1);
        assert_eq!(bodies[0], json!({"chat_id": "42", "text": "hello"}));
    }

    #[tokio::test]
    async fn test_trailing_slash_in_api_url() {
        let app = Router::new().route(
            "/bottest-token/sendMessage",
            post(|| async { Json(json!({"ok": true})) }),
        );
        let url = spawn_server(app).await;

        sink(&format!("{}/", url)).send("hello").await.unwrap();
    }

    #[tokio::test]
    async fn test_error_status_is_delivery_failure() {
        let app = Router::new().route(
            "/bottest-token/sendMessage",
            post(|| async {
                (
                    StatusCode::BAD_REQUEST,
                    Json(json!({"ok": false, "description": "Bad Request: chat not found"})),
                )
            }),
        );
        let url = spawn_server(app).await;

        let err = sink(&url).send("hello").await.unwrap_err();
        match err {
            BotError::NotificationDelivery(msg) => assert!(msg.contains("chat not found")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_ok_false_is_delivery_failure() {
        let app = Router::new().route(
            "/bottest-token/sendMessage",
            post(|| async { Json(json!({"ok": false, "description": "Forbidden"})) }),
        );
        let url = spawn_server(app).await;

        let err = sink(&url).send("hello").await.unwrap_err();
        assert!(matches!(err, BotError::NotificationDelivery(_)));
    }

    #[tokio::test]
    async fn test_unreachable_server_hides_token() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = sink(&format!("http://{}", addr)).send("hello").await.unwrap_err();
        match err {
            BotError::NotificationDelivery(msg) => assert!(!msg.contains("test-token")),
            other => panic!("unexpected error: {other}"),
        }
    }
}
