use serde::Deserialize;

const DEFAULT_PRACTICUM_ENDPOINT: &str =
    "https://practicum.yandex.ru/api/user_api/homework_statuses/";
const DEFAULT_TELEGRAM_API_URL: &str = "https://api.telegram.org";

/// Global application configuration loaded from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// OAuth token for the Practicum homework API
    pub practicum_token: String,

    /// Homework statuses endpoint
    pub practicum_endpoint: String,

    /// Telegram bot token
    pub telegram_token: String,

    /// Chat that receives status and failure messages
    pub telegram_chat_id: String,

    /// Telegram Bot API base URL
    pub telegram_api_url: String,

    /// Fixed delay between polling cycles in seconds (default: 600)
    pub retry_interval_secs: u64,

    /// Per-request HTTP timeout in seconds (default: 30)
    pub http_timeout_secs: u64,

    /// Initial `from_date` cursor (default: 0, full history)
    pub start_from_date: i64,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// Required variables that are absent or empty are all reported together.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let practicum_token = get("PRACTICUM_TOKEN");
        let telegram_token = get("TELEGRAM_TOKEN");
        let telegram_chat_id = get("TELEGRAM_CHAT_ID");

        let missing: Vec<&str> = [
            ("PRACTICUM_TOKEN", practicum_token.is_none()),
            ("TELEGRAM_TOKEN", telegram_token.is_none()),
            ("TELEGRAM_CHAT_ID", telegram_chat_id.is_none()),
        ]
        .into_iter()
        .filter_map(|(name, absent)| absent.then_some(name))
        .collect();

        let (Some(practicum_token), Some(telegram_token), Some(telegram_chat_id)) =
            (practicum_token, telegram_token, telegram_chat_id)
        else {
            return Err(anyhow::anyhow!(
                "Required environment variables are missing: {}",
                missing.join(", ")
            ));
        };

        Ok(Self {
            practicum_token,
            practicum_endpoint: get("PRACTICUM_ENDPOINT")
                .unwrap_or_else(|| DEFAULT_PRACTICUM_ENDPOINT.to_string()),
            telegram_token,
            telegram_chat_id,
            telegram_api_url: get("TELEGRAM_API_URL")
                .unwrap_or_else(|| DEFAULT_TELEGRAM_API_URL.to_string()),
            retry_interval_secs: get("RETRY_INTERVAL_SECS")
                .unwrap_or_else(|| "600".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("RETRY_INTERVAL_SECS must be a valid u64"))?,
            http_timeout_secs: get("HTTP_TIMEOUT_SECS")
                .unwrap_or_else(|| "30".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("HTTP_TIMEOUT_SECS must be a valid u64"))?,
            start_from_date: get("START_FROM_DATE")
                .unwrap_or_else(|| "0".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("START_FROM_DATE must be a valid i64"))?,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_required_only_applies_defaults() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("PRACTICUM_TOKEN", "p-token"),
            ("TELEGRAM_TOKEN", "t-token"),
            ("TELEGRAM_CHAT_ID", "12345"),
        ]))
        .unwrap();

        assert_eq!(config.practicum_token, "p-token");
        assert_eq!(config.telegram_chat_id, "12345");
        assert_eq!(config.practicum_endpoint, DEFAULT_PRACTICUM_ENDPOINT);
        assert_eq!(config.telegram_api_url, DEFAULT_TELEGRAM_API_URL);
        assert_eq!(config.retry_interval_secs, 600);
        assert_eq!(config.http_timeout_secs, 30);
        assert_eq!(config.start_from_date, 0);
    }

    #[test]
    fn test_missing_variables_are_named() {
        let err = AppConfig::from_lookup(lookup_from(&[("TELEGRAM_TOKEN", "t-token")]))
            .unwrap_err()
            .to_string();

        assert_eq!(
            err,
            "Required environment variables are missing: PRACTICUM_TOKEN, TELEGRAM_CHAT_ID"
        );
    }

    #[test]
    fn test_empty_value_counts_as_missing() {
        let err = AppConfig::from_lookup(lookup_from(&[
            ("PRACTICUM_TOKEN", "p-token"),
            ("TELEGRAM_TOKEN", "   "),
            ("TELEGRAM_CHAT_ID", "12345"),
        ]))
        .unwrap_err();

        assert!(err.to_string().contains("TELEGRAM_TOKEN"));
    }

    #[test]
    fn test_invalid_interval_rejected() {
        let err = AppConfig::from_lookup(lookup_from(&[
            ("PRACTICUM_TOKEN", "p-token"),
            ("TELEGRAM_TOKEN", "t-token"),
            ("TELEGRAM_CHAT_ID", "12345"),
            ("RETRY_INTERVAL_SECS", "ten minutes"),
        ]))
        .unwrap_err();

        assert!(err.to_string().contains("RETRY_INTERVAL_SECS"));
    }

    #[test]
    fn test_overrides() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("PRACTICUM_TOKEN", "p-token"),
            ("TELEGRAM_TOKEN", "t-token"),
            ("TELEGRAM_CHAT_ID", "12345"),
            ("PRACTICUM_ENDPOINT", "http://127.0.0.1:8080/statuses/"),
            ("RETRY_INTERVAL_SECS", "5"),
            ("START_FROM_DATE", "1700000000"),
        ]))
        .unwrap();

        assert_eq!(config.practicum_endpoint, "http://127.0.0.1:8080/statuses/");
        assert_eq!(config.retry_interval_secs, 5);
        assert_eq!(config.start_from_date, 1_700_000_000);
    }
}
