//! Client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! - `CHATBOT_API_URL` - Chat service base URL (default: <http://localhost:8000>)
//! - `EMAIL_API_URL` - Contact relay base URL (default: <http://localhost:5000>)
//! - `CHAT_TIMEOUT_SECS` - Chat request timeout in seconds (default: 30)

use std::time::Duration;

use thiserror::Error;
use url::Url;

pub const DEFAULT_CHATBOT_API_URL: &str = "http://localhost:8000";
pub const DEFAULT_EMAIL_API_URL: &str = "http://localhost:5000";
pub const DEFAULT_CHAT_TIMEOUT: Duration = Duration::from_secs(30);

/// Lookup function for configuration values.
pub type EnvLookup<'a> = &'a dyn Fn(&str) -> Option<String>;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Where the client-side components send their requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Chat service base URL, without trailing slash
    pub chatbot_api_url: String,
    /// Contact relay base URL, without trailing slash
    pub email_api_url: String,
    /// Cancellation timeout for one chat request
    pub chat_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            chatbot_api_url: DEFAULT_CHATBOT_API_URL.to_string(),
            email_api_url: DEFAULT_EMAIL_API_URL.to_string(),
            chat_timeout: DEFAULT_CHAT_TIMEOUT,
        }
    }
}

impl ClientConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a URL or the timeout is malformed.
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();

        Self::from_lookup(&|key: &str| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key/value source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a URL or the timeout is malformed.
    pub fn from_lookup(env: EnvLookup<'_>) -> Result<Self, ConfigError> {
        let chatbot_api_url = base_url(env, "CHATBOT_API_URL", DEFAULT_CHATBOT_API_URL)?;
        let email_api_url = base_url(env, "EMAIL_API_URL", DEFAULT_EMAIL_API_URL)?;
        let chat_timeout = match env("CHAT_TIMEOUT_SECS") {
            Some(raw) if !raw.trim().is_empty() => raw
                .trim()
                .parse::<u64>()
                .map(Duration::from_secs)
                .map_err(|e| {
                    ConfigError::InvalidEnvVar("CHAT_TIMEOUT_SECS".to_string(), e.to_string())
                })?,
            _ => DEFAULT_CHAT_TIMEOUT,
        };

        Ok(Self {
            chatbot_api_url,
            email_api_url,
            chat_timeout,
        })
    }

    /// URL the chat widget posts questions to.
    #[must_use]
    pub fn chat_endpoint(&self) -> String {
        format!("{}/chat", self.chatbot_api_url)
    }

    /// URL the contact form posts submissions to.
    #[must_use]
    pub fn contact_endpoint(&self) -> String {
        format!("{}/api/save-message", self.email_api_url)
    }
}

/// Normalize a configured base URL.
///
/// Unset, blank, or the literal string `undefined` (what a bundler injects
/// for a missing variable) fall back to `fallback`. Trailing slashes are
/// removed.
#[must_use]
pub fn normalize_base_url(raw: Option<&str>, fallback: &str) -> String {
    match raw.map(str::trim) {
        None | Some("" | "undefined") => fallback.to_string(),
        Some(url) => url.trim_end_matches('/').to_string(),
    }
}

fn base_url(env: EnvLookup<'_>, key: &str, fallback: &str) -> Result<String, ConfigError> {
    let url = normalize_base_url(env(key).as_deref(), fallback);
    Url::parse(&url).map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))?;
    Ok(url)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(pairs: &[(&str, &str)]) -> Result<ClientConfig, ConfigError> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        ClientConfig::from_lookup(&move |key: &str| map.get(key).cloned())
    }

    #[test]
    fn test_normalize_base_url() {
        assert_eq!(normalize_base_url(None, "http://x"), "http://x");
        assert_eq!(normalize_base_url(Some(""), "http://x"), "http://x");
        assert_eq!(normalize_base_url(Some("undefined"), "http://x"), "http://x");
        assert_eq!(
            normalize_base_url(Some("https://api.example.com///"), "http://x"),
            "https://api.example.com"
        );
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.chat_endpoint(), "http://localhost:8000/chat");
        assert_eq!(
            config.contact_endpoint(),
            "http://localhost:5000/api/save-message"
        );
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("CHATBOT_API_URL", "https://chat.example.com/"),
            ("EMAIL_API_URL", "https://mail.example.com"),
            ("CHAT_TIMEOUT_SECS", "5"),
        ])
        .unwrap();

        assert_eq!(config.chat_endpoint(), "https://chat.example.com/chat");
        assert_eq!(
            config.contact_endpoint(),
            "https://mail.example.com/api/save-message"
        );
        assert_eq!(config.chat_timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_invalid_values() {
        assert!(load(&[("CHATBOT_API_URL", "not a url")]).is_err());
        assert!(load(&[("CHAT_TIMEOUT_SECS", "soon")]).is_err());
    }
}
