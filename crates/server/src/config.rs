//! Server configuration loaded from environment variables.
//!
//! The configuration is read once at start-up into an immutable
//! [`ServerConfig`] which is then handed to [`crate::state::AppState`].
//! Nothing reads the environment after that.
//!
//! # Environment Variables
//!
//! ## Required
//! - `MAIL_FROM` - Sender address, only when `SMTP_USERNAME` is not set
//!
//! ## Optional
//! - `HOST` - Bind address (default: 0.0.0.0)
//! - `PORT` - Listen port (default: 5000)
//! - `FRONTEND_URL` - Extra allowed CORS origin(s), comma separated
//! - `ALLOW_ALL_ORIGINS` - `1` or `true` to accept any origin (no credentials)
//! - `SMTP_HOST` - SMTP relay (default: smtp.gmail.com)
//! - `SMTP_PORT` - SMTP port (default: 587)
//! - `SMTP_USERNAME` / `GMAIL_USER` - SMTP login
//! - `SMTP_PASSWORD` / `GMAIL_APP_PASSWORD` - SMTP password
//! - `MAIL_FROM` - Sender address (default: `SMTP_USERNAME`)
//! - `CONTACT_ADMIN_EMAIL` - Recipient of new-submission notifications (default: `MAIL_FROM`)
//! - `SITE_OWNER_NAME` - Signature in acknowledgment emails (default: Portfolio)
//! - `SITE_OWNER_TITLE` - Title line under the signature
//! - `SITE_OWNER_PHONE` - Phone number offered for urgent matters
//! - `FALLBACK_LOG_PATH` - Where undeliverable submissions are appended (default: messages.txt)
//! - `GEMINI_API_KEY` - Enables the `/chat` service
//! - `GEMINI_MODEL` - Model for the chat service (default: gemini-2.5-flash)
//! - `GEMINI_API_BASE` - Gemini models endpoint (default: the public v1beta API)
//! - `ASSISTANT_SYSTEM_PROMPT_FILE` - File holding the chat system prompt
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` / `SENTRY_TRACES_SAMPLE_RATE` - Sentry sampling (default: 1.0)

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use secrecy::SecretString;
use thiserror::Error;
use url::Url;

/// Origins accepted in addition to `FRONTEND_URL`.
pub const DEFAULT_ALLOWED_ORIGINS: &[&str] = &[
    "http://localhost:5173",
    "http://127.0.0.1:5173",
    "http://localhost:3000",
    "http://127.0.0.1:3000",
];

const DEFAULT_SMTP_HOST: &str = "smtp.gmail.com";
const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";
const DEFAULT_GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Lookup function for configuration values.
///
/// Production passes the process environment; tests pass a map.
pub type EnvLookup<'a> = &'a dyn Fn(&str) -> Option<String>;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Failed to read {0}: {1}")]
    ReadFile(String, std::io::Error),
}

/// Server application configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Cross-origin policy
    pub cors: CorsConfig,
    /// SMTP configuration
    pub email: EmailConfig,
    /// Contact form recipients and acknowledgment signature
    pub contact: ContactConfig,
    /// Append-only sink for submissions whose emails failed
    pub fallback_log_path: PathBuf,
    /// Chat service configuration (optional - enables `/chat`)
    pub assistant: Option<AssistantConfig>,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g., "development", "production")
    pub sentry_environment: Option<String>,
    /// Sentry error sample rate (0.0 to 1.0)
    pub sentry_sample_rate: f32,
    /// Sentry traces sample rate for performance monitoring (0.0 to 1.0)
    pub sentry_traces_sample_rate: f32,
}

/// Cross-origin resource sharing policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorsConfig {
    /// Exact origins allowed when `allow_any_origin` is off
    pub allowed_origins: Vec<String>,
    /// Accept every origin; credentials are then never allowed
    pub allow_any_origin: bool,
}

/// SMTP configuration.
///
/// Implements `Debug` manually to redact the password.
#[derive(Clone)]
pub struct EmailConfig {
    /// SMTP server hostname
    pub smtp_host: String,
    /// SMTP server port
    pub smtp_port: u16,
    /// SMTP authentication username
    pub smtp_username: Option<String>,
    /// SMTP authentication password
    pub smtp_password: Option<SecretString>,
    /// Email sender address (From header)
    pub from_address: String,
}

impl std::fmt::Debug for EmailConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmailConfig")
            .field("smtp_host", &self.smtp_host)
            .field("smtp_port", &self.smtp_port)
            .field("smtp_username", &self.smtp_username)
            .field(
                "smtp_password",
                &self.smtp_password.as_ref().map(|_| "[REDACTED]"),
            )
            .field("from_address", &self.from_address)
            .finish()
    }
}

/// Contact form addressing and signature details.
#[derive(Debug, Clone)]
pub struct ContactConfig {
    /// Fixed recipient of new-submission notifications
    pub admin_address: String,
    /// Name signed under acknowledgment emails
    pub owner_name: String,
    /// Optional title line under the name
    pub owner_title: Option<String>,
    /// Optional phone number offered for urgent matters
    pub owner_phone: Option<String>,
}

/// Chat service configuration.
///
/// Implements `Debug` manually to redact the API key.
#[derive(Clone)]
pub struct AssistantConfig {
    /// Gemini API key
    pub api_key: SecretString,
    /// Model ID (e.g., gemini-2.5-flash)
    pub model: String,
    /// Models endpoint, without trailing slash
    pub api_base: String,
    /// System prompt from `ASSISTANT_SYSTEM_PROMPT_FILE`, if set
    pub system_prompt: Option<String>,
}

impl std::fmt::Debug for AssistantConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AssistantConfig")
            .field("api_key", &"[REDACTED]")
            .field("model", &self.model)
            .field("api_base", &self.api_base)
            .field("system_prompt", &self.system_prompt.as_ref().map(String::len))
            .finish()
    }
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(&|key: &str| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key/value source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_lookup(env: EnvLookup<'_>) -> Result<Self, ConfigError> {
        let host = get_env_or_default(env, "HOST", "0.0.0.0")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default(env, "PORT", "5000")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("PORT".to_string(), e.to_string()))?;

        let cors = CorsConfig::from_lookup(env)?;
        let email = EmailConfig::from_lookup(env)?;
        let contact = ContactConfig::from_lookup(env, &email.from_address);
        let fallback_log_path =
            PathBuf::from(get_env_or_default(env, "FALLBACK_LOG_PATH", "messages.txt"));
        let assistant = AssistantConfig::from_lookup(env)?;

        let sentry_dsn = get_optional_env(env, "SENTRY_DSN");
        let sentry_environment = get_optional_env(env, "SENTRY_ENVIRONMENT");
        let sentry_sample_rate = get_optional_env(env, "SENTRY_SAMPLE_RATE")
            .and_then(|s| s.parse().ok())
            .unwrap_or(1.0);
        let sentry_traces_sample_rate = get_optional_env(env, "SENTRY_TRACES_SAMPLE_RATE")
            .and_then(|s| s.parse().ok())
            .unwrap_or(1.0);

        Ok(Self {
            host,
            port,
            cors,
            email,
            contact,
            fallback_log_path,
            assistant,
            sentry_dsn,
            sentry_environment,
            sentry_sample_rate,
            sentry_traces_sample_rate,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl CorsConfig {
    fn from_lookup(env: EnvLookup<'_>) -> Result<Self, ConfigError> {
        let mut allowed_origins: Vec<String> = DEFAULT_ALLOWED_ORIGINS
            .iter()
            .map(ToString::to_string)
            .collect();

        if let Some(frontend) = get_optional_env(env, "FRONTEND_URL") {
            for origin in parse_origins(&frontend)? {
                if !allowed_origins.contains(&origin) {
                    allowed_origins.push(origin);
                }
            }
        }

        let allow_any_origin = get_optional_env(env, "ALLOW_ALL_ORIGINS")
            .is_some_and(|v| is_truthy(&v));

        Ok(Self {
            allowed_origins,
            allow_any_origin,
        })
    }
}

impl EmailConfig {
    fn from_lookup(env: EnvLookup<'_>) -> Result<Self, ConfigError> {
        let smtp_port = get_env_or_default(env, "SMTP_PORT", "587")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("SMTP_PORT".to_string(), e.to_string()))?;
        let smtp_username = get_optional_env(env, "SMTP_USERNAME")
            .or_else(|| get_optional_env(env, "GMAIL_USER"));
        let smtp_password = get_optional_env(env, "SMTP_PASSWORD")
            .or_else(|| get_optional_env(env, "GMAIL_APP_PASSWORD"))
            .map(SecretString::from);
        let from_address = get_optional_env(env, "MAIL_FROM")
            .or_else(|| smtp_username.clone())
            .ok_or_else(|| ConfigError::MissingEnvVar("MAIL_FROM".to_string()))?;

        Ok(Self {
            smtp_host: get_env_or_default(env, "SMTP_HOST", DEFAULT_SMTP_HOST),
            smtp_port,
            smtp_username,
            smtp_password,
            from_address,
        })
    }

    /// Returns `true` when both a username and a password are configured.
    #[must_use]
    pub const fn has_credentials(&self) -> bool {
        self.smtp_username.is_some() && self.smtp_password.is_some()
    }
}

impl ContactConfig {
    fn from_lookup(env: EnvLookup<'_>, from_address: &str) -> Self {
        Self {
            admin_address: get_optional_env(env, "CONTACT_ADMIN_EMAIL")
                .unwrap_or_else(|| from_address.to_string()),
            owner_name: get_env_or_default(env, "SITE_OWNER_NAME", "Portfolio"),
            owner_title: get_optional_env(env, "SITE_OWNER_TITLE"),
            owner_phone: get_optional_env(env, "SITE_OWNER_PHONE"),
        }
    }
}

impl AssistantConfig {
    fn from_lookup(env: EnvLookup<'_>) -> Result<Option<Self>, ConfigError> {
        let Some(api_key) = get_optional_env(env, "GEMINI_API_KEY") else {
            return Ok(None);
        };

        let system_prompt = match get_optional_env(env, "ASSISTANT_SYSTEM_PROMPT_FILE") {
            Some(path) => Some(
                std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadFile(path, e))?,
            ),
            None => None,
        };

        let api_base = get_env_or_default(env, "GEMINI_API_BASE", DEFAULT_GEMINI_API_BASE)
            .trim_end_matches('/')
            .to_string();
        Url::parse(&api_base)
            .map_err(|e| ConfigError::InvalidEnvVar("GEMINI_API_BASE".to_string(), e.to_string()))?;

        Ok(Some(Self {
            api_key: SecretString::from(api_key),
            model: get_env_or_default(env, "GEMINI_MODEL", DEFAULT_GEMINI_MODEL),
            api_base,
            system_prompt,
        }))
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional environment variable, treating blank values as unset.
fn get_optional_env(env: EnvLookup<'_>, key: &str) -> Option<String> {
    env(key).filter(|v| !v.trim().is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(env: EnvLookup<'_>, key: &str, default: &str) -> String {
    get_optional_env(env, key).unwrap_or_else(|| default.to_string())
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes"
    )
}

/// Parse a comma separated list of origins, dropping trailing slashes.
fn parse_origins(raw: &str) -> Result<Vec<String>, ConfigError> {
    raw.split(',')
        .map(|s| s.trim().trim_end_matches('/'))
        .filter(|s| !s.is_empty())
        .map(|origin| {
            let url = Url::parse(origin).map_err(|e| {
                ConfigError::InvalidEnvVar("FRONTEND_URL".to_string(), format!("{origin}: {e}"))
            })?;
            if url.host_str().is_none() {
                return Err(ConfigError::InvalidEnvVar(
                    "FRONTEND_URL".to_string(),
                    format!("{origin}: missing host"),
                ));
            }
            Ok(origin.to_string())
        })
        .collect()
}
