//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::ServerConfig;
use crate::services::{
    AssistantClient, AssistantError, FallbackLog, MailDispatcher, MailTransport, SmtpMailer,
};

/// Error building application state.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("SMTP transport error: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),
    #[error("Assistant client error: {0}")]
    Assistant(#[from] AssistantError),
}

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc`. It is built once from an
/// immutable [`ServerConfig`] and carries no mutable state.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ServerConfig,
    dispatcher: MailDispatcher,
    assistant: Option<AssistantClient>,
}

impl AppState {
    /// Create application state that sends mail over SMTP.
    ///
    /// # Errors
    ///
    /// Returns an error if the SMTP transport or the assistant client cannot
    /// be built.
    pub fn new(config: ServerConfig) -> Result<Self, StateError> {
        let transport = Arc::new(SmtpMailer::new(&config.email)?);
        Self::with_transport(config, transport)
    }

    /// Create application state with a custom mail transport.
    ///
    /// # Errors
    ///
    /// Returns an error if the assistant client cannot be built.
    pub fn with_transport(
        config: ServerConfig,
        transport: Arc<dyn MailTransport>,
    ) -> Result<Self, StateError> {
        let dispatcher = MailDispatcher::new(
            transport,
            config.contact.clone(),
            FallbackLog::new(config.fallback_log_path.clone()),
        );
        let assistant = config
            .assistant
            .as_ref()
            .map(AssistantClient::new)
            .transpose()?;

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                dispatcher,
                assistant,
            }),
        })
    }

    /// Get a reference to the server configuration.
    #[must_use]
    pub fn config(&self) -> &ServerConfig {
        &self.inner.config
    }

    /// Get a reference to the contact submission dispatcher.
    #[must_use]
    pub fn dispatcher(&self) -> &MailDispatcher {
        &self.inner.dispatcher
    }

    /// Get the chat service client, if configured.
    #[must_use]
    pub fn assistant(&self) -> Option<&AssistantClient> {
        self.inner.assistant.as_ref()
    }
}
