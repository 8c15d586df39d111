//! Chat widget state machine and chat service client.
//!
//! The widget never returns errors to its caller. Every send that passes the
//! empty-input gate ends with exactly one bot message in the transcript,
//! whether the service answered, failed, timed out or could not be reached.

use std::time::Duration;

use async_trait::async_trait;
use folio_core::ChatMessage;
use serde::Serialize;
use tracing::instrument;

use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::response::ResponseBody;

/// Bot text when a request exceeds the timeout.
pub const TIMEOUT_MESSAGE: &str = "Request timed out. Try again.";

/// Bot text when the service cannot be reached.
pub const CONNECTIVITY_MESSAGE: &str = "Error connecting to chatbot backend.";

/// Result of one request to the chat service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatOutcome {
    /// 2xx response; the extracted answer text.
    Reply(String),
    /// Non-2xx response and the detail extracted from its body.
    ServerError { status: u16, detail: String },
    /// The request was cancelled by the timeout.
    TimedOut,
    /// Any other transport failure.
    Unreachable(String),
}

impl ChatOutcome {
    /// Text of the bot message this outcome produces.
    #[must_use]
    pub fn into_message_text(self) -> String {
        match self {
            Self::Reply(text) => text,
            Self::ServerError { detail, .. } => detail,
            Self::TimedOut => TIMEOUT_MESSAGE.to_string(),
            Self::Unreachable(_) => CONNECTIVITY_MESSAGE.to_string(),
        }
    }
}

/// Something that can answer a chat query.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    async fn ask(&self, query: &str) -> ChatOutcome;
}

#[derive(Serialize)]
struct ChatQuery<'a> {
    query: &'a str,
}

/// HTTP client for `POST {base}/chat`.
#[derive(Debug, Clone)]
pub struct ChatClient {
    client: reqwest::Client,
    endpoint: String,
    timeout: Duration,
}

impl ChatClient {
    /// Create a client for the configured chat service.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        Ok(Self {
            client: reqwest::Client::builder().build()?,
            endpoint: config.chat_endpoint(),
            timeout: config.chat_timeout,
        })
    }

    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ChatBackend for ChatClient {
    #[instrument(skip(self, query), fields(endpoint = %self.endpoint))]
    async fn ask(&self, query: &str) -> ChatOutcome {
        let exchange = async {
            let response = self
                .client
                .post(&self.endpoint)
                .json(&ChatQuery { query })
                .send()
                .await?;
            let status = response.status();
            let body = response.text().await?;
            Ok::<_, reqwest::Error>((status, body))
        };

        match tokio::time::timeout(self.timeout, exchange).await {
            Err(_) => {
                tracing::warn!(timeout = ?self.timeout, "Chat request timed out");
                ChatOutcome::TimedOut
            }
            Ok(Err(e)) if e.is_timeout() => ChatOutcome::TimedOut,
            Ok(Err(e)) => {
                tracing::warn!(error = %e, "Chat service unreachable");
                ChatOutcome::Unreachable(e.to_string())
            }
            Ok(Ok((status, raw))) => {
                let body = ResponseBody::parse(&raw);
                if status.is_success() {
                    ChatOutcome::Reply(body.answer_text())
                } else {
                    tracing::warn!(status = %status, "Chat service returned an error");
                    ChatOutcome::ServerError {
                        status: status.as_u16(),
                        detail: body.error_detail(status.as_u16()),
                    }
                }
            }
        }
    }
}

/// State of the floating chat window.
#[derive(Debug, Clone, Default)]
pub struct ChatWidget {
    open: bool,
    transcript: Vec<ChatMessage>,
    pending: bool,
    input: String,
}

impl ChatWidget {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn toggle(&mut self) {
        self.open = !self.open;
    }

    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.open
    }

    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.pending
    }

    #[must_use]
    pub fn transcript(&self) -> &[ChatMessage] {
        &self.transcript
    }

    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    /// Start sending the current input.
    ///
    /// Returns the query to send, or `None` if the input is blank or a
    /// request is already outstanding. On `Some`, the user message has been
    /// appended, the input cleared and the widget marked pending.
    pub fn begin_send(&mut self) -> Option<String> {
        if self.pending || self.input.trim().is_empty() {
            return None;
        }

        let query = std::mem::take(&mut self.input);
        self.transcript.push(ChatMessage::user(query.clone()));
        self.pending = true;
        Some(query)
    }

    /// Record the outcome of the outstanding request.
    pub fn finish_send(&mut self, outcome: ChatOutcome) {
        self.transcript.push(ChatMessage::bot(outcome.into_message_text()));
        self.pending = false;
    }

    /// Send the current input and wait for the reply.
    ///
    /// Returns `false` when nothing was sent.
    pub async fn send_message<B>(&mut self, backend: &B) -> bool
    where
        B: ChatBackend + ?Sized,
    {
        let Some(query) = self.begin_send() else {
            return false;
        };

        let outcome = backend.ask(&query).await;
        self.finish_send(outcome);
        true
    }
}
