//! Integration tests for Folio.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p folio-integration-tests
//! ```
//!
//! Nothing external is needed: the server router runs in-process with a
//! recording mail transport, and chat services are small axum apps bound to
//! an ephemeral local port.
//!
//! # Test Categories
//!
//! - `contact_endpoint` - `/api/save-message` outcomes and the fallback log
//! - `cors` - Origin allow-list and wildcard mode
//! - `chat_routes` - Optional chat service routes
//! - `chat_widget` - Widget behavior against mock chat services
//! - `contact_form` - Form behavior against the real relay

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::missing_panics_doc)]

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;
use folio_server::config::ServerConfig;
use folio_server::services::{EmailError, MailTransport, OutgoingEmail};
use folio_server::state::AppState;

/// Mail transport that records every email and can be told to fail.
#[derive(Default)]
pub struct RecordingTransport {
    sent: Mutex<Vec<OutgoingEmail>>,
    fail_for: Vec<String>,
    fail_all: bool,
}

impl RecordingTransport {
    #[must_use]
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Fail every send.
    #[must_use]
    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            fail_all: true,
            ..Default::default()
        })
    }

    /// Fail sends addressed to `recipient`.
    #[must_use]
    pub fn failing_for(recipient: &str) -> Arc<Self> {
        Arc::new(Self {
            fail_for: vec![recipient.to_string()],
            ..Default::default()
        })
    }

    /// Every email handed to the transport, including failed ones.
    #[must_use]
    pub fn sent(&self) -> Vec<OutgoingEmail> {
        self.sent.lock().unwrap().clone()
    }

    #[must_use]
    pub fn recipients(&self) -> Vec<String> {
        self.sent().into_iter().map(|e| e.to).collect()
    }
}

#[async_trait]
impl MailTransport for RecordingTransport {
    async fn send(&self, email: &OutgoingEmail) -> Result<(), EmailError> {
        self.sent.lock().unwrap().push(email.clone());
        if self.fail_all || self.fail_for.contains(&email.to) {
            return Err(EmailError::InvalidAddress(email.to.clone()));
        }
        Ok(())
    }
}

/// Admin address used by [`server_config`].
pub const ADMIN_ADDRESS: &str = "owner@example.com";

/// Server configuration writing its fallback log to `log_path`.
///
/// `extra` entries override the defaults.
#[must_use]
pub fn server_config(log_path: &Path, extra: &[(&str, &str)]) -> ServerConfig {
    let mut vars: HashMap<String, String> = HashMap::from([
        ("MAIL_FROM".to_string(), "site@example.com".to_string()),
        ("CONTACT_ADMIN_EMAIL".to_string(), ADMIN_ADDRESS.to_string()),
        ("SITE_OWNER_NAME".to_string(), "Sam Rivera".to_string()),
        (
            "FALLBACK_LOG_PATH".to_string(),
            log_path.display().to_string(),
        ),
    ]);
    for (key, value) in extra {
        vars.insert((*key).to_string(), (*value).to_string());
    }

    ServerConfig::from_lookup(&move |key: &str| vars.get(key).cloned())
        .expect("test configuration is valid")
}

/// Build the full router around a test transport.
#[must_use]
pub fn server_app(config: ServerConfig, transport: Arc<RecordingTransport>) -> Router {
    let state = AppState::with_transport(config, transport).expect("state builds");
    folio_server::app(state)
}

/// Serve `router` on an ephemeral local port and return its base URL.
pub async fn spawn(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");

    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("serve");
    });

    format!("http://{addr}")
}

/// A local base URL with nothing listening on it.
pub async fn unused_base_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);
    format!("http://{addr}")
}

/// Read a response body to a string.
pub async fn body_text(response: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    String::from_utf8(bytes.to_vec()).expect("utf-8 body")
}
