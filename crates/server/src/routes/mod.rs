//! HTTP route handlers for the server.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Liveness check
//!
//! # Contact form
//! POST /api/save-message       - Email a submission, or log it if email fails
//!
//! # Chat service (only when GEMINI_API_KEY is set)
//! POST /chat                   - Answer one question
//! GET  /healthz                - Chat service health
//! GET  /meta.json              - Service metadata
//! ```

pub mod chat;
pub mod contact;
pub mod health;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the chat service routes router.
pub fn chat_routes() -> Router<AppState> {
    Router::new()
        .route("/chat", post(chat::chat))
        .route("/healthz", get(health::healthz))
        .route("/meta.json", get(health::meta))
}

/// Create all routes for the server.
///
/// The chat service routes are only mounted when `with_chat` is set.
pub fn routes(with_chat: bool) -> Router<AppState> {
    let router = Router::new()
        .route("/health", get(health::health))
        .route("/api/save-message", post(contact::save_message));

    if with_chat {
        router.merge(chat_routes())
    } else {
        router
    }
}
