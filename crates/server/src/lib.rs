//! Folio Server library.
//!
//! Contact-form mail relay and optional chat service for the Folio portfolio
//! site, exposed as a library so the router can be tested in-process.
//!
//! # Architecture
//!
//! - Axum web framework, plain-text and JSON responses only
//! - SMTP via lettre for the admin notification and client acknowledgment
//! - Append-only JSON-lines file as the fallback when email fails
//! - Gemini API for the optional `/chat` endpoint

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod services;
pub mod state;

use axum::{Router, extract::Request};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the full application router with its middleware stack.
///
/// Sentry layers are added by the binary on top of this.
pub fn app(state: AppState) -> Router {
    let cors = middleware::cors_layer(&state.config().cors);
    let with_chat = state.assistant().is_some();

    Router::new()
        .merge(routes::routes(with_chat))
        .with_state(state)
        .layer(axum::middleware::from_fn(middleware::request_id_middleware))
        .layer(TraceLayer::new_for_http().make_span_with(|request: &Request| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                path = %request.uri().path(),
                request_id = tracing::field::Empty,
            )
        }))
        .layer(cors)
}
