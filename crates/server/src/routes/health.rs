//! Health and metadata endpoints.

use axum::{Json, extract::State};
use serde_json::{Value, json};

use crate::state::AppState;

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check the SMTP relay.
pub async fn health() -> &'static str {
    "ok"
}

/// Chat service health check.
pub async fn healthz() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Small metadata document for clients that probe `/meta.json`.
pub async fn meta(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "name": state.config().contact.owner_name,
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
