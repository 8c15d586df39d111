//! Chat service route handler.
//!
//! Failures are reported in the JSON body with `ok: false` and a 200 status,
//! so widgets always have a message to show.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::state::AppState;

/// Error text for a missing or blank query.
pub const EMPTY_QUERY_MESSAGE: &str = "Please provide 'query' in the request body.";

/// Chat request body.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ChatRequest {
    pub query: String,
    pub thinking_budget: Option<u32>,
}

/// Chat response body.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct ChatReply {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub answer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ChatReply {
    fn answer(answer: String) -> Self {
        Self {
            ok: true,
            source: Some("gemini"),
            answer: Some(answer),
            error: None,
        }
    }

    fn error(error: impl Into<String>) -> Self {
        Self {
            ok: false,
            source: None,
            answer: None,
            error: Some(error.into()),
        }
    }
}

/// Answer one question.
///
/// POST /chat
#[instrument(skip_all)]
pub async fn chat(
    State(state): State<AppState>,
    Json(body): Json<ChatRequest>,
) -> Result<Json<ChatReply>> {
    let Some(assistant) = state.assistant() else {
        return Err(AppError::Internal("chat service not configured".to_string()));
    };

    let query = body.query.trim();
    tracing::debug!(query_len = query.len(), "Chat request");
    if query.is_empty() {
        return Ok(Json(ChatReply::error(EMPTY_QUERY_MESSAGE)));
    }

    match assistant
        .answer(query, body.thinking_budget.unwrap_or(0))
        .await
    {
        Ok(answer) => Ok(Json(ChatReply::answer(answer))),
        Err(e) => {
            tracing::error!(error = %e, "Chat service failed to answer");
            Ok(Json(ChatReply::error(e.to_string())))
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_reply_shapes() {
        let ok = serde_json::to_value(ChatReply::answer("hi".to_string())).unwrap();
        assert_eq!(ok, json!({"ok": true, "source": "gemini", "answer": "hi"}));

        let err = serde_json::to_value(ChatReply::error(EMPTY_QUERY_MESSAGE)).unwrap();
        assert_eq!(err, json!({"ok": false, "error": EMPTY_QUERY_MESSAGE}));
    }

    #[test]
    fn test_request_defaults() {
        let request: ChatRequest = serde_json::from_str("{}").unwrap();
        assert!(request.query.is_empty());
        assert!(request.thinking_budget.is_none());
    }
}
