//! Contact form route handler.

use axum::{Json, extract::State, http::StatusCode};
use serde_json::Value;
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::services::DispatchOutcome;
use crate::state::AppState;

/// Body sent when every email went out.
pub const SENT_MESSAGE: &str = "Message saved and emails sent";

/// Submit the contact form.
///
/// POST /api/save-message
///
/// The body is any JSON value; it is not validated. Responds with
/// 200 when the emails were sent, 500 "Email failed, message saved to file"
/// when the submission went to the fallback log, and a generic 500 when the
/// fallback write failed too.
#[instrument(skip_all)]
pub async fn save_message(
    State(state): State<AppState>,
    Json(submission): Json<Value>,
) -> Result<(StatusCode, &'static str)> {
    match state.dispatcher().dispatch(&submission).await? {
        DispatchOutcome::Sent => Ok((StatusCode::OK, SENT_MESSAGE)),
        DispatchOutcome::SavedToLog => Err(AppError::SavedToLog),
    }
}
