//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures server faults to Sentry
//! before responding to the client. Responses are plain text.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::services::DispatchError;

/// Body sent when the emails failed but the submission was logged.
pub const SAVED_TO_LOG_MESSAGE: &str = "Email failed, message saved to file";

/// Body sent when neither the emails nor the fallback log worked.
pub const DISPATCH_FAILED_MESSAGE: &str = "Error saving message and sending email";

/// Application-level error type for the server.
#[derive(Debug, Error)]
pub enum AppError {
    /// Emails failed; the submission is in the fallback log.
    #[error("Email delivery failed, submission saved to fallback log")]
    SavedToLog,

    /// Emails and the fallback log both failed.
    #[error("Dispatch error: {0}")]
    Dispatch(#[from] DispatchError),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Capture server faults to Sentry; a logged submission is degraded, not lost
        if matches!(self, Self::Dispatch(_) | Self::Internal(_)) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        // Don't expose internal error details to clients
        let message = match &self {
            Self::SavedToLog => SAVED_TO_LOG_MESSAGE,
            Self::Dispatch(_) => DISPATCH_FAILED_MESSAGE,
            Self::Internal(_) => "Internal server error",
        };

        (StatusCode::INTERNAL_SERVER_ERROR, message).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
