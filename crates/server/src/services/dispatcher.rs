//! Contact submission dispatch.
//!
//! Sends the admin notification and, when the submission carries an address,
//! the client acknowledgment. If either send fails the raw submission is
//! appended to the fallback log instead. There is no retry, no backoff and no
//! idempotency key.

use std::sync::Arc;

use folio_core::ContactSubmission;
use serde_json::Value;
use thiserror::Error;
use tracing::instrument;

use crate::config::ContactConfig;

use super::fallback_log::{FallbackLog, FallbackLogError};
use super::mail::{EmailError, MailTransport};
use super::templates;

/// How a submission was handled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// Every email that was attempted went out.
    Sent,
    /// An email failed; the submission was written to the fallback log.
    SavedToLog,
}

/// Both the email delivery and the fallback write failed.
#[derive(Debug, Error)]
#[error("email failed ({mail}) and fallback log failed ({log})")]
pub struct DispatchError {
    pub mail: EmailError,
    pub log: FallbackLogError,
}

/// Sends contact submissions by email, falling back to a local log.
#[derive(Clone)]
pub struct MailDispatcher {
    transport: Arc<dyn MailTransport>,
    contact: ContactConfig,
    fallback: FallbackLog,
}

impl MailDispatcher {
    #[must_use]
    pub fn new(
        transport: Arc<dyn MailTransport>,
        contact: ContactConfig,
        fallback: FallbackLog,
    ) -> Self {
        Self {
            transport,
            contact,
            fallback,
        }
    }

    /// Dispatch one raw submission.
    ///
    /// The body is not validated: fields are read leniently for the email
    /// templates, and the fallback log receives the value exactly as posted.
    ///
    /// # Errors
    ///
    /// Returns `DispatchError` only when the emails and the fallback write
    /// both failed.
    #[instrument(skip_all)]
    pub async fn dispatch(&self, raw: &Value) -> Result<DispatchOutcome, DispatchError> {
        let submission = ContactSubmission::from_json(raw);

        let Err(mail) = self.send_emails(&submission).await else {
            tracing::info!(email = %submission.email, "Contact submission emailed");
            return Ok(DispatchOutcome::Sent);
        };

        tracing::warn!(error = %mail, "Email delivery failed, writing submission to fallback log");

        match self.fallback.append(raw).await {
            Ok(()) => Ok(DispatchOutcome::SavedToLog),
            Err(log) => Err(DispatchError { mail, log }),
        }
    }

    /// Send the admin notification, then the acknowledgment if applicable.
    async fn send_emails(&self, submission: &ContactSubmission) -> Result<(), EmailError> {
        let notification = templates::admin_notification(submission, &self.contact)?;
        self.transport.send(&notification).await?;

        if let Some(ack) = templates::acknowledgment(submission, &self.contact)? {
            self.transport.send(&ack).await?;
        }

        Ok(())
    }
}
