//! Contact form state and submission client.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use folio_core::ContactSubmission;
use tracing::instrument;

use crate::config::ClientConfig;
use crate::error::ClientError;

pub const SUCCESS_MESSAGE: &str = "Message sent successfully!";
pub const FAILURE_MESSAGE: &str = "Something went wrong. Please try again later.";
pub const NETWORK_MESSAGE: &str = "Failed to send message. Please try again.";

/// How long the success banner stays visible.
pub const SUCCESS_DISPLAY: Duration = Duration::from_secs(3);

/// Result of posting one submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// 2xx response.
    Accepted,
    /// Non-2xx response.
    Rejected { status: u16 },
    /// Transport failure.
    Unreachable(String),
}

/// Feedback shown to the visitor after a submit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feedback {
    Success,
    Failure,
    NetworkError,
}

impl Feedback {
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::Success => SUCCESS_MESSAGE,
            Self::Failure => FAILURE_MESSAGE,
            Self::NetworkError => NETWORK_MESSAGE,
        }
    }
}

/// Something that accepts contact submissions.
#[async_trait]
pub trait ContactBackend: Send + Sync {
    async fn submit(&self, submission: &ContactSubmission) -> SubmitOutcome;
}

/// HTTP client for `POST {base}/api/save-message`.
#[derive(Debug, Clone)]
pub struct ContactClient {
    client: reqwest::Client,
    endpoint: String,
}

impl ContactClient {
    /// Create a client for the configured contact relay.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        Ok(Self {
            client: reqwest::Client::builder().build()?,
            endpoint: config.contact_endpoint(),
        })
    }
}

#[async_trait]
impl ContactBackend for ContactClient {
    #[instrument(skip_all, fields(endpoint = %self.endpoint))]
    async fn submit(&self, submission: &ContactSubmission) -> SubmitOutcome {
        match self.client.post(&self.endpoint).json(submission).send().await {
            Ok(response) if response.status().is_success() => SubmitOutcome::Accepted,
            Ok(response) => {
                let status = response.status();
                tracing::warn!(status = %status, "Contact submission rejected");
                SubmitOutcome::Rejected {
                    status: status.as_u16(),
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "Contact relay unreachable");
                SubmitOutcome::Unreachable(e.to_string())
            }
        }
    }
}

/// State of the contact form.
#[derive(Debug, Clone, Default)]
pub struct ContactForm {
    pub fields: ContactSubmission,
    loading: bool,
    feedback: Option<(Feedback, Instant)>,
}

impl ContactForm {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    /// Feedback visible at `now`.
    ///
    /// Success disappears after [`SUCCESS_DISPLAY`]; failures stay until
    /// dismissed or the next submit.
    #[must_use]
    pub fn feedback_at(&self, now: Instant) -> Option<Feedback> {
        match self.feedback {
            Some((Feedback::Success, shown))
                if now.saturating_duration_since(shown) >= SUCCESS_DISPLAY =>
            {
                None
            }
            Some((feedback, _)) => Some(feedback),
            None => None,
        }
    }

    pub fn dismiss(&mut self) {
        self.feedback = None;
    }

    /// Start a submit. Returns `None` while one is already in flight.
    pub fn begin_submit(&mut self) -> Option<ContactSubmission> {
        if self.loading {
            return None;
        }
        self.loading = true;
        self.feedback = None;
        Some(self.fields.clone())
    }

    /// Record the outcome of the in-flight submit.
    pub fn finish_submit(&mut self, outcome: &SubmitOutcome, now: Instant) {
        let feedback = match outcome {
            SubmitOutcome::Accepted => {
                self.fields = ContactSubmission::default();
                Feedback::Success
            }
            SubmitOutcome::Rejected { .. } => Feedback::Failure,
            SubmitOutcome::Unreachable(_) => Feedback::NetworkError,
        };
        self.feedback = Some((feedback, now));
        self.loading = false;
    }

    /// Submit the current fields and wait for the result.
    ///
    /// Returns the resulting feedback, or `None` if a submit was already in
    /// flight.
    pub async fn submit<B>(&mut self, backend: &B) -> Option<Feedback>
    where
        B: ContactBackend + ?Sized,
    {
        let submission = self.begin_submit()?;
        let outcome = backend.submit(&submission).await;
        let now = Instant::now();
        self.finish_submit(&outcome, now);
        self.feedback_at(now)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn filled() -> ContactForm {
        let mut form = ContactForm::new();
        form.fields.first_name = "Ada".to_string();
        form.fields.email = "ada@example.com".to_string();
        form
    }

    struct FixedBackend(SubmitOutcome);

    #[async_trait]
    impl ContactBackend for FixedBackend {
        async fn submit(&self, _submission: &ContactSubmission) -> SubmitOutcome {
            self.0.clone()
        }
    }

    #[test]
    fn test_success_resets_and_expires() {
        let mut form = filled();
        let submission = form.begin_submit().unwrap();
        assert_eq!(submission.first_name, "Ada");
        assert!(form.is_loading());

        let now = Instant::now();
        form.finish_submit(&SubmitOutcome::Accepted, now);

        assert!(!form.is_loading());
        assert!(form.fields.is_blank());
        assert_eq!(form.feedback_at(now), Some(Feedback::Success));
        assert_eq!(
            form.feedback_at(now + Duration::from_secs(2)),
            Some(Feedback::Success)
        );
        assert_eq!(form.feedback_at(now + SUCCESS_DISPLAY), None);
    }

    #[test]
    fn test_failure_keeps_fields() {
        let mut form = filled();
        form.begin_submit().unwrap();

        let now = Instant::now();
        form.finish_submit(&SubmitOutcome::Rejected { status: 500 }, now);

        assert!(!form.is_loading());
        assert_eq!(form.fields.first_name, "Ada");
        assert_eq!(
            form.feedback_at(now + Duration::from_secs(60)),
            Some(Feedback::Failure)
        );

        form.dismiss();
        assert_eq!(form.feedback_at(now), None);
    }

    #[test]
    fn test_no_double_submit() {
        let mut form = filled();
        assert!(form.begin_submit().is_some());
        assert!(form.begin_submit().is_none());
    }

    #[test]
    fn test_feedback_messages() {
        assert_eq!(Feedback::Success.message(), "Message sent successfully!");
        assert_eq!(
            Feedback::Failure.message(),
            "Something went wrong. Please try again later."
        );
        assert_eq!(
            Feedback::NetworkError.message(),
            "Failed to send message. Please try again."
        );
    }

    #[tokio::test]
    async fn test_submit_network_error() {
        let mut form = filled();
        let backend = FixedBackend(SubmitOutcome::Unreachable("refused".to_string()));

        let feedback = form.submit(&backend).await;
        assert_eq!(feedback, Some(Feedback::NetworkError));
        assert!(!form.is_loading());
        assert_eq!(form.fields.email, "ada@example.com");
    }
}
