//! Outbound email over SMTP.
//!
//! [`MailTransport`] is the seam the dispatcher sends through; [`SmtpMailer`]
//! is the production implementation on top of lettre.

use std::time::Duration;

use async_trait::async_trait;
use lettre::{
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    message::{MultiPart, SinglePart, header::ContentType},
    transport::smtp::{Error as SmtpError, authentication::Credentials},
};
use secrecy::ExposeSecret;
use thiserror::Error;

use crate::config::EmailConfig;

const SMTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Errors that can occur when sending email.
#[derive(Debug, Error)]
pub enum EmailError {
    /// SMTP transport error.
    #[error("SMTP error: {0}")]
    Smtp(#[from] SmtpError),

    /// Failed to build email message.
    #[error("Failed to build message: {0}")]
    MessageBuild(#[from] lettre::error::Error),

    /// Invalid email address.
    #[error("Invalid email address: {0}")]
    InvalidAddress(String),

    /// Template rendering error.
    #[error("Template error: {0}")]
    Template(#[from] askama::Error),
}

/// A rendered email ready to hand to a transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingEmail {
    pub to: String,
    pub subject: String,
    pub text_body: String,
    pub html_body: String,
}

/// Something that can deliver an [`OutgoingEmail`].
#[async_trait]
pub trait MailTransport: Send + Sync {
    /// Deliver a single email.
    async fn send(&self, email: &OutgoingEmail) -> Result<(), EmailError>;
}

/// SMTP mail transport.
#[derive(Clone)]
pub struct SmtpMailer {
    mailer: AsyncSmtpTransport<Tokio1Executor>,
    from_address: String,
}

impl SmtpMailer {
    /// Create a new SMTP transport from configuration.
    ///
    /// Missing credentials are allowed; the relay will then reject sends and
    /// submissions fall through to the fallback log.
    ///
    /// # Errors
    ///
    /// Returns error if the relay host cannot be used for TLS.
    pub fn new(config: &EmailConfig) -> Result<Self, SmtpError> {
        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)?
            .port(config.smtp_port)
            .timeout(Some(SMTP_TIMEOUT));

        if let (Some(username), Some(password)) = (&config.smtp_username, &config.smtp_password) {
            builder = builder.credentials(Credentials::new(
                username.clone(),
                password.expose_secret().to_string(),
            ));
        } else {
            tracing::warn!(
                "SMTP credentials not configured; emails will fail and submissions will be logged"
            );
        }

        Ok(Self {
            mailer: builder.build(),
            from_address: config.from_address.clone(),
        })
    }

    /// Build a multipart message with both plain text and HTML versions.
    fn build_message(&self, email: &OutgoingEmail) -> Result<Message, EmailError> {
        let message = Message::builder()
            .from(
                self.from_address
                    .parse()
                    .map_err(|_| EmailError::InvalidAddress(self.from_address.clone()))?,
            )
            .to(email
                .to
                .parse()
                .map_err(|_| EmailError::InvalidAddress(email.to.clone()))?)
            .subject(&email.subject)
            .multipart(
                MultiPart::alternative()
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_PLAIN)
                            .body(email.text_body.clone()),
                    )
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_HTML)
                            .body(email.html_body.clone()),
                    ),
            )?;

        Ok(message)
    }
}

#[async_trait]
impl MailTransport for SmtpMailer {
    async fn send(&self, email: &OutgoingEmail) -> Result<(), EmailError> {
        let message = self.build_message(email)?;
        self.mailer.send(message).await?;

        tracing::info!(to = %email.to, subject = %email.subject, "Email sent successfully");
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use secrecy::SecretString;

    use super::*;

    fn config() -> EmailConfig {
        EmailConfig {
            smtp_host: "smtp.example.com".to_string(),
            smtp_port: 587,
            smtp_username: Some("me@example.com".to_string()),
            smtp_password: Some(SecretString::from("app-password")),
            from_address: "Folio <me@example.com>".to_string(),
        }
    }

    fn email(to: &str) -> OutgoingEmail {
        OutgoingEmail {
            to: to.to_string(),
            subject: "Hello".to_string(),
            text_body: "plain".to_string(),
            html_body: "<p>html</p>".to_string(),
        }
    }

    #[tokio::test]
    async fn test_build_message_accepts_valid_addresses() {
        let mailer = SmtpMailer::new(&config()).unwrap();
        assert!(mailer.build_message(&email("client@example.com")).is_ok());
    }

    #[tokio::test]
    async fn test_build_message_rejects_bad_recipient() {
        let mailer = SmtpMailer::new(&config()).unwrap();
        let err = mailer.build_message(&email("a@b@c")).unwrap_err();
        assert!(matches!(err, EmailError::InvalidAddress(ref addr) if addr == "a@b@c"));
    }

    #[tokio::test]
    async fn test_build_message_rejects_bad_sender() {
        let mut config = config();
        config.from_address = "nobody".to_string();
        let mailer = SmtpMailer::new(&config).unwrap();
        let err = mailer.build_message(&email("client@example.com")).unwrap_err();
        assert!(matches!(err, EmailError::InvalidAddress(ref addr) if addr == "nobody"));
    }
}
