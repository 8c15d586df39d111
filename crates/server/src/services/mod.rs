//! Business logic services for the server.
//!
//! # Services
//!
//! - `mail` - SMTP transport behind the `MailTransport` trait
//! - `templates` - Admin notification and client acknowledgment bodies
//! - `fallback_log` - Append-only JSON-lines sink for undeliverable submissions
//! - `dispatcher` - Contact submission flow (email, then fallback)
//! - `assistant` - Gemini client for the optional chat service

pub mod assistant;
pub mod dispatcher;
pub mod fallback_log;
pub mod mail;
pub mod templates;

pub use assistant::{AssistantClient, AssistantError};
pub use dispatcher::{DispatchError, DispatchOutcome, MailDispatcher};
pub use fallback_log::{FallbackLog, FallbackLogError};
pub use mail::{EmailError, MailTransport, OutgoingEmail, SmtpMailer};
