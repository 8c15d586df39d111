//! Email bodies for contact submissions.
//!
//! HTML bodies are auto-escaped by askama, so submission fields can never
//! inject markup into the notification or acknowledgment. Plain-text bodies
//! carry the fields verbatim.

use askama::Template;
use folio_core::ContactSubmission;

use crate::config::ContactConfig;

use super::mail::{EmailError, OutgoingEmail};

const ADMIN_SUBJECT: &str = "New Client Entry";

/// HTML template for the admin notification.
#[derive(Template)]
#[template(path = "email/admin_notification.html")]
struct AdminNotificationHtml<'a> {
    submission: &'a ContactSubmission,
}

/// Plain text template for the admin notification.
#[derive(Template)]
#[template(path = "email/admin_notification.txt")]
struct AdminNotificationText<'a> {
    submission: &'a ContactSubmission,
}

/// HTML template for the client acknowledgment.
#[derive(Template)]
#[template(path = "email/acknowledgment.html")]
struct AcknowledgmentHtml<'a> {
    greeting: &'a str,
    owner_name: &'a str,
    owner_title: Option<&'a str>,
    phone: Option<&'a str>,
}

/// Plain text template for the client acknowledgment.
#[derive(Template)]
#[template(path = "email/acknowledgment.txt")]
struct AcknowledgmentText<'a> {
    greeting: &'a str,
    owner_name: &'a str,
    owner_title: Option<&'a str>,
    phone: Option<&'a str>,
}

/// Render the notification sent to the site owner for every submission.
///
/// # Errors
///
/// Returns error if a template fails to render.
pub fn admin_notification(
    submission: &ContactSubmission,
    contact: &ContactConfig,
) -> Result<OutgoingEmail, EmailError> {
    Ok(OutgoingEmail {
        to: contact.admin_address.clone(),
        subject: ADMIN_SUBJECT.to_string(),
        text_body: AdminNotificationText { submission }.render()?,
        html_body: AdminNotificationHtml { submission }.render()?,
    })
}

/// Render the acknowledgment sent back to the person who wrote in.
///
/// Returns `Ok(None)` when the submission has no usable address.
///
/// # Errors
///
/// Returns error if a template fails to render.
pub fn acknowledgment(
    submission: &ContactSubmission,
    contact: &ContactConfig,
) -> Result<Option<OutgoingEmail>, EmailError> {
    let Some(to) = submission.acknowledgment_address() else {
        return Ok(None);
    };

    let greeting = submission.greeting_name();
    let owner_name = contact.owner_name.as_str();
    let owner_title = contact.owner_title.as_deref();
    let phone = contact.owner_phone.as_deref();

    Ok(Some(OutgoingEmail {
        to: to.to_string(),
        subject: format!("Thank you for reaching out to {owner_name}!"),
        text_body: AcknowledgmentText {
            greeting,
            owner_name,
            owner_title,
            phone,
        }
        .render()?,
        html_body: AcknowledgmentHtml {
            greeting,
            owner_name,
            owner_title,
            phone,
        }
        .render()?,
    }))
}
