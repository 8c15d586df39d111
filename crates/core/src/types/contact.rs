//! Contact form submission type.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A contact form submission.
///
/// A flat value object: every field is free text and none of them is
/// validated. The JSON shape uses camelCase keys, matching what the
/// contact form posts.
///
/// ## Examples
///
/// ```
/// use folio_core::ContactSubmission;
///
/// let submission = ContactSubmission {
///     first_name: "Ada".to_string(),
///     email: "ada@example.com".to_string(),
///     ..Default::default()
/// };
///
/// assert_eq!(submission.greeting_name(), "Ada");
/// assert_eq!(submission.acknowledgment_address(), Some("ada@example.com"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContactSubmission {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub company: String,
    pub project_type: String,
    pub description: String,
    pub timeline: String,
}

impl ContactSubmission {
    /// Greeting used when no first name was given.
    pub const GENERIC_GREETING: &'static str = "there";

    /// Build a submission from an arbitrary JSON value without rejecting it.
    ///
    /// Strings are taken verbatim, numbers and booleans are stringified,
    /// `null` and missing keys become empty, and nested arrays or objects
    /// are rendered as compact JSON. A body that is not an object yields an
    /// empty submission.
    #[must_use]
    pub fn from_json(value: &Value) -> Self {
        let field = |key: &str| value.get(key).map(render_scalar).unwrap_or_default();

        Self {
            first_name: field("firstName"),
            last_name: field("lastName"),
            email: field("email"),
            company: field("company"),
            project_type: field("projectType"),
            description: field("description"),
            timeline: field("timeline"),
        }
    }

    /// Address to send an acknowledgment to, if the email field looks like one.
    ///
    /// The only check is that the field contains an `@`.
    #[must_use]
    pub fn acknowledgment_address(&self) -> Option<&str> {
        self.email.contains('@').then_some(self.email.as_str())
    }

    /// Name used in the acknowledgment greeting.
    #[must_use]
    pub fn greeting_name(&self) -> &str {
        if self.first_name.trim().is_empty() {
            Self::GENERIC_GREETING
        } else {
            &self.first_name
        }
    }

    /// First and last name joined by a space, without stray whitespace.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim())
            .trim()
            .to_string()
    }

    /// Returns `true` when every field is empty.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        *self == Self::default()
    }
}

fn render_scalar(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_from_json_reads_camel_case_fields() {
        let submission = ContactSubmission::from_json(&json!({
            "firstName": "Ada",
            "lastName": "Lovelace",
            "email": "ada@example.com",
            "company": "Analytical Engines",
            "projectType": "ml",
            "description": "Notes on the engine",
            "timeline": "1-3 months"
        }));

        assert_eq!(submission.first_name, "Ada");
        assert_eq!(submission.last_name, "Lovelace");
        assert_eq!(submission.project_type, "ml");
        assert_eq!(submission.timeline, "1-3 months");
    }

    #[test]
    fn test_from_json_is_lenient() {
        let submission = ContactSubmission::from_json(&json!({
            "firstName": null,
            "company": 42,
            "timeline": true,
            "description": ["a", "b"]
        }));

        assert_eq!(submission.first_name, "");
        assert_eq!(submission.email, "");
        assert_eq!(submission.company, "42");
        assert_eq!(submission.timeline, "true");
        assert_eq!(submission.description, r#"["a","b"]"#);
    }

    #[test]
    fn test_from_json_non_object_is_blank() {
        assert!(ContactSubmission::from_json(&json!([1, 2, 3])).is_blank());
        assert!(ContactSubmission::from_json(&json!("hello")).is_blank());
    }

    #[test]
    fn test_acknowledgment_address_requires_at_symbol() {
        let mut submission = ContactSubmission {
            email: "not-an-email".to_string(),
            ..Default::default()
        };
        assert_eq!(submission.acknowledgment_address(), None);

        submission.email = "a@b.com".to_string();
        assert_eq!(submission.acknowledgment_address(), Some("a@b.com"));

        submission.email = String::new();
        assert_eq!(submission.acknowledgment_address(), None);
    }

    #[test]
    fn test_greeting_name_falls_back() {
        let mut submission = ContactSubmission::default();
        assert_eq!(submission.greeting_name(), "there");

        submission.first_name = "   ".to_string();
        assert_eq!(submission.greeting_name(), "there");

        submission.first_name = "Grace".to_string();
        assert_eq!(submission.greeting_name(), "Grace");
    }

    #[test]
    fn test_full_name() {
        let submission = ContactSubmission {
            first_name: "Grace".to_string(),
            last_name: "Hopper".to_string(),
            ..Default::default()
        };
        assert_eq!(submission.full_name(), "Grace Hopper");

        let only_last = ContactSubmission {
            last_name: "Hopper".to_string(),
            ..Default::default()
        };
        assert_eq!(only_last.full_name(), "Hopper");
    }

    #[test]
    fn test_serializes_camel_case() {
        let submission = ContactSubmission {
            project_type: "web".to_string(),
            ..Default::default()
        };
        let value = serde_json::to_value(&submission).expect("serialize");
        assert_eq!(value["projectType"], "web");
        assert_eq!(value["firstName"], "");
    }

    #[test]
    fn test_deserialize_fills_missing_fields() {
        let submission: ContactSubmission =
            serde_json::from_str(r#"{"email":"a@b.com"}"#).expect("deserialize");
        assert_eq!(submission.email, "a@b.com");
        assert_eq!(submission.first_name, "");
    }
}
