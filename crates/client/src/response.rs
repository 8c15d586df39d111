//! Tagged parsing of service response bodies.
//!
//! The chat service may answer with any JSON shape, or with plain text. A
//! body is parsed once into [`ResponseBody`] and then read through an
//! ordered field lookup, instead of probing a dynamic object ad hoc.

use serde_json::Value;

/// Fields checked, in order, for the text of a successful reply.
const ANSWER_FIELDS: [&str; 3] = ["answer", "result", "message"];

/// Fields checked, in order, for the detail of a failed reply.
const ERROR_FIELDS: [&str; 3] = ["error", "detail", "message"];

/// A response body, parsed as JSON where possible.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    Json(Value),
    Text(String),
}

impl ResponseBody {
    /// Parse a raw body. Anything that is not valid JSON is kept as text.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        serde_json::from_str(raw).map_or_else(|_| Self::Text(raw.to_string()), Self::Json)
    }

    /// Text to show for a successful reply.
    ///
    /// The first non-empty of `answer`, `result`, `message`; otherwise the
    /// compact JSON text of the whole value, keys in the order received.
    /// Text bodies are returned as they are.
    #[must_use]
    pub fn answer_text(&self) -> String {
        match self {
            Self::Json(value) => lookup(value, &ANSWER_FIELDS).unwrap_or_else(|| value.to_string()),
            Self::Text(text) => text.clone(),
        }
    }

    /// Detail to show for a failed reply with the given status.
    ///
    /// The first non-empty of `error`, `detail`, `message`; otherwise the raw
    /// body; otherwise `Server returned <status>`.
    #[must_use]
    pub fn error_detail(&self, status: u16) -> String {
        let detail = match self {
            Self::Json(value) => lookup(value, &ERROR_FIELDS).or_else(|| Some(value.to_string())),
            Self::Text(text) => Some(text.trim().to_string()),
        };

        detail
            .filter(|d| !d.is_empty())
            .unwrap_or_else(|| format!("Server returned {status}"))
    }
}

fn lookup(value: &Value, fields: &[&str]) -> Option<String> {
    fields.iter().find_map(|field| match value.get(field)? {
        Value::Null => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    })
}
