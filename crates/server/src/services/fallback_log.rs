//! Append-only sink for submissions whose emails could not be sent.
//!
//! Each entry is one JSON document on its own line, exactly as it was
//! submitted. The file is write-only from the server's point of view: there is
//! no read path, no rotation, and no size bound. Entries are at-least-once and
//! never deduplicated; a resubmission produces a second line.
//!
//! Concurrent requests append without an application-level lock. Each entry
//! is written with a single `write_all` on a file opened in append mode, so
//! lines do not interleave on platforms with atomic appends.

use std::path::{Path, PathBuf};

use serde_json::Value;
use thiserror::Error;
use tokio::io::AsyncWriteExt;

/// Errors that can occur when appending to the fallback log.
#[derive(Debug, Error)]
pub enum FallbackLogError {
    /// Opening or writing the file failed.
    #[error("I/O error writing {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The submission could not be serialized.
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// JSON-lines file that collects undeliverable submissions.
#[derive(Debug, Clone)]
pub struct FallbackLog {
    path: PathBuf,
}

impl FallbackLog {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one submission as a single line, creating the file if needed.
    ///
    /// # Errors
    ///
    /// Returns error if the value cannot be serialized or the file cannot be
    /// opened or written.
    pub async fn append(&self, submission: &Value) -> Result<(), FallbackLogError> {
        let mut line = serde_json::to_string(submission)?;
        line.push('\n');

        let io_err = |source| FallbackLogError::Io {
            path: self.path.clone(),
            source,
        };

        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await
            .map_err(io_err)?;
        file.write_all(line.as_bytes()).await.map_err(io_err)?;
        file.flush().await.map_err(io_err)?;

        tracing::info!(path = %self.path.display(), "Submission appended to fallback log");
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[tokio::test]
    async fn test_append_creates_file_and_writes_lines() {
        let dir = tempfile::tempdir().unwrap();
        let log = FallbackLog::new(dir.path().join("messages.txt"));

        log.append(&json!({"firstName": "Ada"})).await.unwrap();
        log.append(&json!({"firstName": "Ada"})).await.unwrap();

        let contents = std::fs::read_to_string(log.path()).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);
        for line in lines {
            let value: Value = serde_json::from_str(line).unwrap();
            assert_eq!(value, json!({"firstName": "Ada"}));
        }
    }

    #[tokio::test]
    async fn test_multiline_values_stay_on_one_line() {
        let dir = tempfile::tempdir().unwrap();
        let log = FallbackLog::new(dir.path().join("messages.txt"));

        log.append(&json!({"description": "line one\nline two"}))
            .await
            .unwrap();

        let contents = std::fs::read_to_string(log.path()).unwrap();
        assert_eq!(contents.lines().count(), 1);
        assert!(contents.ends_with('\n'));
    }

    #[tokio::test]
    async fn test_line_keeps_submitted_key_order() {
        let dir = tempfile::tempdir().unwrap();
        let log = FallbackLog::new(dir.path().join("messages.txt"));
        let submitted = r#"{"timeline":"Q3","firstName":"Ada","email":"a@b.com"}"#;

        log.append(&serde_json::from_str(submitted).unwrap())
            .await
            .unwrap();

        let contents = std::fs::read_to_string(log.path()).unwrap();
        assert_eq!(contents, format!("{submitted}\n"));
    }

    #[tokio::test]
    async fn test_append_fails_when_directory_missing() {
        let dir = tempfile::tempdir().unwrap();
        let log = FallbackLog::new(dir.path().join("missing").join("messages.txt"));

        let err = log.append(&json!({})).await.unwrap_err();
        assert!(matches!(err, FallbackLogError::Io { .. }));
    }
}
