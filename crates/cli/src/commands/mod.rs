//! CLI command implementations.

pub mod chat;
pub mod contact;

use folio_client::ClientError;
use folio_client::config::ConfigError;
use thiserror::Error;

/// Errors that can end a command.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Client(#[from] ClientError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The relay did not accept the submission.
    #[error("{0}")]
    NotSent(&'static str),
}
