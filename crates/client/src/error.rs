//! Client error types.

use thiserror::Error;

use crate::config::ConfigError;

/// Errors that can occur while setting up a client.
///
/// Request failures are not errors at this level: they are reported as
/// outcomes and shown to the user.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The HTTP client failed to build.
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),
}
