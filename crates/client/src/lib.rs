//! Folio Client - the browser-side contracts of the portfolio site.
//!
//! # Modules
//!
//! - [`chat`] - Chat widget state machine and chat service client
//! - [`contact`] - Contact form state and submission client
//! - [`response`] - Tagged parsing of loosely-typed service responses
//! - [`config`] - Service base URLs from the environment

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod chat;
pub mod config;
pub mod contact;
pub mod error;
pub mod response;

pub use chat::{ChatBackend, ChatClient, ChatOutcome, ChatWidget};
pub use config::ClientConfig;
pub use contact::{ContactBackend, ContactClient, ContactForm, Feedback, SubmitOutcome};
pub use error::ClientError;
pub use response::ResponseBody;
