//! Folio Core - Shared types library.
//!
//! This crate provides the value types used across all Folio components:
//! - `server` - Contact mail relay and optional chat service
//! - `client` - Chat widget and contact form contracts
//! - `cli` - Terminal front end for the client contracts
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients, no mail
//! transports. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Contact submissions and chat transcript messages

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
