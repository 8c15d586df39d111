//! Value types shared between the server and the client crates.

mod chat;
mod contact;

pub use chat::{ChatMessage, Sender};
pub use contact::ContactSubmission;
