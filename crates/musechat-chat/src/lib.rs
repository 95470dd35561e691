//! Conversation state management for musechat.
//!
//! This crate owns the in-memory chat state: the conversation list, the
//! current-conversation pointer, message append semantics, best-effort
//! persistence, and the request/response cycle against the completion client.

mod error;
mod export;
mod manager;


pub use error::ChatError;
pub use export::ExportDocument;
pub use manager::{ChatManager, SendOutcome};
