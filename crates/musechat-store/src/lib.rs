//! Conversation persistence for musechat.
//!
//! The state manager treats storage as best-effort: loads never fail (missing
//! or corrupt state degrades to an empty list) and save failures are the
//! caller's to log and swallow.

mod json_file;
mod memory;

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;

use musechat_models::Conversation;

/// Storage seam for the conversation list
pub trait ConversationStore: Send + Sync {
    /// Read the persisted conversation list. Missing state yields an empty
    /// list; unreadable or corrupt state is logged and yields an empty list.
    fn load(&self) -> Vec<Conversation>;

    /// Write the full conversation list
    fn save(&self, conversations: &[Conversation]) -> anyhow::Result<()>;
}
