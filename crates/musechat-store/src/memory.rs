use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use musechat_models::Conversation;

use crate::ConversationStore;

/// In-memory store used by tests and as a null persistence backend
#[derive(Default)]
pub struct MemoryStore {
    conversations: Mutex<Vec<Conversation>>,
    saves: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_conversations(conversations: Vec<Conversation>) -> Self {
        Self {
            conversations: Mutex::new(conversations),
            saves: AtomicUsize::new(0),
        }
    }

    /// Number of times `save` has been called
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    /// Copy of the last saved conversation list
    pub fn snapshot(&self) -> Vec<Conversation> {
        self.conversations.lock().unwrap().clone()
    }
}

impl ConversationStore for MemoryStore {
    fn load(&self) -> Vec<Conversation> {
        self.conversations.lock().unwrap().clone()
    }

    fn save(&self, conversations: &[Conversation]) -> anyhow::Result<()> {
        *self.conversations.lock().unwrap() = conversations.to_vec();
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
