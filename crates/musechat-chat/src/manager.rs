use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use chrono::Utc;
use colored::Colorize;
use uuid::Uuid;

use musechat_api::{Completion, CompletionClient};
use musechat_models::{ApiMessage, ChatState, Conversation, Message};
use musechat_store::ConversationStore;

use crate::error::ChatError;
use crate::export::{slugify, ExportDocument};

/// Characters of the first user message used for a derived title
const TITLE_MAX_CHARS: usize = 50;

/// Outcome of a [`ChatManager::send_message`] call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendOutcome {
    /// Blank input; nothing was appended and no request was issued
    Ignored,
    /// The assistant reply was appended to the conversation
    Replied,
    /// The completion call failed; the failure is recorded in `state().error`
    Failed,
}

/// Owns the conversation list and orchestrates sends against the completion
/// client. One instance per session.
///
/// Every mutating operation updates the in-memory state first and then
/// persists the full conversation list through the store; persistence
/// failures are logged to stderr and never surfaced to callers.
pub struct ChatManager {
    state: ChatState,
    client: Arc<dyn CompletionClient>,
    store: Arc<dyn ConversationStore>,
    export_dir: PathBuf,
    total_tokens_used: usize,
}

impl ChatManager {
    /// Create a manager, loading any previously persisted conversations
    pub fn new(
        client: Arc<dyn CompletionClient>,
        store: Arc<dyn ConversationStore>,
        export_dir: PathBuf,
    ) -> Self {
        let mut state = ChatState::new();
        state.conversations = store.load();
        Self {
            state,
            client,
            store,
            export_dir,
            total_tokens_used: 0,
        }
    }

    pub fn state(&self) -> &ChatState {
        &self.state
    }

    #[cfg(test)]
    pub(crate) fn state_mut(&mut self) -> &mut ChatState {
        &mut self.state
    }

    /// Tokens consumed by completions over the lifetime of this manager
    pub fn total_tokens_used(&self) -> usize {
        self.total_tokens_used
    }

    pub fn conversation(&self, id: Uuid) -> Option<&Conversation> {
        self.state.conversations.iter().find(|c| c.id == id)
    }

    fn conversation_mut(&mut self, id: Uuid) -> Option<&mut Conversation> {
        self.state.conversations.iter_mut().find(|c| c.id == id)
    }

    /// The conversation the current pointer refers to
    pub fn current_conversation(&self) -> Option<&Conversation> {
        self.state
            .current_conversation_id
            .and_then(|id| self.conversation(id))
    }

    /// Insert a new empty conversation at the front of the list, make it
    /// current, and clear any pending error. Always succeeds.
    pub fn create_conversation(&mut self) -> Uuid {
        let conversation = Conversation::new();
        let id = conversation.id;
        self.state.conversations.insert(0, conversation);
        self.state.current_conversation_id = Some(id);
        self.state.error = None;
        self.persist();
        id
    }

    /// Point the session at an existing conversation.
    /// Unknown ids are reported as `NotFound` so the pointer can never dangle.
    pub fn select_conversation(&mut self, id: Uuid) -> Result<(), ChatError> {
        if self.conversation(id).is_none() {
            return Err(ChatError::NotFound(id));
        }
        self.state.current_conversation_id = Some(id);
        self.state.error = None;
        Ok(())
    }

    /// Remove a conversation. When the removed conversation was current, the
    /// pointer moves to the first remaining conversation, or clears if none
    /// remain. Deleting the conversation an in-flight send targets is
    /// rejected.
    pub fn delete_conversation(&mut self, id: Uuid) -> Result<(), ChatError> {
        if self.conversation(id).is_none() {
            return Err(ChatError::NotFound(id));
        }
        if self.state.is_typing && self.state.current_conversation_id == Some(id) {
            return Err(ChatError::RequestInFlight);
        }

        self.state.conversations.retain(|c| c.id != id);
        if self.state.current_conversation_id == Some(id) {
            self.state.current_conversation_id = self.state.conversations.first().map(|c| c.id);
        }
        self.persist();
        Ok(())
    }

    /// Update a conversation title. Blank titles are rejected.
    pub fn rename_conversation(&mut self, id: Uuid, title: &str) -> Result<(), ChatError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(ChatError::EmptyTitle);
        }
        let conversation = self.conversation_mut(id).ok_or(ChatError::NotFound(id))?;
        conversation.title = title.to_string();
        conversation.touch();
        self.persist();
        Ok(())
    }

    pub fn set_selected_model(&mut self, model: impl Into<String>) {
        self.state.selected_model = model.into();
    }

    pub fn clear_error(&mut self) {
        self.state.error = None;
    }

    /// Send a user message on the current conversation and wait for the reply.
    ///
    /// Blank input is ignored. A second call while a request is outstanding
    /// is rejected with `RequestInFlight`. When no conversation is current,
    /// one is created first. The user message is appended before the request
    /// and never rolled back; completion failures land in `state().error`
    /// rather than in the returned `Result`.
    pub async fn send_message(&mut self, text: &str) -> Result<SendOutcome, ChatError> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(SendOutcome::Ignored);
        }
        if self.state.is_typing {
            return Err(ChatError::RequestInFlight);
        }

        let conversation_id = match self.state.current_conversation_id {
            Some(id) => id,
            None => self.create_conversation(),
        };

        let model = self.state.selected_model.clone();
        let message = Message::user(text, Some(model.clone()));

        let conversation = self
            .conversation_mut(conversation_id)
            .ok_or(ChatError::NotFound(conversation_id))?;
        if conversation.messages.is_empty() {
            conversation.title = derive_title(text);
        }
        conversation.push_message(message);
        let history: Vec<ApiMessage> = conversation.messages.iter().map(ApiMessage::from).collect();

        self.state.is_typing = true;
        self.state.error = None;
        self.persist();

        let result = self.client.complete(&history, &model).await;
        self.state.is_typing = false;

        match result {
            Ok(Completion { content, usage }) => {
                if let Some(usage) = usage {
                    self.total_tokens_used += usage.total_tokens;
                }
                // The conversation may have been deleted while the request
                // was outstanding; the reply is dropped in that case.
                if let Some(conversation) = self.conversation_mut(conversation_id) {
                    conversation.push_message(Message::assistant(content, Some(model)));
                    self.persist();
                }
                Ok(SendOutcome::Replied)
            }
            Err(err) => {
                self.state.error = Some(err.to_string());
                Ok(SendOutcome::Failed)
            }
        }
    }

    /// Write a conversation snapshot to `chat-<slug>.json` in the export
    /// directory. Returns the written path, or `None` when the id is unknown.
    pub fn export_conversation(&self, id: Uuid) -> Result<Option<PathBuf>, ChatError> {
        let Some(conversation) = self.conversation(id) else {
            return Ok(None);
        };

        let document = ExportDocument {
            title: conversation.title.clone(),
            messages: conversation.messages.clone(),
            created_at: conversation.created_at,
            exported_at: Utc::now(),
        };

        let json = serde_json::to_string_pretty(&document)?;
        fs::create_dir_all(&self.export_dir)?;
        let path = self
            .export_dir
            .join(format!("chat-{}.json", slugify(&conversation.title)));
        fs::write(&path, json)?;
        Ok(Some(path))
    }

    fn persist(&self) {
        if let Err(e) = self.store.save(&self.state.conversations) {
            eprintln!("{} Failed to persist conversations: {}", "⚠️".yellow(), e);
        }
    }
}

/// First `TITLE_MAX_CHARS` characters of the text, with an ellipsis appended
/// when truncated
pub(crate) fn derive_title(text: &str) -> String {
    if text.chars().count() > TITLE_MAX_CHARS {
        format!(
            "{}...",
            text.chars().take(TITLE_MAX_CHARS).collect::<String>()
        )
    } else {
        text.to_string()
    }
}
