use anyhow::{Context, Result};
use colored::Colorize;
use std::fs;
use std::path::{Path, PathBuf};

use musechat_models::Conversation;

use crate::ConversationStore;

/// File-backed store holding the entire conversation list as one pretty-printed
/// JSON document at a fixed path.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ConversationStore for JsonFileStore {
    fn load(&self) -> Vec<Conversation> {
        if !self.path.exists() {
            return Vec::new();
        }

        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) => {
                eprintln!(
                    "{} Failed to read conversations from {}: {}",
                    "⚠️".yellow(),
                    self.path.display(),
                    e
                );
                return Vec::new();
            }
        };

        match serde_json::from_str(&json) {
            Ok(conversations) => conversations,
            Err(e) => {
                eprintln!(
                    "{} Corrupt conversation state in {}: {}",
                    "⚠️".yellow(),
                    self.path.display(),
                    e
                );
                Vec::new()
            }
        }
    }

    fn save(&self, conversations: &[Conversation]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        let json = serde_json::to_string_pretty(conversations)
            .context("Failed to serialize conversations")?;

        fs::write(&self.path, json)
            .with_context(|| format!("Failed to write conversations to {}", self.path.display()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use musechat_models::Message;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn sample_conversations() -> Vec<Conversation> {
        let mut first = Conversation::new();
        first.title = "Weather talk".to_string();
        first.push_message(Message::user("will it rain?", None));
        first.push_message(Message::assistant(
            "probably",
            Some("deepseek/deepseek-chat:free".to_string()),
        ));

        let second = Conversation::new();
        vec![first, second]
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path().join("conversations.json"));

        let conversations = sample_conversations();
        store.save(&conversations).unwrap();

        let loaded = store.load();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].id, conversations[0].id);
        assert_eq!(loaded[0].title, "Weather talk");
        assert_eq!(loaded[0].messages.len(), 2);
        assert_eq!(loaded[0].messages[1].content, "probably");
        assert_eq!(loaded[0].created_at, conversations[0].created_at);
    }

    #[test]
    fn load_missing_file_yields_empty_list() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path().join("nope.json"));
        assert!(store.load().is_empty());
    }

    #[test]
    fn load_corrupt_file_yields_empty_list() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("conversations.json");
        fs::write(&path, "{definitely not a conversation list").unwrap();

        let store = JsonFileStore::new(&path);
        assert!(store.load().is_empty());
    }

    #[test]
    fn save_creates_missing_parent_directories() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path().join("deep/nested/conversations.json"));
        store.save(&sample_conversations()).unwrap();
        assert_eq!(store.load().len(), 2);
    }
}
