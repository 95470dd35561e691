use thiserror::Error;
use uuid::Uuid;

/// Errors reported by [`crate::ChatManager`] operations.
///
/// Completion-call failures are not part of this taxonomy: they land in
/// `ChatState::error` instead of crossing the operation boundary.
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("conversation {0} not found")]
    NotFound(Uuid),

    #[error("title cannot be empty")]
    EmptyTitle,

    #[error("a completion request is already in flight")]
    RequestInFlight,

    #[error("failed to write export file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to serialize export document: {0}")]
    Serialize(#[from] serde_json::Error),
}
