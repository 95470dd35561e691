// Models module - data structures shared across the workspace
pub mod chat;
pub mod registry;
pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use chat::{ChatState, Conversation, Message, Role};
pub use registry::{find_model, ModelInfo, DEFAULT_MODEL, FREE_MODELS};
pub use requests::{ApiMessage, ChatRequest};
pub use responses::{
    ApiErrorBody, ApiErrorDetail, ChatResponse, Choice, ChoiceMessage, Delta, StreamChoice,
    StreamChunk, Usage,
};
