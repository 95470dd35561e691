//! Completion client for the OpenRouter chat-completions API.
//!
//! One `complete` call is one request/response cycle: no retries, fixed
//! sampling parameters, errors mapped into the [`ApiError`] taxonomy. A
//! streaming variant exists for callers that want incremental fragments.

pub mod client;
pub mod error;

pub use client::{
    Completion, CompletionClient, OpenRouterClient, MAX_TOKENS, OPENROUTER_API_URL, TEMPERATURE,
};
pub use error::ApiError;
