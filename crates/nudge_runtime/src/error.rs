//! Runtime error types

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RuntimeError {
    /// The hosted model call failed (network, auth, quota, bad response).
    #[error("LLM error: {0}")]
    LlmFailed(String),

    #[error("Conversation has no messages")]
    EmptyConversation,

    /// Tokenizer setup failed; raised at startup, never per request.
    #[error("Tokenizer error: {0}")]
    Tokenizer(#[from] nudge_core::BiasError),
}

pub type Result<T> = std::result::Result<T, RuntimeError>;
