pub mod config;
pub mod error;
pub mod runner;

pub use config::RuntimeConfig;
pub use error::{Result, RuntimeError};
pub use runner::{ChatInput, ConversationRunner, RunOutcome};
