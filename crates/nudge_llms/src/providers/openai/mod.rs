//! OpenAI provider module

mod convert;
mod provider;
mod types;

pub use provider::OpenAIProvider;
pub use types::OpenAIConfig;
