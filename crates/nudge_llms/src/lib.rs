//! nudge_llms: chat-completion providers for nudge.
//!
//! A [`GenerateRequest`] carries the conversation plus an optional
//! [`BiasMapping`](nudge_core::BiasMapping) in its options; each [`Provider`]
//! turns that into its own wire format.
//!
//! ```text
//! GenerateRequest ──► ProviderRegistry::get_provider("openai")
//!   messages              │
//!   options.logit_bias    ▼
//!                   OpenAIProvider ──► POST {base_url}/chat/completions
//!                         │               { "logit_bias": {"2437": -100}, ... }
//!                         ▼
//!                  GenerateResponse
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use nudge_llms::{OpenAIProvider, ProviderRegistry};
//!
//! let provider = OpenAIProvider::from_env()?;
//! let registry = ProviderRegistry::new().register("openai", provider);
//! # Ok::<(), nudge_llms::Error>(())
//! ```

pub mod error;
pub mod provider;
pub mod providers;
pub mod types;

#[cfg(test)]
mod tests;

pub use error::{Error, Result};
pub use provider::{Provider, ProviderRegistry};

#[cfg(feature = "openai")]
pub use providers::OpenAIProvider;
#[cfg(feature = "openai")]
pub use providers::openai::OpenAIConfig;

pub use types::{
    FinishReason, GenerateOptions, GenerateRequest, GenerateResponse, Headers, Message, Role,
    Usage,
};
