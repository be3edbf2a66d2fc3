//! nudge-core: the bias compiler.
//!
//! Turns a human-supplied substring plus a bias value into the `logit_bias`
//! mapping a chat-completion API accepts. Subword tokenizers give `"time"` and
//! `" time"` different ids, so both surface forms are covered.
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use nudge_core::{BiasCompiler, BiasMagnitude, TiktokenEncoder};
//!
//! let encoder = TiktokenEncoder::for_model("gpt-4o-mini")?;
//! let compiler = BiasCompiler::new(Arc::new(encoder));
//! let mapping = compiler.compute(Some("time"), Some(BiasMagnitude::new(-50.0)?));
//! # Ok::<(), nudge_core::BiasError>(())
//! ```

pub mod bias;
pub mod encoder;
pub mod error;

#[cfg(test)]
mod tests;

pub use bias::{BiasCompiler, BiasMagnitude, BiasMapping, BiasRequest};
pub use encoder::{Encoder, TiktokenEncoder, TokenId};
pub use error::{BiasError, Result};
