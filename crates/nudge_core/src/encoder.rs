//! Text → token id encoders.

use std::sync::Arc;

use tiktoken_rs::CoreBPE;
use tiktoken_rs::tokenizer::{Tokenizer, get_tokenizer};

use crate::error::{BiasError, Result};

/// Token identifier as understood by the hosted model.
pub type TokenId = u32;

/// Maps text to token ids under one fixed encoding table.
///
/// Implementations must be deterministic: the same text always yields the same ids.
pub trait Encoder: Send + Sync {
    /// Encode `text` as ordinary text (special-token markers are not interpreted).
    fn encode(&self, text: &str) -> Vec<TokenId>;

    /// Name of the encoding table, e.g. `o200k_base`.
    fn name(&self) -> &str;
}

/// Encoder backed by OpenAI's BPE tables via `tiktoken-rs`.
#[derive(Clone)]
pub struct TiktokenEncoder {
    bpe: Arc<CoreBPE>,
    encoding: &'static str,
}

impl TiktokenEncoder {
    /// Encoder matching the table the hosted model uses internally.
    ///
    /// `gpt-4o` and `gpt-4o-mini` resolve to `o200k_base`, `gpt-4` and
    /// `gpt-3.5-turbo` to `cl100k_base`.
    pub fn for_model(model: &str) -> Result<Self> {
        let encoding = match get_tokenizer(model) {
            Some(Tokenizer::O200kBase) => "o200k_base",
            Some(Tokenizer::Cl100kBase) => "cl100k_base",
            Some(Tokenizer::P50kBase) | Some(Tokenizer::P50kEdit) => "p50k_base",
            Some(Tokenizer::R50kBase) | Some(Tokenizer::Gpt2) => "r50k_base",
            #[allow(unreachable_patterns)]
            _ => return Err(BiasError::UnknownModel(model.to_string())),
        };
        Self::with_encoding(encoding)
    }

    /// Encoder for a named table.
    ///
    /// Supported encodings: "o200k_base", "cl100k_base", "p50k_base", "r50k_base"
    pub fn with_encoding(encoding: &str) -> Result<Self> {
        let (bpe, name) = match encoding {
            "o200k_base" => (tiktoken_rs::o200k_base(), "o200k_base"),
            "cl100k_base" => (tiktoken_rs::cl100k_base(), "cl100k_base"),
            "p50k_base" => (tiktoken_rs::p50k_base(), "p50k_base"),
            "r50k_base" => (tiktoken_rs::r50k_base(), "r50k_base"),
            _ => return Err(BiasError::UnknownEncoding(encoding.to_string())),
        };
        let bpe = bpe.map_err(|e| BiasError::EncodingLoad {
            encoding: name.to_string(),
            message: e.to_string(),
        })?;

        tracing::debug!(encoding = name, "Loaded tokenizer encoding");

        Ok(Self {
            bpe: Arc::new(bpe),
            encoding: name,
        })
    }

    /// Text for `ids`, or `None` when they don't form valid UTF-8 on their own.
    pub fn decode(&self, ids: &[TokenId]) -> Option<String> {
        self.bpe.decode(ids.to_vec()).ok()
    }
}

impl Encoder for TiktokenEncoder {
    fn encode(&self, text: &str) -> Vec<TokenId> {
        self.bpe
            .encode_ordinary(text)
            .into_iter()
            .map(|t| t as TokenId)
            .collect()
    }

    fn name(&self) -> &str {
        self.encoding
    }
}

impl std::fmt::Debug for TiktokenEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TiktokenEncoder")
            .field("encoding", &self.encoding)
            .finish_non_exhaustive()
    }
}
