//! Bias compiler error types

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BiasError {
    /// No encoding table is known for the model name.
    #[error("No tokenizer encoding known for model '{0}'")]
    UnknownModel(String),

    #[error("Unknown encoding: {0}")]
    UnknownEncoding(String),

    /// The encoding table exists but could not be loaded.
    #[error("Failed to load encoding '{encoding}': {message}")]
    EncodingLoad { encoding: String, message: String },

    #[error("Bias value {0} is outside [-100, 100]")]
    MagnitudeOutOfRange(f64),
}

pub type Result<T> = std::result::Result<T, BiasError>;
