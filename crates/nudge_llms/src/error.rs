//! Provider error types

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Missing API key for provider '{0}'")]
    MissingApiKey(String),

    #[error("Provider not found: {0}")]
    ProviderNotFound(String),

    /// The provider answered with a non-success status.
    #[error("{provider} API error {status}: {message}")]
    Api {
        provider: String,
        status: u16,
        message: String,
    },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Operation not supported: {0}")]
    Unsupported(String),

    #[error("{0}")]
    Other(String),
}

impl Error {
    pub fn api_error(provider: impl Into<String>, status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            provider: provider.into(),
            status,
            message: message.into(),
        }
    }

    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::InvalidResponse(message.into())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
