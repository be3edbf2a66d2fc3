use async_trait::async_trait;

use crate::error::{Error, Result};
use crate::types::{GenerateRequest, GenerateResponse, Headers};

/// A hosted chat-completion backend.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Stable identifier, e.g. `openai`.
    fn provider_id(&self) -> &str;

    /// Authentication and content headers, with `custom_headers` merged on top.
    fn build_headers(&self, custom_headers: Option<&Headers>) -> Headers;

    /// Run one completion and return the reply.
    async fn generate(&self, request: GenerateRequest) -> Result<GenerateResponse>;

    /// Model IDs the provider exposes.
    async fn list_models(&self) -> Result<Vec<String>> {
        Err(Error::Unsupported(format!(
            "{} does not list models",
            self.provider_id()
        )))
    }
}
