//! Chat Completions client

use async_trait::async_trait;
use reqwest::{Client, Response};

use super::convert::{error_message, from_completion, to_completion_body};
use super::types::{Completion, ModelList, OpenAIConfig};
use crate::error::{Error, Result};
use crate::provider::Provider;
use crate::types::{GenerateRequest, GenerateResponse, Headers};

const PROVIDER_ID: &str = "openai";

/// Client for OpenAI or any endpoint speaking its Chat Completions API.
pub struct OpenAIProvider {
    config: OpenAIConfig,
    client: Client,
}

impl OpenAIProvider {
    pub const API_KEY_ENV: &'static str = "OPENAI_API_KEY";
    pub const BASE_URL_ENV: &'static str = "OPENAI_BASE_URL";

    pub fn new(config: OpenAIConfig) -> Result<Self> {
        if config.api_key.trim().is_empty() {
            return Err(Error::MissingApiKey(PROVIDER_ID.to_string()));
        }

        let client = Client::builder()
            .user_agent(concat!("nudge/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { config, client })
    }

    /// Reads `OPENAI_API_KEY` and, if set, `OPENAI_BASE_URL`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let config = OpenAIConfig::from_lookup(lookup, Self::API_KEY_ENV, Self::BASE_URL_ENV)
            .ok_or_else(|| Error::MissingApiKey(PROVIDER_ID.to_string()))?;
        Self::new(config)
    }

    pub fn config(&self) -> &OpenAIConfig {
        &self.config
    }

    /// Pass 2xx responses through; turn anything else into [`Error::Api`].
    async fn ensure_success(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(Error::api_error(PROVIDER_ID, status.as_u16(), error_message(&body)))
    }
}

#[async_trait]
impl Provider for OpenAIProvider {
    fn provider_id(&self) -> &str {
        PROVIDER_ID
    }

    fn build_headers(&self, custom_headers: Option<&Headers>) -> Headers {
        let mut headers = Headers::new();
        headers.insert("Authorization", format!("Bearer {}", self.config.api_key));
        headers.insert("Content-Type", "application/json");
        if let Some(org_id) = &self.config.organization_id {
            headers.insert("OpenAI-Organization", org_id);
        }
        if let Some(project_id) = &self.config.project_id {
            headers.insert("OpenAI-Project", project_id);
        }
        if let Some(custom) = custom_headers {
            headers.merge_with(custom);
        }
        headers
    }

    async fn generate(&self, request: GenerateRequest) -> Result<GenerateResponse> {
        let body = to_completion_body(&request);
        tracing::debug!(
            model = %body.model,
            messages = body.messages.len(),
            biased_tokens = body.logit_bias.as_ref().map_or(0, |m| m.len()) as u64,
            "Sending chat completion"
        );

        let headers = self.build_headers(request.options.headers.as_ref());
        let response = self
            .client
            .post(self.config.endpoint("chat/completions"))
            .headers(headers.to_reqwest_headers())
            .json(&body)
            .send()
            .await?;

        let completion: Completion = Self::ensure_success(response).await?.json().await?;
        from_completion(completion)
    }

    async fn list_models(&self) -> Result<Vec<String>> {
        let response = self
            .client
            .get(self.config.endpoint("models"))
            .headers(self.build_headers(None).to_reqwest_headers())
            .send()
            .await?;

        let list: ModelList = Self::ensure_success(response).await?.json().await?;
        let mut models: Vec<String> = list.data.into_iter().map(|m| m.id).collect();
        models.sort();
        Ok(models)
    }
}
