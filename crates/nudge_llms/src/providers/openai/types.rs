//! Chat Completions wire types and client settings

use nudge_core::BiasMapping;
use serde::{Deserialize, Serialize};

pub(crate) const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Where and how to reach an OpenAI-compatible endpoint.
#[derive(Clone)]
pub struct OpenAIConfig {
    pub api_key: String,
    /// Without a trailing slash or `/chat/completions`
    pub base_url: String,
    /// Sent as `OpenAI-Organization`
    pub organization_id: Option<String>,
    /// Sent as `OpenAI-Project`
    pub project_id: Option<String>,
}

impl OpenAIConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            organization_id: None,
            project_id: None,
        }
    }

    /// Accepts either an API base (`.../v1`) or the full completions endpoint.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        let url = base_url.into();
        let url = url.trim_end_matches('/');
        self.base_url = url
            .strip_suffix("/chat/completions")
            .unwrap_or(url)
            .trim_end_matches('/')
            .to_string();
        self
    }

    pub fn with_organization_id(mut self, org_id: impl Into<String>) -> Self {
        self.organization_id = Some(org_id.into());
        self
    }

    pub fn with_project_id(mut self, project_id: impl Into<String>) -> Self {
        self.project_id = Some(project_id.into());
        self
    }

    /// Settings from a variable source; `None` when the key variable is missing or blank.
    pub fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
        key_var: &str,
        base_url_var: &str,
    ) -> Option<Self> {
        let api_key = lookup(key_var).filter(|k| !k.trim().is_empty())?;
        let config = Self::new(api_key);
        Some(match lookup(base_url_var) {
            Some(base_url) if !base_url.trim().is_empty() => config.with_base_url(base_url),
            _ => config,
        })
    }

    pub(crate) fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

impl std::fmt::Debug for OpenAIConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAIConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("organization_id", &self.organization_id)
            .field("project_id", &self.project_id)
            .finish()
    }
}

/// `POST /chat/completions` body
#[derive(Debug, Serialize)]
pub struct CompletionBody {
    pub model: String,
    pub messages: Vec<WireMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_completion_tokens: Option<u32>,
    /// Serialized with string keys: `{"2437": -100}`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logit_bias: Option<BiasMapping>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct WireMessage {
    pub role: String,
    #[serde(default)]
    pub content: Option<String>,
    /// Set instead of `content` when the model declines to answer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refusal: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Completion {
    pub id: String,
    pub model: String,
    pub choices: Vec<CompletionChoice>,
    #[serde(default)]
    pub usage: Option<TokenCounts>,
}

#[derive(Debug, Deserialize)]
pub struct CompletionChoice {
    pub message: WireMessage,
    pub finish_reason: Option<String>,
}

#[derive(Debug, Deserialize, Clone, Copy)]
pub struct TokenCounts {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// `{"error": {"message": ..., "type": ..., "code": ...}}`; only `message` is surfaced.
#[derive(Debug, Deserialize)]
pub struct ErrorEnvelope {
    pub error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
pub struct ErrorDetail {
    pub message: String,
}

/// `GET /models` body
#[derive(Debug, Deserialize)]
pub struct ModelList {
    #[serde(default)]
    pub data: Vec<ModelEntry>,
}

#[derive(Debug, Deserialize)]
pub struct ModelEntry {
    pub id: String,
}

/// o-series reasoning models reject `max_tokens` and take `max_completion_tokens`.
pub fn is_reasoning_model(model: &str) -> bool {
    ["o1", "o3", "o4"].iter().any(|family| {
        model
            .strip_prefix(family)
            .is_some_and(|rest| rest.is_empty() || rest.starts_with('-'))
    })
}
