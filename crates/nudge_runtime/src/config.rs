//! Runtime configuration for nudge

use nudge_constant::{DEFAULT_MODEL, SYSTEM_PROMPT};

/// Runtime configuration
#[derive(Debug, Clone, PartialEq)]
pub struct RuntimeConfig {
    /// Provider ID to route completions to
    pub provider: String,
    /// Hosted model name
    pub model: String,
    /// Tokenizer encoding override; resolved from `model` when unset
    pub encoding: Option<String>,
    /// System message prepended to every conversation
    pub system_prompt: String,
    /// Maximum tokens for the reply (provider default when unset)
    pub max_tokens: Option<u32>,
    pub temperature: Option<f32>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl RuntimeConfig {
    pub fn new() -> Self {
        Self {
            provider: "openai".to_string(),
            model: DEFAULT_MODEL.to_string(),
            encoding: None,
            system_prompt: SYSTEM_PROMPT.to_string(),
            max_tokens: None,
            temperature: None,
        }
    }

    pub fn with_provider(mut self, provider: impl Into<String>) -> Self {
        self.provider = provider.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_encoding(mut self, encoding: impl Into<String>) -> Self {
        self.encoding = Some(encoding.into());
        self
    }

    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = prompt.into();
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads `NUDGE_PROVIDER`, `NUDGE_MODEL`, `NUDGE_ENCODING`, `NUDGE_SYSTEM_PROMPT`,
    /// `NUDGE_MAX_TOKENS` and `NUDGE_TEMPERATURE`. Unparseable numbers are ignored.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::new();

        if let Some(provider) = lookup("NUDGE_PROVIDER") {
            config.provider = provider.to_lowercase();
        }

        if let Some(model) = lookup("NUDGE_MODEL") {
            config.model = model;
        }

        if let Some(encoding) = lookup("NUDGE_ENCODING") {
            config.encoding = Some(encoding);
        }

        if let Some(prompt) = lookup("NUDGE_SYSTEM_PROMPT") {
            config.system_prompt = prompt;
        }

        if let Some(max_tokens) = lookup("NUDGE_MAX_TOKENS") {
            if let Ok(val) = max_tokens.parse::<u32>() {
                config.max_tokens = Some(val);
            }
        }

        if let Some(temperature) = lookup("NUDGE_TEMPERATURE") {
            if let Ok(val) = temperature.parse::<f32>() {
                config.temperature = Some(val);
            }
        }

        config
    }
}
