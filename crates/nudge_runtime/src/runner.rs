//! One exchange with the hosted model: compile the bias, then call the provider.

use std::sync::Arc;
use std::time::Instant;

use nudge_core::{BiasCompiler, BiasMapping, BiasRequest, Encoder, TiktokenEncoder};
use nudge_llms::{FinishReason, GenerateRequest, Message, Provider, Usage};
use nudge_observability::{llm_call_span, record_duration, record_error};
use serde::{Deserialize, Serialize};
use tracing::{Instrument, info};

use crate::config::RuntimeConfig;
use crate::error::{Result, RuntimeError};

/// Caller-supplied conversation plus an optional bias.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChatInput {
    /// Messages in order, without the system message.
    pub messages: Vec<Message>,
    #[serde(default)]
    pub bias: BiasRequest,
}

impl ChatInput {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            messages: vec![Message::user(content)],
            bias: BiasRequest::default(),
        }
    }

    pub fn with_bias(mut self, bias: BiasRequest) -> Self {
        self.bias = bias;
        self
    }
}

/// Result of one exchange.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunOutcome {
    /// Model that answered, as reported by the provider
    pub model: String,
    /// Caller's messages followed by the reply (no system message)
    pub messages: Vec<Message>,
    pub reply: Message,
    /// The mapping sent as `logit_bias`, echoed for logging
    #[serde(skip_serializing_if = "Option::is_none")]
    pub computed_logit_bias: Option<BiasMapping>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<FinishReason>,
    pub usage: Usage,
}

/// Runs conversations against one provider with one tokenizer.
///
/// Built once at startup and shared (e.g. behind `Arc`); holds no per-request state.
pub struct ConversationRunner {
    config: RuntimeConfig,
    provider: Arc<dyn Provider>,
    compiler: BiasCompiler,
}

impl ConversationRunner {
    pub fn new(config: RuntimeConfig, provider: Arc<dyn Provider>, compiler: BiasCompiler) -> Self {
        Self {
            config,
            provider,
            compiler,
        }
    }

    /// Build with the tiktoken encoding matching `config` (explicit encoding, else the model's).
    ///
    /// Fails when no encoding table fits; that is a startup error.
    pub fn from_config(config: RuntimeConfig, provider: Arc<dyn Provider>) -> Result<Self> {
        let encoder = match &config.encoding {
            Some(encoding) => TiktokenEncoder::with_encoding(encoding)?,
            None => TiktokenEncoder::for_model(&config.model)?,
        };
        info!(
            model = %config.model,
            encoding = encoder.name(),
            provider = provider.provider_id(),
            "Conversation runner ready"
        );
        Ok(Self::new(config, provider, BiasCompiler::new(Arc::new(encoder))))
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    pub fn compiler(&self) -> &BiasCompiler {
        &self.compiler
    }

    /// The provider request for `messages`, system message first.
    pub fn build_request(
        &self,
        messages: &[Message],
        logit_bias: Option<BiasMapping>,
    ) -> GenerateRequest {
        let mut conversation = Vec::with_capacity(messages.len() + 1);
        conversation.push(Message::system(self.config.system_prompt.clone()));
        conversation.extend(messages.iter().cloned());

        let mut request =
            GenerateRequest::new(self.config.model.clone(), conversation).with_logit_bias(logit_bias);
        if let Some(max_tokens) = self.config.max_tokens {
            request = request.with_max_tokens(max_tokens);
        }
        if let Some(temperature) = self.config.temperature {
            request = request.with_temperature(temperature);
        }
        request
    }

    /// Compile the bias, call the model once, and return the reply with the applied mapping.
    ///
    /// Provider failures come back as [`RuntimeError::LlmFailed`]; nothing is retried.
    pub async fn run(&self, input: ChatInput) -> Result<RunOutcome> {
        if input.messages.is_empty() {
            return Err(RuntimeError::EmptyConversation);
        }

        let computed_logit_bias = self.compiler.compile(&input.bias);
        let request = self.build_request(&input.messages, computed_logit_bias.clone());

        let biased_tokens = computed_logit_bias.as_ref().map_or(0, BiasMapping::len) as u64;
        let span = llm_call_span!(
            self.provider.provider_id(),
            self.config.model.as_str(),
            biased_tokens
        );

        async move {
            if tracing::enabled!(tracing::Level::DEBUG) {
                let body = serde_json::to_string(&request).unwrap_or_else(|_| format!("{request:?}"));
                tracing::debug!(target: "nudge.trace", request = %body, "LLM request");
            }

            let start = Instant::now();
            let response = match self.provider.generate(request).await {
                Ok(response) => response,
                Err(e) => {
                    let err = RuntimeError::LlmFailed(e.to_string());
                    record_error(&err);
                    return Err(err);
                }
            };
            record_duration("llm.duration_ms", start.elapsed());

            info!(
                response.id = %response.id,
                tokens.total = response.usage.total_tokens,
                "LLM reply received"
            );

            let mut messages = input.messages;
            messages.push(response.message.clone());

            Ok(RunOutcome {
                model: response.model,
                messages,
                reply: response.message,
                computed_logit_bias,
                finish_reason: response.finish_reason,
                usage: response.usage,
            })
        }
        .instrument(span)
        .await
    }
}

impl std::fmt::Debug for ConversationRunner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConversationRunner")
            .field("config", &self.config)
            .field("provider", &self.provider.provider_id())
            .field("compiler", &self.compiler)
            .finish()
    }
}
