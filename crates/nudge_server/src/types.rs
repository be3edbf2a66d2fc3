//! Request and response bodies of the HTTP API.

use nudge_core::{BiasMagnitude, BiasMapping, BiasRequest};
use nudge_llms::{Message, Usage};
use nudge_runtime::{ChatInput, RunOutcome};
use serde::Serialize;

/// A validated `POST /api/chat` body.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatRequest {
    pub content: String,
    pub logit_bias_string: Option<String>,
    pub logit_bias_value: Option<BiasMagnitude>,
}

impl ChatRequest {
    pub fn to_input(&self) -> ChatInput {
        ChatInput::user(self.content.clone()).with_bias(BiasRequest {
            target_text: self.logit_bias_string.clone(),
            magnitude: self.logit_bias_value,
        })
    }
}

/// One validation problem, addressed by JSON path.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Issue {
    pub code: &'static str,
    pub path: Vec<String>,
    pub message: String,
}

impl Issue {
    pub fn new(code: &'static str, path: &[&str], message: impl Into<String>) -> Self {
        Self {
            code,
            path: path.iter().map(|p| p.to_string()).collect(),
            message: message.into(),
        }
    }
}

/// The runner's state after the exchange.
#[derive(Debug, Clone, Serialize)]
pub struct FullResult {
    pub messages: Vec<Message>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logit_bias_string: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logit_bias_value: Option<BiasMagnitude>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub computed_logit_bias: Option<BiasMapping>,
    pub model: String,
    pub usage: Usage,
}

/// Diagnostics returned next to every reply.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatLogs {
    pub full_result: FullResult,
    pub messages: Vec<Message>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logit_bias_string: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logit_bias_value: Option<BiasMagnitude>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub computed_logit_bias: Option<BiasMapping>,
    /// RFC 3339, UTC
    pub timestamp: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatResponse {
    pub success: bool,
    /// Reply content, empty when the model returned none
    pub result: String,
    pub logs: ChatLogs,
}

impl ChatResponse {
    pub fn new(request: ChatRequest, outcome: RunOutcome, timestamp: String) -> Self {
        Self {
            success: true,
            result: outcome.reply.content,
            logs: ChatLogs {
                full_result: FullResult {
                    messages: outcome.messages.clone(),
                    logit_bias_string: request.logit_bias_string.clone(),
                    logit_bias_value: request.logit_bias_value,
                    computed_logit_bias: outcome.computed_logit_bias.clone(),
                    model: outcome.model,
                    usage: outcome.usage,
                },
                messages: outcome.messages,
                logit_bias_string: request.logit_bias_string,
                logit_bias_value: request.logit_bias_value,
                computed_logit_bias: outcome.computed_logit_bias,
                timestamp,
            },
        }
    }
}

/// Body of every non-2xx response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub success: bool,
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<Issue>>,
}
