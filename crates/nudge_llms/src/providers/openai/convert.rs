//! Mapping between the provider-neutral types and the Chat Completions wire format

use super::types::{
    ErrorEnvelope, WireMessage, CompletionBody, Completion, is_reasoning_model,
};
use crate::error::{Error, Result};
use crate::types::{FinishReason, GenerateRequest, GenerateResponse, Message, Role, Usage};

pub fn to_completion_body(req: &GenerateRequest) -> CompletionBody {
    let messages = req
        .messages
        .iter()
        .map(|m| WireMessage {
            role: m.role.as_str().to_string(),
            content: Some(m.content.clone()),
            refusal: None,
        })
        .collect();

    let (max_tokens, max_completion_tokens) = if is_reasoning_model(&req.model) {
        (None, req.options.max_tokens)
    } else {
        (req.options.max_tokens, None)
    };

    // An empty mapping biases nothing; leave the field off the wire.
    let logit_bias = req
        .options
        .logit_bias
        .clone()
        .filter(|mapping| !mapping.is_empty());

    CompletionBody {
        model: req.model.clone(),
        messages,
        temperature: req.options.temperature,
        max_tokens,
        max_completion_tokens,
        logit_bias,
    }
}

/// The first choice becomes the reply; a refusal stands in for missing content.
pub fn from_completion(resp: Completion) -> Result<GenerateResponse> {
    let choice = resp
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| Error::invalid_response("response contained no choices"))?;

    let role = choice
        .message
        .role
        .parse::<Role>()
        .unwrap_or(Role::Assistant);
    let content = choice
        .message
        .content
        .or(choice.message.refusal)
        .unwrap_or_default();

    let usage = resp
        .usage
        .map(|u| Usage {
            prompt_tokens: u.prompt_tokens,
            completion_tokens: u.completion_tokens,
            total_tokens: u.total_tokens,
        })
        .unwrap_or_default();

    Ok(GenerateResponse {
        id: resp.id,
        model: resp.model,
        message: Message::new(role, content),
        finish_reason: choice.finish_reason.as_deref().map(FinishReason::from),
        usage,
    })
}

/// Human-readable message from an error body, falling back to the raw text.
pub fn error_message(body: &str) -> String {
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) => envelope.error.message,
        Err(_) if body.trim().is_empty() => "empty error body".to_string(),
        Err(_) => body.trim().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::openai::types::{CompletionChoice, TokenCounts};
    use nudge_core::BiasMapping;

    fn response(content: Option<&str>) -> Completion {
        Completion {
            id: "chatcmpl-1".to_string(),
            model: "gpt-4o-mini".to_string(),
            choices: vec![CompletionChoice {
                message: WireMessage {
                    role: "assistant".to_string(),
                    content: content.map(str::to_string),
                    refusal: None,
                },
                finish_reason: Some("stop".to_string()),
            }],
            usage: Some(TokenCounts {
                prompt_tokens: 10,
                completion_tokens: 3,
                total_tokens: 13,
            }),
        }
    }

    #[test]
    fn test_request_carries_logit_bias() {
        let req = GenerateRequest::new("gpt-4o-mini", vec![Message::user("hi")])
            .with_logit_bias(Some(BiasMapping::uniform([2437, 1058], -100.0)));

        let json = serde_json::to_value(to_completion_body(&req)).unwrap();
        assert_eq!(json["logit_bias"], serde_json::json!({"1058": -100, "2437": -100}));

        let body = serde_json::to_string(&to_completion_body(&req)).unwrap();
        assert!(body.contains(r#""logit_bias":{"1058":-100,"2437":-100}"#), "{body}");
        assert_eq!(json["messages"][0]["role"], "user");
    }

    #[test]
    fn test_empty_logit_bias_is_omitted() {
        let req = GenerateRequest::new("gpt-4o-mini", vec![Message::user("hi")])
            .with_logit_bias(Some(BiasMapping::default()));

        let json = serde_json::to_value(to_completion_body(&req)).unwrap();
        assert!(json.get("logit_bias").is_none());
    }

    #[test]
    fn test_reasoning_model_uses_max_completion_tokens() {
        let req = GenerateRequest::new("o3-mini", vec![Message::user("hi")]).with_max_tokens(512);
        let body = to_completion_body(&req);
        assert_eq!(body.max_tokens, None);
        assert_eq!(body.max_completion_tokens, Some(512));

        let req = GenerateRequest::new("gpt-4o-mini", vec![Message::user("hi")]).with_max_tokens(512);
        let body = to_completion_body(&req);
        assert_eq!(body.max_tokens, Some(512));
        assert_eq!(body.max_completion_tokens, None);
    }

    #[test]
    fn test_response_conversion() {
        let resp = from_completion(response(Some("Hello!"))).unwrap();
        assert_eq!(resp.message, Message::assistant("Hello!"));
        assert_eq!(resp.finish_reason, Some(FinishReason::Stop));
        assert_eq!(resp.usage.total_tokens, 13);
    }

    #[test]
    fn test_null_content_becomes_empty() {
        let resp = from_completion(response(None)).unwrap();
        assert_eq!(resp.message.content, "");
    }

    #[test]
    fn test_no_choices_is_invalid() {
        let mut resp = response(Some("x"));
        resp.choices.clear();
        assert!(matches!(
            from_completion(resp),
            Err(Error::InvalidResponse(_))
        ));
    }

    #[test]
    fn test_error_message_extraction() {
        let body = r#"{"error":{"message":"Incorrect API key provided","type":"invalid_request_error","code":"invalid_api_key"}}"#;
        assert_eq!(error_message(body), "Incorrect API key provided");
        assert_eq!(error_message("upstream timeout\n"), "upstream timeout");
        assert_eq!(error_message(""), "empty error body");
    }
}
