//! Shape checks for `POST /api/chat` bodies.
//!
//! Types are enforced by serde; presence and range by `validator`. Every
//! validator failure is reported, so a client sees all bad fields in one 400.

use nudge_constant::{MAX_BIAS, MIN_BIAS};
use nudge_core::BiasMagnitude;
use serde::Deserialize;
use serde_json::Value;
use validator::{Validate, ValidationErrors};

use crate::types::{ChatRequest, Issue};

/// Wire form of a chat request. Unknown fields are ignored; `null` counts as absent.
#[derive(Debug, Deserialize, Validate)]
pub struct ChatBody {
    #[validate(required)]
    pub content: Option<String>,
    pub logit_bias_string: Option<String>,
    #[validate(range(min = -100.0, max = 100.0))]
    pub logit_bias_value: Option<f64>,
}

impl ChatBody {
    fn issues(&self, errors: &ValidationErrors) -> Vec<Issue> {
        let mut issues: Vec<Issue> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, field_errors)| {
                let field: &str = &field;
                field_errors
                    .iter()
                    .map(|e| self.issue(field, &e.code))
                    .collect::<Vec<_>>()
            })
            .collect();
        issues.sort_by(|a, b| a.path.cmp(&b.path));
        issues
    }

    fn issue(&self, field: &str, code: &str) -> Issue {
        match code {
            "required" => Issue::new("invalid_type", &[field], "Required"),
            "range" if self.logit_bias_value.is_some_and(|v| v < MIN_BIAS) => Issue::new(
                "too_small",
                &[field],
                format!("Number must be greater than or equal to {MIN_BIAS}"),
            ),
            "range" => Issue::new(
                "too_big",
                &[field],
                format!("Number must be less than or equal to {MAX_BIAS}"),
            ),
            other => Issue::new("custom", &[field], format!("Failed check: {other}")),
        }
    }
}

/// Validate a decoded JSON body.
pub fn parse_chat_request(body: &Value) -> Result<ChatRequest, Vec<Issue>> {
    let parsed = ChatBody::deserialize(body)
        .map_err(|e| vec![Issue::new("invalid_type", &[], e.to_string())])?;
    parsed.validate().map_err(|errors| parsed.issues(&errors))?;

    let logit_bias_value = parsed
        .logit_bias_value
        .map(BiasMagnitude::new)
        .transpose()
        .map_err(|e| vec![Issue::new("custom", &["logit_bias_value"], e.to_string())])?;

    Ok(ChatRequest {
        content: parsed.content.unwrap_or_default(),
        logit_bias_string: parsed.logit_bias_string,
        logit_bias_value,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn codes(issues: &[Issue]) -> Vec<(&str, String)> {
        issues
            .iter()
            .map(|i| (i.code, i.path.join(".")))
            .collect()
    }

    #[test]
    fn test_minimal_body() {
        let req = parse_chat_request(&json!({ "content": "hi" })).unwrap();
        assert_eq!(req.content, "hi");
        assert!(req.logit_bias_string.is_none());
        assert!(req.logit_bias_value.is_none());
    }

    #[test]
    fn test_full_body() {
        let req = parse_chat_request(&json!({
            "content": "what time is it?",
            "logit_bias_string": "time",
            "logit_bias_value": -50,
            "extra": true
        }))
        .unwrap();
        assert_eq!(req.logit_bias_string.as_deref(), Some("time"));
        assert_eq!(req.logit_bias_value.map(|m| m.value()), Some(-50.0));
    }

    #[test]
    fn test_empty_content_is_allowed() {
        assert!(parse_chat_request(&json!({ "content": "" })).is_ok());
    }

    #[test]
    fn test_null_optional_is_absent() {
        let req =
            parse_chat_request(&json!({ "content": "x", "logit_bias_string": null })).unwrap();
        assert!(req.logit_bias_string.is_none());
    }

    #[test]
    fn test_missing_content() {
        let issues = parse_chat_request(&json!({})).unwrap_err();
        assert_eq!(codes(&issues), vec![("invalid_type", "content".to_string())]);
        assert_eq!(issues[0].message, "Required");
    }

    #[test]
    fn test_missing_content_and_bad_range_are_both_reported() {
        let issues = parse_chat_request(&json!({ "logit_bias_value": 250 })).unwrap_err();
        assert_eq!(
            codes(&issues),
            vec![
                ("invalid_type", "content".to_string()),
                ("too_big", "logit_bias_value".to_string()),
            ]
        );
    }

    #[test]
    fn test_wrong_type_is_rejected() {
        let issues = parse_chat_request(&json!({ "content": 42 })).unwrap_err();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].code, "invalid_type");
        assert!(issues[0].message.contains("expected a string"), "{}", issues[0].message);

        let issues =
            parse_chat_request(&json!({ "content": "x", "logit_bias_value": "-50" })).unwrap_err();
        assert_eq!(issues[0].code, "invalid_type");
    }

    #[test]
    fn test_bias_bounds() {
        assert!(parse_chat_request(&json!({ "content": "x", "logit_bias_value": -100 })).is_ok());
        assert!(parse_chat_request(&json!({ "content": "x", "logit_bias_value": 100 })).is_ok());

        let issues =
            parse_chat_request(&json!({ "content": "x", "logit_bias_value": -100.5 })).unwrap_err();
        assert_eq!(codes(&issues), vec![("too_small", "logit_bias_value".to_string())]);
        assert_eq!(issues[0].message, "Number must be greater than or equal to -100");

        let issues =
            parse_chat_request(&json!({ "content": "x", "logit_bias_value": 101 })).unwrap_err();
        assert_eq!(codes(&issues), vec![("too_big", "logit_bias_value".to_string())]);
    }

    #[test]
    fn test_non_object_body() {
        let issues = parse_chat_request(&json!(["content"])).unwrap_err();
        assert!(issues[0].path.is_empty());
        assert_eq!(issues[0].code, "invalid_type");
    }
}
