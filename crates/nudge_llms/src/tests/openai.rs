use mockito::{Matcher, Server};
use nudge_core::BiasMapping;
use serde_json::json;

use crate::error::Error;
use crate::provider::Provider;
use crate::providers::openai::{OpenAIConfig, OpenAIProvider};
use crate::types::{GenerateRequest, Message, Role};

const COMPLETION: &str = r#"{
    "id": "chatcmpl-abc",
    "object": "chat.completion",
    "created": 1700000000,
    "model": "gpt-4o-mini-2024-07-18",
    "choices": [{
        "index": 0,
        "message": { "role": "assistant", "content": "It is noon." },
        "finish_reason": "stop"
    }],
    "usage": { "prompt_tokens": 20, "completion_tokens": 4, "total_tokens": 24 }
}"#;

fn provider(base_url: &str) -> OpenAIProvider {
    OpenAIProvider::new(OpenAIConfig::new("sk-test").with_base_url(base_url)).unwrap()
}

#[test]
fn test_missing_api_key() {
    let result = OpenAIProvider::new(OpenAIConfig::new(""));
    assert!(matches!(result, Err(Error::MissingApiKey(_))));
}

#[test]
fn test_base_url_normalization() {
    let config = OpenAIConfig::new("k").with_base_url("http://localhost:8080/v1/chat/completions/");
    assert_eq!(config.base_url, "http://localhost:8080/v1");

    let config = OpenAIConfig::new("k").with_base_url("http://localhost:8080/v1/");
    assert_eq!(config.base_url, "http://localhost:8080/v1");
}

#[test]
fn test_from_lookup() {
    let provider = OpenAIProvider::from_lookup(|key| match key {
        "OPENAI_API_KEY" => Some("sk-env".to_string()),
        "OPENAI_BASE_URL" => Some("http://proxy.local/v1/".to_string()),
        _ => None,
    })
    .unwrap();
    assert_eq!(provider.config().api_key, "sk-env");
    assert_eq!(provider.config().base_url, "http://proxy.local/v1");

    let missing = OpenAIProvider::from_lookup(|_| None);
    assert!(matches!(missing, Err(Error::MissingApiKey(_))));

    let blank = OpenAIProvider::from_lookup(|_| Some("  ".to_string()));
    assert!(matches!(blank, Err(Error::MissingApiKey(_))));
}

#[test]
fn test_config_debug_redacts_key() {
    let debug = format!("{:?}", OpenAIConfig::new("sk-secret"));
    assert!(!debug.contains("sk-secret"));
}

#[test]
fn test_build_headers() {
    let provider = OpenAIProvider::new(
        OpenAIConfig::new("sk-test")
            .with_organization_id("org-1")
            .with_project_id("proj-1"),
    )
    .unwrap();

    let headers = provider.build_headers(None);
    assert_eq!(headers.get("Authorization"), Some("Bearer sk-test"));
    assert_eq!(headers.get("OpenAI-Organization"), Some("org-1"));
    assert_eq!(headers.get("OpenAI-Project"), Some("proj-1"));
}

#[tokio::test]
async fn test_generate_sends_logit_bias() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/chat/completions")
        .match_header("authorization", "Bearer sk-test")
        .match_body(Matcher::PartialJson(json!({
            "model": "gpt-4o-mini",
            "messages": [
                { "role": "system", "content": "be brief" },
                { "role": "user", "content": "what time is it?" }
            ],
            "logit_bias": { "1058": -50, "4238": -50 }
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(COMPLETION)
        .create_async()
        .await;

    let request = GenerateRequest::new(
        "gpt-4o-mini",
        vec![Message::system("be brief"), Message::user("what time is it?")],
    )
    .with_logit_bias(Some(BiasMapping::uniform([4238, 1058], -50.0)));

    let response = provider(&server.url()).generate(request).await.unwrap();

    mock.assert_async().await;
    assert_eq!(response.id, "chatcmpl-abc");
    assert_eq!(response.message.role, Role::Assistant);
    assert_eq!(response.message.content, "It is noon.");
    assert_eq!(response.usage.total_tokens, 24);
}

#[tokio::test]
async fn test_generate_surfaces_api_error() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/chat/completions")
        .with_status(401)
        .with_body(r#"{"error":{"message":"Incorrect API key provided","type":"invalid_request_error"}}"#)
        .create_async()
        .await;

    let request = GenerateRequest::new("gpt-4o-mini", vec![Message::user("hi")]);
    let err = provider(&server.url()).generate(request).await.unwrap_err();

    match err {
        Error::Api { provider, status, message } => {
            assert_eq!(provider, "openai");
            assert_eq!(status, 401);
            assert_eq!(message, "Incorrect API key provided");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_generate_rejects_empty_choices() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/chat/completions")
        .with_status(200)
        .with_body(r#"{"id":"x","model":"gpt-4o-mini","choices":[]}"#)
        .create_async()
        .await;

    let request = GenerateRequest::new("gpt-4o-mini", vec![Message::user("hi")]);
    let err = provider(&server.url()).generate(request).await.unwrap_err();
    assert!(matches!(err, Error::InvalidResponse(_)));
}

#[tokio::test]
async fn test_list_models() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/models")
        .with_status(200)
        .with_body(r#"{"data":[{"id":"gpt-4o-mini"},{"id":"gpt-4o"}]}"#)
        .create_async()
        .await;

    let models = provider(&server.url()).list_models().await.unwrap();
    assert_eq!(models, vec!["gpt-4o", "gpt-4o-mini"]);
}
