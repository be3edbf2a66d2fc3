use crate::error::Error;
use crate::provider::{Provider, ProviderRegistry};
use crate::types::{GenerateRequest, GenerateResponse, Headers};
use async_trait::async_trait;

struct MockProvider {
    id: &'static str,
}

#[async_trait]
impl Provider for MockProvider {
    fn provider_id(&self) -> &str {
        self.id
    }

    fn build_headers(&self, _custom_headers: Option<&Headers>) -> Headers {
        Headers::new()
    }

    async fn generate(&self, _request: GenerateRequest) -> crate::error::Result<GenerateResponse> {
        Err(Error::Other("mock".to_string()))
    }
}

#[test]
fn test_register_and_get_provider() {
    let registry = ProviderRegistry::new().register("test", MockProvider { id: "test" });

    let provider = registry.get_provider("test");
    assert!(provider.is_ok());
    assert_eq!(provider.unwrap().provider_id(), "test");
}

#[test]
fn test_provider_not_found() {
    let registry = ProviderRegistry::new();
    let result = registry.get_provider("nonexistent");
    assert!(matches!(result, Err(Error::ProviderNotFound(id)) if id == "nonexistent"));
}

#[test]
fn test_list_providers() {
    let registry = ProviderRegistry::new()
        .register("alpha", MockProvider { id: "alpha" })
        .register("beta", MockProvider { id: "beta" });

    assert_eq!(registry.list_providers(), vec!["alpha", "beta"]);
    assert!(registry.contains("beta"));
    assert!(!registry.contains("gamma"));
}

#[test]
fn test_register_replaces_and_shares() {
    let shared: std::sync::Arc<dyn Provider> = std::sync::Arc::new(MockProvider { id: "second" });
    let registry = ProviderRegistry::new()
        .register("main", MockProvider { id: "first" })
        .register_shared("main", shared.clone());

    assert_eq!(registry.list_providers(), vec!["main"]);
    let provider = registry.get_provider("main").unwrap();
    assert_eq!(provider.provider_id(), "second");
    assert!(std::sync::Arc::ptr_eq(&provider, &shared));
}

#[tokio::test]
async fn test_list_models_defaults_to_unsupported() {
    let provider = MockProvider { id: "mock" };
    assert!(matches!(
        provider.list_models().await,
        Err(Error::Unsupported(_))
    ));
}

#[test]
fn test_headers_merge_overrides() {
    let mut base = Headers::new();
    base.insert("Authorization", "Bearer a");
    base.insert("X-Keep", "1");

    let mut custom = Headers::new();
    custom.insert("Authorization", "Bearer b");
    base.merge_with(&custom);

    assert_eq!(base.get("Authorization"), Some("Bearer b"));
    assert_eq!(base.get("X-Keep"), Some("1"));

    let map = base.to_reqwest_headers();
    assert_eq!(map.len(), 2);
}
