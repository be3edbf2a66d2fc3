//! `nudge providers` subcommands.

use anyhow::{Result, anyhow};
use comfy_table::{Cell, Color};
use nudge_llms::{OpenAIProvider, ProviderRegistry};
use serde_json::json;

use crate::cli::ProvidersAction;
use crate::output;

pub(crate) struct ProviderInfo {
    pub id: &'static str,
    pub key_env: &'static str,
    pub base_url: Option<String>,
}

impl ProviderInfo {
    fn configured(&self) -> bool {
        self.base_url.is_some()
    }
}

pub(crate) struct Providers {
    pub registry: ProviderRegistry,
    pub infos: Vec<ProviderInfo>,
}

/// Register every provider whose credentials are present.
pub(crate) fn build_registry() -> Providers {
    let mut registry = ProviderRegistry::new();
    let mut infos = Vec::new();

    match OpenAIProvider::from_env() {
        Ok(provider) => {
            let base_url = provider.config().base_url.clone();
            registry = registry.register("openai", provider);
            infos.push(ProviderInfo {
                id: "openai",
                key_env: OpenAIProvider::API_KEY_ENV,
                base_url: Some(base_url),
            });
        }
        Err(_) => infos.push(ProviderInfo {
            id: "openai",
            key_env: OpenAIProvider::API_KEY_ENV,
            base_url: None,
        }),
    }

    Providers { registry, infos }
}

pub async fn handle(action: ProvidersAction) -> Result<()> {
    match action {
        ProvidersAction::List => list(),
        ProvidersAction::Models { provider } => models(&provider).await,
    }
}

fn list() -> Result<()> {
    let Providers { infos, .. } = build_registry();

    output::header("Providers");

    let mut table = output::table(&["Provider", "Status", "Base URL"]);
    let mut items = Vec::new();
    for info in &infos {
        let status = if info.configured() {
            Cell::new("configured").fg(Color::Green)
        } else {
            Cell::new(format!("missing {}", info.key_env)).fg(Color::Yellow)
        };
        table.add_row(vec![
            Cell::new(info.id).fg(Color::Green),
            status,
            Cell::new(info.base_url.as_deref().unwrap_or("-")),
        ]);
        items.push(json!({
            "id": info.id,
            "configured": info.configured(),
            "base_url": info.base_url,
        }));
    }

    output::table_print(&table, json!(items));
    Ok(())
}

async fn models(provider_id: &str) -> Result<()> {
    let Providers { registry, .. } = build_registry();
    let provider = registry.get_provider(provider_id)?;

    let spinner = output::spinner(&format!("Fetching models for {provider_id}..."));

    match provider.list_models().await {
        Ok(models) => {
            output::spinner_done(&spinner);
            output::header(&format!("Models for {provider_id}"));

            if models.is_empty() {
                output::dim("No models returned");
                return Ok(());
            }

            let mut table = output::table(&["Model"]);
            for model in &models {
                table.add_row(vec![Cell::new(model)]);
            }
            output::table_print(&table, json!(models));
            Ok(())
        }
        Err(e) => {
            output::spinner_error(&spinner, "Failed to fetch models");
            Err(anyhow!("Failed to list models: {e}"))
        }
    }
}
