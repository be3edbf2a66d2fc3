//! Command dispatch.

pub mod bias;
pub mod chat;
pub mod providers;
pub mod serve;

use anyhow::{Context, Result};
use nudge_core::BiasMagnitude;
use nudge_runtime::{ConversationRunner, RuntimeConfig};

use crate::cli::{Cli, Command};

pub async fn handle(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Serve {
            host,
            port,
            ui_dir,
            model,
        } => serve::handle(host, port, ui_dir, model).await,
        Command::Bias {
            text,
            value,
            model,
            encoding,
        } => bias::handle(text, value, model, encoding),
        Command::Chat {
            message,
            bias_string,
            bias_value,
            model,
        } => chat::handle(message, bias_string, bias_value, model).await,
        Command::Providers { action } => providers::handle(action).await,
    }
}

/// Runtime settings from the environment, with `--model` on top.
pub(crate) fn runtime_config(model: Option<String>) -> RuntimeConfig {
    let config = RuntimeConfig::from_env();
    match model {
        Some(model) => config.with_model(model),
        None => config,
    }
}

/// Runner wired to the configured provider and the model's tokenizer.
pub(crate) fn build_runner(config: RuntimeConfig) -> Result<ConversationRunner> {
    let registry = providers::build_registry().registry;
    let provider = registry.get_provider(&config.provider).with_context(|| {
        format!(
            "Provider '{}' is not configured (is {} set?)",
            config.provider,
            nudge_llms::OpenAIProvider::API_KEY_ENV
        )
    })?;
    Ok(ConversationRunner::from_config(config, provider)?)
}

/// Validate a `--value`/`--bias-value` flag.
pub(crate) fn magnitude(value: Option<f64>) -> Result<Option<BiasMagnitude>> {
    value
        .map(BiasMagnitude::new)
        .transpose()
        .context("Invalid bias value")
}
