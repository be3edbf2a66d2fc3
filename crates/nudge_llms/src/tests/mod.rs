#[cfg(feature = "openai")]
mod openai;
mod provider_registry;
