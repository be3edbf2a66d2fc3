//! Subscriber installation with optional OTLP export (OpenTelemetry 0.31).

use once_cell::sync::OnceCell;
use opentelemetry::{global, trace::TracerProvider, KeyValue};
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::trace::SdkTracerProvider;
use opentelemetry_sdk::Resource;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

use crate::config::ObservabilityConfig;
use crate::error::ObservabilityError;

// Kept for flushing on shutdown
static TRACER_PROVIDER: OnceCell<SdkTracerProvider> = OnceCell::new();

/// Filter from the configured level, else `RUST_LOG`, else `info`.
///
/// An explicitly configured level must parse; a bad `RUST_LOG` falls back to `info`.
pub(crate) fn env_filter(config: &ObservabilityConfig) -> Result<EnvFilter, ObservabilityError> {
    match &config.log_level {
        Some(level) => EnvFilter::try_new(level)
            .map_err(|e| ObservabilityError::Config(format!("invalid log level {level:?}: {e}"))),
        None => Ok(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))),
    }
}

/// Initialize tracing with the given configuration
///
/// Console output is always available; spans are additionally exported over
/// OTLP when `config.otlp_endpoint` is set. A failing exporter downgrades to
/// console-only rather than failing startup.
pub fn init(config: ObservabilityConfig) -> Result<(), ObservabilityError> {
    let env_filter = env_filter(&config)?;

    let mut attributes = vec![KeyValue::new("service.name", config.service_name.clone())];
    if let Some(version) = &config.service_version {
        attributes.push(KeyValue::new("service.version", version.clone()));
    }
    for (key, value) in &config.resource_attributes {
        attributes.push(KeyValue::new(key.clone(), value.clone()));
    }

    // In 0.31, Resource constructors are private; ResourceBuilder is the public API
    let resource = Resource::builder().with_attributes(attributes).build();

    // Build layers separately, then compose once to avoid type mismatch
    let fmt_layer = config
        .enable_console
        .then(|| {
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_writer(std::io::stderr)
        });

    let mut otlp_failure = None;
    let otel_layer = match &config.otlp_endpoint {
        Some(endpoint) => {
            match build_otlp_tracer_provider(&config.service_name, endpoint, resource) {
                Ok((tracer, provider)) => {
                    // Set as global provider BEFORE creating layer
                    global::set_tracer_provider(provider.clone());
                    let _ = TRACER_PROVIDER.set(provider);
                    Some(OpenTelemetryLayer::new(tracer))
                }
                Err(e) => {
                    otlp_failure = Some(e);
                    None
                }
            }
        }
        None => None,
    };
    let otlp_enabled = otel_layer.is_some();

    Registry::default()
        .with(env_filter)
        .with(fmt_layer)
        .with(otel_layer)
        .try_init()
        .map_err(|e| ObservabilityError::AlreadyInitialized(e.to_string()))?;

    match (&config.otlp_endpoint, otlp_failure) {
        (Some(endpoint), Some(e)) => tracing::warn!(
            service.name = %config.service_name,
            endpoint = %endpoint,
            error = %e,
            "Failed to initialize OTLP export, falling back to console-only tracing"
        ),
        (Some(endpoint), None) if otlp_enabled => tracing::info!(
            service.name = %config.service_name,
            otlp.endpoint = %endpoint,
            "OTLP tracing enabled"
        ),
        _ => tracing::debug!(
            service.name = %config.service_name,
            "Tracing initialized (console only, no OTLP endpoint configured)"
        ),
    }

    Ok(())
}

/// Build the OTLP tracer provider: `SpanExporter::builder()` + `SdkTracerProvider::builder()`.
fn build_otlp_tracer_provider(
    service_name: &str,
    endpoint: &str,
    resource: Resource,
) -> Result<(opentelemetry_sdk::trace::SdkTracer, SdkTracerProvider), ObservabilityError> {
    // with_endpoint() requires String, not &str
    let span_exporter = opentelemetry_otlp::SpanExporter::builder()
        .with_tonic()
        .with_endpoint(endpoint.to_string())
        .build()
        .map_err(|e| ObservabilityError::InitFailed(e.to_string()))?;

    // Runtime is provided by the rt-tokio feature
    let provider = SdkTracerProvider::builder()
        .with_batch_exporter(span_exporter)
        .with_resource(resource)
        .build();

    let tracer = provider.tracer(service_name.to_string());

    Ok((tracer, provider))
}

/// Flush and shut down the OTLP exporter, if one was installed.
///
/// Call this during graceful shutdown to ensure all spans are exported.
pub fn shutdown() {
    if let Some(provider) = TRACER_PROVIDER.get() {
        if let Err(e) = provider.shutdown() {
            tracing::warn!(error = %e, "OpenTelemetry tracer provider shutdown failed");
        } else {
            tracing::debug!("OpenTelemetry tracer provider shut down");
        }
    }
}

/// Initialize with default configuration from environment variables
pub fn init_from_env() -> Result<(), ObservabilityError> {
    init(ObservabilityConfig::from_env())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_level_wins() {
        let config = ObservabilityConfig::new("t").with_log_level("warn");
        assert_eq!(env_filter(&config).unwrap().to_string(), "warn");
    }

    #[test]
    fn test_bad_explicit_level_is_a_config_error() {
        let config = ObservabilityConfig::new("t").with_log_level("nudge_core=loud");
        assert!(matches!(
            env_filter(&config),
            Err(ObservabilityError::Config(_))
        ));
    }

    #[test]
    fn test_second_init_reports_already_initialized() {
        let config = ObservabilityConfig::new("t").with_console(false);
        init(config.clone()).unwrap();
        assert!(matches!(
            init(config),
            Err(ObservabilityError::AlreadyInitialized(_))
        ));
    }
}
