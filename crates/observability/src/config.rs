//! Configuration for observability/telemetry

use serde::{Deserialize, Serialize};

const DEFAULT_SERVICE_NAME: &str = "nudge";

fn default_service_name() -> String {
    DEFAULT_SERVICE_NAME.to_string()
}

fn first_of(lookup: &impl Fn(&str) -> Option<String>, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|k| lookup(*k))
}

fn default_console() -> bool {
    true
}

/// Observability configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    /// Service name for traces (e.g., "nudge-server")
    #[serde(default = "default_service_name")]
    pub service_name: String,

    /// Service version (optional)
    #[serde(default)]
    pub service_version: Option<String>,

    /// OTLP endpoint for trace export (e.g., "http://localhost:4317")
    #[serde(default)]
    pub otlp_endpoint: Option<String>,

    /// Enable console/log output in addition to OTLP export
    #[serde(default = "default_console")]
    pub enable_console: bool,

    /// Log level filter (e.g., "info", "nudge_runtime=debug").
    /// Defaults to "info" if not set
    #[serde(default)]
    pub log_level: Option<String>,

    /// Additional resource attributes (key-value pairs)
    #[serde(default)]
    pub resource_attributes: Vec<(String, String)>,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            service_name: default_service_name(),
            service_version: None,
            otlp_endpoint: None,
            enable_console: true,
            log_level: None,
            resource_attributes: Vec::new(),
        }
    }
}

impl ObservabilityConfig {
    /// Create a new configuration with service name
    pub fn new(service_name: impl Into<String>) -> Self {
        Self {
            service_name: service_name.into(),
            ..Default::default()
        }
    }

    /// Set service version
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.service_version = Some(version.into());
        self
    }

    /// Set OTLP endpoint
    pub fn with_otlp_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.otlp_endpoint = Some(endpoint.into());
        self
    }

    /// Enable or disable console output
    pub fn with_console(mut self, enable: bool) -> Self {
        self.enable_console = enable;
        self
    }

    /// Set log level
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = Some(level.into());
        self
    }

    /// Add resource attribute
    pub fn with_resource_attribute(
        mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.resource_attributes.push((key.into(), value.into()));
        self
    }

    /// Build from environment variables
    ///
    /// Reads:
    /// - `OTEL_SERVICE_NAME` or `SERVICE_NAME` → service_name
    /// - `OTEL_SERVICE_VERSION` or `SERVICE_VERSION` → service_version
    /// - `OTEL_EXPORTER_OTLP_ENDPOINT` → otlp_endpoint
    /// - `NUDGE_LOG_LEVEL`, `OTEL_LOG_LEVEL` or `RUST_LOG` → log_level
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with a custom variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let service_name = first_of(&lookup, &["OTEL_SERVICE_NAME", "SERVICE_NAME"])
            .unwrap_or_else(default_service_name);
        let service_version = first_of(&lookup, &["OTEL_SERVICE_VERSION", "SERVICE_VERSION"]);

        // Only enable OTLP when explicitly set; otherwise console-only (avoids connection-refused noise).
        let otlp_endpoint = first_of(&lookup, &["OTEL_EXPORTER_OTLP_ENDPOINT"]);

        let log_level = first_of(&lookup, &["NUDGE_LOG_LEVEL", "OTEL_LOG_LEVEL", "RUST_LOG"]);

        Self {
            service_name,
            service_version,
            otlp_endpoint,
            enable_console: true,
            log_level,
            resource_attributes: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_without_env() {
        let config = ObservabilityConfig::from_lookup(lookup(&[]));
        assert_eq!(config.service_name, "nudge");
        assert!(config.otlp_endpoint.is_none());
        assert!(config.enable_console);
        assert!(config.log_level.is_none());
    }

    #[test]
    fn test_env_precedence() {
        let config = ObservabilityConfig::from_lookup(lookup(&[
            ("SERVICE_NAME", "fallback"),
            ("OTEL_SERVICE_NAME", "primary"),
            ("RUST_LOG", "warn"),
            ("NUDGE_LOG_LEVEL", "debug"),
            ("OTEL_EXPORTER_OTLP_ENDPOINT", "http://localhost:4317"),
        ]));
        assert_eq!(config.service_name, "primary");
        assert_eq!(config.log_level.as_deref(), Some("debug"));
        assert_eq!(config.otlp_endpoint.as_deref(), Some("http://localhost:4317"));
    }

    #[test]
    fn test_builder() {
        let config = ObservabilityConfig::new("nudge-server")
            .with_version("1.2.3")
            .with_console(false)
            .with_resource_attribute("deployment.environment", "dev");
        assert_eq!(config.service_version.as_deref(), Some("1.2.3"));
        assert!(!config.enable_console);
        assert_eq!(config.resource_attributes.len(), 1);
    }

    #[test]
    fn test_deserialize_fills_defaults() {
        let config: ObservabilityConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, ObservabilityConfig::default());
    }
}
