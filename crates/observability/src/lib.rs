//! nudge observability - tracing setup shared by the nudge server and CLI
//!
//! Installs a `tracing` subscriber with console output and, when an OTLP
//! endpoint is configured, OpenTelemetry span export.
//!
//! # Quick Start
//!
//! ```no_run
//! use nudge_observability::{ObservabilityConfig, init};
//!
//! let config = ObservabilityConfig::new("nudge-server")
//!     .with_otlp_endpoint("http://localhost:4317")
//!     .with_log_level("info");
//!
//! init(config)?;
//! tracing::info!("Service started");
//! # Ok::<(), nudge_observability::ObservabilityError>(())
//! ```
//!
//! # Environment Variables
//!
//! - `OTEL_SERVICE_NAME` or `SERVICE_NAME` - Service name
//! - `OTEL_SERVICE_VERSION` or `SERVICE_VERSION` - Service version
//! - `OTEL_EXPORTER_OTLP_ENDPOINT` - OTLP endpoint
//! - `NUDGE_LOG_LEVEL`, `OTEL_LOG_LEVEL` or `RUST_LOG` - Log level filter

pub mod config;
pub mod error;
pub mod telemetry;
pub mod tracing;

pub use config::ObservabilityConfig;
pub use error::ObservabilityError;
pub use telemetry::{init, init_from_env, shutdown};
pub use tracing::{record_duration, record_error};
