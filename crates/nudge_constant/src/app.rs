//! Application metadata constants

pub const NAME: &str = "nudge";
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const DESCRIPTION: &str = "Chat with a hosted model while steering it away from (or toward) a word";

/// Service name reported to tracing backends
pub const SERVICE_NAME: &str = "nudge-server";
