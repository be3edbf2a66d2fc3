//! Shared constants for nudge.

pub mod app;
pub mod defaults;

pub use app::{DESCRIPTION, NAME, SERVICE_NAME, VERSION};
pub use defaults::{
    DEFAULT_BIAS, DEFAULT_HOST, DEFAULT_MODEL, DEFAULT_PORT, DEFAULT_UI_DIR, MAX_BIAS, MIN_BIAS,
    SYSTEM_PROMPT, UI_ENTRYPOINT,
};
