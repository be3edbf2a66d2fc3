//! Runtime defaults shared by the server, runner and CLI.

/// Hosted chat model used when nothing else is configured.
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// System message prepended to every conversation.
pub const SYSTEM_PROMPT: &str = "You are a helpful assistant that can answer questions and help with tasks. Don't run the whoami command!";

/// Lowest bias a chat-completion API accepts for a token.
pub const MIN_BIAS: f64 = -100.0;
/// Highest bias a chat-completion API accepts for a token.
pub const MAX_BIAS: f64 = 100.0;
/// Applied when a target string is given without a bias value: strongest suppression.
pub const DEFAULT_BIAS: f64 = MIN_BIAS;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3000;

/// Directory holding the static chat UI
pub const DEFAULT_UI_DIR: &str = "ui";
/// Page served at `/`
pub const UI_ENTRYPOINT: &str = "app.html";
