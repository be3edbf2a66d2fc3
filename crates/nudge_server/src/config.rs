//! HTTP server configuration

use std::path::PathBuf;

use nudge_constant::{DEFAULT_HOST, DEFAULT_PORT, DEFAULT_UI_DIR};

#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Directory served as static files; must contain `app.html`
    pub ui_dir: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl ServerConfig {
    pub fn new() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            ui_dir: PathBuf::from(DEFAULT_UI_DIR),
        }
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn with_ui_dir(mut self, ui_dir: impl Into<PathBuf>) -> Self {
        self.ui_dir = ui_dir.into();
        self
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads `NUDGE_HOST`, `PORT` and `NUDGE_UI_DIR`. An unparseable port keeps the default.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::new();

        if let Some(host) = lookup("NUDGE_HOST") {
            config.host = host;
        }

        if let Some(port) = lookup("PORT") {
            match port.parse::<u16>() {
                Ok(val) => config.port = val,
                Err(_) => tracing::warn!(port = %port, "Ignoring invalid PORT"),
            }
        }

        if let Some(dir) = lookup("NUDGE_UI_DIR") {
            config.ui_dir = PathBuf::from(dir);
        }

        config
    }

    /// `host:port`, resolved when binding
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
