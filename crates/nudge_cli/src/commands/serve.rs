//! `nudge serve`

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use nudge_server::{AppState, ServerConfig};

use super::{build_runner, runtime_config};
use crate::output;

pub async fn handle(
    host: Option<String>,
    port: Option<u16>,
    ui_dir: Option<PathBuf>,
    model: Option<String>,
) -> Result<()> {
    let mut config = ServerConfig::from_env();
    if let Some(host) = host {
        config = config.with_host(host);
    }
    if let Some(port) = port {
        config = config.with_port(port);
    }
    if let Some(ui_dir) = ui_dir {
        config = config.with_ui_dir(ui_dir);
    }

    let runner = build_runner(runtime_config(model))?;

    output::header(&format!("{} {}", nudge_constant::NAME, nudge_constant::VERSION));
    output::kv("model", &runner.config().model);
    output::kv("encoding", runner.compiler().encoding());
    output::kv("url", &format!("http://{}", config.bind_address()));

    nudge_server::serve(&config, AppState::new(Arc::new(runner))).await?;
    Ok(())
}
