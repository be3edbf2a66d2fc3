//! CLI entry point for nudge.

mod cli;
mod commands;
mod output;

use clap::Parser;
use nudge_observability::ObservabilityConfig;

use crate::cli::{Cli, Command};

/// Load the nearest `.env`, searching from the working directory upward.
///
/// Variables already set in the process environment win.
fn load_dotenv() {
    let Ok(mut dir) = std::env::current_dir() else {
        return;
    };
    for _ in 0..32 {
        let env_file = dir.join(".env");
        if env_file.is_file() {
            let _ = dotenvy::from_path(&env_file);
            return;
        }
        match dir.parent() {
            Some(parent) => dir = parent.to_path_buf(),
            None => return,
        }
    }
}

/// Console logging for `serve` always, for other commands only with `--verbose`.
fn init_logging(cli: &Cli) {
    let serving = matches!(cli.command, Command::Serve { .. });
    if !serving && !cli.verbose {
        return;
    }

    let mut config = ObservabilityConfig::from_env().with_version(nudge_constant::VERSION);
    let named = ["OTEL_SERVICE_NAME", "SERVICE_NAME"]
        .iter()
        .any(|key| std::env::var_os(key).is_some());
    if serving && !named {
        config.service_name = nudge_constant::SERVICE_NAME.to_string();
    }
    if cli.verbose {
        config = config.with_log_level("debug");
    }

    if let Err(e) = nudge_observability::init(config) {
        output::warning(&format!("Logging disabled: {e}"));
    }
}

#[tokio::main]
async fn main() {
    load_dotenv();
    let cli = Cli::parse();
    output::init(cli.output);
    init_logging(&cli);

    let result = commands::handle(cli).await;
    nudge_observability::shutdown();

    if let Err(e) = result {
        output::error(&e.to_string());
        std::process::exit(1);
    }
}
