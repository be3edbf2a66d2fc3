//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(
    name = nudge_constant::NAME,
    about = nudge_constant::DESCRIPTION,
    version,
    propagate_version = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output (debug logging on stderr)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format: text (human-readable) or json (machine-readable)
    #[arg(short, long, global = true, default_value = "text")]
    pub output: OutputFormat,
}

#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub enum OutputFormat {
    /// Colored terminal output for humans
    #[default]
    Text,
    /// Structured JSON for scripts
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Serve POST /api/chat and the chat UI
    Serve {
        /// Interface to bind. Uses NUDGE_HOST env if not set.
        #[arg(long)]
        host: Option<String>,
        /// Port to listen on. Uses PORT env if not set.
        #[arg(short, long)]
        port: Option<u16>,
        /// Directory holding app.html and its assets. Uses NUDGE_UI_DIR env if not set.
        #[arg(long)]
        ui_dir: Option<PathBuf>,
        /// Model to use (e.g. gpt-4o-mini). Uses NUDGE_MODEL env if not set.
        #[arg(long)]
        model: Option<String>,
    },
    /// Show the token ids a phrase would be biased on, without calling the model
    Bias {
        /// Phrase to suppress (or boost with a positive value)
        text: String,
        /// Bias applied to every token id, between -100 and 100
        #[arg(long, allow_hyphen_values = true)]
        value: Option<f64>,
        /// Model whose tokenizer to use. Uses NUDGE_MODEL env if not set.
        #[arg(long)]
        model: Option<String>,
        /// Encoding table to use instead of the model's (e.g. cl100k_base)
        #[arg(long)]
        encoding: Option<String>,
    },
    /// Send one message and print the reply
    Chat {
        /// User message
        message: String,
        /// Phrase the reply should avoid
        #[arg(long)]
        bias_string: Option<String>,
        /// Bias for that phrase's tokens, between -100 and 100 (default -100)
        #[arg(long, allow_hyphen_values = true)]
        bias_value: Option<f64>,
        /// Model to use. Uses NUDGE_MODEL env if not set.
        #[arg(long)]
        model: Option<String>,
    },
    /// Inspect LLM providers
    Providers {
        #[command(subcommand)]
        action: ProvidersAction,
    },
}

#[derive(Subcommand)]
pub enum ProvidersAction {
    /// List known providers and whether they are configured
    List,
    /// List models a provider exposes
    Models {
        /// Provider ID
        provider: String,
    },
}
