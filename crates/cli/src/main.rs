//! ruleclaw CLI — the main entry point.
//!
//! Commands:
//! - `chat`    — Interactive session (default)
//! - `ask`     — Answer a single message and exit
//! - `tools`   — List the built-in tools
//! - `config`  — Show the effective configuration

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use ruleclaw_config::{AppConfig, LoggingSettings};

mod commands;

#[derive(Parser)]
#[command(
    name = "ruleclaw",
    about = "ruleclaw — rule-based tool-calling agent",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use this config file instead of ~/.ruleclaw/config.toml
    #[arg(long, global = true, env = "RULECLAW_CONFIG")]
    config: Option<PathBuf>,

    /// Override the per-turn step limit
    #[arg(long, global = true)]
    step_limit: Option<u32>,
}

#[derive(Subcommand)]
enum Commands {
    /// Chat interactively (default)
    Chat,

    /// Send a single message and print the answer
    Ask {
        /// The message to send
        message: String,
    },

    /// List available tools
    Tools,

    /// Show the effective configuration
    Config,
}

fn init_tracing(settings: &LoggingSettings, verbose: bool) {
    let level = if verbose { "debug" } else { settings.level.as_str() };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);

    if settings.json {
        builder.json().init();
    } else {
        builder.init();
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(AppConfig::config_path);
    let mut config = AppConfig::load_with_env(&config_path, |key| std::env::var(key).ok())
        .map_err(|e| format!("Failed to load config: {e}"))?;
    if let Some(limit) = cli.step_limit {
        config.agent.step_limit = limit;
        config.validate()?;
    }

    init_tracing(&config.logging, cli.verbose);
    tracing::debug!(
        path = %config_path.display(),
        found = config_path.exists(),
        step_limit = config.agent.step_limit,
        "Configuration loaded"
    );

    match cli.command.unwrap_or(Commands::Chat) {
        Commands::Chat => commands::chat::run(&config, cli.verbose).await?,
        Commands::Ask { message } => commands::ask::run(&config, &message, cli.verbose).await?,
        Commands::Tools => commands::tools::run(),
        Commands::Config => commands::config_cmd::run(&config, &config_path),
    }

    Ok(())
}
