//! Tiersearch CLI
//!
//! Escalating web search, served over MCP or run one-shot.

use anyhow::Result;
use clap::Parser;
use tiersearch_core::error::exit_codes;
use tiersearch_core::{Config, TierSearchError};

mod app;
mod commands;
mod output;

use app::{Cli, Commands};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // stdout carries the MCP stream, so logs go to stderr
    let level = if cli.verbose {
        tracing::Level::INFO
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .init();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {:#}", e);
        let code = e
            .downcast_ref::<TierSearchError>()
            .map(|e| e.exit_code())
            .unwrap_or(exit_codes::GENERAL_ERROR);
        std::process::exit(code);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    match cli.command {
        Commands::Mcp => commands::mcp::run(&config).await,
        Commands::Search(args) => commands::search::run(args, &config, cli.format).await,
    }
}
