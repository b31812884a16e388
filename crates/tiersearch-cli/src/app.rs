//! CLI argument definitions

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tiersearch_core::{Complexity, Intent};

#[derive(Parser)]
#[command(name = "tiersearch")]
#[command(
    author,
    version,
    about = "Web search for MCP hosts that escalates across model tiers until the answer is good"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: <config dir>/tiersearch/config.yml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, value_enum, default_value = "cli")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start MCP server on stdio
    Mcp,

    /// Run a single search and print the answer
    Search(SearchArgs),
}

#[derive(Args)]
pub struct SearchArgs {
    /// Search query
    #[arg(required = true)]
    pub query: Vec<String>,

    /// Search intent (research, troubleshoot, update)
    #[arg(short, long, default_value = "research")]
    pub intent: Intent,

    /// Starting complexity tier (low, medium, high)
    #[arg(short, long, default_value = "medium")]
    pub complexity: Complexity,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Cli,
    Json,
}
