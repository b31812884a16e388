//! MCP server command

use anyhow::Result;
use tiersearch_core::error::exit_codes;
use tiersearch_core::Config;

pub async fn run(config: &Config) -> Result<()> {
    let dispatcher = super::build_dispatcher(config)?;

    tokio::select! {
        result = tiersearch_mcp::start_server(&dispatcher) => result,
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Interrupted, shutting down MCP server");
            // The runtime would otherwise wait on the blocking stdin read
            std::process::exit(exit_codes::SUCCESS)
        }
    }
}
