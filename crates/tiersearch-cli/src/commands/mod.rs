//! CLI command handlers

pub mod mcp;
pub mod search;

use std::sync::Arc;
use tiersearch_core::{Config, EscalatingDispatcher, HttpCompletionClient, Result};

/// Build the dispatcher; fails fast when the API key is missing
pub fn build_dispatcher(config: &Config) -> Result<EscalatingDispatcher> {
    let client = HttpCompletionClient::new(&config.service)?;
    tracing::debug!(url = %client.base_url(), "Completion client ready");
    Ok(EscalatingDispatcher::from_config(Arc::new(client), config))
}
