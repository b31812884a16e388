//! MCP tool definitions and handlers

use crate::protocol::*;
use serde_json::Value;
use tiersearch_core::{Complexity, EscalatingDispatcher, Intent, Result, SearchRequest};

/// Name of the single exposed tool
pub const SEARCH_TOOL_NAME: &str = "search_web";

pub fn search_web_tool_definition() -> ToolDefinition {
    let intents: Vec<&str> = Intent::ALL.iter().map(|i| i.as_str()).collect();
    let tiers: Vec<&str> = Complexity::LADDER.iter().map(|c| c.as_str()).collect();

    ToolDefinition {
        name: SEARCH_TOOL_NAME.to_string(),
        description: "Search the web and get a synthesized, cited answer. Starts at the \
                      requested complexity tier and escalates to more capable models when \
                      the answer looks weak."
            .to_string(),
        input_schema: serde_json::json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "The question or search query"
                },
                "intent": {
                    "type": "string",
                    "enum": intents,
                    "description": "research: in-depth answer with sources; troubleshoot: causes and fixes for a problem; update: latest news and releases (default: research)",
                    "default": "research"
                },
                "complexity": {
                    "type": "string",
                    "enum": tiers,
                    "description": "Starting model tier; escalates upward on weak answers (default: medium)",
                    "default": "medium"
                }
            },
            "required": ["query"]
        }),
    }
}

/// Validate arguments and run the search.
///
/// Returns `Err` only when the arguments are invalid; a failed search is an
/// `Ok` result flagged with `isError`.
pub async fn handle_search_web(dispatcher: &EscalatingDispatcher, args: Value) -> Result<ToolResult> {
    let request = SearchRequest::from_arguments(&args)?;

    tracing::info!(
        intent = %request.intent,
        complexity = %request.complexity,
        "search_web called"
    );

    match dispatcher.dispatch(&request).await {
        Ok(answer) => Ok(ToolResult {
            content: vec![Content::Text {
                text: answer.text,
            }],
            structured_content: Some(serde_json::json!({
                "tier": answer.tier,
                "model": answer.model,
                "attempts": answer.attempts,
            })),
            is_error: None,
        }),
        Err(e) => {
            tracing::error!("search_web failed: {}", e);
            Ok(ToolResult::error(format!("Error: {}", e)))
        }
    }
}
