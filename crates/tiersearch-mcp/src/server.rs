//! MCP server implementation

use crate::protocol::*;
use crate::tools;
use anyhow::Result;
use serde_json::Value;
use tiersearch_core::{EscalatingDispatcher, TierSearchError};
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader, BufWriter};

const PROTOCOL_VERSION: &str = "2024-11-05";

pub struct McpServer<'a> {
    dispatcher: &'a EscalatingDispatcher,
}

impl<'a> McpServer<'a> {
    pub fn new(dispatcher: &'a EscalatingDispatcher) -> Self {
        Self { dispatcher }
    }

    /// Serve on stdin/stdout until the host closes the stream
    pub async fn run(&self) -> Result<()> {
        self.serve(tokio::io::stdin(), tokio::io::stdout()).await
    }

    /// Serve newline-delimited JSON-RPC from `input`, writing responses to `output`
    pub async fn serve<R, W>(&self, input: R, output: W) -> Result<()>
    where
        R: AsyncRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut reader = BufReader::new(input);
        let mut writer = BufWriter::new(output);
        let mut buf = Vec::new();

        loop {
            buf.clear();
            let bytes_read = reader.read_until(b'\n', &mut buf).await?;

            if bytes_read == 0 {
                tracing::info!("Input closed, stopping MCP server");
                break;
            }

            // A malformed frame is answered, never fatal to the session
            let line = match std::str::from_utf8(&buf) {
                Ok(line) => line,
                Err(e) => {
                    let response = JsonRpcResponse::error(
                        None,
                        error_codes::PARSE_ERROR,
                        &format!("Parse error: invalid UTF-8: {}", e),
                    );
                    self.write_response(&mut writer, &response).await?;
                    continue;
                }
            };

            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }

            let value: Value = match serde_json::from_str(trimmed) {
                Ok(v) => v,
                Err(e) => {
                    let response = JsonRpcResponse::error(
                        None,
                        error_codes::PARSE_ERROR,
                        &format!("Parse error: {}", e),
                    );
                    self.write_response(&mut writer, &response).await?;
                    continue;
                }
            };

            let id = value.get("id").cloned().filter(|id| !id.is_null());
            let request: JsonRpcRequest = match serde_json::from_value(value) {
                Ok(r) => r,
                Err(e) => {
                    let response = JsonRpcResponse::error(
                        id,
                        error_codes::INVALID_REQUEST,
                        &format!("Invalid request: {}", e),
                    );
                    self.write_response(&mut writer, &response).await?;
                    continue;
                }
            };

            if let Some(response) = self.handle_request(&request).await {
                self.write_response(&mut writer, &response).await?;
            }
        }

        Ok(())
    }

    async fn write_response<W: AsyncWriteExt + Unpin>(
        &self,
        writer: &mut W,
        response: &JsonRpcResponse,
    ) -> Result<()> {
        let json = serde_json::to_string(response)?;
        writer.write_all(json.as_bytes()).await?;
        writer.write_all(b"\n").await?;
        writer.flush().await?;
        Ok(())
    }

    /// Route one request; notifications produce no response
    pub async fn handle_request(&self, request: &JsonRpcRequest) -> Option<JsonRpcResponse> {
        tracing::debug!(method = %request.method, "MCP request");

        if request.is_notification() {
            return None;
        }

        let response = match request.method.as_str() {
            "initialize" => self.handle_initialize(request),
            "ping" => JsonRpcResponse::success(request.id.clone(), serde_json::json!({})),
            "tools/list" => self.handle_tools_list(request),
            "tools/call" => self.handle_tools_call(request).await,
            _ => JsonRpcResponse::error(
                request.id.clone(),
                error_codes::METHOD_NOT_FOUND,
                &format!("Method not found: {}", request.method),
            ),
        };
        Some(response)
    }

    fn handle_initialize(&self, request: &JsonRpcRequest) -> JsonRpcResponse {
        let result = serde_json::json!({
            "protocolVersion": PROTOCOL_VERSION,
            "capabilities": {
                "tools": {}
            },
            "serverInfo": {
                "name": "tiersearch",
                "version": env!("CARGO_PKG_VERSION")
            }
        });
        JsonRpcResponse::success(request.id.clone(), result)
    }

    fn handle_tools_list(&self, request: &JsonRpcRequest) -> JsonRpcResponse {
        let tools = vec![tools::search_web_tool_definition()];

        JsonRpcResponse::success(request.id.clone(), serde_json::json!({ "tools": tools }))
    }

    async fn handle_tools_call(&self, request: &JsonRpcRequest) -> JsonRpcResponse {
        let Some(name) = request.params.get("name").and_then(|v| v.as_str()) else {
            return JsonRpcResponse::from_error(
                request.id.clone(),
                JsonRpcError::invalid_params("Missing tool name"),
            );
        };

        let arguments = request
            .params
            .get("arguments")
            .cloned()
            .unwrap_or(serde_json::json!({}));

        let result = match name {
            tools::SEARCH_TOOL_NAME => tools::handle_search_web(self.dispatcher, arguments).await,
            _ => {
                return JsonRpcResponse::from_error(
                    request.id.clone(),
                    JsonRpcError::method_not_found(format!("Unknown tool: {}", name)),
                )
            }
        };

        match result {
            Ok(tool_result) => match serde_json::to_value(tool_result) {
                Ok(value) => JsonRpcResponse::success(request.id.clone(), value),
                Err(e) => JsonRpcResponse::error(
                    request.id.clone(),
                    error_codes::INTERNAL_ERROR,
                    &format!("Failed to encode tool result: {}", e),
                ),
            },
            Err(TierSearchError::InvalidArguments(msg)) => JsonRpcResponse::from_error(
                request.id.clone(),
                JsonRpcError::invalid_params(format!("Invalid arguments for {}: {}", name, msg)),
            ),
            Err(e) => JsonRpcResponse::error(
                request.id.clone(),
                error_codes::INTERNAL_ERROR,
                &e.to_string(),
            ),
        }
    }
}

pub async fn start_server(dispatcher: &EscalatingDispatcher) -> Result<()> {
    tracing::info!("Starting MCP server on stdio");
    let server = McpServer::new(dispatcher);
    server.run().await
}
