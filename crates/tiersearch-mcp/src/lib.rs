//! Tiersearch MCP Server
//!
//! Model Context Protocol server exposing the `search_web` tool.

pub mod protocol;
pub mod server;
pub mod tools;

pub use server::{start_server, McpServer};
