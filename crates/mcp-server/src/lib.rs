//! # mcp-server
//!
//! MCP (Model Context Protocol) server implementation for Hello MCP.
//! Supports both stdio and HTTP/SSE transports.

mod error;
pub mod protocol;
mod server;
pub mod transport;

pub use error::ServerError;
pub use protocol::{McpError, McpMessage, McpRequest, RequestHandler, ServerCapabilities};
pub use server::{McpServer, ServerMode};
pub use transport::{HttpTransport, StdioTransport, Transport};
