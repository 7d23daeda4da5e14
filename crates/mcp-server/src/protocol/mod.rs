//! MCP protocol types and handling

mod capabilities;
mod handler;
mod request;
mod types;

pub use capabilities::ServerCapabilities;
pub use handler::{RequestHandler, SERVER_NAME};
pub use request::McpRequest;
pub use types::*;
