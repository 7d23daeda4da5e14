//! # hello-core
//!
//! Core capabilities for the Hello MCP server:
//! - Tool, resource and prompt descriptors in MCP wire shape
//! - The `hello` tool, `history://hello-world` resource and `greet` prompt
//! - An immutable capability registry built once at startup
//! - Settings loading for the server binary

pub mod error;
pub mod handlers;
pub mod registry;
pub mod settings;
pub mod types;

pub use error::{HelloError, Result};
pub use handlers::{
    GreetPrompt, HelloTool, HistoryResource, PromptHandler, ResourceHandler, ToolHandler,
};
pub use registry::{CapabilityRegistry, RegistryBuilder};
pub use settings::{Settings, TransportKind};
pub use types::*;
