//! Main MCP server orchestration

use hello_core::{CapabilityRegistry, Settings, TransportKind};
use std::sync::Arc;
use tracing::info;

use crate::error::ServerError;
use crate::protocol::RequestHandler;
use crate::transport::{HttpTransport, StdioTransport, Transport};

/// Server mode
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServerMode {
    /// stdio transport
    Stdio,
    /// HTTP/SSE transport
    Sse { host: String, port: u16 },
}

impl ServerMode {
    pub fn from_settings(settings: &Settings) -> Self {
        match settings.transport {
            TransportKind::Stdio => ServerMode::Stdio,
            TransportKind::Sse => ServerMode::Sse {
                host: settings.host.clone(),
                port: settings.port,
            },
        }
    }
}

/// MCP server
pub struct McpServer {
    handler: Arc<RequestHandler>,
    debug_handler: Arc<RequestHandler>,
    mode: ServerMode,
}

impl McpServer {
    /// Create a new MCP server.
    ///
    /// Both registries are built here, once. The debug one backs either the
    /// whole server (when `settings.debug` is set) or only HTTP requests
    /// that ask for it with `?debug=true`.
    pub fn new(settings: &Settings) -> Self {
        let debug_handler = Arc::new(RequestHandler::new(Arc::new(CapabilityRegistry::new(
            true,
        ))));
        let handler = if settings.debug {
            debug_handler.clone()
        } else {
            Arc::new(RequestHandler::new(Arc::new(CapabilityRegistry::new(false))))
        };

        Self {
            handler,
            debug_handler,
            mode: ServerMode::from_settings(settings),
        }
    }

    /// Set the server mode
    pub fn with_mode(mut self, mode: ServerMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn mode(&self) -> &ServerMode {
        &self.mode
    }

    /// Run the server until its transport closes
    pub async fn run(self) -> Result<(), ServerError> {
        match self.mode {
            ServerMode::Stdio => {
                info!("Starting MCP server in stdio mode");
                StdioTransport::new(self.handler).run().await
            }
            ServerMode::Sse { host, port } => {
                info!("Starting MCP server in SSE mode on {}:{}", host, port);
                HttpTransport::new(self.handler, self.debug_handler, format!("{}:{}", host, port))
                    .run()
                    .await
            }
        }
    }
}
