//! Transport implementations for MCP server

mod http;
mod session;
mod stdio;

pub use http::HttpTransport;
pub use stdio::StdioTransport;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{error, info, warn};

use crate::error::ServerError;
use crate::protocol::{McpError, McpMessage, RequestHandler};

/// A channel that feeds messages to a request handler until it closes
#[async_trait]
pub trait Transport {
    async fn run(self) -> Result<(), ServerError>;
}

/// Decode one raw JSON body and hand it to the handler.
///
/// Malformed envelopes (including bodies that are not UTF-8) are answered
/// with a JSON-RPC error instead of failing the transport.
pub(crate) fn process_raw(handler: &RequestHandler, raw: &[u8]) -> Option<McpMessage> {
    let value: Value = match serde_json::from_slice(raw) {
        Ok(value) => value,
        Err(e) => {
            warn!("Failed to parse message: {}", e);
            return Some(McpMessage::error_response(None, McpError::parse_error()));
        }
    };

    match McpMessage::decode(value) {
        Ok(message) => handler.handle(message),
        Err((id, error)) => {
            warn!("Invalid message: {}", error.message);
            Some(McpMessage::error_response(id, error))
        }
    }
}

/// Resolves on Ctrl-C, or SIGTERM on unix
pub(crate) async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
