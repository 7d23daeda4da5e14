//! MCP request handler

use hello_core::{Arguments, CapabilityRegistry};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::capabilities::ServerCapabilities;
use super::request::McpRequest;
use super::types::*;

/// Server name reported in `initialize`
pub const SERVER_NAME: &str = "hello-mcp";

/// Routes decoded requests to the capability registry.
///
/// Holds no per-session state, so one handler can be shared by every
/// connection.
pub struct RequestHandler {
    registry: Arc<CapabilityRegistry>,
    server_name: String,
    server_version: String,
}

impl RequestHandler {
    /// Create a new request handler
    pub fn new(registry: Arc<CapabilityRegistry>) -> Self {
        Self {
            registry,
            server_name: SERVER_NAME.to_string(),
            server_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// Handle an incoming message, returning the response to send (if any)
    pub fn handle(&self, message: McpMessage) -> Option<McpMessage> {
        if message.is_request() {
            let McpMessage {
                id, method, params, ..
            } = message;
            let id = id.unwrap_or(Value::Null);
            let method = method.unwrap_or_default();

            debug!("Handling request: {}", method);

            let result =
                McpRequest::parse(&method, params).and_then(|request| self.dispatch(request));

            Some(match result {
                Ok(result) => McpMessage::response(id, result),
                Err(error) => {
                    debug!("Request {} failed: {}", method, error.message);
                    McpMessage::error_response(Some(id), error)
                }
            })
        } else if message.is_notification() {
            let method = message.method.as_deref().unwrap_or_default();
            debug!("Received notification: {}", method);

            match method {
                "notifications/initialized" | "initialized" => {
                    info!("Client initialized");
                }
                "notifications/cancelled" => {
                    debug!("Request cancelled");
                }
                _ => {
                    debug!("Unknown notification: {}", method);
                }
            }

            None
        } else if message.is_response() {
            // Responses - we never send requests to the client
            debug!("Received unexpected response");
            None
        } else {
            warn!("Received message without method or result");
            Some(McpMessage::error_response(
                message.id,
                McpError::invalid_request(),
            ))
        }
    }

    /// Execute a decoded request
    pub fn dispatch(&self, request: McpRequest) -> Result<Value, McpError> {
        debug!("Dispatching {}", request.method());

        match request {
            McpRequest::Initialize(params) => self.handle_initialize(params),
            McpRequest::Ping => Ok(serde_json::json!({})),
            McpRequest::ListTools => to_result(ToolsListResult {
                tools: self.registry.list_tools(),
            }),
            McpRequest::CallTool(params) => {
                let arguments = params.arguments.unwrap_or_default();
                let content = self.registry.call_tool(&params.name, &arguments)?;
                to_result(ToolCallResult {
                    content,
                    is_error: None,
                })
            }
            McpRequest::ListResources => to_result(ResourcesListResult {
                resources: self.registry.list_resources(),
            }),
            McpRequest::ReadResource(params) => {
                let contents = self.registry.read_resource(&params.uri)?;
                to_result(ResourceReadResult {
                    contents: vec![contents],
                })
            }
            McpRequest::ListPrompts => to_result(PromptsListResult {
                prompts: self.registry.list_prompts(),
            }),
            McpRequest::GetPrompt(params) => {
                let arguments: Arguments = params.arguments.unwrap_or_default();
                to_result(self.registry.get_prompt(&params.name, &arguments)?)
            }
        }
    }

    /// Handle initialize request
    fn handle_initialize(&self, params: InitializeParams) -> Result<Value, McpError> {
        match &params.client_info {
            Some(client) => info!(
                "Initializing session with client: {} v{}",
                client.name, client.version
            ),
            None => info!("Initializing session with unnamed client"),
        }

        let result = InitializeResult {
            protocol_version: negotiate_version(params.protocol_version.as_deref()).to_string(),
            capabilities: ServerCapabilities::static_registry(),
            server_info: ServerInfo {
                name: self.server_name.clone(),
                version: self.server_version.clone(),
            },
        };

        to_result(result)
    }
}

fn to_result<T: Serialize>(value: T) -> Result<Value, McpError> {
    serde_json::to_value(value).map_err(|e| McpError::internal_error(e.to_string()))
}
