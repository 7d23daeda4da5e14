//! MCP protocol message types

use hello_core::{
    Arguments, Content, HelloError, PromptDescriptor, ResourceContents, ResourceDescriptor,
    ToolDescriptor,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// JSON-RPC version string
pub const JSONRPC_VERSION: &str = "2.0";

/// MCP protocol versions this server speaks, oldest first
pub const SUPPORTED_VERSIONS: &[&str] = &["2024-11-05", "2025-03-26", "2025-06-18"];

/// Version offered when the client asks for one we do not support
pub const LATEST_VERSION: &str = "2025-06-18";

/// Pick the protocol version to answer an `initialize` with
pub fn negotiate_version(requested: Option<&str>) -> &'static str {
    requested
        .and_then(|v| SUPPORTED_VERSIONS.iter().find(|s| **s == v).copied())
        .unwrap_or(LATEST_VERSION)
}

/// MCP JSON-RPC message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct McpMessage {
    pub jsonrpc: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<McpError>,
}

impl McpMessage {
    /// Create a request message
    pub fn request(id: impl Into<Value>, method: &str, params: Option<Value>) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id: Some(id.into()),
            method: Some(method.to_string()),
            params,
            result: None,
            error: None,
        }
    }

    /// Create a success response
    pub fn response(id: Value, result: Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id: Some(id),
            method: None,
            params: None,
            result: Some(result),
            error: None,
        }
    }

    /// Create an error response. A missing id is sent as `null`.
    pub fn error_response(id: Option<Value>, error: McpError) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id: Some(id.unwrap_or(Value::Null)),
            method: None,
            params: None,
            result: None,
            error: Some(error),
        }
    }

    /// Create a notification (no id)
    pub fn notification(method: &str, params: Option<Value>) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id: None,
            method: Some(method.to_string()),
            params,
            result: None,
            error: None,
        }
    }

    /// Empty acknowledgement returned over HTTP for notifications
    pub fn acknowledgement() -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id: None,
            method: None,
            params: None,
            result: Some(serde_json::json!({})),
            error: None,
        }
    }

    /// Decode a raw JSON value into a message, mapping failures to JSON-RPC errors.
    ///
    /// Returns the id (if one could be recovered) alongside the error so the
    /// caller can still address its error response.
    pub fn decode(raw: Value) -> Result<Self, (Option<Value>, McpError)> {
        if !raw.is_object() {
            return Err((None, McpError::invalid_request()));
        }

        // A present-but-null id is neither a request nor a notification
        if raw.get("method").is_some() && raw.get("id").is_some_and(Value::is_null) {
            return Err((None, McpError::invalid_request()));
        }

        let id = raw.get("id").cloned();
        let message: McpMessage =
            serde_json::from_value(raw).map_err(|_| (id.clone(), McpError::invalid_request()))?;

        if message.jsonrpc != JSONRPC_VERSION {
            return Err((id, McpError::invalid_request()));
        }

        Ok(message)
    }

    /// Check if this is a request
    pub fn is_request(&self) -> bool {
        self.method.is_some() && self.id.is_some()
    }

    /// Check if this is a notification
    pub fn is_notification(&self) -> bool {
        self.method.is_some() && self.id.is_none()
    }

    /// Check if this is a response
    pub fn is_response(&self) -> bool {
        self.method.is_none() && (self.result.is_some() || self.error.is_some())
    }
}

/// MCP error
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct McpError {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl McpError {
    pub const PARSE_ERROR: i32 = -32700;
    pub const INVALID_REQUEST: i32 = -32600;
    pub const METHOD_NOT_FOUND: i32 = -32601;
    pub const INVALID_PARAMS: i32 = -32602;
    pub const INTERNAL_ERROR: i32 = -32603;
    pub const RESOURCE_NOT_FOUND: i32 = -32002;

    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            data: None,
        }
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    // Standard JSON-RPC errors
    pub fn parse_error() -> Self {
        Self::new(Self::PARSE_ERROR, "Parse error")
    }

    pub fn invalid_request() -> Self {
        Self::new(Self::INVALID_REQUEST, "Invalid request")
    }

    pub fn method_not_found(method: &str) -> Self {
        Self::new(Self::METHOD_NOT_FOUND, format!("Method not found: {}", method))
    }

    pub fn invalid_params(message: impl Into<String>) -> Self {
        Self::new(Self::INVALID_PARAMS, message)
    }

    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::new(Self::INTERNAL_ERROR, message)
    }

    pub fn resource_not_found(uri: &str) -> Self {
        Self::new(Self::RESOURCE_NOT_FOUND, format!("Resource not found: {}", uri))
            .with_data(serde_json::json!({ "uri": uri }))
    }
}

impl From<HelloError> for McpError {
    fn from(err: HelloError) -> Self {
        match err {
            HelloError::UnknownResource(ref uri) => McpError::resource_not_found(uri),
            HelloError::UnknownTool(_)
            | HelloError::UnknownPrompt(_)
            | HelloError::MissingArgument(_)
            | HelloError::InvalidArgument { .. } => McpError::invalid_params(err.to_string()),
            other => McpError::internal_error(other.to_string()),
        }
    }
}

/// Initialize request params
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitializeParams {
    #[serde(default)]
    pub protocol_version: Option<String>,
    #[serde(default)]
    pub capabilities: Value,
    #[serde(default)]
    pub client_info: Option<ClientInfo>,
}

/// Client info
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientInfo {
    pub name: String,
    #[serde(default)]
    pub version: String,
}

/// Initialize result
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitializeResult {
    pub protocol_version: String,
    pub capabilities: super::capabilities::ServerCapabilities,
    pub server_info: ServerInfo,
}

/// Server info
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerInfo {
    pub name: String,
    pub version: String,
}

/// Tools list result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolsListResult {
    pub tools: Vec<ToolDescriptor>,
}

/// Tool call params
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCallParams {
    pub name: String,
    #[serde(default)]
    pub arguments: Option<Arguments>,
}

/// Tool call result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCallResult {
    pub content: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none", rename = "isError")]
    pub is_error: Option<bool>,
}

/// Resources list result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourcesListResult {
    pub resources: Vec<ResourceDescriptor>,
}

/// Resource read params
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceReadParams {
    pub uri: String,
}

/// Resource read result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceReadResult {
    pub contents: Vec<ResourceContents>,
}

/// Prompts list result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptsListResult {
    pub prompts: Vec<PromptDescriptor>,
}

/// Prompt get params
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptGetParams {
    pub name: String,
    #[serde(default)]
    pub arguments: Option<Arguments>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_negotiate_version() {
        assert_eq!(negotiate_version(Some("2024-11-05")), "2024-11-05");
        assert_eq!(negotiate_version(Some("1999-01-01")), LATEST_VERSION);
        assert_eq!(negotiate_version(None), LATEST_VERSION);
    }

    #[test]
    fn test_error_response_has_null_id() {
        let message = McpMessage::error_response(None, McpError::parse_error());
        let value = serde_json::to_value(&message).unwrap();

        assert_eq!(value["id"], Value::Null);
        assert_eq!(value["error"]["code"], -32700);
        assert!(value.get("result").is_none());
    }

    #[test]
    fn test_acknowledgement_shape() {
        let value = serde_json::to_value(McpMessage::acknowledgement()).unwrap();
        assert_eq!(value, json!({"jsonrpc": "2.0", "result": {}}));
    }

    #[test]
    fn test_decode_rejects_non_objects_and_bad_version() {
        let (id, err) = McpMessage::decode(json!([1, 2])).unwrap_err();
        assert!(id.is_none());
        assert_eq!(err.code, McpError::INVALID_REQUEST);

        let (id, err) =
            McpMessage::decode(json!({"jsonrpc": "1.0", "id": 7, "method": "ping"})).unwrap_err();
        assert_eq!(id, Some(json!(7)));
        assert_eq!(err.code, McpError::INVALID_REQUEST);
    }

    #[test]
    fn test_decode_rejects_null_request_id() {
        let (id, err) =
            McpMessage::decode(json!({"jsonrpc": "2.0", "id": null, "method": "ping"})).unwrap_err();
        assert!(id.is_none());
        assert_eq!(err.code, McpError::INVALID_REQUEST);
    }

    #[test]
    fn test_decode_classifies_messages() {
        let request = McpMessage::decode(json!({"jsonrpc": "2.0", "id": 1, "method": "ping"})).unwrap();
        assert!(request.is_request());

        let notification =
            McpMessage::decode(json!({"jsonrpc": "2.0", "method": "notifications/initialized"}))
                .unwrap();
        assert!(notification.is_notification());

        let response = McpMessage::decode(json!({"jsonrpc": "2.0", "id": 1, "result": {}})).unwrap();
        assert!(response.is_response());
    }

    #[test]
    fn test_error_mapping() {
        let err: McpError = HelloError::UnknownTool("x".to_string()).into();
        assert_eq!(err.code, McpError::INVALID_PARAMS);

        let err: McpError = HelloError::MissingArgument("name".to_string()).into();
        assert_eq!(err.code, McpError::INVALID_PARAMS);
        assert!(err.message.contains("name"));

        let err: McpError = HelloError::UnknownResource("history://x".to_string()).into();
        assert_eq!(err.code, McpError::RESOURCE_NOT_FOUND);
        assert_eq!(err.data, Some(json!({"uri": "history://x"})));
    }
}
