//! Typed MCP requests
//!
//! The method string of an incoming request is resolved exactly once, here,
//! into a variant carrying its decoded params.

use serde::de::DeserializeOwned;
use serde_json::Value;

use super::types::{
    InitializeParams, McpError, PromptGetParams, ResourceReadParams, ToolCallParams,
};

/// A decoded MCP request
#[derive(Debug, Clone)]
pub enum McpRequest {
    Initialize(InitializeParams),
    Ping,
    ListTools,
    CallTool(ToolCallParams),
    ListResources,
    ReadResource(ResourceReadParams),
    ListPrompts,
    GetPrompt(PromptGetParams),
}

impl McpRequest {
    /// Resolve a method name and its params into a request
    pub fn parse(method: &str, params: Option<Value>) -> Result<Self, McpError> {
        match method {
            "initialize" => Ok(McpRequest::Initialize(optional_params(params)?)),
            "ping" => Ok(McpRequest::Ping),
            "tools/list" => Ok(McpRequest::ListTools),
            "tools/call" => Ok(McpRequest::CallTool(required_params(params)?)),
            "resources/list" => Ok(McpRequest::ListResources),
            "resources/read" => Ok(McpRequest::ReadResource(required_params(params)?)),
            "prompts/list" => Ok(McpRequest::ListPrompts),
            "prompts/get" => Ok(McpRequest::GetPrompt(required_params(params)?)),
            other => Err(McpError::method_not_found(other)),
        }
    }

    /// Method name this request was decoded from
    pub fn method(&self) -> &'static str {
        match self {
            McpRequest::Initialize(_) => "initialize",
            McpRequest::Ping => "ping",
            McpRequest::ListTools => "tools/list",
            McpRequest::CallTool(_) => "tools/call",
            McpRequest::ListResources => "resources/list",
            McpRequest::ReadResource(_) => "resources/read",
            McpRequest::ListPrompts => "prompts/list",
            McpRequest::GetPrompt(_) => "prompts/get",
        }
    }
}

fn required_params<T: DeserializeOwned>(params: Option<Value>) -> Result<T, McpError> {
    let params = params.ok_or_else(|| McpError::invalid_params("Missing params"))?;
    serde_json::from_value(params).map_err(|e| McpError::invalid_params(e.to_string()))
}

fn optional_params<T: DeserializeOwned + Default>(params: Option<Value>) -> Result<T, McpError> {
    match params {
        None | Some(Value::Null) => Ok(T::default()),
        Some(params) => {
            serde_json::from_value(params).map_err(|e| McpError::invalid_params(e.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_list_methods() {
        assert!(matches!(
            McpRequest::parse("tools/list", None).unwrap(),
            McpRequest::ListTools
        ));
        assert!(matches!(
            McpRequest::parse("resources/list", Some(json!({}))).unwrap(),
            McpRequest::ListResources
        ));
        assert!(matches!(
            McpRequest::parse("prompts/list", None).unwrap(),
            McpRequest::ListPrompts
        ));
    }

    #[test]
    fn test_parse_call_tool() {
        let request = McpRequest::parse(
            "tools/call",
            Some(json!({"name": "hello", "arguments": {"name": "Ana"}})),
        )
        .unwrap();

        match request {
            McpRequest::CallTool(params) => {
                assert_eq!(params.name, "hello");
                assert_eq!(params.arguments.unwrap()["name"], "Ana");
            }
            other => panic!("unexpected request: {:?}", other),
        }
    }

    #[test]
    fn test_parse_missing_params() {
        let err = McpRequest::parse("tools/call", None).unwrap_err();
        assert_eq!(err.code, McpError::INVALID_PARAMS);

        let err = McpRequest::parse("resources/read", Some(json!({"url": "x"}))).unwrap_err();
        assert_eq!(err.code, McpError::INVALID_PARAMS);
    }

    #[test]
    fn test_parse_initialize_without_params() {
        assert!(matches!(
            McpRequest::parse("initialize", None).unwrap(),
            McpRequest::Initialize(_)
        ));
    }

    #[test]
    fn test_parse_unknown_method() {
        let err = McpRequest::parse("sampling/createMessage", None).unwrap_err();
        assert_eq!(err.code, McpError::METHOD_NOT_FOUND);
    }

    #[test]
    fn test_method_round_trip() {
        let request = McpRequest::parse("prompts/get", Some(json!({"name": "greet"}))).unwrap();
        assert_eq!(request.method(), "prompts/get");
    }
}
