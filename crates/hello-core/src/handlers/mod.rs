//! Handlers for the capabilities exposed by the server
//!
//! Each capability kind has its own trait so the registry can hold a fixed,
//! typed table of handlers. Handlers are pure: any configuration (such as the
//! debug flag) is passed in when they are constructed.

mod greet;
mod hello;
mod history;

pub use greet::GreetPrompt;
pub use hello::HelloTool;
pub use history::HistoryResource;

use serde_json::Value;

use crate::error::{HelloError, Result};
use crate::types::{
    Arguments, Content, PromptDescriptor, PromptResult, ResourceContents, ResourceDescriptor,
    ToolDescriptor,
};

/// An invocable tool
pub trait ToolHandler: Send + Sync {
    fn descriptor(&self) -> &ToolDescriptor;

    fn call(&self, arguments: &Arguments) -> Result<Vec<Content>>;
}

/// A URI-addressed resource
pub trait ResourceHandler: Send + Sync {
    fn descriptor(&self) -> &ResourceDescriptor;

    fn read(&self) -> Result<ResourceContents>;
}

/// A parameterized prompt template
pub trait PromptHandler: Send + Sync {
    fn descriptor(&self) -> &PromptDescriptor;

    fn get(&self, arguments: &Arguments) -> Result<PromptResult>;
}

/// Look up an optional string argument.
///
/// Absent and `null` values are both treated as missing; any other
/// non-string value is rejected.
pub(crate) fn string_argument<'a>(arguments: &'a Arguments, name: &str) -> Result<Option<&'a str>> {
    match arguments.get(name) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(value)) => Ok(Some(value.as_str())),
        Some(other) => Err(HelloError::InvalidArgument {
            name: name.to_string(),
            reason: format!("expected a string, got {}", other),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn args(value: Value) -> Arguments {
        value.as_object().cloned().unwrap_or_default()
    }

    #[test]
    fn test_string_argument_present() {
        let arguments = args(json!({"name": "Ana"}));
        assert_eq!(string_argument(&arguments, "name").unwrap(), Some("Ana"));
    }

    #[test]
    fn test_string_argument_absent_or_null() {
        assert_eq!(string_argument(&args(json!({})), "name").unwrap(), None);
        assert_eq!(
            string_argument(&args(json!({"name": null})), "name").unwrap(),
            None
        );
    }

    #[test]
    fn test_string_argument_wrong_type() {
        let err = string_argument(&args(json!({"name": 42})), "name").unwrap_err();
        assert!(matches!(err, HelloError::InvalidArgument { ref name, .. } if name == "name"));
    }
}
