//! The `hello` tool

use super::{string_argument, ToolHandler};
use crate::error::Result;
use crate::types::{Arguments, Content, InputSchema, ToolDescriptor};

/// Name used when the caller does not provide one
pub const DEFAULT_NAME: &str = "Mundo";

/// Greets the caller by name
pub struct HelloTool {
    descriptor: ToolDescriptor,
    debug: bool,
}

impl HelloTool {
    pub fn new(debug: bool) -> Self {
        Self {
            descriptor: ToolDescriptor {
                name: "hello".to_string(),
                title: Some("Hello".to_string()),
                description: Some("Retorna uma saudação para o nome informado".to_string()),
                input_schema: InputSchema::default().with_string_property(
                    "name",
                    "Nome a ser saudado (padrão: Mundo)",
                    false,
                ),
            },
            debug,
        }
    }

    /// Render the greeting text
    pub fn greeting(&self, name: &str) -> String {
        if self.debug {
            format!("DEBUG: Olá, {}!", name)
        } else {
            format!("Olá, {}!", name)
        }
    }
}

impl ToolHandler for HelloTool {
    fn descriptor(&self) -> &ToolDescriptor {
        &self.descriptor
    }

    fn call(&self, arguments: &Arguments) -> Result<Vec<Content>> {
        let name = string_argument(arguments, "name")?.unwrap_or(DEFAULT_NAME);
        Ok(vec![Content::text(self.greeting(name))])
    }
}
