//! The `greet` prompt

use super::{string_argument, PromptHandler};
use crate::error::{HelloError, Result};
use crate::types::{
    Arguments, Content, PromptArgument, PromptDescriptor, PromptMessage, PromptResult, Role,
};

/// Asks the model to greet someone
pub struct GreetPrompt {
    descriptor: PromptDescriptor,
}

impl GreetPrompt {
    pub fn new() -> Self {
        Self {
            descriptor: PromptDescriptor {
                name: "greet".to_string(),
                title: Some("Greet".to_string()),
                description: Some("Gera um pedido de saudação para uma pessoa".to_string()),
                arguments: vec![PromptArgument {
                    name: "name".to_string(),
                    description: Some("Nome da pessoa a ser saudada".to_string()),
                    required: true,
                }],
            },
        }
    }
}

impl Default for GreetPrompt {
    fn default() -> Self {
        Self::new()
    }
}

impl PromptHandler for GreetPrompt {
    fn descriptor(&self) -> &PromptDescriptor {
        &self.descriptor
    }

    fn get(&self, arguments: &Arguments) -> Result<PromptResult> {
        let name = string_argument(arguments, "name")?
            .ok_or_else(|| HelloError::MissingArgument("name".to_string()))?;

        Ok(PromptResult {
            description: self.descriptor.description.clone(),
            messages: vec![PromptMessage {
                role: Role::User,
                content: Content::text(format!("Diga olá para {}", name)),
            }],
        })
    }
}
