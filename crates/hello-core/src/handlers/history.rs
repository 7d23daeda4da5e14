//! The `history://hello-world` resource

use super::ResourceHandler;
use crate::error::Result;
use crate::types::{ResourceContents, ResourceDescriptor};

pub const HISTORY_URI: &str = "history://hello-world";

const HISTORY_TEXT: &str = "O programa \"Hello, World!\" ficou famoso com o livro \
\"The C Programming Language\" (1978), de Brian Kernighan e Dennis Ritchie, \
embora Kernighan já o usasse em um tutorial interno da Bell Labs em 1974. \
Desde então, é o primeiro programa escrito por quem aprende uma nova linguagem.";

/// Short history of the "Hello, World!" program
pub struct HistoryResource {
    descriptor: ResourceDescriptor,
}

impl HistoryResource {
    pub fn new() -> Self {
        Self {
            descriptor: ResourceDescriptor {
                uri: HISTORY_URI.to_string(),
                name: "História do Hello World".to_string(),
                description: Some("Um breve histórico do programa Hello World".to_string()),
                mime_type: Some("text/plain".to_string()),
            },
        }
    }
}

impl Default for HistoryResource {
    fn default() -> Self {
        Self::new()
    }
}

impl ResourceHandler for HistoryResource {
    fn descriptor(&self) -> &ResourceDescriptor {
        &self.descriptor
    }

    fn read(&self) -> Result<ResourceContents> {
        Ok(ResourceContents {
            uri: self.descriptor.uri.clone(),
            mime_type: self.descriptor.mime_type.clone(),
            text: HISTORY_TEXT.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_history() {
        let contents = HistoryResource::new().read().unwrap();

        assert_eq!(contents.uri, HISTORY_URI);
        assert_eq!(contents.mime_type.as_deref(), Some("text/plain"));
        assert!(contents.text.contains("Hello, World!"));
    }
}
