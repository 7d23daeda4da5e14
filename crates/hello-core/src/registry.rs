//! Capability registry for tools, resources and prompts

use indexmap::IndexMap;
use tracing::{debug, warn};

use crate::error::{HelloError, Result};
use crate::handlers::{
    GreetPrompt, HelloTool, HistoryResource, PromptHandler, ResourceHandler, ToolHandler,
};
use crate::types::{
    Arguments, Content, PromptDescriptor, PromptResult, ResourceContents, ResourceDescriptor,
    ToolDescriptor,
};

/// Immutable table of the capabilities a server exposes.
///
/// Built once through [`RegistryBuilder`]; there is no way to add or remove
/// entries afterwards. Listing order is registration order.
pub struct CapabilityRegistry {
    tools: IndexMap<String, Box<dyn ToolHandler>>,
    resources: IndexMap<String, Box<dyn ResourceHandler>>,
    prompts: IndexMap<String, Box<dyn PromptHandler>>,
}

impl CapabilityRegistry {
    /// Create the standard registry: `hello`, `history://hello-world` and `greet`
    pub fn new(debug: bool) -> Self {
        Self::builder()
            .tool(HelloTool::new(debug))
            .resource(HistoryResource::new())
            .prompt(GreetPrompt::new())
            .build()
    }

    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    pub fn list_tools(&self) -> Vec<ToolDescriptor> {
        self.tools.values().map(|t| t.descriptor().clone()).collect()
    }

    pub fn list_resources(&self) -> Vec<ResourceDescriptor> {
        self.resources
            .values()
            .map(|r| r.descriptor().clone())
            .collect()
    }

    pub fn list_prompts(&self) -> Vec<PromptDescriptor> {
        self.prompts
            .values()
            .map(|p| p.descriptor().clone())
            .collect()
    }

    /// Invoke a tool by name
    pub fn call_tool(&self, name: &str, arguments: &Arguments) -> Result<Vec<Content>> {
        let tool = self
            .tools
            .get(name)
            .ok_or_else(|| HelloError::UnknownTool(name.to_string()))?;

        debug!("Calling tool: {}", name);
        tool.call(arguments)
    }

    /// Read a resource by URI
    pub fn read_resource(&self, uri: &str) -> Result<ResourceContents> {
        let resource = self
            .resources
            .get(uri)
            .ok_or_else(|| HelloError::UnknownResource(uri.to_string()))?;

        debug!("Reading resource: {}", uri);
        resource.read()
    }

    /// Render a prompt by name.
    ///
    /// Arguments declared as required must be present before the prompt
    /// handler runs.
    pub fn get_prompt(&self, name: &str, arguments: &Arguments) -> Result<PromptResult> {
        let prompt = self
            .prompts
            .get(name)
            .ok_or_else(|| HelloError::UnknownPrompt(name.to_string()))?;

        if let Some(missing) = prompt
            .descriptor()
            .required_arguments()
            .find(|arg| arguments.get(*arg).map_or(true, |v| v.is_null()))
        {
            return Err(HelloError::MissingArgument(missing.to_string()));
        }

        debug!("Rendering prompt: {}", name);
        prompt.get(arguments)
    }
}

/// Builder for [`CapabilityRegistry`]
#[derive(Default)]
pub struct RegistryBuilder {
    tools: IndexMap<String, Box<dyn ToolHandler>>,
    resources: IndexMap<String, Box<dyn ResourceHandler>>,
    prompts: IndexMap<String, Box<dyn PromptHandler>>,
}

impl RegistryBuilder {
    /// Register a tool. The first registration of a name wins.
    pub fn tool(mut self, tool: impl ToolHandler + 'static) -> Self {
        let name = tool.descriptor().name.clone();
        if self.tools.contains_key(&name) {
            warn!("Tool already registered, ignoring: {}", name);
        } else {
            self.tools.insert(name, Box::new(tool));
        }
        self
    }

    /// Register a resource. The first registration of a URI wins.
    pub fn resource(mut self, resource: impl ResourceHandler + 'static) -> Self {
        let uri = resource.descriptor().uri.clone();
        if self.resources.contains_key(&uri) {
            warn!("Resource already registered, ignoring: {}", uri);
        } else {
            self.resources.insert(uri, Box::new(resource));
        }
        self
    }

    /// Register a prompt. The first registration of a name wins.
    pub fn prompt(mut self, prompt: impl PromptHandler + 'static) -> Self {
        let name = prompt.descriptor().name.clone();
        if self.prompts.contains_key(&name) {
            warn!("Prompt already registered, ignoring: {}", name);
        } else {
            self.prompts.insert(name, Box::new(prompt));
        }
        self
    }

    pub fn build(self) -> CapabilityRegistry {
        debug!(
            "Registry built with {} tools, {} resources, {} prompts",
            self.tools.len(),
            self.resources.len(),
            self.prompts.len()
        );

        CapabilityRegistry {
            tools: self.tools,
            resources: self.resources,
            prompts: self.prompts,
        }
    }
}
