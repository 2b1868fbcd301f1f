//! MCP router.

use crate::McpError;
use crate::tools::ToolRegistry;
use mcp_server::Router;
use mcp_server::router::CapabilitiesBuilder;
use mcp_spec::{
    content::Content,
    handler::{PromptError, ResourceError, ToolError},
    prompt::Prompt,
    protocol::ServerCapabilities,
    resource::Resource,
    tool::Tool,
};
use serde_json::Value;
use std::future::Future;
use std::pin::Pin;
use tracing::{debug, info, instrument};

/// MCP router exposing the LinkedIn tools.
#[derive(Clone)]
pub struct LinkedInRouter {
    name: String,
    version: String,
    tools: ToolRegistry,
}

impl LinkedInRouter {
    /// Creates a new router builder.
    pub fn builder() -> LinkedInRouterBuilder {
        LinkedInRouterBuilder::default()
    }

    /// Registered tools.
    pub fn tools(&self) -> &ToolRegistry {
        &self.tools
    }
}

impl Router for LinkedInRouter {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn instructions(&self) -> String {
        format!(
            "LinkedIn MCP Server v{}\n\n\
            Scraping tools read profiles, companies, jobs and posts through a logged-in \
            browser session (LINKEDIN_COOKIE). API tools create and manage posts, images \
            and reactions through the REST API (LINKEDIN_ACCESS_TOKEN). Every tool answers \
            with status \"success\" or status \"error\" plus an error kind.\n\n\
            Available tools: {}",
            self.version,
            self.tools
                .list()
                .iter()
                .map(|t| t.name().to_string())
                .collect::<Vec<_>>()
                .join(", ")
        )
    }

    fn capabilities(&self) -> ServerCapabilities {
        CapabilitiesBuilder::new().with_tools(false).build()
    }

    fn list_tools(&self) -> Vec<Tool> {
        self.tools
            .list()
            .iter()
            .map(|tool| {
                Tool::new(
                    tool.name().to_string(),
                    tool.description().to_string(),
                    tool.input_schema(),
                )
            })
            .collect()
    }

    #[instrument(skip(self, arguments), fields(tool = %tool_name))]
    fn call_tool(
        &self,
        tool_name: &str,
        arguments: Value,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<Content>, ToolError>> + Send + 'static>> {
        debug!(tool = %tool_name, "Tool called");

        let tools = self.tools.clone();
        let tool_name = tool_name.to_string();

        Box::pin(async move {
            match tools.execute(&tool_name, arguments).await {
                Ok(result) => {
                    info!(tool = %tool_name, status = %result["status"], "Tool finished");
                    let text = serde_json::to_string_pretty(&result)
                        .unwrap_or_else(|_| result.to_string());
                    Ok(vec![Content::text(text)])
                }
                Err(e) => {
                    debug!(tool = %tool_name, error = %e, "Tool dispatch failed");
                    Err(match e {
                        McpError::ToolNotFound(_) => ToolError::NotFound(e.to_string()),
                        McpError::InvalidInput(_) => ToolError::InvalidParameters(e.to_string()),
                    })
                }
            }
        })
    }

    fn list_resources(&self) -> Vec<Resource> {
        vec![]
    }

    fn read_resource(
        &self,
        uri: &str,
    ) -> Pin<Box<dyn Future<Output = Result<String, ResourceError>> + Send + 'static>> {
        let uri = uri.to_string();
        Box::pin(async move { Err(ResourceError::NotFound(format!("No resource at {uri}"))) })
    }

    fn list_prompts(&self) -> Vec<Prompt> {
        vec![]
    }

    fn get_prompt(
        &self,
        prompt_name: &str,
    ) -> Pin<Box<dyn Future<Output = Result<String, PromptError>> + Send + 'static>> {
        let prompt_name = prompt_name.to_string();
        Box::pin(async move { Err(PromptError::NotFound(format!("Prompt {prompt_name} not found"))) })
    }
}

/// Builder for [`LinkedInRouter`].
#[derive(Default)]
pub struct LinkedInRouterBuilder {
    name: Option<String>,
    version: Option<String>,
    tools: Option<ToolRegistry>,
}

impl LinkedInRouterBuilder {
    /// Sets the server name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the server version.
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Sets the tool registry.
    pub fn tools(mut self, tools: ToolRegistry) -> Self {
        self.tools = Some(tools);
        self
    }

    /// Builds the router.
    pub fn build(self) -> LinkedInRouter {
        LinkedInRouter {
            name: self.name.unwrap_or_else(|| "linkedin".to_string()),
            version: self
                .version
                .unwrap_or_else(|| env!("CARGO_PKG_VERSION").to_string()),
            tools: self.tools.unwrap_or_default(),
        }
    }
}
