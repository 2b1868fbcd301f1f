//! MCP tools.
//!
//! Each tool maps to exactly one facade operation. Tools never return an
//! `Err` for a failed LinkedIn operation; the failure is folded into the
//! normalized payload by [`respond`](crate::respond).

mod account;
mod args;
mod media;
mod posts;
mod reactions;
mod scraping;

pub use account::{CloseSessionTool, ProfileTool, ValidateCredentialsTool};
pub use media::{GetImageTool, UploadImageTool};
pub use posts::{CreatePostTool, DeletePostTool, UpdatePostTool};
pub use reactions::{AddReactionTool, GetReactionsTool, RemoveReactionTool};
pub use scraping::{
    CompanyProfileTool, JobDetailsTool, PersonProfileTool, ReadPostTool, SearchJobsTool,
};

use crate::{LinkedInService, McpError, McpResult};
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, instrument};

/// A named operation callable over MCP.
#[async_trait]
pub trait McpTool: Send + Sync {
    /// Tool name as registered with the client.
    fn name(&self) -> &str;

    /// Description shown to the calling model.
    fn description(&self) -> &str;

    /// JSON Schema of the arguments.
    fn input_schema(&self) -> Value;

    /// Runs the tool and returns the normalized payload.
    async fn execute(&self, input: Value) -> McpResult<Value>;
}

/// Registry of available tools.
#[derive(Clone, Default)]
pub struct ToolRegistry {
    tools: Arc<Vec<Arc<dyn McpTool>>>,
}

impl std::fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.tools.iter().map(|t| t.name().to_string()))
            .finish()
    }
}

impl ToolRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// The full LinkedIn tool catalogue over one service.
    pub fn linkedin(service: Arc<LinkedInService>) -> Self {
        let mut registry = Self::new();
        let tools: Vec<Arc<dyn McpTool>> = vec![
            // Scraping mode
            Arc::new(PersonProfileTool::new(Arc::clone(&service))),
            Arc::new(CompanyProfileTool::new(Arc::clone(&service))),
            Arc::new(JobDetailsTool::new(Arc::clone(&service))),
            Arc::new(SearchJobsTool::new(Arc::clone(&service))),
            Arc::new(ReadPostTool::new(Arc::clone(&service))),
            Arc::new(CloseSessionTool::new(Arc::clone(&service))),
            // API mode
            Arc::new(CreatePostTool::new(Arc::clone(&service))),
            Arc::new(UpdatePostTool::new(Arc::clone(&service))),
            Arc::new(DeletePostTool::new(Arc::clone(&service))),
            Arc::new(UploadImageTool::new(Arc::clone(&service))),
            Arc::new(GetImageTool::new(Arc::clone(&service))),
            Arc::new(AddReactionTool::new(Arc::clone(&service))),
            Arc::new(RemoveReactionTool::new(Arc::clone(&service))),
            Arc::new(GetReactionsTool::new(Arc::clone(&service))),
            Arc::new(ProfileTool::new(Arc::clone(&service))),
            // Both
            Arc::new(ValidateCredentialsTool::new(service)),
        ];
        for tool in tools {
            registry.register(tool);
        }
        registry
    }

    /// Registers a tool. Lookup returns the first tool registered under a
    /// name.
    pub fn register(&mut self, tool: Arc<dyn McpTool>) {
        Arc::make_mut(&mut self.tools).push(tool);
    }

    /// Lists all tools.
    pub fn list(&self) -> Vec<Arc<dyn McpTool>> {
        self.tools.as_ref().clone()
    }

    /// Looks a tool up by name.
    pub fn get(&self, name: &str) -> Option<Arc<dyn McpTool>> {
        self.tools.iter().find(|t| t.name() == name).cloned()
    }

    /// Runs the named tool.
    #[instrument(skip(self, input))]
    pub async fn execute(&self, name: &str, input: Value) -> McpResult<Value> {
        let tool = self
            .get(name)
            .ok_or_else(|| McpError::ToolNotFound(name.to_string()))?;
        debug!(tool = name, "Dispatching tool");
        tool.execute(input).await
    }
}
