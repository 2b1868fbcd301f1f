//! Reaction tools.

use super::args;
use crate::tools::McpTool;
use crate::{LinkedInService, McpResult, respond};
use async_trait::async_trait;
use linkedin_core::ReactionType;
use linkedin_error::LinkedInResult;
use serde_json::{Value, json};
use std::sync::Arc;
use strum::IntoEnumIterator;
use tracing::instrument;

/// Sets the member's reaction on a post.
pub struct AddReactionTool {
    service: Arc<LinkedInService>,
}

impl AddReactionTool {
    /// Tool over `service`.
    pub fn new(service: Arc<LinkedInService>) -> Self {
        Self { service }
    }

    async fn run(&self, input: &Value) -> LinkedInResult<Value> {
        let urn = args::urn(input, "entity_urn")?;
        let reaction_type = args::reaction_type(input, "reaction_type")?;
        let reaction = self.service.add_reaction(&urn, reaction_type).await?;
        Ok(json!({ "reaction": reaction }))
    }
}

#[async_trait]
impl McpTool for AddReactionTool {
    fn name(&self) -> &str {
        "add_linkedin_reaction"
    }

    fn description(&self) -> &str {
        "React to a LinkedIn post. A member has at most one reaction per post; adding a \
         different type replaces the previous one."
    }

    fn input_schema(&self) -> Value {
        let types: Vec<String> = ReactionType::iter().map(|t| t.to_string()).collect();
        json!({
            "type": "object",
            "properties": {
                "entity_urn": {
                    "type": "string",
                    "description": "URN of the post to react to"
                },
                "reaction_type": {
                    "type": "string",
                    "enum": types,
                    "default": ReactionType::default().to_string()
                }
            },
            "required": ["entity_urn"]
        })
    }

    #[instrument(skip(self, input))]
    async fn execute(&self, input: Value) -> McpResult<Value> {
        Ok(respond(self.name(), self.run(&input).await))
    }
}

/// Removes the member's reaction from a post.
pub struct RemoveReactionTool {
    service: Arc<LinkedInService>,
}

impl RemoveReactionTool {
    /// Tool over `service`.
    pub fn new(service: Arc<LinkedInService>) -> Self {
        Self { service }
    }

    async fn run(&self, input: &Value) -> LinkedInResult<Value> {
        let urn = args::urn(input, "entity_urn")?;
        self.service.remove_reaction(&urn).await?;
        Ok(json!({ "entity_urn": urn, "message": "Reaction removed" }))
    }
}

#[async_trait]
impl McpTool for RemoveReactionTool {
    fn name(&self) -> &str {
        "remove_linkedin_reaction"
    }

    fn description(&self) -> &str {
        "Remove the authenticated member's reaction from a LinkedIn post."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "entity_urn": {
                    "type": "string",
                    "description": "URN of the post"
                }
            },
            "required": ["entity_urn"]
        })
    }

    #[instrument(skip(self, input))]
    async fn execute(&self, input: Value) -> McpResult<Value> {
        Ok(respond(self.name(), self.run(&input).await))
    }
}

/// Lists reactions on a post.
pub struct GetReactionsTool {
    service: Arc<LinkedInService>,
}

impl GetReactionsTool {
    /// Tool over `service`.
    pub fn new(service: Arc<LinkedInService>) -> Self {
        Self { service }
    }

    async fn run(&self, input: &Value) -> LinkedInResult<Value> {
        let urn = args::urn(input, "entity_urn")?;
        let summary = self.service.get_reactions(&urn).await?;
        Ok(json!({ "reactions": summary }))
    }
}

#[async_trait]
impl McpTool for GetReactionsTool {
    fn name(&self) -> &str {
        "get_linkedin_reactions"
    }

    fn description(&self) -> &str {
        "List reactions on a LinkedIn post with a count per reaction type."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "entity_urn": {
                    "type": "string",
                    "description": "URN of the post"
                }
            },
            "required": ["entity_urn"]
        })
    }

    #[instrument(skip(self, input))]
    async fn execute(&self, input: Value) -> McpResult<Value> {
        Ok(respond(self.name(), self.run(&input).await))
    }
}
