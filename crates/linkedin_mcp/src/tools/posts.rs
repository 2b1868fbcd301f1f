//! Post lifecycle tools.

use super::args;
use crate::tools::McpTool;
use crate::{LinkedInService, McpResult, respond};
use async_trait::async_trait;
use linkedin_core::MAX_POST_CHARS;
use linkedin_error::LinkedInResult;
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::instrument;

/// Creates a post, optionally with an image.
pub struct CreatePostTool {
    service: Arc<LinkedInService>,
}

impl CreatePostTool {
    /// Tool over `service`.
    pub fn new(service: Arc<LinkedInService>) -> Self {
        Self { service }
    }

    async fn run(&self, input: &Value) -> LinkedInResult<Value> {
        let text = args::text(input, "text")?;
        let visibility = args::visibility(input, "visibility")?;
        let image_url = args::optional_str(input, "image_url")?;
        let post = self
            .service
            .create_post(&text, visibility, image_url)
            .await?;
        Ok(json!({
            "post_id": post.urn(),
            "visibility": post.visibility(),
            "media_urn": post.media_urn(),
            "message": "Post created",
        }))
    }
}

#[async_trait]
impl McpTool for CreatePostTool {
    fn name(&self) -> &str {
        "create_linkedin_post"
    }

    fn description(&self) -> &str {
        "Publish a LinkedIn post as the authenticated member. Optionally attaches an image \
         fetched from a URL. Returns the new post's URN as post_id."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "text": {
                    "type": "string",
                    "description": "Post text",
                    "maxLength": MAX_POST_CHARS
                },
                "visibility": {
                    "type": "string",
                    "enum": ["PUBLIC", "CONNECTIONS"],
                    "default": "PUBLIC"
                },
                "image_url": {
                    "type": "string",
                    "description": "URL of a JPEG, PNG or GIF image to attach (5MB max)"
                }
            },
            "required": ["text"]
        })
    }

    #[instrument(skip(self, input))]
    async fn execute(&self, input: Value) -> McpResult<Value> {
        Ok(respond(self.name(), self.run(&input).await))
    }
}

/// Replaces a post's text.
pub struct UpdatePostTool {
    service: Arc<LinkedInService>,
}

impl UpdatePostTool {
    /// Tool over `service`.
    pub fn new(service: Arc<LinkedInService>) -> Self {
        Self { service }
    }

    async fn run(&self, input: &Value) -> LinkedInResult<Value> {
        let urn = args::urn(input, "post_urn")?;
        let text = args::text(input, "text")?;
        let post = self.service.update_post(&urn, &text).await?;
        Ok(json!({
            "post_id": post.urn(),
            "text": post.text(),
            "message": "Post updated",
        }))
    }
}

#[async_trait]
impl McpTool for UpdatePostTool {
    fn name(&self) -> &str {
        "update_linkedin_post"
    }

    fn description(&self) -> &str {
        "Replace the text of an existing LinkedIn post. Media cannot be changed."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "post_urn": {
                    "type": "string",
                    "description": "Post URN, e.g. urn:li:share:123"
                },
                "text": {
                    "type": "string",
                    "description": "New post text",
                    "maxLength": MAX_POST_CHARS
                }
            },
            "required": ["post_urn", "text"]
        })
    }

    #[instrument(skip(self, input))]
    async fn execute(&self, input: Value) -> McpResult<Value> {
        Ok(respond(self.name(), self.run(&input).await))
    }
}

/// Deletes a post.
pub struct DeletePostTool {
    service: Arc<LinkedInService>,
}

impl DeletePostTool {
    /// Tool over `service`.
    pub fn new(service: Arc<LinkedInService>) -> Self {
        Self { service }
    }

    async fn run(&self, input: &Value) -> LinkedInResult<Value> {
        let urn = args::urn(input, "post_urn")?;
        self.service.delete_post(&urn).await?;
        Ok(json!({ "post_id": urn, "message": "Post deleted" }))
    }
}

#[async_trait]
impl McpTool for DeletePostTool {
    fn name(&self) -> &str {
        "delete_linkedin_post"
    }

    fn description(&self) -> &str {
        "Delete a LinkedIn post. Deleting a post that no longer exists reports NotFoundError."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "post_urn": {
                    "type": "string",
                    "description": "Post URN, e.g. urn:li:share:123"
                }
            },
            "required": ["post_urn"]
        })
    }

    #[instrument(skip(self, input))]
    async fn execute(&self, input: Value) -> McpResult<Value> {
        Ok(respond(self.name(), self.run(&input).await))
    }
}
