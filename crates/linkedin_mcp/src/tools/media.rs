//! Image tools.

use super::args;
use crate::tools::McpTool;
use crate::{LinkedInService, McpResult, respond};
use async_trait::async_trait;
use linkedin_core::MAX_IMAGE_BYTES;
use linkedin_error::LinkedInResult;
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::instrument;

/// Uploads an image from a URL.
pub struct UploadImageTool {
    service: Arc<LinkedInService>,
}

impl UploadImageTool {
    /// Tool over `service`.
    pub fn new(service: Arc<LinkedInService>) -> Self {
        Self { service }
    }

    async fn run(&self, input: &Value) -> LinkedInResult<Value> {
        let url = args::required_str(input, "image_url")?;
        let image = self.service.upload_image(url).await?;
        Ok(json!({ "image_urn": image.urn(), "image": image }))
    }
}

#[async_trait]
impl McpTool for UploadImageTool {
    fn name(&self) -> &str {
        "upload_linkedin_image"
    }

    fn description(&self) -> &str {
        "Upload an image to LinkedIn from a URL and wait until it is ready. Returns the \
         image URN for use in posts."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "image_url": {
                    "type": "string",
                    "description": format!("URL of a JPEG, PNG or GIF image, at most {MAX_IMAGE_BYTES} bytes")
                }
            },
            "required": ["image_url"]
        })
    }

    #[instrument(skip(self, input))]
    async fn execute(&self, input: Value) -> McpResult<Value> {
        Ok(respond(self.name(), self.run(&input).await))
    }
}

/// Looks an image up.
pub struct GetImageTool {
    service: Arc<LinkedInService>,
}

impl GetImageTool {
    /// Tool over `service`.
    pub fn new(service: Arc<LinkedInService>) -> Self {
        Self { service }
    }

    async fn run(&self, input: &Value) -> LinkedInResult<Value> {
        let urn = args::image_urn(input, "image_id")?;
        let image = self.service.get_image(&urn).await?;
        Ok(json!({ "image": image }))
    }
}

#[async_trait]
impl McpTool for GetImageTool {
    fn name(&self) -> &str {
        "get_linkedin_image"
    }

    fn description(&self) -> &str {
        "Look up a LinkedIn image: processing status and download URL."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "image_id": {
                    "type": "string",
                    "description": "Image URN (urn:li:image:...) or bare image id"
                }
            },
            "required": ["image_id"]
        })
    }

    #[instrument(skip(self, input))]
    async fn execute(&self, input: Value) -> McpResult<Value> {
        Ok(respond(self.name(), self.run(&input).await))
    }
}
