//! Identity, credential and session tools.

use crate::tools::McpTool;
use crate::{LinkedInService, McpResult, respond};
use async_trait::async_trait;
use linkedin_error::LinkedInResult;
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::instrument;

/// The member the access token belongs to.
pub struct ProfileTool {
    service: Arc<LinkedInService>,
}

impl ProfileTool {
    /// Tool over `service`.
    pub fn new(service: Arc<LinkedInService>) -> Self {
        Self { service }
    }

    async fn run(&self) -> LinkedInResult<Value> {
        let me = self.service.profile().await?;
        Ok(json!({ "name": me.display_name(), "profile": me }))
    }
}

#[async_trait]
impl McpTool for ProfileTool {
    fn name(&self) -> &str {
        "get_linkedin_profile"
    }

    fn description(&self) -> &str {
        "Get the authenticated member's identity: person URN, name and email when granted."
    }

    fn input_schema(&self) -> Value {
        json!({ "type": "object", "properties": {} })
    }

    #[instrument(skip(self, _input))]
    async fn execute(&self, _input: Value) -> McpResult<Value> {
        Ok(respond(self.name(), self.run().await))
    }
}

/// Checks both credentials without changing any state.
pub struct ValidateCredentialsTool {
    service: Arc<LinkedInService>,
}

impl ValidateCredentialsTool {
    /// Tool over `service`.
    pub fn new(service: Arc<LinkedInService>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl McpTool for ValidateCredentialsTool {
    fn name(&self) -> &str {
        "validate_linkedin_credentials"
    }

    fn description(&self) -> &str {
        "Check the configured session cookie and access token against LinkedIn. Reports \
         valid, invalid, unreachable or unconfigured per mode."
    }

    fn input_schema(&self) -> Value {
        json!({ "type": "object", "properties": {} })
    }

    #[instrument(skip(self, _input))]
    async fn execute(&self, _input: Value) -> McpResult<Value> {
        let report = self.service.validate_credentials().await;
        Ok(respond(self.name(), Ok(json!(report))))
    }
}

/// Closes the browser session.
pub struct CloseSessionTool {
    service: Arc<LinkedInService>,
}

impl CloseSessionTool {
    /// Tool over `service`.
    pub fn new(service: Arc<LinkedInService>) -> Self {
        Self { service }
    }

    async fn run(&self) -> LinkedInResult<Value> {
        let closed = self.service.close_session().await?;
        let session = self.service.session_info().await;
        Ok(json!({ "closed": closed, "session": session }))
    }
}

#[async_trait]
impl McpTool for CloseSessionTool {
    fn name(&self) -> &str {
        "close_session"
    }

    fn description(&self) -> &str {
        "Close the browser session and free its resources. The next scraping call starts a \
         fresh session. Safe to call when no session is open."
    }

    fn input_schema(&self) -> Value {
        json!({ "type": "object", "properties": {} })
    }

    #[instrument(skip(self, _input))]
    async fn execute(&self, _input: Value) -> McpResult<Value> {
        Ok(respond(self.name(), self.run().await))
    }
}
