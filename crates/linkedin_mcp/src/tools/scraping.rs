//! Browser-backed read tools.

use super::args;
use crate::tools::McpTool;
use crate::{LinkedInService, McpResult, respond};
use async_trait::async_trait;
use linkedin_core::JobSearchQuery;
use linkedin_error::LinkedInResult;
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::instrument;

/// Scrapes a member profile.
pub struct PersonProfileTool {
    service: Arc<LinkedInService>,
}

impl PersonProfileTool {
    /// Tool over `service`.
    pub fn new(service: Arc<LinkedInService>) -> Self {
        Self { service }
    }

    async fn run(&self, input: &Value) -> LinkedInResult<Value> {
        let url = args::required_str(input, "linkedin_url")?;
        let profile = self.service.person_profile(url).await?;
        Ok(json!({ "profile": profile }))
    }
}

#[async_trait]
impl McpTool for PersonProfileTool {
    fn name(&self) -> &str {
        "get_person_profile"
    }

    fn description(&self) -> &str {
        "Read a LinkedIn member profile: name, headline, location, about, experience, \
         education and skills. Accepts a profile URL or public profile id."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "linkedin_url": {
                    "type": "string",
                    "description": "Profile URL (https://www.linkedin.com/in/<id>/) or public profile id"
                }
            },
            "required": ["linkedin_url"]
        })
    }

    #[instrument(skip(self, input))]
    async fn execute(&self, input: Value) -> McpResult<Value> {
        Ok(respond(self.name(), self.run(&input).await))
    }
}

/// Scrapes a company page.
pub struct CompanyProfileTool {
    service: Arc<LinkedInService>,
}

impl CompanyProfileTool {
    /// Tool over `service`.
    pub fn new(service: Arc<LinkedInService>) -> Self {
        Self { service }
    }

    async fn run(&self, input: &Value) -> LinkedInResult<Value> {
        let url = args::required_str(input, "company_url")?;
        let get_employees = args::flag(input, "get_employees")?;
        let company = self.service.company_profile(url, get_employees).await?;
        Ok(json!({ "company": company }))
    }
}

#[async_trait]
impl McpTool for CompanyProfileTool {
    fn name(&self) -> &str {
        "get_company_profile"
    }

    fn description(&self) -> &str {
        "Read a LinkedIn company page: overview, website, industry, size, headquarters and \
         specialties. Optionally lists employees shown on the company's people page."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "company_url": {
                    "type": "string",
                    "description": "Company URL (https://www.linkedin.com/company/<id>/) or company id"
                },
                "get_employees": {
                    "type": "boolean",
                    "description": "Also read the people page",
                    "default": false
                }
            },
            "required": ["company_url"]
        })
    }

    #[instrument(skip(self, input))]
    async fn execute(&self, input: Value) -> McpResult<Value> {
        Ok(respond(self.name(), self.run(&input).await))
    }
}

/// Scrapes a job posting.
pub struct JobDetailsTool {
    service: Arc<LinkedInService>,
}

impl JobDetailsTool {
    /// Tool over `service`.
    pub fn new(service: Arc<LinkedInService>) -> Self {
        Self { service }
    }

    async fn run(&self, input: &Value) -> LinkedInResult<Value> {
        let url = args::required_str(input, "job_url")?;
        let job = self.service.job_details(url).await?;
        Ok(json!({ "job": job }))
    }
}

#[async_trait]
impl McpTool for JobDetailsTool {
    fn name(&self) -> &str {
        "get_job_details"
    }

    fn description(&self) -> &str {
        "Read a LinkedIn job posting: title, company, location, employment type, age, \
         applicant count and description."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "job_url": {
                    "type": "string",
                    "description": "Job URL (https://www.linkedin.com/jobs/view/<id>/), a search URL with currentJobId, or a job id"
                }
            },
            "required": ["job_url"]
        })
    }

    #[instrument(skip(self, input))]
    async fn execute(&self, input: Value) -> McpResult<Value> {
        Ok(respond(self.name(), self.run(&input).await))
    }
}

/// Runs a job search.
pub struct SearchJobsTool {
    service: Arc<LinkedInService>,
}

impl SearchJobsTool {
    /// Tool over `service`.
    pub fn new(service: Arc<LinkedInService>) -> Self {
        Self { service }
    }

    async fn run(&self, input: &Value) -> LinkedInResult<Value> {
        let query = JobSearchQuery::new(
            args::required_str(input, "keywords")?,
            args::optional_str(input, "location")?.map(str::to_string),
            args::optional_count(input, "limit")?,
        )?;
        let jobs = self.service.search_jobs(&query).await?;
        Ok(json!({ "count": jobs.len(), "jobs": jobs }))
    }
}

#[async_trait]
impl McpTool for SearchJobsTool {
    fn name(&self) -> &str {
        "search_jobs"
    }

    fn description(&self) -> &str {
        "Search LinkedIn job postings by keywords and optional location. Returns title, \
         company, location and URL for each result."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "keywords": {
                    "type": "string",
                    "description": "Search keywords"
                },
                "location": {
                    "type": "string",
                    "description": "Location filter"
                },
                "limit": {
                    "type": "integer",
                    "description": "Maximum number of results",
                    "default": JobSearchQuery::DEFAULT_LIMIT,
                    "minimum": 1,
                    "maximum": JobSearchQuery::MAX_LIMIT
                }
            },
            "required": ["keywords"]
        })
    }

    #[instrument(skip(self, input))]
    async fn execute(&self, input: Value) -> McpResult<Value> {
        Ok(respond(self.name(), self.run(&input).await))
    }
}

/// Scrapes a single post.
pub struct ReadPostTool {
    service: Arc<LinkedInService>,
}

impl ReadPostTool {
    /// Tool over `service`.
    pub fn new(service: Arc<LinkedInService>) -> Self {
        Self { service }
    }

    async fn run(&self, input: &Value) -> LinkedInResult<Value> {
        let url = args::required_str(input, "post_url")?;
        let post = self.service.read_post(url).await?;
        Ok(json!({ "post": post }))
    }
}

#[async_trait]
impl McpTool for ReadPostTool {
    fn name(&self) -> &str {
        "read_linkedin_post"
    }

    fn description(&self) -> &str {
        "Read a single LinkedIn post: author, text, date, reaction/comment/repost counts \
         and attached media."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "post_url": {
                    "type": "string",
                    "description": "Post URL (/posts/... or /feed/update/urn:li:activity:...)"
                }
            },
            "required": ["post_url"]
        })
    }

    #[instrument(skip(self, input))]
    async fn execute(&self, input: Value) -> McpResult<Value> {
        Ok(respond(self.name(), self.run(&input).await))
    }
}
