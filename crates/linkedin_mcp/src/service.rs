//! The orchestration facade.
//!
//! [`LinkedInService`] is the one object the tools talk to. It checks that the
//! mode an operation needs is configured, normalizes the caller's URLs and
//! identifiers, and routes the call to the browser session or the REST
//! services.

use linkedin_api::{LinkedInApi, ProbeOutcome, probe_access_token};
use linkedin_browser::{
    BrowserDriver, BrowserSessionManager, ChromiumDriver, CompanyExtractor, EmployeeExtractor,
    JobExtractor, JobSearchExtractor, PostExtractor, ProfileExtractor, SessionInfo, company_url,
    job_url, post_url, profile_url,
};
use linkedin_core::{
    Capability, CompanyRecord, CredentialStore, JobRecord, JobSearchQuery, JobSummary,
    LinkedInConfig, MediaAsset, PersonIdentity, PostPageRecord, PostRecord, PostVisibility,
    ProfileRecord, ReactionRecord, ReactionSummary, ReactionType, Urn,
};
use linkedin_error::LinkedInResult;
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, instrument};

/// People read from a company's people page when employees are requested.
pub const EMPLOYEE_LIMIT: usize = 25;

/// Outcome of checking one access mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "detail", rename_all = "lowercase")]
pub enum CredentialStatus {
    /// The platform accepted the credential
    Valid,
    /// The platform rejected the credential
    Invalid(String),
    /// The platform could not be asked
    Unreachable(String),
    /// No credential is configured for the mode
    Unconfigured,
}

impl From<ProbeOutcome> for CredentialStatus {
    fn from(outcome: ProbeOutcome) -> Self {
        match outcome {
            ProbeOutcome::Valid => Self::Valid,
            ProbeOutcome::Invalid(detail) => Self::Invalid(detail),
            ProbeOutcome::Unreachable(detail) => Self::Unreachable(detail),
        }
    }
}

/// Per-mode credential validity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CredentialReport {
    /// Session cookie
    pub scraping: CredentialStatus,
    /// Access token
    pub api: CredentialStatus,
}

/// Routes each operation to the browser session or the REST services.
#[derive(Debug)]
pub struct LinkedInService {
    credentials: Arc<CredentialStore>,
    config: LinkedInConfig,
    api: LinkedInApi,
    session: BrowserSessionManager,
}

impl LinkedInService {
    /// Wires the facade over explicit collaborators.
    pub fn new(
        credentials: Arc<CredentialStore>,
        config: LinkedInConfig,
        api: LinkedInApi,
        driver: Arc<dyn BrowserDriver>,
    ) -> Self {
        let session = BrowserSessionManager::new(
            driver,
            Arc::clone(&credentials),
            config.browser().clone(),
        );
        Self {
            credentials,
            config,
            api,
            session,
        }
    }

    /// Production wiring: reqwest for the API, Chrome for scraping.
    pub fn from_config(
        credentials: Arc<CredentialStore>,
        config: LinkedInConfig,
    ) -> LinkedInResult<Self> {
        let api = LinkedInApi::with_reqwest(Arc::clone(&credentials), &config)?;
        Ok(Self::new(credentials, config, api, Arc::new(ChromiumDriver)))
    }

    /// Credential store.
    pub fn credentials(&self) -> &Arc<CredentialStore> {
        &self.credentials
    }

    /// REST services.
    pub fn api(&self) -> &LinkedInApi {
        &self.api
    }

    /// Browser session.
    pub fn session(&self) -> &BrowserSessionManager {
        &self.session
    }

    /// Starts the browser up front when eager init is configured and a
    /// cookie is present. Returns whether a session was started.
    #[instrument(skip(self))]
    pub async fn start(&self) -> LinkedInResult<bool> {
        if !*self.config.browser().eager_init() || !self.credentials.has_scraping_credential() {
            return Ok(false);
        }
        self.session.ensure_active().await?;
        info!("Browser session started eagerly");
        Ok(true)
    }

    fn require(&self, capability: Capability) -> LinkedInResult<()> {
        self.credentials.capabilities().require(capability)
    }

    fn platform_url(&self) -> &str {
        self.config.browser().platform_url()
    }

    // Scraping mode

    /// Reads a member profile.
    #[instrument(skip(self))]
    pub async fn person_profile(&self, linkedin_url: &str) -> LinkedInResult<ProfileRecord> {
        self.require(Capability::Scraping)?;
        let url = profile_url(linkedin_url, self.platform_url())?;
        self.session.extract(&url, &ProfileExtractor).await
    }

    /// Reads a company's about page and, when asked, its people page.
    #[instrument(skip(self))]
    pub async fn company_profile(
        &self,
        company: &str,
        get_employees: bool,
    ) -> LinkedInResult<CompanyRecord> {
        self.require(Capability::Scraping)?;
        let base = company_url(company, self.platform_url())?;
        let mut record = self
            .session
            .extract(&format!("{base}about/"), &CompanyExtractor)
            .await?;
        if get_employees {
            record.employees = self
                .session
                .extract(&format!("{base}people/"), &EmployeeExtractor::new(EMPLOYEE_LIMIT))
                .await?;
        }
        Ok(record)
    }

    /// Reads a job posting.
    #[instrument(skip(self))]
    pub async fn job_details(&self, job: &str) -> LinkedInResult<JobRecord> {
        self.require(Capability::Scraping)?;
        let (url, id) = job_url(job, self.platform_url())?;
        self.session.extract(&url, &JobExtractor::new(id)).await
    }

    /// Runs a job search.
    #[instrument(skip(self))]
    pub async fn search_jobs(&self, query: &JobSearchQuery) -> LinkedInResult<Vec<JobSummary>> {
        self.require(Capability::Scraping)?;
        let url = query.to_url(self.platform_url());
        self.session
            .extract(&url, &JobSearchExtractor::new(*query.limit()))
            .await
    }

    /// Reads a single post page.
    #[instrument(skip(self))]
    pub async fn read_post(&self, post: &str) -> LinkedInResult<PostPageRecord> {
        self.require(Capability::Scraping)?;
        let (url, urn) = post_url(post, self.platform_url())?;
        self.session.extract(&url, &PostExtractor::new(urn)).await
    }

    /// Closes the browser. Needs no credential.
    pub async fn close_session(&self) -> LinkedInResult<bool> {
        self.session.close().await
    }

    /// Browser session snapshot.
    pub async fn session_info(&self) -> SessionInfo {
        self.session.info().await
    }

    // API mode

    /// Creates a post.
    pub async fn create_post(
        &self,
        text: &str,
        visibility: PostVisibility,
        image_url: Option<&str>,
    ) -> LinkedInResult<PostRecord> {
        self.require(Capability::Api)?;
        self.api.posts().create_post(text, visibility, image_url).await
    }

    /// Replaces a post's text.
    pub async fn update_post(&self, post_urn: &Urn, text: &str) -> LinkedInResult<PostRecord> {
        self.require(Capability::Api)?;
        self.api.posts().update_post(post_urn, text).await
    }

    /// Deletes a post.
    pub async fn delete_post(&self, post_urn: &Urn) -> LinkedInResult<()> {
        self.require(Capability::Api)?;
        self.api.posts().delete_post(post_urn).await
    }

    /// Uploads an image from a URL.
    pub async fn upload_image(&self, image_url: &str) -> LinkedInResult<MediaAsset> {
        self.require(Capability::Api)?;
        self.api.media().upload_image(image_url).await
    }

    /// Current platform view of an image.
    pub async fn get_image(&self, image_urn: &Urn) -> LinkedInResult<MediaAsset> {
        self.require(Capability::Api)?;
        self.api.media().get_image(image_urn).await
    }

    /// Sets the member's reaction on a post.
    pub async fn add_reaction(
        &self,
        entity_urn: &Urn,
        reaction_type: ReactionType,
    ) -> LinkedInResult<ReactionRecord> {
        self.require(Capability::Api)?;
        self.api.reactions().add_reaction(entity_urn, reaction_type).await
    }

    /// Removes the member's reaction from a post.
    pub async fn remove_reaction(&self, entity_urn: &Urn) -> LinkedInResult<()> {
        self.require(Capability::Api)?;
        self.api.reactions().remove_reaction(entity_urn).await
    }

    /// Reactions on a post.
    pub async fn get_reactions(&self, entity_urn: &Urn) -> LinkedInResult<ReactionSummary> {
        self.require(Capability::Api)?;
        self.api.reactions().get_reactions(entity_urn).await
    }

    /// The member the access token belongs to.
    pub async fn profile(&self) -> LinkedInResult<PersonIdentity> {
        self.require(Capability::Api)?;
        self.api.identity().current().await
    }

    // Both modes

    /// Probes each configured credential without changing any state.
    ///
    /// The cookie is checked with one HTTP request, so no browser is
    /// started; the token is checked with an uncached identity lookup.
    #[instrument(skip(self))]
    pub async fn validate_credentials(&self) -> CredentialReport {
        let scraping = match self.credentials.session_cookie() {
            Ok(cookie) => self.api.cookie_probe().check(&cookie).await.into(),
            Err(_) => CredentialStatus::Unconfigured,
        };
        let api = if self.credentials.has_api_credential() {
            probe_access_token(self.api.identity()).await.into()
        } else {
            CredentialStatus::Unconfigured
        };
        info!(?scraping, ?api, "Credentials validated");
        CredentialReport { scraping, api }
    }
}
