//! REST side of the LinkedIn orchestration layer.
//!
//! [`ApiClient`] stamps version headers, throttles, retries and maps
//! statuses onto the shared error taxonomy. The higher-level services
//! ([`PostLifecycleController`], [`MediaUploader`], [`ReactionService`])
//! share one client and one [`IdentityResolver`]; [`LinkedInApi`] wires
//! them together.
//!
//! # Usage
//!
//! ```no_run
//! use linkedin_api::LinkedInApi;
//! use linkedin_core::{CredentialBundle, CredentialStore, LinkedInConfig, PostVisibility};
//! use std::sync::Arc;
//!
//! # async fn run() -> linkedin_error::LinkedInResult<()> {
//! let config = LinkedInConfig::load()?;
//! let credentials = Arc::new(CredentialStore::new(CredentialBundle::from_env()));
//! let api = LinkedInApi::with_reqwest(credentials, &config)?;
//! let post = api.posts().create_post("Hello 🚀", PostVisibility::Public, None).await?;
//! println!("{}", post.urn());
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod client;
mod identity;
mod media;
mod posts;
mod probe;
mod reactions;
mod retry;
mod status;
mod throttle;
mod transport;

#[cfg(feature = "test-support")]
pub mod testing;

pub use client::{ApiClient, ApiResponse, RESTLI_PROTOCOL_VERSION, encode_urn};
pub use identity::IdentityResolver;
pub use media::MediaUploader;
pub use posts::PostLifecycleController;
pub use probe::{CookieProbe, ProbeOutcome, probe_access_token};
pub use reactions::ReactionService;
pub use retry::{RequestKind, RetryPolicy};
pub use status::{error_for_status, redact};
pub use throttle::{RequestThrottle, ThrottleGuard};
pub use transport::{
    HttpMethod, HttpRequest, HttpResponse, HttpTransport, ReqwestTransport, RequestBody,
    TransportError,
};

use linkedin_core::{CredentialStore, LinkedInConfig};
use linkedin_error::LinkedInResult;
use std::sync::Arc;

/// The REST services sharing one client and identity cache.
#[derive(Debug, Clone)]
pub struct LinkedInApi {
    client: Arc<ApiClient>,
    identity: Arc<IdentityResolver>,
    media: Arc<MediaUploader>,
    posts: Arc<PostLifecycleController>,
    reactions: Arc<ReactionService>,
    cookie_probe: CookieProbe,
}

impl LinkedInApi {
    /// Wires the services over `transport`.
    pub fn new(
        transport: Arc<dyn HttpTransport>,
        credentials: Arc<CredentialStore>,
        config: &LinkedInConfig,
    ) -> Self {
        let cookie_probe = CookieProbe::new(
            Arc::clone(&transport),
            config.api().platform_url().clone(),
            config.api().request_timeout(),
        );
        let client = Arc::new(ApiClient::new(transport, credentials, config));
        let identity = Arc::new(IdentityResolver::new(Arc::clone(&client)));
        let media = Arc::new(MediaUploader::new(
            Arc::clone(&client),
            Arc::clone(&identity),
            config.media().clone(),
        ));
        let posts = Arc::new(PostLifecycleController::new(
            Arc::clone(&client),
            Arc::clone(&identity),
            Arc::clone(&media),
        ));
        let reactions = Arc::new(ReactionService::new(
            Arc::clone(&client),
            Arc::clone(&identity),
        ));
        Self {
            client,
            identity,
            media,
            posts,
            reactions,
            cookie_probe,
        }
    }

    /// Wires the services over reqwest.
    pub fn with_reqwest(
        credentials: Arc<CredentialStore>,
        config: &LinkedInConfig,
    ) -> LinkedInResult<Self> {
        let transport = ReqwestTransport::new(
            config.api().connect_timeout(),
            config.api().request_timeout(),
        )?;
        Ok(Self::new(Arc::new(transport), credentials, config))
    }

    /// Request client.
    pub fn client(&self) -> &Arc<ApiClient> {
        &self.client
    }

    /// Identity cache.
    pub fn identity(&self) -> &Arc<IdentityResolver> {
        &self.identity
    }

    /// Image upload and lookup.
    pub fn media(&self) -> &Arc<MediaUploader> {
        &self.media
    }

    /// Post create/update/delete.
    pub fn posts(&self) -> &Arc<PostLifecycleController> {
        &self.posts
    }

    /// Reactions.
    pub fn reactions(&self) -> &Arc<ReactionService> {
        &self.reactions
    }

    /// Session cookie check.
    pub fn cookie_probe(&self) -> &CookieProbe {
        &self.cookie_probe
    }
}
