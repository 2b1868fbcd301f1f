//! Cached identity of the token's owner.

use crate::{ApiClient, HttpMethod};
use linkedin_core::{PersonIdentity, Urn};
use linkedin_error::{LinkedInError, LinkedInErrorKind, LinkedInResult};
use serde::Deserialize;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, instrument, warn};

#[derive(Deserialize)]
struct UserInfo {
    sub: String,
    #[serde(default)]
    given_name: String,
    #[serde(default)]
    family_name: String,
    email: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct MeProfile {
    id: String,
    #[serde(default)]
    localized_first_name: String,
    #[serde(default)]
    localized_last_name: String,
}

#[derive(Debug, Clone)]
struct CachedIdentity {
    identity: PersonIdentity,
    generation: u64,
}

/// Resolves and caches the [`PersonIdentity`] behind the access token.
///
/// Reads are lock-shared. Resolution happens under a single-writer lock, so
/// concurrent callers that miss the cache wait for one lookup instead of
/// each issuing their own. The cache is tied to the credential store's access
/// token generation and is dropped when the token is refreshed or when
/// [`invalidate`](Self::invalidate) is called after an authentication
/// failure.
#[derive(Debug)]
pub struct IdentityResolver {
    client: Arc<ApiClient>,
    cached: RwLock<Option<CachedIdentity>>,
    resolving: Mutex<()>,
}

impl IdentityResolver {
    /// Creates an empty resolver.
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self {
            client,
            cached: RwLock::new(None),
            resolving: Mutex::new(()),
        }
    }

    async fn cached_for(&self, generation: u64) -> Option<PersonIdentity> {
        self.cached
            .read()
            .await
            .as_ref()
            .filter(|c| c.generation == generation)
            .map(|c| c.identity.clone())
    }

    /// The current identity, resolving it on first use.
    #[instrument(skip(self))]
    pub async fn current(&self) -> LinkedInResult<PersonIdentity> {
        let generation = self.client.credentials().token_generation();
        if let Some(identity) = self.cached_for(generation).await {
            return Ok(identity);
        }

        let _writer = self.resolving.lock().await;
        let generation = self.client.credentials().token_generation();
        if let Some(identity) = self.cached_for(generation).await {
            return Ok(identity);
        }

        let identity = self.resolve().await?;
        info!(urn = %identity.urn(), "Resolved API identity");
        *self.cached.write().await = Some(CachedIdentity {
            identity: identity.clone(),
            generation,
        });
        Ok(identity)
    }

    /// Drops the cached identity so the next call re-resolves it.
    pub async fn invalidate(&self) {
        let _writer = self.resolving.lock().await;
        if self.cached.write().await.take().is_some() {
            debug!("Identity cache invalidated");
        }
    }

    /// Looks the identity up without reading or writing the cache.
    pub async fn probe(&self) -> LinkedInResult<PersonIdentity> {
        self.resolve().await
    }

    async fn resolve(&self) -> LinkedInResult<PersonIdentity> {
        let userinfo_url = self.client.settings().userinfo_url().clone();
        let first = match self
            .client
            .send_to(HttpMethod::Get, &userinfo_url, None)
            .await
            .and_then(|r| r.decode::<UserInfo>())
        {
            Ok(info) => {
                return Ok(PersonIdentity::new(
                    Urn::person(&info.sub),
                    info.given_name,
                    info.family_name,
                    info.email,
                ));
            }
            Err(err) => err,
        };
        if matches!(first.kind(), LinkedInErrorKind::Configuration(_)) {
            return Err(first);
        }
        warn!(error = %first.kind(), "userinfo lookup failed, trying /me");

        match self
            .client
            .send(HttpMethod::Get, "/me", None, &[])
            .await
            .and_then(|r| r.decode::<MeProfile>())
        {
            Ok(me) => Ok(PersonIdentity::new(
                Urn::person(&me.id),
                me.localized_first_name,
                me.localized_last_name,
                None,
            )),
            Err(second) => {
                warn!(error = %second.kind(), "/me lookup failed");
                Err(preferred_error(first, second))
            }
        }
    }
}

/// Keeps the more informative of two lookup failures.
fn preferred_error(first: LinkedInError, second: LinkedInError) -> LinkedInError {
    let is_auth = |e: &LinkedInError| matches!(e.kind(), LinkedInErrorKind::Authentication { .. });
    if !is_auth(&first) && is_auth(&second) {
        second
    } else {
        first
    }
}
