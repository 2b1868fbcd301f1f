//! Read-only credential checks.

use crate::{HttpMethod, HttpRequest, HttpTransport, IdentityResolver};
use linkedin_core::{SessionCookie, is_login_url};
use linkedin_error::LinkedInErrorKind;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, instrument};

/// Result of probing one credential.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, derive_more::Display)]
#[serde(tag = "status", content = "detail", rename_all = "lowercase")]
pub enum ProbeOutcome {
    /// The platform accepted the credential
    #[display("valid")]
    Valid,
    /// The platform rejected the credential
    #[display("invalid: {_0}")]
    Invalid(String),
    /// The platform could not be asked
    #[display("unreachable: {_0}")]
    Unreachable(String),
}

impl ProbeOutcome {
    /// Short label: `valid`, `invalid` or `unreachable`.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Valid => "valid",
            Self::Invalid(_) => "invalid",
            Self::Unreachable(_) => "unreachable",
        }
    }
}

/// Checks a session cookie with one plain HTTP request.
///
/// The feed page is requested with the cookie and redirects disabled. A
/// signed-in member gets the page; anyone else is redirected to a login
/// wall. No browser is started.
#[derive(Clone)]
pub struct CookieProbe {
    transport: Arc<dyn HttpTransport>,
    platform_url: String,
    timeout: Duration,
}

impl std::fmt::Debug for CookieProbe {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CookieProbe")
            .field("platform_url", &self.platform_url)
            .finish()
    }
}

impl CookieProbe {
    /// Creates a probe against `platform_url`.
    pub fn new(
        transport: Arc<dyn HttpTransport>,
        platform_url: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            transport,
            platform_url: platform_url.into(),
            timeout,
        }
    }

    /// Probes `cookie`.
    #[instrument(skip_all)]
    pub async fn check(&self, cookie: &SessionCookie) -> ProbeOutcome {
        let url = format!("{}/feed/", self.platform_url.trim_end_matches('/'));
        let request = HttpRequest::new(HttpMethod::Get, url)
            .header("Cookie", cookie.header_value())
            .with_timeout(self.timeout)
            .without_redirects();

        let response = match self.transport.execute(request).await {
            Ok(response) => response,
            Err(e) => return ProbeOutcome::Unreachable(e.to_string()),
        };
        debug!(status = response.status(), "Cookie probe answered");

        match response.status() {
            200..=299 => ProbeOutcome::Valid,
            300..=399 => match response.header("location") {
                Some(location) if is_login_url(location) => {
                    ProbeOutcome::Invalid("session cookie was redirected to login".to_string())
                }
                Some(_) => ProbeOutcome::Valid,
                None => ProbeOutcome::Unreachable(format!(
                    "redirect {} without a location",
                    response.status()
                )),
            },
            401 | 403 => ProbeOutcome::Invalid(format!(
                "session cookie rejected with HTTP {}",
                response.status()
            )),
            status => ProbeOutcome::Unreachable(format!("HTTP {status}")),
        }
    }
}

/// Probes the access token by resolving the identity without caching it.
#[instrument(skip_all)]
pub async fn probe_access_token(identity: &IdentityResolver) -> ProbeOutcome {
    match identity.probe().await {
        Ok(person) => {
            debug!(urn = %person.urn(), "Token probe succeeded");
            ProbeOutcome::Valid
        }
        Err(err) => match err.kind() {
            LinkedInErrorKind::Authentication { message, .. } => {
                ProbeOutcome::Invalid(message.clone())
            }
            LinkedInErrorKind::Version { message, .. } => ProbeOutcome::Invalid(message.clone()),
            other => ProbeOutcome::Unreachable(other.to_string()),
        },
    }
}
