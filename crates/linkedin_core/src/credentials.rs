//! Credential bundles for the two access modes.

use linkedin_error::{LinkedInError, LinkedInResult};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{PoisonError, RwLock};
use tracing::{debug, info};

/// Name of the platform's authenticated session cookie.
pub const SESSION_COOKIE_NAME: &str = "li_at";

/// API version sent when none is configured.
pub const DEFAULT_API_VERSION: &str = "202510";

/// True when `url` is one of the pages the platform sends an
/// unauthenticated visitor to.
///
/// ```
/// use linkedin_core::is_login_url;
///
/// assert!(is_login_url("https://www.linkedin.com/login?session_redirect=%2Ffeed%2F"));
/// assert!(is_login_url("https://www.linkedin.com/authwall?trk=x"));
/// assert!(!is_login_url("https://www.linkedin.com/feed/"));
/// ```
pub fn is_login_url(url: &str) -> bool {
    let path = url
        .split_once("://")
        .map(|(_, rest)| rest.split_once('/').map(|(_, p)| p).unwrap_or(""))
        .unwrap_or(url)
        .trim_start_matches('/');
    ["login", "uas/login", "authwall", "checkpoint", "signup"]
        .iter()
        .any(|prefix| path.starts_with(prefix))
}

/// A credential value that never prints itself.
///
/// # Examples
///
/// ```
/// use linkedin_core::Secret;
///
/// let token = Secret::from("AQX-token");
/// assert_eq!(format!("{token:?}"), "[REDACTED]");
/// assert_eq!(token.expose(), "AQX-token");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Secret(String);

impl Secret {
    /// The raw value. Call only where the value leaves the process.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for Secret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl std::fmt::Display for Secret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl From<&str> for Secret {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for Secret {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// The `li_at` session cookie value.
///
/// Accepts either the bare value or a `li_at=<value>;` pair as copied from
/// browser developer tools.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionCookie(Secret);

impl SessionCookie {
    /// Normalizes a raw cookie string. Returns `None` when nothing is left.
    ///
    /// ```
    /// use linkedin_core::SessionCookie;
    ///
    /// let cookie = SessionCookie::parse("li_at=AQEDAR;").unwrap();
    /// assert_eq!(cookie.value().expose(), "AQEDAR");
    /// assert!(SessionCookie::parse("  ").is_none());
    /// ```
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        let value = trimmed
            .strip_prefix(SESSION_COOKIE_NAME)
            .and_then(|rest| rest.strip_prefix('='))
            .unwrap_or(trimmed);
        let value = value.trim_end_matches(';').trim();
        if value.is_empty() {
            None
        } else {
            Some(Self(Secret::from(value)))
        }
    }

    /// The cookie value.
    pub fn value(&self) -> &Secret {
        &self.0
    }

    /// `li_at=<value>` for a `Cookie` header.
    pub fn header_value(&self) -> String {
        format!("{SESSION_COOKIE_NAME}={}", self.0.expose())
    }
}

/// Credentials loaded at startup.
///
/// Either half may be absent. Absence is detected when a caller first uses
/// the corresponding mode, not here.
#[derive(Debug, Clone, Default, derive_builder::Builder)]
#[builder(setter(into, strip_option), default)]
pub struct CredentialBundle {
    /// Browser session cookie
    session_cookie: Option<SessionCookie>,
    /// OAuth client id
    client_id: Option<String>,
    /// OAuth client secret
    client_secret: Option<Secret>,
    /// OAuth bearer token
    access_token: Option<Secret>,
    /// `LinkedIn-Version` header value
    api_version: Option<String>,
}

impl CredentialBundle {
    /// Returns a builder for constructing a CredentialBundle.
    pub fn builder() -> CredentialBundleBuilder {
        CredentialBundleBuilder::default()
    }

    /// Reads credentials from the environment.
    ///
    /// Reads:
    /// - `LINKEDIN_COOKIE` (scraping mode)
    /// - `LINKEDIN_ACCESS_TOKEN` (API mode)
    /// - `LINKEDIN_CLIENT_ID`, `LINKEDIN_CLIENT_SECRET` (optional)
    /// - `LINKEDIN_API_VERSION` (default: [`DEFAULT_API_VERSION`])
    pub fn from_env() -> Self {
        let non_empty = |name: &str| std::env::var(name).ok().filter(|v| !v.trim().is_empty());
        Self {
            session_cookie: non_empty("LINKEDIN_COOKIE").and_then(|v| SessionCookie::parse(&v)),
            client_id: non_empty("LINKEDIN_CLIENT_ID"),
            client_secret: non_empty("LINKEDIN_CLIENT_SECRET").map(Secret::from),
            access_token: non_empty("LINKEDIN_ACCESS_TOKEN").map(Secret::from),
            api_version: non_empty("LINKEDIN_API_VERSION"),
        }
    }
}

/// One of the two access modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
pub enum Capability {
    /// Browser session backed by the session cookie
    #[strum(serialize = "scraping")]
    Scraping,
    /// REST API backed by the access token
    #[strum(serialize = "api")]
    Api,
}

/// Modes the current credentials make available.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CapabilitySet {
    scraping: bool,
    api: bool,
}

impl CapabilitySet {
    /// Whether a mode is available.
    pub fn has(&self, capability: Capability) -> bool {
        match capability {
            Capability::Scraping => self.scraping,
            Capability::Api => self.api,
        }
    }

    /// Fails with a configuration error when the mode is unavailable.
    #[track_caller]
    pub fn require(&self, capability: Capability) -> LinkedInResult<()> {
        if self.has(capability) {
            return Ok(());
        }
        let var = match capability {
            Capability::Scraping => "LINKEDIN_COOKIE",
            Capability::Api => "LINKEDIN_ACCESS_TOKEN",
        };
        Err(LinkedInError::configuration(format!(
            "{capability} mode is not configured; set {var}"
        )))
    }
}

/// Process-wide credential holder.
///
/// Readers take a short shared lock and clone out what they need. A refresh
/// replaces one credential and bumps that credential's generation
/// ([`cookie_generation`](Self::cookie_generation) or
/// [`token_generation`](Self::token_generation)) so state derived from the
/// old value can tell it is stale.
#[derive(Debug)]
pub struct CredentialStore {
    bundle: RwLock<CredentialBundle>,
    cookie_generation: AtomicU64,
    token_generation: AtomicU64,
}

impl CredentialStore {
    /// Wraps a loaded bundle.
    pub fn new(bundle: CredentialBundle) -> Self {
        debug!(
            scraping = bundle.session_cookie.is_some(),
            api = bundle.access_token.is_some(),
            "Credential store loaded"
        );
        Self {
            bundle: RwLock::new(bundle),
            cookie_generation: AtomicU64::new(0),
            token_generation: AtomicU64::new(0),
        }
    }

    fn read<T>(&self, f: impl FnOnce(&CredentialBundle) -> T) -> T {
        let guard = self.bundle.read().unwrap_or_else(PoisonError::into_inner);
        f(&guard)
    }

    /// True when a session cookie is configured.
    pub fn has_scraping_credential(&self) -> bool {
        self.read(|b| b.session_cookie.is_some())
    }

    /// True when an access token is configured.
    pub fn has_api_credential(&self) -> bool {
        self.read(|b| b.access_token.is_some())
    }

    /// Modes currently available.
    pub fn capabilities(&self) -> CapabilitySet {
        self.read(|b| CapabilitySet {
            scraping: b.session_cookie.is_some(),
            api: b.access_token.is_some(),
        })
    }

    /// The session cookie, or a configuration error.
    #[track_caller]
    pub fn session_cookie(&self) -> LinkedInResult<SessionCookie> {
        match self.read(|b| b.session_cookie.clone()) {
            Some(cookie) => Ok(cookie),
            None => Err(LinkedInError::configuration(
                "scraping mode is not configured; set LINKEDIN_COOKIE",
            )),
        }
    }

    /// The access token, or a configuration error.
    #[track_caller]
    pub fn access_token(&self) -> LinkedInResult<Secret> {
        match self.read(|b| b.access_token.clone()) {
            Some(token) => Ok(token),
            None => Err(LinkedInError::configuration(
                "api mode is not configured; set LINKEDIN_ACCESS_TOKEN",
            )),
        }
    }

    /// OAuth client id, if configured.
    pub fn client_id(&self) -> Option<String> {
        self.read(|b| b.client_id.clone())
    }

    /// OAuth client secret, if configured.
    pub fn client_secret(&self) -> Option<Secret> {
        self.read(|b| b.client_secret.clone())
    }

    /// Configured API version or [`DEFAULT_API_VERSION`].
    pub fn api_version(&self) -> String {
        self.read(|b| {
            b.api_version
                .clone()
                .unwrap_or_else(|| DEFAULT_API_VERSION.to_string())
        })
    }

    /// Every secret value currently held, for scrubbing error text.
    pub fn secrets(&self) -> Vec<Secret> {
        self.read(|b| {
            [
                b.access_token.clone(),
                b.client_secret.clone(),
                b.session_cookie.as_ref().map(|c| c.value().clone()),
            ]
            .into_iter()
            .flatten()
            .collect()
        })
    }

    /// Bumped on every session cookie refresh.
    pub fn cookie_generation(&self) -> u64 {
        self.cookie_generation.load(Ordering::Acquire)
    }

    /// Bumped on every access token refresh.
    pub fn token_generation(&self) -> u64 {
        self.token_generation.load(Ordering::Acquire)
    }

    /// Replaces the access token.
    pub fn refresh_access_token(&self, token: impl Into<Secret>) {
        {
            let mut guard = self.bundle.write().unwrap_or_else(PoisonError::into_inner);
            guard.access_token = Some(token.into());
        }
        let generation = self.token_generation.fetch_add(1, Ordering::AcqRel) + 1;
        info!(generation, "Access token refreshed");
    }

    /// Replaces the session cookie.
    #[track_caller]
    pub fn refresh_session_cookie(&self, raw: &str) -> LinkedInResult<()> {
        let cookie = SessionCookie::parse(raw)
            .ok_or_else(|| LinkedInError::validation("session_cookie", "cookie value is empty"))?;
        {
            let mut guard = self.bundle.write().unwrap_or_else(PoisonError::into_inner);
            guard.session_cookie = Some(cookie);
        }
        let generation = self.cookie_generation.fetch_add(1, Ordering::AcqRel) + 1;
        info!(generation, "Session cookie refreshed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api_only() -> CredentialStore {
        CredentialStore::new(
            CredentialBundle::builder()
                .access_token(Secret::from("tok"))
                .build()
                .unwrap(),
        )
    }

    #[test]
    fn missing_cookie_is_configuration_error() {
        let store = api_only();
        assert!(store.has_api_credential());
        assert!(!store.has_scraping_credential());
        let err = store.session_cookie().unwrap_err();
        assert_eq!(err.kind().name(), "ConfigurationError");
    }

    #[test]
    fn capability_set_reports_modes() {
        let caps = api_only().capabilities();
        assert!(caps.has(Capability::Api));
        assert!(caps.require(Capability::Scraping).is_err());
        assert!(caps.require(Capability::Api).is_ok());
    }

    #[test]
    fn default_api_version() {
        assert_eq!(api_only().api_version(), DEFAULT_API_VERSION);
    }

    #[test]
    fn refresh_bumps_only_its_own_generation() {
        let store = api_only();
        assert_eq!(store.token_generation(), 0);
        assert_eq!(store.cookie_generation(), 0);

        store.refresh_access_token("new");
        assert_eq!(store.token_generation(), 1);
        assert_eq!(store.cookie_generation(), 0);
        assert_eq!(store.access_token().unwrap().expose(), "new");

        store.refresh_session_cookie("li_at=abc").unwrap();
        assert_eq!(store.cookie_generation(), 1);
        assert_eq!(store.token_generation(), 1);
        assert!(store.has_scraping_credential());

        assert!(store.refresh_session_cookie("li_at=").is_err());
        assert_eq!(store.cookie_generation(), 1);
    }

    #[test]
    fn debug_output_hides_secrets() {
        let store = CredentialStore::new(
            CredentialBundle::builder()
                .access_token(Secret::from("super-secret-token"))
                .session_cookie(SessionCookie::parse("cookie-value").unwrap())
                .build()
                .unwrap(),
        );
        let debug = format!("{store:?}");
        assert!(!debug.contains("super-secret-token"));
        assert!(!debug.contains("cookie-value"));
        assert_eq!(store.secrets().len(), 2);
    }
}
