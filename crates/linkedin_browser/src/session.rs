//! The process-wide browser session.

use crate::{BrowserDriver, BrowserProcess, Extractor, PageHandle};
use chrono::{DateTime, Utc};
use linkedin_core::{BrowserSettings, CredentialStore, is_login_url};
use linkedin_error::{
    ExtractionFailure, ExtractionReason, LinkedInError, LinkedInErrorKind, LinkedInResult,
};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::{debug, info, instrument, warn};

/// How often the content region is polled while a page renders.
const CONTENT_POLL: Duration = Duration::from_millis(250);

/// Navigation and page-read errors from the driver leave the browser unusable.
fn is_driver_failure(e: &LinkedInError) -> bool {
    matches!(
        e.kind(),
        LinkedInErrorKind::Extraction(failure) if failure.reason == ExtractionReason::NavigationFailed
    )
}

/// Lifecycle of the shared browser session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, strum::Display)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum SessionState {
    /// No browser has been started yet
    Uninitialized,
    /// A browser is running with the cookie installed
    Active,
    /// The cookie was rejected mid-session; the next call re-authenticates
    NeedsRefresh,
    /// The browser was closed (idle or explicit); the next call starts a
    /// fresh one
    Closed,
}

/// Snapshot of the session for introspection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, derive_getters::Getters)]
pub struct SessionInfo {
    state: SessionState,
    created_at: Option<DateTime<Utc>>,
    last_used_at: Option<DateTime<Utc>>,
    headless: bool,
    launches: u64,
}

struct LiveSession {
    process: Box<dyn BrowserProcess>,
    created_at: DateTime<Utc>,
    last_used: Instant,
    last_used_at: DateTime<Utc>,
    cookie_generation: u64,
}

struct Inner {
    state: SessionState,
    live: Option<LiveSession>,
    launches: u64,
}

/// Owns the single browser session and serializes access to it.
///
/// The session is started lazily, on first use or by
/// [`ensure_active`](Self::ensure_active) at startup when eager init is
/// configured. Idle time is checked at the top of every call; a session idle
/// past the threshold is closed before the call proceeds, so the call runs
/// on a fresh browser. There is no background timer.
pub struct BrowserSessionManager {
    driver: Arc<dyn BrowserDriver>,
    credentials: Arc<CredentialStore>,
    settings: BrowserSettings,
    inner: Mutex<Inner>,
}

impl std::fmt::Debug for BrowserSessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BrowserSessionManager")
            .field("settings", &self.settings)
            .finish()
    }
}

impl BrowserSessionManager {
    /// Creates a manager. No browser is started.
    pub fn new(
        driver: Arc<dyn BrowserDriver>,
        credentials: Arc<CredentialStore>,
        settings: BrowserSettings,
    ) -> Self {
        Self {
            driver,
            credentials,
            settings,
            inner: Mutex::new(Inner {
                state: SessionState::Uninitialized,
                live: None,
                launches: 0,
            }),
        }
    }

    /// Session settings.
    pub fn settings(&self) -> &BrowserSettings {
        &self.settings
    }

    /// Current lifecycle state.
    pub async fn state(&self) -> SessionState {
        self.inner.lock().await.state
    }

    /// Browsers started so far.
    pub async fn launch_count(&self) -> u64 {
        self.inner.lock().await.launches
    }

    /// Snapshot of the session.
    pub async fn info(&self) -> SessionInfo {
        let inner = self.inner.lock().await;
        SessionInfo {
            state: inner.state,
            created_at: inner.live.as_ref().map(|l| l.created_at),
            last_used_at: inner.live.as_ref().map(|l| l.last_used_at),
            headless: *self.settings.headless(),
            launches: inner.launches,
        }
    }

    /// Starts the session if none is usable.
    #[instrument(skip(self))]
    pub async fn ensure_active(&self) -> LinkedInResult<()> {
        let mut inner = self.inner.lock().await;
        self.prepare(&mut inner).await
    }

    /// Loads `target_url` and runs `extractor` against it.
    ///
    /// Extractions are serialized: one navigation is in flight at a time.
    #[instrument(skip(self, extractor), fields(extractor = extractor.name()))]
    pub async fn extract<E: Extractor>(
        &self,
        target_url: &str,
        extractor: &E,
    ) -> LinkedInResult<E::Output> {
        let mut guard = self.inner.lock().await;
        let inner = &mut *guard;
        self.prepare(inner).await?;
        let Some(live) = inner.live.as_mut() else {
            return Err(LinkedInError::session_init("session vanished after start"));
        };

        match self.visit(live.process.as_ref(), target_url, extractor).await {
            Ok(Some(output)) => {
                live.last_used = Instant::now();
                live.last_used_at = Utc::now();
                debug!("Extraction complete");
                Ok(output)
            }
            Ok(None) => {
                inner.state = SessionState::NeedsRefresh;
                Err(LinkedInError::session_init(
                    "session cookie was rejected; redirected to login",
                ))
            }
            Err(e) if is_driver_failure(&e) => {
                warn!(error = %e.kind(), "Browser stopped responding; discarding session");
                Self::shut_down(inner, "driver failure").await;
                Err(e)
            }
            Err(e) => Err(e),
        }
    }

    /// Navigates and extracts. `Ok(None)` means the page bounced to login.
    async fn visit<E: Extractor>(
        &self,
        process: &dyn BrowserProcess,
        target_url: &str,
        extractor: &E,
    ) -> LinkedInResult<Option<E::Output>> {
        match tokio::time::timeout(
            self.settings.navigation_timeout(),
            process.navigate(target_url),
        )
        .await
        {
            Ok(result) => result?,
            Err(_) => {
                return Err(LinkedInError::extraction(ExtractionFailure::timeout(
                    target_url,
                    format!(
                        "navigation exceeded {}s",
                        self.settings.navigation_timeout().as_secs()
                    ),
                )));
            }
        }

        let page = process.page();
        let landed = page.current_url().await?;
        if is_login_url(&landed) {
            warn!(%landed, "Session cookie rejected during navigation");
            return Ok(None);
        }

        self.wait_for_content(page, extractor.content_selector(), target_url)
            .await?;
        extractor.extract(page, target_url).await.map(Some)
    }

    /// Closes the browser. Returns whether a live browser was closed.
    ///
    /// Safe to call on a closed or never-started session.
    #[instrument(skip(self))]
    pub async fn close(&self) -> LinkedInResult<bool> {
        let mut inner = self.inner.lock().await;
        Ok(Self::shut_down(&mut inner, "explicit close").await)
    }

    async fn shut_down(inner: &mut Inner, reason: &str) -> bool {
        let Some(live) = inner.live.take() else {
            if inner.state == SessionState::Active || inner.state == SessionState::NeedsRefresh {
                inner.state = SessionState::Closed;
            }
            return false;
        };
        if let Err(e) = live.process.close().await {
            warn!(error = %e.kind(), "Browser close reported an error");
        }
        inner.state = SessionState::Closed;
        info!(reason, "Browser session closed");
        true
    }

    /// Brings the session to ACTIVE, closing a stale one first.
    async fn prepare(&self, inner: &mut Inner) -> LinkedInResult<()> {
        let generation = self.credentials.cookie_generation();
        let stale = match (&inner.live, inner.state) {
            (Some(_), SessionState::NeedsRefresh) => Some("cookie rejected"),
            (Some(live), _) if live.last_used.elapsed() >= self.settings.idle_timeout() => {
                Some("idle timeout")
            }
            (Some(live), _) if live.cookie_generation != generation => {
                Some("session cookie refreshed")
            }
            _ => None,
        };
        if let Some(reason) = stale {
            Self::shut_down(inner, reason).await;
        }
        if inner.live.is_some() {
            return Ok(());
        }

        let cookie = self.credentials.session_cookie()?;
        let platform_url = self.settings.platform_url().trim_end_matches('/').to_string();
        let process = self.driver.launch(&self.settings).await?;
        inner.launches += 1;

        if let Err(e) = self.authenticate(process.as_ref(), &cookie, &platform_url).await {
            if let Err(close_err) = process.close().await {
                warn!(error = %close_err.kind(), "Failed to close rejected browser");
            }
            inner.state = SessionState::Closed;
            return Err(e);
        }

        let now = Instant::now();
        inner.live = Some(LiveSession {
            process,
            created_at: Utc::now(),
            last_used: now,
            last_used_at: Utc::now(),
            cookie_generation: generation,
        });
        inner.state = SessionState::Active;
        info!(launches = inner.launches, "Browser session active");
        Ok(())
    }

    async fn authenticate(
        &self,
        process: &dyn BrowserProcess,
        cookie: &linkedin_core::SessionCookie,
        platform_url: &str,
    ) -> LinkedInResult<()> {
        process.set_session_cookie(cookie, platform_url).await?;
        let feed = format!("{platform_url}/feed/");
        match tokio::time::timeout(self.settings.navigation_timeout(), process.navigate(&feed)).await
        {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                return Err(LinkedInError::session_init(format!(
                    "could not load the feed: {}",
                    e.kind()
                )));
            }
            Err(_) => return Err(LinkedInError::session_init("timed out loading the feed")),
        }
        let landed = process.page().current_url().await?;
        if is_login_url(&landed) {
            return Err(LinkedInError::session_init(
                "session cookie was rejected; redirected to login",
            ));
        }
        debug!(%landed, "Cookie accepted");
        Ok(())
    }

    async fn wait_for_content(
        &self,
        page: &dyn PageHandle,
        selector: &str,
        url: &str,
    ) -> LinkedInResult<()> {
        let deadline = Instant::now() + self.settings.content_timeout();
        loop {
            if page.exists(selector).await? {
                return Ok(());
            }
            if Instant::now() >= deadline {
                return Err(LinkedInError::extraction(ExtractionFailure::timeout(
                    url,
                    format!(
                        "content did not render within {}s",
                        self.settings.content_timeout().as_secs()
                    ),
                )));
            }
            tokio::time::sleep(CONTENT_POLL).await;
        }
    }
}
