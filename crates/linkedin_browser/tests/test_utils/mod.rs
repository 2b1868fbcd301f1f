//! Shared setup for the browser session tests.

#![allow(dead_code)]

use linkedin_browser::BrowserSessionManager;
use linkedin_browser::testing::{FakeDriver, FakePage};
use linkedin_core::{BrowserSettings, CredentialBundle, CredentialStore, SessionCookie};
use std::sync::Arc;

pub const ORIGIN: &str = "https://www.linkedin.com";
pub const COOKIE: &str = "AQEDAR-good-cookie";
pub const PROFILE: &str = "https://www.linkedin.com/in/ada-lovelace/";

/// A store holding only a session cookie.
pub fn cookie_credentials(value: &str) -> Arc<CredentialStore> {
    let cookie = SessionCookie::parse(value).expect("cookie");
    let bundle = CredentialBundle::builder()
        .session_cookie(cookie)
        .build()
        .expect("bundle");
    Arc::new(CredentialStore::new(bundle))
}

/// A store with no credentials at all.
pub fn no_credentials() -> Arc<CredentialStore> {
    Arc::new(CredentialStore::new(CredentialBundle::default()))
}

/// A rendered profile page.
pub fn profile_page() -> FakePage {
    FakePage::new()
        .text("main", "profile")
        .text("h1", "Ada Lovelace")
        .text(".pv-text-details__left-panel .text-body-medium", "Analyst")
}

/// Driver, store and manager wired together.
pub fn session_with(
    driver: &FakeDriver,
    credentials: Arc<CredentialStore>,
) -> BrowserSessionManager {
    BrowserSessionManager::new(
        Arc::new(driver.clone()),
        credentials,
        BrowserSettings::default(),
    )
}
