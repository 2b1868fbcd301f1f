//! Browser driver seam.
//!
//! The session manager only ever talks to a browser through these traits.
//! [`ChromiumDriver`](crate::ChromiumDriver) drives a real Chrome over CDP;
//! tests use an in-memory driver.

use async_trait::async_trait;
use linkedin_core::{BrowserSettings, SessionCookie};
use linkedin_error::LinkedInResult;
use std::collections::BTreeMap;

/// Values read from one repeated element, keyed by field name. Fields that
/// were absent or blank are left out.
pub type ItemFields = BTreeMap<String, String>;

/// How to read one field inside a repeated element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemField {
    /// Field name in the resulting [`ItemFields`]
    pub name: &'static str,
    /// CSS selector relative to the item
    pub selector: &'static str,
    /// Attribute to read; inner text when `None`
    pub attribute: Option<&'static str>,
}

impl ItemField {
    /// Reads the inner text of `selector`.
    pub const fn text(name: &'static str, selector: &'static str) -> Self {
        Self {
            name,
            selector,
            attribute: None,
        }
    }

    /// Reads `attribute` of `selector`.
    pub const fn attr(name: &'static str, selector: &'static str, attribute: &'static str) -> Self {
        Self {
            name,
            selector,
            attribute: Some(attribute),
        }
    }
}

/// Read access to the page currently loaded in the session.
///
/// Selectors are CSS selector groups; the first matching element wins.
#[async_trait]
pub trait PageHandle: Send + Sync {
    /// URL after redirects.
    async fn current_url(&self) -> LinkedInResult<String>;

    /// Whether any element matches.
    async fn exists(&self, selector: &str) -> LinkedInResult<bool>;

    /// Trimmed inner text of the first match, `None` when absent or blank.
    async fn text(&self, selector: &str) -> LinkedInResult<Option<String>>;

    /// Trimmed, non-blank inner texts of every match.
    async fn texts(&self, selector: &str) -> LinkedInResult<Vec<String>>;

    /// Non-blank `attribute` values of every match.
    async fn attributes(&self, selector: &str, attribute: &str) -> LinkedInResult<Vec<String>>;

    /// Reads `fields` inside each element matching `item_selector`.
    async fn items(
        &self,
        item_selector: &str,
        fields: &[ItemField],
    ) -> LinkedInResult<Vec<ItemFields>>;
}

/// A running browser with one page.
#[async_trait]
pub trait BrowserProcess: Send + Sync {
    /// Installs the session cookie for the platform origin.
    async fn set_session_cookie(
        &self,
        cookie: &SessionCookie,
        platform_url: &str,
    ) -> LinkedInResult<()>;

    /// Loads `url` and waits for the load event.
    async fn navigate(&self, url: &str) -> LinkedInResult<()>;

    /// The loaded page.
    fn page(&self) -> &dyn PageHandle;

    /// Shuts the browser down.
    async fn close(&self) -> LinkedInResult<()>;
}

/// Starts browser processes.
#[async_trait]
pub trait BrowserDriver: Send + Sync {
    /// Launches a fresh browser. Failures are `SessionInitError`s.
    async fn launch(&self, settings: &BrowserSettings) -> LinkedInResult<Box<dyn BrowserProcess>>;
}
