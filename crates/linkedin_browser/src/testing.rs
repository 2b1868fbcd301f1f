//! In-memory browser driver for tests.
//!
//! Pages are registered by URL. A [`FakePage`] answers a selector query when
//! one of the comma-separated alternatives in the query equals a selector it
//! was given, so tests can describe pages with short selectors like `h1`.

use crate::{BrowserDriver, BrowserProcess, ItemField, ItemFields, PageHandle};
use async_trait::async_trait;
use linkedin_core::{BrowserSettings, SessionCookie};
use linkedin_error::{ExtractionFailure, LinkedInError, LinkedInResult};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// A scripted page.
#[derive(Debug, Clone, Default)]
pub struct FakePage {
    texts: HashMap<String, Vec<String>>,
    attributes: HashMap<(String, String), Vec<String>>,
    items: HashMap<String, Vec<ItemFields>>,
    redirect_to: Option<String>,
}

impl FakePage {
    /// An empty page.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an element with inner text.
    pub fn text(mut self, selector: &str, value: &str) -> Self {
        self.texts
            .entry(selector.to_string())
            .or_default()
            .push(value.to_string());
        self
    }

    /// Adds an element carrying `attribute = value`.
    pub fn attr(mut self, selector: &str, attribute: &str, value: &str) -> Self {
        self.attributes
            .entry((selector.to_string(), attribute.to_string()))
            .or_default()
            .push(value.to_string());
        self
    }

    /// Adds a repeated element with the given field values.
    pub fn item(mut self, selector: &str, fields: &[(&str, &str)]) -> Self {
        let item: ItemFields = fields
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        self.items.entry(selector.to_string()).or_default().push(item);
        self
    }

    /// Navigating here lands on `url` instead.
    pub fn redirect(mut self, url: &str) -> Self {
        self.redirect_to = Some(url.to_string());
        self
    }

    fn lookup<'a, T>(map: &'a HashMap<String, T>, query: &str) -> Option<&'a T> {
        query
            .split(',')
            .map(str::trim)
            .find_map(|alternative| map.get(alternative))
    }

    fn has(&self, query: &str) -> bool {
        Self::lookup(&self.texts, query).is_some()
            || Self::lookup(&self.items, query).is_some()
            || self
                .attributes
                .keys()
                .any(|(selector, _)| query.split(',').any(|q| q.trim() == selector))
    }
}

#[derive(Default)]
struct FakeState {
    pages: Mutex<HashMap<String, FakePage>>,
    rejected_cookies: Mutex<HashSet<String>>,
    fail_launch: AtomicBool,
    fail_navigation: AtomicBool,
    navigation_delay: Mutex<Option<Duration>>,
    launches: AtomicUsize,
    closes: AtomicUsize,
    navigations: Mutex<Vec<String>>,
}

/// A [`BrowserDriver`] serving [`FakePage`]s.
#[derive(Clone, Default)]
pub struct FakeDriver {
    state: Arc<FakeState>,
}

impl std::fmt::Debug for FakeDriver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FakeDriver")
            .field("launches", &self.launches())
            .finish()
    }
}

impl FakeDriver {
    /// A driver with no pages. The feed page always renders.
    pub fn new() -> Self {
        Self::default()
    }

    /// Serves `page` at `url`.
    pub fn page(&self, url: &str, page: FakePage) -> &Self {
        self.state
            .pages
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(url.to_string(), page);
        self
    }

    /// Cookie values that get redirected to the login wall.
    pub fn reject_cookie(&self, value: &str) -> &Self {
        self.state
            .rejected_cookies
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(value.to_string());
        self
    }

    /// Makes every launch fail.
    pub fn fail_launches(&self, fail: bool) -> &Self {
        self.state.fail_launch.store(fail, Ordering::SeqCst);
        self
    }

    /// Makes navigation fail for every page except the feed, as a browser
    /// whose DevTools connection dropped after login would.
    pub fn fail_navigations(&self, fail: bool) -> &Self {
        self.state.fail_navigation.store(fail, Ordering::SeqCst);
        self
    }

    /// Delays every navigation.
    pub fn navigation_delay(&self, delay: Duration) -> &Self {
        *self
            .state
            .navigation_delay
            .lock()
            .unwrap_or_else(|e| e.into_inner()) = Some(delay);
        self
    }

    /// Browsers started.
    pub fn launches(&self) -> usize {
        self.state.launches.load(Ordering::SeqCst)
    }

    /// Browsers closed.
    pub fn closes(&self) -> usize {
        self.state.closes.load(Ordering::SeqCst)
    }

    /// Every URL navigated to, in order.
    pub fn navigations(&self) -> Vec<String> {
        self.state
            .navigations
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

#[async_trait]
impl BrowserDriver for FakeDriver {
    async fn launch(&self, _settings: &BrowserSettings) -> LinkedInResult<Box<dyn BrowserProcess>> {
        if self.state.fail_launch.load(Ordering::SeqCst) {
            return Err(LinkedInError::session_init("browser binary not found"));
        }
        self.state.launches.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(FakeProcess {
            state: Arc::clone(&self.state),
            page: FakeTab::default(),
        }))
    }
}

struct FakeProcess {
    state: Arc<FakeState>,
    page: FakeTab,
}

#[derive(Default)]
struct FakeTab {
    cookie: Mutex<Option<String>>,
    url: Mutex<String>,
    page: Mutex<FakePage>,
}

#[async_trait]
impl BrowserProcess for FakeProcess {
    async fn set_session_cookie(
        &self,
        cookie: &SessionCookie,
        _platform_url: &str,
    ) -> LinkedInResult<()> {
        *self.page.cookie.lock().unwrap_or_else(|e| e.into_inner()) =
            Some(cookie.value().expose().to_string());
        Ok(())
    }

    async fn navigate(&self, url: &str) -> LinkedInResult<()> {
        let delay = *self
            .state
            .navigation_delay
            .lock()
            .unwrap_or_else(|e| e.into_inner());
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if self.state.fail_navigation.load(Ordering::SeqCst) && !url.ends_with("/feed/") {
            return Err(LinkedInError::extraction(ExtractionFailure::navigation(
                url,
                "connection closed",
            )));
        }
        self.state
            .navigations
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(url.to_string());

        let cookie = self
            .page
            .cookie
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone();
        let rejected = match &cookie {
            Some(value) => self
                .state
                .rejected_cookies
                .lock()
                .unwrap_or_else(|e| e.into_inner())
                .contains(value),
            None => true,
        };

        let (landed, page) = if rejected {
            let origin = url::Url::parse(url)
                .map(|u| u.origin().ascii_serialization())
                .unwrap_or_default();
            (format!("{origin}/login?session_redirect=x"), FakePage::new())
        } else {
            let page = self
                .state
                .pages
                .lock()
                .unwrap_or_else(|e| e.into_inner())
                .get(url)
                .cloned()
                .unwrap_or_else(|| {
                    if url.ends_with("/feed/") {
                        FakePage::new().text("main", "feed")
                    } else {
                        FakePage::new()
                    }
                });
            let landed = page.redirect_to.clone().unwrap_or_else(|| url.to_string());
            (landed, page)
        };
        *self.page.url.lock().unwrap_or_else(|e| e.into_inner()) = landed;
        *self.page.page.lock().unwrap_or_else(|e| e.into_inner()) = page;
        Ok(())
    }

    fn page(&self) -> &dyn PageHandle {
        &self.page
    }

    async fn close(&self) -> LinkedInResult<()> {
        self.state.closes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

impl FakeTab {
    fn with_page<T>(&self, f: impl FnOnce(&FakePage) -> T) -> T {
        f(&self.page.lock().unwrap_or_else(|e| e.into_inner()))
    }
}

#[async_trait]
impl PageHandle for FakeTab {
    async fn current_url(&self) -> LinkedInResult<String> {
        Ok(self.url.lock().unwrap_or_else(|e| e.into_inner()).clone())
    }

    async fn exists(&self, selector: &str) -> LinkedInResult<bool> {
        Ok(self.with_page(|p| p.has(selector)))
    }

    async fn text(&self, selector: &str) -> LinkedInResult<Option<String>> {
        Ok(self.with_page(|p| {
            FakePage::lookup(&p.texts, selector).and_then(|v| v.first().cloned())
        }))
    }

    async fn texts(&self, selector: &str) -> LinkedInResult<Vec<String>> {
        Ok(self.with_page(|p| FakePage::lookup(&p.texts, selector).cloned().unwrap_or_default()))
    }

    async fn attributes(&self, selector: &str, attribute: &str) -> LinkedInResult<Vec<String>> {
        Ok(self.with_page(|p| {
            selector
                .split(',')
                .map(str::trim)
                .find_map(|alt| p.attributes.get(&(alt.to_string(), attribute.to_string())))
                .cloned()
                .unwrap_or_default()
        }))
    }

    async fn items(
        &self,
        item_selector: &str,
        fields: &[ItemField],
    ) -> LinkedInResult<Vec<ItemFields>> {
        let wanted: Vec<&str> = fields.iter().map(|f| f.name).collect();
        Ok(self.with_page(|p| {
            FakePage::lookup(&p.items, item_selector)
                .map(|items| {
                    items
                        .iter()
                        .map(|item| {
                            item.iter()
                                .filter(|(k, _)| wanted.contains(&k.as_str()))
                                .map(|(k, v)| (k.clone(), v.clone()))
                                .collect::<BTreeMap<_, _>>()
                        })
                        .collect()
                })
                .unwrap_or_default()
        }))
    }
}
