//! Chrome over the DevTools protocol.

use crate::{BrowserDriver, BrowserProcess, ItemField, ItemFields, PageHandle};
use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::cdp::browser_protocol::network::CookieParam;
use chromiumoxide::element::Element;
use chromiumoxide::error::CdpError;
use chromiumoxide::page::Page;
use futures::StreamExt;
use linkedin_core::{BrowserSettings, SESSION_COOKIE_NAME, SessionCookie};
use linkedin_error::{ExtractionFailure, LinkedInError, LinkedInResult};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, warn};

/// Launches Chrome through chromiumoxide.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChromiumDriver;

#[async_trait]
impl BrowserDriver for ChromiumDriver {
    #[instrument(skip_all, fields(headless = *settings.headless()))]
    async fn launch(&self, settings: &BrowserSettings) -> LinkedInResult<Box<dyn BrowserProcess>> {
        let mut builder = BrowserConfig::builder()
            .no_sandbox()
            .arg("--disable-dev-shm-usage")
            .arg("--disable-blink-features=AutomationControlled")
            .request_timeout(settings.navigation_timeout() * 2);
        if !*settings.headless() {
            builder = builder.with_head();
        }
        if let Some(path) = settings.executable_path() {
            builder = builder.chrome_executable(path);
        }
        let config = builder
            .build()
            .map_err(|e| LinkedInError::session_init(format!("invalid browser config: {e}")))?;

        let (browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|e| LinkedInError::session_init(format!("failed to start browser: {e}")))?;
        let events = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    debug!(error = %e, "Browser event loop stopped");
                    break;
                }
            }
        });

        let page = browser
            .new_page("about:blank")
            .await
            .map_err(|e| LinkedInError::session_init(format!("failed to open page: {e}")))?;
        info!("Browser launched");

        Ok(Box::new(ChromiumProcess {
            browser: Mutex::new(browser),
            page: ChromiumPage { page },
            events,
        }))
    }
}

struct ChromiumProcess {
    browser: Mutex<Browser>,
    page: ChromiumPage,
    events: JoinHandle<()>,
}

#[async_trait]
impl BrowserProcess for ChromiumProcess {
    async fn set_session_cookie(
        &self,
        cookie: &SessionCookie,
        platform_url: &str,
    ) -> LinkedInResult<()> {
        let secure = platform_url.starts_with("https://");
        let param = CookieParam::builder()
            .name(SESSION_COOKIE_NAME)
            .value(cookie.value().expose())
            .url(platform_url)
            .path("/")
            .secure(secure)
            .http_only(true)
            .build()
            .map_err(LinkedInError::session_init)?;
        self.page
            .page
            .set_cookie(param)
            .await
            .map_err(|e| LinkedInError::session_init(format!("cookie injection failed: {e}")))?;
        Ok(())
    }

    async fn navigate(&self, url: &str) -> LinkedInResult<()> {
        self.page
            .page
            .goto(url)
            .await
            .map(|_| ())
            .map_err(|e| match e {
                CdpError::Timeout => LinkedInError::extraction(ExtractionFailure::timeout(
                    url,
                    "browser did not answer the navigation request",
                )),
                other => LinkedInError::extraction(ExtractionFailure::navigation(
                    url,
                    other.to_string(),
                )),
            })
    }

    fn page(&self) -> &dyn PageHandle {
        &self.page
    }

    async fn close(&self) -> LinkedInResult<()> {
        let mut browser = self.browser.lock().await;
        if let Err(e) = browser.close().await {
            warn!(error = %e, "Browser did not close cleanly");
        }
        if let Err(e) = browser.wait().await {
            warn!(error = %e, "Browser process wait failed");
        }
        self.events.abort();
        info!("Browser closed");
        Ok(())
    }
}

struct ChromiumPage {
    page: Page,
}

fn page_error(what: &str, e: impl std::fmt::Display) -> LinkedInError {
    LinkedInError::extraction(ExtractionFailure::navigation("", format!("{what}: {e}")))
}

/// Protocol-level answers (no such node, nothing matched) mean the element
/// is absent. Anything else means the connection to the browser is gone.
fn absent_or_error(e: CdpError, what: &str) -> LinkedInResult<()> {
    match e {
        CdpError::NotFound | CdpError::Chrome(_) | CdpError::ChromeMessage(_) => Ok(()),
        other => Err(page_error(what, other)),
    }
}

fn clean(text: Option<String>) -> Option<String> {
    text.map(|t| t.trim().to_string()).filter(|t| !t.is_empty())
}

async fn read_field(element: &Element, field: &ItemField) -> Option<String> {
    let child = element.find_element(field.selector).await.ok()?;
    let value = match field.attribute {
        Some(attribute) => child.attribute(attribute).await.ok().flatten(),
        None => child.inner_text().await.ok().flatten(),
    };
    clean(value)
}

#[async_trait]
impl PageHandle for ChromiumPage {
    async fn current_url(&self) -> LinkedInResult<String> {
        self.page
            .url()
            .await
            .map(Option::unwrap_or_default)
            .map_err(|e| page_error("reading page URL", e))
    }

    async fn exists(&self, selector: &str) -> LinkedInResult<bool> {
        match self.page.find_element(selector).await {
            Ok(_) => Ok(true),
            Err(e) => absent_or_error(e, "querying selector").map(|()| false),
        }
    }

    async fn text(&self, selector: &str) -> LinkedInResult<Option<String>> {
        let element = match self.page.find_element(selector).await {
            Ok(element) => element,
            Err(e) => return absent_or_error(e, "querying selector").map(|()| None),
        };
        let text = element
            .inner_text()
            .await
            .map_err(|e| page_error("reading text", e))?;
        Ok(clean(text))
    }

    async fn texts(&self, selector: &str) -> LinkedInResult<Vec<String>> {
        let elements = self.page.find_elements(selector).await.unwrap_or_default();
        let mut texts = Vec::with_capacity(elements.len());
        for element in elements {
            if let Some(text) = clean(element.inner_text().await.ok().flatten()) {
                texts.push(text);
            }
        }
        Ok(texts)
    }

    async fn attributes(&self, selector: &str, attribute: &str) -> LinkedInResult<Vec<String>> {
        let elements = self.page.find_elements(selector).await.unwrap_or_default();
        let mut values = Vec::with_capacity(elements.len());
        for element in elements {
            if let Some(value) = clean(element.attribute(attribute).await.ok().flatten()) {
                values.push(value);
            }
        }
        Ok(values)
    }

    async fn items(
        &self,
        item_selector: &str,
        fields: &[ItemField],
    ) -> LinkedInResult<Vec<ItemFields>> {
        let elements = self
            .page
            .find_elements(item_selector)
            .await
            .unwrap_or_default();
        let mut items = Vec::with_capacity(elements.len());
        for element in &elements {
            let mut item = ItemFields::new();
            for field in fields {
                if let Some(value) = read_field(element, field).await {
                    item.insert(field.name.to_string(), value);
                }
            }
            if !item.is_empty() {
                items.push(item);
            }
        }
        Ok(items)
    }
}
