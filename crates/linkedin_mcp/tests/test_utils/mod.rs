//! Shared setup for the facade tests.

#![allow(dead_code)]

use linkedin_api::LinkedInApi;
use linkedin_api::testing::ScriptedTransport;
use linkedin_browser::testing::FakeDriver;
use linkedin_core::{
    CredentialBundle, CredentialStore, LinkedInConfig, MediaSettings, RetrySettings,
    SessionCookie,
};
use linkedin_mcp::{LinkedInService, ToolRegistry};
use std::sync::Arc;

pub const TOKEN: &str = "AQX-test-token-0042";
pub const COOKIE: &str = "AQEDAR-good-cookie";

/// Which credentials a test starts with.
#[derive(Debug, Clone, Copy)]
pub enum Modes {
    Both,
    ScrapingOnly,
    ApiOnly,
}

pub fn credentials(modes: Modes) -> Arc<CredentialStore> {
    let mut builder = CredentialBundle::builder();
    if matches!(modes, Modes::Both | Modes::ScrapingOnly) {
        builder.session_cookie(SessionCookie::parse(COOKIE).expect("cookie"));
    }
    if matches!(modes, Modes::Both | Modes::ApiOnly) {
        builder.access_token(TOKEN);
    }
    Arc::new(CredentialStore::new(builder.build().expect("bundle")))
}

/// Everything a facade test needs to script and inspect.
pub struct Harness {
    pub transport: Arc<ScriptedTransport>,
    pub driver: FakeDriver,
    pub service: Arc<LinkedInService>,
    pub tools: ToolRegistry,
}

pub fn harness(modes: Modes) -> Harness {
    let transport = Arc::new(ScriptedTransport::new());
    let driver = FakeDriver::new();
    let credentials = credentials(modes);
    let config = LinkedInConfig::default()
        .with_retry(RetrySettings::immediate())
        .with_media(MediaSettings::immediate(3));
    let api = LinkedInApi::new(transport.clone(), Arc::clone(&credentials), &config);
    let service = Arc::new(LinkedInService::new(
        credentials,
        config,
        api,
        Arc::new(driver.clone()),
    ));
    let tools = ToolRegistry::linkedin(Arc::clone(&service));
    Harness {
        transport,
        driver,
        service,
        tools,
    }
}
