//! Shared setup for the REST integration tests.

#![allow(dead_code)]

use linkedin_api::LinkedInApi;
use linkedin_api::testing::ScriptedTransport;
use linkedin_core::{
    CredentialBundle, CredentialStore, LinkedInConfig, MediaSettings, RetrySettings,
};
use std::sync::Arc;

pub const TOKEN: &str = "AQX-test-token-0042";

/// Config with no backoff or poll delay.
pub fn fast_config() -> LinkedInConfig {
    LinkedInConfig::default()
        .with_retry(RetrySettings::immediate())
        .with_media(MediaSettings::immediate(3))
}

/// A store holding only an access token.
pub fn api_credentials() -> Arc<CredentialStore> {
    let bundle = CredentialBundle::builder()
        .access_token(TOKEN)
        .build()
        .expect("bundle");
    Arc::new(CredentialStore::new(bundle))
}

/// Services over a scripted transport.
pub fn scripted_api(transport: &Arc<ScriptedTransport>) -> LinkedInApi {
    LinkedInApi::new(transport.clone(), api_credentials(), &fast_config())
}

/// Smallest byte string recognised as a PNG.
pub fn png_bytes(len: usize) -> Vec<u8> {
    let mut bytes = b"\x89PNG\r\n\x1a\n".to_vec();
    bytes.resize(len.max(8), 0);
    bytes
}
