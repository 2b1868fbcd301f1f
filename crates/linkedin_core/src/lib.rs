//! Core data types for the LinkedIn orchestration layer.
//!
//! This crate provides the data model shared by the API and browser modes:
//! URNs, post/media/reaction records, the records produced by page
//! extraction, the credential store and the workspace configuration.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod credentials;
mod identity;
mod media;
mod post;
mod reaction;
mod scraped;
mod urn;

pub use config::{
    ApiSettings, BrowserSettings, CONFIG_PATH_VAR, LinkedInConfig, MediaSettings, RetrySettings,
    ThrottleSettings,
};
pub use credentials::{
    Capability, CapabilitySet, CredentialBundle, CredentialBundleBuilder, CredentialStore,
    DEFAULT_API_VERSION, SESSION_COOKIE_NAME, Secret, SessionCookie, is_login_url,
};
pub use identity::PersonIdentity;
pub use media::{ImageMime, MAX_IMAGE_BYTES, MediaAsset, MediaStatus};
pub use post::{MAX_POST_CHARS, PostRecord, PostRecordBuilder, PostVisibility, validate_post_text};
pub use reaction::{ReactionRecord, ReactionSummary, ReactionType};
pub use scraped::{
    CompanyRecord, Education, EmployeeSummary, Experience, JobRecord, JobSearchQuery, JobSummary,
    PostPageRecord, ProfileRecord,
};
pub use urn::Urn;
