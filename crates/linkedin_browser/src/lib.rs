//! Browser side of the LinkedIn orchestration layer.
//!
//! One [`BrowserSessionManager`] owns the process-wide browser session:
//! it launches lazily, installs the session cookie, closes the browser after
//! an idle period and relaunches when the cookie is refreshed or rejected.
//! Page reads go through an [`Extractor`], which names the region that marks
//! the page as rendered and turns the page into a record.
//!
//! # Usage
//!
//! ```no_run
//! use linkedin_browser::{BrowserSessionManager, ChromiumDriver, ProfileExtractor, profile_url};
//! use linkedin_core::{CredentialBundle, CredentialStore, LinkedInConfig};
//! use std::sync::Arc;
//!
//! # async fn run() -> linkedin_error::LinkedInResult<()> {
//! let config = LinkedInConfig::load()?;
//! let credentials = Arc::new(CredentialStore::new(CredentialBundle::from_env()));
//! let session = BrowserSessionManager::new(
//!     Arc::new(ChromiumDriver),
//!     credentials,
//!     config.browser().clone(),
//! );
//! let url = profile_url("ada-lovelace", config.browser().platform_url())?;
//! let profile = session.extract(&url, &ProfileExtractor).await?;
//! println!("{:?}", profile.name);
//! session.close().await?;
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod chromium;
mod driver;
mod extract;
mod session;
mod urls;

#[cfg(feature = "test-support")]
pub mod testing;

pub use chromium::ChromiumDriver;
pub use driver::{BrowserDriver, BrowserProcess, ItemField, ItemFields, PageHandle};
pub use extract::{
    CompanyExtractor, EmployeeExtractor, Extractor, JobExtractor, JobSearchExtractor,
    PostExtractor, ProfileExtractor,
};
pub use session::{BrowserSessionManager, SessionInfo, SessionState};
pub use urls::{company_url, job_url, post_url, profile_url};
