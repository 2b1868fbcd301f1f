//! Browser extraction failure details.

use serde::Serialize;

/// Why a browser extraction failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, derive_more::Display)]
pub enum ExtractionReason {
    /// The page or its primary content region did not render in time.
    #[display("PageLoadTimeout")]
    PageLoadTimeout,
    /// The page rendered but required fields were absent.
    #[display("ContentNotFound")]
    ContentNotFound,
    /// Navigation itself failed (bad URL, browser-level error).
    #[display("NavigationFailed")]
    NavigationFailed,
}

/// Details of a failed extraction.
///
/// `found` and `missing` list field names so a caller can tell a partially
/// rendered page from a wrong URL.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ExtractionFailure {
    /// Failure category
    pub reason: ExtractionReason,
    /// Page that was being extracted
    pub url: String,
    /// Fields the extractor did find
    pub found: Vec<String>,
    /// Required fields the extractor could not find
    pub missing: Vec<String>,
    /// Free-form detail from the driver or extractor
    pub detail: String,
}

impl ExtractionFailure {
    /// The page did not render within the bounded wait.
    pub fn timeout(url: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            reason: ExtractionReason::PageLoadTimeout,
            url: url.into(),
            found: Vec::new(),
            missing: Vec::new(),
            detail: detail.into(),
        }
    }

    /// Required fields were missing from a rendered page.
    pub fn content_not_found(
        url: impl Into<String>,
        found: Vec<String>,
        missing: Vec<String>,
    ) -> Self {
        let detail = format!("missing required fields: {}", missing.join(", "));
        Self {
            reason: ExtractionReason::ContentNotFound,
            url: url.into(),
            found,
            missing,
            detail,
        }
    }

    /// Navigation failed before any content could be inspected.
    pub fn navigation(url: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            reason: ExtractionReason::NavigationFailed,
            url: url.into(),
            found: Vec::new(),
            missing: Vec::new(),
            detail: detail.into(),
        }
    }
}

impl std::fmt::Display for ExtractionFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} at {}: {}", self.reason, self.url, self.detail)
    }
}
