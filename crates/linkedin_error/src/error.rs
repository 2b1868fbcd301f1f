//! Location-tracked error wrapper.

use crate::{ExtractionFailure, LinkedInErrorKind};

/// LinkedIn error with source location tracking.
///
/// # Examples
///
/// ```
/// use linkedin_error::{LinkedInError, LinkedInErrorKind};
///
/// let err = LinkedInError::not_found("urn:li:share:42");
/// assert_eq!(err.kind().name(), "NotFoundError");
/// assert!(format!("{}", err).contains("urn:li:share:42"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("LinkedIn Error: {} at line {} in {}", kind, line, file)]
pub struct LinkedInError {
    kind: LinkedInErrorKind,
    line: u32,
    file: &'static str,
}

impl LinkedInError {
    /// Create a new error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: LinkedInErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// The mode's credential bundle is missing.
    #[track_caller]
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(LinkedInErrorKind::Configuration(message.into()))
    }

    /// Input rejected locally, before any request is sent.
    #[track_caller]
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(LinkedInErrorKind::Validation {
            field: Some(field.into()),
            status: None,
            message: message.into(),
        })
    }

    /// The referenced resource does not exist.
    #[track_caller]
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::new(LinkedInErrorKind::NotFound(what.into()))
    }

    /// Browser session could not be established.
    #[track_caller]
    pub fn session_init(message: impl Into<String>) -> Self {
        Self::new(LinkedInErrorKind::SessionInit(message.into()))
    }

    /// Browser extraction failed.
    #[track_caller]
    pub fn extraction(failure: ExtractionFailure) -> Self {
        Self::new(LinkedInErrorKind::Extraction(failure))
    }

    /// Platform body could not be decoded.
    #[track_caller]
    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::new(LinkedInErrorKind::InvalidResponse(message.into()))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &LinkedInErrorKind {
        &self.kind
    }

    /// Consume the error, returning its kind.
    pub fn into_kind(self) -> LinkedInErrorKind {
        self.kind
    }

    /// Line where the error was raised.
    pub fn line(&self) -> u32 {
        self.line
    }

    /// File where the error was raised.
    pub fn file(&self) -> &'static str {
        self.file
    }
}

impl<T> From<T> for LinkedInError
where
    T: Into<LinkedInErrorKind>,
{
    #[track_caller]
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for LinkedIn operations.
pub type LinkedInResult<T> = Result<T, LinkedInError>;
