//! Retry classification.

use crate::{LinkedInError, LinkedInErrorKind};
use std::time::Duration;

/// Trait for errors that support retry logic.
///
/// The request client consults this to decide whether an attempt may be
/// repeated. Whether a *write* may be repeated is decided separately by the
/// client, which only retries writes that failed before any response byte.
///
/// # Examples
///
/// ```
/// use linkedin_error::{LinkedInError, LinkedInErrorKind, RetryableError};
///
/// let err = LinkedInError::new(LinkedInErrorKind::Upstream {
///     status: Some(503),
///     message: "Service unavailable".to_string(),
/// });
/// assert!(err.is_retryable());
///
/// let auth = LinkedInError::new(LinkedInErrorKind::Authentication {
///     status: Some(401),
///     message: "expired".to_string(),
/// });
/// assert!(!auth.is_retryable());
/// ```
pub trait RetryableError {
    /// Returns true if this error should trigger a retry.
    ///
    /// Throttling (429), server errors (5xx) and network failures are
    /// transient. Credential, validation, not-found and version errors are
    /// terminal.
    fn is_retryable(&self) -> bool;

    /// Server-provided delay to honour before the next attempt.
    fn retry_after(&self) -> Option<Duration> {
        None
    }
}

impl RetryableError for LinkedInErrorKind {
    fn is_retryable(&self) -> bool {
        match self {
            LinkedInErrorKind::RateLimit { .. } => true,
            LinkedInErrorKind::Upstream { status, .. } => match status {
                Some(code) => *code >= 500,
                None => true,
            },
            _ => false,
        }
    }

    fn retry_after(&self) -> Option<Duration> {
        match self {
            LinkedInErrorKind::RateLimit { retry_after, .. } => *retry_after,
            _ => None,
        }
    }
}

impl RetryableError for LinkedInError {
    fn is_retryable(&self) -> bool {
        self.kind().is_retryable()
    }

    fn retry_after(&self) -> Option<Duration> {
        self.kind().retry_after()
    }
}
