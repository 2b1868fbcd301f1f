//! The error taxonomy shared by both access modes.

use crate::ExtractionFailure;
use std::fmt;
use std::time::Duration;

/// Error conditions raised by the orchestration layer.
///
/// Each variant maps to exactly one taxonomy name (see [`name`](Self::name)),
/// which is what callers outside the workspace see as the error `kind`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LinkedInErrorKind {
    /// The credential bundle for the requested mode is absent, or the
    /// configuration could not be loaded.
    Configuration(String),

    /// Credential expired, revoked or lacking scope. Terminal: the caller
    /// must refresh credentials externally.
    Authentication {
        /// HTTP status when the platform reported it
        status: Option<u16>,
        /// Platform or session message
        message: String,
    },

    /// Input rejected, either locally before any request or by the platform.
    Validation {
        /// Offending input field, when known
        field: Option<String>,
        /// HTTP status when the platform rejected it
        status: Option<u16>,
        /// Human-readable reason
        message: String,
    },

    /// The referenced resource does not exist.
    NotFound(String),

    /// The platform throttled the request.
    RateLimit {
        /// Retry hint from the `Retry-After` header
        retry_after: Option<Duration>,
        /// Platform message
        message: String,
    },

    /// The platform no longer accepts the configured API version.
    Version {
        /// The version that was sent
        version: String,
        /// Platform message
        message: String,
    },

    /// The browser process could not be started or the cookie was rejected.
    SessionInit(String),

    /// A browser extraction failed.
    Extraction(ExtractionFailure),

    /// Media exceeds the platform's size limit.
    PayloadTooLarge {
        /// Bytes observed before the download was cut off
        observed_bytes: u64,
        /// Configured limit
        limit_bytes: u64,
    },

    /// Media did not become available within the poll bound.
    MediaTimeout {
        /// Asset being polled
        media_urn: String,
        /// Number of status polls performed
        attempts: u32,
    },

    /// Server-side failure or network failure after retries were exhausted.
    Upstream {
        /// Last HTTP status, absent for network failures
        status: Option<u16>,
        /// Description of the last failure
        message: String,
    },

    /// The platform answered with a body that could not be decoded.
    InvalidResponse(String),
}

impl LinkedInErrorKind {
    /// Taxonomy name used as the normalized `kind` of an error payload.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Configuration(_) => "ConfigurationError",
            Self::Authentication { .. } => "AuthenticationError",
            Self::Validation { .. } => "ValidationError",
            Self::NotFound(_) => "NotFoundError",
            Self::RateLimit { .. } => "RateLimitError",
            Self::Version { .. } => "VersionError",
            Self::SessionInit(_) => "SessionInitError",
            Self::Extraction(_) => "ExtractionError",
            Self::PayloadTooLarge { .. } => "PayloadTooLargeError",
            Self::MediaTimeout { .. } => "MediaTimeoutError",
            Self::Upstream { .. } | Self::InvalidResponse(_) => "UpstreamError",
        }
    }

    /// HTTP status attached to the error, if the platform produced one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Authentication { status, .. }
            | Self::Validation { status, .. }
            | Self::Upstream { status, .. } => *status,
            Self::NotFound(_) => Some(404),
            Self::RateLimit { .. } => Some(429),
            Self::Version { .. } => Some(426),
            _ => None,
        }
    }
}

impl fmt::Display for LinkedInErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Configuration(msg) => write!(f, "Configuration error: {msg}"),
            Self::Authentication { message, .. } => write!(f, "Authentication failed: {message}"),
            Self::Validation {
                field: Some(field),
                message,
                ..
            } => write!(f, "Invalid {field}: {message}"),
            Self::Validation { message, .. } => write!(f, "Validation failed: {message}"),
            Self::NotFound(what) => write!(f, "Not found: {what}"),
            Self::RateLimit {
                retry_after: Some(after),
                message,
            } => write!(
                f,
                "Rate limited, retry after {}s: {message}",
                after.as_secs()
            ),
            Self::RateLimit { message, .. } => write!(f, "Rate limited: {message}"),
            Self::Version { version, message } => {
                write!(f, "API version {version} rejected: {message}")
            }
            Self::SessionInit(msg) => write!(f, "Browser session failed to start: {msg}"),
            Self::Extraction(failure) => write!(f, "Extraction failed: {failure}"),
            Self::PayloadTooLarge {
                observed_bytes,
                limit_bytes,
            } => write!(
                f,
                "Payload of at least {observed_bytes} bytes exceeds the {limit_bytes} byte limit"
            ),
            Self::MediaTimeout {
                media_urn,
                attempts,
            } => write!(
                f,
                "Media {media_urn} not available after {attempts} status checks"
            ),
            Self::Upstream {
                status: Some(status),
                message,
            } => write!(f, "Upstream error (HTTP {status}): {message}"),
            Self::Upstream { message, .. } => write!(f, "Upstream error: {message}"),
            Self::InvalidResponse(msg) => write!(f, "Invalid platform response: {msg}"),
        }
    }
}

impl From<ExtractionFailure> for LinkedInErrorKind {
    fn from(failure: ExtractionFailure) -> Self {
        Self::Extraction(failure)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_follow_taxonomy() {
        assert_eq!(
            LinkedInErrorKind::NotFound("urn:li:share:1".into()).name(),
            "NotFoundError"
        );
        assert_eq!(
            LinkedInErrorKind::InvalidResponse("eof".into()).name(),
            "UpstreamError"
        );
        assert_eq!(
            LinkedInErrorKind::PayloadTooLarge {
                observed_bytes: 6,
                limit_bytes: 5
            }
            .name(),
            "PayloadTooLargeError"
        );
    }

    #[test]
    fn validation_display_names_field() {
        let kind = LinkedInErrorKind::Validation {
            field: Some("text".into()),
            status: None,
            message: "3001 characters exceeds 3000".into(),
        };
        assert_eq!(kind.to_string(), "Invalid text: 3001 characters exceeds 3000");
    }

    #[test]
    fn rate_limit_reports_hint() {
        let kind = LinkedInErrorKind::RateLimit {
            retry_after: Some(Duration::from_secs(30)),
            message: "slow down".into(),
        };
        assert!(kind.to_string().contains("retry after 30s"));
        assert_eq!(kind.status(), Some(429));
    }
}
