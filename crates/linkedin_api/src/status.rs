//! HTTP outcome mapping and secret scrubbing.

use crate::HttpResponse;
use linkedin_core::Secret;
use linkedin_error::{LinkedInError, LinkedInErrorKind};
use serde::Deserialize;
use std::time::Duration;

const MAX_MESSAGE_CHARS: usize = 500;
const REDACTED: &str = "[REDACTED]";

#[derive(Deserialize)]
struct PlatformErrorBody {
    message: Option<String>,
    #[serde(rename = "serviceErrorCode")]
    service_error_code: Option<i64>,
}

/// Replaces every occurrence of a secret in `text`.
///
/// ```
/// use linkedin_api::redact;
/// use linkedin_core::Secret;
///
/// let scrubbed = redact("invalid token AQX123", &[Secret::from("AQX123")]);
/// assert_eq!(scrubbed, "invalid token [REDACTED]");
/// ```
pub fn redact(text: &str, secrets: &[Secret]) -> String {
    secrets
        .iter()
        .map(Secret::expose)
        .filter(|s| !s.is_empty())
        .fold(text.to_string(), |acc, secret| acc.replace(secret, REDACTED))
}

/// Best-effort human message from an error body.
fn platform_message(response: &HttpResponse) -> String {
    let message = match response.json_body::<PlatformErrorBody>() {
        Ok(PlatformErrorBody {
            message: Some(message),
            service_error_code,
        }) => match service_error_code {
            Some(code) => format!("{message} (service error {code})"),
            None => message,
        },
        _ => {
            let text = response.text();
            let text = text.trim();
            if text.is_empty() {
                format!("HTTP {}", response.status())
            } else {
                text.to_string()
            }
        }
    };
    message.chars().take(MAX_MESSAGE_CHARS).collect()
}

/// Parses `Retry-After` given in seconds.
fn retry_after(response: &HttpResponse) -> Option<Duration> {
    response
        .header("retry-after")
        .and_then(|v| v.trim().parse::<u64>().ok())
        .map(Duration::from_secs)
}

/// Maps a non-2xx response to the error taxonomy.
///
/// The platform message is passed through after scrubbing `secrets`.
#[track_caller]
pub fn error_for_status(
    response: &HttpResponse,
    api_version: &str,
    secrets: &[Secret],
) -> LinkedInError {
    let status = response.status();
    let message = redact(&platform_message(response), secrets);
    let kind = match status {
        401 | 403 => LinkedInErrorKind::Authentication {
            status: Some(status),
            message,
        },
        404 => LinkedInErrorKind::NotFound(message),
        426 => LinkedInErrorKind::Version {
            version: api_version.to_string(),
            message,
        },
        429 => LinkedInErrorKind::RateLimit {
            retry_after: retry_after(response),
            message,
        },
        400..=499 => LinkedInErrorKind::Validation {
            field: None,
            status: Some(status),
            message,
        },
        _ => LinkedInErrorKind::Upstream {
            status: Some(status),
            message,
        },
    };
    LinkedInError::new(kind)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn map(response: HttpResponse) -> LinkedInErrorKind {
        error_for_status(&response, "202510", &[]).into_kind()
    }

    #[test]
    fn status_table() {
        assert_eq!(map(HttpResponse::empty(401)).name(), "AuthenticationError");
        assert_eq!(map(HttpResponse::empty(403)).name(), "AuthenticationError");
        assert_eq!(map(HttpResponse::empty(404)).name(), "NotFoundError");
        assert_eq!(map(HttpResponse::empty(409)).name(), "ValidationError");
        assert_eq!(map(HttpResponse::empty(422)).name(), "ValidationError");
        assert_eq!(map(HttpResponse::empty(502)).name(), "UpstreamError");
    }

    #[test]
    fn version_error_names_version() {
        let kind = map(HttpResponse::json(
            426,
            json!({"message": "Requested version 20230101 is not active"}),
        ));
        match kind {
            LinkedInErrorKind::Version { version, .. } => assert_eq!(version, "202510"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn rate_limit_reads_retry_after() {
        let kind = map(HttpResponse::empty(429).with_header("Retry-After", "12"));
        assert_eq!(
            linkedin_error::RetryableError::retry_after(&kind),
            Some(Duration::from_secs(12))
        );
    }

    #[test]
    fn validation_passes_platform_message() {
        let kind = map(HttpResponse::json(
            422,
            json!({"message": "commentary is too long", "serviceErrorCode": 100, "status": 422}),
        ));
        assert_eq!(
            kind.to_string(),
            "Validation failed: commentary is too long (service error 100)"
        );
        assert_eq!(kind.status(), Some(422));
    }

    #[test]
    fn secrets_are_scrubbed() {
        let response = HttpResponse::json(
            401,
            json!({"message": "Invalid access token AQVsecret"}),
        );
        let err = error_for_status(&response, "202510", &[Secret::from("AQVsecret")]);
        let text = err.to_string();
        assert!(!text.contains("AQVsecret"));
        assert!(text.contains("[REDACTED]"));
    }
}
