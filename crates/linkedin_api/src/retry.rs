//! Bounded retry with exponential backoff.
//!
//! Reads are repeated on network failures, 429 and 5xx. Writes are repeated
//! only when the transport failed before any response byte arrived, so a
//! create or delete is never sent twice after the platform may have acted on
//! it.

use crate::TransportError;
use linkedin_core::RetrySettings;
use linkedin_error::{LinkedInError, LinkedInErrorKind, RetryableError};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, instrument, warn};

/// Whether a request may be freely repeated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum RequestKind {
    /// Idempotent read
    #[display("read")]
    Read,
    /// Side-effecting write
    #[display("write")]
    Write,
}

/// Attempt bound and backoff schedule.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    /// Total attempts including the first.
    pub max_attempts: u32,
    /// Delay before the second attempt.
    pub initial_backoff: Duration,
    /// Cap on any single delay.
    pub max_backoff: Duration,
    /// Growth factor per attempt.
    pub backoff_multiplier: f64,
}

impl RetryPolicy {
    /// Policy for the given request kind.
    pub fn for_kind(kind: RequestKind, settings: &RetrySettings) -> Self {
        let max_attempts = match kind {
            RequestKind::Read => *settings.read_attempts(),
            RequestKind::Write => (*settings.write_attempts()).min(2),
        };
        Self {
            max_attempts: max_attempts.max(1),
            initial_backoff: settings.initial_backoff(),
            max_backoff: settings.max_backoff(),
            backoff_multiplier: 2.0,
        }
    }
}

/// A failed attempt, before it is turned into a caller-facing error.
#[derive(Debug, Clone)]
pub(crate) enum AttemptError {
    /// The transport failed.
    Transport(TransportError),
    /// The platform answered with an error status.
    Platform(LinkedInError),
}

impl AttemptError {
    fn may_retry(&self, kind: RequestKind) -> bool {
        match (self, kind) {
            (Self::Transport(TransportError::BodyTooLarge { .. }), _) => false,
            (Self::Transport(_), RequestKind::Read) => true,
            (Self::Transport(TransportError::BeforeResponse(_)), RequestKind::Write) => true,
            (Self::Transport(_), RequestKind::Write) => false,
            (Self::Platform(err), RequestKind::Read) => err.is_retryable(),
            (Self::Platform(_), RequestKind::Write) => false,
        }
    }

    fn retry_after(&self) -> Option<Duration> {
        match self {
            Self::Platform(err) => err.retry_after(),
            Self::Transport(_) => None,
        }
    }

    #[track_caller]
    fn into_error(self) -> LinkedInError {
        match self {
            Self::Platform(err) => err,
            Self::Transport(TransportError::BodyTooLarge { limit, received }) => {
                LinkedInError::new(LinkedInErrorKind::PayloadTooLarge {
                    observed_bytes: received,
                    limit_bytes: limit,
                })
            }
            Self::Transport(other) => LinkedInError::new(LinkedInErrorKind::Upstream {
                status: None,
                message: other.to_string(),
            }),
        }
    }
}

/// Runs `operation` until it succeeds, fails terminally or the attempt
/// bound is reached.
#[instrument(skip(policy, operation), fields(max_attempts = policy.max_attempts))]
pub(crate) async fn retry_with_backoff<F, Fut, T>(
    policy: &RetryPolicy,
    kind: RequestKind,
    mut operation: F,
) -> Result<T, LinkedInError>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = Result<T, AttemptError>>,
{
    let mut attempt = 0;
    let mut backoff = policy.initial_backoff;

    loop {
        attempt += 1;
        debug!(attempt, "Executing request");

        match operation().await {
            Ok(result) => {
                if attempt > 1 {
                    debug!(attempt, "Request succeeded after retry");
                }
                return Ok(result);
            }
            Err(err) => {
                if !err.may_retry(kind) {
                    debug!(attempt, "Failure is not retryable");
                    return Err(err.into_error());
                }
                if attempt >= policy.max_attempts {
                    warn!(attempt, "All retry attempts exhausted");
                    return Err(err.into_error());
                }

                let delay = match err.retry_after() {
                    Some(hint) => hint.max(backoff).min(policy.max_backoff),
                    None => backoff,
                };
                warn!(attempt, delay_ms = delay.as_millis() as u64, "Retrying after failure");
                sleep(delay).await;

                backoff = std::cmp::min(
                    Duration::from_secs_f64(backoff.as_secs_f64() * policy.backoff_multiplier),
                    policy.max_backoff,
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn policy(max_attempts: u32) -> RetryPolicy {
        RetryPolicy {
            max_attempts,
            initial_backoff: Duration::ZERO,
            max_backoff: Duration::ZERO,
            backoff_multiplier: 2.0,
        }
    }

    fn server_error() -> AttemptError {
        AttemptError::Platform(LinkedInError::new(LinkedInErrorKind::Upstream {
            status: Some(503),
            message: "unavailable".into(),
        }))
    }

    #[tokio::test]
    async fn read_retries_network_failure_then_succeeds() {
        let counter = AtomicU32::new(0);
        let calls = &counter;
        let result = retry_with_backoff(&policy(3), RequestKind::Read, || async move {
            match calls.fetch_add(1, Ordering::SeqCst) {
                0 => Err(AttemptError::Transport(TransportError::BeforeResponse(
                    "connection reset".into(),
                ))),
                _ => Ok(200),
            }
        })
        .await;
        assert_eq!(result.unwrap(), 200);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn read_gives_up_after_bound() {
        let counter = AtomicU32::new(0);
        let calls = &counter;
        let result: Result<(), _> = retry_with_backoff(&policy(3), RequestKind::Read, || async move {
            calls.fetch_add(1, Ordering::SeqCst);
            Err(server_error())
        })
        .await;
        assert_eq!(result.unwrap_err().kind().name(), "UpstreamError");
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn write_not_retried_after_response_started() {
        let counter = AtomicU32::new(0);
        let calls = &counter;
        let result: Result<(), _> = retry_with_backoff(&policy(2), RequestKind::Write, || async move {
            calls.fetch_add(1, Ordering::SeqCst);
            Err(AttemptError::Transport(TransportError::AfterResponse(
                "body truncated".into(),
            )))
        })
        .await;
        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn write_not_retried_on_server_error() {
        let counter = AtomicU32::new(0);
        let calls = &counter;
        let result: Result<(), _> = retry_with_backoff(&policy(2), RequestKind::Write, || async move {
            calls.fetch_add(1, Ordering::SeqCst);
            Err(server_error())
        })
        .await;
        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn write_retried_once_before_response() {
        let counter = AtomicU32::new(0);
        let calls = &counter;
        let result: Result<(), _> = retry_with_backoff(&policy(2), RequestKind::Write, || async move {
            calls.fetch_add(1, Ordering::SeqCst);
            Err(AttemptError::Transport(TransportError::BeforeResponse(
                "connect refused".into(),
            )))
        })
        .await;
        assert_eq!(result.unwrap_err().kind().name(), "UpstreamError");
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn write_policy_caps_at_one_retry() {
        let settings: RetrySettings = RetrySettings::default();
        assert_eq!(RetryPolicy::for_kind(RequestKind::Write, &settings).max_attempts, 2);
        assert_eq!(RetryPolicy::for_kind(RequestKind::Read, &settings).max_attempts, 3);
    }

    #[test]
    fn oversized_body_maps_to_payload_error() {
        let err = AttemptError::Transport(TransportError::BodyTooLarge {
            limit: 5,
            received: 6,
        })
        .into_error();
        assert_eq!(err.kind().name(), "PayloadTooLargeError");
    }
}
