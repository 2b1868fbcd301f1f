//! Client-side request throttle using governor and a Tokio semaphore.
//!
//! Requests-per-minute and requests-per-day quotas use governor's GCRA
//! limiter; in-flight requests are bounded by a semaphore whose permit is
//! held for the duration of one HTTP exchange.

use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter as GovernorRateLimiter};
use linkedin_core::ThrottleSettings;
use linkedin_error::{LinkedInError, LinkedInErrorKind, LinkedInResult};
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};
use tracing::debug;

type DirectRateLimiter = GovernorRateLimiter<NotKeyed, InMemoryState, DefaultClock>;

const SECONDS_PER_DAY: u64 = 24 * 60 * 60;

/// Gate every API request passes through.
#[derive(Clone)]
pub struct RequestThrottle {
    rpm_limiter: Option<Arc<DirectRateLimiter>>,
    rpd_limiter: Option<Arc<DirectRateLimiter>>,
    concurrent: Arc<Semaphore>,
}

impl RequestThrottle {
    /// Builds a throttle enforcing every configured limit.
    pub fn new(settings: &ThrottleSettings) -> Self {
        let rpm_limiter = (*settings.requests_per_minute())
            .and_then(NonZeroU32::new)
            .map(|n| Arc::new(GovernorRateLimiter::direct(Quota::per_minute(n))));

        let rpd_limiter = (*settings.requests_per_day()).and_then(NonZeroU32::new).and_then(|n| {
            Quota::with_period(Duration::from_secs(SECONDS_PER_DAY) / n.get())
                .map(|quota| Arc::new(GovernorRateLimiter::direct(quota.allow_burst(n))))
        });

        let max_concurrent = (*settings.max_concurrent())
            .map(|n| (n as usize).max(1))
            .unwrap_or(Semaphore::MAX_PERMITS);

        Self {
            rpm_limiter,
            rpd_limiter,
            concurrent: Arc::new(Semaphore::new(max_concurrent)),
        }
    }

    /// No limits at all.
    pub fn unlimited() -> Self {
        Self::new(&ThrottleSettings::default())
    }

    /// Waits until every quota admits one more request.
    ///
    /// The returned guard holds a concurrency slot until dropped.
    pub async fn acquire(&self) -> LinkedInResult<ThrottleGuard> {
        if let Some(limiter) = &self.rpm_limiter {
            limiter.until_ready().await;
        }
        if let Some(limiter) = &self.rpd_limiter {
            limiter.until_ready().await;
        }
        let permit = self.concurrent.clone().acquire_owned().await.map_err(|_| {
            LinkedInError::new(LinkedInErrorKind::Upstream {
                status: None,
                message: "request throttle was shut down".to_string(),
            })
        })?;
        debug!(
            available = self.concurrent.available_permits(),
            "Throttle slot acquired"
        );
        Ok(ThrottleGuard { _permit: permit })
    }

    /// Acquires without waiting, or returns `None` if any quota would block.
    pub fn try_acquire(&self) -> Option<ThrottleGuard> {
        if let Some(limiter) = &self.rpm_limiter {
            limiter.check().ok()?;
        }
        if let Some(limiter) = &self.rpd_limiter {
            limiter.check().ok()?;
        }
        let permit = self.concurrent.clone().try_acquire_owned().ok()?;
        Some(ThrottleGuard { _permit: permit })
    }
}

impl std::fmt::Debug for RequestThrottle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestThrottle")
            .field("per_minute", &self.rpm_limiter.is_some())
            .field("per_day", &self.rpd_limiter.is_some())
            .field("available_slots", &self.concurrent.available_permits())
            .finish()
    }
}

/// Releases the concurrency slot when dropped.
#[derive(Debug)]
pub struct ThrottleGuard {
    _permit: OwnedSemaphorePermit,
}
