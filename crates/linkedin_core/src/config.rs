//! Runtime configuration.
//!
//! Values are layered from built-in defaults, an optional TOML file and
//! `LINKEDIN_MCP__<SECTION>__<KEY>` environment variables, later sources
//! overriding earlier ones. Credentials are not part of this file; see
//! [`CredentialBundle::from_env`](crate::CredentialBundle::from_env).

use config::{Config, Environment, File};
use derive_getters::Getters;
use linkedin_error::{LinkedInError, LinkedInResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, instrument};

/// Environment variable naming an optional TOML config file.
pub const CONFIG_PATH_VAR: &str = "LINKEDIN_MCP_CONFIG";

/// Top-level configuration.
///
/// # Examples
///
/// ```
/// use linkedin_core::LinkedInConfig;
///
/// let config: LinkedInConfig = toml::from_str("[browser]\nheadless = false\n").unwrap();
/// assert!(!config.browser().headless());
/// assert_eq!(*config.retry().read_attempts(), 3);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Getters)]
#[serde(default)]
pub struct LinkedInConfig {
    /// REST endpoints and HTTP timeouts
    api: ApiSettings,
    /// Retry bounds
    retry: RetrySettings,
    /// Client-side request throttle
    throttle: ThrottleSettings,
    /// Media upload limits
    media: MediaSettings,
    /// Browser session settings
    browser: BrowserSettings,
}

impl LinkedInConfig {
    /// Loads configuration, reading the file named by `LINKEDIN_MCP_CONFIG`
    /// when set.
    pub fn load() -> LinkedInResult<Self> {
        let path = std::env::var(CONFIG_PATH_VAR).ok().map(PathBuf::from);
        Self::load_from(path.as_deref())
    }

    /// Loads configuration from defaults, `path` (if any) and the
    /// environment.
    #[instrument]
    pub fn load_from(path: Option<&Path>) -> LinkedInResult<Self> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            if !path.exists() {
                return Err(LinkedInError::configuration(format!(
                    "config file {} does not exist",
                    path.display()
                )));
            }
            builder = builder.add_source(File::from(path));
        }
        builder = builder.add_source(
            Environment::with_prefix("LINKEDIN_MCP")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder
            .build()
            .and_then(|c| c.try_deserialize::<Self>())
            .map_err(|e| LinkedInError::configuration(format!("Failed to load config: {e}")))?;
        debug!(?config, "Configuration loaded");
        Ok(config)
    }

    /// Replaces the REST settings.
    pub fn with_api(mut self, api: ApiSettings) -> Self {
        self.api = api;
        self
    }

    /// Replaces the retry bounds.
    pub fn with_retry(mut self, retry: RetrySettings) -> Self {
        self.retry = retry;
        self
    }

    /// Replaces the throttle.
    pub fn with_throttle(mut self, throttle: ThrottleSettings) -> Self {
        self.throttle = throttle;
        self
    }

    /// Replaces the media settings.
    pub fn with_media(mut self, media: MediaSettings) -> Self {
        self.media = media;
        self
    }

    /// Replaces the browser settings.
    pub fn with_browser(mut self, browser: BrowserSettings) -> Self {
        self.browser = browser;
        self
    }
}

/// REST surface settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
#[serde(default)]
pub struct ApiSettings {
    /// Versioned REST base, e.g. `https://api.linkedin.com/rest`
    base_url: String,
    /// OpenID userinfo endpoint
    userinfo_url: String,
    /// Web origin used for cookie probes and page URLs
    platform_url: String,
    /// Overall per-request timeout
    request_timeout_secs: u64,
    /// TCP connect timeout
    connect_timeout_secs: u64,
    /// Timeout for downloading source images
    download_timeout_secs: u64,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: "https://api.linkedin.com/rest".to_string(),
            userinfo_url: "https://api.linkedin.com/v2/userinfo".to_string(),
            platform_url: "https://www.linkedin.com".to_string(),
            request_timeout_secs: 15,
            connect_timeout_secs: 10,
            download_timeout_secs: 30,
        }
    }
}

impl ApiSettings {
    /// Points every endpoint at one origin. Used to aim the client at a
    /// local mock server.
    pub fn with_origin(origin: &str) -> Self {
        let origin = origin.trim_end_matches('/');
        Self {
            base_url: format!("{origin}/rest"),
            userinfo_url: format!("{origin}/v2/userinfo"),
            platform_url: origin.to_string(),
            ..Self::default()
        }
    }

    /// Per-request timeout.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Connect timeout.
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    /// Image download timeout.
    pub fn download_timeout(&self) -> Duration {
        Duration::from_secs(self.download_timeout_secs)
    }
}

/// Retry bounds for reads and writes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
#[serde(default)]
pub struct RetrySettings {
    /// Total attempts for idempotent reads
    read_attempts: u32,
    /// Total attempts for writes (at most one retry)
    write_attempts: u32,
    /// First backoff delay
    initial_backoff_ms: u64,
    /// Backoff cap
    max_backoff_ms: u64,
}

impl Default for RetrySettings {
    fn default() -> Self {
        Self {
            read_attempts: 3,
            write_attempts: 2,
            initial_backoff_ms: 500,
            max_backoff_ms: 8_000,
        }
    }
}

impl RetrySettings {
    /// Settings with no backoff delay, for tests.
    pub fn immediate() -> Self {
        Self {
            initial_backoff_ms: 0,
            max_backoff_ms: 0,
            ..Self::default()
        }
    }

    /// First backoff delay.
    pub fn initial_backoff(&self) -> Duration {
        Duration::from_millis(self.initial_backoff_ms)
    }

    /// Backoff cap.
    pub fn max_backoff(&self) -> Duration {
        Duration::from_millis(self.max_backoff_ms)
    }
}

/// Client-side quota. Unset fields impose no limit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Getters)]
#[serde(default)]
pub struct ThrottleSettings {
    /// Requests per minute
    requests_per_minute: Option<u32>,
    /// Requests per day
    requests_per_day: Option<u32>,
    /// Requests in flight at once
    max_concurrent: Option<u32>,
}

impl ThrottleSettings {
    /// Creates throttle settings.
    pub fn new(
        requests_per_minute: Option<u32>,
        requests_per_day: Option<u32>,
        max_concurrent: Option<u32>,
    ) -> Self {
        Self {
            requests_per_minute,
            requests_per_day,
            max_concurrent,
        }
    }
}

/// Media upload settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
#[serde(default)]
pub struct MediaSettings {
    /// Largest accepted source image
    max_image_bytes: u64,
    /// Status polls before giving up
    poll_attempts: u32,
    /// Delay between status polls
    poll_interval_ms: u64,
}

impl Default for MediaSettings {
    fn default() -> Self {
        Self {
            max_image_bytes: crate::MAX_IMAGE_BYTES,
            poll_attempts: 10,
            poll_interval_ms: 1_000,
        }
    }
}

impl MediaSettings {
    /// Settings with no poll delay, for tests.
    pub fn immediate(poll_attempts: u32) -> Self {
        Self {
            poll_attempts,
            poll_interval_ms: 0,
            ..Self::default()
        }
    }

    /// Delay between status polls.
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

/// Browser session settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
#[serde(default)]
pub struct BrowserSettings {
    /// Run without a visible window
    headless: bool,
    /// Start the session at process start instead of first use
    eager_init: bool,
    /// Idle time after which the session is closed
    idle_timeout_secs: u64,
    /// Bound on a single navigation
    navigation_timeout_secs: u64,
    /// Bound on waiting for the primary content region
    content_timeout_secs: u64,
    /// Chrome binary; autodetected when unset
    executable_path: Option<PathBuf>,
    /// Web origin the cookie is injected for
    platform_url: String,
}

impl Default for BrowserSettings {
    fn default() -> Self {
        Self {
            headless: true,
            eager_init: false,
            idle_timeout_secs: 30 * 60,
            navigation_timeout_secs: 30,
            content_timeout_secs: 10,
            executable_path: None,
            platform_url: "https://www.linkedin.com".to_string(),
        }
    }
}

impl BrowserSettings {
    /// Overrides the idle threshold.
    pub fn with_idle_timeout(mut self, idle_timeout: Duration) -> Self {
        self.idle_timeout_secs = idle_timeout.as_secs();
        self
    }

    /// Overrides eager start.
    pub fn with_eager_init(mut self, eager_init: bool) -> Self {
        self.eager_init = eager_init;
        self
    }

    /// Overrides the web origin.
    pub fn with_platform_url(mut self, platform_url: impl Into<String>) -> Self {
        self.platform_url = platform_url.into();
        self
    }

    /// Idle threshold.
    pub fn idle_timeout(&self) -> Duration {
        Duration::from_secs(self.idle_timeout_secs)
    }

    /// Navigation bound.
    pub fn navigation_timeout(&self) -> Duration {
        Duration::from_secs(self.navigation_timeout_secs)
    }

    /// Content wait bound.
    pub fn content_timeout(&self) -> Duration {
        Duration::from_secs(self.content_timeout_secs)
    }
}
