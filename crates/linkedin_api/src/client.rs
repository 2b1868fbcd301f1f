//! Versioned REST request client.

use crate::retry::{AttemptError, retry_with_backoff};
use crate::{
    HttpMethod, HttpRequest, HttpResponse, HttpTransport, ReqwestTransport, RequestKind,
    RequestThrottle, RetryPolicy, error_for_status, redact,
};
use linkedin_core::{ApiSettings, CredentialStore, LinkedInConfig, RetrySettings, Urn};
use linkedin_error::{LinkedInError, LinkedInResult};
use serde_json::Value;
use std::borrow::Cow;
use std::sync::Arc;
use tracing::{debug, error, instrument};

/// Rest.li protocol version sent with every REST call.
pub const RESTLI_PROTOCOL_VERSION: &str = "2.0.0";

/// Percent-encodes a URN for use as a path segment.
///
/// ```
/// use linkedin_api::encode_urn;
/// use linkedin_core::Urn;
///
/// let urn = Urn::parse("urn:li:share:42").unwrap();
/// assert_eq!(encode_urn(&urn), "urn%3Ali%3Ashare%3A42");
/// ```
pub fn encode_urn(urn: &Urn) -> Cow<'_, str> {
    urlencoding::encode(urn.as_str())
}

/// A decoded platform response.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    status: u16,
    restli_id: Option<String>,
    body: Option<Value>,
}

impl ApiResponse {
    /// HTTP status.
    pub fn status(&self) -> u16 {
        self.status
    }

    /// Id of a created entity from the `x-restli-id` header.
    pub fn restli_id(&self) -> Option<&str> {
        self.restli_id.as_deref()
    }

    /// JSON body, absent for empty responses.
    pub fn body(&self) -> Option<&Value> {
        self.body.as_ref()
    }

    /// Decodes the body into `T`.
    #[track_caller]
    pub fn decode<T: serde::de::DeserializeOwned>(&self) -> LinkedInResult<T> {
        let body = self
            .body
            .clone()
            .ok_or_else(|| LinkedInError::invalid_response("expected a JSON body"))?;
        serde_json::from_value(body)
            .map_err(|e| LinkedInError::invalid_response(format!("unexpected body shape: {e}")))
    }
}

/// Stateless client for the versioned REST surface.
///
/// Every request carries the bearer token, the `LinkedIn-Version` header and
/// the Rest.li protocol header, passes the throttle, and runs under the retry
/// policy for its method. The client holds no per-call mutable state and may
/// be shared freely.
pub struct ApiClient {
    transport: Arc<dyn HttpTransport>,
    credentials: Arc<CredentialStore>,
    settings: ApiSettings,
    retry: RetrySettings,
    throttle: RequestThrottle,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", self.settings.base_url())
            .field("throttle", &self.throttle)
            .finish()
    }
}

impl ApiClient {
    /// Creates a client over any transport.
    pub fn new(
        transport: Arc<dyn HttpTransport>,
        credentials: Arc<CredentialStore>,
        config: &LinkedInConfig,
    ) -> Self {
        Self {
            transport,
            credentials,
            settings: config.api().clone(),
            retry: config.retry().clone(),
            throttle: RequestThrottle::new(config.throttle()),
        }
    }

    /// Creates a client over reqwest using the configured timeouts.
    pub fn with_reqwest(
        credentials: Arc<CredentialStore>,
        config: &LinkedInConfig,
    ) -> LinkedInResult<Self> {
        let transport = ReqwestTransport::new(
            config.api().connect_timeout(),
            config.api().request_timeout(),
        )?;
        Ok(Self::new(Arc::new(transport), credentials, config))
    }

    /// Shared credential store.
    pub fn credentials(&self) -> &Arc<CredentialStore> {
        &self.credentials
    }

    /// Endpoint settings.
    pub fn settings(&self) -> &ApiSettings {
        &self.settings
    }

    /// Underlying transport.
    pub fn transport(&self) -> &Arc<dyn HttpTransport> {
        &self.transport
    }

    /// Sends a request to `path` under the REST base URL.
    ///
    /// `path` is appended verbatim; URNs in it must already be encoded with
    /// [`encode_urn`]. Query pairs are form-encoded.
    #[instrument(skip(self, body, query))]
    pub async fn send(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<Value>,
        query: &[(&str, &str)],
    ) -> LinkedInResult<ApiResponse> {
        let url = self.rest_url(path, query)?;
        self.send_to(method, &url, body).await
    }

    /// Sends an authenticated request to an absolute URL.
    pub async fn send_to(
        &self,
        method: HttpMethod,
        url: &str,
        body: Option<Value>,
    ) -> LinkedInResult<ApiResponse> {
        let token = self.credentials.access_token()?;
        let version = self.credentials.api_version();

        let mut request = HttpRequest::new(method, url)
            .header("Authorization", format!("Bearer {}", token.expose()))
            .header("LinkedIn-Version", version.as_str())
            .header("X-Restli-Protocol-Version", RESTLI_PROTOCOL_VERSION)
            .with_timeout(self.settings.request_timeout());
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = self.execute(request, &version).await?;
        let body = if response.body().is_empty() {
            None
        } else {
            Some(response.json_body::<Value>()?)
        };
        Ok(ApiResponse {
            status: response.status(),
            restli_id: response
                .header("x-restli-id")
                .or_else(|| response.header("x-linkedin-id"))
                .map(str::to_string),
            body,
        })
    }

    /// PUTs raw bytes to a platform upload URL.
    #[instrument(skip(self, data), fields(bytes = data.len()))]
    pub async fn upload(
        &self,
        upload_url: &str,
        content_type: &str,
        data: Vec<u8>,
    ) -> LinkedInResult<()> {
        let token = self.credentials.access_token()?;
        let version = self.credentials.api_version();
        let request = HttpRequest::new(HttpMethod::Put, upload_url)
            .header("Authorization", format!("Bearer {}", token.expose()))
            .bytes(content_type, data)
            .with_timeout(self.settings.download_timeout());
        self.execute(request, &version).await.map(|_| ())
    }

    /// Downloads a third-party resource without credentials, stopping once
    /// the body passes `limit` bytes.
    #[instrument(skip(self))]
    pub async fn download(&self, url: &str, limit: u64) -> LinkedInResult<HttpResponse> {
        let request = HttpRequest::new(HttpMethod::Get, url)
            .with_timeout(self.settings.download_timeout())
            .with_body_limit(limit);
        let policy = RetryPolicy::for_kind(RequestKind::Read, &self.retry);
        retry_with_backoff(&policy, RequestKind::Read, || {
            let request = request.clone();
            async move {
                let response = self
                    .transport
                    .execute(request)
                    .await
                    .map_err(AttemptError::Transport)?;
                if response.status() >= 500 || response.status() == 429 {
                    return Err(AttemptError::Platform(error_for_status(&response, "", &[])));
                }
                Ok(response)
            }
        })
        .await
    }

    /// Runs one logical request under the throttle and retry policy.
    async fn execute(&self, request: HttpRequest, version: &str) -> LinkedInResult<HttpResponse> {
        let kind = if request.method().is_idempotent_read() {
            RequestKind::Read
        } else {
            RequestKind::Write
        };
        let policy = RetryPolicy::for_kind(kind, &self.retry);
        let secrets = self.credentials.secrets();

        let result = retry_with_backoff(&policy, kind, || {
            let request = request.clone();
            let secrets = &secrets;
            async move {
                let _slot = self.throttle.acquire().await.map_err(AttemptError::Platform)?;
                let response = self.transport.execute(request).await.map_err(|e| {
                    AttemptError::Transport(scrub_transport(e, secrets))
                })?;
                if response.is_success() {
                    Ok(response)
                } else {
                    Err(AttemptError::Platform(error_for_status(
                        &response, version, secrets,
                    )))
                }
            }
        })
        .await;

        match &result {
            Ok(response) => debug!(status = response.status(), "Request completed"),
            Err(err) => error!(kind = err.kind().name(), error = %err.kind(), "Request failed"),
        }
        result
    }

    fn rest_url(&self, path: &str, query: &[(&str, &str)]) -> LinkedInResult<String> {
        let base = self.settings.base_url().trim_end_matches('/');
        let raw = format!("{base}{path}");
        if query.is_empty() {
            return Ok(raw);
        }
        let mut url = url::Url::parse(&raw)
            .map_err(|e| LinkedInError::configuration(format!("invalid API URL {raw}: {e}")))?;
        {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query {
                pairs.append_pair(key, value);
            }
        }
        Ok(url.into())
    }
}

fn scrub_transport(
    err: crate::TransportError,
    secrets: &[linkedin_core::Secret],
) -> crate::TransportError {
    use crate::TransportError::*;
    match err {
        BeforeResponse(msg) => BeforeResponse(redact(&msg, secrets)),
        AfterResponse(msg) => AfterResponse(redact(&msg, secrets)),
        other => other,
    }
}
