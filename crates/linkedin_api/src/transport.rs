//! HTTP transport seam.
//!
//! The request client talks to the platform only through [`HttpTransport`],
//! which lets tests swap in a scripted transport and lets the retry policy
//! see exactly where a failure happened relative to the response.

use async_trait::async_trait;
use linkedin_error::{LinkedInError, LinkedInResult};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, instrument};

/// HTTP methods used against the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum HttpMethod {
    /// GET
    #[display("GET")]
    Get,
    /// POST
    #[display("POST")]
    Post,
    /// PUT
    #[display("PUT")]
    Put,
    /// PATCH
    #[display("PATCH")]
    Patch,
    /// DELETE
    #[display("DELETE")]
    Delete,
}

impl HttpMethod {
    /// True for reads that may be repeated freely.
    pub fn is_idempotent_read(&self) -> bool {
        matches!(self, Self::Get)
    }
}

/// Request payload.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    /// No body
    Empty,
    /// JSON document
    Json(Value),
    /// Raw bytes with a content type
    Bytes {
        /// `Content-Type` header value
        content_type: String,
        /// Payload
        data: Vec<u8>,
    },
}

/// A single HTTP request.
#[derive(Debug, Clone, PartialEq, derive_getters::Getters)]
pub struct HttpRequest {
    method: HttpMethod,
    url: String,
    headers: Vec<(String, String)>,
    body: RequestBody,
    timeout: Option<Duration>,
    body_limit: Option<u64>,
    follow_redirects: bool,
}

impl HttpRequest {
    /// Creates a request with no headers or body.
    pub fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: Vec::new(),
            body: RequestBody::Empty,
            timeout: None,
            body_limit: None,
            follow_redirects: true,
        }
    }

    /// Adds a header.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Sets a JSON body.
    pub fn json(mut self, body: Value) -> Self {
        self.body = RequestBody::Json(body);
        self
    }

    /// Sets a raw body.
    pub fn bytes(mut self, content_type: impl Into<String>, data: Vec<u8>) -> Self {
        self.body = RequestBody::Bytes {
            content_type: content_type.into(),
            data,
        };
        self
    }

    /// Overrides the transport's default timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Stops reading the body once it exceeds `limit` bytes.
    pub fn with_body_limit(mut self, limit: u64) -> Self {
        self.body_limit = Some(limit);
        self
    }

    /// Returns 3xx responses as-is instead of following them.
    pub fn without_redirects(mut self) -> Self {
        self.follow_redirects = false;
        self
    }

    /// Value of a request header, case-insensitive.
    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// A fully read HTTP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    status: u16,
    headers: Vec<(String, String)>,
    body: Vec<u8>,
}

impl HttpResponse {
    /// Creates a response.
    pub fn new(status: u16, headers: Vec<(String, String)>, body: Vec<u8>) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// JSON response with the given status.
    pub fn json(status: u16, body: Value) -> Self {
        Self::new(
            status,
            vec![("content-type".into(), "application/json".into())],
            body.to_string().into_bytes(),
        )
    }

    /// Response with no body.
    pub fn empty(status: u16) -> Self {
        Self::new(status, Vec::new(), Vec::new())
    }

    /// Adds a header.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// HTTP status code.
    pub fn status(&self) -> u16 {
        self.status
    }

    /// True for 2xx.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Header value, case-insensitive.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Raw body.
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Consumes the response, returning the body.
    pub fn into_body(self) -> Vec<u8> {
        self.body
    }

    /// Body as text, replacing invalid UTF-8.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Body decoded as JSON.
    #[track_caller]
    pub fn json_body<T: DeserializeOwned>(&self) -> LinkedInResult<T> {
        serde_json::from_slice(&self.body)
            .map_err(|e| LinkedInError::invalid_response(format!("undecodable JSON body: {e}")))
    }
}

/// Where a transport-level failure happened.
///
/// A write is only safe to repeat when it failed before any byte of the
/// response arrived.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum TransportError {
    /// Connect, send or header wait failed; no response byte was received.
    #[display("request failed before any response: {_0}")]
    BeforeResponse(String),
    /// The response started but reading it failed.
    #[display("response interrupted: {_0}")]
    AfterResponse(String),
    /// The body exceeded the request's body limit.
    #[display("body exceeded {limit} bytes ({received} received)")]
    BodyTooLarge {
        /// Configured limit
        limit: u64,
        /// Bytes seen when reading stopped
        received: u64,
    },
}

/// Executes HTTP requests.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Sends a request and reads the full response.
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// [`HttpTransport`] backed by reqwest.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
    no_redirect_client: reqwest::Client,
}

impl ReqwestTransport {
    /// Builds clients with the given timeouts.
    pub fn new(connect_timeout: Duration, request_timeout: Duration) -> LinkedInResult<Self> {
        let build = |policy: reqwest::redirect::Policy| {
            reqwest::Client::builder()
                .connect_timeout(connect_timeout)
                .timeout(request_timeout)
                .redirect(policy)
                .gzip(true)
                .build()
                .map_err(|e| LinkedInError::configuration(format!("HTTP client: {e}")))
        };
        Ok(Self {
            client: build(reqwest::redirect::Policy::default())?,
            no_redirect_client: build(reqwest::redirect::Policy::none())?,
        })
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    #[instrument(skip(self, request), fields(method = %request.method, url = %request.url))]
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let client = if request.follow_redirects {
            &self.client
        } else {
            &self.no_redirect_client
        };
        let method = match request.method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Patch => reqwest::Method::PATCH,
            HttpMethod::Delete => reqwest::Method::DELETE,
        };

        let mut builder = client.request(method, &request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }
        if let Some(timeout) = request.timeout {
            builder = builder.timeout(timeout);
        }
        builder = match request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.json(&value),
            RequestBody::Bytes { content_type, data } => builder
                .header(reqwest::header::CONTENT_TYPE, content_type)
                .body(data),
        };

        let mut response = builder
            .send()
            .await
            .map_err(|e| TransportError::BeforeResponse(e.without_url().to_string()))?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(k, v)| {
                v.to_str()
                    .ok()
                    .map(|v| (k.as_str().to_string(), v.to_string()))
            })
            .collect();

        if let (Some(limit), Some(declared)) = (request.body_limit, response.content_length()) {
            if declared > limit {
                debug!(declared, limit, "Declared body length over limit");
                return Err(TransportError::BodyTooLarge {
                    limit,
                    received: declared,
                });
            }
        }

        let mut body = Vec::new();
        loop {
            match response.chunk().await {
                Ok(Some(chunk)) => {
                    body.extend_from_slice(&chunk);
                    let received = body.len() as u64;
                    if let Some(limit) = request.body_limit.filter(|limit| received > *limit) {
                        return Err(TransportError::BodyTooLarge { limit, received });
                    }
                }
                Ok(None) => break,
                Err(e) => {
                    return Err(TransportError::AfterResponse(e.without_url().to_string()));
                }
            }
        }

        debug!(status, bytes = body.len(), "Response read");
        Ok(HttpResponse::new(status, headers, body))
    }
}
