//! Scripted transport for tests.
//!
//! Replies are queued per `(method, url fragment)` route and handed out in
//! order; the last reply of a route repeats once the queue is drained.
//! Every request is recorded so tests can count calls per endpoint.

use crate::{HttpMethod, HttpRequest, HttpResponse, HttpTransport, TransportError};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::Mutex;

struct Route {
    method: HttpMethod,
    fragment: String,
    replies: VecDeque<Result<HttpResponse, TransportError>>,
}

/// An [`HttpTransport`] that answers from a script.
#[derive(Default)]
pub struct ScriptedTransport {
    routes: Mutex<Vec<Route>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl std::fmt::Debug for ScriptedTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScriptedTransport")
            .field("requests", &self.requests().len())
            .finish()
    }
}

impl ScriptedTransport {
    /// Creates an empty script. Unmatched requests fail before any response.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a reply for requests whose URL contains `fragment`.
    ///
    /// Routes are matched in the order they were first added.
    pub fn on(
        &self,
        method: HttpMethod,
        fragment: &str,
        reply: Result<HttpResponse, TransportError>,
    ) -> &Self {
        let mut routes = self.routes.lock().unwrap_or_else(|e| e.into_inner());
        match routes
            .iter_mut()
            .find(|r| r.method == method && r.fragment == fragment)
        {
            Some(route) => route.replies.push_back(reply),
            None => routes.push(Route {
                method,
                fragment: fragment.to_string(),
                replies: VecDeque::from([reply]),
            }),
        }
        self
    }

    /// Queues a JSON reply.
    pub fn json(&self, method: HttpMethod, fragment: &str, status: u16, body: Value) -> &Self {
        self.on(method, fragment, Ok(HttpResponse::json(status, body)))
    }

    /// Queues an empty-bodied reply.
    pub fn status(&self, method: HttpMethod, fragment: &str, status: u16) -> &Self {
        self.on(method, fragment, Ok(HttpResponse::empty(status)))
    }

    /// Queues a successful userinfo lookup for `sub`.
    pub fn identity(&self, sub: &str) -> &Self {
        self.json(
            HttpMethod::Get,
            "/v2/userinfo",
            200,
            serde_json::json!({ "sub": sub, "given_name": "Ada", "family_name": "Lovelace" }),
        )
    }

    /// All requests received so far.
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Requests with `method` whose URL contains `fragment`.
    pub fn count(&self, method: HttpMethod, fragment: &str) -> usize {
        self.requests()
            .iter()
            .filter(|r| *r.method() == method && r.url().contains(fragment))
            .count()
    }
}

#[async_trait]
impl HttpTransport for ScriptedTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let method = *request.method();
        let url = request.url().clone();
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(request);

        let mut routes = self.routes.lock().unwrap_or_else(|e| e.into_inner());
        let Some(route) = routes
            .iter_mut()
            .find(|r| r.method == method && url.contains(&r.fragment))
        else {
            return Err(TransportError::BeforeResponse(format!(
                "no scripted reply for {method} {url}"
            )));
        };
        if route.replies.len() > 1 {
            route
                .replies
                .pop_front()
                .unwrap_or_else(|| Err(TransportError::BeforeResponse("drained".into())))
        } else {
            route
                .replies
                .front()
                .cloned()
                .unwrap_or_else(|| Err(TransportError::BeforeResponse("drained".into())))
        }
    }
}
