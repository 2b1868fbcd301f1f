//! Post create/update/delete against a scripted platform.

mod test_utils;

use linkedin_api::testing::ScriptedTransport;
use linkedin_api::{HttpMethod, HttpResponse, RequestBody, TransportError};
use linkedin_core::{PostVisibility, Urn};
use serde_json::json;
use std::sync::Arc;
use test_utils::{TOKEN, scripted_api};

fn created(id: &str) -> Result<HttpResponse, TransportError> {
    Ok(HttpResponse::empty(201).with_header("x-restli-id", id))
}

#[tokio::test]
async fn create_post_issues_one_create_call() {
    let transport = Arc::new(ScriptedTransport::new());
    transport.identity("abc123");
    transport.on(HttpMethod::Post, "/rest/posts", created("urn:li:share:7001"));
    let api = scripted_api(&transport);

    let post = api
        .posts()
        .create_post("Hello 🚀", PostVisibility::Public, None)
        .await
        .expect("create");

    assert_eq!(post.urn().as_str(), "urn:li:share:7001");
    assert_eq!(post.author_urn().as_str(), "urn:li:person:abc123");
    assert_eq!(post.text(), "Hello 🚀");
    assert_eq!(transport.count(HttpMethod::Post, "/rest/posts"), 1);

    let create = transport
        .requests()
        .into_iter()
        .find(|r| *r.method() == HttpMethod::Post)
        .expect("create request");
    let RequestBody::Json(body) = create.body() else {
        panic!("expected JSON body");
    };
    assert_eq!(body["author"], "urn:li:person:abc123");
    assert_eq!(body["visibility"], "PUBLIC");
    assert_eq!(body["lifecycleState"], "PUBLISHED");
    assert!(body.get("content").is_none());
    assert_eq!(
        create.header_value("Authorization"),
        Some(format!("Bearer {TOKEN}").as_str())
    );
    assert_eq!(create.header_value("X-Restli-Protocol-Version"), Some("2.0.0"));
    assert_eq!(create.header_value("LinkedIn-Version"), Some("202510"));
}

#[tokio::test]
async fn exactly_max_length_is_accepted() {
    let transport = Arc::new(ScriptedTransport::new());
    transport.identity("abc123");
    transport.on(HttpMethod::Post, "/rest/posts", created("urn:li:share:1"));
    let api = scripted_api(&transport);

    let text = "é".repeat(3000);
    api.posts()
        .create_post(&text, PostVisibility::Connections, None)
        .await
        .expect("3000 chars is allowed");
    assert_eq!(transport.count(HttpMethod::Post, "/rest/posts"), 1);
}

#[tokio::test]
async fn overlong_text_makes_no_requests() {
    let transport = Arc::new(ScriptedTransport::new());
    let api = scripted_api(&transport);

    let err = api
        .posts()
        .create_post(&"a".repeat(3001), PostVisibility::Public, None)
        .await
        .unwrap_err();

    assert_eq!(err.kind().name(), "ValidationError");
    assert!(err.to_string().contains("text"));
    assert!(transport.requests().is_empty());
}

#[tokio::test]
async fn identity_is_resolved_once() {
    let transport = Arc::new(ScriptedTransport::new());
    transport.identity("abc123");
    transport.on(HttpMethod::Post, "/rest/posts", created("urn:li:share:1"));
    transport.on(HttpMethod::Post, "/rest/posts", created("urn:li:share:2"));
    let api = scripted_api(&transport);

    api.posts().create_post("one", PostVisibility::Public, None).await.unwrap();
    api.posts().create_post("two", PostVisibility::Public, None).await.unwrap();

    assert_eq!(transport.count(HttpMethod::Get, "/v2/userinfo"), 1);
}

#[tokio::test]
async fn authentication_failure_drops_cached_identity() {
    let transport = Arc::new(ScriptedTransport::new());
    transport.identity("abc123");
    transport.json(HttpMethod::Post, "/rest/posts", 401, json!({"message": "expired"}));
    transport.on(HttpMethod::Post, "/rest/posts", created("urn:li:share:2"));
    let api = scripted_api(&transport);

    let err = api
        .posts()
        .create_post("one", PostVisibility::Public, None)
        .await
        .unwrap_err();
    assert_eq!(err.kind().name(), "AuthenticationError");

    api.posts().create_post("two", PostVisibility::Public, None).await.unwrap();
    assert_eq!(transport.count(HttpMethod::Get, "/v2/userinfo"), 2);
}

#[tokio::test]
async fn token_refresh_re_resolves_identity() {
    let transport = Arc::new(ScriptedTransport::new());
    transport.identity("abc123");
    transport.on(HttpMethod::Post, "/rest/posts", created("urn:li:share:1"));
    let api = scripted_api(&transport);

    api.posts().create_post("one", PostVisibility::Public, None).await.unwrap();
    api.client().credentials().refresh_access_token("AQX-rotated");
    api.posts().create_post("two", PostVisibility::Public, None).await.unwrap();

    assert_eq!(transport.count(HttpMethod::Get, "/v2/userinfo"), 2);
    let last = transport.requests().pop().expect("request");
    assert_eq!(last.header_value("Authorization"), Some("Bearer AQX-rotated"));
}

#[tokio::test]
async fn cookie_refresh_keeps_cached_identity() {
    let transport = Arc::new(ScriptedTransport::new());
    transport.identity("abc123");
    transport.on(HttpMethod::Post, "/rest/posts", created("urn:li:share:1"));
    let api = scripted_api(&transport);

    api.posts().create_post("one", PostVisibility::Public, None).await.unwrap();
    api.client()
        .credentials()
        .refresh_session_cookie("AQEDAR-rotated")
        .unwrap();
    api.posts().create_post("two", PostVisibility::Public, None).await.unwrap();

    assert_eq!(transport.count(HttpMethod::Get, "/v2/userinfo"), 1);
}

#[tokio::test]
async fn identity_falls_back_to_me() {
    let transport = Arc::new(ScriptedTransport::new());
    transport.json(HttpMethod::Get, "/v2/userinfo", 403, json!({"message": "scope"}));
    transport.json(
        HttpMethod::Get,
        "/rest/me",
        200,
        json!({"id": "xyz", "localizedFirstName": "Grace", "localizedLastName": "Hopper"}),
    );
    let api = scripted_api(&transport);

    let me = api.identity().current().await.expect("identity");
    assert_eq!(me.urn().as_str(), "urn:li:person:xyz");
    assert_eq!(me.display_name(), "Grace Hopper");
}

#[tokio::test]
async fn delete_twice_reports_not_found() {
    let transport = Arc::new(ScriptedTransport::new());
    transport.status(HttpMethod::Delete, "/rest/posts/", 204);
    transport.json(
        HttpMethod::Delete,
        "/rest/posts/",
        404,
        json!({"message": "Not found", "status": 404}),
    );
    let api = scripted_api(&transport);
    let urn = Urn::parse("urn:li:share:7001").unwrap();

    api.posts().delete_post(&urn).await.expect("first delete");
    let err = api.posts().delete_post(&urn).await.unwrap_err();

    assert_eq!(err.kind().name(), "NotFoundError");
    let deletes = transport.requests();
    assert!(deletes[0].url().ends_with("/rest/posts/urn%3Ali%3Ashare%3A7001"));
}

#[tokio::test]
async fn update_replaces_commentary() {
    let transport = Arc::new(ScriptedTransport::new());
    transport.status(HttpMethod::Patch, "/rest/posts/", 204);
    transport.json(
        HttpMethod::Get,
        "/rest/posts/",
        200,
        json!({
            "id": "urn:li:share:7001",
            "author": "urn:li:person:abc123",
            "commentary": "edited",
            "visibility": "CONNECTIONS",
            "createdAt": 1_700_000_000_000_i64
        }),
    );
    let api = scripted_api(&transport);
    let urn = Urn::parse("urn:li:share:7001").unwrap();

    let post = api.posts().update_post(&urn, "edited").await.expect("update");

    assert_eq!(post.text(), "edited");
    assert_eq!(*post.visibility(), PostVisibility::Connections);
    let patch = transport
        .requests()
        .into_iter()
        .find(|r| *r.method() == HttpMethod::Patch)
        .expect("patch");
    assert_eq!(
        patch.body(),
        &RequestBody::Json(json!({"patch": {"$set": {"commentary": "edited"}}}))
    );
}

#[tokio::test]
async fn update_survives_failed_read_back() {
    let transport = Arc::new(ScriptedTransport::new());
    transport.identity("abc123");
    transport.status(HttpMethod::Patch, "/rest/posts/", 204);
    transport.json(HttpMethod::Get, "/rest/posts/", 500, json!({"message": "internal"}));
    let api = scripted_api(&transport);
    let urn = Urn::parse("urn:li:share:7001").unwrap();

    let post = api.posts().update_post(&urn, "edited").await.expect("update");

    assert_eq!(post.text(), "edited");
    assert_eq!(post.urn(), &urn);
    assert_eq!(post.author_urn().as_str(), "urn:li:person:abc123");
    assert_eq!(transport.count(HttpMethod::Patch, "/rest/posts/"), 1);
}

#[tokio::test]
async fn update_survives_undecodable_read_back() {
    let transport = Arc::new(ScriptedTransport::new());
    transport.identity("abc123");
    transport.status(HttpMethod::Patch, "/rest/posts/", 204);
    transport.json(HttpMethod::Get, "/rest/posts/", 200, json!({"unexpected": true}));
    let api = scripted_api(&transport);
    let urn = Urn::parse("urn:li:share:7001").unwrap();

    let post = api.posts().update_post(&urn, "edited").await.expect("update");

    assert_eq!(post.text(), "edited");
    assert!(post.media_urn().is_none());
}

#[tokio::test]
async fn write_is_not_repeated_after_response_started() {
    let transport = Arc::new(ScriptedTransport::new());
    transport.identity("abc123");
    transport.on(
        HttpMethod::Post,
        "/rest/posts",
        Err(TransportError::AfterResponse("connection reset".into())),
    );
    let api = scripted_api(&transport);

    let err = api
        .posts()
        .create_post("hi", PostVisibility::Public, None)
        .await
        .unwrap_err();

    assert_eq!(err.kind().name(), "UpstreamError");
    assert_eq!(transport.count(HttpMethod::Post, "/rest/posts"), 1);
}

#[tokio::test]
async fn write_is_repeated_once_before_response() {
    let transport = Arc::new(ScriptedTransport::new());
    transport.identity("abc123");
    transport.on(
        HttpMethod::Post,
        "/rest/posts",
        Err(TransportError::BeforeResponse("connect refused".into())),
    );
    transport.on(HttpMethod::Post, "/rest/posts", created("urn:li:share:9"));
    let api = scripted_api(&transport);

    let post = api
        .posts()
        .create_post("hi", PostVisibility::Public, None)
        .await
        .expect("second attempt succeeds");
    assert_eq!(post.urn().as_str(), "urn:li:share:9");
    assert_eq!(transport.count(HttpMethod::Post, "/rest/posts"), 2);
}

#[tokio::test]
async fn read_retries_network_failure() {
    let transport = Arc::new(ScriptedTransport::new());
    transport.on(
        HttpMethod::Get,
        "/v2/userinfo",
        Err(TransportError::BeforeResponse("dns".into())),
    );
    transport.identity("abc123");
    let api = scripted_api(&transport);

    let me = api.identity().current().await.expect("identity");
    assert_eq!(me.urn().id(), "abc123");
    assert_eq!(transport.count(HttpMethod::Get, "/v2/userinfo"), 2);
}
