//! Image uploads and reactions against a scripted platform.

mod test_utils;

use linkedin_api::testing::ScriptedTransport;
use linkedin_api::{HttpMethod, HttpResponse, RequestBody, TransportError};
use linkedin_core::{MediaStatus, PostVisibility, ReactionType, Urn};
use linkedin_error::LinkedInErrorKind;
use serde_json::json;
use std::sync::Arc;
use test_utils::{png_bytes, scripted_api};

const IMAGE_URL: &str = "https://img.example.com/cat.png";

fn script_registration(transport: &ScriptedTransport) {
    transport.identity("abc123");
    transport.json(
        HttpMethod::Post,
        "/rest/images",
        200,
        json!({"value": {
            "uploadUrl": "https://upload.example.com/u/1",
            "image": "urn:li:image:C4D"
        }}),
    );
    transport.status(HttpMethod::Put, "upload.example.com", 201);
}

fn script_download(transport: &ScriptedTransport, len: usize) {
    transport.on(
        HttpMethod::Get,
        "img.example.com",
        Ok(HttpResponse::new(
            200,
            vec![("content-type".into(), "application/octet-stream".into())],
            png_bytes(len),
        )),
    );
}

#[tokio::test]
async fn upload_polls_until_available() {
    let transport = Arc::new(ScriptedTransport::new());
    script_download(&transport, 2048);
    script_registration(&transport);
    transport.json(HttpMethod::Get, "/rest/images/", 200, json!({"status": "PROCESSING"}));
    transport.json(
        HttpMethod::Get,
        "/rest/images/",
        200,
        json!({"status": "AVAILABLE", "downloadUrl": "https://media.example.com/c4d"}),
    );
    let api = scripted_api(&transport);

    let asset = api.media().upload_image(IMAGE_URL).await.expect("upload");

    assert_eq!(asset.urn().as_str(), "urn:li:image:C4D");
    assert_eq!(*asset.status(), MediaStatus::Available);
    assert_eq!(*asset.size_bytes(), Some(2048));
    assert_eq!(transport.count(HttpMethod::Get, "/rest/images/"), 2);

    let put = transport
        .requests()
        .into_iter()
        .find(|r| *r.method() == HttpMethod::Put)
        .expect("byte push");
    match put.body() {
        RequestBody::Bytes { content_type, data } => {
            assert_eq!(content_type, "image/png");
            assert_eq!(data.len(), 2048);
        }
        other => panic!("unexpected body {other:?}"),
    }
    assert!(put.header_value("Authorization").is_some());

    let download = &transport.requests()[0];
    assert!(download.header_value("Authorization").is_none());
}

#[tokio::test]
async fn oversized_image_is_never_registered() {
    let transport = Arc::new(ScriptedTransport::new());
    transport.on(
        HttpMethod::Get,
        "img.example.com",
        Err(TransportError::BodyTooLarge {
            limit: 5 * 1024 * 1024,
            received: 6 * 1024 * 1024,
        }),
    );
    script_registration(&transport);
    let api = scripted_api(&transport);

    let err = api.media().upload_image(IMAGE_URL).await.unwrap_err();

    assert_eq!(err.kind().name(), "PayloadTooLargeError");
    assert_eq!(transport.count(HttpMethod::Post, "/rest/images"), 0);
    assert_eq!(transport.count(HttpMethod::Put, "upload.example.com"), 0);
    assert_eq!(transport.count(HttpMethod::Get, "img.example.com"), 1);
}

#[tokio::test]
async fn processing_that_never_finishes_times_out() {
    let transport = Arc::new(ScriptedTransport::new());
    script_download(&transport, 64);
    script_registration(&transport);
    transport.json(HttpMethod::Get, "/rest/images/", 200, json!({"status": "PROCESSING"}));
    let api = scripted_api(&transport);

    let err = api.media().upload_image(IMAGE_URL).await.unwrap_err();

    match err.kind() {
        LinkedInErrorKind::MediaTimeout { media_urn, attempts } => {
            assert_eq!(media_urn, "urn:li:image:C4D");
            assert_eq!(*attempts, 3);
        }
        other => panic!("unexpected {other:?}"),
    }
    assert_eq!(transport.count(HttpMethod::Get, "/rest/images/"), 3);
}

#[tokio::test]
async fn failed_processing_aborts_post_creation() {
    let transport = Arc::new(ScriptedTransport::new());
    script_download(&transport, 64);
    script_registration(&transport);
    transport.json(HttpMethod::Get, "/rest/images/", 200, json!({"status": "PROCESSING_FAILED"}));
    let api = scripted_api(&transport);

    let err = api
        .posts()
        .create_post("with picture", PostVisibility::Public, Some(IMAGE_URL))
        .await
        .unwrap_err();

    assert_eq!(err.kind().name(), "UpstreamError");
    assert_eq!(transport.count(HttpMethod::Post, "/rest/posts"), 0);
}

#[tokio::test]
async fn post_with_image_references_media() {
    let transport = Arc::new(ScriptedTransport::new());
    script_download(&transport, 64);
    script_registration(&transport);
    transport.json(HttpMethod::Get, "/rest/images/", 200, json!({"status": "AVAILABLE"}));
    transport.on(
        HttpMethod::Post,
        "/rest/posts",
        Ok(HttpResponse::empty(201).with_header("x-restli-id", "urn:li:share:55")),
    );
    let api = scripted_api(&transport);

    let post = api
        .posts()
        .create_post("with picture", PostVisibility::Public, Some(IMAGE_URL))
        .await
        .expect("create");

    assert_eq!(post.media_urn().as_ref().map(Urn::as_str), Some("urn:li:image:C4D"));
    let create = transport
        .requests()
        .into_iter()
        .find(|r| *r.method() == HttpMethod::Post && r.url().ends_with("/rest/posts"))
        .expect("create");
    let RequestBody::Json(body) = create.body() else {
        panic!("expected JSON");
    };
    assert_eq!(body["content"]["media"]["id"], "urn:li:image:C4D");
}

#[tokio::test]
async fn non_image_source_is_rejected() {
    let transport = Arc::new(ScriptedTransport::new());
    transport.on(
        HttpMethod::Get,
        "img.example.com",
        Ok(HttpResponse::new(
            200,
            vec![("content-type".into(), "text/html".into())],
            b"<html></html>".to_vec(),
        )),
    );
    let api = scripted_api(&transport);

    let err = api.media().upload_image(IMAGE_URL).await.unwrap_err();
    assert_eq!(err.kind().name(), "ValidationError");
    assert_eq!(transport.requests().len(), 1);
}

#[tokio::test]
async fn second_reaction_replaces_first() {
    let transport = Arc::new(ScriptedTransport::new());
    transport.identity("abc123");
    transport.status(HttpMethod::Post, "/rest/reactions", 201);
    transport.json(HttpMethod::Post, "/rest/reactions", 409, json!({"message": "exists"}));
    transport.status(HttpMethod::Post, "/rest/reactions", 201);
    transport.status(HttpMethod::Delete, "/rest/reactions/", 204);
    transport.json(
        HttpMethod::Get,
        "/rest/reactions?q=entity",
        200,
        json!({"elements": [
            {"reactionType": "PRAISE", "created": {"actor": "urn:li:person:abc123"}}
        ]}),
    );
    let api = scripted_api(&transport);
    let post = Urn::parse("urn:li:share:7001").unwrap();

    let first = api.reactions().add_reaction(&post, ReactionType::Like).await.unwrap();
    let second = api.reactions().add_reaction(&post, ReactionType::Praise).await.unwrap();

    assert_eq!(*first.reaction_type(), ReactionType::Like);
    assert_eq!(*second.reaction_type(), ReactionType::Praise);
    assert_eq!(transport.count(HttpMethod::Delete, "/rest/reactions/"), 1);

    let summary = api.reactions().get_reactions(&post).await.unwrap();
    assert_eq!(*summary.total(), 1);
    assert_eq!(summary.count(ReactionType::Praise), 1);
    assert_eq!(summary.count(ReactionType::Like), 0);
}

#[tokio::test]
async fn failed_replacement_reports_second_apply_error() {
    let transport = Arc::new(ScriptedTransport::new());
    transport.identity("abc123");
    transport.json(HttpMethod::Post, "/rest/reactions", 409, json!({"message": "exists"}));
    transport.json(HttpMethod::Post, "/rest/reactions", 422, json!({"message": "rejected"}));
    transport.status(HttpMethod::Delete, "/rest/reactions/", 204);
    let api = scripted_api(&transport);
    let post = Urn::parse("urn:li:share:7001").unwrap();

    let err = api
        .reactions()
        .add_reaction(&post, ReactionType::Praise)
        .await
        .unwrap_err();

    assert_eq!(err.kind().name(), "ValidationError");
    assert_eq!(err.kind().status(), Some(422));
    assert_eq!(transport.count(HttpMethod::Delete, "/rest/reactions/"), 1);
    assert_eq!(transport.count(HttpMethod::Post, "/rest/reactions"), 2);
}

#[tokio::test]
async fn remove_reaction_addresses_compound_key() {
    let transport = Arc::new(ScriptedTransport::new());
    transport.identity("abc123");
    transport.status(HttpMethod::Delete, "/rest/reactions/", 204);
    let api = scripted_api(&transport);
    let post = Urn::parse("urn:li:activity:99").unwrap();

    api.reactions().remove_reaction(&post).await.expect("remove");

    let delete = transport.requests().pop().expect("delete");
    assert!(delete.url().ends_with(
        "/rest/reactions/(actor:urn%3Ali%3Aperson%3Aabc123,entity:urn%3Ali%3Aactivity%3A99)"
    ));
}
