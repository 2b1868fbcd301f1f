//! Post lifecycle: create, update, delete.

use crate::{ApiClient, HttpMethod, IdentityResolver, MediaUploader, encode_urn};
use chrono::{DateTime, TimeZone, Utc};
use linkedin_core::{PostRecord, PostVisibility, Urn, validate_post_text};
use linkedin_error::{LinkedInError, LinkedInErrorKind, LinkedInResult};
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PostView {
    id: Option<String>,
    author: String,
    #[serde(default)]
    commentary: String,
    visibility: Option<String>,
    created_at: Option<i64>,
    content: Option<Value>,
}

impl PostView {
    fn into_record(self, urn: Urn) -> LinkedInResult<PostRecord> {
        let media_urn = self
            .content
            .as_ref()
            .and_then(|c| c.pointer("/media/id"))
            .and_then(Value::as_str)
            .map(Urn::parse)
            .transpose()?;
        let visibility = self
            .visibility
            .as_deref()
            .and_then(|v| v.parse::<PostVisibility>().ok())
            .unwrap_or_default();
        let created_at = self
            .created_at
            .and_then(|ms| Utc.timestamp_millis_opt(ms).single())
            .unwrap_or_else(Utc::now);
        let urn = match self.id {
            Some(id) => Urn::parse(id)?,
            None => urn,
        };
        build_record(
            urn,
            Urn::parse(self.author)?,
            self.commentary,
            visibility,
            media_urn,
            created_at,
        )
    }
}

fn build_record(
    urn: Urn,
    author_urn: Urn,
    text: String,
    visibility: PostVisibility,
    media_urn: Option<Urn>,
    created_at: DateTime<Utc>,
) -> LinkedInResult<PostRecord> {
    PostRecord::builder()
        .urn(urn)
        .author_urn(author_urn)
        .text(text)
        .visibility(visibility)
        .media_urn(media_urn)
        .created_at(created_at)
        .build()
        .map_err(|e| LinkedInError::invalid_response(format!("incomplete post record: {e}")))
}

/// Sequences the multi-step post writes.
///
/// The author URN comes from the cached identity. An authentication
/// failure on a write drops that cache so the next call re-resolves it
/// against whatever token is then configured.
#[derive(Debug)]
pub struct PostLifecycleController {
    client: Arc<ApiClient>,
    identity: Arc<IdentityResolver>,
    media: Arc<MediaUploader>,
}

impl PostLifecycleController {
    /// Creates a controller.
    pub fn new(
        client: Arc<ApiClient>,
        identity: Arc<IdentityResolver>,
        media: Arc<MediaUploader>,
    ) -> Self {
        Self {
            client,
            identity,
            media,
        }
    }

    /// Creates a post, uploading `image_url` first when given.
    ///
    /// Text length is checked before any request is made.
    #[instrument(skip(self, text), fields(chars = text.chars().count()))]
    pub async fn create_post(
        &self,
        text: &str,
        visibility: PostVisibility,
        image_url: Option<&str>,
    ) -> LinkedInResult<PostRecord> {
        validate_post_text(text)?;

        let media_urn = match image_url {
            Some(url) => Some(self.media.upload_image(url).await?.urn().clone()),
            None => None,
        };

        let author = self.identity.current().await?;
        let mut body = json!({
            "author": author.urn(),
            "commentary": text,
            "visibility": visibility.to_string(),
            "distribution": {
                "feedDistribution": "MAIN_FEED",
                "targetEntities": [],
                "thirdPartyDistributionChannels": []
            },
            "lifecycleState": "PUBLISHED",
            "isReshareDisabledByAuthor": false
        });
        if let Some(media) = &media_urn {
            body["content"] = json!({ "media": { "id": media } });
        }

        let response = self
            .guard_identity(self.client.send(HttpMethod::Post, "/posts", Some(body), &[]).await)
            .await?;
        let id = response
            .restli_id()
            .map(str::to_string)
            .or_else(|| {
                response
                    .body()
                    .and_then(|b| b.get("id"))
                    .and_then(Value::as_str)
                    .map(str::to_string)
            })
            .ok_or_else(|| LinkedInError::invalid_response("post created without an id"))?;
        let urn = Urn::parse(id)?;
        info!(%urn, "Post created");

        build_record(
            urn,
            author.urn().clone(),
            text.to_string(),
            visibility,
            media_urn,
            Utc::now(),
        )
    }

    /// Replaces a post's text. Media cannot be changed.
    ///
    /// The post is read back after the edit. If that read fails the edit
    /// still stands, and the returned record carries the submitted text with
    /// default visibility, no media and the current time.
    #[instrument(skip(self, text))]
    pub async fn update_post(&self, post_urn: &Urn, text: &str) -> LinkedInResult<PostRecord> {
        validate_post_text(text)?;
        let path = format!("/posts/{}", encode_urn(post_urn));
        let patch = json!({ "patch": { "$set": { "commentary": text } } });
        self.guard_identity(self.client.send(HttpMethod::Patch, &path, Some(patch), &[]).await)
            .await?;
        info!(%post_urn, "Post updated");

        let read_back = self
            .client
            .send(HttpMethod::Get, &path, None, &[])
            .await
            .and_then(|response| response.decode::<PostView>())
            .and_then(|view| view.into_record(post_urn.clone()));
        let mut record = match read_back {
            Ok(record) => record,
            Err(e) => {
                warn!(error = %e.kind(), "Post read-back failed, using submitted text");
                let author = self.identity.current().await?;
                return build_record(
                    post_urn.clone(),
                    author.urn().clone(),
                    text.to_string(),
                    PostVisibility::default(),
                    None,
                    Utc::now(),
                );
            }
        };
        if record.text() != text {
            debug!("Platform returned stale commentary, using submitted text");
            record = build_record(
                record.urn().clone(),
                record.author_urn().clone(),
                text.to_string(),
                *record.visibility(),
                record.media_urn().clone(),
                *record.created_at(),
            )?;
        }
        Ok(record)
    }

    /// Deletes a post. A second delete reports `NotFoundError`.
    #[instrument(skip(self))]
    pub async fn delete_post(&self, post_urn: &Urn) -> LinkedInResult<()> {
        let path = format!("/posts/{}", encode_urn(post_urn));
        self.guard_identity(self.client.send(HttpMethod::Delete, &path, None, &[]).await)
            .await?;
        info!(%post_urn, "Post deleted");
        Ok(())
    }

    async fn guard_identity<T>(&self, result: LinkedInResult<T>) -> LinkedInResult<T> {
        if let Err(err) = &result {
            if matches!(err.kind(), LinkedInErrorKind::Authentication { .. }) {
                self.identity.invalidate().await;
            }
        }
        result
    }
}
