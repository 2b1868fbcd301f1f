//! Image upload and status polling.

use crate::{ApiClient, HttpMethod, IdentityResolver, encode_urn};
use linkedin_core::{ImageMime, MediaAsset, MediaSettings, MediaStatus, Urn};
use linkedin_error::{LinkedInError, LinkedInErrorKind, LinkedInResult};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct InitializeUploadResponse {
    value: InitializeUploadValue,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct InitializeUploadValue {
    upload_url: String,
    image: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ImageView {
    status: Option<String>,
    download_url: Option<String>,
}

/// Uploads images and tracks them until usable.
#[derive(Debug)]
pub struct MediaUploader {
    client: Arc<ApiClient>,
    identity: Arc<IdentityResolver>,
    settings: MediaSettings,
}

impl MediaUploader {
    /// Creates an uploader.
    pub fn new(
        client: Arc<ApiClient>,
        identity: Arc<IdentityResolver>,
        settings: MediaSettings,
    ) -> Self {
        Self {
            client,
            identity,
            settings,
        }
    }

    /// Downloads `image_url`, registers it with the platform, pushes the
    /// bytes and waits until the asset is available.
    ///
    /// The size limit is checked while downloading, before anything is
    /// registered, so an oversized source never reaches the platform.
    #[instrument(skip(self))]
    pub async fn upload_image(&self, image_url: &str) -> LinkedInResult<MediaAsset> {
        let source = url::Url::parse(image_url)
            .ok()
            .filter(|u| matches!(u.scheme(), "http" | "https"))
            .ok_or_else(|| {
                LinkedInError::validation("image_url", format!("'{image_url}' is not an http(s) URL"))
            })?;

        let limit = *self.settings.max_image_bytes();
        let response = self.client.download(source.as_str(), limit).await?;
        if !response.is_success() {
            return Err(LinkedInError::new(LinkedInErrorKind::Validation {
                field: Some("image_url".to_string()),
                status: Some(response.status()),
                message: format!("image download returned HTTP {}", response.status()),
            }));
        }
        let mime = ImageMime::sniff(response.body())
            .or_else(|| response.header("content-type").and_then(ImageMime::from_content_type))
            .ok_or_else(|| {
                LinkedInError::validation("image_url", "source is not a JPEG, PNG or GIF image")
            })?;
        let bytes = response.into_body();
        let size = bytes.len() as u64;
        debug!(size, mime = mime.as_mime_str(), "Image downloaded");

        let owner = self.identity.current().await?;
        let registered = self
            .client
            .send(
                HttpMethod::Post,
                "/images",
                Some(json!({ "initializeUploadRequest": { "owner": owner.urn() } })),
                &[("action", "initializeUpload")],
            )
            .await?
            .decode::<InitializeUploadResponse>()?;
        let urn = Urn::parse(&registered.value.image)?;
        info!(%urn, "Image upload registered");

        self.client
            .upload(&registered.value.upload_url, mime.as_mime_str(), bytes)
            .await?;

        let asset = self.wait_until_available(&urn).await?;
        Ok(asset.with_upload(size, Some(mime)))
    }

    /// Current platform view of an image.
    #[instrument(skip(self))]
    pub async fn get_image(&self, urn: &Urn) -> LinkedInResult<MediaAsset> {
        if urn.entity_type() != "image" {
            return Err(LinkedInError::validation(
                "image_urn",
                format!("{urn} is not an image URN"),
            ));
        }
        let view = self
            .client
            .send(HttpMethod::Get, &format!("/images/{}", encode_urn(urn)), None, &[])
            .await?
            .decode::<ImageView>()?;
        let status = view
            .status
            .as_deref()
            .map(MediaStatus::from_platform)
            .unwrap_or(MediaStatus::Pending);
        Ok(MediaAsset::pending(urn.clone()).with_status(status, view.download_url))
    }

    /// Polls until the asset is available, failed, or the poll bound runs
    /// out.
    pub async fn wait_until_available(&self, urn: &Urn) -> LinkedInResult<MediaAsset> {
        let attempts = (*self.settings.poll_attempts()).max(1);
        for attempt in 1..=attempts {
            let asset = self.get_image(urn).await?;
            match asset.status() {
                MediaStatus::Available => {
                    info!(%urn, attempt, "Image available");
                    return Ok(asset);
                }
                MediaStatus::Failed => {
                    warn!(%urn, "Image processing failed");
                    return Err(LinkedInError::new(LinkedInErrorKind::Upstream {
                        status: None,
                        message: format!("processing failed for {urn}"),
                    }));
                }
                MediaStatus::Pending => {
                    debug!(%urn, attempt, "Image still processing");
                    if attempt < attempts {
                        tokio::time::sleep(self.settings.poll_interval()).await;
                    }
                }
            }
        }
        Err(LinkedInError::new(LinkedInErrorKind::MediaTimeout {
            media_urn: urn.to_string(),
            attempts,
        }))
    }
}
