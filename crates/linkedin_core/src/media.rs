//! Image assets.

use crate::Urn;
use serde::{Deserialize, Serialize};

/// Largest image the platform accepts, in bytes.
pub const MAX_IMAGE_BYTES: u64 = 5 * 1024 * 1024;

/// Processing status of an uploaded asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum MediaStatus {
    /// Registered or uploaded, not yet usable in a post
    Pending,
    /// Usable in a post
    Available,
    /// Processing failed on the platform
    Failed,
}

impl MediaStatus {
    /// Maps the platform's status string.
    pub fn from_platform(status: &str) -> Self {
        match status {
            "AVAILABLE" => Self::Available,
            "PROCESSING_FAILED" | "FAILED" => Self::Failed,
            _ => Self::Pending,
        }
    }
}

/// Image formats accepted for upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ImageMime {
    /// `image/jpeg`
    Jpeg,
    /// `image/png`
    Png,
    /// `image/gif`
    Gif,
}

impl ImageMime {
    /// Detects the format from the leading magic bytes.
    ///
    /// ```
    /// use linkedin_core::ImageMime;
    ///
    /// assert_eq!(ImageMime::sniff(b"\x89PNG\r\n\x1a\n...."), Some(ImageMime::Png));
    /// assert_eq!(ImageMime::sniff(b"<html>"), None);
    /// ```
    pub fn sniff(bytes: &[u8]) -> Option<Self> {
        if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
            Some(Self::Jpeg)
        } else if bytes.starts_with(b"\x89PNG\r\n\x1a\n") {
            Some(Self::Png)
        } else if bytes.starts_with(b"GIF87a") || bytes.starts_with(b"GIF89a") {
            Some(Self::Gif)
        } else {
            None
        }
    }

    /// Parses a `Content-Type` header value, ignoring parameters.
    pub fn from_content_type(value: &str) -> Option<Self> {
        let essence = value.split(';').next().unwrap_or("").trim();
        match essence.to_ascii_lowercase().as_str() {
            "image/jpeg" | "image/jpg" => Some(Self::Jpeg),
            "image/png" => Some(Self::Png),
            "image/gif" => Some(Self::Gif),
            _ => None,
        }
    }

    /// The MIME string.
    pub fn as_mime_str(&self) -> &'static str {
        match self {
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
            Self::Gif => "image/gif",
        }
    }
}

/// An image registered with the platform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, derive_getters::Getters)]
pub struct MediaAsset {
    /// Asset URN (`urn:li:image:...`)
    urn: Urn,
    /// Uploaded size, when known
    size_bytes: Option<u64>,
    /// Detected format, when known
    mime_type: Option<ImageMime>,
    /// Processing status
    status: MediaStatus,
    /// Platform download URL once available
    download_url: Option<String>,
}

impl MediaAsset {
    /// Creates a freshly registered asset.
    pub fn pending(urn: Urn) -> Self {
        Self {
            urn,
            size_bytes: None,
            mime_type: None,
            status: MediaStatus::Pending,
            download_url: None,
        }
    }

    /// Records the uploaded payload.
    pub fn with_upload(mut self, size_bytes: u64, mime_type: Option<ImageMime>) -> Self {
        self.size_bytes = Some(size_bytes);
        self.mime_type = mime_type;
        self
    }

    /// Records a status poll.
    pub fn with_status(mut self, status: MediaStatus, download_url: Option<String>) -> Self {
        self.status = status;
        if download_url.is_some() {
            self.download_url = download_url;
        }
        self
    }

    /// True once the asset may be attached to a post.
    pub fn is_available(&self) -> bool {
        self.status == MediaStatus::Available
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn platform_status_mapping() {
        assert_eq!(MediaStatus::from_platform("AVAILABLE"), MediaStatus::Available);
        assert_eq!(
            MediaStatus::from_platform("PROCESSING_FAILED"),
            MediaStatus::Failed
        );
        assert_eq!(MediaStatus::from_platform("PROCESSING"), MediaStatus::Pending);
        assert_eq!(
            MediaStatus::from_platform("WAITING_UPLOAD"),
            MediaStatus::Pending
        );
    }

    #[test]
    fn sniffs_jpeg_and_gif() {
        assert_eq!(ImageMime::sniff(&[0xFF, 0xD8, 0xFF, 0xE0]), Some(ImageMime::Jpeg));
        assert_eq!(ImageMime::sniff(b"GIF89a\x01\x00"), Some(ImageMime::Gif));
    }

    #[test]
    fn content_type_with_charset() {
        assert_eq!(
            ImageMime::from_content_type("image/PNG; charset=binary"),
            Some(ImageMime::Png)
        );
        assert_eq!(ImageMime::from_content_type("text/html"), None);
    }

    #[test]
    fn asset_lifecycle() {
        let asset = MediaAsset::pending(Urn::parse("urn:li:image:C4E").unwrap())
            .with_upload(1024, Some(ImageMime::Png));
        assert!(!asset.is_available());
        let asset = asset.with_status(
            MediaStatus::Available,
            Some("https://media.licdn.com/x".into()),
        );
        assert!(asset.is_available());
        assert_eq!(*asset.size_bytes(), Some(1024));
    }
}
