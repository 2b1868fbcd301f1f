//! Post records and local post validation.

use crate::Urn;
use chrono::{DateTime, Utc};
use linkedin_error::{LinkedInError, LinkedInResult};
use serde::{Deserialize, Serialize};

/// Maximum commentary length accepted by the platform, in characters.
pub const MAX_POST_CHARS: usize = 3000;

/// Checks post text against the platform's length limit.
///
/// Length is counted in Unicode scalar values. Empty text is accepted here;
/// the platform decides whether an empty post is allowed.
///
/// # Examples
///
/// ```
/// use linkedin_core::{validate_post_text, MAX_POST_CHARS};
///
/// assert!(validate_post_text(&"a".repeat(MAX_POST_CHARS)).is_ok());
/// assert!(validate_post_text(&"a".repeat(MAX_POST_CHARS + 1)).is_err());
/// ```
#[track_caller]
pub fn validate_post_text(text: &str) -> LinkedInResult<()> {
    let count = text.chars().count();
    if count > MAX_POST_CHARS {
        return Err(LinkedInError::validation(
            "text",
            format!("{count} characters exceeds the {MAX_POST_CHARS} character limit"),
        ));
    }
    Ok(())
}

/// Who can see a post.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum PostVisibility {
    /// Anyone on or off the platform
    #[default]
    Public,
    /// First-degree connections only
    Connections,
}

/// A post created or tracked by this layer.
///
/// # Examples
///
/// ```
/// use linkedin_core::{PostRecord, PostVisibility, Urn};
///
/// let post = PostRecord::builder()
///     .urn(Urn::parse("urn:li:share:1").unwrap())
///     .author_urn(Urn::person("abc"))
///     .text("Hello".to_string())
///     .visibility(PostVisibility::Public)
///     .media_urn(None)
///     .created_at(chrono::Utc::now())
///     .build()
///     .unwrap();
/// assert_eq!(post.urn().entity_type(), "share");
/// ```
#[derive(
    Debug,
    Clone,
    PartialEq,
    Serialize,
    Deserialize,
    derive_getters::Getters,
    derive_builder::Builder,
)]
pub struct PostRecord {
    /// Platform-assigned URN
    urn: Urn,
    /// Author's person URN
    author_urn: Urn,
    /// Commentary text
    text: String,
    /// Visibility
    visibility: PostVisibility,
    /// Attached image, if any
    media_urn: Option<Urn>,
    /// Local creation time
    created_at: DateTime<Utc>,
}

impl PostRecord {
    /// Returns a builder for constructing a PostRecord.
    pub fn builder() -> PostRecordBuilder {
        PostRecordBuilder::default()
    }
}
