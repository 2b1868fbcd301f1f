//! Platform resource identifiers.

use linkedin_error::{LinkedInError, LinkedInResult};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

const URN_PREFIX: &str = "urn:li:";

static EMBEDDED_URN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"urn:li:(activity|share|ugcPost):(\d+)").expect("static regex")
});

static SLUG_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-(activity|share|ugcPost)-(\d+)").expect("static regex"));

/// A LinkedIn URN such as `urn:li:share:7012345` or `urn:li:person:abc`.
///
/// # Examples
///
/// ```
/// use linkedin_core::Urn;
///
/// let urn = Urn::parse("urn:li:share:7012345").unwrap();
/// assert_eq!(urn.entity_type(), "share");
/// assert_eq!(urn.id(), "7012345");
/// assert!(Urn::parse("share:7012345").is_err());
/// ```
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, derive_more::Display,
)]
#[serde(try_from = "String", into = "String")]
pub struct Urn(String);

impl Urn {
    /// Parses and validates a URN.
    #[track_caller]
    pub fn parse(raw: impl AsRef<str>) -> LinkedInResult<Self> {
        let raw = raw.as_ref().trim();
        let Some(rest) = raw.strip_prefix(URN_PREFIX) else {
            return Err(LinkedInError::validation(
                "urn",
                format!("'{raw}' does not start with '{URN_PREFIX}'"),
            ));
        };
        match rest.split_once(':') {
            Some((entity, id)) if !entity.is_empty() && !id.is_empty() => {
                Ok(Self(raw.to_string()))
            }
            _ => Err(LinkedInError::validation(
                "urn",
                format!("'{raw}' is missing an entity type or id"),
            )),
        }
    }

    /// URN for a member, from the OpenID `sub` or `/me` id.
    pub fn person(id: impl AsRef<str>) -> Self {
        Self(format!("{URN_PREFIX}person:{}", id.as_ref()))
    }

    /// Entity type segment (`share`, `person`, `image`, ...).
    pub fn entity_type(&self) -> &str {
        self.rest().split_once(':').map(|(e, _)| e).unwrap_or("")
    }

    /// Id segment after the entity type.
    pub fn id(&self) -> &str {
        self.rest().split_once(':').map(|(_, id)| id).unwrap_or("")
    }

    /// The full URN string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Extracts the post URN from a post page URL.
    ///
    /// Accepts feed URLs with an embedded (possibly percent-encoded) URN and
    /// share URLs whose slug ends in `-activity-<id>-<suffix>`. Query strings
    /// are ignored.
    ///
    /// ```
    /// use linkedin_core::Urn;
    ///
    /// let url = "https://www.linkedin.com/posts/jane_rust-activity-7394701839126016000-3V9W?utm_source=share";
    /// assert_eq!(
    ///     Urn::from_post_url(url).unwrap().as_str(),
    ///     "urn:li:activity:7394701839126016000"
    /// );
    /// ```
    pub fn from_post_url(url: &str) -> Option<Self> {
        let path = url.split(['?', '#']).next().unwrap_or(url);
        let decoded = path.replace("%3A", ":").replace("%3a", ":");

        if let Some(caps) = EMBEDDED_URN.captures(&decoded) {
            return Some(Self(format!("{URN_PREFIX}{}:{}", &caps[1], &caps[2])));
        }
        SLUG_ID
            .captures(&decoded)
            .map(|caps| Self(format!("{URN_PREFIX}{}:{}", &caps[1], &caps[2])))
    }

    fn rest(&self) -> &str {
        self.0.strip_prefix(URN_PREFIX).unwrap_or(&self.0)
    }
}

impl AsRef<str> for Urn {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Urn {
    type Error = LinkedInError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<Urn> for String {
    fn from(urn: Urn) -> Self {
        urn.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn feed_update_url() {
        let urn = Urn::from_post_url(
            "https://www.linkedin.com/feed/update/urn:li:activity:7394701839126016000",
        )
        .unwrap();
        assert_eq!(urn.as_str(), "urn:li:activity:7394701839126016000");
    }

    #[test]
    fn percent_encoded_share_url() {
        let urn =
            Urn::from_post_url("https://www.linkedin.com/feed/update/urn%3Ali%3Ashare%3A123/")
                .unwrap();
        assert_eq!(urn.as_str(), "urn:li:share:123");
    }

    #[test]
    fn mobile_share_url_with_tracking() {
        let url = "https://www.linkedin.com/posts/aemal_llm-ai-promptengineering-activity-7394335719143555072-ye8K?utm_source=social_share_send&utm_medium=android_app";
        assert_eq!(
            Urn::from_post_url(url).unwrap().id(),
            "7394335719143555072"
        );
    }

    #[test]
    fn unrelated_url() {
        assert!(Urn::from_post_url("https://www.linkedin.com/in/someone").is_none());
    }

    #[test]
    fn person_urn_segments() {
        let urn = Urn::person("abc123");
        assert_eq!(urn.entity_type(), "person");
        assert_eq!(urn.id(), "abc123");
    }

    #[test]
    fn parse_rejects_missing_id() {
        let err = Urn::parse("urn:li:share:").unwrap_err();
        assert_eq!(err.kind().name(), "ValidationError");
    }

    #[test]
    fn serde_validates() {
        let ok: Urn = serde_json::from_str("\"urn:li:image:C4D\"").unwrap();
        assert_eq!(ok.entity_type(), "image");
        assert!(serde_json::from_str::<Urn>("\"image:C4D\"").is_err());
    }
}
