//! The authenticated member.

use crate::Urn;
use serde::{Deserialize, Serialize};

/// Identity of the member the API token belongs to.
///
/// # Examples
///
/// ```
/// use linkedin_core::{PersonIdentity, Urn};
///
/// let me = PersonIdentity::new(Urn::person("abc"), "Ada", "Lovelace", None);
/// assert_eq!(me.display_name(), "Ada Lovelace");
/// assert_eq!(me.urn().as_str(), "urn:li:person:abc");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
pub struct PersonIdentity {
    /// Person URN
    urn: Urn,
    /// Given name
    given_name: String,
    /// Family name
    family_name: String,
    /// Email, only when the token carries the `email` scope
    email: Option<String>,
}

impl PersonIdentity {
    /// Creates a new identity.
    pub fn new(
        urn: Urn,
        given_name: impl Into<String>,
        family_name: impl Into<String>,
        email: Option<String>,
    ) -> Self {
        Self {
            urn,
            given_name: given_name.into(),
            family_name: family_name.into(),
            email,
        }
    }

    /// Given and family name joined, skipping empty parts.
    pub fn display_name(&self) -> String {
        [self.given_name.as_str(), self.family_name.as_str()]
            .iter()
            .filter(|s| !s.is_empty())
            .copied()
            .collect::<Vec<_>>()
            .join(" ")
    }
}
