//! Argument readers shared by the tools.
//!
//! A missing or malformed argument is a `ValidationError` naming the field,
//! so it is reported through the same normalized payload as any other
//! failure.

use linkedin_core::{PostVisibility, ReactionType, Urn};
use linkedin_error::{LinkedInError, LinkedInResult};
use serde_json::Value;
use std::str::FromStr;

/// A non-blank string argument.
#[track_caller]
pub fn required_str<'a>(input: &'a Value, field: &str) -> LinkedInResult<&'a str> {
    optional_str(input, field)?.ok_or_else(|| LinkedInError::validation(field, "is required"))
}

/// A string argument that may be absent, null or blank.
#[track_caller]
pub fn optional_str<'a>(input: &'a Value, field: &str) -> LinkedInResult<Option<&'a str>> {
    match input.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.as_str())),
        Some(other) => Err(LinkedInError::validation(
            field,
            format!("expected a string, got {other}"),
        )),
    }
}

/// A string argument that keeps blank values, for free text.
#[track_caller]
pub fn text(input: &Value, field: &str) -> LinkedInResult<String> {
    match input.get(field) {
        Some(Value::String(s)) => Ok(s.clone()),
        None | Some(Value::Null) => Err(LinkedInError::validation(field, "is required")),
        Some(other) => Err(LinkedInError::validation(
            field,
            format!("expected a string, got {other}"),
        )),
    }
}

/// A boolean argument, `false` when absent.
#[track_caller]
pub fn flag(input: &Value, field: &str) -> LinkedInResult<bool> {
    match input.get(field) {
        None | Some(Value::Null) => Ok(false),
        Some(Value::Bool(b)) => Ok(*b),
        Some(other) => Err(LinkedInError::validation(
            field,
            format!("expected a boolean, got {other}"),
        )),
    }
}

/// A non-negative integer argument.
#[track_caller]
pub fn optional_count(input: &Value, field: &str) -> LinkedInResult<Option<usize>> {
    match input.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => value
            .as_u64()
            .map(|n| Some(n as usize))
            .ok_or_else(|| {
                LinkedInError::validation(field, format!("expected a positive integer, got {value}"))
            }),
    }
}

/// A URN argument.
#[track_caller]
pub fn urn(input: &Value, field: &str) -> LinkedInResult<Urn> {
    let raw = required_str(input, field)?;
    Urn::parse(raw).map_err(|_| LinkedInError::validation(field, format!("'{raw}' is not a URN")))
}

/// Image URN, accepting a bare image id.
#[track_caller]
pub fn image_urn(input: &Value, field: &str) -> LinkedInResult<Urn> {
    let raw = required_str(input, field)?;
    if raw.starts_with("urn:") {
        urn(input, field)
    } else {
        Urn::parse(format!("urn:li:image:{raw}"))
    }
}

/// Post visibility, `PUBLIC` when absent.
#[track_caller]
pub fn visibility(input: &Value, field: &str) -> LinkedInResult<PostVisibility> {
    match optional_str(input, field)? {
        None => Ok(PostVisibility::default()),
        Some(raw) => PostVisibility::from_str(raw).map_err(|_| {
            LinkedInError::validation(field, format!("'{raw}' is not PUBLIC or CONNECTIONS"))
        }),
    }
}

/// Reaction type, `LIKE` when absent.
#[track_caller]
pub fn reaction_type(input: &Value, field: &str) -> LinkedInResult<ReactionType> {
    match optional_str(input, field)? {
        None => Ok(ReactionType::default()),
        Some(raw) => ReactionType::from_str(raw).map_err(|_| {
            LinkedInError::validation(
                field,
                format!(
                    "'{raw}' is not one of LIKE, PRAISE, APPRECIATION, EMPATHY, INTEREST, ENTERTAINMENT"
                ),
            )
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn blank_required_string_is_missing() {
        let err = required_str(&json!({"linkedin_url": "  "}), "linkedin_url").unwrap_err();
        assert_eq!(err.kind().name(), "ValidationError");
        assert!(err.kind().to_string().contains("linkedin_url"));
    }

    #[test]
    fn defaults_apply_when_absent() {
        let input = json!({});
        assert_eq!(visibility(&input, "visibility").unwrap(), PostVisibility::Public);
        assert_eq!(reaction_type(&input, "reaction_type").unwrap(), ReactionType::Like);
        assert!(!flag(&input, "get_employees").unwrap());
    }

    #[test]
    fn reaction_type_is_case_insensitive() {
        let input = json!({"reaction_type": "praise"});
        assert_eq!(reaction_type(&input, "reaction_type").unwrap(), ReactionType::Praise);
        assert!(reaction_type(&json!({"reaction_type": "LOVE"}), "reaction_type").is_err());
    }

    #[test]
    fn bare_image_id_becomes_urn() {
        let urn = image_urn(&json!({"image_id": "C4D22AQ"}), "image_id").unwrap();
        assert_eq!(urn.as_str(), "urn:li:image:C4D22AQ");
    }

    #[test]
    fn negative_limit_rejected() {
        assert!(optional_count(&json!({"limit": -1}), "limit").is_err());
        assert_eq!(optional_count(&json!({"limit": 5}), "limit").unwrap(), Some(5));
    }
}
