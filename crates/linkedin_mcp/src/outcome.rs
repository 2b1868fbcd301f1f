//! Normalized tool results.
//!
//! Every tool answers with a JSON object whose `status` is `"success"` or
//! `"error"`. Errors carry the taxonomy name as `kind` and a message that has
//! already been scrubbed of credentials.

use linkedin_error::{LinkedInError, LinkedInErrorKind, LinkedInResult};
use serde_json::{Map, Value, json};
use tracing::{debug, warn};

/// Wraps `payload` as a success. Non-object payloads land under `result`.
pub fn success(payload: Value) -> Value {
    let mut object = match payload {
        Value::Object(map) => map,
        other => {
            let mut map = Map::new();
            map.insert("result".to_string(), other);
            map
        }
    };
    object.insert("status".to_string(), json!("success"));
    Value::Object(object)
}

/// Normalizes a failed operation.
pub fn failure(error: &LinkedInError) -> Value {
    let kind = error.kind();
    let mut payload = json!({
        "status": "error",
        "kind": kind.name(),
        "message": kind.to_string(),
    });
    if let LinkedInErrorKind::RateLimit {
        retry_after: Some(after),
        ..
    } = kind
    {
        payload["retry_after_secs"] = json!(after.as_secs());
    }
    if let LinkedInErrorKind::Extraction(failure) = kind {
        payload["reason"] = json!(failure.reason);
        payload["found"] = json!(failure.found);
        payload["missing"] = json!(failure.missing);
    }
    payload
}

/// Folds an operation result into the normalized shape.
pub fn respond(tool: &str, result: LinkedInResult<Value>) -> Value {
    match result {
        Ok(payload) => {
            debug!(tool, "Tool succeeded");
            success(payload)
        }
        Err(e) => {
            warn!(tool, kind = e.kind().name(), error = %e, "Tool failed");
            failure(&e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use linkedin_error::ExtractionFailure;
    use std::time::Duration;

    #[test]
    fn success_merges_status() {
        let value = success(json!({"post_id": "urn:li:share:1"}));
        assert_eq!(value, json!({"status": "success", "post_id": "urn:li:share:1"}));
        assert_eq!(success(json!(true))["result"], json!(true));
    }

    #[test]
    fn rate_limit_carries_hint() {
        let err = LinkedInError::new(LinkedInErrorKind::RateLimit {
            retry_after: Some(Duration::from_secs(30)),
            message: "slow down".to_string(),
        });
        let value = failure(&err);
        assert_eq!(value["kind"], "RateLimitError");
        assert_eq!(value["retry_after_secs"], 30);
    }

    #[test]
    fn extraction_lists_fields() {
        let err = LinkedInError::extraction(ExtractionFailure::content_not_found(
            "https://www.linkedin.com/in/x/",
            vec!["headline".to_string()],
            vec!["name".to_string()],
        ));
        let value = failure(&err);
        assert_eq!(value["kind"], "ExtractionError");
        assert_eq!(value["reason"], "ContentNotFound");
        assert_eq!(value["missing"], json!(["name"]));
    }
}
