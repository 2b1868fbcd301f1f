//! Normalizes the page URLs callers hand in.
//!
//! Callers paste URLs with tracking parameters, mobile hosts or without a
//! trailing slash. Every target is rebuilt on the configured platform
//! origin so the session's cookie applies.

use linkedin_core::Urn;
use linkedin_error::{LinkedInError, LinkedInResult};
use regex::Regex;
use std::sync::LazyLock;

static PROFILE_PATH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^/in/([^/?#]+)").expect("static regex"));
static COMPANY_PATH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^/company/([^/?#]+)").expect("static regex"));
static JOB_PATH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^/jobs/view/(?:[^/?#]*-)?(\d+)").expect("static regex"));
static SLUG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9][A-Za-z0-9_%-]*$").expect("static regex"));

fn parse(raw: &str, field: &str) -> LinkedInResult<url::Url> {
    url::Url::parse(raw.trim())
        .ok()
        .filter(|u| matches!(u.scheme(), "http" | "https"))
        .ok_or_else(|| LinkedInError::validation(field, format!("'{raw}' is not an http(s) URL")))
}

fn origin(platform_url: &str) -> &str {
    platform_url.trim_end_matches('/')
}

/// Canonical profile URL from a profile URL or bare public id.
///
/// ```
/// use linkedin_browser::profile_url;
///
/// let url = profile_url("https://www.linkedin.com/in/ada-lovelace?trk=x", "https://www.linkedin.com").unwrap();
/// assert_eq!(url, "https://www.linkedin.com/in/ada-lovelace/");
/// assert_eq!(profile_url("ada-lovelace", "https://www.linkedin.com").unwrap(), url);
/// ```
pub fn profile_url(raw: &str, platform_url: &str) -> LinkedInResult<String> {
    let raw = raw.trim();
    let slug = if SLUG.is_match(raw) {
        raw.to_string()
    } else {
        let url = parse(raw, "linkedin_url")?;
        PROFILE_PATH
            .captures(url.path())
            .map(|c| c[1].to_string())
            .ok_or_else(|| {
                LinkedInError::validation("linkedin_url", format!("'{raw}' is not a profile URL"))
            })?
    };
    Ok(format!("{}/in/{slug}/", origin(platform_url)))
}

/// Canonical company URL from a company URL or bare company id.
pub fn company_url(raw: &str, platform_url: &str) -> LinkedInResult<String> {
    let raw = raw.trim();
    let slug = if SLUG.is_match(raw) {
        raw.to_string()
    } else {
        let url = parse(raw, "company_url")?;
        COMPANY_PATH
            .captures(url.path())
            .map(|c| c[1].to_string())
            .ok_or_else(|| {
                LinkedInError::validation("company_url", format!("'{raw}' is not a company URL"))
            })?
    };
    Ok(format!("{}/company/{slug}/", origin(platform_url)))
}

/// Canonical job URL and job id.
///
/// Accepts `/jobs/view/<id>`, search pages carrying `currentJobId`, or a
/// bare numeric id.
///
/// ```
/// use linkedin_browser::job_url;
///
/// let (url, id) = job_url(
///     "https://www.linkedin.com/jobs/search/?currentJobId=3981234567&keywords=rust",
///     "https://www.linkedin.com",
/// ).unwrap();
/// assert_eq!(id, "3981234567");
/// assert_eq!(url, "https://www.linkedin.com/jobs/view/3981234567/");
/// ```
pub fn job_url(raw: &str, platform_url: &str) -> LinkedInResult<(String, String)> {
    let raw = raw.trim();
    let id = if !raw.is_empty() && raw.chars().all(|c| c.is_ascii_digit()) {
        raw.to_string()
    } else {
        let url = parse(raw, "job_url")?;
        JOB_PATH
            .captures(url.path())
            .map(|c| c[1].to_string())
            .or_else(|| {
                url.query_pairs()
                    .find(|(k, _)| k == "currentJobId")
                    .map(|(_, v)| v.into_owned())
                    .filter(|v| !v.is_empty() && v.chars().all(|c| c.is_ascii_digit()))
            })
            .ok_or_else(|| {
                LinkedInError::validation("job_url", format!("'{raw}' is not a job URL"))
            })?
    };
    Ok((format!("{}/jobs/view/{id}/", origin(platform_url)), id))
}

/// Post URL with tracking parameters removed, plus the URN it names.
///
/// ```
/// use linkedin_browser::post_url;
///
/// let (url, urn) = post_url(
///     "https://www.linkedin.com/posts/ada_rust-activity-7394701839126016000-3V9W?utm_source=share",
///     "https://www.linkedin.com",
/// ).unwrap();
/// assert_eq!(url, "https://www.linkedin.com/posts/ada_rust-activity-7394701839126016000-3V9W");
/// assert_eq!(urn.unwrap().as_str(), "urn:li:activity:7394701839126016000");
/// ```
pub fn post_url(raw: &str, platform_url: &str) -> LinkedInResult<(String, Option<Urn>)> {
    let url = parse(raw, "post_url")?;
    let path = url.path().trim_end_matches('/');
    if !(path.starts_with("/posts/") || path.starts_with("/feed/update/")) {
        return Err(LinkedInError::validation(
            "post_url",
            format!("'{raw}' is not a post URL"),
        ));
    }
    let clean = format!("{}{path}", origin(platform_url));
    Ok((clean, Urn::from_post_url(raw)))
}

#[cfg(test)]
mod tests {
    use super::*;

    const ORIGIN: &str = "https://www.linkedin.com";

    #[test]
    fn profile_from_mobile_host() {
        assert_eq!(
            profile_url("https://m.linkedin.com/in/grace-hopper/details/", ORIGIN).unwrap(),
            "https://www.linkedin.com/in/grace-hopper/"
        );
    }

    #[test]
    fn profile_rejects_company() {
        let err = profile_url("https://www.linkedin.com/company/acme", ORIGIN).unwrap_err();
        assert_eq!(err.kind().name(), "ValidationError");
    }

    #[test]
    fn company_strips_subpages() {
        assert_eq!(
            company_url("https://www.linkedin.com/company/acme-corp/about/?x=1", ORIGIN).unwrap(),
            "https://www.linkedin.com/company/acme-corp/"
        );
        assert_eq!(company_url("acme", "http://127.0.0.1:9/").unwrap(), "http://127.0.0.1:9/company/acme/");
    }

    #[test]
    fn job_from_slugged_view() {
        let (url, id) =
            job_url("https://www.linkedin.com/jobs/view/senior-rust-engineer-at-acme-4012345678", ORIGIN)
                .unwrap();
        assert_eq!(id, "4012345678");
        assert_eq!(url, "https://www.linkedin.com/jobs/view/4012345678/");
        assert!(job_url("https://www.linkedin.com/jobs/search/", ORIGIN).is_err());
    }

    #[test]
    fn feed_update_post() {
        let (url, urn) = post_url(
            "https://www.linkedin.com/feed/update/urn:li:activity:7394701839126016000/",
            ORIGIN,
        )
        .unwrap();
        assert_eq!(
            url,
            "https://www.linkedin.com/feed/update/urn:li:activity:7394701839126016000"
        );
        assert_eq!(urn.unwrap().id(), "7394701839126016000");
        assert!(post_url("https://example.com/blog/1", ORIGIN).is_err());
    }
}
