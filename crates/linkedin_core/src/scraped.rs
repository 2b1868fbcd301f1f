//! Records produced by page extraction.
//!
//! Every field the page may or may not render is an `Option` and is always
//! serialized, so a caller sees `null` for anything the extractor could not
//! find rather than a missing key.

use crate::Urn;
use linkedin_error::{LinkedInError, LinkedInResult};
use serde::{Deserialize, Serialize};

/// One position on a member profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Experience {
    /// Position title
    pub title: Option<String>,
    /// Employer
    pub company: Option<String>,
    /// Date range as rendered
    pub date_range: Option<String>,
    /// Location
    pub location: Option<String>,
    /// Free-text description
    pub description: Option<String>,
}

/// One school on a member profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Education {
    /// School name
    pub institution: Option<String>,
    /// Degree
    pub degree: Option<String>,
    /// Date range as rendered
    pub date_range: Option<String>,
}

/// A member profile page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileRecord {
    /// Normalized profile URL
    pub url: String,
    /// Full name
    pub name: Option<String>,
    /// Headline under the name
    pub headline: Option<String>,
    /// Current employer
    pub company: Option<String>,
    /// Location
    pub location: Option<String>,
    /// About section
    pub about: Option<String>,
    /// Experience section
    pub experiences: Vec<Experience>,
    /// Education section
    pub educations: Vec<Education>,
    /// Listed skills
    pub skills: Vec<String>,
}

/// A person listed on a company's people page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeSummary {
    /// Name
    pub name: Option<String>,
    /// Headline
    pub headline: Option<String>,
    /// Profile URL
    pub profile_url: Option<String>,
}

/// A company page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyRecord {
    /// Normalized company URL
    pub url: String,
    /// Company name
    pub name: Option<String>,
    /// Tagline
    pub tagline: Option<String>,
    /// Overview text
    pub about: Option<String>,
    /// Website
    pub website: Option<String>,
    /// Industry
    pub industry: Option<String>,
    /// Size band as rendered
    pub company_size: Option<String>,
    /// Headquarters
    pub headquarters: Option<String>,
    /// Year founded
    pub founded: Option<String>,
    /// Specialties
    pub specialties: Vec<String>,
    /// Employees, only populated when requested
    pub employees: Vec<EmployeeSummary>,
}

/// A job posting page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobRecord {
    /// Normalized job URL
    pub url: String,
    /// Numeric job id from the URL
    pub job_id: Option<String>,
    /// Job title
    pub title: Option<String>,
    /// Hiring company
    pub company: Option<String>,
    /// Location
    pub location: Option<String>,
    /// Full-time, contract, ...
    pub employment_type: Option<String>,
    /// Posting age as rendered
    pub posted_date: Option<String>,
    /// Applicant count as rendered
    pub applicant_count: Option<String>,
    /// Description body
    pub description: Option<String>,
}

/// One card on a job search results page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobSummary {
    /// Job URL
    pub url: Option<String>,
    /// Job title
    pub title: Option<String>,
    /// Hiring company
    pub company: Option<String>,
    /// Location
    pub location: Option<String>,
}

/// Job search parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
pub struct JobSearchQuery {
    keywords: String,
    location: Option<String>,
    limit: usize,
}

impl JobSearchQuery {
    /// Default number of results.
    pub const DEFAULT_LIMIT: usize = 25;
    /// Upper bound on results per search.
    pub const MAX_LIMIT: usize = 100;

    /// Validates and builds a search query.
    ///
    /// ```
    /// use linkedin_core::JobSearchQuery;
    ///
    /// let q = JobSearchQuery::new("rust engineer", Some("Berlin".into()), None).unwrap();
    /// assert_eq!(*q.limit(), 25);
    /// assert!(q.to_url("https://www.linkedin.com").contains("keywords=rust%20engineer"));
    /// ```
    #[track_caller]
    pub fn new(
        keywords: impl Into<String>,
        location: Option<String>,
        limit: Option<usize>,
    ) -> LinkedInResult<Self> {
        let keywords = keywords.into().trim().to_string();
        if keywords.is_empty() {
            return Err(LinkedInError::validation("keywords", "must not be empty"));
        }
        let limit = limit.unwrap_or(Self::DEFAULT_LIMIT);
        if !(1..=Self::MAX_LIMIT).contains(&limit) {
            return Err(LinkedInError::validation(
                "limit",
                format!("{limit} is outside 1..={}", Self::MAX_LIMIT),
            ));
        }
        let location = location
            .map(|l| l.trim().to_string())
            .filter(|l| !l.is_empty());
        Ok(Self {
            keywords,
            location,
            limit,
        })
    }

    /// Search results URL on the given platform origin.
    pub fn to_url(&self, platform_url: &str) -> String {
        let mut url = format!(
            "{}/jobs/search/?keywords={}",
            platform_url.trim_end_matches('/'),
            urlencoding::encode(&self.keywords)
        );
        if let Some(location) = &self.location {
            url.push_str("&location=");
            url.push_str(&urlencoding::encode(location));
        }
        url
    }
}

/// A single post page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostPageRecord {
    /// Post URL without tracking parameters
    pub url: String,
    /// URN derived from the URL
    pub post_urn: Option<Urn>,
    /// Author name
    pub author: Option<String>,
    /// Author headline
    pub author_title: Option<String>,
    /// Post body
    pub content: Option<String>,
    /// Posting age as rendered
    pub posted_date: Option<String>,
    /// Reaction count as rendered
    pub reactions: Option<String>,
    /// Comment count as rendered
    pub comments: Option<String>,
    /// Repost count as rendered
    pub reposts: Option<String>,
    /// Image URLs hosted on the platform CDN
    pub images: Vec<String>,
    /// Whether the post embeds a video
    pub has_video: bool,
    /// Title of a shared article
    pub article_title: Option<String>,
}
