//! Job search result pages.

use super::Extractor;
use crate::{ItemField, PageHandle};
use async_trait::async_trait;
use linkedin_core::JobSummary;
use linkedin_error::LinkedInResult;

const RESULTS: &str = ".jobs-search-results-list, .scaffold-layout__list, .jobs-search-no-results-banner";
const CARDS: &str = ".job-card-container, li.jobs-search-results__list-item, .base-search-card";
const CARD_FIELDS: &[ItemField] = &[
    ItemField::text("title", ".job-card-list__title, .job-card-container__link strong, .base-search-card__title"),
    ItemField::text("company", ".artdeco-entity-lockup__subtitle, .job-card-container__primary-description, .base-search-card__subtitle"),
    ItemField::text("location", ".job-card-container__metadata-item, .artdeco-entity-lockup__caption, .job-search-card__location"),
    ItemField::attr("url", "a.job-card-container__link, a.job-card-list__title, a.base-card__full-link", "href"),
];

/// Reads job cards from a search results page.
///
/// An empty result list is a valid answer, not a missing field.
#[derive(Debug, Clone, Copy)]
pub struct JobSearchExtractor {
    limit: usize,
}

impl JobSearchExtractor {
    /// Keeps at most `limit` cards.
    pub fn new(limit: usize) -> Self {
        Self { limit }
    }
}

#[async_trait]
impl Extractor for JobSearchExtractor {
    type Output = Vec<JobSummary>;

    fn name(&self) -> &'static str {
        "job_search"
    }

    fn content_selector(&self) -> &'static str {
        RESULTS
    }

    async fn extract(&self, page: &dyn PageHandle, url: &str) -> LinkedInResult<Vec<JobSummary>> {
        let origin = url::Url::parse(url)
            .map(|u| u.origin().ascii_serialization())
            .unwrap_or_default();
        Ok(page
            .items(CARDS, CARD_FIELDS)
            .await?
            .into_iter()
            .map(|mut item| JobSummary {
                url: item.remove("url").map(|href| absolute(&origin, &href)),
                title: item.remove("title").map(|t| first_line(&t)),
                company: item.remove("company"),
                location: item.remove("location"),
            })
            .filter(|job| job.title.is_some())
            .take(self.limit)
            .collect())
    }
}

fn absolute(origin: &str, href: &str) -> String {
    let href = href.split('?').next().unwrap_or(href);
    if href.starts_with('/') {
        format!("{origin}{href}")
    } else {
        href.to_string()
    }
}

/// Cards repeat the title for screen readers on a second line.
fn first_line(text: &str) -> String {
    text.lines().next().unwrap_or(text).trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_links_resolve_against_origin() {
        assert_eq!(
            absolute("https://www.linkedin.com", "/jobs/view/42/?refId=abc"),
            "https://www.linkedin.com/jobs/view/42/"
        );
        assert_eq!(absolute("https://x", "https://y/z"), "https://y/z");
    }

    #[test]
    fn duplicated_title_keeps_first_line() {
        assert_eq!(first_line("Rust Engineer\nRust Engineer"), "Rust Engineer");
    }
}
