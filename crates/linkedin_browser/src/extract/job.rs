//! Job posting pages.

use super::{Extractor, FieldReport};
use crate::PageHandle;
use async_trait::async_trait;
use linkedin_core::JobRecord;
use linkedin_error::LinkedInResult;

const DETAILS: &str = ".jobs-details, .job-view-layout, main";
const TITLE: &str = ".job-details-jobs-unified-top-card__job-title h1, .job-details-jobs-unified-top-card__job-title, .top-card-layout__title, h1";
const COMPANY: &str = ".job-details-jobs-unified-top-card__company-name a, .job-details-jobs-unified-top-card__company-name, .topcard__org-name-link";
const PRIMARY_DESCRIPTION: &str = ".job-details-jobs-unified-top-card__primary-description-container .tvm__text, .job-details-jobs-unified-top-card__tertiary-description-container .tvm__text";
const LOCATION: &str = ".job-details-jobs-unified-top-card__bullet, .topcard__flavor--bullet";
const EMPLOYMENT_TYPE: &str = ".job-details-jobs-unified-top-card__job-insight span, .job-details-preferences-and-skills__pill, .description__job-criteria-text";
const DESCRIPTION: &str = "#job-details, .jobs-description__content, .show-more-less-html__markup";

/// Reads a job posting.
#[derive(Debug, Clone)]
pub struct JobExtractor {
    job_id: String,
}

impl JobExtractor {
    /// Extractor for the posting with `job_id`.
    pub fn new(job_id: impl Into<String>) -> Self {
        Self {
            job_id: job_id.into(),
        }
    }
}

#[async_trait]
impl Extractor for JobExtractor {
    type Output = JobRecord;

    fn name(&self) -> &'static str {
        "job"
    }

    fn content_selector(&self) -> &'static str {
        DETAILS
    }

    async fn extract(&self, page: &dyn PageHandle, url: &str) -> LinkedInResult<JobRecord> {
        let title = page.text(TITLE).await?;
        let company = page.text(COMPANY).await?;
        let description = page.text(DESCRIPTION).await?;
        let employment_type = page.text(EMPLOYMENT_TYPE).await?;

        // The top card renders "<location> · <age> · <applicants>".
        let summary = page.texts(PRIMARY_DESCRIPTION).await?;
        let location = match summary.first() {
            Some(first) => Some(first.clone()),
            None => page.text(LOCATION).await?,
        };
        let posted_date = summary
            .iter()
            .find(|s| s.contains("ago") || s.contains("Reposted"))
            .cloned();
        let applicant_count = summary
            .iter()
            .find(|s| s.contains("applicant") || s.contains("clicked apply"))
            .cloned();

        let mut report = FieldReport::default();
        report.required("title", &title);
        report.optional("company", &company);
        report.optional("location", &location);
        report.optional("employment_type", &employment_type);
        report.optional("posted_date", &posted_date);
        report.optional("applicant_count", &applicant_count);
        report.optional("description", &description);
        report.finish(url)?;

        Ok(JobRecord {
            url: url.to_string(),
            job_id: Some(self.job_id.clone()),
            title,
            company,
            location,
            employment_type,
            posted_date,
            applicant_count,
            description,
        })
    }
}
