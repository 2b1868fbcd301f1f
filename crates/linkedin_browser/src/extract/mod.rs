//! Page extractors.
//!
//! An extractor names the page region that signals the page has rendered
//! and turns the loaded page into a record. Optional fields that are not on
//! the page come back as `None`; required fields that are not on the page
//! fail the extraction with the lists of found and missing fields.

mod company;
mod job;
mod post;
mod profile;
mod search;

pub use company::{CompanyExtractor, EmployeeExtractor};
pub use job::JobExtractor;
pub use post::PostExtractor;
pub use profile::ProfileExtractor;
pub use search::JobSearchExtractor;

use crate::PageHandle;
use async_trait::async_trait;
use linkedin_error::{ExtractionFailure, LinkedInError, LinkedInResult};

/// Turns a loaded page into a record.
#[async_trait]
pub trait Extractor: Send + Sync {
    /// Record produced.
    type Output: Send;

    /// Short name for logs.
    fn name(&self) -> &'static str;

    /// Selector whose presence means the page has rendered.
    fn content_selector(&self) -> &'static str;

    /// Reads the page. `url` is the normalized target.
    async fn extract(&self, page: &dyn PageHandle, url: &str) -> LinkedInResult<Self::Output>;
}

/// Tracks which fields an extractor found.
#[derive(Debug, Default)]
pub(crate) struct FieldReport {
    found: Vec<String>,
    missing: Vec<String>,
}

impl FieldReport {
    /// Records an optional field.
    pub(crate) fn optional<T>(&mut self, name: &str, value: &Option<T>) {
        if value.is_some() {
            self.found.push(name.to_string());
        }
    }

    /// Records a list field; empty lists are not reported as found.
    pub(crate) fn list<T>(&mut self, name: &str, values: &[T]) {
        if !values.is_empty() {
            self.found.push(name.to_string());
        }
    }

    /// Records a field the record cannot do without.
    pub(crate) fn required<T>(&mut self, name: &str, value: &Option<T>) {
        if value.is_some() {
            self.found.push(name.to_string());
        } else {
            self.missing.push(name.to_string());
        }
    }

    /// Fails when any required field was missing.
    #[track_caller]
    pub(crate) fn finish(self, url: &str) -> LinkedInResult<()> {
        if self.missing.is_empty() {
            Ok(())
        } else {
            Err(LinkedInError::extraction(ExtractionFailure::content_not_found(
                url,
                self.found,
                self.missing,
            )))
        }
    }
}

/// First whitespace-separated token, for counters rendered as "12 comments".
pub(crate) fn leading_token(text: Option<String>) -> Option<String> {
    text.and_then(|t| t.split_whitespace().next().map(str::to_string))
}
