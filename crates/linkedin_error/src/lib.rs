//! Error types for the LinkedIn orchestration workspace.
//!
//! Every fallible operation in the workspace returns [`LinkedInResult`]. The
//! error carries a [`LinkedInErrorKind`] drawn from a fixed taxonomy plus the
//! source location where it was raised. The facade layer turns the kind into
//! a normalized `{status, kind, message}` payload via
//! [`LinkedInErrorKind::name`] and the kind's `Display` output.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod error;
mod extraction;
mod kind;
mod retry;

pub use error::{LinkedInError, LinkedInResult};
pub use extraction::{ExtractionFailure, ExtractionReason};
pub use kind::LinkedInErrorKind;
pub use retry::RetryableError;
