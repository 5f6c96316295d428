//! Background generation of estimate workbooks.
//!
//! [`ReportJob`] loads an estimate through a [`CostEstimateSource`], renders
//! it with the `report` crate and persists the bytes through an
//! [`ArtifactStore`], retrying transient failures per [`RetryPolicy`].

pub use error::{AttemptError, JobError, SourceError, StoreError};
pub use job::ReportJob;
pub use retry::{AttemptFailure, RetryError, RetryPolicy, run_with_retry};
pub use source::CostEstimateSource;
pub use store::{
    ArtifactLocator, ArtifactStore, DEFAULT_CATEGORY, FALLBACK_FILE_NAME, MAX_FILE_NAME_CHARS,
    artifact_key, sanitize_file_name,
};

mod error;
pub mod fs;
mod job;
pub mod retry;
mod source;
mod store;
