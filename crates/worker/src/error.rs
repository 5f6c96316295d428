//! Errors of the report job.
//!
//! [`SourceError`] and [`StoreError`] come from the collaborators.
//! [`AttemptError`] is the failure of a single attempt and decides whether the
//! job retries; [`JobError`] is what the caller finally sees.
use std::time::Duration;

use engine::EngineError;
use report::ReportError;
use thiserror::Error;
use uuid::Uuid;

use crate::retry::AttemptFailure;

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("cost estimate {0} does not exist")]
    Missing(Uuid),
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid artifact key: {0}")]
    InvalidKey(String),
}

#[derive(Error, Debug)]
pub enum AttemptError {
    #[error("cost estimate {0} not found")]
    NotFound(Uuid),
    #[error(transparent)]
    Invalid(#[from] EngineError),
    #[error("source error: {0}")]
    Source(#[from] SourceError),
    #[error("report error: {0}")]
    Report(#[from] ReportError),
    #[error("store error: {0}")]
    Store(#[from] StoreError),
    #[error("attempt exceeded its time limit of {0:?}")]
    TimedOut(Duration),
    #[error("report task panicked: {0}")]
    Panicked(String),
}

impl AttemptError {
    /// A missing or invalid estimate cannot succeed on a later attempt.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, AttemptError::NotFound(_) | AttemptError::Invalid(_))
    }
}

impl AttemptFailure for AttemptError {
    fn is_terminal(&self) -> bool {
        AttemptError::is_terminal(self)
    }

    fn timed_out(limit: Duration) -> Self {
        AttemptError::TimedOut(limit)
    }
}

#[derive(Error, Debug)]
pub enum JobError {
    #[error(transparent)]
    Invalid(EngineError),
    #[error("report generation failed after {attempts} attempts: {last}")]
    Exhausted {
        attempts: u32,
        #[source]
        last: AttemptError,
    },
}
