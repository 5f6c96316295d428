//! The module contains the errors the engine can throw.
//!
//! The errors are:
//!
//! - [`Validation`] thrown when a cost estimate breaks a domain invariant
//!   (negative amount, zero headcount, duplicate sales year, ...).
//! - [`InvalidRate`] thrown when a configured rate is outside `0..=1`.
//!
//!  [`Validation`]: EngineError::Validation
//!  [`InvalidRate`]: EngineError::InvalidRate
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("Invalid cost estimate: {0}")]
    Validation(String),
    #[error("Invalid rate: {0}")]
    InvalidRate(String),
}
