//! Error types for sample-set management.
//!
//! Only expected negative outcomes are reported here. Broken invariants and
//! caller misuse (peeking an empty set, stale positions or handles) panic.

use crate::sample::SampleId;
use thiserror::Error;

/// Error type for sample-set operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SampleSetError {
    /// The sample to promote is not held in interval representation
    #[error("sample {0} is not in the interval bucket")]
    NotFound(SampleId),
}

/// Result type for sample-set operations
pub type SampleSetResult<T> = Result<T, SampleSetError>;
