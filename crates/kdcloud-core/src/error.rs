//! Error types for kdcloud-core

use thiserror::Error;

/// Errors raised by the spatial index and its result sets
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IndexError {
    /// Coordinate count does not match the index, or a zero-dimensional index was requested
    #[error("Invalid dimension: expected {expected} coordinates, got {actual}")]
    InvalidDimension { expected: usize, actual: usize },

    /// Memory for a new node could not be reserved; the index is unchanged
    #[error("Allocation failed while inserting a node")]
    AllocationFailure,

    /// `current()` was called on a result set with no entries left
    #[error("Result cursor is exhausted")]
    CursorExhausted,
}

impl IndexError {
    /// A point or query target with the wrong number of coordinates
    pub fn dimension_mismatch(expected: usize, actual: usize) -> Self {
        Self::InvalidDimension { expected, actual }
    }

    /// An index was requested with zero dimensions; at least one is needed
    pub fn zero_dimensions() -> Self {
        Self::InvalidDimension {
            expected: 1,
            actual: 0,
        }
    }
}

/// Result type for index operations
pub type IndexResult<T> = Result<T, IndexError>;
