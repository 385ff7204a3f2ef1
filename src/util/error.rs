//! Error types for scene-numeric.

use thiserror::Error;

/// Main error type for attribute buffer and interpolant operations.
///
/// Every buffer error is raised before any element is written, so a
/// failed call leaves the target untouched.
#[derive(Error, Debug)]
pub enum Error {
    /// Argument outside its valid domain (e.g. item size of zero)
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Numeric kind incompatible with the requested operation
    #[error("Type mismatch: expected {expected}, got {actual}")]
    TypeMismatch { expected: String, actual: String },

    /// Raw element count disagrees with the buffer's storage
    #[error("Length mismatch: expected {expected} elements, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    /// Item size disagrees with the record width of the operation
    #[error("Invalid shape: expected item size {expected}, got {actual}")]
    InvalidShape { expected: usize, actual: usize },

    /// More data supplied than the buffer can hold
    #[error("Overflow: {requested} exceeds capacity {capacity}")]
    Overflow { capacity: usize, requested: usize },

    /// Item index out of bounds
    #[error("Item index {index} out of bounds (count: {count})")]
    ItemOutOfBounds { index: usize, count: usize },

    /// Interpolant evaluated without any samples
    #[error("Interpolant has no samples")]
    NoSamples,

    /// Sample times are not non-decreasing (or contain NaN)
    #[error("Sample times must be non-decreasing (violated at index {index})")]
    UnsortedTimes { index: usize },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error with message
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an "other" error from a string.
    pub fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }

    /// Create an invalid argument error.
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// Create a type mismatch error from anything displayable.
    pub fn type_mismatch(expected: impl ToString, actual: impl ToString) -> Self {
        Self::TypeMismatch {
            expected: expected.to_string(),
            actual: actual.to_string(),
        }
    }
}

/// Result type alias for scene-numeric operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let e = Error::NoSamples;
        assert!(e.to_string().contains("no samples"));

        let e = Error::Overflow { capacity: 2, requested: 3 };
        assert_eq!(e.to_string(), "Overflow: 3 exceeds capacity 2");

        let e = Error::type_mismatch("floating point", "int32");
        assert_eq!(e.to_string(), "Type mismatch: expected floating point, got int32");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "test");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
