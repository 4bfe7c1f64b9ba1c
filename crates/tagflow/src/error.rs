//! Error types for the tag engine.

use thiserror::Error;

/// Errors that can occur while manipulating tags or loading configuration.
///
/// None of these are fatal: the caller logs the error and abandons the
/// single operation that produced it. No partial mutation is ever left behind.
#[derive(Error, Debug)]
pub enum TagError {
    /// An index fell outside `[0, len)`.
    #[error("tag index {index} out of bounds for {len} tags")]
    OutOfBounds { index: usize, len: usize },

    /// The configured maximum number of tags has been reached.
    #[error("tag limit of {limit} reached")]
    CapacityExceeded { limit: usize },

    /// A validation pattern failed to compile.
    #[error("invalid validation pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    /// A configuration document could not be parsed.
    #[error("invalid configuration: {0}")]
    Config(#[from] toml::de::Error),
}

/// Result type for tag operations.
pub type TagResult<T> = Result<T, TagError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_bounds_message() {
        let err = TagError::OutOfBounds { index: 3, len: 2 };
        assert_eq!(err.to_string(), "tag index 3 out of bounds for 2 tags");
    }

    #[test]
    fn test_capacity_message() {
        let err = TagError::CapacityExceeded { limit: 2 };
        assert_eq!(err.to_string(), "tag limit of 2 reached");
    }
}
