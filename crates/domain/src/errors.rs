//! Domain-level errors

use thiserror::Error;

/// Errors that can occur in the domain layer
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    /// Research query is empty after trimming
    #[error("Research query cannot be empty")]
    EmptyQuery,

    /// Research query exceeds the maximum length
    #[error("Research query too long: {actual} characters (max {max})")]
    QueryTooLong { max: usize, actual: usize },

    /// Validation failed
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_query_error_message() {
        let err = DomainError::EmptyQuery;
        assert_eq!(err.to_string(), "Research query cannot be empty");
    }

    #[test]
    fn query_too_long_error_message() {
        let err = DomainError::QueryTooLong {
            max: 500,
            actual: 612,
        };
        assert_eq!(
            err.to_string(),
            "Research query too long: 612 characters (max 500)"
        );
    }

    #[test]
    fn validation_error_message() {
        let err = DomainError::ValidationError("field is required".to_string());
        assert_eq!(err.to_string(), "Validation failed: field is required");
    }
}
