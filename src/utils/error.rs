//! Error handling for filter passes.
//!
//! This module provides a unified error type and result type for all
//! filtering operations.

use std::fmt;

/// Filtering error type
#[derive(Debug, Clone)]
pub enum FilterError {
    /// An `\else` or `\fi` was encountered with no open conditional.
    MalformedNesting {
        directive: String,
        line_number: usize,
        line: String,
    },
    /// IO error (for file operations)
    IoError { message: String },
}

impl fmt::Display for FilterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterError::MalformedNesting {
                directive,
                line_number,
                line,
            } => {
                write!(
                    f,
                    "Unbalanced {} at line {}: {}",
                    directive, line_number, line
                )
            }
            FilterError::IoError { message } => {
                write!(f, "IO error: {}", message)
            }
        }
    }
}

impl std::error::Error for FilterError {}

impl From<std::io::Error> for FilterError {
    fn from(err: std::io::Error) -> Self {
        FilterError::IoError {
            message: err.to_string(),
        }
    }
}

/// Result type for filtering operations
pub type FilterResult<T> = Result<T, FilterError>;
