//! Error types and result definitions for the enumeration engine.
//!
//! Failures fall into a small hierarchy that mirrors the Ruby exceptions the
//! engine reproduces:
//! - Argument errors (invalid sizes, detected before any element is pulled)
//! - Exhaustion (`next`/`peek` on a drained cursor)
//! - Comparison errors (ordering two incompatible elements)
//! - Illegal cursor state (removing after a look-ahead)

use std::fmt;
use thiserror::Error;

/// The unified result type used throughout the engine.
pub type SeqResult<T> = Result<T, SeqError>;

/// Error type covering every failure the engine itself raises.
///
/// Panics inside user-supplied closures are not caught and propagate
/// unmodified to the caller that triggered the pull.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SeqError {
    /// Invalid argument, such as a negative or zero window size.
    #[error("ArgumentError: {message}")]
    Argument {
        /// Error description.
        message: String,
    },

    /// A cursor was asked for an element after its source ran dry.
    #[error("StopIteration: iteration reached an end")]
    StopIteration,

    /// Two elements could not be ordered against each other.
    #[error("ArgumentError: comparison of {left} with {right} failed")]
    Comparison {
        /// Kind of the left-hand element.
        left: String,
        /// Kind of the right-hand element.
        right: String,
    },

    /// A cursor operation was invoked in a state that forbids it.
    #[error("IllegalStateError: {message}")]
    IllegalState {
        /// Error description.
        message: String,
    },
}

impl SeqError {
    /// Create an argument error.
    #[must_use]
    pub fn argument(message: impl Into<String>) -> Self {
        Self::Argument {
            message: message.into(),
        }
    }

    /// Create a comparison error naming both element kinds.
    #[must_use]
    pub fn comparison(left: impl Into<String>, right: impl Into<String>) -> Self {
        Self::Comparison {
            left: left.into(),
            right: right.into(),
        }
    }

    /// Create an illegal-state error.
    #[must_use]
    pub fn illegal_state(message: impl Into<String>) -> Self {
        Self::IllegalState {
            message: message.into(),
        }
    }

    /// Get the Ruby exception class name.
    #[must_use]
    pub fn exception_type(&self) -> ErrorKind {
        match self {
            Self::Argument { .. } | Self::Comparison { .. } => ErrorKind::Argument,
            Self::StopIteration => ErrorKind::StopIteration,
            Self::IllegalState { .. } => ErrorKind::IllegalState,
        }
    }

    /// Returns true if this error signals exhaustion rather than misuse.
    #[inline]
    #[must_use]
    pub fn is_stop_iteration(&self) -> bool {
        matches!(self, Self::StopIteration)
    }
}

/// Error classification matching Ruby's exception hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// `ArgumentError`.
    Argument,
    /// `StopIteration`.
    StopIteration,
    /// Raised by cursors, no direct Ruby counterpart.
    IllegalState,
}

impl ErrorKind {
    /// Get the Ruby exception class name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Argument => "ArgumentError",
            Self::StopIteration => "StopIteration",
            Self::IllegalState => "IllegalStateError",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validate a size argument that must be strictly positive.
///
/// `what` names the size in the error message, e.g. `"slice"` yields
/// `ArgumentError: invalid slice size`.
pub fn positive_size(n: i64, what: &str) -> SeqResult<usize> {
    if n <= 0 {
        return Err(SeqError::argument(format!("invalid {what} size")));
    }
    usize::try_from(n).map_err(|_| SeqError::argument(format!("{what} size too big")))
}

/// Validate a size argument that must not be negative.
pub fn non_negative_size(n: i64, what: &str) -> SeqResult<usize> {
    if n < 0 {
        return Err(SeqError::argument(format!("attempt to {what} negative size")));
    }
    usize::try_from(n).map_err(|_| SeqError::argument(format!("{what} size too big")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_argument_error_display() {
        let err = SeqError::argument("invalid slice size");
        assert_eq!(err.to_string(), "ArgumentError: invalid slice size");
        assert_eq!(err.exception_type(), ErrorKind::Argument);
    }

    #[test]
    fn test_comparison_error_names_both_kinds() {
        let err = SeqError::comparison("String", "Integer");
        assert_eq!(
            err.to_string(),
            "ArgumentError: comparison of String with Integer failed"
        );
        assert_eq!(err.exception_type().as_str(), "ArgumentError");
    }

    #[test]
    fn test_stop_iteration() {
        let err = SeqError::StopIteration;
        assert!(err.is_stop_iteration());
        assert_eq!(err.exception_type().to_string(), "StopIteration");
    }

    #[test]
    fn test_positive_size() {
        assert_eq!(positive_size(3, "slice"), Ok(3));
        assert_eq!(
            positive_size(0, "slice"),
            Err(SeqError::argument("invalid slice size"))
        );
        assert!(positive_size(-1, "window").is_err());
    }

    #[test]
    fn test_non_negative_size() {
        assert_eq!(non_negative_size(0, "take"), Ok(0));
        assert_eq!(
            non_negative_size(-2, "take"),
            Err(SeqError::argument("attempt to take negative size"))
        );
    }
}
