//! Error types for simd-delta kernels.
//!
//! Kernels validate their operands up front and report mismatches instead of
//! silently truncating or reading past the end of a buffer.

use thiserror::Error;

/// Errors that can occur when running an addition kernel.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SimdDeltaError {
    /// The two operands and the output buffer do not have the same length.
    #[error("Length mismatch: lhs has {left} elements, rhs has {right}, output has {output}")]
    LengthMismatch {
        /// Length of the left operand.
        left: usize,
        /// Length of the right operand.
        right: usize,
        /// Length of the output buffer.
        output: usize,
    },
    /// Input validation error.
    #[error("Validation error: {message}")]
    ValidationError {
        /// Human-readable error message.
        message: String,
    },
}

/// Result type alias for simd-delta operations.
pub type Result<T> = std::result::Result<T, SimdDeltaError>;

/// Creates a length mismatch error.
pub fn length_mismatch(left: usize, right: usize, output: usize) -> SimdDeltaError {
    SimdDeltaError::LengthMismatch {
        left,
        right,
        output,
    }
}

/// Creates a validation error.
pub fn validation_error(message: impl Into<String>) -> SimdDeltaError {
    SimdDeltaError::ValidationError {
        message: message.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_mismatch_display() {
        let error = length_mismatch(8, 7, 8);
        let display = format!("{}", error);
        assert!(display.contains("Length mismatch"));
        assert!(display.contains("lhs has 8"));
        assert!(display.contains("rhs has 7"));
        assert!(display.contains("output has 8"));
    }

    #[test]
    fn test_validation_error_display() {
        let error = validation_error("buffer size must be non-zero");
        let display = format!("{}", error);
        assert!(display.contains("Validation error"));
        assert!(display.contains("buffer size must be non-zero"));
    }

    #[test]
    fn test_error_equality() {
        assert_eq!(length_mismatch(4, 4, 3), length_mismatch(4, 4, 3));
        assert_ne!(length_mismatch(4, 4, 3), length_mismatch(4, 3, 4));
    }

    #[test]
    fn test_error_trait_implementation() {
        let error = length_mismatch(1, 2, 3);

        let _: &dyn std::error::Error = &error;

        assert!(std::error::Error::source(&error).is_none());
    }
}
