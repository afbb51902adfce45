//! Error types for loopmul.
//!
//! Kernels never return errors: a shape violation inside a kernel panics.
//! The fallible parts of a run are buffer allocation, up-front shape
//! validation and thread pool construction, and those are reported here so
//! the driver can exit non-zero instead of aborting.

use std::fmt;

/// Errors that can end a benchmark run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoopmulError {
    /// A matrix buffer could not be allocated.
    AllocationError {
        /// Size of the failed request in bytes (saturated on overflow).
        requested_bytes: usize,
        /// Human-readable error message.
        message: String,
    },
    /// Operand shapes are incompatible for multiplication.
    ShapeError {
        /// Shape of the left operand, `(rows, cols)`.
        left: (usize, usize),
        /// Shape of the right operand or of the output buffer.
        right: (usize, usize),
        /// Human-readable error message.
        message: String,
    },
    /// The rayon worker pool could not be built.
    ThreadPoolError {
        /// Human-readable error message.
        message: String,
    },
}

impl fmt::Display for LoopmulError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoopmulError::AllocationError {
                requested_bytes,
                message,
            } => write!(
                f,
                "Matrix allocation failed: {} (requested {} bytes)",
                message, requested_bytes
            ),
            LoopmulError::ShapeError {
                left,
                right,
                message,
            } => write!(
                f,
                "Incompatible shapes: {} ({}x{} vs {}x{})",
                message, left.0, left.1, right.0, right.1
            ),
            LoopmulError::ThreadPoolError { message } => {
                write!(f, "Thread pool error: {}", message)
            }
        }
    }
}

impl std::error::Error for LoopmulError {}

impl From<rayon::ThreadPoolBuildError> for LoopmulError {
    fn from(err: rayon::ThreadPoolBuildError) -> Self {
        thread_pool_error(err.to_string())
    }
}

/// Result type alias for loopmul operations.
pub type Result<T> = std::result::Result<T, LoopmulError>;

/// Creates an allocation error.
pub fn allocation_error(requested_bytes: usize, message: impl Into<String>) -> LoopmulError {
    LoopmulError::AllocationError {
        requested_bytes,
        message: message.into(),
    }
}

/// Creates a shape error.
pub fn shape_error(
    left: (usize, usize),
    right: (usize, usize),
    message: impl Into<String>,
) -> LoopmulError {
    LoopmulError::ShapeError {
        left,
        right,
        message: message.into(),
    }
}

/// Creates a thread pool error.
pub fn thread_pool_error(message: impl Into<String>) -> LoopmulError {
    LoopmulError::ThreadPoolError {
        message: message.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocation_error_display() {
        let error = allocation_error(800_000_000, "out of memory");
        let display = format!("{}", error);
        assert!(display.contains("Matrix allocation failed"));
        assert!(display.contains("800000000 bytes"));
        assert!(display.contains("out of memory"));
    }

    #[test]
    fn test_shape_error_display() {
        let error = shape_error((2, 3), (4, 5), "a.cols must equal b.rows");
        let display = format!("{}", error);
        assert!(display.contains("Incompatible shapes"));
        assert!(display.contains("2x3 vs 4x5"));
        assert!(display.contains("a.cols must equal b.rows"));
    }

    #[test]
    fn test_thread_pool_error_display() {
        let error = thread_pool_error("global pool already initialized");
        let display = format!("{}", error);
        assert!(display.contains("Thread pool error"));
        assert!(display.contains("global pool already initialized"));
    }

    #[test]
    fn test_error_equality() {
        let error1 = shape_error((1, 2), (3, 4), "test");
        let error2 = shape_error((1, 2), (3, 4), "test");
        let error3 = shape_error((1, 2), (2, 4), "test");

        assert_eq!(error1, error2);
        assert_ne!(error1, error3);
    }

    #[test]
    fn test_error_trait_implementation() {
        let error = allocation_error(1024, "test error");

        let _: &dyn std::error::Error = &error;

        assert!(std::error::Error::source(&error).is_none());
    }
}
