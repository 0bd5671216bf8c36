//! Error types for buffer kernels

use thiserror::Error;

/// Contract violations reported by the kernel entry points.
///
/// Numeric edge results (NaN, infinities, division by zero) are never errors;
/// they propagate per IEEE-754.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum NumericsError {
    /// Operand buffers of one call differ in length. Nothing was written.
    #[error("{op}: buffer length mismatch (expected {expected}, found {found})")]
    LengthMismatch {
        op: &'static str,
        expected: usize,
        found: usize,
    },
}

/// Result type for kernel operations
pub type Result<T> = std::result::Result<T, NumericsError>;

/// Fails unless `found == expected`.
#[inline]
pub(crate) fn check_len(op: &'static str, expected: usize, found: usize) -> Result<()> {
    if expected == found {
        Ok(())
    } else {
        Err(NumericsError::LengthMismatch { op, expected, found })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_len() {
        assert!(check_len("add", 4, 4).is_ok());
        assert_eq!(
            check_len("add", 4, 3),
            Err(NumericsError::LengthMismatch { op: "add", expected: 4, found: 3 })
        );
    }

    #[test]
    fn test_error_message() {
        let err = NumericsError::LengthMismatch { op: "min", expected: 8, found: 5 };
        assert_eq!(err.to_string(), "min: buffer length mismatch (expected 8, found 5)");
    }
}
