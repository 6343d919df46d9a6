//! Error types for the returns engine.
//!
//! A return that cannot be computed is not an error; see
//! [`XirrOutcome`](crate::xirr::XirrOutcome).

use folio_core::FolioError;
use thiserror::Error;

/// Result type for returns engine operations.
pub type ReturnsResult<T> = Result<T, ReturnsError>;

/// Errors that can occur in the returns engine.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ReturnsError {
    /// A configuration value is out of range.
    #[error("Invalid configuration for '{field}': {reason}")]
    InvalidConfig {
        /// The offending field.
        field: String,
        /// Why the value was rejected.
        reason: String,
    },

    /// Malformed input data.
    #[error(transparent)]
    Core(#[from] FolioError),
}

impl ReturnsError {
    /// Creates an invalid configuration error.
    #[must_use]
    pub fn invalid_config(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_config_display() {
        let err = ReturnsError::invalid_config("xirr.tolerance", "must be positive");
        assert_eq!(
            err.to_string(),
            "Invalid configuration for 'xirr.tolerance': must be positive"
        );
    }

    #[test]
    fn test_from_core_error() {
        let err: ReturnsError = FolioError::invalid_side("HOLD").into();
        assert!(err.to_string().contains("HOLD"));
    }
}
