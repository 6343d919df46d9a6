//! Error types for the Folio library.
//!
//! Only malformed input is an error here. A return that cannot be computed
//! is an ordinary value in `folio-returns`, not a `FolioError`.

use thiserror::Error;

/// A specialized Result type for Folio operations.
pub type FolioResult<T> = Result<T, FolioError>;

/// The main error type for Folio operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FolioError {
    /// Error in date calculations or invalid date.
    #[error("Invalid date: {message}")]
    InvalidDate {
        /// Description of the date error.
        message: String,
    },

    /// A trade record violates the positive quantity/price invariant.
    #[error("Invalid trade for '{symbol}': {reason}")]
    InvalidTrade {
        /// Symbol of the offending trade.
        symbol: String,
        /// Reason for invalidity.
        reason: String,
    },

    /// Unknown trade side.
    #[error("Invalid trade side: '{value}' (expected BUY or SELL)")]
    InvalidSide {
        /// The unparseable value.
        value: String,
    },

    /// Unknown day count convention.
    #[error("Unknown day count convention: '{value}'")]
    UnknownDayCount {
        /// The unparseable value.
        value: String,
    },
}

impl FolioError {
    /// Creates an invalid date error.
    #[must_use]
    pub fn invalid_date(message: impl Into<String>) -> Self {
        Self::InvalidDate {
            message: message.into(),
        }
    }

    /// Creates an invalid trade error.
    #[must_use]
    pub fn invalid_trade(symbol: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidTrade {
            symbol: symbol.into(),
            reason: reason.into(),
        }
    }

    /// Creates an invalid side error.
    #[must_use]
    pub fn invalid_side(value: impl Into<String>) -> Self {
        Self::InvalidSide {
            value: value.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = FolioError::invalid_date("2024-02-30 is not a valid date");
        assert!(err.to_string().contains("Invalid date"));
    }

    #[test]
    fn test_invalid_trade_display() {
        let err = FolioError::invalid_trade("MSFT", "quantity must be positive, got -3");
        let msg = err.to_string();
        assert!(msg.contains("MSFT"));
        assert!(msg.contains("quantity must be positive"));
    }
}
