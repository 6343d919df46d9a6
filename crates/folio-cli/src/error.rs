//! CLI error types.

use std::path::PathBuf;

use thiserror::Error;

/// CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid date format.
    #[error("Invalid date format: {0}. Use YYYY-MM-DD.")]
    InvalidDate(String),

    /// Invalid price.
    #[error("Invalid price: {0}. Must be a non-negative number.")]
    InvalidPrice(String),

    /// A row of an input file could not be used.
    #[error("{}:{line}: {reason}", path.display())]
    InvalidRecord {
        /// File being read.
        path: PathBuf,
        /// 1-based line number, header included.
        line: u64,
        /// What was wrong with the row.
        reason: String,
    },

    /// Trades for several symbols where one was expected.
    #[error("Trades file holds several symbols ({0}); pick one with --symbol")]
    AmbiguousSymbol(String),

    /// The filters matched nothing.
    #[error("No trades match {0}")]
    NoMatchingTrades(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// CLI result type.
pub type CliResult<T> = Result<T, CliError>;
