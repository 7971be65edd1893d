//! Error types for gridcalc-core

use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in gridcalc-core
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid cell reference format
    #[error("Invalid cell reference: {0}")]
    InvalidReference(String),

    /// Column letters encode an index beyond the supported range
    #[error("Column letters '{0}' exceed the supported column range")]
    ColumnOutOfRange(String),
}
