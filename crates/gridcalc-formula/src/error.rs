//! Formula error types and in-band error markers

use std::fmt;

use thiserror::Error;

/// Result type for formula operations
pub type FormulaResult<T> = std::result::Result<T, FormulaError>;

/// Errors that can occur while evaluating a formula
///
/// These never escape the public evaluation entry points: every variant is
/// caught there and rendered as an [`ErrorMarker`] in the cell.
#[derive(Debug, Error)]
pub enum FormulaError {
    /// Expression parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Expression contains a character outside the arithmetic subset
    #[error("Illegal character '{0}' in expression")]
    IllegalCharacter(char),

    /// The formula refers to a cell that is currently being evaluated
    #[error("Circular reference detected")]
    CircularReference,

    /// The numeric result is infinite or NaN
    #[error("Result is not a finite number")]
    NonFinite,

    /// A range function spans more cells than the evaluator will iterate
    #[error("Range spans {cells} cells (limit: {limit})")]
    RangeTooLarge {
        /// Number of cells the range covers
        cells: u64,
        /// Maximum number of cells a range may cover
        limit: u64,
    },
}

impl FormulaError {
    /// The in-band marker a cell shows for this error
    pub fn marker(&self) -> ErrorMarker {
        match self {
            FormulaError::CircularReference => ErrorMarker::Circular,
            _ => ErrorMarker::Error,
        }
    }
}

/// In-band markers rendered in a cell when evaluation fails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorMarker {
    /// #CIRCULAR! - the formula refers back to a cell being evaluated
    Circular,
    /// #ERROR! - any other evaluation fault
    Error,
}

impl ErrorMarker {
    /// Get the display string for this marker
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorMarker::Circular => "#CIRCULAR!",
            ErrorMarker::Error => "#ERROR!",
        }
    }

    /// Parse a marker from its display string
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "#CIRCULAR!" => Some(ErrorMarker::Circular),
            "#ERROR!" => Some(ErrorMarker::Error),
            _ => None,
        }
    }
}

impl fmt::Display for ErrorMarker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marker_strings() {
        assert_eq!(ErrorMarker::Circular.to_string(), "#CIRCULAR!");
        assert_eq!(ErrorMarker::Error.to_string(), "#ERROR!");
    }

    #[test]
    fn test_marker_from_str() {
        assert_eq!(ErrorMarker::from_str("#CIRCULAR!"), Some(ErrorMarker::Circular));
        assert_eq!(ErrorMarker::from_str("#error!"), Some(ErrorMarker::Error));
        assert_eq!(ErrorMarker::from_str("#DIV/0!"), None);
        assert_eq!(ErrorMarker::from_str("42"), None);
    }

    #[test]
    fn test_error_to_marker() {
        assert_eq!(
            FormulaError::CircularReference.marker(),
            ErrorMarker::Circular
        );
        assert_eq!(
            FormulaError::Parse("bad".to_string()).marker(),
            ErrorMarker::Error
        );
        assert_eq!(FormulaError::IllegalCharacter(';').marker(), ErrorMarker::Error);
        assert_eq!(FormulaError::NonFinite.marker(), ErrorMarker::Error);
    }
}
