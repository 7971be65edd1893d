//! Cell data model

/// A single cell: the displayed text plus the formula that produced it
///
/// Cells hold text, never typed numbers. `value` is what the grid shows
/// (for a formula cell, the rendered result of its last evaluation) and
/// `formula` is the raw entered text including the leading `=`, or `None`
/// for literal cells. Numeric meaning is decided at evaluation time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    /// Displayed text, `None` when nothing is shown
    pub value: Option<String>,
    /// Raw formula text starting with `=`, `None` for literal cells
    pub formula: Option<String>,
}

impl Cell {
    /// Create a literal cell holding display text
    pub fn literal<S: Into<String>>(value: S) -> Self {
        Self {
            value: Some(value.into()),
            formula: None,
        }
    }

    /// Create a formula cell from its raw text and current result
    pub fn formula<S: Into<String>>(formula: S, value: Option<String>) -> Self {
        Self {
            value,
            formula: Some(formula.into()),
        }
    }

    /// Create an empty cell
    pub fn empty() -> Self {
        Self::default()
    }

    /// Check whether the cell has neither a value nor a formula
    pub fn is_empty(&self) -> bool {
        self.value.is_none() && self.formula.is_none()
    }

    /// Check whether the cell holds a formula
    pub fn has_formula(&self) -> bool {
        self.formula.is_some()
    }
}
