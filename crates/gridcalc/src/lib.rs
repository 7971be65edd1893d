//! # gridcalc
//!
//! A spreadsheet formula engine over a sparse grid of display strings.
//!
//! Cells hold plain text. Entered text starting with `=` is a formula and
//! supports cell references in A1 notation, `SUM` / `AVERAGE` over one
//! rectangular range, and arithmetic with `+ - * /`, parentheses, and
//! unary sign. Evaluation faults render in-band as `#CIRCULAR!` or
//! `#ERROR!`.
//!
//! ## Example
//!
//! ```rust
//! use gridcalc::prelude::*;
//!
//! let mut sheet = Sheet::new();
//! sheet.enter(0, 0, "3");
//! sheet.enter(1, 0, "4");
//! sheet.enter(2, 0, "=SUM(A1:A2)");
//!
//! assert_eq!(sheet.display_value(2, 0).as_deref(), Some("7"));
//!
//! sheet.enter(0, 0, "10");
//! sheet.recalculate();
//! assert_eq!(sheet.display_value(2, 0).as_deref(), Some("14"));
//! ```
//!
//! ## Crate organization
//!
//! - [`gridcalc_core`]: cell references, cells, sparse sheet storage
//! - [`gridcalc_formula`]: formula classification and evaluation
//! - This crate ties them together with entry and recalculation semantics

pub mod prelude;
pub mod recalc;

// Re-export calculation types
pub use recalc::{RecalcStats, SheetCalculationExt};

// Re-export core types
pub use gridcalc_core::{Cell, CellRef, Error, Result, Sheet};

// Re-export formula types
pub use gridcalc_formula::{
    evaluate, evaluate_with_visited, extract_references, is_formula, CellLookup, ErrorMarker,
    FormulaError, FormulaResult, MAX_RANGE_CELLS,
};
