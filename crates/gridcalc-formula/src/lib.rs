//! # gridcalc-formula
//!
//! Formula evaluation for gridcalc.
//!
//! This crate provides:
//! - Formula classification ([`is_formula`])
//! - Reference extraction from formula text ([`extract_references`])
//! - `SUM` / `AVERAGE` over rectangular ranges
//! - Safe arithmetic evaluation with reference substitution
//!
//! Evaluation consumes and produces display strings. Faults surface as the
//! in-band markers `#CIRCULAR!` and `#ERROR!` instead of errors, so a bad
//! formula renders in its cell like any other value.
//!
//! ## Example
//!
//! ```rust
//! use gridcalc_formula::evaluate;
//!
//! let cells = |row: u32, col: u32| -> Option<String> {
//!     (row == 0 && col == 0).then(|| "3".to_string())
//! };
//!
//! assert_eq!(evaluate("=A1+4", &cells).as_deref(), Some("7"));
//! assert_eq!(evaluate("=SUM(A1:A5)", &cells).as_deref(), Some("3"));
//! ```

pub mod error;
pub mod evaluator;
pub mod parser;
pub mod refs;

// Re-exports for convenience
pub use error::{ErrorMarker, FormulaError, FormulaResult};
pub use evaluator::{
    evaluate, evaluate_with_visited, is_formula, CellLookup, MAX_RANGE_CELLS,
};
pub use parser::eval_expression;
pub use refs::extract_references;
