//! # gridcalc-core
//!
//! Core data structures for the gridcalc formula engine.
//!
//! This crate provides the fundamental types used throughout gridcalc:
//! - [`CellRef`] - Cell references in A1 notation with bijective base-26
//!   column letters
//! - [`Cell`] - A cell's displayed text and optional formula text
//! - [`Sheet`] - Sparse row-major cell storage
//!
//! ## Example
//!
//! ```rust
//! use gridcalc_core::{Cell, CellRef, Sheet};
//!
//! let mut sheet = Sheet::new();
//! sheet.set(0, 0, Cell::literal("3"));
//! sheet.set(1, 0, Cell::literal("4"));
//!
//! assert_eq!(sheet.display_value(0, 0).as_deref(), Some("3"));
//! assert_eq!(CellRef::parse("A2").unwrap(), CellRef::new(1, 0));
//! ```

pub mod cell;
pub mod error;
pub mod reference;
pub mod sheet;

// Re-exports for convenience
pub use cell::Cell;
pub use error::{Error, Result};
pub use reference::CellRef;
pub use sheet::Sheet;
