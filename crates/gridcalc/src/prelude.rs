//! Prelude module - common imports for gridcalc users
//!
//! ```rust
//! use gridcalc::prelude::*;
//! ```

pub use crate::{
    // Core types
    Cell,
    CellRef,
    // Error types
    Error,
    ErrorMarker,
    // Calculation types
    RecalcStats,
    Result,
    Sheet,
    // Extension traits
    SheetCalculationExt,
};
