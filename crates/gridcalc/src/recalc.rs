//! Sheet editing and recalculation
//!
//! [`SheetCalculationExt`] adds the commit-time entry semantics to
//! [`Sheet`]: entered text is classified as a formula or a literal, formula
//! results are evaluated immediately, and a separate single-pass
//! [`recalculate`](SheetCalculationExt::recalculate) refreshes every
//! formula cell after edits.
//!
//! # Example
//!
//! ```rust
//! use gridcalc::prelude::*;
//!
//! let mut sheet = Sheet::new();
//! sheet.enter(0, 0, "10");
//! sheet.enter(1, 0, "20");
//! sheet.enter(2, 0, "=A1+A2");
//!
//! assert_eq!(sheet.display_value(2, 0).as_deref(), Some("30"));
//!
//! sheet.enter(0, 0, "15");
//! let stats = sheet.recalculate();
//! assert_eq!(sheet.display_value(2, 0).as_deref(), Some("35"));
//! assert_eq!(stats.changed, 1);
//! ```

use std::collections::HashSet;

use gridcalc_core::{Cell, CellRef, Sheet};
use gridcalc_formula::{evaluate_with_visited, is_formula, ErrorMarker};

/// Statistics from one recalculation pass
#[derive(Debug, Clone, Default)]
pub struct RecalcStats {
    /// Number of formula cells evaluated
    pub formula_cells: usize,
    /// Number of cells whose displayed value changed
    pub changed: usize,
    /// Number of results that were error markers
    pub errors: usize,
}

/// Extension trait adding editing and recalculation to [`Sheet`]
pub trait SheetCalculationExt {
    /// Commit entered text into a cell, returning the stored display value
    ///
    /// Empty (trimmed) input clears the cell. Text starting with `=` is a
    /// formula: it is evaluated immediately against the current sheet and
    /// stored together with its raw text. Anything else is stored as a
    /// literal. Cells depending on this one are not refreshed here; call
    /// [`recalculate`](Self::recalculate) after a batch of edits.
    fn enter(&mut self, row: u32, col: u32, input: &str) -> Option<String>;

    /// Re-evaluate every formula cell once, in row-major order
    ///
    /// Each formula is evaluated against the live sheet, so formulas later
    /// in the pass observe values updated earlier in the same pass. One
    /// pass settles any sheet whose references point to earlier cells in
    /// row-major order; others may need further passes to converge.
    fn recalculate(&mut self) -> RecalcStats;
}

impl SheetCalculationExt for Sheet {
    fn enter(&mut self, row: u32, col: u32, input: &str) -> Option<String> {
        let text = input.trim();

        if text.is_empty() {
            self.remove(row, col);
            return None;
        }

        if is_formula(text) {
            // Seed the visited set with this cell so a direct
            // self-reference reports #CIRCULAR! instead of reading the
            // cell's stale value
            let visited = HashSet::from([CellRef::new(row, col)]);
            let value = evaluate_with_visited(text, &*self, &visited);
            self.set(row, col, Cell::formula(text, value.clone()));
            value
        } else {
            self.set(row, col, Cell::literal(text));
            Some(text.to_string())
        }
    }

    fn recalculate(&mut self) -> RecalcStats {
        let mut stats = RecalcStats::default();

        // Snapshot the formula cells up front; evaluation below reads the
        // live sheet
        let formulas: Vec<(CellRef, String)> = self
            .formula_cells()
            .map(|(at, text)| (at, text.to_string()))
            .collect();

        stats.formula_cells = formulas.len();

        for (at, text) in formulas {
            let visited = HashSet::from([at]);
            let value = evaluate_with_visited(&text, &*self, &visited);

            if value.as_deref().and_then(ErrorMarker::from_str).is_some() {
                stats.errors += 1;
            }

            if let Some(cell) = self.get_mut(at.row, at.col) {
                if cell.value != value {
                    cell.value = value;
                    stats.changed += 1;
                }
            }
        }

        log::debug!(
            "recalculated {} formula cells ({} changed, {} errors)",
            stats.formula_cells,
            stats.changed,
            stats.errors
        );

        stats
    }
}
