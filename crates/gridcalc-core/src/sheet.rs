//! Sparse sheet storage
//!
//! Only non-empty cells are stored. Rows are kept in a BTreeMap keyed by
//! row index, each holding a BTreeMap keyed by column index, so iteration
//! is always in row-major order.

use std::collections::BTreeMap;

use crate::cell::Cell;
use crate::reference::CellRef;

/// A sparse grid of cells
///
/// There is no fixed extent: any (row, col) coordinate may be read, and
/// coordinates without a stored cell read as blank.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sheet {
    /// Row index → column map
    rows: BTreeMap<u32, BTreeMap<u32, Cell>>,
}

impl Sheet {
    /// Create a new empty sheet
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a cell
    pub fn get(&self, row: u32, col: u32) -> Option<&Cell> {
        self.rows.get(&row).and_then(|r| r.get(&col))
    }

    /// Get a mutable cell
    pub fn get_mut(&mut self, row: u32, col: u32) -> Option<&mut Cell> {
        self.rows.get_mut(&row).and_then(|r| r.get_mut(&col))
    }

    /// Set a cell
    ///
    /// Storing an empty cell removes the entry instead.
    pub fn set(&mut self, row: u32, col: u32, cell: Cell) {
        if cell.is_empty() {
            self.remove(row, col);
        } else {
            self.rows.entry(row).or_default().insert(col, cell);
        }
    }

    /// Remove a cell, returning it if it was present
    pub fn remove(&mut self, row: u32, col: u32) -> Option<Cell> {
        let removed = self.rows.get_mut(&row).and_then(|r| r.remove(&col));

        // Clean up empty rows
        if let Some(row_map) = self.rows.get(&row) {
            if row_map.is_empty() {
                self.rows.remove(&row);
            }
        }

        removed
    }

    /// Remove all cells
    pub fn clear(&mut self) {
        self.rows.clear();
    }

    /// Get the displayed text at a coordinate, `None` for blank cells
    pub fn display_value(&self, row: u32, col: u32) -> Option<String> {
        self.get(row, col).and_then(|cell| cell.value.clone())
    }

    /// Get the formula text at a coordinate, `None` for literal or blank cells
    pub fn formula(&self, row: u32, col: u32) -> Option<&str> {
        self.get(row, col).and_then(|cell| cell.formula.as_deref())
    }

    /// Get the number of stored cells
    pub fn cell_count(&self) -> usize {
        self.rows.values().map(|r| r.len()).sum()
    }

    /// Check whether the sheet has no stored cells
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Get the bounds of stored cells
    ///
    /// Returns `(min_row, min_col, max_row, max_col)`, or `None` when the
    /// sheet is empty.
    pub fn used_bounds(&self) -> Option<(u32, u32, u32, u32)> {
        let min_row = *self.rows.keys().next()?;
        let max_row = *self.rows.keys().next_back()?;

        let mut min_col = u32::MAX;
        let mut max_col = 0u32;

        for row_map in self.rows.values() {
            if let Some(&col) = row_map.keys().next() {
                min_col = min_col.min(col);
            }
            if let Some(&col) = row_map.keys().next_back() {
                max_col = max_col.max(col);
            }
        }

        Some((min_row, min_col, max_row, max_col))
    }

    /// Iterate over stored cells in row-major order
    pub fn iter(&self) -> impl Iterator<Item = (CellRef, &Cell)> {
        self.rows.iter().flat_map(|(&row, cols)| {
            cols.iter()
                .map(move |(&col, cell)| (CellRef::new(row, col), cell))
        })
    }

    /// Iterate over formula cells in row-major order
    pub fn formula_cells(&self) -> impl Iterator<Item = (CellRef, &str)> {
        self.iter()
            .filter_map(|(at, cell)| cell.formula.as_deref().map(|f| (at, f)))
    }
}
