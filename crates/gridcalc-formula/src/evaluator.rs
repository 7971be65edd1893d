//! Formula evaluation
//!
//! The pipeline treats every cell value as display text and decides numeric
//! meaning here: formula text is classified, range functions are applied,
//! references are substituted by value, and the remaining arithmetic is
//! evaluated. Faults never escape to the caller; they render in-band as
//! `#CIRCULAR!` or `#ERROR!`.
//!
//! # Example
//!
//! ```rust
//! use gridcalc_formula::evaluate;
//!
//! let cells = |row: u32, col: u32| -> Option<String> {
//!     (row == 0 && col == 0).then(|| "10".to_string())
//! };
//!
//! assert_eq!(evaluate("=A1*2+1", &cells).as_deref(), Some("21"));
//! assert_eq!(evaluate("=1/0", &cells).as_deref(), Some("#ERROR!"));
//! ```

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

use gridcalc_core::{CellRef, Sheet};

use crate::error::{FormulaError, FormulaResult};
use crate::parser::eval_expression;
use crate::refs::{extract_references, replace_token};

/// Upper bound on the number of cells one range function will iterate
pub const MAX_RANGE_CELLS: u64 = 1_048_576;

/// Anchored `SUM(ref:ref)` / `AVERAGE(ref:ref)` shape, case-insensitive.
/// The whole formula body must be the range call; no interior whitespace.
static RANGE_FUNCTION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(SUM|AVERAGE)\(([A-Za-z]+[0-9]+):([A-Za-z]+[0-9]+)\)$").unwrap()
});

/// Read access to cell display values during evaluation
///
/// The lookup is total: any coordinate may be asked for, and blank cells
/// answer `None`. Implemented for [`Sheet`] and for any
/// `Fn(u32, u32) -> Option<String>` closure.
pub trait CellLookup {
    /// The display text stored at (row, col), or `None` for blank cells
    fn cell_value(&self, row: u32, col: u32) -> Option<String>;
}

impl<F> CellLookup for F
where
    F: Fn(u32, u32) -> Option<String>,
{
    fn cell_value(&self, row: u32, col: u32) -> Option<String> {
        self(row, col)
    }
}

impl CellLookup for Sheet {
    fn cell_value(&self, row: u32, col: u32) -> Option<String> {
        self.display_value(row, col)
    }
}

/// Check whether entered text is a formula
///
/// A formula is any input whose trimmed text starts with `=`.
///
/// # Examples
///
/// ```
/// use gridcalc_formula::is_formula;
///
/// assert!(is_formula("=A1+1"));
/// assert!(is_formula("  =1+1"));
/// assert!(!is_formula("1+1"));
/// assert!(!is_formula("hello"));
/// ```
pub fn is_formula(input: &str) -> bool {
    input.trim().starts_with('=')
}

/// Evaluate formula text against a cell lookup
///
/// Returns the result as a display string, an error marker (`"#CIRCULAR!"`
/// or `"#ERROR!"`), or `None` when the formula body is empty after removing
/// a leading `=`. A missing `=` is tolerated: `"1+1"` evaluates to `"2"`.
/// This function does not fail; every internal fault becomes a marker.
pub fn evaluate<L: CellLookup>(formula: &str, cells: &L) -> Option<String> {
    evaluate_with_visited(formula, cells, &HashSet::new())
}

/// Evaluate formula text with a set of cells already under evaluation
///
/// `visited` holds the coordinates whose evaluation is in progress. When
/// the formula references any of them the result is `"#CIRCULAR!"`. The set
/// is only consulted, never extended, so detection covers direct
/// self-reference but not longer cycles.
pub fn evaluate_with_visited<L: CellLookup>(
    formula: &str,
    cells: &L,
    visited: &HashSet<CellRef>,
) -> Option<String> {
    let expr = formula.trim();
    let expr = expr.strip_prefix('=').unwrap_or(expr).trim();

    if expr.is_empty() {
        return None;
    }

    match eval_expr(expr, cells, visited) {
        Ok(value) => Some(format_number(value)),
        Err(e) => Some(e.marker().to_string()),
    }
}

/// Evaluate a formula body (no `=`, known non-empty)
fn eval_expr<L: CellLookup>(
    expr: &str,
    cells: &L,
    visited: &HashSet<CellRef>,
) -> FormulaResult<f64> {
    let value = match match_range_function(expr) {
        Some((name, start, end)) => eval_range_function(name, start, end, cells)?,
        None => substitute_and_eval(expr, cells, visited)?,
    };

    if !value.is_finite() {
        return Err(FormulaError::NonFinite);
    }

    Ok(value)
}

/// Match a whole-body `SUM(ref:ref)` / `AVERAGE(ref:ref)` call
///
/// Returns `None` when the body is not a range call, and also when either
/// corner fails to parse as a reference; the caller then treats the text as
/// arithmetic.
fn match_range_function(expr: &str) -> Option<(&str, CellRef, CellRef)> {
    let caps = RANGE_FUNCTION.captures(expr)?;
    let name = caps.get(1)?.as_str();
    let start = CellRef::parse(caps.get(2)?.as_str()).ok()?;
    let end = CellRef::parse(caps.get(3)?.as_str()).ok()?;
    Some((name, start, end))
}

/// Apply SUM or AVERAGE over the rectangle spanned by two corners
///
/// Iteration runs `start.row..=end.row` and `start.col..=end.col`; a corner
/// pair that is reversed on either axis spans no cells. Blank cells count
/// as zero, text that is not a finite number is skipped entirely.
fn eval_range_function<L: CellLookup>(
    name: &str,
    start: CellRef,
    end: CellRef,
    cells: &L,
) -> FormulaResult<f64> {
    let rows = extent(start.row, end.row);
    let cols = extent(start.col, end.col);
    let span = rows * cols;
    if span > MAX_RANGE_CELLS {
        return Err(FormulaError::RangeTooLarge {
            cells: span,
            limit: MAX_RANGE_CELLS,
        });
    }

    let mut sum = 0.0;
    let mut count: u64 = 0;

    for row in start.row..=end.row {
        for col in start.col..=end.col {
            let contribution = match cells.cell_value(row, col) {
                None => Some(0.0),
                Some(text) => parse_finite(&text),
            };
            if let Some(n) = contribution {
                sum += n;
                count += 1;
            }
        }
    }

    if name.eq_ignore_ascii_case("AVERAGE") {
        if count == 0 {
            Ok(0.0)
        } else {
            Ok(sum / count as f64)
        }
    } else {
        Ok(sum)
    }
}

/// Inclusive extent of one axis, zero when the corners are reversed
fn extent(start: u32, end: u32) -> u64 {
    if start <= end {
        (end - start) as u64 + 1
    } else {
        0
    }
}

/// Substitute reference values into the expression and evaluate it
fn substitute_and_eval<L: CellLookup>(
    expr: &str,
    cells: &L,
    visited: &HashSet<CellRef>,
) -> FormulaResult<f64> {
    let mut substituted = expr.to_string();

    for token in extract_references(expr) {
        // Shape-matched tokens that are not usable references stay in the
        // text and fail the character check below
        let at = match CellRef::parse(&token) {
            Ok(at) => at,
            Err(_) => continue,
        };

        if visited.contains(&at) {
            return Err(FormulaError::CircularReference);
        }

        let number = cells
            .cell_value(at.row, at.col)
            .and_then(|text| parse_finite(&text))
            .unwrap_or(0.0);

        substituted = replace_token(&substituted, &token, &format_number(number))?;
    }

    check_characters(&substituted)?;
    eval_expression(&substituted)
}

/// Reject any character outside the arithmetic subset
///
/// After substitution the expression may only contain ASCII digits, the
/// operators `+ - * /`, parentheses, `.`, and whitespace.
fn check_characters(expr: &str) -> FormulaResult<()> {
    for c in expr.chars() {
        let allowed = c.is_ascii_digit()
            || c.is_whitespace()
            || matches!(c, '+' | '-' | '*' | '/' | '(' | ')' | '.');
        if !allowed {
            return Err(FormulaError::IllegalCharacter(c));
        }
    }
    Ok(())
}

/// Parse cell text as a number, `None` unless it is a finite float
///
/// Parsing is strict: the whole trimmed text must be a number, so `"3x"`
/// is rejected rather than read as 3. Infinities and NaN spellings are
/// rejected too.
fn parse_finite(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Render a numeric result the way the grid displays it
///
/// Uses the shortest decimal form that round-trips (`"7"`, not `"7.0"`).
/// Negative zero collapses to `"0"`.
fn format_number(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    format!("{}", value)
}
