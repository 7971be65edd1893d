//! Reference tokens inside formula text

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{FormulaError, FormulaResult};

/// Matches one reference-shaped token: a run of letters then a run of digits
static REFERENCE_TOKEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[A-Za-z]+[0-9]+").unwrap());

/// Extract every cell-reference token from formula text
///
/// Tokens are matched by shape only (letters then digits), uppercased, and
/// deduplicated while keeping first-occurrence order. Whether a token is a
/// usable reference is decided later by [`CellRef::parse`]; tokens like
/// `"A0"` are still returned here.
///
/// # Examples
///
/// ```
/// use gridcalc_formula::extract_references;
///
/// assert_eq!(extract_references("=A1+B2*a1"), vec!["A1", "B2"]);
/// assert_eq!(extract_references("=SUM(A1:B2)"), vec!["A1", "B2"]);
/// assert!(extract_references("=1+2").is_empty());
/// ```
///
/// [`CellRef::parse`]: gridcalc_core::CellRef::parse
pub fn extract_references(formula: &str) -> Vec<String> {
    let mut refs: Vec<String> = Vec::new();

    for m in REFERENCE_TOKEN.find_iter(formula) {
        let token = m.as_str().to_ascii_uppercase();
        if !refs.contains(&token) {
            refs.push(token);
        }
    }

    refs
}

/// Replace every occurrence of a token in the expression, case-insensitively
///
/// The replacement is purely textual, with no expansion of `$` groups.
pub(crate) fn replace_token(expr: &str, token: &str, replacement: &str) -> FormulaResult<String> {
    let pattern = Regex::new(&format!("(?i){}", regex::escape(token)))
        .map_err(|e| FormulaError::Parse(e.to_string()))?;
    Ok(pattern
        .replace_all(expr, regex::NoExpand(replacement))
        .into_owned())
}
