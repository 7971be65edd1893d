//! gridcalc CLI - evaluate formulas and render grids

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;

use gridcalc::prelude::*;

#[derive(Parser)]
#[command(name = "gridcalc")]
#[command(author, version, about = "Spreadsheet formula evaluation tool")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate a single formula against ad-hoc cell bindings
    Eval {
        /// Formula text, e.g. "=A1+B2*2"
        formula: String,

        /// Cell binding in REF=TEXT form (repeatable)
        #[arg(short = 'c', long = "cell", value_name = "REF=TEXT")]
        cells: Vec<String>,
    },

    /// Load a grid from an assignments file, recalculate, and render it
    Show {
        /// Input file with one "REF = text" assignment per line
        input: PathBuf,

        /// Output cells as JSON records instead of a table
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Eval { formula, cells } => eval_formula(&formula, &cells),
        Commands::Show { input, json } => show_grid(&input, json),
    }
}

fn eval_formula(formula: &str, bindings: &[String]) -> Result<()> {
    let mut sheet = Sheet::new();

    for binding in bindings {
        let (at, text) = parse_binding(binding)?;
        sheet.enter(at.row, at.col, &text);
    }
    sheet.recalculate();

    match gridcalc::evaluate(formula, &sheet) {
        Some(result) => println!("{}", result),
        None => println!("(empty)"),
    }

    Ok(())
}

fn show_grid(input: &Path, json: bool) -> Result<()> {
    let mut sheet = load_grid(input)?;

    let stats = sheet.recalculate();
    eprintln!(
        "Recalculated {} formulas ({} errors)",
        stats.formula_cells, stats.errors
    );

    if json {
        print_json(&sheet)?;
    } else {
        print!("{}", render_table(&sheet));
    }

    Ok(())
}

/// Parse a "REF=TEXT" binding from the command line
fn parse_binding(binding: &str) -> Result<(CellRef, String)> {
    let (reference, text) = binding
        .split_once('=')
        .with_context(|| format!("Binding '{}' is not in REF=TEXT form", binding))?;

    let at = CellRef::parse(reference)
        .with_context(|| format!("Invalid cell reference in binding '{}'", binding))?;

    Ok((at, text.trim().to_string()))
}

/// Load a grid from an assignments file
fn load_grid(path: &Path) -> Result<Sheet> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read '{}'", path.display()))?;

    let mut sheet = Sheet::new();
    load_assignments(&mut sheet, &content);
    Ok(sheet)
}

/// Apply "REF = text" assignment lines to the sheet
///
/// Blank lines and lines starting with `#` are skipped. Malformed lines
/// produce a warning and are skipped.
fn load_assignments(sheet: &mut Sheet, content: &str) {
    for (number, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        match parse_assignment(line) {
            Ok((at, text)) => {
                sheet.enter(at.row, at.col, &text);
            }
            Err(e) => {
                eprintln!("Warning: skipping line {}: {}", number + 1, e);
            }
        }
    }
}

/// Parse one "REF = text" assignment line
///
/// The text after the first `=` is the cell entry, so formulas arrive as
/// `C1 = =A1*B1`.
fn parse_assignment(line: &str) -> Result<(CellRef, String)> {
    let (reference, text) = line.split_once('=').context("expected 'REF = text'")?;

    let at = CellRef::parse(reference.trim()).context("invalid cell reference")?;

    Ok((at, text.trim().to_string()))
}

/// Render the used region as an aligned table with A1-style headers
fn render_table(sheet: &Sheet) -> String {
    let (min_row, min_col, max_row, max_col) = match sheet.used_bounds() {
        Some(bounds) => bounds,
        None => return "(empty grid)\n".to_string(),
    };

    // Column widths: the wider of the header letters and the cell text
    let mut widths: Vec<usize> = Vec::new();
    for col in min_col..=max_col {
        let mut width = CellRef::column_to_letters(col).len();
        for row in min_row..=max_row {
            if let Some(text) = sheet.display_value(row, col) {
                width = width.max(text.chars().count());
            }
        }
        widths.push(width);
    }

    let row_label_width = (max_row as u64 + 1).to_string().len();
    let mut out = String::new();

    out.push_str(&" ".repeat(row_label_width));
    for (i, col) in (min_col..=max_col).enumerate() {
        let letters = CellRef::column_to_letters(col);
        out.push_str("  ");
        out.push_str(&format!("{:>width$}", letters, width = widths[i]));
    }
    out.push('\n');

    for row in min_row..=max_row {
        let mut line = format!("{:>width$}", row as u64 + 1, width = row_label_width);
        for (i, col) in (min_col..=max_col).enumerate() {
            let text = sheet.display_value(row, col).unwrap_or_default();
            line.push_str("  ");
            line.push_str(&format!("{:>width$}", text, width = widths[i]));
        }
        out.push_str(line.trim_end());
        out.push('\n');
    }

    out
}

/// One stored cell in JSON output
#[derive(Serialize)]
struct CellRecord<'a> {
    reference: String,
    row: u32,
    col: u32,
    value: Option<&'a str>,
    formula: Option<&'a str>,
}

fn print_json(sheet: &Sheet) -> Result<()> {
    let records: Vec<CellRecord> = sheet
        .iter()
        .map(|(at, cell)| CellRecord {
            reference: at.to_string(),
            row: at.row,
            col: at.col,
            value: cell.value.as_deref(),
            formula: cell.formula.as_deref(),
        })
        .collect();

    let output = serde_json::to_string_pretty(&records).context("Failed to encode cells")?;
    println!("{}", output);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_binding() {
        let (at, text) = parse_binding("A1=3").unwrap();
        assert_eq!(at, CellRef::new(0, 0));
        assert_eq!(text, "3");

        let (at, text) = parse_binding("b2==A1*2").unwrap();
        assert_eq!(at, CellRef::new(1, 1));
        assert_eq!(text, "=A1*2");
    }

    #[test]
    fn test_parse_binding_errors() {
        assert!(parse_binding("A1").is_err());
        assert!(parse_binding("1A=3").is_err());
    }

    #[test]
    fn test_parse_assignment() {
        let (at, text) = parse_assignment("C10 = hello world").unwrap();
        assert_eq!(at, CellRef::new(9, 2));
        assert_eq!(text, "hello world");

        let (at, text) = parse_assignment("A1 = =SUM(B1:B9)").unwrap();
        assert_eq!(at, CellRef::new(0, 0));
        assert_eq!(text, "=SUM(B1:B9)");
    }

    #[test]
    fn test_load_assignments_skips_comments_and_bad_lines() {
        let mut sheet = Sheet::new();
        load_assignments(
            &mut sheet,
            "# a comment\n\nA1 = 3\nbogus line\nA2 = =A1*2\n",
        );

        assert_eq!(sheet.cell_count(), 2);
        assert_eq!(sheet.display_value(0, 0).as_deref(), Some("3"));
        assert_eq!(sheet.display_value(1, 0).as_deref(), Some("6"));
    }

    #[test]
    fn test_load_grid_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "# quarterly units").unwrap();
        writeln!(file, "A1 = 120").unwrap();
        writeln!(file, "A2 = 95").unwrap();
        writeln!(file, "A3 = =SUM(A1:A2)").unwrap();

        let sheet = load_grid(file.path()).unwrap();
        assert_eq!(sheet.cell_count(), 3);
        assert_eq!(sheet.display_value(2, 0).as_deref(), Some("215"));
    }

    #[test]
    fn test_load_grid_missing_file() {
        assert!(load_grid(Path::new("/nonexistent/grid.txt")).is_err());
    }

    #[test]
    fn test_render_table() {
        let mut sheet = Sheet::new();
        sheet.enter(0, 0, "1");
        sheet.enter(0, 1, "22");
        sheet.enter(1, 0, "333");
        sheet.enter(1, 1, "=A2*2");

        let table = render_table(&sheet);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines, vec!["     A    B", "1    1   22", "2  333  666"]);
    }

    #[test]
    fn test_render_table_window_starts_at_used_bounds() {
        let mut sheet = Sheet::new();
        sheet.enter(9, 2, "x");

        let table = render_table(&sheet);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines, vec!["    C", "10  x"]);
    }

    #[test]
    fn test_render_empty_grid() {
        assert_eq!(render_table(&Sheet::new()), "(empty grid)\n");
    }
}
