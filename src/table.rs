//! Table rendering for transaction reports, on top of `tabled`.

use crate::errors::AppError;
use crate::transactions::Transaction;
use std::str::FromStr;
use tabled::builder::Builder;
use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Modify, Style};

/// Layout of the rendered table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TableFormat {
    /// Header, a dashed rule, then rows (`Style::psql`).
    #[default]
    Simple,
    /// Whitespace only, no rules.
    Plain,
    /// Boxed cells drawn with `+`, `-` and `|`.
    Grid,
    /// Markdown pipe table.
    Pipe,
}

impl FromStr for TableFormat {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "simple" => Ok(TableFormat::Simple),
            "plain" => Ok(TableFormat::Plain),
            "grid" => Ok(TableFormat::Grid),
            "pipe" => Ok(TableFormat::Pipe),
            other => Err(AppError::Config(format!(
                "Unknown table format '{}' (expected simple, plain, grid or pipe)",
                other
            ))),
        }
    }
}

// Digits required so "nan" or "inf" in a name column stay text
fn is_number(value: &str) -> bool {
    value.parse::<f64>().is_ok() && value.chars().any(|c| c.is_ascii_digit())
}

fn is_integer(value: &str) -> bool {
    let digits = value.strip_prefix(['-', '+']).unwrap_or(value);
    !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit())
}

/// Finds the numeric columns and rewrites fractional ones with two decimals.
///
/// Returns the indices of every numeric column so they can be right-aligned.
fn format_numeric_columns(rows: &mut [Vec<String>], width: usize) -> Vec<usize> {
    let mut numeric = Vec::new();

    for col in 0..width {
        let values: Vec<&str> = rows
            .iter()
            .map(|r| r[col].trim())
            .filter(|v| !v.is_empty())
            .collect();
        if values.is_empty() || !values.iter().all(|v| is_number(v)) {
            continue;
        }

        numeric.push(col);
        if values.iter().all(|v| is_integer(v)) {
            continue;
        }
        for row in rows.iter_mut() {
            if let Ok(n) = row[col].trim().parse::<f64>() {
                row[col] = format!("{:.2}", n);
            }
        }
    }

    numeric
}

/// Renders the given transactions with one column per requested field.
///
/// Fields missing from a transaction render as empty cells.
pub fn render_transactions<S: AsRef<str>>(
    txns: &[Transaction],
    format: TableFormat,
    columns: &[S],
) -> String {
    let mut rows: Vec<Vec<String>> = txns
        .iter()
        .map(|txn| {
            columns
                .iter()
                .map(|c| txn.get(c.as_ref()).cloned().unwrap_or_default())
                .collect()
        })
        .collect();
    let numeric = format_numeric_columns(&mut rows, columns.len());

    let mut builder = Builder::default();
    builder.push_record(columns.iter().map(|c| c.as_ref().to_string()));
    for row in rows {
        builder.push_record(row);
    }

    let mut table = builder.build();
    match format {
        TableFormat::Simple => table.with(Style::psql()),
        TableFormat::Plain => table.with(Style::blank()),
        TableFormat::Grid => table.with(Style::ascii()),
        TableFormat::Pipe => table.with(Style::markdown()),
    };
    for col in numeric {
        table.with(Modify::new(Columns::single(col)).with(Alignment::right()));
    }

    table.to_string()
}

/// Writes the rendered table to stdout.
pub fn print_transactions<S: AsRef<str>>(txns: &[Transaction], format: TableFormat, columns: &[S]) {
    println!("{}", render_transactions(txns, format, columns));
}
