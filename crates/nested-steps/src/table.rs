//! Tabular step arguments.
//!
//! A [`Table`] holds ordered rows of ordered string cells exactly as written.
//! Tables reach a step either from a snippet or from the pipe-delimited text
//! parsed by [`Table::from_str`].

use std::collections::HashMap;
use std::str::FromStr;

use derive_more::{Deref, From, IntoIterator};
use thiserror::Error;

/// Rows of cells attached to a step.
///
/// # Examples
/// ```
/// use nested_steps::Table;
///
/// let table: Table = "| name | email |\n| Matt | matt@matt.com |"
///     .parse()
///     .unwrap_or_else(|err| panic!("{err}"));
/// assert_eq!(table.len(), 2);
/// assert_eq!(table.hashes().first().and_then(|row| row.get("email")), Some(&"matt@matt.com"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deref, From, IntoIterator)]
#[into_iterator(owned, ref)]
pub struct Table(Vec<Vec<String>>);

impl Table {
    /// Wrap rows without altering them.
    #[must_use]
    pub fn new(rows: Vec<Vec<String>>) -> Self {
        Self(rows)
    }

    /// All rows in source order.
    #[must_use]
    pub fn rows(&self) -> &[Vec<String>] {
        &self.0
    }

    /// Consume the table and return its rows.
    #[must_use]
    pub fn into_rows(self) -> Vec<Vec<String>> {
        self.0
    }

    /// The first row, conventionally the header.
    #[must_use]
    pub fn header(&self) -> Option<&[String]> {
        self.0.first().map(Vec::as_slice)
    }

    /// Every row after the header keyed by the header cells.
    ///
    /// Cells beyond the header width are ignored.
    #[must_use]
    pub fn hashes(&self) -> Vec<HashMap<&str, &str>> {
        let Some((header, body)) = self.0.split_first() else {
            return Vec::new();
        };
        body.iter()
            .map(|row| {
                header
                    .iter()
                    .map(String::as_str)
                    .zip(row.iter().map(String::as_str))
                    .collect()
            })
            .collect()
    }
}

impl From<Vec<Vec<&str>>> for Table {
    fn from(rows: Vec<Vec<&str>>) -> Self {
        Self(
            rows.into_iter()
                .map(|row| row.into_iter().map(str::to_owned).collect())
                .collect(),
        )
    }
}

/// Errors raised while reading pipe-delimited rows.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    /// The row does not start and end with an unescaped `|`.
    #[error("row {row} must start and end with '|'")]
    UnterminatedRow {
        /// 1-based row index.
        row: usize,
    },
    /// The row width differs from the first row.
    #[error("row {row} has {actual} cells but the first row has {expected}")]
    UnevenRow {
        /// 1-based row index.
        row: usize,
        /// Width of the first row.
        expected: usize,
        /// Width of the offending row.
        actual: usize,
    },
}

impl FromStr for Table {
    type Err = TableError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let mut rows: Vec<Vec<String>> = Vec::new();
        for line in text.lines().filter(|line| !line.trim().is_empty()) {
            let row = rows.len() + 1;
            let cells = parse_row(line).ok_or(TableError::UnterminatedRow { row })?;
            if let Some(first) = rows.first().filter(|first| first.len() != cells.len()) {
                return Err(TableError::UnevenRow {
                    row,
                    expected: first.len(),
                    actual: cells.len(),
                });
            }
            rows.push(cells);
        }
        Ok(Self(rows))
    }
}

/// Split one `| a | b |` line into trimmed, unescaped cells.
///
/// Returns `None` when the line is not delimited by `|` on both ends.
pub(crate) fn parse_row(line: &str) -> Option<Vec<String>> {
    let mut chars = line.trim().chars();
    if chars.next() != Some('|') {
        return None;
    }
    let mut cells = Vec::new();
    let mut cell = String::new();
    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some('|') => cell.push('|'),
                Some('\\') => cell.push('\\'),
                Some('n') => cell.push('\n'),
                Some(other) => {
                    cell.push('\\');
                    cell.push(other);
                }
                None => cell.push('\\'),
            },
            '|' => cells.push(std::mem::take(&mut cell).trim().to_owned()),
            other => cell.push(other),
        }
    }
    cell.trim().is_empty().then_some(cells)
}
