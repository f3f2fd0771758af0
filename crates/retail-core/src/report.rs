//! # Report Tables
//!
//! Every listing in the console is printed as a fixed-width text table:
//!
//! ```text
//! storeID                  name                     distance
//! 1                        Corner Shop              25.00
//! ```
//!
//! Each cell is trimmed and left-aligned in a 25-character column. The header
//! row is only printed when there is at least one row.

use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

/// Width of every report column.
pub const COLUMN_WIDTH: usize = 25;

/// Column names plus rows of already-rendered cells.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// Creates an empty table with the given header.
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Table {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Appends a row.
    pub fn push_row<I, S>(&mut self, cells: I)
    where
        I: IntoIterator<Item = S>,
        S: ToString,
    {
        self.rows
            .push(cells.into_iter().map(|c| c.to_string()).collect());
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Renders the table; an empty table renders as an empty string.
    ///
    /// ## Example
    /// ```rust
    /// use retail_core::report::Table;
    ///
    /// let mut table = Table::new(["Name", "Qty"]);
    /// table.push_row(["Widget", "5"]);
    /// let text = table.render();
    /// assert!(text.starts_with("Name                     Qty"));
    /// assert_eq!(text.lines().count(), 2);
    /// ```
    pub fn render(&self) -> String {
        let mut out = String::new();
        if self.rows.is_empty() {
            return out;
        }

        render_line(&mut out, &self.columns);
        for row in &self.rows {
            render_line(&mut out, row);
        }
        out
    }
}

fn render_line(out: &mut String, cells: &[String]) {
    for cell in cells {
        // Writing into a String cannot fail.
        let _ = write!(out, "{:<width$}", cell.trim(), width = COLUMN_WIDTH);
    }
    out.push('\n');
}

/// Formats a distance for display with two decimals.
pub fn format_distance(distance: f64) -> String {
    format!("{:.2}", distance)
}
