//! Query results as text
//!
//! Every cell is rendered to text at fetch time (`None` for SQL NULL), which
//! is all the console needs.

use std::fmt;

/// Rows returned by a query
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultSet {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Option<String>>>,
}

impl ResultSet {
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Option<String>>>) -> Self {
        Self { columns, rows }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Cell at (`row`, `col`), `None` when absent or NULL
    pub fn cell(&self, row: usize, col: usize) -> Option<&str> {
        self.rows.get(row)?.get(col)?.as_deref()
    }

    /// First column of the first row
    pub fn scalar(&self) -> Option<&str> {
        self.cell(0, 0)
    }
}

/// Tab-separated table: header, rows (`null` for NULL), `(N rows)` footer
impl fmt::Display for ResultSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.rows.is_empty() {
            for column in &self.columns {
                write!(f, "{}\t", column)?;
            }
            writeln!(f)?;
            for row in &self.rows {
                for value in row {
                    write!(f, "{}\t", value.as_deref().unwrap_or("null"))?;
                }
                writeln!(f)?;
            }
        }
        let noun = if self.rows.len() == 1 { "row" } else { "rows" };
        writeln!(f, "({} {})", self.rows.len(), noun)
    }
}
