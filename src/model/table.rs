//! Table types.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A table of cell text, rendered with its first row as header.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Table {
    rows: Vec<Vec<String>>,
    num_rows: usize,
    num_cols: usize,
    column_alignments: Vec<Alignment>,

    /// Whether the first row is a header row
    pub header: bool,

    /// Table caption
    pub caption: Option<String>,
}

impl Table {
    /// Create a new empty table.
    pub fn new() -> Self {
        Self {
            rows: Vec::new(),
            num_rows: 0,
            num_cols: 0,
            column_alignments: Vec::new(),
            header: true,
            caption: None,
        }
    }

    /// Create a table from rows of cell text.
    pub fn from_rows(rows: Vec<Vec<String>>) -> Self {
        let mut table = Self::new();
        for row in rows {
            table.add_row(row);
        }
        table
    }

    /// Set the caption.
    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }

    /// Append a row. Widens the column count and alignments as needed.
    pub fn add_row(&mut self, row: Vec<String>) {
        self.num_cols = self.num_cols.max(row.len());
        self.ensure_alignments(self.num_cols);
        self.rows.push(row);
        self.num_rows = self.rows.len();
    }

    /// Set the alignment of a column, extending alignments if needed.
    ///
    /// Fails with [`Error::InvalidAlignment`] when `index` is `usize::MAX`.
    pub fn set_column_alignment(&mut self, index: usize, alignment: Alignment) -> Result<()> {
        let len = index
            .checked_add(1)
            .ok_or_else(|| Error::InvalidAlignment(format!("column index {} out of range", index)))?;
        self.ensure_alignments(len);
        self.column_alignments[index] = alignment;
        Ok(())
    }

    /// Set a column alignment by name ("left", "center" or "right").
    pub fn set_column_alignment_str(&mut self, index: usize, alignment: &str) -> Result<()> {
        let alignment = alignment.parse()?;
        self.set_column_alignment(index, alignment)
    }

    fn ensure_alignments(&mut self, len: usize) {
        if self.column_alignments.len() < len {
            self.column_alignments.resize(len, Alignment::Left);
        }
    }

    /// Rows in order.
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Get the number of rows.
    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    /// Get the number of columns (widest row seen).
    pub fn num_cols(&self) -> usize {
        self.num_cols
    }

    /// Column alignments; at least `num_cols` entries.
    pub fn column_alignments(&self) -> &[Alignment] {
        &self.column_alignments
    }

    /// Alignment of a column, `Left` when unset.
    pub fn alignment(&self, index: usize) -> Alignment {
        self.column_alignments
            .get(index)
            .copied()
            .unwrap_or_default()
    }

    /// Check if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Get plain text representation of the table.
    pub fn plain_text(&self) -> String {
        self.rows
            .iter()
            .map(|row| row.join("\t"))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Default for Table {
    fn default() -> Self {
        Self::new()
    }
}

/// Column alignment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    /// Left-aligned (default)
    #[default]
    Left,
    /// Centered
    Center,
    /// Right-aligned
    Right,
}

impl Alignment {
    /// Separator cell for a Markdown table.
    pub fn separator(&self) -> &'static str {
        match self {
            Alignment::Left => ":-",
            Alignment::Center => ":-:",
            Alignment::Right => "-:",
        }
    }
}

impl FromStr for Alignment {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "left" => Ok(Alignment::Left),
            "center" => Ok(Alignment::Center),
            "right" => Ok(Alignment::Right),
            other => Err(Error::InvalidAlignment(other.to_string())),
        }
    }
}

impl fmt::Display for Alignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Alignment::Left => write!(f, "left"),
            Alignment::Center => write!(f, "center"),
            Alignment::Right => write!(f, "right"),
        }
    }
}
