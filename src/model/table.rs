//! Table types.

use super::{spans_text, InlineSpan};
use serde::{Deserialize, Serialize};

/// A single table cell: a sequence of inline spans.
pub type Cell = Vec<InlineSpan>;

/// A pipe table.
///
/// Every row in `rows` has exactly `header.len()` cells, and `alignments`
/// has one entry per column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    /// Header cells
    pub header: Vec<Cell>,

    /// Per-column alignment
    pub alignments: Vec<ColumnAlignment>,

    /// Data rows
    pub rows: Vec<Vec<Cell>>,

    /// Caption from a `:::table Caption` opener
    pub caption: Option<String>,
}

impl Table {
    /// Create a table from a header; rows are added with [`Table::add_row`].
    pub fn new(header: Vec<Cell>) -> Self {
        let columns = header.len();
        Self {
            header,
            alignments: vec![ColumnAlignment::None; columns],
            rows: Vec::new(),
            caption: None,
        }
    }

    /// Set per-column alignments, padding or truncating to the column count.
    pub fn with_alignments(mut self, mut alignments: Vec<ColumnAlignment>) -> Self {
        alignments.resize(self.column_count(), ColumnAlignment::None);
        self.alignments = alignments;
        self
    }

    /// Set the caption.
    pub fn with_caption(mut self, caption: Option<String>) -> Self {
        self.caption = caption;
        self
    }

    /// Add a data row. Missing cells are filled with empty cells and
    /// excess cells are dropped.
    pub fn add_row(&mut self, mut row: Vec<Cell>) {
        row.resize_with(self.column_count(), Vec::new);
        self.rows.push(row);
    }

    /// Get the number of columns.
    pub fn column_count(&self) -> usize {
        self.header.len()
    }

    /// Get the number of data rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Get plain text representation (tab-separated cells, one row per line).
    pub fn plain_text(&self) -> String {
        std::iter::once(&self.header)
            .chain(self.rows.iter())
            .map(|row| {
                row.iter()
                    .map(|cell| spans_text(cell))
                    .collect::<Vec<_>>()
                    .join("\t")
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Column alignment from the separator row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnAlignment {
    /// `:---`
    Left,
    /// `---:`
    Right,
    /// `:---:`
    Center,
    /// `---` or no separator row
    #[default]
    None,
}
