//! Pipe table parsing.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::model::{Cell, ColumnAlignment, Table};

use super::inline::{collapse_whitespace, parse_inline};

static ALIGN_CELL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^:?-{3,}:?$").unwrap());

/// Build a table from `|`-prefixed lines.
///
/// The first row is the header. A second row made only of `---`, `:---`,
/// `---:` or `:---:` cells sets column alignments. Lines that do not start
/// with `|` are skipped; with no rows at all the result is a 1x1 table with
/// an empty header cell.
pub fn parse_table<S: AsRef<str>>(lines: &[S]) -> Table {
    let mut rows: Vec<Vec<String>> = lines
        .iter()
        .map(|l| l.as_ref().trim())
        .filter(|l| l.starts_with('|'))
        .map(split_row)
        .collect();

    if rows.is_empty() {
        return Table::new(vec![Cell::new()]);
    }

    let header = rows.remove(0);
    let alignments = match rows.first() {
        Some(second) if is_alignment_row(second) => {
            let aligns = second.iter().map(|c| alignment(c)).collect::<Vec<_>>();
            rows.remove(0);
            Some(aligns)
        }
        _ => None,
    };

    let mut table = Table::new(header.iter().map(|c| cell(c)).collect());
    if let Some(aligns) = alignments {
        table = table.with_alignments(aligns);
    }
    for row in rows {
        table.add_row(row.iter().map(|c| cell(c)).collect());
    }
    table
}

/// Split one row into trimmed raw cells. `\|` is a literal pipe.
pub fn split_row(line: &str) -> Vec<String> {
    let mut cells = Vec::new();
    let mut current = String::new();
    let mut chars = line.trim().chars().peekable();

    if chars.peek() == Some(&'|') {
        chars.next();
    }

    while let Some(c) = chars.next() {
        match c {
            '\\' if chars.peek() == Some(&'|') => {
                current.push('|');
                chars.next();
            }
            '|' => cells.push(std::mem::take(&mut current)),
            other => current.push(other),
        }
    }

    // A trailing unescaped pipe closes the last cell instead of opening a new one.
    let closed = line.trim_end().ends_with('|') && !line.trim_end().ends_with("\\|");
    if !(closed && current.trim().is_empty()) || cells.is_empty() {
        cells.push(current);
    }

    cells.into_iter().map(|c| c.trim().to_string()).collect()
}

fn is_alignment_row(cells: &[String]) -> bool {
    !cells.is_empty() && cells.iter().all(|c| ALIGN_CELL_RE.is_match(c))
}

fn alignment(cell: &str) -> ColumnAlignment {
    match (cell.starts_with(':'), cell.ends_with(':')) {
        (true, true) => ColumnAlignment::Center,
        (false, true) => ColumnAlignment::Right,
        (true, false) => ColumnAlignment::Left,
        (false, false) => ColumnAlignment::None,
    }
}

fn cell(raw: &str) -> Cell {
    parse_inline(&collapse_whitespace(raw))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::InlineSpan;

    #[test]
    fn test_split_row() {
        assert_eq!(split_row("| a | b |"), vec!["a", "b"]);
        assert_eq!(split_row("| a | b"), vec!["a", "b"]);
        assert_eq!(split_row("| a || c |"), vec!["a", "", "c"]);
        assert_eq!(split_row(r"| a \| b | c |"), vec!["a | b", "c"]);
        assert_eq!(split_row("|"), vec![""]);
    }

    #[test]
    fn test_missing_cells_padded() {
        let table = parse_table(&["| A | B | C |", "| x | y |"]);
        assert_eq!(table.column_count(), 3);
        assert_eq!(table.rows[0].len(), 3);
        assert!(table.rows[0][2].is_empty());
    }

    #[test]
    fn test_excess_cells_dropped() {
        let table = parse_table(&["| A | B |", "| 1 | 2 | 3 |"]);
        assert_eq!(table.rows[0].len(), 2);
    }

    #[test]
    fn test_alignment_row() {
        let table = parse_table(&["| L | C | R | N |", "|:---|:---:|---:|---|", "| 1 | 2 | 3 | 4 |"]);
        assert_eq!(
            table.alignments,
            vec![
                ColumnAlignment::Left,
                ColumnAlignment::Center,
                ColumnAlignment::Right,
                ColumnAlignment::None,
            ]
        );
        assert_eq!(table.row_count(), 1);
    }

    #[test]
    fn test_short_dashes_are_data() {
        let table = parse_table(&["| A |", "| -- |"]);
        assert_eq!(table.row_count(), 1);
        assert_eq!(table.alignments, vec![ColumnAlignment::None]);
    }

    #[test]
    fn test_cells_are_inline_parsed() {
        let table = parse_table(&["| **Campo** | Tipo |"]);
        assert_eq!(table.header[0], vec![InlineSpan::bold("Campo")]);
    }

    #[test]
    fn test_empty_table() {
        let table = parse_table(&["", "texto suelto"]);
        assert_eq!(table.column_count(), 1);
        assert!(table.header[0].is_empty());
        assert_eq!(table.row_count(), 0);
    }
}
