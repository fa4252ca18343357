//! Raw table grid as delivered by a table-extraction tool
//!
//! Row 0 is the header. Every cell is either absent or a (possibly
//! multi-line) string. Rows may be ragged; missing trailing cells read as
//! absent.

/// A borrowed view of one populated cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell<'a> {
    /// Row index (0 is the header)
    pub row: usize,
    /// Column index
    pub column: usize,
    /// Raw cell text, untrimmed
    pub text: &'a str,
}

impl Cell<'_> {
    /// Cell text with surrounding whitespace removed
    pub fn trimmed(&self) -> &str {
        self.text.trim()
    }
}

/// A row-major table of optional cell texts
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Grid {
    rows: Vec<Vec<Option<String>>>,
}

impl Grid {
    /// Create a grid from optional cells
    pub fn from_rows(rows: Vec<Vec<Option<String>>>) -> Self {
        Grid { rows }
    }

    /// Create a grid from plain strings; blank strings become absent cells
    pub fn from_text_rows<R, S>(rows: R) -> Self
    where
        R: IntoIterator,
        R::Item: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let rows = rows
            .into_iter()
            .map(|row| {
                row.into_iter()
                    .map(|cell| {
                        let text = cell.as_ref();
                        (!text.trim().is_empty()).then(|| text.to_string())
                    })
                    .collect()
            })
            .collect();
        Grid { rows }
    }

    /// Number of rows, header included
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Widest row length
    pub fn width(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// True when there is no header row
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The header row, if any
    pub fn header(&self) -> Option<&[Option<String>]> {
        self.rows.first().map(Vec::as_slice)
    }

    /// All rows including the header
    pub fn rows(&self) -> &[Vec<Option<String>>] {
        &self.rows
    }

    /// A populated cell. Absent, out-of-range and whitespace-only cells yield `None`.
    pub fn cell(&self, row: usize, column: usize) -> Option<Cell<'_>> {
        let text = self.rows.get(row)?.get(column)?.as_deref()?;
        if text.trim().is_empty() {
            return None;
        }
        Some(Cell { row, column, text })
    }
}

impl From<Vec<Vec<Option<String>>>> for Grid {
    fn from(rows: Vec<Vec<Option<String>>>) -> Self {
        Grid::from_rows(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_text_rows_blank_cells() {
        let grid = Grid::from_text_rows([vec!["", "Mo."], vec!["  ", "En"]]);
        assert_eq!(grid.height(), 2);
        assert_eq!(grid.width(), 2);
        assert!(grid.cell(1, 0).is_none());
        assert_eq!(grid.cell(1, 1).map(|c| c.text), Some("En"));
    }

    #[test]
    fn test_ragged_rows() {
        let grid = Grid::from_rows(vec![
            vec![None, Some("Mo".into()), Some("Di".into())],
            vec![Some("08:00".into())],
        ]);
        assert_eq!(grid.width(), 3);
        assert!(grid.cell(1, 2).is_none());
        assert!(grid.cell(7, 0).is_none());
        assert_eq!(grid.cell(1, 0).map(|c| (c.row, c.column)), Some((1, 0)));
    }

    #[test]
    fn test_empty_grid() {
        let grid = Grid::default();
        assert!(grid.is_empty());
        assert!(grid.header().is_none());
        assert_eq!(grid.width(), 0);
    }

    #[test]
    fn test_trimmed() {
        let grid = Grid::from_text_rows([vec!["Mo"], vec!["  Math - R1 \n"]]);
        let cell = grid.cell(1, 0).unwrap();
        assert_eq!(cell.trimmed(), "Math - R1");
    }
}
