use serde::{Deserialize, Serialize};

/// A slide element kind representing a table of plain-text cells.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Table {
    /// Declared number of rows. Advisory only; `cells` is authoritative.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rows: Option<u32>,
    /// Declared number of columns. Advisory only; `cells` is authoritative.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub columns: Option<u32>,
    /// Cell texts, row by row.
    #[serde(default)]
    pub cells: Vec<Vec<String>>,
}

impl Table {
    /// Number of rows in the actual grid.
    pub fn row_count(&self) -> usize {
        self.cells.len()
    }

    /// Number of columns in the actual grid: the widest row wins, shorter rows
    /// are padded with empty cells.
    pub fn column_count(&self) -> usize {
        self.cells.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Text of the cell at `(row, column)`, empty for padding cells.
    pub fn cell_text(&self, row: usize, column: usize) -> &str {
        self.cells
            .get(row)
            .and_then(|r| r.get(column))
            .map(String::as_str)
            .unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_shape_wins_over_declared_counts() {
        let table = Table {
            rows: Some(7),
            columns: Some(1),
            cells: vec![
                vec!["a".into(), "b".into(), "c".into()],
                vec!["d".into()],
            ],
        };
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.column_count(), 3);
        assert_eq!(table.cell_text(1, 2), "");
        assert_eq!(table.cell_text(0, 1), "b");
    }
}
