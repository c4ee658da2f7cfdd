//! Labelled two-dimensional result tables.

use hc_core::Real;
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Cell {
    #[default]
    Empty,
    Number(Real),
    Text(String),
}

impl Cell {
    pub fn as_number(&self) -> Option<Real> {
        match self {
            Cell::Number(v) => Some(*v),
            _ => None,
        }
    }
}

/// Rows by `index`, columns by `columns`; `cells[row][column]`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Table {
    pub name: String,
    pub index: Vec<String>,
    pub columns: Vec<String>,
    pub cells: Vec<Vec<Cell>>,
}

impl Table {
    pub fn new(name: impl Into<String>, columns: Vec<String>) -> Self {
        Self {
            name: name.into(),
            columns,
            ..Self::default()
        }
    }

    /// Append a row; missing trailing cells are left empty.
    pub fn push_row(&mut self, label: impl Into<String>, mut cells: Vec<Cell>) {
        cells.resize(self.columns.len(), Cell::Empty);
        self.index.push(label.into());
        self.cells.push(cells);
    }

    pub fn get(&self, row: &str, column: &str) -> Option<&Cell> {
        let r = self.index.iter().position(|i| i == row)?;
        let c = self.columns.iter().position(|i| i == column)?;
        self.cells.get(r)?.get(c)
    }

    pub fn number(&self, row: &str, column: &str) -> Option<Real> {
        self.get(row, column).and_then(Cell::as_number)
    }

    pub fn transpose(self) -> Table {
        let mut cells = vec![Vec::with_capacity(self.index.len()); self.columns.len()];
        for row in self.cells {
            for (c, cell) in row.into_iter().enumerate() {
                cells[c].push(cell);
            }
        }
        Table {
            name: self.name,
            index: self.columns,
            columns: self.index,
            cells,
        }
    }

    /// Sum of the numeric cells of each row.
    pub fn row_sums(&self) -> Vec<(String, Real)> {
        self.index
            .iter()
            .zip(&self.cells)
            .map(|(label, row)| (label.clone(), row.iter().filter_map(Cell::as_number).sum()))
            .collect()
    }
}
