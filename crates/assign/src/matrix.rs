use crate::AssignError;
use serde::{Deserialize, Serialize};

pub type Cost = u64;

/// Sentinel cost marking a pairing that must never appear in a solution.
pub const FORBIDDEN: Cost = u64::MAX;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CostMatrix {
    size: usize,
    cells: Vec<Cost>,
}

impl CostMatrix {
    pub fn from_rows(rows: Vec<Vec<Cost>>) -> Result<Self, AssignError> {
        let size = rows.len();
        let mut cells = Vec::with_capacity(size * size);
        for (index, row) in rows.into_iter().enumerate() {
            if row.len() != size {
                return Err(AssignError::Malformed(format!(
                    "row {index} has {} columns, expected {size}",
                    row.len()
                )));
            }
            cells.extend(row);
        }
        Ok(Self { size, cells })
    }

    pub fn from_fn<F>(size: usize, mut cost: F) -> Self
    where
        F: FnMut(usize, usize) -> Cost,
    {
        let mut cells = Vec::with_capacity(size * size);
        for row in 0..size {
            for col in 0..size {
                cells.push(cost(row, col));
            }
        }
        Self { size, cells }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn get(&self, row: usize, col: usize) -> Cost {
        self.cells[row * self.size + col]
    }

    pub fn is_forbidden(&self, row: usize, col: usize) -> bool {
        self.get(row, col) == FORBIDDEN
    }

    pub(crate) fn cells(&self) -> &[Cost] {
        &self.cells
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Assignment {
    pub row_to_col: Vec<usize>,
    pub total: Cost,
}

impl Assignment {
    pub fn col_for_row(&self, row: usize) -> usize {
        self.row_to_col[row]
    }
}
