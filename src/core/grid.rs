use super::types::PlayerId;
use crate::error::MoveError;
use serde::{Deserialize, Serialize};

pub const ROWS: usize = 6;
pub const COLS: usize = 7;

/// The board: row 0 is the top row, pieces stack from the bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    cells: [[Option<PlayerId>; COLS]; ROWS],
}

impl Grid {
    pub fn new() -> Self {
        Grid {
            cells: [[None; COLS]; ROWS],
        }
    }

    pub fn get(&self, row: usize, col: usize) -> Option<PlayerId> {
        self.cells[row][col]
    }

    pub fn is_column_full(&self, col: usize) -> bool {
        col >= COLS || self.cells[0][col].is_some()
    }

    pub fn is_full(&self) -> bool {
        (0..COLS).all(|col| self.is_column_full(col))
    }

    /// Drops a mark into the lowest empty cell of `col` and returns the
    /// landing row.
    pub fn drop(&mut self, col: usize, player: PlayerId) -> Result<usize, MoveError> {
        if col >= COLS {
            return Err(MoveError::OutOfRange(col));
        }
        for row in (0..ROWS).rev() {
            if self.cells[row][col].is_none() {
                self.cells[row][col] = Some(player);
                return Ok(row);
            }
        }
        Err(MoveError::ColumnFull(col))
    }

    /// Row-major wire encoding: 0 empty, 1 Player1, 2 Player2.
    pub fn flatten(&self) -> Vec<u8> {
        let mut flat = Vec::with_capacity(ROWS * COLS);
        for row in &self.cells {
            for cell in row {
                flat.push(cell.map(PlayerId::mark).unwrap_or(0));
            }
        }
        flat
    }
}

impl Default for Grid {
    fn default() -> Self {
        Grid::new()
    }
}
