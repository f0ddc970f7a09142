use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SudokuError {
    #[error("coordinate ({row}, {col}) is outside the 9x9 grid")]
    InvalidCoordinate { row: usize, col: usize },
    #[error("digit {digit} is outside 0..=9")]
    InvalidDigit { digit: u8 },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cell {
    Given(u8),
    UserInput(u8),
    Empty,
}

impl Cell {
    pub fn value(&self) -> Option<u8> {
        match self {
            Cell::Given(v) | Cell::UserInput(v) => Some(*v),
            Cell::Empty => None,
        }
    }

    pub fn is_given(&self) -> bool {
        matches!(self, Cell::Given(_))
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }
}

/// Fully solved grid, digits 1-9 only.
pub type SolutionGrid = [[u8; 9]; 9];

/// The player-visible working grid. Owns its cells and bounds-checks every
/// access; out-of-range coordinates signal `InvalidCoordinate` instead of
/// panicking.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    cells: [[Cell; 9]; 9],
}

impl Board {
    pub fn empty() -> Self {
        Self {
            cells: [[Cell::Empty; 9]; 9],
        }
    }

    fn check_bounds(row: usize, col: usize) -> Result<(), SudokuError> {
        if row < 9 && col < 9 {
            Ok(())
        } else {
            Err(SudokuError::InvalidCoordinate { row, col })
        }
    }

    pub fn get(&self, row: usize, col: usize) -> Result<Cell, SudokuError> {
        Self::check_bounds(row, col)?;
        Ok(self.cells[row][col])
    }

    pub fn set(&mut self, row: usize, col: usize, cell: Cell) -> Result<(), SudokuError> {
        Self::check_bounds(row, col)?;
        self.cells[row][col] = cell;
        Ok(())
    }

    pub fn is_given(&self, row: usize, col: usize) -> Result<bool, SudokuError> {
        Ok(self.get(row, col)?.is_given())
    }

    /// Digits with 0 for empty, for snapshots and comparison against the
    /// solution grid.
    pub fn to_digits(&self) -> [[u8; 9]; 9] {
        let mut digits = [[0u8; 9]; 9];
        for r in 0..9 {
            for c in 0..9 {
                digits[r][c] = self.cells[r][c].value().unwrap_or(0);
            }
        }
        digits
    }

    pub fn given_mask(&self) -> [[bool; 9]; 9] {
        let mut mask = [[false; 9]; 9];
        for r in 0..9 {
            for c in 0..9 {
                mask[r][c] = self.cells[r][c].is_given();
            }
        }
        mask
    }

    pub fn filled_count(&self) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|cell| !cell.is_empty())
            .count()
    }
}
