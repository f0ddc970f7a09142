use rand::RngExt;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Match3Error {
    #[error("coordinate ({row}, {col}) is outside the {rows}x{cols} board")]
    InvalidCoordinate {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },
    #[error("board did not stabilize within {passes} passes")]
    DidNotStabilize { passes: usize },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Color {
    Red,
    Green,
    Blue,
    Yellow,
    Purple,
    Orange,
}

impl Color {
    pub const ALL: [Color; 6] = [
        Color::Red,
        Color::Green,
        Color::Blue,
        Color::Yellow,
        Color::Purple,
        Color::Orange,
    ];
}

/// A board cell. `None` exists only transiently between the clear and refill
/// steps of a cascade pass; every board observable outside a pass is fully
/// populated.
pub type Tile = Option<Color>;

/// Owned tile grid with flat row-major storage and bounds-checked access.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    rows: usize,
    cols: usize,
    cells: Vec<Tile>,
}

impl Board {
    /// Create an all-empty board. Callers fill it via `fill_random` or
    /// `set`; the engine never exposes it empty.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![None; rows * cols],
        }
    }

    /// Build a board from color rows, for tests and scripted setups.
    /// Rows must be non-empty and of equal length.
    pub fn from_colors(rows: &[Vec<Color>]) -> Self {
        let height = rows.len();
        let width = rows.first().map_or(0, |r| r.len());
        assert!(rows.iter().all(|r| r.len() == width), "ragged rows");

        let mut board = Self::new(height, width);
        for (r, row) in rows.iter().enumerate() {
            for (c, &color) in row.iter().enumerate() {
                board.cells[r * width + c] = Some(color);
            }
        }
        board
    }

    fn index(&self, row: usize, col: usize) -> Result<usize, Match3Error> {
        if row < self.rows && col < self.cols {
            Ok(row * self.cols + col)
        } else {
            Err(Match3Error::InvalidCoordinate {
                row,
                col,
                rows: self.rows,
                cols: self.cols,
            })
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn get(&self, row: usize, col: usize) -> Result<Tile, Match3Error> {
        Ok(self.cells[self.index(row, col)?])
    }

    /// In-bounds access for internal scans that iterate over the grid.
    pub(crate) fn tile(&self, row: usize, col: usize) -> Tile {
        debug_assert!(row < self.rows && col < self.cols);
        self.cells[row * self.cols + col]
    }

    pub fn set(&mut self, row: usize, col: usize, tile: Tile) -> Result<(), Match3Error> {
        let idx = self.index(row, col)?;
        self.cells[idx] = tile;
        Ok(())
    }

    pub fn swap(
        &mut self,
        r1: usize,
        c1: usize,
        r2: usize,
        c2: usize,
    ) -> Result<(), Match3Error> {
        let a = self.index(r1, c1)?;
        let b = self.index(r2, c2)?;
        self.cells.swap(a, b);
        Ok(())
    }

    /// Fill every cell with a uniformly random palette color.
    pub fn fill_random<R: RngExt + ?Sized>(&mut self, rng: &mut R) {
        for cell in &mut self.cells {
            *cell = Some(random_color(rng));
        }
    }

    /// Replace every empty cell with a uniformly random palette color.
    pub fn refill<R: RngExt + ?Sized>(&mut self, rng: &mut R) {
        for cell in &mut self.cells {
            if cell.is_none() {
                *cell = Some(random_color(rng));
            }
        }
    }

    /// Per-column compaction: non-empty tiles fall to the bottom preserving
    /// relative order, empties collect at the top.
    pub fn apply_gravity(&mut self) {
        for col in 0..self.cols {
            let mut write = self.rows;
            for read in (0..self.rows).rev() {
                if self.cells[read * self.cols + col].is_some() {
                    write -= 1;
                    if write != read {
                        self.cells[write * self.cols + col] =
                            self.cells[read * self.cols + col];
                        self.cells[read * self.cols + col] = None;
                    }
                }
            }
        }
    }

    /// Row-by-row snapshot, for pass events and render layers.
    pub fn to_rows(&self) -> Vec<Vec<Tile>> {
        (0..self.rows)
            .map(|r| self.cells[r * self.cols..(r + 1) * self.cols].to_vec())
            .collect()
    }
}

pub(crate) fn random_color<R: RngExt + ?Sized>(rng: &mut R) -> Color {
    Color::ALL[rng.random_range(0..Color::ALL.len())]
}
