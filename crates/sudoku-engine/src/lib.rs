pub mod board;
pub mod difficulty;
pub mod engine;
pub mod puzzle;
pub mod snapshot;

pub use board::{Board, Cell, SolutionGrid, SudokuError};
pub use difficulty::Difficulty;
pub use engine::{CheckResult, CheckStatus, GameState, SudokuEngine};
pub use snapshot::PuzzleSnapshot;
