use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use crate::board::{Board, Cell, SolutionGrid, SudokuError};
use crate::difficulty::Difficulty;
use crate::puzzle::generate_puzzle;
use crate::snapshot::PuzzleSnapshot;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameState {
    Unstarted,
    Generated,
    Editing,
    Checked,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CheckStatus {
    CompleteCorrect,
    IncompleteNoErrors,
    HasErrors,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckResult {
    pub status: CheckStatus,
    /// Filled cells whose value differs from the solution
    pub erroring_cells: Vec<(usize, usize)>,
}

/// One Sudoku game. Owns the working board, the retained solution and the
/// random source; independent games are independent instances.
pub struct SudokuEngine {
    board: Board,
    solution: SolutionGrid,
    difficulty: Option<Difficulty>,
    selected: Option<(usize, usize)>,
    state: GameState,
    rng: StdRng,
}

impl SudokuEngine {
    pub fn new() -> Self {
        Self::from_rng(StdRng::from_rng(&mut rand::rng()))
    }

    /// Seeded construction for reproducible games and tests.
    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    fn from_rng(rng: StdRng) -> Self {
        Self {
            board: Board::empty(),
            solution: [[0u8; 9]; 9],
            difficulty: None,
            selected: None,
            state: GameState::Unstarted,
            rng,
        }
    }

    /// Generate a fresh puzzle, discarding any game in progress. Resets to
    /// `Generated` from every state.
    pub fn new_puzzle(&mut self, difficulty: Difficulty) -> PuzzleSnapshot {
        let (board, solution) = generate_puzzle(difficulty, &mut self.rng);
        self.board = board;
        self.solution = solution;
        self.difficulty = Some(difficulty);
        self.selected = None;
        self.state = GameState::Generated;
        self.snapshot()
    }

    /// Write `digit` into the working board. Digit 0 clears the cell.
    /// Writes to given cells are silently ignored; the board is unchanged
    /// and no error is raised.
    pub fn set_cell(&mut self, row: usize, col: usize, digit: u8) -> Result<&Board, SudokuError> {
        if digit > 9 {
            return Err(SudokuError::InvalidDigit { digit });
        }
        let cell = self.board.get(row, col)?;
        if cell.is_given() {
            return Ok(&self.board);
        }
        let new = if digit == 0 {
            Cell::Empty
        } else {
            Cell::UserInput(digit)
        };
        self.board.set(row, col, new)?;
        self.state = GameState::Editing;
        Ok(&self.board)
    }

    /// Move the UI focus. Has no effect on correctness.
    pub fn select(&mut self, row: usize, col: usize) -> Result<(), SudokuError> {
        self.board.get(row, col)?;
        self.selected = Some((row, col));
        Ok(())
    }

    pub fn selected(&self) -> Option<(usize, usize)> {
        self.selected
    }

    /// Compare the working board against the retained solution. Filled cells
    /// that differ from the solution are errors; empty cells mark the puzzle
    /// incomplete.
    pub fn check(&mut self) -> CheckResult {
        let mut erroring_cells = Vec::new();
        let mut empties = 0usize;

        let digits = self.board.to_digits();
        for r in 0..9 {
            for c in 0..9 {
                if digits[r][c] == 0 {
                    empties += 1;
                } else if digits[r][c] != self.solution[r][c] {
                    erroring_cells.push((r, c));
                }
            }
        }

        let status = if !erroring_cells.is_empty() {
            CheckStatus::HasErrors
        } else if empties > 0 {
            CheckStatus::IncompleteNoErrors
        } else {
            CheckStatus::CompleteCorrect
        };

        self.state = GameState::Checked;
        CheckResult {
            status,
            erroring_cells,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn difficulty(&self) -> Option<Difficulty> {
        self.difficulty
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn snapshot(&self) -> PuzzleSnapshot {
        PuzzleSnapshot {
            board: self.board.to_digits(),
            given: self.board.given_mask(),
            difficulty: self.difficulty,
        }
    }
}

impl Default for SudokuEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_puzzle_resets_from_any_state() {
        let mut engine = SudokuEngine::with_seed(3);
        assert_eq!(engine.state(), GameState::Unstarted);

        engine.new_puzzle(Difficulty::Easy);
        assert_eq!(engine.state(), GameState::Generated);

        // drive into Editing then Checked, then reset again
        let (r, c) = first_empty(&engine);
        engine.set_cell(r, c, 1).unwrap();
        assert_eq!(engine.state(), GameState::Editing);
        engine.check();
        assert_eq!(engine.state(), GameState::Checked);

        engine.new_puzzle(Difficulty::Hard);
        assert_eq!(engine.state(), GameState::Generated);
        assert_eq!(engine.difficulty(), Some(Difficulty::Hard));
    }

    #[test]
    fn set_cell_on_given_is_a_no_op() {
        let mut engine = SudokuEngine::with_seed(8);
        engine.new_puzzle(Difficulty::Easy);

        let (r, c) = first_given(&engine);
        let before = engine.board().clone();
        engine.set_cell(r, c, 9).unwrap();
        assert_eq!(engine.board(), &before);
        // state stays Generated: nothing was edited
        assert_eq!(engine.state(), GameState::Generated);
    }

    #[test]
    fn set_cell_rejects_bad_input() {
        let mut engine = SudokuEngine::with_seed(8);
        engine.new_puzzle(Difficulty::Easy);
        let before = engine.board().clone();

        assert_eq!(
            engine.set_cell(9, 0, 1),
            Err(SudokuError::InvalidCoordinate { row: 9, col: 0 })
        );
        assert_eq!(
            engine.set_cell(0, 0, 10),
            Err(SudokuError::InvalidDigit { digit: 10 })
        );
        assert_eq!(engine.board(), &before);
    }

    #[test]
    fn set_cell_zero_clears() {
        let mut engine = SudokuEngine::with_seed(21);
        engine.new_puzzle(Difficulty::Medium);
        let (r, c) = first_empty(&engine);

        engine.set_cell(r, c, 4).unwrap();
        assert_eq!(engine.board().get(r, c).unwrap(), Cell::UserInput(4));
        engine.set_cell(r, c, 0).unwrap();
        assert!(engine.board().get(r, c).unwrap().is_empty());
    }

    #[test]
    fn check_fresh_puzzle_is_incomplete_without_errors() {
        let mut engine = SudokuEngine::with_seed(17);
        engine.new_puzzle(Difficulty::Medium);
        let result = engine.check();
        assert_eq!(result.status, CheckStatus::IncompleteNoErrors);
        assert!(result.erroring_cells.is_empty());
    }

    fn first_empty(engine: &SudokuEngine) -> (usize, usize) {
        for r in 0..9 {
            for c in 0..9 {
                if engine.board().get(r, c).unwrap().is_empty() {
                    return (r, c);
                }
            }
        }
        panic!("no empty cell");
    }

    fn first_given(engine: &SudokuEngine) -> (usize, usize) {
        for r in 0..9 {
            for c in 0..9 {
                if engine.board().get(r, c).unwrap().is_given() {
                    return (r, c);
                }
            }
        }
        panic!("no given cell");
    }
}
