use serde::{Deserialize, Serialize};

use crate::difficulty::Difficulty;

/// Render snapshot handed to the presentation layer. Digits use 0 for empty;
/// `given` marks the immutable pre-filled cells. The solution is never part
/// of a snapshot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PuzzleSnapshot {
    pub board: [[u8; 9]; 9],
    pub given: [[bool; 9]; 9],
    pub difficulty: Option<Difficulty>,
}

impl PuzzleSnapshot {
    pub fn is_cell_empty(&self, row: usize, col: usize) -> bool {
        self.board[row][col] == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::difficulty::Difficulty;
    use crate::engine::SudokuEngine;

    #[test]
    fn snapshot_round_trips_through_json() {
        let mut engine = SudokuEngine::with_seed(2);
        let snapshot = engine.new_puzzle(Difficulty::Easy);

        let json = serde_json::to_string(&snapshot).unwrap();
        let back: PuzzleSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, snapshot);
    }

    #[test]
    fn given_mask_matches_board_digits() {
        let mut engine = SudokuEngine::with_seed(2);
        let snapshot = engine.new_puzzle(Difficulty::Hard);
        for r in 0..9 {
            for c in 0..9 {
                // fresh puzzle: every filled cell is a given
                assert_eq!(snapshot.given[r][c], snapshot.board[r][c] != 0);
            }
        }
    }
}
