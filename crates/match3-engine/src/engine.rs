use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use crate::board::{Board, Match3Error, Tile};
use crate::cascade::{CascadeResult, resolve_cascade};
use crate::matches::detect_matches;

/// Upper bound on reroll passes while stabilizing the initial fill.
pub const MAX_FILL_PASSES: usize = 100;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RejectReason {
    SameCell,
    NotAdjacent,
    NoMatch,
}

/// Result of a swap attempt. A rejected swap leaves the board exactly as it
/// was; a resolved swap carries the full cascade for the caller to animate.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SwapOutcome {
    Rejected {
        reason: RejectReason,
    },
    Resolved {
        swap: ((usize, usize), (usize, usize)),
        cascade: CascadeResult,
    },
}

/// Discrete animation steps for a caller-owned timing loop. The engine never
/// waits on a clock; it hands back the full phase sequence instead.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    Idle,
    Swapping {
        from: (usize, usize),
        to: (usize, usize),
    },
    Matched {
        cells: Vec<(usize, usize)>,
        score_delta: u32,
    },
    Dropping {
        board: Vec<Vec<Tile>>,
    },
    Refilling {
        board: Vec<Vec<Tile>>,
    },
}

impl SwapOutcome {
    /// Expand the outcome into its ordered phase sequence, ending in `Idle`.
    pub fn phases(&self) -> Vec<Phase> {
        let mut phases = Vec::new();
        if let SwapOutcome::Resolved { swap, cascade } = self {
            phases.push(Phase::Swapping {
                from: swap.0,
                to: swap.1,
            });
            for pass in &cascade.passes {
                phases.push(Phase::Matched {
                    cells: pass.matched.clone(),
                    score_delta: pass.score_delta,
                });
                phases.push(Phase::Dropping {
                    board: pass.settled.clone(),
                });
                phases.push(Phase::Refilling {
                    board: pass.board.clone(),
                });
            }
        }
        phases.push(Phase::Idle);
        phases
    }
}

/// Two-tap selection state: `Idle -> AwaitingSecondSelection -> Evaluating`,
/// collapsing back to `Idle` after every evaluation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelectionState {
    Idle,
    AwaitingSecond { row: usize, col: usize },
}

/// What a single tap did.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelectOutcome {
    /// First tap stored, waiting for the second.
    AwaitingSecond,
    /// Tapping the selected cell again deselects it.
    Deselected,
    /// Second tap evaluated as a swap.
    Swapped(SwapOutcome),
}

/// One Match-3 game. Owns the tile board, the score and the random source;
/// concurrent games are independent instances.
pub struct Match3Engine {
    board: Board,
    score: u32,
    selection: SelectionState,
    rng: StdRng,
}

impl Match3Engine {
    /// `seed` makes every fill and refill reproducible; `None` draws a seed
    /// from the ambient generator.
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_rng(&mut rand::rng()),
        };
        Self {
            board: Board::new(0, 0),
            score: 0,
            selection: SelectionState::Idle,
            rng,
        }
    }

    /// Start from a prepared board instead of a random fill, for scripted
    /// setups and tests. The board is taken as-is; no stabilization runs.
    pub fn with_board(board: Board, seed: Option<u64>) -> Self {
        let mut engine = Self::new(seed);
        engine.board = board;
        engine
    }

    /// Fill a fresh `rows` x `cols` board with uniformly random colors, then
    /// reroll only the matched cells until no run remains. On the (in
    /// practice unreachable) pass cap the best-effort board stays installed
    /// and the error reports the condition.
    pub fn initialize(&mut self, rows: usize, cols: usize) -> Result<&Board, Match3Error> {
        self.board = Board::new(rows, cols);
        self.board.fill_random(&mut self.rng);
        self.selection = SelectionState::Idle;

        for _ in 0..MAX_FILL_PASSES {
            let matched = detect_matches(&self.board);
            if matched.is_empty() {
                return Ok(&self.board);
            }
            for (r, c) in matched {
                let tile = Some(crate::board::random_color(&mut self.rng));
                // scan coordinates are always in bounds
                let _ = self.board.set(r, c, tile);
            }
        }

        if detect_matches(&self.board).is_empty() {
            Ok(&self.board)
        } else {
            log::debug!("initial fill hit the {MAX_FILL_PASSES}-pass cap");
            Err(Match3Error::DidNotStabilize {
                passes: MAX_FILL_PASSES,
            })
        }
    }

    /// Attempt to swap two tiles. Only distinct, in-bounds, 4-directionally
    /// adjacent cells are eligible; an eligible swap that produces no match
    /// is reverted. A committed swap runs the full cascade and accrues its
    /// score.
    pub fn try_swap(
        &mut self,
        r1: usize,
        c1: usize,
        r2: usize,
        c2: usize,
    ) -> Result<SwapOutcome, Match3Error> {
        // bounds first: out-of-range is an error, not a rejection
        self.board.get(r1, c1)?;
        self.board.get(r2, c2)?;

        if (r1, c1) == (r2, c2) {
            return Ok(SwapOutcome::Rejected {
                reason: RejectReason::SameCell,
            });
        }
        if r1.abs_diff(r2) + c1.abs_diff(c2) != 1 {
            return Ok(SwapOutcome::Rejected {
                reason: RejectReason::NotAdjacent,
            });
        }

        self.board.swap(r1, c1, r2, c2)?;
        if detect_matches(&self.board).is_empty() {
            self.board.swap(r1, c1, r2, c2)?;
            return Ok(SwapOutcome::Rejected {
                reason: RejectReason::NoMatch,
            });
        }

        let cascade = resolve_cascade(&mut self.board, &mut self.rng);
        self.score += cascade.score_delta;
        log::debug!(
            "swap ({r1},{c1})<->({r2},{c2}) resolved: {} passes, +{}",
            cascade.passes.len(),
            cascade.score_delta
        );

        Ok(SwapOutcome::Resolved {
            swap: ((r1, c1), (r2, c2)),
            cascade,
        })
    }

    /// Two-tap driver over `try_swap`. The first tap selects; the second
    /// evaluates the pair and clears the selection whatever the outcome.
    pub fn select(&mut self, row: usize, col: usize) -> Result<SelectOutcome, Match3Error> {
        self.board.get(row, col)?;

        match self.selection {
            SelectionState::Idle => {
                self.selection = SelectionState::AwaitingSecond { row, col };
                Ok(SelectOutcome::AwaitingSecond)
            }
            SelectionState::AwaitingSecond { row: r1, col: c1 } => {
                self.selection = SelectionState::Idle;
                if (r1, c1) == (row, col) {
                    return Ok(SelectOutcome::Deselected);
                }
                Ok(SelectOutcome::Swapped(self.try_swap(r1, c1, row, col)?))
            }
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Monotonically non-decreasing total score.
    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn selection(&self) -> SelectionState {
        self.selection
    }
}
