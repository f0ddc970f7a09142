use rand::RngExt;
use serde::{Deserialize, Serialize};

use crate::board::{Board, Tile};
use crate::matches::detect_matches;

/// Points per cleared tile.
pub const SCORE_PER_TILE: u32 = 10;

/// Upper bound on passes within one cascade. Adversarial refills could in
/// principle keep producing matches forever; hitting this cap turns a hang
/// into a reported `stabilized = false`.
pub const MAX_CASCADE_PASSES: usize = 1000;

/// One detect->clear->gravity->refill step, recorded so a caller can animate
/// a cascade pass by pass at its own pace.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassEvent {
    /// Cells cleared in this pass, in row-major order.
    pub matched: Vec<(usize, usize)>,
    pub score_delta: u32,
    /// Board after gravity, holes still open at the top of each column.
    pub settled: Vec<Vec<Tile>>,
    /// Board after refill; the input to the next pass.
    pub board: Vec<Vec<Tile>>,
}

/// Lazy pass sequence over a board. Each `next()` computes exactly one pass
/// from the current board state and returns `None` once the board is stable.
/// Pass k+1 only ever sees the post-refill board of pass k.
pub struct Cascade<'a, R: RngExt + ?Sized> {
    board: &'a mut Board,
    rng: &'a mut R,
}

impl<'a, R: RngExt + ?Sized> Cascade<'a, R> {
    pub fn new(board: &'a mut Board, rng: &'a mut R) -> Self {
        Self { board, rng }
    }
}

impl<R: RngExt + ?Sized> Iterator for Cascade<'_, R> {
    type Item = PassEvent;

    fn next(&mut self) -> Option<PassEvent> {
        let matched = detect_matches(self.board);
        if matched.is_empty() {
            return None;
        }

        let score_delta = matched.len() as u32 * SCORE_PER_TILE;
        for &(r, c) in &matched {
            // coordinates come from the scan, always in bounds
            let _ = self.board.set(r, c, None);
        }
        self.board.apply_gravity();
        let settled = self.board.to_rows();
        self.board.refill(self.rng);

        Some(PassEvent {
            matched: matched.into_iter().collect(),
            score_delta,
            settled,
            board: self.board.to_rows(),
        })
    }
}

/// Outcome of a full cascade. `stabilized == false` means the pass cap was
/// hit and the board, while fully populated, may still contain matches.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CascadeResult {
    pub passes: Vec<PassEvent>,
    pub score_delta: u32,
    pub stabilized: bool,
}

/// Run a cascade to completion (or to the pass cap), collecting every pass.
pub fn resolve_cascade<R: RngExt + ?Sized>(board: &mut Board, rng: &mut R) -> CascadeResult {
    let mut passes = Vec::new();
    let mut score_delta = 0u32;

    for event in Cascade::new(board, rng).take(MAX_CASCADE_PASSES) {
        score_delta += event.score_delta;
        passes.push(event);
    }

    let stabilized = detect_matches(board).is_empty();
    if !stabilized {
        log::debug!("cascade hit the {MAX_CASCADE_PASSES}-pass cap");
    }

    CascadeResult {
        passes,
        score_delta,
        stabilized,
    }
}
