pub mod board;
pub mod cascade;
pub mod engine;
pub mod matches;

pub use board::{Board, Color, Match3Error, Tile};
pub use cascade::{Cascade, CascadeResult, MAX_CASCADE_PASSES, PassEvent, SCORE_PER_TILE};
pub use engine::{
    MAX_FILL_PASSES, Match3Engine, Phase, RejectReason, SelectOutcome, SelectionState, SwapOutcome,
};
pub use matches::{MIN_RUN, detect_matches};
