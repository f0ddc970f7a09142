use std::collections::BTreeSet;

use crate::board::Board;

/// Minimum run length that counts as a match.
pub const MIN_RUN: usize = 3;

/// Scan every row and every column for maximal runs of `MIN_RUN`+ identical
/// colors and union all covered cells. Empty tiles never participate in a
/// run. The result is a set; discovery order carries no meaning.
pub fn detect_matches(board: &Board) -> BTreeSet<(usize, usize)> {
    let mut matched = BTreeSet::new();

    for r in 0..board.rows() {
        scan_line(board.cols(), |c| board.tile(r, c), |c| {
            matched.insert((r, c));
        });
    }
    for c in 0..board.cols() {
        scan_line(board.rows(), |r| board.tile(r, c), |r| {
            matched.insert((r, c));
        });
    }

    matched
}

/// Walk one row or column, reporting every index covered by a maximal
/// same-color run of `MIN_RUN` or more. Empty tiles terminate runs.
fn scan_line(len: usize, tile_at: impl Fn(usize) -> crate::board::Tile, mut mark: impl FnMut(usize)) {
    let mut run_start = 0;
    for i in 1..=len {
        let run_continues =
            i < len && tile_at(i).is_some() && tile_at(i) == tile_at(run_start);
        if run_continues {
            continue;
        }
        if i - run_start >= MIN_RUN && tile_at(run_start).is_some() {
            for j in run_start..i {
                mark(j);
            }
        }
        run_start = i;
    }
}
