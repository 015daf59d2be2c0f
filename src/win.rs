//! Win detection for m,n,k boards.
//!
//! The detector rescans the whole board on every query instead of tracking
//! lines incrementally. Boards are tens of cells, so the O(rows·cols·k)
//! scan is cheap and there is no incremental state to get out of sync.

use crate::board::{Board, Player};

/// Direction vectors probed from each occupied cell, in priority order:
/// horizontal, vertical, diagonal down-right, diagonal down-left.
const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

/// Returns the first winning mark found, scanning occupied cells in
/// row-major order and directions in `DIRECTIONS` order.
///
/// A `win_length` larger than both board dimensions can never be reached,
/// so the scan reports no winner; rejecting such configurations is the
/// config layer's job. A full board with no winner is a tie, which the
/// caller decides by also checking `Board::is_full`.
pub fn find_winner(board: &Board, win_length: usize) -> Option<Player> {
    for row in 0..board.rows() {
        for col in 0..board.cols() {
            let player = match board.at(row, col).player() {
                Some(p) => p,
                None => continue,
            };
            for (dr, dc) in DIRECTIONS {
                if line_hits(board, row, col, dr, dc, win_length, player) {
                    return Some(player);
                }
            }
        }
    }
    None
}

/// True when `win_length` consecutive cells starting at (row, col) along
/// (dr, dc) are all in bounds and all hold `player`'s mark.
fn line_hits(
    board: &Board,
    row: usize,
    col: usize,
    dr: isize,
    dc: isize,
    win_length: usize,
    player: Player,
) -> bool {
    for step in 0..win_length {
        let r = row as isize + dr * step as isize;
        let c = col as isize + dc * step as isize;
        if r < 0 || c < 0 || r as usize >= board.rows() || c as usize >= board.cols() {
            return false;
        }
        if board.at(r as usize, c as usize).player() != Some(player) {
            return false;
        }
    }
    true
}
