//! # History Log - Branch-and-Overwrite Move History
//!
//! Ordered sequence of immutable board snapshots. Entry 0 is always the
//! empty initial board; entry i is the board after i moves. A current
//! position pointer (`active_index`) supports browsing past positions
//! without losing the future; making a new move from a rewound position
//! truncates everything after the pointer and then appends, i.e. classic
//! undo/redo without redo preservation past a new branch.
//!
//! Invariants:
//! - the log always contains at least the initial board,
//! - `active_index` is always a valid index into the log.

use crate::board::Board;
use std::fmt;

/// Errors from repositioning the history pointer.
///
/// Unlike an illegal move (routine user input, silently ignored by the
/// controller), an out-of-range jump indicates a caller bug and fails
/// loudly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryError {
    IndexOutOfRange { index: usize, len: usize },
}

impl fmt::Display for HistoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HistoryError::IndexOutOfRange { index, len } => {
                write!(f, "history index {} out of range (log has {} entries)", index, len)
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct HistoryLog {
    entries: Vec<Board>,
    active_index: usize,
}

impl HistoryLog {
    /// Creates a log holding only the given initial board.
    pub fn new(initial: Board) -> Self {
        HistoryLog {
            entries: vec![initial],
            active_index: 0,
        }
    }

    /// Appends to the end of the log; the new entry becomes the active one.
    pub fn append(&mut self, board: Board) {
        self.entries.push(board);
        self.active_index = self.entries.len() - 1;
    }

    /// Discards all entries after the active one, then appends.
    ///
    /// This is the path every controller move takes: when the active entry
    /// is already the last one the truncate is a no-op, and when the log
    /// was rewound the stale future is overwritten by the new branch.
    pub fn append_after_truncate(&mut self, board: Board) {
        self.entries.truncate(self.active_index + 1);
        self.append(board);
    }

    /// Repositions the active pointer without altering stored entries.
    pub fn jump_to(&mut self, index: usize) -> Result<(), HistoryError> {
        if index >= self.entries.len() {
            return Err(HistoryError::IndexOutOfRange {
                index,
                len: self.entries.len(),
            });
        }
        self.active_index = index;
        Ok(())
    }

    /// The board at the active position.
    pub fn current(&self) -> &Board {
        &self.entries[self.active_index]
    }

    pub fn active_index(&self) -> usize {
        self.active_index
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[Board] {
        &self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Board, Player};

    fn log_with_moves(moves: &[usize]) -> HistoryLog {
        let mut log = HistoryLog::new(Board::empty(3, 3));
        for (i, &idx) in moves.iter().enumerate() {
            let player = if i % 2 == 0 { Player::X } else { Player::O };
            let next = log.current().with_move(idx, player).unwrap();
            log.append_after_truncate(next);
        }
        log
    }

    #[test]
    fn test_new_log_holds_initial_board() {
        let log = HistoryLog::new(Board::empty(3, 3));
        assert_eq!(log.len(), 1);
        assert_eq!(log.active_index(), 0);
        assert_eq!(log.current().empty_cells().count(), 9);
    }

    #[test]
    fn test_append_advances_active_index() {
        let log = log_with_moves(&[0, 4, 8]);
        assert_eq!(log.len(), 4);
        assert_eq!(log.active_index(), 3);
    }

    #[test]
    fn test_jump_to_does_not_alter_entries() {
        let mut log = log_with_moves(&[0, 4, 8]);
        let snapshot: Vec<_> = log.entries().to_vec();
        log.jump_to(1).unwrap();
        assert_eq!(log.active_index(), 1);
        assert_eq!(log.entries(), snapshot.as_slice());
    }

    #[test]
    fn test_jump_to_current_position_changes_nothing() {
        let mut log = log_with_moves(&[0, 4]);
        let before = log.active_index();
        log.jump_to(before).unwrap();
        assert_eq!(log.active_index(), before);
        assert_eq!(log.len(), 3);
    }

    #[test]
    fn test_jump_to_out_of_range_fails_loudly() {
        let mut log = log_with_moves(&[0]);
        assert_eq!(
            log.jump_to(2),
            Err(HistoryError::IndexOutOfRange { index: 2, len: 2 })
        );
        assert_eq!(log.active_index(), 1);
    }

    #[test]
    fn test_truncate_round_trip_preserves_prefix() {
        // After jump_to(k), append_after_truncate yields a log of length
        // k+2 whose first k+1 entries equal the original's.
        let mut log = log_with_moves(&[0, 4, 1, 3]);
        let original: Vec<_> = log.entries().to_vec();

        log.jump_to(2).unwrap();
        let next = log.current().with_move(7, Player::X).unwrap();
        log.append_after_truncate(next);

        assert_eq!(log.len(), 4);
        assert_eq!(&log.entries()[..3], &original[..3]);
        assert_eq!(log.active_index(), 3);
    }
}
