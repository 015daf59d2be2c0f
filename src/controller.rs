//! # Game Controller - Central Game State Management
//!
//! This module provides the `GameController`, the single source of truth
//! for the authoritative game state. All moves go through the controller,
//! which validates them before application and records every accepted
//! board snapshot in the history log.
//!
//! ## Derived, not stored
//! The winner, tie status, whose turn it is, and the current phase are all
//! pure functions of (history position, configuration) and are recomputed
//! on demand. Nothing derived is cached, so there is no staleness to
//! manage when the user browses history or starts a new branch.
//!
//! ## Turn model
//! `active_index` counts completed moves, so an even index means X is to
//! move. In single-player mode X is the human and O is the computer; the
//! controller exposes `computer_move_timer_fires` for the session's timer
//! and never schedules anything itself.

use crate::board::{Board, MoveError, Player};
use crate::config::{ConfigError, GameConfig};
use crate::history::{HistoryError, HistoryLog};
use crate::win::find_winner;
use rand::Rng;
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;
use std::fmt;

/// Whether the second mover is a human or an automated random agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameMode {
    Multiplayer,
    SinglePlayer,
}

/// Current game status, derived from the active board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    /// Game is still in progress; `to_move` holds the next mark.
    InProgress { to_move: Player },
    /// Game ended with a winner.
    Win(Player),
    /// Board is full with no winner.
    Draw,
}

impl GameStatus {
    pub fn is_game_over(&self) -> bool {
        !matches!(self, GameStatus::InProgress { .. })
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameStatus::InProgress { to_move } => {
                write!(f, "in progress, {} to move", to_move)
            }
            GameStatus::Win(player) => write!(f, "winner {}", player),
            GameStatus::Draw => write!(f, "tie"),
        }
    }
}

/// What the controller is waiting for, derived from mode and status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// A human move is expected (both turns in multiplayer, X's turn in
    /// single-player).
    AwaitingHumanMove,
    /// Single-player mode, O's turn: the computer-move timer should run.
    AwaitingComputerMove,
    /// Winner present or full-board tie; no moves accepted until reset.
    Terminal,
}

/// Result of submitting a move to the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveResult {
    /// Move was applied and appended to the history.
    Applied {
        /// Player whose mark was placed.
        player: Player,
        /// Cell index the mark was placed on.
        index: usize,
        /// Status derived after the move.
        status: GameStatus,
    },
    /// Move was ignored with no state change. Occupied cells, wrong-turn
    /// clicks and moves after game end are routine UI input, not faults.
    Ignored(IgnoreReason),
}

impl MoveResult {
    pub fn was_applied(&self) -> bool {
        matches!(self, MoveResult::Applied { .. })
    }
}

/// Why a submitted move was ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// The game at the active position is already decided.
    GameOver,
    /// It is not the submitting side's turn.
    NotYourTurn,
    /// The target cell already holds a mark.
    CellOccupied,
    /// The cell index does not exist on this board.
    OutOfRange,
}

impl fmt::Display for IgnoreReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IgnoreReason::GameOver => write!(f, "game is already over"),
            IgnoreReason::NotYourTurn => write!(f, "not your turn"),
            IgnoreReason::CellOccupied => write!(f, "cell is already occupied"),
            IgnoreReason::OutOfRange => write!(f, "cell index out of range"),
        }
    }
}

/// The central controller owning the authoritative game state.
///
/// Generic over the random source so the computer opponent is
/// deterministic under test; the default is the crate's standard
/// `Xoshiro256PlusPlus` generator.
///
/// # Usage
/// ```rust,ignore
/// let mut controller = GameController::new(GameConfig::default(), GameMode::SinglePlayer);
///
/// match controller.submit_human_move(4) {
///     MoveResult::Applied { status, .. } => { /* rerender, maybe arm timer */ }
///     MoveResult::Ignored(reason) => { /* routine click, nothing changed */ }
/// }
/// ```
#[derive(Debug, Clone)]
pub struct GameController<R: Rng = Xoshiro256PlusPlus> {
    config: GameConfig,
    mode: GameMode,
    history: HistoryLog,
    rng: R,
}

impl GameController<Xoshiro256PlusPlus> {
    /// Creates a controller with an OS-seeded random source.
    ///
    /// Fails when the configuration violates its bounds; nothing is
    /// constructed in that case.
    pub fn new(config: GameConfig, mode: GameMode) -> Result<Self, ConfigError> {
        Self::with_rng(config, mode, Xoshiro256PlusPlus::from_rng(&mut rand::rng()))
    }
}

impl<R: Rng> GameController<R> {
    /// Creates a controller with an explicit random source.
    pub fn with_rng(config: GameConfig, mode: GameMode, rng: R) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(GameController {
            config,
            mode,
            history: HistoryLog::new(Board::empty(config.num_rows, config.num_cols)),
            rng,
        })
    }

    /// Validates and applies a new configuration.
    ///
    /// On success the game resets to a fresh empty board (mode unchanged);
    /// on failure nothing changes and the prior configuration stays
    /// active, with the violations listed in the error.
    pub fn submit_configuration(&mut self, config: GameConfig) -> Result<(), ConfigError> {
        config.validate()?;
        self.config = config;
        self.reset();
        Ok(())
    }

    /// Switches mode. A mode switch implicitly resets the game, matching
    /// configuration-apply semantics.
    pub fn set_mode(&mut self, mode: GameMode) {
        self.mode = mode;
        self.reset();
    }

    /// Resets to a fresh history holding one empty board.
    pub fn reset(&mut self) {
        self.history = HistoryLog::new(Board::empty(self.config.num_rows, self.config.num_cols));
    }

    /// Attempts a human move at the given cell index.
    ///
    /// Ignored (no state change) outside `AwaitingHumanMove` and for
    /// occupied or out-of-range cells. An applied move is appended with
    /// `append_after_truncate`, so a move made from a rewound position
    /// discards the stale future entries.
    pub fn submit_human_move(&mut self, index: usize) -> MoveResult {
        match self.phase() {
            Phase::Terminal => return MoveResult::Ignored(IgnoreReason::GameOver),
            Phase::AwaitingComputerMove => return MoveResult::Ignored(IgnoreReason::NotYourTurn),
            Phase::AwaitingHumanMove => {}
        }
        let player = self.to_move();
        self.apply(index, player)
    }

    /// Plays the computer's reply: a uniformly random empty cell.
    ///
    /// Meaningful only in `AwaitingComputerMove`; ignored in any other
    /// phase so a stale timer can never corrupt state. The opponent has
    /// no strategy - it picks uniformly among the empty cells.
    pub fn computer_move_timer_fires(&mut self) -> MoveResult {
        match self.phase() {
            Phase::Terminal => return MoveResult::Ignored(IgnoreReason::GameOver),
            Phase::AwaitingHumanMove => return MoveResult::Ignored(IgnoreReason::NotYourTurn),
            Phase::AwaitingComputerMove => {}
        }
        let empties: Vec<usize> = self.board().empty_cells().collect();
        // Non-terminal implies at least one empty cell.
        let index = empties[self.rng.random_range(0..empties.len())];
        self.apply(index, Player::O)
    }

    fn apply(&mut self, index: usize, player: Player) -> MoveResult {
        match self.board().with_move(index, player) {
            Ok(next) => {
                self.history.append_after_truncate(next);
                MoveResult::Applied {
                    player,
                    index,
                    status: self.status(),
                }
            }
            Err(MoveError::CellOccupied { .. }) => MoveResult::Ignored(IgnoreReason::CellOccupied),
            Err(MoveError::OutOfRange { .. }) => MoveResult::Ignored(IgnoreReason::OutOfRange),
        }
    }

    /// Repositions the history pointer. Permitted in any state; stored
    /// entries are untouched and no computer move is triggered - browsing
    /// is read-only until the next accepted move starts a new branch.
    pub fn jump_to_move(&mut self, index: usize) -> Result<(), HistoryError> {
        self.history.jump_to(index)
    }

    /// The board at the active history position.
    pub fn board(&self) -> &Board {
        self.history.current()
    }

    /// All historical boards, oldest first, for move-list navigation.
    pub fn boards(&self) -> &[Board] {
        self.history.entries()
    }

    /// Number of completed moves at the active position.
    pub fn move_count(&self) -> usize {
        self.history.active_index()
    }

    pub fn active_index(&self) -> usize {
        self.history.active_index()
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Whose turn it is at the active position: even move counts are X's.
    pub fn to_move(&self) -> Player {
        if self.history.active_index() % 2 == 0 {
            Player::X
        } else {
            Player::O
        }
    }

    pub fn winner(&self) -> Option<Player> {
        find_winner(self.board(), self.config.win_length)
    }

    /// Derived status of the active position.
    pub fn status(&self) -> GameStatus {
        if let Some(player) = self.winner() {
            GameStatus::Win(player)
        } else if self.board().is_full() {
            GameStatus::Draw
        } else {
            GameStatus::InProgress {
                to_move: self.to_move(),
            }
        }
    }

    /// Derived phase of the active position.
    pub fn phase(&self) -> Phase {
        match self.status() {
            GameStatus::Win(_) | GameStatus::Draw => Phase::Terminal,
            GameStatus::InProgress { to_move } => match self.mode {
                GameMode::Multiplayer => Phase::AwaitingHumanMove,
                GameMode::SinglePlayer => {
                    if to_move == Player::X {
                        Phase::AwaitingHumanMove
                    } else {
                        Phase::AwaitingComputerMove
                    }
                }
            },
        }
    }

    pub fn is_game_over(&self) -> bool {
        self.status().is_game_over()
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn controller(mode: GameMode) -> GameController {
        GameController::with_rng(
            GameConfig::default(),
            mode,
            Xoshiro256PlusPlus::seed_from_u64(7),
        )
        .unwrap()
    }

    #[test]
    fn test_valid_move() {
        let mut c = controller(GameMode::Multiplayer);
        match c.submit_human_move(4) {
            MoveResult::Applied { player, status, .. } => {
                assert_eq!(player, Player::X);
                assert!(!status.is_game_over());
            }
            other => panic!("expected applied move, got {:?}", other),
        }
        assert_eq!(c.move_count(), 1);
        assert_eq!(c.to_move(), Player::O);
    }

    #[test]
    fn test_occupied_cell_is_ignored() {
        let mut c = controller(GameMode::Multiplayer);
        c.submit_human_move(4);
        assert_eq!(
            c.submit_human_move(4),
            MoveResult::Ignored(IgnoreReason::CellOccupied)
        );
        assert_eq!(c.move_count(), 1);
    }

    #[test]
    fn test_out_of_range_move_is_ignored() {
        let mut c = controller(GameMode::Multiplayer);
        assert_eq!(
            c.submit_human_move(9),
            MoveResult::Ignored(IgnoreReason::OutOfRange)
        );
        assert_eq!(c.move_count(), 0);
    }

    #[test]
    fn test_row_win_for_x() {
        // X plays 0, O plays 4, X plays 1, O plays 3, X plays 2 -> top row
        let mut c = controller(GameMode::Multiplayer);
        for index in [0, 4, 1, 3] {
            assert!(c.submit_human_move(index).was_applied());
        }
        match c.submit_human_move(2) {
            MoveResult::Applied { status, .. } => {
                assert_eq!(status, GameStatus::Win(Player::X));
            }
            other => panic!("expected winning move, got {:?}", other),
        }
        assert_eq!(c.phase(), Phase::Terminal);
        assert_eq!(
            c.submit_human_move(8),
            MoveResult::Ignored(IgnoreReason::GameOver)
        );
    }

    #[test]
    fn test_full_board_without_winner_is_tie() {
        // X X O / O O X / X X O - no three in a row for either mark
        let mut c = controller(GameMode::Multiplayer);
        for index in [0, 2, 1, 3, 5, 4, 6, 8, 7] {
            assert!(c.submit_human_move(index).was_applied());
        }
        assert_eq!(c.status(), GameStatus::Draw);
        assert_eq!(c.status().to_string(), "tie");
    }

    #[test]
    fn test_multiplayer_parity_invariant() {
        let mut c = controller(GameMode::Multiplayer);
        for index in [4, 0, 8, 2] {
            let even = c.active_index() % 2 == 0;
            assert_eq!(c.to_move() == Player::X, even);
            c.submit_human_move(index);
        }
    }

    #[test]
    fn test_single_player_blocks_human_on_computer_turn() {
        let mut c = controller(GameMode::SinglePlayer);
        assert!(c.submit_human_move(0).was_applied());
        assert_eq!(c.phase(), Phase::AwaitingComputerMove);
        assert_eq!(
            c.submit_human_move(1),
            MoveResult::Ignored(IgnoreReason::NotYourTurn)
        );
    }

    #[test]
    fn test_computer_move_fills_one_empty_cell_with_o() {
        let mut c = controller(GameMode::SinglePlayer);
        c.submit_human_move(0);
        match c.computer_move_timer_fires() {
            MoveResult::Applied { player, index, .. } => {
                assert_eq!(player, Player::O);
                assert_ne!(index, 0);
            }
            other => panic!("expected applied computer move, got {:?}", other),
        }
        assert_eq!(c.move_count(), 2);
        assert_eq!(c.to_move(), Player::X);
        assert_eq!(c.phase(), Phase::AwaitingHumanMove);
    }

    #[test]
    fn test_computer_move_outside_its_phase_is_ignored() {
        let mut c = controller(GameMode::SinglePlayer);
        assert_eq!(
            c.computer_move_timer_fires(),
            MoveResult::Ignored(IgnoreReason::NotYourTurn)
        );
        assert_eq!(c.move_count(), 0);
    }

    #[test]
    fn test_computer_move_is_deterministic_under_fixed_seed() {
        let play = || {
            let mut c = controller(GameMode::SinglePlayer);
            c.submit_human_move(0);
            match c.computer_move_timer_fires() {
                MoveResult::Applied { index, .. } => index,
                other => panic!("expected applied move, got {:?}", other),
            }
        };
        assert_eq!(play(), play());
    }

    #[test]
    fn test_jump_then_move_truncates_future() {
        // Scenario E: 4 moves (5 entries), jump to 2, move at 7.
        let mut c = controller(GameMode::Multiplayer);
        for index in [0, 4, 1, 3] {
            c.submit_human_move(index);
        }
        assert_eq!(c.history_len(), 5);

        c.jump_to_move(2).unwrap();
        assert_eq!(c.to_move(), Player::X);
        assert!(c.submit_human_move(7).was_applied());

        assert_eq!(c.history_len(), 4);
        assert_eq!(c.active_index(), 3);
        // Entry 3 is now the new branch, not the original O move at 3.
        assert!(c.boards()[3].cell(7).unwrap().player() == Some(Player::X));
    }

    #[test]
    fn test_jump_out_of_range_is_loud_and_harmless() {
        let mut c = controller(GameMode::Multiplayer);
        c.submit_human_move(0);
        assert!(c.jump_to_move(5).is_err());
        assert_eq!(c.active_index(), 1);
        // Controller stays usable.
        assert!(c.submit_human_move(1).was_applied());
    }

    #[test]
    fn test_browsing_does_not_trigger_computer_state() {
        let mut c = controller(GameMode::SinglePlayer);
        c.submit_human_move(0);
        c.computer_move_timer_fires();
        c.submit_human_move(1);
        // Rewind to the position after X's first move: O to move, but
        // browsing alone must leave the log untouched.
        c.jump_to_move(1).unwrap();
        assert_eq!(c.phase(), Phase::AwaitingComputerMove);
        assert_eq!(c.history_len(), 4);
    }

    #[test]
    fn test_submit_configuration_rejects_and_keeps_state() {
        let mut c = controller(GameMode::Multiplayer);
        c.submit_human_move(0);
        let err = c
            .submit_configuration(GameConfig::new(2, 3, 3))
            .unwrap_err();
        assert!(err.problems().iter().any(|p| p == "rows must be at least 3"));
        assert_eq!(c.config(), GameConfig::default());
        assert_eq!(c.move_count(), 1);
    }

    #[test]
    fn test_submit_configuration_applies_and_resets() {
        let mut c = controller(GameMode::Multiplayer);
        c.submit_human_move(0);
        c.submit_configuration(GameConfig::new(5, 5, 4)).unwrap();
        assert_eq!(c.history_len(), 1);
        assert_eq!(c.board().len(), 25);
        assert_eq!(c.status().to_string(), "in progress, X to move");
    }

    #[test]
    fn test_set_mode_resets_game() {
        let mut c = controller(GameMode::Multiplayer);
        c.submit_human_move(0);
        c.set_mode(GameMode::SinglePlayer);
        assert_eq!(c.mode(), GameMode::SinglePlayer);
        assert_eq!(c.move_count(), 0);
    }

    #[test]
    fn test_status_strings() {
        let mut c = controller(GameMode::Multiplayer);
        assert_eq!(c.status().to_string(), "in progress, X to move");
        c.submit_human_move(0);
        assert_eq!(c.status().to_string(), "in progress, O to move");
        for index in [3, 1, 4, 2] {
            c.submit_human_move(index);
        }
        assert_eq!(c.status().to_string(), "winner X");
    }
}
