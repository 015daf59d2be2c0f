//! # Configurable Tic-Tac-Toe (m,n,k) Game Core
//!
//! A rules engine for a Tic-Tac-Toe variant with configurable board
//! dimensions and win length, two-human multiplayer, and a single-player
//! mode against a uniform-random computer opponent.
//!
//! ## Architecture Overview
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                      GameSession                         │
//! │  owns the cancelable computer-move timer (tokio task)    │
//! │  ┌────────────────────────────────────────────────────┐  │
//! │  │                 GameController                     │  │
//! │  │  single source of truth: mode + config + history   │  │
//! │  │  winner / status / phase derived on demand         │  │
//! │  └────────────────────────────────────────────────────┘  │
//! │        │                │                 │              │
//! │        ▼                ▼                 ▼              │
//! │   HistoryLog          Board          find_winner         │
//! │  (branch-and-      (immutable         (full-board        │
//! │   overwrite)        snapshots)          rescan)          │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! Boards are immutable snapshots: every accepted move produces a new
//! [`Board`] appended to the [`HistoryLog`]. Rewinding with
//! `jump_to_move` is read-only browsing; the first accepted move after a
//! rewind truncates the stale future and starts a new branch.
//!
//! The front end (the `play` binary here) is an external collaborator:
//! it submits configurations, cell indices and jump targets, and renders
//! the boards and status the core hands back.

pub mod board;
pub mod config;
pub mod controller;
pub mod history;
pub mod session;
pub mod win;

pub use board::{Board, Cell, MoveError, Player};
pub use config::{ConfigError, GameConfig, MIN_BOARD_DIM, MIN_WIN_LENGTH};
pub use controller::{GameController, GameMode, GameStatus, IgnoreReason, MoveResult, Phase};
pub use history::{HistoryError, HistoryLog};
pub use session::{GameSession, MoveTimer, TimerEvent, COMPUTER_MOVE_DELAY};
pub use win::find_winner;
