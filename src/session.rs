//! # Game Session - Timer Ownership Around the Controller
//!
//! `GameSession` wraps a [`GameController`] and owns the one deferred
//! action in the system: the computer's reply in single-player mode. The
//! timer is a spawned tokio task that sleeps for the configured delay and
//! sends a [`TimerEvent`] over an mpsc channel; the session applies the
//! move when the event is received.
//!
//! ## Cancellation
//! The pending timer is a scoped resource. Every exit path from the
//! awaiting-computer state other than the timer itself - reset,
//! reconfiguration, mode switch, history browsing - aborts the task *and*
//! drains any event that already reached the channel, so a stale fire can
//! never replay into a rewound or fresh game. At most one timer exists at
//! a time: arming cancels its predecessor, and the state machine only
//! re-enters `AwaitingComputerMove` after the previous timer resolved or
//! the game was reset.

use crate::board::Player;
use crate::config::{ConfigError, GameConfig};
use crate::controller::{GameController, GameMode, GameStatus, MoveResult, Phase};
use crate::history::HistoryError;
use rand::Rng;
use rand_xoshiro::Xoshiro256PlusPlus;
use std::time::Duration;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;

/// Delay between entering `AwaitingComputerMove` and the computer's reply.
pub const COMPUTER_MOVE_DELAY: Duration = Duration::from_millis(500);

/// Events delivered by the move timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    ComputerMoveDue,
}

/// A single cancelable deadline for the computer's reply.
#[derive(Debug, Default)]
pub struct MoveTimer {
    handle: Option<JoinHandle<()>>,
}

impl MoveTimer {
    pub fn new() -> Self {
        MoveTimer { handle: None }
    }

    /// Arms the timer, replacing any previously pending one.
    pub fn arm(&mut self, tx: UnboundedSender<TimerEvent>, delay: Duration) {
        self.cancel();
        self.handle = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // Receiver may be gone during shutdown; nothing to do then.
            let _ = tx.send(TimerEvent::ComputerMoveDue);
        }));
    }

    /// Aborts the pending task, if any.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }

    pub fn is_armed(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// True while a fire is outstanding: either the task is still
    /// sleeping or it finished and its event sits in the channel.
    fn is_pending(&self) -> bool {
        self.handle.is_some()
    }

    fn clear(&mut self) {
        self.handle = None;
    }
}

impl Drop for MoveTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// A controller plus the live timer driving single-player games.
pub struct GameSession<R: Rng = Xoshiro256PlusPlus> {
    controller: GameController<R>,
    timer: MoveTimer,
    tx: UnboundedSender<TimerEvent>,
    rx: UnboundedReceiver<TimerEvent>,
    delay: Duration,
}

impl GameSession<Xoshiro256PlusPlus> {
    /// Creates a session with an OS-seeded controller and the default
    /// 500 ms computer-move delay.
    pub fn new(config: GameConfig, mode: GameMode) -> Result<Self, ConfigError> {
        Ok(Self::from_controller(
            GameController::new(config, mode)?,
            COMPUTER_MOVE_DELAY,
        ))
    }
}

impl<R: Rng> GameSession<R> {
    /// Creates a session around an existing controller with an explicit
    /// delay; tests use a short delay and a seeded controller.
    pub fn from_controller(controller: GameController<R>, delay: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        GameSession {
            controller,
            timer: MoveTimer::new(),
            tx,
            rx,
            delay,
        }
    }

    pub fn controller(&self) -> &GameController<R> {
        &self.controller
    }

    /// Submits a human move; an applied move that hands the turn to the
    /// computer arms the timer. Ignored moves arm nothing, so clicking
    /// around a rewound computer-turn position stays read-only.
    pub fn submit_human_move(&mut self, index: usize) -> MoveResult {
        let result = self.controller.submit_human_move(index);
        if result.was_applied() {
            self.sync_timer();
        }
        result
    }

    /// Applies a new configuration; any pending computer move dies with
    /// the old game.
    pub fn submit_configuration(&mut self, config: GameConfig) -> Result<(), ConfigError> {
        self.controller.submit_configuration(config)?;
        self.cancel_pending();
        Ok(())
    }

    /// Switches mode, resetting the game and canceling the timer.
    pub fn set_mode(&mut self, mode: GameMode) {
        self.cancel_pending();
        self.controller.set_mode(mode);
    }

    /// Resets the game and cancels the timer.
    pub fn reset(&mut self) {
        self.cancel_pending();
        self.controller.reset();
    }

    /// Browses to a history position. Browsing never auto-continues a
    /// computer move: the timer is canceled even when the target position
    /// is the computer's turn.
    pub fn jump_to_move(&mut self, index: usize) -> Result<(), HistoryError> {
        self.controller.jump_to_move(index)?;
        self.cancel_pending();
        Ok(())
    }

    /// True while a computer reply is scheduled or already queued.
    pub fn computer_move_pending(&self) -> bool {
        self.timer.is_pending()
    }

    /// Awaits the pending timer and applies the computer's move.
    ///
    /// Returns `None` immediately when no timer is pending. Used by
    /// drivers that block on the reply (the `play` binary); loop-based
    /// drivers poll [`tick`](Self::tick) instead.
    pub async fn wait_for_computer_move(&mut self) -> Option<MoveResult> {
        if !self.timer.is_pending() {
            return None;
        }
        let event = self.rx.recv().await?;
        Some(self.handle_timer_event(event))
    }

    /// Non-blocking poll: applies the computer move if its timer has
    /// fired, otherwise returns `None`.
    pub fn tick(&mut self) -> Option<MoveResult> {
        let event = self.rx.try_recv().ok()?;
        Some(self.handle_timer_event(event))
    }

    fn handle_timer_event(&mut self, _event: TimerEvent) -> MoveResult {
        self.timer.clear();
        let result = self.controller.computer_move_timer_fires();
        if result.was_applied() {
            // O's reply hands the turn back to X or ends the game; either
            // way no new timer is due, but keep the transition honest.
            self.sync_timer();
        }
        result
    }

    /// Arms or disarms the timer to match the controller's phase after an
    /// applied move.
    fn sync_timer(&mut self) {
        match self.controller.phase() {
            Phase::AwaitingComputerMove => self.timer.arm(self.tx.clone(), self.delay),
            Phase::AwaitingHumanMove | Phase::Terminal => self.cancel_pending(),
        }
    }

    /// Aborts the timer task and discards any fire already queued.
    fn cancel_pending(&mut self) {
        self.timer.cancel();
        while self.rx.try_recv().is_ok() {}
    }

    // Convenience pass-throughs for render layers.

    pub fn status(&self) -> GameStatus {
        self.controller.status()
    }

    pub fn phase(&self) -> Phase {
        self.controller.phase()
    }

    pub fn to_move(&self) -> Player {
        self.controller.to_move()
    }
}
