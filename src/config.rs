use std::fmt;

/// Smallest legal board dimension.
pub const MIN_BOARD_DIM: usize = 3;
/// Smallest legal win length.
pub const MIN_WIN_LENGTH: usize = 3;

/// Validated board dimensions and win length.
///
/// A config is only ever applied through
/// [`GameController::submit_configuration`](crate::controller::GameController::submit_configuration)
/// after `validate` succeeds; an invalid config is rejected and the
/// last-applied configuration stays in effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    pub num_rows: usize,
    pub num_cols: usize,
    pub win_length: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            num_rows: 3,
            num_cols: 3,
            win_length: 3,
        }
    }
}

impl GameConfig {
    pub fn new(num_rows: usize, num_cols: usize, win_length: usize) -> Self {
        GameConfig {
            num_rows,
            num_cols,
            win_length,
        }
    }

    pub fn cell_count(&self) -> usize {
        self.num_rows * self.num_cols
    }

    /// Checks every bound and collects all violations, so a form with
    /// several bad fields reports them all at once.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut problems = Vec::new();
        if self.num_rows < MIN_BOARD_DIM {
            problems.push(format!("rows must be at least {}", MIN_BOARD_DIM));
        }
        if self.num_cols < MIN_BOARD_DIM {
            problems.push(format!("columns must be at least {}", MIN_BOARD_DIM));
        }
        if self.win_length < MIN_WIN_LENGTH {
            problems.push(format!("win length must be at least {}", MIN_WIN_LENGTH));
        }
        if self.win_length > self.num_rows.min(self.num_cols) {
            problems.push("win length cannot exceed the smaller board dimension".to_string());
        }
        if problems.is_empty() {
            Ok(())
        } else {
            Err(ConfigError { problems })
        }
    }
}

impl fmt::Display for GameConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}x{} board, {} in a row to win",
            self.num_rows, self.num_cols, self.win_length
        )
    }
}

/// One human-readable message per violated configuration bound.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    problems: Vec<String>,
}

impl ConfigError {
    pub fn problems(&self) -> &[String] {
        &self.problems
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid configuration: {}", self.problems.join("; "))
    }
}

impl std::error::Error for ConfigError {}
