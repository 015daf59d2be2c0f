use std::fmt;

/// One of the two marks that can occupy a cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Player {
    X,
    O,
}

impl Player {
    pub fn opponent(self) -> Player {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::X => write!(f, "X"),
            Player::O => write!(f, "O"),
        }
    }
}

/// Contents of a single board cell. No other values are permitted.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum Cell {
    #[default]
    Empty,
    Occupied(Player),
}

impl Cell {
    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }

    pub fn player(self) -> Option<Player> {
        match self {
            Cell::Empty => None,
            Cell::Occupied(p) => Some(p),
        }
    }
}

/// Errors from attempting to place a mark on a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveError {
    /// The cell index does not exist on this board.
    OutOfRange { index: usize, len: usize },
    /// The target cell already holds a mark.
    CellOccupied { index: usize },
}

impl fmt::Display for MoveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveError::OutOfRange { index, len } => {
                write!(f, "cell index {} out of range (board has {} cells)", index, len)
            }
            MoveError::CellOccupied { index } => {
                write!(f, "cell {} is already occupied", index)
            }
        }
    }
}

/// An immutable snapshot of cell contents for one board configuration.
///
/// Cells are stored row-major with length `rows * cols`. A move never
/// mutates a board; `with_move` produces a new snapshot, so every board
/// ever handed to the history log stays valid forever.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    cells: Vec<Cell>,
    rows: usize,
    cols: usize,
}

impl Board {
    pub fn empty(rows: usize, cols: usize) -> Self {
        Board {
            cells: vec![Cell::Empty; rows * cols],
            rows,
            cols,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Total number of cells (`rows * cols`).
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn cell(&self, index: usize) -> Option<Cell> {
        self.cells.get(index).copied()
    }

    /// Cell at (row, col). Panics if the coordinates are off the board;
    /// callers iterate within `rows()`/`cols()`.
    pub fn at(&self, row: usize, col: usize) -> Cell {
        self.cells[row * self.cols + col]
    }

    pub fn index_of(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Indices of all currently empty cells, in ascending order.
    pub fn empty_cells(&self) -> impl Iterator<Item = usize> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_empty())
            .map(|(i, _)| i)
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|c| !c.is_empty())
    }

    /// Returns a new board with `player`'s mark placed at `index`.
    ///
    /// Fails when the index is off the board or the cell is occupied.
    /// Marks are never overwritten; turn ownership is checked by the
    /// controller, not here.
    pub fn with_move(&self, index: usize, player: Player) -> Result<Board, MoveError> {
        match self.cells.get(index) {
            None => Err(MoveError::OutOfRange {
                index,
                len: self.cells.len(),
            }),
            Some(Cell::Occupied(_)) => Err(MoveError::CellOccupied { index }),
            Some(Cell::Empty) => {
                let mut next = self.clone();
                next.cells[index] = Cell::Occupied(player);
                Ok(next)
            }
        }
    }
}
