use serde::Serialize;

pub const BOARD_SIZE: usize = 8;
pub const NUM_SQUARES: usize = BOARD_SIZE * BOARD_SIZE;

/// A side in the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Player {
    Black,
    White,
}

impl Player {
    pub fn opponent(self) -> Self {
        match self {
            Self::Black => Self::White,
            Self::White => Self::Black,
        }
    }

    /// Wire code used by [`GameSnapshot`]: 1=black, 2=white.
    pub fn code(self) -> u8 {
        match self {
            Self::Black => 1,
            Self::White => 2,
        }
    }
}

/// Contents of one board square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Cell {
    Empty,
    Black,
    White,
}

impl Cell {
    pub fn owner(self) -> Option<Player> {
        match self {
            Self::Empty => None,
            Self::Black => Some(Player::Black),
            Self::White => Some(Player::White),
        }
    }

    pub fn code(self) -> u8 {
        self.owner().map_or(0, Player::code)
    }
}

/// Outcome of a finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Winner {
    Black,
    White,
    Draw,
}

impl From<Player> for Winner {
    fn from(player: Player) -> Self {
        match player {
            Player::Black => Self::Black,
            Player::White => Self::White,
        }
    }
}

impl Winner {
    pub fn code(self) -> u8 {
        match self {
            Self::Black => 1,
            Self::White => 2,
            Self::Draw => 0,
        }
    }
}

/// A board coordinate. `x` is the column, `y` the row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Position {
    pub x: u8,
    pub y: u8,
}

impl Position {
    pub fn new(x: u8, y: u8) -> Self {
        Self { x, y }
    }

    pub fn from_index(index: usize) -> Self {
        Self {
            x: (index % BOARD_SIZE) as u8,
            y: (index / BOARD_SIZE) as u8,
        }
    }

    pub fn index(self) -> usize {
        self.y as usize * BOARD_SIZE + self.x as usize
    }

    pub fn in_bounds(self) -> bool {
        (self.x as usize) < BOARD_SIZE && (self.y as usize) < BOARD_SIZE
    }
}

/// A placement or a forced pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Move {
    Place(Position),
    Pass,
}

impl Move {
    pub fn at(x: u8, y: u8) -> Self {
        Self::Place(Position::new(x, y))
    }

    pub fn position(self) -> Option<Position> {
        match self {
            Self::Place(pos) => Some(pos),
            Self::Pass => None,
        }
    }
}

/// Public game state handed to drivers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameSnapshot {
    /// Row-major cells, 0=empty, 1=black, 2=white.
    pub board: Vec<u8>,
    pub current_player: u8,
    pub black_count: u8,
    pub white_count: u8,
    pub black_passed: bool,
    pub white_passed: bool,
    pub is_game_over: bool,
    /// Contract:
    /// - `None` while the game is running.
    /// - `Some(0)` for a draw, otherwise the winner's player code.
    pub winner: Option<u8>,
}

/// Result of one best-move query, flattened for drivers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchReport {
    pub score: f64,
    /// `None` when the root is terminal or the depth is zero.
    pub best_move: Option<Move>,
    pub nodes: u64,
    pub pruned_estimate: u64,
    pub elapsed_ms: f64,
}
