use thiserror::Error;

use crate::ai::search::SearchError;
use crate::board::{Board, bitmask_to_indices};
use crate::types::{GameSnapshot, Move, Player, Position, Winner};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("position ({}, {}) is off the board", .0.x, .0.y)]
    OutOfBounds(Position),
    #[error("square ({}, {}) is already occupied", .0.x, .0.y)]
    Occupied(Position),
    #[error("move at ({}, {}) captures nothing", .0.x, .0.y)]
    NoCapture(Position),
    #[error("{0:?} cannot pass while a legal move exists")]
    PassWithLegalMoves(Player),
}

/// Failure while a [`MoveSelector`] drives a game.
#[derive(Debug, PartialEq, Eq, Error)]
pub enum PlayError {
    #[error(transparent)]
    Game(#[from] GameError),
    #[error(transparent)]
    Search(#[from] SearchError),
    #[error("move selector returned no move for {0:?}")]
    NoMove(Player),
}

/// Board, side to move and the consecutive-pass flags.
///
/// Branches of a search each own a clone; nothing is shared between them.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GameState {
    board: Board,
    turn: Player,
    black_passed: bool,
    white_passed: bool,
}

impl GameState {
    /// Standard starting position with black to move.
    pub fn new() -> Self {
        Self::from_board(Board::new(), Player::Black)
    }

    /// Arbitrary position with no pass recorded for either side.
    pub fn from_board(board: Board, turn: Player) -> Self {
        Self {
            board,
            turn,
            black_passed: false,
            white_passed: false,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn turn(&self) -> Player {
        self.turn
    }

    pub fn has_passed(&self, player: Player) -> bool {
        match player {
            Player::Black => self.black_passed,
            Player::White => self.white_passed,
        }
    }

    /// Whether the side to move may place at `(x, y)`. Off-board is never legal.
    pub fn is_legal(&self, x: u8, y: u8) -> bool {
        let pos = Position::new(x, y);
        pos.in_bounds() && self.board.flips_for(pos.index(), self.turn) != 0
    }

    /// Legal placement mask for the side to move, without flag bookkeeping.
    pub fn legal_move_mask(&self) -> u64 {
        self.board.legal_moves(self.turn)
    }

    /// Legal placements for the side to move, rows top to bottom.
    ///
    /// Clears the mover's pass flag when at least one move exists.
    pub fn legal_moves(&mut self) -> Vec<Move> {
        let moves: Vec<Move> = bitmask_to_indices(self.legal_move_mask())
            .map(|idx| Move::Place(Position::from_index(idx)))
            .collect();
        if !moves.is_empty() {
            self.set_passed(self.turn, false);
        }
        moves
    }

    /// Applies a move for the side to move and hands the turn over.
    /// Returns the mask of flipped discs (0 for a pass).
    ///
    /// Rejected moves leave the state untouched.
    pub fn apply_move(&mut self, mv: Move) -> Result<u64, GameError> {
        let mover = self.turn;
        let flips = match mv {
            Move::Pass => {
                if self.legal_move_mask() != 0 {
                    return Err(GameError::PassWithLegalMoves(mover));
                }
                self.set_passed(mover, true);
                0
            }
            Move::Place(pos) => {
                if !pos.in_bounds() {
                    return Err(GameError::OutOfBounds(pos));
                }
                if self.board.cell_at(pos).owner().is_some() {
                    return Err(GameError::Occupied(pos));
                }
                let flips = self.board.place(pos.index(), mover);
                if flips == 0 {
                    return Err(GameError::NoCapture(pos));
                }
                self.set_passed(mover, false);
                flips
            }
        };
        self.turn = mover.opponent();
        Ok(flips)
    }

    pub fn is_terminal(&self) -> bool {
        (self.black_passed && self.white_passed) || self.board.empty_count() == 0
    }

    /// `None` until the game is over.
    pub fn winner(&self) -> Option<Winner> {
        if !self.is_terminal() {
            return None;
        }
        let (black, white) = self.board.count();
        Some(if black > white {
            Winner::Black
        } else if white > black {
            Winner::White
        } else {
            Winner::Draw
        })
    }

    pub fn piece_count(&self, player: Player) -> u8 {
        self.board.count_of(player)
    }

    pub fn empty_count(&self) -> u8 {
        self.board.empty_count()
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let (black_count, white_count) = self.board.count();
        GameSnapshot {
            board: self.board.to_array().to_vec(),
            current_player: self.turn.code(),
            black_count,
            white_count,
            black_passed: self.black_passed,
            white_passed: self.white_passed,
            is_game_over: self.is_terminal(),
            winner: self.winner().map(Winner::code),
        }
    }

    /// Same position with `turn` to move; pass flags are kept.
    pub(crate) fn with_turn(&self, turn: Player) -> Self {
        Self {
            turn,
            ..self.clone()
        }
    }

    fn set_passed(&mut self, player: Player, passed: bool) {
        match player {
            Player::Black => self.black_passed = passed,
            Player::White => self.white_passed = passed,
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

pub fn initial_state() -> GameState {
    GameState::new()
}

pub fn legal_moves(state: &mut GameState) -> Vec<Move> {
    state.legal_moves()
}

/// Produces the next state, leaving `state` as it was.
pub fn apply_move(state: &GameState, mv: Move) -> Result<GameState, GameError> {
    let mut next = state.clone();
    next.apply_move(mv)?;
    Ok(next)
}

pub fn is_terminal(state: &GameState) -> bool {
    state.is_terminal()
}

pub fn winner(state: &GameState) -> Option<Winner> {
    state.winner()
}

/// Chooses a placement for the side to move. Only consulted when one exists.
pub trait MoveSelector: Send + Sync {
    fn select_move(&self, state: &GameState) -> Result<Move, PlayError>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct FirstLegalMoveSelector;

impl MoveSelector for FirstLegalMoveSelector {
    fn select_move(&self, state: &GameState) -> Result<Move, PlayError> {
        let legal = state.legal_move_mask();
        if legal == 0 {
            return Err(PlayError::NoMove(state.turn()));
        }
        Ok(Move::Place(Position::from_index(
            legal.trailing_zeros() as usize,
        )))
    }
}

/// Plays `state` to the end, passing automatically when a side is blocked.
pub fn play_out(
    state: &mut GameState,
    black: &dyn MoveSelector,
    white: &dyn MoveSelector,
) -> Result<Winner, PlayError> {
    loop {
        if let Some(result) = state.winner() {
            return Ok(result);
        }
        let mover = state.turn();
        let mv = if state.legal_moves().is_empty() {
            Move::Pass
        } else {
            let selector = match mover {
                Player::Black => black,
                Player::White => white,
            };
            selector.select_move(state)?
        };
        state.apply_move(mv)?;
    }
}
