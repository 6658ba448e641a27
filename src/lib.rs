use wasm_bindgen::prelude::*;

pub mod ai;
pub mod bindings;
pub mod board;
pub mod game;
pub mod types;

pub use ai::{AlphaBetaSelector, EvalWeights, Evaluator, SearchOutcome, best_move};
pub use board::Board;
pub use game::{GameError, GameState, PlayError, apply_move, initial_state, is_terminal, legal_moves, winner};
pub use types::{Cell, Move, Player, Position, Winner};

#[wasm_bindgen]
pub fn wasm_ready() -> bool {
    true
}
