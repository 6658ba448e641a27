//! Browser-facing wrapper around [`GameState`] and the search.

use wasm_bindgen::prelude::*;

use crate::ai::{EvalWeights, Evaluator, Searcher};
use crate::game::GameState;
use crate::types::{GameSnapshot, Move, Position};

#[wasm_bindgen]
pub struct WasmGame {
    state: GameState,
    evaluator: Evaluator,
}

#[wasm_bindgen]
impl WasmGame {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            state: GameState::new(),
            evaluator: Evaluator::default(),
        }
    }

    /// Accepts a partial `EvalWeights` object; missing fields keep defaults.
    #[wasm_bindgen(js_name = setWeights)]
    pub fn set_weights(&mut self, weights: JsValue) -> Result<(), JsValue> {
        let weights: EvalWeights = serde_wasm_bindgen::from_value(weights)?;
        self.use_weights(weights);
        Ok(())
    }

    /// Weights currently used by `bestMove`.
    pub fn weights(&self) -> Result<JsValue, JsValue> {
        Ok(serde_wasm_bindgen::to_value(self.current_weights())?)
    }

    #[wasm_bindgen(js_name = legalMoves)]
    pub fn legal_moves(&mut self) -> Result<JsValue, JsValue> {
        Ok(serde_wasm_bindgen::to_value(&self.legal_positions())?)
    }

    pub fn play(&mut self, x: u8, y: u8) -> Result<(), JsValue> {
        self.apply(Move::at(x, y))
    }

    pub fn pass(&mut self) -> Result<(), JsValue> {
        self.apply(Move::Pass)
    }

    #[wasm_bindgen(js_name = bestMove)]
    pub fn best_move(&self, depth: u32) -> Result<JsValue, JsValue> {
        let outcome = Searcher::new(self.evaluator, depth)
            .search(&self.state)
            .map_err(to_js_error)?;
        Ok(serde_wasm_bindgen::to_value(&outcome.report())?)
    }

    pub fn snapshot(&self) -> Result<JsValue, JsValue> {
        Ok(serde_wasm_bindgen::to_value(&self.state_snapshot())?)
    }

    #[wasm_bindgen(js_name = isTerminal)]
    pub fn is_terminal(&self) -> bool {
        self.state.is_terminal()
    }
}

impl WasmGame {
    pub fn legal_positions(&mut self) -> Vec<Position> {
        self.state
            .legal_moves()
            .into_iter()
            .filter_map(Move::position)
            .collect()
    }

    pub fn state_snapshot(&self) -> GameSnapshot {
        self.state.snapshot()
    }

    pub fn current_weights(&self) -> &EvalWeights {
        self.evaluator.weights()
    }

    pub fn use_weights(&mut self, weights: EvalWeights) {
        self.evaluator = Evaluator::new(weights);
    }

    fn apply(&mut self, mv: Move) -> Result<(), JsValue> {
        self.state.apply_move(mv).map(|_| ()).map_err(to_js_error)
    }
}

impl Default for WasmGame {
    fn default() -> Self {
        Self::new()
    }
}

fn to_js_error(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}
