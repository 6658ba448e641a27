use serde::{Deserialize, Serialize};

use crate::ai::stability::{ProtectionMap, SideTally};
use crate::board::{Board, xy_to_pos};
use crate::game::GameState;
use crate::types::{Cell, Player};

/// Corners paired with the three squares touching them.
const CORNER_ZONES: [((i32, i32), [(i32, i32); 3]); 4] = [
    ((0, 0), [(0, 1), (1, 0), (1, 1)]),
    ((7, 0), [(6, 0), (7, 1), (6, 1)]),
    ((0, 7), [(0, 6), (1, 7), (1, 6)]),
    ((7, 7), [(7, 6), (6, 7), (6, 6)]),
];

const CORNER_VALUE: f64 = 25.0;
const CLOSENESS_VALUE: f64 = 12.5;

/// Weights applied to each disc class before the stability term is normalised.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StabilityWeights {
    pub stable: f64,
    pub danger: f64,
    pub unprotected: f64,
}

impl Default for StabilityWeights {
    fn default() -> Self {
        Self {
            stable: 1.0,
            danger: -1.0,
            unprotected: -0.05,
        }
    }
}

impl StabilityWeights {
    fn score(&self, side: &SideTally) -> f64 {
        self.stable * side.stable as f64
            + self.danger * side.danger as f64
            + self.unprotected * side.unprotected as f64
    }
}

/// Multipliers for the five evaluation terms.
///
/// `corner_closeness` is subtracted: sitting next to an empty corner is bad.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvalWeights {
    pub mobility: f64,
    pub coin_parity: f64,
    pub corners: f64,
    pub stability: f64,
    pub corner_closeness: f64,
    pub discs: StabilityWeights,
}

impl Default for EvalWeights {
    fn default() -> Self {
        Self {
            mobility: 10.0,
            coin_parity: 70.0,
            corners: 800.0,
            stability: 50.0,
            corner_closeness: 300.0,
            discs: StabilityWeights::default(),
        }
    }
}

/// Unweighted terms and the weighted total of one evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EvalBreakdown {
    pub mobility: f64,
    pub coin_parity: f64,
    pub corners: f64,
    pub stability: f64,
    pub corner_closeness: f64,
    pub total: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Evaluator {
    weights: EvalWeights,
}

impl Evaluator {
    pub fn new(weights: EvalWeights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> &EvalWeights {
        &self.weights
    }

    /// Static score of `state`; higher is better for `player`.
    pub fn evaluate(&self, player: Player, state: &GameState) -> f64 {
        self.breakdown(player, state).total
    }

    pub fn breakdown(&self, player: Player, state: &GameState) -> EvalBreakdown {
        let board = state.board();
        let w = &self.weights;

        let mobility = mobility(state, player);
        let coin_parity = coin_parity(board, player);
        let corners = corners_captured(board, player);
        let stability = stability_score(board, player, &w.discs);
        let corner_closeness = corner_closeness(board, player);

        EvalBreakdown {
            mobility,
            coin_parity,
            corners,
            stability,
            corner_closeness,
            total: w.mobility * mobility
                + w.coin_parity * coin_parity
                + w.corners * corners
                + w.stability * stability
                - w.corner_closeness * corner_closeness,
        }
    }
}

/// `100 * (mine - theirs) / (mine + theirs)`, 0 when the sum is 0.
fn normalized_difference(mine: f64, theirs: f64) -> f64 {
    let total = mine + theirs;
    if total == 0.0 {
        0.0
    } else {
        100.0 * (mine - theirs) / total
    }
}

pub fn coin_parity(board: &Board, player: Player) -> f64 {
    normalized_difference(
        board.count_of(player) as f64,
        board.count_of(player.opponent()) as f64,
    )
}

/// Move counts for both sides on the same board, each with the turn set to it.
pub fn mobility(state: &GameState, player: Player) -> f64 {
    let mine = state.with_turn(player).legal_move_mask().count_ones();
    let theirs = state.with_turn(player.opponent()).legal_move_mask().count_ones();
    normalized_difference(mine as f64, theirs as f64)
}

pub fn corners_captured(board: &Board, player: Player) -> f64 {
    let mut balance = 0i32;
    for ((x, y), _) in CORNER_ZONES {
        balance += ownership(board, x, y, player);
    }
    CORNER_VALUE * balance as f64
}

pub fn stability_score(board: &Board, player: Player, weights: &StabilityWeights) -> f64 {
    let tally = ProtectionMap::analyze(board).tally(board, player);
    normalized_difference(weights.score(&tally.mine), weights.score(&tally.theirs))
}

/// Discs next to empty corners; occupied corners do not count.
pub fn corner_closeness(board: &Board, player: Player) -> f64 {
    let mut balance = 0i32;
    for ((x, y), neighbours) in CORNER_ZONES {
        if board.cell(xy_to_pos(x, y)) != Cell::Empty {
            continue;
        }
        for (nx, ny) in neighbours {
            balance += ownership(board, nx, ny, player);
        }
    }
    CLOSENESS_VALUE * balance as f64
}

/// +1 for `player`, -1 for the opponent, 0 when empty.
fn ownership(board: &Board, x: i32, y: i32, player: Player) -> i32 {
    match board.cell(xy_to_pos(x, y)).owner() {
        Some(owner) if owner == player => 1,
        Some(_) => -1,
        None => 0,
    }
}
