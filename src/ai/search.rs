use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use log::debug;
use thiserror::Error;
use web_time::Instant;

use crate::ai::eval::Evaluator;
use crate::game::{GameError, GameState, MoveSelector, PlayError};
use crate::types::{Move, Player, SearchReport, Winner};

const MIN_SCORE: f64 = f64::NEG_INFINITY;
const MAX_SCORE: f64 = f64::INFINITY;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SearchError {
    #[error("search was stopped before completing")]
    Cancelled,
    #[error(transparent)]
    Game(#[from] GameError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Role {
    Max,
    Min,
}

impl Role {
    fn flip(self) -> Self {
        match self {
            Self::Max => Self::Min,
            Self::Min => Self::Max,
        }
    }
}

/// Telemetry for one query. Has no influence on the chosen move.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    pub nodes: u64,
    /// Order-of-magnitude count of nodes skipped by cutoffs.
    pub pruned_estimate: u64,
    pub elapsed: Duration,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome {
    /// From the root mover's point of view; infinite for a proven result.
    pub score: f64,
    /// `None` only for a terminal root or a zero depth.
    pub best_move: Option<Move>,
    pub stats: SearchStats,
}

impl SearchOutcome {
    pub fn report(&self) -> SearchReport {
        SearchReport {
            score: self.score,
            best_move: self.best_move,
            nodes: self.stats.nodes,
            pruned_estimate: self.stats.pruned_estimate,
            elapsed_ms: self.stats.elapsed.as_secs_f64() * 1000.0,
        }
    }
}

/// Depth-bounded minimax with alpha-beta pruning.
pub struct Searcher<'a> {
    evaluator: Evaluator,
    max_depth: u32,
    stop: Option<&'a AtomicBool>,
    root: Player,
    stats: SearchStats,
}

impl<'a> Searcher<'a> {
    pub fn new(evaluator: Evaluator, max_depth: u32) -> Self {
        Self {
            evaluator,
            max_depth,
            stop: None,
            root: Player::Black,
            stats: SearchStats::default(),
        }
    }

    /// The search gives up with [`SearchError::Cancelled`] once `stop` is set.
    pub fn with_stop(evaluator: Evaluator, max_depth: u32, stop: &'a AtomicBool) -> Self {
        Self {
            stop: Some(stop),
            ..Self::new(evaluator, max_depth)
        }
    }

    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    /// Searches from `state` with its side to move as the maximizing player.
    /// `state` itself is never modified.
    pub fn search(&mut self, state: &GameState) -> Result<SearchOutcome, SearchError> {
        let start = Instant::now();
        self.root = state.turn();
        self.stats = SearchStats::default();

        let mut root = state.clone();
        let (score, best_move) = self.node(&mut root, Role::Max, MIN_SCORE, MAX_SCORE, 0)?;
        self.stats.elapsed = start.elapsed();

        debug!(
            "examined {} states, pruned ~{}, depth {}, value {:.0}, {:.2}s",
            self.stats.nodes,
            self.stats.pruned_estimate,
            self.max_depth,
            score,
            self.stats.elapsed.as_secs_f64()
        );

        Ok(SearchOutcome {
            score,
            best_move,
            stats: self.stats,
        })
    }

    /// Scores `state`, which is this node's own copy.
    fn node(
        &mut self,
        state: &mut GameState,
        role: Role,
        mut alpha: f64,
        mut beta: f64,
        depth: u32,
    ) -> Result<(f64, Option<Move>), SearchError> {
        self.stats.nodes += 1;
        if self.stop.is_some_and(|stop| stop.load(Ordering::Relaxed)) {
            return Err(SearchError::Cancelled);
        }

        if let Some(outcome) = state.winner() {
            return Ok((terminal_score(outcome, self.root), None));
        }
        if depth >= self.max_depth {
            return Ok((self.evaluator.evaluate(self.root, state), None));
        }

        let moves = state.legal_moves();
        if moves.is_empty() {
            state.apply_move(Move::Pass)?;
            let (score, _) = self.node(state, role.flip(), alpha, beta, depth + 1)?;
            return Ok((score, Some(Move::Pass)));
        }

        let mut best_move = None;
        match role {
            Role::Max => {
                let mut value = MIN_SCORE;
                for mv in moves {
                    let mut child = state.clone();
                    child.apply_move(mv)?;
                    let (score, _) = self.node(&mut child, Role::Min, alpha, beta, depth + 1)?;
                    // Ties go to the later move.
                    if score >= value {
                        value = score;
                        best_move = Some(mv);
                        alpha = alpha.max(value);
                    }
                    if value >= beta {
                        self.record_cutoff(depth);
                        break;
                    }
                }
                Ok((value, best_move))
            }
            Role::Min => {
                let mut value = MAX_SCORE;
                for mv in moves {
                    let mut child = state.clone();
                    child.apply_move(mv)?;
                    let (score, _) = self.node(&mut child, Role::Max, alpha, beta, depth + 1)?;
                    // Ties stay with the earlier move.
                    if score < value {
                        value = score;
                        best_move = Some(mv);
                        beta = beta.min(value);
                    }
                    if value <= alpha {
                        self.record_cutoff(depth);
                        break;
                    }
                }
                Ok((value, best_move))
            }
        }
    }

    fn record_cutoff(&mut self, depth: u32) {
        let skipped = 10u64.saturating_pow(self.max_depth.saturating_sub(depth));
        self.stats.pruned_estimate = self.stats.pruned_estimate.saturating_add(skipped);
    }
}

fn terminal_score(outcome: Winner, root: Player) -> f64 {
    match outcome {
        Winner::Draw => 0.0,
        winner if winner == Winner::from(root) => MAX_SCORE,
        _ => MIN_SCORE,
    }
}

/// Searches `state` to `max_depth` plies with the default weights.
pub fn best_move(state: &GameState, max_depth: u32) -> Result<SearchOutcome, SearchError> {
    Searcher::new(Evaluator::default(), max_depth).search(state)
}

/// Computer player backed by [`Searcher`].
#[derive(Debug, Clone, Copy)]
pub struct AlphaBetaSelector {
    evaluator: Evaluator,
    depth: u32,
}

impl AlphaBetaSelector {
    /// A zero depth would never produce a move, so it is raised to one.
    pub fn new(evaluator: Evaluator, depth: u32) -> Self {
        Self {
            evaluator,
            depth: depth.max(1),
        }
    }
}

impl MoveSelector for AlphaBetaSelector {
    fn select_move(&self, state: &GameState) -> Result<Move, PlayError> {
        let outcome = Searcher::new(self.evaluator, self.depth).search(state)?;
        outcome.best_move.ok_or(PlayError::NoMove(state.turn()))
    }
}
