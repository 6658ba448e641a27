//! Property-based tests using proptest.

use othello_engine::{Evaluator, GameState, Move, Player, Winner, best_move};
use othello_engine::ai::Searcher;
use proptest::prelude::*;

/// Plays the chosen move indices from the opening, passing when blocked.
fn play_choices(choices: &[usize]) -> GameState {
    let mut state = GameState::new();
    for &choice in choices {
        if state.is_terminal() {
            break;
        }
        let moves = state.legal_moves();
        let mv = if moves.is_empty() {
            Move::Pass
        } else {
            moves[choice % moves.len()]
        };
        state.apply_move(mv).unwrap();
    }
    state
}

fn terminal_score(outcome: Winner, root: Player) -> f64 {
    match outcome {
        Winner::Draw => 0.0,
        winner if winner == Winner::from(root) => f64::INFINITY,
        _ => f64::NEG_INFINITY,
    }
}

/// Full-width minimax with the engine's node rules and no pruning.
fn minimax(
    evaluator: &Evaluator,
    root: Player,
    state: &mut GameState,
    maximizing: bool,
    depth: u32,
    max_depth: u32,
) -> f64 {
    if let Some(outcome) = state.winner() {
        return terminal_score(outcome, root);
    }
    if depth >= max_depth {
        return evaluator.evaluate(root, state);
    }
    let moves = state.legal_moves();
    if moves.is_empty() {
        state.apply_move(Move::Pass).unwrap();
        return minimax(evaluator, root, state, !maximizing, depth + 1, max_depth);
    }
    let scores = moves.into_iter().map(|mv| {
        let mut child = state.clone();
        child.apply_move(mv).unwrap();
        minimax(evaluator, root, &mut child, !maximizing, depth + 1, max_depth)
    });
    if maximizing {
        scores.fold(f64::NEG_INFINITY, f64::max)
    } else {
        scores.fold(f64::INFINITY, f64::min)
    }
}

fn choices_strategy() -> impl Strategy<Value = Vec<usize>> {
    prop::collection::vec(0usize..64, 0..60)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Property: every square is black, white or empty after any sequence of moves
    #[test]
    fn prop_cells_are_conserved(choices in choices_strategy()) {
        let state = play_choices(&choices);

        let total = state.piece_count(Player::Black) as u32
            + state.piece_count(Player::White) as u32
            + state.empty_count() as u32;
        prop_assert_eq!(total, 64);
    }

    /// Property: every generated move flips at least one disc and adds exactly one
    #[test]
    fn prop_legal_moves_always_capture(choices in choices_strategy()) {
        let mut state = play_choices(&choices);
        let occupied = 64 - state.empty_count();

        for mv in state.legal_moves() {
            let mut child = state.clone();
            let flips = child.apply_move(mv).unwrap();
            prop_assert!(flips != 0);
            prop_assert_eq!(64 - child.empty_count(), occupied + 1);
        }
    }

    /// Property: a pass is only accepted when no placement exists
    #[test]
    fn prop_pass_only_when_blocked(choices in choices_strategy()) {
        let mut state = play_choices(&choices);
        let blocked = state.legal_moves().is_empty();

        prop_assert_eq!(state.clone().apply_move(Move::Pass).is_ok(), blocked);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(12))]

    /// Property: pruning never changes the root value
    #[test]
    fn prop_alpha_beta_matches_minimax(choices in prop::collection::vec(0usize..64, 0..40), depth in 1u32..=3) {
        let state = play_choices(&choices);
        let evaluator = Evaluator::default();

        let pruned = Searcher::new(evaluator, depth).search(&state).unwrap();
        let mut root = state.clone();
        let full = minimax(&evaluator, state.turn(), &mut root, true, 0, depth);

        prop_assert_eq!(pruned.score, full);
    }

    /// Property: the same query twice gives the same answer
    #[test]
    fn prop_search_is_deterministic(choices in prop::collection::vec(0usize..64, 0..40)) {
        let state = play_choices(&choices);

        let first = best_move(&state, 2).unwrap();
        let second = best_move(&state, 2).unwrap();

        prop_assert_eq!(first.score, second.score);
        prop_assert_eq!(first.best_move, second.best_move);
    }
}
