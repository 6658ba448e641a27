//! End-to-end scenarios through the public driver contract.

use othello_engine::board::Board;
use othello_engine::{
    AlphaBetaSelector, Evaluator, GameError, GameState, Move, Player, Position, Winner, apply_move,
    best_move, initial_state, is_terminal, legal_moves, winner,
};
use othello_engine::game::{FirstLegalMoveSelector, play_out};

fn bit(x: usize, y: usize) -> u64 {
    1u64 << (y * 8 + x)
}

#[test]
fn black_opens_with_exactly_four_moves() {
    let mut state = initial_state();

    let moves = legal_moves(&mut state);

    assert_eq!(
        moves,
        vec![Move::at(3, 2), Move::at(2, 3), Move::at(5, 4), Move::at(4, 5)]
    );
}

#[test]
fn first_legal_move_flips_one_white_disc() {
    let mut state = initial_state();
    let first = legal_moves(&mut state)[0];

    let next = apply_move(&state, first).unwrap();

    assert_eq!(next.piece_count(Player::Black), 4);
    assert_eq!(next.piece_count(Player::White), 1);
    assert_eq!(next.empty_count(), 59);
}

#[test]
fn blocked_side_passes_while_other_side_can_still_move() {
    let black = bit(1, 0);
    let white = u64::MAX ^ bit(0, 0) ^ black;
    let mut state =
        GameState::from_board(Board::from_bitboards(black, white).unwrap(), Player::Black);

    assert!(legal_moves(&mut state).is_empty());
    assert_eq!(
        state.apply_move(Move::at(0, 0)),
        Err(GameError::NoCapture(Position::new(0, 0)))
    );
    let passed = apply_move(&state, Move::Pass).unwrap();

    assert!(passed.has_passed(Player::Black));
    assert!(!is_terminal(&passed));
    assert_eq!(winner(&passed), None);
}

#[test]
fn engine_answers_pass_for_a_blocked_root() {
    let black = bit(1, 0);
    let white = u64::MAX ^ bit(0, 0) ^ black;
    let state = GameState::from_board(Board::from_bitboards(black, white).unwrap(), Player::Black);

    let outcome = best_move(&state, 1).unwrap();

    assert_eq!(outcome.best_move, Some(Move::Pass));
}

#[test]
fn engine_game_against_first_legal_player_finishes() {
    let mut state = initial_state();
    let engine = AlphaBetaSelector::new(Evaluator::default(), 2);

    let result = play_out(&mut state, &FirstLegalMoveSelector, &engine).unwrap();

    assert!(is_terminal(&state));
    assert_eq!(winner(&state), Some(result));
    let total = state.piece_count(Player::Black) as u32
        + state.piece_count(Player::White) as u32
        + state.empty_count() as u32;
    assert_eq!(total, 64);
    if result != Winner::Draw {
        assert_ne!(
            state.piece_count(Player::Black),
            state.piece_count(Player::White)
        );
    }
}
