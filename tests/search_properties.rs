//! Pruning soundness: alpha-beta must return the same root value as an
//! exhaustive minimax over the same tree.

use ropes_ladders_core::{
    AlphaBetaEngine, GameState, Ladder, Player, Position, SearchLimit, Searcher,
};
use ropes_ladders_core::engine::config::EngineConfig;
use ropes_ladders_core::engine::eval::StrategicEvaluator;
use ropes_ladders_core::engine::history::PositionHistory;
use ropes_ladders_core::engine::Evaluator;
use std::sync::Arc;

/// Plain minimax without pruning, ordering, or caching. Evaluation order
/// follows `legal_actions` directly, so any value difference against the
/// engine is a pruning or caching bug, not a tie-break artifact.
fn reference_minimax(
    state: &GameState,
    depth: u8,
    maximizing: bool,
    target: Player,
    evaluator: &StrategicEvaluator,
) -> f64 {
    let history = PositionHistory::new();
    if depth == 0 || state.is_over() {
        return evaluator.evaluate(state, target, &history);
    }
    let actions = state.legal_actions();
    if actions.is_empty() {
        return evaluator.evaluate(state, target, &history);
    }

    let mut best = if maximizing {
        f64::NEG_INFINITY
    } else {
        f64::INFINITY
    };
    for action in actions {
        let child = state.apply(action).expect("generated action must apply");
        let value = reference_minimax(&child, depth - 1, !maximizing, target, evaluator);
        best = if maximizing {
            best.max(value)
        } else {
            best.min(value)
        };
    }
    best
}

fn assert_matches_reference(state: &GameState, depth: u8) {
    let config = Arc::new(EngineConfig::default());
    let evaluator = StrategicEvaluator::new(config.clone());
    let expected = reference_minimax(state, depth, true, state.current_player, &evaluator);

    // Fresh engine per position so no cached entries cross positions.
    let mut engine = AlphaBetaEngine::new(config);
    let (_, stats) = engine
        .search(state, SearchLimit::Depth(depth))
        .expect("position has legal actions");

    assert!(
        (stats.score - expected).abs() < 1e-9,
        "depth {depth}: alpha-beta {} != minimax {expected}",
        stats.score
    );
}

fn pos(row: i32, col: i32) -> Position {
    Position::new(row, col)
}

#[test]
fn test_alpha_beta_matches_minimax_open_board() {
    // Movement-only game: every fingerprint includes the turn counter, so
    // no two nodes in one iteration share a cache slot legitimately.
    let state = GameState::with_ladders(4, 0, Vec::new());
    for depth in 1..=3 {
        assert_matches_reference(&state, depth);
    }
}

#[test]
fn test_alpha_beta_matches_minimax_with_ladder() {
    let mut state = GameState::with_ladders(
        4,
        0,
        vec![Ladder {
            base: pos(2, 0),
            top: pos(1, 2),
        }],
    );
    state.player1_pos = pos(3, 0);
    state.player2_pos = pos(3, 3);
    for depth in 1..=3 {
        assert_matches_reference(&state, depth);
    }
}

#[test]
fn test_alpha_beta_matches_minimax_midgame() {
    let mut state = GameState::with_ladders(4, 0, Vec::new());
    state.player1_pos = pos(2, 1);
    state.player2_pos = pos(1, 3);
    state.current_player = Player::Two;
    state.turn_count = 11;
    for depth in 1..=3 {
        assert_matches_reference(&state, depth);
    }
}

#[test]
fn test_deeper_search_never_loses_a_forced_win() {
    // One step from the prize: every depth must report the win.
    let mut state = GameState::with_ladders(4, 0, Vec::new());
    state.player1_pos = pos(1, 2);
    state.player2_pos = pos(3, 0);
    let config = Arc::new(EngineConfig::default());
    for depth in 1..=4 {
        let mut engine = AlphaBetaEngine::new(config.clone());
        let (_, stats) = engine
            .search(&state, SearchLimit::Depth(depth))
            .expect("position has legal actions");
        assert!(
            stats.score >= config.win_score - 1.0,
            "depth {depth} missed the immediate win: {}",
            stats.score
        );
    }
}
