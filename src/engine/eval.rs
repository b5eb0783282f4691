use crate::engine::config::EngineConfig;
use crate::engine::history::PositionHistory;
use crate::engine::Evaluator;
use crate::logic::board::{Player, Position};
use crate::logic::game::GameState;
use std::sync::Arc;

/// True if any cell of the segment falls inside the axis-aligned bounding
/// box spanned by `from` and `to`, a cheap stand-in for "the rope sits on
/// the straight-line path between them".
#[must_use]
pub fn rope_blocks_path(cells: &[Position; 3], from: Position, to: Position) -> bool {
    let (lo_row, hi_row) = (from.row.min(to.row), from.row.max(to.row));
    let (lo_col, hi_col) = (from.col.min(to.col), from.col.max(to.col));
    cells.iter().any(|c| {
        (lo_row..=hi_row).contains(&c.row) && (lo_col..=hi_col).contains(&c.col)
    })
}

/// Progress toward the prize relative to a previous position: full bonus
/// per cell gained, half-weight penalty per cell lost.
#[must_use]
pub fn progress_score(prize: Position, old_pos: Position, new_pos: Position, weight: f64) -> f64 {
    let improvement = old_pos.manhattan(prize) - new_pos.manhattan(prize);
    if improvement > 0 {
        weight * f64::from(improvement)
    } else if improvement < 0 {
        -weight * f64::from(improvement.abs()) * 0.5
    } else {
        0.0
    }
}

/// Multi-factor positional evaluator. Always scores from the perspective
/// of one designated player; the search passes the same target player all
/// the way down.
pub struct StrategicEvaluator {
    config: Arc<EngineConfig>,
}

impl StrategicEvaluator {
    #[must_use]
    pub const fn new(config: Arc<EngineConfig>) -> Self {
        Self { config }
    }

    fn evaluate_ladders(&self, state: &GameState, player_pos: Position, opponent_pos: Position) -> f64 {
        let prize = state.prize_pos;
        let weight = f64::from(self.config.ladder_weight);
        let mut score = 0.0;

        for ladder in &state.ladders {
            if player_pos == ladder.base {
                let advance = player_pos.manhattan(prize) - ladder.top.manhattan(prize);
                if advance > 0 {
                    score += f64::from(advance) * weight;
                } else {
                    score += 5.0;
                }
            }
            if opponent_pos == ladder.base {
                let advance = opponent_pos.manhattan(prize) - ladder.top.manhattan(prize);
                if advance > 0 {
                    score -= f64::from(advance) * weight;
                } else {
                    score -= 5.0;
                }
            }
            // Being within striking distance of a beneficial base is worth
            // a little on its own.
            if ladder.top.manhattan(prize) < ladder.base.manhattan(prize) {
                let distance_to_base = player_pos.manhattan(ladder.base);
                if distance_to_base <= 3 {
                    score += f64::from((4 - distance_to_base) * 3);
                }
            }
        }
        score
    }

    fn evaluate_ropes(
        &self,
        state: &GameState,
        player: Player,
        player_pos: Position,
        opponent_pos: Position,
    ) -> f64 {
        let prize = state.prize_pos;
        let strategic = f64::from(self.config.rope_strategic_weight);
        let blocking = f64::from(self.config.rope_blocking_weight);
        let mut score = 0.0;

        for rope in &state.rope_obstacles {
            if rope.owner == player {
                if rope.used {
                    // Already spent, but it did its job once.
                    score += 5.0;
                } else {
                    if opponent_pos.manhattan(rope.head()) <= 2 {
                        score += strategic;
                    }
                    if rope_blocks_path(&rope.cells, opponent_pos, prize) {
                        score += blocking;
                    }
                }
            } else if !rope.used {
                if player_pos.manhattan(rope.head()) <= 2 {
                    score -= strategic;
                }
                if rope_blocks_path(&rope.cells, player_pos, prize) {
                    score -= blocking;
                }
            }
        }
        score
    }

    /// Phase-gated pressure to spend ropes while the opponent closes in.
    /// Banded by the opponent's distance to the prize; the patience
    /// multiplier suppresses it in the opening and midgame.
    fn evaluate_rope_urgency(&self, state: &GameState, player: Player, opponent_distance: i32) -> f64 {
        let ropes = state.ropes_remaining(player);
        let urgency = self.config.rope_usage_urgency;

        let base = if ropes > 0 && opponent_distance <= 3 {
            (4 - opponent_distance) * urgency
        } else if ropes > 0 && opponent_distance <= 5 {
            (6 - opponent_distance) * (urgency / 2)
        } else if ropes > 1 && opponent_distance <= 7 {
            (8 - opponent_distance) * (urgency / 3)
        } else {
            0
        };

        f64::from(base) * self.config.patience_multiplier(state.turn_count)
    }

    /// Options only matter on your own turn.
    fn evaluate_mobility(&self, state: &GameState, player: Player) -> f64 {
        if state.current_player == player {
            let moves = state.possible_moves().len() as i32;
            f64::from(moves * self.config.mobility_weight)
        } else {
            0.0
        }
    }

    fn evaluate_center_control(
        &self,
        state: &GameState,
        player_pos: Position,
        opponent_pos: Position,
    ) -> f64 {
        if state.turn_count > 20 {
            return 0.0;
        }
        let center = Position::new(state.board_size / 2, state.board_size / 2);
        let diff = opponent_pos.manhattan(center) - player_pos.manhattan(center);
        f64::from(diff * self.config.center_control_weight)
    }
}

impl Evaluator for StrategicEvaluator {
    fn evaluate(&self, state: &GameState, perspective: Player, history: &PositionHistory) -> f64 {
        if state.is_over() {
            return match state.winner() {
                Some(winner) if winner == perspective => self.config.win_score,
                Some(_) => -self.config.win_score,
                None => 0.0,
            };
        }

        let player_pos = state.position_of(perspective);
        let opponent_pos = state.position_of(perspective.opponent());
        let prize = state.prize_pos;

        let player_distance = player_pos.manhattan(prize);
        let opponent_distance = opponent_pos.manhattan(prize);

        let mut score =
            f64::from((opponent_distance - player_distance) * self.config.distance_weight);

        score += self.evaluate_ladders(state, player_pos, opponent_pos);
        score += self.evaluate_ropes(state, perspective, player_pos, opponent_pos);
        score += self.evaluate_rope_urgency(state, perspective, opponent_distance);
        score += self.evaluate_mobility(state, perspective);
        score += self.evaluate_center_control(state, player_pos, opponent_pos);
        score -= f64::from(state.turn_count) * self.config.turn_penalty;
        score -= history.oscillation_penalty(perspective, player_pos, self.config.oscillation_penalty);

        if let Some(last_pos) = history.last(perspective) {
            score += progress_score(prize, last_pos, player_pos, self.config.progress_bonus);
        }

        score
    }
}
