use crate::engine::config::{EngineConfig, PhaseBand};
use crate::engine::eval::{progress_score, rope_blocks_path};
use crate::engine::history::PositionHistory;
use crate::engine::move_list::ActionList;
use crate::logic::board::Position;
use crate::logic::game::{Action, GameState};
use std::sync::Arc;

/// Scores a state's legal actions so alpha-beta explores the most
/// promising ones first. Lower priority sorts earlier.
pub struct MoveOrderer {
    config: Arc<EngineConfig>,
}

impl MoveOrderer {
    #[must_use]
    pub const fn new(config: Arc<EngineConfig>) -> Self {
        Self { config }
    }

    /// Legal actions of `state`, sorted ascending by priority.
    #[must_use]
    pub fn order(&self, state: &GameState, history: &PositionHistory) -> ActionList {
        let actions = state.legal_actions();
        let mut list = ActionList::with_capacity(actions.len());
        for action in actions {
            list.push(action, self.priority(state, history, action));
        }
        list.sort();
        list
    }

    fn priority(&self, state: &GameState, history: &PositionHistory, action: Action) -> f64 {
        match action {
            Action::Move(target) => self.move_priority(state, history, target),
            Action::PlaceRope { cells, .. } => self.rope_priority(state, &cells),
        }
    }

    fn move_priority(&self, state: &GameState, history: &PositionHistory, target: Position) -> f64 {
        let distance = f64::from(target.manhattan(state.prize_pos));
        let oscillation = history.oscillation_penalty(
            state.current_player,
            target,
            self.config.oscillation_penalty,
        );
        let current_pos = state.position_of(state.current_player);
        // A progress-making move lowers its priority score.
        let progress = -progress_score(
            state.prize_pos,
            current_pos,
            target,
            self.config.progress_bonus,
        );
        distance + oscillation * 0.1 + progress * 0.1
    }

    fn rope_priority(&self, state: &GameState, cells: &[Position; 3]) -> f64 {
        let head = cells[0];
        let tail = cells[2];
        let prize = state.prize_pos;
        let current = state.current_player;
        let current_pos = state.position_of(current);
        let opponent_pos = state.position_of(current.opponent());
        let ropes_held = state.ropes_remaining(current);

        let rope_to_opponent = head.manhattan(opponent_pos);
        let opponent_to_prize = opponent_pos.manhattan(prize);

        // Urgent defense: the opponent is about to win and this rope head
        // sits exactly one cell ahead of them on the way to the prize.
        let mut urgent_defense_bonus = 0.0;
        if opponent_to_prize <= 3 && rope_to_opponent == 1 {
            let toward_prize = (opponent_pos.row > prize.row && head.row < opponent_pos.row)
                || (opponent_pos.row < prize.row && head.row > opponent_pos.row)
                || (opponent_pos.col > prize.col && head.col < opponent_pos.col)
                || (opponent_pos.col < prize.col && head.col > opponent_pos.col);
            if toward_prize {
                urgent_defense_bonus = -25.0;
            }
        }

        // Outside the urgent band, prefer a rope 2-4 cells from the
        // opponent, and shrug at ropes too far away to matter.
        let distance_bonus = if urgent_defense_bonus != 0.0 {
            0.0
        } else if (2..=4).contains(&rope_to_opponent) {
            -5.0
        } else if rope_to_opponent == 1 {
            5.0
        } else if rope_to_opponent > 6 {
            15.0
        } else {
            0.0
        };

        let rope_to_prize = head.manhattan(prize).min(tail.manhattan(prize));

        let path_blocking_bonus = if rope_blocks_path(cells, opponent_pos, prize) {
            -15.0
        } else {
            0.0
        };

        // A rope right next to the placer rarely catches anyone.
        let self_distance_penalty = if current_pos.manhattan(head) <= 1 {
            20.0
        } else {
            0.0
        };

        // Patience: placements look worse while the game is young, unless
        // the opponent is already in the urgent band.
        let patience_penalty = if opponent_to_prize > 3 {
            match self.config.phase_band(state.turn_count) {
                PhaseBand::Early => 30.0,
                PhaseBand::Mid => 15.0,
                PhaseBand::Late => 0.0,
            }
        } else {
            0.0
        };

        // Keep at least one rope in reserve.
        let conservation_penalty = if ropes_held > 1 {
            f64::from(ropes_held - 1) * 8.0
        } else {
            0.0
        };

        // A rope between the opponent and the prize sits on their likely
        // path.
        let direction_bonus =
            if rope_to_opponent <= 3 && head.manhattan(prize) < opponent_to_prize {
                -8.0
            } else {
                0.0
            };

        f64::from(rope_to_opponent)
            + distance_bonus
            + urgent_defense_bonus
            + f64::from(rope_to_prize) * 0.3
            + path_blocking_bonus
            + self_distance_penalty
            + patience_penalty
            + conservation_penalty
            + direction_bonus
    }
}
