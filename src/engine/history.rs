use crate::logic::board::{Player, Position};
use std::collections::VecDeque;

/// How many past positions are remembered per player.
pub const HISTORY_CAPACITY: usize = 8;

/// Bounded per-player log of recently occupied positions, most-recent-last.
/// Purely heuristic: it feeds the oscillation and progress terms and is
/// never consulted for legality.
#[derive(Debug, Clone, Default)]
pub struct PositionHistory {
    entries: [VecDeque<Position>; 2],
}

impl PositionHistory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, player: Player, pos: Position) {
        let log = &mut self.entries[player.index()];
        log.push_back(pos);
        while log.len() > HISTORY_CAPACITY {
            log.pop_front();
        }
    }

    #[must_use]
    pub fn last(&self, player: Player) -> Option<Position> {
        self.entries[player.index()].back().copied()
    }

    pub fn clear(&mut self) {
        self.entries[0].clear();
        self.entries[1].clear();
    }

    /// Recency-weighted penalty for standing on a recently visited cell.
    /// The most recent repeat weighs fully; older repeats decay linearly.
    /// Only the most recent occurrence counts.
    #[must_use]
    pub fn oscillation_penalty(&self, player: Player, pos: Position, weight: f64) -> f64 {
        let log = &self.entries[player.index()];
        if log.is_empty() {
            return 0.0;
        }
        let len = log.len();
        for (i, past) in log.iter().rev().enumerate() {
            if *past == pos {
                let recency = (len - i) as f64 / len as f64;
                return weight * recency;
            }
        }
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(row: i32, col: i32) -> Position {
        Position::new(row, col)
    }

    #[test]
    fn test_capacity_is_bounded() {
        let mut history = PositionHistory::new();
        for i in 0..12 {
            history.record(Player::One, pos(i, 0));
        }
        assert_eq!(history.last(Player::One), Some(pos(11, 0)));
        // Oldest entries fell off: position (0,0) is no longer penalized.
        assert_eq!(
            history.oscillation_penalty(Player::One, pos(0, 0), 15.0),
            0.0
        );
        assert!(history.oscillation_penalty(Player::One, pos(4, 0), 15.0) > 0.0);
    }

    #[test]
    fn test_recency_weighting() {
        let mut history = PositionHistory::new();
        history.record(Player::One, pos(0, 0));
        history.record(Player::One, pos(1, 0));
        history.record(Player::One, pos(2, 0));
        history.record(Player::One, pos(3, 0));

        let newest = history.oscillation_penalty(Player::One, pos(3, 0), 15.0);
        let oldest = history.oscillation_penalty(Player::One, pos(0, 0), 15.0);
        assert!((newest - 15.0).abs() < f64::EPSILON);
        assert!(oldest > 0.0 && oldest < newest);
    }

    #[test]
    fn test_players_are_independent() {
        let mut history = PositionHistory::new();
        history.record(Player::One, pos(2, 2));
        assert_eq!(
            history.oscillation_penalty(Player::Two, pos(2, 2), 15.0),
            0.0
        );
        assert_eq!(history.last(Player::Two), None);
    }

    #[test]
    fn test_clear() {
        let mut history = PositionHistory::new();
        history.record(Player::One, pos(2, 2));
        history.record(Player::Two, pos(3, 3));
        history.clear();
        assert_eq!(history.last(Player::One), None);
        assert_eq!(history.last(Player::Two), None);
    }
}
