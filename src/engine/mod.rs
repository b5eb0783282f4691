use crate::engine::history::PositionHistory;
use crate::logic::board::Player;
use crate::logic::game::{Action, GameState};
use serde::{Deserialize, Serialize};

pub mod config;
pub mod eval;
pub mod fingerprint;
pub mod history;
pub mod move_list;
pub mod ordering;
pub mod search;
pub mod tt;

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub enum SearchLimit {
    /// Fixed-depth search, no time cutoff.
    Depth(u8),
    /// Iterative deepening up to `max_depth`, soft-bounded by the budget.
    Timed { max_depth: u8, budget_ms: u64 },
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SearchStats {
    /// Deepest fully completed iteration.
    pub depth: u8,
    /// Root value at that depth, from the target player's perspective.
    pub score: f64,
    pub nodes: u32,
    pub prunings: u32,
    pub tt_entries: usize,
    pub time_ms: u64,
}

pub trait Evaluator {
    fn evaluate(&self, state: &GameState, perspective: Player, history: &PositionHistory) -> f64;
}

pub trait Searcher {
    fn search(&mut self, state: &GameState, limit: SearchLimit) -> Option<(Action, SearchStats)>;

    /// Clears all per-game search state. Must be called between games.
    fn reset(&mut self);
}
