use serde::{Deserialize, Serialize};

// Canonical strategic weights.
pub const DISTANCE_WEIGHT: i32 = 25;
pub const LADDER_WEIGHT: i32 = 20;
pub const ROPE_STRATEGIC_WEIGHT: i32 = 15;
pub const ROPE_BLOCKING_WEIGHT: i32 = 30;
pub const ROPE_USAGE_URGENCY: i32 = 25;
pub const MOBILITY_WEIGHT: i32 = 3;
pub const CENTER_CONTROL_WEIGHT: i32 = 2;

/// Heuristic game-phase band, derived from the turn count. Distinct from
/// `GamePhase` (playing/finished): this only scales rope urgency.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseBand {
    Early,
    Mid,
    Late,
}

/// All tunable engine parameters: evaluation weights, move-ordering
/// constants, phase banding, and the transposition-table size.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    // Evaluation weights
    pub distance_weight: i32,
    pub ladder_weight: i32,
    pub rope_strategic_weight: i32,
    pub rope_blocking_weight: i32,
    pub rope_usage_urgency: i32,
    pub mobility_weight: i32,
    pub center_control_weight: i32,
    pub turn_penalty: f64,
    pub oscillation_penalty: f64,
    pub progress_bonus: f64,
    pub win_score: f64,

    // Phase banding and patience
    pub early_game_turns: u32,
    pub mid_game_turns: u32,
    pub patience_factor: f64,
    pub mid_game_factor: f64,

    // Resources
    pub tt_size_mb: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            distance_weight: DISTANCE_WEIGHT,
            ladder_weight: LADDER_WEIGHT,
            rope_strategic_weight: ROPE_STRATEGIC_WEIGHT,
            rope_blocking_weight: ROPE_BLOCKING_WEIGHT,
            rope_usage_urgency: ROPE_USAGE_URGENCY,
            mobility_weight: MOBILITY_WEIGHT,
            center_control_weight: CENTER_CONTROL_WEIGHT,
            turn_penalty: 0.1,
            oscillation_penalty: 15.0,
            progress_bonus: 10.0,
            win_score: 1000.0,

            early_game_turns: 8,
            mid_game_turns: 16,
            patience_factor: 0.2,
            mid_game_factor: 0.5,

            tt_size_mb: 16,
        }
    }
}

impl EngineConfig {
    pub fn load_from_json(json_str: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json_str)
    }

    #[must_use]
    pub fn phase_band(&self, turn_count: u32) -> PhaseBand {
        if turn_count <= self.early_game_turns {
            PhaseBand::Early
        } else if turn_count <= self.mid_game_turns {
            PhaseBand::Mid
        } else {
            PhaseBand::Late
        }
    }

    /// Scales rope urgency down while the game is young: placing ropes
    /// early wastes them.
    #[must_use]
    pub fn patience_multiplier(&self, turn_count: u32) -> f64 {
        match self.phase_band(turn_count) {
            PhaseBand::Early => self.patience_factor,
            PhaseBand::Mid => self.mid_game_factor,
            PhaseBand::Late => 1.0,
        }
    }
}
