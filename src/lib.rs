//! Core engine for the Ropes & Ladders board game: game rules, state
//! transitions, and the adversarial search AI.
//!
//! The crate is split in two layers. [`logic`] owns the game itself:
//! positions, ladders, rope obstacles, legal actions, and the pure
//! transition function. [`engine`] owns the AI, a multi-factor positional
//! evaluator driving an iterative-deepening alpha-beta searcher with a
//! transposition table and move-ordering heuristics.
//!
//! Presentation layers (rendering, input, the command loop) live outside
//! this crate and consume `GameState`, `Action`, and the `Searcher` trait.

pub mod engine;
pub mod logic;

pub use engine::search::AlphaBetaEngine;
pub use engine::{SearchLimit, SearchStats, Searcher};
pub use logic::board::{Direction, Ladder, Player, Position, RopeDirection, RopeObstacle};
pub use logic::game::{Action, ActionError, GamePhase, GameState};
