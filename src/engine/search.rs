use crate::engine::config::EngineConfig;
use crate::engine::eval::StrategicEvaluator;
use crate::engine::fingerprint::state_fingerprint;
use crate::engine::history::PositionHistory;
use crate::engine::ordering::MoveOrderer;
use crate::engine::tt::TranspositionTable;
use crate::engine::{Evaluator, SearchLimit, SearchStats, Searcher};
use crate::logic::board::Player;
use crate::logic::game::{Action, GameState};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Iterative-deepening minimax searcher with alpha-beta pruning.
///
/// Owns all mutable search state (transposition table, position history,
/// counters), so independent games get independent engines. Not thread
/// safe; the search is single-threaded and depth-first. Call
/// [`Searcher::reset`] between games.
pub struct AlphaBetaEngine {
    config: Arc<EngineConfig>,
    evaluator: StrategicEvaluator,
    orderer: MoveOrderer,
    tt: TranspositionTable,
    history: PositionHistory,
    nodes_evaluated: u32,
    pruning_count: u32,
    start_time: Instant,
    time_limit: Option<Duration>,
    /// Set when the time budget interrupts the current iteration; the
    /// iteration's partial result is then discarded.
    aborted: bool,
}

impl AlphaBetaEngine {
    #[must_use]
    pub fn new(config: Arc<EngineConfig>) -> Self {
        Self {
            evaluator: StrategicEvaluator::new(config.clone()),
            orderer: MoveOrderer::new(config.clone()),
            tt: TranspositionTable::new(config.tt_size_mb),
            config,
            history: PositionHistory::new(),
            nodes_evaluated: 0,
            pruning_count: 0,
            start_time: Instant::now(),
            time_limit: None,
            aborted: false,
        }
    }

    pub fn update_config(&mut self, config: Arc<EngineConfig>) {
        if config.tt_size_mb != self.config.tt_size_mb {
            self.tt = TranspositionTable::new(config.tt_size_mb);
        }
        self.evaluator = StrategicEvaluator::new(config.clone());
        self.orderer = MoveOrderer::new(config.clone());
        self.config = config;
    }

    #[must_use]
    pub const fn nodes_evaluated(&self) -> u32 {
        self.nodes_evaluated
    }

    #[must_use]
    pub const fn pruning_count(&self) -> u32 {
        self.pruning_count
    }

    #[must_use]
    pub fn tt_entries(&self) -> usize {
        self.tt.len()
    }

    /// The per-player position history the evaluator consults. Exposed so
    /// callers driving a full game can seed or inspect it.
    #[must_use]
    pub const fn history(&self) -> &PositionHistory {
        &self.history
    }

    fn out_of_time(&self) -> bool {
        self.time_limit
            .is_some_and(|limit| self.start_time.elapsed() > limit)
    }

    /// Recursive minimax with alpha-beta pruning, always scoring from
    /// `target`'s perspective. Returns the backed-up value and the best
    /// action at this node.
    ///
    /// A node reached after the time budget expires returns its static
    /// evaluation. That value is stored like any other at the requested
    /// depth; the depth guard and the root's discard-partial-iterations
    /// rule keep the approximation from compounding.
    fn minimax(
        &mut self,
        state: &GameState,
        depth: u8,
        mut alpha: f64,
        mut beta: f64,
        maximizing: bool,
        target: Player,
    ) -> (f64, Option<Action>) {
        self.nodes_evaluated += 1;

        if self.out_of_time() {
            self.aborted = true;
            return (self.evaluator.evaluate(state, target, &self.history), None);
        }

        let key = state_fingerprint(state);
        if let Some(entry) = self.tt.probe(key, depth) {
            return (entry.value, entry.action);
        }

        if depth == 0 || state.is_over() {
            let value = self.evaluator.evaluate(state, target, &self.history);
            self.tt.store(key, depth, value, None);
            return (value, None);
        }

        let actions = self.orderer.order(state, &self.history);
        if actions.is_empty() {
            // Fully boxed in; treat as a leaf.
            let value = self.evaluator.evaluate(state, target, &self.history);
            return (value, None);
        }

        let mut best_action = None;

        if maximizing {
            let mut best_value = f64::NEG_INFINITY;
            for scored in &actions {
                // Generation and application agree, so a failure here is a
                // stale action; skip it rather than aborting the search.
                let Ok(child) = state.apply(scored.action) else {
                    continue;
                };
                let (value, _) = self.minimax(&child, depth - 1, alpha, beta, false, target);
                if value > best_value {
                    best_value = value;
                    best_action = Some(scored.action);
                }
                alpha = alpha.max(value);
                if beta <= alpha {
                    self.pruning_count += 1;
                    break;
                }
            }
            self.tt.store(key, depth, best_value, best_action);
            (best_value, best_action)
        } else {
            let mut best_value = f64::INFINITY;
            for scored in &actions {
                let Ok(child) = state.apply(scored.action) else {
                    continue;
                };
                let (value, _) = self.minimax(&child, depth - 1, alpha, beta, true, target);
                if value < best_value {
                    best_value = value;
                    best_action = Some(scored.action);
                }
                beta = beta.min(value);
                if beta <= alpha {
                    self.pruning_count += 1;
                    break;
                }
            }
            self.tt.store(key, depth, best_value, best_action);
            (best_value, best_action)
        }
    }
}

impl Searcher for AlphaBetaEngine {
    /// Picks the best action for `state.current_player`.
    ///
    /// Runs full alpha-beta searches at depth 1, 2, ... up to the limit,
    /// keeping the action from the last iteration that finished inside the
    /// time budget. If not even depth 1 completes, falls back to the first
    /// legal action. Returns `None` only for states with no legal actions
    /// at all (terminal states).
    fn search(&mut self, state: &GameState, limit: SearchLimit) -> Option<(Action, SearchStats)> {
        self.nodes_evaluated = 0;
        self.pruning_count = 0;
        self.aborted = false;
        self.start_time = Instant::now();

        let (max_depth, budget) = match limit {
            SearchLimit::Depth(d) => (d, None),
            SearchLimit::Timed {
                max_depth,
                budget_ms,
            } => (max_depth, Some(Duration::from_millis(budget_ms))),
        };
        self.time_limit = budget;

        let target = state.current_player;
        let mut best_action: Option<Action> = None;
        let mut best_score = f64::NEG_INFINITY;
        let mut completed_depth = 0;

        for depth in 1..=max_depth {
            if self.out_of_time() {
                break;
            }

            let (value, action) = self.minimax(
                state,
                depth,
                f64::NEG_INFINITY,
                f64::INFINITY,
                true,
                target,
            );

            if self.aborted {
                // Partial iteration: its action reflects an uneven tree.
                log::debug!("depth {depth} aborted by time budget; keeping depth {completed_depth}");
                break;
            }
            if let Some(action) = action {
                best_action = Some(action);
                best_score = value;
                completed_depth = depth;
            }
            log::debug!(
                "depth {depth} complete: score {value:.1}, {} nodes, {} prunings",
                self.nodes_evaluated,
                self.pruning_count
            );
        }

        // Degenerate budgets (including zero) still produce a playable
        // action.
        let chosen = best_action.or_else(|| state.legal_actions().into_iter().next())?;

        if let Action::Move(_) = chosen {
            // Oscillation tracking keys off where the mover came from.
            self.history.record(target, state.position_of(target));
        }

        let elapsed = self.start_time.elapsed();
        log::info!(
            "search done: depth {completed_depth}, {} nodes, {} prunings, {} cached, {:?}",
            self.nodes_evaluated,
            self.pruning_count,
            self.tt.len(),
            elapsed
        );

        Some((
            chosen,
            SearchStats {
                depth: completed_depth,
                score: best_score,
                nodes: self.nodes_evaluated,
                prunings: self.pruning_count,
                tt_entries: self.tt.len(),
                time_ms: elapsed.as_millis() as u64,
            },
        ))
    }

    fn reset(&mut self) {
        self.tt.clear();
        self.history.clear();
        self.nodes_evaluated = 0;
        self.pruning_count = 0;
        self.aborted = false;
    }
}
