use crate::logic::board::{Direction, Ladder, Player, Position, RopeDirection, RopeObstacle};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Upper bound on chained ladder-climb / rope-trigger relocations within a
/// single turn. Rope triggers consume a resource, but ladders are reusable,
/// so a contrived ladder cycle could otherwise loop forever.
const MAX_CHAIN_STEPS: usize = 16;

/// Number of ladders rejection-sampled onto a fresh board.
const TARGET_LADDERS: usize = 3;
const LADDER_PLACEMENT_ATTEMPTS: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    Playing,
    Finished,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    /// Step to an adjacent cell.
    Move(Position),
    /// Spend one rope allowance to place a 3-cell trap.
    PlaceRope {
        cells: [Position; 3],
        direction: RopeDirection,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionError {
    GameFinished,
    InvalidMove(Position),
    NoRopesRemaining,
}

/// Complete game state. Fields are public so presentation layers and tests
/// can inspect or construct positions directly; mutation goes through
/// [`GameState::apply`], which is a pure copy-on-apply transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub board_size: i32,
    pub max_ropes: u8,
    pub player1_pos: Position,
    pub player2_pos: Position,
    pub prize_pos: Position,
    /// Remaining rope-placement allowance per player.
    pub player1_ropes: u8,
    pub player2_ropes: u8,
    pub rope_obstacles: Vec<RopeObstacle>,
    pub walls: HashSet<Position>,
    pub ladders: Vec<Ladder>,
    pub current_player: Player,
    pub turn_count: u32,
    pub phase: GamePhase,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(11, 3)
    }
}

impl GameState {
    /// New game with randomly placed ladders. Both players start on the
    /// bottom-center cell, the prize sits on the top-center cell.
    #[must_use]
    pub fn new(board_size: i32, max_ropes: u8) -> Self {
        Self::new_with_rng(board_size, max_ropes, &mut rand::thread_rng())
    }

    /// Like [`GameState::new`] but with a caller-supplied RNG, so tests can
    /// seed the ladder layout.
    #[must_use]
    pub fn new_with_rng<R: Rng>(board_size: i32, max_ropes: u8, rng: &mut R) -> Self {
        let mut state = Self::with_ladders(board_size, max_ropes, Vec::new());
        state.place_random_ladders(rng);
        state
    }

    /// New game with an explicit ladder layout and no random placement.
    #[must_use]
    pub fn with_ladders(board_size: i32, max_ropes: u8, ladders: Vec<Ladder>) -> Self {
        let start = Position::new(board_size - 1, board_size / 2);
        Self {
            board_size,
            max_ropes,
            player1_pos: start,
            player2_pos: start,
            prize_pos: Position::new(0, board_size / 2),
            player1_ropes: max_ropes,
            player2_ropes: max_ropes,
            rope_obstacles: Vec::new(),
            walls: HashSet::new(),
            ladders,
            current_player: Player::One,
            turn_count: 0,
            phase: GamePhase::Playing,
        }
    }

    #[must_use]
    pub fn is_valid_position(&self, pos: Position) -> bool {
        pos.row >= 0
            && pos.row < self.board_size
            && pos.col >= 0
            && pos.col < self.board_size
            && !self.walls.contains(&pos)
    }

    #[must_use]
    pub fn position_of(&self, player: Player) -> Position {
        match player {
            Player::One => self.player1_pos,
            Player::Two => self.player2_pos,
        }
    }

    fn set_position(&mut self, player: Player, pos: Position) {
        match player {
            Player::One => self.player1_pos = pos,
            Player::Two => self.player2_pos = pos,
        }
    }

    #[must_use]
    pub fn ropes_remaining(&self, player: Player) -> u8 {
        match player {
            Player::One => self.player1_ropes,
            Player::Two => self.player2_ropes,
        }
    }

    /// The state is terminal once a player stands on the prize cell.
    #[must_use]
    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::Finished || self.winner().is_some()
    }

    #[must_use]
    pub fn winner(&self) -> Option<Player> {
        if self.player1_pos == self.prize_pos {
            Some(Player::One)
        } else if self.player2_pos == self.prize_pos {
            Some(Player::Two)
        } else {
            None
        }
    }

    /// Legal step targets for the current player: the four axis-aligned
    /// neighbors that are in bounds and not walls. The opponent's cell
    /// never blocks movement.
    #[must_use]
    pub fn possible_moves(&self) -> Vec<Position> {
        let from = self.position_of(self.current_player);
        Direction::ALL
            .iter()
            .map(|d| {
                let (dr, dc) = d.delta();
                from.offset(dr, dc)
            })
            .filter(|&p| self.is_valid_position(p))
            .collect()
    }

    /// All cells occupied by the given player's own placed ropes.
    fn own_rope_cells(&self, player: Player) -> HashSet<Position> {
        self.rope_obstacles
            .iter()
            .filter(|r| r.owner == player)
            .flat_map(|r| r.cells)
            .collect()
    }

    /// Exhaustive legal actions for the current player: every legal step
    /// plus, while allowance remains, every legal rope segment. Placement
    /// cells must avoid the prize, walls, both players, and the placer's
    /// own existing rope cells; opponent rope cells do not block.
    #[must_use]
    pub fn legal_actions(&self) -> Vec<Action> {
        if self.phase != GamePhase::Playing {
            return Vec::new();
        }

        let mut actions: Vec<Action> = self.possible_moves().into_iter().map(Action::Move).collect();

        if self.ropes_remaining(self.current_player) > 0 {
            let own_cells = self.own_rope_cells(self.current_player);
            for row in 0..self.board_size {
                for col in 0..self.board_size {
                    let head = Position::new(row, col);
                    for direction in RopeDirection::ALL {
                        let cells = direction.segment_from(head);
                        if cells.iter().all(|&c| self.is_rope_cell_free(c, &own_cells)) {
                            actions.push(Action::PlaceRope { cells, direction });
                        }
                    }
                }
            }
        }

        actions
    }

    fn is_rope_cell_free(&self, cell: Position, own_cells: &HashSet<Position>) -> bool {
        self.is_valid_position(cell)
            && cell != self.prize_pos
            && cell != self.player1_pos
            && cell != self.player2_pos
            && !own_cells.contains(&cell)
    }

    /// If the current player stands on the head of an unused opponent rope,
    /// consume it and relocate the player to its tail. Returns whether a
    /// rope fired.
    fn trigger_rope_at(&mut self, pos: Position) -> bool {
        let mover = self.current_player;
        for rope in &mut self.rope_obstacles {
            if pos == rope.head() && !rope.used && rope.owner != mover {
                rope.used = true;
                let tail = rope.tail();
                self.set_position(mover, tail);
                log::debug!(
                    "{mover:?} stepped on opponent rope at ({}, {}) and was pushed to ({}, {})",
                    pos.row,
                    pos.col,
                    tail.row,
                    tail.col
                );
                return true;
            }
        }
        false
    }

    fn ladder_top_at(&self, pos: Position) -> Option<Position> {
        self.ladders.iter().find(|l| l.base == pos).map(|l| l.top)
    }

    /// While the current player stands on a ladder base, climb to its top,
    /// checking for a rope trigger at each landing so climbs and push-backs
    /// chain. Bounded by `MAX_CHAIN_STEPS`.
    fn climb_ladders_if_on_base(&mut self) {
        let mover = self.current_player;
        for step in 0.. {
            if step >= MAX_CHAIN_STEPS {
                log::warn!("ladder/rope chain exceeded {MAX_CHAIN_STEPS} steps; stopping");
                break;
            }
            let pos = self.position_of(mover);
            let Some(top) = self.ladder_top_at(pos) else {
                break;
            };
            self.set_position(mover, top);
            log::debug!(
                "{mover:?} climbed ladder from ({}, {}) to ({}, {})",
                pos.row,
                pos.col,
                top.row,
                top.col
            );
            self.trigger_rope_at(top);
        }
    }

    /// Pure transition: applies `action` for the current player and returns
    /// the successor state. The receiver is never mutated.
    ///
    /// Order of effects: entry climb for the mover, the action itself
    /// (with rope push-back and ladder chaining on landing), win check,
    /// then player switch, turn increment, and the entry climb for the new
    /// player. A win ends the turn immediately: no switch, no increment.
    pub fn apply(&self, action: Action) -> Result<GameState, ActionError> {
        if self.phase != GamePhase::Playing {
            return Err(ActionError::GameFinished);
        }

        let mut next = self.clone();

        // Ladders encountered between turns are climbed before the action.
        next.climb_ladders_if_on_base();

        match action {
            Action::Move(target) => {
                // Validated against the move set of the state the caller
                // saw, before the entry climb.
                if !self.possible_moves().contains(&target) {
                    return Err(ActionError::InvalidMove(target));
                }
                next.set_position(next.current_player, target);
                if next.trigger_rope_at(target) {
                    // The tail may sit on a ladder base; one climb, then
                    // the landing is itself rope-checked.
                    let landed = next.position_of(next.current_player);
                    if let Some(top) = next.ladder_top_at(landed) {
                        next.set_position(next.current_player, top);
                        log::debug!(
                            "{:?} climbed ladder from ({}, {}) to ({}, {})",
                            next.current_player,
                            landed.row,
                            landed.col,
                            top.row,
                            top.col
                        );
                        next.trigger_rope_at(top);
                    }
                }
                next.climb_ladders_if_on_base();
            }
            Action::PlaceRope { cells, .. } => {
                let placer = next.current_player;
                if next.ropes_remaining(placer) == 0 {
                    return Err(ActionError::NoRopesRemaining);
                }
                next.rope_obstacles.push(RopeObstacle {
                    cells,
                    owner: placer,
                    used: false,
                });
                match placer {
                    Player::One => next.player1_ropes -= 1,
                    Player::Two => next.player2_ropes -= 1,
                }
            }
        }

        // Win ends the turn immediately: no player switch, no increment.
        if next.winner().is_some() {
            next.phase = GamePhase::Finished;
            return Ok(next);
        }

        // A placement can leave the mover standing on a base it climbed
        // past earlier in the game; re-check once before handing over.
        let pos = next.position_of(next.current_player);
        if let Some(top) = next.ladder_top_at(pos) {
            next.set_position(next.current_player, top);
            next.trigger_rope_at(top);
        }

        next.current_player = next.current_player.opponent();
        next.turn_count += 1;
        next.climb_ladders_if_on_base();

        Ok(next)
    }

    /// Rejection-samples ladders onto the board: length 2-4, straight or
    /// diagonal, base on the higher-numbered row (farther from the prize).
    /// Gives up after a fixed attempt budget; fewer ladders than the
    /// target is a degraded-but-valid board, not an error.
    fn place_random_ladders<R: Rng>(&mut self, rng: &mut R) {
        let directions = [(1, 0), (1, 1), (1, -1)];
        let mut attempts = 0;
        while self.ladders.len() < TARGET_LADDERS && attempts < LADDER_PLACEMENT_ATTEMPTS {
            attempts += 1;
            let length: i32 = rng.gen_range(2..=4);
            if self.board_size < length + 1 {
                continue;
            }
            let (d_row, d_col) = directions[rng.gen_range(0..directions.len())];
            let start_row = rng.gen_range(0..=self.board_size - length - 1);
            let start_col = rng.gen_range(0..self.board_size);
            if d_col == 1 && start_col > self.board_size - length - 1 {
                continue;
            }
            if d_col == -1 && start_col < length {
                continue;
            }
            let end = Position::new(
                start_row + d_row * (length - 1),
                start_col + d_col * (length - 1),
            );
            if !self.is_valid_position(end) {
                continue;
            }
            let start = Position::new(start_row, start_col);
            let (base, top) = if start.row > end.row {
                (start, end)
            } else {
                (end, start)
            };

            let cells: Vec<Position> = (0..length)
                .map(|i| Position::new(start_row + d_row * i, start_col + d_col * i))
                .collect();
            let mut forbidden: HashSet<Position> =
                [self.player1_pos, self.player2_pos, self.prize_pos].into();
            forbidden.extend(self.rope_obstacles.iter().flat_map(|r| r.cells));
            for ladder in &self.ladders {
                forbidden.insert(ladder.base);
                forbidden.insert(ladder.top);
            }
            if cells.iter().any(|c| forbidden.contains(c)) {
                continue;
            }
            self.ladders.push(Ladder { base, top });
        }
        if self.ladders.len() < TARGET_LADDERS {
            log::debug!(
                "ladder placement exhausted after {attempts} attempts; proceeding with {}",
                self.ladders.len()
            );
        }
    }
}
