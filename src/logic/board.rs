use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Player {
    One,
    Two,
}

impl Player {
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Self::One => Self::Two,
            Self::Two => Self::One,
        }
    }

    pub const fn index(self) -> usize {
        match self {
            Self::One => 0,
            Self::Two => 1,
        }
    }
}

/// A cell on the board. Rows grow downward, row 0 is the prize side.
///
/// Coordinates are signed so neighbor arithmetic can step off the board;
/// bounds are checked by `GameState::is_valid_position`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: i32,
    pub col: i32,
}

impl Position {
    #[must_use]
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    #[must_use]
    pub const fn manhattan(self, other: Self) -> i32 {
        (self.row - other.row).abs() + (self.col - other.col).abs()
    }

    #[must_use]
    pub const fn offset(self, dr: i32, dc: i32) -> Self {
        Self {
            row: self.row + dr,
            col: self.col + dc,
        }
    }
}

/// The four movement directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Self; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    #[must_use]
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Self::Up => (-1, 0),
            Self::Down => (1, 0),
            Self::Left => (0, -1),
            Self::Right => (0, 1),
        }
    }
}

/// The three rope-segment directions, from the placer's perspective:
/// straight down, down-left, down-right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RopeDirection {
    Down,
    DiagonalLeft,
    DiagonalRight,
}

impl RopeDirection {
    pub const ALL: [Self; 3] = [Self::Down, Self::DiagonalLeft, Self::DiagonalRight];

    #[must_use]
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Self::Down => (1, 0),
            Self::DiagonalLeft => (1, -1),
            Self::DiagonalRight => (1, 1),
        }
    }

    /// The 3-cell segment `[head, mid, tail]` starting at `head`.
    #[must_use]
    pub const fn segment_from(self, head: Position) -> [Position; 3] {
        let (dr, dc) = self.delta();
        [head, head.offset(dr, dc), head.offset(2 * dr, 2 * dc)]
    }
}

/// One-way shortcut: stepping on `base` relocates the mover to `top`.
/// Climbs chain when `top` is itself another ladder's base.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ladder {
    pub base: Position,
    pub top: Position,
}

/// A placed 3-cell trap. Stepping on `cells[0]` (the head) while unused
/// and owned by the stepping player's opponent relocates the stepper to
/// `cells[2]` (the tail) and consumes the rope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RopeObstacle {
    pub cells: [Position; 3],
    pub owner: Player,
    pub used: bool,
}

impl RopeObstacle {
    #[must_use]
    pub const fn head(&self) -> Position {
        self.cells[0]
    }

    #[must_use]
    pub const fn tail(&self) -> Position {
        self.cells[2]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manhattan_distance() {
        let a = Position::new(0, 0);
        let b = Position::new(3, 4);
        assert_eq!(a.manhattan(b), 7);
        assert_eq!(b.manhattan(a), 7);
        assert_eq!(a.manhattan(a), 0);
    }

    #[test]
    fn test_rope_segments() {
        let head = Position::new(2, 5);
        assert_eq!(
            RopeDirection::Down.segment_from(head),
            [
                Position::new(2, 5),
                Position::new(3, 5),
                Position::new(4, 5)
            ]
        );
        assert_eq!(
            RopeDirection::DiagonalLeft.segment_from(head),
            [
                Position::new(2, 5),
                Position::new(3, 4),
                Position::new(4, 3)
            ]
        );
        assert_eq!(
            RopeDirection::DiagonalRight.segment_from(head),
            [
                Position::new(2, 5),
                Position::new(3, 6),
                Position::new(4, 7)
            ]
        );
    }

    #[test]
    fn test_player_opponent() {
        assert_eq!(Player::One.opponent(), Player::Two);
        assert_eq!(Player::Two.opponent(), Player::One);
    }
}
