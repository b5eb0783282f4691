use crate::logic::board::Player;
use crate::logic::game::{GamePhase, GameState};

// SplitMix64 finalizer. Deterministic, dependency-free, and well mixed
// for sequential folding.
const fn splitmix64(mut x: u64) -> u64 {
    x = x.wrapping_add(0x9E37_79B9_7F4A_7C15);
    let mut z = x;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

const fn fold(hash: u64, value: u64) -> u64 {
    splitmix64(hash ^ value)
}

/// Canonical search fingerprint of a game state.
///
/// Folds both player positions, both remaining rope allowances, the side
/// to move, the turn count, the *number* of placed rope obstacles, and the
/// phase. Obstacle content (cells, owner, used flags) is deliberately not
/// keyed: two states that differ only in rope layout but agree on the
/// count share a fingerprint and hit the same transposition entry.
#[must_use]
pub fn state_fingerprint(state: &GameState) -> u64 {
    let mut h = 0xA0B5_C1D2_E3F4_0517_u64;
    h = fold(h, state.player1_pos.row as u64);
    h = fold(h, state.player1_pos.col as u64);
    h = fold(h, state.player2_pos.row as u64);
    h = fold(h, state.player2_pos.col as u64);
    h = fold(h, u64::from(state.player1_ropes));
    h = fold(h, u64::from(state.player2_ropes));
    h = fold(
        h,
        match state.current_player {
            Player::One => 0,
            Player::Two => 1,
        },
    );
    h = fold(h, u64::from(state.turn_count));
    h = fold(h, state.rope_obstacles.len() as u64);
    h = fold(
        h,
        match state.phase {
            GamePhase::Playing => 0,
            GamePhase::Finished => 1,
        },
    );
    h
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::board::{Player, Position, RopeDirection, RopeObstacle};
    use crate::logic::game::GameState;

    fn rope(head: Position, owner: Player) -> RopeObstacle {
        RopeObstacle {
            cells: RopeDirection::Down.segment_from(head),
            owner,
            used: false,
        }
    }

    #[test]
    fn test_fields_change_fingerprint() {
        let base = GameState::with_ladders(7, 2, Vec::new());
        let h = state_fingerprint(&base);

        let mut moved = base.clone();
        moved.player1_pos = Position::new(3, 3);
        assert_ne!(state_fingerprint(&moved), h);

        let mut side = base.clone();
        side.current_player = Player::Two;
        assert_ne!(state_fingerprint(&side), h);

        let mut turn = base.clone();
        turn.turn_count = 5;
        assert_ne!(state_fingerprint(&turn), h);

        let mut spent = base.clone();
        spent.player2_ropes = 1;
        assert_ne!(state_fingerprint(&spent), h);

        let mut placed = base.clone();
        placed.rope_obstacles.push(rope(Position::new(1, 1), Player::One));
        assert_ne!(state_fingerprint(&placed), h);
    }

    #[test]
    fn test_rope_content_is_not_keyed() {
        // Same obstacle count, different layout: deliberately identical
        // fingerprints (the table treats them as the same state).
        let mut a = GameState::with_ladders(7, 2, Vec::new());
        let mut b = a.clone();
        a.rope_obstacles.push(rope(Position::new(1, 1), Player::One));
        b.rope_obstacles.push(rope(Position::new(4, 4), Player::Two));
        assert_eq!(state_fingerprint(&a), state_fingerprint(&b));
    }

    #[test]
    fn test_fingerprint_is_stable() {
        let state = GameState::with_ladders(11, 3, Vec::new());
        assert_eq!(state_fingerprint(&state), state_fingerprint(&state.clone()));
    }
}
