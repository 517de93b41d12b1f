//! Turn rotation
//!
//! Turns pass round-robin in roster order. A stuck player sits out exactly
//! one turn: being stepped over consumes the stuck mark.

use std::collections::BTreeSet;

use crate::player::PlayerId;

/// Where the turn lands and who was stepped over on the way
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnAdvance {
    pub next: PlayerId,
    /// Stuck players whose skipped turn was consumed, in the order passed
    pub skipped: Vec<PlayerId>,
}

/// Find the player who moves after `current`.
///
/// Walks forward at most `roster_len` seats. Every stuck player passed is
/// reported in `skipped`; the caller clears their stuck mark. If every seat
/// is stuck, each of them has now sat out once and the turn falls to the
/// seat right after `current`, so the walk never cycles.
///
/// # Panics
///
/// Panics if `roster_len` is zero.
///
/// ```
/// use std::collections::BTreeSet;
/// use maze_core::game::next_turn;
/// use maze_core::PlayerId;
///
/// let stuck = BTreeSet::from([PlayerId::new(0)]);
/// let advance = next_turn(3, PlayerId::new(2), &stuck);
/// assert_eq!(advance.next, PlayerId::new(1));
/// assert_eq!(advance.skipped, vec![PlayerId::new(0)]);
/// ```
pub fn next_turn(roster_len: usize, current: PlayerId, stuck: &BTreeSet<PlayerId>) -> TurnAdvance {
    assert!(roster_len > 0, "Must have at least 1 player");

    let seat = |step: usize| PlayerId::new(((current.index() + step) % roster_len) as u32);
    let mut skipped = Vec::new();

    for step in 1..=roster_len {
        let candidate = seat(step);
        if !stuck.contains(&candidate) {
            return TurnAdvance {
                next: candidate,
                skipped,
            };
        }
        skipped.push(candidate);
    }

    TurnAdvance {
        next: seat(1),
        skipped,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(raw: &[u32]) -> BTreeSet<PlayerId> {
        raw.iter().copied().map(PlayerId::new).collect()
    }

    #[test]
    fn test_plain_rotation_wraps() {
        let none = BTreeSet::new();
        assert_eq!(next_turn(3, PlayerId::new(0), &none).next, PlayerId::new(1));
        assert_eq!(next_turn(3, PlayerId::new(1), &none).next, PlayerId::new(2));
        assert_eq!(next_turn(3, PlayerId::new(2), &none).next, PlayerId::new(0));
        assert!(next_turn(3, PlayerId::new(2), &none).skipped.is_empty());
    }

    #[test]
    fn test_freshly_stuck_player_is_not_skipped_yet() {
        // current player just landed in a swamp
        let advance = next_turn(3, PlayerId::new(0), &ids(&[0]));
        assert_eq!(advance.next, PlayerId::new(1));
        assert!(advance.skipped.is_empty());
    }

    #[test]
    fn test_skips_several_stuck_players() {
        let advance = next_turn(4, PlayerId::new(3), &ids(&[0, 1]));
        assert_eq!(advance.next, PlayerId::new(2));
        assert_eq!(advance.skipped, vec![PlayerId::new(0), PlayerId::new(1)]);
    }

    #[test]
    fn test_everyone_stuck_terminates() {
        let advance = next_turn(2, PlayerId::new(1), &ids(&[0, 1]));
        assert_eq!(advance.next, PlayerId::new(0));
        assert_eq!(advance.skipped, vec![PlayerId::new(0), PlayerId::new(1)]);
    }

    #[test]
    fn test_single_seat() {
        let advance = next_turn(1, PlayerId::new(0), &BTreeSet::new());
        assert_eq!(advance.next, PlayerId::new(0));
    }

    #[test]
    #[should_panic(expected = "Must have at least 1 player")]
    fn test_empty_roster() {
        next_turn(0, PlayerId::new(0), &BTreeSet::new());
    }
}
