//! Game state contract consumed by the search engine
//!
//! The engine never looks inside a position. Everything it needs is expressed
//! through this trait: successor generation, terminal queries, a canonical key
//! for deduplicating children, and the identity of the player who just moved.

use std::fmt::Debug;
use std::hash::Hash;

use crate::outcome::Outcome;
use crate::player::Player;

/// A position in a two-player, zero-sum, perfect-information game.
///
/// Values are immutable per instance: making a move produces a new state.
///
/// # Contract
///
/// * `is_win` and `is_draw` are never both true.
/// * A state with no legal successors that is not a win reports a draw.
/// * `generate_states` returns successors in a stable order, each with the
///   turn passed to the other player.
/// * Equal positions yield equal keys.
///
/// # Example
///
/// ```rust
/// use engine_core::{GameState, Outcome, Player};
///
/// /// Take one or two sticks; whoever takes the last stick wins.
/// #[derive(Debug, Clone)]
/// struct Nim {
///     sticks: u8,
///     last_mover: Player,
/// }
///
/// impl GameState for Nim {
///     type Key = (u8, Player);
///
///     fn is_win(&self) -> bool {
///         self.sticks == 0
///     }
///
///     fn is_draw(&self) -> bool {
///         false
///     }
///
///     fn generate_states(&self) -> Vec<Self> {
///         (1..=2u8)
///             .filter(|take| *take <= self.sticks)
///             .map(|take| Nim {
///                 sticks: self.sticks - take,
///                 last_mover: self.last_mover.opponent(),
///             })
///             .collect()
///     }
///
///     fn key(&self) -> Self::Key {
///         (self.sticks, self.last_mover)
///     }
///
///     fn last_mover(&self) -> Player {
///         self.last_mover
///     }
/// }
///
/// let start = Nim { sticks: 2, last_mover: Player::Second };
/// assert_eq!(start.to_move(), Player::First);
/// assert_eq!(start.generate_states().len(), 2);
///
/// let taken_all = Nim { sticks: 0, last_mover: Player::First };
/// assert_eq!(taken_all.outcome(), Some(Outcome::Win(Player::First)));
/// ```
pub trait GameState: Clone + Debug {
    /// Canonical identity of a position, used to deduplicate children.
    type Key: Clone + Eq + Hash + Debug;

    /// True if the player who just moved has won.
    fn is_win(&self) -> bool;

    /// True if the game ended without a winner.
    fn is_draw(&self) -> bool;

    /// Every legal successor reachable by one move, in a stable order.
    ///
    /// Empty when no legal moves remain.
    fn generate_states(&self) -> Vec<Self>;

    /// Canonical key derived from the position data.
    fn key(&self) -> Self::Key;

    /// The player whose move produced this state.
    fn last_mover(&self) -> Player;

    /// The player whose turn it is.
    #[inline]
    fn to_move(&self) -> Player {
        self.last_mover().opponent()
    }

    /// True for wins and draws.
    #[inline]
    fn is_terminal(&self) -> bool {
        self.is_win() || self.is_draw()
    }

    /// The outcome of a terminal state, or `None` while play continues.
    fn outcome(&self) -> Option<Outcome> {
        if self.is_win() {
            Some(Outcome::Win(self.last_mover()))
        } else if self.is_draw() {
            Some(Outcome::Draw)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Counts up by one or two; reaching exactly `target` wins, overshooting
    /// is impossible, and a `target` of zero is an immediate draw.
    #[derive(Debug, Clone, PartialEq)]
    struct RaceTo {
        total: u8,
        target: u8,
        last_mover: Player,
    }

    impl GameState for RaceTo {
        type Key = u8;

        fn is_win(&self) -> bool {
            self.target > 0 && self.total == self.target
        }

        fn is_draw(&self) -> bool {
            self.target == 0
        }

        fn generate_states(&self) -> Vec<Self> {
            if self.is_terminal() {
                return Vec::new();
            }
            (1..=2u8)
                .filter(|step| self.total + step <= self.target)
                .map(|step| RaceTo {
                    total: self.total + step,
                    target: self.target,
                    last_mover: self.last_mover.opponent(),
                })
                .collect()
        }

        fn key(&self) -> Self::Key {
            self.total
        }

        fn last_mover(&self) -> Player {
            self.last_mover
        }
    }

    fn start(target: u8) -> RaceTo {
        RaceTo {
            total: 0,
            target,
            last_mover: Player::Second,
        }
    }

    #[test]
    fn test_to_move_is_opponent_of_last_mover() {
        let state = start(3);
        assert_eq!(state.to_move(), Player::First);

        let next = &state.generate_states()[0];
        assert_eq!(next.last_mover(), Player::First);
        assert_eq!(next.to_move(), Player::Second);
    }

    #[test]
    fn test_outcome_of_ongoing_game_is_none() {
        let state = start(3);
        assert!(!state.is_terminal());
        assert_eq!(state.outcome(), None);
    }

    #[test]
    fn test_outcome_win_belongs_to_last_mover() {
        let state = RaceTo {
            total: 3,
            target: 3,
            last_mover: Player::Second,
        };
        assert!(state.is_terminal());
        assert_eq!(state.outcome(), Some(Outcome::Win(Player::Second)));
    }

    #[test]
    fn test_outcome_draw() {
        let state = start(0);
        assert!(state.is_terminal());
        assert!(state.generate_states().is_empty());
        assert_eq!(state.outcome(), Some(Outcome::Draw));
    }

    #[test]
    fn test_keys_are_stable_across_generations() {
        let state = start(4);
        let first: Vec<u8> = state.generate_states().iter().map(|s| s.key()).collect();
        let second: Vec<u8> = state.generate_states().iter().map(|s| s.key()).collect();
        assert_eq!(first, second);
        assert_eq!(first, vec![1, 2]);
    }
}
