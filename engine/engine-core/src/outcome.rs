//! Finished-game outcomes and their signed scores.

use crate::player::Player;

/// Result of a game that has reached a terminal position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The given player made the winning move.
    Win(Player),
    /// Nobody won, either by rule or because legal moves ran out.
    Draw,
}

impl Outcome {
    /// Score this outcome from `perspective`'s point of view.
    ///
    /// # Returns
    /// * `1.0` if `perspective` won
    /// * `-1.0` if the opponent won
    /// * `0.0` for a draw
    ///
    /// # Example
    /// ```
    /// use engine_core::{Outcome, Player};
    ///
    /// assert_eq!(Outcome::Win(Player::First).score_for(Player::First), 1.0);
    /// assert_eq!(Outcome::Win(Player::First).score_for(Player::Second), -1.0);
    /// assert_eq!(Outcome::Draw.score_for(Player::Second), 0.0);
    /// ```
    #[inline]
    pub fn score_for(self, perspective: Player) -> f64 {
        match self {
            Outcome::Win(winner) => winner.sign_for(perspective),
            Outcome::Draw => 0.0,
        }
    }

    /// The winning player, if any.
    pub fn winner(self) -> Option<Player> {
        match self {
            Outcome::Win(player) => Some(player),
            Outcome::Draw => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_winner() {
        assert_eq!(Outcome::Win(Player::Second).winner(), Some(Player::Second));
        assert_eq!(Outcome::Draw.winner(), None);
    }

    #[test]
    fn test_scores_are_zero_sum() {
        for outcome in [
            Outcome::Win(Player::First),
            Outcome::Win(Player::Second),
            Outcome::Draw,
        ] {
            let total = outcome.score_for(Player::First) + outcome.score_for(Player::Second);
            assert_eq!(total, 0.0, "{outcome:?} should be zero-sum");
        }
    }
}
