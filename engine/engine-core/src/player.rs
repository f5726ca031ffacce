//! The two seats of a two-player, zero-sum game.

use std::fmt;

/// One of the two players.
///
/// `First` is the player who opens the game. Games map their own marks onto
/// these seats (tic-tac-toe uses `First` for `X`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Player {
    First,
    Second,
}

impl Player {
    /// The other player.
    #[inline]
    pub fn opponent(self) -> Self {
        match self {
            Player::First => Player::Second,
            Player::Second => Player::First,
        }
    }

    /// `+1.0` when `self` is `perspective`, `-1.0` otherwise.
    ///
    /// Used to flip accumulated scores into the point of view of the player
    /// who is choosing among children.
    #[inline]
    pub fn sign_for(self, perspective: Player) -> f64 {
        if self == perspective {
            1.0
        } else {
            -1.0
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::First => write!(f, "first player"),
            Player::Second => write!(f, "second player"),
        }
    }
}
