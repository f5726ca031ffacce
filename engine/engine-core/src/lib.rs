//! Core traits and types shared by the search engine and game implementations
//!
//! This crate provides the abstractions the UCT engine is generic over:
//! - `GameState`: successor generation, terminal queries and canonical keys
//! - `Player`: the two seats of a zero-sum game
//! - `Outcome`: a finished game, scored from a chosen player's perspective

pub mod game_state;
pub mod outcome;
pub mod player;

// Re-export main types for convenience
pub use game_state::GameState;
pub use outcome::Outcome;
pub use player::Player;
