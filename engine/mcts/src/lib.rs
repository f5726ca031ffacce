//! Monte Carlo Tree Search with UCT for two-player, zero-sum games.
//!
//! This crate provides a game-agnostic MCTS implementation that works with any
//! game implementing the `engine-core` [`GameState`](engine_core::GameState)
//! trait.
//!
//! # Overview
//!
//! MCTS builds a search tree by running iterations. Each iteration consists
//! of four phases:
//!
//! 1. **Selection**: Descend through fully expanded nodes using UCT (Upper
//!    Confidence bounds applied to Trees) to balance exploration and
//!    exploitation
//! 2. **Expansion**: Add a single child for the first successor that is not
//!    in the tree yet
//! 3. **Rollout**: Play uniformly random moves from the new node until the
//!    game is won or drawn
//! 4. **Backpropagation**: Update visit counts and score sums along the path
//!    from leaf to root
//!
//! All scores are kept from the perspective of the player to move at the
//! root. UCT flips the sign for nodes entered by the opponent, so each level
//! of the tree maximizes for the player who moves there.
//!
//! # Usage
//!
//! ```rust
//! use games_tictactoe::Board;
//! use mcts::{Mcts, MctsConfig};
//!
//! let config = MctsConfig::new(2.0, Some(500), None).unwrap();
//! let mut engine = Mcts::with_seed(config, 42);
//!
//! // X to move and win on the top row
//! let board: Board = "XX. OO. ...".parse().unwrap();
//! let next = engine.search(board).unwrap();
//! assert_eq!(board.played_cell(&next), Some(2));
//! ```
//!
//! # Configuration
//!
//! [`MctsConfig`] is validated on construction:
//!
//! - `exploration_constant`: finite and non-negative (default: sqrt(2))
//! - exactly one budget: an iteration limit or a time limit
//!
//! # Architecture
//!
//! ```text
//! +-------------------------------------------------------+
//! |                        Mcts                           |
//! |   config + rng, one fresh MctsSearch per search()     |
//! +-------------------------------------------------------+
//! |                     MctsSearch                        |
//! |  +-------------+  +---------------+  +-------------+  |
//! |  |  MctsTree   |  | BudgetTracker |  |   rollout   |  |
//! |  |  (arena)    |  | (iter / time) |  |  (random)   |  |
//! |  +------+------+  +-------+-------+  +------+------+  |
//! |         |                 |                 |         |
//! |         v                 v                 v         |
//! |   select -> expand -> rollout -> backpropagate        |
//! +-------------------------------------------------------+
//! ```

pub mod budget;
pub mod config;
pub mod node;
pub mod rollout;
pub mod search;
pub mod tree;

// Re-export main types
pub use budget::SearchBudget;
pub use config::{ConfigError, MctsConfig, DEFAULT_EXPLORATION_CONSTANT};
pub use node::{MctsNode, NodeId};
pub use rollout::random_playout;
pub use search::{run_mcts, Mcts, MctsSearch, SearchError, SearchResult};
pub use tree::{MctsTree, TreeStats};
