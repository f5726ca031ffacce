//! MCTS search implementation.
//!
//! Implements the core UCT algorithm:
//! 1. Selection: Traverse fully expanded nodes using UCT
//! 2. Expansion: Add one new child for the first untried successor
//! 3. Rollout: Play random moves from the new node to the end of the game
//! 4. Backpropagation: Update statistics along the path

use std::time::Duration;

use engine_core::GameState;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use thiserror::Error;
use tracing::{debug, trace};

use crate::budget::BudgetTracker;
use crate::config::MctsConfig;
use crate::node::NodeId;
use crate::rollout::random_playout;
use crate::tree::{MctsTree, TreeStats};

/// Errors that can occur during MCTS search.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    #[error("No move available: the position is terminal or has no legal successors")]
    NoMoveAvailable,
}

/// Result of an MCTS search.
#[derive(Debug, Clone)]
pub struct SearchResult<S> {
    /// Chosen successor of the searched state
    pub state: S,

    /// Number of iterations performed
    pub iterations: u32,

    /// Visits of the chosen child
    pub visits: u32,

    /// Mean score of the chosen child, from the searching player's perspective
    pub value: f64,

    /// Wall-clock time spent searching
    pub elapsed: Duration,

    /// Shape of the tree when the search stopped
    pub stats: TreeStats,
}

/// MCTS search state for a single root position.
pub struct MctsSearch<'a, S: GameState, R: Rng + ?Sized> {
    tree: MctsTree<S>,
    config: MctsConfig,
    rng: &'a mut R,
}

impl<'a, S: GameState, R: Rng + ?Sized> MctsSearch<'a, S, R> {
    /// Create a new MCTS search from the given game state.
    pub fn new(config: MctsConfig, state: S, rng: &'a mut R) -> Self {
        Self {
            tree: MctsTree::new(state),
            config,
            rng,
        }
    }

    /// The search tree built so far.
    pub fn tree(&self) -> &MctsTree<S> {
        &self.tree
    }

    /// Run the MCTS search until the configured budget is spent.
    pub fn run(&mut self) -> Result<SearchResult<S>, SearchError> {
        let root_id = self.tree.root();
        if self.tree.get(root_id).is_terminal {
            debug!("Root state is terminal, nothing to search");
            return Err(SearchError::NoMoveAvailable);
        }

        let mut budget = BudgetTracker::start(self.config.budget());
        while !budget.exhausted() {
            self.execute_step();
            budget.record_iteration();
        }

        // Exploitation only for the final choice
        let best_id = self
            .tree
            .select_child(root_id, 0.0, self.rng)
            .ok_or(SearchError::NoMoveAvailable)?;

        let stats = self.tree.stats();
        let best = self.tree.get(best_id);
        let elapsed = budget.elapsed();

        debug!(
            iterations = budget.iterations(),
            nodes = stats.total_nodes,
            max_depth = stats.max_depth,
            visits = best.visits,
            value = best.mean_score(),
            elapsed_ms = elapsed.as_millis() as u64,
            "MCTS search complete"
        );

        Ok(SearchResult {
            state: best.state.clone(),
            iterations: budget.iterations(),
            visits: best.visits,
            value: best.mean_score(),
            elapsed,
            stats,
        })
    }

    /// Run a single iteration (select -> expand -> rollout -> backpropagate).
    pub fn execute_step(&mut self) {
        let leaf_id = self.select();

        let reference = self.tree.reference();
        let outcome = random_playout(&self.tree.get(leaf_id).state, self.rng);
        let score = outcome.score_for(reference);

        self.tree.backpropagate(leaf_id, score);

        trace!(
            leaf = leaf_id.0,
            nodes = self.tree.len(),
            score = score,
            "MCTS iteration complete"
        );
    }

    /// Descend from the root through fully expanded nodes, expanding the
    /// first node that still has untried successors.
    ///
    /// Returns the newly created child, or the terminal node where the
    /// descent stopped.
    fn select(&mut self) -> NodeId {
        let mut current = self.tree.root();

        loop {
            let node = self.tree.get(current);
            if node.is_terminal {
                return current;
            }

            if !node.is_fully_expanded {
                if let Some(child_id) = self.tree.expand(current) {
                    return child_id;
                }
            }

            match self
                .tree
                .select_child(current, self.config.exploration_constant(), self.rng)
            {
                Some(child_id) => current = child_id,
                // Non-terminal state without successors; the rollout scores it as a draw
                None => return current,
            }
        }
    }
}

/// Convenience function to run a single search with a caller-owned RNG.
pub fn run_mcts<S, R>(
    config: MctsConfig,
    state: S,
    rng: &mut R,
) -> Result<SearchResult<S>, SearchError>
where
    S: GameState,
    R: Rng + ?Sized,
{
    MctsSearch::new(config, state, rng).run()
}

/// UCT engine: a validated configuration plus the RNG used for tie-breaking
/// and rollouts. Each call to [`Mcts::search`] builds a fresh tree.
#[derive(Debug, Clone)]
pub struct Mcts<R = ChaCha20Rng> {
    config: MctsConfig,
    rng: R,
}

impl Mcts<ChaCha20Rng> {
    /// Engine seeded from the operating system.
    pub fn new(config: MctsConfig) -> Self {
        Self::with_rng(config, ChaCha20Rng::from_entropy())
    }

    /// Engine with a reproducible random stream.
    pub fn with_seed(config: MctsConfig, seed: u64) -> Self {
        Self::with_rng(config, ChaCha20Rng::seed_from_u64(seed))
    }
}

impl<R: Rng> Mcts<R> {
    pub fn with_rng(config: MctsConfig, rng: R) -> Self {
        Self { config, rng }
    }

    pub fn config(&self) -> &MctsConfig {
        &self.config
    }

    /// Search from `state` and return the chosen successor.
    pub fn search<S: GameState>(&mut self, state: S) -> Result<S, SearchError> {
        self.search_with_stats(state).map(|result| result.state)
    }

    /// Search from `state` and return the chosen successor with statistics.
    pub fn search_with_stats<S: GameState>(
        &mut self,
        state: S,
    ) -> Result<SearchResult<S>, SearchError> {
        run_mcts(self.config.clone(), state, &mut self.rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::budget::SearchBudget;
    use engine_core::{Outcome, Player};
    use games_tictactoe::Board;
    use std::collections::HashSet;

    fn board(s: &str) -> Board {
        s.parse().unwrap()
    }

    fn config(iterations: u32) -> MctsConfig {
        MctsConfig::new(2.0, Some(iterations), None).unwrap()
    }

    #[test]
    fn test_mcts_basic_search() {
        let mut rng = ChaCha20Rng::seed_from_u64(42);
        let result = run_mcts(MctsConfig::for_testing(), Board::new(), &mut rng).unwrap();

        assert_eq!(result.iterations, 200);
        assert_eq!(result.stats.root_visits, 200);
        assert!(result.visits > 0);
        assert!(result.value >= -1.0 && result.value <= 1.0);
        assert!(Board::new().played_cell(&result.state).is_some());
    }

    #[test]
    fn test_each_step_adds_one_root_visit() {
        let mut rng = ChaCha20Rng::seed_from_u64(1);
        let mut search = MctsSearch::new(config(10), Board::new(), &mut rng);

        for expected in 1..=25 {
            search.execute_step();
            let root = search.tree().get(search.tree().root());
            assert_eq!(root.visits, expected);
        }
        // One new node per step until the tree runs out of positions
        assert_eq!(search.tree().len(), 26);
    }

    #[test]
    fn test_root_visits_equal_iteration_limit() {
        for iterations in [1, 9, 10, 137] {
            let mut rng = ChaCha20Rng::seed_from_u64(iterations as u64);
            let mut search = MctsSearch::new(config(iterations), Board::new(), &mut rng);
            let result = search.run().unwrap();

            assert_eq!(result.iterations, iterations);
            assert_eq!(search.tree().get(search.tree().root()).visits, iterations);
        }
    }

    #[test]
    fn test_never_plays_occupied_cell() {
        let positions = ["... ... ...", "X.. .O. ...", "XO. .X. ..O", "XOX OX. ..."];
        for (seed, position) in positions.iter().enumerate() {
            let state = board(position);
            let mut engine = Mcts::with_seed(config(1000), seed as u64);
            let next = engine.search(state).unwrap();

            let cell = state
                .played_cell(&next)
                .unwrap_or_else(|| panic!("{position}: engine returned an illegal move"));
            assert_eq!(state.cell(cell), Some(games_tictactoe::EMPTY));
        }
    }

    #[test]
    fn test_finds_immediate_win_for_x() {
        // X | X | .
        // O | O | .
        // . | . | .
        let state = board("XX. OO. ...");
        let mut engine = Mcts::with_seed(config(1000), 42);
        let result = engine.search_with_stats(state).unwrap();

        assert_eq!(state.played_cell(&result.state), Some(2));
        assert_eq!(result.state.outcome(), Some(Outcome::Win(Player::First)));
        assert!((result.value - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_finds_immediate_win_for_o() {
        // X | X | .
        // O | O | .
        // . | . | X
        let state = board("XX. OO. ..X");
        let mut engine = Mcts::with_seed(config(1000), 7);
        let result = engine.search_with_stats(state).unwrap();

        assert_eq!(state.played_cell(&result.state), Some(5));
        assert_eq!(result.state.outcome(), Some(Outcome::Win(Player::Second)));
        // Value is from O's perspective, the side searching
        assert!((result.value - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_last_move_to_draw() {
        let state = board("XOX XOO OX.");
        let mut engine = Mcts::with_seed(config(20), 3);
        let result = engine.search_with_stats(state).unwrap();

        assert!(result.state.is_draw());
        assert_eq!(result.value, 0.0);
        assert_eq!(result.stats.root_value, 0.0);
    }

    #[test]
    fn test_time_limited_search() {
        let limit = Duration::from_millis(30);
        let config = MctsConfig::new(2.0, None, Some(limit)).unwrap();
        assert_eq!(config.budget(), SearchBudget::Time(limit));

        let mut engine = Mcts::with_seed(config, 9);
        let result = engine.search_with_stats(Board::new()).unwrap();

        assert!(result.iterations >= 1);
        assert!(result.elapsed >= limit);
        assert_eq!(result.stats.root_visits, result.iterations);
    }

    #[test]
    fn test_tiny_time_limit_still_runs_one_step() {
        let config = MctsConfig::new(2.0, None, Some(Duration::from_nanos(1))).unwrap();
        let mut rng = ChaCha20Rng::seed_from_u64(0);
        let result = run_mcts(config, board("XX. OO. ..."), &mut rng).unwrap();

        assert!(result.iterations >= 1);
    }

    #[test]
    fn test_terminal_root_has_no_move() {
        let mut engine = Mcts::with_seed(config(50), 0);

        assert_eq!(
            engine.search(board("XXX OO. ...")),
            Err(SearchError::NoMoveAvailable)
        );
        assert_eq!(
            engine.search(board("XOX XOO OXX")),
            Err(SearchError::NoMoveAvailable)
        );
    }

    #[test]
    fn test_children_have_unique_keys() {
        let mut rng = ChaCha20Rng::seed_from_u64(5);
        let mut search = MctsSearch::new(config(2000), Board::new(), &mut rng);
        search.run().unwrap();

        let tree = search.tree();
        for node in tree.arena() {
            let keys: HashSet<_> = node.children.iter().map(|(key, _)| *key).collect();
            assert_eq!(keys.len(), node.children.len());

            let successors = node.state.generate_states().len();
            if node.is_fully_expanded {
                assert_eq!(node.children.len(), successors);
            } else {
                assert!(node.children.len() < successors);
            }
        }
    }

    #[test]
    fn test_same_seed_same_choice() {
        let state = board("X.. .O. ...");
        let first = Mcts::with_seed(config(300), 99).search(state).unwrap();
        let second = Mcts::with_seed(config(300), 99).search(state).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_search_tree_is_inspectable() {
        let mut rng = ChaCha20Rng::seed_from_u64(12);
        let mut search = MctsSearch::new(config(100), board("XO. ... ..."), &mut rng);
        let result = search.run().unwrap();

        let tree = search.tree();
        let root = tree.get(tree.root());
        assert_eq!(tree.reference(), Player::First);
        assert_eq!(root.children.len(), 7);
        assert!(root.is_fully_expanded);

        let child_visits: u32 = tree.children(tree.root()).map(|child| child.visits).sum();
        assert_eq!(child_visits, root.visits);
        assert_eq!(result.stats, tree.stats());
    }
}
