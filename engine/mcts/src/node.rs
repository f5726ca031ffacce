//! MCTS tree node representation.
//!
//! Each node represents a game state reached by one legal move from its parent.
//! Nodes store the visit statistics used for UCT selection.

use std::collections::HashSet;

use engine_core::{GameState, Player};

/// Index into the node arena. Using a newtype for type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub u32);

impl NodeId {
    pub const NONE: NodeId = NodeId(u32::MAX);

    pub fn is_none(self) -> bool {
        self == Self::NONE
    }

    pub fn is_some(self) -> bool {
        !self.is_none()
    }
}

/// A node in the MCTS tree.
#[derive(Debug, Clone)]
pub struct MctsNode<S: GameState> {
    /// Parent node index (NONE for root)
    pub parent: NodeId,

    /// Game state at this node
    pub state: S,

    /// Children keyed by the canonical key of their state.
    /// Grows by one entry per expansion, in successor generation order.
    pub children: Vec<(S::Key, NodeId)>,

    /// Number of backpropagation passes through this node
    pub visits: u32,

    /// Sum of rollout scores from the search's reference player perspective.
    pub score: f64,

    /// Whether the state is a win or a draw
    pub is_terminal: bool,

    /// Whether every legal successor already has a child.
    /// Never reverts to false once set.
    pub is_fully_expanded: bool,

    /// Successors not yet materialized, stored in reverse generation order.
    /// `None` until the first expansion asks for them.
    untried: Option<Vec<S>>,
}

impl<S: GameState> MctsNode<S> {
    /// Create a new root node.
    pub fn new_root(state: S) -> Self {
        Self::new_child(NodeId::NONE, state)
    }

    /// Create a new child node.
    pub fn new_child(parent: NodeId, state: S) -> Self {
        let is_terminal = state.is_terminal();
        Self {
            parent,
            state,
            children: Vec::new(),
            visits: 0,
            score: 0.0,
            is_terminal,
            is_fully_expanded: is_terminal,
            untried: None,
        }
    }

    /// Average rollout score from the reference player's perspective.
    /// Returns 0.0 if never visited.
    #[inline]
    pub fn mean_score(&self) -> f64 {
        if self.visits == 0 {
            0.0
        } else {
            self.score / self.visits as f64
        }
    }

    /// Calculate the UCT score for child selection.
    /// UCT(c) = sign * s_c / n_c + C * sqrt(ln(N_parent) / n_c)
    ///
    /// `sign` is +1 when the player who moved into this node is `reference`
    /// and -1 otherwise, so each player maximizes its own result even though
    /// scores are accumulated from a single fixed perspective.
    ///
    /// Takes pre-computed ln(parent_visits) to avoid redundant log calls when
    /// comparing siblings. Every child is backpropagated in the step that
    /// creates it, so `visits` is non-zero for any node reachable here.
    #[inline]
    pub fn uct_score(
        &self,
        ln_parent_visits: f64,
        exploration_constant: f64,
        reference: Player,
    ) -> f64 {
        debug_assert!(self.visits > 0, "UCT evaluated on an unvisited node");
        let visits = self.visits as f64;
        let exploitation = self.state.last_mover().sign_for(reference) * self.score / visits;
        let exploration = exploration_constant * (ln_parent_visits / visits).sqrt();
        exploitation + exploration
    }

    /// Look up a child by canonical key.
    pub fn child(&self, key: &S::Key) -> Option<NodeId> {
        self.children
            .iter()
            .find(|(child_key, _)| child_key == key)
            .map(|(_, id)| *id)
    }

    /// Number of successors still waiting to be expanded, if they have been
    /// generated yet.
    pub fn untried_len(&self) -> Option<usize> {
        self.untried.as_ref().map(Vec::len)
    }

    /// Take the next successor that has no child yet, in generation order.
    ///
    /// Successors are generated on the first call and deduplicated by key,
    /// skipping any key that already has a child. Sets `is_fully_expanded`
    /// as soon as nothing is left to hand out.
    pub(crate) fn next_untried(&mut self) -> Option<S> {
        if self.is_fully_expanded {
            return None;
        }

        if self.untried.is_none() {
            let mut seen: HashSet<S::Key> =
                self.children.iter().map(|(key, _)| key.clone()).collect();
            let mut fresh: Vec<S> = self
                .state
                .generate_states()
                .into_iter()
                .filter(|state| seen.insert(state.key()))
                .collect();
            fresh.reverse();
            self.untried = Some(fresh);
        }

        let untried = self.untried.as_mut()?;
        let next = untried.pop();
        if untried.is_empty() {
            self.is_fully_expanded = true;
            self.untried = None;
        }
        next
    }
}
