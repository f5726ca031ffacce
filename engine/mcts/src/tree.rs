//! MCTS tree structure with arena allocation.
//!
//! The tree uses arena allocation for efficient node storage and
//! cache-friendly traversal. Nodes are stored in a contiguous Vec
//! and referenced by NodeId indices. A child is always allocated after its
//! parent, so arena order is a topological order of the tree.

use engine_core::{GameState, Player};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::node::{MctsNode, NodeId};

/// MCTS tree with arena-based node storage.
#[derive(Debug)]
pub struct MctsTree<S: GameState> {
    /// Arena storing all nodes
    nodes: Vec<MctsNode<S>>,

    /// Root node index (always 0 after initialization)
    root: NodeId,

    /// Player to move at the root. Every score in the tree is from this
    /// player's perspective.
    reference: Player,
}

impl<S: GameState> MctsTree<S> {
    /// Create a new tree rooted at the given state.
    pub fn new(root_state: S) -> Self {
        let reference = root_state.to_move();
        Self {
            nodes: vec![MctsNode::new_root(root_state)],
            root: NodeId(0),
            reference,
        }
    }

    /// Get the root node ID.
    #[inline]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// The player searching from the root.
    #[inline]
    pub fn reference(&self) -> Player {
        self.reference
    }

    /// Get a reference to a node by ID.
    #[inline]
    pub fn get(&self, id: NodeId) -> &MctsNode<S> {
        &self.nodes[id.0 as usize]
    }

    /// Get a mutable reference to a node by ID.
    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> &mut MctsNode<S> {
        &mut self.nodes[id.0 as usize]
    }

    /// Allocate a new node and return its ID.
    fn allocate(&mut self, node: MctsNode<S>) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Get the total number of nodes in the tree.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if tree is empty (should never be true after construction).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Get the arena slice for read access.
    #[inline]
    pub fn arena(&self) -> &[MctsNode<S>] {
        &self.nodes
    }

    /// Iterate over the children of a node in creation order.
    pub fn children(&self, node_id: NodeId) -> impl Iterator<Item = &MctsNode<S>> + '_ {
        self.get(node_id)
            .children
            .iter()
            .map(move |(_, id)| self.get(*id))
    }

    /// Add a child to a parent node.
    /// Returns the new child's NodeId.
    pub fn add_child(&mut self, parent_id: NodeId, state: S) -> NodeId {
        let key = state.key();
        let child_id = self.allocate(MctsNode::new_child(parent_id, state));

        // Add to parent's children
        self.get_mut(parent_id).children.push((key, child_id));

        child_id
    }

    /// Materialize the next successor of `node_id` that has no child yet.
    ///
    /// Returns `None` for terminal nodes, for nodes that are already fully
    /// expanded, and when the game offers no new successor. In the last case
    /// the node is marked fully expanded so selection descends from it.
    pub fn expand(&mut self, node_id: NodeId) -> Option<NodeId> {
        let node = self.get_mut(node_id);
        if node.is_terminal {
            return None;
        }
        let state = node.next_untried()?;
        Some(self.add_child(node_id, state))
    }

    /// Select the child of a node maximizing UCT.
    ///
    /// Children with an identical score are tied and one of them is picked
    /// uniformly at random. Returns `None` if the node has no children.
    pub fn select_child<R: Rng + ?Sized>(
        &self,
        node_id: NodeId,
        exploration_constant: f64,
        rng: &mut R,
    ) -> Option<NodeId> {
        let node = self.get(node_id);
        // Pre-compute ln once instead of per-child comparison
        let ln_parent_visits = (node.visits.max(1) as f64).ln();

        let mut best_score = f64::NEG_INFINITY;
        let mut best_children = Vec::new();
        for &(_, child_id) in &node.children {
            let score =
                self.get(child_id)
                    .uct_score(ln_parent_visits, exploration_constant, self.reference);
            if score > best_score {
                best_score = score;
                best_children.clear();
                best_children.push(child_id);
            } else if score == best_score {
                best_children.push(child_id);
            }
        }

        best_children.choose(rng).copied()
    }

    /// Backpropagate a rollout score from a leaf to the root.
    /// The score is already from the reference perspective, so it is added
    /// unchanged at every level.
    pub fn backpropagate(&mut self, leaf_id: NodeId, score: f64) {
        let mut current_id = leaf_id;

        while current_id.is_some() {
            let node = self.get_mut(current_id);
            node.visits += 1;
            node.score += score;
            current_id = node.parent;
        }
    }

    /// Get statistics about the tree for debugging.
    pub fn stats(&self) -> TreeStats {
        let root = self.get(self.root);
        TreeStats {
            total_nodes: self.nodes.len(),
            root_visits: root.visits,
            root_value: root.mean_score(),
            max_depth: self.compute_max_depth(),
        }
    }

    fn compute_max_depth(&self) -> u32 {
        // Parents precede children in the arena, so one forward pass suffices
        let mut depths = vec![0u32; self.nodes.len()];
        for (index, node) in self.nodes.iter().enumerate().skip(1) {
            depths[index] = depths[node.parent.0 as usize] + 1;
        }
        depths.into_iter().max().unwrap_or(0)
    }
}

/// Statistics about an MCTS tree.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeStats {
    pub total_nodes: usize,
    pub root_visits: u32,
    pub root_value: f64,
    pub max_depth: u32,
}
