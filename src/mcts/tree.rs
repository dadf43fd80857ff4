//! Arena-based UCT tree.

use serde::{Deserialize, Serialize};

use super::node::{NodeId, UctNode};
use crate::core::PlayerId;
use crate::moves::Move;

/// Flat arena of nodes; the root is always `NodeId(0)`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UctTree {
    nodes: Vec<UctNode>,
    player_count: usize,
}

impl UctTree {
    pub fn new(root_player: PlayerId, root_digest: u64, player_count: usize) -> Self {
        Self::with_capacity(root_player, root_digest, player_count, 1024)
    }

    pub fn with_capacity(
        root_player: PlayerId,
        root_digest: u64,
        player_count: usize,
        capacity: usize,
    ) -> Self {
        let mut nodes = Vec::with_capacity(capacity.max(1));
        nodes.push(UctNode::root(root_player, root_digest));
        Self {
            nodes,
            player_count,
        }
    }

    #[inline]
    #[must_use]
    pub fn root(&self) -> NodeId {
        NodeId::new(0)
    }

    #[inline]
    #[must_use]
    pub fn get(&self, id: NodeId) -> &UctNode {
        &self.nodes[id.index()]
    }

    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> &mut UctNode {
        &mut self.nodes[id.index()]
    }

    /// Add a node and link it from its parent's edge.
    pub fn attach(&mut self, node: UctNode) -> NodeId {
        let id = NodeId::new(self.nodes.len() as u32);
        let (parent, edge) = (node.parent, node.parent_edge_idx as usize);
        self.nodes.push(node);
        if !parent.is_none() {
            self.get_mut(parent).edges[edge].child = id;
        }
        id
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.player_count
    }

    /// Start over from a new root position.
    pub fn reset(&mut self, root_player: PlayerId, root_digest: u64) {
        self.nodes.clear();
        self.nodes.push(UctNode::root(root_player, root_digest));
    }

    #[must_use]
    pub fn root_node(&self) -> &UctNode {
        self.get(self.root())
    }

    pub fn root_node_mut(&mut self) -> &mut UctNode {
        let root = self.root();
        self.get_mut(root)
    }

    /// Moves along the most visited edges from the root.
    #[must_use]
    pub fn principal_variation(&self) -> Vec<Move> {
        let mut line = Vec::new();
        let mut node = self.root_node();
        while let Some(edge) = node.most_visited() {
            if edge.visits == 0 {
                break;
            }
            line.push(edge.mv);
            if !edge.is_expanded() {
                break;
            }
            node = self.get(edge.child);
        }
        line
    }

    #[must_use]
    pub fn stats(&self) -> TreeStats {
        let mut stats = TreeStats {
            node_count: self.nodes.len(),
            root_visits: self.root_node().visits,
            ..TreeStats::default()
        };
        for node in &self.nodes {
            stats.max_depth = stats.max_depth.max(node.depth);
            stats.terminal_count += usize::from(node.is_terminal);
            stats.total_edges += node.edges.len();
            stats.expanded_edges += node.edges.iter().filter(|e| e.is_expanded()).count();
        }
        stats
    }
}

/// Shape of a UCT tree.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TreeStats {
    pub node_count: usize,
    pub max_depth: u16,
    pub terminal_count: usize,
    pub total_edges: usize,
    pub expanded_edges: usize,
    pub root_visits: u32,
}

impl TreeStats {
    /// Average edges per node.
    #[must_use]
    pub fn branching_factor(&self) -> f64 {
        if self.node_count == 0 {
            0.0
        } else {
            self.total_edges as f64 / self.node_count as f64
        }
    }

    /// Share of edges that have a child node.
    #[must_use]
    pub fn expansion_ratio(&self) -> f64 {
        if self.total_edges == 0 {
            0.0
        } else {
            self.expanded_edges as f64 / self.total_edges as f64
        }
    }
}
