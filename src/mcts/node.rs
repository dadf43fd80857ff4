//! UCT node and edge structures.
//!
//! Nodes live in an arena and refer to each other by `NodeId`. Each node
//! records the digest of the position it stands for, so a tree can be
//! checked against the board it is replayed on.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{PlayerId, PlayerMap};
use crate::moves::Move;

/// Index into the UctTree node arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(pub u32);

impl NodeId {
    /// Sentinel value representing no node.
    pub const NONE: NodeId = NodeId(u32::MAX);

    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    #[inline]
    #[must_use]
    pub const fn is_none(self) -> bool {
        self.0 == u32::MAX
    }

    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_none() {
            write!(f, "NodeId(NONE)")
        } else {
            write!(f, "NodeId({})", self.0)
        }
    }
}

/// A move from a parent node to a (possibly unexpanded) child.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Edge {
    pub mv: Move,

    /// Child node (NONE until expanded).
    pub child: NodeId,

    pub visits: u32,

    /// Sum of rewards in [-1, 1] per player.
    pub total_reward: PlayerMap<f64>,
}

impl Edge {
    pub fn new(mv: Move, player_count: usize) -> Self {
        Self {
            mv,
            child: NodeId::NONE,
            visits: 0,
            total_reward: PlayerMap::with_value(player_count, 0.0),
        }
    }

    /// Mean reward for a player; 0 before the first visit.
    #[must_use]
    pub fn mean_reward(&self, player: PlayerId) -> f64 {
        if self.visits == 0 {
            0.0
        } else {
            self.total_reward[player] / self.visits as f64
        }
    }

    #[must_use]
    pub fn is_expanded(&self) -> bool {
        !self.child.is_none()
    }
}

/// A position in the UCT tree.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UctNode {
    /// Parent node (NONE for root).
    pub parent: NodeId,

    /// Index of the edge from parent that led to this node.
    pub parent_edge_idx: u16,

    /// Player to move at this node.
    pub to_move: PlayerId,

    /// Plies from the root.
    pub depth: u16,

    /// Digest of the position.
    pub digest: u64,

    pub visits: u32,

    /// Game over, or nothing left to play.
    pub is_terminal: bool,

    /// Rewards if terminal.
    pub terminal_reward: Option<PlayerMap<f64>>,

    /// SmallVec optimizes for small branching factors.
    pub edges: SmallVec<[Edge; 8]>,
}

impl UctNode {
    pub fn new(parent: NodeId, parent_edge_idx: u16, to_move: PlayerId, depth: u16, digest: u64) -> Self {
        Self {
            parent,
            parent_edge_idx,
            to_move,
            depth,
            digest,
            visits: 0,
            is_terminal: false,
            terminal_reward: None,
            edges: SmallVec::new(),
        }
    }

    pub fn root(to_move: PlayerId, digest: u64) -> Self {
        Self::new(NodeId::NONE, 0, to_move, 0, digest)
    }

    #[must_use]
    pub fn has_unexpanded(&self) -> bool {
        self.edges.iter().any(|e| !e.is_expanded())
    }

    /// Indices of unexpanded edges.
    pub fn unexpanded_edges(&self) -> impl Iterator<Item = usize> + '_ {
        self.edges
            .iter()
            .enumerate()
            .filter(|(_, e)| !e.is_expanded())
            .map(|(i, _)| i)
    }

    /// Most visited edge; the earliest wins ties.
    #[must_use]
    pub fn most_visited(&self) -> Option<&Edge> {
        self.edges
            .iter()
            .reduce(|best, e| if e.visits > best.visits { e } else { best })
    }
}
