//! UCT configuration parameters.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// UCT configuration parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UctConfig {
    /// UCB1 exploration constant (default: sqrt(2) = 1.414).
    /// Higher values favor exploration over exploitation.
    pub exploration_constant: f64,

    /// Iterations to run (0 = until another budget stops the search).
    pub iterations: u32,

    /// Wall-clock budget for one search.
    pub time_limit: Option<Duration>,

    /// Maximum nodes to allocate in the tree.
    pub max_nodes: usize,

    /// Plies after which a playout is scored by static evaluation.
    pub max_playout_depth: u32,

    /// Reward lost per ply between the root and a win.
    pub win_length_penalty: f64,

    /// Floor for the reward of any win, however long.
    pub min_win_value: f64,

    /// Random seed for expansion and playouts.
    /// Same seed produces deterministic searches.
    pub seed: u64,
}

impl Default for UctConfig {
    fn default() -> Self {
        Self {
            exploration_constant: std::f64::consts::SQRT_2,
            iterations: 10_000,
            time_limit: None,
            max_nodes: 100_000,
            max_playout_depth: 200,
            win_length_penalty: 0.002,
            min_win_value: 0.5,
            seed: 42,
        }
    }
}

impl UctConfig {
    pub fn with_exploration(mut self, c: f64) -> Self {
        self.exploration_constant = c;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_iterations(mut self, iterations: u32) -> Self {
        self.iterations = iterations;
        self
    }

    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    pub fn with_max_nodes(mut self, nodes: usize) -> Self {
        self.max_nodes = nodes;
        self
    }

    pub fn with_max_playout_depth(mut self, depth: u32) -> Self {
        self.max_playout_depth = depth;
        self
    }

    /// Per-ply penalty and floor for win rewards.
    pub fn with_win_length_penalty(mut self, penalty: f64, min_win_value: f64) -> Self {
        self.win_length_penalty = penalty;
        self.min_win_value = min_win_value;
        self
    }

    /// Reward for a win reached `plies` after the root.
    #[must_use]
    pub fn win_value(&self, plies: u32) -> f64 {
        (1.0 - self.win_length_penalty * plies as f64).max(self.min_win_value)
    }
}
