//! UCT search statistics for diagnostics and tuning.

use serde::{Deserialize, Serialize};

use crate::search::StopReason;

/// Statistics collected during one UCT search.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct UctStats {
    pub iterations: u32,

    /// Nodes added to the tree.
    pub nodes_expanded: u32,

    pub simulations: u32,

    /// Deepest tree node reached.
    pub max_depth: u16,

    /// Microseconds.
    pub time_us: u64,

    pub stopped_by: StopReason,
}

impl UctStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    #[must_use]
    pub fn iterations_per_second(&self) -> f64 {
        if self.time_us == 0 {
            0.0
        } else {
            self.iterations as f64 / (self.time_us as f64 / 1_000_000.0)
        }
    }

    #[must_use]
    pub fn avg_nodes_per_iteration(&self) -> f64 {
        if self.iterations == 0 {
            0.0
        } else {
            self.nodes_expanded as f64 / self.iterations as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rates() {
        let mut stats = UctStats::new();
        stats.iterations = 1000;
        stats.nodes_expanded = 500;
        stats.time_us = 1_000_000;

        assert_eq!(stats.iterations_per_second(), 1000.0);
        assert_eq!(stats.avg_nodes_per_iteration(), 0.5);

        stats.reset();
        assert_eq!(stats.iterations, 0);
        assert_eq!(stats.stopped_by, StopReason::Completed);
    }
}
