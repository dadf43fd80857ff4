//! Alpha-beta configuration parameters.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Opening randomization: pick uniformly among near-best root moves.
///
/// Root pruning is switched off while this is active so that every root
/// score is exact, and the depth is reduced to pay for it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Randomize {
    /// Moves scoring within this much of the best are candidates.
    pub tolerance: f64,

    /// Active while `move_number` is below this.
    pub until_move: u32,

    /// Plies taken off `max_depth` while active.
    pub depth_reduction: u32,
}

impl Default for Randomize {
    fn default() -> Self {
        Self {
            tolerance: 0.5,
            until_move: 6,
            depth_reduction: 1,
        }
    }
}

/// Alpha-beta configuration parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AlphaBetaConfig {
    /// Deepest iteration of iterative deepening, in plies.
    pub max_depth: u32,

    /// Wall-clock budget.
    pub time_limit: Option<Duration>,

    /// Node budget (0 = unlimited).
    pub node_limit: u64,

    /// Stop deepening once the best score reaches this.
    pub good_enough: Option<f64>,

    pub randomize: Option<Randomize>,

    /// Seed for randomized root choice.
    pub seed: u64,
}

impl Default for AlphaBetaConfig {
    fn default() -> Self {
        Self {
            max_depth: 4,
            time_limit: None,
            node_limit: 0,
            good_enough: None,
            randomize: None,
            seed: 42,
        }
    }
}

impl AlphaBetaConfig {
    pub fn with_depth(mut self, depth: u32) -> Self {
        self.max_depth = depth;
        self
    }

    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    pub fn with_node_limit(mut self, nodes: u64) -> Self {
        self.node_limit = nodes;
        self
    }

    pub fn with_good_enough(mut self, score: f64) -> Self {
        self.good_enough = Some(score);
        self
    }

    pub fn with_randomize(mut self, randomize: Randomize) -> Self {
        self.randomize = Some(randomize);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Randomization settings in force at `move_number`, if any.
    #[must_use]
    pub fn randomize_at(&self, move_number: u32) -> Option<&Randomize> {
        self.randomize
            .as_ref()
            .filter(|r| move_number < r.until_move)
    }

    /// Depth searched at `move_number`; never below one ply.
    #[must_use]
    pub fn depth_at(&self, move_number: u32) -> u32 {
        let reduction = self.randomize_at(move_number).map_or(0, |r| r.depth_reduction);
        self.max_depth.saturating_sub(reduction).max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_pattern() {
        let config = AlphaBetaConfig::default()
            .with_depth(6)
            .with_node_limit(10_000)
            .with_good_enough(500.0)
            .with_seed(7);

        assert_eq!(config.max_depth, 6);
        assert_eq!(config.node_limit, 10_000);
        assert_eq!(config.good_enough, Some(500.0));
        assert_eq!(config.seed, 7);
    }

    #[test]
    fn test_randomization_window() {
        let config = AlphaBetaConfig::default().with_depth(4).with_randomize(Randomize {
            tolerance: 1.0,
            until_move: 3,
            depth_reduction: 2,
        });

        assert!(config.randomize_at(1).is_some());
        assert_eq!(config.depth_at(1), 2);
        assert!(config.randomize_at(3).is_none());
        assert_eq!(config.depth_at(3), 4);
    }

    #[test]
    fn test_depth_never_below_one() {
        let config = AlphaBetaConfig::default().with_depth(1).with_randomize(Randomize {
            depth_reduction: 5,
            ..Randomize::default()
        });
        assert_eq!(config.depth_at(1), 1);
    }

    #[test]
    fn test_serialization() {
        let config = AlphaBetaConfig::default()
            .with_time_limit(Duration::from_millis(250))
            .with_randomize(Randomize::default());
        let json = serde_json::to_string(&config).unwrap();
        let back: AlphaBetaConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, back);
    }
}
