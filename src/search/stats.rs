//! Alpha-beta search statistics.

use serde::{Deserialize, Serialize};

/// Why a search stopped.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum StopReason {
    /// Ran to the configured depth or iteration count.
    #[default]
    Completed,
    /// Wall-clock budget ran out.
    Time,
    /// Node budget ran out.
    Nodes,
    /// A score at or above the good-enough threshold was found.
    GoodEnough,
    /// Only one move was available.
    SingleChoice,
}

impl StopReason {
    /// Whether a budget cut the search short.
    #[must_use]
    pub fn is_budget(self) -> bool {
        matches!(self, StopReason::Time | StopReason::Nodes)
    }
}

/// Statistics collected during one alpha-beta search.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SearchStats {
    /// Positions visited, root included.
    pub nodes: u64,

    /// Static evaluations, terminal scoring included.
    pub evaluations: u64,

    /// Beta cutoffs.
    pub cutoffs: u64,

    /// Deepest fully searched iteration (0 when none finished).
    pub completed_depth: u32,

    /// Score of the chosen move from the mover's view.
    pub best_score: f64,

    /// Microseconds.
    pub time_us: u64,

    pub stopped_by: StopReason,
}

impl SearchStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    #[must_use]
    pub fn nodes_per_second(&self) -> f64 {
        if self.time_us == 0 {
            0.0
        } else {
            self.nodes as f64 / (self.time_us as f64 / 1_000_000.0)
        }
    }
}
