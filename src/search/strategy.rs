//! Strategy selection.
//!
//! A robot plays at a named level. Each level maps to one search driver
//! with fixed parameters; both drivers answer the same question through
//! [`SearchStrategy::find_best_move`].

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::alphabeta::AlphaBeta;
use super::config::{AlphaBetaConfig, Randomize};
use crate::board::Board;
use crate::core::{EngineError, EngineResult};
use crate::mcts::{UctConfig, UctSearch};
use crate::moves::Move;
use crate::rules::Rules;

/// Search driver plus its parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum SearchStrategy {
    AlphaBeta(AlphaBetaConfig),
    Uct(UctConfig),
}

impl SearchStrategy {
    /// Best move for the player to move on `board`.
    ///
    /// The board is cloned once; the caller's copy is never mutated.
    /// `None` when the game is over or nothing can be played.
    pub fn find_best_move<R: Rules + ?Sized>(
        &self,
        rules: &R,
        board: &Board,
    ) -> EngineResult<Option<Move>> {
        match self {
            SearchStrategy::AlphaBeta(config) => AlphaBeta::new(rules, config.clone()).search(board),
            SearchStrategy::Uct(config) => UctSearch::new(rules, config.clone()).search(board),
        }
    }

    /// Same strategy with a different random seed.
    #[must_use]
    pub fn with_seed(self, seed: u64) -> Self {
        match self {
            SearchStrategy::AlphaBeta(config) => SearchStrategy::AlphaBeta(config.with_seed(seed)),
            SearchStrategy::Uct(config) => SearchStrategy::Uct(config.with_seed(seed)),
        }
    }
}

/// Named robot levels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StrategyLevel {
    /// Shallow alpha-beta that varies its openings.
    Dumbot,
    /// Medium-depth alpha-beta that varies its first moves.
    Smartbot,
    /// Deep alpha-beta, deterministic.
    Bestbot,
    /// UCT.
    Montebot,
}

impl StrategyLevel {
    pub const ALL: [StrategyLevel; 4] = [
        StrategyLevel::Dumbot,
        StrategyLevel::Smartbot,
        StrategyLevel::Bestbot,
        StrategyLevel::Montebot,
    ];

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            StrategyLevel::Dumbot => "dumbot",
            StrategyLevel::Smartbot => "smartbot",
            StrategyLevel::Bestbot => "bestbot",
            StrategyLevel::Montebot => "montebot",
        }
    }

    #[must_use]
    pub fn strategy(self) -> SearchStrategy {
        match self {
            StrategyLevel::Dumbot => SearchStrategy::AlphaBeta(
                AlphaBetaConfig::default()
                    .with_depth(2)
                    .with_time_limit(Duration::from_secs(2))
                    .with_randomize(Randomize {
                        tolerance: 1.0,
                        until_move: 8,
                        depth_reduction: 0,
                    }),
            ),
            StrategyLevel::Smartbot => SearchStrategy::AlphaBeta(
                AlphaBetaConfig::default()
                    .with_depth(4)
                    .with_time_limit(Duration::from_secs(5))
                    .with_randomize(Randomize::default()),
            ),
            StrategyLevel::Bestbot => SearchStrategy::AlphaBeta(
                AlphaBetaConfig::default()
                    .with_depth(6)
                    .with_time_limit(Duration::from_secs(10)),
            ),
            StrategyLevel::Montebot => SearchStrategy::Uct(
                UctConfig::default()
                    .with_iterations(0)
                    .with_time_limit(Duration::from_secs(5)),
            ),
        }
    }
}

impl fmt::Display for StrategyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for StrategyLevel {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|level| level.name() == wanted)
            .ok_or_else(|| EngineError::UnknownStrategy(s.to_string()))
    }
}

impl From<StrategyLevel> for SearchStrategy {
    fn from(level: StrategyLevel) -> Self {
        level.strategy()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::gobblet::Gobblet;

    #[test]
    fn test_level_names_round_trip() {
        for level in StrategyLevel::ALL {
            assert_eq!(level.to_string().parse::<StrategyLevel>().unwrap(), level);
        }
        assert_eq!("  BestBot ".parse::<StrategyLevel>().unwrap(), StrategyLevel::Bestbot);
        assert_eq!(
            "grandmaster".parse::<StrategyLevel>(),
            Err(EngineError::UnknownStrategy("grandmaster".into()))
        );
    }

    #[test]
    fn test_both_drivers_answer_the_same_contract() {
        let rules = Gobblet::new();
        let board = rules.new_board();
        let legal = rules.generate(&board);

        let strategies = [
            SearchStrategy::AlphaBeta(AlphaBetaConfig::default().with_depth(2)),
            SearchStrategy::Uct(UctConfig::default().with_iterations(300)),
        ];
        for strategy in strategies {
            let mv = strategy.find_best_move(&rules, &board).unwrap().unwrap();
            assert!(legal.contains(&mv));
        }
    }

    #[test]
    fn test_montebot_is_uct() {
        assert!(matches!(StrategyLevel::Montebot.strategy(), SearchStrategy::Uct(_)));
        assert!(matches!(
            SearchStrategy::from(StrategyLevel::Bestbot),
            SearchStrategy::AlphaBeta(_)
        ));
    }
}
