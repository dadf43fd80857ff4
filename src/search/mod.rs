//! Alpha-beta search and strategy selection.
//!
//! - `alphabeta`: iterative-deepening minimax with alpha-beta bounds
//! - `ordering`: move ordering by the game's hint
//! - `strategy`: `SearchStrategy` and the named robot levels
//!
//! The UCT driver lives in `crate::mcts`; both are reached through
//! [`SearchStrategy::find_best_move`].

pub mod alphabeta;
pub mod config;
pub mod ordering;
pub mod stats;
pub mod strategy;

pub use alphabeta::{static_score, AlphaBeta, WIN};
pub use config::{AlphaBetaConfig, Randomize};
pub use ordering::order_moves;
pub use stats::{SearchStats, StopReason};
pub use strategy::{SearchStrategy, StrategyLevel};
