//! UCT (Monte Carlo tree search with UCB1 selection).
//!
//! ## Overview
//!
//! - **Arena tree**: nodes addressed by `NodeId`, each tagged with the
//!   digest of its position
//! - **One board per search**: the tree is walked by `apply` and unwound by
//!   `unapply` on a single clone of the root board
//! - **N-player rewards**: every edge keeps a reward sum per player, and
//!   each node is scored from the point of view of the player to move there
//! - **Configurable policies**: selection and simulation are trait objects
//!
//! ## Usage
//!
//! ```rust
//! use rust_board::games::Gobblet;
//! use rust_board::mcts::{UctConfig, UctSearch};
//! use rust_board::rules::Rules;
//!
//! let rules = Gobblet::new();
//! let board = rules.new_board();
//!
//! let mut search = UctSearch::new(&rules, UctConfig::default().with_iterations(500));
//! let best = search.search(&board).unwrap();
//! assert!(best.is_some());
//!
//! for (mv, share) in search.move_probabilities() {
//!     println!("{mv}: {:.1}%", share * 100.0);
//! }
//! ```

pub mod config;
pub mod node;
pub mod policy;
pub mod search;
pub mod stats;
pub mod tree;

pub use config::UctConfig;
pub use node::{Edge, NodeId, UctNode};
pub use policy::{
    evaluation_rewards, outcome_rewards, RandomPlayout, SelectionPolicy, SimulationPolicy, UCB1,
};
pub use search::UctSearch;
pub use stats::UctStats;
pub use tree::{TreeStats, UctTree};
