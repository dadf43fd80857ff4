//! # rust-board
//!
//! A reversible board-game engine with alpha-beta and UCT search.
//!
//! ## Design Principles
//!
//! 1. **Exact reversibility**: every search move is applied and taken back
//!    with `apply`/`unapply`, and the result is checked structurally and by
//!    digest.
//!
//! 2. **Games are data**: a game supplies its layout, complete moves,
//!    captures and win test through the `Rules` trait. Phases, gestures,
//!    pending stacks and search are shared.
//!
//! 3. **One authoritative board**: the `Session` owns it; searches run on a
//!    private clone and return one move.
//!
//! ## Modules
//!
//! - `core`: players, errors, deterministic RNG
//! - `board`: cell graph, chips, phases, pending stacks, board state, digest
//! - `moves`: move descriptor and its text form
//! - `rules`: the `Rules` trait, legal moves, apply/unapply
//! - `search`: alpha-beta driver and strategy selection
//! - `mcts`: UCT driver
//! - `session`: interactive session, history, repetition, snapshots
//! - `games`: Gobblet Gobblers and Breakthrough

pub mod core;
pub mod board;
pub mod moves;
pub mod rules;
pub mod search;
pub mod mcts;
pub mod session;
pub mod games;

// Re-export commonly used types
pub use crate::core::{EngineError, EngineResult, GameRng, PlayerId, PlayerMap};

pub use crate::board::{
    Board, BoardSnapshot, CellGraph, CellId, ChipCatalog, ChipId, Geometry, Location, Pending,
    Phase, StackOrder,
};

pub use crate::moves::{Move, MoveOp};

pub use crate::rules::{
    apply, apply_confirmed, legal_moves, unapply, verify_round_trip, Applied, GameResult, Rules,
    Undo,
};

pub use crate::search::{
    AlphaBeta, AlphaBetaConfig, Randomize, SearchStats, SearchStrategy, StopReason, StrategyLevel,
    WIN,
};

pub use crate::mcts::{UctConfig, UctSearch, UctStats};

pub use crate::session::{HistoryEntry, RepetitionTable, Session};
