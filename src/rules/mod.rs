//! Rules and the shared execution machinery.
//!
//! Games implement `Rules` to define:
//! - The initial board
//! - Complete moves for the player to move
//! - Captures, win conditions and evaluation
//!
//! `execute` and `movegen` drive every game the same way and never
//! interpret game-specific concepts directly.

pub mod engine;
pub mod execute;
pub mod movegen;

pub use engine::{CaptureList, GameResult, Rules};
pub use execute::{apply, apply_confirmed, do_done, unapply, verify_round_trip, Applied, Undo};
pub(crate) use execute::apply_generated;
pub use movegen::legal_moves;
