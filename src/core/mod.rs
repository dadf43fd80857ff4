//! Core engine types: players, errors, and search randomness.
//!
//! Nothing here knows about boards or moves beyond the identifiers needed
//! to report errors; games and drivers build on these.

pub mod error;
pub mod player;
pub mod rng;

pub use error::{EngineError, EngineResult};
pub use player::{PlayerId, PlayerMap};
pub use rng::GameRng;
