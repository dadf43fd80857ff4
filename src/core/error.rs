//! Engine error types.
//!
//! Three classes share one enum:
//! - protocol errors: a caller fed the engine something it should have
//!   filtered through the move generator, or paired apply/unapply wrongly
//! - rejections: a confirmed move that is not legal right now
//! - configuration errors: unknown variants, strategies, or unparsable input
//!
//! Running out of search budget is never an error.

use thiserror::Error;

use super::player::PlayerId;
use crate::board::{Location, Phase};
use crate::moves::MoveOp;

/// Errors raised by the board engine.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    /// Move kind not admitted by the current phase.
    #[error("{op} is not admitted in phase {phase:?}")]
    WrongPhase { op: MoveOp, phase: Phase },

    /// Move made by a player other than the one to move.
    #[error("{player} moved but it is {turn}'s turn")]
    NotYourTurn { player: PlayerId, turn: PlayerId },

    /// Location is not on this board.
    #[error("location {0} does not exist on this board")]
    NoSuchLocation(Location),

    /// Tried to lift a chip from an empty stack.
    #[error("nothing to pick at {0}")]
    EmptySource(Location),

    /// Tried to drop with nothing in hand.
    #[error("nothing is being carried")]
    NothingPicked,

    /// Tried to pick while already carrying a chip.
    #[error("already carrying a chip")]
    AlreadyPicked,

    /// A complete move left the board outside a done-state.
    #[error("{0} did not reach a done state")]
    IncompleteMove(String),

    /// Search-path apply handed a move the position does not allow.
    #[error("illegal move '{mv}': {reason}")]
    IllegalMove { mv: String, reason: String },

    /// The move cannot be taken back by the search path.
    #[error("{0} cannot be unapplied")]
    NotReversible(MoveOp),

    /// Unapply without a matching apply.
    #[error("unapply called with no move outstanding")]
    UnbalancedUndo,

    /// Unapply handed a different move than the undo record was made for.
    #[error("undo record belongs to {expected}, not {got}")]
    UndoMismatch { expected: String, got: String },

    /// Two boards that should be identical differ.
    #[error("boards differ in {0}")]
    StateMismatch(&'static str),

    /// Static evaluation reached the win band.
    #[error("static evaluation {0} is outside the open interval (-WIN, WIN)")]
    EvaluationRange(f64),

    /// A confirmed move that the current position does not allow.
    #[error("move '{mv}' rejected: {reason}")]
    Rejected { mv: String, reason: String },

    /// Unknown game variant name at initialization.
    #[error("unknown game variant '{0}'")]
    UnknownVariant(String),

    /// Unknown search strategy level.
    #[error("unknown strategy level '{0}'")]
    UnknownStrategy(String),

    /// Malformed move text.
    #[error("cannot parse move '{text}': {reason}")]
    Parse { text: String, reason: String },

    /// Snapshot encoding or decoding failed.
    #[error("snapshot error: {0}")]
    Snapshot(String),
}

impl EngineError {
    /// Build a rejection for a move and a human-readable reason.
    pub fn rejected(mv: impl ToString, reason: impl Into<String>) -> Self {
        Self::Rejected {
            mv: mv.to_string(),
            reason: reason.into(),
        }
    }

    /// True for rejections of confirmed moves, the only class a UI is
    /// expected to recover from.
    #[must_use]
    pub fn is_rejection(&self) -> bool {
        matches!(self, Self::Rejected { .. })
    }
}

/// Result alias for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejection_classification() {
        let err = EngineError::rejected("done 0", "no move in progress");
        assert!(err.is_rejection());
        assert_eq!(
            err.to_string(),
            "move 'done 0' rejected: no move in progress"
        );

        assert!(!EngineError::UnbalancedUndo.is_rejection());
        let illegal = EngineError::IllegalMove {
            mv: "move 0 a 1 c 3".into(),
            reason: "not a legal move".into(),
        };
        assert!(!illegal.is_rejection());
    }

    #[test]
    fn test_wrong_phase_message() {
        let err = EngineError::WrongPhase {
            op: MoveOp::Pass,
            phase: Phase::Play,
        };
        assert_eq!(err.to_string(), "pass is not admitted in phase Play");
    }
}
