//! The discrete sub-state gating which move kinds are legal.

use serde::{Deserialize, Serialize};

use crate::moves::MoveOp;

/// Phase of a board. Every transition is gated by it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Free editing; no turn discipline.
    Puzzle,
    /// Waiting for the player to move.
    Play,
    /// A move is on the board and waits for `done`.
    Confirm,
    /// The player to move has nothing to do but pass.
    Pass,
    /// The player to move has resigned; `done` confirms, `resign` withdraws.
    Resign,
    GameOver,
}

impl Phase {
    /// Stable small integer used by the digest.
    #[must_use]
    pub const fn ordinal(self) -> u64 {
        match self {
            Phase::Puzzle => 0,
            Phase::Play => 1,
            Phase::Confirm => 2,
            Phase::Pass => 3,
            Phase::Resign => 4,
            Phase::GameOver => 5,
        }
    }

    /// Phases in which a turn is ready to be completed by `done`.
    #[must_use]
    pub const fn is_done_state(self) -> bool {
        matches!(self, Phase::Confirm | Phase::Resign)
    }

    #[must_use]
    pub const fn is_game_over(self) -> bool {
        matches!(self, Phase::GameOver)
    }

    /// Whether a move of kind `op` may be applied in this phase.
    ///
    /// `start` and `edit` are admitted everywhere; the rest follow the table
    /// below.
    ///
    /// | phase    | admitted                         |
    /// |----------|----------------------------------|
    /// | Puzzle   | pick, drop                       |
    /// | Play     | pick, drop, move, resign         |
    /// | Confirm  | pick, done, resign               |
    /// | Pass     | pass, resign                     |
    /// | Resign   | done, resign                     |
    /// | GameOver | -                                |
    #[must_use]
    pub fn admits(self, op: MoveOp) -> bool {
        use MoveOp::*;
        match op {
            Start | Edit => true,
            Pick => matches!(self, Phase::Puzzle | Phase::Play | Phase::Confirm),
            Drop => matches!(self, Phase::Puzzle | Phase::Play),
            Move => self == Phase::Play,
            Pass => self == Phase::Pass,
            Done => self.is_done_state(),
            Resign => matches!(
                self,
                Phase::Play | Phase::Confirm | Phase::Pass | Phase::Resign
            ),
        }
    }
}
