//! Per-game rules trait.
//!
//! A game is data behind this trait: its board layout, the complete moves
//! available to the player to move, what a drop captures, and when someone
//! has won. Everything else (phases, gestures, apply/unapply, search) is
//! shared machinery in `rules::execute`, `rules::movegen` and the drivers.

use smallvec::SmallVec;

use crate::board::{Board, Location, Phase};
use crate::core::PlayerId;
use crate::moves::Move;

/// Result of a completed game.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameResult {
    /// Single winner.
    Winner(PlayerId),
    /// Draw (no winner).
    Draw,
    /// Multiple winners (team games, shared victory).
    Winners(Vec<PlayerId>),
}

impl GameResult {
    /// Check if a player won.
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        match self {
            GameResult::Winner(p) => *p == player,
            GameResult::Winners(ps) => ps.contains(&player),
            GameResult::Draw => false,
        }
    }
}

/// Captures caused by a drop: (from, to) pairs applied in order.
pub type CaptureList = SmallVec<[(Location, Location); 1]>;

/// Game rules.
///
/// ## Implementation Notes
///
/// - `generate` is called only in `Phase::Play` with nothing in hand and
///   must list complete moves (`Move::step`) for `board.turn`.
/// - `captures_on_drop` is called while the moving chip is in hand, before
///   it lands; the engine performs and records the captures.
/// - `winner` is called after every completed turn, before the turn passes.
/// - `evaluate` must stay strictly inside `(-WIN, WIN)` of the alpha-beta
///   driver; won positions are scored by the driver, not here.
pub trait Rules {
    /// Variant name, as accepted by `games::create`.
    fn variant(&self) -> &str;

    /// Standard initial position.
    fn new_board(&self) -> Board;

    /// Complete moves for the player to move.
    fn generate(&self, board: &Board) -> Vec<Move>;

    /// Captures made when the carried chip lands on `to`.
    fn captures_on_drop(&self, _board: &Board, _to: Location) -> CaptureList {
        CaptureList::new()
    }

    /// Winner of a position whose last move has just been accepted.
    fn winner(&self, board: &Board) -> Option<PlayerId>;

    /// Whether a player without moves passes instead of ending the game.
    fn can_pass(&self) -> bool {
        false
    }

    /// Phase after a drop in `Play`. `Confirm` for single-step moves.
    fn phase_after_drop(&self, _board: &Board) -> Phase {
        Phase::Confirm
    }

    /// Phase for the new player to move after a completed turn.
    ///
    /// Default: `Play` when there is a move, else `Pass` for games that
    /// pass and `GameOver` (draw) for games that do not.
    fn phase_after_done(&self, board: &Board) -> Phase {
        if !self.generate(board).is_empty() {
            Phase::Play
        } else if self.can_pass() {
            Phase::Pass
        } else {
            Phase::GameOver
        }
    }

    /// Static evaluation of a position that is not over, from `player`'s
    /// point of view.
    fn evaluate(&self, board: &Board, player: PlayerId) -> f64;

    /// Ordering hint for search; larger is tried first.
    fn order_hint(&self, _board: &Board, _mv: &Move) -> i32 {
        0
    }
}

impl<R: Rules + ?Sized> Rules for Box<R> {
    fn variant(&self) -> &str {
        (**self).variant()
    }

    fn new_board(&self) -> Board {
        (**self).new_board()
    }

    fn generate(&self, board: &Board) -> Vec<Move> {
        (**self).generate(board)
    }

    fn captures_on_drop(&self, board: &Board, to: Location) -> CaptureList {
        (**self).captures_on_drop(board, to)
    }

    fn winner(&self, board: &Board) -> Option<PlayerId> {
        (**self).winner(board)
    }

    fn can_pass(&self) -> bool {
        (**self).can_pass()
    }

    fn phase_after_drop(&self, board: &Board) -> Phase {
        (**self).phase_after_drop(board)
    }

    fn phase_after_done(&self, board: &Board) -> Phase {
        (**self).phase_after_done(board)
    }

    fn evaluate(&self, board: &Board, player: PlayerId) -> f64 {
        (**self).evaluate(board, player)
    }

    fn order_hint(&self, board: &Board, mv: &Move) -> i32 {
        (**self).order_hint(board, mv)
    }
}
