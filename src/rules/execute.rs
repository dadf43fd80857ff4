//! Apply and unapply.
//!
//! Two entry points mutate a board:
//! - [`apply`] / [`unapply`]: the search path. `apply` completes the turn
//!   whenever the move leaves the board in a done-state and returns an
//!   [`Undo`] holding everything needed to put the board back.
//! - [`apply_confirmed`]: the interactive and replay path. Moves are checked
//!   against the legal move set and rejected with a reason; gestures and
//!   `done` arrive as separate confirmed moves.
//!
//! Unapply never recomputes anything. It reinstates the pending stacks the
//! move produced, unwinds them (which puts every chip back, captures
//! included), then replays the pending stacks that were there before.

use tracing::trace;

use super::engine::Rules;
use super::movegen::legal_moves;
use crate::board::{Board, Location, Pending, Phase};
use crate::core::{EngineError, EngineResult, PlayerId, PlayerMap};
use crate::moves::{Move, MoveOp};

/// Everything `unapply` needs to invert one `apply`.
#[derive(Clone, Debug)]
pub struct Undo {
    mv: Move,
    phase: Phase,
    turn: PlayerId,
    move_number: u32,
    win: PlayerMap<bool>,
    unresign: Option<Phase>,
    /// Pending stacks before the move.
    prior: Pending,
    /// Pending stacks after the move, before they were accepted.
    placed: Pending,
    /// Source and destination for the rendering side channel.
    pub animation: Option<(Location, Location)>,
    /// Whether the move completed a turn.
    pub completed_turn: bool,
}

impl Undo {
    /// The move this record inverts.
    #[must_use]
    pub fn mv(&self) -> &Move {
        &self.mv
    }
}

/// Outcome of a confirmed move.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Applied {
    pub animation: Option<(Location, Location)>,
    /// Phase after the move.
    pub phase: Phase,
    /// Whether the move completed a turn.
    pub completed_turn: bool,
}

fn location_of(loc: Option<Location>, mv: &Move) -> EngineResult<Location> {
    loc.ok_or_else(|| EngineError::Parse {
        text: mv.to_string(),
        reason: "missing location".into(),
    })
}

fn check_gate(board: &Board, mv: &Move) -> EngineResult<()> {
    if !board.phase.admits(mv.op) {
        return Err(EngineError::WrongPhase {
            op: mv.op,
            phase: board.phase,
        });
    }
    let free = board.phase == Phase::Puzzle || matches!(mv.op, MoveOp::Start | MoveOp::Edit);
    if mv.player.index() >= board.player_count() || (!free && mv.player != board.turn) {
        return Err(EngineError::NotYourTurn {
            player: mv.player,
            turn: board.turn,
        });
    }
    Ok(())
}

/// Drop the carried chip on `to`, performing the game's captures first.
fn place<R: Rules + ?Sized>(rules: &R, board: &mut Board, to: Location) -> EngineResult<()> {
    if board.phase == Phase::Play {
        for (from, prison) in rules.captures_on_drop(board, to) {
            board.capture(from, prison)?;
        }
    }
    board.drop(to)
}

/// Start-of-play transition shared by `start` and `done`.
fn enter_turn<R: Rules + ?Sized>(rules: &R, board: &mut Board) {
    board.phase = rules.phase_after_done(board);
    if board.phase.is_game_over() {
        board.set_game_over(None);
    }
}

/// Perform the transition of `mv` without completing the turn.
fn execute<R: Rules + ?Sized>(
    rules: &R,
    board: &mut Board,
    mv: &Move,
) -> EngineResult<Option<(Location, Location)>> {
    check_gate(board, mv)?;

    match mv.op {
        MoveOp::Start => {
            board.unwind_pending()?;
            board.win.fill(false);
            board.unresign = None;
            board.turn = mv.player;
            match rules.winner(board) {
                Some(w) => board.set_game_over(Some(w)),
                None => enter_turn(rules, board),
            }
            Ok(None)
        }
        MoveOp::Edit => {
            board.unwind_pending()?;
            board.win.fill(false);
            board.unresign = None;
            board.phase = Phase::Puzzle;
            Ok(None)
        }
        MoveOp::Pick => {
            let from = location_of(mv.from, mv)?;
            if board.phase == Phase::Confirm {
                if board.pending().last_drop() != Some(from) {
                    return Err(EngineError::rejected(
                        mv,
                        "only the piece just placed can be picked up",
                    ));
                }
                board.undrop()?;
                board.phase = Phase::Play;
            } else {
                board.pick(from)?;
            }
            Ok(None)
        }
        MoveOp::Drop => {
            let to = location_of(mv.to, mv)?;
            if !board.contains(to) {
                return Err(EngineError::NoSuchLocation(to));
            }
            let source = board
                .pending()
                .picked_from()
                .ok_or(EngineError::NothingPicked)?;
            if source == to {
                board.unpick()?;
                return Ok(None);
            }
            place(rules, board, to)?;
            if board.phase == Phase::Play {
                board.phase = rules.phase_after_drop(board);
            }
            Ok(Some((source, to)))
        }
        MoveOp::Move => {
            let from = location_of(mv.from, mv)?;
            let to = location_of(mv.to, mv)?;
            if !board.contains(to) {
                return Err(EngineError::NoSuchLocation(to));
            }
            board.pick(from)?;
            place(rules, board, to)?;
            board.phase = rules.phase_after_drop(board);
            Ok(Some((from, to)))
        }
        MoveOp::Pass => {
            board.phase = Phase::Confirm;
            Ok(None)
        }
        // Completion is left to the caller so it can record the placement.
        MoveOp::Done => Ok(None),
        MoveOp::Resign => {
            if board.phase == Phase::Resign {
                board.phase = board.unresign.take().unwrap_or(Phase::Play);
            } else {
                board.unresign = Some(board.phase);
                board.phase = Phase::Resign;
            }
            Ok(None)
        }
    }
}

/// Why `mv` cannot be made in this position, if it cannot.
///
/// Complete moves and `done`/`pass` must be in [`legal_moves`]. A `pick`
/// in `Play` only has to start some legal move. Puzzle gestures need a chip
/// to lift and a place to put it. `start`, `edit` and `resign` are gated by
/// phase alone.
fn illegal_reason<R: Rules + ?Sized>(rules: &R, board: &Board, mv: &Move) -> Option<&'static str> {
    match (mv.op, board.phase) {
        (MoveOp::Start | MoveOp::Edit | MoveOp::Resign, _) => None,
        (MoveOp::Pick, Phase::Puzzle) => {
            if board.picked().is_some() {
                Some("already carrying a chip")
            } else if mv.from.and_then(|from| board.top(from)).is_none() {
                Some("nothing to pick up there")
            } else {
                None
            }
        }
        (MoveOp::Drop, Phase::Puzzle) => {
            if board.picked().is_none() {
                Some("nothing is being carried")
            } else if !mv.to.is_some_and(|to| board.contains(to)) {
                Some("no such location")
            } else {
                None
            }
        }
        (MoveOp::Pick, Phase::Play) => {
            if board.picked().is_some() {
                Some("already carrying a chip")
            } else if !legal_moves(rules, board).iter().any(|m| m.from == mv.from) {
                Some("no legal move starts there")
            } else {
                None
            }
        }
        _ if !legal_moves(rules, board).contains(mv) => Some("not a legal move"),
        _ => None,
    }
}

/// Puzzle edits are final as soon as the chip lands.
fn settle_puzzle_drop(board: &mut Board, mv: &Move) {
    if board.phase == Phase::Puzzle && mv.op == MoveOp::Drop {
        board.accept_placement();
    }
}

/// Complete the turn: accept the placement, then end the game or pass the
/// turn on.
///
/// A confirmed resignation hands the win to the next player.
pub fn do_done<R: Rules + ?Sized>(rules: &R, board: &mut Board) {
    board.accept_placement();

    if board.phase == Phase::Resign {
        board.unresign = None;
        let winner = board.turn.next(board.player_count());
        board.set_game_over(Some(winner));
        return;
    }
    board.unresign = None;

    if let Some(winner) = rules.winner(board) {
        board.set_game_over(Some(winner));
        return;
    }

    board.move_number += 1;
    board.turn = board.turn.next(board.player_count());
    enter_turn(rules, board);
}

/// Search-owned apply.
///
/// `start` and `edit` are refused with `NotReversible`. Any other move the
/// position does not allow fails with `IllegalMove` and leaves the board
/// untouched. Complete moves (`move`, `pass`, a turn-ending `drop`, `done`,
/// and a fresh `resign`) are taken through `done`.
pub fn apply<R: Rules + ?Sized>(rules: &R, board: &mut Board, mv: &Move) -> EngineResult<Undo> {
    if matches!(mv.op, MoveOp::Start | MoveOp::Edit) {
        return Err(EngineError::NotReversible(mv.op));
    }
    check_gate(board, mv)?;
    if let Some(reason) = illegal_reason(rules, board, mv) {
        return Err(EngineError::IllegalMove {
            mv: mv.to_string(),
            reason: reason.into(),
        });
    }
    apply_unchecked(rules, board, mv)
}

/// [`apply`] for a move the caller just took from [`legal_moves`] on this
/// board. Release builds skip the legality check.
pub(crate) fn apply_generated<R: Rules + ?Sized>(
    rules: &R,
    board: &mut Board,
    mv: &Move,
) -> EngineResult<Undo> {
    if cfg!(debug_assertions) {
        return apply(rules, board, mv);
    }
    if matches!(mv.op, MoveOp::Start | MoveOp::Edit) {
        return Err(EngineError::NotReversible(mv.op));
    }
    apply_unchecked(rules, board, mv)
}

fn apply_unchecked<R: Rules + ?Sized>(rules: &R, board: &mut Board, mv: &Move) -> EngineResult<Undo> {

    let prior_phase = board.phase;
    let mut undo = Undo {
        mv: *mv,
        phase: board.phase,
        turn: board.turn,
        move_number: board.move_number,
        win: board.win.clone(),
        unresign: board.unresign,
        prior: board.pending().clone(),
        placed: Pending::default(),
        animation: None,
        completed_turn: false,
    };

    undo.animation = execute(rules, board, mv)?;
    undo.placed = board.pending().clone();
    settle_puzzle_drop(board, mv);

    let completes = match mv.op {
        MoveOp::Move | MoveOp::Pass | MoveOp::Done => true,
        MoveOp::Drop => board.phase.is_done_state(),
        MoveOp::Resign => prior_phase != Phase::Resign,
        _ => false,
    };
    if completes {
        if !board.phase.is_done_state() {
            return Err(EngineError::IncompleteMove(mv.to_string()));
        }
        do_done(rules, board);
    }
    undo.completed_turn = completes;

    board.search_depth += 1;
    Ok(undo)
}

/// Exact inverse of [`apply`] for the same move.
pub fn unapply(board: &mut Board, mv: &Move, undo: Undo) -> EngineResult<()> {
    if board.search_depth == 0 {
        return Err(EngineError::UnbalancedUndo);
    }
    if undo.mv != *mv {
        return Err(EngineError::UndoMismatch {
            expected: undo.mv.to_string(),
            got: mv.to_string(),
        });
    }

    board.set_pending(undo.placed);
    board.unwind_pending()?;
    board.replay_pending(&undo.prior)?;

    board.phase = undo.phase;
    board.turn = undo.turn;
    board.move_number = undo.move_number;
    board.win = undo.win;
    board.unresign = undo.unresign;
    board.search_depth -= 1;
    Ok(())
}

/// Apply a move from the interactive or replay channel.
///
/// Complete moves must be in [`legal_moves`]. A `pick` in `Play` is
/// accepted when some legal move starts at that location; in `Puzzle`
/// gestures only need a chip to pick and a place to drop it. `start`,
/// `edit` and `resign` are session controls gated by phase alone.
pub fn apply_confirmed<R: Rules + ?Sized>(
    rules: &R,
    board: &mut Board,
    mv: &Move,
) -> EngineResult<Applied> {
    if !board.phase.admits(mv.op) {
        return Err(EngineError::rejected(
            mv,
            format!("{} is not allowed in phase {:?}", mv.op, board.phase),
        ));
    }
    let free = board.phase == Phase::Puzzle || matches!(mv.op, MoveOp::Start | MoveOp::Edit);
    if !free && mv.player != board.turn {
        return Err(EngineError::rejected(mv, format!("it is {}'s turn", board.turn)));
    }

    if let Some(reason) = illegal_reason(rules, board, mv) {
        return Err(EngineError::rejected(mv, reason));
    }

    let animation = execute(rules, board, mv)?;
    settle_puzzle_drop(board, mv);
    let completed_turn = mv.op == MoveOp::Done;
    if completed_turn {
        do_done(rules, board);
    }
    trace!(mv = %mv, phase = ?board.phase, turn = board.turn.0, "confirmed move");

    Ok(Applied {
        animation,
        phase: board.phase,
        completed_turn,
    })
}

/// Apply then unapply `mv` on a clone and compare it with `board` by
/// structure and digest.
pub fn verify_round_trip<R: Rules + ?Sized>(
    rules: &R,
    board: &Board,
    mv: &Move,
) -> EngineResult<()> {
    let mut scratch = board.clone();
    let undo = apply(rules, &mut scratch, mv)?;
    unapply(&mut scratch, mv, undo)?;
    scratch.search_depth = board.search_depth;
    scratch.same_board(board)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::breakthrough::Breakthrough;

    fn p(n: u8) -> PlayerId {
        PlayerId::new(n)
    }

    #[test]
    fn test_apply_unapply_restores_board() {
        let rules = Breakthrough::new(5, 5);
        let mut board = rules.new_board();
        let before = board.clone();

        let mv = rules.generate(&board)[0];
        let undo = apply(&rules, &mut board, &mv).unwrap();
        assert_eq!(board.turn, p(1));
        assert_eq!(board.move_number, 2);
        assert!(undo.completed_turn);
        assert_eq!(undo.animation, mv.animation());

        unapply(&mut board, &mv, undo).unwrap();
        board.same_board(&before).unwrap();
        assert_eq!(board.search_depth, 0);
    }

    #[test]
    fn test_wrong_phase_and_turn() {
        let rules = Breakthrough::new(5, 5);
        let mut board = rules.new_board();

        let err = apply(&rules, &mut board, &Move::pass(p(0))).unwrap_err();
        assert_eq!(
            err,
            EngineError::WrongPhase {
                op: MoveOp::Pass,
                phase: Phase::Play
            }
        );

        let theirs = Move::step(p(1), Location::cell(0, 3), Location::cell(0, 2));
        assert!(matches!(
            apply(&rules, &mut board, &theirs),
            Err(EngineError::NotYourTurn { .. })
        ));
    }

    #[test]
    fn test_unbalanced_and_mismatched_undo() {
        let rules = Breakthrough::new(5, 5);
        let mut board = rules.new_board();
        let moves = rules.generate(&board);

        let undo = apply(&rules, &mut board, &moves[0]).unwrap();
        let err = unapply(&mut board, &moves[1], undo.clone()).unwrap_err();
        assert!(matches!(err, EngineError::UndoMismatch { .. }));

        unapply(&mut board, &moves[0], undo.clone()).unwrap();
        assert_eq!(
            unapply(&mut board, &moves[0], undo),
            Err(EngineError::UnbalancedUndo)
        );
    }

    #[test]
    fn test_apply_refuses_moves_outside_the_generator() {
        let rules = Breakthrough::new(5, 5);
        let mut board = rules.new_board();
        let before = board.clone();

        // Two rows forward is not a pawn step.
        let leap = Move::step(p(0), Location::cell(0, 0), Location::cell(2, 2));
        assert!(matches!(
            apply(&rules, &mut board, &leap),
            Err(EngineError::IllegalMove { .. })
        ));

        // White's turn, black's pawn.
        let stolen = Move::step(p(0), Location::cell(0, 4), Location::cell(0, 2));
        assert!(matches!(
            apply(&rules, &mut board, &stolen),
            Err(EngineError::IllegalMove { .. })
        ));

        // A pick from which no move starts.
        let stuck = Move::pick(p(0), Location::cell(0, 0));
        assert!(matches!(
            apply(&rules, &mut board, &stuck),
            Err(EngineError::IllegalMove { .. })
        ));

        board.same_board(&before).unwrap();
        assert_eq!(board.search_depth, 0);
    }

    #[test]
    fn test_start_and_edit_are_not_reversible() {
        let rules = Breakthrough::new(5, 5);
        let mut board = rules.new_board();
        assert_eq!(
            apply(&rules, &mut board, &Move::edit(p(0))).unwrap_err(),
            EngineError::NotReversible(MoveOp::Edit)
        );
    }

    #[test]
    fn test_gesture_sequence_and_undo_drop() {
        let rules = Breakthrough::new(5, 5);
        let mut board = rules.new_board();
        let initial = board.clone();
        let a2 = Location::cell(0, 1);
        let a3 = Location::cell(0, 2);

        apply_confirmed(&rules, &mut board, &Move::pick(p(0), a2)).unwrap();
        let applied = apply_confirmed(&rules, &mut board, &Move::drop(p(0), a3)).unwrap();
        assert_eq!(applied.phase, Phase::Confirm);
        assert_eq!(applied.animation, Some((a2, a3)));

        // Undo the drop, then cancel by dropping on the source.
        apply_confirmed(&rules, &mut board, &Move::pick(p(0), a3)).unwrap();
        assert_eq!(board.phase, Phase::Play);
        apply_confirmed(&rules, &mut board, &Move::drop(p(0), a2)).unwrap();
        board.same_board(&initial).unwrap();
    }

    #[test]
    fn test_confirmed_move_then_done() {
        let rules = Breakthrough::new(5, 5);
        let mut board = rules.new_board();
        let mv = Move::step(p(0), Location::cell(1, 1), Location::cell(1, 2));

        let applied = apply_confirmed(&rules, &mut board, &mv).unwrap();
        assert!(!applied.completed_turn);
        assert_eq!(board.turn, p(0));

        let done = apply_confirmed(&rules, &mut board, &Move::done(p(0))).unwrap();
        assert!(done.completed_turn);
        assert_eq!(board.turn, p(1));
        assert!(board.pending().is_empty());
    }

    #[test]
    fn test_confirmed_rejections() {
        let rules = Breakthrough::new(5, 5);
        let mut board = rules.new_board();

        let backwards = Move::step(p(0), Location::cell(1, 1), Location::cell(1, 0));
        let err = apply_confirmed(&rules, &mut board, &backwards).unwrap_err();
        assert!(err.is_rejection());

        let err = apply_confirmed(&rules, &mut board, &Move::done(p(0))).unwrap_err();
        assert!(err.is_rejection());

        let empty = Move::pick(p(0), Location::cell(2, 2));
        assert!(apply_confirmed(&rules, &mut board, &empty)
            .unwrap_err()
            .is_rejection());
    }

    #[test]
    fn test_resign_withdraw_and_confirm() {
        let rules = Breakthrough::new(5, 5);
        let mut board = rules.new_board();

        apply_confirmed(&rules, &mut board, &Move::resign(p(0))).unwrap();
        assert_eq!(board.phase, Phase::Resign);
        apply_confirmed(&rules, &mut board, &Move::resign(p(0))).unwrap();
        assert_eq!(board.phase, Phase::Play);

        apply_confirmed(&rules, &mut board, &Move::resign(p(0))).unwrap();
        apply_confirmed(&rules, &mut board, &Move::done(p(0))).unwrap();
        assert_eq!(board.phase, Phase::GameOver);
        assert!(board.win[p(1)]);
    }

    #[test]
    fn test_edit_and_start() {
        let rules = Breakthrough::new(5, 5);
        let mut board = rules.new_board();

        apply_confirmed(&rules, &mut board, &Move::edit(p(1))).unwrap();
        assert_eq!(board.phase, Phase::Puzzle);
        assert!(legal_moves(&rules, &board).is_empty());

        // Free placement ignores whose turn it is.
        apply_confirmed(&rules, &mut board, &Move::pick(p(1), Location::cell(0, 0))).unwrap();
        apply_confirmed(&rules, &mut board, &Move::drop(p(1), Location::cell(2, 2))).unwrap();
        assert_eq!(board.phase, Phase::Puzzle);

        apply_confirmed(&rules, &mut board, &Move::start(p(1))).unwrap();
        assert_eq!(board.phase, Phase::Play);
        assert_eq!(board.turn, p(1));
        assert!(board.pending().is_empty());
        assert!(board.top(Location::cell(2, 2)).is_some());
    }
}
