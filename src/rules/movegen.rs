//! Legal move generation.
//!
//! The move set depends on the phase. Only `Play` with an empty hand asks
//! the game; every other phase has a fixed shape:
//!
//! | phase            | moves                                       |
//! |------------------|---------------------------------------------|
//! | Play, empty hand | the game's complete moves                   |
//! | Play, holding    | `drop` on each destination, `drop` on source |
//! | Confirm          | `done`, `pick` of the last drop             |
//! | Pass             | `pass`                                      |
//! | Resign           | `done`, `resign` (withdraw)                 |
//! | Puzzle, GameOver | nothing                                     |

use super::engine::Rules;
use crate::board::{Board, Location, Phase};
use crate::moves::Move;

/// Moves the player to move may make, computed from scratch.
pub fn legal_moves<R: Rules + ?Sized>(rules: &R, board: &Board) -> Vec<Move> {
    let turn = board.turn;
    match board.phase {
        Phase::Puzzle | Phase::GameOver => Vec::new(),
        Phase::Play => match board.pending().picked_from() {
            None => rules.generate(board),
            Some(source) => drops_for(rules, board, source),
        },
        Phase::Confirm => {
            let mut moves = vec![Move::done(turn)];
            if let Some(to) = board.pending().last_drop() {
                moves.push(Move::pick(turn, to));
            }
            moves
        }
        Phase::Pass => vec![Move::pass(turn)],
        Phase::Resign => vec![Move::done(turn), Move::resign(turn)],
    }
}

/// Destinations for the carried chip: those of the complete moves from its
/// source, plus the source itself (cancel).
fn drops_for<R: Rules + ?Sized>(rules: &R, board: &Board, source: Location) -> Vec<Move> {
    let turn = board.turn;
    let mut moves = vec![Move::drop(turn, source)];

    let mut scratch = board.clone();
    if scratch.unpick().is_err() {
        return moves;
    }
    for mv in rules.generate(&scratch) {
        if mv.from != Some(source) {
            continue;
        }
        if let Some(to) = mv.to {
            let drop = Move::drop(turn, to);
            if !moves.contains(&drop) {
                moves.push(drop);
            }
        }
    }
    moves
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::PlayerId;
    use crate::games::breakthrough::Breakthrough;
    use crate::rules::execute::apply_confirmed;

    #[test]
    fn test_holding_lists_drops_and_cancel() {
        let rules = Breakthrough::new(5, 5);
        let mut board = rules.new_board();
        let p0 = PlayerId::new(0);
        let b2 = Location::cell(1, 1);

        apply_confirmed(&rules, &mut board, &Move::pick(p0, b2)).unwrap();
        let moves = legal_moves(&rules, &board);

        assert_eq!(moves[0], Move::drop(p0, b2));
        let targets: Vec<_> = moves[1..].iter().filter_map(|m| m.to).collect();
        assert_eq!(
            targets,
            vec![Location::cell(0, 2), Location::cell(1, 2), Location::cell(2, 2)]
        );
    }

    #[test]
    fn test_confirm_phase_moves() {
        let rules = Breakthrough::new(5, 5);
        let mut board = rules.new_board();
        let p0 = PlayerId::new(0);
        let mv = Move::step(p0, Location::cell(1, 1), Location::cell(1, 2));

        apply_confirmed(&rules, &mut board, &mv).unwrap();
        assert_eq!(
            legal_moves(&rules, &board),
            vec![Move::done(p0), Move::pick(p0, Location::cell(1, 2))]
        );
    }
}
