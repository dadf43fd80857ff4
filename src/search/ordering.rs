//! Move ordering for alpha-beta pruning.
//!
//! Moves are tried in descending `Rules::order_hint`, so captures and
//! forward progress come first. The sort is stable: equal hints keep the
//! generator's order, which keeps searches reproducible.

use crate::board::Board;
use crate::moves::Move;
use crate::rules::Rules;

/// Sort `moves` best-first by the game's ordering hint.
pub fn order_moves<R: Rules + ?Sized>(rules: &R, board: &Board, moves: &mut [Move]) {
    moves.sort_by_cached_key(|mv| std::cmp::Reverse(rules.order_hint(board, mv)));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Location;
    use crate::core::PlayerId;
    use crate::games::breakthrough::Breakthrough;

    #[test]
    fn test_captures_first() {
        let rules = Breakthrough::new(5, 5);
        let mut board = rules.empty_board();
        let p0 = PlayerId::new(0);
        board.push_chip(Location::cell(1, 1), rules.pawn(p0)).unwrap();
        board.push_chip(Location::cell(2, 2), rules.pawn(PlayerId::new(1))).unwrap();

        let mut moves = rules.generate(&board);
        order_moves(&rules, &board, &mut moves);
        assert_eq!(moves[0].to, Some(Location::cell(2, 2)));
    }
}
