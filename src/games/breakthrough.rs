//! Breakthrough on a rectangular board.
//!
//! Each side starts with two full rows of pawns. A pawn steps straight
//! forward onto an empty cell or diagonally forward onto an empty or enemy
//! cell; a diagonal step onto an enemy captures it into the mover's pool.
//! Reaching the far row, or capturing every enemy pawn, wins.
//!
//! A player with no step passes. If neither side can step the game is
//! drawn.

use std::sync::Arc;

use crate::board::{Board, CellGraph, ChipCatalog, ChipId, Geometry, Location, Phase, StackOrder};
use crate::core::{EngineError, EngineResult, PlayerId};
use crate::moves::Move;
use crate::rules::{CaptureList, Rules};

/// Pool slot holding captured enemy pawns.
pub const PRISON: u8 = 0;

/// Breakthrough rules for one board size.
#[derive(Clone, Debug)]
pub struct Breakthrough {
    name: String,
    graph: Arc<CellGraph>,
    catalog: Arc<ChipCatalog>,
    pawns: [ChipId; 2],
}

impl Breakthrough {
    /// Rules for a `cols` x `rows` board.
    ///
    /// # Panics
    ///
    /// Panics unless the board has at least one column and four rows. Use
    /// [`Breakthrough::try_new`] for sizes that come from outside.
    #[must_use]
    pub fn new(cols: u8, rows: u8) -> Self {
        assert!(
            Self::fits(cols, rows),
            "breakthrough needs at least one column and four rows"
        );
        Self::build(cols, rows)
    }

    /// Rules for a `cols` x `rows` board, refusing sizes with no room for
    /// both armies.
    pub fn try_new(cols: u8, rows: u8) -> EngineResult<Self> {
        if !Self::fits(cols, rows) {
            return Err(EngineError::UnknownVariant(format!(
                "breakthrough-{cols}x{rows}"
            )));
        }
        Ok(Self::build(cols, rows))
    }

    fn fits(cols: u8, rows: u8) -> bool {
        cols >= 1 && rows >= 4
    }

    fn build(cols: u8, rows: u8) -> Self {
        let mut catalog = ChipCatalog::new();
        let white = catalog.register("white pawn", Some(PlayerId::new(0)), 1);
        let black = catalog.register("black pawn", Some(PlayerId::new(1)), 1);
        let name = if cols == 8 && rows == 8 {
            "breakthrough".to_string()
        } else if cols == rows {
            format!("breakthrough-{cols}")
        } else {
            format!("breakthrough-{cols}x{rows}")
        };

        Self {
            name,
            graph: Arc::new(CellGraph::new(Geometry::Octagonal, cols, rows)),
            catalog: Arc::new(catalog),
            pawns: [white, black],
        }
    }

    /// Standard 8x8 game.
    #[must_use]
    pub fn standard() -> Self {
        Self::new(8, 8)
    }

    /// Pawn chip of a player.
    #[must_use]
    pub fn pawn(&self, player: PlayerId) -> ChipId {
        self.pawns[player.index()]
    }

    /// Board with no pawns, for building positions.
    #[must_use]
    pub fn empty_board(&self) -> Board {
        Board::new(
            Arc::clone(&self.graph),
            Arc::clone(&self.catalog),
            2,
            &[StackOrder::Unordered],
        )
    }

    fn forward(player: PlayerId) -> i8 {
        if player.index() == 0 {
            1
        } else {
            -1
        }
    }

    fn goal_row(&self, player: PlayerId) -> u8 {
        if player.index() == 0 {
            self.graph.rows() - 1
        } else {
            0
        }
    }

    /// Rows advanced from the player's home row.
    fn progress(&self, player: PlayerId, row: u8) -> u8 {
        if player.index() == 0 {
            row
        } else {
            self.graph.rows() - 1 - row
        }
    }

    fn owner_at(&self, board: &Board, loc: Location) -> Option<PlayerId> {
        board.top(loc).and_then(|c| self.catalog.owner(c))
    }

    /// Steps available to `player`, in cell order, left to right.
    fn moves_for(&self, board: &Board, player: PlayerId) -> Vec<Move> {
        let graph = board.graph();
        let mut moves = Vec::new();

        for cell in graph.cells() {
            if board.top_of(cell) != Some(self.pawn(player)) {
                continue;
            }
            let from = board.cell_location(cell);
            for dcol in [-1i8, 0, 1] {
                let Some(dir) = graph.geometry().direction_of(dcol, Self::forward(player)) else {
                    continue;
                };
                let Some(target) = graph.neighbor(cell, dir) else {
                    continue;
                };
                let to = board.cell_location(target);
                let open = match self.owner_at(board, to) {
                    None => true,
                    Some(owner) => dcol != 0 && owner != player,
                };
                if open {
                    moves.push(Move::step(player, from, to));
                }
            }
        }
        moves
    }

    fn pawn_count(&self, board: &Board, player: PlayerId) -> usize {
        board
            .graph()
            .cells()
            .filter(|&c| board.top_of(c) == Some(self.pawn(player)))
            .count()
    }
}

impl Rules for Breakthrough {
    fn variant(&self) -> &str {
        &self.name
    }

    fn new_board(&self) -> Board {
        let mut board = self.empty_board();
        let rows = self.graph.rows();
        for col in 0..self.graph.cols() {
            for (row, player) in [(0, 0), (1, 0), (rows - 2, 1), (rows - 1, 1)] {
                let placed = board.push_chip(Location::cell(col, row), self.pawns[player]);
                debug_assert!(placed.is_ok());
            }
        }
        board
    }

    fn generate(&self, board: &Board) -> Vec<Move> {
        self.moves_for(board, board.turn)
    }

    fn captures_on_drop(&self, board: &Board, to: Location) -> CaptureList {
        let mut captures = CaptureList::new();
        if let Some(owner) = self.owner_at(board, to) {
            if owner != board.turn {
                captures.push((to, Location::pool(board.turn, PRISON)));
            }
        }
        captures
    }

    fn winner(&self, board: &Board) -> Option<PlayerId> {
        PlayerId::all(2).find(|&player| {
            let goal = self.goal_row(player);
            let arrived = (0..self.graph.cols())
                .any(|col| board.top(Location::cell(col, goal)) == Some(self.pawn(player)));
            let other = player.next(2);
            arrived || self.pawn_count(board, other) == 0
        })
    }

    fn can_pass(&self) -> bool {
        true
    }

    fn phase_after_done(&self, board: &Board) -> Phase {
        if !self.generate(board).is_empty() {
            Phase::Play
        } else if self.moves_for(board, board.turn.next(2)).is_empty() {
            Phase::GameOver
        } else {
            Phase::Pass
        }
    }

    fn evaluate(&self, board: &Board, player: PlayerId) -> f64 {
        let mut score = 0.0;
        for cell in board.graph().cells() {
            let Some(chip) = board.top_of(cell) else {
                continue;
            };
            let Some(owner) = self.catalog.owner(chip) else {
                continue;
            };
            let (_, row) = board.graph().coords(cell);
            let progress = self.progress(owner, row) as f64;
            let value = 10.0 + progress * progress * 0.5;
            if owner == player {
                score += value;
            } else {
                score -= value;
            }
        }
        score
    }

    fn order_hint(&self, board: &Board, mv: &Move) -> i32 {
        let Some(to) = mv.to else {
            return 0;
        };
        let capture = match self.owner_at(board, to) {
            Some(owner) if owner != mv.player => 100,
            _ => 0,
        };
        let advance = match to {
            Location::Cell { row, .. } => self.progress(mv.player, row) as i32,
            Location::Pool { .. } => 0,
        };
        capture + advance
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(n: u8) -> PlayerId {
        PlayerId::new(n)
    }

    #[test]
    fn test_variant_names() {
        assert_eq!(Breakthrough::standard().variant(), "breakthrough");
        assert_eq!(Breakthrough::new(6, 6).variant(), "breakthrough-6");
        assert_eq!(Breakthrough::new(5, 7).variant(), "breakthrough-5x7");
    }

    #[test]
    fn test_board_too_small() {
        assert!(matches!(
            Breakthrough::try_new(5, 3),
            Err(EngineError::UnknownVariant(_))
        ));
        assert!(Breakthrough::try_new(0, 6).is_err());
        assert_eq!(Breakthrough::try_new(1, 4).unwrap().variant(), "breakthrough-1x4");
    }

    #[test]
    #[should_panic(expected = "four rows")]
    fn test_new_panics_on_three_rows() {
        let _ = Breakthrough::new(5, 3);
    }

    #[test]
    fn test_opening_moves() {
        let rules = Breakthrough::standard();
        let board = rules.new_board();
        // Front row of 8: edge pawns have 2 steps, others 3.
        assert_eq!(rules.generate(&board).len(), 2 * 2 + 6 * 3);
        assert_eq!(rules.winner(&board), None);
    }

    #[test]
    fn test_diagonal_capture_only() {
        let rules = Breakthrough::new(5, 5);
        let mut board = rules.empty_board();
        board.push_chip(Location::cell(2, 2), rules.pawn(p(0))).unwrap();
        board.push_chip(Location::cell(2, 3), rules.pawn(p(1))).unwrap();
        board.push_chip(Location::cell(3, 3), rules.pawn(p(1))).unwrap();

        let targets: Vec<_> = rules.generate(&board).iter().filter_map(|m| m.to).collect();
        assert_eq!(targets, vec![Location::cell(1, 3), Location::cell(3, 3)]);

        let captures = rules.captures_on_drop(&board, Location::cell(3, 3));
        assert_eq!(
            captures.as_slice(),
            &[(Location::cell(3, 3), Location::pool(p(0), PRISON))]
        );
        assert!(rules.captures_on_drop(&board, Location::cell(1, 3)).is_empty());
    }

    #[test]
    fn test_winner_by_arrival_and_elimination() {
        let rules = Breakthrough::new(5, 5);
        let mut board = rules.empty_board();
        board.push_chip(Location::cell(0, 4), rules.pawn(p(0))).unwrap();
        board.push_chip(Location::cell(4, 4), rules.pawn(p(1))).unwrap();
        assert_eq!(rules.winner(&board), Some(p(0)));

        let mut board = rules.empty_board();
        board.push_chip(Location::cell(0, 1), rules.pawn(p(1))).unwrap();
        assert_eq!(rules.winner(&board), Some(p(1)));
    }

    #[test]
    fn test_evaluation_is_symmetric() {
        let rules = Breakthrough::standard();
        let board = rules.new_board();
        assert_eq!(rules.evaluate(&board, p(0)), 0.0);
        assert_eq!(rules.evaluate(&board, p(1)), 0.0);
    }
}
