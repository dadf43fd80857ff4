//! Gobblet Gobblers.
//!
//! Three-by-three board, two players, each with two pieces of each of three
//! sizes waiting in their pool. A piece is placed from the pool or moved on
//! the board onto an empty cell or onto a strictly smaller piece, which it
//! covers. Three visible pieces of one colour in a line win.
//!
//! Lifting a piece that uncovers an opponent line obliges the mover to
//! cover a cell of that line with the lifted piece; if no such cell is
//! available the piece cannot be lifted.
//!
//! Pool slots are indexed by size and hashed unordered, so which of two
//! identical pieces was taken never matters to the digest.

use std::sync::Arc;

use crate::board::{Board, CellGraph, ChipCatalog, ChipId, Geometry, Location, StackOrder};
use crate::core::PlayerId;
use crate::moves::Move;
use crate::rules::Rules;

pub const SIZES: u8 = 3;
pub const PIECES_PER_SIZE: usize = 2;

const LINES: [[(u8, u8); 3]; 8] = [
    [(0, 0), (1, 0), (2, 0)],
    [(0, 1), (1, 1), (2, 1)],
    [(0, 2), (1, 2), (2, 2)],
    [(0, 0), (0, 1), (0, 2)],
    [(1, 0), (1, 1), (1, 2)],
    [(2, 0), (2, 1), (2, 2)],
    [(0, 0), (1, 1), (2, 2)],
    [(2, 0), (1, 1), (0, 2)],
];

/// Gobblet Gobblers rules.
#[derive(Clone, Debug)]
pub struct Gobblet {
    graph: Arc<CellGraph>,
    catalog: Arc<ChipCatalog>,
    /// `pieces[player][size - 1]`
    pieces: [[ChipId; SIZES as usize]; 2],
}

impl Default for Gobblet {
    fn default() -> Self {
        Self::new()
    }
}

impl Gobblet {
    #[must_use]
    pub fn new() -> Self {
        let mut catalog = ChipCatalog::new();
        let mut pieces = [[ChipId(0); SIZES as usize]; 2];
        for (player, colour) in ["orange", "blue"].iter().enumerate() {
            for size in 1..=SIZES {
                pieces[player][size as usize - 1] = catalog.register(
                    format!("{colour} size {size}"),
                    Some(PlayerId::new(player as u8)),
                    size,
                );
            }
        }

        Self {
            graph: Arc::new(CellGraph::new(Geometry::Octagonal, 3, 3)),
            catalog: Arc::new(catalog),
            pieces,
        }
    }

    /// Piece of a player and size.
    ///
    /// # Panics
    ///
    /// Panics unless `size` is 1 to 3 and `player` is 0 or 1.
    #[must_use]
    pub fn piece(&self, player: PlayerId, size: u8) -> ChipId {
        assert!((1..=SIZES).contains(&size), "gobblet sizes are 1 to {SIZES}");
        self.pieces[player.index()][size as usize - 1]
    }

    /// Pool slot holding a player's pieces of `size`.
    ///
    /// # Panics
    ///
    /// Panics unless `size` is 1 to 3.
    #[must_use]
    pub fn reserve(player: PlayerId, size: u8) -> Location {
        assert!((1..=SIZES).contains(&size), "gobblet sizes are 1 to {SIZES}");
        Location::pool(player, size - 1)
    }

    /// Board with empty cells and empty pools, for building positions.
    #[must_use]
    pub fn empty_board(&self) -> Board {
        Board::new(
            Arc::clone(&self.graph),
            Arc::clone(&self.catalog),
            2,
            &[StackOrder::Unordered; SIZES as usize],
        )
    }

    fn can_cover(&self, board: &Board, size: u8, to: Location) -> bool {
        board
            .top(to)
            .map_or(true, |top| self.catalog.rank(top) < size)
    }

    fn visible_owner(&self, board: &Board, col: u8, row: u8) -> Option<PlayerId> {
        board
            .top(Location::cell(col, row))
            .and_then(|c| self.catalog.owner(c))
    }

    fn winning_line(&self, board: &Board, player: PlayerId) -> Option<[(u8, u8); 3]> {
        LINES.into_iter().find(|line| {
            line.iter()
                .all(|&(c, r)| self.visible_owner(board, c, r) == Some(player))
        })
    }
}

impl Rules for Gobblet {
    fn variant(&self) -> &str {
        "gobblet"
    }

    fn new_board(&self) -> Board {
        let mut board = self.empty_board();
        for player in PlayerId::all(2) {
            for size in 1..=SIZES {
                for _ in 0..PIECES_PER_SIZE {
                    let placed = board.push_chip(Self::reserve(player, size), self.piece(player, size));
                    debug_assert!(placed.is_ok());
                }
            }
        }
        board
    }

    fn generate(&self, board: &Board) -> Vec<Move> {
        let player = board.turn;
        let opponent = player.next(2);
        let cells: Vec<Location> = board
            .graph()
            .cells()
            .map(|c| board.cell_location(c))
            .collect();
        let mut moves = Vec::new();

        for size in 1..=SIZES {
            let reserve = Self::reserve(player, size);
            if board.top(reserve).is_none() {
                continue;
            }
            for &to in &cells {
                if self.can_cover(board, size, to) {
                    moves.push(Move::step(player, reserve, to));
                }
            }
        }

        for &from in &cells {
            let Some(chip) = board.top(from) else {
                continue;
            };
            if self.catalog.owner(chip) != Some(player) {
                continue;
            }
            let size = self.catalog.rank(chip);

            let mut lifted = board.clone();
            if lifted.take_chip(from).is_err() {
                continue;
            }
            let targets: Vec<Location> = match self.winning_line(&lifted, opponent) {
                Some(line) => line.iter().map(|&(c, r)| Location::cell(c, r)).collect(),
                None => cells.clone(),
            };
            for to in targets {
                if to != from && self.can_cover(&lifted, size, to) {
                    moves.push(Move::step(player, from, to));
                }
            }
        }
        moves
    }

    /// The mover's line takes precedence over a line it uncovered.
    fn winner(&self, board: &Board) -> Option<PlayerId> {
        let mover = board.turn;
        [mover, mover.next(2)]
            .into_iter()
            .find(|&p| self.winning_line(board, p).is_some())
    }

    fn evaluate(&self, board: &Board, player: PlayerId) -> f64 {
        let mut score = 0.0;
        for line in LINES {
            let mut mine = 0;
            let mut theirs = 0;
            for (c, r) in line {
                match self.visible_owner(board, c, r) {
                    Some(owner) if owner == player => mine += 1,
                    Some(_) => theirs += 1,
                    None => {}
                }
            }
            if theirs == 0 {
                score += f64::from(mine * mine);
            }
            if mine == 0 {
                score -= f64::from(theirs * theirs);
            }
        }
        score
    }

    fn order_hint(&self, board: &Board, mv: &Move) -> i32 {
        let Some(Location::Cell { col, row }) = mv.to else {
            return 0;
        };
        let centre = if (col, row) == (1, 1) { 2 } else { 0 };
        let covers = match board.top(Location::cell(col, row)) {
            Some(c) if self.catalog.owner(c) != Some(mv.player) => 3,
            _ => 0,
        };
        centre + covers
    }
}
