//! Mutable board state.
//!
//! `Board` owns every piece of game data: cell stacks, per-player pool
//! slots, the phase, turn and move counter, and the pending-action stacks of
//! a move that has been placed but not accepted. Chips only ever move
//! between stacks (or into the hand), never appear or vanish, so the census
//! of a board is constant for its lifetime.
//!
//! The cell graph and chip catalog are shared by `Arc`; cloning a board for
//! search copies only the mutable parts.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::sync::Arc;

use super::chips::{ChipCatalog, ChipId};
use super::digest::{Digester, StackOrder, DIGEST_SEED};
use super::graph::{CellGraph, CellId};
use super::location::Location;
use super::pending::{Capture, DropRecord, Pending, PickRecord};
use super::phase::Phase;
use crate::core::{EngineError, EngineResult, PlayerId, PlayerMap};
use crate::rules::GameResult;

/// Stack of chips; the last element is the top.
pub type ChipStack = SmallVec<[ChipId; 4]>;

/// One slot of a player's pool.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PoolSlot {
    pub chips: ChipStack,
    /// Whether the slot's order is part of the position.
    pub order: StackOrder,
}

/// The full mutable state of one game.
#[derive(Clone, Debug)]
pub struct Board {
    graph: Arc<CellGraph>,
    catalog: Arc<ChipCatalog>,
    player_count: usize,

    // === Contents ===
    cells: Vec<ChipStack>,
    pools: PlayerMap<Vec<PoolSlot>>,

    // === Progression ===
    /// Current phase.
    pub phase: Phase,

    /// Player to move.
    pub turn: PlayerId,

    /// Completed turns plus one.
    pub move_number: u32,

    /// Set only in `GameOver`.
    pub win: PlayerMap<bool>,

    /// Phase to return to if a resignation is withdrawn.
    pub unresign: Option<Phase>,

    // === Scratch ===
    pending: Pending,

    /// Outstanding search applies. Not part of the position.
    pub search_depth: u32,
}

impl Board {
    /// Empty board in `Play` with player 0 to move.
    ///
    /// Every player gets one pool slot per entry of `pool_layout`.
    #[must_use]
    pub fn new(
        graph: Arc<CellGraph>,
        catalog: Arc<ChipCatalog>,
        player_count: usize,
        pool_layout: &[StackOrder],
    ) -> Self {
        let cells = vec![ChipStack::new(); graph.len()];
        let pools = PlayerMap::new(player_count, |_| {
            pool_layout
                .iter()
                .map(|&order| PoolSlot {
                    chips: ChipStack::new(),
                    order,
                })
                .collect()
        });

        Self {
            graph,
            catalog,
            player_count,
            cells,
            pools,
            phase: Phase::Play,
            turn: PlayerId::new(0),
            move_number: 1,
            win: PlayerMap::with_value(player_count, false),
            unresign: None,
            pending: Pending::default(),
            search_depth: 0,
        }
    }

    #[must_use]
    pub fn graph(&self) -> &CellGraph {
        &self.graph
    }

    #[must_use]
    pub fn catalog(&self) -> &ChipCatalog {
        &self.catalog
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.player_count
    }

    #[must_use]
    pub fn pending(&self) -> &Pending {
        &self.pending
    }

    /// Chip in hand.
    #[must_use]
    pub fn picked(&self) -> Option<ChipId> {
        self.pending.picked
    }

    // === Addressing ===

    /// Location of a graph cell.
    #[must_use]
    pub fn cell_location(&self, cell: CellId) -> Location {
        let (col, row) = self.graph.coords(cell);
        Location::cell(col, row)
    }

    /// Graph cell of a location, `None` for pools and off-board cells.
    #[must_use]
    pub fn cell_id(&self, loc: Location) -> Option<CellId> {
        match loc {
            Location::Cell { col, row } => self.graph.cell_at(col, row),
            Location::Pool { .. } => None,
        }
    }

    /// Whether `loc` exists on this board.
    #[must_use]
    pub fn contains(&self, loc: Location) -> bool {
        self.stack(loc).is_ok()
    }

    /// Contents of a location, bottom first.
    pub fn stack(&self, loc: Location) -> EngineResult<&[ChipId]> {
        match loc {
            Location::Cell { col, row } => self
                .graph
                .cell_at(col, row)
                .map(|c| self.cells[c.index()].as_slice()),
            Location::Pool { player, slot } => self
                .pool_slot(player, slot)
                .map(|s| s.chips.as_slice()),
        }
        .ok_or(EngineError::NoSuchLocation(loc))
    }

    fn stack_mut(&mut self, loc: Location) -> EngineResult<&mut ChipStack> {
        match loc {
            Location::Cell { col, row } => match self.graph.cell_at(col, row) {
                Some(c) => Ok(&mut self.cells[c.index()]),
                None => Err(EngineError::NoSuchLocation(loc)),
            },
            Location::Pool { player, slot } => {
                if player.index() >= self.player_count {
                    return Err(EngineError::NoSuchLocation(loc));
                }
                self.pools[player]
                    .get_mut(slot as usize)
                    .map(|s| &mut s.chips)
                    .ok_or(EngineError::NoSuchLocation(loc))
            }
        }
    }

    /// Top chip of a location; `None` when empty or off the board.
    #[must_use]
    pub fn top(&self, loc: Location) -> Option<ChipId> {
        self.stack(loc).ok().and_then(|s| s.last().copied())
    }

    /// Top chip of a cell.
    #[must_use]
    pub fn top_of(&self, cell: CellId) -> Option<ChipId> {
        self.cells[cell.index()].last().copied()
    }

    #[must_use]
    pub fn pool_slot(&self, player: PlayerId, slot: u8) -> Option<&PoolSlot> {
        if player.index() >= self.player_count {
            return None;
        }
        self.pools[player].get(slot as usize)
    }

    /// Pool slots of a player.
    #[must_use]
    pub fn pool(&self, player: PlayerId) -> &[PoolSlot] {
        &self.pools[player]
    }

    // === Setup ===

    /// Place a chip without recording it. For building positions.
    pub fn push_chip(&mut self, loc: Location, chip: ChipId) -> EngineResult<()> {
        self.stack_mut(loc)?.push(chip);
        Ok(())
    }

    /// Remove a top chip without recording it. For building positions.
    pub fn take_chip(&mut self, loc: Location) -> EngineResult<ChipId> {
        self.stack_mut(loc)?
            .pop()
            .ok_or(EngineError::EmptySource(loc))
    }

    /// Move a top chip between locations without recording it.
    pub fn shift_chip(&mut self, from: Location, to: Location) -> EngineResult<()> {
        self.stack_mut(to)?;
        let chip = self.take_chip(from)?;
        self.push_chip(to, chip)
    }

    // === Pending-action primitives ===

    /// Lift the top chip of `from` into the hand.
    pub fn pick(&mut self, from: Location) -> EngineResult<ChipId> {
        if self.pending.picked.is_some() {
            return Err(EngineError::AlreadyPicked);
        }
        let chip = self
            .stack_mut(from)?
            .pop()
            .ok_or(EngineError::EmptySource(from))?;
        self.pending.picked = Some(chip);
        self.pending.picks.push(PickRecord { from, chip });
        Ok(chip)
    }

    /// Move the top chip of `from` to `to` as part of the carried move.
    /// The capture is attached to the next drop.
    pub fn capture(&mut self, from: Location, to: Location) -> EngineResult<ChipId> {
        self.stack_mut(to)?;
        let chip = self
            .stack_mut(from)?
            .pop()
            .ok_or(EngineError::EmptySource(from))?;
        self.stack_mut(to)?.push(chip);
        self.pending.staged.push(Capture { chip, from, to });
        Ok(chip)
    }

    /// Put the chip in hand on `to`.
    pub fn drop(&mut self, to: Location) -> EngineResult<()> {
        let chip = self.pending.picked.ok_or(EngineError::NothingPicked)?;
        self.stack_mut(to)?.push(chip);
        self.pending.picked = None;
        let captures = std::mem::take(&mut self.pending.staged);
        self.pending.drops.push(DropRecord { to, captures });
        Ok(())
    }

    /// Return the chip in hand to where it was picked.
    pub fn unpick(&mut self) -> EngineResult<()> {
        let chip = self.pending.picked.ok_or(EngineError::NothingPicked)?;
        while let Some(capture) = self.pending.staged.pop() {
            self.reverse_capture(capture)?;
        }
        let record = self
            .pending
            .picks
            .pop()
            .ok_or(EngineError::StateMismatch("pending picks"))?;
        if record.chip != chip {
            return Err(EngineError::StateMismatch("pending picks"));
        }
        self.stack_mut(record.from)?.push(chip);
        self.pending.picked = None;
        Ok(())
    }

    /// Lift the most recent drop back into the hand, restoring its captures.
    pub fn undrop(&mut self) -> EngineResult<()> {
        if self.pending.picked.is_some() {
            return Err(EngineError::AlreadyPicked);
        }
        let record = self.pending.drops.pop().ok_or(EngineError::NothingPicked)?;
        let chip = self
            .stack_mut(record.to)?
            .pop()
            .ok_or(EngineError::EmptySource(record.to))?;
        if self.pending.picks.last().map(|p| p.chip) != Some(chip) {
            return Err(EngineError::StateMismatch("pending drops"));
        }
        for capture in record.captures.into_iter().rev() {
            self.reverse_capture(capture)?;
        }
        self.pending.picked = Some(chip);
        Ok(())
    }

    fn reverse_capture(&mut self, capture: Capture) -> EngineResult<()> {
        let chip = self
            .stack_mut(capture.to)?
            .pop()
            .ok_or(EngineError::EmptySource(capture.to))?;
        if chip != capture.chip {
            return Err(EngineError::StateMismatch("captured chip"));
        }
        self.stack_mut(capture.from)?.push(chip);
        Ok(())
    }

    /// Undo every pending drop and pick, newest first.
    pub fn unwind_pending(&mut self) -> EngineResult<()> {
        loop {
            if self.pending.picked.is_some() {
                self.unpick()?;
            } else if !self.pending.drops.is_empty() {
                self.undrop()?;
            } else {
                break;
            }
        }
        if !self.pending.is_empty() {
            return Err(EngineError::StateMismatch("pending stacks"));
        }
        Ok(())
    }

    /// Re-perform a recorded gesture sequence on a board with nothing
    /// pending. The result has pending stacks equal to `record`.
    pub fn replay_pending(&mut self, record: &Pending) -> EngineResult<()> {
        if !self.pending.is_empty() {
            return Err(EngineError::StateMismatch("pending stacks"));
        }
        for (i, pick) in record.picks.iter().enumerate() {
            if self.pick(pick.from)? != pick.chip {
                return Err(EngineError::StateMismatch("replayed pick"));
            }
            let captures = match record.drops.get(i) {
                Some(d) => &d.captures,
                None => &record.staged,
            };
            for c in captures {
                self.capture(c.from, c.to)?;
            }
            if let Some(d) = record.drops.get(i) {
                self.drop(d.to)?;
            }
        }
        if self.pending != *record {
            return Err(EngineError::StateMismatch("replayed pending stacks"));
        }
        Ok(())
    }

    /// Commit the placed move: forget the pending stacks.
    pub fn accept_placement(&mut self) {
        self.pending = Pending::default();
    }

    /// Replace the pending stacks wholesale. Callers must keep them
    /// consistent with the chip positions.
    pub(crate) fn set_pending(&mut self, pending: Pending) {
        self.pending = pending;
    }

    // === Outcome ===

    /// End the game; `winner` of `None` is a draw.
    pub fn set_game_over(&mut self, winner: Option<PlayerId>) {
        self.phase = Phase::GameOver;
        self.win.fill(false);
        if let Some(p) = winner {
            self.win[p] = true;
        }
    }

    /// Result once the game is over.
    #[must_use]
    pub fn result(&self) -> Option<GameResult> {
        if !self.phase.is_game_over() {
            return None;
        }
        let winners: Vec<PlayerId> = self
            .win
            .iter()
            .filter(|(_, w)| **w)
            .map(|(p, _)| p)
            .collect();
        Some(match winners.len() {
            0 => GameResult::Draw,
            1 => GameResult::Winner(winners[0]),
            _ => GameResult::Winners(winners),
        })
    }

    // === Identity ===

    /// Count of every chip over cells, pools and hand.
    #[must_use]
    pub fn census(&self) -> FxHashMap<ChipId, usize> {
        let mut counts = FxHashMap::default();
        let pooled = self
            .pools
            .values()
            .flat_map(|slots| slots.iter().flat_map(|s| s.chips.iter()));
        for &chip in self
            .cells
            .iter()
            .flat_map(|s| s.iter())
            .chain(pooled)
            .chain(self.pending.picked.iter())
        {
            *counts.entry(chip).or_insert(0) += 1;
        }
        counts
    }

    /// Fingerprint of the exact state, move counter included.
    #[must_use]
    pub fn digest(&self) -> u64 {
        let mut d = self.position_digester();
        d.word(self.move_number as u64);
        d.finish()
    }

    /// Fingerprint without the move counter, for repetition bookkeeping.
    #[must_use]
    pub fn position_digest(&self) -> u64 {
        self.position_digester().finish()
    }

    fn position_digester(&self) -> Digester {
        let mut d = Digester::new(DIGEST_SEED);
        for stack in &self.cells {
            d.stack(stack, StackOrder::Ordered);
        }
        for slots in self.pools.values() {
            for slot in slots {
                d.stack(&slot.chips, slot.order);
            }
        }
        d.chip(self.pending.picked);
        d.word(pick_stack_word(&self.pending.picks));
        d.word(drop_stack_word(&self.pending.drops, &self.pending.staged));
        d.word(self.phase.ordinal() << 8 | self.turn.0 as u64);
        let wins = self
            .win
            .iter()
            .filter(|(_, w)| **w)
            .fold(0u64, |m, (p, _)| m | 1u64 << p.index());
        let unresign = self.unresign.map_or(0, |p| p.ordinal() + 1);
        d.word(wins | unresign << 32);
        d
    }

    /// Structural comparison, then digest comparison.
    ///
    /// Fails with the first differing part, so a digest that collides
    /// for different contents is still caught.
    pub fn same_board(&self, other: &Board) -> EngineResult<()> {
        let checks: [(&'static str, bool); 10] = [
            ("graph", *self.graph == *other.graph),
            ("player count", self.player_count == other.player_count),
            ("cells", self.cells == other.cells),
            ("pools", self.pools == other.pools),
            ("phase", self.phase == other.phase),
            ("turn", self.turn == other.turn),
            ("move number", self.move_number == other.move_number),
            ("win flags", self.win == other.win),
            ("unresign", self.unresign == other.unresign),
            ("pending stacks", self.pending == other.pending),
        ];
        if let Some((part, _)) = checks.iter().find(|(_, same)| !same) {
            return Err(EngineError::StateMismatch(*part));
        }
        if self.digest() != other.digest() {
            return Err(EngineError::StateMismatch("digest"));
        }
        Ok(())
    }

    // === Snapshots ===

    /// Serializable copy of the mutable state.
    #[must_use]
    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot {
            cells: self.cells.clone(),
            pools: self.pools.clone(),
            phase: self.phase,
            turn: self.turn,
            move_number: self.move_number,
            win: self.win.clone(),
            unresign: self.unresign,
            pending: self.pending.clone(),
        }
    }

    /// Load a snapshot taken from a board of the same shape.
    ///
    /// Snapshots with a different layout, an unknown player or chip, or
    /// pending records off the board are refused and leave `self` unchanged.
    pub fn restore(&mut self, snap: BoardSnapshot) -> EngineResult<()> {
        if snap.cells.len() != self.cells.len() {
            return Err(EngineError::Snapshot("cell count differs".into()));
        }
        let same_pools = snap.pools.player_count() == self.player_count
            && snap
                .pools
                .iter()
                .all(|(p, slots)| slots.len() == self.pools[p].len());
        if !same_pools || snap.win.player_count() != self.player_count {
            return Err(EngineError::Snapshot("pool layout differs".into()));
        }
        if snap.turn.index() >= self.player_count {
            return Err(EngineError::Snapshot(format!("no player {}", snap.turn)));
        }

        let known = |chip: &ChipId| self.catalog.contains(*chip);
        let pending = &snap.pending;
        let chips_known = snap.cells.iter().flatten().all(known)
            && snap
                .pools
                .values()
                .flatten()
                .flat_map(|slot| slot.chips.iter())
                .all(known)
            && pending.picked.iter().all(known)
            && pending.picks.iter().map(|p| &p.chip).all(known)
            && pending.captures().map(|c| &c.chip).all(known);
        if !chips_known {
            return Err(EngineError::Snapshot("unknown chip id".into()));
        }

        let on_board = |loc: Location| self.contains(loc);
        let pending_on_board = pending.picks.iter().all(|p| on_board(p.from))
            && pending.drops.iter().all(|d| on_board(d.to))
            && pending.captures().all(|c| on_board(c.from) && on_board(c.to));
        if !pending_on_board {
            return Err(EngineError::Snapshot("pending move leaves the board".into()));
        }
        self.cells = snap.cells;
        self.pools = snap.pools;
        self.phase = snap.phase;
        self.turn = snap.turn;
        self.move_number = snap.move_number;
        self.win = snap.win;
        self.unresign = snap.unresign;
        self.pending = snap.pending;
        self.search_depth = 0;
        Ok(())
    }
}

/// Mutable part of a board, without the shared graph and catalog.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    pub cells: Vec<ChipStack>,
    pub pools: PlayerMap<Vec<PoolSlot>>,
    pub phase: Phase,
    pub turn: PlayerId,
    pub move_number: u32,
    pub win: PlayerMap<bool>,
    pub unresign: Option<Phase>,
    pub pending: Pending,
}

fn location_word(loc: Location) -> u64 {
    match loc {
        Location::Cell { col, row } => 1u64 << 32 | (col as u64) << 8 | row as u64,
        Location::Pool { player, slot } => 2u64 << 32 | (player.0 as u64) << 8 | slot as u64,
    }
}

fn fold_word(h: u64, w: u64) -> u64 {
    super::digest::mix64(h ^ w)
}

fn pick_stack_word(picks: &[PickRecord]) -> u64 {
    picks.iter().fold(0, |h, p| {
        fold_word(fold_word(h, location_word(p.from)), p.chip.0 as u64 + 1)
    })
}

fn capture_word(h: u64, c: &Capture) -> u64 {
    let h = fold_word(h, c.chip.0 as u64 + 1);
    fold_word(fold_word(h, location_word(c.from)), location_word(c.to))
}

fn drop_stack_word(drops: &[DropRecord], staged: &[Capture]) -> u64 {
    let h = drops.iter().fold(0, |h, d| {
        d.captures
            .iter()
            .fold(fold_word(h, location_word(d.to)), capture_word)
    });
    staged.iter().fold(h, capture_word)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Geometry;

    fn fixture() -> (Board, ChipId, ChipId) {
        let mut catalog = ChipCatalog::new();
        let white = catalog.register("white", Some(PlayerId::new(0)), 1);
        let black = catalog.register("black", Some(PlayerId::new(1)), 1);
        let board = Board::new(
            Arc::new(CellGraph::new(Geometry::Octagonal, 3, 3)),
            Arc::new(catalog),
            2,
            &[StackOrder::Unordered],
        );
        (board, white, black)
    }

    #[test]
    fn test_pick_drop_unwind() {
        let (mut board, white, black) = fixture();
        let a1 = Location::cell(0, 0);
        let b2 = Location::cell(1, 1);
        let prison = Location::pool(PlayerId::new(0), 0);
        board.push_chip(a1, white).unwrap();
        board.push_chip(b2, black).unwrap();
        let before = board.clone();

        board.pick(a1).unwrap();
        board.capture(b2, prison).unwrap();
        board.drop(b2).unwrap();
        assert_eq!(board.top(b2), Some(white));
        assert_eq!(board.top(prison), Some(black));
        assert_eq!(board.pending().last_drop(), Some(b2));

        board.unwind_pending().unwrap();
        board.same_board(&before).unwrap();
    }

    #[test]
    fn test_replay_reproduces_pending() {
        let (mut board, white, black) = fixture();
        let a1 = Location::cell(0, 0);
        let b2 = Location::cell(1, 1);
        let prison = Location::pool(PlayerId::new(0), 0);
        board.push_chip(a1, white).unwrap();
        board.push_chip(b2, black).unwrap();

        board.pick(a1).unwrap();
        board.capture(b2, prison).unwrap();
        board.drop(b2).unwrap();
        let placed = board.clone();
        let record = board.pending().clone();

        board.unwind_pending().unwrap();
        board.replay_pending(&record).unwrap();
        board.same_board(&placed).unwrap();
    }

    #[test]
    fn test_primitive_errors() {
        let (mut board, white, _) = fixture();
        let a1 = Location::cell(0, 0);
        assert_eq!(board.pick(a1), Err(EngineError::EmptySource(a1)));
        assert_eq!(board.drop(a1), Err(EngineError::NothingPicked));

        board.push_chip(a1, white).unwrap();
        board.push_chip(a1, white).unwrap();
        board.pick(a1).unwrap();
        assert_eq!(board.pick(a1), Err(EngineError::AlreadyPicked));

        let off = Location::cell(5, 5);
        assert_eq!(board.drop(off), Err(EngineError::NoSuchLocation(off)));
        assert!(board.picked().is_some());
    }

    #[test]
    fn test_digest_tracks_contents_turn_and_hand() {
        let (mut board, white, _) = fixture();
        let a1 = Location::cell(0, 0);
        let empty = board.digest();
        assert_eq!(empty, board.digest());

        board.push_chip(a1, white).unwrap();
        let placed = board.digest();
        assert_ne!(placed, empty);

        board.pick(a1).unwrap();
        assert_ne!(board.digest(), placed);
        assert_ne!(board.digest(), empty);
        board.unpick().unwrap();
        assert_eq!(board.digest(), placed);

        board.turn = PlayerId::new(1);
        assert_ne!(board.digest(), placed);
    }

    #[test]
    fn test_position_digest_ignores_move_number() {
        let (mut board, _, _) = fixture();
        let position = board.position_digest();
        let full = board.digest();
        board.move_number += 2;
        assert_eq!(board.position_digest(), position);
        assert_ne!(board.digest(), full);
    }

    #[test]
    fn test_unordered_pool_reorder_is_same_digest() {
        let (mut board, white, black) = fixture();
        let pool = Location::pool(PlayerId::new(1), 0);
        let mut other = board.clone();

        board.push_chip(pool, white).unwrap();
        board.push_chip(pool, black).unwrap();
        other.push_chip(pool, black).unwrap();
        other.push_chip(pool, white).unwrap();

        assert_eq!(board.digest(), other.digest());
        assert_eq!(board.census(), other.census());
    }

    #[test]
    fn test_same_board_reports_difference() {
        let (board, white, _) = fixture();
        let mut other = board.clone();
        other.push_chip(Location::cell(2, 2), white).unwrap();
        assert_eq!(
            board.same_board(&other),
            Err(EngineError::StateMismatch("cells"))
        );
    }

    #[test]
    fn test_snapshot_restore() {
        let (mut board, white, _) = fixture();
        board.push_chip(Location::cell(1, 0), white).unwrap();
        board.move_number = 7;
        let snap = board.snapshot();

        let (mut fresh, _, _) = fixture();
        fresh.restore(snap).unwrap();
        fresh.same_board(&board).unwrap();
    }

    #[test]
    fn test_restore_refuses_foreign_chips() {
        let (mut board, white, _) = fixture();
        board.push_chip(Location::cell(1, 0), white).unwrap();
        let before = board.clone();

        let mut snap = board.snapshot();
        snap.cells[0].push(ChipId(999));
        assert!(matches!(board.restore(snap), Err(EngineError::Snapshot(_))));

        let mut snap = board.snapshot();
        snap.pools[PlayerId::new(1)][0].chips.push(ChipId(2));
        assert!(matches!(board.restore(snap), Err(EngineError::Snapshot(_))));

        let mut snap = board.snapshot();
        snap.pending.picked = Some(ChipId(7));
        assert!(matches!(board.restore(snap), Err(EngineError::Snapshot(_))));

        let mut snap = board.snapshot();
        snap.turn = PlayerId::new(5);
        assert!(matches!(board.restore(snap), Err(EngineError::Snapshot(_))));

        board.same_board(&before).unwrap();
    }

    #[test]
    fn test_result_requires_game_over() {
        let (mut board, _, _) = fixture();
        assert_eq!(board.result(), None);
        board.set_game_over(Some(PlayerId::new(1)));
        assert_eq!(board.result(), Some(GameResult::Winner(PlayerId::new(1))));
        board.set_game_over(None);
        assert_eq!(board.result(), Some(GameResult::Draw));
    }
}
