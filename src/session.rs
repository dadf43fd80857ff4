//! Interactive session.
//!
//! A `Session` owns the one authoritative board. Moves reach it only
//! through [`Session::apply_confirmed`], whether they come from a player,
//! a replay or a robot. Searches work on a clone and hand back a single
//! move, which then goes through the same confirmed path.

use im::Vector;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::board::{Board, BoardSnapshot};
use crate::core::{EngineError, EngineResult};
use crate::games;
use crate::moves::{Move, MoveOp};
use crate::rules::{self, Applied, Rules};
use crate::search::{SearchStrategy, StrategyLevel};

/// One confirmed move and the digest of the board after it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub mv: Move,
    pub digest: u64,
    pub move_number: u32,
}

/// How often each position has been reached at the start of a turn.
///
/// Keyed by `Board::position_digest`, which leaves the move counter out so
/// that a repeated position matches its earlier occurrence.
#[derive(Clone, Debug, Default)]
pub struct RepetitionTable {
    counts: FxHashMap<u64, u32>,
}

impl RepetitionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one more occurrence; returns the new count.
    pub fn record(&mut self, digest: u64) -> u32 {
        let count = self.counts.entry(digest).or_insert(0);
        *count += 1;
        *count
    }

    #[must_use]
    pub fn count(&self, digest: u64) -> u32 {
        self.counts.get(&digest).copied().unwrap_or(0)
    }

    pub fn clear(&mut self) {
        self.counts.clear();
    }

    /// Distinct positions seen.
    #[must_use]
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

#[derive(Serialize, Deserialize)]
struct SessionSnapshot {
    variant: String,
    board: BoardSnapshot,
    history: Vec<HistoryEntry>,
    repetitions: Vec<(u64, u32)>,
}

/// A game in progress.
pub struct Session<R: Rules> {
    rules: R,
    board: Board,
    history: Vector<HistoryEntry>,
    repetitions: RepetitionTable,
    strategy: SearchStrategy,
}

impl Session<Box<dyn Rules>> {
    /// Session for a variant name, as accepted by `games::create`.
    pub fn for_variant(variant: &str) -> EngineResult<Self> {
        Ok(Self::new(games::create(variant)?))
    }
}

impl<R: Rules> Session<R> {
    /// New game in the variant's initial position, played by `smartbot`.
    pub fn new(rules: R) -> Self {
        let board = rules.new_board();
        let mut repetitions = RepetitionTable::new();
        repetitions.record(board.position_digest());
        Self {
            rules,
            board,
            history: Vector::new(),
            repetitions,
            strategy: StrategyLevel::Smartbot.strategy(),
        }
    }

    pub fn with_strategy(mut self, strategy: impl Into<SearchStrategy>) -> Self {
        self.strategy = strategy.into();
        self
    }

    pub fn set_strategy(&mut self, strategy: impl Into<SearchStrategy>) {
        self.strategy = strategy.into();
    }

    #[must_use]
    pub fn rules(&self) -> &R {
        &self.rules
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn history(&self) -> &Vector<HistoryEntry> {
        &self.history
    }

    #[must_use]
    pub fn repetitions(&self) -> &RepetitionTable {
        &self.repetitions
    }

    #[must_use]
    pub fn strategy(&self) -> &SearchStrategy {
        &self.strategy
    }

    /// Moves the player to move may make now.
    #[must_use]
    pub fn legal_moves(&self) -> Vec<Move> {
        rules::legal_moves(&self.rules, &self.board)
    }

    /// Digest of the authoritative board.
    #[must_use]
    pub fn digest(&self) -> u64 {
        self.board.digest()
    }

    /// Times the current position has started a turn.
    ///
    /// The session only counts. Claiming a draw, or steering a robot away
    /// from a repeated position, is up to the caller.
    #[must_use]
    pub fn repetition_count(&self) -> u32 {
        self.repetitions.count(self.board.position_digest())
    }

    /// Times the position reached by the complete move `mv` has already
    /// started a turn. Zero for a new position.
    ///
    /// The move is tried on a clone, so illegal moves fail as they would in
    /// search and the session is never touched.
    pub fn repetitions_after(&self, mv: &Move) -> EngineResult<u32> {
        let mut board = self.board.clone();
        rules::apply(&self.rules, &mut board, mv)?;
        Ok(self.repetitions.count(board.position_digest()))
    }

    /// Apply a confirmed move to the authoritative board.
    ///
    /// Rejected moves leave the board and history untouched.
    pub fn apply_confirmed(&mut self, mv: &Move) -> EngineResult<Applied> {
        let applied = rules::apply_confirmed(&self.rules, &mut self.board, mv)?;

        if matches!(mv.op, MoveOp::Start | MoveOp::Edit) {
            self.repetitions.clear();
        }
        if applied.completed_turn || mv.op == MoveOp::Start {
            self.repetitions.record(self.board.position_digest());
        }
        self.history.push_back(HistoryEntry {
            mv: *mv,
            digest: self.board.digest(),
            move_number: self.board.move_number,
        });
        Ok(applied)
    }

    /// Parse and apply a move in text form.
    pub fn apply_text(&mut self, text: &str) -> EngineResult<Applied> {
        let mv: Move = text.parse()?;
        self.apply_confirmed(&mv)
    }

    /// Best move for the player to move under the session's strategy.
    pub fn find_best_move(&self) -> EngineResult<Option<Move>> {
        self.strategy.find_best_move(&self.rules, &self.board)
    }

    /// Search, then play the chosen move and confirm it.
    ///
    /// Returns the move played, `None` if there was nothing to play.
    pub fn play_robot_move(&mut self) -> EngineResult<Option<Move>> {
        let Some(mv) = self.find_best_move()? else {
            return Ok(None);
        };
        let applied = self.apply_confirmed(&mv)?;
        if applied.phase.is_done_state() && !applied.completed_turn {
            self.apply_confirmed(&Move::done(mv.player))?;
        }
        debug!(mv = %mv, move_number = self.board.move_number, "robot moved");
        Ok(Some(mv))
    }

    /// Serialize the board, history and repetition counts.
    pub fn snapshot(&self) -> EngineResult<Vec<u8>> {
        let snap = SessionSnapshot {
            variant: self.rules.variant().to_string(),
            board: self.board.snapshot(),
            history: self.history.iter().cloned().collect(),
            repetitions: self
                .repetitions
                .counts
                .iter()
                .map(|(&d, &n)| (d, n))
                .collect(),
        };
        bincode::serialize(&snap).map_err(|e| EngineError::Snapshot(e.to_string()))
    }

    /// Replace the session state with a snapshot of the same variant.
    pub fn restore(&mut self, bytes: &[u8]) -> EngineResult<()> {
        let snap: SessionSnapshot =
            bincode::deserialize(bytes).map_err(|e| EngineError::Snapshot(e.to_string()))?;
        if snap.variant != self.rules.variant() {
            return Err(EngineError::Snapshot(format!(
                "snapshot is for {}, not {}",
                snap.variant,
                self.rules.variant()
            )));
        }

        let mut board = self.rules.new_board();
        board.restore(snap.board)?;
        self.board = board;
        self.history = snap.history.into_iter().collect();
        self.repetitions.counts = snap.repetitions.into_iter().collect();
        Ok(())
    }
}
