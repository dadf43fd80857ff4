//! Depth-limited alpha-beta search.
//!
//! Minimax with alpha-beta bounds, scored throughout from the view of the
//! player to move at the root, on one private clone of the board. Every
//! node applies a move, recurses and unapplies it again, so the clone is
//! back at the root position whenever the search returns.
//!
//! Iterative deepening runs depths `1..=max_depth`, reordering the root
//! moves by the previous iteration's scores. When a budget runs out the
//! last fully searched depth decides; if none finished, the root moves
//! scored so far do.

use std::time::Instant;

use tracing::{debug, warn};

use super::config::AlphaBetaConfig;
use super::ordering::order_moves;
use super::stats::{SearchStats, StopReason};
use crate::board::Board;
use crate::core::{EngineError, EngineResult, GameRng, PlayerId};
use crate::moves::Move;
use crate::rules::{apply_generated, legal_moves, unapply, GameResult, Rules};

/// Score of a won position, before the tie-break term.
pub const WIN: f64 = 10_000.0;

/// Nodes between wall-clock checks.
const CLOCK_INTERVAL: u64 = 256;

/// Score of `board` for `player`, `ply` moves below the root.
///
/// A finished game scores `WIN + 1/(1+ply)` for the winner and the negation
/// for everyone else, so a quicker win always beats a slower one. Anything
/// else is the game's static evaluation, which must lie strictly inside
/// `(-WIN, WIN)`.
pub fn static_score<R: Rules + ?Sized>(
    rules: &R,
    board: &Board,
    player: PlayerId,
    ply: u32,
) -> EngineResult<f64> {
    if let Some(result) = board.result() {
        let win = WIN + 1.0 / (1.0 + ply as f64);
        return Ok(match result {
            GameResult::Draw => 0.0,
            r if r.is_winner(player) => win,
            _ => -win,
        });
    }
    let score = rules.evaluate(board, player);
    if score.is_nan() || score.abs() >= WIN {
        return Err(EngineError::EvaluationRange(score));
    }
    Ok(score)
}

/// Alpha-beta search context.
pub struct AlphaBeta<'r, R: Rules + ?Sized> {
    rules: &'r R,
    config: AlphaBetaConfig,
    rng: GameRng,
    stats: SearchStats,
    root_player: PlayerId,
    start: Instant,
    stop: Option<StopReason>,
}

impl<'r, R: Rules + ?Sized> AlphaBeta<'r, R> {
    pub fn new(rules: &'r R, config: AlphaBetaConfig) -> Self {
        Self {
            rules,
            rng: GameRng::new(config.seed),
            config,
            stats: SearchStats::default(),
            root_player: PlayerId::new(0),
            start: Instant::now(),
            stop: None,
        }
    }

    #[must_use]
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    #[must_use]
    pub fn config(&self) -> &AlphaBetaConfig {
        &self.config
    }

    /// Best move for the player to move, `None` when nothing can be played.
    pub fn search(&mut self, board: &Board) -> EngineResult<Option<Move>> {
        Ok(self.search_scored(board)?.map(|(mv, _)| mv))
    }

    /// Best move with its score from the mover's view.
    pub fn search_scored(&mut self, board: &Board) -> EngineResult<Option<(Move, f64)>> {
        self.stats.reset();
        self.start = Instant::now();
        self.stop = None;
        self.root_player = board.turn;

        let mut scratch = board.clone();
        scratch.search_depth = 0;

        let mut moves = legal_moves(self.rules, &scratch);
        if moves.is_empty() {
            return Ok(None);
        }
        if moves.len() == 1 {
            self.stats.stopped_by = StopReason::SingleChoice;
            return Ok(Some((moves[0], 0.0)));
        }
        order_moves(self.rules, &scratch, &mut moves);

        let randomize = self.config.randomize_at(board.move_number).cloned();
        let depth = self.config.depth_at(board.move_number);

        #[cfg(debug_assertions)]
        for mv in &moves {
            crate::rules::verify_round_trip(self.rules, &scratch, mv)?;
        }

        let mut settled: Vec<(Move, f64)> = Vec::new();
        for d in 1..=depth {
            let mut scored = Vec::with_capacity(moves.len());
            let mut alpha = f64::NEG_INFINITY;

            for &mv in &moves {
                // Randomized roots need exact scores, so no root bound.
                let floor = if randomize.is_some() {
                    f64::NEG_INFINITY
                } else {
                    alpha
                };
                let undo = apply_generated(self.rules, &mut scratch, &mv)?;
                let value = self.minimax(&mut scratch, d - 1, floor, f64::INFINITY, 1);
                unapply(&mut scratch, &mv, undo)?;
                let value = value?;

                if self.stop.is_some() {
                    break;
                }
                alpha = alpha.max(value);
                scored.push((mv, value));
            }

            if self.stop.is_some() {
                if settled.is_empty() {
                    settled = scored;
                }
                break;
            }

            // Stable: ties keep the previous order.
            scored.sort_by(|a, b| b.1.total_cmp(&a.1));
            moves = scored.iter().map(|&(m, _)| m).collect();
            settled = scored;
            self.stats.completed_depth = d;

            let best = settled[0].1;
            if best >= WIN {
                break;
            }
            if self.config.good_enough.is_some_and(|g| best >= g) {
                self.stop = Some(StopReason::GoodEnough);
                break;
            }
        }

        #[cfg(debug_assertions)]
        scratch.same_board(board)?;

        self.stats.stopped_by = self.stop.unwrap_or(StopReason::Completed);
        self.stats.time_us = self.start.elapsed().as_micros() as u64;
        if self.stats.stopped_by.is_budget() {
            warn!(
                reason = ?self.stats.stopped_by,
                completed_depth = self.stats.completed_depth,
                "alpha-beta budget exhausted, using best move so far"
            );
        }

        let choice = self.choose(&settled, randomize.map(|r| r.tolerance), moves[0]);
        self.stats.best_score = choice.1;
        debug!(
            depth = self.stats.completed_depth,
            nodes = self.stats.nodes,
            cutoffs = self.stats.cutoffs,
            best = %choice.0,
            score = choice.1,
            "alpha-beta search finished"
        );
        Ok(Some(choice))
    }

    /// Best settled move, or with a tolerance one of the near-best chosen
    /// uniformly. Falls back to `first` when nothing was scored.
    fn choose(&mut self, settled: &[(Move, f64)], tolerance: Option<f64>, first: Move) -> (Move, f64) {
        let Some(best) = settled
            .iter()
            .copied()
            .reduce(|a, b| if b.1 > a.1 { b } else { a })
        else {
            return (first, 0.0);
        };
        let Some(tolerance) = tolerance else {
            return best;
        };
        let near: Vec<(Move, f64)> = settled
            .iter()
            .copied()
            .filter(|&(_, v)| v >= best.1 - tolerance)
            .collect();
        near.get(self.rng.gen_index(near.len()))
            .copied()
            .unwrap_or(best)
    }

    fn out_of_budget(&mut self) -> bool {
        if self.stop.is_some() {
            return true;
        }
        if self.config.node_limit > 0 && self.stats.nodes >= self.config.node_limit {
            self.stop = Some(StopReason::Nodes);
        } else if self.stats.nodes % CLOCK_INTERVAL == 0
            && self
                .config
                .time_limit
                .is_some_and(|limit| self.start.elapsed() >= limit)
        {
            self.stop = Some(StopReason::Time);
        }
        self.stop.is_some()
    }

    fn minimax(
        &mut self,
        board: &mut Board,
        depth: u32,
        mut alpha: f64,
        mut beta: f64,
        ply: u32,
    ) -> EngineResult<f64> {
        self.stats.nodes += 1;
        if self.out_of_budget() {
            return Ok(0.0);
        }

        if depth == 0 || board.phase.is_game_over() {
            self.stats.evaluations += 1;
            return static_score(self.rules, board, self.root_player, ply);
        }
        let mut moves = legal_moves(self.rules, board);
        if moves.is_empty() {
            self.stats.evaluations += 1;
            return static_score(self.rules, board, self.root_player, ply);
        }
        order_moves(self.rules, board, &mut moves);

        let maximizing = board.turn == self.root_player;
        let mut best = if maximizing {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };

        for mv in moves {
            let undo = apply_generated(self.rules, board, &mv)?;
            let value = self.minimax(board, depth - 1, alpha, beta, ply + 1);
            unapply(board, &mv, undo)?;
            let value = value?;

            if self.stop.is_some() {
                return Ok(best);
            }
            if maximizing {
                best = best.max(value);
                alpha = alpha.max(best);
            } else {
                best = best.min(value);
                beta = beta.min(best);
            }
            if alpha >= beta {
                self.stats.cutoffs += 1;
                break;
            }
        }
        Ok(best)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Location, Phase};
    use crate::games::breakthrough::Breakthrough;
    use crate::games::gobblet::Gobblet;
    use crate::search::config::Randomize;

    fn p(n: u8) -> PlayerId {
        PlayerId::new(n)
    }

    /// White pawn one step from the far row, black far away.
    fn near_win() -> (Breakthrough, Board) {
        let rules = Breakthrough::new(5, 5);
        let mut board = rules.empty_board();
        board.push_chip(Location::cell(0, 3), rules.pawn(p(0))).unwrap();
        board.push_chip(Location::cell(4, 0), rules.pawn(p(0))).unwrap();
        board.push_chip(Location::cell(4, 4), rules.pawn(p(1))).unwrap();
        (rules, board)
    }

    #[test]
    fn test_static_score_of_won_position() {
        let (rules, mut board) = near_win();
        board.set_game_over(Some(p(0)));
        assert!(static_score(&rules, &board, p(0), 3).unwrap() >= WIN);
        assert!(static_score(&rules, &board, p(1), 3).unwrap() <= -WIN);
        assert!(
            static_score(&rules, &board, p(0), 1).unwrap()
                > static_score(&rules, &board, p(0), 3).unwrap()
        );
    }

    #[test]
    fn test_finds_win_in_one() {
        let (rules, board) = near_win();
        let mut search = AlphaBeta::new(&rules, AlphaBetaConfig::default().with_depth(1));
        let (mv, score) = search.search_scored(&board).unwrap().unwrap();

        assert_eq!(mv.from, Some(Location::cell(0, 3)));
        assert_eq!(mv.to.map(|l| l.is_cell()), Some(true));
        assert!(score >= WIN);
    }

    #[test]
    fn test_search_leaves_board_untouched() {
        let rules = Gobblet::new();
        let board = rules.new_board();
        let digest = board.digest();

        let mut search = AlphaBeta::new(&rules, AlphaBetaConfig::default().with_depth(3));
        assert!(search.search(&board).unwrap().is_some());
        assert_eq!(board.digest(), digest);
        assert_eq!(search.stats().completed_depth, 3);
        assert!(search.stats().cutoffs > 0);
    }

    #[test]
    fn test_single_choice_shortcut() {
        let rules = Breakthrough::new(5, 5);
        let mut board = rules.empty_board();
        board.push_chip(Location::cell(0, 0), rules.pawn(p(0))).unwrap();
        board.push_chip(Location::cell(1, 1), rules.pawn(p(1))).unwrap();
        board.push_chip(Location::cell(0, 1), rules.pawn(p(1))).unwrap();

        let mut search = AlphaBeta::new(&rules, AlphaBetaConfig::default());
        let mv = search.search(&board).unwrap().unwrap();
        assert_eq!(mv.to, Some(Location::cell(1, 1)));
        assert_eq!(search.stats().stopped_by, StopReason::SingleChoice);
        assert_eq!(search.stats().nodes, 0);
    }

    #[test]
    fn test_node_budget_returns_best_so_far() {
        let rules = Breakthrough::new(6, 6);
        let board = rules.new_board();
        let config = AlphaBetaConfig::default().with_depth(8).with_node_limit(500);

        let mut search = AlphaBeta::new(&rules, config);
        let mv = search.search(&board).unwrap().unwrap();
        assert!(rules.generate(&board).contains(&mv));
        assert_eq!(search.stats().stopped_by, StopReason::Nodes);
        assert!(search.stats().completed_depth < 8);
    }

    #[test]
    fn test_evaluation_out_of_range() {
        struct Loud(Breakthrough);
        impl Rules for Loud {
            fn variant(&self) -> &str {
                "loud"
            }
            fn new_board(&self) -> Board {
                self.0.new_board()
            }
            fn generate(&self, board: &Board) -> Vec<Move> {
                self.0.generate(board)
            }
            fn winner(&self, board: &Board) -> Option<PlayerId> {
                self.0.winner(board)
            }
            fn evaluate(&self, _board: &Board, _player: PlayerId) -> f64 {
                WIN
            }
        }

        let rules = Loud(Breakthrough::new(5, 5));
        let board = rules.new_board();
        let mut search = AlphaBeta::new(&rules, AlphaBetaConfig::default().with_depth(1));
        assert_eq!(
            search.search(&board),
            Err(EngineError::EvaluationRange(WIN))
        );
    }

    #[test]
    fn test_randomized_opening_varies_with_seed() {
        let rules = Gobblet::new();
        let board = rules.new_board();
        assert_eq!(board.phase, Phase::Play);
        let randomize = Randomize {
            tolerance: 100.0,
            until_move: 4,
            depth_reduction: 1,
        };

        let picks: std::collections::HashSet<Move> = (0..8)
            .map(|seed| {
                let config = AlphaBetaConfig::default()
                    .with_depth(2)
                    .with_randomize(randomize.clone())
                    .with_seed(seed);
                AlphaBeta::new(&rules, config).search(&board).unwrap().unwrap()
            })
            .collect();
        assert!(picks.len() > 1);
    }
}
