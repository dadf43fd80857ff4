//! Pluggable policies for UCT.
//!
//! - **Selection**: which edge to descend once a node is fully expanded
//! - **Simulation**: how a newly expanded position is scored

use super::config::UctConfig;
use super::node::UctNode;
use crate::board::Board;
use crate::core::{EngineResult, GameRng, PlayerId, PlayerMap};
use crate::rules::{apply_generated, legal_moves, unapply, GameResult, Rules};

/// Picks an edge index at a fully expanded node.
pub trait SelectionPolicy: Send + Sync {
    /// `player` is the player choosing at `node`.
    fn select(&self, node: &UctNode, player: PlayerId, config: &UctConfig) -> usize;
}

/// UCB1: `mean + c * sqrt(ln(N) / n)`. Unvisited edges go first.
#[derive(Clone, Copy, Debug, Default)]
pub struct UCB1;

impl SelectionPolicy for UCB1 {
    fn select(&self, node: &UctNode, player: PlayerId, config: &UctConfig) -> usize {
        let ln_parent = (node.visits.max(1) as f64).ln();
        let c = config.exploration_constant;

        let mut best = 0;
        let mut best_score = f64::NEG_INFINITY;
        for (i, edge) in node.edges.iter().enumerate() {
            if edge.visits == 0 {
                return i;
            }
            let n = edge.visits as f64;
            let score = edge.mean_reward(player) + c * (ln_parent / n).sqrt();
            if score > best_score {
                best_score = score;
                best = i;
            }
        }
        best
    }
}

/// Rewards in `[-1, 1]` for a finished game reached `plies` after the root.
///
/// The winner gets [`UctConfig::win_value`], everyone else its negation.
#[must_use]
pub fn outcome_rewards(
    result: &GameResult,
    player_count: usize,
    plies: u32,
    config: &UctConfig,
) -> PlayerMap<f64> {
    let value = config.win_value(plies);
    match result {
        GameResult::Draw => PlayerMap::with_value(player_count, 0.0),
        _ => PlayerMap::new(player_count, |p| {
            if result.is_winner(p) {
                value
            } else {
                -value
            }
        }),
    }
}

/// Squash a static evaluation into `(-0.5, 0.5)` so that an unfinished
/// playout never outweighs a real win.
#[must_use]
pub fn evaluation_rewards<R: Rules + ?Sized>(rules: &R, board: &Board) -> PlayerMap<f64> {
    PlayerMap::new(board.player_count(), |p| {
        let e = rules.evaluate(board, p);
        0.5 * e / (e.abs() + 10.0)
    })
}

/// Scores a position reached `base_plies` after the root.
///
/// The board must come back exactly as it was handed in.
pub trait SimulationPolicy<R: Rules + ?Sized>: Send + Sync {
    fn simulate(
        &self,
        rules: &R,
        board: &mut Board,
        rng: &mut GameRng,
        config: &UctConfig,
        base_plies: u32,
    ) -> EngineResult<PlayerMap<f64>>;
}

/// Uniform random playout through `apply`, unwound with `unapply`.
///
/// Stops at game over, at a position with nothing to play, or after
/// `max_playout_depth` plies, where the static evaluation decides.
#[derive(Clone, Copy, Debug, Default)]
pub struct RandomPlayout;

impl<R: Rules + ?Sized> SimulationPolicy<R> for RandomPlayout {
    fn simulate(
        &self,
        rules: &R,
        board: &mut Board,
        rng: &mut GameRng,
        config: &UctConfig,
        base_plies: u32,
    ) -> EngineResult<PlayerMap<f64>> {
        let mut trail = Vec::new();
        let mut rewards = None;

        for ply in 0..config.max_playout_depth {
            if let Some(result) = board.result() {
                rewards = Some(outcome_rewards(
                    &result,
                    board.player_count(),
                    base_plies + ply,
                    config,
                ));
                break;
            }
            let moves = legal_moves(rules, board);
            let Some(&mv) = rng.choose(&moves) else {
                break;
            };
            let undo = apply_generated(rules, board, &mv)?;
            trail.push((mv, undo));
        }

        let rewards = match rewards {
            Some(r) => r,
            None => match board.result() {
                Some(result) => outcome_rewards(
                    &result,
                    board.player_count(),
                    base_plies + trail.len() as u32,
                    config,
                ),
                None => evaluation_rewards(rules, board),
            },
        };

        while let Some((mv, undo)) = trail.pop() {
            unapply(board, &mv, undo)?;
        }
        Ok(rewards)
    }
}
