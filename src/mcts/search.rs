//! Core UCT search loop.
//!
//! Every iteration walks one board clone down the tree with `apply`,
//! expands a single untried move, scores the new position with the
//! simulation policy, backs the rewards up the path and then unwinds the
//! board with `unapply`. The root board is never touched.

use std::time::Instant;

use tracing::{debug, warn};

use crate::board::Board;
use crate::core::{EngineResult, GameRng, PlayerId, PlayerMap};
use crate::moves::Move;
use crate::rules::{apply_generated, legal_moves, unapply, Rules, Undo};
use crate::search::StopReason;

use super::config::UctConfig;
use super::node::{Edge, NodeId, UctNode};
use super::policy::{outcome_rewards, RandomPlayout, SelectionPolicy, SimulationPolicy, UCB1};
use super::stats::UctStats;
use super::tree::UctTree;

/// UCT search context.
///
/// Borrows the rules and owns the tree, so the tree and its statistics can
/// be inspected after [`UctSearch::search`] returns.
pub struct UctSearch<'r, R: Rules + ?Sized> {
    rules: &'r R,
    config: UctConfig,
    tree: UctTree,
    rng: GameRng,
    selection: Box<dyn SelectionPolicy>,
    simulation: Box<dyn SimulationPolicy<R> + 'r>,
    stats: UctStats,
}

impl<'r, R: Rules + ?Sized> UctSearch<'r, R> {
    pub fn new(rules: &'r R, config: UctConfig) -> Self {
        let rng = GameRng::new(config.seed);
        let capacity = config.max_nodes.min(1 << 16);
        Self {
            rules,
            tree: UctTree::with_capacity(PlayerId::new(0), 0, 2, capacity),
            config,
            rng,
            selection: Box::new(UCB1),
            simulation: Box::new(RandomPlayout),
            stats: UctStats::default(),
        }
    }

    pub fn with_selection<S: SelectionPolicy + 'static>(mut self, selection: S) -> Self {
        self.selection = Box::new(selection);
        self
    }

    pub fn with_simulation<S: SimulationPolicy<R> + 'r>(mut self, simulation: S) -> Self {
        self.simulation = Box::new(simulation);
        self
    }

    /// Search from `board` and return the most visited root move.
    ///
    /// `None` when the game is over or nothing can be played. A position
    /// with exactly one legal move returns it without searching.
    pub fn search(&mut self, board: &Board) -> EngineResult<Option<Move>> {
        let start = Instant::now();
        self.stats.reset();

        let mut scratch = board.clone();
        scratch.search_depth = 0;
        self.tree = UctTree::with_capacity(
            scratch.turn,
            scratch.digest(),
            scratch.player_count(),
            self.config.max_nodes.min(1 << 16),
        );
        let root = self.tree.root();
        self.expand_node(root, &scratch);

        let root_node = self.tree.get(root);
        if root_node.is_terminal || root_node.edges.is_empty() {
            return Ok(None);
        }
        if root_node.edges.len() == 1 {
            return Ok(Some(root_node.edges[0].mv));
        }

        self.stats.stopped_by = loop {
            if self.config.iterations > 0 && self.stats.iterations >= self.config.iterations {
                break StopReason::Completed;
            }
            if self.config.time_limit.is_some_and(|limit| start.elapsed() >= limit) {
                break StopReason::Time;
            }
            if self.tree.len() >= self.config.max_nodes {
                break StopReason::Nodes;
            }
            self.iteration(&mut scratch)?;
            self.stats.iterations += 1;
        };
        self.stats.time_us = start.elapsed().as_micros() as u64;

        #[cfg(debug_assertions)]
        scratch.same_board(board)?;

        if self.stats.stopped_by == StopReason::Nodes {
            warn!(nodes = self.tree.len(), "uct tree full, stopping early");
        }
        let best = self.best_move();
        debug!(
            iterations = self.stats.iterations,
            nodes = self.tree.len(),
            best = ?best.map(|m| m.to_string()),
            "uct search finished"
        );
        Ok(best)
    }

    /// One iteration: select, expand, simulate, backpropagate, unwind.
    fn iteration(&mut self, board: &mut Board) -> EngineResult<()> {
        let mut path: Vec<(NodeId, usize)> = Vec::new();
        let mut trail: Vec<(Move, Undo)> = Vec::new();
        let mut current = self.tree.root();

        let rewards = loop {
            let node = self.tree.get(current);

            if node.is_terminal || node.edges.is_empty() {
                break node
                    .terminal_reward
                    .clone()
                    .unwrap_or_else(|| PlayerMap::with_value(board.player_count(), 0.0));
            }

            if node.has_unexpanded() {
                let untried: Vec<usize> = node.unexpanded_edges().collect();
                let idx = untried[self.rng.gen_index(untried.len())];
                let mv = node.edges[idx].mv;

                path.push((current, idx));
                let undo = apply_generated(self.rules, board, &mv)?;
                trail.push((mv, undo));

                let child = self.add_child(current, idx, board);
                let child_node = self.tree.get(child);
                break match &child_node.terminal_reward {
                    Some(r) => r.clone(),
                    None => {
                        self.stats.simulations += 1;
                        let plies = u32::from(child_node.depth);
                        self.simulation.simulate(
                            self.rules,
                            board,
                            &mut self.rng,
                            &self.config,
                            plies,
                        )?
                    }
                };
            }

            let idx = self.selection.select(node, node.to_move, &self.config);
            let edge = &node.edges[idx];
            let (mv, child) = (edge.mv, edge.child);
            path.push((current, idx));
            let undo = apply_generated(self.rules, board, &mv)?;
            trail.push((mv, undo));
            current = child;
        };

        self.backpropagate(&path, &rewards);

        while let Some((mv, undo)) = trail.pop() {
            unapply(board, &mv, undo)?;
        }
        Ok(())
    }

    /// Add the node reached through `parent.edges[idx]`; `board` stands on it.
    fn add_child(&mut self, parent: NodeId, idx: usize, board: &Board) -> NodeId {
        let depth = self.tree.get(parent).depth + 1;
        let node = UctNode::new(parent, idx as u16, board.turn, depth, board.digest());
        let child = self.tree.attach(node);
        self.expand_node(child, board);

        self.stats.nodes_expanded += 1;
        self.stats.max_depth = self.stats.max_depth.max(depth);
        child
    }

    /// Fill in a node's edges, or mark it terminal.
    fn expand_node(&mut self, id: NodeId, board: &Board) {
        let player_count = board.player_count();
        let depth = u32::from(self.tree.get(id).depth);

        if let Some(result) = board.result() {
            let node = self.tree.get_mut(id);
            node.is_terminal = true;
            node.terminal_reward = Some(outcome_rewards(&result, player_count, depth, &self.config));
            return;
        }

        let moves = legal_moves(self.rules, board);
        let node = self.tree.get_mut(id);
        if moves.is_empty() {
            node.is_terminal = true;
            node.terminal_reward = Some(PlayerMap::with_value(player_count, 0.0));
            return;
        }
        node.edges = moves
            .into_iter()
            .map(|mv| Edge::new(mv, player_count))
            .collect();
    }

    fn backpropagate(&mut self, path: &[(NodeId, usize)], rewards: &PlayerMap<f64>) {
        for &(node_id, idx) in path.iter().rev() {
            let node = self.tree.get_mut(node_id);
            node.visits += 1;
            let edge = &mut node.edges[idx];
            edge.visits += 1;
            for (p, r) in rewards.iter() {
                edge.total_reward[p] += *r;
            }
        }
    }

    fn best_move(&self) -> Option<Move> {
        self.tree.root_node().most_visited().map(|e| e.mv)
    }

    /// Visit counts of the root moves from the last search.
    #[must_use]
    pub fn move_visits(&self) -> Vec<(Move, u32)> {
        self.tree
            .root_node()
            .edges
            .iter()
            .map(|e| (e.mv, e.visits))
            .collect()
    }

    /// Visit share of each root move.
    #[must_use]
    pub fn move_probabilities(&self) -> Vec<(Move, f64)> {
        let visits = self.move_visits();
        let total: u32 = visits.iter().map(|(_, v)| v).sum();
        if total == 0 {
            let n = visits.len().max(1) as f64;
            return visits.into_iter().map(|(m, _)| (m, 1.0 / n)).collect();
        }
        visits
            .into_iter()
            .map(|(m, v)| (m, v as f64 / total as f64))
            .collect()
    }

    #[must_use]
    pub fn tree(&self) -> &UctTree {
        &self.tree
    }

    #[must_use]
    pub fn stats(&self) -> &UctStats {
        &self.stats
    }

    #[must_use]
    pub fn config(&self) -> &UctConfig {
        &self.config
    }
}
