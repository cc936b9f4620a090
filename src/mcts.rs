//! Monte-Carlo tree search over [`Board`].
//!
//! The tree lives in a flat arena: nodes are indices into a `Vec`, links
//! are indices, and each parent keeps its `(move, child)` pairs inline.
//! One search iteration descends by UCT to a leaf, expands it, steps into
//! the first of the fresh children, runs a small batch of playouts from
//! that child's position, and walks the batch tallies back up the path.
//! Both win counters travel together so a node knows its visit count as
//! their sum and its value from either side.
//!
//! Expansion seeds every child with a prior: a model registry scores all
//! 256 move bytes at once when present, otherwise the single move along
//! the shortest path gets a flat bonus.

use std::time::{Duration, Instant};

use crate::board::{Board, Player};
use crate::constants::{
    EXPLORATION, N_ROLLOUTS, PAWN_BIAS, PRIOR_MODEL_SCALE, PRIOR_SHORTEST_PATH,
    SIMULATIONS_PER_ROLLOUT,
};
use crate::model::ModelRegistry;
use crate::moves::Move;
use crate::rollout::{rollout, RolloutPolicy};

const ROOT: usize = 0;

/// Tunable search knobs. [`Default`] carries the production values.
#[derive(Clone, Debug)]
pub struct SearchParams {
    /// Tree iterations per move decision.
    pub rollouts: u32,
    /// Playouts batched per expanded leaf, backpropagated together.
    pub simulations_per_rollout: u32,
    /// UCT exploration constant.
    pub exploration: f32,
    /// One ply in this many deviates from the shortest path in playouts.
    pub pawn_bias: u32,
    /// Playout move policy.
    pub policy: RolloutPolicy,
    /// Wall-clock budget, checked between iterations. The first iteration
    /// always runs.
    pub deadline: Option<Duration>,
}

impl Default for SearchParams {
    fn default() -> Self {
        SearchParams {
            rollouts: N_ROLLOUTS,
            simulations_per_rollout: SIMULATIONS_PER_ROLLOUT,
            exploration: EXPLORATION,
            pawn_bias: PAWN_BIAS,
            policy: RolloutPolicy::ShortestPath,
            deadline: None,
        }
    }
}

struct Node {
    to_move: Player,
    parent: Option<usize>,
    children: Vec<(Move, usize)>,
    expanded: bool,
    white_wins: u32,
    black_wins: u32,
    prior: f32,
}

impl Node {
    fn leaf(to_move: Player, parent: Option<usize>, prior: f32) -> Self {
        Node {
            to_move,
            parent,
            children: Vec::new(),
            expanded: false,
            white_wins: 0,
            black_wins: 0,
            prior,
        }
    }

    #[inline]
    fn visits(&self) -> u32 {
        self.white_wins + self.black_wins
    }

    #[inline]
    fn wins_for(&self, player: Player) -> u32 {
        match player {
            Player::White => self.white_wins,
            Player::Black => self.black_wins,
        }
    }
}

struct Tree {
    nodes: Vec<Node>,
}

impl Tree {
    fn new(root_to_move: Player) -> Self {
        Tree {
            nodes: vec![Node::leaf(root_to_move, None, 0.0)],
        }
    }

    fn add(&mut self, node: Node) -> usize {
        self.nodes.push(node);
        self.nodes.len() - 1
    }
}

/// Reusable search driver owning the parameters, the optional prior
/// models, and the rollout RNG.
pub struct Searcher {
    params: SearchParams,
    model: Option<ModelRegistry>,
    rng: fastrand::Rng,
}

impl Searcher {
    pub fn new(params: SearchParams) -> Self {
        Searcher {
            params,
            model: None,
            rng: fastrand::Rng::new(),
        }
    }

    pub fn with_model(params: SearchParams, model: ModelRegistry) -> Self {
        Searcher {
            params,
            model: Some(model),
            rng: fastrand::Rng::new(),
        }
    }

    /// Fixed RNG seed, for reproducible searches.
    pub fn seeded(params: SearchParams, seed: u64) -> Self {
        Searcher {
            params,
            model: None,
            rng: fastrand::Rng::with_seed(seed),
        }
    }

    /// The most-visited root move for `to_move`, or `None` when the game
    /// is already decided.
    pub fn best_move(&mut self, board: &Board, to_move: Player) -> Option<Move> {
        let tree = self.search(board, to_move);
        tree.nodes[ROOT]
            .children
            .iter()
            .max_by_key(|&&(_, child)| tree.nodes[child].visits())
            .map(|&(mv, _)| mv)
    }

    /// Visit counts of the root children indexed by move byte; the raw
    /// search output training records are built from.
    pub fn visit_distribution(&mut self, board: &Board, to_move: Player) -> [u32; 256] {
        let tree = self.search(board, to_move);
        let mut counts = [0u32; 256];
        for &(mv, child) in &tree.nodes[ROOT].children {
            counts[mv as usize] = tree.nodes[child].visits();
        }
        counts
    }

    fn search(&mut self, root: &Board, to_move: Player) -> Tree {
        let start = Instant::now();
        let mut tree = Tree::new(to_move);
        for _ in 0..self.params.rollouts {
            self.iterate(&mut tree, root);
            if let Some(limit) = self.params.deadline {
                if start.elapsed() >= limit {
                    break;
                }
            }
        }
        tree
    }

    /// One iteration: select, expand, step into the first new child, play
    /// out a batch from there, backpropagate.
    fn iterate(&mut self, tree: &mut Tree, root: &Board) {
        let mut board = root.clone();
        let mut idx = ROOT;
        while board.winner().is_none() && tree.nodes[idx].expanded {
            let (mv, child) = self.select_child(tree, idx);
            board.execute_move(mv, tree.nodes[idx].to_move);
            idx = child;
        }

        if board.winner().is_none() {
            self.expand(tree, idx, &board);
            let (mv, child) = self.select_child(tree, idx);
            board.execute_move(mv, tree.nodes[idx].to_move);
            idx = child;
        }

        let batch = self.params.simulations_per_rollout;
        let (mut white, mut black) = (0u32, 0u32);
        match board.winner() {
            Some(Player::White) => white = batch,
            Some(Player::Black) => black = batch,
            None => {
                let to_move = tree.nodes[idx].to_move;
                for _ in 0..batch {
                    match rollout(
                        board.clone(),
                        to_move,
                        self.params.policy,
                        self.params.pawn_bias,
                        &mut self.rng,
                    ) {
                        Player::White => white += 1,
                        Player::Black => black += 1,
                    }
                }
            }
        }

        let mut cursor = Some(idx);
        while let Some(i) = cursor {
            tree.nodes[i].white_wins += white;
            tree.nodes[i].black_wins += black;
            cursor = tree.nodes[i].parent;
        }
    }

    /// UCT pick among the children of `parent`. An unvisited child wins
    /// outright; otherwise the score is the child's prior plus its wins
    /// from the mover's side, per visit, plus the exploration term.
    fn select_child(&self, tree: &Tree, parent: usize) -> (Move, usize) {
        let node = &tree.nodes[parent];
        let mover = node.to_move;
        let parent_visits = node.visits() as f32;

        let mut best: Option<(Move, usize)> = None;
        let mut best_value = f32::NEG_INFINITY;
        for &(mv, child) in &node.children {
            let c = &tree.nodes[child];
            let n = c.visits();
            if n == 0 {
                return (mv, child);
            }
            let n = n as f32;
            let value = (c.prior + c.wins_for(mover) as f32) / n
                + self.params.exploration * (parent_visits.ln() / n).sqrt();
            if value > best_value {
                best_value = value;
                best = Some((mv, child));
            }
        }
        match best {
            Some(pick) => pick,
            None => panic!("expanded node has no children"),
        }
    }

    /// Attach one child per legal move, each carrying its prior.
    fn expand(&mut self, tree: &mut Tree, idx: usize, board: &Board) {
        let to_move = tree.nodes[idx].to_move;
        let moves = board.legal_moves(to_move);
        debug_assert!(!moves.is_empty(), "no legal moves in an undecided game");

        let scores = self.model.as_ref().map(|registry| {
            registry
                .predictor_for(to_move, board.walls_placed())
                .predict(&board.encode())
        });
        let path_move = board.shortest_path_move(to_move);

        for mv in moves {
            let prior = match &scores {
                Some(scores) => scores[mv as usize] * PRIOR_MODEL_SCALE,
                None if mv == path_move => PRIOR_SHORTEST_PATH,
                None => 0.0,
            };
            let child = tree.add(Node::leaf(to_move.other(), Some(idx), prior));
            tree.nodes[idx].children.push((mv, child));
        }
        tree.nodes[idx].expanded = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BoardEncoding, MovePredictor};
    use crate::moves::{cell, pawn_move};

    fn quick_params(rollouts: u32) -> SearchParams {
        SearchParams {
            rollouts,
            ..SearchParams::default()
        }
    }

    #[test]
    fn test_finds_winning_move() {
        let board = Board::from_parts(cell(7, 4), cell(4, 0), &[], 0, 0);
        let mut searcher = Searcher::seeded(quick_params(200), 42);
        assert_eq!(
            searcher.best_move(&board, Player::White),
            Some(pawn_move(1, 0))
        );
    }

    #[test]
    fn test_decided_board_has_no_move() {
        let board = Board::from_parts(cell(8, 4), cell(4, 4), &[], 10, 10);
        let mut searcher = Searcher::seeded(quick_params(10), 1);
        assert_eq!(searcher.best_move(&board, Player::Black), None);
        let counts = searcher.visit_distribution(&board, Player::Black);
        assert!(counts.iter().all(|&n| n == 0));
    }

    #[test]
    fn test_visit_conservation() {
        let params = quick_params(50);
        let batch = params.simulations_per_rollout;
        let mut searcher = Searcher::seeded(params, 9);
        let counts = searcher.visit_distribution(&Board::new(), Player::White);
        // Every iteration credits its batch to exactly one root subtree,
        // including the one that expands the root itself.
        assert_eq!(counts.iter().sum::<u32>(), 50 * batch);
    }

    #[test]
    fn test_deadline_stops_early_but_still_moves() {
        let params = SearchParams {
            rollouts: u32::MAX,
            deadline: Some(Duration::ZERO),
            ..SearchParams::default()
        };
        let mut searcher = Searcher::seeded(params, 5);
        assert!(searcher.best_move(&Board::new(), Player::White).is_some());
    }

    #[test]
    fn test_model_priors_flow_into_search() {
        struct Flat;
        impl MovePredictor for Flat {
            fn predict(&self, _encoding: &BoardEncoding) -> [f32; 256] {
                [1.0 / 256.0; 256]
            }
        }
        let stage = || -> Vec<Box<dyn MovePredictor>> {
            (0..crate::constants::MODEL_STAGES)
                .map(|_| Box::new(Flat) as Box<dyn MovePredictor>)
                .collect()
        };
        let registry = ModelRegistry::new(stage(), stage()).unwrap();
        let mut searcher = Searcher::with_model(quick_params(50), registry);
        assert!(searcher.best_move(&Board::new(), Player::White).is_some());
    }
}
