//! Quoridor-MCTS: a Quoridor engine built on Monte Carlo Tree Search.
//!
//! This crate implements the full Quoridor rule set on a 9x9 board,
//! a UCT tree search with pluggable move-prior models, and the codec
//! for the self-play training records the models learn from.
//!
//! ## Modules
//!
//! - [`constants`] - Board geometry, move encoding bits, search defaults
//! - [`moves`] - Single-byte cell, move, and wall-slot codecs
//! - [`board`] - Game state, move generation, wall legality
//! - [`path`] - Goal reachability and shortest-path queries
//! - [`mcts`] - UCT tree search over a flat node arena
//! - [`rollout`] - Stochastic playout policies
//! - [`model`] - Move-prior predictor interface and per-stage registry
//! - [`dataset`] - Training-record byte codec
//! - [`minimax`] - Alpha-beta baseline over the static evaluation
//!
//! ## Example
//!
//! ```
//! use quoridor_mcts::board::{Board, Player};
//! use quoridor_mcts::mcts::{SearchParams, Searcher};
//!
//! // White opens with a pawn push.
//! let mut board = Board::new();
//! assert!(board.move_pawn(1, 0, Player::White));
//!
//! // Search for black's reply.
//! let params = SearchParams {
//!     rollouts: 50,
//!     ..SearchParams::default()
//! };
//! let mut searcher = Searcher::new(params);
//! let reply = searcher.best_move(&board, Player::Black);
//! assert!(reply.is_some());
//! ```

pub mod board;
pub mod constants;
pub mod dataset;
pub mod mcts;
pub mod minimax;
pub mod model;
pub mod moves;
pub mod path;
pub mod rollout;
