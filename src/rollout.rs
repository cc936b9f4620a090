//! Playout phase of the tree search.
//!
//! A rollout plays the position forward with a cheap stochastic policy
//! until someone wins or the ply cap runs out, in which case the pawn
//! closer to its goal takes the game. Policies sample from the probable
//! move set without the connectivity check and re-validate sampled walls
//! on the spot, retrying a few times before giving up on walls for that
//! ply.

use crate::board::{Board, Player};
use crate::constants::{ROLLOUT_PLIES, WALL_RETRIES};
use crate::moves::{is_wall, wall_slot, Move};

/// How a rollout picks its moves.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RolloutPolicy {
    /// Uniform over the probable move set.
    FullRandom,
    /// A coin flip between a uniform pawn move and a uniform probable move.
    HalfPawn,
    /// Mostly the shortest-path pawn move; one ply in `pawn_bias` samples
    /// from the probable set instead.
    ShortestPath,
}

impl RolloutPolicy {
    /// Pick a legal move for `player`. Never fails: the shortest-path pawn
    /// move backstops every branch.
    pub fn choose(
        self,
        board: &Board,
        player: Player,
        pawn_bias: u32,
        rng: &mut fastrand::Rng,
    ) -> Move {
        match self {
            RolloutPolicy::FullRandom => {
                let (moves, _) = board.probable_moves_unchecked(player);
                sample_checked(board, &moves, rng)
                    .unwrap_or_else(|| board.shortest_path_move(player))
            }
            RolloutPolicy::HalfPawn => {
                let (moves, pawn_count) = board.probable_moves_unchecked(player);
                if rng.bool() {
                    moves[rng.usize(..pawn_count)]
                } else {
                    sample_checked(board, &moves, rng)
                        .unwrap_or_else(|| board.shortest_path_move(player))
                }
            }
            RolloutPolicy::ShortestPath => {
                // A zero bias would make an empty sample range; treat it
                // like 1 (never follow the path implicitly).
                if rng.u32(..pawn_bias.max(1)) != 0 {
                    return board.shortest_path_move(player);
                }
                let (moves, _) = board.probable_moves_unchecked(player);
                sample_checked(board, &moves, rng)
                    .unwrap_or_else(|| board.shortest_path_move(player))
            }
        }
    }
}

/// Uniform sample with wall re-validation: a sampled wall that fails the
/// connectivity check is redrawn, a few times at most.
fn sample_checked(board: &Board, moves: &[Move], rng: &mut fastrand::Rng) -> Option<Move> {
    for _ in 0..=WALL_RETRIES {
        let mv = moves[rng.usize(..moves.len())];
        if !is_wall(mv) || board.is_legal_wall_placement(wall_slot(mv)) {
            return Some(mv);
        }
    }
    None
}

/// Play `board` to a verdict, `to_move` first. Capped games go to the
/// closer pawn, ties to the player whose turn it would be.
pub fn rollout(
    mut board: Board,
    mut to_move: Player,
    policy: RolloutPolicy,
    pawn_bias: u32,
    rng: &mut fastrand::Rng,
) -> Player {
    if let Some(winner) = board.winner() {
        return winner;
    }
    for _ in 0..ROLLOUT_PLIES {
        let mv = policy.choose(&board, to_move, pawn_bias, rng);
        board.execute_move(mv, to_move);
        if let Some(winner) = board.winner() {
            return winner;
        }
        to_move = to_move.other();
    }
    board.closer_pawn(to_move)
}
