//! Shallow alpha-beta search over the static evaluation.
//!
//! A deterministic baseline next to the tree search, useful for sanity
//! games and quick tactical checks. Child positions are fresh copies of
//! the board; nothing is undone.

use crate::board::{Board, Player};
use crate::moves::Move;

/// The move with the best evaluation at the given depth for `player`, or
/// `None` when the game is already decided.
pub fn best_move(board: &Board, depth: u32, player: Player) -> Option<Move> {
    if board.winner().is_some() {
        return None;
    }
    let maximizing = player == Player::White;
    let mut best: Option<(Move, f32)> = None;
    for mv in board.legal_moves(player) {
        let mut child = board.clone();
        child.execute_move(mv, player);
        let score = search(
            &child,
            depth.saturating_sub(1),
            player.other(),
            f32::NEG_INFINITY,
            f32::INFINITY,
        );
        let better = match best {
            None => true,
            Some((_, s)) => {
                if maximizing {
                    score > s
                } else {
                    score < s
                }
            }
        };
        if better {
            best = Some((mv, score));
        }
    }
    best.map(|(mv, _)| mv)
}

fn search(board: &Board, depth: u32, to_move: Player, mut alpha: f32, mut beta: f32) -> f32 {
    if depth == 0 || board.winner().is_some() {
        return board.evaluate();
    }
    match to_move {
        Player::White => {
            let mut value = f32::NEG_INFINITY;
            for mv in board.legal_moves(to_move) {
                let mut child = board.clone();
                child.execute_move(mv, to_move);
                value = value.max(search(&child, depth - 1, Player::Black, alpha, beta));
                alpha = alpha.max(value);
                if beta <= alpha {
                    break;
                }
            }
            value
        }
        Player::Black => {
            let mut value = f32::INFINITY;
            for mv in board.legal_moves(to_move) {
                let mut child = board.clone();
                child.execute_move(mv, to_move);
                value = value.min(search(&child, depth - 1, Player::White, alpha, beta));
                beta = beta.min(value);
                if beta <= alpha {
                    break;
                }
            }
            value
        }
    }
}
