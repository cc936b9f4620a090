//! Reachability over the wall-pruned grid graph.
//!
//! Two searches over the same implicit graph: a depth-first yes/no
//! connectivity check used to vet wall placements, and a breadth-first
//! search for goal distances and shortest-path reconstruction. Both treat
//! the opponent pawn as an empty cell; only the pawn-move generator in
//! [`crate::board`] cares where the other pawn stands. Keeping the two
//! neighbour contexts apart is deliberate, the distinction is a classic
//! source of wall-rule bugs.
//!
//! All bookkeeping uses fixed-size arrays indexed by packed cell value; the
//! grid has 81 cells so nothing here allocates.

use crate::board::{Board, Player};
use crate::constants::{CELL_SPACE, DOWN, LEFT, MAX_COORD, RIGHT, UP};
use crate::moves::{col_of, row_of, Cell};

/// Open neighbours of a cell, honouring the board's blocked edges plus an
/// overlay of extra blocked table indices (a candidate wall's four edge
/// entries). Returns the count written into `out`.
#[inline]
fn open_neighbors(board: &Board, c: Cell, overlay: &[usize], out: &mut [Cell; 4]) -> usize {
    let mut n = 0;
    let base = c as usize;
    let mut push = |idx: usize, next: Cell, out: &mut [Cell; 4], n: &mut usize| {
        if !board.blocked[idx] && !overlay.contains(&idx) {
            out[*n] = next;
            *n += 1;
        }
    };
    if col_of(c) != MAX_COORD {
        push(base + RIGHT, c + 1, out, &mut n);
    }
    if col_of(c) != 0 {
        push(base + LEFT, c - 1, out, &mut n);
    }
    if row_of(c) != MAX_COORD {
        push(base + UP, c + 16, out, &mut n);
    }
    if row_of(c) != 0 {
        push(base + DOWN, c - 16, out, &mut n);
    }
    n
}

/// Depth-first connectivity check: can `player`'s pawn still reach its goal
/// row? `overlay` carries the edge entries of a wall under consideration so
/// the check never has to mutate the board.
pub fn reaches_goal(board: &Board, player: Player, overlay: &[usize]) -> bool {
    let start = board.pawn(player);
    if player.at_goal(start) {
        return true;
    }

    let mut todo = [0u8; 81];
    let mut todo_len = 1;
    let mut seen = [false; CELL_SPACE];
    todo[0] = start;
    seen[start as usize] = true;

    let mut neighbors = [0u8; 4];
    while todo_len > 0 {
        todo_len -= 1;
        let cur = todo[todo_len];
        if player.at_goal(cur) {
            return true;
        }
        let n = open_neighbors(board, cur, overlay, &mut neighbors);
        for &next in &neighbors[..n] {
            if !seen[next as usize] {
                seen[next as usize] = true;
                todo[todo_len] = next;
                todo_len += 1;
            }
        }
    }
    false
}

/// Breadth-first distance from `player`'s pawn to its goal row, in moves
/// over the wall-pruned grid. `u32::MAX` when the goal is unreachable,
/// which the connectivity invariant rules out for committed positions.
pub fn goal_distance(board: &Board, player: Player) -> u32 {
    let start = board.pawn(player);
    let mut todo = [0u8; 81];
    let (mut head, mut tail) = (0usize, 0usize);
    let mut seen = [false; CELL_SPACE];
    let mut depth = [0u32; CELL_SPACE];

    todo[tail] = start;
    tail += 1;
    seen[start as usize] = true;

    let mut neighbors = [0u8; 4];
    while head < tail {
        let cur = todo[head];
        head += 1;
        if player.at_goal(cur) {
            return depth[cur as usize];
        }
        let n = open_neighbors(board, cur, &[], &mut neighbors);
        for &next in &neighbors[..n] {
            if !seen[next as usize] {
                seen[next as usize] = true;
                depth[next as usize] = depth[cur as usize] + 1;
                todo[tail] = next;
                tail += 1;
            }
        }
    }
    u32::MAX
}

/// Shortest path from `player`'s pawn to its goal row, reconstructed from
/// BFS parent links. The returned cells run goal-first, so `last()` is the
/// first step away from the pawn and the element before it the second.
/// Empty when the pawn already stands on its goal row or no path exists.
pub fn path_to_goal(board: &Board, player: Player) -> Vec<Cell> {
    let start = board.pawn(player);
    let mut todo = [0u8; 81];
    let (mut head, mut tail) = (0usize, 0usize);
    let mut seen = [false; CELL_SPACE];
    let mut parent = [0u8; CELL_SPACE];

    todo[tail] = start;
    tail += 1;
    seen[start as usize] = true;
    parent[start as usize] = start;

    let mut neighbors = [0u8; 4];
    let mut goal = None;
    'bfs: while head < tail {
        let cur = todo[head];
        head += 1;
        if player.at_goal(cur) {
            goal = Some(cur);
            break 'bfs;
        }
        let n = open_neighbors(board, cur, &[], &mut neighbors);
        for &next in &neighbors[..n] {
            if !seen[next as usize] {
                seen[next as usize] = true;
                parent[next as usize] = cur;
                todo[tail] = next;
                tail += 1;
            }
        }
    }

    let mut path = Vec::new();
    let Some(mut cur) = goal else {
        return path;
    };
    while parent[cur as usize] != cur {
        path.push(cur);
        cur = parent[cur as usize];
    }
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::moves::{cell, slot, wall_move};

    #[test]
    fn test_open_board_distances() {
        let board = Board::new();
        assert_eq!(goal_distance(&board, Player::White), 8);
        assert_eq!(goal_distance(&board, Player::Black), 8);
    }

    #[test]
    fn test_both_connected_on_open_board() {
        let board = Board::new();
        assert!(reaches_goal(&board, Player::White, &[]));
        assert!(reaches_goal(&board, Player::Black, &[]));
    }

    #[test]
    fn test_wall_lengthens_path() {
        let mut board = Board::new();
        // Horizontal wall right in front of the white pawn's lane.
        board.execute_move(wall_move(slot(0, 4, true)), Player::White);
        assert!(goal_distance(&board, Player::White) > 8);
        assert!(reaches_goal(&board, Player::White, &[]));
    }

    #[test]
    fn test_path_starts_from_pawn() {
        let board = Board::new();
        let path = path_to_goal(&board, Player::White);
        assert_eq!(path.len(), 8);
        assert_eq!(*path.last().unwrap(), cell(1, 4));
        assert_eq!(path[0], cell(8, 4));
    }
}
