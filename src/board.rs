//! Quoridor board state and move generation.
//!
//! The board owns the two pawn cells, both wall counts, the placed and
//! taken wall-slot sets and the derived edge-block table, and is the only
//! place moves are generated or executed. Wall legality is gated by the
//! connectivity invariant: no placement may leave either pawn without a
//! path to its goal row, which [`crate::path`] checks before a wall is
//! committed.
//!
//! Two distinct neighbour contexts live side by side on purpose: the
//! reachability searches ignore the opponent pawn entirely (the wall rule
//! is about walls), while pawn-move generation treats it as an obstacle
//! and jump target. Do not unify them.

use std::fmt;

use thiserror::Error;

use crate::constants::{
    BLACK_START, DOWN, EDGE_TABLE, LEFT, MAX_COORD, RIGHT, UP, WALL_HORIZONTAL, WALL_SLOTS,
    WALLS_PER_PLAYER, WEIGHT_MOBILITY, WEIGHT_WALLS, WEIGHT_WALLS_AHEAD, WHITE_START, WIN_SCORE,
};
use crate::model::{BoardEncoding, ENCODING_LEN};
use crate::moves::{
    apply_pawn_move, cell_is_valid, col_of, is_wall, pawn_move, row_of, slot, slot_col,
    slot_is_horizontal, slot_row, wall_move, wall_slot, Cell, Move, WallSlot,
};
use crate::path;

/// One of the two sides. White starts on row 0 and races to row 8, black
/// the other way around.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Player {
    White,
    Black,
}

impl Player {
    #[inline]
    pub fn other(self) -> Self {
        match self {
            Player::White => Player::Black,
            Player::Black => Player::White,
        }
    }

    /// Whether a cell lies on this player's goal row.
    #[inline]
    pub fn at_goal(self, c: Cell) -> bool {
        match self {
            Player::White => row_of(c) == MAX_COORD,
            Player::Black => row_of(c) == 0,
        }
    }
}

/// Why a self-validating move attempt was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("illegal pawn move")]
    IllegalPawnMove,
    #[error("illegal wall placement")]
    IllegalWallPlacement,
    #[error("game already decided")]
    GameOver,
}

/// The four edge-block table entries a wall severs: two undirected grid
/// edges, one directional entry per side.
#[inline]
pub(crate) fn severed_edges(s: WallSlot) -> [usize; 4] {
    let anchor = 16 * slot_row(s) as usize + slot_col(s) as usize;
    if slot_is_horizontal(s) {
        [
            anchor + UP,
            anchor + 1 + UP,
            anchor + 16 + DOWN,
            anchor + 17 + DOWN,
        ]
    } else {
        [
            anchor + RIGHT,
            anchor + 16 + RIGHT,
            anchor + 1 + LEFT,
            anchor + 17 + LEFT,
        ]
    }
}

/// Full game state. Cheap to clone; rollouts copy it freely.
#[derive(Clone, PartialEq, Eq)]
pub struct Board {
    white_pawn: Cell,
    black_pawn: Cell,
    white_walls: u8,
    black_walls: u8,
    placed: [bool; WALL_SLOTS],
    taken: [bool; WALL_SLOTS],
    pub(crate) blocked: [bool; EDGE_TABLE],
    winner: Option<Player>,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Starting position: pawns on the opposite edge midpoints, ten walls
    /// each, no walls placed.
    pub fn new() -> Self {
        Board {
            white_pawn: WHITE_START,
            black_pawn: BLACK_START,
            white_walls: WALLS_PER_PLAYER,
            black_walls: WALLS_PER_PLAYER,
            placed: [false; WALL_SLOTS],
            taken: [false; WALL_SLOTS],
            blocked: [false; EDGE_TABLE],
            winner: None,
        }
    }

    /// Rebuild a position from its parts. Inputs must already be valid
    /// (legal cells, walls mutually consistent); this is the constructor
    /// behind the training-record decoder, not a validator.
    pub fn from_parts(
        white_pawn: Cell,
        black_pawn: Cell,
        walls: &[WallSlot],
        white_walls: u8,
        black_walls: u8,
    ) -> Self {
        debug_assert!(cell_is_valid(white_pawn) && cell_is_valid(black_pawn));
        let mut board = Board::new();
        board.white_pawn = white_pawn;
        board.black_pawn = black_pawn;
        for &s in walls {
            board.place_wall_unchecked(s);
        }
        board.white_walls = white_walls;
        board.black_walls = black_walls;
        if row_of(white_pawn) == MAX_COORD {
            board.winner = Some(Player::White);
        } else if row_of(black_pawn) == 0 {
            board.winner = Some(Player::Black);
        }
        board
    }

    #[inline]
    pub fn pawn(&self, player: Player) -> Cell {
        match player {
            Player::White => self.white_pawn,
            Player::Black => self.black_pawn,
        }
    }

    #[inline]
    pub fn walls_remaining(&self, player: Player) -> u8 {
        match player {
            Player::White => self.white_walls,
            Player::Black => self.black_walls,
        }
    }

    #[inline]
    pub fn winner(&self) -> Option<Player> {
        self.winner
    }

    /// Anchor slots of all walls on the board.
    pub fn placed_walls(&self) -> impl Iterator<Item = WallSlot> + '_ {
        (0..WALL_SLOTS as u8).filter(|&s| self.placed[s as usize])
    }

    /// Number of walls on the board.
    pub fn walls_placed(&self) -> usize {
        self.placed.iter().filter(|&&p| p).count()
    }

    #[inline]
    pub fn slot_taken(&self, s: WallSlot) -> bool {
        self.taken[s as usize]
    }

    // -------------------------------------------------------------------------
    // Move execution
    // -------------------------------------------------------------------------

    /// Apply a move unconditionally. The caller guarantees legality, either
    /// via [`Board::legal_moves`] or [`Board::try_move`].
    pub fn execute_move(&mut self, mv: Move, player: Player) {
        if is_wall(mv) {
            match player {
                Player::White => self.white_walls -= 1,
                Player::Black => self.black_walls -= 1,
            }
            self.place_wall_unchecked(wall_slot(mv));
        } else {
            let target = apply_pawn_move(self.pawn(player), mv);
            debug_assert!(cell_is_valid(target), "pawn moved off the board");
            match player {
                Player::White => self.white_pawn = target,
                Player::Black => self.black_pawn = target,
            }
            if player.at_goal(target) {
                self.winner = Some(player);
            }
        }
    }

    /// Self-validating entry point: checks legality first and leaves the
    /// state untouched when the move is rejected.
    pub fn try_move(&mut self, mv: Move, player: Player) -> Result<(), MoveError> {
        if self.winner.is_some() {
            return Err(MoveError::GameOver);
        }
        if is_wall(mv) {
            let s = wall_slot(mv);
            if self.walls_remaining(player) == 0
                || self.taken[s as usize]
                || !self.is_legal_wall_placement(s)
            {
                return Err(MoveError::IllegalWallPlacement);
            }
        } else {
            let mut pawn = Vec::with_capacity(5);
            self.pawn_moves(player, &mut pawn);
            if !pawn.contains(&mv) {
                return Err(MoveError::IllegalPawnMove);
            }
        }
        self.execute_move(mv, player);
        Ok(())
    }

    /// Move a pawn by the given deltas if legal. Returns whether the move
    /// was executed.
    pub fn move_pawn(&mut self, dr: i8, dc: i8, player: Player) -> bool {
        self.try_move(pawn_move(dr, dc), player).is_ok()
    }

    /// Place a wall at the given anchor if legal. Returns whether the wall
    /// was placed.
    pub fn place_wall(&mut self, row: u8, col: u8, horizontal: bool, player: Player) -> bool {
        self.try_move(wall_move(slot(row, col, horizontal)), player)
            .is_ok()
    }

    /// Record a wall: anchor placed, anchor plus the overlapping cross slot
    /// and the two collinear neighbours taken, both severed edges blocked.
    /// The three sets move together so they can never diverge.
    fn place_wall_unchecked(&mut self, s: WallSlot) {
        debug_assert!(!self.placed[s as usize], "wall placed twice");
        self.placed[s as usize] = true;

        self.taken[s as usize] = true;
        if slot_is_horizontal(s) {
            self.taken[(s - WALL_HORIZONTAL) as usize] = true;
            if slot_col(s) < 7 {
                self.taken[(s + 1) as usize] = true;
            }
            if slot_col(s) > 0 {
                self.taken[(s - 1) as usize] = true;
            }
        } else {
            self.taken[(s + WALL_HORIZONTAL) as usize] = true;
            if slot_row(s) < 7 {
                self.taken[(s + 8) as usize] = true;
            }
            if slot_row(s) > 0 {
                self.taken[(s - 8) as usize] = true;
            }
        }

        for idx in severed_edges(s) {
            self.blocked[idx] = true;
        }
    }

    // -------------------------------------------------------------------------
    // Move generation
    // -------------------------------------------------------------------------

    /// Every legal move for `player`: pawn steps and jumps, then every wall
    /// placement that is not taken and keeps both pawns connected to their
    /// goal rows.
    pub fn legal_moves(&self, player: Player) -> Vec<Move> {
        let mut moves = Vec::with_capacity(64);
        self.pawn_moves(player, &mut moves);
        self.wall_moves(player, true, &mut moves);
        moves
    }

    /// Pawn moves plus wall placements gated only by the taken set; the
    /// connectivity check is skipped. Rollout policies re-validate sampled
    /// walls and tolerate the occasional miss. Pawn moves come first;
    /// returns how many there are.
    pub fn moves_unchecked(&self, player: Player) -> (Vec<Move>, usize) {
        let mut moves = Vec::with_capacity(128);
        self.pawn_moves(player, &mut moves);
        let pawn_count = moves.len();
        self.wall_moves(player, false, &mut moves);
        (moves, pawn_count)
    }

    /// Pawn moves plus the restricted wall candidates a rollout bothers
    /// with: slots around the opponent pawn, slots touching an existing
    /// wall, and horizontal slots across the opponent's lane. Unchecked
    /// like [`Board::moves_unchecked`]; pawn moves first.
    pub fn probable_moves_unchecked(&self, player: Player) -> (Vec<Move>, usize) {
        let mut moves = Vec::with_capacity(48);
        self.pawn_moves(player, &mut moves);
        let pawn_count = moves.len();
        self.probable_wall_moves(player, &mut moves);
        (moves, pawn_count)
    }

    /// Pure predicate: would placing this wall leave both pawns connected?
    /// The candidate's edge blocks are handed to the reachability check as
    /// an overlay, so the board is never touched.
    pub fn is_legal_wall_placement(&self, s: WallSlot) -> bool {
        debug_assert!(s < WALL_SLOTS as u8, "wall slot out of range");
        let overlay = severed_edges(s);
        path::reaches_goal(self, Player::White, &overlay)
            && path::reaches_goal(self, Player::Black, &overlay)
    }

    /// Whether a specific move is legal for `player`.
    pub fn is_legal(&self, mv: Move, player: Player) -> bool {
        self.legal_moves(player).contains(&mv)
    }

    /// Orthogonal neighbours reachable over unblocked edges, pawns ignored.
    #[inline]
    fn open_cells(&self, c: Cell, out: &mut [Cell; 4]) -> usize {
        let mut n = 0;
        let base = c as usize;
        if col_of(c) != MAX_COORD && !self.blocked[base + RIGHT] {
            out[n] = c + 1;
            n += 1;
        }
        if col_of(c) != 0 && !self.blocked[base + LEFT] {
            out[n] = c - 1;
            n += 1;
        }
        if row_of(c) != MAX_COORD && !self.blocked[base + UP] {
            out[n] = c + 16;
            n += 1;
        }
        if row_of(c) != 0 && !self.blocked[base + DOWN] {
            out[n] = c - 16;
            n += 1;
        }
        n
    }

    #[inline]
    fn edge_open(&self, c: Cell, dir: usize) -> bool {
        !self.blocked[c as usize + dir]
    }

    /// All pawn steps and jumps for `player`. A neighbour occupied by the
    /// opponent triggers the jump rule: straight over if the far edge is
    /// open and on the board, otherwise the two side-steps, each gated by
    /// its own edge.
    pub fn pawn_moves(&self, player: Player, out: &mut Vec<Move>) {
        let me = self.pawn(player);
        let opp = self.pawn(player.other());
        let (my_row, my_col) = (row_of(me), col_of(me));

        let mut neighbors = [0u8; 4];
        let n = self.open_cells(me, &mut neighbors);
        for &next in &neighbors[..n] {
            if next != opp {
                let dr = row_of(next) as i8 - my_row as i8;
                let dc = col_of(next) as i8 - my_col as i8;
                out.push(pawn_move(dr, dc));
                continue;
            }

            let (opp_row, opp_col) = (row_of(opp), col_of(opp));
            if opp_row > my_row {
                if opp_row < MAX_COORD && self.edge_open(opp, UP) {
                    out.push(pawn_move(2, 0));
                    continue;
                }
                if opp_col > 0 && self.edge_open(opp, LEFT) {
                    out.push(pawn_move(1, -1));
                }
                if opp_col < MAX_COORD && self.edge_open(opp, RIGHT) {
                    out.push(pawn_move(1, 1));
                }
            } else if opp_row < my_row {
                if opp_row > 0 && self.edge_open(opp, DOWN) {
                    out.push(pawn_move(-2, 0));
                    continue;
                }
                if opp_col > 0 && self.edge_open(opp, LEFT) {
                    out.push(pawn_move(-1, -1));
                }
                if opp_col < MAX_COORD && self.edge_open(opp, RIGHT) {
                    out.push(pawn_move(-1, 1));
                }
            } else if opp_col > my_col {
                if opp_col < MAX_COORD && self.edge_open(opp, RIGHT) {
                    out.push(pawn_move(0, 2));
                    continue;
                }
                if opp_row > 0 && self.edge_open(opp, DOWN) {
                    out.push(pawn_move(-1, 1));
                }
                if opp_row < MAX_COORD && self.edge_open(opp, UP) {
                    out.push(pawn_move(1, 1));
                }
            } else {
                if opp_col > 0 && self.edge_open(opp, LEFT) {
                    out.push(pawn_move(0, -2));
                    continue;
                }
                if opp_row > 0 && self.edge_open(opp, DOWN) {
                    out.push(pawn_move(-1, -1));
                }
                if opp_row < MAX_COORD && self.edge_open(opp, UP) {
                    out.push(pawn_move(1, -1));
                }
            }
        }
    }

    fn wall_moves(&self, player: Player, check_connectivity: bool, out: &mut Vec<Move>) {
        if self.walls_remaining(player) == 0 {
            return;
        }
        for s in 0..WALL_SLOTS as u8 {
            if self.taken[s as usize] {
                continue;
            }
            if !check_connectivity || self.is_legal_wall_placement(s) {
                out.push(wall_move(s));
            }
        }
    }

    fn probable_wall_moves(&self, player: Player, out: &mut Vec<Move>) {
        if self.walls_remaining(player) == 0 {
            return;
        }
        let mut candidate = [false; WALL_SLOTS];

        // Around the opponent pawn: the four intersections touching its
        // cell, both orientations.
        let opp = self.pawn(player.other());
        let (opp_row, opp_col) = (row_of(opp) as i16, col_of(opp) as i16);
        for di in [0i16, -1] {
            for dj in [0i16, -1] {
                let (i, j) = (opp_row + di, opp_col + dj);
                if (0..8).contains(&i) && (0..8).contains(&j) {
                    candidate[slot(i as u8, j as u8, false) as usize] = true;
                    candidate[slot(i as u8, j as u8, true) as usize] = true;
                }
            }
        }

        // Touching an existing wall.
        for s in 0..WALL_SLOTS as u8 {
            if self.has_neighboring_wall(s) {
                candidate[s as usize] = true;
            }
        }

        // Horizontal slots in the opponent's column, below the mover's own
        // row, the same bound for both sides.
        let my_row = row_of(self.pawn(player)) as i16;
        for i in 0..my_row {
            for j in [opp_col, opp_col - 1] {
                if (0..8).contains(&j) {
                    candidate[slot(i as u8, j as u8, true) as usize] = true;
                }
            }
        }

        for s in 0..WALL_SLOTS as u8 {
            if candidate[s as usize] && !self.taken[s as usize] {
                out.push(wall_move(s));
            }
        }
    }

    /// Whether any placed wall anchors next to this slot: the collinear
    /// slots two steps away and the six crossing slots around the anchor.
    fn has_neighboring_wall(&self, s: WallSlot) -> bool {
        let s = s as i16;
        let neighbors: [i16; 8] = if slot_is_horizontal(s as u8) {
            [
                s + 2,
                s - 2,
                s - 64 + 7,
                s - 64 + 8,
                s - 64 + 9,
                s - 64 - 7,
                s - 64 - 8,
                s - 64 - 9,
            ]
        } else {
            [
                s + 16,
                s - 16,
                s + 64 - 7,
                s + 64 + 1,
                s + 64 + 9,
                s + 64 - 9,
                s + 64 - 1,
                s + 64 + 7,
            ]
        };
        neighbors
            .iter()
            .any(|&n| (0..WALL_SLOTS as i16).contains(&n) && self.placed[n as usize])
    }

    // -------------------------------------------------------------------------
    // Heuristics
    // -------------------------------------------------------------------------

    /// Static evaluation for the minimax collaborator, positive for white:
    /// +-1000 once decided, otherwise remaining walls, wall density between
    /// each pawn and its goal, and local mobility. Deliberately avoids the
    /// breadth-first distance metric; this exists to be cheap.
    pub fn evaluate(&self) -> f32 {
        match self.winner {
            Some(Player::White) => return WIN_SCORE,
            Some(Player::Black) => return -WIN_SCORE,
            None => {}
        }

        let walls = self.white_walls as f32 - self.black_walls as f32;

        let ahead = |rows: std::ops::Range<u8>| -> f32 {
            let mut count = 0;
            for i in rows {
                for j in 0..8 {
                    if self.placed[slot(i, j, false) as usize]
                        || self.placed[slot(i, j, true) as usize]
                    {
                        count += 1;
                    }
                }
            }
            count as f32
        };
        let walls_ahead = ahead(row_of(self.white_pawn)..8) - ahead(0..row_of(self.black_pawn));

        let mut scratch = [0u8; 4];
        let mobility = self.open_cells(self.white_pawn, &mut scratch) as f32
            - self.open_cells(self.black_pawn, &mut scratch) as f32;

        WEIGHT_WALLS * walls + WEIGHT_WALLS_AHEAD * walls_ahead + WEIGHT_MOBILITY * mobility
    }

    /// The legal pawn move that advances along a shortest path to the goal
    /// row. Prefers the path's next cell, then the cell after next (the
    /// jump case). When neither is reachable by a legal pawn move, which
    /// happens when the path's first step runs through the opponent pawn,
    /// falls back to an arbitrary legal pawn move. Known heuristic gap,
    /// kept as-is.
    pub fn shortest_path_move(&self, player: Player) -> Move {
        let path = path::path_to_goal(self, player);
        let mut moves = Vec::with_capacity(5);
        self.pawn_moves(player, &mut moves);
        debug_assert!(!moves.is_empty(), "pawn has no moves");

        let me = self.pawn(player);
        let opp = self.pawn(player.other());
        for &mv in &moves {
            let next = apply_pawn_move(me, mv);
            if next == opp {
                continue;
            }
            let on_path = path.last() == Some(&next)
                || (path.len() >= 2 && path[path.len() - 2] == next);
            if on_path {
                return mv;
            }
        }
        moves[0]
    }

    /// Which pawn is closer to its goal row by breadth-first distance,
    /// `tie` winning an exact tie. Decides playouts that hit the ply cap.
    pub fn closer_pawn(&self, tie: Player) -> Player {
        let white = path::goal_distance(self, Player::White);
        let black = path::goal_distance(self, Player::Black);
        if white < black {
            Player::White
        } else if black < white {
            Player::Black
        } else {
            tie
        }
    }

    /// Fixed-width feature vector consumed by the prior model: pawn cells,
    /// wall counts, goal distances, mobility counts, and the 128-slot wall
    /// occupancy map.
    pub fn encode(&self) -> BoardEncoding {
        let mut enc = [0u8; ENCODING_LEN];
        enc[0] = self.white_pawn;
        enc[1] = self.black_pawn;
        enc[2] = self.white_walls;
        enc[3] = self.black_walls;
        enc[4] = path::goal_distance(self, Player::White).min(255) as u8;
        enc[5] = path::goal_distance(self, Player::Black).min(255) as u8;
        let mut scratch = [0u8; 4];
        enc[6] = self.open_cells(self.white_pawn, &mut scratch) as u8;
        enc[7] = self.open_cells(self.black_pawn, &mut scratch) as u8;
        for s in 0..WALL_SLOTS {
            enc[8 + s] = self.placed[s] as u8;
        }
        enc
    }
}

impl fmt::Display for Board {
    /// ASCII rendering, row 8 on top: `W`/`B` pawns, `|` for a blocking
    /// wall segment between columns, `---` for one between rows.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in (0..=MAX_COORD).rev() {
            for j in 0..=MAX_COORD {
                let c = crate::moves::cell(i, j);
                let glyph = if c == self.white_pawn {
                    'W'
                } else if c == self.black_pawn {
                    'B'
                } else {
                    '.'
                };
                write!(f, " {glyph}")?;
                if j < MAX_COORD {
                    write!(f, "{}", if self.blocked[c as usize + RIGHT] { '|' } else { ' ' })?;
                }
            }
            writeln!(f)?;
            if i > 0 {
                for j in 0..=MAX_COORD {
                    let c = crate::moves::cell(i, j);
                    let below = self.blocked[c as usize + DOWN];
                    write!(f, "{}", if below { "---" } else { "   " })?;
                }
                writeln!(f)?;
            }
        }
        writeln!(
            f,
            "walls: white {} black {}",
            self.white_walls, self.black_walls
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::moves::cell;

    #[test]
    fn test_starting_position() {
        let board = Board::new();
        assert_eq!(board.pawn(Player::White), cell(0, 4));
        assert_eq!(board.pawn(Player::Black), cell(8, 4));
        assert_eq!(board.walls_remaining(Player::White), 10);
        assert_eq!(board.walls_remaining(Player::Black), 10);
        assert_eq!(board.winner(), None);
        assert_eq!(board.walls_placed(), 0);
    }

    #[test]
    fn test_opening_moves() {
        let board = Board::new();
        let moves = board.legal_moves(Player::White);
        let pawn: Vec<_> = moves.iter().filter(|&&m| !is_wall(m)).collect();
        let walls: Vec<_> = moves.iter().filter(|&&m| is_wall(m)).collect();
        // Forward plus the two laterals; every wall slot passes connectivity.
        assert_eq!(pawn.len(), 3);
        assert_eq!(walls.len(), 128);
    }

    #[test]
    fn test_execute_pawn_move_and_win() {
        let mut board = Board::new();
        for _ in 0..7 {
            board.execute_move(pawn_move(1, 0), Player::White);
            assert_eq!(board.winner(), None);
        }
        board.execute_move(pawn_move(1, 0), Player::White);
        assert_eq!(board.winner(), Some(Player::White));
        assert_eq!(board.pawn(Player::White), cell(8, 4));
    }

    #[test]
    fn test_wall_placement_marks_dependent_slots() {
        let mut board = Board::new();
        let s = slot(3, 3, true);
        board.execute_move(wall_move(s), Player::White);

        assert_eq!(board.walls_remaining(Player::White), 9);
        assert_eq!(board.walls_placed(), 1);
        // Anchor, overlapping vertical, and both collinear horizontals.
        assert!(board.slot_taken(s));
        assert!(board.slot_taken(slot(3, 3, false)));
        assert!(board.slot_taken(slot(3, 2, true)));
        assert!(board.slot_taken(slot(3, 4, true)));
        // The vertical one row over is unaffected.
        assert!(!board.slot_taken(slot(4, 3, false)));
    }

    #[test]
    fn test_taken_superset_of_placed() {
        let mut board = Board::new();
        board.execute_move(wall_move(slot(3, 3, true)), Player::White);
        board.execute_move(wall_move(slot(5, 5, false)), Player::Black);
        for s in board.placed_walls() {
            assert!(board.slot_taken(s));
        }
    }

    #[test]
    fn test_try_move_rejects_without_mutation() {
        let mut board = Board::new();
        board.execute_move(wall_move(slot(3, 3, true)), Player::White);
        let before = board.clone();

        // Overlapping cross slot is taken.
        let result = board.try_move(wall_move(slot(3, 3, false)), Player::Black);
        assert_eq!(result, Err(MoveError::IllegalWallPlacement));
        assert!(board == before);

        // Backwards off the board from the start row.
        let result = board.try_move(pawn_move(-1, 0), Player::White);
        assert_eq!(result, Err(MoveError::IllegalPawnMove));
        assert!(board == before);
    }

    #[test]
    fn test_try_move_after_game_over() {
        let mut board = Board::from_parts(cell(8, 4), cell(7, 4), &[], 10, 10);
        assert_eq!(board.winner(), Some(Player::White));
        assert_eq!(
            board.try_move(pawn_move(-1, 0), Player::Black),
            Err(MoveError::GameOver)
        );
    }

    #[test]
    fn test_legality_predicate_leaves_state_unchanged() {
        let mut board = Board::new();
        board.execute_move(wall_move(slot(0, 3, true)), Player::Black);
        let before = board.clone();
        for s in 0..WALL_SLOTS as u8 {
            board.is_legal_wall_placement(s);
        }
        assert!(board == before);
    }

    #[test]
    fn test_from_parts_roundtrip() {
        let mut board = Board::new();
        board.execute_move(wall_move(slot(2, 2, true)), Player::White);
        board.execute_move(pawn_move(1, 0), Player::White);
        board.execute_move(wall_move(slot(6, 1, false)), Player::Black);

        let walls: Vec<_> = board.placed_walls().collect();
        let rebuilt = Board::from_parts(
            board.pawn(Player::White),
            board.pawn(Player::Black),
            &walls,
            board.walls_remaining(Player::White),
            board.walls_remaining(Player::Black),
        );
        assert!(rebuilt == board);
    }

    #[test]
    fn test_lane_wall_candidates_bounded_by_mover_row() {
        let board = Board::new();
        let lane = wall_move(slot(5, 4, true));
        // From row 8 every lane row below is a candidate for black.
        let (moves, _) = board.probable_moves_unchecked(Player::Black);
        assert!(moves.contains(&lane));
        // White sits on row 0, so the lane contributes nothing.
        let (moves, _) = board.probable_moves_unchecked(Player::White);
        assert!(!moves.contains(&lane));
    }

    #[test]
    fn test_evaluate_decided_game() {
        let board = Board::from_parts(cell(8, 4), cell(6, 4), &[], 10, 10);
        assert_eq!(board.evaluate(), WIN_SCORE);
        let board = Board::from_parts(cell(2, 4), cell(0, 4), &[], 10, 10);
        assert_eq!(board.evaluate(), -WIN_SCORE);
    }

    #[test]
    fn test_evaluate_wall_advantage() {
        let board = Board::from_parts(cell(4, 4), cell(5, 4), &[], 10, 6);
        assert!(board.evaluate() > 0.0);
    }

    #[test]
    fn test_shortest_path_move_open_board() {
        let board = Board::new();
        assert_eq!(board.shortest_path_move(Player::White), pawn_move(1, 0));
        assert_eq!(board.shortest_path_move(Player::Black), pawn_move(-1, 0));
    }

    #[test]
    fn test_shortest_path_move_detours_around_wall() {
        let mut board = Board::new();
        // Wall directly in front of white covering columns 4 and 5.
        board.execute_move(wall_move(slot(0, 4, true)), Player::Black);
        let mv = board.shortest_path_move(Player::White);
        // The detour goes left: columns 3 and 4 are covered from the left
        // anchor, so stepping left reaches the nearest gap.
        assert_eq!(mv, pawn_move(0, -1));
    }

    #[test]
    fn test_closer_pawn() {
        let board = Board::from_parts(cell(5, 4), cell(6, 4), &[], 10, 10);
        // White is 3 rows out, black 6.
        assert_eq!(board.closer_pawn(Player::Black), Player::White);
        let board = Board::new();
        assert_eq!(board.closer_pawn(Player::Black), Player::Black);
        assert_eq!(board.closer_pawn(Player::White), Player::White);
    }

    #[test]
    fn test_encode_layout() {
        let mut board = Board::new();
        board.execute_move(wall_move(slot(3, 3, true)), Player::White);
        let enc = board.encode();
        assert_eq!(enc[0], cell(0, 4));
        assert_eq!(enc[1], cell(8, 4));
        assert_eq!(enc[2], 9);
        assert_eq!(enc[3], 10);
        assert_eq!(enc[4], 8);
        assert_eq!(enc[8 + slot(3, 3, true) as usize], 1);
        assert_eq!(enc.iter().skip(8).map(|&b| b as usize).sum::<usize>(), 1);
    }
}
