//! Cell and move byte codec.
//!
//! A cell packs (row, col) into one byte, nibble per coordinate. A move is
//! also one byte: bit 7 clear means a pawn move encoded as signed row and
//! column deltas, bit 7 set means a wall placement whose low seven bits are
//! the wall slot. Moves are plain values; nothing owns them beyond the call
//! that produced them.

use crate::constants::{
    MAX_COORD, PAWN_COL_MAG, PAWN_COL_POS, PAWN_ROW_MAG, PAWN_ROW_POS, WALL_FLAG, WALL_HORIZONTAL,
};

/// A packed board cell: row in the high nibble, column in the low nibble.
pub type Cell = u8;

/// A wall slot identifier in 0..128.
pub type WallSlot = u8;

/// A single-byte move.
pub type Move = u8;

/// Pack (row, col) into a cell byte.
#[inline]
pub fn cell(row: u8, col: u8) -> Cell {
    debug_assert!(row <= MAX_COORD && col <= MAX_COORD, "cell out of range");
    (row << 4) | col
}

/// Row of a cell.
#[inline]
pub fn row_of(c: Cell) -> u8 {
    c >> 4
}

/// Column of a cell.
#[inline]
pub fn col_of(c: Cell) -> u8 {
    c & 0x0f
}

/// Check that both nibbles are in 0..=8.
#[inline]
pub fn cell_is_valid(c: Cell) -> bool {
    row_of(c) <= MAX_COORD && col_of(c) <= MAX_COORD
}

/// Encode a pawn move from row/column deltas. Magnitudes above 2 are not
/// representable and are programming errors.
#[inline]
pub fn pawn_move(dr: i8, dc: i8) -> Move {
    debug_assert!(dr.abs() <= 2 && dc.abs() <= 2, "pawn delta out of range");
    let mut mv = ((dr.unsigned_abs()) << 4) | dc.unsigned_abs();
    if dr > 0 {
        mv |= PAWN_ROW_POS;
    }
    if dc > 0 {
        mv |= PAWN_COL_POS;
    }
    mv
}

/// Decode a pawn move into (row delta, column delta).
#[inline]
pub fn pawn_deltas(mv: Move) -> (i8, i8) {
    debug_assert!(!is_wall(mv));
    let dr = ((mv & PAWN_ROW_MAG) >> 4) as i8;
    let dc = (mv & PAWN_COL_MAG) as i8;
    (
        if mv & PAWN_ROW_POS != 0 { dr } else { -dr },
        if mv & PAWN_COL_POS != 0 { dc } else { -dc },
    )
}

/// Apply a pawn move to a cell. The row magnitude is pre-scaled by 16, so
/// it adds to the packed byte directly; legality is the caller's problem.
#[inline]
pub fn apply_pawn_move(c: Cell, mv: Move) -> Cell {
    debug_assert!(!is_wall(mv));
    let c = if mv & PAWN_ROW_POS != 0 {
        c.wrapping_add(mv & PAWN_ROW_MAG)
    } else {
        c.wrapping_sub(mv & PAWN_ROW_MAG)
    };
    if mv & PAWN_COL_POS != 0 {
        c.wrapping_add(mv & PAWN_COL_MAG)
    } else {
        c.wrapping_sub(mv & PAWN_COL_MAG)
    }
}

/// Whether a move byte is a wall placement.
#[inline]
pub fn is_wall(mv: Move) -> bool {
    mv & WALL_FLAG != 0
}

/// Encode a wall placement move for a slot.
#[inline]
pub fn wall_move(slot: WallSlot) -> Move {
    debug_assert!(slot < 0x80, "wall slot out of range");
    WALL_FLAG | slot
}

/// Slot of a wall move.
#[inline]
pub fn wall_slot(mv: Move) -> WallSlot {
    debug_assert!(is_wall(mv));
    mv & !WALL_FLAG
}

/// Whether a slot anchors a horizontal wall.
#[inline]
pub fn slot_is_horizontal(slot: WallSlot) -> bool {
    slot & WALL_HORIZONTAL != 0
}

/// Anchor row of a slot on the 8x8 intersection grid.
#[inline]
pub fn slot_row(slot: WallSlot) -> u8 {
    (slot >> 3) & 7
}

/// Anchor column of a slot.
#[inline]
pub fn slot_col(slot: WallSlot) -> u8 {
    slot & 7
}

/// Build a slot from orientation and anchor coordinates.
#[inline]
pub fn slot(row: u8, col: u8, horizontal: bool) -> WallSlot {
    debug_assert!(row < 8 && col < 8, "slot anchor out of range");
    (if horizontal { WALL_HORIZONTAL } else { 0 }) | (row << 3) | col
}

/// Human-readable form: `Pawn(dr,dc)`, `Wall(i-j)` for horizontal or
/// `Wall(i|j)` for vertical.
pub fn describe(mv: Move) -> String {
    if is_wall(mv) {
        let s = wall_slot(mv);
        let sep = if slot_is_horizontal(s) { '-' } else { '|' };
        format!("Wall({}{}{})", slot_row(s), sep, slot_col(s))
    } else {
        let (dr, dc) = pawn_deltas(mv);
        format!("Pawn({dr},{dc})")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_roundtrip_all_legal() {
        for row in 0..=MAX_COORD {
            for col in 0..=MAX_COORD {
                let c = cell(row, col);
                assert_eq!(row_of(c), row);
                assert_eq!(col_of(c), col);
                assert!(cell_is_valid(c));
            }
        }
    }

    #[test]
    fn test_pawn_move_roundtrip() {
        for dr in [-2i8, -1, 0, 1, 2] {
            for dc in [-2i8, -1, 0, 1, 2] {
                let mv = pawn_move(dr, dc);
                assert!(!is_wall(mv));
                assert_eq!(pawn_deltas(mv), (dr, dc), "deltas for ({dr},{dc})");
            }
        }
    }

    #[test]
    fn test_pawn_move_known_bytes() {
        // Byte values the training records and tests depend on.
        assert_eq!(pawn_move(1, 0), 24);
        assert_eq!(pawn_move(-1, 0), 16);
        assert_eq!(pawn_move(2, 0), 40);
        assert_eq!(pawn_move(0, 1), 5);
        assert_eq!(pawn_move(0, -1), 1);
        assert_eq!(pawn_move(0, 2), 6);
        assert_eq!(pawn_move(1, -1), 25);
        assert_eq!(pawn_move(1, 1), 29);
        assert_eq!(pawn_move(-1, -1), 17);
        assert_eq!(pawn_move(-1, 1), 21);
    }

    #[test]
    fn test_apply_pawn_move() {
        let c = cell(4, 4);
        assert_eq!(apply_pawn_move(c, pawn_move(1, 0)), cell(5, 4));
        assert_eq!(apply_pawn_move(c, pawn_move(-1, 0)), cell(3, 4));
        assert_eq!(apply_pawn_move(c, pawn_move(0, 2)), cell(4, 6));
        assert_eq!(apply_pawn_move(c, pawn_move(1, 1)), cell(5, 5));
    }

    #[test]
    fn test_wall_slot_roundtrip() {
        for s in 0..128u8 {
            let mv = wall_move(s);
            assert!(is_wall(mv));
            assert_eq!(wall_slot(mv), s);
            assert_eq!(
                slot(slot_row(s), slot_col(s), slot_is_horizontal(s)),
                s,
                "slot fields for {s}"
            );
        }
    }

    #[test]
    fn test_describe() {
        assert_eq!(describe(pawn_move(1, 0)), "Pawn(1,0)");
        assert_eq!(describe(wall_move(slot(2, 3, true))), "Wall(2-3)");
        assert_eq!(describe(wall_move(slot(2, 3, false))), "Wall(2|3)");
    }
}
