//! Training-record codec.
//!
//! A record is a searched position paired with the root visit counts the
//! search produced. The byte layout is length-prefixed so records of
//! positions with different wall counts concatenate into one stream:
//! a header byte holding the header length (five plus one byte per placed
//! wall), the two pawn cells, the two wall counts, the placed wall slots,
//! then all 256 visit counts as little-endian `u32`.

use anyhow::{bail, ensure, Result};

use crate::board::{Board, Player};
use crate::constants::{WALL_SLOTS, WALLS_PER_PLAYER};
use crate::moves::cell_is_valid;

const HEADER_BASE: usize = 5;
const COUNTS_LEN: usize = 256 * 4;

/// Serialize one position and its visit counts.
pub fn encode_record(board: &Board, counts: &[u32; 256]) -> Vec<u8> {
    let walls: Vec<u8> = board.placed_walls().collect();
    let mut out = Vec::with_capacity(HEADER_BASE + walls.len() + COUNTS_LEN);
    out.push((HEADER_BASE + walls.len()) as u8);
    out.push(board.pawn(Player::White));
    out.push(board.pawn(Player::Black));
    out.push(board.walls_remaining(Player::White));
    out.push(board.walls_remaining(Player::Black));
    out.extend_from_slice(&walls);
    for &n in counts {
        out.extend_from_slice(&n.to_le_bytes());
    }
    out
}

/// Parse a stream of concatenated records. Fails on truncation or on any
/// value that does not describe a reachable position.
pub fn decode_records(bytes: &[u8]) -> Result<Vec<(Board, [u32; 256])>> {
    let mut records = Vec::new();
    let mut rest = bytes;
    while !rest.is_empty() {
        let header_len = rest[0] as usize;
        ensure!(
            header_len >= HEADER_BASE,
            "record header length {header_len} below minimum {HEADER_BASE}"
        );
        ensure!(
            rest.len() >= header_len + COUNTS_LEN,
            "truncated record: need {} bytes, have {}",
            header_len + COUNTS_LEN,
            rest.len()
        );

        let white_pawn = rest[1];
        let black_pawn = rest[2];
        let white_walls = rest[3];
        let black_walls = rest[4];
        if !cell_is_valid(white_pawn) || !cell_is_valid(black_pawn) {
            bail!("record holds an off-board pawn cell");
        }
        ensure!(
            white_walls <= WALLS_PER_PLAYER && black_walls <= WALLS_PER_PLAYER,
            "record wall count exceeds {WALLS_PER_PLAYER}"
        );

        let walls = &rest[HEADER_BASE..header_len];
        let mut seen = [false; WALL_SLOTS];
        for &s in walls {
            ensure!((s as usize) < WALL_SLOTS, "wall slot {s} out of range");
            ensure!(!seen[s as usize], "wall slot {s} repeated in record");
            seen[s as usize] = true;
        }

        let mut counts = [0u32; 256];
        for (i, chunk) in rest[header_len..header_len + COUNTS_LEN]
            .chunks_exact(4)
            .enumerate()
        {
            counts[i] = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        }

        let board = Board::from_parts(white_pawn, black_pawn, walls, white_walls, black_walls);
        records.push((board, counts));
        rest = &rest[header_len + COUNTS_LEN..];
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::moves::{pawn_move, slot, wall_move};

    fn sample_board() -> Board {
        let mut board = Board::new();
        board.execute_move(wall_move(slot(2, 3, true)), Player::White);
        board.execute_move(pawn_move(-1, 0), Player::Black);
        board.execute_move(wall_move(slot(5, 5, false)), Player::Black);
        board
    }

    #[test]
    fn test_record_roundtrip() {
        let board = sample_board();
        let mut counts = [0u32; 256];
        counts[pawn_move(1, 0) as usize] = 12_345;
        counts[wall_move(slot(7, 0, true)) as usize] = 70_000;

        let bytes = encode_record(&board, &counts);
        assert_eq!(bytes[0] as usize, HEADER_BASE + 2);

        let records = decode_records(&bytes).unwrap();
        assert_eq!(records.len(), 1);
        assert!(records[0].0 == board);
        assert_eq!(records[0].1, counts);
    }

    #[test]
    fn test_stream_of_records() {
        let a = Board::new();
        let b = sample_board();
        let counts = [3u32; 256];
        let mut bytes = encode_record(&a, &counts);
        bytes.extend(encode_record(&b, &counts));

        let records = decode_records(&bytes).unwrap();
        assert_eq!(records.len(), 2);
        assert!(records[0].0 == a);
        assert!(records[1].0 == b);
    }

    #[test]
    fn test_truncated_record_rejected() {
        let bytes = encode_record(&Board::new(), &[0u32; 256]);
        assert!(decode_records(&bytes[..bytes.len() - 1]).is_err());
    }

    #[test]
    fn test_repeated_wall_slot_rejected() {
        // Hand-built record listing the same slot twice.
        let s = slot(3, 3, true);
        let mut bytes = vec![7, 0x04, 0x84, 9, 9, s, s];
        bytes.extend([0u8; 1024]);
        assert!(decode_records(&bytes).is_err());
    }

    #[test]
    fn test_bad_header_rejected() {
        let mut bytes = encode_record(&Board::new(), &[0u32; 256]);
        bytes[0] = 2;
        assert!(decode_records(&bytes).is_err());

        let mut bytes = encode_record(&Board::new(), &[0u32; 256]);
        bytes[1] = 0x99;
        assert!(decode_records(&bytes).is_err());
    }
}
