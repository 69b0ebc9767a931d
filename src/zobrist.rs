use crate::types::*;
use once_cell::sync::Lazy;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;

/// Hash key material for positions.
///
/// Board entries combine by XOR, so placing and lifting a piece are the
/// same operation. Hand entries combine by wrapping addition, one summand
/// per held piece, which lets a count change of one be applied without
/// knowing the old count's key. Entries for the empty piece and the
/// unused hand slot are zero, so empty squares and empty hands never
/// perturb a key.
pub struct Zobrist {
    board: [[Key; Piece::NUM]; Square::NUM],
    hands: [[Key; PieceType::HAND_NUM]; Color::NUM],
}

impl Zobrist {
    /// Side-to-move key. Board keys keep bit 0 clear so XOR
    /// accumulations can never cancel it.
    pub const COLOR: Key = Key(1);

    const SEED: [u8; 32] = [
        0x67, 0x6e, 0x40, 0x63, 0x1b, 0x6a, 0x29, 0x9e, 0x42, 0x30, 0x51, 0x78, 0x92, 0x4d, 0x23, 0x69, 0x19, 0x88, 0x61, 0x07,
        0x18, 0x25, 0x33, 0x47, 0x02, 0x22, 0x74, 0x12, 0x93, 0x83, 0x05, 0x71,
    ];
    // Far more draws than table entries; running out means the generator
    // is broken, not unlucky.
    const DRAW_LIMIT: u32 = 100_000;

    fn unique_key(rng: &mut StdRng, used: &mut HashSet<u64>) -> Key {
        for _ in 0..Zobrist::DRAW_LIMIT {
            let k = rng.gen::<u64>() & !1;
            if k != 0 && used.insert(k) {
                return Key(k);
            }
        }
        panic!("zobrist key supply exhausted");
    }

    fn new() -> Zobrist {
        let mut rng = StdRng::from_seed(Zobrist::SEED);
        let mut used = HashSet::new();
        let mut board = [[Key::ZERO; Piece::NUM]; Square::NUM];
        let mut hands = [[Key::ZERO; PieceType::HAND_NUM]; Color::NUM];
        for sq in Square::ALL.iter() {
            for c in Color::ALL.iter() {
                for pt in PieceType::PAWN.0..PieceType::NUM as i32 {
                    let pc = Piece::new(*c, PieceType(pt));
                    board[sq.0 as usize][pc.0 as usize] = Zobrist::unique_key(&mut rng, &mut used);
                }
            }
        }
        for c in Color::ALL.iter() {
            for pt in PieceType::ALL_HAND.iter() {
                hands[c.0 as usize][pt.0 as usize] = Zobrist::unique_key(&mut rng, &mut used);
            }
        }
        Zobrist { board, hands }
    }

    pub fn board(sq: Square, pc: Piece) -> Key {
        debug_assert!(sq.is_ok());
        debug_assert!(0 <= pc.0 && pc.0 < Piece::NUM as i32);
        unsafe {
            *ZOBRIST
                .board
                .get_unchecked(sq.0 as usize)
                .get_unchecked(pc.0 as usize)
        }
    }
    pub fn hand(c: Color, pt: PieceType) -> Key {
        debug_assert!(0 <= c.0 && c.0 < Color::NUM as i32);
        debug_assert!(0 <= pt.0 && pt.0 < PieceType::HAND_NUM as i32);
        unsafe {
            *ZOBRIST
                .hands
                .get_unchecked(c.0 as usize)
                .get_unchecked(pt.0 as usize)
        }
    }
}

static ZOBRIST: Lazy<Zobrist> = Lazy::new(Zobrist::new);

pub fn init() {
    Lazy::force(&ZOBRIST);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_entries_are_zero() {
        for &sq in Square::ALL.iter() {
            assert_eq!(Zobrist::board(sq, Piece::EMPTY), Key::ZERO);
        }
        for &c in Color::ALL.iter() {
            assert_eq!(Zobrist::hand(c, PieceType::OCCUPIED), Key::ZERO);
        }
    }

    #[test]
    fn test_keys_unique_and_nonzero() {
        let mut seen = HashSet::new();
        for &sq in Square::ALL.iter() {
            for &c in Color::ALL.iter() {
                for pt in PieceType::PAWN.0..PieceType::NUM as i32 {
                    let k = Zobrist::board(sq, Piece::new(c, PieceType(pt)));
                    assert_ne!(k, Key::ZERO);
                    assert_ne!(k, Zobrist::COLOR);
                    assert!(seen.insert(k.0));
                }
            }
        }
        for &c in Color::ALL.iter() {
            for &pt in PieceType::ALL_HAND.iter() {
                let k = Zobrist::hand(c, pt);
                assert_ne!(k, Key::ZERO);
                assert!(seen.insert(k.0));
            }
        }
    }

    #[test]
    fn test_board_keys_reserve_bit0() {
        for &sq in Square::ALL.iter() {
            for &c in Color::ALL.iter() {
                for pt in PieceType::PAWN.0..PieceType::NUM as i32 {
                    assert_eq!(Zobrist::board(sq, Piece::new(c, PieceType(pt))).0 & 1, 0);
                }
            }
        }
    }

    #[test]
    fn test_generation_is_deterministic() {
        let a = Zobrist::new();
        let b = Zobrist::new();
        for &sq in Square::ALL.iter() {
            for pc in 0..Piece::NUM {
                assert_eq!(a.board[sq.0 as usize][pc], b.board[sq.0 as usize][pc]);
            }
        }
        for c in 0..Color::NUM {
            for pt in 0..PieceType::HAND_NUM {
                assert_eq!(a.hands[c][pt], b.hands[c][pt]);
            }
        }
    }
}
