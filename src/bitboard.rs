use crate::types::*;
use std::fmt;
use std::ops::*;

/// 81 squares packed into two words: the low word carries squares 0..=62
/// in bits 0..=62 (bit 63 stays clear), the high word carries squares
/// 63..=80 in bits 0..=17. `Region` names a square's logical bit position
/// across the pair.
#[derive(Copy)]
pub struct Bitboard {
    pub v: [u64; 2],
}

impl Clone for Bitboard {
    fn clone(&self) -> Bitboard {
        Bitboard { v: self.v }
    }
}

impl BitOr for Bitboard {
    type Output = Bitboard;

    fn bitor(self, other: Bitboard) -> Bitboard {
        Bitboard {
            v: [self.value(0) | other.value(0), self.value(1) | other.value(1)],
        }
    }
}

impl BitAnd for Bitboard {
    type Output = Bitboard;

    fn bitand(self, other: Bitboard) -> Bitboard {
        Bitboard {
            v: [self.value(0) & other.value(0), self.value(1) & other.value(1)],
        }
    }
}

impl BitXor for Bitboard {
    type Output = Bitboard;

    fn bitxor(self, other: Bitboard) -> Bitboard {
        Bitboard {
            v: [self.value(0) ^ other.value(0), self.value(1) ^ other.value(1)],
        }
    }
}

impl BitOrAssign for Bitboard {
    fn bitor_assign(&mut self, other: Bitboard) {
        self.v[0] = self.value(0) | other.value(0);
        self.v[1] = self.value(1) | other.value(1);
    }
}

impl BitAndAssign for Bitboard {
    fn bitand_assign(&mut self, other: Bitboard) {
        self.v[0] = self.value(0) & other.value(0);
        self.v[1] = self.value(1) & other.value(1);
    }
}

impl BitXorAssign for Bitboard {
    fn bitxor_assign(&mut self, other: Bitboard) {
        self.v[0] = self.value(0) ^ other.value(0);
        self.v[1] = self.value(1) ^ other.value(1);
    }
}

// The two words shift independently, so a shift never bleeds a square
// across the word boundary.
impl Shr<i32> for Bitboard {
    type Output = Bitboard;

    fn shr(self, other: i32) -> Bitboard {
        Bitboard {
            v: [self.v[0] >> other, self.v[1] >> other],
        }
    }
}

impl Shl<i32> for Bitboard {
    type Output = Bitboard;

    fn shl(self, other: i32) -> Bitboard {
        Bitboard {
            v: [self.v[0] << other, self.v[1] << other],
        }
    }
}

impl ShrAssign<i32> for Bitboard {
    fn shr_assign(&mut self, other: i32) {
        self.v[0] >>= other;
        self.v[1] >>= other;
    }
}

impl ShlAssign<i32> for Bitboard {
    fn shl_assign(&mut self, other: i32) {
        self.v[0] <<= other;
        self.v[1] <<= other;
    }
}

impl PartialEq for Bitboard {
    fn eq(&self, other: &Bitboard) -> bool {
        self.v[0] == other.v[0] && self.v[1] == other.v[1]
    }
}

impl Not for Bitboard {
    type Output = Bitboard;

    fn not(self) -> Bitboard {
        Bitboard {
            v: [!self.value(0), !self.value(1)],
        }
    }
}

impl fmt::Debug for Bitboard {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Bitboard {{ v: [{:#x}, {:#x}] }}", self.v[0], self.v[1])
    }
}

impl Bitboard {
    pub fn set(&mut self, sq: Square) {
        *self |= Bitboard::square_mask(sq);
    }
    pub fn clear(&mut self, sq: Square) {
        *self &= !Bitboard::square_mask(sq);
    }
    pub fn xor(&mut self, sq: Square) {
        *self ^= Bitboard::square_mask(sq);
    }
    pub fn merge(&self) -> u64 {
        self.value(0) | self.value(1)
    }
    pub fn count_ones(&self) -> u32 {
        self.value(0).count_ones() + self.value(1).count_ones()
    }
    pub fn notand(self, other: Bitboard) -> Bitboard {
        (!self) & other
    }
    pub fn to_bool(self) -> bool {
        self.merge() != 0
    }
    pub fn and_to_bool(self, other: Bitboard) -> bool {
        (self & other).to_bool()
    }
    pub fn is_set(&self, sq: Square) -> bool {
        self.and_to_bool(Bitboard::square_mask(sq))
    }
    #[allow(dead_code)]
    pub fn print(self) {
        println!("{}", self);
    }
    fn pop_lsb_right_unchecked(&mut self) -> Square {
        let sq = Square(self.value(0).trailing_zeros() as i32);
        self.v[0] &= self.v[0] - 1;
        sq
    }
    fn pop_lsb_left_unchecked(&mut self) -> Square {
        let sq = Square((self.value(1).trailing_zeros() + 63) as i32);
        self.v[1] &= self.v[1] - 1;
        sq
    }
    fn lsb_right_unchecked(&self) -> Square {
        Square(self.value(0).trailing_zeros() as i32)
    }
    fn lsb_left_unchecked(&self) -> Square {
        Square((self.value(1).trailing_zeros() + 63) as i32)
    }
    pub fn pop_lsb_unchecked(&mut self) -> Square {
        if self.value(0) != 0 {
            return self.pop_lsb_right_unchecked();
        }
        self.pop_lsb_left_unchecked()
    }
    pub fn pop_lsb(&mut self) -> Option<Square> {
        if self.value(0) != 0 {
            return Some(self.pop_lsb_right_unchecked());
        }
        if self.value(1) != 0 {
            return Some(self.pop_lsb_left_unchecked());
        }
        None
    }
    pub fn lsb_unchecked(&self) -> Square {
        if self.value(0) != 0 {
            return self.lsb_right_unchecked();
        }
        self.lsb_left_unchecked()
    }
    pub fn value(&self, i: usize) -> u64 {
        debug_assert!(i < 2);
        unsafe { *self.v.get_unchecked(i) }
    }
    /// Which word holds `sq`: 0 for squares 0..=62, 1 for the rest.
    pub fn part(sq: Square) -> usize {
        (Square::SQ79.0 < sq.0) as usize
    }

    pub const ZERO: Bitboard = Bitboard { v: [0, 0] };
    pub const ALL: Bitboard = Bitboard {
        v: [0x7fff_ffff_ffff_ffff, 0x3ffff],
    };

    // All mask tables below are derived from the Region bit layout, so the
    // square -> bit mapping lives in exactly one place.
    const SQUARE_MASK: [Bitboard; Square::NUM] = {
        let mut masks = [Bitboard::ZERO; Square::NUM];
        let mut i = 0;
        while i < Square::NUM {
            let bit = Region::bit_index(i);
            if bit < 64 {
                masks[i].v[0] = 1 << bit;
            } else {
                masks[i].v[1] = 1 << (bit - 64);
            }
            i += 1;
        }
        masks
    };
    const FILE_MASKS: [Bitboard; File::NUM] = {
        let mut masks = [Bitboard::ZERO; File::NUM];
        let mut i = 0;
        while i < Square::NUM {
            let file = i / Rank::NUM;
            let bit = Region::bit_index(i);
            if bit < 64 {
                masks[file].v[0] |= 1 << bit;
            } else {
                masks[file].v[1] |= 1 << (bit - 64);
            }
            i += 1;
        }
        masks
    };
    const RANK_MASKS: [Bitboard; Rank::NUM] = {
        let mut masks = [Bitboard::ZERO; Rank::NUM];
        let mut i = 0;
        while i < Square::NUM {
            let rank = i % Rank::NUM;
            let bit = Region::bit_index(i);
            if bit < 64 {
                masks[rank].v[0] |= 1 << bit;
            } else {
                masks[rank].v[1] |= 1 << (bit - 64);
            }
            i += 1;
        }
        masks
    };
    // Ranks 1-3 and ranks 7-9, the promotion zones.
    const BLACK_FIELD: Bitboard = {
        let mut bb = Bitboard::ZERO;
        let mut i = 0;
        while i < Square::NUM {
            if i % Rank::NUM <= Rank::RANK3.0 as usize {
                let bit = Region::bit_index(i);
                if bit < 64 {
                    bb.v[0] |= 1 << bit;
                } else {
                    bb.v[1] |= 1 << (bit - 64);
                }
            }
            i += 1;
        }
        bb
    };
    const WHITE_FIELD: Bitboard = {
        let mut bb = Bitboard::ZERO;
        let mut i = 0;
        while i < Square::NUM {
            if i % Rank::NUM >= Rank::RANK7.0 as usize {
                let bit = Region::bit_index(i);
                if bit < 64 {
                    bb.v[0] |= 1 << bit;
                } else {
                    bb.v[1] |= 1 << (bit - 64);
                }
            }
            i += 1;
        }
        bb
    };

    pub fn square_mask(sq: Square) -> Bitboard {
        debug_assert!(sq.is_ok());
        unsafe { *Bitboard::SQUARE_MASK.get_unchecked(sq.0 as usize) }
    }
    pub fn file_mask(file: File) -> Bitboard {
        debug_assert!(0 <= file.0 && file.0 < File::NUM as i32);
        unsafe { *Bitboard::FILE_MASKS.get_unchecked(file.0 as usize) }
    }
    pub fn rank_mask(rank: Rank) -> Bitboard {
        debug_assert!(0 <= rank.0 && rank.0 < Rank::NUM as i32);
        unsafe { *Bitboard::RANK_MASKS.get_unchecked(rank.0 as usize) }
    }
    pub fn opponent_field_mask(us: Color) -> Bitboard {
        match us {
            Color::BLACK => Bitboard::WHITE_FIELD,
            Color::WHITE => Bitboard::BLACK_FIELD,
            _ => unreachable!(),
        }
    }
}

impl Iterator for Bitboard {
    type Item = Square;
    fn next(&mut self) -> Option<Self::Item> {
        if self.to_bool() {
            Some(self.pop_lsb_unchecked())
        } else {
            None
        }
    }
}

impl std::fmt::Display for Bitboard {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let mut s: String = "".to_string();
        for rank in Rank::ALL.iter() {
            for file in File::ALL_FROM_LEFT.iter() {
                let sq = Square::new(*file, *rank);
                s += if self.is_set(sq) { "1" } else { "0" };
            }
            s += "\n";
        }
        s += "\n";
        write!(f, "{}", s)
    }
}

#[test]
fn test_bitboard_eq() {
    let bb0 = Bitboard::ZERO;
    let mut bb1 = Bitboard::ZERO;
    assert_eq!(bb0 == bb1, true);
    assert_eq!(bb0 != bb1, false);
    bb1.set(Square::SQ13);
    assert_eq!(bb0 == bb1, false);
    assert_eq!(bb0 != bb1, true);
}

#[test]
fn test_bitboard_part() {
    assert_eq!(Bitboard::part(Square::SQ11), 0);
    assert_eq!(Bitboard::part(Square::SQ79), 0);
    assert_eq!(Bitboard::part(Square::SQ81), 1);
    assert_eq!(Bitboard::part(Square::SQ99), 1);
}

#[test]
fn test_square_mask_matches_region() {
    for &sq in Square::ALL.iter() {
        let bb = Bitboard::square_mask(sq);
        assert_eq!(bb.count_ones(), 1);
        let region = Region::new(sq);
        if region.0 < 64 {
            assert_eq!(bb.value(0), 1 << region.0);
            assert_eq!(bb.value(1), 0);
        } else {
            assert_eq!(bb.value(0), 0);
            assert_eq!(bb.value(1), 1 << (region.0 - 64));
        }
    }
}

#[test]
fn test_file_and_rank_masks() {
    let mut acc = Bitboard::ZERO;
    for &f in File::ALL.iter() {
        let bb = Bitboard::file_mask(f);
        assert_eq!(bb.count_ones(), Rank::NUM as u32);
        assert!(!acc.and_to_bool(bb));
        acc |= bb;
    }
    assert_eq!(acc, Bitboard::ALL);
    let mut acc = Bitboard::ZERO;
    for &r in Rank::ALL.iter() {
        let bb = Bitboard::rank_mask(r);
        assert_eq!(bb.count_ones(), File::NUM as u32);
        assert!(!acc.and_to_bool(bb));
        acc |= bb;
    }
    assert_eq!(acc, Bitboard::ALL);
    for &sq in Square::ALL.iter() {
        assert!(Bitboard::file_mask(File::new(sq)).is_set(sq));
        assert!(Bitboard::rank_mask(Rank::new(sq)).is_set(sq));
    }
}

#[test]
fn test_rank_mask_shift() {
    // Ranks sit one bit apart inside each word, which pawn pushes rely on.
    for i in 0..(Rank::NUM - 1) {
        assert_eq!(Bitboard::rank_mask(Rank(i as i32)) << 1, Bitboard::rank_mask(Rank(i as i32 + 1)));
    }
}

#[test]
fn test_opponent_field_mask() {
    for us in Color::ALL.iter() {
        for sq in Square::ALL.iter() {
            let rank = Rank::new(*sq);
            assert_eq!(rank.is_opponent_field(*us), Bitboard::opponent_field_mask(*us).is_set(*sq));
        }
    }
}

#[test]
fn test_pop_lsb_ascending() {
    let mut bb = Bitboard::ZERO;
    bb.set(Square::SQ99);
    bb.set(Square::SQ11);
    bb.set(Square::SQ55);
    bb.set(Square::SQ81);
    let squares: Vec<Square> = bb.collect();
    assert_eq!(squares, vec![Square::SQ11, Square::SQ55, Square::SQ81, Square::SQ99]);
    let mut bb = Bitboard::ZERO;
    assert_eq!(bb.pop_lsb(), None);
}

#[test]
fn test_clone() {
    let bb = Bitboard::ZERO;
    let bb2 = bb;
    assert_eq!(bb, bb2);
}
