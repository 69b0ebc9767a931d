use crate::types::*;

// xxxxxxxx xxxxxxxx xxxxxxxx xxx11111  Pawn
// xxxxxxxx xxxxxxxx xxxxxxx1 11xxxxxx  Lance
// xxxxxxxx xxxxxxxx xxx111xx xxxxxxxx  Knight
// xxxxxxxx xxxxxxx1 11xxxxxx xxxxxxxx  Silver
// xxxxxxxx xxxx11xx xxxxxxxx xxxxxxxx  Bishop
// xxxxxxxx x11xxxxx xxxxxxxx xxxxxxxx  Rook
// xxxxx111 xxxxxxxx xxxxxxxx xxxxxxxx  Gold
//
// One spare bit above each field absorbs the borrow in
// is_equal_or_superior.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Hand(pub u32);

impl Hand {
    const PAWN_REQUIRE_BITS: u32 = 5;
    const LANCE_REQUIRE_BITS: u32 = 3;
    const KNIGHT_REQUIRE_BITS: u32 = 3;
    const SILVER_REQUIRE_BITS: u32 = 3;
    const BISHOP_REQUIRE_BITS: u32 = 2;
    const ROOK_REQUIRE_BITS: u32 = 2;
    const GOLD_REQUIRE_BITS: u32 = 3;

    const PAWN_SHIFT_BITS: u32 = 0;
    const LANCE_SHIFT_BITS: u32 = Hand::PAWN_SHIFT_BITS + Hand::PAWN_REQUIRE_BITS + 1;
    const KNIGHT_SHIFT_BITS: u32 = Hand::LANCE_SHIFT_BITS + Hand::LANCE_REQUIRE_BITS + 1;
    const SILVER_SHIFT_BITS: u32 = Hand::KNIGHT_SHIFT_BITS + Hand::KNIGHT_REQUIRE_BITS + 1;
    const BISHOP_SHIFT_BITS: u32 = Hand::SILVER_SHIFT_BITS + Hand::SILVER_REQUIRE_BITS + 1;
    const ROOK_SHIFT_BITS: u32 = Hand::BISHOP_SHIFT_BITS + Hand::BISHOP_REQUIRE_BITS + 1;
    const GOLD_SHIFT_BITS: u32 = Hand::ROOK_SHIFT_BITS + Hand::ROOK_REQUIRE_BITS + 1;

    const EXCEPT_PAWN_MASK: u32 = Hand::field_mask(PieceType::LANCE)
        | Hand::field_mask(PieceType::KNIGHT)
        | Hand::field_mask(PieceType::SILVER)
        | Hand::field_mask(PieceType::BISHOP)
        | Hand::field_mask(PieceType::ROOK)
        | Hand::field_mask(PieceType::GOLD);
    const BORROW_MASK: u32 = (Hand::field_mask(PieceType::PAWN) + Hand::one(PieceType::PAWN))
        | (Hand::field_mask(PieceType::LANCE) + Hand::one(PieceType::LANCE))
        | (Hand::field_mask(PieceType::KNIGHT) + Hand::one(PieceType::KNIGHT))
        | (Hand::field_mask(PieceType::SILVER) + Hand::one(PieceType::SILVER))
        | (Hand::field_mask(PieceType::BISHOP) + Hand::one(PieceType::BISHOP))
        | (Hand::field_mask(PieceType::ROOK) + Hand::one(PieceType::ROOK))
        | (Hand::field_mask(PieceType::GOLD) + Hand::one(PieceType::GOLD));

    const fn shift(pt: PieceType) -> u32 {
        match pt.0 {
            x if x == PieceType::PAWN.0 => Hand::PAWN_SHIFT_BITS,
            x if x == PieceType::LANCE.0 => Hand::LANCE_SHIFT_BITS,
            x if x == PieceType::KNIGHT.0 => Hand::KNIGHT_SHIFT_BITS,
            x if x == PieceType::SILVER.0 => Hand::SILVER_SHIFT_BITS,
            x if x == PieceType::BISHOP.0 => Hand::BISHOP_SHIFT_BITS,
            x if x == PieceType::ROOK.0 => Hand::ROOK_SHIFT_BITS,
            x if x == PieceType::GOLD.0 => Hand::GOLD_SHIFT_BITS,
            _ => unreachable!(),
        }
    }
    const fn field_mask(pt: PieceType) -> u32 {
        let bits = match pt.0 {
            x if x == PieceType::PAWN.0 => Hand::PAWN_REQUIRE_BITS,
            x if x == PieceType::LANCE.0 => Hand::LANCE_REQUIRE_BITS,
            x if x == PieceType::KNIGHT.0 => Hand::KNIGHT_REQUIRE_BITS,
            x if x == PieceType::SILVER.0 => Hand::SILVER_REQUIRE_BITS,
            x if x == PieceType::BISHOP.0 => Hand::BISHOP_REQUIRE_BITS,
            x if x == PieceType::ROOK.0 => Hand::ROOK_REQUIRE_BITS,
            x if x == PieceType::GOLD.0 => Hand::GOLD_REQUIRE_BITS,
            _ => unreachable!(),
        };
        ((1 << bits) - 1) << Hand::shift(pt)
    }
    const fn one(pt: PieceType) -> u32 {
        1 << Hand::shift(pt)
    }

    pub fn num(self, pt: PieceType) -> u32 {
        (self.0 & Hand::field_mask(pt)) >> Hand::shift(pt)
    }
    pub fn exist(self, pt: PieceType) -> bool {
        (self.0 & Hand::field_mask(pt)) != 0
    }
    pub fn except_pawn_exist(self) -> bool {
        (self.0 & Hand::EXCEPT_PAWN_MASK) != 0
    }
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
    pub fn set(&mut self, pt: PieceType, num: u32) {
        debug_assert_eq!(self.num(pt), 0);
        debug_assert!(num << Hand::shift(pt) <= Hand::field_mask(pt));
        self.0 |= num << Hand::shift(pt);
    }
    pub fn plus_one(&mut self, pt: PieceType) {
        self.0 += Hand::one(pt.to_demote_if_possible());
    }
    pub fn minus_one(&mut self, pt: PieceType) {
        debug_assert!(self.exist(pt.to_demote_if_possible()));
        self.0 -= Hand::one(pt.to_demote_if_possible());
    }
    /// True when every kind count in `self` is at least the count in
    /// `other`. Subtracting field-wise can only borrow into the spare
    /// bits, so one AND catches any deficit.
    pub fn is_equal_or_superior(self, other: Hand) -> bool {
        (self.0.wrapping_sub(other.0) & Hand::BORROW_MASK) == 0
    }
}

#[test]
fn test_hand_shift_bits() {
    assert_eq!(Hand::PAWN_SHIFT_BITS, 0);
    assert_eq!(Hand::BISHOP_SHIFT_BITS, 18);
    assert_eq!(Hand::ROOK_SHIFT_BITS, 21);
    assert_eq!(Hand::GOLD_SHIFT_BITS, 24);
}

#[test]
fn test_hand_num() {
    let hand = Hand(3 << Hand::LANCE_SHIFT_BITS);
    assert_eq!(hand.num(PieceType::PAWN), 0);
    assert_eq!(hand.num(PieceType::LANCE), 3);
    assert_eq!(hand.num(PieceType::KNIGHT), 0);
}

#[test]
fn test_hand_set() {
    let mut hand = Hand(0);
    hand.set(PieceType::LANCE, 2);
    hand.set(PieceType::GOLD, 4);
    hand.set(PieceType::BISHOP, 1);
    hand.minus_one(PieceType::GOLD);
    hand.plus_one(PieceType::BISHOP);
    assert_eq!(hand.num(PieceType::LANCE), 2);
    assert_eq!(hand.num(PieceType::GOLD), 3);
    assert_eq!(hand.num(PieceType::BISHOP), 2);

    let mut hand2: Hand = hand;
    assert_eq!(hand, hand2);
    hand2.minus_one(PieceType::LANCE);
    assert!(hand != hand2);
}

#[test]
fn test_hand_captured_promoted_piece() {
    // Captured promoted pieces go to hand as their base kind.
    let mut hand = Hand(0);
    hand.plus_one(PieceType::PRO_PAWN);
    hand.plus_one(PieceType::HORSE);
    hand.plus_one(PieceType::DRAGON);
    hand.plus_one(PieceType::PRO_SILVER);
    assert_eq!(hand.num(PieceType::PAWN), 1);
    assert_eq!(hand.num(PieceType::BISHOP), 1);
    assert_eq!(hand.num(PieceType::ROOK), 1);
    assert_eq!(hand.num(PieceType::SILVER), 1);
    assert_eq!(hand.num(PieceType::GOLD), 0);
}

#[test]
fn test_hand_is_equal_or_superior() {
    let mut hand = Hand(0);
    hand.set(PieceType::PAWN, 17);
    hand.set(PieceType::SILVER, 3);
    hand.set(PieceType::ROOK, 2);
    let mut hand2 = hand;
    assert_eq!(hand.is_equal_or_superior(hand2), true);
    assert_eq!(hand2.is_equal_or_superior(hand), true);
    hand2.minus_one(PieceType::PAWN);
    assert_eq!(hand.is_equal_or_superior(hand2), true);
    assert_eq!(hand2.is_equal_or_superior(hand), false);
    hand2.plus_one(PieceType::BISHOP);
    assert_eq!(hand.is_equal_or_superior(hand2), false);
    assert_eq!(hand2.is_equal_or_superior(hand), false);
}
