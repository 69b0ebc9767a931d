use crate::types::*;

const PAWN_VALUE: i32 = 100;
const LANCE_VALUE: i32 = 200;
const KNIGHT_VALUE: i32 = 300;
const SILVER_VALUE: i32 = 400;
const BISHOP_VALUE: i32 = 800;
const ROOK_VALUE: i32 = 1000;
const GOLD_VALUE: i32 = 500;
const PRO_PAWN_VALUE: i32 = 500;
const PRO_LANCE_VALUE: i32 = 500;
const PRO_KNIGHT_VALUE: i32 = 500;
const PRO_SILVER_VALUE: i32 = 500;
const HORSE_VALUE: i32 = 1300;
const DRAGON_VALUE: i32 = 1500;
// The kings are never exchanged.
const KING_VALUE: i32 = 0;

const PIECE_TYPE_VALUES: [i32; PieceType::NUM] = [
    0,
    PAWN_VALUE,
    LANCE_VALUE,
    KNIGHT_VALUE,
    SILVER_VALUE,
    BISHOP_VALUE,
    ROOK_VALUE,
    GOLD_VALUE,
    KING_VALUE,
    PRO_PAWN_VALUE,
    PRO_LANCE_VALUE,
    PRO_KNIGHT_VALUE,
    PRO_SILVER_VALUE,
    HORSE_VALUE,
    DRAGON_VALUE,
];

// Signed by color: Black entries positive, White entries negated, so a
// board sum is a balance directly.
const PIECE_VALUES: [i32; Piece::NUM] = {
    let mut values = [0; Piece::NUM];
    let mut pt = 1;
    while pt < PieceType::NUM {
        values[pt] = PIECE_TYPE_VALUES[pt];
        values[pt + Piece::WHITE_BIT as usize] = -PIECE_TYPE_VALUES[pt];
        pt += 1;
    }
    values
};

pub fn piece_type_value(pt: PieceType) -> Value {
    debug_assert!(0 <= pt.0);
    debug_assert!((pt.0 as usize) < PieceType::NUM);
    unsafe { Value(*PIECE_TYPE_VALUES.get_unchecked(pt.0 as usize)) }
}
pub fn piece_value(pc: Piece) -> Value {
    debug_assert!(0 <= pc.0);
    debug_assert!((pc.0 as usize) < Piece::NUM);
    unsafe { Value(*PIECE_VALUES.get_unchecked(pc.0 as usize)) }
}

pub const HAND_MAX_NUM: usize = 18;

// Maximum pieces of each kind a hand can legally hold, indexed by kind.
const HAND_LIMITS: [usize; PieceType::HAND_NUM] = [0, 18, 4, 4, 4, 2, 2, 4];

// Worth of holding `num` pieces of a kind: cumulative, so a count change
// of one contributes the difference of two adjacent rows. Rows past the
// legal count stay zero.
const HAND_VALUES: [[i32; PieceType::HAND_NUM]; HAND_MAX_NUM + 1] = {
    let mut values = [[0; PieceType::HAND_NUM]; HAND_MAX_NUM + 1];
    let mut num = 0;
    while num <= HAND_MAX_NUM {
        let mut pt = 1;
        while pt < PieceType::HAND_NUM {
            if num <= HAND_LIMITS[pt] {
                values[num][pt] = num as i32 * PIECE_TYPE_VALUES[pt];
            }
            pt += 1;
        }
        num += 1;
    }
    values
};

/// Cumulative worth of `num` pieces of kind `pt` in hand, unsigned; the
/// holder's color sign is applied at the use site.
pub fn hand_value(pt: PieceType, num: u32) -> Value {
    debug_assert!(PieceType::PAWN.0 <= pt.0 && (pt.0 as usize) < PieceType::HAND_NUM);
    debug_assert!((num as usize) <= HAND_LIMITS[pt.0 as usize]);
    unsafe {
        Value(
            *HAND_VALUES
                .get_unchecked(num as usize)
                .get_unchecked(pt.0 as usize),
        )
    }
}

const PROMOTE_PIECE_VALUES: [i32; 7] = [
    0,
    PRO_PAWN_VALUE - PAWN_VALUE,
    PRO_LANCE_VALUE - LANCE_VALUE,
    PRO_KNIGHT_VALUE - KNIGHT_VALUE,
    PRO_SILVER_VALUE - SILVER_VALUE,
    HORSE_VALUE - BISHOP_VALUE,
    DRAGON_VALUE - ROOK_VALUE,
];

/// Board-value gain of promoting `pt`, before the color sign.
pub fn promote_piece_type_value(pt: PieceType) -> Value {
    debug_assert!(0 <= pt.0);
    debug_assert!((pt.0 as usize) < PROMOTE_PIECE_VALUES.len());
    unsafe { Value(*PROMOTE_PIECE_VALUES.get_unchecked(pt.0 as usize)) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_piece_type_value() {
        assert_eq!(piece_type_value(PieceType::PAWN), Value(100));
        assert_eq!(piece_type_value(PieceType::LANCE), Value(200));
        assert_eq!(piece_type_value(PieceType::KNIGHT), Value(300));
        assert_eq!(piece_type_value(PieceType::SILVER), Value(400));
        assert_eq!(piece_type_value(PieceType::BISHOP), Value(800));
        assert_eq!(piece_type_value(PieceType::ROOK), Value(1000));
        assert_eq!(piece_type_value(PieceType::GOLD), Value(500));
        assert_eq!(piece_type_value(PieceType::KING), Value(0));
        assert_eq!(piece_type_value(PieceType::PRO_PAWN), Value(500));
        assert_eq!(piece_type_value(PieceType::PRO_LANCE), Value(500));
        assert_eq!(piece_type_value(PieceType::PRO_KNIGHT), Value(500));
        assert_eq!(piece_type_value(PieceType::PRO_SILVER), Value(500));
        assert_eq!(piece_type_value(PieceType::HORSE), Value(1300));
        assert_eq!(piece_type_value(PieceType::DRAGON), Value(1500));
    }

    #[test]
    fn test_piece_value_signed_by_color() {
        assert_eq!(piece_value(Piece::EMPTY), Value(0));
        for &c in Color::ALL.iter() {
            for pt in PieceType::PAWN.0..PieceType::NUM as i32 {
                let pt = PieceType(pt);
                let pc = Piece::new(c, pt);
                assert_eq!(piece_value(pc), Value(c.sign() * piece_type_value(pt).0));
            }
        }
    }

    #[test]
    fn test_hand_value_cumulative() {
        for (&pt, &limit) in PieceType::ALL_HAND.iter().zip([18u32, 4, 4, 4, 2, 2, 4].iter()) {
            assert_eq!(hand_value(pt, 0), Value(0));
            for num in 1..=limit {
                assert_eq!(
                    hand_value(pt, num) - hand_value(pt, num - 1),
                    piece_type_value(pt)
                );
            }
        }
        assert_eq!(hand_value(PieceType::PAWN, 18), Value(1800));
        assert_eq!(hand_value(PieceType::ROOK, 2), Value(2000));
        assert_eq!(hand_value(PieceType::GOLD, 4), Value(2000));
    }

    #[test]
    fn test_promote_piece_value() {
        assert_eq!(promote_piece_type_value(PieceType::PAWN), Value(400));
        assert_eq!(promote_piece_type_value(PieceType::LANCE), Value(300));
        assert_eq!(promote_piece_type_value(PieceType::KNIGHT), Value(200));
        assert_eq!(promote_piece_type_value(PieceType::SILVER), Value(100));
        assert_eq!(promote_piece_type_value(PieceType::BISHOP), Value(500));
        assert_eq!(promote_piece_type_value(PieceType::ROOK), Value(500));
    }
}
