use crate::types::*;
use once_cell::sync::Lazy;

/// One of the 12 directions a shogi piece can move along: the 8 octant
/// directions plus the 4 keima jumps. North is toward rank 1, east is
/// toward file 1 (Black's point of view).
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Direction(pub i32);

impl Direction {
    pub const NONE: Direction = Direction(0);
    pub const E: Direction = Direction(1);
    pub const NE: Direction = Direction(2);
    pub const N: Direction = Direction(3);
    pub const NW: Direction = Direction(4);
    pub const KEIMA_NE: Direction = Direction(5);
    pub const KEIMA_NW: Direction = Direction(6);
    pub const KEIMA_SW: Direction = Direction(7);
    pub const KEIMA_SE: Direction = Direction(8);
    pub const W: Direction = Direction(9);
    pub const SW: Direction = Direction(10);
    pub const S: Direction = Direction(11);
    pub const SE: Direction = Direction(12);
    pub const NUM: usize = 13;

    // XORing an octant direction with REVERSE yields its opposite.
    // The keima directions have no opposite.
    pub const REVERSE: i32 = 8;

    pub const ALL: [Direction; 12] = [
        Direction::E,
        Direction::NE,
        Direction::N,
        Direction::NW,
        Direction::KEIMA_NE,
        Direction::KEIMA_NW,
        Direction::KEIMA_SW,
        Direction::KEIMA_SE,
        Direction::W,
        Direction::SW,
        Direction::S,
        Direction::SE,
    ];
    pub const OCTANTS: [Direction; 8] = [
        Direction::E,
        Direction::NE,
        Direction::N,
        Direction::NW,
        Direction::W,
        Direction::SW,
        Direction::S,
        Direction::SE,
    ];

    pub fn is_keima(self) -> bool {
        matches!(
            self,
            Direction::KEIMA_NE | Direction::KEIMA_NW | Direction::KEIMA_SW | Direction::KEIMA_SE
        )
    }
    pub fn reverse(self) -> Direction {
        debug_assert!(self != Direction::NONE && !self.is_keima());
        Direction(self.0 ^ Direction::REVERSE)
    }
    pub fn to_bit(self) -> DirectionBit {
        debug_assert!(self != Direction::NONE);
        DirectionBit(1 << (self.0 - 1))
    }
    /// The `Square` delta of a single step. Only safe to apply via
    /// `Square::checked_add` with a wrap guard.
    pub fn to_delta(self) -> Square {
        match self {
            Direction::E => Square::DELTA_E,
            Direction::NE => Square::DELTA_NE,
            Direction::N => Square::DELTA_N,
            Direction::NW => Square::DELTA_NW,
            Direction::KEIMA_NE => Square::DELTA_NNE,
            Direction::KEIMA_NW => Square::DELTA_NNW,
            Direction::KEIMA_SW => Square::DELTA_SSW,
            Direction::KEIMA_SE => Square::DELTA_SSE,
            Direction::W => Square::DELTA_W,
            Direction::SW => Square::DELTA_SW,
            Direction::S => Square::DELTA_S,
            Direction::SE => Square::DELTA_SE,
            _ => unreachable!(),
        }
    }
    // (file delta, rank delta) of a single step.
    fn deltas(self) -> (i32, i32) {
        match self {
            Direction::E => (-1, 0),
            Direction::NE => (-1, -1),
            Direction::N => (0, -1),
            Direction::NW => (1, -1),
            Direction::KEIMA_NE => (-1, -2),
            Direction::KEIMA_NW => (1, -2),
            Direction::KEIMA_SW => (1, 2),
            Direction::KEIMA_SE => (-1, 2),
            Direction::W => (1, 0),
            Direction::SW => (1, 1),
            Direction::S => (0, 1),
            Direction::SE => (-1, 1),
            _ => unreachable!(),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct DirectionBit(pub u16);

impl DirectionBit {
    pub const NONE: DirectionBit = DirectionBit(0);

    pub fn to_bool(self) -> bool {
        self.0 != 0
    }
}

impl std::ops::BitOr for DirectionBit {
    type Output = DirectionBit;
    fn bitor(self, rhs: DirectionBit) -> DirectionBit {
        DirectionBit(self.0 | rhs.0)
    }
}

impl std::ops::BitAnd for DirectionBit {
    type Output = DirectionBit;
    fn bitand(self, rhs: DirectionBit) -> DirectionBit {
        DirectionBit(self.0 & rhs.0)
    }
}

struct DirectionTable {
    adjacent: [[Direction; Square::NUM]; Square::NUM],
    adjacent_bit: [[DirectionBit; Square::NUM]; Square::NUM],
    distant: [[Direction; Square::NUM]; Square::NUM],
}

impl DirectionTable {
    fn new() -> Self {
        let mut adjacent = [[Direction::NONE; Square::NUM]; Square::NUM];
        let mut adjacent_bit = [[DirectionBit::NONE; Square::NUM]; Square::NUM];
        let mut distant = [[Direction::NONE; Square::NUM]; Square::NUM];
        for &from in Square::ALL.iter() {
            let f = File::new(from).0;
            let r = Rank::new(from).0;
            for &d in Direction::ALL.iter() {
                let (df, dr) = d.deltas();
                // one step away
                let (tf, tr) = (f + df, r + dr);
                if 0 <= tf && tf < File::NUM as i32 && 0 <= tr && tr < Rank::NUM as i32 {
                    let to = Square::new(File(tf), Rank(tr));
                    adjacent[from.0 as usize][to.0 as usize] = d;
                    adjacent_bit[from.0 as usize][to.0 as usize] = d.to_bit();
                }
                if d.is_keima() {
                    continue;
                }
                // any distance along the octant line
                let (mut tf, mut tr) = (f + df, r + dr);
                while 0 <= tf && tf < File::NUM as i32 && 0 <= tr && tr < Rank::NUM as i32 {
                    let to = Square::new(File(tf), Rank(tr));
                    distant[from.0 as usize][to.0 as usize] = d;
                    tf += df;
                    tr += dr;
                }
            }
        }
        DirectionTable {
            adjacent,
            adjacent_bit,
            distant,
        }
    }
}

static DIRECTION_TABLE: Lazy<DirectionTable> = Lazy::new(DirectionTable::new);

pub fn init() {
    Lazy::force(&DIRECTION_TABLE);
}

/// The direction connecting two directly neighboring squares (keima jumps
/// included), or `Direction::NONE` when they are not neighbors.
pub fn adjacent_direction(sq0: Square, sq1: Square) -> Direction {
    debug_assert!(sq0.is_ok());
    debug_assert!(sq1.is_ok());
    unsafe {
        *DIRECTION_TABLE
            .adjacent
            .get_unchecked(sq0.0 as usize)
            .get_unchecked(sq1.0 as usize)
    }
}

pub fn adjacent_direction_bit(sq0: Square, sq1: Square) -> DirectionBit {
    debug_assert!(sq0.is_ok());
    debug_assert!(sq1.is_ok());
    unsafe {
        *DIRECTION_TABLE
            .adjacent_bit
            .get_unchecked(sq0.0 as usize)
            .get_unchecked(sq1.0 as usize)
    }
}

/// The octant direction along which `sq1` lies from `sq0` at any distance,
/// or `Direction::NONE` when the squares are not colinear. Keima jumps are
/// never distant.
pub fn distant_direction(sq0: Square, sq1: Square) -> Direction {
    debug_assert!(sq0.is_ok());
    debug_assert!(sq1.is_ok());
    unsafe {
        *DIRECTION_TABLE
            .distant
            .get_unchecked(sq0.0 as usize)
            .get_unchecked(sq1.0 as usize)
    }
}

/// True if `sq0` and `sq1` lie on the same octant line out of `pivot`.
/// Used to let a pinned piece slide along its pin ray.
pub fn is_aligned(sq0: Square, sq1: Square, pivot: Square) -> bool {
    let d = distant_direction(pivot, sq0);
    d != Direction::NONE && d == distant_direction(pivot, sq1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_reverse() {
        assert_eq!(Direction::E.reverse(), Direction::W);
        assert_eq!(Direction::NE.reverse(), Direction::SW);
        assert_eq!(Direction::N.reverse(), Direction::S);
        assert_eq!(Direction::NW.reverse(), Direction::SE);
        for &d in Direction::OCTANTS.iter() {
            assert_eq!(d.reverse().reverse(), d);
        }
    }

    #[test]
    fn test_direction_bits_unique() {
        let mut acc = 0u16;
        for &d in Direction::ALL.iter() {
            let bit = d.to_bit().0;
            assert_eq!(bit.count_ones(), 1);
            assert_eq!(acc & bit, 0);
            acc |= bit;
        }
        assert_eq!(acc, 0x0fff);
    }

    #[test]
    fn test_adjacent_direction() {
        assert_eq!(adjacent_direction(Square::SQ55, Square::SQ54), Direction::N);
        assert_eq!(adjacent_direction(Square::SQ55, Square::SQ56), Direction::S);
        assert_eq!(adjacent_direction(Square::SQ55, Square::SQ45), Direction::E);
        assert_eq!(adjacent_direction(Square::SQ55, Square::SQ65), Direction::W);
        assert_eq!(adjacent_direction(Square::SQ55, Square::SQ44), Direction::NE);
        assert_eq!(adjacent_direction(Square::SQ55, Square::SQ66), Direction::SW);
        assert_eq!(adjacent_direction(Square::SQ55, Square::SQ43), Direction::KEIMA_NE);
        assert_eq!(adjacent_direction(Square::SQ55, Square::SQ63), Direction::KEIMA_NW);
        assert_eq!(adjacent_direction(Square::SQ55, Square::SQ53), Direction::NONE);
        assert_eq!(adjacent_direction(Square::SQ55, Square::SQ55), Direction::NONE);
        // symmetric neighbors see reversed octants
        for &sq0 in Square::ALL.iter() {
            for &sq1 in Square::ALL.iter() {
                let d = adjacent_direction(sq0, sq1);
                if d != Direction::NONE && !d.is_keima() {
                    assert_eq!(adjacent_direction(sq1, sq0), d.reverse());
                }
            }
        }
    }

    #[test]
    fn test_adjacent_direction_bit() {
        for &sq0 in Square::ALL.iter() {
            for &sq1 in Square::ALL.iter() {
                let d = adjacent_direction(sq0, sq1);
                let bit = adjacent_direction_bit(sq0, sq1);
                if d == Direction::NONE {
                    assert_eq!(bit, DirectionBit::NONE);
                } else {
                    assert_eq!(bit, d.to_bit());
                }
            }
        }
    }

    #[test]
    fn test_distant_direction() {
        assert_eq!(distant_direction(Square::SQ59, Square::SQ51), Direction::N);
        assert_eq!(distant_direction(Square::SQ51, Square::SQ59), Direction::S);
        assert_eq!(distant_direction(Square::SQ99, Square::SQ11), Direction::NE);
        assert_eq!(distant_direction(Square::SQ11, Square::SQ99), Direction::SW);
        assert_eq!(distant_direction(Square::SQ19, Square::SQ91), Direction::NW);
        assert_eq!(distant_direction(Square::SQ55, Square::SQ43), Direction::NONE); // keima
        assert_eq!(distant_direction(Square::SQ55, Square::SQ42), Direction::NONE);
        // adjacent octant squares are also distant
        for &sq0 in Square::ALL.iter() {
            for &sq1 in Square::ALL.iter() {
                let d = adjacent_direction(sq0, sq1);
                if d != Direction::NONE && !d.is_keima() {
                    assert_eq!(distant_direction(sq0, sq1), d);
                }
            }
        }
    }

    #[test]
    fn test_is_aligned() {
        // 5i, 5e on the file out of 5a
        assert!(is_aligned(Square::SQ59, Square::SQ55, Square::SQ51));
        // different rays out of 5e
        assert!(!is_aligned(Square::SQ51, Square::SQ45, Square::SQ55));
        // diagonal ray out of 9i
        assert!(is_aligned(Square::SQ88, Square::SQ77, Square::SQ99));
        assert!(!is_aligned(Square::SQ88, Square::SQ78, Square::SQ99));
    }
}
