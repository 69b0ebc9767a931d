use crate::position::Position;
use crate::types::*;
use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};

/// A move packed into 32 bits.
///
/// Low half: bits 0..=6 destination, bits 7..=13 origin (or the dropped
/// piece kind when bit 14 is set), bit 14 drop, bit 15 promotion. The
/// high half is a caller-owned annotation value that never affects move
/// identity. The all-zero low half is the null move.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Move(pub u32);

impl Move {
    const TO_MASK: u32 = 0x7f;
    const FROM_SHIFT: u32 = 7;
    const FROM_MASK: u32 = 0x7f << Move::FROM_SHIFT;
    const DROP_FLAG: u32 = 1 << 14;
    const PROMOTE_FLAG: u32 = 1 << 15;
    const MOVE_MASK: u32 = 0xffff;
    const VALUE_SHIFT: u32 = 16;
    const VALUE_OFFSET: i32 = 0x8000;

    pub const NULL: Move = Move(0);

    pub fn new_unpromote(from: Square, to: Square) -> Move {
        debug_assert!(from.is_ok());
        debug_assert!(to.is_ok());
        Move(((from.0 as u32) << Move::FROM_SHIFT) | to.0 as u32)
    }
    pub fn new_promote(from: Square, to: Square) -> Move {
        Move(Move::new_unpromote(from, to).0 | Move::PROMOTE_FLAG)
    }
    pub fn new_drop(pt: PieceType, to: Square) -> Move {
        debug_assert!(to.is_ok());
        debug_assert!(PieceType::PAWN.0 <= pt.0 && pt.0 <= PieceType::GOLD.0);
        Move(Move::DROP_FLAG | ((pt.0 as u32) << Move::FROM_SHIFT) | to.0 as u32)
    }
    pub fn to(self) -> Square {
        Square((self.0 & Move::TO_MASK) as i32)
    }
    pub fn from(self) -> Square {
        debug_assert!(!self.is_drop());
        Square(((self.0 & Move::FROM_MASK) >> Move::FROM_SHIFT) as i32)
    }
    pub fn piece_type_dropped(self) -> PieceType {
        debug_assert!(self.is_drop());
        PieceType(((self.0 & Move::FROM_MASK) >> Move::FROM_SHIFT) as i32)
    }
    pub fn is_drop(self) -> bool {
        (self.0 & Move::DROP_FLAG) != 0
    }
    pub fn is_promotion(self) -> bool {
        (self.0 & Move::PROMOTE_FLAG) != 0
    }
    pub fn is_null(self) -> bool {
        (self.0 & Move::MOVE_MASK) == 0
    }

    // The three value channels share the high half; each write replaces
    // the previous annotation and leaves the move bits alone.
    pub fn set_value(&mut self, v: i32) {
        debug_assert!(-Move::VALUE_OFFSET <= v && v < Move::VALUE_OFFSET);
        self.0 = (self.0 & Move::MOVE_MASK) | ((((v + Move::VALUE_OFFSET) as u32) & 0xffff) << Move::VALUE_SHIFT);
    }
    pub fn value(self) -> i32 {
        (self.0 >> Move::VALUE_SHIFT) as i32 - Move::VALUE_OFFSET
    }
    pub fn set_pvalue(&mut self, v: i32) {
        debug_assert!(0 <= v && v <= 0xffff);
        self.0 = (self.0 & Move::MOVE_MASK) | (((v as u32) & 0xffff) << Move::VALUE_SHIFT);
    }
    pub fn pvalue(self) -> i32 {
        (self.0 >> Move::VALUE_SHIFT) as i32
    }
    pub fn set_nvalue(&mut self, v: i32) {
        debug_assert!(-0xffff <= v && v <= 0);
        self.0 = (self.0 & Move::MOVE_MASK) | ((((-v) as u32) & 0xffff) << Move::VALUE_SHIFT);
    }
    pub fn nvalue(self) -> i32 {
        -((self.0 >> Move::VALUE_SHIFT) as i32)
    }

    pub fn new_from_usi_str(s: &str, pos: &Position) -> Option<Move> {
        let m = Move::new_from_usi_str_unchecked(s)?;
        if pos.pseudo_legal(m) && pos.legal(m) {
            return Some(m);
        }
        None
    }
    // Parses the notation without consulting a position.
    pub fn new_from_usi_str_unchecked(s: &str) -> Option<Move> {
        let chars: Vec<char> = s.chars().collect();
        match chars.len() {
            4 | 5 => {}
            _ => return None,
        }
        if chars[1] == '*' {
            if chars.len() != 4 {
                return None;
            }
            let pt = PieceType::new_from_str_for_drop_move(&chars[0].to_string())?;
            let to = Square::new(File::new_from_usi_char(chars[2])?, Rank::new_from_usi_char(chars[3])?);
            Some(Move::new_drop(pt, to))
        } else {
            let from = Square::new(File::new_from_usi_char(chars[0])?, Rank::new_from_usi_char(chars[1])?);
            let to = Square::new(File::new_from_usi_char(chars[2])?, Rank::new_from_usi_char(chars[3])?);
            match chars.len() {
                4 => Some(Move::new_unpromote(from, to)),
                5 if chars[4] == '+' => Some(Move::new_promote(from, to)),
                _ => None,
            }
        }
    }
    pub fn new_from_csa_str(s: &str, pos: &Position) -> Option<Move> {
        if s.len() != 6 {
            return None;
        }
        let chars: Vec<char> = s.chars().collect();
        let pt = PieceType::new_from_csa_str(&s[4..6])?;
        let to = Square::new(File::new_from_csa_char(chars[2])?, Rank::new_from_csa_char(chars[3])?);
        let m = if &s[0..2] == "00" {
            Move::new_drop(pt, to)
        } else {
            let from = Square::new(File::new_from_csa_char(chars[0])?, Rank::new_from_csa_char(chars[1])?);
            let pc_moved = pos.piece_on(from);
            if pc_moved == Piece::EMPTY {
                return None;
            }
            let pt_moved = PieceType::new(pc_moved);
            if pt_moved == pt {
                Move::new_unpromote(from, to)
            } else if pt_moved.is_promotable() && pt_moved.to_promote() == pt {
                Move::new_promote(from, to)
            } else {
                return None;
            }
        };
        if pos.pseudo_legal(m) && pos.legal(m) {
            return Some(m);
        }
        None
    }
    pub fn to_usi_string(self) -> String {
        debug_assert!(!self.is_null());
        if self.is_drop() {
            format!("{}*{}", self.piece_type_dropped().to_usi_str(), self.to().to_usi_string())
        } else {
            format!(
                "{}{}{}",
                self.from().to_usi_string(),
                self.to().to_usi_string(),
                if self.is_promotion() { "+" } else { "" }
            )
        }
    }
    /// CSA needs to name the piece as it stands after the move, so the
    /// position the move belongs to is required.
    pub fn to_csa_string(self, pos: &Position) -> String {
        debug_assert!(!self.is_null());
        if self.is_drop() {
            format!("00{}{}", self.to().to_csa_string(), self.piece_type_dropped().to_csa_str())
        } else {
            let pt_moved = PieceType::new(pos.piece_on(self.from()));
            let pt_after = if self.is_promotion() { pt_moved.to_promote() } else { pt_moved };
            format!(
                "{}{}{}",
                self.from().to_csa_string(),
                self.to().to_csa_string(),
                pt_after.to_csa_str()
            )
        }
    }
}

impl std::fmt::Debug for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        if self.is_null() {
            write!(f, "Move(null)")
        } else {
            write!(f, "Move({})", self.to_usi_string())
        }
    }
}

/// USI notation carrier for the protocol boundary.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
pub struct UsiMove(pub String);

impl UsiMove {
    pub fn new(m: Move) -> UsiMove {
        UsiMove(m.to_usi_string())
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
pub struct CsaMove(pub String);

impl CsaMove {
    pub fn new(m: Move, pos: &Position) -> CsaMove {
        CsaMove(m.to_csa_string(pos))
    }
}

/// Upper bound on moves in any reachable position.
pub const MAX_LEGAL_MOVES: usize = 608;

/// Bounded append-only move buffer. Generators push into it and never
/// clear it; ownership of the contents stays with the caller.
#[derive(Debug, Clone, Default)]
pub struct MoveList {
    moves: ArrayVec<Move, MAX_LEGAL_MOVES>,
}

impl MoveList {
    pub fn new() -> MoveList {
        MoveList { moves: ArrayVec::new() }
    }
    pub fn push(&mut self, m: Move) {
        debug_assert!(!self.moves.is_full());
        self.moves.push(m);
    }
    pub fn len(&self) -> usize {
        self.moves.len()
    }
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }
    pub fn clear(&mut self) {
        self.moves.clear();
    }
    pub fn slice(&self) -> &[Move] {
        &self.moves
    }
    pub fn iter(&self) -> std::slice::Iter<'_, Move> {
        self.moves.iter()
    }
    pub fn contains(&self, m: Move) -> bool {
        self.moves.iter().any(|&x| x == m)
    }
    // Removes the move at `i` by swapping the last one into its place,
    // so filtering can walk the buffer without shifting the tail.
    pub(crate) fn swap_remove(&mut self, i: usize) -> Move {
        debug_assert!(i < self.moves.len());
        self.moves.swap_remove(i)
    }
}

impl std::ops::Index<usize> for MoveList {
    type Output = Move;
    fn index(&self, i: usize) -> &Move {
        &self.moves[i]
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;
    fn into_iter(self) -> Self::IntoIter {
        self.moves.iter()
    }
}

#[test]
fn test_move_round_trip() {
    for &from in Square::ALL.iter() {
        for &to in Square::ALL.iter() {
            let m = Move::new_unpromote(from, to);
            assert_eq!(m.to(), to);
            assert_eq!(m.from(), from);
            assert!(!m.is_drop());
            assert!(!m.is_promotion());
            let m = Move::new_promote(from, to);
            assert_eq!(m.to(), to);
            assert_eq!(m.from(), from);
            assert!(!m.is_drop());
            assert!(m.is_promotion());
        }
    }
    for &pt in PieceType::ALL_HAND.iter() {
        for &to in Square::ALL.iter() {
            let m = Move::new_drop(pt, to);
            assert_eq!(m.to(), to);
            assert_eq!(m.piece_type_dropped(), pt);
            assert!(m.is_drop());
            assert!(!m.is_promotion());
        }
    }
}

#[test]
fn test_move_is_null() {
    assert!(Move::NULL.is_null());
    // A stale annotation alone never turns a move into a real one.
    let mut m = Move::NULL;
    m.set_value(123);
    assert!(m.is_null());
    assert!(!Move::new_unpromote(Square::SQ77, Square::SQ76).is_null());
    assert!(!Move::new_drop(PieceType::PAWN, Square::SQ11).is_null());
}

#[test]
fn test_move_value_isolation() {
    let base = Move::new_promote(Square::SQ88, Square::SQ22);
    for &v in &[-0x8000, -1, 0, 1, 42, 0x7fff] {
        let mut m = base;
        m.set_value(v);
        assert_eq!(m.value(), v);
        assert_eq!(m.0 & 0xffff, base.0 & 0xffff);
        assert_eq!(m.to(), base.to());
        assert_eq!(m.from(), base.from());
        assert!(m.is_promotion());
    }
    let mut m = base;
    m.set_pvalue(0x1234);
    assert_eq!(m.pvalue(), 0x1234);
    assert_eq!(m.0 & 0xffff, base.0 & 0xffff);
    m.set_nvalue(-77);
    assert_eq!(m.nvalue(), -77);
    assert_eq!(m.0 & 0xffff, base.0 & 0xffff);
    // Each write fully replaces the previous annotation.
    m.set_value(0);
    assert_eq!(m.value(), 0);
}

#[test]
fn test_move_usi_string() {
    let m = Move::new_unpromote(Square::SQ77, Square::SQ76);
    assert_eq!(m.to_usi_string(), "7g7f");
    assert_eq!(Move::new_from_usi_str_unchecked("7g7f"), Some(m));
    let m = Move::new_promote(Square::SQ88, Square::SQ22);
    assert_eq!(m.to_usi_string(), "8h2b+");
    assert_eq!(Move::new_from_usi_str_unchecked("8h2b+"), Some(m));
    let m = Move::new_drop(PieceType::PAWN, Square::SQ55);
    assert_eq!(m.to_usi_string(), "P*5e");
    assert_eq!(Move::new_from_usi_str_unchecked("P*5e"), Some(m));
    assert_eq!(Move::new_from_usi_str_unchecked(""), None);
    assert_eq!(Move::new_from_usi_str_unchecked("7g7f++"), None);
    assert_eq!(Move::new_from_usi_str_unchecked("X*5e"), None);
    assert_eq!(Move::new_from_usi_str_unchecked("0g7f"), None);
}

#[test]
fn test_move_list_append() {
    let mut list = MoveList::new();
    assert!(list.is_empty());
    list.push(Move::new_unpromote(Square::SQ77, Square::SQ76));
    list.push(Move::new_drop(PieceType::GOLD, Square::SQ52));
    assert_eq!(list.len(), 2);
    assert_eq!(list[0], Move::new_unpromote(Square::SQ77, Square::SQ76));
    assert!(list.contains(Move::new_drop(PieceType::GOLD, Square::SQ52)));
    list.clear();
    assert!(list.is_empty());
}
