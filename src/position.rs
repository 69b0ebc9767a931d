use crate::bitboard::Bitboard;
use crate::direction::is_aligned;
use crate::effect::{between_mask, EFFECT_TABLE};
use crate::hand::Hand;
use crate::movetypes::Move;
use crate::piecevalue::{hand_value, piece_type_value, promote_piece_type_value};
use crate::types::*;
use crate::zobrist::Zobrist;
use crate::SfenError;
use serde::{Deserialize, Serialize};

/// Check-related bitboards computed once per ply.
///
/// `check_squares[pt]` holds the squares from which a piece of kind `pt`
/// owned by the side to move would check the opponent king.
#[derive(Clone)]
pub struct CheckInfo {
    blockers_and_pinners_for_king: [(Bitboard, Bitboard); Color::NUM], // indexed by color of king
    check_squares: [Bitboard; PieceType::NUM],
}

impl CheckInfo {
    pub const ZERO: CheckInfo = CheckInfo {
        blockers_and_pinners_for_king: [(Bitboard::ZERO, Bitboard::ZERO); Color::NUM],
        check_squares: [Bitboard::ZERO; PieceType::NUM],
    };
    fn new(pos: &PositionBase) -> CheckInfo {
        let us = pos.side_to_move();
        let them = us.inverse();
        let ksq = pos.king_square(them);
        let bishop_check_squares = EFFECT_TABLE.bishop.magic(ksq).attack(&pos.occupied_bb());
        let rook_check_squares = EFFECT_TABLE.rook.magic(ksq).attack(&pos.occupied_bb());
        let gold_check_squares = EFFECT_TABLE.gold.attack(them, ksq);
        CheckInfo {
            blockers_and_pinners_for_king: [
                pos.slider_blockers_and_pinners(Color::WHITE, pos.king_square(Color::BLACK)),
                pos.slider_blockers_and_pinners(Color::BLACK, pos.king_square(Color::WHITE)),
            ],
            check_squares: [
                Bitboard::ZERO,                                           // PieceType::OCCUPIED
                EFFECT_TABLE.pawn.attack(them, ksq),                      // PieceType::PAWN
                EFFECT_TABLE.lance.attack(them, ksq, &pos.occupied_bb()), // PieceType::LANCE
                EFFECT_TABLE.knight.attack(them, ksq),                    // PieceType::KNIGHT
                EFFECT_TABLE.silver.attack(them, ksq),                    // PieceType::SILVER
                bishop_check_squares,                                     // PieceType::BISHOP
                rook_check_squares,                                       // PieceType::ROOK
                gold_check_squares,                                       // PieceType::GOLD
                Bitboard::ZERO,                                           // PieceType::KING
                gold_check_squares,                                       // PieceType::PRO_PAWN
                gold_check_squares,                                       // PieceType::PRO_LANCE
                gold_check_squares,                                       // PieceType::PRO_KNIGHT
                gold_check_squares,                                       // PieceType::PRO_SILVER
                bishop_check_squares | EFFECT_TABLE.king.attack(ksq),     // PieceType::HORSE
                rook_check_squares | EFFECT_TABLE.king.attack(ksq),       // PieceType::DRAGON
            ],
        }
    }
    fn blockers_for_king(&self, color_of_king: Color) -> Bitboard {
        debug_assert!((color_of_king.0 as usize) < Color::NUM);
        unsafe { self.blockers_and_pinners_for_king.get_unchecked(color_of_king.0 as usize).0 }
    }
    fn pinners_for_king(&self, color_of_king: Color) -> Bitboard {
        debug_assert!((color_of_king.0 as usize) < Color::NUM);
        unsafe { self.blockers_and_pinners_for_king.get_unchecked(color_of_king.0 as usize).1 }
    }
}

/// Outcome of the repetition scan over earlier plies of this game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Repetition {
    Not,
    Draw,
    Win,      // the opponent kept checking through the repetition
    Lose,     // we kept checking through the repetition
    Superior, // same board, our hand strictly dominates the earlier one
    Inferior, // same board, our hand is dominated by the earlier one
}

/// Everything restored by `undo_move` that is cheaper to remember than to
/// recompute. One entry per ply, the bottom entry belonging to the root
/// position.
#[derive(Clone)]
pub struct StateInfo {
    exchange: Value,
    plies_from_root: i32,
    continuous_checks: [i32; Color::NUM],
    board_key: Key,
    hand_key: Key,
    hand_of_side_to_move: Hand,
    checkers: Bitboard,
    captured_piece: Piece,
    check_info: CheckInfo,
}

impl StateInfo {
    fn new_from_old_state(old_state: &StateInfo) -> StateInfo {
        StateInfo {
            exchange: old_state.exchange,
            plies_from_root: old_state.plies_from_root,
            continuous_checks: old_state.continuous_checks,
            board_key: Key::ZERO,
            hand_key: Key::ZERO,
            hand_of_side_to_move: Hand(0),
            checkers: Bitboard::ZERO,
            captured_piece: Piece::EMPTY,
            check_info: CheckInfo::ZERO,
        }
    }
    fn new_from_position(pos: &PositionBase) -> StateInfo {
        let us = pos.side_to_move();
        let them = us.inverse();
        let king_sq = pos.king_square(us);
        StateInfo {
            exchange: StateInfo::new_exchange(pos),
            plies_from_root: 0,
            continuous_checks: [0, 0],
            board_key: StateInfo::new_board_key(pos),
            hand_key: StateInfo::new_hand_key(pos),
            hand_of_side_to_move: pos.hand(us),
            checkers: pos.attackers_to_except_king(them, king_sq, &pos.occupied_bb()),
            captured_piece: Piece::EMPTY,
            check_info: CheckInfo::new(pos),
        }
    }
    fn new_exchange(pos: &PositionBase) -> Value {
        let mut val = Value::ZERO;
        for &pt in [
            PieceType::PAWN,
            PieceType::LANCE,
            PieceType::KNIGHT,
            PieceType::SILVER,
            PieceType::BISHOP,
            PieceType::ROOK,
            PieceType::GOLD,
            PieceType::PRO_PAWN,
            PieceType::PRO_LANCE,
            PieceType::PRO_KNIGHT,
            PieceType::PRO_SILVER,
            PieceType::HORSE,
            PieceType::DRAGON,
        ]
        .iter()
        {
            let num = pos.pieces_cp(Color::BLACK, pt).count_ones() as i32 - pos.pieces_cp(Color::WHITE, pt).count_ones() as i32;
            val += Value(num * piece_type_value(pt).0);
        }
        for &c in Color::ALL.iter() {
            for &pt in PieceType::ALL_HAND.iter() {
                val += Value(c.sign() * hand_value(pt, pos.hand(c).num(pt)).0);
            }
        }
        val
    }
    fn new_board_key(pos: &PositionBase) -> Key {
        let mut key = Key::ZERO;
        for sq in pos.occupied_bb() {
            key ^= Zobrist::board(sq, pos.piece_on(sq));
        }
        if pos.side_to_move() == Color::WHITE {
            key ^= Zobrist::COLOR;
        }
        key
    }
    fn new_hand_key(pos: &PositionBase) -> Key {
        let mut key = Key::ZERO;
        for &c in Color::ALL.iter() {
            for &pt in PieceType::ALL_HAND.iter() {
                key = key.wrapping_add(Zobrist::hand(c, pt).wrapping_mul_scalar(u64::from(pos.hand(c).num(pt))));
            }
        }
        key
    }
    fn key(&self) -> Key {
        self.board_key ^ self.hand_key
    }
    fn continuous_check(&self, c: Color) -> i32 {
        debug_assert!(0 <= c.0 && (c.0 as usize) < self.continuous_checks.len());
        unsafe { *self.continuous_checks.get_unchecked(c.0 as usize) }
    }
    fn is_capture_move(&self) -> bool {
        self.captured_piece != Piece::EMPTY
    }
}

/// A serializable snapshot of a game state: board contents square by
/// square, hand counts, side to move and move counter. This is the
/// exchange format for building a `Position` from external data; nothing
/// derived (bitboards, keys, material) is stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSummary {
    /// One entry per square in square-index order, `Piece::EMPTY` for
    /// vacant squares.
    pub board: Vec<Piece>,
    /// Hand counts indexed by color and piece kind. Only the seven
    /// droppable kinds are meaningful; other slots must stay zero.
    pub hands: [[u32; PieceType::HAND_NUM]; Color::NUM],
    pub side_to_move: Color,
    pub game_ply: i32,
}

impl GameSummary {
    pub fn new_from_sfen(sfen: &str) -> Result<GameSummary, SfenError> {
        let sfen_vec: Vec<&str> = sfen.split_whitespace().collect();
        GameSummary::new_from_sfen_args(&sfen_vec)
    }
    pub fn new_from_sfen_args(sfen_slice: &[&str]) -> Result<GameSummary, SfenError> {
        if sfen_slice.len() < 4 {
            return Err(SfenError::InvalidNumberOfSections {
                sections: sfen_slice.len(),
            });
        }
        let board_str = sfen_slice[0];
        let side_to_move_str = sfen_slice[1];
        let hands_str = sfen_slice[2];
        let game_ply_str = sfen_slice[3];
        let mut summary = GameSummary {
            board: vec![Piece::EMPTY; Square::NUM],
            hands: [[0; PieceType::HAND_NUM]; Color::NUM],
            side_to_move: Color::BLACK,
            game_ply: 0,
        };
        let rank_str_vec: Vec<&str> = board_str.split('/').collect();
        if rank_str_vec.len() != Rank::NUM {
            return Err(SfenError::InvalidNumberOfRanks {
                ranks: rank_str_vec.len(),
            });
        }
        for (rank_idx, rank) in Rank::ALL.iter().enumerate() {
            let rank_str = rank_str_vec[rank_idx];
            let mut file_idx: usize = 0;
            let re = regex::Regex::new(r"(\d+|\+?[[:alpha:]])").unwrap();
            for cap in re.captures_iter(rank_str) {
                if file_idx >= File::NUM {
                    return Err(SfenError::InvalidNumberOfFiles { files: file_idx });
                }
                let token: &str = &cap[0];
                if let Ok(digit) = token.to_string().parse::<i64>() {
                    if digit <= 0 || (File::NUM as i64) < digit || (File::NUM as i64) < (file_idx as i64) + digit {
                        return Err(SfenError::InvalidNumberOfEmptySquares { empty_squares: digit });
                    }
                    file_idx += digit as usize;
                } else if let Some(pc) = Piece::new_from_str(token) {
                    let sq = Square::new(File::ALL_FROM_LEFT[file_idx], *rank);
                    summary.board[sq.0 as usize] = pc;
                    file_idx += 1;
                } else {
                    return Err(SfenError::InvalidPieceCharactors {
                        token: token.to_string(),
                    });
                }
            }
        }
        match side_to_move_str {
            "b" => summary.side_to_move = Color::BLACK,
            "w" => summary.side_to_move = Color::WHITE,
            _ => {
                return Err(SfenError::InvalidSideToMoveCharactors {
                    chars: side_to_move_str.to_string(),
                });
            }
        }
        if hands_str != "-" {
            let mut hand_num: i64 = 1;
            let re = regex::Regex::new(r"(\d+|[[:alpha:]])").unwrap();
            for cap in re.captures_iter(hands_str) {
                let token: &str = &cap[0];
                if let Ok(digit) = token.to_string().parse::<i64>() {
                    if digit <= 0 {
                        return Err(SfenError::InvalidNumberOfHandPieces { number: digit });
                    }
                    hand_num = digit;
                } else if let Some(pc) = Piece::new_hand_piece_from_str(token) {
                    let pt = PieceType::new(pc);
                    let c = Color::new(pc);
                    match pt {
                        PieceType::PAWN if 18 < hand_num => {
                            return Err(SfenError::InvalidNumberOfPawns { number: hand_num });
                        }
                        PieceType::LANCE if 4 < hand_num => {
                            return Err(SfenError::InvalidNumberOfLances { number: hand_num });
                        }
                        PieceType::KNIGHT if 4 < hand_num => {
                            return Err(SfenError::InvalidNumberOfKnights { number: hand_num });
                        }
                        PieceType::SILVER if 4 < hand_num => {
                            return Err(SfenError::InvalidNumberOfSilvers { number: hand_num });
                        }
                        PieceType::GOLD if 4 < hand_num => {
                            return Err(SfenError::InvalidNumberOfGolds { number: hand_num });
                        }
                        PieceType::BISHOP if 2 < hand_num => {
                            return Err(SfenError::InvalidNumberOfBishops { number: hand_num });
                        }
                        PieceType::ROOK if 2 < hand_num => {
                            return Err(SfenError::InvalidNumberOfRooks { number: hand_num });
                        }
                        _ => {
                            if summary.hands[c.0 as usize][pt.0 as usize] != 0 {
                                return Err(SfenError::SameHandPieceTwice {
                                    token: token.to_string(),
                                });
                            }
                            summary.hands[c.0 as usize][pt.0 as usize] = hand_num as u32;
                            hand_num = 1; // reset hand_num
                        }
                    };
                } else {
                    return Err(SfenError::InvalidHandPieceCharactors {
                        token: token.to_string(),
                    });
                }
            }
            if hand_num != 1 {
                return Err(SfenError::EndWithHandPieceNumber { last_number: hand_num });
            }
        }
        match game_ply_str.to_string().parse::<i32>() {
            Ok(game_ply) if 1 <= game_ply => summary.game_ply = game_ply,
            Ok(_) | Err(_) => {
                return Err(SfenError::InvalidGamePly {
                    chars: game_ply_str.to_string(),
                });
            }
        }
        Ok(summary)
    }
}

/// The board-only part of a position: piece placement, hands, side to
/// move and the bitboards derived from them. No per-ply history.
pub struct PositionBase {
    board: [Piece; Square::NUM],
    by_type_bb: [Bitboard; PieceType::NUM],
    by_color_bb: [Bitboard; Color::NUM],
    golds_bb: Bitboard,
    hands: [Hand; Color::NUM],
    game_ply: i32,
    king_squares: [Square; Color::NUM],
    side_to_move: Color,
}

impl PositionBase {
    /// Builds the board representation from a summary, rejecting
    /// summaries that cannot come from a real game. Summaries made by
    /// hand go through the same checks as parsed SFEN input.
    pub fn new_from_summary(summary: &GameSummary) -> Result<PositionBase, SfenError> {
        if summary.board.len() != Square::NUM {
            return Err(SfenError::InvalidNumberOfSquares {
                squares: summary.board.len(),
            });
        }
        if summary.side_to_move != Color::BLACK && summary.side_to_move != Color::WHITE {
            return Err(SfenError::InvalidSideToMoveCharactors {
                chars: summary.side_to_move.0.to_string(),
            });
        }
        if summary.game_ply < 1 {
            return Err(SfenError::InvalidGamePly {
                chars: summary.game_ply.to_string(),
            });
        }
        let mut pos = PositionBase {
            board: [Piece::EMPTY; Square::NUM],
            by_type_bb: [Bitboard::ZERO; PieceType::NUM],
            by_color_bb: [Bitboard::ZERO; Color::NUM],
            golds_bb: Bitboard::ZERO,
            hands: [Hand(0); Color::NUM],
            game_ply: summary.game_ply,
            king_squares: [Square(0), Square(0)],
            side_to_move: summary.side_to_move,
        };
        for &sq in Square::ALL.iter() {
            let pc = summary.board[sq.0 as usize];
            if pc == Piece::EMPTY {
                continue;
            }
            if !PositionBase::is_valid_piece(pc) {
                return Err(SfenError::InvalidPieceCharactors {
                    token: pc.0.to_string(),
                });
            }
            pos.board[sq.0 as usize] = pc;
            pos.by_type_bb[PieceType::OCCUPIED.0 as usize].set(sq);
            pos.by_type_bb[PieceType::new(pc).0 as usize].set(sq);
            pos.by_color_bb[Color::new(pc).0 as usize].set(sq);
        }
        pos.set_golds_bb();
        for c in Color::ALL.iter() {
            let mut bb = pos.pieces_cp(*c, PieceType::KING);
            match bb.pop_lsb() {
                Some(sq) => pos.king_squares[c.0 as usize] = sq,
                None => return Err(SfenError::KingIsNothing { c: *c }),
            }
        }
        for &c in Color::ALL.iter() {
            for (pt_index, &num) in summary.hands[c.0 as usize].iter().enumerate() {
                if num == 0 {
                    continue;
                }
                let pt = PieceType(pt_index as i32);
                if !PieceType::ALL_HAND.contains(&pt) || u64::from(num) > PositionBase::hand_limit(pt) {
                    return Err(SfenError::InvalidNumberOfHandPieces {
                        number: i64::from(num),
                    });
                }
                pos.hands[c.0 as usize].set(pt, num);
            }
        }
        fn check_pieces(pos: &PositionBase, pts: &[PieceType], max: i64) -> Result<(), SfenError> {
            let number = i64::from(
                pts.iter().fold(0, |sum, &pt| sum + pos.pieces_p(pt).count_ones())
                    + pos.hands.iter().fold(0, |sum, hand| sum + hand.num(pts[0])),
            );
            if number <= max {
                Ok(())
            } else {
                match pts[0] {
                    PieceType::PAWN => Err(SfenError::InvalidNumberOfPawns { number }),
                    PieceType::LANCE => Err(SfenError::InvalidNumberOfLances { number }),
                    PieceType::KNIGHT => Err(SfenError::InvalidNumberOfKnights { number }),
                    PieceType::SILVER => Err(SfenError::InvalidNumberOfSilvers { number }),
                    PieceType::GOLD => Err(SfenError::InvalidNumberOfGolds { number }),
                    PieceType::BISHOP => Err(SfenError::InvalidNumberOfBishops { number }),
                    PieceType::ROOK => Err(SfenError::InvalidNumberOfRooks { number }),
                    _ => unreachable!(),
                }
            }
        }
        check_pieces(&pos, &[PieceType::PAWN, PieceType::PRO_PAWN], 18)?;
        check_pieces(&pos, &[PieceType::LANCE, PieceType::PRO_LANCE], 4)?;
        check_pieces(&pos, &[PieceType::KNIGHT, PieceType::PRO_KNIGHT], 4)?;
        check_pieces(&pos, &[PieceType::SILVER, PieceType::PRO_SILVER], 4)?;
        check_pieces(&pos, &[PieceType::GOLD], 4)?;
        check_pieces(&pos, &[PieceType::BISHOP, PieceType::HORSE], 2)?;
        check_pieces(&pos, &[PieceType::ROOK, PieceType::DRAGON], 2)?;
        Ok(pos)
    }
    fn is_valid_piece(pc: Piece) -> bool {
        (Piece::B_PAWN.0..=Piece::B_DRAGON.0).contains(&pc.0) || (Piece::W_PAWN.0..=Piece::W_DRAGON.0).contains(&pc.0)
    }
    fn hand_limit(pt: PieceType) -> u64 {
        match pt {
            PieceType::PAWN => 18,
            PieceType::BISHOP | PieceType::ROOK => 2,
            _ => 4,
        }
    }
    pub fn to_summary(&self) -> GameSummary {
        let mut hands = [[0; PieceType::HAND_NUM]; Color::NUM];
        for &c in Color::ALL.iter() {
            for &pt in PieceType::ALL_HAND.iter() {
                hands[c.0 as usize][pt.0 as usize] = self.hand(c).num(pt);
            }
        }
        GameSummary {
            board: self.board.to_vec(),
            hands,
            side_to_move: self.side_to_move,
            game_ply: self.game_ply,
        }
    }
    fn pieces_c(&self, c: Color) -> Bitboard {
        debug_assert!((c.0 as usize) < Color::NUM);
        unsafe { *self.by_color_bb.get_unchecked(c.0 as usize) }
    }
    fn pieces_p(&self, pt: PieceType) -> Bitboard {
        debug_assert!((pt.0 as usize) < PieceType::NUM);
        unsafe { *self.by_type_bb.get_unchecked(pt.0 as usize) }
    }
    fn pieces_cp(&self, c: Color, pt: PieceType) -> Bitboard {
        self.pieces_c(c) & self.pieces_p(pt)
    }
    fn pieces_pp(&self, pt0: PieceType, pt1: PieceType) -> Bitboard {
        self.pieces_p(pt0) | self.pieces_p(pt1)
    }
    fn pieces_cpp(&self, c: Color, pt0: PieceType, pt1: PieceType) -> Bitboard {
        self.pieces_c(c) & self.pieces_pp(pt0, pt1)
    }
    fn pieces_ppp(&self, pt0: PieceType, pt1: PieceType, pt2: PieceType) -> Bitboard {
        self.pieces_pp(pt0, pt1) | self.pieces_p(pt2)
    }
    fn pieces_pppp(&self, pt0: PieceType, pt1: PieceType, pt2: PieceType, pt3: PieceType) -> Bitboard {
        self.pieces_ppp(pt0, pt1, pt2) | self.pieces_p(pt3)
    }
    fn pieces_ppppp(&self, pt0: PieceType, pt1: PieceType, pt2: PieceType, pt3: PieceType, pt4: PieceType) -> Bitboard {
        self.pieces_pppp(pt0, pt1, pt2, pt3) | self.pieces_p(pt4)
    }
    pub fn pieces_golds(&self) -> Bitboard {
        debug_assert_eq!(
            self.golds_bb,
            self.pieces_ppppp(
                PieceType::GOLD,
                PieceType::PRO_PAWN,
                PieceType::PRO_LANCE,
                PieceType::PRO_KNIGHT,
                PieceType::PRO_SILVER
            )
        );
        self.golds_bb
    }
    fn set_golds_bb(&mut self) {
        self.golds_bb = self.pieces_ppppp(
            PieceType::GOLD,
            PieceType::PRO_PAWN,
            PieceType::PRO_LANCE,
            PieceType::PRO_KNIGHT,
            PieceType::PRO_SILVER,
        );
    }
    pub fn piece_on(&self, sq: Square) -> Piece {
        debug_assert!((sq.0 as usize) < Square::NUM);
        unsafe { *self.board.get_unchecked(sq.0 as usize) }
    }
    pub fn occupied_bb(&self) -> Bitboard {
        unsafe { *self.by_type_bb.get_unchecked(PieceType::OCCUPIED.0 as usize) }
    }
    pub fn empty_bb(&self) -> Bitboard {
        Bitboard::ALL & !self.occupied_bb()
    }
    pub fn hand(&self, c: Color) -> Hand {
        debug_assert!((c.0 as usize) < Color::NUM);
        unsafe { *self.hands.get_unchecked(c.0 as usize) }
    }
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }
    pub fn king_square(&self, c: Color) -> Square {
        debug_assert!((c.0 as usize) < Color::NUM);
        unsafe { *self.king_squares.get_unchecked(c.0 as usize) }
    }
    fn xor_bbs(&mut self, c: Color, pt: PieceType, sq: Square) {
        debug_assert!(0 <= c.0 && (c.0 as usize) < Color::NUM);
        debug_assert!(0 <= pt.0 && (pt.0 as usize) < PieceType::NUM);
        debug_assert!(0 <= sq.0 && (sq.0 as usize) < Square::NUM);
        unsafe {
            self.by_type_bb.get_unchecked_mut(PieceType::OCCUPIED.0 as usize).xor(sq);
            self.by_type_bb.get_unchecked_mut(pt.0 as usize).xor(sq);
            self.by_color_bb.get_unchecked_mut(c.0 as usize).xor(sq);
        }
    }
    fn put_piece(&mut self, pc: Piece, sq: Square) {
        debug_assert!(!self.pieces_p(PieceType::new(pc)).is_set(sq));
        debug_assert!(!self.pieces_c(Color::new(pc)).is_set(sq));
        debug_assert!(!self.occupied_bb().is_set(sq));
        self.xor_bbs(Color::new(pc), PieceType::new(pc), sq);
        unsafe {
            *self.board.get_unchecked_mut(sq.0 as usize) = pc;
        }
    }
    fn remove_piece(&mut self, pc: Piece, sq: Square) {
        debug_assert!(self.pieces_p(PieceType::new(pc)).is_set(sq));
        debug_assert!(self.pieces_c(Color::new(pc)).is_set(sq));
        debug_assert!(self.occupied_bb().is_set(sq));
        debug_assert_eq!(self.piece_on(sq), pc);
        self.xor_bbs(Color::new(pc), PieceType::new(pc), sq);
        unsafe {
            *self.board.get_unchecked_mut(sq.0 as usize) = Piece::EMPTY;
        }
    }
    // Replaces the piece on `sq` with `pc_new` of the other color in one
    // step; used when undoing a capture.
    fn exchange_pieces(&mut self, pc_new: Piece, sq: Square) {
        let pt_new = PieceType::new(pc_new);
        let pc_old = self.piece_on(sq);
        let pt_old = PieceType::new(pc_old);
        let color_old = Color::new(pc_old);
        let color_new = color_old.inverse();
        debug_assert!(self.pieces_p(pt_old).is_set(sq));
        debug_assert!(self.pieces_c(color_old).is_set(sq));
        unsafe {
            self.by_type_bb.get_unchecked_mut(pt_old.0 as usize).xor(sq);
            self.by_type_bb.get_unchecked_mut(pt_new.0 as usize).xor(sq);
            self.by_color_bb.get_unchecked_mut(color_old.0 as usize).xor(sq);
            self.by_color_bb.get_unchecked_mut(color_new.0 as usize).xor(sq);
            *self.board.get_unchecked_mut(sq.0 as usize) = pc_new;
        }
        debug_assert!(self.pieces_p(pt_new).is_set(sq));
        debug_assert!(self.pieces_c(color_new).is_set(sq));
    }
    pub fn attackers_to(&self, color_of_attackers: Color, to: Square, occupied: &Bitboard) -> Bitboard {
        let opp = color_of_attackers.inverse();
        let golds = self.pieces_golds();
        ((EFFECT_TABLE.pawn.attack(opp, to) & self.pieces_p(PieceType::PAWN))
            | (EFFECT_TABLE.lance.attack(opp, to, occupied) & self.pieces_p(PieceType::LANCE))
            | (EFFECT_TABLE.knight.attack(opp, to) & self.pieces_p(PieceType::KNIGHT))
            | (EFFECT_TABLE.silver.attack(opp, to) & (self.pieces_ppp(PieceType::SILVER, PieceType::KING, PieceType::DRAGON)))
            | (EFFECT_TABLE.gold.attack(opp, to) & (golds | self.pieces_pp(PieceType::KING, PieceType::HORSE)))
            | (EFFECT_TABLE.bishop.magic(to).attack(occupied) & (self.pieces_pp(PieceType::BISHOP, PieceType::HORSE)))
            | (EFFECT_TABLE.rook.magic(to).attack(occupied) & (self.pieces_pp(PieceType::ROOK, PieceType::DRAGON))))
            & self.pieces_c(color_of_attackers)
    }
    pub fn attackers_to_except_king(&self, color_of_attackers: Color, to: Square, occupied: &Bitboard) -> Bitboard {
        let opp = color_of_attackers.inverse();
        let golds = self.pieces_golds();
        ((EFFECT_TABLE.pawn.attack(opp, to) & self.pieces_p(PieceType::PAWN))
            | (EFFECT_TABLE.lance.attack(opp, to, occupied) & self.pieces_p(PieceType::LANCE))
            | (EFFECT_TABLE.knight.attack(opp, to) & self.pieces_p(PieceType::KNIGHT))
            | (EFFECT_TABLE.silver.attack(opp, to) & (self.pieces_pp(PieceType::SILVER, PieceType::DRAGON)))
            | (EFFECT_TABLE.gold.attack(opp, to) & (golds | self.pieces_p(PieceType::HORSE)))
            | (EFFECT_TABLE.bishop.magic(to).attack(occupied) & (self.pieces_pp(PieceType::BISHOP, PieceType::HORSE)))
            | (EFFECT_TABLE.rook.magic(to).attack(occupied) & (self.pieces_pp(PieceType::ROOK, PieceType::DRAGON))))
            & self.pieces_c(color_of_attackers)
    }
    pub fn attackers_to_except_king_lance_pawn(&self, color_of_attackers: Color, to: Square, occupied: &Bitboard) -> Bitboard {
        let opp = color_of_attackers.inverse();
        let golds = self.pieces_golds();
        ((EFFECT_TABLE.knight.attack(opp, to) & self.pieces_p(PieceType::KNIGHT))
            | (EFFECT_TABLE.silver.attack(opp, to) & (self.pieces_pp(PieceType::SILVER, PieceType::DRAGON)))
            | (EFFECT_TABLE.gold.attack(opp, to) & (golds | self.pieces_p(PieceType::HORSE)))
            | (EFFECT_TABLE.bishop.magic(to).attack(occupied) & (self.pieces_pp(PieceType::BISHOP, PieceType::HORSE)))
            | (EFFECT_TABLE.rook.magic(to).attack(occupied) & (self.pieces_pp(PieceType::ROOK, PieceType::DRAGON))))
            & self.pieces_c(color_of_attackers)
    }
    pub fn attackers_to_both_color(&self, to: Square, occupied: &Bitboard) -> Bitboard {
        let golds = self.pieces_golds();
        (((EFFECT_TABLE.pawn.attack(Color::BLACK, to) & self.pieces_p(PieceType::PAWN))
            | (EFFECT_TABLE.lance.attack(Color::BLACK, to, occupied) & self.pieces_p(PieceType::LANCE))
            | (EFFECT_TABLE.knight.attack(Color::BLACK, to) & self.pieces_p(PieceType::KNIGHT))
            | (EFFECT_TABLE.silver.attack(Color::BLACK, to) & self.pieces_p(PieceType::SILVER))
            | (EFFECT_TABLE.gold.attack(Color::BLACK, to) & golds))
            & self.pieces_c(Color::WHITE))
            | (((EFFECT_TABLE.pawn.attack(Color::WHITE, to) & self.pieces_p(PieceType::PAWN))
                | (EFFECT_TABLE.lance.attack(Color::WHITE, to, occupied) & self.pieces_p(PieceType::LANCE))
                | (EFFECT_TABLE.knight.attack(Color::WHITE, to) & self.pieces_p(PieceType::KNIGHT))
                | (EFFECT_TABLE.silver.attack(Color::WHITE, to) & self.pieces_p(PieceType::SILVER))
                | (EFFECT_TABLE.gold.attack(Color::WHITE, to) & golds))
                & self.pieces_c(Color::BLACK))
            | (EFFECT_TABLE.bishop.magic(to).attack(occupied) & (self.pieces_pp(PieceType::BISHOP, PieceType::HORSE)))
            | (EFFECT_TABLE.rook.magic(to).attack(occupied) & (self.pieces_pp(PieceType::ROOK, PieceType::DRAGON)))
            | (EFFECT_TABLE.king.attack(to) & (self.pieces_ppp(PieceType::KING, PieceType::HORSE, PieceType::DRAGON)))
    }
    /// A "sniper" is a slider of `color_of_sliders` whose unobstructed
    /// effect reaches `ksq`. When exactly one piece stands between a
    /// sniper and `ksq`, that piece is a blocker; if the blocker belongs
    /// to the king's side, the sniper is additionally a pinner. Returns
    /// `(blockers, pinners)`.
    pub fn slider_blockers_and_pinners(&self, color_of_sliders: Color, ksq: Square) -> (Bitboard, Bitboard) {
        debug_assert_ne!(color_of_sliders, Color::new(self.piece_on(ksq)));

        let opp_of_sliders = color_of_sliders.inverse();
        let mut blockers = Bitboard::ZERO;
        let mut pinners = Bitboard::ZERO;
        let snipers = ((EFFECT_TABLE.lance.pseudo_attack(opp_of_sliders, ksq) & self.pieces_p(PieceType::LANCE))
            | (EFFECT_TABLE.bishop.magic(ksq).pseudo_attack() & self.pieces_pp(PieceType::BISHOP, PieceType::HORSE))
            | (EFFECT_TABLE.rook.magic(ksq).pseudo_attack() & self.pieces_pp(PieceType::ROOK, PieceType::DRAGON)))
            & self.pieces_c(color_of_sliders);

        for sq_of_sniper in snipers {
            let pseudo_blockers = between_mask(ksq, sq_of_sniper) & self.occupied_bb();
            if pseudo_blockers.count_ones() == 1 {
                blockers |= pseudo_blockers;
                if pseudo_blockers.and_to_bool(self.pieces_c(opp_of_sliders)) {
                    pinners.set(sq_of_sniper);
                }
            }
        }
        (blockers, pinners)
    }
    pub fn to_csa_string(&self) -> String {
        let mut s: String = "".to_string();
        s += "'  9  8  7  6  5  4  3  2  1\n";
        for (i, rank) in Rank::ALL.iter().enumerate() {
            s += "P";
            s += &(i + 1).to_string();
            for file in File::ALL_FROM_LEFT.iter() {
                let sq = Square::new(*file, *rank);
                s += self.piece_on(sq).to_csa_str();
            }
            s += "\n";
        }
        for c in Color::ALL.iter() {
            for pt in [
                PieceType::PAWN,
                PieceType::LANCE,
                PieceType::KNIGHT,
                PieceType::SILVER,
                PieceType::GOLD,
                PieceType::BISHOP,
                PieceType::ROOK,
            ]
            .iter()
            {
                let hand_num = self.hand(*c).num(*pt);
                if hand_num != 0 {
                    s += if *c == Color::BLACK { "P+" } else { "P-" };
                    for _ in 0..hand_num {
                        s += "00";
                        s += pt.to_csa_str();
                    }
                    s += "\n";
                }
            }
        }
        s += if self.side_to_move == Color::BLACK { "+\n" } else { "-\n" };
        s
    }
    pub fn print(&self) {
        println!("{}", self.to_csa_string());
    }
    pub fn to_sfen(&self) -> String {
        let mut s = "".to_string();
        for rank in Rank::ALL.iter() {
            let mut empty_squares = 0;
            if !s.is_empty() {
                s += "/";
            }
            for file in File::ALL_FROM_LEFT.iter() {
                let sq = Square::new(*file, *rank);
                let pc = self.piece_on(sq);
                if pc == Piece::EMPTY {
                    empty_squares += 1;
                } else {
                    if empty_squares != 0 {
                        s += &empty_squares.to_string();
                    }
                    s += pc.to_usi_str();
                    empty_squares = 0; // reset empty_squares
                }
            }
            if empty_squares != 0 {
                s += &empty_squares.to_string();
            }
        }
        match self.side_to_move {
            Color::BLACK => s += " b ",
            Color::WHITE => s += " w ",
            _ => unreachable!(),
        }
        if self.hand(Color::BLACK).is_empty() && self.hand(Color::WHITE).is_empty() {
            s += "-";
        } else {
            for c in Color::ALL.iter() {
                for pt in PieceType::ALL_HAND_FOR_SFEN.iter() {
                    let num = self.hand(*c).num(*pt);
                    if 2 <= num {
                        s += &num.to_string();
                    }
                    if num != 0 {
                        let pc = Piece::new(*c, *pt);
                        s += pc.to_usi_str();
                    }
                }
            }
        }
        s += " ";
        s += &self.game_ply.to_string();
        s
    }
}

/// A game state plus the per-ply history needed to make and unmake
/// moves with incremental keys and material balance.
pub struct Position {
    base: PositionBase,
    states: Vec<StateInfo>,
}

impl Position {
    pub fn new() -> Position {
        Position::new_from_sfen(crate::START_SFEN).unwrap()
    }
    pub fn new_from_sfen(sfen: &str) -> Result<Position, SfenError> {
        let sfen_vec: Vec<&str> = sfen.split_whitespace().collect();
        Position::new_from_sfen_args(&sfen_vec)
    }
    pub fn new_from_sfen_args(sfen_slice: &[&str]) -> Result<Position, SfenError> {
        let summary = GameSummary::new_from_sfen_args(sfen_slice)?;
        Position::new_from_summary(&summary)
    }
    /// All derived state (bitboards, keys, material balance, check info)
    /// is recomputed from scratch here; nothing is trusted from the
    /// summary beyond the raw piece placement and counts.
    pub fn new_from_summary(summary: &GameSummary) -> Result<Position, SfenError> {
        let base = PositionBase::new_from_summary(summary)?;
        let state = StateInfo::new_from_position(&base);
        Ok(Position {
            base,
            states: vec![state],
        })
    }
    pub fn to_summary(&self) -> GameSummary {
        self.base.to_summary()
    }
    pub fn pieces_c(&self, c: Color) -> Bitboard {
        self.base.pieces_c(c)
    }
    pub fn pieces_p(&self, pt: PieceType) -> Bitboard {
        self.base.pieces_p(pt)
    }
    pub fn pieces_cp(&self, c: Color, pt: PieceType) -> Bitboard {
        self.base.pieces_cp(c, pt)
    }
    pub fn pieces_pp(&self, pt0: PieceType, pt1: PieceType) -> Bitboard {
        self.base.pieces_pp(pt0, pt1)
    }
    pub fn pieces_cpp(&self, c: Color, pt0: PieceType, pt1: PieceType) -> Bitboard {
        self.base.pieces_cpp(c, pt0, pt1)
    }
    pub fn pieces_golds(&self) -> Bitboard {
        self.base.pieces_golds()
    }
    pub fn piece_on(&self, sq: Square) -> Piece {
        self.base.piece_on(sq)
    }
    pub fn occupied_bb(&self) -> Bitboard {
        self.base.occupied_bb()
    }
    pub fn empty_bb(&self) -> Bitboard {
        self.base.empty_bb()
    }
    pub fn hand(&self, c: Color) -> Hand {
        self.base.hand(c)
    }
    pub fn side_to_move(&self) -> Color {
        self.base.side_to_move()
    }
    pub fn king_square(&self, c: Color) -> Square {
        self.base.king_square(c)
    }
    pub fn ply(&self) -> i32 {
        self.base.game_ply
    }
    pub fn attackers_to(&self, color_of_attackers: Color, to: Square, occupied: &Bitboard) -> Bitboard {
        self.base.attackers_to(color_of_attackers, to, occupied)
    }
    pub fn attackers_to_except_king(&self, color_of_attackers: Color, to: Square, occupied: &Bitboard) -> Bitboard {
        self.base.attackers_to_except_king(color_of_attackers, to, occupied)
    }
    pub fn attackers_to_except_king_lance_pawn(&self, color_of_attackers: Color, to: Square, occupied: &Bitboard) -> Bitboard {
        self.base.attackers_to_except_king_lance_pawn(color_of_attackers, to, occupied)
    }
    pub fn attackers_to_both_color(&self, to: Square, occupied: &Bitboard) -> Bitboard {
        self.base.attackers_to_both_color(to, occupied)
    }
    pub fn slider_blockers_and_pinners(&self, color_of_sliders: Color, ksq: Square) -> (Bitboard, Bitboard) {
        self.base.slider_blockers_and_pinners(color_of_sliders, ksq)
    }
    pub fn blockers_for_king(&self, color_of_king: Color) -> Bitboard {
        self.st().check_info.blockers_for_king(color_of_king)
    }
    pub fn pinners_for_king(&self, color_of_king: Color) -> Bitboard {
        self.st().check_info.pinners_for_king(color_of_king)
    }
    pub fn to_sfen(&self) -> String {
        self.base.to_sfen()
    }
    pub fn to_csa_string(&self) -> String {
        self.base.to_csa_string()
    }
    pub fn print(&self) {
        self.base.print();
    }
    fn st(&self) -> &StateInfo {
        debug_assert!(!self.states.is_empty());
        unsafe { self.states.get_unchecked(self.states.len() - 1) }
    }
    fn st_mut(&mut self) -> &mut StateInfo {
        debug_assert!(!self.states.is_empty());
        let last = self.states.len() - 1;
        unsafe { self.states.get_unchecked_mut(last) }
    }
    pub fn checkers(&self) -> Bitboard {
        self.st().checkers
    }
    pub fn in_check(&self) -> bool {
        self.checkers().to_bool()
    }
    /// Combined position key. Board placement contributes by XOR, hand
    /// counts by wrapping sums, so positions differing only in hands
    /// still hash apart.
    pub fn key(&self) -> Key {
        self.st().key()
    }
    fn board_key(&self) -> Key {
        self.st().board_key
    }
    fn hand_key(&self) -> Key {
        self.st().hand_key
    }
    /// Material balance from Black's point of view: board pieces plus
    /// pieces in hand, promoted pieces at their promoted worth.
    pub fn exchange(&self) -> Value {
        self.st().exchange
    }
    pub fn captured_piece(&self) -> Piece {
        self.st().captured_piece
    }
    fn is_capture(&self, m: Move) -> bool {
        !m.is_drop() && self.piece_on(m.to()) != Piece::EMPTY
    }
    /// Checks that `m` obeys piece movement, drop rules and check
    /// evasion in this position. Pin legality is left to `legal`.
    pub fn pseudo_legal(&self, m: Move) -> bool {
        let us = self.side_to_move();
        let to;
        if m.is_drop() {
            let pt_dropped = m.piece_type_dropped();
            if pt_dropped.0 < PieceType::PAWN.0 || PieceType::GOLD.0 < pt_dropped.0 {
                return false;
            }
            if !self.hand(us).exist(pt_dropped) {
                return false;
            }
            to = m.to();
            if self.piece_on(to) != Piece::EMPTY {
                return false;
            }
            match pt_dropped {
                PieceType::PAWN | PieceType::LANCE => {
                    if Rank::new(to).is_in_front_of(us, RankAsBlack::RANK2) {
                        // the piece could never move again.
                        return false;
                    }
                }
                PieceType::KNIGHT => {
                    if Rank::new(to).is_in_front_of(us, RankAsBlack::RANK3) {
                        return false;
                    }
                }
                _ => {}
            }
            let checkers = self.checkers();
            match checkers.count_ones() {
                0 => {}
                1 => {
                    let check_sq = checkers.lsb_unchecked();
                    let droppables = between_mask(check_sq, self.king_square(us));
                    if !droppables.is_set(to) {
                        return false;
                    }
                }
                2 => return false,
                _ => unreachable!(),
            }
            if pt_dropped == PieceType::PAWN {
                if self
                    .pieces_cp(us, PieceType::PAWN)
                    .and_to_bool(Bitboard::file_mask(File::new(to)))
                {
                    // two pawns
                    return false;
                }
                let delta = if us == Color::BLACK { Square::DELTA_N } else { Square::DELTA_S };
                let them = us.inverse();
                if to.add_unchecked(delta) == self.king_square(them) && self.is_drop_pawn_mate(us, to) {
                    // drop pawn mate
                    return false;
                }
            }
        } else {
            let from = m.from();
            let pc_from = self.piece_on(from);
            if pc_from == Piece::EMPTY || Color::new(pc_from) != us {
                return false;
            }
            to = m.to();
            if self.pieces_c(us).is_set(to) {
                return false;
            }
            let pt_from = PieceType::new(pc_from);
            if !EFFECT_TABLE.attack(pt_from, us, from, &self.occupied_bb()).is_set(to) {
                return false;
            }

            if m.is_promotion() {
                if !pc_from.is_promotable() {
                    return false;
                }
                if !Rank::new(from).is_opponent_field(us) && !Rank::new(to).is_opponent_field(us) {
                    return false;
                }
            } else {
                match pt_from {
                    PieceType::PAWN | PieceType::LANCE => {
                        if Rank::new(to).is_in_front_of(us, RankAsBlack::RANK2) {
                            return false;
                        }
                    }
                    PieceType::KNIGHT => {
                        if Rank::new(to).is_in_front_of(us, RankAsBlack::RANK3) {
                            return false;
                        }
                    }
                    _ => {}
                }
            }
            let checkers = self.checkers();
            if checkers.to_bool() {
                if pt_from == PieceType::KING {
                    if self
                        .attackers_to(us.inverse(), to, &(self.occupied_bb() ^ Bitboard::square_mask(from)))
                        .to_bool()
                    {
                        // not evasion.
                        return false;
                    }
                } else {
                    match checkers.count_ones() {
                        0 => {}
                        1 => {
                            // evasion.
                            let checker_sq = checkers.lsb_unchecked();
                            let movables = between_mask(checker_sq, self.king_square(us)) | checkers;
                            if !movables.is_set(to) {
                                return false;
                            }
                        }
                        2 => return false, // if double check, king must move.
                        _ => unreachable!(),
                    }
                }
            }
        }
        true
    }
    /// Rejects pseudo-legal moves that leave the mover's king in check:
    /// a pinned piece straying off its pin ray, or the king stepping
    /// onto an attacked square.
    pub fn legal(&self, m: Move) -> bool {
        if m.is_drop() {
            return true;
        }
        let from = m.from();
        let us = self.side_to_move();
        if PieceType::new(self.piece_on(from)) == PieceType::KING {
            let them = us.inverse();
            return !self
                .attackers_to(them, m.to(), &(self.occupied_bb() ^ Bitboard::square_mask(from)))
                .to_bool();
        }
        !self.blockers_for_king(us).is_set(from) || is_aligned(from, m.to(), self.king_square(us))
    }
    pub fn gives_check(&self, m: Move) -> bool {
        let to = m.to();
        if m.is_drop() {
            let pt_to = m.piece_type_dropped();
            if self.st().check_info.check_squares[pt_to.0 as usize].is_set(to) {
                return true;
            }
        } else {
            let from = m.from();
            let pc_from = self.piece_on(from);
            let pc_to = if m.is_promotion() { pc_from.to_promote() } else { pc_from };
            let pt_to = PieceType::new(pc_to);
            // direct check
            if self.st().check_info.check_squares[pt_to.0 as usize].is_set(to) {
                return true;
            }
            let us = self.side_to_move();
            let them = us.inverse();
            // discovered check
            if self.st().check_info.blockers_for_king(them).is_set(from) && !is_aligned(from, to, self.king_square(them)) {
                return true;
            }
        }
        false
    }
    /// Plays `m` when it is legal and reports whether it was. An illegal
    /// move leaves the position untouched.
    pub fn do_move(&mut self, m: Move) -> bool {
        if !self.pseudo_legal(m) || !self.legal(m) {
            return false;
        }
        let gives_check = self.gives_check(m);
        self.do_move_unchecked(m, gives_check);
        true
    }
    /// Plays a move already known to be legal, with `gives_check`
    /// precomputed by the caller.
    pub fn do_move_unchecked(&mut self, m: Move, gives_check: bool) {
        debug_assert!(self.is_ok());
        let mut board_key = self.board_key() ^ Zobrist::COLOR;
        let mut hand_key = self.hand_key();
        {
            let state = StateInfo::new_from_old_state(self.st());
            self.states.push(state);
        }
        self.base.game_ply += 1;
        self.st_mut().plies_from_root += 1;

        let us = self.side_to_move();
        let them = us.inverse();
        let to = m.to();
        let captured_piece;
        if m.is_drop() {
            let pt_to = m.piece_type_dropped();
            let pc_to = Piece::new(us, pt_to);
            hand_key = hand_key.wrapping_sub(Zobrist::hand(us, pt_to));
            board_key ^= Zobrist::board(to, pc_to);
            self.base.hands[us.0 as usize].minus_one(pt_to);
            self.base.put_piece(pc_to, to);
            // a drop moves worth from hand to board one for one, so the
            // exchange balance is unchanged.

            // set golds_bb before using attackers_to_except_king.
            self.base.set_golds_bb();
            if gives_check {
                // only one direct check.
                self.st_mut().checkers = Bitboard::square_mask(to);
                self.st_mut().continuous_checks[us.0 as usize] += 2;
            } else {
                self.st_mut().checkers = Bitboard::ZERO;
                self.st_mut().continuous_checks[us.0 as usize] = 0;
            }
            captured_piece = Piece::EMPTY;
        } else {
            let from = m.from();
            let pc_from = self.piece_on(from);
            let pt_from = PieceType::new(pc_from);

            self.base.remove_piece(pc_from, from);
            if self.piece_on(to) != Piece::EMPTY {
                captured_piece = self.piece_on(to);
                let pt_captured = PieceType::new(captured_piece);
                self.base.xor_bbs(them, pt_captured, to);
                let pt_captured_demoted = pt_captured.to_demote_if_possible();
                self.base.hands[us.0 as usize].plus_one(pt_captured_demoted);

                board_key ^= Zobrist::board(to, captured_piece);
                hand_key = hand_key.wrapping_add(Zobrist::hand(us, pt_captured_demoted));
                // the captured piece leaves the board at its current
                // worth and enters our hand at its demoted worth.
                let gain = piece_type_value(pt_captured) + piece_type_value(pt_captured_demoted);
                self.st_mut().exchange += if us == Color::BLACK { gain } else { -gain };
            } else {
                captured_piece = Piece::EMPTY;
            }
            let pc_to = if m.is_promotion() {
                self.st_mut().exchange += if us == Color::BLACK {
                    promote_piece_type_value(pt_from)
                } else {
                    -promote_piece_type_value(pt_from)
                };
                pc_from.to_promote()
            } else {
                pc_from
            };
            self.base.put_piece(pc_to, to);
            if PieceType::new(pc_to) == PieceType::KING {
                self.base.king_squares[us.0 as usize] = self.pieces_cp(us, PieceType::KING).lsb_unchecked();
            }

            board_key ^= Zobrist::board(from, pc_from);
            board_key ^= Zobrist::board(to, pc_to);

            // set golds_bb before using attackers_to_except_king.
            self.base.set_golds_bb();

            if gives_check {
                self.st_mut().checkers =
                    self.attackers_to_except_king(us, self.king_square(them), &self.occupied_bb()) & self.pieces_c(us);
                self.st_mut().continuous_checks[us.0 as usize] += 2;
            } else {
                self.st_mut().checkers = Bitboard::ZERO;
                self.st_mut().continuous_checks[us.0 as usize] = 0;
            }
        }
        self.base.side_to_move = them;
        self.st_mut().board_key = board_key;
        self.st_mut().hand_key = hand_key;
        self.st_mut().hand_of_side_to_move = self.hand(them);
        self.st_mut().captured_piece = captured_piece;
        self.st_mut().check_info = CheckInfo::new(&self.base);
        debug_assert!(self.is_ok());
    }
    pub fn undo_move(&mut self, m: Move) {
        debug_assert!(self.is_ok());
        let us = self.side_to_move();
        let them = us.inverse();
        let to = m.to();
        if m.is_drop() {
            let pt_dropped = m.piece_type_dropped();
            let pc_dropped = Piece::new(them, pt_dropped);
            self.base.remove_piece(pc_dropped, to);
            self.base.hands[them.0 as usize].plus_one(pt_dropped);
        } else {
            let pc_to = self.piece_on(to);
            if self.st().is_capture_move() {
                let pc_captured = self.st().captured_piece;
                let pt_captured_demoted = PieceType::new(pc_captured).to_demote_if_possible();
                self.base.exchange_pieces(pc_captured, to);
                self.base.hands[them.0 as usize].minus_one(pt_captured_demoted);
            } else {
                self.base.remove_piece(pc_to, to);
            }
            let pc_from = if m.is_promotion() { pc_to.to_demote() } else { pc_to };
            let from = m.from();
            self.base.put_piece(pc_from, from);
            if pc_to.is_king() {
                self.base.king_squares[them.0 as usize] = from;
            }
        }
        self.base.set_golds_bb();
        self.base.side_to_move = them;
        self.base.game_ply -= 1;
        self.states.pop();
        debug_assert!(self.is_ok());
    }
    /// The squares around the opponent king that stay covered by the
    /// checking piece even after the king steps off its square. Distant
    /// effects use the unobstructed mask because the king cannot block a
    /// ray by moving along it.
    pub fn effect_bb_of_checker_where_king_cannot_escape(
        &self,
        checker_sq: Square,
        checker_pc: Piece,
        occupied: &Bitboard,
    ) -> Bitboard {
        let checker_pt = PieceType::new(checker_pc);
        let checker_color = Color::new(checker_pc);
        match checker_pt {
            PieceType::PAWN | PieceType::KNIGHT => Bitboard::ZERO,
            PieceType::LANCE => EFFECT_TABLE.lance.pseudo_attack(checker_color, checker_sq),
            PieceType::SILVER => EFFECT_TABLE.silver.attack(checker_color, checker_sq),
            PieceType::GOLD | PieceType::PRO_PAWN | PieceType::PRO_LANCE | PieceType::PRO_KNIGHT | PieceType::PRO_SILVER => {
                EFFECT_TABLE.gold.attack(checker_color, checker_sq)
            }
            PieceType::BISHOP => EFFECT_TABLE.bishop.magic(checker_sq).pseudo_attack(),
            PieceType::HORSE => EFFECT_TABLE.bishop.magic(checker_sq).pseudo_attack() | EFFECT_TABLE.king.attack(checker_sq),
            PieceType::ROOK => EFFECT_TABLE.rook.magic(checker_sq).pseudo_attack(),
            PieceType::DRAGON => {
                let opp_king_sq = self.king_square(checker_color.inverse());
                // on a diagonal the dragon's rook rays are real rays, so
                // the occupied-aware effect is the correct cover.
                if matches!(
                    crate::direction::distant_direction(opp_king_sq, checker_sq),
                    crate::direction::Direction::NE
                        | crate::direction::Direction::NW
                        | crate::direction::Direction::SE
                        | crate::direction::Direction::SW
                ) {
                    EFFECT_TABLE.rook.magic(checker_sq).attack(occupied) | EFFECT_TABLE.king.attack(checker_sq)
                } else {
                    EFFECT_TABLE.rook.magic(checker_sq).pseudo_attack() | EFFECT_TABLE.king.attack(checker_sq)
                }
            }
            _ => unreachable!(),
        }
    }
    /// True when a pawn of `color_of_pawn` dropped on `sq_of_pawn`
    /// checkmates immediately. Such a drop is forbidden.
    pub fn is_drop_pawn_mate(&self, color_of_pawn: Color, sq_of_pawn: Square) -> bool {
        debug_assert_eq!(EFFECT_TABLE.pawn.attack(color_of_pawn, sq_of_pawn).count_ones(), 1);
        debug_assert_eq!(
            EFFECT_TABLE.pawn.attack(color_of_pawn, sq_of_pawn).lsb_unchecked(),
            self.king_square(color_of_pawn.inverse())
        );

        if !self.attackers_to(color_of_pawn, sq_of_pawn, &self.occupied_bb()).to_bool() {
            return false; // the pawn is unprotected, the king just takes it.
        }
        let color_of_defense = color_of_pawn.inverse();
        // capture by another piece. The king recapture is handled above,
        // and no pawn or lance can ever reach the square.
        let capture_candidates = self.attackers_to_except_king_lance_pawn(color_of_defense, sq_of_pawn, &self.occupied_bb());
        let pawn_file = File::new(sq_of_pawn);
        let pinned = self.blockers_for_king(color_of_defense);
        let not_pinned_for_pawn_capture = !pinned | Bitboard::file_mask(pawn_file);
        let can_captures = capture_candidates & not_pinned_for_pawn_capture;
        if can_captures.to_bool() {
            return false;
        }
        // king escapes
        let ksq = self.king_square(color_of_defense);
        let mut king_escape_candidates = EFFECT_TABLE.king.attack(ksq) & !self.pieces_c(color_of_defense);
        debug_assert!(king_escape_candidates.is_set(sq_of_pawn));
        king_escape_candidates ^= Bitboard::square_mask(sq_of_pawn);
        let occupied_after_drop_pawn = self.occupied_bb() ^ Bitboard::square_mask(sq_of_pawn);
        for to in king_escape_candidates {
            if !self.attackers_to(color_of_pawn, to, &occupied_after_drop_pawn).to_bool() {
                return false;
            }
        }
        true
    }
    pub fn is_repetition(&self) -> Repetition {
        const MAX_REPETITION_PLY: i32 = 16;
        let end = std::cmp::min(MAX_REPETITION_PLY, self.st().plies_from_root);

        // A repetition takes at least four plies.
        if end < 4 {
            return Repetition::Not;
        }

        let mut state_index = self.states.len() - 3;
        for i in (4..=end).step_by(2) {
            state_index -= 2;
            let st = &self.states[state_index];
            if self.key() == st.key() {
                let us = self.side_to_move();
                if i <= self.st().continuous_check(us) {
                    return Repetition::Lose;
                }
                if i <= self.st().continuous_check(us.inverse()) {
                    return Repetition::Win;
                }
                return Repetition::Draw;
            } else if self.st().board_key == st.board_key {
                if self.st().hand_of_side_to_move.is_equal_or_superior(st.hand_of_side_to_move) {
                    return Repetition::Superior;
                }
                if st.hand_of_side_to_move.is_equal_or_superior(self.st().hand_of_side_to_move) {
                    return Repetition::Inferior;
                }
            }
        }
        Repetition::Not
    }
    fn is_ok(&self) -> bool {
        if self.pieces_c(Color::BLACK).and_to_bool(self.pieces_c(Color::WHITE)) {
            panic!("position is broken. line: {}", line!());
        }
        if (self.pieces_c(Color::BLACK) | self.pieces_c(Color::WHITE)) != self.occupied_bb() {
            panic!("position is broken. line: {}", line!());
        }
        if self.pieces_p(PieceType::PAWN)
            ^ self.pieces_p(PieceType::LANCE)
            ^ self.pieces_p(PieceType::KNIGHT)
            ^ self.pieces_p(PieceType::SILVER)
            ^ self.pieces_p(PieceType::BISHOP)
            ^ self.pieces_p(PieceType::ROOK)
            ^ self.pieces_p(PieceType::GOLD)
            ^ self.pieces_p(PieceType::KING)
            ^ self.pieces_p(PieceType::PRO_PAWN)
            ^ self.pieces_p(PieceType::PRO_LANCE)
            ^ self.pieces_p(PieceType::PRO_KNIGHT)
            ^ self.pieces_p(PieceType::PRO_SILVER)
            ^ self.pieces_p(PieceType::HORSE)
            ^ self.pieces_p(PieceType::DRAGON)
            != self.occupied_bb()
        {
            panic!("position is broken. line: {}", line!());
        }
        for i in PieceType::PAWN.0 as usize..PieceType::NUM {
            let pt0 = PieceType(i as i32);
            for j in i + 1..PieceType::NUM {
                let pt1 = PieceType(j as i32);
                if self.pieces_p(pt0).and_to_bool(self.pieces_p(pt1)) {
                    panic!("position is broken. line: {}", line!());
                }
            }
        }
        for &sq in Square::ALL.iter() {
            let pc = self.piece_on(sq);
            if pc == Piece::EMPTY {
                if !self.empty_bb().is_set(sq) {
                    panic!("position is broken. line: {}", line!());
                }
            } else if !self.pieces_cp(Color::new(pc), PieceType::new(pc)).is_set(sq) {
                panic!("position is broken. line: {}", line!());
            }
        }
        for &c in Color::ALL.iter() {
            if self.king_square(c) != self.pieces_cp(c, PieceType::KING).lsb_unchecked() {
                panic!("position is broken. line: {}", line!());
            }
            if self.pieces_cp(c, PieceType::KING).count_ones() != 1 {
                panic!("position is broken. line: {}", line!());
            }
        }
        if self.base.pieces_ppppp(
            PieceType::GOLD,
            PieceType::PRO_PAWN,
            PieceType::PRO_LANCE,
            PieceType::PRO_KNIGHT,
            PieceType::PRO_SILVER,
        ) != self.base.golds_bb
        {
            panic!("position is broken. line: {}", line!());
        }
        {
            let us = self.side_to_move();
            let them = us.inverse();
            let attackers_to_king = self.attackers_to(us, self.king_square(them), &self.occupied_bb());
            if attackers_to_king.to_bool() {
                panic!("position is broken. line: {}", line!());
            }
        }
        if 2 < self.checkers().count_ones() {
            panic!("position is broken. line: {}", line!());
        }
        let tmp_state = StateInfo::new_from_position(&self.base);
        if self.exchange() != tmp_state.exchange {
            panic!("position is broken. line: {}", line!());
        }
        if self.key() != tmp_state.key() {
            panic!("position is broken. line: {}", line!());
        }
        true
    }
}

impl Default for Position {
    fn default() -> Position {
        Position::new()
    }
}

#[test]
fn test_position_set() {
    let sfens = [
        "lnsgkgsnl/1r5b1/ppppppppp/9/9/9/PPPPPPPPP/1B5R1/LNSGKGSNL b - 1",
        "l6nl/5+P1gk/2np1S3/p1p4Pp/3P2Sp1/1PPb2P1P/P5GS1/R8/LN4bKL w RGgsn5p 1",
        "l4S2l/4g1gs1/5p1p1/pr2N1pkp/4Gn3/PP3PPPP/2GPP4/1K7/L3r+s2L w BS2N5Pb 20",
        "6n1l/2+S1k4/2lp4p/1np1B2b1/3PP4/1N1S3rP/1P2+pPP+p1/1p1G5/3KG2r1 b GSN2L4Pgs2p 399",
    ];
    for sfen in sfens.iter() {
        match Position::new_from_sfen(sfen) {
            Ok(pos) => assert_eq!(pos.to_sfen(), sfen.to_string()),
            Err(_) => assert_eq!("".to_string(), sfen.to_string()),
        }
    }

    let sfens = [
        (
            "l6nl/5+P1gk/2np1S3/p1p4Pp/3P2Sp1/1PPb2P1P/P5GS1/R8/LN4bKL w RRGgsn5p 1",
            Some(Piece::B_ROOK),
        ),
        (
            "l4S2l/4g1gs1/5p1p1/pr2N1pkp/4Gn3/PP3PPPP/2GPP4/1K7/L3r+s2L w BS2S2N5Pb 20",
            Some(Piece::B_SILVER),
        ),
        (
            "6n1l/2+S1k4/2lp4p/1np1B2b1/3PP4/1N1S3rP/1P2+pPP+p1/1p1G5/3KG2r1 b GSN2L4Pgss2p 399",
            Some(Piece::W_SILVER),
        ),
    ];
    for &(sfen, pc_twice) in sfens.iter() {
        match Position::new_from_sfen(sfen) {
            Ok(_) => assert_eq!("".to_string(), sfen.to_string()),
            Err(err) => match err {
                SfenError::SameHandPieceTwice { token } => {
                    assert_eq!(Piece::new_hand_piece_from_str(&token), pc_twice);
                }
                _ => panic!(),
            },
        }
    }

    let sfens = [
        ("lnsgkgsnl/1r5b1/ppppppppp/9/9/9/PPPPPPPPP/1B5R1/LNSG1GSNL b - 1", Color::BLACK),
        ("lnsg1gsnl/1r5b1/ppppppppp/9/9/9/PPPPPPPPP/1B5R1/LNSGKGSNL b - 1", Color::WHITE),
    ];
    for &(sfen, color_of_king_nothing) in sfens.iter() {
        match Position::new_from_sfen(sfen) {
            Ok(_) => assert_eq!("".to_string(), sfen.to_string()),
            Err(err) => match err {
                SfenError::KingIsNothing { c } => {
                    assert_eq!(c, color_of_king_nothing);
                }
                _ => panic!(),
            },
        }
    }

    let sfens = [
        ("l6nl/5+P1gk/2np1S3/p1p4Pp/3P2Sp1/1PPb2P1P/P5GS1/R8/LN4bKL w RGgsn5p9 1", 9),
        ("l6nl/5+P1gk/2np1S3/p1p4Pp/3P2Sp1/1PPb2P1P/P5GS1/R8/LN4bKL w RGgsn5p99 1", 99),
    ];
    for &(sfen, last_hand_number) in sfens.iter() {
        match Position::new_from_sfen(sfen) {
            Ok(_) => unreachable!(),
            Err(err) => match err {
                SfenError::EndWithHandPieceNumber { last_number } => {
                    assert_eq!(last_number, last_hand_number);
                }
                _ => unreachable!(),
            },
        }
    }
}

#[test]
fn test_game_summary_round_trip() {
    let sfen = "l6nl/5+P1gk/2np1S3/p1p4Pp/3P2Sp1/1PPb2P1P/P5GS1/R8/LN4bKL w RGgsn5p 1";
    let pos = Position::new_from_sfen(sfen).unwrap();
    let summary = pos.to_summary();
    let pos2 = Position::new_from_summary(&summary).unwrap();
    assert_eq!(pos2.to_sfen(), sfen);
    assert_eq!(pos2.key(), pos.key());
    assert_eq!(pos2.exchange(), pos.exchange());
    assert_eq!(pos2.to_summary(), summary);
}

#[test]
fn test_game_summary_rejects_broken_input() {
    let good = Position::new().to_summary();

    let mut summary = good.clone();
    summary.board.pop();
    assert!(matches!(
        Position::new_from_summary(&summary),
        Err(SfenError::InvalidNumberOfSquares { squares: 80 })
    ));

    let mut summary = good.clone();
    summary.board[40] = Piece(15); // not a piece code
    assert!(matches!(
        Position::new_from_summary(&summary),
        Err(SfenError::InvalidPieceCharactors { .. })
    ));

    let mut summary = good.clone();
    summary.hands[Color::BLACK.0 as usize][PieceType::PAWN.0 as usize] = 19;
    assert!(matches!(
        Position::new_from_summary(&summary),
        Err(SfenError::InvalidNumberOfHandPieces { number: 19 })
    ));

    let mut summary = good.clone();
    summary.game_ply = 0;
    assert!(matches!(
        Position::new_from_summary(&summary),
        Err(SfenError::InvalidGamePly { .. })
    ));

    // two pawns in hand on top of eighteen on the board
    let mut summary = good;
    summary.hands[Color::WHITE.0 as usize][PieceType::PAWN.0 as usize] = 2;
    assert!(matches!(
        Position::new_from_summary(&summary),
        Err(SfenError::InvalidNumberOfPawns { number: 20 })
    ));
}

#[test]
fn test_position_attackers_to() {
    let sfen = "lnsgkgsnl/1r5b1/ppppppppp/9/9/9/PPPPPPPPP/1B5R1/LNSGKGSNL b - 1";
    let pos = Position::new_from_sfen(sfen).unwrap();
    let attackers = pos.attackers_to(Color::WHITE, Square::SQ52, &pos.occupied_bb());
    assert_eq!(attackers.count_ones(), 4);
    assert!(attackers.is_set(Square::SQ41));
    assert!(attackers.is_set(Square::SQ51));
    assert!(attackers.is_set(Square::SQ61));
    assert!(attackers.is_set(Square::SQ82));

    let sfen = "k8/5+R3/3b1l3/4s4/5pg1+r/4GP3/5LN2/9/K4L3 b - 1";
    let pos = Position::new_from_sfen(sfen).unwrap();
    let to = Square::SQ45;
    let attackers = pos.attackers_to_both_color(to, &pos.occupied_bb());
    assert_eq!(attackers.count_ones(), 6);
    assert!(attackers.is_set(Square::SQ35));
    assert!(attackers.is_set(Square::SQ37));
    assert!(attackers.is_set(Square::SQ43));
    assert!(attackers.is_set(Square::SQ46));
    assert!(attackers.is_set(Square::SQ54));
    assert!(attackers.is_set(Square::SQ56));
}

#[test]
fn test_position_slider_blockers() {
    let sfen = "4k4/4l4/4P4/9/4K4/9/9/9/9 b - 1";
    let pos = Position::new_from_sfen(sfen).unwrap();
    assert_eq!(pos.to_sfen(), sfen.to_string());
    let (blockers, pinners) = pos.slider_blockers_and_pinners(Color::WHITE, pos.king_square(Color::BLACK));
    assert_eq!(blockers, Bitboard::square_mask(Square::SQ53));
    assert_eq!(pinners, Bitboard::square_mask(Square::SQ52));
}

#[test]
fn test_position_blockers_and_pinners_for_king() {
    let sfen = "4k4/4l4/4L4/9/4K4/9/9/9/9 b - 1";
    let pos = Position::new_from_sfen(sfen).unwrap();
    assert_eq!(pos.blockers_for_king(Color::BLACK), Bitboard::square_mask(Square::SQ53));
    assert_eq!(pos.blockers_for_king(Color::WHITE), Bitboard::square_mask(Square::SQ52));
    assert_eq!(pos.pinners_for_king(Color::BLACK), Bitboard::square_mask(Square::SQ52));
    assert_eq!(pos.pinners_for_king(Color::WHITE), Bitboard::square_mask(Square::SQ53));

    let sfen = "4k4/4r4/4R4/9/4K4/9/9/9/9 b - 1";
    let pos = Position::new_from_sfen(sfen).unwrap();
    assert_eq!(pos.blockers_for_king(Color::BLACK), Bitboard::square_mask(Square::SQ53));
    assert_eq!(pos.blockers_for_king(Color::WHITE), Bitboard::square_mask(Square::SQ52));
    assert_eq!(pos.pinners_for_king(Color::BLACK), Bitboard::square_mask(Square::SQ52));
    assert_eq!(pos.pinners_for_king(Color::WHITE), Bitboard::square_mask(Square::SQ53));
}

#[test]
fn test_position_gives_check() {
    const CHECK: bool = true;
    const NOT_CHECK: bool = false;
    let array = [
        (
            "8k/9/9/9/9/9/9/9/K8 b Rr 1",
            vec![("R*1b", CHECK), ("R*1h", CHECK), ("R*2b", NOT_CHECK)],
        ),
        (
            "8k/9/9/9/9/9/9/9/K8 w Rr 1",
            vec![("R*9h", CHECK), ("R*9b", CHECK), ("R*8h", NOT_CHECK)],
        ),
        ("8k/9/9/9/9/9/9/8G/K7L b Rr 1", vec![("1h2h", CHECK), ("1h1g", NOT_CHECK)]),
    ];
    for (sfen, move_candidates) in array.iter() {
        let pos = Position::new_from_sfen(sfen).unwrap();
        for &(move_str, is_check) in move_candidates {
            let m = Move::new_from_usi_str(move_str, &pos);
            assert!(m.is_some());
            assert_eq!(pos.gives_check(m.unwrap()), is_check);
        }
    }
}

#[test]
fn test_position_do_move() {
    std::thread::Builder::new()
        .stack_size(crate::stack_size::STACK_SIZE)
        .spawn(|| {
            let sfen_and_moves_array = [
                ("4k4/9/9/9/9/9/9/9/4K4 b Bb 1", vec!["B*5g", "B*5c"]),
                (
                    "lnsgkgsnl/1r5b1/ppppppppp/9/9/9/PPPPPPPPP/1B5R1/LNSGKGSNL b - 1",
                    vec![
                        "7g7f", "3c3d", "2g2f", "5c5d", "5g5f", "2b8h+", "7i8h", "B*5g", "B*5c", "8b5b", "5c8f+", "5a6b",
                        "3i4h", "5g2d+", "8h7g", "5d5e", "2f2e", "2d3e", "5f5e", "5b5e", "P*5g", "7a7b", "7g6f", "5e5a",
                        "3g3f", "3e4d", "2e2d", "2c2d", "2h2d", "3a3b", "5i6h", "6b7a", "4g4f", "P*5f", "5g5f", "5a5f",
                        "4i5h", "P*2c", "2d2g", "5f5h+", "6i5h", "G*8h", "8i7g", "8h9i", "7g6e", "L*5a", "P*5e", "5a5e",
                        "5h4g", "P*5f", "P*5h", "9i9h", "2g2h", "4a5b", "R*3a",
                    ],
                ),
            ];
            for (sfen, moves) in sfen_and_moves_array.iter() {
                let mut pos = Position::new_from_sfen(sfen).unwrap();
                for move_str in moves {
                    let m = Move::new_from_usi_str(move_str, &pos);
                    assert!(m.is_some());
                    let m = m.unwrap();
                    {
                        // do_move and undo_move recheck the whole
                        // derived state against a from-scratch rebuild
                        // in debug builds.
                        assert!(pos.do_move(m));
                        pos.undo_move(m);
                    }
                    assert!(pos.do_move(m));
                    assert_eq!(pos.is_repetition(), Repetition::Not);
                }
            }
        })
        .unwrap()
        .join()
        .unwrap();
}

#[test]
fn test_position_do_move_rejects_illegal() {
    let sfen = "lnsgkgsnl/1r5b1/ppppppppp/9/9/9/PPPPPPPPP/1B5R1/LNSGKGSNL b - 1";
    let mut pos = Position::new_from_sfen(sfen).unwrap();
    let key = pos.key();
    // moving a pawn two squares, moving the opponent's pawn, dropping
    // from an empty hand.
    for m in [
        Move::new_unpromote(Square::SQ77, Square::SQ75),
        Move::new_unpromote(Square::SQ73, Square::SQ74),
        Move::new_drop(PieceType::PAWN, Square::SQ55),
    ] {
        assert!(!pos.do_move(m));
        assert_eq!(pos.key(), key);
        assert_eq!(pos.to_sfen(), sfen);
    }
}

#[test]
fn test_position_key_matches_rebuild() {
    let mut pos = Position::new();
    for move_str in ["7g7f", "3c3d", "8h2b+", "3a2b", "B*4e"] {
        let m = Move::new_from_usi_str(move_str, &pos).unwrap();
        assert!(pos.do_move(m));
        let rebuilt = Position::new_from_sfen(&pos.to_sfen()).unwrap();
        assert_eq!(pos.key(), rebuilt.key());
        assert_eq!(pos.exchange(), rebuilt.exchange());
    }
}

#[test]
fn test_position_exchange() {
    let mut pos = Position::new();
    assert_eq!(pos.exchange(), Value(0));
    for move_str in ["7g7f", "3c3d", "8h2b+"] {
        let m = Move::new_from_usi_str(move_str, &pos).unwrap();
        assert!(pos.do_move(m));
    }
    // Black captured a bishop (800 board + 800 hand) and promoted the
    // own bishop to horse (+500).
    assert_eq!(pos.exchange(), Value(800 + 800 + 500));
    let m = Move::new_from_usi_str("3a2b", &pos).unwrap();
    assert!(pos.do_move(m));
    // White recaptured the horse; it demotes to a bishop in hand.
    assert_eq!(pos.exchange(), Value(2100 - 1300 - 800));
}

#[test]
fn test_check_info_new() {
    // CheckInfo::check_squares relies on this piece kind numbering.
    assert_eq!(0, PieceType::OCCUPIED.0);
    assert_eq!(1, PieceType::PAWN.0);
    assert_eq!(2, PieceType::LANCE.0);
    assert_eq!(3, PieceType::KNIGHT.0);
    assert_eq!(4, PieceType::SILVER.0);
    assert_eq!(5, PieceType::BISHOP.0);
    assert_eq!(6, PieceType::ROOK.0);
    assert_eq!(7, PieceType::GOLD.0);
    assert_eq!(8, PieceType::KING.0);
    assert_eq!(9, PieceType::PRO_PAWN.0);
    assert_eq!(10, PieceType::PRO_LANCE.0);
    assert_eq!(11, PieceType::PRO_KNIGHT.0);
    assert_eq!(12, PieceType::PRO_SILVER.0);
    assert_eq!(13, PieceType::HORSE.0);
    assert_eq!(14, PieceType::DRAGON.0);
}

#[test]
fn test_check_info_do_move() {
    let sfen = "9/4R+P2k/9/9/9/9/9/8K/9 b - 1";
    let mut pos = Position::new_from_sfen(sfen).unwrap();
    let m = Move::new_from_usi_str("4b4a", &pos).unwrap();
    assert!(pos.gives_check(m));
    assert!(pos.do_move(m));
    assert!(pos.checkers().is_set(Square::SQ52));
}

#[test]
fn test_pseudo_legal_evasion() {
    let sfen = "4k4/4l4/9/9/4K4/9/9/9/9 b - 1";
    let pos = Position::new_from_sfen(sfen).unwrap();
    // stepping along the lance's ray is no evasion.
    assert!(!pos.pseudo_legal(Move::new_unpromote(Square::SQ55, Square::SQ56)));
    assert!(pos.pseudo_legal(Move::new_unpromote(Square::SQ55, Square::SQ45)));
}

#[test]
fn test_pseudo_legal_dead_end_drops() {
    let pos = Position::new_from_sfen("8k/9/9/9/9/9/9/9/K8 b LNPlnp 1").unwrap();
    assert!(!pos.pseudo_legal(Move::new_drop(PieceType::PAWN, Square::SQ51)));
    assert!(!pos.pseudo_legal(Move::new_drop(PieceType::LANCE, Square::SQ51)));
    assert!(!pos.pseudo_legal(Move::new_drop(PieceType::KNIGHT, Square::SQ52)));
    assert!(pos.pseudo_legal(Move::new_drop(PieceType::PAWN, Square::SQ52)));
    assert!(pos.pseudo_legal(Move::new_drop(PieceType::KNIGHT, Square::SQ53)));
}

#[test]
fn test_is_repetition() {
    std::thread::Builder::new()
        .stack_size(crate::stack_size::STACK_SIZE)
        .spawn(|| {
            let sfen = "8k/9/9/9/9/9/9/9/8K b R2P 1";
            let moves = [
                ("P*1b", Repetition::Not),
                ("1a2a", Repetition::Not),
                ("1b1a+", Repetition::Not),
                ("2a1a", Repetition::Inferior),
                ("P*1b", Repetition::Superior),
                ("1a2a", Repetition::Inferior),
                ("R*2b", Repetition::Not),
                ("2a3a", Repetition::Not),
                ("2b3b", Repetition::Not),
                ("3a2a", Repetition::Not),
                ("3b2b", Repetition::Win),
                ("2a3a", Repetition::Lose),
            ];
            let mut pos = Position::new_from_sfen(sfen).unwrap();
            for (m, r) in &moves {
                let m = Move::new_from_usi_str(m, &pos).unwrap();
                assert!(pos.do_move(m));
                assert_eq!(pos.is_repetition(), *r);
            }
        })
        .unwrap()
        .join()
        .unwrap();
}

#[test]
fn test_effect_bb_of_checker_where_king_cannot_escape() {
    std::thread::Builder::new()
        .stack_size(crate::stack_size::STACK_SIZE)
        .spawn(|| {
            let sfen = "4k4/4l4/9/9/4K4/9/9/9/9 b - 1";
            let pos = Position::new_from_sfen(sfen).unwrap();
            let bb =
                pos.effect_bb_of_checker_where_king_cannot_escape(Square::SQ52, pos.piece_on(Square::SQ52), &pos.occupied_bb());
            assert!(bb.is_set(Square::SQ56));
            assert!(bb.is_set(Square::SQ54));
        })
        .unwrap()
        .join()
        .unwrap();
}
