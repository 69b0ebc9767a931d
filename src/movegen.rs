use crate::bitboard::Bitboard;
use crate::effect::{between_mask, EFFECT_TABLE};
use crate::movetypes::{Move, MoveList};
use crate::position::Position;
use crate::types::*;
use arrayvec::ArrayVec;
use static_assertions::const_assert_eq;

/// Compile-time selection of the move families a generator emits.
///
/// `ALL` keeps every legal non-promotion alternative; without it the
/// generators skip unpromoted moves that are strictly dominated by the
/// promotion, which is the shape the capture/quiet subsets want.
pub trait AllowMovesTrait {
    const ALLOW_CAPTURES: bool;
    const ALLOW_QUIETS: bool;
    const EVASIONS: bool;
    const LEGALS: bool;
    const ALL: bool;
}

/// Captures plus pawn moves into the promotion zone.
pub struct CaptureOrPawnPromotionsType;
/// Non-captures, excluding pawn moves into the promotion zone.
pub struct QuietsWithoutPawnPromotionsType;
/// Check evasions, with every unpromote alternative.
pub struct EvasionsType;
/// Every pseudo-legal move, with every unpromote alternative.
pub struct NonEvasionsType;
/// Exactly the legal moves of the position.
pub struct LegalType;

impl AllowMovesTrait for CaptureOrPawnPromotionsType {
    const ALLOW_CAPTURES: bool = true;
    const ALLOW_QUIETS: bool = false;
    const EVASIONS: bool = false;
    const LEGALS: bool = false;
    const ALL: bool = false;
}
impl AllowMovesTrait for QuietsWithoutPawnPromotionsType {
    const ALLOW_CAPTURES: bool = false;
    const ALLOW_QUIETS: bool = true;
    const EVASIONS: bool = false;
    const LEGALS: bool = false;
    const ALL: bool = false;
}
impl AllowMovesTrait for EvasionsType {
    const ALLOW_CAPTURES: bool = true;
    const ALLOW_QUIETS: bool = true;
    const EVASIONS: bool = true;
    const LEGALS: bool = false;
    const ALL: bool = true;
}
impl AllowMovesTrait for NonEvasionsType {
    const ALLOW_CAPTURES: bool = true;
    const ALLOW_QUIETS: bool = true;
    const EVASIONS: bool = false;
    const LEGALS: bool = false;
    const ALL: bool = true;
}
impl AllowMovesTrait for LegalType {
    const ALLOW_CAPTURES: bool = true;
    const ALLOW_QUIETS: bool = true;
    const EVASIONS: bool = false;
    const LEGALS: bool = true;
    const ALL: bool = true;
}

impl MoveList {
    /// Appends the moves of the requested family. The buffer is never
    /// cleared; two runs on an unmodified position append identical
    /// sequences.
    pub fn generate<AMT: AllowMovesTrait>(&mut self, pos: &Position) {
        if AMT::LEGALS {
            self.generate_legals(pos);
        } else if AMT::EVASIONS {
            self.generate_evasions::<AMT>(pos);
        } else {
            self.generate_all::<AMT>(pos);
        }
    }
    fn generate_all<AMT: AllowMovesTrait>(&mut self, pos: &Position) {
        debug_assert!(!pos.in_check());
        let us = pos.side_to_move();
        let target = if AMT::ALLOW_CAPTURES && AMT::ALLOW_QUIETS {
            !pos.pieces_c(us)
        } else if AMT::ALLOW_CAPTURES {
            pos.pieces_c(us.inverse())
        } else {
            debug_assert!(AMT::ALLOW_QUIETS);
            pos.empty_bb()
        };
        // A pawn move into the promotion zone counts as a capture even
        // onto an empty square, and is excluded from quiets accordingly.
        let target_pawn = if AMT::ALLOW_CAPTURES && AMT::ALLOW_QUIETS {
            target
        } else if AMT::ALLOW_CAPTURES {
            target | (pos.empty_bb() & Bitboard::opponent_field_mask(us))
        } else {
            target & !Bitboard::opponent_field_mask(us)
        };
        self.generate_for_piece::<PawnType, AMT>(pos, &target_pawn);
        self.generate_for_piece::<LanceType, AMT>(pos, &target);
        self.generate_for_piece::<KnightType, AMT>(pos, &target);
        self.generate_for_piece::<SilverType, AMT>(pos, &target);
        self.generate_for_piece::<BishopType, AMT>(pos, &target);
        self.generate_for_piece::<RookType, AMT>(pos, &target);
        self.generate_for_piece::<GoldType, AMT>(pos, &target);
        self.generate_for_piece::<KingType, AMT>(pos, &target);
        self.generate_for_piece::<HorseType, AMT>(pos, &target);
        self.generate_for_piece::<DragonType, AMT>(pos, &target);
        if AMT::ALLOW_QUIETS {
            let target = pos.empty_bb();
            self.generate_drop::<AMT>(pos, &target);
        }
    }
    fn generate_evasions<AMT: AllowMovesTrait>(&mut self, pos: &Position) {
        debug_assert!(AMT::EVASIONS);
        debug_assert!(pos.in_check());
        let us = pos.side_to_move();
        let ksq = pos.king_square(us);
        let checkers = pos.checkers();
        let mut copy_checkers = checkers;
        let mut checker_sq;
        let mut not_target = Bitboard::ZERO;
        let mut checkers_num: i8 = 0;
        // Rust's do-while
        while {
            checker_sq = copy_checkers.pop_lsb_unchecked();
            not_target |=
                pos.effect_bb_of_checker_where_king_cannot_escape(checker_sq, pos.piece_on(checker_sq), &pos.occupied_bb());
            checkers_num += 1;
            copy_checkers.to_bool() // loop condition
        } {}
        let to_bb = EFFECT_TABLE.king.attack(ksq) & !pos.pieces_c(us) & !not_target;
        for to in to_bb {
            self.push(Move::new_unpromote(ksq, to));
        }

        if 1 < checkers_num {
            // Double check. Only the king can move.
            return;
        }

        let target_drop = between_mask(checker_sq, ksq);
        let target_move = target_drop | Bitboard::square_mask(checker_sq);
        self.generate_for_piece::<PawnType, AMT>(pos, &target_move);
        self.generate_for_piece::<LanceType, AMT>(pos, &target_move);
        self.generate_for_piece::<KnightType, AMT>(pos, &target_move);
        self.generate_for_piece::<SilverType, AMT>(pos, &target_move);
        self.generate_for_piece::<BishopType, AMT>(pos, &target_move);
        self.generate_for_piece::<RookType, AMT>(pos, &target_move);
        self.generate_for_piece::<GoldType, AMT>(pos, &target_move);
        self.generate_for_piece::<HorseType, AMT>(pos, &target_move);
        self.generate_for_piece::<DragonType, AMT>(pos, &target_move);
        self.generate_drop::<AMT>(pos, &target_drop);
    }
    fn generate_legals(&mut self, pos: &Position) {
        let start = self.len();
        if pos.in_check() {
            self.generate_evasions::<EvasionsType>(pos);
        } else {
            self.generate_all::<NonEvasionsType>(pos);
        }
        // Pin and discovered-check filtering.
        let mut i = start;
        while i != self.len() {
            if pos.legal(self[i]) {
                i += 1;
            } else {
                self.swap_remove(i);
            }
        }
    }
    fn generate_drop_for_possessions(&mut self, possessions: &[PieceType], to_bb: Bitboard) {
        for to in to_bb {
            for &pt in possessions {
                self.push(Move::new_drop(pt, to));
            }
        }
    }
    fn generate_drop<AMT: AllowMovesTrait>(&mut self, pos: &Position, target: &Bitboard) {
        let us = pos.side_to_move();
        debug_assert!(if AMT::EVASIONS {
            *target == between_mask(pos.king_square(us), pos.checkers().lsb_unchecked())
        } else {
            *target == pos.empty_bb()
        });
        let hand = pos.hand(us);
        if hand.exist(PieceType::PAWN) {
            // Avoid the dead rank and two pawns on a file.
            let rank = Rank::new_from_color_and_rank_as_black(us, RankAsBlack::RANK1);
            let mut to_bb = *target & !Bitboard::rank_mask(rank);
            let pawns_bb = pos.pieces_cp(us, PieceType::PAWN);
            for pawn_sq in pawns_bb {
                let pawn_file = File::new(pawn_sq);
                to_bb &= !Bitboard::file_mask(pawn_file);
            }

            // Avoid drop pawn mate.
            let them = us.inverse();
            let ksq = pos.king_square(them);
            let drop_pawn_check_bb = EFFECT_TABLE.pawn.attack(them, ksq);
            if (drop_pawn_check_bb & to_bb).to_bool() {
                debug_assert_eq!(drop_pawn_check_bb.count_ones(), 1);
                let to = drop_pawn_check_bb.lsb_unchecked();
                if pos.is_drop_pawn_mate(us, to) {
                    debug_assert!(to_bb.is_set(to));
                    to_bb ^= Bitboard::square_mask(to);
                }
            }

            for to in to_bb {
                self.push(Move::new_drop(PieceType::PAWN, to));
            }
        }
        if hand.except_pawn_exist() {
            let mut possessions = ArrayVec::<PieceType, 6>::new();
            let sgbr_num;
            let sgbrl_num;
            {
                let f = |pt: PieceType, possessions: &mut ArrayVec<PieceType, 6>| {
                    if hand.exist(pt) {
                        unsafe {
                            possessions.push_unchecked(pt);
                        }
                    }
                };
                f(PieceType::ROOK, &mut possessions);
                f(PieceType::BISHOP, &mut possessions);
                f(PieceType::GOLD, &mut possessions);
                f(PieceType::SILVER, &mut possessions);
                sgbr_num = possessions.len();
                f(PieceType::LANCE, &mut possessions);
                sgbrl_num = possessions.len();
                f(PieceType::KNIGHT, &mut possessions);
            }
            // Lances die on the last rank, knights on the last two.
            let (to_bb_r1, to_bb_r2, to_bb) = {
                let r1 = Rank::new_from_color_and_rank_as_black(us, RankAsBlack::RANK1);
                let r2 = Rank::new_from_color_and_rank_as_black(us, RankAsBlack::RANK2);
                let mask1 = Bitboard::rank_mask(r1);
                let mask2 = Bitboard::rank_mask(r2);
                (*target & mask1, *target & mask2, *target & !(mask1 | mask2))
            };
            self.generate_drop_for_possessions(&possessions[..sgbr_num], to_bb_r1);
            self.generate_drop_for_possessions(&possessions[..sgbrl_num], to_bb_r2);
            self.generate_drop_for_possessions(&possessions[..], to_bb);
        }
    }
    fn generate_for_piece<PTT: PieceTypeTrait, AMT: AllowMovesTrait>(&mut self, pos: &Position, target: &Bitboard) {
        match PTT::PIECE_TYPE {
            PieceType::PAWN => self.generate_for_pawn::<AMT>(pos, target),
            PieceType::LANCE => self.generate_for_lance::<AMT>(pos, target),
            PieceType::KNIGHT => self.generate_for_knight::<AMT>(pos, target),
            PieceType::SILVER => self.generate_for_silver::<AMT>(pos, target),
            PieceType::BISHOP => self.generate_for_bishop_or_rook::<AMT>(PieceType::BISHOP, pos, target),
            PieceType::ROOK => self.generate_for_bishop_or_rook::<AMT>(PieceType::ROOK, pos, target),
            PieceType::KING => self.generate_for_king::<AMT>(pos, target),
            PieceType::GOLD => self.generate_for_gold::<AMT>(pos, target),
            PieceType::HORSE => self.generate_for_horse_or_dragon::<AMT>(PieceType::HORSE, pos, target),
            PieceType::DRAGON => self.generate_for_horse_or_dragon::<AMT>(PieceType::DRAGON, pos, target),
            _ => unreachable!(),
        }
    }
    // All pawns advance with one whole-board shift; the ranks of a file
    // sit one bit apart.
    fn generate_for_pawn<AMT: AllowMovesTrait>(&mut self, pos: &Position, target: &Bitboard) {
        let us = pos.side_to_move();
        let from_bb = pos.pieces_cp(us, PieceType::PAWN);
        let to_bb = if us == Color::BLACK {
            const_assert_eq!(Square::DELTA_N.0, -1);
            from_bb >> 1
        } else {
            const_assert_eq!(Square::DELTA_S.0, 1);
            from_bb << 1
        } & *target;
        let delta = if us == Color::BLACK { Square::DELTA_S } else { Square::DELTA_N };
        for to in to_bb {
            let from = to.add_unchecked(delta);
            let rank_to = Rank::new(to);
            if rank_to.is_opponent_field(us) {
                self.push(Move::new_promote(from, to));
                if AMT::ALL && rank_to != Rank::new_from_color_and_rank_as_black(us, RankAsBlack::RANK1) {
                    self.push(Move::new_unpromote(from, to));
                }
            } else {
                self.push(Move::new_unpromote(from, to));
            }
        }
    }
    fn generate_for_lance<AMT: AllowMovesTrait>(&mut self, pos: &Position, target: &Bitboard) {
        debug_assert!(pos.checkers().count_ones() != 2 || !target.to_bool());
        let us = pos.side_to_move();
        let from_bb = pos.pieces_cp(us, PieceType::LANCE);
        for from in from_bb {
            let to_bb = EFFECT_TABLE.lance.attack(us, from, &pos.occupied_bb()) & *target;
            for to in to_bb {
                let rank_to = Rank::new(to);
                if rank_to.is_opponent_field(us) {
                    self.push(Move::new_promote(from, to));
                    if AMT::ALL {
                        if rank_to != Rank::new_from_color_and_rank_as_black(us, RankAsBlack::RANK1) {
                            self.push(Move::new_unpromote(from, to));
                        }
                    } else {
                        // An unpromoted quiet landing on rank 3 is useless.
                        if AMT::ALLOW_CAPTURES
                            && rank_to == Rank::new_from_color_and_rank_as_black(us, RankAsBlack::RANK3)
                            && pos.piece_on(to) != Piece::EMPTY
                        {
                            self.push(Move::new_unpromote(from, to));
                        }
                    }
                } else {
                    self.push(Move::new_unpromote(from, to));
                }
            }
        }
    }
    fn generate_for_knight<AMT: AllowMovesTrait>(&mut self, pos: &Position, target: &Bitboard) {
        debug_assert!(pos.checkers().count_ones() != 2 || !target.to_bool());
        let us = pos.side_to_move();
        let from_bb = pos.pieces_cp(us, PieceType::KNIGHT);
        for from in from_bb {
            let to_bb = EFFECT_TABLE.knight.attack(us, from) & *target;
            for to in to_bb {
                let rank_to = Rank::new(to);
                if rank_to.is_opponent_field(us) {
                    self.push(Move::new_promote(from, to));
                }
                if !rank_to.is_in_front_of(us, RankAsBlack::RANK3) {
                    self.push(Move::new_unpromote(from, to));
                }
            }
        }
    }
    fn generate_for_silver<AMT: AllowMovesTrait>(&mut self, pos: &Position, target: &Bitboard) {
        debug_assert!(pos.checkers().count_ones() != 2 || !target.to_bool());
        let us = pos.side_to_move();
        let from_bb = pos.pieces_cp(us, PieceType::SILVER);
        for from in from_bb {
            let to_bb = EFFECT_TABLE.silver.attack(us, from) & *target;
            let from_is_opponent_field = Rank::new(from).is_opponent_field(us);
            for to in to_bb {
                if from_is_opponent_field || Rank::new(to).is_opponent_field(us) {
                    self.push(Move::new_promote(from, to));
                }
                self.push(Move::new_unpromote(from, to));
            }
        }
    }
    // Golds and the promoted minors share the same stepping effect.
    fn generate_for_gold<AMT: AllowMovesTrait>(&mut self, pos: &Position, target: &Bitboard) {
        debug_assert!(pos.checkers().count_ones() != 2 || !target.to_bool());
        let us = pos.side_to_move();
        let from_bb = pos.pieces_golds() & pos.pieces_c(us);
        for from in from_bb {
            let to_bb = EFFECT_TABLE.gold.attack(us, from) & *target;
            for to in to_bb {
                self.push(Move::new_unpromote(from, to));
            }
        }
    }
    fn generate_for_king<AMT: AllowMovesTrait>(&mut self, pos: &Position, target: &Bitboard) {
        debug_assert!(!pos.checkers().to_bool());
        let us = pos.side_to_move();
        let from = pos.king_square(us);
        let to_bb = EFFECT_TABLE.king.attack(from) & *target;
        for to in to_bb {
            self.push(Move::new_unpromote(from, to));
        }
    }
    fn generate_for_bishop_or_rook<AMT: AllowMovesTrait>(&mut self, pt: PieceType, pos: &Position, target: &Bitboard) {
        debug_assert!(pos.checkers().count_ones() != 2 || !target.to_bool());
        let us = pos.side_to_move();
        let from_bb = pos.pieces_cp(us, pt);
        for from in from_bb {
            let to_bb = EFFECT_TABLE.attack(pt, us, from, &pos.occupied_bb()) & *target;
            let from_is_opponent_field = Rank::new(from).is_opponent_field(us);
            for to in to_bb {
                if from_is_opponent_field || Rank::new(to).is_opponent_field(us) {
                    self.push(Move::new_promote(from, to));
                    if AMT::ALL {
                        self.push(Move::new_unpromote(from, to));
                    }
                } else {
                    self.push(Move::new_unpromote(from, to));
                }
            }
        }
    }
    fn generate_for_horse_or_dragon<AMT: AllowMovesTrait>(&mut self, pt: PieceType, pos: &Position, target: &Bitboard) {
        debug_assert!(pos.checkers().count_ones() != 2 || !target.to_bool());
        let us = pos.side_to_move();
        let from_bb = pos.pieces_cp(us, pt);
        for from in from_bb {
            let to_bb = EFFECT_TABLE.attack(pt, us, from, &pos.occupied_bb()) & *target;
            for to in to_bb {
                self.push(Move::new_unpromote(from, to));
            }
        }
    }
}

#[test]
fn test_generate_for_piece() {
    let sfen = "4k4/9/9/9/9/9/4l4/4bp3/4KP3 b - 1";
    let pos = Position::new_from_sfen(sfen).unwrap();
    let us = pos.side_to_move();
    let mut mlist = MoveList::new();
    let target = pos.pieces_c(us.inverse());
    mlist.generate_for_piece::<KingType, CaptureOrPawnPromotionsType>(&pos, &target);
    assert_eq!(mlist.len(), 2);
    assert!(mlist.contains(Move::new_unpromote(Square::SQ59, Square::SQ48)));
    // Illegal but generated; the legality filter is a separate pass.
    assert!(mlist.contains(Move::new_unpromote(Square::SQ59, Square::SQ58)));

    let mut mlist = MoveList::new();
    let target = pos.empty_bb();
    mlist.generate_for_piece::<KingType, QuietsWithoutPawnPromotionsType>(&pos, &target);
    assert_eq!(mlist.len(), 2);
    assert!(mlist.contains(Move::new_unpromote(Square::SQ59, Square::SQ68)));
    assert!(mlist.contains(Move::new_unpromote(Square::SQ59, Square::SQ69)));

    let sfen = "4k4/7p1/9/9/4BB3/5P3/9/9/s3K4 b - 1";
    let pos = Position::new_from_sfen(sfen).unwrap();
    let us = pos.side_to_move();
    let mut mlist = MoveList::new();
    let target = pos.pieces_c(us.inverse());
    mlist.generate_for_piece::<BishopType, CaptureOrPawnPromotionsType>(&pos, &target);
    assert_eq!(mlist.len(), 2);
    assert!(mlist.contains(Move::new_promote(Square::SQ55, Square::SQ22)));
    assert!(mlist.contains(Move::new_unpromote(Square::SQ55, Square::SQ99)));

    let mut mlist = MoveList::new();
    let target = pos.empty_bb();
    mlist.generate_for_piece::<BishopType, QuietsWithoutPawnPromotionsType>(&pos, &target);
    assert_eq!(mlist.len(), 23);
    assert!(mlist.contains(Move::new_promote(Square::SQ55, Square::SQ33)));
    assert!(mlist.contains(Move::new_unpromote(Square::SQ55, Square::SQ44)));
    assert!(mlist.contains(Move::new_unpromote(Square::SQ55, Square::SQ64)));
    assert!(mlist.contains(Move::new_promote(Square::SQ55, Square::SQ73)));
    assert!(mlist.contains(Move::new_promote(Square::SQ55, Square::SQ82)));
    assert!(mlist.contains(Move::new_promote(Square::SQ55, Square::SQ91)));
    assert!(mlist.contains(Move::new_unpromote(Square::SQ55, Square::SQ66)));
    assert!(mlist.contains(Move::new_unpromote(Square::SQ55, Square::SQ77)));
    assert!(mlist.contains(Move::new_unpromote(Square::SQ55, Square::SQ88)));
    assert!(mlist.contains(Move::new_unpromote(Square::SQ45, Square::SQ34)));
    assert!(mlist.contains(Move::new_unpromote(Square::SQ45, Square::SQ36)));
    assert!(mlist.contains(Move::new_unpromote(Square::SQ45, Square::SQ27)));
    assert!(mlist.contains(Move::new_unpromote(Square::SQ45, Square::SQ18)));
    assert!(mlist.contains(Move::new_unpromote(Square::SQ45, Square::SQ54)));
    assert!(mlist.contains(Move::new_unpromote(Square::SQ45, Square::SQ56)));
    assert!(mlist.contains(Move::new_unpromote(Square::SQ45, Square::SQ67)));
    assert!(mlist.contains(Move::new_unpromote(Square::SQ45, Square::SQ78)));
    assert!(mlist.contains(Move::new_unpromote(Square::SQ45, Square::SQ89)));
    assert!(mlist.contains(Move::new_promote(Square::SQ45, Square::SQ23)));
    assert!(mlist.contains(Move::new_promote(Square::SQ45, Square::SQ12)));
    assert!(mlist.contains(Move::new_promote(Square::SQ45, Square::SQ63)));
    assert!(mlist.contains(Move::new_promote(Square::SQ45, Square::SQ72)));
    assert!(mlist.contains(Move::new_promote(Square::SQ45, Square::SQ81)));

    let sfen = "4k4/4l4/9/9/5B3/9/9/9/4K4 b - 1";
    let pos = Position::new_from_sfen(sfen).unwrap();
    let mut mlist = MoveList::new();
    let target = between_mask(Square::SQ52, Square::SQ59) | Bitboard::square_mask(Square::SQ52);
    mlist.generate_for_piece::<BishopType, EvasionsType>(&pos, &target);
    assert_eq!(mlist.len(), 2);
    assert!(mlist.contains(Move::new_unpromote(Square::SQ45, Square::SQ54)));
    assert!(mlist.contains(Move::new_unpromote(Square::SQ45, Square::SQ56)));

    let sfens = [
        "8k/1pP6/1G7/5G3/9/9/9/9/8K b - 1",
        "8k/1pP6/1+P7/5+P3/9/9/9/9/8K b - 1",
        "8k/1pP6/1+L7/5+L3/9/9/9/9/8K b - 1",
        "8k/1pP6/1+N7/5+N3/9/9/9/9/8K b - 1",
        "8k/1pP6/1+S7/5+S3/9/9/9/9/8K b - 1",
    ];
    for &sfen in sfens.iter() {
        let pos = Position::new_from_sfen(sfen).unwrap();
        let us = pos.side_to_move();
        let mut mlist = MoveList::new();
        let target = pos.pieces_c(us.inverse());
        mlist.generate_for_piece::<GoldType, CaptureOrPawnPromotionsType>(&pos, &target);
        assert_eq!(mlist.len(), 1);
        assert!(mlist.contains(Move::new_unpromote(Square::SQ83, Square::SQ82)));

        let mut mlist = MoveList::new();
        let target = pos.empty_bb();
        mlist.generate_for_piece::<GoldType, QuietsWithoutPawnPromotionsType>(&pos, &target);
        assert_eq!(mlist.len(), 10);
        assert!(mlist.contains(Move::new_unpromote(Square::SQ83, Square::SQ73)));
        assert!(mlist.contains(Move::new_unpromote(Square::SQ83, Square::SQ84)));
        assert!(mlist.contains(Move::new_unpromote(Square::SQ83, Square::SQ92)));
        assert!(mlist.contains(Move::new_unpromote(Square::SQ83, Square::SQ93)));
        assert!(mlist.contains(Move::new_unpromote(Square::SQ44, Square::SQ33)));
        assert!(mlist.contains(Move::new_unpromote(Square::SQ44, Square::SQ34)));
        assert!(mlist.contains(Move::new_unpromote(Square::SQ44, Square::SQ43)));
        assert!(mlist.contains(Move::new_unpromote(Square::SQ44, Square::SQ45)));
        assert!(mlist.contains(Move::new_unpromote(Square::SQ44, Square::SQ53)));
        assert!(mlist.contains(Move::new_unpromote(Square::SQ44, Square::SQ54)));
    }

    let sfen = "8k/1pP6/1S7/5S3/9/9/S8/9/8K b - 1";
    let pos = Position::new_from_sfen(sfen).unwrap();
    let us = pos.side_to_move();
    let mut mlist = MoveList::new();
    let target = pos.pieces_c(us.inverse());
    mlist.generate_for_piece::<SilverType, CaptureOrPawnPromotionsType>(&pos, &target);
    assert_eq!(mlist.len(), 2);
    assert!(mlist.contains(Move::new_unpromote(Square::SQ83, Square::SQ82)));
    assert!(mlist.contains(Move::new_promote(Square::SQ83, Square::SQ82)));

    let mut mlist = MoveList::new();
    let target = pos.empty_bb();
    mlist.generate_for_piece::<SilverType, QuietsWithoutPawnPromotionsType>(&pos, &target);
    assert_eq!(mlist.len(), 17);
    assert!(mlist.contains(Move::new_unpromote(Square::SQ83, Square::SQ74)));
    assert!(mlist.contains(Move::new_promote(Square::SQ83, Square::SQ74)));
    assert!(mlist.contains(Move::new_unpromote(Square::SQ83, Square::SQ92)));
    assert!(mlist.contains(Move::new_promote(Square::SQ83, Square::SQ92)));
    assert!(mlist.contains(Move::new_unpromote(Square::SQ83, Square::SQ94)));
    assert!(mlist.contains(Move::new_promote(Square::SQ83, Square::SQ94)));
    assert!(mlist.contains(Move::new_unpromote(Square::SQ44, Square::SQ33)));
    assert!(mlist.contains(Move::new_promote(Square::SQ44, Square::SQ33)));
    assert!(mlist.contains(Move::new_unpromote(Square::SQ44, Square::SQ43)));
    assert!(mlist.contains(Move::new_promote(Square::SQ44, Square::SQ43)));
    assert!(mlist.contains(Move::new_unpromote(Square::SQ44, Square::SQ53)));
    assert!(mlist.contains(Move::new_promote(Square::SQ44, Square::SQ53)));
    assert!(mlist.contains(Move::new_unpromote(Square::SQ44, Square::SQ35)));
    assert!(mlist.contains(Move::new_unpromote(Square::SQ44, Square::SQ55)));
    assert!(mlist.contains(Move::new_unpromote(Square::SQ97, Square::SQ86)));
    assert!(mlist.contains(Move::new_unpromote(Square::SQ97, Square::SQ88)));
    assert!(mlist.contains(Move::new_unpromote(Square::SQ97, Square::SQ96)));

    let sfen = "p7k/1p7/1Np6/2N6/3N5/9/9/9/8K b - 1";
    let pos = Position::new_from_sfen(sfen).unwrap();
    let us = pos.side_to_move();
    let mut mlist = MoveList::new();
    let target = pos.pieces_c(us.inverse());
    mlist.generate_for_piece::<KnightType, CaptureOrPawnPromotionsType>(&pos, &target);
    assert_eq!(mlist.len(), 4);
    assert!(mlist.contains(Move::new_promote(Square::SQ83, Square::SQ91)));
    assert!(mlist.contains(Move::new_promote(Square::SQ74, Square::SQ82)));
    assert!(mlist.contains(Move::new_promote(Square::SQ65, Square::SQ73)));
    assert!(mlist.contains(Move::new_unpromote(Square::SQ65, Square::SQ73)));

    let mut mlist = MoveList::new();
    let target = pos.empty_bb();
    mlist.generate_for_piece::<KnightType, QuietsWithoutPawnPromotionsType>(&pos, &target);
    assert_eq!(mlist.len(), 4);
    assert!(mlist.contains(Move::new_promote(Square::SQ83, Square::SQ71)));
    assert!(mlist.contains(Move::new_promote(Square::SQ74, Square::SQ62)));
    assert!(mlist.contains(Move::new_promote(Square::SQ65, Square::SQ53)));
    assert!(mlist.contains(Move::new_unpromote(Square::SQ65, Square::SQ53)));

    let sfen = "8k/9/9/9/3n5/2n6/1nP6/1P7/P7K w - 1";
    let pos = Position::new_from_sfen(sfen).unwrap();
    let us = pos.side_to_move();
    let mut mlist = MoveList::new();
    let target = pos.pieces_c(us.inverse());
    mlist.generate_for_piece::<KnightType, CaptureOrPawnPromotionsType>(&pos, &target);
    assert_eq!(mlist.len(), 4);
    assert!(mlist.contains(Move::new_promote(Square::SQ87, Square::SQ99)));
    assert!(mlist.contains(Move::new_promote(Square::SQ76, Square::SQ88)));
    assert!(mlist.contains(Move::new_promote(Square::SQ65, Square::SQ77)));
    assert!(mlist.contains(Move::new_unpromote(Square::SQ65, Square::SQ77)));

    let mut mlist = MoveList::new();
    let target = pos.empty_bb();
    mlist.generate_for_piece::<KnightType, QuietsWithoutPawnPromotionsType>(&pos, &target);
    assert_eq!(mlist.len(), 4);
    assert!(mlist.contains(Move::new_promote(Square::SQ87, Square::SQ79)));
    assert!(mlist.contains(Move::new_promote(Square::SQ76, Square::SQ68)));
    assert!(mlist.contains(Move::new_promote(Square::SQ65, Square::SQ57)));
    assert!(mlist.contains(Move::new_unpromote(Square::SQ65, Square::SQ57)));

    let sfen = "p7k/1p7/2p6/9/LLLL5/9/9/9/8K b - 1";
    let pos = Position::new_from_sfen(sfen).unwrap();
    let us = pos.side_to_move();
    let mut mlist = MoveList::new();
    let target = pos.pieces_c(us.inverse());
    mlist.generate_for_piece::<LanceType, CaptureOrPawnPromotionsType>(&pos, &target);
    assert_eq!(mlist.len(), 4);
    assert!(mlist.contains(Move::new_promote(Square::SQ75, Square::SQ73)));
    assert!(mlist.contains(Move::new_unpromote(Square::SQ75, Square::SQ73)));
    assert!(mlist.contains(Move::new_promote(Square::SQ85, Square::SQ82)));
    assert!(mlist.contains(Move::new_promote(Square::SQ95, Square::SQ91)));

    let mut mlist = MoveList::new();
    let target = pos.empty_bb();
    mlist.generate_for_piece::<LanceType, QuietsWithoutPawnPromotionsType>(&pos, &target);
    assert_eq!(mlist.len(), 10);
    assert!(mlist.contains(Move::new_promote(Square::SQ65, Square::SQ61)));
    assert!(mlist.contains(Move::new_promote(Square::SQ65, Square::SQ62)));
    assert!(mlist.contains(Move::new_promote(Square::SQ65, Square::SQ63)));
    assert!(mlist.contains(Move::new_unpromote(Square::SQ65, Square::SQ64)));
    assert!(mlist.contains(Move::new_unpromote(Square::SQ75, Square::SQ74)));
    assert!(mlist.contains(Move::new_promote(Square::SQ85, Square::SQ83)));
    assert!(mlist.contains(Move::new_unpromote(Square::SQ85, Square::SQ84)));
    assert!(mlist.contains(Move::new_promote(Square::SQ95, Square::SQ92)));
    assert!(mlist.contains(Move::new_promote(Square::SQ95, Square::SQ93)));
    assert!(mlist.contains(Move::new_unpromote(Square::SQ95, Square::SQ94)));

    let sfen = "p7k/PPp6/2PPp4/4PPp2/6PP1/9/9/9/8K b - 1";
    let pos = Position::new_from_sfen(sfen).unwrap();
    let us = pos.side_to_move();
    let mut mlist = MoveList::new();
    let target = pos.pieces_c(us.inverse()) | (pos.empty_bb() & Bitboard::opponent_field_mask(us));
    mlist.generate_for_piece::<PawnType, CaptureOrPawnPromotionsType>(&pos, &target);
    assert_eq!(mlist.len(), 7);
    assert!(mlist.contains(Move::new_promote(Square::SQ92, Square::SQ91)));
    assert!(mlist.contains(Move::new_promote(Square::SQ82, Square::SQ81)));
    assert!(mlist.contains(Move::new_promote(Square::SQ73, Square::SQ72)));
    assert!(mlist.contains(Move::new_promote(Square::SQ63, Square::SQ62)));
    assert!(mlist.contains(Move::new_promote(Square::SQ54, Square::SQ53)));
    assert!(mlist.contains(Move::new_promote(Square::SQ44, Square::SQ43)));
    assert!(mlist.contains(Move::new_unpromote(Square::SQ35, Square::SQ34)));

    let mut mlist = MoveList::new();
    let target = pos.empty_bb() & !Bitboard::opponent_field_mask(us);
    mlist.generate_for_piece::<PawnType, QuietsWithoutPawnPromotionsType>(&pos, &target);
    assert_eq!(mlist.len(), 1);
    assert!(mlist.contains(Move::new_unpromote(Square::SQ25, Square::SQ24)));

    let sfen = "4k4/7p1/9/9/4+B+B3/5P3/9/9/s3K4 b - 1";
    let pos = Position::new_from_sfen(sfen).unwrap();
    let us = pos.side_to_move();
    let mut mlist = MoveList::new();
    let target = pos.pieces_c(us.inverse());
    mlist.generate_for_piece::<HorseType, CaptureOrPawnPromotionsType>(&pos, &target);
    assert_eq!(mlist.len(), 2);
    assert!(mlist.contains(Move::new_unpromote(Square::SQ55, Square::SQ22)));
    assert!(mlist.contains(Move::new_unpromote(Square::SQ55, Square::SQ99)));

    let mut mlist = MoveList::new();
    let target = pos.empty_bb();
    mlist.generate_for_piece::<HorseType, QuietsWithoutPawnPromotionsType>(&pos, &target);
    assert_eq!(mlist.len(), 28);
    assert!(mlist.contains(Move::new_unpromote(Square::SQ55, Square::SQ33)));
    assert!(mlist.contains(Move::new_unpromote(Square::SQ55, Square::SQ91)));
    assert!(mlist.contains(Move::new_unpromote(Square::SQ55, Square::SQ88)));
    assert!(mlist.contains(Move::new_unpromote(Square::SQ55, Square::SQ54)));
    assert!(mlist.contains(Move::new_unpromote(Square::SQ55, Square::SQ65)));
    assert!(mlist.contains(Move::new_unpromote(Square::SQ45, Square::SQ18)));
    assert!(mlist.contains(Move::new_unpromote(Square::SQ45, Square::SQ81)));
    assert!(mlist.contains(Move::new_unpromote(Square::SQ45, Square::SQ35)));
    assert!(mlist.contains(Move::new_unpromote(Square::SQ45, Square::SQ44)));
}

#[test]
fn test_generate_drop() {
    let sfen = "l6nl/5+P1gk/2np1S3/p1p4Pp/3P2Sp1/1PPb2P1P/P5GS1/R8/LN4bKL w GR5pnsg 1";
    let pos = Position::new_from_sfen(sfen).unwrap();
    let mut mlist = MoveList::new();
    let target = pos.empty_bb();
    mlist.generate_drop::<QuietsWithoutPawnPromotionsType>(&pos, &target);
    assert_eq!(mlist.len(), 167);

    let sfen = "l5+R2/1k2r2p1/1sngn4/l1ppp2P1/5pp2/lPPPP4/1KSG4P/1SSB5/1N1G4+b w GLPn5p 130";
    let pos = Position::new_from_sfen(sfen).unwrap();
    let mut mlist = MoveList::new();
    let target = pos.empty_bb();
    mlist.generate_drop::<QuietsWithoutPawnPromotionsType>(&pos, &target);
    assert!(mlist.iter().any(|m| m.to_csa_string(&pos) == "0081FU"));
    assert!(Move::new_from_csa_str("0081FU", &pos).is_some());

    let sfen = "ln3G2l/7k1/3pgsn2/2p2bpp1/p4p3/3sSbn1P/P2P1GPP1/2+r3S1K/L3RG1NL w P6p 106";
    let pos = Position::new_from_sfen(sfen).unwrap();
    let mut mlist = MoveList::new();
    let target = pos.empty_bb();
    mlist.generate_drop::<QuietsWithoutPawnPromotionsType>(&pos, &target);
    assert!(mlist.iter().any(|m| m.to_csa_string(&pos) == "0017FU"));
    assert!(Move::new_from_csa_str("0017FU", &pos).is_some());
}

#[test]
fn test_generate_evasion() {
    let sfen = "9/4k4/r8/3b5/4L4/9/9/9/4K4 w pnsg 1";
    let pos = Position::new_from_sfen(sfen).unwrap();

    let mut mlist = MoveList::new();
    mlist.generate::<EvasionsType>(&pos);
    assert_eq!(mlist.len(), 17);
    let moved_from = |pc: Piece| {
        mlist
            .iter()
            .filter(|m| !m.is_drop() && pos.piece_on(m.from()) == pc)
            .count()
    };
    assert_eq!(moved_from(Piece::W_ROOK), 1);
    assert_eq!(moved_from(Piece::W_BISHOP), 2);
    assert_eq!(moved_from(Piece::W_KING), 6);
    assert_eq!(mlist.iter().filter(|m| m.is_drop()).count(), 8);
    // Drops may only interpose, never capture the checker.
    assert!(mlist.iter().all(|m| !m.is_drop() || pos.piece_on(m.to()) == Piece::EMPTY));
}

#[test]
fn test_generate_all() {
    let sfen = "l6nl/5+P1gk/2np1S3/p1p4Pp/3P2Sp1/1PPb2P1P/P5GS1/R8/LN4bKL w GR5pnsg 1";
    let pos = Position::new_from_sfen(sfen).unwrap();

    let mut mlist = MoveList::new();
    mlist.generate::<CaptureOrPawnPromotionsType>(&pos);
    assert_eq!(mlist.len(), 2);

    let mut mlist = MoveList::new();
    mlist.generate::<QuietsWithoutPawnPromotionsType>(&pos);
    assert_eq!(mlist.len(), 197);

    let mut mlist = MoveList::new();
    mlist.generate::<NonEvasionsType>(&pos);
    assert_eq!(mlist.len(), 208);
    assert!(mlist.iter().all(|&m| pos.pseudo_legal(m)));

    // The capture and quiet families partition the single-best-promotion
    // subset of the full list.
    let mut subsets = MoveList::new();
    subsets.generate::<CaptureOrPawnPromotionsType>(&pos);
    subsets.generate::<QuietsWithoutPawnPromotionsType>(&pos);
    assert_eq!(subsets.len(), 199);
    assert!(subsets.iter().all(|&m| mlist.contains(m)));
}

#[test]
fn test_generate_deterministic() {
    let sfen = "l6nl/5+P1gk/2np1S3/p1p4Pp/3P2Sp1/1PPb2P1P/P5GS1/R8/LN4bKL w GR5pnsg 1";
    let pos = Position::new_from_sfen(sfen).unwrap();
    let mut first = MoveList::new();
    first.generate::<NonEvasionsType>(&pos);
    let mut second = MoveList::new();
    second.generate::<NonEvasionsType>(&pos);
    assert_eq!(first.slice(), second.slice());
}

#[test]
fn test_generate_legals() {
    let pos = Position::new();
    let mut mlist = MoveList::new();
    mlist.generate::<LegalType>(&pos);
    assert_eq!(mlist.len(), 30);
    assert!(mlist.contains(Move::new_unpromote(Square::SQ77, Square::SQ76)));
    assert!(mlist.contains(Move::new_unpromote(Square::SQ28, Square::SQ68)));
    assert!(mlist.iter().all(|&m| pos.pseudo_legal(m) && pos.legal(m)));

    // A pinned bishop may not leave the rook's file, so only the king moves.
    let sfen = "4k4/9/9/9/4r4/9/4B4/9/4K4 b - 1";
    let pos = Position::new_from_sfen(sfen).unwrap();
    let mut mlist = MoveList::new();
    mlist.generate::<LegalType>(&pos);
    assert_eq!(mlist.len(), 5);
    assert!(mlist.iter().all(|m| !m.is_drop() && m.from() == Square::SQ59));
}

#[test]
fn test_generate_legal_evasions() {
    let sfen = "9/4k4/r8/3b5/4L4/9/9/9/4K4 w pnsg 1";
    let pos = Position::new_from_sfen(sfen).unwrap();
    let mut mlist = MoveList::new();
    mlist.generate::<LegalType>(&pos);
    assert_eq!(mlist.len(), 17);
    for m in mlist.iter() {
        let mut pos = Position::new_from_sfen(sfen).unwrap();
        assert!(pos.do_move(*m));
    }
}

#[test]
fn test_move_new_from_csa_str() {
    let sfen = "lnsgkgsnl/1r5b1/ppppppppp/9/9/9/PPPPPPPPP/1B5R1/LNSGKGSNL b - 1";
    let pos = Position::new_from_sfen(sfen).unwrap();

    let m_str = "7776FU";
    if let Some(m) = Move::new_from_csa_str(m_str, &pos) {
        assert_eq!(m.to_csa_string(&pos), m_str);
    } else {
        unreachable!();
    }
    let m_str_illegal = "7775FU";
    assert!(Move::new_from_csa_str(m_str_illegal, &pos).is_none());
}

#[test]
fn test_pawn_drop_mate() {
    let sfen = "kl7/1n7/K8/9/9/9/9/9/9 b P 1";
    let pos = Position::new_from_sfen(sfen).unwrap();
    let mut mlist = MoveList::new();
    mlist.generate::<NonEvasionsType>(&pos);
    assert!(mlist.iter().all(|m| m.to_csa_string(&pos) != "0092FU"));
}
