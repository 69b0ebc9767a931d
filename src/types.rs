use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Copy, Clone, PartialEq, Eq)]
pub struct Color(pub i32);

impl Color {
    pub const BLACK: Color = Color(0);
    pub const WHITE: Color = Color(1);
    pub const NUM: usize = 2;

    pub const ALL: [Color; Color::NUM] = [Color::BLACK, Color::WHITE];

    pub fn inverse(self) -> Color {
        Color(1 ^ self.0)
    }
    pub fn new(pc: Piece) -> Color {
        Color((pc.0 & Piece::WHITE_BIT) >> Piece::WHITE_BIT_SHIFT)
    }
    // Board values are positive for Black, negative for White.
    pub fn sign(self) -> i32 {
        1 - (self.0 << 1)
    }
}

impl std::fmt::Debug for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let s = match *self {
            Color::BLACK => "black",
            Color::WHITE => "white",
            _ => unreachable!(),
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct File(pub i32);

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Rank(pub i32);

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Square(pub i32);

impl File {
    pub const FILE1: File = File(0);
    pub const FILE2: File = File(1);
    pub const FILE3: File = File(2);
    pub const FILE4: File = File(3);
    pub const FILE5: File = File(4);
    pub const FILE6: File = File(5);
    pub const FILE7: File = File(6);
    pub const FILE8: File = File(7);
    pub const FILE9: File = File(8);
    pub const NUM: usize = 9;

    pub const ALL: [File; File::NUM] = {
        let mut files = [File(0); File::NUM];
        let mut i = 0;
        while i < File::NUM {
            files[i] = File(i as i32);
            i += 1;
        }
        files
    };
    pub const ALL_FROM_LEFT: [File; File::NUM] = {
        let mut files = [File(0); File::NUM];
        let mut i = 0;
        while i < File::NUM {
            files[i] = File((File::NUM - 1 - i) as i32);
            i += 1;
        }
        files
    };

    pub fn new(sq: Square) -> File {
        debug_assert!(sq.is_ok());
        File(sq.0 / Rank::NUM as i32)
    }
    pub fn inverse(self) -> File {
        File(File::NUM as i32 - 1 - self.0)
    }
    pub fn to_usi_char(self) -> char {
        debug_assert!(0 <= self.0 && self.0 < File::NUM as i32);
        (b'1' + self.0 as u8) as char
    }
    pub fn new_from_usi_char(c: char) -> Option<File> {
        match c {
            '1'..='9' => Some(File(c as i32 - '1' as i32)),
            _ => None,
        }
    }
    pub fn to_csa_char(self) -> char {
        self.to_usi_char()
    }
    pub fn new_from_csa_char(c: char) -> Option<File> {
        File::new_from_usi_char(c)
    }
}

impl Rank {
    pub const RANK1: Rank = Rank(0);
    pub const RANK2: Rank = Rank(1);
    pub const RANK3: Rank = Rank(2);
    pub const RANK4: Rank = Rank(3);
    pub const RANK5: Rank = Rank(4);
    pub const RANK6: Rank = Rank(5);
    pub const RANK7: Rank = Rank(6);
    pub const RANK8: Rank = Rank(7);
    pub const RANK9: Rank = Rank(8);
    pub const NUM: usize = 9;

    pub const ALL: [Rank; Rank::NUM] = {
        let mut ranks = [Rank(0); Rank::NUM];
        let mut i = 0;
        while i < Rank::NUM {
            ranks[i] = Rank(i as i32);
            i += 1;
        }
        ranks
    };

    pub fn new(sq: Square) -> Rank {
        debug_assert!(sq.is_ok());
        Rank(sq.0 % Rank::NUM as i32)
    }
    pub fn new_from_color_and_rank_as_black(c: Color, rank_as_black: RankAsBlack) -> Rank {
        match c {
            Color::BLACK => Rank(rank_as_black.0),
            Color::WHITE => Rank(rank_as_black.0).inverse(),
            _ => unreachable!(),
        }
    }
    pub fn inverse(self) -> Rank {
        Rank(Rank::NUM as i32 - 1 - self.0)
    }
    pub fn new_from_usi_char(c: char) -> Option<Rank> {
        match c {
            'a'..='i' => Some(Rank(c as i32 - 'a' as i32)),
            _ => None,
        }
    }
    pub fn new_from_csa_char(c: char) -> Option<Rank> {
        match c {
            '1'..='9' => Some(Rank(c as i32 - '1' as i32)),
            _ => None,
        }
    }
    pub fn to_usi_char(self) -> char {
        debug_assert!(0 <= self.0 && self.0 < Rank::NUM as i32);
        (b'a' + self.0 as u8) as char
    }
    pub fn to_csa_char(self) -> char {
        debug_assert!(0 <= self.0 && self.0 < Rank::NUM as i32);
        (b'1' + self.0 as u8) as char
    }
    // Ranks 1-3 as seen from us are the promotion zone.
    pub fn is_opponent_field(self, us: Color) -> bool {
        (0x1c0_0007 & (1 << ((us.0 << 4) + self.0))) != 0
    }
    pub fn is_in_front_of(self, us: Color, rank_as_black: RankAsBlack) -> bool {
        match us {
            Color::BLACK => self.0 < Rank::new_from_color_and_rank_as_black(Color::BLACK, rank_as_black).0,
            Color::WHITE => self.0 > Rank::new_from_color_and_rank_as_black(Color::WHITE, rank_as_black).0,
            _ => unreachable!(),
        }
    }
}

#[derive(Debug, Copy, Clone)]
pub struct RankAsBlack(i32);

impl RankAsBlack {
    pub const RANK1: RankAsBlack = RankAsBlack(0);
    pub const RANK2: RankAsBlack = RankAsBlack(1);
    pub const RANK3: RankAsBlack = RankAsBlack(2);

    pub fn new(c: Color, r: Rank) -> RankAsBlack {
        match c {
            Color::BLACK => RankAsBlack(r.0),
            Color::WHITE => RankAsBlack(r.inverse().0),
            _ => unreachable!(),
        }
    }
}

impl Square {
    pub const SQ11: Square = Square(0);
    pub const SQ12: Square = Square(1);
    pub const SQ13: Square = Square(2);
    pub const SQ14: Square = Square(3);
    pub const SQ15: Square = Square(4);
    pub const SQ16: Square = Square(5);
    pub const SQ17: Square = Square(6);
    pub const SQ18: Square = Square(7);
    pub const SQ19: Square = Square(8);
    pub const SQ21: Square = Square(9);
    pub const SQ22: Square = Square(10);
    pub const SQ23: Square = Square(11);
    pub const SQ24: Square = Square(12);
    pub const SQ25: Square = Square(13);
    pub const SQ26: Square = Square(14);
    pub const SQ27: Square = Square(15);
    pub const SQ28: Square = Square(16);
    pub const SQ29: Square = Square(17);
    pub const SQ31: Square = Square(18);
    pub const SQ32: Square = Square(19);
    pub const SQ33: Square = Square(20);
    pub const SQ34: Square = Square(21);
    pub const SQ35: Square = Square(22);
    pub const SQ36: Square = Square(23);
    pub const SQ37: Square = Square(24);
    pub const SQ38: Square = Square(25);
    pub const SQ39: Square = Square(26);
    pub const SQ41: Square = Square(27);
    pub const SQ42: Square = Square(28);
    pub const SQ43: Square = Square(29);
    pub const SQ44: Square = Square(30);
    pub const SQ45: Square = Square(31);
    pub const SQ46: Square = Square(32);
    pub const SQ47: Square = Square(33);
    pub const SQ48: Square = Square(34);
    pub const SQ49: Square = Square(35);
    pub const SQ51: Square = Square(36);
    pub const SQ52: Square = Square(37);
    pub const SQ53: Square = Square(38);
    pub const SQ54: Square = Square(39);
    pub const SQ55: Square = Square(40);
    pub const SQ56: Square = Square(41);
    pub const SQ57: Square = Square(42);
    pub const SQ58: Square = Square(43);
    pub const SQ59: Square = Square(44);
    pub const SQ61: Square = Square(45);
    pub const SQ62: Square = Square(46);
    pub const SQ63: Square = Square(47);
    pub const SQ64: Square = Square(48);
    pub const SQ65: Square = Square(49);
    pub const SQ66: Square = Square(50);
    pub const SQ67: Square = Square(51);
    pub const SQ68: Square = Square(52);
    pub const SQ69: Square = Square(53);
    pub const SQ71: Square = Square(54);
    pub const SQ72: Square = Square(55);
    pub const SQ73: Square = Square(56);
    pub const SQ74: Square = Square(57);
    pub const SQ75: Square = Square(58);
    pub const SQ76: Square = Square(59);
    pub const SQ77: Square = Square(60);
    pub const SQ78: Square = Square(61);
    pub const SQ79: Square = Square(62);
    pub const SQ81: Square = Square(63);
    pub const SQ82: Square = Square(64);
    pub const SQ83: Square = Square(65);
    pub const SQ84: Square = Square(66);
    pub const SQ85: Square = Square(67);
    pub const SQ86: Square = Square(68);
    pub const SQ87: Square = Square(69);
    pub const SQ88: Square = Square(70);
    pub const SQ89: Square = Square(71);
    pub const SQ91: Square = Square(72);
    pub const SQ92: Square = Square(73);
    pub const SQ93: Square = Square(74);
    pub const SQ94: Square = Square(75);
    pub const SQ95: Square = Square(76);
    pub const SQ96: Square = Square(77);
    pub const SQ97: Square = Square(78);
    pub const SQ98: Square = Square(79);
    pub const SQ99: Square = Square(80);
    pub const NUM: usize = 81;

    pub const DELTA_N: Square = Square(-1);
    pub const DELTA_E: Square = Square(-(Rank::NUM as i32));
    pub const DELTA_S: Square = Square(1);
    pub const DELTA_W: Square = Square(Rank::NUM as i32);
    pub const DELTA_NE: Square = Square(Square::DELTA_N.0 + Square::DELTA_E.0);
    pub const DELTA_SE: Square = Square(Square::DELTA_S.0 + Square::DELTA_E.0);
    pub const DELTA_SW: Square = Square(Square::DELTA_S.0 + Square::DELTA_W.0);
    pub const DELTA_NW: Square = Square(Square::DELTA_N.0 + Square::DELTA_W.0);
    pub const DELTA_NNE: Square = Square(Square::DELTA_N.0 + Square::DELTA_NE.0);
    pub const DELTA_SSE: Square = Square(Square::DELTA_S.0 + Square::DELTA_SE.0);
    pub const DELTA_SSW: Square = Square(Square::DELTA_S.0 + Square::DELTA_SW.0);
    pub const DELTA_NNW: Square = Square(Square::DELTA_N.0 + Square::DELTA_NW.0);

    pub const ALL: [Square; Square::NUM] = {
        let mut sqs = [Square(0); Square::NUM];
        let mut i = 0;
        while i < Square::NUM {
            sqs[i] = Square(i as i32);
            i += 1;
        }
        sqs
    };

    pub fn new(f: File, r: Rank) -> Square {
        Square(f.0 * Rank::NUM as i32 + r.0)
    }
    pub fn inverse(self) -> Square {
        Square(Square::NUM as i32 - 1 - self.0)
    }
    #[allow(dead_code)]
    pub fn inverse_file(self) -> Square {
        Square::new(File::new(self).inverse(), Rank::new(self))
    }
    pub fn to_usi_string(self) -> String {
        [File::new(self).to_usi_char(), Rank::new(self).to_usi_char()].iter().collect()
    }
    pub fn to_csa_string(self) -> String {
        [File::new(self).to_csa_char(), Rank::new(self).to_csa_char()].iter().collect()
    }
    pub fn is_ok(self) -> bool {
        0 <= self.0 && self.0 < Square::NUM as i32
    }
    pub fn checked_add(self, delta: Square) -> Option<Square> {
        let sq = Square(self.0 + delta.0);
        if sq.is_ok() {
            return Some(sq);
        }
        None
    }
    pub fn add_unchecked(self, delta: Square) -> Square {
        Square(self.0 + delta.0)
    }
}

/// Bit position of a square inside the two-word bitboard pair.
///
/// The low word carries squares 0..=62 in bits 0..=62 and leaves bit 63
/// unused; the high word starts at logical bit 64. Region and Square are
/// bijective over all 81 squares, with 63 the one hole.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Region(pub i32);

impl Region {
    pub const NUM: usize = 82;
    const HOLE: i32 = 63;

    const SQUARE_TO_REGION: [i32; Square::NUM] = {
        let mut table = [0; Square::NUM];
        let mut sq = 0;
        while sq < Square::NUM as i32 {
            table[sq as usize] = if sq < Region::HOLE { sq } else { sq + 1 };
            sq += 1;
        }
        table
    };
    const REGION_TO_SQUARE: [i32; Region::NUM] = {
        let mut table = [-1; Region::NUM];
        let mut sq = 0;
        while sq < Square::NUM as i32 {
            table[Region::SQUARE_TO_REGION[sq as usize] as usize] = sq;
            sq += 1;
        }
        table
    };

    pub fn new(sq: Square) -> Region {
        debug_assert!(sq.is_ok());
        unsafe { Region(*Region::SQUARE_TO_REGION.get_unchecked(sq.0 as usize)) }
    }
    // Usable in const contexts, where Region::new is not.
    pub const fn bit_index(sq_index: usize) -> usize {
        Region::SQUARE_TO_REGION[sq_index] as usize
    }
    pub fn to_square(self) -> Square {
        debug_assert!(0 <= self.0 && self.0 < Region::NUM as i32 && self.0 != Region::HOLE);
        unsafe { Square(*Region::REGION_TO_SQUARE.get_unchecked(self.0 as usize)) }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PieceType(pub i32);

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece(pub i32);

impl PieceType {
    const PROMOTION: i32 = 8;
    pub const OCCUPIED: PieceType = PieceType(0);
    pub const PAWN: PieceType = PieceType(1);
    pub const LANCE: PieceType = PieceType(2);
    pub const KNIGHT: PieceType = PieceType(3);
    pub const SILVER: PieceType = PieceType(4);
    pub const BISHOP: PieceType = PieceType(5);
    pub const ROOK: PieceType = PieceType(6);
    pub const GOLD: PieceType = PieceType(7);
    pub const KING: PieceType = PieceType(8);
    pub const PRO_PAWN: PieceType = PieceType(9);
    pub const PRO_LANCE: PieceType = PieceType(10);
    pub const PRO_KNIGHT: PieceType = PieceType(11);
    pub const PRO_SILVER: PieceType = PieceType(12);
    pub const HORSE: PieceType = PieceType(13);
    pub const DRAGON: PieceType = PieceType(14);
    pub const NUM: usize = 15;
    pub const HAND_NUM: usize = 8;

    // The order of these elements is specified with SFEN.
    pub const ALL_HAND_FOR_SFEN: [PieceType; 7] = [
        PieceType::ROOK,
        PieceType::BISHOP,
        PieceType::GOLD,
        PieceType::SILVER,
        PieceType::KNIGHT,
        PieceType::LANCE,
        PieceType::PAWN,
    ];

    pub const ALL_HAND: [PieceType; 7] = [
        PieceType::PAWN,
        PieceType::LANCE,
        PieceType::KNIGHT,
        PieceType::SILVER,
        PieceType::BISHOP,
        PieceType::ROOK,
        PieceType::GOLD,
    ];

    pub fn new(pc: Piece) -> PieceType {
        PieceType(pc.0 & (Piece::WHITE_BIT - 1))
    }
    pub fn is_promotable(self) -> bool {
        matches!(
            self,
            PieceType::PAWN | PieceType::LANCE | PieceType::KNIGHT | PieceType::SILVER | PieceType::BISHOP | PieceType::ROOK
        )
    }
    pub fn to_promote(self) -> PieceType {
        debug_assert!(self.is_promotable());
        PieceType(self.0 + PieceType::PROMOTION)
    }
    pub fn to_demote_if_possible(self) -> PieceType {
        match self {
            PieceType::PAWN | PieceType::PRO_PAWN => PieceType::PAWN,
            PieceType::LANCE | PieceType::PRO_LANCE => PieceType::LANCE,
            PieceType::KNIGHT | PieceType::PRO_KNIGHT => PieceType::KNIGHT,
            PieceType::SILVER | PieceType::PRO_SILVER => PieceType::SILVER,
            PieceType::BISHOP | PieceType::HORSE => PieceType::BISHOP,
            PieceType::ROOK | PieceType::DRAGON => PieceType::ROOK,
            PieceType::GOLD => PieceType::GOLD,
            _ => unreachable!(),
        }
    }
    pub fn to_usi_str(self) -> &'static str {
        match self {
            PieceType::PAWN => "P",
            PieceType::LANCE => "L",
            PieceType::KNIGHT => "N",
            PieceType::SILVER => "S",
            PieceType::BISHOP => "B",
            PieceType::ROOK => "R",
            PieceType::GOLD => "G",
            PieceType::KING => "K",
            PieceType::PRO_PAWN => "+P",
            PieceType::PRO_LANCE => "+L",
            PieceType::PRO_KNIGHT => "+N",
            PieceType::PRO_SILVER => "+S",
            PieceType::HORSE => "+B",
            PieceType::DRAGON => "+R",
            _ => unreachable!(),
        }
    }
    pub fn to_csa_str(self) -> &'static str {
        match self {
            PieceType::PAWN => "FU",
            PieceType::LANCE => "KY",
            PieceType::KNIGHT => "KE",
            PieceType::SILVER => "GI",
            PieceType::BISHOP => "KA",
            PieceType::ROOK => "HI",
            PieceType::GOLD => "KI",
            PieceType::KING => "OU",
            PieceType::PRO_PAWN => "TO",
            PieceType::PRO_LANCE => "NY",
            PieceType::PRO_KNIGHT => "NK",
            PieceType::PRO_SILVER => "NG",
            PieceType::HORSE => "UM",
            PieceType::DRAGON => "RY",
            _ => unreachable!(),
        }
    }
    pub fn new_from_str_for_drop_move(s: &str) -> Option<PieceType> {
        match s {
            "P" => Some(PieceType::PAWN),
            "L" => Some(PieceType::LANCE),
            "N" => Some(PieceType::KNIGHT),
            "S" => Some(PieceType::SILVER),
            "B" => Some(PieceType::BISHOP),
            "R" => Some(PieceType::ROOK),
            "G" => Some(PieceType::GOLD),
            _ => None,
        }
    }
    pub fn new_from_csa_str(s: &str) -> Option<PieceType> {
        match s {
            "FU" => Some(PieceType::PAWN),
            "KY" => Some(PieceType::LANCE),
            "KE" => Some(PieceType::KNIGHT),
            "GI" => Some(PieceType::SILVER),
            "KA" => Some(PieceType::BISHOP),
            "HI" => Some(PieceType::ROOK),
            "KI" => Some(PieceType::GOLD),
            "OU" => Some(PieceType::KING),
            "TO" => Some(PieceType::PRO_PAWN),
            "NY" => Some(PieceType::PRO_LANCE),
            "NK" => Some(PieceType::PRO_KNIGHT),
            "NG" => Some(PieceType::PRO_SILVER),
            "UM" => Some(PieceType::HORSE),
            "RY" => Some(PieceType::DRAGON),
            _ => None,
        }
    }
}

impl Piece {
    pub const PROMOTION: i32 = 8;
    pub const WHITE_BIT_SHIFT: i32 = 4;
    pub const WHITE_BIT: i32 = 1 << Piece::WHITE_BIT_SHIFT;
    pub const EMPTY: Piece = Piece(0);
    pub const B_PAWN: Piece = Piece(1);
    pub const B_LANCE: Piece = Piece(2);
    pub const B_KNIGHT: Piece = Piece(3);
    pub const B_SILVER: Piece = Piece(4);
    pub const B_BISHOP: Piece = Piece(5);
    pub const B_ROOK: Piece = Piece(6);
    pub const B_GOLD: Piece = Piece(7);
    pub const B_KING: Piece = Piece(8);
    pub const B_PRO_PAWN: Piece = Piece(9);
    pub const B_PRO_LANCE: Piece = Piece(10);
    pub const B_PRO_KNIGHT: Piece = Piece(11);
    pub const B_PRO_SILVER: Piece = Piece(12);
    pub const B_HORSE: Piece = Piece(13);
    pub const B_DRAGON: Piece = Piece(14);
    pub const W_PAWN: Piece = Piece(17);
    pub const W_LANCE: Piece = Piece(18);
    pub const W_KNIGHT: Piece = Piece(19);
    pub const W_SILVER: Piece = Piece(20);
    pub const W_BISHOP: Piece = Piece(21);
    pub const W_ROOK: Piece = Piece(22);
    pub const W_GOLD: Piece = Piece(23);
    pub const W_KING: Piece = Piece(24);
    pub const W_PRO_PAWN: Piece = Piece(25);
    pub const W_PRO_LANCE: Piece = Piece(26);
    pub const W_PRO_KNIGHT: Piece = Piece(27);
    pub const W_PRO_SILVER: Piece = Piece(28);
    pub const W_HORSE: Piece = Piece(29);
    pub const W_DRAGON: Piece = Piece(30);

    pub const NUM: usize = Piece::W_DRAGON.0 as usize + 1;

    pub fn new(c: Color, pt: PieceType) -> Piece {
        Piece((c.0 << Piece::WHITE_BIT_SHIFT) | pt.0)
    }
    pub fn new_from_str(s: &str) -> Option<Piece> {
        let (promoted, base) = match s.strip_prefix('+') {
            Some(rest) => (true, rest),
            None => (false, s),
        };
        let pc = Piece::new_hand_piece_from_str(base)?;
        if promoted {
            if !pc.is_promotable() {
                return None;
            }
            Some(pc.to_promote())
        } else {
            Some(pc)
        }
    }
    pub fn new_hand_piece_from_str(s: &str) -> Option<Piece> {
        match s {
            "P" => Some(Piece::B_PAWN),
            "p" => Some(Piece::W_PAWN),
            "L" => Some(Piece::B_LANCE),
            "l" => Some(Piece::W_LANCE),
            "N" => Some(Piece::B_KNIGHT),
            "n" => Some(Piece::W_KNIGHT),
            "S" => Some(Piece::B_SILVER),
            "s" => Some(Piece::W_SILVER),
            "B" => Some(Piece::B_BISHOP),
            "b" => Some(Piece::W_BISHOP),
            "R" => Some(Piece::B_ROOK),
            "r" => Some(Piece::W_ROOK),
            "G" => Some(Piece::B_GOLD),
            "g" => Some(Piece::W_GOLD),
            "K" => Some(Piece::B_KING),
            "k" => Some(Piece::W_KING),
            _ => None,
        }
    }
    pub fn inverse(self) -> Piece {
        Piece::new(Color::new(self).inverse(), PieceType::new(self))
    }
    pub fn is_promotable(self) -> bool {
        PieceType::new(self).is_promotable()
    }
    pub fn to_promote(self) -> Piece {
        debug_assert!(self.is_promotable());
        Piece(self.0 + Piece::PROMOTION)
    }
    pub fn to_demote(self) -> Piece {
        debug_assert!(!self.is_promotable());
        Piece(self.0 - Piece::PROMOTION)
    }
    pub fn is_king(self) -> bool {
        PieceType::new(self) == PieceType::KING
    }
    pub fn to_usi_str(self) -> &'static str {
        match self {
            Piece::EMPTY => "",
            Piece::B_PAWN => "P",
            Piece::B_LANCE => "L",
            Piece::B_KNIGHT => "N",
            Piece::B_SILVER => "S",
            Piece::B_BISHOP => "B",
            Piece::B_ROOK => "R",
            Piece::B_GOLD => "G",
            Piece::B_KING => "K",
            Piece::B_PRO_PAWN => "+P",
            Piece::B_PRO_LANCE => "+L",
            Piece::B_PRO_KNIGHT => "+N",
            Piece::B_PRO_SILVER => "+S",
            Piece::B_HORSE => "+B",
            Piece::B_DRAGON => "+R",
            Piece::W_PAWN => "p",
            Piece::W_LANCE => "l",
            Piece::W_KNIGHT => "n",
            Piece::W_SILVER => "s",
            Piece::W_BISHOP => "b",
            Piece::W_ROOK => "r",
            Piece::W_GOLD => "g",
            Piece::W_KING => "k",
            Piece::W_PRO_PAWN => "+p",
            Piece::W_PRO_LANCE => "+l",
            Piece::W_PRO_KNIGHT => "+n",
            Piece::W_PRO_SILVER => "+s",
            Piece::W_HORSE => "+b",
            Piece::W_DRAGON => "+r",
            _ => unreachable!(),
        }
    }
    pub fn to_csa_str(self) -> &'static str {
        match self {
            Piece::EMPTY => " * ",
            Piece::B_PAWN => "+FU",
            Piece::B_LANCE => "+KY",
            Piece::B_KNIGHT => "+KE",
            Piece::B_SILVER => "+GI",
            Piece::B_BISHOP => "+KA",
            Piece::B_ROOK => "+HI",
            Piece::B_GOLD => "+KI",
            Piece::B_KING => "+OU",
            Piece::B_PRO_PAWN => "+TO",
            Piece::B_PRO_LANCE => "+NY",
            Piece::B_PRO_KNIGHT => "+NK",
            Piece::B_PRO_SILVER => "+NG",
            Piece::B_HORSE => "+UM",
            Piece::B_DRAGON => "+RY",
            Piece::W_PAWN => "-FU",
            Piece::W_LANCE => "-KY",
            Piece::W_KNIGHT => "-KE",
            Piece::W_SILVER => "-GI",
            Piece::W_BISHOP => "-KA",
            Piece::W_ROOK => "-HI",
            Piece::W_GOLD => "-KI",
            Piece::W_KING => "-OU",
            Piece::W_PRO_PAWN => "-TO",
            Piece::W_PRO_LANCE => "-NY",
            Piece::W_PRO_KNIGHT => "-NK",
            Piece::W_PRO_SILVER => "-NG",
            Piece::W_HORSE => "-UM",
            Piece::W_DRAGON => "-RY",
            _ => unreachable!(),
        }
    }
}

pub struct PawnType;
pub struct LanceType;
pub struct KnightType;
pub struct SilverType;
pub struct BishopType;
pub struct RookType;
pub struct GoldType;
pub struct KingType;
pub struct HorseType;
pub struct DragonType;

pub trait PieceTypeTrait {
    const PIECE_TYPE: PieceType;
}
impl PieceTypeTrait for PawnType {
    const PIECE_TYPE: PieceType = PieceType::PAWN;
}
impl PieceTypeTrait for LanceType {
    const PIECE_TYPE: PieceType = PieceType::LANCE;
}
impl PieceTypeTrait for KnightType {
    const PIECE_TYPE: PieceType = PieceType::KNIGHT;
}
impl PieceTypeTrait for SilverType {
    const PIECE_TYPE: PieceType = PieceType::SILVER;
}
impl PieceTypeTrait for BishopType {
    const PIECE_TYPE: PieceType = PieceType::BISHOP;
}
impl PieceTypeTrait for RookType {
    const PIECE_TYPE: PieceType = PieceType::ROOK;
}
impl PieceTypeTrait for GoldType {
    const PIECE_TYPE: PieceType = PieceType::GOLD;
}
impl PieceTypeTrait for KingType {
    const PIECE_TYPE: PieceType = PieceType::KING;
}
impl PieceTypeTrait for HorseType {
    const PIECE_TYPE: PieceType = PieceType::HORSE;
}
impl PieceTypeTrait for DragonType {
    const PIECE_TYPE: PieceType = PieceType::DRAGON;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Add, AddAssign, Sub, SubAssign, Neg)]
pub struct Value(pub i32);

impl Value {
    pub const ZERO: Value = Value(0);
}

#[derive(Clone, Copy, PartialEq, Eq, BitXor, BitXorAssign, Hash)]
pub struct Key(pub u64);

impl Key {
    pub const ZERO: Key = Key(0);

    // Hand keys accumulate arithmetically, one summand per held piece.
    #[inline]
    pub fn wrapping_add(self, other: Key) -> Key {
        Key(self.0.wrapping_add(other.0))
    }
    #[inline]
    pub fn wrapping_sub(self, other: Key) -> Key {
        Key(self.0.wrapping_sub(other.0))
    }
    #[inline]
    pub fn wrapping_mul_scalar(self, n: u64) -> Key {
        Key(self.0.wrapping_mul(n))
    }
}

impl std::fmt::Debug for Key {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "Key({:#018x})", self.0)
    }
}

#[test]
fn test_color_inverse() {
    assert_eq!(Color::BLACK.inverse(), Color::WHITE);
    assert_eq!(Color::WHITE.inverse(), Color::BLACK);
}

#[test]
fn test_color_sign() {
    assert_eq!(Color::BLACK.sign(), 1);
    assert_eq!(Color::WHITE.sign(), -1);
}

#[test]
fn test_square_new() {
    assert_eq!(Square::new(File::FILE3, Rank::RANK4), Square::SQ34);
}

#[test]
fn test_square_inverse() {
    assert_eq!(Square::SQ11.inverse(), Square::SQ99);
    assert_eq!(Square::SQ12.inverse(), Square::SQ98);
    assert_eq!(Square::SQ21.inverse(), Square::SQ89);
    for &sq in Square::ALL.iter() {
        assert_eq!(sq.inverse().inverse(), sq);
    }
}

#[test]
fn test_file_new_and_rank_new() {
    for &sq in Square::ALL.iter() {
        let file = File::new(sq);
        let rank = Rank::new(sq);
        assert_eq!(Square::new(file, rank), sq);
    }
}

#[test]
fn test_rank_is_opponent_field() {
    for &r in Rank::ALL.iter() {
        assert_eq!(r.is_opponent_field(Color::BLACK), r.0 <= Rank::RANK3.0);
        assert_eq!(r.is_opponent_field(Color::WHITE), r.0 >= Rank::RANK7.0);
    }
}

#[test]
fn test_region_bijection() {
    for &sq in Square::ALL.iter() {
        let region = Region::new(sq);
        assert_eq!(region.to_square(), sq);
        assert_ne!(region.0, 63);
        assert!(0 <= region.0 && region.0 < Region::NUM as i32);
    }
    // No two squares share a region.
    let mut seen = [false; Region::NUM];
    for &sq in Square::ALL.iter() {
        let region = Region::new(sq);
        assert!(!seen[region.0 as usize]);
        seen[region.0 as usize] = true;
    }
}

#[test]
fn test_piece_type_new() {
    assert_eq!(PieceType::PAWN, PieceType::new(Piece::B_PAWN));
    assert_eq!(PieceType::PAWN, PieceType::new(Piece::W_PAWN));
    assert_eq!(PieceType::DRAGON, PieceType::new(Piece::B_DRAGON));
    assert_eq!(PieceType::DRAGON, PieceType::new(Piece::W_DRAGON));
}

#[test]
fn test_piece_new() {
    assert_eq!(Piece::B_KING, Piece::new(Color::BLACK, PieceType::KING));
    assert_eq!(Piece::W_KING, Piece::new(Color::WHITE, PieceType::KING));
    assert_eq!(Piece::B_DRAGON, Piece::new(Color::BLACK, PieceType::DRAGON));
    assert_eq!(Piece::W_DRAGON, Piece::new(Color::WHITE, PieceType::DRAGON));
}

#[test]
fn test_piece_new_from_str() {
    for &pc in &[Piece::B_PAWN, Piece::W_LANCE, Piece::B_HORSE, Piece::W_DRAGON, Piece::B_KING] {
        assert_eq!(Piece::new_from_str(pc.to_usi_str()), Some(pc));
    }
    assert_eq!(Piece::new_from_str("+K"), None);
    assert_eq!(Piece::new_from_str("x"), None);
}

#[test]
fn test_piece_to_promote_demote() {
    assert_eq!(Piece::B_PAWN.to_promote(), Piece::B_PRO_PAWN);
    assert_eq!(Piece::W_ROOK.to_promote(), Piece::W_DRAGON);
    assert_eq!(Piece::B_PRO_PAWN.to_demote(), Piece::B_PAWN);
    assert_eq!(Piece::W_DRAGON.to_demote(), Piece::W_ROOK);
}
