//! Board primitives shared by the codecs and the simulator.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::InvalidMove;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub fn opponent(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }
}

impl From<shakmaty::Color> for Color {
    fn from(color: shakmaty::Color) -> Self {
        match color {
            shakmaty::Color::White => Color::White,
            shakmaty::Color::Black => Color::Black,
        }
    }
}

impl From<Color> for shakmaty::Color {
    fn from(color: Color) -> Self {
        match color {
            Color::White => shakmaty::Color::White,
            Color::Black => shakmaty::Color::Black,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    /// Upper-case letter. Pawns have none in SAN but use `P` in FEN.
    pub fn letter(self) -> char {
        match self {
            PieceKind::Pawn => 'P',
            PieceKind::Knight => 'N',
            PieceKind::Bishop => 'B',
            PieceKind::Rook => 'R',
            PieceKind::Queen => 'Q',
            PieceKind::King => 'K',
        }
    }

    pub fn from_letter(c: char) -> Option<PieceKind> {
        match c.to_ascii_uppercase() {
            'P' => Some(PieceKind::Pawn),
            'N' => Some(PieceKind::Knight),
            'B' => Some(PieceKind::Bishop),
            'R' => Some(PieceKind::Rook),
            'Q' => Some(PieceKind::Queen),
            'K' => Some(PieceKind::King),
            _ => None,
        }
    }
}

impl From<shakmaty::Role> for PieceKind {
    fn from(role: shakmaty::Role) -> Self {
        match role {
            shakmaty::Role::Pawn => PieceKind::Pawn,
            shakmaty::Role::Knight => PieceKind::Knight,
            shakmaty::Role::Bishop => PieceKind::Bishop,
            shakmaty::Role::Rook => PieceKind::Rook,
            shakmaty::Role::Queen => PieceKind::Queen,
            shakmaty::Role::King => PieceKind::King,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub color: Color,
    pub kind: PieceKind,
}

impl Piece {
    pub const fn new(color: Color, kind: PieceKind) -> Self {
        Self { color, kind }
    }
}

impl From<shakmaty::Piece> for Piece {
    fn from(piece: shakmaty::Piece) -> Self {
        Piece::new(piece.color.into(), piece.role.into())
    }
}

/// A board square, `rank * 8 + file` with a1 = 0 and h8 = 63.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Square(u8);

impl Square {
    pub const fn new(index: u8) -> Option<Square> {
        if index < 64 {
            Some(Square(index))
        } else {
            None
        }
    }

    pub const fn from_coords(file: u8, rank: u8) -> Option<Square> {
        if file < 8 && rank < 8 {
            Some(Square(rank * 8 + file))
        } else {
            None
        }
    }

    pub const fn index(self) -> usize {
        self.0 as usize
    }

    pub const fn file(self) -> u8 {
        self.0 % 8
    }

    pub const fn rank(self) -> u8 {
        self.0 / 8
    }

    /// Square shifted by a file/rank delta, if it stays on the board.
    pub fn offset(self, file_delta: i8, rank_delta: i8) -> Option<Square> {
        let file = self.file() as i8 + file_delta;
        let rank = self.rank() as i8 + rank_delta;
        if (0..8).contains(&file) && (0..8).contains(&rank) {
            Square::from_coords(file as u8, rank as u8)
        } else {
            None
        }
    }

    pub fn file_char(self) -> char {
        (b'a' + self.file()) as char
    }

    pub fn rank_char(self) -> char {
        (b'1' + self.rank()) as char
    }

    pub fn all() -> impl Iterator<Item = Square> {
        (0..64).map(Square)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file_char(), self.rank_char())
    }
}

impl std::str::FromStr for Square {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return Err(format!("invalid square '{s}'"));
        }
        let file = bytes[0].wrapping_sub(b'a');
        let rank = bytes[1].wrapping_sub(b'1');
        Square::from_coords(file, rank).ok_or_else(|| format!("invalid square '{s}'"))
    }
}

impl TryFrom<String> for Square {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Square> for String {
    fn from(sq: Square) -> String {
        sq.to_string()
    }
}

// Both sides number squares rank * 8 + file from a1.
impl From<shakmaty::Square> for Square {
    fn from(sq: shakmaty::Square) -> Self {
        Square(u8::from(sq))
    }
}

impl From<Square> for shakmaty::Square {
    fn from(sq: Square) -> Self {
        shakmaty::Square::new(u32::from(sq.0))
    }
}

/// Move kinds that TCN leaves implicit and the simulator infers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Special {
    #[default]
    None,
    CastleKingside,
    CastleQueenside,
    EnPassantCapture,
}

/// A move as exchanged between the TCN and SAN layers.
///
/// Castling is the king's two-square move. `special` is left at
/// [`Special::None`] by the decoder and resolved by [`crate::Board::apply`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "MoveRecord", into = "MoveRecord")]
pub struct Move {
    from: Square,
    to: Square,
    promotion: Option<PieceKind>,
    special: Special,
}

/// Wire shape of [`Move`]; deserialization goes through [`Move::new`].
#[derive(Serialize, Deserialize)]
struct MoveRecord {
    from: Square,
    to: Square,
    promotion: Option<PieceKind>,
    #[serde(default)]
    special: Special,
}

impl TryFrom<MoveRecord> for Move {
    type Error = InvalidMove;

    fn try_from(record: MoveRecord) -> Result<Self, Self::Error> {
        Ok(Move::new(record.from, record.to, record.promotion)?.with_special(record.special))
    }
}

impl From<Move> for MoveRecord {
    fn from(mv: Move) -> Self {
        MoveRecord {
            from: mv.from,
            to: mv.to,
            promotion: mv.promotion,
            special: mv.special,
        }
    }
}

impl Move {
    /// Build a move, checking the shape invariants: distinct squares, and a
    /// promotion only for a one-rank step onto a back rank.
    pub fn new(from: Square, to: Square, promotion: Option<PieceKind>) -> Result<Move, InvalidMove> {
        if from == to {
            return Err(InvalidMove::SameSquare(from));
        }
        if promotion.is_some() {
            let onto_back_rank = (from.rank() == 6 && to.rank() == 7)
                || (from.rank() == 1 && to.rank() == 0);
            if !onto_back_rank || from.file().abs_diff(to.file()) > 1 {
                return Err(InvalidMove::BadPromotion { from, to });
            }
        }
        Ok(Move {
            from,
            to,
            promotion,
            special: Special::None,
        })
    }

    /// Shortcut for moves read off a legal move list, whose shapes are
    /// correct by construction.
    pub(crate) const fn raw(
        from: Square,
        to: Square,
        promotion: Option<PieceKind>,
        special: Special,
    ) -> Move {
        Move {
            from,
            to,
            promotion,
            special,
        }
    }

    pub(crate) fn with_special(mut self, special: Special) -> Move {
        self.special = special;
        self
    }

    pub fn from(&self) -> Square {
        self.from
    }

    pub fn to(&self) -> Square {
        self.to
    }

    pub fn promotion(&self) -> Option<PieceKind> {
        self.promotion
    }

    pub fn special(&self) -> Special {
        self.special
    }

    /// Same squares and promotion, ignoring the resolved special kind.
    pub fn same_route(&self, other: &Move) -> bool {
        self.from == other.from && self.to == other.to && self.promotion == other.promotion
    }

    /// Long algebraic form, e.g. `e2e4`, `e7e8q`.
    pub fn uci(&self) -> String {
        let mut s = format!("{}{}", self.from, self.to);
        if let Some(kind) = self.promotion {
            s.push(kind.letter().to_ascii_lowercase());
        }
        s
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.uci())
    }
}
