//! Game state and the single `apply` transition.
//!
//! The rules live in a [`shakmaty::Chess`] position. This module maps its
//! moves onto the TCN-facing [`Move`], where castling is the king's two-square
//! hop and en passant is a flag, and records what notation needs to know about
//! each applied move.

use shakmaty::fen::Fen;
use shakmaty::san::{San, SanPlus};
use shakmaty::{CastlingMode, CastlingSide, Chess, EnPassantMode, Position, Role};

use crate::error::{FenError, IllegalMove};
use crate::types::{Color, Move, Piece, PieceKind, Special, Square};

pub const STANDARD_START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Castling rights as a 4-bit set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CastlingRights(u8);

impl CastlingRights {
    pub const WHITE_KINGSIDE: u8 = 1;
    pub const WHITE_QUEENSIDE: u8 = 2;
    pub const BLACK_KINGSIDE: u8 = 4;
    pub const BLACK_QUEENSIDE: u8 = 8;
    pub const ALL: CastlingRights = CastlingRights(15);
    pub const NONE: CastlingRights = CastlingRights(0);

    pub fn kingside(color: Color) -> u8 {
        match color {
            Color::White => Self::WHITE_KINGSIDE,
            Color::Black => Self::BLACK_KINGSIDE,
        }
    }

    pub fn queenside(color: Color) -> u8 {
        match color {
            Color::White => Self::WHITE_QUEENSIDE,
            Color::Black => Self::BLACK_QUEENSIDE,
        }
    }

    pub fn has(self, flags: u8) -> bool {
        self.0 & flags == flags
    }

    pub fn bits(self) -> u8 {
        self.0
    }

    fn of(pos: &Chess) -> CastlingRights {
        let castles = pos.castles();
        let mut bits = 0;
        for color in [Color::White, Color::Black] {
            if castles.has(color.into(), CastlingSide::KingSide) {
                bits |= Self::kingside(color);
            }
            if castles.has(color.into(), CastlingSide::QueenSide) {
                bits |= Self::queenside(color);
            }
        }
        CastlingRights(bits)
    }
}

/// Extra source information a SAN token needs to single out its move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Disambiguation {
    None,
    File,
    Rank,
    Both,
}

/// What happened when a move was applied, as needed for notation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveContext {
    /// The move with `special` resolved.
    pub mv: Move,
    pub piece: PieceKind,
    pub captured: Option<PieceKind>,
    pub check: bool,
    pub checkmate: bool,
    pub stalemate: bool,
    pub disambiguation: Disambiguation,
    pub(crate) san: SanPlus,
}

impl MoveContext {
    pub fn is_capture(&self) -> bool {
        self.captured.is_some()
    }
}

/// Our view of one of shakmaty's moves. Drops never occur in standard chess.
fn tcn_move(pos: &Chess, m: shakmaty::Move) -> Option<Move> {
    let mv = match m {
        shakmaty::Move::Normal {
            from, to, promotion, ..
        } => Move::raw(from.into(), to.into(), promotion.map(PieceKind::from), Special::None),
        shakmaty::Move::EnPassant { from, to } => {
            Move::raw(from.into(), to.into(), None, Special::EnPassantCapture)
        }
        shakmaty::Move::Castle { king, .. } => {
            let side = m.castling_side()?;
            let special = match side {
                CastlingSide::KingSide => Special::CastleKingside,
                CastlingSide::QueenSide => Special::CastleQueenside,
            };
            Move::raw(king.into(), side.king_to(pos.turn()).into(), None, special)
        }
        shakmaty::Move::Put { .. } => return None,
    };
    Some(mv)
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Board {
    pos: Chess,
}

impl Board {
    /// The standard starting position.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.pos.board().piece_at(sq.into()).map(Piece::from)
    }

    pub fn side_to_move(&self) -> Color {
        self.pos.turn().into()
    }

    pub fn castling(&self) -> CastlingRights {
        CastlingRights::of(&self.pos)
    }

    /// Square behind a pawn that just made a double step, whether or not a
    /// capture onto it is possible.
    pub fn en_passant(&self) -> Option<Square> {
        self.pos.ep_square(EnPassantMode::Always).map(Square::from)
    }

    pub fn halfmove_clock(&self) -> u32 {
        self.pos.halfmoves()
    }

    pub fn fullmove_number(&self) -> u32 {
        self.pos.fullmoves().get()
    }

    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.pos.board().king_of(color.into()).map(Square::from)
    }

    /// Is the side to move in check?
    pub fn in_check(&self) -> bool {
        self.pos.is_check()
    }

    /// Every legal move for the side to move, with `special` resolved.
    pub fn legal_moves(&self) -> Vec<Move> {
        self.legal_pairs().into_iter().map(|(_, mv)| mv).collect()
    }

    pub(crate) fn position(&self) -> &Chess {
        &self.pos
    }

    /// Legal moves as shakmaty sees them, next to our form of each.
    pub(crate) fn legal_pairs(&self) -> Vec<(shakmaty::Move, Move)> {
        self.pos
            .legal_moves()
            .into_iter()
            .filter_map(|m| tcn_move(&self.pos, m).map(|mv| (m, mv)))
            .collect()
    }

    /// Apply a move the side to move is assumed to be able to make.
    ///
    /// The move is matched against the legal move list on its squares and
    /// promotion, which also resolves castling and en passant. Returns the
    /// next board and the notation context; `self` is left untouched.
    pub fn apply(&self, mv: Move) -> Result<(Board, MoveContext), IllegalMove> {
        let illegal = |reason| IllegalMove {
            uci: mv.uci(),
            reason,
        };

        match self.piece_at(mv.from()) {
            None => return Err(illegal("origin square is empty")),
            Some(piece) if piece.color != self.side_to_move() => {
                return Err(illegal("origin piece belongs to the side not on move"))
            }
            Some(_) => {}
        }

        let resolved = self
            .legal_pairs()
            .into_iter()
            .find(|(_, candidate)| candidate.same_route(&mv))
            .ok_or_else(|| illegal("not a legal move in this position"))?;

        Ok(self.apply_resolved(resolved))
    }

    /// Apply a pair taken from [`Board::legal_pairs`] of this board.
    pub(crate) fn apply_resolved(&self, (m, mv): (shakmaty::Move, Move)) -> (Board, MoveContext) {
        let mut next = self.pos.clone();
        let san = SanPlus::from_move_and_play_unchecked(&mut next, m);

        let disambiguation = match san.san {
            San::Normal {
                role, file, rank, ..
            } if role != Role::Pawn => match (file, rank) {
                (None, None) => Disambiguation::None,
                (Some(_), None) => Disambiguation::File,
                (None, Some(_)) => Disambiguation::Rank,
                (Some(_), Some(_)) => Disambiguation::Both,
            },
            _ => Disambiguation::None,
        };

        let context = MoveContext {
            mv,
            piece: m.role().into(),
            captured: m.capture().map(PieceKind::from),
            check: next.is_check(),
            checkmate: next.is_checkmate(),
            stalemate: next.is_stalemate(),
            disambiguation,
            san,
        };
        (Board { pos: next }, context)
    }

    /// Read a position from Forsyth-Edwards Notation. Missing trailing fields
    /// take their defaults, so the move counters may be omitted.
    pub fn from_fen(fen: &str) -> Result<Board, FenError> {
        let err = |reason| FenError {
            fen: fen.to_string(),
            reason,
        };

        let setup = Fen::from_ascii(fen.trim().as_bytes()).map_err(|_| err("malformed FEN"))?;
        let pos = setup
            .into_position::<Chess>(CastlingMode::Standard)
            .map_err(|_| err("not a legal chess position"))?;
        Ok(Board { pos })
    }

    /// Forsyth-Edwards Notation. The en passant field is written whenever a
    /// target is set, whether or not a capture is possible.
    pub fn fen(&self) -> String {
        Fen::from_position(&self.pos, EnPassantMode::Always).to_string()
    }
}
