//! TCN (Terse Chess Notation) encoder/decoder for Chess.com games.
//! TCN is a compact 2-char-per-move encoding.
//!
//! The decoder works purely on symbols. Castling and en passant look like
//! ordinary king and pawn moves here; the board resolves them later.

use serde::{Deserialize, Serialize};

use crate::alphabet::{
    char_for_drop, char_for_promotion, char_for_square, code_for_char, drop_for_char,
    promotion_for_char, square_for_char,
};
use crate::error::DecodeError;
use crate::types::{Move, PieceKind, Square};

/// A piece placed from the hand onto an empty square (crazyhouse-style).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PieceDrop {
    piece: PieceKind,
    to: Square,
}

impl PieceDrop {
    /// `None` for kings, which the alphabet cannot express.
    pub fn new(piece: PieceKind, to: Square) -> Option<PieceDrop> {
        char_for_drop(piece).map(|_| PieceDrop { piece, to })
    }

    pub fn piece(&self) -> PieceKind {
        self.piece
    }

    pub fn to(&self) -> Square {
        self.to
    }
}

/// One 2-character TCN unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Token {
    Move(Move),
    Drop(PieceDrop),
}

/// Decode a TCN string into moves and drops.
pub fn decode_tokens(tcn: &str) -> Result<Vec<Token>, DecodeError> {
    let chars: Vec<char> = tcn.chars().collect();
    if chars.len() % 2 != 0 {
        return Err(DecodeError::OddLength { len: chars.len() });
    }

    chars
        .chunks_exact(2)
        .enumerate()
        .map(|(index, pair)| decode_pair(index, pair[0], pair[1]))
        .collect()
}

fn decode_pair(index: usize, from_char: char, to_char: char) -> Result<Token, DecodeError> {
    let from_offset = index * 2;
    let to_offset = from_offset + 1;

    let invalid = |offset: usize, symbol: char| DecodeError::InvalidSymbol { offset, symbol };

    // Unknown symbols fail first, whatever position they are in.
    code_for_char(from_char).ok_or(invalid(from_offset, from_char))?;
    code_for_char(to_char).ok_or(invalid(to_offset, to_char))?;

    if let Some(from) = square_for_char(from_char) {
        let (to, promotion) = match square_for_char(to_char) {
            Some(to) => (to, None),
            None => {
                let (kind, file_delta) =
                    promotion_for_char(to_char).ok_or(invalid(to_offset, to_char))?;
                let rank_delta = match from.rank() {
                    6 => 1,
                    1 => -1,
                    _ => return Err(DecodeError::InvalidPromotion { index }),
                };
                let to = from
                    .offset(file_delta, rank_delta)
                    .ok_or(DecodeError::InvalidPromotion { index })?;
                (to, Some(kind))
            }
        };
        let mv = Move::new(from, to, promotion).map_err(|_| DecodeError::NullMove { index })?;
        return Ok(Token::Move(mv));
    }

    if let Some(piece) = drop_for_char(from_char) {
        let to = match square_for_char(to_char) {
            Some(to) => to,
            None if promotion_for_char(to_char).is_some() => {
                return Err(DecodeError::InvalidPromotion { index })
            }
            None => return Err(invalid(to_offset, to_char)),
        };
        return Ok(Token::Drop(PieceDrop { piece, to }));
    }

    // Known symbol that means nothing as an origin (the promotion range).
    Err(invalid(from_offset, from_char))
}

/// Decode a TCN string into moves, in game order.
///
/// `special` is unresolved on every returned move. Drops are rejected since
/// they cannot occur in a standard game.
pub fn decode_tcn(tcn: &str) -> Result<Vec<Move>, DecodeError> {
    decode_tokens(tcn)?
        .into_iter()
        .enumerate()
        .map(|(index, token)| match token {
            Token::Move(mv) => Ok(mv),
            Token::Drop(_) => Err(DecodeError::UnsupportedDrop { index }),
        })
        .collect()
}

fn push_move(tcn: &mut String, mv: &Move) {
    tcn.push(char_for_square(mv.from()));
    match mv.promotion() {
        Some(kind) => {
            let file_delta = mv.to().file() as i8 - mv.from().file() as i8;
            // Move::new keeps promotions within one file, so this always hits.
            if let Some(c) = char_for_promotion(kind, file_delta) {
                tcn.push(c);
            }
        }
        None => tcn.push(char_for_square(mv.to())),
    }
}

/// Encode moves into a TCN string. `special` does not affect the output.
pub fn encode_tcn(moves: &[Move]) -> String {
    let mut tcn = String::with_capacity(moves.len() * 2);
    for mv in moves {
        push_move(&mut tcn, mv);
    }
    tcn
}

/// Encode moves and drops into a TCN string.
pub fn encode_tokens(tokens: &[Token]) -> String {
    let mut tcn = String::with_capacity(tokens.len() * 2);
    for token in tokens {
        match token {
            Token::Move(mv) => push_move(&mut tcn, mv),
            Token::Drop(drop) => {
                if let Some(c) = char_for_drop(drop.piece) {
                    tcn.push(c);
                }
                tcn.push(char_for_square(drop.to));
            }
        }
    }
    tcn
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Square {
        s.parse().unwrap()
    }

    fn uci_list(moves: &[Move]) -> Vec<String> {
        moves.iter().map(Move::uci).collect()
    }

    #[test]
    fn test_decode_tcn_opening() {
        // e2 = idx 12 = 'm', e4 = idx 28 = 'C'; e7 = 52 = '0', e5 = 36 = 'K'
        let moves = decode_tcn("mC0K").unwrap();
        assert_eq!(uci_list(&moves), ["e2e4", "e7e5"]);
        assert!(moves.iter().all(|m| m.special() == crate::Special::None));
    }

    #[test]
    fn test_decode_empty_is_zero_moves() {
        assert_eq!(decode_tcn("").unwrap(), Vec::new());
        assert_eq!(encode_tcn(&[]), "");
    }

    #[test]
    fn test_decode_promotions() {
        let moves = decode_tcn("0~l(X[o$").unwrap();
        assert_eq!(uci_list(&moves), ["e7e8q", "d2c1n", "b7a8r", "g2h1b"]);
    }

    #[test]
    fn test_encode_matches_reference() {
        let moves = decode_tcn("mC0KfA5QdN!TN1").unwrap();
        assert_eq!(encode_tcn(&moves), "mC0KfA5QdN!TN1");

        let promo = Move::new(sq("e7"), sq("e8"), Some(PieceKind::Queen)).unwrap();
        assert_eq!(encode_tcn(&[promo]), "0~");
        let capture_promo = Move::new(sq("d2"), sq("c1"), Some(PieceKind::Knight)).unwrap();
        assert_eq!(encode_tcn(&[capture_promo]), "l(");
    }

    #[test]
    fn test_castling_is_plain_king_move() {
        let moves = decode_tcn("eg86").unwrap();
        assert_eq!(uci_list(&moves), ["e1g1", "e8c8"]);
    }

    #[test]
    fn test_odd_length() {
        assert_eq!(decode_tcn("m"), Err(DecodeError::OddLength { len: 1 }));
        assert_eq!(decode_tcn("mC0"), Err(DecodeError::OddLength { len: 3 }));
    }

    #[test]
    fn test_invalid_symbol_reports_offset() {
        assert_eq!(
            decode_tcn("mC0%"),
            Err(DecodeError::InvalidSymbol { offset: 3, symbol: '%' })
        );
        assert_eq!(
            decode_tcn(" C"),
            Err(DecodeError::InvalidSymbol { offset: 0, symbol: ' ' })
        );
        // '{' is a promotion symbol and means nothing as an origin.
        assert_eq!(
            decode_tcn("{a"),
            Err(DecodeError::InvalidSymbol { offset: 0, symbol: '{' })
        );
    }

    #[test]
    fn test_invalid_promotions() {
        // Promotion from e4 (not on the 2nd or 7th rank).
        assert_eq!(decode_tcn("C~"), Err(DecodeError::InvalidPromotion { index: 0 }));
        // a7 capturing towards the left edge.
        assert_eq!(decode_tcn("mCW{"), Err(DecodeError::InvalidPromotion { index: 1 }));
    }

    #[test]
    fn test_null_move() {
        assert_eq!(decode_tcn("mm"), Err(DecodeError::NullMove { index: 0 }));
    }

    #[test]
    fn test_drops() {
        let tokens = decode_tokens("mC&C").unwrap();
        assert_eq!(tokens.len(), 2);
        assert_eq!(
            tokens[1],
            Token::Drop(PieceDrop::new(PieceKind::Queen, sq("e4")).unwrap())
        );
        assert_eq!(encode_tokens(&tokens), "mC&C");
        assert_eq!(decode_tcn("mC&C"), Err(DecodeError::UnsupportedDrop { index: 1 }));
        assert!(PieceDrop::new(PieceKind::King, sq("e4")).is_none());
    }

    #[test]
    fn test_reencode_is_byte_identical() {
        let samples = ["mC0KgvZJfA5QcM", "lBZJgv!Tbs9zcDYQ", "0~l(X[o$", "&C=amC"];
        for tcn in samples {
            let tokens = decode_tokens(tcn).unwrap();
            assert_eq!(encode_tokens(&tokens), tcn);
            assert_eq!(decode_tokens(&encode_tokens(&tokens)).unwrap(), tokens);
        }
    }
}
