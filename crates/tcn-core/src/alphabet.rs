//! The TCN symbol table.
//!
//! Every TCN character stands for a code `0..=84`:
//!
//! * `0..=63` are squares, `rank * 8 + file` with a1 = 0.
//! * `64..=81` in destination position are promotions,
//!   `64 + 3 * piece + (file_delta + 1)` with pieces ordered `q n r b k p`.
//! * `79..=84` in origin position are piece drops, same piece order.
//!
//! The alphabet contains `+` twice. Reverse lookup finds the first one
//! (code 82), so code 83 never comes out of a decode.

use crate::types::{PieceKind, Square};

pub const TCN_CHARS: &[u8; 85] =
    b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789!?{~}(^)[_]@#$,./&-*++=";

pub const PROMOTION_BASE: u8 = 64;
pub const DROP_BASE: u8 = 79;

/// Piece order shared by promotion and drop codes.
pub const PIECE_ORDER: [PieceKind; 6] = [
    PieceKind::Queen,
    PieceKind::Knight,
    PieceKind::Rook,
    PieceKind::Bishop,
    PieceKind::King,
    PieceKind::Pawn,
];

const NO_CODE: u8 = u8::MAX;

const REVERSE: [u8; 128] = build_reverse();

const fn build_reverse() -> [u8; 128] {
    let mut table = [NO_CODE; 128];
    // Walk backwards so a duplicated symbol keeps its first code.
    let mut i = TCN_CHARS.len();
    while i > 0 {
        i -= 1;
        table[TCN_CHARS[i] as usize] = i as u8;
    }
    table
}

fn piece_index(kind: PieceKind) -> u8 {
    PIECE_ORDER
        .iter()
        .position(|&k| k == kind)
        .map(|i| i as u8)
        .unwrap_or(0)
}

/// Code of a TCN character, if it belongs to the alphabet.
pub fn code_for_char(c: char) -> Option<u8> {
    if !c.is_ascii() {
        return None;
    }
    match REVERSE[c as usize] {
        NO_CODE => None,
        code => Some(code),
    }
}

pub fn char_for_square(square: Square) -> char {
    TCN_CHARS[square.index()] as char
}

/// Square behind a character, `None` if it is outside the square range.
pub fn square_for_char(c: char) -> Option<Square> {
    code_for_char(c).and_then(Square::new)
}

/// Destination character for a promotion to `kind`, moving `file_delta`
/// files sideways (-1, 0 or +1).
pub fn char_for_promotion(kind: PieceKind, file_delta: i8) -> Option<char> {
    if !(-1..=1).contains(&file_delta) {
        return None;
    }
    let code = PROMOTION_BASE + 3 * piece_index(kind) + (file_delta + 1) as u8;
    Some(TCN_CHARS[code as usize] as char)
}

/// Inverse of [`char_for_promotion`].
pub fn promotion_for_char(c: char) -> Option<(PieceKind, i8)> {
    let code = code_for_char(c)?;
    if !(PROMOTION_BASE..PROMOTION_BASE + 3 * PIECE_ORDER.len() as u8).contains(&code) {
        return None;
    }
    let value = code - PROMOTION_BASE;
    Some((PIECE_ORDER[(value / 3) as usize], (value % 3) as i8 - 1))
}

/// Origin character for a drop. Kings cannot be dropped: their code shares
/// the duplicated `+` and would decode as a bishop.
pub fn char_for_drop(kind: PieceKind) -> Option<char> {
    if kind == PieceKind::King {
        return None;
    }
    Some(TCN_CHARS[(DROP_BASE + piece_index(kind)) as usize] as char)
}

/// Inverse of [`char_for_drop`].
pub fn drop_for_char(c: char) -> Option<PieceKind> {
    let code = code_for_char(c)?;
    if code < DROP_BASE {
        return None;
    }
    PIECE_ORDER.get((code - DROP_BASE) as usize).copied()
}
