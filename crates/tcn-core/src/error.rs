//! Error types for the TCN and SAN codecs.
//!
//! Every error is deterministic for a given input. Conversions abort on the
//! first one; there is no partial output.

use thiserror::Error;

use crate::types::Square;

/// Failure while splitting or decoding a TCN string.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("TCN string has odd length {len}")]
    OddLength { len: usize },

    #[error("invalid TCN symbol {symbol:?} at offset {offset}")]
    InvalidSymbol { offset: usize, symbol: char },

    #[error("move {index} has an invalid promotion target")]
    InvalidPromotion { index: usize },

    #[error("move {index} starts and ends on the same square")]
    NullMove { index: usize },

    #[error("move {index} is a piece drop, which a standard game cannot contain")]
    UnsupportedDrop { index: usize },
}

/// A `Move` was built with an impossible shape.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidMove {
    #[error("move starts and ends on {0}")]
    SameSquare(Square),

    #[error("{from}{to} cannot carry a promotion")]
    BadPromotion { from: Square, to: Square },
}

/// The simulator refused a move.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("illegal move {uci}: {reason}")]
pub struct IllegalMove {
    pub uci: String,
    pub reason: &'static str,
}

/// Failure while parsing or resolving one SAN token.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SanError {
    #[error("malformed SAN token '{0}'")]
    MalformedSanToken(String),

    #[error("no legal move matches '{0}'")]
    NoMatchingMove(String),

    #[error("'{token}' matches {candidates} legal moves")]
    AmbiguousToken { token: String, candidates: usize },
}

/// Failure while reading PGN text around the moves.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PgnError {
    #[error("unterminated comment starting at byte {0}")]
    UnterminatedComment(usize),

    #[error("unterminated variation starting at byte {0}")]
    UnterminatedVariation(usize),

    #[error("unexpected {symbol:?} at byte {offset}")]
    UnexpectedDelimiter { offset: usize, symbol: char },

    #[error("game starts from a non-standard position: {0}")]
    NonStandardStart(String),
}

/// Umbrella error for the facade conversions.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConvertError {
    #[error("TCN decode error: {0}")]
    Decode(#[from] DecodeError),

    #[error("ply {ply}: {source}")]
    IllegalMove {
        ply: usize,
        #[source]
        source: IllegalMove,
    },

    #[error("ply {ply}: {source}")]
    San {
        ply: usize,
        #[source]
        source: SanError,
    },

    #[error("PGN error: {0}")]
    Pgn(#[from] PgnError),
}

/// A FEN string could not be read.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid FEN '{fen}': {reason}")]
pub struct FenError {
    pub fen: String,
    pub reason: &'static str,
}
