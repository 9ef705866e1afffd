//! Standard Algebraic Notation: formatting applied moves and resolving tokens
//! back to moves on a given board.
//!
//! Both directions go through shakmaty's SAN codec. Parsing first rewrites
//! the spellings PGN exports use and shakmaty does not read: `0-0`, a
//! promotion without `=`, stacked check marks and annotation glyphs.

use std::str::FromStr;

use shakmaty::san::SanError as ResolveError;

use crate::board::{Board, MoveContext};
use crate::error::SanError;
use crate::types::Move;

/// Render the SAN token for a move the simulator just applied.
pub fn format(ctx: &MoveContext) -> String {
    ctx.san.to_string()
}

/// A parsed SAN token. Check and mate marks are kept but not enforced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct San {
    token: String,
    parsed: shakmaty::san::San,
    pub check: bool,
    pub checkmate: bool,
}

impl FromStr for San {
    type Err = SanError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let malformed = || SanError::MalformedSanToken(token.to_string());

        let annotated = token.trim().trim_end_matches(['!', '?']);
        let body = annotated.trim_end_matches(['+', '#']);
        let checkmate = annotated.ends_with('#') || annotated.ends_with("++");
        let check = checkmate || body.len() < annotated.len();

        let parsed = shakmaty::san::San::from_ascii(normalize(body).as_bytes())
            .map_err(|_| malformed())?;
        // Null moves and drops have no place in a standard game record.
        if matches!(parsed, shakmaty::san::San::Null | shakmaty::san::San::Put { .. }) {
            return Err(malformed());
        }

        Ok(San {
            token: token.to_string(),
            parsed,
            check,
            checkmate,
        })
    }
}

fn normalize(body: &str) -> String {
    match body {
        "0-0" => return "O-O".to_string(),
        "0-0-0" => return "O-O-O".to_string(),
        _ => {}
    }
    // `e8Q` -> `e8=Q`
    match body.as_bytes() {
        [.., b'1'..=b'8', piece @ (b'Q' | b'R' | b'B' | b'N')] => {
            format!("{}={}", &body[..body.len() - 1], *piece as char)
        }
        _ => body.to_string(),
    }
}

impl San {
    /// The token as it appeared in the input.
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Find the single legal move in `board` this token describes.
    pub fn to_move(&self, board: &Board) -> Result<Move, SanError> {
        self.resolve(board).map(|(_, mv)| mv)
    }

    /// The legal pair on `board` this token names, ready for
    /// [`Board::apply_resolved`].
    pub(crate) fn resolve(&self, board: &Board) -> Result<(shakmaty::Move, Move), SanError> {
        let legal = board.legal_pairs();
        match self.parsed.to_move(board.position()) {
            Ok(found) => legal
                .into_iter()
                .find(|(m, _)| *m == found)
                .ok_or_else(|| SanError::NoMatchingMove(self.token.clone())),
            Err(ResolveError::IllegalSan) => Err(SanError::NoMatchingMove(self.token.clone())),
            Err(ResolveError::AmbiguousSan) => Err(SanError::AmbiguousToken {
                token: self.token.clone(),
                candidates: legal.iter().filter(|(m, _)| self.parsed.matches(*m)).count(),
            }),
        }
    }
}
