//! A replay session: one board, advanced a move at a time from the start
//! position, recording each ply's SAN.

use serde::{Deserialize, Serialize};

use crate::board::{Board, MoveContext};
use crate::error::ConvertError;
use crate::san::{self, San};
use crate::tcn::encode_tcn;
use crate::types::{Color, Move};

/// How the game stands after the last move, when it is over on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Checkmate { winner: Color },
    Stalemate,
}

#[derive(Debug, Clone, Default)]
pub struct Game {
    board: Board,
    moves: Vec<Move>,
    san_moves: Vec<String>,
    last: Option<MoveContext>,
}

impl Game {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Moves played so far, with `special` resolved.
    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    pub fn san_moves(&self) -> &[String] {
        &self.san_moves
    }

    /// Number of half-moves played.
    pub fn ply(&self) -> usize {
        self.moves.len()
    }

    pub fn outcome(&self) -> Option<Outcome> {
        let last = self.last?;
        if last.checkmate {
            Some(Outcome::Checkmate {
                winner: self.board.side_to_move().opponent(),
            })
        } else if last.stalemate {
            Some(Outcome::Stalemate)
        } else {
            None
        }
    }

    pub fn tcn(&self) -> String {
        encode_tcn(&self.moves)
    }

    /// Play a raw move, such as one coming out of the TCN decoder.
    pub fn play(&mut self, mv: Move) -> Result<MoveContext, ConvertError> {
        let ply = self.ply() + 1;
        let (next, ctx) = self
            .board
            .apply(mv)
            .map_err(|source| ConvertError::IllegalMove { ply, source })?;
        self.advance(next, ctx);
        Ok(ctx)
    }

    /// Play the move a SAN token names in the current position.
    pub fn play_san(&mut self, token: &str) -> Result<MoveContext, ConvertError> {
        let ply = self.ply() + 1;
        let san_error = |source| ConvertError::San { ply, source };

        let san: San = token.parse().map_err(san_error)?;
        let resolved = san.resolve(&self.board).map_err(san_error)?;
        let (next, ctx) = self.board.apply_resolved(resolved);
        self.advance(next, ctx);
        Ok(ctx)
    }

    fn advance(&mut self, next: Board, ctx: MoveContext) {
        self.board = next;
        self.moves.push(ctx.mv);
        self.san_moves.push(san::format(&ctx));
        self.last = Some(ctx);
    }
}
