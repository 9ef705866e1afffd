//! Conversion between Chess.com TCN move lists and PGN movetext.
//!
//! ```
//! let pgn = tcn_core::tcn_to_pgn("mC0KfA5QdN!TN1").unwrap();
//! assert_eq!(pgn, "1. e4 e5 2. Bc4 Nc6 3. Qh5 Nf6 4. Qxf7# *");
//! assert_eq!(tcn_core::pgn_to_tcn(&pgn).unwrap(), "mC0KfA5QdN!TN1");
//! ```

pub mod alphabet;
pub mod board;
pub mod error;
pub mod game;
pub mod game_data;
pub mod pgn;
pub mod san;
pub mod tcn;
pub mod types;

pub use board::{Board, CastlingRights, Disambiguation, MoveContext, STANDARD_START_FEN};
pub use error::{ConvertError, DecodeError, FenError, IllegalMove, InvalidMove, PgnError, SanError};
pub use game::{Game, Outcome};
pub use game_data::{GameData, Tag};
pub use pgn::PgnWriter;
pub use san::San;
pub use tcn::{decode_tcn, decode_tokens, encode_tcn, encode_tokens, PieceDrop, Token};
pub use types::{Color, Move, Piece, PieceKind, Special, Square};

const UNFINISHED: &str = "*";

/// Replay a TCN move list from the starting position.
pub fn replay_tcn(tcn: &str) -> Result<Game, ConvertError> {
    let mut game = Game::new();
    for mv in decode_tcn(tcn)? {
        game.play(mv)?;
    }
    Ok(game)
}

/// Replay SAN tokens from the starting position. Result tokens are skipped.
pub fn replay_san<S: AsRef<str>>(san_moves: &[S]) -> Result<Game, ConvertError> {
    let mut game = Game::new();
    for san in san_moves {
        let san = san.as_ref().trim();
        if san.is_empty() || pgn_result(san) {
            continue;
        }
        game.play_san(san)?;
    }
    Ok(game)
}

fn pgn_result(token: &str) -> bool {
    matches!(token, "1-0" | "0-1" | "1/2-1/2" | "*")
}

/// Decode TCN to SAN move strings.
pub fn decode_tcn_to_san(tcn: &str) -> Result<Vec<String>, ConvertError> {
    Ok(replay_tcn(tcn)?.san_moves().to_vec())
}

/// Encode SAN moves to a TCN string.
pub fn encode_san_to_tcn<S: AsRef<str>>(san_moves: &[S]) -> Result<String, ConvertError> {
    Ok(replay_san(san_moves)?.tcn())
}

/// TCN to PGN movetext with the default 80-column layout.
pub fn tcn_to_pgn(tcn: &str) -> Result<String, ConvertError> {
    tcn_to_pgn_with(tcn, &PgnWriter::default())
}

pub fn tcn_to_pgn_with(tcn: &str, writer: &PgnWriter) -> Result<String, ConvertError> {
    let game = replay_tcn(tcn)?;
    Ok(writer.write_movetext(game.san_moves(), UNFINISHED))
}

/// PGN (a full game or bare movetext) to TCN.
pub fn pgn_to_tcn(pgn: &str) -> Result<String, ConvertError> {
    pgn::check_start_position(pgn)?;
    let tokens = pgn::movetext_tokens(pgn)?;
    encode_san_to_tcn(&tokens)
}

fn game_data(game: &Game, tags: Vec<Tag>, writer: &PgnWriter) -> GameData {
    GameData {
        tags,
        moves: game.san_moves().to_vec(),
        movetext: writer.write_movetext(game.san_moves(), UNFINISHED),
        tcn: game.tcn(),
        final_fen: game.board().fen(),
        outcome: game.outcome(),
    }
}

/// Convert a TCN string into a full [`GameData`] record.
pub fn convert_tcn(tcn: &str, writer: &PgnWriter) -> Result<GameData, ConvertError> {
    let game = replay_tcn(tcn)?;
    Ok(game_data(&game, Vec::new(), writer))
}

/// Convert a PGN game into a full [`GameData`] record, keeping its tag pairs.
pub fn convert_pgn(pgn: &str, writer: &PgnWriter) -> Result<GameData, ConvertError> {
    pgn::check_start_position(pgn)?;
    let tags = pgn::extract_headers(pgn)
        .into_iter()
        .map(|(name, value)| Tag { name, value })
        .collect();
    let game = replay_san(&pgn::movetext_tokens(pgn)?)?;
    Ok(game_data(&game, tags, writer))
}
