//! PGN reading and writing around the SAN move list.
//!
//! Reading only goes as far as a flat list of mainline SAN tokens: tag pairs,
//! comments, variations, NAGs and move numbers are skipped, and the first
//! result token ends the game.

use lazy_static::lazy_static;
use regex::Regex;

use crate::board::Board;
use crate::error::PgnError;

lazy_static! {
    static ref HEADER_RE: Regex =
        Regex::new(r#"\[(\w+)\s+"([^"]*)"\]"#).expect("header pattern is valid");
}

const RESULT_TOKENS: [&str; 4] = ["1-0", "0-1", "1/2-1/2", "*"];

/// All tag pairs in order of appearance.
pub fn extract_headers(pgn: &str) -> Vec<(String, String)> {
    HEADER_RE
        .captures_iter(pgn)
        .map(|cap| (cap[1].to_string(), cap[2].to_string()))
        .collect()
}

/// Extract a string value from a PGN header (e.g. White, FEN).
pub fn extract_header(pgn: &str, header_name: &str) -> Option<String> {
    let value = HEADER_RE
        .captures_iter(pgn)
        .find(|cap| &cap[1] == header_name)?
        .get(2)?
        .as_str()
        .to_string();
    if value.is_empty() { None } else { Some(value) }
}

/// TCN games always start from the standard position, so a `FEN` tag naming
/// anything else cannot be converted.
pub fn check_start_position(pgn: &str) -> Result<(), PgnError> {
    match extract_header(pgn, "FEN") {
        Some(fen) if Board::from_fen(&fen).ok() != Some(Board::new()) => {
            Err(PgnError::NonStandardStart(fen))
        }
        _ => Ok(()),
    }
}

fn skip_line(bytes: &[u8], mut i: usize) -> usize {
    while i < bytes.len() && bytes[i] != b'\n' {
        i += 1;
    }
    i
}

/// Index just past the `}` closing the comment that opens at `start`.
fn skip_comment(bytes: &[u8], start: usize) -> Result<usize, PgnError> {
    bytes[start..]
        .iter()
        .position(|&b| b == b'}')
        .map(|pos| start + pos + 1)
        .ok_or(PgnError::UnterminatedComment(start))
}

/// Index just past the `)` closing the variation that opens at `start`.
fn skip_variation(bytes: &[u8], start: usize) -> Result<usize, PgnError> {
    let mut depth = 0usize;
    let mut i = start;
    while i < bytes.len() {
        match bytes[i] {
            b'(' => depth += 1,
            b')' => {
                depth -= 1;
                if depth == 0 {
                    return Ok(i + 1);
                }
            }
            b'{' => {
                i = skip_comment(bytes, i)?;
                continue;
            }
            b';' => {
                i = skip_line(bytes, i);
                continue;
            }
            _ => {}
        }
        i += 1;
    }
    Err(PgnError::UnterminatedVariation(start))
}

fn is_delimiter(b: u8) -> bool {
    b.is_ascii_whitespace() || matches!(b, b'{' | b'}' | b'(' | b')' | b';')
}

/// Extract the mainline SAN tokens from PGN text, in order.
pub fn movetext_tokens(pgn: &str) -> Result<Vec<&str>, PgnError> {
    let bytes = pgn.as_bytes();
    let mut tokens = Vec::new();
    let mut at_line_start = true;
    let mut i = 0;

    while i < bytes.len() {
        let b = bytes[i];
        if b == b'\n' {
            at_line_start = true;
            i += 1;
            continue;
        }
        if b.is_ascii_whitespace() {
            i += 1;
            continue;
        }

        let line_start = at_line_start;
        at_line_start = false;
        match b {
            b'[' | b'%' if line_start => i = skip_line(bytes, i),
            b'{' => i = skip_comment(bytes, i)?,
            b';' => i = skip_line(bytes, i),
            b'(' => i = skip_variation(bytes, i)?,
            b')' | b'}' => {
                return Err(PgnError::UnexpectedDelimiter {
                    offset: i,
                    symbol: b as char,
                })
            }
            _ => {
                let start = i;
                while i < bytes.len() && !is_delimiter(bytes[i]) {
                    i += 1;
                }
                let word = &pgn[start..i];

                if RESULT_TOKENS.contains(&word) {
                    break;
                }
                if word.starts_with('$') || word.chars().all(|c| c == '!' || c == '?') {
                    continue;
                }
                // A detached "..." after a move number.
                if word.chars().all(|c| c == '.') {
                    continue;
                }
                if let Some(san) = strip_move_number(word) {
                    if !san.is_empty() {
                        tokens.push(san);
                    }
                    continue;
                }
                tokens.push(word);
            }
        }
    }

    Ok(tokens)
}

/// `12.` -> `Some("")`, `12...Nf3` -> `Some("Nf3")`, anything not starting with
/// a move number -> `None` (so `0-0` stays a castling token).
fn strip_move_number(word: &str) -> Option<&str> {
    let digits = word.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 || word.as_bytes().get(digits) != Some(&b'.') {
        return None;
    }
    Some(word[digits..].trim_start_matches('.'))
}

/// Writes PGN movetext in the usual export layout: `1. e4 e5 2. Nf3 *`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PgnWriter {
    /// Maximum line width; `None` keeps everything on one line.
    pub columns: Option<usize>,
}

impl Default for PgnWriter {
    fn default() -> Self {
        Self { columns: Some(80) }
    }
}

impl PgnWriter {
    pub fn new(columns: Option<usize>) -> Self {
        Self { columns }
    }

    /// Movetext for a game starting from the standard position, followed by
    /// `result`.
    pub fn write_movetext<S: AsRef<str>>(&self, san_moves: &[S], result: &str) -> String {
        let mut lines: Vec<String> = Vec::new();
        let mut current = String::new();

        let mut put = |token: String| {
            if let Some(columns) = self.columns {
                if columns.saturating_sub(current.len()) < token.len() && !current.is_empty() {
                    lines.push(current.trim_end().to_string());
                    current.clear();
                }
            }
            current.push_str(&token);
        };

        for (ply, san) in san_moves.iter().enumerate() {
            if ply % 2 == 0 {
                put(format!("{}. ", ply / 2 + 1));
            }
            put(format!("{} ", san.as_ref()));
        }
        put(format!("{result} "));

        let tail = current.trim_end();
        if !tail.is_empty() {
            lines.push(tail.to_string());
        }
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_headers() {
        let pgn = r#"[White "Player1"]
[Black "Player2"]
[Result "1-0"]
[WhiteElo "1500"]

1. e4 e5 2. Nf3 Nc6 1-0"#;

        assert_eq!(extract_header(pgn, "White").as_deref(), Some("Player1"));
        assert_eq!(extract_header(pgn, "Result").as_deref(), Some("1-0"));
        assert_eq!(extract_header(pgn, "Event"), None);
        assert_eq!(extract_headers(pgn).len(), 4);
    }

    #[test]
    fn test_movetext_tokens_basic() {
        let pgn = r#"[White "Player1"]
[Black "Player2"]

1. e4 e5 2. Nf3 Nc6 1-0"#;
        assert_eq!(movetext_tokens(pgn).unwrap(), ["e4", "e5", "Nf3", "Nc6"]);
    }

    #[test]
    fn test_movetext_skips_annotations() {
        let pgn = "1. e4 {best by test} e5 $1 2. Nf3 (2. f4 exf4 (2... d5) 3. Nf3) 2... Nc6!? \
                   ; rest of line\n3. Bb5 a6 *";
        assert_eq!(
            movetext_tokens(pgn).unwrap(),
            ["e4", "e5", "Nf3", "Nc6!?", "Bb5", "a6"]
        );
    }

    #[test]
    fn test_movetext_compact_numbers_and_castling() {
        let pgn = "1.e4 e5 2.Nf3 Nf6 3.Bc4 Bc5 4.O-O 0-0";
        assert_eq!(
            movetext_tokens(pgn).unwrap(),
            ["e4", "e5", "Nf3", "Nf6", "Bc4", "Bc5", "O-O", "0-0"]
        );
    }

    #[test]
    fn test_movetext_stops_at_result() {
        let pgn = "1. e4 e5 0-1\n\n[Event \"next\"]\n1. d4 *";
        assert_eq!(movetext_tokens(pgn).unwrap(), ["e4", "e5"]);
    }

    #[test]
    fn test_movetext_detached_ellipsis() {
        assert_eq!(
            movetext_tokens("1. e4 e5 2. Nf3 ... Nc6 3. Bb5").unwrap(),
            ["e4", "e5", "Nf3", "Nc6", "Bb5"]
        );
    }

    #[test]
    fn test_movetext_escape_line() {
        let pgn = "% generated file\n1. d4 d5";
        assert_eq!(movetext_tokens(pgn).unwrap(), ["d4", "d5"]);
    }

    #[test]
    fn test_movetext_errors() {
        assert_eq!(
            movetext_tokens("1. e4 {unfinished"),
            Err(PgnError::UnterminatedComment(6))
        );
        assert_eq!(
            movetext_tokens("1. e4 (1. d4 d5"),
            Err(PgnError::UnterminatedVariation(6))
        );
        assert_eq!(
            movetext_tokens("1. e4 ) e5"),
            Err(PgnError::UnexpectedDelimiter { offset: 6, symbol: ')' })
        );
    }

    #[test]
    fn test_check_start_position() {
        assert!(check_start_position("1. e4").is_ok());
        let standard = format!("[FEN \"{}\"]\n1. e4", crate::board::STANDARD_START_FEN);
        assert!(check_start_position(&standard).is_ok());
        let custom = "[SetUp \"1\"]\n[FEN \"4k3/8/8/8/8/8/8/4K3 w - - 0 1\"]\n1. Kd2";
        assert!(matches!(
            check_start_position(custom),
            Err(PgnError::NonStandardStart(_))
        ));
    }

    #[test]
    fn test_writer_layout() {
        let writer = PgnWriter::default();
        assert_eq!(writer.write_movetext::<&str>(&[], "*"), "*");
        assert_eq!(writer.write_movetext(&["e4"], "*"), "1. e4 *");
        assert_eq!(
            writer.write_movetext(&["e4", "e5", "Nf3"], "*"),
            "1. e4 e5 2. Nf3 *"
        );
    }

    #[test]
    fn test_writer_wraps_lines() {
        let moves: Vec<&str> = ["Nf3", "Nf6", "Ng1", "Ng8"].repeat(10);
        let text = PgnWriter::default().write_movetext(&moves, "*");
        let lines: Vec<&str> = text.lines().collect();
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(line.len() <= 80, "{line}");
            assert_eq!(line.trim_end(), *line);
        }
        assert_eq!(text.split_whitespace().count(), 40 + 20 + 1);

        let unwrapped = PgnWriter::new(None).write_movetext(&moves, "*");
        assert_eq!(unwrapped.lines().count(), 1);
    }
}
