/// End-to-end conversion tests for the public facades.
use tcn_core::{
    convert_pgn, convert_tcn, decode_tcn, pgn_to_tcn, replay_tcn, tcn_to_pgn, tcn_to_pgn_with,
    CastlingRights, Color, ConvertError, DecodeError, Game, Outcome, PgnWriter, PieceKind,
    SanError, Special, Square,
};

fn sq(s: &str) -> Square {
    s.parse().unwrap()
}

#[test]
fn test_scholars_mate_both_directions() {
    let tcn = "mC0KfA5QdN!TN1";
    let pgn = tcn_to_pgn(tcn).unwrap();
    assert_eq!(pgn, "1. e4 e5 2. Bc4 Nc6 3. Qh5 Nf6 4. Qxf7# *");
    assert_eq!(pgn_to_tcn(&pgn).unwrap(), tcn);

    let game = replay_tcn(tcn).unwrap();
    assert!(game.board().legal_moves().is_empty());
    assert_eq!(
        game.outcome(),
        Some(Outcome::Checkmate {
            winner: Color::White
        })
    );
}

#[test]
fn test_castling_both_sides_round_trip() {
    let pgn = "1. e4 e5 2. Nf3 Nc6 3. Bc4 Bc5 4. O-O Nf6 5. d3 O-O";
    let tcn = pgn_to_tcn(pgn).unwrap();
    // e1g1 and e8g8 are plain king hops on the wire.
    assert!(tcn.contains("eg"));
    assert!(tcn.contains("8!"));

    let game = replay_tcn(&tcn).unwrap();
    let specials: Vec<Special> = game.moves().iter().map(|m| m.special()).collect();
    assert_eq!(
        specials.iter().filter(|s| **s == Special::CastleKingside).count(),
        2
    );

    let board = game.board();
    assert_eq!(board.piece_at(sq("g1")).map(|p| p.kind), Some(PieceKind::King));
    assert_eq!(board.piece_at(sq("f1")).map(|p| p.kind), Some(PieceKind::Rook));
    assert_eq!(board.piece_at(sq("g8")).map(|p| p.kind), Some(PieceKind::King));
    assert_eq!(board.piece_at(sq("f8")).map(|p| p.kind), Some(PieceKind::Rook));
    assert!(board.piece_at(sq("h1")).is_none());
    assert!(board.piece_at(sq("h8")).is_none());
    assert_eq!(board.castling(), CastlingRights::NONE);

    assert_eq!(
        tcn_to_pgn(&tcn).unwrap(),
        "1. e4 e5 2. Nf3 Nc6 3. Bc4 Bc5 4. O-O Nf6 5. d3 O-O *"
    );
}

#[test]
fn test_en_passant_capture() {
    let mut game = Game::new();
    for san in ["e4", "a6", "e5", "d5"] {
        game.play_san(san).unwrap();
    }
    let ctx = game.play_san("exd6").unwrap();
    assert_eq!(ctx.mv.special(), Special::EnPassantCapture);
    assert!(ctx.is_capture());
    assert!(game.board().piece_at(sq("d5")).is_none());
    assert_eq!(game.san_moves().last().map(String::as_str), Some("exd6"));
    // e5 -> d6 is "KR".
    assert!(game.tcn().ends_with("KR"));

    // The same capture arriving as raw TCN is recognised too.
    let replayed = replay_tcn(&game.tcn()).unwrap();
    assert_eq!(
        replayed.moves().last().map(|m| m.special()),
        Some(Special::EnPassantCapture)
    );
}

#[test]
fn test_disambiguation_is_sound() {
    let pgn = "1. d4 d5 2. Nf3 Nf6 3. Nbd2";
    let tcn = pgn_to_tcn(pgn).unwrap();
    assert_eq!(tcn_to_pgn(&tcn).unwrap(), "1. d4 d5 2. Nf3 Nf6 3. Nbd2 *");

    let other = pgn_to_tcn("1. d4 d5 2. Nf3 Nf6 3. Nfd2").unwrap();
    assert_ne!(tcn, other);
    assert_eq!(tcn_to_pgn(&other).unwrap(), "1. d4 d5 2. Nf3 Nf6 3. Nfd2 *");

    assert!(matches!(
        pgn_to_tcn("1. d4 d5 2. Nf3 Nf6 3. Nd2"),
        Err(ConvertError::San {
            ply: 5,
            source: SanError::AmbiguousToken { .. }
        })
    ));
}

#[test]
fn test_error_boundary() {
    assert_eq!(
        tcn_to_pgn("m"),
        Err(ConvertError::Decode(DecodeError::OddLength { len: 1 }))
    );
    assert_eq!(
        decode_tcn("mC%a"),
        Err(DecodeError::InvalidSymbol {
            offset: 2,
            symbol: '%'
        })
    );
    assert!(matches!(
        pgn_to_tcn("1. Ra3"),
        Err(ConvertError::San {
            ply: 1,
            source: SanError::NoMatchingMove(_)
        })
    ));
    assert!(matches!(
        pgn_to_tcn("1. e4 e5 2. Xf3"),
        Err(ConvertError::San {
            ply: 3,
            source: SanError::MalformedSanToken(_)
        })
    ));
}

#[test]
fn test_full_pgn_with_noise() {
    let pgn = r#"[Event "Live Chess"]
[Site "Chess.com"]
[Result "0-1"]

1. e4 {[%clk 0:10:00]} 1... e5 2. Nf3 (2. f4 exf4 (2... d5) 3. Nf3) 2... Nc6 $1
3. Bb5 a6 ; Morphy
4. Ba4 Nf6 0-1"#;
    let data = convert_pgn(pgn, &PgnWriter::default()).unwrap();
    assert_eq!(data.moves, ["e4", "e5", "Nf3", "Nc6", "Bb5", "a6", "Ba4", "Nf6"]);
    assert_eq!(data.tags.len(), 3);
    assert_eq!(pgn_to_tcn(pgn).unwrap(), data.tcn);
}

#[test]
fn test_detached_continuation_dots() {
    let spaced = pgn_to_tcn("1. e4 e5 2. Nf3 ... Nc6").unwrap();
    assert_eq!(spaced, pgn_to_tcn("1. e4 e5 2. Nf3 Nc6").unwrap());
    assert_eq!(spaced, pgn_to_tcn("1. e4 1... e5 2. Nf3 2... Nc6").unwrap());
}

#[test]
fn test_writer_wraps_long_games() {
    let shuffle = ["Nf3", "Nf6", "Ng1", "Ng8"].repeat(10);
    let tcn = tcn_core::encode_san_to_tcn(&shuffle).unwrap();

    let pgn = tcn_to_pgn(&tcn).unwrap();
    assert!(pgn.lines().count() > 1);
    for line in pgn.lines() {
        assert!(line.len() <= 80, "{line:?}");
        assert_eq!(line, line.trim_end());
    }

    let flat = tcn_to_pgn_with(&tcn, &PgnWriter::new(None)).unwrap();
    assert_eq!(flat.lines().count(), 1);
    assert_eq!(flat, pgn.replace('\n', " "));
}

#[test]
fn test_game_data_json_shape() {
    let data = convert_tcn("mC0K", &PgnWriter::default()).unwrap();
    let value = serde_json::to_value(&data).unwrap();
    assert_eq!(value["tcn"], "mC0K");
    assert_eq!(value["moves"], serde_json::json!(["e4", "e5"]));
    assert_eq!(value["movetext"], "1. e4 e5 *");
    assert!(value["outcome"].is_null());
}
