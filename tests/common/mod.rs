use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use shakmaty::san::San;
use shakmaty::uci::UciMove;
use shakmaty::{Chess, Position};
use tcn_core::{Board, Move};

/// A random legal game, with shakmaty's SAN for every ply.
pub struct RandomGame {
    pub moves: Vec<Move>,
    pub reference_san: Vec<String>,
}

/// Translate one of our moves into shakmaty's move in the same position.
pub fn reference_move(pos: &Chess, mv: &Move) -> shakmaty::Move {
    let uci: UciMove = mv.uci().parse().unwrap();
    uci.to_move(pos)
        .unwrap_or_else(|e| panic!("shakmaty rejects {}: {e:?}", mv.uci()))
}

/// Play a seeded random game on both boards, checking the legal move
/// counts agree at every ply.
pub fn random_game(seed: u64, max_plies: usize) -> RandomGame {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut board = Board::new();
    let mut pos = Chess::default();
    let mut moves = Vec::new();
    let mut reference_san = Vec::new();

    for _ in 0..max_plies {
        let legal = board.legal_moves();
        assert_eq!(
            legal.len(),
            pos.legal_moves().len(),
            "legal move count differs in {}",
            board.fen()
        );
        if legal.is_empty() {
            break;
        }

        let mv = legal[rng.gen_range(0..legal.len())];
        let reference = reference_move(&pos, &mv);
        let mut san = San::from_move(&pos, reference).to_string();
        pos.play_unchecked(reference);
        if pos.is_checkmate() {
            san.push('#');
        } else if pos.is_check() {
            san.push('+');
        }

        board = board.apply(mv).unwrap().0;
        moves.push(mv);
        reference_san.push(san);
    }

    RandomGame {
        moves,
        reference_san,
    }
}
