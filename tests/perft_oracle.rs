//! Cross-checks move generation against the `chess` crate.
//!
//! The engine always promotes to a queen, so the reference count skips
//! underpromotions.

use std::str::FromStr;

use chess_core::game_repr::Game;

const POSITIONS: &[(&str, &str, u32)] = &[
    (
        "starting position",
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
        4,
    ),
    (
        "kiwipete",
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        3,
    ),
    ("rook endgame", "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1", 4),
    (
        "middle game",
        "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1",
        3,
    ),
    (
        "promotion race",
        "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8",
        3,
    ),
    ("complex promotions", "n1n5/PPPk4/8/8/8/8/4Kppp/5N1N b - - 0 1", 3),
    (
        "en passant available",
        "rnbqkbnr/ppp1p1pp/8/3pPp2/8/8/PPPP1PPP/RNBQKBNR w KQkq f6 0 3",
        3,
    ),
    ("pinned en passant", "8/8/8/K2pP2r/8/8/8/7k w - d6 0 1", 3),
];

fn reference_perft(board: &chess::Board, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }
    chess::MoveGen::new_legal(board)
        .filter(|mv| matches!(mv.get_promotion(), None | Some(chess::Piece::Queen)))
        .map(|mv| reference_perft(&board.make_move_new(mv), depth - 1))
        .sum()
}

#[test]
fn test_perft_matches_reference() {
    for &(name, fen, max_depth) in POSITIONS {
        let game = Game::from_fen(fen).unwrap();
        let board = chess::Board::from_str(fen).unwrap();
        for depth in 1..=max_depth {
            assert_eq!(
                game.perft(depth),
                reference_perft(&board, depth),
                "{name} at depth {depth}"
            );
        }
    }
}

#[test]
fn test_fen_round_trip_keeps_perft() {
    for &(name, fen, _) in POSITIONS {
        let game = Game::from_fen(fen).unwrap();
        let again = Game::from_fen(&game.to_fen()).unwrap();
        assert_eq!(again.perft(2), game.perft(2), "{name}");
    }
}
