use chess_core::agent::ai::{evaluate, get_move, CancelToken, MATE_SCORE};
use chess_core::agent::to_notation;
use chess_core::game_repr::{Color, Game};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rayon::ThreadPoolBuilder;

fn search(game: &Game, depth: u8) -> chess_core::agent::SearchResult {
    get_move(game, depth, game.side_to_move(), &CancelToken::new()).expect("a move")
}

#[test]
fn test_finds_mate_in_two() {
    // Ra7 seals the seventh rank, Rb8 mates next
    let game = Game::from_fen("7k/8/8/8/8/8/R7/1R4K1 w - - 0 1").unwrap();
    let result = search(&game, 4);
    assert_eq!(result.score, MATE_SCORE + 1);
}

#[test]
fn test_prefers_the_faster_mate() {
    let game = Game::from_fen("6k1/5ppp/8/8/8/8/5PPP/R5K1 w - - 0 1").unwrap();
    let result = search(&game, 3);
    assert_eq!(to_notation(&game, result.best_move), "a1a8");
    assert_eq!(result.score, MATE_SCORE + 2);
}

#[test]
fn test_moves_are_legal_along_a_random_game() {
    let mut rng = StdRng::seed_from_u64(0xc0ffee);
    let mut game = Game::new();
    for _ in 0..24 {
        if game.is_finish() {
            break;
        }
        let result = search(&game, 2);
        assert!(game.is_legal(result.best_move), "{} in {}", result.best_move, game.to_fen());

        let moves = game.legal_moves(game.side_to_move());
        let mv = *moves.as_slice().choose(&mut rng).unwrap();
        game.make_move(mv).unwrap();
    }
}

#[test]
fn test_result_does_not_depend_on_thread_count() {
    let game = Game::from_fen("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1")
        .unwrap();
    let run = |threads: usize| {
        let pool = ThreadPoolBuilder::new().num_threads(threads).build().unwrap();
        pool.install(|| search(&game, 2))
    };
    let single = run(1);
    let many = run(4);
    assert_eq!(single.best_move, many.best_move);
    assert_eq!(single.score, many.score);
    assert_eq!(single.scores, many.scores);
}

#[test]
fn test_black_to_move_search() {
    // Black wins the loose rook
    let game = Game::from_fen("4k3/8/8/R2r4/8/8/8/4K3 b - - 0 1").unwrap();
    let before = evaluate(&game, Color::Black);
    let result = search(&game, 1);
    let mut after = game.clone();
    after.make_move(result.best_move).unwrap();
    assert!(evaluate(&after, Color::Black) > before);
}
