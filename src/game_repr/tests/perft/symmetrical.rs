use super::*;

const SYMMETRICAL: &str = "r4rk1/1pp1qppp/p1np1n2/2b1p1B1/2B1P1b1/P1NP1N2/1PP1QPPP/R4RK1 w - - 0 10";

#[test]
fn test_perft_symmetrical_depth_1() {
    let game = Game::from_fen(SYMMETRICAL).unwrap();
    assert_eq!(game.perft(1), 46);
}

#[test]
fn test_perft_symmetrical_depth_2() {
    let game = Game::from_fen(SYMMETRICAL).unwrap();
    assert_eq!(game.perft(2), 2079);
}
