use super::*;

const ENDGAME: &str = "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1";

#[test]
fn test_perft_endgame_depth_1() {
    let game = Game::from_fen(ENDGAME).unwrap();
    assert_eq!(game.perft(1), 14);
}

#[test]
fn test_perft_endgame_depth_2() {
    let game = Game::from_fen(ENDGAME).unwrap();
    assert_eq!(game.perft(2), 191);
}

#[test]
fn test_perft_endgame_depth_3() {
    let game = Game::from_fen(ENDGAME).unwrap();
    assert_eq!(game.perft(3), 2812);
}

#[test]
fn test_perft_endgame_depth_4() {
    let game = Game::from_fen(ENDGAME).unwrap();
    assert_eq!(game.perft(4), 43238);
}
