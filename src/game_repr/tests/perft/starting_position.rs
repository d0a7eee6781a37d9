use super::*;

#[test]
fn test_perft_starting_position_depth_1() {
    let game = Game::new();
    assert_eq!(game.perft(1), 20);
}

#[test]
fn test_perft_starting_position_depth_2() {
    let game = Game::new();
    assert_eq!(game.perft(2), 400);
}

#[test]
fn test_perft_starting_position_depth_3() {
    let game = Game::new();
    assert_eq!(game.perft(3), 8902);
}

#[test]
fn test_perft_starting_position_depth_4() {
    let game = Game::new();
    assert_eq!(game.perft(4), 197281);
}
