use super::*;

// ==================== PAWN MOVEMENT TESTS ====================

#[test]
fn test_king_file_pawn_from_start() {
    let game = Game::new();
    // White e-pawn sits on (4, 6)
    let moves = game.get_moves(4, 6).unwrap();
    assert_eq!(moves.len(), 2);
    assert!(has_move(&moves, "e2", "e3"));
    assert!(has_move(&moves, "e2", "e4"));
}

#[test]
fn test_blocked_double_push() {
    let mut game = Game::new();
    place(&mut game, "e4", Color::Black, PieceKind::Knight);
    let moves = moves_of(&game, "e2");
    assert!(moves.len() <= 1);
    assert!(has_move(&moves, "e2", "e3"));
    assert!(!has_move(&moves, "e2", "e4"));
}

#[test]
fn test_blocked_single_push_blocks_double() {
    let mut game = Game::new();
    place(&mut game, "e3", Color::White, PieceKind::Knight);
    assert!(moves_of(&game, "e2").is_empty());
}

#[test]
fn test_no_double_push_off_start_row() {
    let mut game = empty_game();
    place(&mut game, "e1", Color::White, PieceKind::King);
    place(&mut game, "e8", Color::Black, PieceKind::King);
    place(&mut game, "d3", Color::White, PieceKind::Pawn);
    let moves = moves_of(&game, "d3");
    assert_eq!(moves.len(), 1);
    assert!(has_move(&moves, "d3", "d4"));
}

#[test]
fn test_diagonal_captures_only_enemies() {
    let mut game = empty_game();
    place(&mut game, "e1", Color::White, PieceKind::King);
    place(&mut game, "e8", Color::Black, PieceKind::King);
    place(&mut game, "d4", Color::White, PieceKind::Pawn);
    place(&mut game, "c5", Color::Black, PieceKind::Rook);
    place(&mut game, "e5", Color::White, PieceKind::Rook);
    let moves = moves_of(&game, "d4");
    assert!(has_move(&moves, "d4", "c5"));
    assert!(!has_move(&moves, "d4", "e5"));
    assert!(has_move(&moves, "d4", "d5"));
    assert_eq!(moves.len(), 2);
}

#[test]
fn test_edge_pawn_does_not_wrap() {
    let mut game = empty_game();
    place(&mut game, "e1", Color::White, PieceKind::King);
    place(&mut game, "e8", Color::Black, PieceKind::King);
    place(&mut game, "a3", Color::Black, PieceKind::Pawn);
    place(&mut game, "h1", Color::White, PieceKind::Rook);
    let moves = moves_of(&game, "a3");
    assert_eq!(moves.len(), 1);
    assert!(has_move(&moves, "a3", "a2"));
}

#[test]
fn test_black_pawn_moves_down_the_board() {
    let game = Game::new();
    let moves = moves_of(&game, "d7");
    assert!(has_move(&moves, "d7", "d6"));
    assert!(has_move(&moves, "d7", "d5"));
    assert_eq!(moves.len(), 2);
}
