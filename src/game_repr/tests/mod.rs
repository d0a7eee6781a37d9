use super::*;
use crate::error::{EngineError, FenError};

// ==================== HELPER FUNCTIONS ====================

/// Empty standard-orientation board, white to move, no history
pub fn empty_game() -> Game {
    Game::from_board(Board::empty(Color::Black), Color::White)
}

/// Board coordinates of an algebraic square in the standard orientation
pub fn sq(name: &str) -> (u8, u8) {
    let (file, rank) = parse_square(name).expect("valid square name");
    Orientation::default().from_algebraic(file, rank)
}

pub fn place(game: &mut Game, square: &str, color: Color, kind: PieceKind) {
    let (x, y) = sq(square);
    game.board_mut()
        .put(x as i32, y as i32, Piece::new(color, kind))
        .unwrap();
}

pub fn mv(from: &str, to: &str) -> Move {
    let (fx, fy) = sq(from);
    let (tx, ty) = sq(to);
    Move::new(fx as i32, fy as i32, tx as i32, ty as i32).unwrap()
}

pub fn moves_of(game: &Game, square: &str) -> MoveList {
    let (x, y) = sq(square);
    game.get_moves(x as i32, y as i32).unwrap()
}

pub fn has_move(moves: &[Move], from: &str, to: &str) -> bool {
    moves.contains(&mv(from, to))
}

/// Plays a sequence of "e2e4"-style moves
pub fn play(game: &mut Game, moves: &[&str]) {
    for text in moves {
        let m = mv(&text[0..2], &text[2..4]);
        assert!(game.is_legal(m), "{text} should be legal");
        game.make_move(m).unwrap();
    }
}

// ==================== TEST MODULES ====================

mod pawn_movement;
mod perft;
