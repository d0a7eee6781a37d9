// Static position evaluation
// Returns a score in centipawns from `ai_color`'s point of view

use super::piece_square_tables::pst_value;
use crate::game_repr::{Color, Game, PieceKind};

// Material values in centipawns
const PAWN_VALUE: i32 = 100;
const KNIGHT_VALUE: i32 = 300;
const BISHOP_VALUE: i32 = 320;
const ROOK_VALUE: i32 = 500;
const QUEEN_VALUE: i32 = 900;

/// Get material value for a piece kind; kings are never traded
pub fn piece_value(kind: PieceKind) -> i32 {
    match kind {
        PieceKind::Pawn => PAWN_VALUE,
        PieceKind::Knight => KNIGHT_VALUE,
        PieceKind::Bishop => BISHOP_VALUE,
        PieceKind::Rook => ROOK_VALUE,
        PieceKind::Queen => QUEEN_VALUE,
        PieceKind::King => 0,
    }
}

/// Material plus piece-square bonus of every piece, negated for the
/// opponent of `ai_color`.
pub fn evaluate(game: &Game, ai_color: Color) -> i32 {
    let board = game.board();
    let orientation = game.orientation();

    board
        .pieces()
        .map(|(x, y, piece)| {
            let (file, rank) = orientation.to_algebraic(x, y);
            let relative_rank = match piece.color {
                Color::White => rank,
                Color::Black => 7 - rank,
            };
            // A pawn already on its last row is as good as a queen
            let kind = if piece.kind == PieceKind::Pawn && y == board.promotion_row(piece.color) {
                PieceKind::Queen
            } else {
                piece.kind
            };
            let value = piece_value(kind) + pst_value(kind, relative_rank, file);
            if piece.color == ai_color {
                value
            } else {
                -value
            }
        })
        .sum()
}
