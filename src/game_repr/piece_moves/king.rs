use super::super::board::{Board, RookSide};
use super::super::piece::{Cell, PieceKind};
use super::{push_move, MoveList, KING_OFFSETS};

impl Board {
    pub(crate) fn king_moves_into(&self, x: u8, y: u8, moves: &mut MoveList) {
        self.step_moves_into(x, y, &KING_OFFSETS, moves);
    }

    /// Castling moves of the king on (x, y).
    ///
    /// The king may start on column 4 or column 3 (mirrored layout); it moves
    /// two columns toward the rook either way.
    pub(crate) fn castling_moves_into(&self, x: u8, y: u8, moves: &mut MoveList) {
        let Some(king) = self.piece(x, y) else {
            return;
        };
        let color = king.color;
        if y != self.home_row(color) || (x != 3 && x != 4) || self.flags().king_moved(color) {
            return;
        }

        let opponent = color.opposite();
        if self.is_square_attacked(x, y, opponent) {
            return;
        }

        for side in [RookSide::Left, RookSide::Right] {
            if self.flags().rook_moved(color, side) {
                continue;
            }
            let rook_x = side.file();
            let rook_home = matches!(
                self.piece(rook_x, y),
                Some(p) if p.kind == PieceKind::Rook && p.color == color
            );
            if !rook_home {
                continue;
            }

            let dir: i8 = if rook_x > x { 1 } else { -1 };
            let mut cx = x as i8 + dir;
            let mut path_clear = true;
            while cx != rook_x as i8 {
                if self.cell(cx, y as i8) != Cell::Empty {
                    path_clear = false;
                    break;
                }
                cx += dir;
            }
            if !path_clear {
                continue;
            }

            // The crossed square must be safe; the landing square is left to the self-check filter
            let crossed = (x as i8 + dir) as u8;
            if self.is_square_attacked(crossed, y, opponent) {
                continue;
            }

            push_move(moves, x, y, x as i8 + 2 * dir, y as i8);
        }
    }
}
