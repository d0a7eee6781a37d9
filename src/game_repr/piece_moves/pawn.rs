use super::super::board::Board;
use super::super::moves::Move;
use super::super::piece::{Cell, PieceKind};
use super::{push_move, MoveList};

impl Board {
    /// Pushes, captures and en passant. Promotion is not expanded here; the
    /// rules engine recognizes it from the destination row.
    pub(crate) fn pawn_moves_into(&self, x: u8, y: u8, last_move: Option<Move>, moves: &mut MoveList) {
        let Some(pawn) = self.piece(x, y) else {
            return;
        };
        let dir = self.pawn_direction(pawn.color);
        let (xi, next) = (x as i8, y as i8 + dir);

        if self.cell(xi, next).is_empty() {
            push_move(moves, x, y, xi, next);
            if y == self.pawn_start_row(pawn.color) && self.cell(xi, next + dir).is_empty() {
                push_move(moves, x, y, xi, next + dir);
            }
        }

        for dx in [-1, 1] {
            if let Cell::Piece(target) = self.cell(xi + dx, next) {
                if target.color != pawn.color {
                    push_move(moves, x, y, xi + dx, next);
                }
            }
        }

        // En passant: only right after an enemy double push that landed beside us
        if let Some(last) = last_move {
            let (lx, ly) = last.to();
            let double_push = last.from_x() == lx && last.from_y().abs_diff(ly) == 2;
            let beside = ly == y && lx.abs_diff(x) == 1;
            let victim_is_enemy_pawn = matches!(
                self.piece(lx, ly),
                Some(p) if p.kind == PieceKind::Pawn && p.color != pawn.color
            );
            if double_push && beside && victim_is_enemy_pawn && self.cell(lx as i8, next).is_empty() {
                push_move(moves, x, y, lx as i8, next);
            }
        }
    }
}
