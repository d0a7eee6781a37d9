use super::super::board::Board;
use super::{MoveList, ORTHOGONAL};

impl Board {
    pub(crate) fn rook_moves_into(&self, x: u8, y: u8, moves: &mut MoveList) {
        self.ray_moves_into(x, y, &ORTHOGONAL, moves);
    }
}
