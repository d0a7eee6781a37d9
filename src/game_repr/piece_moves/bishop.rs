use super::super::board::Board;
use super::{MoveList, DIAGONAL};

impl Board {
    pub(crate) fn bishop_moves_into(&self, x: u8, y: u8, moves: &mut MoveList) {
        self.ray_moves_into(x, y, &DIAGONAL, moves);
    }
}
