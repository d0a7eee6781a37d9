use super::super::board::Board;
use super::{MoveList, KNIGHT_OFFSETS};

impl Board {
    pub(crate) fn knight_moves_into(&self, x: u8, y: u8, moves: &mut MoveList) {
        self.step_moves_into(x, y, &KNIGHT_OFFSETS, moves);
    }
}
