use super::super::board::Board;
use super::MoveList;

impl Board {
    /// Queen = rook rays plus bishop rays
    pub(crate) fn queen_moves_into(&self, x: u8, y: u8, moves: &mut MoveList) {
        self.rook_moves_into(x, y, moves);
        self.bishop_moves_into(x, y, moves);
    }
}
