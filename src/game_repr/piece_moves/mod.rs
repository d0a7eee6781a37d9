mod bishop;
mod king;
mod knight;
mod pawn;
mod queen;
mod rook;

use smallvec::SmallVec;

use super::board::Board;
use super::moves::{Move, MoveRegistry};
use super::piece::{Cell, Color, PieceKind};

/// Move buffer used by generation and search; spills to the heap only past 64 entries.
pub type MoveList = SmallVec<[Move; 64]>;

pub(crate) const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (1, 2), (2, 1), (2, -1), (1, -2),
    (-1, -2), (-2, -1), (-2, 1), (-1, 2),
];

pub(crate) const KING_OFFSETS: [(i8, i8); 8] = [
    (0, 1), (1, 1), (1, 0), (1, -1),
    (0, -1), (-1, -1), (-1, 0), (-1, 1),
];

pub(crate) const ORTHOGONAL: [(i8, i8); 4] = [(0, 1), (1, 0), (0, -1), (-1, 0)];
pub(crate) const DIAGONAL: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, -1), (-1, 1)];

#[inline]
pub(crate) fn push_move(moves: &mut MoveList, from_x: u8, from_y: u8, to_x: i8, to_y: i8) {
    moves.push(*MoveRegistry::global().lookup(from_x, from_y, to_x as u8, to_y as u8));
}

impl Board {
    /// Pseudo-legal moves of the piece on (x, y), appended to `moves`.
    ///
    /// `last_move` is the move that produced this board (en passant needs it).
    /// Castling is only generated when `with_castling` is set.
    pub(crate) fn pseudo_moves_into(
        &self,
        x: u8,
        y: u8,
        last_move: Option<Move>,
        with_castling: bool,
        moves: &mut MoveList,
    ) {
        let Some(piece) = self.piece(x, y) else {
            return;
        };
        match piece.kind {
            PieceKind::Pawn => self.pawn_moves_into(x, y, last_move, moves),
            PieceKind::Rook => self.rook_moves_into(x, y, moves),
            PieceKind::Knight => self.knight_moves_into(x, y, moves),
            PieceKind::Bishop => self.bishop_moves_into(x, y, moves),
            PieceKind::Queen => self.queen_moves_into(x, y, moves),
            PieceKind::King => {
                self.king_moves_into(x, y, moves);
                if with_castling {
                    self.castling_moves_into(x, y, moves);
                }
            }
        }
    }

    /// Step-wise targets (knight, king): empty squares and enemy pieces.
    fn step_moves_into(&self, x: u8, y: u8, offsets: &[(i8, i8)], moves: &mut MoveList) {
        let Some(piece) = self.piece(x, y) else {
            return;
        };
        for &(dx, dy) in offsets {
            let (tx, ty) = (x as i8 + dx, y as i8 + dy);
            match self.cell(tx, ty) {
                Cell::Empty => push_move(moves, x, y, tx, ty),
                Cell::Piece(target) if target.color != piece.color => push_move(moves, x, y, tx, ty),
                _ => {}
            }
        }
    }

    /// Ray targets (rook, bishop, queen): stop at the first occupied square,
    /// keeping it only when it holds an enemy.
    fn ray_moves_into(&self, x: u8, y: u8, directions: &[(i8, i8)], moves: &mut MoveList) {
        let Some(piece) = self.piece(x, y) else {
            return;
        };
        for &(dx, dy) in directions {
            let (mut tx, mut ty) = (x as i8 + dx, y as i8 + dy);
            loop {
                match self.cell(tx, ty) {
                    Cell::Empty => push_move(moves, x, y, tx, ty),
                    Cell::Piece(target) => {
                        if target.color != piece.color {
                            push_move(moves, x, y, tx, ty);
                        }
                        break;
                    }
                    Cell::Wall => break,
                }
                tx += dx;
                ty += dy;
            }
        }
    }

    /// Whether any piece of `by` attacks (x, y). Castling never attacks.
    pub(crate) fn is_square_attacked(&self, x: u8, y: u8, by: Color) -> bool {
        let (x, y) = (x as i8, y as i8);
        let holds = |cx: i8, cy: i8, kinds: &[PieceKind]| match self.cell(cx, cy) {
            Cell::Piece(p) => p.color == by && kinds.contains(&p.kind),
            _ => false,
        };

        // A pawn of `by` attacks one row ahead of itself
        let pawn_row = y - self.pawn_direction(by);
        if holds(x - 1, pawn_row, &[PieceKind::Pawn]) || holds(x + 1, pawn_row, &[PieceKind::Pawn]) {
            return true;
        }

        if KNIGHT_OFFSETS
            .iter()
            .any(|&(dx, dy)| holds(x + dx, y + dy, &[PieceKind::Knight]))
        {
            return true;
        }

        if KING_OFFSETS
            .iter()
            .any(|&(dx, dy)| holds(x + dx, y + dy, &[PieceKind::King]))
        {
            return true;
        }

        let sliders = [
            (&ORTHOGONAL, [PieceKind::Rook, PieceKind::Queen]),
            (&DIAGONAL, [PieceKind::Bishop, PieceKind::Queen]),
        ];
        for (directions, kinds) in sliders {
            for &(dx, dy) in directions.iter() {
                let (mut cx, mut cy) = (x + dx, y + dy);
                loop {
                    match self.cell(cx, cy) {
                        Cell::Empty => {
                            cx += dx;
                            cy += dy;
                        }
                        Cell::Piece(p) => {
                            if p.color == by && kinds.contains(&p.kind) {
                                return true;
                            }
                            break;
                        }
                        Cell::Wall => break,
                    }
                }
            }
        }

        false
    }
}
