use std::fmt;

use super::moves::Move;
use super::piece::{Cell, Color, Piece, PieceKind, EMPTY_CODE, WALL_CODE};
use crate::error::{EngineError, EngineResult};

/// Wall cells on every side of the playable area. Two cells cover the
/// longest knight jump, so generation never leaves the backing grid.
pub const PADDING: usize = 2;

const GRID: usize = 8 + 2 * PADDING;

const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// Which corner rook, by board column: left is x = 0, right is x = 7.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RookSide {
    Left,
    Right,
}

impl RookSide {
    pub fn from_file(x: u8) -> Option<Self> {
        match x {
            0 => Some(Self::Left),
            7 => Some(Self::Right),
            _ => None,
        }
    }

    pub fn file(&self) -> u8 {
        match self {
            Self::Left => 0,
            Self::Right => 7,
        }
    }
}

/// Six "has moved" bits deciding castling legality. Bits are only ever set
/// during play; a fresh position starts from a new record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct MovedFlags(u8);

impl MovedFlags {
    const WHITE_KING: u8 = 1 << 0;
    const BLACK_KING: u8 = 1 << 1;
    const WHITE_LEFT_ROOK: u8 = 1 << 2;
    const WHITE_RIGHT_ROOK: u8 = 1 << 3;
    const BLACK_LEFT_ROOK: u8 = 1 << 4;
    const BLACK_RIGHT_ROOK: u8 = 1 << 5;

    fn king_bit(color: Color) -> u8 {
        match color {
            Color::White => Self::WHITE_KING,
            Color::Black => Self::BLACK_KING,
        }
    }

    fn rook_bit(color: Color, side: RookSide) -> u8 {
        match (color, side) {
            (Color::White, RookSide::Left) => Self::WHITE_LEFT_ROOK,
            (Color::White, RookSide::Right) => Self::WHITE_RIGHT_ROOK,
            (Color::Black, RookSide::Left) => Self::BLACK_LEFT_ROOK,
            (Color::Black, RookSide::Right) => Self::BLACK_RIGHT_ROOK,
        }
    }

    pub fn king_moved(&self, color: Color) -> bool {
        self.0 & Self::king_bit(color) != 0
    }

    pub fn rook_moved(&self, color: Color, side: RookSide) -> bool {
        self.0 & Self::rook_bit(color, side) != 0
    }

    pub fn set_king_moved(&mut self, color: Color) {
        self.0 |= Self::king_bit(color);
    }

    pub fn set_rook_moved(&mut self, color: Color, side: RookSide) {
        self.0 |= Self::rook_bit(color, side);
    }

    pub fn bits(&self) -> u8 {
        self.0
    }

    /// Left and right rook bits trade places when the files are mirrored.
    fn swap_sides(&mut self) {
        let mut swapped = self.0 & (Self::WHITE_KING | Self::BLACK_KING);
        for color in [Color::White, Color::Black] {
            if self.rook_moved(color, RookSide::Left) {
                swapped |= Self::rook_bit(color, RookSide::Right);
            }
            if self.rook_moved(color, RookSide::Right) {
                swapped |= Self::rook_bit(color, RookSide::Left);
            }
        }
        self.0 = swapped;
    }
}

/// Maps board coordinates to algebraic squares.
///
/// `upper` is the color whose back rank is row 0. `mirrored` reverses the
/// files, which puts the kings on column 3 instead of column 4.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Orientation {
    pub upper: Color,
    pub mirrored: bool,
}

impl Default for Orientation {
    fn default() -> Self {
        Self {
            upper: Color::Black,
            mirrored: false,
        }
    }
}

impl Orientation {
    pub fn new(upper: Color, mirrored: bool) -> Self {
        Self { upper, mirrored }
    }

    /// (file, rank) with 0 = file a / rank 1.
    pub(crate) fn to_algebraic(&self, x: u8, y: u8) -> (u8, u8) {
        let file = if self.mirrored { 7 - x } else { x };
        let rank = match self.upper {
            Color::Black => 7 - y,
            Color::White => y,
        };
        (file, rank)
    }

    /// Inverse of [`Orientation::to_algebraic`].
    pub(crate) fn from_algebraic(&self, file: u8, rank: u8) -> (u8, u8) {
        let x = if self.mirrored { 7 - file } else { file };
        let y = match self.upper {
            Color::Black => 7 - rank,
            Color::White => rank,
        };
        (x, y)
    }

    pub(crate) fn square_name(&self, x: u8, y: u8) -> String {
        let (file, rank) = self.to_algebraic(x, y);
        format!("{}{}", (b'a' + file) as char, rank + 1)
    }
}

/// Board state: padded piece grid, identity grid and moved flags.
#[derive(Clone, PartialEq, Eq)]
pub struct Board {
    /// Indexed [row][column] with `PADDING` wall cells around the 8x8 area
    cells: [[Cell; GRID]; GRID],
    /// Stable piece ids for renderers; `None` marks an empty square
    ids: [[Option<u8>; 8]; 8],
    flags: MovedFlags,
    upper: Color,
}

pub(crate) fn check_bounds(x: i32, y: i32) -> EngineResult<(u8, u8)> {
    if (0..8).contains(&x) && (0..8).contains(&y) {
        Ok((x as u8, y as u8))
    } else {
        Err(EngineError::OutOfBounds { x, y })
    }
}

impl Board {
    /// Playable area empty, walls around it.
    pub fn empty(upper: Color) -> Self {
        let mut cells = [[Cell::Wall; GRID]; GRID];
        for row in cells.iter_mut().skip(PADDING).take(8) {
            for cell in row.iter_mut().skip(PADDING).take(8) {
                *cell = Cell::Empty;
            }
        }
        Self {
            cells,
            ids: [[None; 8]; 8],
            flags: MovedFlags::default(),
            upper,
        }
    }

    /// Standard setup with `upper` on rows 0 and 1 and kings on column 4.
    pub fn initial(upper: Color) -> Self {
        let mut board = Self::empty(upper);
        let lower = upper.opposite();
        let rows = [(0u8, upper, true), (1, upper, false), (6, lower, false), (7, lower, true)];
        for (y, color, back) in rows {
            for x in 0..8u8 {
                let kind = if back { BACK_RANK[x as usize] } else { PieceKind::Pawn };
                board.place(x, y, Piece::new(color, kind));
            }
        }
        board
    }

    /// Raw access into the padded grid; valid for -2..=9 on both axes.
    #[inline]
    pub(crate) fn cell(&self, x: i8, y: i8) -> Cell {
        self.cells[(y + PADDING as i8) as usize][(x + PADDING as i8) as usize]
    }

    #[inline]
    fn cell_mut(&mut self, x: u8, y: u8) -> &mut Cell {
        &mut self.cells[y as usize + PADDING][x as usize + PADDING]
    }

    #[inline]
    pub(crate) fn piece(&self, x: u8, y: u8) -> Option<Piece> {
        self.cell(x as i8, y as i8).piece()
    }

    pub fn cell_at(&self, x: i32, y: i32) -> EngineResult<Cell> {
        let (x, y) = check_bounds(x, y)?;
        Ok(self.cell(x as i8, y as i8))
    }

    pub fn piece_at(&self, x: i32, y: i32) -> EngineResult<Option<Piece>> {
        Ok(self.cell_at(x, y)?.piece())
    }

    /// Compact signed code (upper color negative).
    pub fn code_at(&self, x: i32, y: i32) -> EngineResult<i8> {
        Ok(self.cell_at(x, y)?.code(self.upper))
    }

    pub fn identity_at(&self, x: i32, y: i32) -> EngineResult<Option<u8>> {
        let (x, y) = check_bounds(x, y)?;
        Ok(self.ids[y as usize][x as usize])
    }

    pub fn flags(&self) -> MovedFlags {
        self.flags
    }

    pub(crate) fn flags_mut(&mut self) -> &mut MovedFlags {
        &mut self.flags
    }

    pub fn upper(&self) -> Color {
        self.upper
    }

    /// Row holding `color`'s king and rooks at the start.
    pub fn home_row(&self, color: Color) -> u8 {
        if color == self.upper {
            0
        } else {
            7
        }
    }

    /// Row step of a pawn of `color`.
    pub fn pawn_direction(&self, color: Color) -> i8 {
        if color == self.upper {
            1
        } else {
            -1
        }
    }

    pub fn pawn_start_row(&self, color: Color) -> u8 {
        if color == self.upper {
            1
        } else {
            6
        }
    }

    pub fn promotion_row(&self, color: Color) -> u8 {
        if color == self.upper {
            7
        } else {
            0
        }
    }

    /// Gives the piece the lowest id no other piece on the board holds, so
    /// ids stay unique (and below 64) however many placements happen.
    pub(crate) fn place(&mut self, x: u8, y: u8, piece: Piece) {
        *self.cell_mut(x, y) = Cell::Piece(piece);
        self.ids[y as usize][x as usize] = None;
        let taken = self
            .ids
            .iter()
            .flatten()
            .flatten()
            .fold(0u64, |mask, &id| mask | 1 << id);
        self.ids[y as usize][x as usize] = Some((!taken).trailing_zeros() as u8);
    }

    /// Places a piece with a fresh identity, replacing whatever was there.
    pub fn put(&mut self, x: i32, y: i32, piece: Piece) -> EngineResult<()> {
        let (x, y) = check_bounds(x, y)?;
        self.place(x, y, piece);
        Ok(())
    }

    /// Piece-code overload of placement. Only real piece codes are accepted;
    /// emptiness is created through [`Board::set_cage`] or [`Board::relocate`].
    pub fn set_code(&mut self, x: i32, y: i32, code: i8) -> EngineResult<()> {
        let (x, y) = check_bounds(x, y)?;
        if code == EMPTY_CODE || code == WALL_CODE {
            return Err(EngineError::InvalidArgument(format!(
                "code {code} does not name a piece"
            )));
        }
        match Cell::from_code(code, self.upper) {
            Some(Cell::Piece(piece)) => {
                self.place(x, y, piece);
                Ok(())
            }
            _ => Err(EngineError::InvalidArgument(format!(
                "unknown piece code {code}"
            ))),
        }
    }

    /// Forces a square empty.
    pub fn set_cage(&mut self, x: i32, y: i32) -> EngineResult<()> {
        let (x, y) = check_bounds(x, y)?;
        self.clear(x, y);
        Ok(())
    }

    #[inline]
    pub(crate) fn clear(&mut self, x: u8, y: u8) {
        *self.cell_mut(x, y) = Cell::Empty;
        self.ids[y as usize][x as usize] = None;
    }

    /// Coordinate overload of placement: moves the piece and its identity,
    /// empties the source, and records king / corner-rook movement.
    pub fn relocate(&mut self, from_x: i32, from_y: i32, to_x: i32, to_y: i32) -> EngineResult<()> {
        let (fx, fy) = check_bounds(from_x, from_y)?;
        let (tx, ty) = check_bounds(to_x, to_y)?;
        if self.piece(fx, fy).is_none() {
            return Err(EngineError::NoPiece { x: fx, y: fy });
        }
        self.relocate_unchecked(fx, fy, tx, ty);
        Ok(())
    }

    pub(crate) fn relocate_unchecked(&mut self, fx: u8, fy: u8, tx: u8, ty: u8) {
        let Some(moving) = self.piece(fx, fy) else {
            return;
        };

        match moving.kind {
            PieceKind::King => self.flags.set_king_moved(moving.color),
            PieceKind::Rook if fy == self.home_row(moving.color) => {
                if let Some(side) = RookSide::from_file(fx) {
                    self.flags.set_rook_moved(moving.color, side);
                }
            }
            _ => {}
        }

        // A rook taken on its corner can no longer castle either
        if let Some(captured) = self.piece(tx, ty) {
            if captured.kind == PieceKind::Rook && ty == self.home_row(captured.color) {
                if let Some(side) = RookSide::from_file(tx) {
                    self.flags.set_rook_moved(captured.color, side);
                }
            }
        }

        let id = self.ids[fy as usize][fx as usize];
        *self.cell_mut(tx, ty) = Cell::Piece(moving);
        self.ids[ty as usize][tx as usize] = id;
        self.clear(fx, fy);
    }

    /// Changes the kind of the piece on a square, keeping color and identity.
    pub(crate) fn promote(&mut self, x: u8, y: u8, kind: PieceKind) {
        if let Cell::Piece(p) = self.cell_mut(x, y) {
            p.kind = kind;
        }
    }

    /// Plays `mv` on the grids, including the en passant victim, the castling
    /// rook and promotion to `promotion`. The caller guarantees a piece on the source.
    pub(crate) fn apply_move(&mut self, mv: Move, promotion: PieceKind) {
        let (fx, fy) = mv.from();
        let (tx, ty) = mv.to();
        let Some(moving) = self.piece(fx, fy) else {
            return;
        };

        match moving.kind {
            PieceKind::Pawn if fx != tx && self.piece(tx, ty).is_none() => {
                // Diagonal onto an empty square: the captured pawn sits beside the origin
                self.clear(tx, fy);
            }
            PieceKind::King if fx.abs_diff(tx) == 2 => {
                let (rook_x, rook_to) = if tx > fx { (7, tx - 1) } else { (0, tx + 1) };
                if matches!(
                    self.piece(rook_x, fy),
                    Some(p) if p.kind == PieceKind::Rook && p.color == moving.color
                ) {
                    self.relocate_unchecked(rook_x, fy, rook_to, fy);
                }
            }
            _ => {}
        }

        self.relocate_unchecked(fx, fy, tx, ty);

        if moving.kind == PieceKind::Pawn && ty == self.promotion_row(moving.color) {
            self.promote(tx, ty, promotion);
        }
    }

    pub fn find_king(&self, color: Color) -> Option<(u8, u8)> {
        self.pieces()
            .find(|(_, _, p)| p.kind == PieceKind::King && p.color == color)
            .map(|(x, y, _)| (x, y))
    }

    /// Every piece with its square, row by row.
    pub fn pieces(&self) -> impl Iterator<Item = (u8, u8, Piece)> + '_ {
        (0..8u8).flat_map(move |y| {
            (0..8u8).filter_map(move |x| self.piece(x, y).map(|p| (x, y, p)))
        })
    }

    pub fn occupied_count(&self) -> usize {
        self.pieces().count()
    }

    /// Mirrors rows so the other color sits on top.
    pub fn flip_vertical(&mut self) {
        for y in 0..4 {
            let other = 7 - y;
            self.cells.swap(y + PADDING, other + PADDING);
            self.ids.swap(y, other);
        }
        self.upper = self.upper.opposite();
    }

    /// Mirrors columns; kings move between column 4 and column 3.
    pub fn mirror_files(&mut self) {
        for row in self.cells.iter_mut().skip(PADDING).take(8) {
            row[PADDING..PADDING + 8].reverse();
        }
        for row in self.ids.iter_mut() {
            row.reverse();
        }
        self.flags.swap_sides();
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Board(upper: {}, flags: {:06b})", self.upper.name(), self.flags.bits())?;
        write!(f, "{self}")
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..8u8 {
            for x in 0..8u8 {
                let c = self.piece(x, y).map_or('.', |p| p.to_char());
                write!(f, "{c}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_layout() {
        let board = Board::initial(Color::Black);
        assert_eq!(
            board.piece_at(4, 7).unwrap(),
            Some(Piece::new(Color::White, PieceKind::King))
        );
        assert_eq!(
            board.piece_at(3, 0).unwrap(),
            Some(Piece::new(Color::Black, PieceKind::Queen))
        );
        assert_eq!(board.code_at(4, 6).unwrap(), 3);
        assert_eq!(board.code_at(4, 1).unwrap(), -3);
        assert_eq!(board.code_at(4, 4).unwrap(), EMPTY_CODE);
        assert_eq!(board.occupied_count(), 32);
    }

    #[test]
    fn test_identities_are_unique() {
        let board = Board::initial(Color::Black);
        let mut ids: Vec<u8> = (0..8)
            .flat_map(|y| (0..8).map(move |x| (x, y)))
            .filter_map(|(x, y)| board.identity_at(x, y).unwrap())
            .collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 32);
        assert_eq!(board.identity_at(3, 3).unwrap(), None);
    }

    #[test]
    fn test_identities_stay_unique_after_many_placements() {
        let mut board = Board::initial(Color::Black);
        let knight = Piece::new(Color::White, PieceKind::Knight);
        for i in 0..300 {
            board.put(i % 8, 2 + (i / 8) % 4, knight).unwrap();
        }
        let mut ids: Vec<u8> = (0..8)
            .flat_map(|y| (0..8).map(move |x| (x, y)))
            .filter_map(|(x, y)| board.identity_at(x, y).unwrap())
            .collect();
        assert_eq!(ids.len(), 64);
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 64);
        assert!(ids.iter().all(|&id| id < 64));
    }

    #[test]
    fn test_walls_surround_the_board() {
        let board = Board::empty(Color::Black);
        assert_eq!(board.cell(-1, 0), Cell::Wall);
        assert_eq!(board.cell(-2, -2), Cell::Wall);
        assert_eq!(board.cell(8, 3), Cell::Wall);
        assert_eq!(board.cell(9, 9), Cell::Wall);
        assert_eq!(board.cell(0, 0), Cell::Empty);
    }

    #[test]
    fn test_out_of_range_is_rejected() {
        let board = Board::initial(Color::Black);
        assert!(matches!(board.piece_at(8, 0), Err(EngineError::OutOfBounds { .. })));
        assert!(matches!(board.code_at(0, -1), Err(EngineError::OutOfBounds { .. })));
    }

    #[test]
    fn test_set_code_rejects_empty_and_wall() {
        let mut board = Board::empty(Color::Black);
        assert!(matches!(board.set_code(0, 0, EMPTY_CODE), Err(EngineError::InvalidArgument(_))));
        assert!(matches!(board.set_code(0, 0, WALL_CODE), Err(EngineError::InvalidArgument(_))));
        assert!(matches!(board.set_code(0, 0, 2), Err(EngineError::InvalidArgument(_))));
        board.set_code(0, 0, -8).unwrap();
        assert_eq!(
            board.piece_at(0, 0).unwrap(),
            Some(Piece::new(Color::Black, PieceKind::King))
        );
    }

    #[test]
    fn test_relocate_moves_identity_and_sets_flags() {
        let mut board = Board::initial(Color::Black);
        let id = board.identity_at(4, 7).unwrap();
        board.set_cage(5, 7).unwrap();
        board.relocate(4, 7, 5, 7).unwrap();
        assert_eq!(board.identity_at(5, 7).unwrap(), id);
        assert_eq!(board.identity_at(4, 7).unwrap(), None);
        assert!(board.flags().king_moved(Color::White));
        assert!(!board.flags().king_moved(Color::Black));

        board.set_cage(0, 6).unwrap();
        board.relocate(0, 7, 0, 6).unwrap();
        assert!(board.flags().rook_moved(Color::White, RookSide::Left));
        assert!(!board.flags().rook_moved(Color::White, RookSide::Right));
    }

    #[test]
    fn test_relocate_from_empty_square_fails() {
        let mut board = Board::initial(Color::Black);
        assert!(matches!(board.relocate(3, 3, 3, 4), Err(EngineError::NoPiece { x: 3, y: 3 })));
    }

    #[test]
    fn test_clone_is_independent() {
        let board = Board::initial(Color::Black);
        let mut copy = board.clone();
        copy.set_cage(0, 0).unwrap();
        assert!(board.piece_at(0, 0).unwrap().is_some());
        assert!(copy.piece_at(0, 0).unwrap().is_none());
    }

    #[test]
    fn test_flip_vertical() {
        let mut board = Board::initial(Color::Black);
        let id = board.identity_at(4, 7).unwrap();
        board.flip_vertical();
        assert_eq!(board.upper(), Color::White);
        assert_eq!(
            board.piece_at(4, 0).unwrap(),
            Some(Piece::new(Color::White, PieceKind::King))
        );
        assert_eq!(board.identity_at(4, 0).unwrap(), id);
        // Upper pieces stay negative after the flip
        assert_eq!(board.code_at(4, 0).unwrap(), -8);
        board.flip_vertical();
        assert_eq!(board, Board::initial(Color::Black));
    }

    #[test]
    fn test_mirror_files_swaps_rook_flags() {
        let mut board = Board::initial(Color::Black);
        board.flags_mut().set_rook_moved(Color::White, RookSide::Left);
        board.mirror_files();
        assert_eq!(
            board.piece_at(3, 7).unwrap(),
            Some(Piece::new(Color::White, PieceKind::King))
        );
        assert!(board.flags().rook_moved(Color::White, RookSide::Right));
        assert!(!board.flags().rook_moved(Color::White, RookSide::Left));
    }

    #[test]
    fn test_orientation_square_names() {
        let standard = Orientation::default();
        assert_eq!(standard.square_name(4, 6), "e2");
        assert_eq!(standard.square_name(0, 0), "a8");
        let rotated = Orientation::new(Color::White, true);
        assert_eq!(rotated.square_name(3, 0), "e1");
        assert_eq!(rotated.from_algebraic(4, 0), (3, 0));
    }

    #[test]
    fn test_orientation_round_trips_every_square() {
        for upper in [Color::Black, Color::White] {
            for mirrored in [false, true] {
                let orientation = Orientation::new(upper, mirrored);
                for y in 0..8 {
                    for x in 0..8 {
                        let (file, rank) = orientation.to_algebraic(x, y);
                        assert!(file < 8 && rank < 8);
                        assert_eq!(orientation.from_algebraic(file, rank), (x, y));
                    }
                }
            }
        }
    }
}
