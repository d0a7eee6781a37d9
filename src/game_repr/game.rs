use super::board::{check_bounds, Board, Orientation};
use super::fen::{self, parse_fen};
use super::moves::Move;
use super::piece::{Color, PieceKind};
use super::piece_moves::MoveList;
use crate::error::{EngineError, EngineResult, FenError};

/// One undo step: the board before `mv` and whose turn it was.
#[derive(Debug, Clone)]
struct HistoryEntry {
    board: Board,
    mv: Move,
    side_to_move: Color,
}

/// Board plus side to move and undo history.
///
/// Every `make_move` must be balanced by one `cancel_move` when the game is
/// used for speculative search.
#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    side_to_move: Color,
    mirrored: bool,
    history: Vec<HistoryEntry>,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    /// Standard setup, black on top, white to move.
    pub fn new() -> Self {
        Self::with_orientation(Orientation::default())
    }

    pub fn with_orientation(orientation: Orientation) -> Self {
        let mut game = Self::from_board(Board::initial(Color::Black), Color::White);
        game.set_upper_color(orientation.upper);
        game.set_mirrored(orientation.mirrored);
        game
    }

    /// Wraps an already prepared board; history starts empty.
    pub fn from_board(board: Board, side_to_move: Color) -> Self {
        Self {
            board,
            side_to_move,
            mirrored: false,
            history: Vec::new(),
        }
    }

    pub fn from_fen(fen: &str) -> EngineResult<Self> {
        Self::from_fen_with_orientation(fen, Orientation::default())
    }

    pub fn from_fen_with_orientation(fen: &str, orientation: Orientation) -> EngineResult<Self> {
        let parsed = parse_fen(fen)?;
        let mut game = Self::from_board(parsed.board, parsed.side_to_move);

        if let Some((file, rank)) = parsed.en_passant {
            game.synthesize_double_push(file, rank)
                .ok_or_else(|| FenError::EnPassant(fen_square(file, rank)))?;
        }

        game.set_upper_color(orientation.upper);
        game.set_mirrored(orientation.mirrored);
        log::debug!("loaded position {fen}");
        Ok(game)
    }

    /// Records the double push implied by a FEN en passant square, so the
    /// capture is available on the next ply. `parse_fen` has already checked
    /// the square; this works on the standard orientation.
    fn synthesize_double_push(&mut self, file: u8, rank: u8) -> Option<()> {
        let pusher = self.side_to_move.opposite();
        let orientation = Orientation::default();
        let (x, target_y) = orientation.from_algebraic(file, rank);
        let step = self.board.pawn_direction(pusher) as i32;
        let origin_y = target_y as i32 - step;
        let land_y = target_y as i32 + step;

        let mv = Move::new(x as i32, origin_y, x as i32, land_y).ok()?;
        let mut before = self.board.clone();
        before.relocate(x as i32, land_y, x as i32, origin_y).ok()?;
        self.history.push(HistoryEntry {
            board: before,
            mv,
            side_to_move: pusher,
        });
        Some(())
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Direct board access for position setup. History is left untouched.
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    pub fn set_side_to_move(&mut self, color: Color) {
        self.side_to_move = color;
    }

    pub fn orientation(&self) -> Orientation {
        Orientation::new(self.board.upper(), self.mirrored)
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Move that produced the current board, if any.
    pub fn last_move(&self) -> Option<Move> {
        self.history.last().map(|entry| entry.mv)
    }

    /// Puts `color` on rows 0 and 1, flipping the board and the history.
    pub fn set_upper_color(&mut self, color: Color) {
        if self.board.upper() == color {
            return;
        }
        self.board.flip_vertical();
        for entry in &mut self.history {
            entry.board.flip_vertical();
            entry.mv = entry.mv.flipped_rows();
        }
    }

    /// Switches between the king-on-column-4 and king-on-column-3 layouts.
    pub fn set_mirrored(&mut self, mirrored: bool) {
        if self.mirrored == mirrored {
            return;
        }
        self.mirrored = mirrored;
        self.board.mirror_files();
        for entry in &mut self.history {
            entry.board.mirror_files();
            entry.mv = entry.mv.mirrored_files();
        }
    }

    /// Legal moves of the piece on (x, y); an empty square yields none.
    pub fn get_moves(&self, x: i32, y: i32) -> EngineResult<MoveList> {
        let (x, y) = check_bounds(x, y)?;
        let mut moves = MoveList::new();
        self.legal_moves_into(x, y, &mut moves);
        Ok(moves)
    }

    /// Appends the legal moves of the piece on (x, y).
    pub(crate) fn legal_moves_into(&self, x: u8, y: u8, moves: &mut MoveList) {
        let Some(piece) = self.board.piece(x, y) else {
            return;
        };
        let mut candidates = MoveList::new();
        self.board
            .pseudo_moves_into(x, y, self.last_move(), true, &mut candidates);
        moves.extend(
            candidates
                .into_iter()
                .filter(|&mv| self.keeps_king_safe(mv, piece.color)),
        );
    }

    /// Self-check filter: plays `mv` on a stack copy and tests the king.
    fn keeps_king_safe(&self, mv: Move, color: Color) -> bool {
        let mut scratch = self.board.clone();
        scratch.apply_move(mv, PieceKind::Queen);
        match scratch.find_king(color) {
            Some((kx, ky)) => !scratch.is_square_attacked(kx, ky, color.opposite()),
            None => true,
        }
    }

    /// All legal moves of `color`, row by row.
    pub fn legal_moves(&self, color: Color) -> MoveList {
        let mut moves = MoveList::new();
        for (x, y, piece) in self.board.pieces() {
            if piece.color == color {
                self.legal_moves_into(x, y, &mut moves);
            }
        }
        moves
    }

    pub fn is_legal(&self, mv: Move) -> bool {
        let (x, y) = mv.from();
        let mut moves = MoveList::new();
        self.legal_moves_into(x, y, &mut moves);
        moves.contains(&mv)
    }

    pub fn has_legal_moves(&self, color: Color) -> bool {
        let mut moves = MoveList::new();
        for (x, y, piece) in self.board.pieces() {
            if piece.color == color {
                self.legal_moves_into(x, y, &mut moves);
                if !moves.is_empty() {
                    return true;
                }
            }
        }
        false
    }

    /// Plays `mv`, promoting to a queen.
    pub fn make_move(&mut self, mv: Move) -> EngineResult<()> {
        self.make_move_with_promotion(mv, PieceKind::Queen)
    }

    pub fn make_move_with_promotion(&mut self, mv: Move, promotion: PieceKind) -> EngineResult<()> {
        let (fx, fy) = mv.from();
        if self.board.piece(fx, fy).is_none() {
            return Err(EngineError::NoPiece { x: fx, y: fy });
        }
        if matches!(promotion, PieceKind::Pawn | PieceKind::King) {
            return Err(EngineError::InvalidPromotion(promotion.name()));
        }
        self.push_move(mv, promotion);
        Ok(())
    }

    /// Search-side make: the move comes from the generator, so no checks.
    pub(crate) fn push_move(&mut self, mv: Move, promotion: PieceKind) {
        self.history.push(HistoryEntry {
            board: self.board.clone(),
            mv,
            side_to_move: self.side_to_move,
        });
        self.board.apply_move(mv, promotion);
        self.side_to_move = self.side_to_move.opposite();
    }

    /// Rewinds one move. Returns `None` and changes nothing on empty history.
    pub fn cancel_move(&mut self) -> Option<Move> {
        let entry = self.history.pop()?;
        self.board = entry.board;
        self.side_to_move = entry.side_to_move;
        Some(entry.mv)
    }

    /// True iff a king stands on (x, y) and an enemy piece attacks it.
    pub fn is_check_king(&self, x: i32, y: i32) -> EngineResult<bool> {
        let (x, y) = check_bounds(x, y)?;
        Ok(match self.board.piece(x, y) {
            Some(piece) if piece.kind == PieceKind::King => {
                self.board.is_square_attacked(x, y, piece.color.opposite())
            }
            _ => false,
        })
    }

    pub fn is_in_check(&self, color: Color) -> bool {
        self.board
            .find_king(color)
            .is_some_and(|(x, y)| self.board.is_square_attacked(x, y, color.opposite()))
    }

    pub fn is_checkmate(&self, color: Color) -> bool {
        self.is_in_check(color) && !self.has_legal_moves(color)
    }

    pub fn is_stalemate(&self, color: Color) -> bool {
        !self.is_in_check(color) && !self.has_legal_moves(color)
    }

    /// Game over: a side without legal moves, or two pieces left.
    pub fn is_finish(&self) -> bool {
        self.board.occupied_count() <= 2
            || !self.has_legal_moves(Color::White)
            || !self.has_legal_moves(Color::Black)
    }

    /// A pawn move that lands on the mover's promotion row.
    pub fn is_promotion(&self, mv: Move) -> bool {
        let (fx, fy) = mv.from();
        match self.board.piece(fx, fy) {
            Some(piece) => piece.kind == PieceKind::Pawn && mv.to_y() == self.board.promotion_row(piece.color),
            None => false,
        }
    }

    /// Counts legal move paths of length `depth` (promotions to queen only).
    pub fn perft(&self, depth: u32) -> u64 {
        if depth == 0 {
            return 1;
        }
        let moves = self.legal_moves(self.side_to_move);
        if depth == 1 {
            return moves.len() as u64;
        }

        let mut game = self.clone();
        let mut nodes = 0;
        for mv in moves {
            game.push_move(mv, PieceKind::Queen);
            nodes += game.perft(depth - 1);
            game.cancel_move();
        }
        nodes
    }

    pub fn to_fen(&self) -> String {
        fen::to_fen(self)
    }
}

fn fen_square(file: u8, rank: u8) -> String {
    format!("{}{}", (b'a' + file) as char, rank + 1)
}
