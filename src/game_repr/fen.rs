//! FEN reading and writing.
//!
//! Parsing always produces a board in the standard orientation (black on
//! row 0, files unmirrored); [`Game`] re-orients afterwards.

use super::board::{Board, RookSide};
use super::game::Game;
use super::piece::{Color, Piece, PieceKind};
use crate::error::FenError;

pub const STARTING_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Result of parsing a FEN string.
#[derive(Debug, Clone)]
pub struct ParsedFen {
    pub board: Board,
    pub side_to_move: Color,
    /// En passant target as (file, rank), both 0-based
    pub en_passant: Option<(u8, u8)>,
}

/// Checks a FEN string without keeping the result.
pub fn validate_fen(fen: &str) -> Result<(), FenError> {
    parse_fen(fen).map(|_| ())
}

pub fn parse_fen(fen: &str) -> Result<ParsedFen, FenError> {
    let fields: Vec<&str> = fen.split_whitespace().collect();
    let placement = fields.first().ok_or(FenError::Empty)?;

    let mut board = Board::empty(Color::Black);
    parse_placement(placement, &mut board)?;

    for color in [Color::White, Color::Black] {
        let count = board
            .pieces()
            .filter(|(_, _, p)| p.kind == PieceKind::King && p.color == color)
            .count();
        if count != 1 {
            return Err(FenError::KingCount { color: color.name(), count });
        }
    }

    let side_to_move = match fields.get(1).copied().unwrap_or("w") {
        "w" => Color::White,
        "b" => Color::Black,
        other => return Err(FenError::SideToMove(other.to_string())),
    };

    parse_castling(fields.get(2).copied().unwrap_or("-"), &mut board)?;

    // A king away from e1 / e8 has lost castling whatever the field says
    for (color, y) in [(Color::White, 7u8), (Color::Black, 0u8)] {
        if board.piece(4, y) != Some(Piece::new(color, PieceKind::King)) {
            board.flags_mut().set_king_moved(color);
        }
    }

    let en_passant = match fields.get(3).copied() {
        None | Some("-") => None,
        Some(square) => {
            let invalid = || FenError::EnPassant(square.to_string());
            let (file, rank) = parse_square(square).ok_or_else(invalid)?;
            if !en_passant_consistent(&board, side_to_move, file, rank) {
                return Err(invalid());
            }
            Some((file, rank))
        }
    };

    for counter in fields.iter().skip(4).take(2) {
        if counter.parse::<u32>().is_err() {
            return Err(FenError::Counter(counter.to_string()));
        }
    }

    if let Some(extra) = fields.get(6) {
        return Err(FenError::TrailingField(extra.to_string()));
    }

    Ok(ParsedFen {
        board,
        side_to_move,
        en_passant,
    })
}

fn parse_placement(placement: &str, board: &mut Board) -> Result<(), FenError> {
    let ranks: Vec<&str> = placement.split('/').collect();
    if ranks.len() != 8 {
        return Err(FenError::RankCount(ranks.len()));
    }

    // Rank 8 comes first and lands on row 0
    for (y, rank) in ranks.iter().enumerate() {
        let mut files = 0usize;
        for c in rank.chars() {
            match c {
                '1'..='8' => files += c as usize - '0' as usize,
                _ => {
                    let piece = Piece::from_char(c).ok_or(FenError::UnknownPiece(c))?;
                    if files < 8 {
                        board.place(files as u8, y as u8, piece);
                    }
                    files += 1;
                }
            }
            if files > 8 {
                return Err(FenError::RankWidth { rank: 8 - y, files });
            }
        }
        if files != 8 {
            return Err(FenError::RankWidth { rank: 8 - y, files });
        }
    }
    Ok(())
}

/// Every castling letter that is absent marks its rook as moved.
fn parse_castling(field: &str, board: &mut Board) -> Result<(), FenError> {
    let mut seen = [false; 4];
    if field != "-" {
        for c in field.chars() {
            let slot = match c {
                'K' => 0,
                'Q' => 1,
                'k' => 2,
                'q' => 3,
                _ => return Err(FenError::CastlingLetter(c)),
            };
            if seen[slot] {
                return Err(FenError::DuplicateCastling(c));
            }
            seen[slot] = true;
        }
    }

    let rights = [
        (Color::White, RookSide::Right),
        (Color::White, RookSide::Left),
        (Color::Black, RookSide::Right),
        (Color::Black, RookSide::Left),
    ];
    for (present, (color, side)) in seen.iter().zip(rights) {
        if !present {
            board.flags_mut().set_rook_moved(color, side);
        }
    }
    Ok(())
}

/// The square must sit behind a pawn of the side that just moved, with the
/// square itself and the pawn's start square both empty.
pub(crate) fn en_passant_consistent(board: &Board, side_to_move: Color, file: u8, rank: u8) -> bool {
    let pusher = side_to_move.opposite();
    // (target rank, landing rank, origin rank), standard orientation rows
    let (target, landed, origin) = match pusher {
        Color::White => (2u8, 3u8, 1u8),
        Color::Black => (5, 4, 6),
    };
    if rank != target {
        return false;
    }
    let x = file;
    board.piece(x, 7 - landed) == Some(Piece::new(pusher, PieceKind::Pawn))
        && board.piece(x, 7 - origin).is_none()
        && board.piece(x, 7 - target).is_none()
}

/// "e3" -> (4, 2)
pub(crate) fn parse_square(square: &str) -> Option<(u8, u8)> {
    let bytes = square.as_bytes();
    if bytes.len() != 2 {
        return None;
    }
    let (file, rank) = (bytes[0], bytes[1]);
    if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&rank) {
        return None;
    }
    Some((file - b'a', rank - b'1'))
}

pub fn to_fen(game: &Game) -> String {
    let board = game.board();
    let orientation = game.orientation();
    let mut fen = String::new();

    for rank in (0..8u8).rev() {
        let mut empty = 0;
        for file in 0..8u8 {
            let (x, y) = orientation.from_algebraic(file, rank);
            match board.piece(x, y) {
                Some(piece) => {
                    if empty > 0 {
                        fen.push_str(&empty.to_string());
                        empty = 0;
                    }
                    fen.push(piece.to_char());
                }
                None => empty += 1,
            }
        }
        if empty > 0 {
            fen.push_str(&empty.to_string());
        }
        if rank > 0 {
            fen.push('/');
        }
    }

    fen.push(' ');
    fen.push(match game.side_to_move() {
        Color::White => 'w',
        Color::Black => 'b',
    });

    let mut castling = String::new();
    for (color, home_rank) in [(Color::White, 0u8), (Color::Black, 7u8)] {
        let (kx, ky) = orientation.from_algebraic(4, home_rank);
        let king_home = board.piece(kx, ky) == Some(Piece::new(color, PieceKind::King));
        if !king_home || board.flags().king_moved(color) {
            continue;
        }
        // Kingside (file h) first, then queenside (file a)
        for (rook_file, letter) in [(7u8, 'k'), (0u8, 'q')] {
            let (rx, ry) = orientation.from_algebraic(rook_file, home_rank);
            let Some(side) = RookSide::from_file(rx) else {
                continue;
            };
            let rook_home = board.piece(rx, ry) == Some(Piece::new(color, PieceKind::Rook));
            if rook_home && !board.flags().rook_moved(color, side) {
                castling.push(match color {
                    Color::White => letter.to_ascii_uppercase(),
                    Color::Black => letter,
                });
            }
        }
    }
    if castling.is_empty() {
        castling.push('-');
    }
    fen.push(' ');
    fen.push_str(&castling);

    let en_passant = game.last_move().and_then(|mv| {
        let (fx, fy) = mv.from();
        let (tx, ty) = mv.to();
        let pawn = matches!(board.piece(tx, ty), Some(p) if p.kind == PieceKind::Pawn);
        (pawn && fx == tx && fy.abs_diff(ty) == 2).then(|| orientation.square_name(tx, (fy + ty) / 2))
    });
    fen.push(' ');
    fen.push_str(en_passant.as_deref().unwrap_or("-"));

    fen.push_str(" 0 1");
    fen
}
