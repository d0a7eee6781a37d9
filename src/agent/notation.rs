//! Conversion between engine moves and coordinate notation ("e2e4", "e7e8q").
//!
//! Squares are named through the game's [`Orientation`](crate::game_repr::Orientation),
//! so the same text means the same square whichever color sits on top.

use crate::error::{EngineError, EngineResult};
use crate::game_repr::{parse_square, Game, Move, PieceKind};

/// `<file><rank><file><rank>`, plus `q` when the move promotes.
///
/// Must be called before the move is played: promotion is read off the
/// piece still standing on the source square.
pub fn to_notation(game: &Game, mv: Move) -> String {
    let orientation = game.orientation();
    let (fx, fy) = mv.from();
    let (tx, ty) = mv.to();
    let mut text = orientation.square_name(fx, fy);
    text.push_str(&orientation.square_name(tx, ty));
    if game.is_promotion(mv) {
        text.push('q');
    }
    text
}

/// Parses coordinate notation into a move and its optional promotion piece.
pub fn parse_notation(game: &Game, text: &str) -> EngineResult<(Move, Option<PieceKind>)> {
    let invalid = || EngineError::InvalidNotation(text.to_string());
    let trimmed = text.trim();
    if !trimmed.is_ascii() || !(4..=5).contains(&trimmed.len()) {
        return Err(invalid());
    }

    let orientation = game.orientation();
    let (from_file, from_rank) = parse_square(&trimmed[0..2]).ok_or_else(invalid)?;
    let (to_file, to_rank) = parse_square(&trimmed[2..4]).ok_or_else(invalid)?;
    let (fx, fy) = orientation.from_algebraic(from_file, from_rank);
    let (tx, ty) = orientation.from_algebraic(to_file, to_rank);

    let promotion = match trimmed[4..].chars().next().map(|c| c.to_ascii_lowercase()) {
        None => None,
        Some('q') => Some(PieceKind::Queen),
        Some('r') => Some(PieceKind::Rook),
        Some('b') => Some(PieceKind::Bishop),
        Some('n') => Some(PieceKind::Knight),
        Some(_) => return Err(invalid()),
    };

    let mv = Move::new(fx as i32, fy as i32, tx as i32, ty as i32)?;
    Ok((mv, promotion))
}

/// Parses a single square name such as "e4" into board coordinates.
pub fn parse_board_square(game: &Game, text: &str) -> EngineResult<(u8, u8)> {
    let (file, rank) =
        parse_square(text.trim()).ok_or_else(|| EngineError::InvalidNotation(text.to_string()))?;
    Ok(game.orientation().from_algebraic(file, rank))
}
