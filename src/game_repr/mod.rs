mod board;
mod fen;
mod game;
mod moves;
mod piece;
mod piece_moves;

#[cfg(test)]
mod tests;

pub use board::*;
pub use fen::{parse_fen, to_fen, validate_fen, ParsedFen, STARTING_FEN};
pub(crate) use fen::parse_square;
pub use game::*;
pub use moves::*;
pub use piece::*;
pub use piece_moves::MoveList;
