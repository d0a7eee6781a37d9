// AI - root-parallel minimax with alpha-beta pruning
//
// Key features:
// - Deterministic (same position and depth always give the same move)
// - One rayon task per root move, each on its own clone of the game
// - Static evaluation: material plus piece-square tables
// - Cooperative cancellation checked at every node

mod evaluation;
mod piece_square_tables;
mod search;

pub use evaluation::{evaluate, piece_value};
pub use search::{get_move, CancelToken, SearchResult, MATE_SCORE};
