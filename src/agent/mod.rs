pub mod ai;
pub use ai::{get_move, CancelToken, SearchResult};

pub mod engine;
pub use engine::*;

pub mod native_engine;
pub use native_engine::NativeEngine;

pub mod uci_engine;
pub use uci_engine::UciEngine;

pub mod notation;
pub use notation::{parse_board_square, parse_notation, to_notation};
