//! Chess rules engine with a root-parallel alpha-beta search and pluggable
//! engine adapters.
//!
//! - [`game_repr`]: board, move generation, legality, FEN and game history
//! - [`agent::ai`]: evaluation and the fixed-depth search
//! - [`agent`]: the [`Engine`](agent::Engine) trait with native and UCI backends

pub mod agent;
pub mod config;
pub mod error;
pub mod game_repr;

pub use config::{Difficulty, EngineConfig};
pub use error::{EngineError, EngineResult, FenError};
