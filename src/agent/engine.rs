//! Engine trait: the seam between callers and a move source.
//!
//! Callers drive every backend through the same four calls:
//!
//! 1. [`Engine::start`] allocates search resources (worker pool, child process)
//! 2. [`Engine::set_fen`] loads the position to search
//! 3. [`Engine::get_best_moves`] starts an asynchronous search; the callback
//!    receives the best move in coordinate notation, never sooner than
//!    `min_delay` after the call
//! 4. [`Engine::stop`] cancels any running search and releases resources
//!
//! Search failures are not reported through the callback. A failed,
//! cancelled or panicking search is logged and the callback is simply
//! never invoked; the caller owns any timeout or fallback.
//!
//! # Examples
//!
//! ```no_run
//! use chess_core::agent::{Engine, EngineKind};
//! use chess_core::config::EngineConfig;
//! use std::time::Duration;
//!
//! let mut engine = EngineKind::Native.create(&EngineConfig::default());
//! engine.start().unwrap();
//! engine.set_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1").unwrap();
//! engine
//!     .get_best_moves(2, Box::new(|mv| println!("{mv}")), Duration::from_millis(300))
//!     .unwrap();
//! ```

use std::panic::{self, AssertUnwindSafe};
use std::path::PathBuf;
use std::time::{Duration, Instant};

use super::ai::CancelToken;
use super::native_engine::NativeEngine;
use super::uci_engine::UciEngine;
use crate::config::EngineConfig;
use crate::error::EngineResult;

/// Receives the best move in coordinate notation.
pub type BestMoveCallback = Box<dyn FnOnce(String) + Send + 'static>;

pub trait Engine: Send {
    fn start(&mut self) -> EngineResult<()>;

    fn set_fen(&mut self, fen: &str) -> EngineResult<()>;

    /// Starts a search and returns immediately.
    ///
    /// Errors only for calls made out of order (no `start`, no position);
    /// everything that goes wrong during the search itself is swallowed.
    fn get_best_moves(
        &mut self,
        depth: u8,
        on_result: BestMoveCallback,
        min_delay: Duration,
    ) -> EngineResult<()>;

    fn stop(&mut self);

    fn name(&self) -> &str;
}

/// Enumeration of available move sources
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum EngineKind {
    /// Built-in root-parallel alpha-beta search
    #[default]
    Native,
    /// External engine process speaking a minimal UCI subset
    Uci(PathBuf),
}

impl EngineKind {
    pub fn display_name(&self) -> &'static str {
        match self {
            EngineKind::Native => "Native",
            EngineKind::Uci(_) => "UCI",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            EngineKind::Native => "Fixed-depth minimax with alpha-beta pruning",
            EngineKind::Uci(_) => "Third-party engine driven over stdin/stdout",
        }
    }

    /// Create an engine for this kind, not yet started
    pub fn create(&self, config: &EngineConfig) -> Box<dyn Engine> {
        match self {
            EngineKind::Native => Box::new(NativeEngine::new(config.clone())),
            EngineKind::Uci(path) => Box::new(UciEngine::new(path.clone(), config.clone())),
        }
    }
}

/// Sleeps out whatever is left of `min_delay` since `started`.
pub(crate) fn wait_out(started: Instant, min_delay: Duration) {
    let remaining = min_delay.saturating_sub(started.elapsed());
    if !remaining.is_zero() {
        std::thread::sleep(remaining);
    }
}

/// Body of a background search job.
///
/// Runs `search` with panics caught, waits out `min_delay` and hands the move
/// to `on_result` unless the search failed or `cancel` fired meanwhile.
/// Returns whether the callback ran.
pub(crate) fn deliver_best_move<F>(
    search: F,
    started: Instant,
    min_delay: Duration,
    cancel: &CancelToken,
    on_result: BestMoveCallback,
) -> bool
where
    F: FnOnce() -> Option<String>,
{
    let notation = match panic::catch_unwind(AssertUnwindSafe(search)) {
        Ok(Some(notation)) => notation,
        Ok(None) => return false,
        Err(_) => {
            log::error!("search job panicked");
            return false;
        }
    };

    wait_out(started, min_delay);
    if cancel.is_cancelled() {
        log::debug!("engine stopped; dropping {notation}");
        return false;
    }
    on_result(notation);
    true
}
