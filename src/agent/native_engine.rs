//! Built-in engine backed by the root-parallel alpha-beta search.
//!
//! `start` builds a dedicated rayon pool. Each `get_best_moves` call clones
//! the loaded position and spawns an orchestration job on that pool; the job
//! runs the search (whose per-root-move tasks land on the same pool), waits
//! out the minimum delay and hands the move to the callback.

use std::time::{Duration, Instant};

use rayon::{ThreadPool, ThreadPoolBuilder};

use super::ai::{get_move, CancelToken};
use super::engine::{deliver_best_move, BestMoveCallback, Engine};
use super::notation::to_notation;
use crate::config::EngineConfig;
use crate::error::{EngineError, EngineResult};
use crate::game_repr::Game;

pub struct NativeEngine {
    config: EngineConfig,
    pool: Option<ThreadPool>,
    game: Option<Game>,
    cancel: CancelToken,
}

impl NativeEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            pool: None,
            game: None,
            cancel: CancelToken::new(),
        }
    }

    /// Position loaded by the last `set_fen`.
    pub fn game(&self) -> Option<&Game> {
        self.game.as_ref()
    }

    pub fn is_started(&self) -> bool {
        self.pool.is_some()
    }
}

impl Engine for NativeEngine {
    fn start(&mut self) -> EngineResult<()> {
        if self.pool.is_some() {
            return Ok(());
        }
        let threads = self.config.resolved_threads();
        let pool = ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("chess-search-{i}"))
            .panic_handler(|_| log::error!("engine job panicked"))
            .build()?;
        self.pool = Some(pool);
        self.cancel = CancelToken::new();
        log::debug!("native engine started with {threads} threads");
        Ok(())
    }

    fn set_fen(&mut self, fen: &str) -> EngineResult<()> {
        let game = Game::from_fen_with_orientation(fen, self.config.orientation)?;
        self.game = Some(game);
        Ok(())
    }

    fn get_best_moves(
        &mut self,
        depth: u8,
        on_result: BestMoveCallback,
        min_delay: Duration,
    ) -> EngineResult<()> {
        let started = Instant::now();
        let pool = self.pool.as_ref().ok_or(EngineError::NotStarted)?;
        let game = self.game.clone().ok_or(EngineError::NoPosition)?;
        let cancel = self.cancel.clone();

        pool.spawn(move || {
            let ai_color = game.side_to_move();
            let search = || {
                let result = get_move(&game, depth, ai_color, &cancel);
                if result.is_none() {
                    log::warn!("search for {} produced no move", ai_color.name());
                }
                result.map(|result| to_notation(&game, result.best_move))
            };
            deliver_best_move(search, started, min_delay, &cancel, on_result);
        });
        Ok(())
    }

    fn stop(&mut self) {
        self.cancel.cancel();
        // Running jobs observe the token; the pool threads exit once idle
        if self.pool.take().is_some() {
            log::debug!("native engine stopped");
        }
    }

    fn name(&self) -> &str {
        "Native"
    }
}

impl Drop for NativeEngine {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
