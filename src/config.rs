//! Engine configuration.
//!
//! [`EngineConfig`] carries everything an engine adapter needs besides the
//! position itself: worker count, default search depth, the minimum delay
//! before a result is delivered, and the board orientation used when
//! converting moves to notation.

use std::time::Duration;

use crate::game_repr::Orientation;

/// Search depth presets offered to players.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Difficulty {
    /// One ply: takes hanging pieces, nothing more
    Easy,
    #[default]
    Medium,
    Hard,
    /// Four plies; can take a few seconds in busy middlegames
    Expert,
}

impl Difficulty {
    pub fn all() -> &'static [Difficulty] {
        &[
            Difficulty::Easy,
            Difficulty::Medium,
            Difficulty::Hard,
            Difficulty::Expert,
        ]
    }

    /// Plies searched at this level
    pub fn depth(&self) -> u8 {
        match self {
            Difficulty::Easy => 1,
            Difficulty::Medium => 2,
            Difficulty::Hard => 3,
            Difficulty::Expert => 4,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
            Difficulty::Expert => "Expert",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Worker threads; `None` uses one per logical CPU
    pub threads: Option<usize>,
    pub depth: u8,
    pub min_delay: Duration,
    pub orientation: Orientation,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            threads: None,
            depth: Difficulty::default().depth(),
            min_delay: Duration::ZERO,
            orientation: Orientation::default(),
        }
    }
}

impl EngineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = Some(threads.max(1));
        self
    }

    pub fn with_depth(mut self, depth: u8) -> Self {
        self.depth = depth.max(1);
        self
    }

    pub fn with_difficulty(self, difficulty: Difficulty) -> Self {
        self.with_depth(difficulty.depth())
    }

    pub fn with_min_delay(mut self, min_delay: Duration) -> Self {
        self.min_delay = min_delay;
        self
    }

    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    /// Worker count after resolving the CPU default.
    pub fn resolved_threads(&self) -> usize {
        self.threads.unwrap_or_else(num_cpus::get).max(1)
    }
}
