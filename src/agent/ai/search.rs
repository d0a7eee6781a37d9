// Root-parallel alpha-beta search
//
// Every legal root move is searched in its own rayon task on a private clone
// of the game. Scores are collected in root order once all tasks finish and
// the best one wins, the last of equal scores taking precedence.

use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use rayon::prelude::*;

use super::evaluation::evaluate;
use crate::game_repr::{Color, Game, Move, PieceKind};

/// Base score of a checkmate; the remaining depth is added so faster mates win
pub const MATE_SCORE: i32 = 30_000;
const INFINITY: i32 = 1_000_000;

/// Cooperative cancellation flag shared between a search and its owner.
///
/// Checked on entry to every recursive call; a cancelled search returns no result.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Result of a search operation
#[derive(Debug, Clone)]
pub struct SearchResult {
    pub best_move: Move,
    pub score: i32,
    /// Score of every root move that finished, in generation order
    pub scores: Vec<(Move, i32)>,
    pub depth: u8,
    pub nodes: u64,
    pub elapsed: Duration,
}

struct SearchContext<'a> {
    ai_color: Color,
    cancel: &'a CancelToken,
    nodes: &'a AtomicU64,
}

/// Best move for `ai_color` searching `depth` plies (at least one).
///
/// Returns `None` when `ai_color` has no legal move, when every root task
/// failed, or when the search was cancelled.
pub fn get_move(game: &Game, depth: u8, ai_color: Color, cancel: &CancelToken) -> Option<SearchResult> {
    let start = Instant::now();
    let depth = depth.max(1);
    let root = game.clone();

    let moves = root.legal_moves(ai_color);
    if moves.is_empty() {
        log::debug!("no legal moves for {}", ai_color.name());
        return None;
    }

    let nodes = AtomicU64::new(0);
    let ctx = SearchContext {
        ai_color,
        cancel,
        nodes: &nodes,
    };

    let outcomes: Vec<Option<(Move, i32)>> = moves
        .as_slice()
        .par_iter()
        .map(|&mv| {
            score_root_move(mv, || {
                let mut task_game = root.clone();
                task_game.push_move(mv, PieceKind::Queen);
                alpha_beta(&mut task_game, depth - 1, -INFINITY, INFINITY, ai_color.opposite(), &ctx)
            })
        })
        .collect();

    if cancel.is_cancelled() {
        log::debug!("search cancelled after {:?}", start.elapsed());
        return None;
    }

    let scores: Vec<(Move, i32)> = outcomes.into_iter().flatten().collect();
    let (best_move, score) = pick_best(&scores)?;

    let result = SearchResult {
        best_move,
        score,
        scores,
        depth,
        nodes: nodes.load(Ordering::Relaxed),
        elapsed: start.elapsed(),
    };
    log::info!(
        "depth {} best {} score {} nodes {} time {:?}",
        result.depth,
        result.best_move,
        result.score,
        result.nodes,
        result.elapsed
    );
    Some(result)
}

/// Runs one root task in isolation. A panic inside `score` is caught and
/// logged, and the move drops out of the result.
fn score_root_move<F>(mv: Move, score: F) -> Option<(Move, i32)>
where
    F: FnOnce() -> Option<i32>,
{
    match panic::catch_unwind(AssertUnwindSafe(score)) {
        Ok(Some(score)) => {
            log::trace!("root move {mv} scored {score}");
            Some((mv, score))
        }
        Ok(None) => None,
        Err(_) => {
            log::warn!("search task for {mv} panicked; move skipped");
            None
        }
    }
}

/// Maximal score; among equal scores the one seen last wins.
fn pick_best(scores: &[(Move, i32)]) -> Option<(Move, i32)> {
    let mut best: Option<(Move, i32)> = None;
    for &(mv, score) in scores {
        if best.map_or(true, |(_, best_score)| score >= best_score) {
            best = Some((mv, score));
        }
    }
    best
}

/// Fixed-depth minimax with alpha-beta pruning. Maximizes on `ai_color`'s
/// turns and minimizes on the opponent's. `None` means cancelled.
fn alpha_beta(
    game: &mut Game,
    depth: u8,
    mut alpha: i32,
    mut beta: i32,
    color_to_move: Color,
    ctx: &SearchContext<'_>,
) -> Option<i32> {
    if ctx.cancel.is_cancelled() {
        return None;
    }
    ctx.nodes.fetch_add(1, Ordering::Relaxed);

    if depth == 0 {
        return Some(evaluate(game, ctx.ai_color));
    }

    let moves = game.legal_moves(color_to_move);
    if moves.is_empty() {
        if !game.is_in_check(color_to_move) {
            return Some(0);
        }
        let mate = MATE_SCORE + depth as i32;
        return Some(if color_to_move == ctx.ai_color { -mate } else { mate });
    }

    if color_to_move == ctx.ai_color {
        let mut best = -INFINITY;
        for mv in moves {
            game.push_move(mv, PieceKind::Queen);
            let score = alpha_beta(game, depth - 1, alpha, beta, color_to_move.opposite(), ctx);
            game.cancel_move();
            best = best.max(score?);
            alpha = alpha.max(best);
            if beta <= alpha {
                break;
            }
        }
        Some(best)
    } else {
        let mut best = INFINITY;
        for mv in moves {
            game.push_move(mv, PieceKind::Queen);
            let score = alpha_beta(game, depth - 1, alpha, beta, color_to_move.opposite(), ctx);
            game.cancel_move();
            best = best.min(score?);
            beta = beta.min(best);
            if beta <= alpha {
                break;
            }
        }
        Some(best)
    }
}
