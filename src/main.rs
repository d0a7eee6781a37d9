mod cli;

use std::time::{Duration, Instant};

use anyhow::{anyhow, bail, Context};
use chess_core::agent::{parse_board_square, to_notation, EngineKind};
use chess_core::game_repr::{Game, STARTING_FEN};
use chess_core::EngineConfig;
use clap::Parser;
use crossbeam_channel::bounded;

use cli::{Cli, Subcommands};

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match cli.subcommand {
        Subcommands::Bestmove {
            fen,
            depth,
            threads,
            min_delay_ms,
            uci,
            timeout,
        } => bestmove(
            fen.as_deref().unwrap_or(STARTING_FEN),
            depth,
            threads,
            Duration::from_millis(min_delay_ms),
            uci.map_or(EngineKind::Native, EngineKind::Uci),
            Duration::from_secs(timeout),
        ),
        Subcommands::Moves { fen, square } => moves(fen.as_deref().unwrap_or(STARTING_FEN), &square),
        Subcommands::Perft { fen, depth, divide } => {
            perft(fen.as_deref().unwrap_or(STARTING_FEN), depth, divide)
        }
    }
}

fn bestmove(
    fen: &str,
    depth: u8,
    threads: Option<usize>,
    min_delay: Duration,
    kind: EngineKind,
    timeout: Duration,
) -> anyhow::Result<()> {
    let mut config = EngineConfig::new().with_depth(depth).with_min_delay(min_delay);
    if let Some(threads) = threads {
        config = config.with_threads(threads);
    }

    let mut engine = kind.create(&config);
    engine
        .start()
        .with_context(|| format!("starting {} engine", kind.display_name()))?;
    engine.set_fen(fen).context("loading position")?;

    let (tx, rx) = bounded(1);
    engine.get_best_moves(
        config.depth,
        Box::new(move |mv| {
            let _ = tx.send(mv);
        }),
        config.min_delay,
    )?;

    // The callback never fires when the side to move has no legal move
    let result = rx.recv_timeout(timeout);
    engine.stop();
    match result {
        Ok(mv) => {
            println!("bestmove {mv}");
            Ok(())
        }
        Err(_) => bail!("no move within {}s", timeout.as_secs()),
    }
}

fn moves(fen: &str, square: &str) -> anyhow::Result<()> {
    let game = Game::from_fen(fen)?;
    let (x, y) = parse_board_square(&game, square)?;
    let piece = game
        .board()
        .piece_at(x as i32, y as i32)?
        .ok_or_else(|| anyhow!("no piece on {square}"))?;
    let moves = game.get_moves(x as i32, y as i32)?;
    let names: Vec<String> = moves.iter().map(|mv| to_notation(&game, *mv)).collect();
    println!("{} {} on {square}: {}", piece.color.name(), piece.kind.name(), names.join(" "));
    Ok(())
}

fn perft(fen: &str, depth: u32, divide: bool) -> anyhow::Result<()> {
    let mut game = Game::from_fen(fen)?;
    let started = Instant::now();
    let nodes = if divide && depth > 0 {
        let mut total = 0;
        for mv in game.legal_moves(game.side_to_move()) {
            let name = to_notation(&game, mv);
            game.make_move(mv)?;
            let count = game.perft(depth - 1);
            game.cancel_move();
            println!("{name}: {count}");
            total += count;
        }
        total
    } else {
        game.perft(depth)
    };
    let elapsed = started.elapsed();
    log::info!("perft({depth}) finished in {elapsed:?}");
    println!("{nodes}");
    Ok(())
}
