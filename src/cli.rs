use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[clap(author, version, about)]
pub struct Cli {
    #[clap(subcommand)]
    pub subcommand: Subcommands,
}

#[derive(Subcommand)]
pub enum Subcommands {
    /// Search a position and print the best move in coordinate notation
    Bestmove {
        /// Position to search; the standard starting position when omitted
        #[clap(long, value_name = "FEN")]
        fen: Option<String>,
        /// Plies to search
        #[clap(short, long, default_value = "3")]
        depth: u8,
        /// Worker threads; one per logical CPU when omitted
        #[clap(short, long)]
        threads: Option<usize>,
        /// Do not report the move sooner than this
        #[clap(long, value_name = "MS", default_value = "0")]
        min_delay_ms: u64,
        /// Drive an external UCI engine instead of the built-in search
        #[clap(long, value_name = "PATH")]
        uci: Option<PathBuf>,
        /// Give up waiting for the engine after this many seconds
        #[clap(long, value_name = "SECS", default_value = "60")]
        timeout: u64,
    },
    /// List the legal moves of the piece on a square
    Moves {
        #[clap(long, value_name = "FEN")]
        fen: Option<String>,
        /// Square name, e.g. "e2"
        #[clap(short, long)]
        square: String,
    },
    /// Count leaf nodes of the legal move tree
    Perft {
        #[clap(long, value_name = "FEN")]
        fen: Option<String>,
        #[clap(short, long, default_value = "4")]
        depth: u32,
        /// Print the node count below every root move
        #[clap(long)]
        divide: bool,
    },
}
