//! Error types for the rules engine, FEN codec and engine adapters.

use thiserror::Error;

/// Reasons a FEN string is rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FenError {
    #[error("empty FEN string")]
    Empty,

    #[error("expected 8 ranks, found {0}")]
    RankCount(usize),

    #[error("rank {rank} covers {files} files (must be 8)")]
    RankWidth { rank: usize, files: usize },

    #[error("unknown character '{0}' in piece placement")]
    UnknownPiece(char),

    #[error("invalid side to move '{0}' (expected 'w' or 'b')")]
    SideToMove(String),

    #[error("invalid castling letter '{0}'")]
    CastlingLetter(char),

    #[error("castling letter '{0}' appears more than once")]
    DuplicateCastling(char),

    #[error("invalid en passant square '{0}'")]
    EnPassant(String),

    #[error("invalid move counter '{0}'")]
    Counter(String),

    #[error("unexpected trailing field '{0}'")]
    TrailingField(String),

    #[error("{color} must have exactly one king, found {count}")]
    KingCount { color: &'static str, count: usize },
}

/// Errors surfaced by the engine core.
#[derive(Error, Debug)]
pub enum EngineError {
    /// Coordinate outside the playable 8x8 area
    #[error("square ({x}, {y}) is outside the board")]
    OutOfBounds { x: i32, y: i32 },

    /// Mutation entry point called with a value it must not accept
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("invalid FEN: {0}")]
    InvalidFen(#[from] FenError),

    #[error("invalid move notation '{0}'")]
    InvalidNotation(String),

    /// No piece on the source square of a move
    #[error("no piece at ({x}, {y})")]
    NoPiece { x: u8, y: u8 },

    #[error("cannot promote to {0}")]
    InvalidPromotion(&'static str),

    /// `start()` has not been called, or `stop()` released the engine
    #[error("engine is not started")]
    NotStarted,

    /// No position was loaded with `set_fen()`
    #[error("no position loaded")]
    NoPosition,

    /// Failure talking to an external engine process
    #[error("engine process error: {0}")]
    Process(#[from] std::io::Error),

    #[error("failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

pub type EngineResult<T> = Result<T, EngineError>;
