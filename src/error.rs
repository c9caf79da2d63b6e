use crate::types::Position;

/// Rejected game configuration.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("board size must be even, got {0}")]
    OddBoardSize(usize),

    #[error("board size must be between 4 and 32, got {0}")]
    BoardSizeOutOfRange(usize),
}

/// Rejected placement or turn operation.
///
/// Every variant is side-effect free: the session is left exactly as it was.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum MoveError {
    #[error("game is already over")]
    GameOver,

    #[error("cell ({}, {}) is not empty", .0.row, .0.col)]
    Occupied(Position),

    #[error("placing at ({}, {}) captures nothing", .0.row, .0.col)]
    NoCaptures(Position),

    #[error("no blocks left to place")]
    NoBlocksLeft,

    #[error("a placement was already made this turn")]
    AwaitingTurnAdvance,
}

/// Malformed value coming across the JS boundary.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("invalid player value: {0}")]
    InvalidPlayer(u8),

    #[error("invalid placement mode: {0:?}")]
    InvalidMode(String),
}
