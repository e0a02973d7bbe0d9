//! Error types for the tictac crate

use thiserror::Error;

use crate::tictactoe::Player;

/// Main error type for the tictac crate
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("illegal move: unknown player symbol '{symbol}' (expected 'X' or 'O')")]
    UnknownPlayer { symbol: char },

    #[error("illegal move: {player} moved last and cannot move twice in a row")]
    OutOfTurn { player: Player },

    #[error("illegal move: position {position} is already occupied")]
    Occupied { position: usize },

    #[error("illegal move: position {position} is out of bounds (must be 0-8)")]
    InvalidPosition { position: usize },

    #[error("game already over")]
    GameOver,

    #[error("no legal moves available")]
    NoValidMoves,

    #[error("board string has wrong length: expected {expected} cells, got {got} in '{context}'")]
    InvalidBoardLength {
        expected: usize,
        got: usize,
        context: String,
    },

    #[error("invalid character '{character}' at position {position} in '{context}'")]
    InvalidCellCharacter {
        character: char,
        position: usize,
        context: String,
    },

    #[error("invalid piece counts: X={x_count}, O={o_count} (must differ by at most one)")]
    InvalidPieceCounts { x_count: usize, o_count: usize },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("opponent '{opponent}' broke the move contract: {context}")]
    OpponentContract { opponent: String, context: String },

    #[error("failed to {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("progress bar template error: {message}")]
    ProgressBarTemplate { message: String },
}

impl Error {
    /// Whether this error is one of the illegal-move kinds raised by move verification
    pub fn is_illegal_move(&self) -> bool {
        matches!(
            self,
            Error::UnknownPlayer { .. }
                | Error::OutOfTurn { .. }
                | Error::Occupied { .. }
                | Error::InvalidPosition { .. }
        )
    }
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io {
            operation: "IO operation".to_string(),
            source,
        }
    }
}
