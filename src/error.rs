use std::path::PathBuf;

use thiserror::Error;

/// Rejected construction input. Raised when a game is set up, never mid-game.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("grid size {0} gives an odd number of cards")]
    OddGridSize(u8),

    #[error("grid size {0} is not supported (expected 4, 6 or 8)")]
    UnsupportedGridSize(u8),

    #[error("identity pool holds {available} faces but {required} pairs are needed")]
    PoolTooSmall { required: usize, available: usize },

    #[error("identity pool contains {0} more than once")]
    DuplicateFace(String),

    #[error("card face {face} appears {count} times, expected exactly 2")]
    UnpairedFace { face: String, count: usize },

    #[error("deck holds {actual} cards but the grid needs {expected}")]
    DeckSizeMismatch { expected: usize, actual: usize },

    #[error("unknown level '{0}'")]
    UnknownLevel(String),

    #[error("unknown display mode '{0}'")]
    UnknownMode(String),

    #[error("{0} must be longer than zero")]
    ZeroDuration(&'static str),
}

#[derive(Debug, Error)]
pub enum PreferencesError {
    #[error("failed to access preferences at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed preferences: {0}")]
    Json(#[from] serde_json::Error),
}
