//! Error type shared by the engine, the playback controller and the WASM surface.

use thiserror::Error;

/// Caller-input errors. None of them leave the engine partially mutated.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum LifeError {
    #[error("grid dimensions must be positive, got {width}x{height}")]
    InvalidDimension { width: i64, height: i64 },

    #[error("cell ({x}, {y}) is outside the {width}x{height} grid")]
    OutOfBounds {
        x: i32,
        y: i32,
        width: usize,
        height: usize,
    },

    #[error("fill probability must be within [0, 1], got {0}")]
    InvalidProbability(f64),

    #[error("playback interval must be at least 1 ms")]
    InvalidSpeed,

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("player task is no longer running")]
    PlayerClosed,
}

impl From<serde_json::Error> for LifeError {
    fn from(e: serde_json::Error) -> Self {
        Self::Config(e.to_string())
    }
}
