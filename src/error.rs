//! Configuration errors
//!
//! The simulation itself never fails; only loading a config can.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PinballError {
    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("board {width}x{height} has no room for a table (need at least {min}x{min})")]
    InvalidBoard { width: i32, height: i32, min: i32 },

    #[error("cell size must be positive and finite, got {0}")]
    InvalidCellSize(f32),
}

pub type Result<T> = std::result::Result<T, PinballError>;
