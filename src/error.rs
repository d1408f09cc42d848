//! Error types
//!
//! Rejected moves are not errors: the validator answers them with `false`.

use crate::board::{BlockId, Cell};

/// Errors from board lookups and mutations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("no block with id {0}")]
    NotFound(BlockId),
}

/// Errors that make a layout unusable as a starting board.
#[derive(Debug, thiserror::Error)]
pub enum LayoutError {
    #[error("failed to parse layout JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("grid size must be > 0")]
    EmptyGrid,

    #[error("block {id} has zero length")]
    ZeroLength { id: BlockId },

    #[error("block id {0} is used more than once")]
    DuplicateId(BlockId),

    #[error("block {id} does not fit inside the grid")]
    OutOfBounds { id: BlockId },

    #[error("blocks {first} and {second} overlap at {cell}")]
    Overlap {
        first: BlockId,
        second: BlockId,
        cell: Cell,
    },
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to parse config JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("config validation error: {0}")]
    Validation(String),

    #[error("invalid layout: {0}")]
    Layout(#[from] LayoutError),
}
