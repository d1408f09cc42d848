//! Slide Blocks - a sliding-block puzzle board
//!
//! Core modules:
//! - `board`: Block positions and move validation (pure, no rendering)
//! - `layout`: Initial block configurations (JSON or built-in)
//! - `interaction`: Pointer-to-cell conversion and the drag controller
//! - `config`: Runtime configuration
//! - `error`: Error types

pub mod board;
pub mod config;
pub mod error;
pub mod interaction;
pub mod layout;

pub use board::{Block, BlockId, Board, Cell, Orientation, Placement};
pub use config::PuzzleConfig;
pub use error::{BoardError, ConfigError, LayoutError};
pub use interaction::{BoardView, DragController};
pub use layout::{Layout, Tint};

/// Board configuration constants
pub mod consts {
    /// Cells per side of the classic board
    pub const GRID_SIZE: i32 = 6;
    /// Rendered size of one cell in CSS pixels
    pub const CELL_PX: f32 = 50.0;
}
