//! Board state and move validation
//!
//! Everything the puzzle guarantees lives here. This module must stay pure:
//! - No rendering or platform dependencies
//! - Validation never mutates
//! - Only `Board::commit` moves a block

pub mod block;
pub mod state;
pub mod validator;

pub use block::{Block, BlockId, Cell, Orientation};
pub use state::Board;
pub use validator::{Placement, check, is_valid, is_valid_move};
