//! Board state
//!
//! The board owns every block and is the only source of truth for occupancy.
//! There is no cell grid; occupancy is found by scanning blocks.

use std::fmt;

use serde::Serialize;

use super::block::{Block, BlockId, Cell};
use super::validator;
use crate::error::BoardError;

/// The puzzle board
#[derive(Debug, Clone, Serialize)]
pub struct Board {
    grid_size: i32,
    /// Fixed after construction; order is only for stable iteration
    blocks: Vec<Block>,
}

impl Board {
    /// Build a board without checking the blocks against each other.
    ///
    /// Use [`crate::Layout::build`] for configurations from outside the crate;
    /// it rejects overlapping or out-of-bounds blocks.
    pub(crate) fn from_parts(grid_size: i32, blocks: Vec<Block>) -> Self {
        Self { grid_size, blocks }
    }

    /// Cells per side
    pub fn grid_size(&self) -> i32 {
        self.grid_size
    }

    /// Look up a block by id
    pub fn get(&self, id: BlockId) -> Result<&Block, BoardError> {
        self.blocks
            .iter()
            .find(|b| b.id() == id)
            .ok_or(BoardError::NotFound(id))
    }

    /// Every block, in configuration order
    pub fn all(&self) -> &[Block] {
        &self.blocks
    }

    /// Write a position into the board.
    ///
    /// The caller must have validated the move; nothing is checked here.
    pub fn commit(&mut self, id: BlockId, x: i32, y: i32) -> Result<(), BoardError> {
        let block = self
            .blocks
            .iter_mut()
            .find(|b| b.id() == id)
            .ok_or(BoardError::NotFound(id))?;
        block.x = x;
        block.y = y;
        log::info!("Block {} moved to ({}, {})", id, x, y);
        Ok(())
    }

    /// Validate and, if legal, commit. Returns whether the block moved.
    pub fn try_move(&mut self, id: BlockId, x: i32, y: i32) -> Result<bool, BoardError> {
        if !validator::is_valid_move(self, id, x, y)? {
            return Ok(false);
        }
        self.commit(id, x, y)?;
        Ok(true)
    }

    /// The block covering `cell`, if any
    pub fn occupant(&self, cell: Cell) -> Option<BlockId> {
        self.blocks
            .iter()
            .find(|b| b.cells().any(|c| c == cell))
            .map(|b| b.id())
    }
}

/// Text rendering: one row per line, `.` for empty. Ids below 36 print as a
/// base-36 digit, larger ids all print as `#`.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.grid_size {
            for x in 0..self.grid_size {
                let glyph = match self.occupant(Cell::new(x, y)) {
                    Some(id) => char::from_digit(id, 36).unwrap_or('#'),
                    None => '.',
                };
                write!(f, "{}", glyph)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
