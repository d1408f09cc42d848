//! Initial block configurations
//!
//! A layout is the only data the puzzle takes from outside: the grid size and
//! a list of blocks with their starting positions. Building a board from a
//! layout checks every board invariant up front.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::board::{Block, BlockId, Board, Cell, Orientation};
use crate::consts::GRID_SIZE;
use crate::error::LayoutError;

/// Presentation color of a block (CSS class on the web)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tint {
    Green,
    Red,
    Blue,
}

impl Tint {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tint::Green => "green",
            Tint::Red => "red",
            Tint::Blue => "blue",
        }
    }

    /// Color used when a layout doesn't name one
    pub fn default_for(orientation: Orientation) -> Self {
        match orientation {
            Orientation::Horizontal => Tint::Green,
            Orientation::Vertical => Tint::Red,
        }
    }
}

/// One block's starting state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockSpec {
    pub id: BlockId,
    pub orientation: Orientation,
    pub length: u32,
    pub x: i32,
    pub y: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tint: Option<Tint>,
}

impl BlockSpec {
    fn new(id: BlockId, tint: Tint, length: u32, x: i32, y: i32) -> Self {
        let orientation = match tint {
            Tint::Green | Tint::Blue => Orientation::Horizontal,
            Tint::Red => Orientation::Vertical,
        };
        Self {
            id,
            orientation,
            length,
            x,
            y,
            tint: Some(tint),
        }
    }

    pub fn tint(&self) -> Tint {
        self.tint.unwrap_or_else(|| Tint::default_for(self.orientation))
    }

    fn to_block(&self) -> Block {
        Block::new(self.id, self.orientation, self.length, self.x, self.y)
    }
}

/// A full starting configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layout {
    #[serde(default = "default_grid_size")]
    pub grid_size: i32,
    pub blocks: Vec<BlockSpec>,
}

fn default_grid_size() -> i32 {
    GRID_SIZE
}

impl Default for Layout {
    fn default() -> Self {
        Self::classic()
    }
}

impl Layout {
    /// The built-in 6x6 puzzle: green and blue slide sideways, red up and down
    pub fn classic() -> Self {
        use Tint::*;
        Self {
            grid_size: GRID_SIZE,
            blocks: vec![
                BlockSpec::new(1, Green, 2, 1, 0),
                BlockSpec::new(2, Green, 2, 4, 0),
                BlockSpec::new(3, Green, 2, 3, 1),
                BlockSpec::new(4, Green, 2, 4, 3),
                BlockSpec::new(5, Green, 2, 2, 5),
                BlockSpec::new(6, Red, 2, 0, 0),
                BlockSpec::new(7, Red, 3, 1, 3),
                BlockSpec::new(8, Red, 2, 2, 1),
                BlockSpec::new(9, Red, 3, 3, 2),
                BlockSpec::new(10, Red, 2, 4, 4),
                BlockSpec::new(11, Red, 2, 5, 1),
                BlockSpec::new(12, Blue, 2, 0, 2),
            ],
        }
    }

    /// Parse a layout from JSON
    pub fn from_json(json: &str) -> Result<Self, LayoutError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Tint of each block, for the view
    pub fn tints(&self) -> HashMap<BlockId, Tint> {
        self.blocks.iter().map(|b| (b.id, b.tint())).collect()
    }

    /// Check the layout against the board invariants
    pub fn validate(&self) -> Result<(), LayoutError> {
        if self.grid_size <= 0 {
            return Err(LayoutError::EmptyGrid);
        }

        let mut ids = HashSet::new();
        let mut taken: HashMap<Cell, BlockId> = HashMap::new();
        for spec in &self.blocks {
            if spec.length == 0 {
                return Err(LayoutError::ZeroLength { id: spec.id });
            }
            if !ids.insert(spec.id) {
                return Err(LayoutError::DuplicateId(spec.id));
            }

            let too_long = !i32::try_from(spec.length).is_ok_and(|len| len <= self.grid_size);
            let block = spec.to_block();
            if too_long || !block.fits_at(spec.x, spec.y, self.grid_size) {
                return Err(LayoutError::OutOfBounds { id: spec.id });
            }
            for cell in block.cells() {
                if let Some(&first) = taken.get(&cell) {
                    return Err(LayoutError::Overlap {
                        first,
                        second: spec.id,
                        cell,
                    });
                }
                taken.insert(cell, spec.id);
            }
        }
        Ok(())
    }

    /// Validate and build the starting board
    pub fn build(&self) -> Result<Board, LayoutError> {
        self.validate()?;
        let blocks = self.blocks.iter().map(BlockSpec::to_block).collect();
        log::info!(
            "Built {}x{} board with {} blocks",
            self.grid_size,
            self.grid_size,
            self.blocks.len()
        );
        Ok(Board::from_parts(self.grid_size, blocks))
    }
}
