//! Block geometry
//!
//! A block is a straight run of cells anchored at its top-left cell. The
//! orientation decides which way the run extends and which axis it slides on.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable block identifier
pub type BlockId = u32;

/// An integer grid coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Movement axis of a block, fixed at creation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// Extends and slides along x
    Horizontal,
    /// Extends and slides along y
    Vertical,
}

impl Orientation {
    /// Offset from one occupied cell to the next
    #[inline]
    pub fn step(self) -> (i32, i32) {
        match self {
            Orientation::Horizontal => (1, 0),
            Orientation::Vertical => (0, 1),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Orientation::Horizontal => "horizontal",
            Orientation::Vertical => "vertical",
        }
    }
}

/// A sliding block
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    id: BlockId,
    orientation: Orientation,
    length: u32,
    /// Left-most column
    pub x: i32,
    /// Top-most row
    pub y: i32,
}

impl Block {
    pub fn new(id: BlockId, orientation: Orientation, length: u32, x: i32, y: i32) -> Self {
        Self {
            id,
            orientation,
            length,
            x,
            y,
        }
    }

    pub fn id(&self) -> BlockId {
        self.id
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Span in cells along the movement axis
    pub fn length(&self) -> u32 {
        self.length
    }

    /// Current top-left cell
    pub fn position(&self) -> Cell {
        Cell::new(self.x, self.y)
    }

    /// Cells this block would cover if anchored at `(x, y)`.
    ///
    /// Cells past the edge of the `i32` range saturate, so the result is
    /// only exact for anchors that pass [`Block::fits_at`].
    pub fn cells_at(&self, x: i32, y: i32) -> impl Iterator<Item = Cell> + use<> {
        let (dx, dy) = self.orientation.step();
        let len = i32::try_from(self.length).unwrap_or(i32::MAX);
        (0..len).map(move |i| Cell::new(x.saturating_add(dx * i), y.saturating_add(dy * i)))
    }

    /// Cells this block covers right now
    pub fn cells(&self) -> impl Iterator<Item = Cell> + use<> {
        self.cells_at(self.x, self.y)
    }

    /// Whether every cell at `(x, y)` lies inside a `grid_size` square grid
    pub fn fits_at(&self, x: i32, y: i32, grid_size: i32) -> bool {
        let (along, across) = match self.orientation {
            Orientation::Horizontal => (x, y),
            Orientation::Vertical => (y, x),
        };
        // i64 so the sum cannot wrap
        let end = i64::from(along) + i64::from(self.length);
        along >= 0 && end <= i64::from(grid_size) && (0..grid_size).contains(&across)
    }
}
