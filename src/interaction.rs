//! Pointer interaction
//!
//! Turns pointer positions into candidate cells and drives the
//! validate-then-commit cycle for a dragged block. Rendering is left to a
//! [`BoardView`], so this module runs the same in the browser and in tests.

use glam::Vec2;

use crate::board::{Block, BlockId, Board, Cell, Orientation, is_valid};
use crate::error::BoardError;

/// Rendering hooks the drag controller calls into
pub trait BoardView {
    /// Remove every landing-cell highlight
    fn clear_highlights(&mut self);
    /// Mark the cells a dragged block would land on
    fn highlight(&mut self, cells: &[Cell]);
    /// Redraw a block at its committed position
    fn place_block(&mut self, block: &Block);
}

/// Convert a pointer position to the grid cell under it.
///
/// `origin` is the board's top-left corner in the same coordinate space as
/// `pointer`. Positions left of or above the board give negative cells.
pub fn pointer_to_cell(pointer: Vec2, origin: Vec2, cell_px: f32) -> (i32, i32) {
    let cell = ((pointer - origin) / cell_px).floor();
    (cell.x as i32, cell.y as i32)
}

/// Candidate anchor for `block` when the pointer is over `(column, row)`.
///
/// Only the coordinate along the block's axis follows the pointer.
pub fn axis_locked_target(block: &Block, column: i32, row: i32) -> (i32, i32) {
    match block.orientation() {
        Orientation::Horizontal => (column, block.y),
        Orientation::Vertical => (block.x, row),
    }
}

/// Tracks the block being dragged (mouse or touch)
#[derive(Debug, Clone)]
pub struct DragController {
    active: Option<BlockId>,
    /// Board top-left in pointer coordinates
    origin: Vec2,
    cell_px: f32,
    highlight: bool,
}

impl DragController {
    pub fn new(cell_px: f32, highlight: bool) -> Self {
        Self {
            active: None,
            origin: Vec2::ZERO,
            cell_px,
            highlight,
        }
    }

    /// Update where the board sits on screen
    pub fn set_origin(&mut self, origin: Vec2) {
        self.origin = origin;
    }

    /// Block currently being dragged
    pub fn active(&self) -> Option<BlockId> {
        self.active
    }

    /// Start dragging `id`, replacing any unfinished drag
    pub fn begin(&mut self, id: BlockId) {
        log::debug!("Drag start: block {}", id);
        self.active = Some(id);
    }

    /// Drop the current drag without moving anything
    pub fn cancel(&mut self) {
        self.active = None;
    }

    /// Pointer moved while dragging: highlight the landing cells if the
    /// block could be dropped here, otherwise clear.
    pub fn hover<V: BoardView>(
        &mut self,
        board: &Board,
        pointer: Vec2,
        view: &mut V,
    ) -> Result<(), BoardError> {
        let Some(id) = self.active else {
            return Ok(());
        };
        let block = match board.get(id) {
            Ok(block) => block,
            Err(e) => {
                self.abort(view);
                return Err(e);
            }
        };
        let (column, row) = pointer_to_cell(pointer, self.origin, self.cell_px);
        let (x, y) = axis_locked_target(block, column, row);

        view.clear_highlights();
        if self.highlight && is_valid(board, block, x, y) {
            let cells: Vec<Cell> = block.cells_at(x, y).collect();
            view.highlight(&cells);
        }
        Ok(())
    }

    /// Pointer left the board
    pub fn leave<V: BoardView>(&self, view: &mut V) {
        view.clear_highlights();
    }

    /// Pointer released: commit the move if it is legal and end the drag.
    ///
    /// Returns the new anchor when the block moved.
    pub fn release<V: BoardView>(
        &mut self,
        board: &mut Board,
        pointer: Vec2,
        view: &mut V,
    ) -> Result<Option<(i32, i32)>, BoardError> {
        view.clear_highlights();
        let Some(id) = self.active.take() else {
            return Ok(None);
        };

        let (column, row) = pointer_to_cell(pointer, self.origin, self.cell_px);
        let (x, y) = axis_locked_target(board.get(id)?, column, row);
        if !board.try_move(id, x, y)? {
            return Ok(None);
        }
        view.place_block(board.get(id)?);
        Ok(Some((x, y)))
    }

    /// Abandon the gesture after an integration fault
    fn abort<V: BoardView>(&mut self, view: &mut V) {
        if let Some(id) = self.active.take() {
            log::warn!("Aborting drag of unknown block {}", id);
        }
        view.clear_highlights();
    }
}
