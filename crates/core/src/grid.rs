//! Multi-occupancy spatial grid.
//!
//! Maps each cell of a fixed `width x height` extent to an insertion-ordered
//! list of agent handles. A cell may hold any number of agents of any
//! variant at once; a firefighter arriving at a burning tree's cell simply
//! joins the occupant list. The grid stores handles only and never looks
//! inside an agent.

use crate::agent::AgentId;
use crate::error::SimError;

/// Discrete 2D grid with multi-occupancy cells.
///
/// Dimensions are fixed at construction; the grid is never resized mid-run.
/// Cells are enumerated row-major with `x` as the outer axis, which is the
/// scan order the firefighter targeting tie-break depends on.
#[derive(Debug, Clone)]
pub struct MultiGrid {
    width: u32,
    height: u32,
    cells: Vec<Vec<AgentId>>,
}

impl MultiGrid {
    /// Create an empty grid.
    ///
    /// # Panics
    /// Panics if either dimension is zero.
    pub fn new(width: u32, height: u32) -> Self {
        assert!(width > 0 && height > 0, "grid dimensions must be positive");
        MultiGrid {
            width,
            height,
            cells: vec![Vec::new(); width as usize * height as usize],
        }
    }

    /// Grid width in cells.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Grid height in cells.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Whether `(x, y)` lies inside `[0, width) x [0, height)`.
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        self.bounds_check(x, y).is_ok()
    }

    /// Validate a coordinate pair, converting it to cell coordinates.
    pub fn bounds_check(&self, x: i32, y: i32) -> Result<(u32, u32), SimError> {
        if x >= 0 && (x as u32) < self.width && y >= 0 && (y as u32) < self.height {
            Ok((x as u32, y as u32))
        } else {
            Err(SimError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            })
        }
    }

    fn index(&self, x: u32, y: u32) -> usize {
        x as usize * self.height as usize + y as usize
    }

    /// Add an agent's handle to a cell. Placing onto an occupied cell is
    /// always legal. Returns the cell coordinates on success.
    pub fn place(&mut self, id: AgentId, x: i32, y: i32) -> Result<(u32, u32), SimError> {
        let pos = self.bounds_check(x, y)?;
        let idx = self.index(pos.0, pos.1);
        self.cells[idx].push(id);
        Ok(pos)
    }

    /// Remove an agent's handle from the cell it was recorded at.
    /// No-op when the handle is already absent, so retraction is safe to
    /// repeat.
    pub fn remove(&mut self, id: AgentId, pos: (u32, u32)) {
        let idx = self.index(pos.0, pos.1);
        let cell = &mut self.cells[idx];
        if let Some(slot) = cell.iter().position(|&a| a == id) {
            cell.remove(slot);
        }
    }

    /// Relocate an agent from `from` to `(x, y)` in a single jump.
    /// The source cell is untouched when the target is out of bounds.
    pub fn move_agent(
        &mut self,
        id: AgentId,
        from: (u32, u32),
        x: i32,
        y: i32,
    ) -> Result<(u32, u32), SimError> {
        let to = self.bounds_check(x, y)?;
        self.remove(id, from);
        let idx = self.index(to.0, to.1);
        self.cells[idx].push(id);
        Ok(to)
    }

    /// The (possibly empty) list of handles at a cell.
    pub fn contents(&self, x: i32, y: i32) -> Result<&[AgentId], SimError> {
        let pos = self.bounds_check(x, y)?;
        Ok(&self.cells[self.index(pos.0, pos.1)])
    }

    /// Handles at an in-bounds cell. Used by full-grid scans that already
    /// iterate `0..width x 0..height`.
    pub fn cell(&self, x: u32, y: u32) -> &[AgentId] {
        &self.cells[self.index(x, y)]
    }

    /// True iff the in-bounds cell holds no agents.
    pub fn is_empty(&self, x: u32, y: u32) -> bool {
        self.cell(x, y).is_empty()
    }
}
