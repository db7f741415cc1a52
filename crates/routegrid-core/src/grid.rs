//! The [`Grid`] type: a fixed `rows × rows` matrix of [`Cell`]s.
//!
//! The grid is the single owner of every cell. Everything else refers to
//! cells by [`Pos`]. Adjacency is cached per cell and must be refreshed
//! after Barrier membership changes; [`Grid::neighbors_stale`] tracks that.

use crate::cell::{Cell, Mark, Status};
use crate::geom::{Pos, Range};

/// A square board of cells.
#[derive(Clone, Debug)]
pub struct Grid {
    cells: Vec<Cell>,
    bounds: Range,
    stale: bool,
}

impl Grid {
    /// Allocate `rows × rows` `Empty` cells with no computed neighbors.
    pub fn new(rows: i32) -> Self {
        let bounds = Range::square(rows);
        Self {
            cells: bounds.iter().map(Cell::new).collect(),
            bounds,
            stale: true,
        }
    }

    /// Number of rows (and columns).
    #[inline]
    pub fn rows(&self) -> i32 {
        self.bounds.rows()
    }

    #[inline]
    pub fn bounds(&self) -> Range {
        self.bounds
    }

    /// Total number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[inline]
    pub fn contains(&self, p: Pos) -> bool {
        self.bounds.contains(p)
    }

    /// Row-major flat index of `p`, or `None` if out of bounds.
    #[inline]
    pub fn index(&self, p: Pos) -> Option<usize> {
        if !self.bounds.contains(p) {
            return None;
        }
        Some((p.row as usize) * (self.rows() as usize) + p.col as usize)
    }

    /// Position of the cell at flat index `i`.
    #[inline]
    pub fn pos_of(&self, i: usize) -> Option<Pos> {
        self.cells.get(i).map(Cell::pos)
    }

    #[inline]
    pub fn cell(&self, p: Pos) -> Option<&Cell> {
        self.index(p).map(|i| &self.cells[i])
    }

    /// Status at `p`, or `None` if out of bounds.
    #[inline]
    pub fn status(&self, p: Pos) -> Option<Status> {
        self.cell(p).map(Cell::status)
    }

    /// Apply `mark` to the cell at `p`. Returns `true` if its status changed.
    ///
    /// Out-of-bounds positions are ignored. Adding or removing a Barrier
    /// flags adjacency as stale.
    pub fn mark(&mut self, p: Pos, mark: Mark) -> bool {
        let Some(i) = self.index(p) else {
            return false;
        };
        let cell = &mut self.cells[i];
        let was_barrier = cell.is_barrier();
        let changed = cell.apply(mark);
        if was_barrier != cell.is_barrier() {
            self.stale = true;
        }
        changed
    }

    /// Whether a Barrier changed since the last [`refresh_neighbors`](Self::refresh_neighbors).
    #[inline]
    pub fn neighbors_stale(&self) -> bool {
        self.stale
    }

    /// Recompute every cell's neighbor list: in-bounds, non-Barrier cells in
    /// down, up, right, left order.
    pub fn refresh_neighbors(&mut self) {
        for i in 0..self.cells.len() {
            let neighbors = self.cells[i].compute_neighbors(self);
            self.cells[i].set_neighbors(neighbors);
        }
        self.stale = false;
    }

    /// Cached neighbors of `p`. Empty if out of bounds.
    #[inline]
    pub fn neighbors(&self, p: Pos) -> &[Pos] {
        self.cell(p).map(Cell::neighbors).unwrap_or(&[])
    }

    /// Reset every `Open`, `Closed` and `Path` cell to `Empty`. Barriers and
    /// stop labels are kept.
    pub fn clear_search_marks(&mut self) {
        for cell in self.cells.iter_mut() {
            if cell.status().is_search_mark() {
                cell.reset();
            }
        }
    }

    /// Row-major snapshot of every status.
    pub fn statuses(&self) -> Vec<Status> {
        self.cells.iter().map(Cell::status).collect()
    }

    /// Row-major iterator over the cells.
    pub fn iter(&self) -> std::slice::Iter<'_, Cell> {
        self.cells.iter()
    }
}
