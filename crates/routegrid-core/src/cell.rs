//! The [`Cell`] type, one graph vertex, and its [`Status`] state machine.
//!
//! Every status change goes through [`Status::after`], a single transition
//! table. Search bookkeeping (`Open`/`Closed`) never overwrites a cell that
//! already holds `Start`, `Waypoint` or `Path`.

use crate::geom::Pos;
use crate::grid::Grid;

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

/// Mutually exclusive classification of a cell.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Status {
    #[default]
    Empty,
    /// Excluded from the traversable graph.
    Barrier,
    /// Discovered by a search, not yet expanded.
    Open,
    /// Expanded by a search.
    Closed,
    Start,
    Waypoint,
    End,
    /// Part of a reconstructed path.
    Path,
}

/// A requested status transition.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Mark {
    /// Back to `Empty`.
    Reset,
    Barrier,
    /// Search bookkeeping: discovered. Guarded.
    Open,
    /// Search bookkeeping: expanded. Guarded.
    Closed,
    Path,
    Start,
    Waypoint,
    End,
}

impl Status {
    /// The status a cell holds after `mark` is applied to it.
    pub const fn after(self, mark: Mark) -> Status {
        match (self, mark) {
            (Status::Start | Status::Waypoint | Status::Path, Mark::Open | Mark::Closed) => self,
            (_, Mark::Open) => Status::Open,
            (_, Mark::Closed) => Status::Closed,
            (_, Mark::Reset) => Status::Empty,
            (_, Mark::Barrier) => Status::Barrier,
            (_, Mark::Path) => Status::Path,
            (_, Mark::Start) => Status::Start,
            (_, Mark::Waypoint) => Status::Waypoint,
            (_, Mark::End) => Status::End,
        }
    }

    /// Whether search bookkeeping must leave this status alone.
    ///
    /// `End` is deliberately absent: a search may mark its target `Open`
    /// transiently and restores `End` when it reaches it.
    #[inline]
    pub const fn is_protected(self) -> bool {
        matches!(self, Status::Start | Status::Waypoint | Status::Path)
    }

    /// Whether the status is a finished result (a stop role or a path).
    #[inline]
    pub const fn is_committed(self) -> bool {
        matches!(
            self,
            Status::Start | Status::Waypoint | Status::End | Status::Path
        )
    }

    /// Whether this is one of the stop roles.
    #[inline]
    pub const fn is_stop(self) -> bool {
        matches!(self, Status::Start | Status::Waypoint | Status::End)
    }

    /// Whether the status was written by a search.
    #[inline]
    pub const fn is_search_mark(self) -> bool {
        matches!(self, Status::Open | Status::Closed | Status::Path)
    }
}

// ---------------------------------------------------------------------------
// Cell
// ---------------------------------------------------------------------------

/// A single grid vertex.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cell {
    pos: Pos,
    status: Status,
    neighbors: Vec<Pos>,
}

impl Cell {
    /// An `Empty` cell at `pos` with no computed neighbors.
    pub fn new(pos: Pos) -> Self {
        Self {
            pos,
            status: Status::Empty,
            neighbors: Vec::new(),
        }
    }

    #[inline]
    pub fn pos(&self) -> Pos {
        self.pos
    }

    #[inline]
    pub fn status(&self) -> Status {
        self.status
    }

    #[inline]
    pub fn is_barrier(&self) -> bool {
        self.status == Status::Barrier
    }

    /// Adjacent traversable cells as of the last neighbor refresh.
    #[inline]
    pub fn neighbors(&self) -> &[Pos] {
        &self.neighbors
    }

    /// Apply a transition; returns `true` if the status changed.
    pub fn apply(&mut self, mark: Mark) -> bool {
        let next = self.status.after(mark);
        let changed = next != self.status;
        self.status = next;
        changed
    }

    pub fn reset(&mut self) {
        self.apply(Mark::Reset);
    }

    pub fn mark_barrier(&mut self) {
        self.apply(Mark::Barrier);
    }

    pub fn mark_empty(&mut self) {
        self.apply(Mark::Reset);
    }

    /// No-op on `Start`, `Waypoint` and `Path`.
    pub fn mark_open(&mut self) {
        self.apply(Mark::Open);
    }

    /// No-op on `Start`, `Waypoint` and `Path`.
    pub fn mark_closed(&mut self) {
        self.apply(Mark::Closed);
    }

    pub fn mark_path(&mut self) {
        self.apply(Mark::Path);
    }

    pub fn mark_start(&mut self) {
        self.apply(Mark::Start);
    }

    pub fn mark_waypoint(&mut self) {
        self.apply(Mark::Waypoint);
    }

    pub fn mark_end(&mut self) {
        self.apply(Mark::End);
    }

    /// In-bounds, non-Barrier cells adjacent to this one, in down, up,
    /// right, left order.
    pub fn compute_neighbors(&self, grid: &Grid) -> Vec<Pos> {
        self.pos
            .neighbors_4()
            .into_iter()
            .filter(|&n| grid.status(n).is_some_and(|s| s != Status::Barrier))
            .collect()
    }

    pub(crate) fn set_neighbors(&mut self, neighbors: Vec<Pos>) {
        self.neighbors = neighbors;
    }
}
