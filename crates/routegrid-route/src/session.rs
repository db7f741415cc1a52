//! [`Session`]: the board plus the route, and the five operations a
//! front-end drives: add a stop, remove a stop, toggle a Barrier, run every
//! segment, reset.

use routegrid_core::{Grid, Mark, Pos, Status};
use routegrid_paths::Observer;

use crate::error::InvalidOperation;
use crate::planner::{PlanOutcome, run_all};
use crate::route::RouteSet;

/// Configuration for creating a [`Session`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SessionConfig {
    /// Board side length; the board has `rows × rows` cells.
    pub rows: i32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self { rows: 30 }
    }
}

/// An in-memory planning session.
#[derive(Clone, Debug)]
pub struct Session {
    config: SessionConfig,
    grid: Grid,
    route: RouteSet,
}

impl Session {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            grid: Grid::new(config.rows),
            route: RouteSet::new(),
            config,
        }
    }

    #[inline]
    pub fn config(&self) -> SessionConfig {
        self.config
    }

    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[inline]
    pub fn route(&self) -> &RouteSet {
        &self.route
    }

    /// Append `p` to the route.
    pub fn add_stop(&mut self, p: Pos) -> Result<(), InvalidOperation> {
        self.route
            .append(&mut self.grid, p)
            .map(|_| ())
            .inspect_err(|e| log::debug!("add_stop ignored: {e}"))
    }

    /// Remove `p` from the route, leaving its cell `Empty`.
    pub fn remove_stop(&mut self, p: Pos) -> Result<(), InvalidOperation> {
        self.route
            .remove(&mut self.grid, p)
            .map(|_| ())
            .inspect_err(|e| log::debug!("remove_stop ignored: {e}"))
    }

    /// Flip `p` between Barrier and `Empty`; returns the new status.
    ///
    /// Membership is checked first: a stop is never turned into a Barrier.
    pub fn toggle_barrier(&mut self, p: Pos) -> Result<Status, InvalidOperation> {
        let Some(status) = self.grid.status(p) else {
            let err = InvalidOperation::OutOfBounds(p);
            log::debug!("toggle_barrier ignored: {err}");
            return Err(err);
        };
        if self.route.contains(p) {
            let err = InvalidOperation::StopCell(p);
            log::debug!("toggle_barrier ignored: {err}");
            return Err(err);
        }
        let mark = if status == Status::Barrier {
            Mark::Reset
        } else {
            Mark::Barrier
        };
        self.grid.mark(p, mark);
        Ok(status.after(mark))
    }

    /// Search every segment of the route.
    ///
    /// Stop labels are re-asserted after a cancelled run as well, so the
    /// board always shows the route's positional roles.
    pub fn run_all<O: Observer + ?Sized>(
        &mut self,
        observer: &mut O,
    ) -> Result<PlanOutcome, InvalidOperation> {
        let outcome = run_all(&self.route, &mut self.grid, observer)
            .inspect_err(|e| log::debug!("run_all ignored: {e}"))?;
        if outcome.is_cancelled() {
            self.route.relabel(&mut self.grid);
        }
        Ok(outcome)
    }

    /// Rebuild the board (erasing every Barrier) and empty the route.
    pub fn reset(&mut self) {
        log::debug!("session reset: {0}x{0} board", self.config.rows);
        self.grid = Grid::new(self.config.rows);
        self.route.clear();
    }

    /// Erase `Open`, `Closed` and `Path` marks from a previous run.
    pub fn clear_search_marks(&mut self) {
        self.grid.clear_search_marks();
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}
