use routegrid_core::{Grid, Mark, Pos, Status};

use crate::error::InvalidOperation;

/// The label a stop at `index` carries in a route of `len` stops.
#[inline]
pub const fn label_for(index: usize, len: usize) -> Status {
    if index == 0 {
        Status::Start
    } else if index + 1 == len {
        Status::End
    } else {
        Status::Waypoint
    }
}

const fn mark_for(status: Status) -> Mark {
    match status {
        Status::Start => Mark::Start,
        Status::End => Mark::End,
        _ => Mark::Waypoint,
    }
}

/// Ordered, duplicate-free list of stops.
///
/// Members are stored by position; the [`Grid`] keeps owning the cells.
/// After every append or removal the board labels are recomputed from
/// position: first `Start`, last `End`, everything between `Waypoint`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RouteSet {
    stops: Vec<Pos>,
}

impl RouteSet {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn stops(&self) -> &[Pos] {
        &self.stops
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.stops.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    #[inline]
    pub fn contains(&self, p: Pos) -> bool {
        self.stops.contains(&p)
    }

    #[inline]
    pub fn position(&self, p: Pos) -> Option<usize> {
        self.stops.iter().position(|&s| s == p)
    }

    /// Consecutive `(from, to)` stop pairs, one per segment.
    pub fn segments(&self) -> impl Iterator<Item = (Pos, Pos)> + '_ {
        self.stops.windows(2).map(|w| (w[0], w[1]))
    }

    /// Add `p` as the new last stop and relabel. Returns its index.
    ///
    /// Membership is checked before terrain: a stop is reported as
    /// `AlreadyStop` even if the caller meant something else.
    pub fn append(&mut self, grid: &mut Grid, p: Pos) -> Result<usize, InvalidOperation> {
        let Some(status) = grid.status(p) else {
            return Err(InvalidOperation::OutOfBounds(p));
        };
        if self.contains(p) {
            return Err(InvalidOperation::AlreadyStop(p));
        }
        if status == Status::Barrier {
            return Err(InvalidOperation::BarrierCell(p));
        }
        self.stops.push(p);
        self.relabel(grid);
        Ok(self.stops.len() - 1)
    }

    /// Remove `p`, reset its cell to `Empty` and relabel the rest. Returns
    /// the index it held.
    pub fn remove(&mut self, grid: &mut Grid, p: Pos) -> Result<usize, InvalidOperation> {
        let Some(index) = self.position(p) else {
            return Err(InvalidOperation::NotAStop(p));
        };
        self.stops.remove(index);
        grid.mark(p, Mark::Reset);
        self.relabel(grid);
        Ok(index)
    }

    /// Forget every stop. The board is not touched.
    pub fn clear(&mut self) {
        self.stops.clear();
    }

    /// Write the positional label of every stop onto the board.
    pub fn relabel(&self, grid: &mut Grid) {
        for index in 0..self.stops.len() {
            self.restore_label(grid, index);
        }
    }

    /// Write the positional label of the stop at `index` onto the board.
    pub fn restore_label(&self, grid: &mut Grid, index: usize) {
        if let Some(&p) = self.stops.get(index) {
            grid.mark(p, mark_for(label_for(index, self.stops.len())));
        }
    }
}
