use routegrid_core::Grid;

/// What a search should do after a step.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Flow {
    #[default]
    Continue,
    /// Abort the search, keeping every status already written.
    Cancel,
}

impl Flow {
    #[inline]
    pub fn is_cancel(self) -> bool {
        self == Flow::Cancel
    }
}

/// Progress callback invoked once per expansion and once per
/// path-reconstruction step.
///
/// The observer may read the board (to render it) but gets no mutable
/// access, so it cannot change Barriers mid-search.
pub trait Observer {
    fn on_step(&mut self, grid: &Grid) -> Flow;
}

impl<F> Observer for F
where
    F: FnMut(&Grid) -> Flow,
{
    #[inline]
    fn on_step(&mut self, grid: &Grid) -> Flow {
        self(grid)
    }
}
