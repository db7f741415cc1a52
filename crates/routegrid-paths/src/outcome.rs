use routegrid_core::Pos;

/// A found route, source to target inclusive.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Path {
    cells: Vec<Pos>,
}

impl Path {
    pub fn new(cells: Vec<Pos>) -> Self {
        Self { cells }
    }

    #[inline]
    pub fn cells(&self) -> &[Pos] {
        &self.cells
    }

    /// Path length in moves.
    #[inline]
    pub fn hops(&self) -> usize {
        self.cells.len().saturating_sub(1)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[inline]
    pub fn contains(&self, p: Pos) -> bool {
        self.cells.contains(&p)
    }

    /// Cells strictly between source and target.
    pub fn interior(&self) -> &[Pos] {
        match self.cells.len() {
            0..=2 => &self.cells[..0],
            n => &self.cells[1..n - 1],
        }
    }
}

/// How a single search ended.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SearchOutcome {
    Found(Path),
    /// The frontier ran dry: Barriers separate source and target.
    Unreachable,
    /// The observer asked to stop.
    Cancelled,
}

/// Outcome of [`astar`](crate::astar) plus the number of expansions run.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchResult {
    pub outcome: SearchOutcome,
    pub expanded: usize,
}

impl SearchResult {
    #[inline]
    pub fn path(&self) -> Option<&Path> {
        match &self.outcome {
            SearchOutcome::Found(path) => Some(path),
            _ => None,
        }
    }

    #[inline]
    pub fn is_found(&self) -> bool {
        matches!(self.outcome, SearchOutcome::Found(_))
    }

    #[inline]
    pub fn is_unreachable(&self) -> bool {
        self.outcome == SearchOutcome::Unreachable
    }

    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.outcome == SearchOutcome::Cancelled
    }
}
