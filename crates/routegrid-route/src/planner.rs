//! Chaining one A\* search per consecutive pair of stops.

use routegrid_core::{Grid, Pos};
use routegrid_paths::{Observer, Path, SearchOutcome, astar};

use crate::error::InvalidOperation;
use crate::route::RouteSet;

/// Result of one segment search.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SegmentResult {
    Solved(Path),
    Unreachable,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SegmentReport {
    /// Index of the segment's start stop in the route.
    pub index: usize,
    pub from: Pos,
    pub to: Pos,
    pub result: SegmentResult,
    pub expanded: usize,
}

impl SegmentReport {
    #[inline]
    pub fn is_solved(&self) -> bool {
        matches!(self.result, SegmentResult::Solved(_))
    }
}

/// Per-segment results of a run, in route order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RouteReport {
    pub segments: Vec<SegmentReport>,
}

impl RouteReport {
    /// Indices of segments that found no path.
    pub fn failed_segments(&self) -> Vec<usize> {
        self.segments
            .iter()
            .filter(|s| !s.is_solved())
            .map(|s| s.index)
            .collect()
    }

    /// Whether at least one segment ran and every segment was solved.
    pub fn is_complete(&self) -> bool {
        !self.segments.is_empty() && self.segments.iter().all(SegmentReport::is_solved)
    }

    /// Sum of the hop counts of the solved segments.
    pub fn total_hops(&self) -> usize {
        self.segments
            .iter()
            .map(|s| match &s.result {
                SegmentResult::Solved(path) => path.hops(),
                SegmentResult::Unreachable => 0,
            })
            .sum()
    }
}

/// How a multi-segment run ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PlanOutcome {
    /// Every segment was attempted. Some may be unreachable.
    Finished(RouteReport),
    /// The observer cancelled; holds the segments finished before that.
    Cancelled(RouteReport),
}

impl PlanOutcome {
    #[inline]
    pub fn report(&self) -> &RouteReport {
        match self {
            Self::Finished(r) | Self::Cancelled(r) => r,
        }
    }

    #[inline]
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled(_))
    }
}

/// Search every segment of `route` in order.
///
/// Adjacency is refreshed once up front. After each segment, solved or not,
/// the segment's start stop gets its positional label back, undoing any
/// `Closed` mark the search left on it. An unreachable segment does not stop
/// the run; a cancellation aborts it immediately. Once every segment has
/// run, all stop labels are re-asserted.
pub fn run_all<O: Observer + ?Sized>(
    route: &RouteSet,
    grid: &mut Grid,
    observer: &mut O,
) -> Result<PlanOutcome, InvalidOperation> {
    if route.len() < 2 {
        return Err(InvalidOperation::NotEnoughStops { count: route.len() });
    }

    grid.refresh_neighbors();

    let mut report = RouteReport::default();
    for (index, (from, to)) in route.segments().enumerate() {
        let search = astar(grid, from, to, observer);
        let result = match search.outcome {
            SearchOutcome::Found(path) => {
                log::debug!("segment {index} {from} -> {to}: {} hops", path.hops());
                SegmentResult::Solved(path)
            }
            SearchOutcome::Unreachable => {
                log::info!("segment {index} {from} -> {to}: unreachable");
                SegmentResult::Unreachable
            }
            SearchOutcome::Cancelled => {
                log::info!("route run cancelled during segment {index}");
                return Ok(PlanOutcome::Cancelled(report));
            }
        };
        route.restore_label(grid, index);
        report.segments.push(SegmentReport {
            index,
            from,
            to,
            result,
            expanded: search.expanded,
        });
    }

    route.relabel(grid);
    Ok(PlanOutcome::Finished(report))
}
