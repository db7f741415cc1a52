use std::collections::BinaryHeap;

use routegrid_core::{Grid, Mark, Pos};

use crate::distance::manhattan;
use crate::outcome::{Path, SearchOutcome, SearchResult};
use crate::traits::Observer;

const UNREACHABLE: i32 = i32::MAX;
const NO_PARENT: usize = usize::MAX;

// ---------------------------------------------------------------------------
// Per-search bookkeeping
// ---------------------------------------------------------------------------

#[derive(Clone)]
struct Node {
    g: i32,
    f: i32,
    parent: usize,
    /// Currently in the frontier.
    open: bool,
}

impl Default for Node {
    fn default() -> Self {
        Self {
            g: UNREACHABLE,
            f: UNREACHABLE,
            parent: NO_PARENT,
            open: false,
        }
    }
}

/// Frontier entry, ordered by `(f, seq)` for use in `BinaryHeap`.
#[derive(Clone, Copy, Eq, PartialEq)]
struct NodeRef {
    idx: usize,
    f: i32,
    seq: u64,
}

impl Ord for NodeRef {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Reverse so BinaryHeap (max-heap) pops smallest f first, and the
        // earliest insertion among equal f.
        other.f.cmp(&self.f).then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for NodeRef {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

// ---------------------------------------------------------------------------
// astar
// ---------------------------------------------------------------------------

/// Find a minimum-hop path from `source` to `target`, writing progress into
/// `grid`.
///
/// Every discovered cell is marked `Open`, every expanded cell other than
/// `source` is marked `Closed` (both no-ops on protected cells), the path
/// interior is marked `Path` and `target` is marked `End`. `observer` runs
/// after each expansion and after each path mark; returning
/// [`Flow::Cancel`](crate::Flow::Cancel) stops the search at once and
/// leaves the board as it is.
///
/// Stale adjacency is refreshed before the search starts. If `source ==
/// target`, or either lies outside the grid, the result is a trivial
/// `Found` with no expansions and no status changes.
pub fn astar<O: Observer + ?Sized>(
    grid: &mut Grid,
    source: Pos,
    target: Pos,
    observer: &mut O,
) -> SearchResult {
    let (Some(si), Some(ti)) = (grid.index(source), grid.index(target)) else {
        log::warn!("search endpoint outside the grid: {source} -> {target}");
        return SearchResult {
            outcome: SearchOutcome::Found(Path::default()),
            expanded: 0,
        };
    };

    if si == ti {
        return SearchResult {
            outcome: SearchOutcome::Found(Path::new(vec![source])),
            expanded: 0,
        };
    }

    if grid.neighbors_stale() {
        grid.refresh_neighbors();
    }

    let mut nodes = vec![Node::default(); grid.len()];
    let mut open: BinaryHeap<NodeRef> = BinaryHeap::new();
    let mut seq: u64 = 0;
    let mut expanded = 0;

    {
        let node = &mut nodes[si];
        node.g = 0;
        node.f = manhattan(source, target);
        node.open = true;
        open.push(NodeRef {
            idx: si,
            f: node.f,
            seq,
        });
    }

    let mut nbuf: Vec<Pos> = Vec::with_capacity(4);

    while let Some(entry) = open.pop() {
        let ci = entry.idx;

        // Superseded by a later push with a lower f.
        if !nodes[ci].open || nodes[ci].f != entry.f {
            continue;
        }
        nodes[ci].open = false;

        if ci == ti {
            return reconstruct(grid, &nodes, si, ti, observer, expanded);
        }

        let Some(current) = grid.pos_of(ci) else {
            continue;
        };
        let tentative_g = nodes[ci].g + 1;

        nbuf.clear();
        nbuf.extend_from_slice(grid.neighbors(current));

        for &np in nbuf.iter() {
            let Some(ni) = grid.index(np) else {
                continue;
            };
            let n = &mut nodes[ni];
            if tentative_g >= n.g {
                continue;
            }
            n.g = tentative_g;
            n.f = tentative_g + manhattan(np, target);
            n.parent = ci;

            seq += 1;
            open.push(NodeRef {
                idx: ni,
                f: n.f,
                seq,
            });
            if !n.open {
                n.open = true;
                grid.mark(np, Mark::Open);
            }
        }

        expanded += 1;
        if observer.on_step(grid).is_cancel() {
            log::debug!("search {source} -> {target} cancelled after {expanded} expansions");
            return SearchResult {
                outcome: SearchOutcome::Cancelled,
                expanded,
            };
        }

        if ci != si {
            grid.mark(current, Mark::Closed);
        }
    }

    SearchResult {
        outcome: SearchOutcome::Unreachable,
        expanded,
    }
}

/// Walk `parent` links back from `ti`, marking the interior `Path` and the
/// target `End`.
fn reconstruct<O: Observer + ?Sized>(
    grid: &mut Grid,
    nodes: &[Node],
    si: usize,
    ti: usize,
    observer: &mut O,
    expanded: usize,
) -> SearchResult {
    let mut cells = Vec::new();
    cells.extend(grid.pos_of(ti));

    let mut ci = nodes[ti].parent;
    while ci != NO_PARENT && ci != si {
        let Some(p) = grid.pos_of(ci) else {
            break;
        };
        grid.mark(p, Mark::Path);
        cells.push(p);
        if observer.on_step(grid).is_cancel() {
            return SearchResult {
                outcome: SearchOutcome::Cancelled,
                expanded,
            };
        }
        ci = nodes[ci].parent;
    }

    cells.extend(grid.pos_of(si));
    cells.reverse();

    if let Some(target) = grid.pos_of(ti) {
        grid.mark(target, Mark::End);
    }

    SearchResult {
        outcome: SearchOutcome::Found(Path::new(cells)),
        expanded,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use proptest::prelude::*;
    use routegrid_core::Status;

    use super::*;
    use crate::traits::Flow;

    fn run(grid: &mut Grid, from: Pos, to: Pos) -> SearchResult {
        astar(grid, from, to, &mut |_: &Grid| Flow::Continue)
    }

    /// Reference hop distance by breadth-first search.
    fn bfs_hops(grid: &mut Grid, from: Pos, to: Pos) -> Option<usize> {
        grid.refresh_neighbors();
        let mut dist = vec![usize::MAX; grid.len()];
        let mut queue = VecDeque::new();
        dist[grid.index(from)?] = 0;
        queue.push_back(from);
        while let Some(p) = queue.pop_front() {
            let d = dist[grid.index(p)?];
            if p == to {
                return Some(d);
            }
            for &n in grid.neighbors(p) {
                let ni = grid.index(n)?;
                if dist[ni] == usize::MAX {
                    dist[ni] = d + 1;
                    queue.push_back(n);
                }
            }
        }
        None
    }

    fn assert_valid_path(grid: &Grid, path: &Path, from: Pos, to: Pos) {
        let cells = path.cells();
        assert_eq!(cells.first(), Some(&from));
        assert_eq!(cells.last(), Some(&to));
        for w in cells.windows(2) {
            assert_eq!(manhattan(w[0], w[1]), 1, "non-adjacent step {} -> {}", w[0], w[1]);
            assert_ne!(grid.status(w[1]), Some(Status::Barrier));
        }
    }

    #[test]
    fn open_grid_path_is_manhattan() {
        let mut g = Grid::new(5);
        let from = Pos::new(0, 0);
        let to = Pos::new(4, 4);
        let r = run(&mut g, from, to);
        let path = r.path().expect("path");
        assert_eq!(path.hops(), 8);
        assert_valid_path(&g, path, from, to);
        assert!(r.expanded > 0);
    }

    #[test]
    fn statuses_after_success() {
        let mut g = Grid::new(5);
        let from = Pos::new(0, 0);
        let to = Pos::new(4, 4);
        let r = run(&mut g, from, to);
        let path = r.path().expect("path").clone();

        for &p in path.interior() {
            assert_eq!(g.status(p), Some(Status::Path));
        }
        assert_eq!(g.status(to), Some(Status::End));
        // The source is never opened or closed.
        assert_eq!(g.status(from), Some(Status::Empty));
        for c in g.iter() {
            if c.status() == Status::Path {
                assert!(path.interior().contains(&c.pos()));
            }
        }
    }

    #[test]
    fn source_equals_target_is_trivial() {
        let mut g = Grid::new(3);
        let p = Pos::new(1, 1);
        let mut steps = 0;
        let r = astar(&mut g, p, p, &mut |_: &Grid| {
            steps += 1;
            Flow::Continue
        });
        assert_eq!(r.expanded, 0);
        assert_eq!(steps, 0);
        let path = r.path().expect("path");
        assert_eq!(path.hops(), 0);
        assert_eq!(path.cells(), &[p]);
        assert!(g.iter().all(|c| c.status() == Status::Empty));
    }

    #[test]
    fn out_of_bounds_endpoint_is_trivial() {
        let mut g = Grid::new(3);
        let r = run(&mut g, Pos::new(0, 0), Pos::new(7, 7));
        assert_eq!(r.expanded, 0);
        assert_eq!(r.path().map(Path::hops), Some(0));
    }

    #[test]
    fn enclosed_target_is_unreachable() {
        let mut g = Grid::new(5);
        let target = Pos::new(2, 2);
        for p in target.neighbors_4() {
            g.mark(p, Mark::Barrier);
        }
        let r = run(&mut g, Pos::new(0, 0), target);
        assert!(r.is_unreachable());
        assert!(g.iter().all(|c| c.status() != Status::Path));
        assert_eq!(g.status(target), Some(Status::Empty));
        // Every reachable cell was expanded once: 25 - 4 barriers - target.
        assert_eq!(r.expanded, 20);
    }

    #[test]
    fn full_wall_row_is_unreachable() {
        let mut g = Grid::new(5);
        for col in 0..5 {
            g.mark(Pos::new(2, col), Mark::Barrier);
        }
        let r = run(&mut g, Pos::new(0, 0), Pos::new(4, 0));
        assert_eq!(r.outcome, SearchOutcome::Unreachable);
    }

    #[test]
    fn detour_around_wall() {
        let mut g = Grid::new(5);
        for col in 0..4 {
            g.mark(Pos::new(2, col), Mark::Barrier);
        }
        let from = Pos::new(0, 0);
        let to = Pos::new(4, 0);
        let r = run(&mut g, from, to);
        let path = r.path().expect("path");
        assert_eq!(path.hops(), 12);
        assert!(path.contains(Pos::new(2, 4)));
        assert_valid_path(&g, path, from, to);
    }

    #[test]
    fn stale_adjacency_is_refreshed() {
        let mut g = Grid::new(3);
        g.refresh_neighbors();
        for row in 0..3 {
            g.mark(Pos::new(row, 1), Mark::Barrier);
        }
        assert!(g.neighbors_stale());
        let r = run(&mut g, Pos::new(0, 0), Pos::new(0, 2));
        assert!(r.is_unreachable());
        assert!(!g.neighbors_stale());
    }

    #[test]
    fn protected_cells_keep_their_status() {
        let mut g = Grid::new(5);
        let waypoint = Pos::new(0, 2);
        let old_path = Pos::new(1, 1);
        g.mark(waypoint, Mark::Waypoint);
        g.mark(old_path, Mark::Path);
        g.mark(Pos::new(0, 0), Mark::Start);

        let r = run(&mut g, Pos::new(0, 0), Pos::new(4, 4));
        assert!(r.is_found());
        assert_eq!(g.status(waypoint), Some(Status::Waypoint));
        assert_eq!(g.status(Pos::new(0, 0)), Some(Status::Start));
        assert_eq!(g.status(old_path), Some(Status::Path));
    }

    #[test]
    fn observer_runs_per_expansion_and_path_mark() {
        let mut g = Grid::new(4);
        let mut steps = 0;
        let r = astar(&mut g, Pos::new(0, 0), Pos::new(0, 3), &mut |_: &Grid| {
            steps += 1;
            Flow::Continue
        });
        let path = r.path().expect("path");
        assert_eq!(steps, r.expanded + path.interior().len());
    }

    #[test]
    fn cancel_stops_immediately_without_rollback() {
        let mut g = Grid::new(6);
        let mut steps = 0;
        let r = astar(&mut g, Pos::new(0, 0), Pos::new(5, 5), &mut |_: &Grid| {
            steps += 1;
            if steps == 3 { Flow::Cancel } else { Flow::Continue }
        });
        assert!(r.is_cancelled());
        assert_eq!(r.expanded, 3);
        assert_eq!(steps, 3);
        assert!(g.iter().any(|c| c.status() == Status::Open));
        assert_ne!(g.status(Pos::new(5, 5)), Some(Status::End));
    }

    #[test]
    fn cancel_during_reconstruction() {
        let mut g = Grid::new(4);
        let mut marked = 0;
        let r = astar(&mut g, Pos::new(0, 0), Pos::new(0, 3), &mut |grid: &Grid| {
            if grid.iter().any(|c| c.status() == Status::Path) {
                marked += 1;
                return Flow::Cancel;
            }
            Flow::Continue
        });
        assert!(r.is_cancelled());
        assert_eq!(marked, 1);
        assert_eq!(g.iter().filter(|c| c.status() == Status::Path).count(), 1);
    }

    #[test]
    fn expansion_order_is_deterministic() {
        fn trace() -> Vec<Vec<Status>> {
            let mut g = Grid::new(7);
            g.mark(Pos::new(3, 3), Mark::Barrier);
            g.mark(Pos::new(3, 2), Mark::Barrier);
            let mut frames = Vec::new();
            astar(&mut g, Pos::new(0, 0), Pos::new(6, 6), &mut |grid: &Grid| {
                frames.push(grid.statuses());
                Flow::Continue
            });
            frames
        }
        let reference = trace();
        for _ in 0..10 {
            assert_eq!(trace(), reference);
        }
    }

    #[test]
    fn ties_expand_in_insertion_order() {
        // On an open 3x3 board every monotone cell has f = 4, so expansion
        // order is pure FIFO over down, up, right, left pushes.
        let mut g = Grid::new(3);
        let mut frames: Vec<Vec<Status>> = vec![g.statuses()];
        let r = astar(&mut g, Pos::new(0, 0), Pos::new(2, 2), &mut |grid: &Grid| {
            frames.push(grid.statuses());
            Flow::Continue
        });
        assert_eq!(r.expanded, 8);

        let mut closed_order = Vec::new();
        for w in frames.windows(2) {
            for (i, (before, after)) in w[0].iter().zip(&w[1]).enumerate() {
                if *after == Status::Closed && *before != Status::Closed {
                    closed_order.push(g.pos_of(i).unwrap());
                }
            }
        }
        assert_eq!(
            closed_order,
            vec![
                Pos::new(1, 0),
                Pos::new(0, 1),
                Pos::new(2, 0),
                Pos::new(1, 1),
                Pos::new(0, 2),
                Pos::new(2, 1),
                Pos::new(1, 2),
            ]
        );
        assert_eq!(
            r.path().expect("path").cells(),
            &[
                Pos::new(0, 0),
                Pos::new(1, 0),
                Pos::new(2, 0),
                Pos::new(2, 1),
                Pos::new(2, 2),
            ]
        );
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn open_grid_optimal(rows in 2i32..12, a in 0usize..144, b in 0usize..144) {
            let mut g = Grid::new(rows);
            let n = g.len();
            let from = g.pos_of(a % n).unwrap();
            let to = g.pos_of(b % n).unwrap();
            let r = run(&mut g, from, to);
            let path = r.path().expect("open grid always connects");
            prop_assert_eq!(path.hops() as i32, manhattan(from, to));
        }

        #[test]
        fn matches_bfs_with_barriers(
            rows in 3i32..10,
            walls in proptest::collection::vec(any::<bool>(), 100),
            a in 0usize..100,
            b in 0usize..100,
        ) {
            let mut g = Grid::new(rows);
            let n = g.len();
            let from = g.pos_of(a % n).unwrap();
            let to = g.pos_of(b % n).unwrap();
            for (i, wall) in walls.iter().take(n).enumerate() {
                let p = g.pos_of(i).unwrap();
                if *wall && i % 3 == 0 && p != from && p != to {
                    g.mark(p, Mark::Barrier);
                }
            }
            let expected = bfs_hops(&mut g.clone(), from, to);
            let r = run(&mut g, from, to);
            match expected {
                Some(hops) => {
                    let path = r.path().expect("reachable");
                    prop_assert_eq!(path.hops(), hops);
                    assert_valid_path(&g, path, from, to);
                }
                None => prop_assert!(r.is_unreachable()),
            }
        }

        #[test]
        fn rerun_after_clearing_is_idempotent(
            rows in 3i32..10,
            a in 0usize..100,
            b in 0usize..100,
        ) {
            let mut g = Grid::new(rows);
            let n = g.len();
            for i in (0..n).step_by(4) {
                g.mark(g.pos_of(i).unwrap(), Mark::Barrier);
            }
            let from = g.pos_of(a % n).unwrap();
            let to = g.pos_of(b % n).unwrap();
            prop_assume!(g.status(from) != Some(Status::Barrier));
            prop_assume!(g.status(to) != Some(Status::Barrier));

            let first = run(&mut g, from, to);
            for _ in 0..3 {
                g.clear_search_marks();
                if g.status(to) == Some(Status::End) {
                    g.mark(to, Mark::Reset);
                }
                let again = run(&mut g, from, to);
                prop_assert_eq!(again.path().map(Path::hops), first.path().map(Path::hops));
                prop_assert_eq!(&again.outcome, &first.outcome);
            }
        }
    }
}
