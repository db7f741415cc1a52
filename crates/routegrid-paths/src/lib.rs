//! A\* search over a routegrid [`Grid`](routegrid_core::Grid).
//!
//! Unlike a plain shortest-path query, the search here is *observable*: it
//! writes its bookkeeping into the board as `Open`/`Closed` statuses, marks
//! the reconstructed route as `Path`, and hands control to an [`Observer`]
//! after every step so a host can render progress or cancel.
//!
//! - [`astar`] runs one search from a source cell to a target cell.
//! - [`manhattan`] is the heuristic (admissible for 4-way unit moves).
//! - [`SearchResult`] reports `Found`, `Unreachable` or `Cancelled`.

mod astar;
mod distance;
mod outcome;
mod traits;

pub use astar::astar;
pub use distance::manhattan;
pub use outcome::{Path, SearchOutcome, SearchResult};
pub use traits::{Flow, Observer};
