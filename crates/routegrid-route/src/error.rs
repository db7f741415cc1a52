use std::fmt;

use routegrid_core::Pos;

/// An edit or run request that was refused. The board and route are left
/// untouched, so callers may simply ignore it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidOperation {
    /// The position lies outside the board.
    OutOfBounds(Pos),
    /// Barriers cannot become stops.
    BarrierCell(Pos),
    /// The cell is already in the route.
    AlreadyStop(Pos),
    /// Stops cannot become Barriers.
    StopCell(Pos),
    /// The cell is not in the route.
    NotAStop(Pos),
    /// A run needs a start and an end.
    NotEnoughStops { count: usize },
}

impl fmt::Display for InvalidOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds(p) => write!(f, "{p} is outside the board"),
            Self::BarrierCell(p) => write!(f, "{p} is a barrier"),
            Self::AlreadyStop(p) => write!(f, "{p} is already a stop"),
            Self::StopCell(p) => write!(f, "{p} is a stop"),
            Self::NotAStop(p) => write!(f, "{p} is not a stop"),
            Self::NotEnoughStops { count } => {
                write!(f, "a route needs at least 2 stops, have {count}")
            }
        }
    }
}

impl std::error::Error for InvalidOperation {}
