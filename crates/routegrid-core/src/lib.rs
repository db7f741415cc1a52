//! **routegrid-core** - grid graph types for the routegrid route planner.
//!
//! This crate provides the foundational types used across the *routegrid*
//! workspace: board coordinates, the [`Status`] state machine that guards
//! how search bookkeeping may overwrite a cell, the square [`Grid`] that owns
//! every [`Cell`] and its adjacency, and the colour projection used by
//! renderers.

pub mod cell;
pub mod geom;
pub mod grid;
pub mod style;

pub use cell::{Cell, Mark, Status};
pub use geom::{Pos, Range};
pub use grid::Grid;
pub use style::Color;
