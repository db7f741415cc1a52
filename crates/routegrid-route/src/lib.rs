//! Multi-stop route planning.
//!
//! A [`RouteSet`] is the ordered list of stops (start, waypoints, end) whose
//! board labels are a pure function of position. [`run_all`] chains one A\*
//! search per consecutive pair of stops and re-asserts stop labels between
//! segments. [`Session`] owns a board and a route and exposes the five
//! editing operations a front-end drives.

mod error;
mod planner;
mod route;
mod session;

pub use error::InvalidOperation;
pub use planner::{PlanOutcome, RouteReport, SegmentReport, SegmentResult, run_all};
pub use route::{RouteSet, label_for};
pub use session::{Session, SessionConfig};
