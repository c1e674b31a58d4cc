//! Route search: shortest legal route from the lot entrance to a space.
//!
//! Purpose
//! - Paths are not an adjacency list. Edges are derived: a space hangs off every
//!   path whose accessibility corridor it touches; a path follows another when
//!   their endpoint and start coincide; levels connect through up/down waypoints.
//! - For each path serving the target space, split it at the point closest to the
//!   space entry, trace the split path's start backwards to the entrance, and
//!   keep the shortest complete route (a `Superpath`).
//!
//! Preconditions
//! - The lot passed `crate::validate::validate_lot` (non-zero paths, levels in range).
//! - Acyclicity is checked there too, but the backward trace also refuses to
//!   revisit a location on its own stack and stops at `NavCfg::max_hops`, so a
//!   cyclic lot yields "no route" instead of unbounded recursion.
//! - Finished traces are memoized per location inside one tracer, which
//!   `superpath_to_space_with` shares across serving paths and
//!   `best_space_id` shares across candidate spaces.

mod search;
mod superpath;

pub use search::{
    closest_point_on_path, follow_to_entrance, superpath_to_space, superpath_to_space_with,
    turnpath,
};
pub(crate) use search::EntranceTracer;
pub use superpath::Superpath;
