//! Planar geometry for lot layouts.
//!
//! Purpose
//! - Provide the small vector kernel (normals, rotation, segment projection),
//!   the 4-corner `Rect` used for spaces and path corridors, and the
//!   Separating Axis Theorem test that decides rectangle overlap.
//! - Vector add/sub/scale/dot/length come straight from `nalgebra::Vector2`;
//!   only the operations nalgebra does not name are defined here.
//!
//! Conventions
//! - Rect corners are stored in traversal order (either orientation); SAT only
//!   relies on opposite edges being parallel, never on axis alignment.
//! - Degenerate inputs (zero-length edges) are rejected by `crate::validate`
//!   before any of this runs; SAT on a degenerate rect is meaningless.

mod kernel;
mod sat;
mod types;

pub use kernel::{
    cross, deg_to_rad, normal, point_to_segment_distance, project_onto_segment, rotate_deg,
};
pub use sat::{rects_overlap, separating_axis};
pub use types::{Location, Rect, Vec2};
