//! Curated surface for loaders, renderers and front ends.
//!
//! - Loaders build a `Lot` and run `validate_lot` before anything else.
//! - Renderers consume `Superpath` segments plus the lot's raw geometry.
//! - Rule checkers reuse the SAT primitive and corridor construction.

// Allocation policy
pub use crate::assign::{
    best_space, best_space_id, best_space_with, handle_checkin, handle_checkin_with,
    CheckinOutcome, Confirm, Prompt,
};
// Routing
pub use crate::route::{
    follow_to_entrance, superpath_to_space, superpath_to_space_with, Superpath,
};
// Geometry reused by rule checkers
pub use crate::corridor::{available_paths, is_reachable, path_corridor};
pub use crate::geom::{rects_overlap, separating_axis, Location, Rect, Vec2};
// Model and validation
pub use crate::cfg::NavCfg;
pub use crate::lot::{
    superpath_length, Footprint, Lot, Path, Space, SpaceId, SpaceKind, Vehicle, VehicleId,
};
pub use crate::validate::{validate_lot, validate_lot_with, LotError, MAX_NAME_LEN};
