//! Parking-lot geometry, routing and space allocation.
//!
//! Layers, leaves first:
//! - `geom`: vector kernel, rectangles, Separating Axis Theorem.
//! - `lot`: spaces, paths, waypoints and the `Lot` aggregate.
//! - `corridor`: margin-padded lanes and space reachability.
//! - `route`: shortest entrance-to-space route across levels.
//! - `assign`: nearest free space of a kind and the check-in/out policy.
//! - `validate`: the lot preconditions the layers above assume.
//! - `synth`: seeded comb-layout lots for benches and tests.
//!
//! Entry points for callers are `route::superpath_to_space`,
//! `assign::best_space` and `assign::handle_checkin`; `api` collects them.

pub mod api;
pub mod assign;
pub mod cfg;
pub mod corridor;
pub mod geom;
pub mod lot;
pub mod route;
pub mod synth;
pub mod validate;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use cfg::NavCfg;
pub use geom::{Location, Rect, Vec2};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::assign::{best_space, handle_checkin, CheckinOutcome, Confirm, Prompt};
    pub use crate::cfg::NavCfg;
    pub use crate::geom::{Location, Rect, Vec2};
    pub use crate::lot::{Lot, Path, Space, SpaceId, SpaceKind, Vehicle, VehicleId};
    pub use crate::route::{superpath_to_space, Superpath};
    pub use crate::validate::{validate_lot, LotError};
}
