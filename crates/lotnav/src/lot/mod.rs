//! Lot data model: spaces, paths, waypoints and the `Lot` aggregate.
//!
//! A `Lot` is built once by a loader and afterwards only changes through
//! space occupancy. Space rectangles are derived on demand from the kind's
//! footprint, the anchor location and the rotation, never stored.

mod query;
mod types;

pub use query::superpath_length;
pub use types::{Footprint, Lot, Path, Space, SpaceId, SpaceKind, Vehicle, VehicleId};

#[cfg(test)]
mod tests;
