//! Path corridors and space reachability.
//!
//! A corridor is the path segment thickened by `margin` on both sides (no end
//! caps). With `NavCfg::path_clearance` it is the lane no space may enter; with
//! `NavCfg::path_accessibility` it is the band a space must touch to be served
//! by that path.

use crate::geom::{normal, rects_overlap, Rect};
use crate::lot::{Lot, Path, Space};

/// Rectangle `start ± n·margin, end ± n·margin`, `n` the unit left normal.
/// Corner order: start-right, end-right, end-left, start-left.
pub fn path_corridor(path: &Path, margin: f64) -> Rect {
    let offset = normal(path.vector.normalize()) * margin;
    let start = path.start.xy();
    let end = start + path.vector;
    Rect::new([start - offset, end - offset, end + offset, start + offset])
}

/// Whether `space` overlaps the corridor of `path` widened by `max_distance`.
/// Spaces on another level are never reachable.
pub fn is_reachable(space: &Space, path: &Path, max_distance: f64) -> bool {
    space.level() == path.level()
        && rects_overlap(&space.rectangle(), &path_corridor(path, max_distance))
}

/// Paths from which `space` is reachable, in declaration order.
pub fn available_paths(lot: &Lot, space: &Space, max_distance: f64) -> Vec<Path> {
    lot.paths
        .iter()
        .filter(|p| is_reachable(space, p, max_distance))
        .copied()
        .collect()
}
