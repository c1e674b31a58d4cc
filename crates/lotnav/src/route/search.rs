//! Backward trace to the entrance and best-route selection.

use tracing::{debug, trace};

use crate::cfg::NavCfg;
use crate::corridor::available_paths;
use crate::geom::{project_onto_segment, Location, Vec2};
use crate::lot::{superpath_length, Lot, Path, Space};

use super::superpath::Superpath;

/// Shortest route from the entrance to `space` with default configuration.
pub fn superpath_to_space(lot: &Lot, space: &Space) -> Option<Superpath> {
    superpath_to_space_with(lot, space, &NavCfg::default())
}

/// Shortest route from the entrance to `space`: `[entrance route.., subpath, turnpath]`.
///
/// Returns `None` when no serving path connects back to the entrance. Among
/// equally long routes the first serving path (declaration order) wins.
pub fn superpath_to_space_with(lot: &Lot, space: &Space, cfg: &NavCfg) -> Option<Superpath> {
    EntranceTracer::new(lot, cfg).superpath_to(space, cfg)
}

/// Segments from the entrance to `from`, shortest first-found. `Some(empty)` at the entrance.
pub fn follow_to_entrance(lot: &Lot, from: Location, cfg: &NavCfg) -> Option<Vec<Path>> {
    EntranceTracer::new(lot, cfg).trace(from)
}

/// Point on `path` where a vehicle leaves it for `space`: the entry midpoint
/// projected onto the segment, clamped to its ends.
pub fn closest_point_on_path(path: &Path, space: &Space) -> Location {
    let a = path.start.xy();
    let (_, q) = project_onto_segment(space.entry_point().xy(), a, a + path.vector);
    Location::at(q, path.level())
}

/// Short hop from the turn-off point to the entry midpoint of `space`.
/// Zero-length when the two are on different levels.
pub fn turnpath(from: Location, space: &Space) -> Path {
    if from.level != space.level() {
        return Path::new(from, Vec2::zeros());
    }
    Path::between(from, space.entry_point())
}

/// Depth-first backward trace carrying the lot, tolerances and the current stack.
///
/// On an acyclic path graph the best route from a location depends on that
/// location only, so finished traces are memoized. A result is cached only when
/// neither the revisit check nor the hop limit cut its subtree.
pub(crate) struct EntranceTracer<'a> {
    lot: &'a Lot,
    eps: f64,
    hop_limit: usize,
    stack: Vec<Location>,
    memo: Vec<(Location, Option<Vec<Path>>)>,
    cut: bool,
}

impl<'a> EntranceTracer<'a> {
    pub(crate) fn new(lot: &'a Lot, cfg: &NavCfg) -> Self {
        let hop_limit = cfg
            .max_hops
            .unwrap_or(lot.paths.len() + lot.ups.len() + lot.downs.len() + 1);
        Self {
            lot,
            eps: cfg.loc_eps,
            hop_limit,
            stack: Vec::new(),
            memo: Vec::new(),
            cut: false,
        }
    }

    /// Shortest route to `space` over every serving path, reusing this tracer's memo.
    pub(crate) fn superpath_to(&mut self, space: &Space, cfg: &NavCfg) -> Option<Superpath> {
        let lot = self.lot;
        let mut best: Option<Superpath> = None;
        for path in available_paths(lot, space, cfg.path_accessibility) {
            let turn_at = closest_point_on_path(&path, space);
            let subpath = Path::between(path.start, turn_at);
            let turn = turnpath(turn_at, space);
            let Some(mut segments) = self.trace(path.start) else {
                trace!(space = %space.name, from = %path.start, "serving path not connected to entrance");
                continue;
            };
            segments.push(subpath);
            segments.push(turn);
            let candidate = Superpath::new(segments);
            if best
                .as_ref()
                .is_none_or(|b| candidate.length() < b.length())
            {
                best = Some(candidate);
            }
        }
        match &best {
            Some(route) => debug!(
                space = %space.name,
                segments = route.len(),
                length = route.length(),
                "route found"
            ),
            None => debug!(space = %space.name, "no route"),
        }
        best
    }

    fn trace(&mut self, at: Location) -> Option<Vec<Path>> {
        if at.coincides(&self.lot.entrance, self.eps) {
            return Some(Vec::new());
        }
        if let Some((_, known)) = self.memo.iter().find(|(l, _)| l.coincides(&at, self.eps)) {
            return known.clone();
        }
        if self.stack.iter().any(|l| l.coincides(&at, self.eps)) {
            debug!(%at, "backward trace revisits a location; path graph has a cycle");
            self.cut = true;
            return None;
        }
        if self.stack.len() >= self.hop_limit {
            debug!(%at, hops = self.stack.len(), "backward trace hit hop limit");
            self.cut = true;
            return None;
        }
        let cut_outside = std::mem::replace(&mut self.cut, false);
        self.stack.push(at);
        let found = self.step(at);
        self.stack.pop();
        if !self.cut {
            self.memo.push((at, found.clone()));
        }
        self.cut |= cut_outside;
        found
    }

    fn step(&mut self, at: Location) -> Option<Vec<Path>> {
        let lot = self.lot;
        let preds: Vec<Path> = lot.paths_ending_at(&at, self.eps).copied().collect();
        if preds.is_empty() {
            return self.change_level(at);
        }
        let mut best: Option<(f64, Vec<Path>)> = None;
        for pred in preds {
            let Some(mut route) = self.trace(pred.start) else {
                continue;
            };
            route.push(pred);
            let len = superpath_length(&route);
            if best.as_ref().is_none_or(|(b, _)| len < *b) {
                best = Some((len, route));
            }
        }
        best.map(|(_, route)| route)
    }

    /// Dead end on this level: an up continues from the level above's down,
    /// a down from the level below's up.
    fn change_level(&mut self, at: Location) -> Option<Vec<Path>> {
        let lot = self.lot;
        if lot.is_up(&at, self.eps) {
            if let Some(above) = lot.down_on_level(at.level + 1) {
                trace!(%at, to = %above, "up: continue on level above");
                return self.trace(above);
            }
        }
        if lot.is_down(&at, self.eps) {
            if let Some(below) = lot.up_on_level(at.level - 1) {
                trace!(%at, to = %below, "down: continue on level below");
                return self.trace(below);
            }
        }
        None
    }
}
