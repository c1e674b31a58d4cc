//! Lot validation: the preconditions route search and allocation rely on.
//!
//! Rules run in a fixed order and stop at the first failure, so the reported
//! error is the earliest rule a lot breaks.

use std::collections::HashSet;

use thiserror::Error;

use crate::cfg::{NavCfg, ZERO_LEN_EPS};
use crate::corridor::{is_reachable, path_corridor};
use crate::geom::{rects_overlap, Location};
use crate::lot::Lot;

/// Longest accepted space name.
pub const MAX_NAME_LEN: usize = 10;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LotError {
    #[error("path {0} has zero length")]
    ZeroLengthPath(usize),
    #[error("paths are not all connected")]
    PathNotConnected,
    #[error("spaces `{0}` and `{1}` overlap")]
    SpacesOverlap(String, String),
    #[error("space `{0}` encroaches on path {1}")]
    SpacesEncroachPath(String, usize),
    #[error("space `{0}` is not accessible from any path")]
    SpacesInaccessible(String),
    #[error("entrance or POI is on an invalid level")]
    InvalidEntranceOrPoi,
    #[error("duplicate space name `{0}`")]
    DuplicateSpaceNames(String),
    #[error("incorrect number of ups/downs for {0} levels")]
    IncorrectUpDownCount(i32),
    #[error("level {0} is missing a required up or down")]
    LevelsMissingUpsOrDowns(i32),
    #[error("space name `{0}` exceeds {MAX_NAME_LEN} characters")]
    SpaceNameTooLong(String),
    #[error("space `{0}` is on level {1}, outside the lot")]
    SpaceLevelOutOfRange(String, i32),
    #[error("paths form a cycle through path {0}")]
    PathCycle(usize),
}

/// Validate with default margins and tolerances.
pub fn validate_lot(lot: &Lot) -> Result<(), LotError> {
    validate_lot_with(lot, &NavCfg::default())
}

pub fn validate_lot_with(lot: &Lot, cfg: &NavCfg) -> Result<(), LotError> {
    if let Some(i) = lot.paths.iter().position(|p| p.length() < ZERO_LEN_EPS) {
        return Err(LotError::ZeroLengthPath(i));
    }
    if !paths_connected(lot, cfg.loc_eps) {
        return Err(LotError::PathNotConnected);
    }
    spaces_disjoint(lot)?;
    spaces_clear_of_paths(lot, cfg.path_clearance)?;
    spaces_accessible(lot, cfg.path_accessibility)?;
    if !on_valid_level(lot, &lot.entrance) || !on_valid_level(lot, &lot.poi) {
        return Err(LotError::InvalidEntranceOrPoi);
    }
    unique_names(lot)?;
    waypoint_counts(lot)?;
    waypoints_per_level(lot)?;
    if let Some(s) = lot.spaces.iter().find(|s| s.name.chars().count() > MAX_NAME_LEN) {
        return Err(LotError::SpaceNameTooLong(s.name.clone()));
    }
    if let Some(s) = lot.spaces.iter().find(|s| !on_valid_level(lot, &s.location)) {
        return Err(LotError::SpaceLevelOutOfRange(s.name.clone(), s.level()));
    }
    acyclic(lot, cfg.loc_eps)
}

fn on_valid_level(lot: &Lot, at: &Location) -> bool {
    (0..lot.level_count).contains(&at.level)
}

/// Every path starts somewhere reachable (an endpoint, the entrance, or a
/// waypoint), and every waypoint touches some path.
pub fn paths_connected(lot: &Lot, eps: f64) -> bool {
    let ends: Vec<Location> = lot.paths.iter().map(|p| p.endpoint()).collect();
    let anchored = lot.paths.iter().all(|p| {
        ends.iter().any(|e| e.coincides(&p.start, eps))
            || p.start.coincides(&lot.entrance, eps)
            || lot.is_up(&p.start, eps)
            || lot.is_down(&p.start, eps)
    });
    let touched = |w: &Location| {
        lot.paths
            .iter()
            .zip(&ends)
            .any(|(p, e)| e.coincides(w, eps) || p.start.coincides(w, eps))
    };
    anchored && lot.ups.iter().all(touched) && lot.downs.iter().all(touched)
}

fn spaces_disjoint(lot: &Lot) -> Result<(), LotError> {
    let rects: Vec<_> = lot.spaces.iter().map(|s| s.rectangle()).collect();
    for (i, a) in lot.spaces.iter().enumerate() {
        for (j, b) in lot.spaces.iter().enumerate().skip(i + 1) {
            if a.level() == b.level() && rects_overlap(&rects[i], &rects[j]) {
                return Err(LotError::SpacesOverlap(a.name.clone(), b.name.clone()));
            }
        }
    }
    Ok(())
}

fn spaces_clear_of_paths(lot: &Lot, margin: f64) -> Result<(), LotError> {
    for (i, path) in lot.paths.iter().enumerate() {
        let lane = path_corridor(path, margin);
        if let Some(s) = lot
            .spaces
            .iter()
            .find(|s| s.level() == path.level() && rects_overlap(&s.rectangle(), &lane))
        {
            return Err(LotError::SpacesEncroachPath(s.name.clone(), i));
        }
    }
    Ok(())
}

fn spaces_accessible(lot: &Lot, max_distance: f64) -> Result<(), LotError> {
    match lot
        .spaces
        .iter()
        .find(|s| !lot.paths.iter().any(|p| is_reachable(s, p, max_distance)))
    {
        Some(s) => Err(LotError::SpacesInaccessible(s.name.clone())),
        None => Ok(()),
    }
}

fn unique_names(lot: &Lot) -> Result<(), LotError> {
    let mut seen = HashSet::new();
    match lot.spaces.iter().find(|s| !seen.insert(s.name.as_str())) {
        Some(s) => Err(LotError::DuplicateSpaceNames(s.name.clone())),
        None => Ok(()),
    }
}

fn waypoint_counts(lot: &Lot) -> Result<(), LotError> {
    if lot.level_count <= 1 {
        return Ok(());
    }
    let required = (lot.level_count - 1) as usize;
    if lot.ups.len() != required || lot.downs.len() != required {
        return Err(LotError::IncorrectUpDownCount(lot.level_count));
    }
    Ok(())
}

/// Every level but the top has an up; every level but the bottom has a down.
fn waypoints_per_level(lot: &Lot) -> Result<(), LotError> {
    if lot.level_count <= 1 {
        return Ok(());
    }
    for level in 0..lot.level_count {
        let needs_up = level < lot.level_count - 1;
        let needs_down = level > 0;
        if (needs_up && lot.up_on_level(level).is_none())
            || (needs_down && lot.down_on_level(level).is_none())
        {
            return Err(LotError::LevelsMissingUpsOrDowns(level));
        }
    }
    Ok(())
}

/// Same-level successor graph (a → b when a ends where b starts) has no cycle.
fn acyclic(lot: &Lot, eps: f64) -> Result<(), LotError> {
    #[derive(Clone, Copy, PartialEq)]
    enum Mark {
        New,
        Open,
        Done,
    }
    let n = lot.paths.len();
    let succ: Vec<Vec<usize>> = lot
        .paths
        .iter()
        .map(|a| {
            let end = a.endpoint();
            (0..n)
                .filter(|&j| lot.paths[j].start.coincides(&end, eps))
                .collect()
        })
        .collect();
    let mut mark = vec![Mark::New; n];
    for root in 0..n {
        if mark[root] != Mark::New {
            continue;
        }
        // Iterative DFS: (node, next successor index).
        let mut stack = vec![(root, 0usize)];
        mark[root] = Mark::Open;
        while let Some(top) = stack.last_mut() {
            let (node, next) = *top;
            if let Some(&child) = succ[node].get(next) {
                top.1 += 1;
                match mark[child] {
                    Mark::Open => return Err(LotError::PathCycle(child)),
                    Mark::New => {
                        mark[child] = Mark::Open;
                        stack.push((child, 0));
                    }
                    Mark::Done => {}
                }
            } else {
                mark[node] = Mark::Done;
                stack.pop();
            }
        }
    }
    Ok(())
}
