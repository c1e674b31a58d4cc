//! Read-only lookups over a `Lot`.

use std::collections::BTreeSet;
use std::fmt;

use crate::geom::Location;

use super::types::{Lot, Path, SpaceId, VehicleId};

/// Sum of segment lengths.
pub fn superpath_length(segments: &[Path]) -> f64 {
    segments.iter().map(Path::length).sum()
}

impl Lot {
    pub fn space_by_name(&self, name: &str) -> Option<SpaceId> {
        self.spaces.iter().position(|s| s.name == name).map(SpaceId)
    }

    /// Space currently held by `vehicle`, if any.
    pub fn space_of_vehicle(&self, vehicle: VehicleId) -> Option<SpaceId> {
        self.spaces
            .iter()
            .position(|s| s.occupant == Some(vehicle))
            .map(SpaceId)
    }

    pub fn occupied_count(&self) -> usize {
        self.spaces.iter().filter(|s| !s.is_empty()).count()
    }

    /// Distinct levels referenced by spaces, paths, ups and downs.
    pub fn count_levels(&self) -> usize {
        let levels: BTreeSet<i32> = self
            .spaces
            .iter()
            .map(|s| s.level())
            .chain(self.paths.iter().map(|p| p.level()))
            .chain(self.ups.iter().map(|l| l.level))
            .chain(self.downs.iter().map(|l| l.level))
            .collect();
        levels.len()
    }

    /// Paths on `at.level` whose endpoint is `at`, in declaration order.
    pub fn paths_ending_at(&self, at: &Location, eps: f64) -> impl Iterator<Item = &Path> + '_ {
        let at = *at;
        self.paths
            .iter()
            .filter(move |p| p.level() == at.level && p.endpoint().coincides(&at, eps))
    }

    pub fn is_up(&self, at: &Location, eps: f64) -> bool {
        self.ups.iter().any(|u| u.coincides(at, eps))
    }

    pub fn is_down(&self, at: &Location, eps: f64) -> bool {
        self.downs.iter().any(|d| d.coincides(at, eps))
    }

    /// First up declared on `level`.
    pub fn up_on_level(&self, level: i32) -> Option<Location> {
        self.ups.iter().find(|u| u.level == level).copied()
    }

    /// First down declared on `level`.
    pub fn down_on_level(&self, level: i32) -> Option<Location> {
        self.downs.iter().find(|d| d.level == level).copied()
    }
}

impl fmt::Display for Lot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Entrance: {}", self.entrance)?;
        writeln!(f, "POI: {}", self.poi)?;
        writeln!(
            f,
            "Levels: {} (ramp length {:.2})",
            self.level_count, self.ramp_length
        )?;
        writeln!(f, "Paths:")?;
        for (i, p) in self.paths.iter().enumerate() {
            writeln!(
                f,
                "  {i}: start={} vector=({:.2}, {:.2})",
                p.start, p.vector.x, p.vector.y
            )?;
        }
        writeln!(f, "Spaces:")?;
        for (i, s) in self.spaces.iter().enumerate() {
            let state = match s.occupant {
                Some(v) => format!("vehicle {}", v.0),
                None => "empty".to_string(),
            };
            writeln!(
                f,
                "  {i}: {} {} at {} rot={:.1}° [{state}]",
                s.name, s.kind, s.location, s.rotation
            )?;
        }
        writeln!(f, "Ups:")?;
        for u in &self.ups {
            writeln!(f, "  {u}")?;
        }
        writeln!(f, "Downs:")?;
        for d in &self.downs {
            writeln!(f, "  {d}")?;
        }
        Ok(())
    }
}
