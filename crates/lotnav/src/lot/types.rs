use std::str::FromStr;

use crate::geom::{rotate_deg, Location, Rect, Vec2};

/// Index into `Lot::spaces`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SpaceId(pub usize);

/// Index into the caller's vehicle registry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct VehicleId(pub usize);

/// Real-world size of a space, in meters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Footprint {
    pub width: f64,
    pub height: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SpaceKind {
    Standard,
    Handicap,
    Compact,
    Ev,
}

impl SpaceKind {
    pub const ALL: [SpaceKind; 4] = [
        SpaceKind::Standard,
        SpaceKind::Handicap,
        SpaceKind::Compact,
        SpaceKind::Ev,
    ];

    /// Standardized footprint per kind. Domain data, not configuration.
    pub const fn footprint(self) -> Footprint {
        match self {
            SpaceKind::Standard => Footprint {
                width: 2.5,
                height: 5.0,
            },
            SpaceKind::Handicap => Footprint {
                width: 3.6,
                height: 5.0,
            },
            SpaceKind::Compact => Footprint {
                width: 2.3,
                height: 4.5,
            },
            SpaceKind::Ev => Footprint {
                width: 2.6,
                height: 5.0,
            },
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            SpaceKind::Standard => "Standard",
            SpaceKind::Handicap => "Handicap",
            SpaceKind::Compact => "Compact",
            SpaceKind::Ev => "EV",
        }
    }
}

impl std::fmt::Display for SpaceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for SpaceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "standard" => Ok(SpaceKind::Standard),
            "handicap" => Ok(SpaceKind::Handicap),
            "compact" => Ok(SpaceKind::Compact),
            "ev" => Ok(SpaceKind::Ev),
            other => Err(format!("unknown space kind `{other}`")),
        }
    }
}

/// A parking space. `location` is corner 0 of the unrotated footprint.
#[derive(Clone, Debug, PartialEq)]
pub struct Space {
    pub kind: SpaceKind,
    pub location: Location,
    /// Counterclockwise, degrees.
    pub rotation: f64,
    pub name: String,
    pub occupant: Option<VehicleId>,
}

impl Space {
    pub fn new(name: impl Into<String>, kind: SpaceKind, location: Location, rotation: f64) -> Self {
        Self {
            kind,
            location,
            rotation,
            name: name.into(),
            occupant: None,
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.occupant.is_none()
    }

    #[inline]
    pub fn level(&self) -> i32 {
        self.location.level
    }

    /// World-space corners: footprint rotated about its anchor, then moved to `location`.
    /// Corner 0→1 is the entry edge.
    pub fn rectangle(&self) -> Rect {
        let Footprint { width, height } = self.kind.footprint();
        let local = [
            Vec2::new(0.0, 0.0),
            Vec2::new(width, 0.0),
            Vec2::new(width, height),
            Vec2::new(0.0, height),
        ];
        let origin = self.location.xy();
        Rect::new(local.map(|p| rotate_deg(p, self.rotation) + origin))
    }

    /// Midpoint of the entry edge, on the space's level.
    pub fn entry_point(&self) -> Location {
        let r = self.rectangle();
        Location::at((r.corners[0] + r.corners[1]) / 2.0, self.level())
    }
}

/// A directed travel segment from `start` to `start + vector` on one level.
///
/// Pre: `vector` is non-zero (enforced by `crate::validate`).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Path {
    pub start: Location,
    pub vector: Vec2,
}

impl Path {
    #[inline]
    pub fn new(start: Location, vector: Vec2) -> Self {
        Self { start, vector }
    }

    /// Segment between two points; `to.level` is ignored.
    #[inline]
    pub fn between(from: Location, to: Location) -> Self {
        Self {
            start: from,
            vector: to.xy() - from.xy(),
        }
    }

    #[inline]
    pub fn endpoint(&self) -> Location {
        Location::at(self.start.xy() + self.vector, self.start.level)
    }

    #[inline]
    pub fn length(&self) -> f64 {
        self.vector.norm()
    }

    #[inline]
    pub fn level(&self) -> i32 {
        self.start.level
    }
}

/// A registered vehicle as seen by the allocation policy.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Vehicle {
    pub plate: String,
    pub kind: SpaceKind,
}

impl Vehicle {
    pub fn new(plate: impl Into<String>, kind: SpaceKind) -> Self {
        Self {
            plate: plate.into(),
            kind,
        }
    }
}

/// Aggregate root of a parking facility.
#[derive(Clone, Debug, PartialEq)]
pub struct Lot {
    pub level_count: i32,
    pub paths: Vec<Path>,
    pub spaces: Vec<Space>,
    /// Where a route may climb to the level above.
    pub ups: Vec<Location>,
    /// Where a route arrives from the level below.
    pub downs: Vec<Location>,
    pub entrance: Location,
    pub poi: Location,
    /// Routing penalty per level of separation from the entrance.
    pub ramp_length: f64,
}

impl Lot {
    /// Empty lot; the point of interest defaults to the entrance.
    pub fn new(level_count: i32, entrance: Location, ramp_length: f64) -> Self {
        Self {
            level_count,
            paths: Vec::new(),
            spaces: Vec::new(),
            ups: Vec::new(),
            downs: Vec::new(),
            entrance,
            poi: entrance,
            ramp_length,
        }
    }

    #[inline]
    pub fn space(&self, id: SpaceId) -> &Space {
        &self.spaces[id.0]
    }

    #[inline]
    pub fn space_mut(&mut self, id: SpaceId) -> &mut Space {
        &mut self.spaces[id.0]
    }
}
