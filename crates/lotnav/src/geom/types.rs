//! Value types shared by every layer: `Vec2`, `Location`, `Rect`.

use nalgebra::Vector2;

/// Plain 2D vector. Matches the nalgebra type used throughout.
pub type Vec2 = Vector2<f64>;

/// A point pinned to a level index.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Location {
    pub x: f64,
    pub y: f64,
    pub level: i32,
}

impl Location {
    #[inline]
    pub fn new(x: f64, y: f64, level: i32) -> Self {
        Self { x, y, level }
    }

    #[inline]
    pub fn at(p: Vec2, level: i32) -> Self {
        Self {
            x: p.x,
            y: p.y,
            level,
        }
    }

    #[inline]
    pub fn xy(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Same level and coordinates equal within `eps` per axis.
    #[inline]
    pub fn coincides(&self, other: &Location, eps: f64) -> bool {
        self.level == other.level
            && (self.x - other.x).abs() <= eps
            && (self.y - other.y).abs() <= eps
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.2}, {:.2}, level {})", self.x, self.y, self.level)
    }
}

/// Quadrilateral with corners in traversal order.
///
/// Produced by `Space::rectangle` (corner 0 is the space's anchor, corner 0→1
/// its entry edge) and by `corridor::path_corridor`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub corners: [Vec2; 4],
}

impl Rect {
    #[inline]
    pub fn new(corners: [Vec2; 4]) -> Self {
        Self { corners }
    }

    /// Edge `k` runs from corner `k` to corner `k+1 (mod 4)`.
    #[inline]
    pub fn edge(&self, k: usize) -> Vec2 {
        self.corners[(k + 1) % 4] - self.corners[k]
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.corners.iter().fold(Vec2::zeros(), |acc, p| acc + p) / 4.0
    }

    /// Largest corner distance from the center.
    pub fn bounding_radius(&self) -> f64 {
        let c = self.center();
        self.corners
            .iter()
            .map(|p| (p - c).norm())
            .fold(0.0, f64::max)
    }

    /// Rigid translation of all four corners.
    #[inline]
    pub fn translated(&self, by: Vec2) -> Self {
        Self {
            corners: self.corners.map(|p| p + by),
        }
    }
}
