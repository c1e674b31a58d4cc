use super::types::Vec2;

/// z-component of `a × b`; positive when `b` is counterclockwise from `a`.
#[inline]
pub fn cross(a: Vec2, b: Vec2) -> f64 {
    a.x * b.y - a.y * b.x
}

/// Left perpendicular `(-y, x)`. Not normalized.
#[inline]
pub fn normal(v: Vec2) -> Vec2 {
    Vec2::new(-v.y, v.x)
}

#[inline]
pub fn deg_to_rad(deg: f64) -> f64 {
    deg.to_radians()
}

/// Counterclockwise rotation about the origin by `deg` degrees.
#[inline]
pub fn rotate_deg(v: Vec2, deg: f64) -> Vec2 {
    let (s, c) = deg_to_rad(deg).sin_cos();
    Vec2::new(v.x * c - v.y * s, v.x * s + v.y * c)
}

/// Closest point to `p` on segment `a→b`, with its parameter `t ∈ [0,1]`.
///
/// Pre: `a != b` (zero-length segments are rejected by validation).
#[inline]
pub fn project_onto_segment(p: Vec2, a: Vec2, b: Vec2) -> (f64, Vec2) {
    let seg = b - a;
    let t = ((p - a).dot(&seg) / seg.norm_squared()).clamp(0.0, 1.0);
    (t, a + seg * t)
}

/// Euclidean distance from `p` to the closed segment `a→b`.
#[inline]
pub fn point_to_segment_distance(p: Vec2, a: Vec2, b: Vec2) -> f64 {
    let (_, q) = project_onto_segment(p, a, b);
    (p - q).norm()
}
