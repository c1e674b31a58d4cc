//! Separating Axis Theorem for rectangles.
//!
//! Only two axes per rectangle are tested (normals of edges 0 and 1): opposite
//! edges are parallel, so their normals repeat. Touching intervals count as
//! overlapping.

use super::kernel::normal;
use super::types::{Rect, Vec2};

#[inline]
fn project(rect: &Rect, axis: Vec2) -> (f64, f64) {
    rect.corners
        .iter()
        .map(|p| p.dot(&axis))
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), d| {
            (lo.min(d), hi.max(d))
        })
}

/// First axis along which the projections of `a` and `b` are disjoint, or
/// `None` when every candidate axis overlaps (the rectangles intersect).
pub fn separating_axis(a: &Rect, b: &Rect) -> Option<Vec2> {
    let axes = [
        normal(a.edge(0)),
        normal(a.edge(1)),
        normal(b.edge(0)),
        normal(b.edge(1)),
    ];
    axes.into_iter().find(|&axis| {
        let (a_lo, a_hi) = project(a, axis);
        let (b_lo, b_hi) = project(b, axis);
        a_hi < b_lo || b_hi < a_lo
    })
}

/// Collision test: true when no separating axis exists.
#[inline]
pub fn rects_overlap(a: &Rect, b: &Rect) -> bool {
    separating_axis(a, b).is_none()
}
