//! Per-segment collision quads
//!
//! The track surface is one quad per boundary sample step instead of a
//! single non-convex polygon for the whole loop, so every shape can go
//! straight into a convex-only physics engine.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Tolerance for points lying on a quad edge
const EDGE_EPSILON: f32 = 1e-5;

/// Quad `(left[j], left[j + 1], right[j + 1], right[j])` in world space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CollisionPolygon {
    pub vertices: [Vec2; 4],
}

impl CollisionPolygon {
    pub const fn new(vertices: [Vec2; 4]) -> Self {
        Self { vertices }
    }

    /// Twice the signed area (positive when counter-clockwise)
    fn signed_area2(&self) -> f32 {
        let v = &self.vertices;
        (0..4).map(|i| v[i].perp_dot(v[(i + 1) % 4])).sum()
    }

    pub fn area(&self) -> f32 {
        self.signed_area2().abs() / 2.0
    }

    pub fn centroid(&self) -> Vec2 {
        self.vertices.iter().copied().sum::<Vec2>() / 4.0
    }

    /// Axis-aligned bounding box as `(min, max)`
    pub fn aabb(&self) -> (Vec2, Vec2) {
        self.vertices
            .iter()
            .fold((Vec2::splat(f32::MAX), Vec2::splat(f32::MIN)), |(lo, hi), v| {
                (lo.min(*v), hi.max(*v))
            })
    }

    /// Every corner turns the same way
    ///
    /// Very sharp bends can fold a quad over itself; such quads report false.
    pub fn is_convex(&self) -> bool {
        let v = &self.vertices;
        let turns: Vec<f32> = (0..4)
            .map(|i| (v[(i + 1) % 4] - v[i]).perp_dot(v[(i + 2) % 4] - v[(i + 1) % 4]))
            .collect();
        turns.iter().all(|t| *t >= -EDGE_EPSILON) || turns.iter().all(|t| *t <= EDGE_EPSILON)
    }

    /// Whether `p` is inside or on the edge, for either winding
    pub fn contains_point(&self, p: Vec2) -> bool {
        let winding = if self.signed_area2() >= 0.0 { 1.0 } else { -1.0 };
        let v = &self.vertices;
        (0..4).all(|i| {
            let edge = v[(i + 1) % 4] - v[i];
            winding * edge.perp_dot(p - v[i]) >= -EDGE_EPSILON
        })
    }
}
