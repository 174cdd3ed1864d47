//! Triangle strip between the two sampled track edges

use bytemuck::{Pod, Zeroable};
use glam::Vec2;

/// Track surface vertex, ready for a vertex buffer
///
/// `uv.x` is 0 on the left edge and 1 on the right; `uv.y` runs from 0 to
/// 1 around the loop.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct TrackVertex {
    pub position: [f32; 2],
    pub uv: [f32; 2],
}

impl TrackVertex {
    pub const fn new(x: f32, y: f32, u: f32, v: f32) -> Self {
        Self {
            position: [x, y],
            uv: [u, v],
        }
    }

    #[inline]
    pub fn position(&self) -> Vec2 {
        Vec2::from_array(self.position)
    }
}

/// Interleave edge samples as `[left0, right0, left1, right1, ..]`
pub fn ribbon_vertices(left: &[Vec2], right: &[Vec2]) -> Vec<TrackVertex> {
    assert_eq!(left.len(), right.len(), "edge sample counts differ");
    let resolution = left.len() as f32;

    let mut vertices = Vec::with_capacity(left.len() * 2);
    for (j, (l, r)) in left.iter().zip(right).enumerate() {
        let v = j as f32 / resolution;
        vertices.push(TrackVertex::new(l.x, l.y, 0.0, v));
        vertices.push(TrackVertex::new(r.x, r.y, 1.0, v));
    }
    vertices
}

/// Two triangles per sample step, wrapping so the ribbon closes
///
/// Step `j` gives `(left[j], left[j + 1], right[j])` and
/// `(right[j], left[j + 1], right[j + 1])`, indices modulo `2 * resolution`.
pub fn ribbon_triangles(resolution: usize) -> Vec<[u32; 3]> {
    let count = (resolution * 2) as u32;
    let mut triangles = Vec::with_capacity(resolution * 2);
    for j in 0..resolution as u32 {
        let base = j * 2;
        triangles.push([base % count, (base + 2) % count, (base + 1) % count]);
        triangles.push([(base + 1) % count, (base + 2) % count, (base + 3) % count]);
    }
    triangles
}
