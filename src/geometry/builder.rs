//! Boundary splines, surface mesh and collision quads from a centre line

use glam::Vec2;

use super::collision::CollisionPolygon;
use super::mesh::{TrackVertex, ribbon_triangles, ribbon_vertices};
use crate::spline::Spline;

/// Everything derived from a centre spline and its widths
///
/// Disposable: rebuilt from scratch whenever the track changes.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackGeometry {
    /// Left edge through `centre[i] - normal(i / L) * width[i] / 2`
    pub left_spline: Spline,
    /// Right edge through `centre[i] + normal(i / L) * width[i] / 2`
    pub right_spline: Spline,
    /// Left edge sampled at `j / resolution`
    pub left_samples: Vec<Vec2>,
    /// Right edge sampled at `j / resolution`
    pub right_samples: Vec<Vec2>,
    /// `[left0, right0, left1, right1, ..]`
    pub vertices: Vec<TrackVertex>,
    pub triangles: Vec<[u32; 3]>,
    /// One convex quad per sample step
    pub collision_polygons: Vec<CollisionPolygon>,
}

impl TrackGeometry {
    pub fn resolution(&self) -> usize {
        self.left_samples.len()
    }

    /// Triangle list flattened for an index buffer
    pub fn indices(&self) -> Vec<u32> {
        self.triangles.iter().flatten().copied().collect()
    }

    /// Left edge control points, one per centre knot
    pub fn left_knots(&self) -> &[Vec2] {
        self.left_spline.points()
    }

    pub fn right_knots(&self) -> &[Vec2] {
        self.right_spline.points()
    }

    /// Edge control points at knot `i`, as `(left, right)`
    ///
    /// A gate across the track at that knot.
    pub fn gate(&self, i: usize) -> (Vec2, Vec2) {
        (self.left_knots()[i], self.right_knots()[i])
    }

    /// Index of the first collision quad containing `p`
    pub fn segment_at(&self, p: Vec2) -> Option<usize> {
        self.collision_polygons
            .iter()
            .position(|quad| quad.contains_point(p))
    }

    /// Whether `p` is on the track surface
    pub fn contains_point(&self, p: Vec2) -> bool {
        self.segment_at(p).is_some()
    }
}

/// Builds [`TrackGeometry`]
pub struct TrackGeometryBuilder;

impl TrackGeometryBuilder {
    /// Derive edges, mesh and collision quads
    ///
    /// # Panics
    ///
    /// When `widths` does not match the centre control points one to one,
    /// when the centre spline has fewer than 4 points, or when `resolution`
    /// is zero. These are caller bugs, not generation failures.
    pub fn build(centre: &Spline, widths: &[f32], resolution: usize) -> TrackGeometry {
        assert_eq!(
            widths.len(),
            centre.len(),
            "one width per centre control point"
        );
        assert!(centre.is_evaluable(), "centre spline has too few points");
        assert!(resolution > 0, "resolution must be positive");

        let (left_knots, right_knots) = Self::offset_knots(centre, widths);
        let left_spline = Spline::new(left_knots, centre.alpha());
        let right_spline = Spline::new(right_knots, centre.alpha());

        let left_samples = left_spline.sample(resolution);
        let right_samples = right_spline.sample(resolution);

        let vertices = ribbon_vertices(&left_samples, &right_samples);
        let triangles = ribbon_triangles(resolution);
        let collision_polygons = (0..resolution)
            .map(|j| {
                let k = (j + 1) % resolution;
                CollisionPolygon::new([
                    left_samples[j],
                    left_samples[k],
                    right_samples[k],
                    right_samples[j],
                ])
            })
            .collect();

        log::debug!(
            "Built track geometry: {} knots, {} samples per edge, {} triangles",
            centre.len(),
            resolution,
            resolution * 2
        );

        TrackGeometry {
            left_spline,
            right_spline,
            left_samples,
            right_samples,
            vertices,
            triangles,
            collision_polygons,
        }
    }

    /// Control points of the left and right edges
    fn offset_knots(centre: &Spline, widths: &[f32]) -> (Vec<Vec2>, Vec<Vec2>) {
        let n = centre.len();
        centre
            .points()
            .iter()
            .zip(widths)
            .enumerate()
            .map(|(i, (p, w))| {
                let offset = centre.normal(i as f32 / n as f32) * (w / 2.0);
                (*p - offset, *p + offset)
            })
            .unzip()
    }
}
