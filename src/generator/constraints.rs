//! Segment length and corner angle checks over a closed loop

use glam::Vec2;

/// First constraint a loop breaks
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Violation {
    /// Segment `index -> index + 1` is shorter than allowed
    SegmentTooShort { index: usize, distance: f32 },
    /// Corner at `index` is sharper than allowed
    CornerTooSharp { index: usize, angle: f32 },
    /// Fewer than three points cannot form a loop
    TooFewPoints(usize),
}

/// Angle at `p1` between `p0 - p1` and `p2 - p1`, in degrees
///
/// 180 for a straight pass, 0 for a full reversal. A zero-length arm counts
/// as a 0 degree corner.
pub fn corner_angle_degrees(p0: Vec2, p1: Vec2, p2: Vec2) -> f32 {
    let from = (p0 - p1).normalize_or_zero();
    let to = (p2 - p1).normalize_or_zero();
    if from == Vec2::ZERO || to == Vec2::ZERO {
        return 0.0;
    }
    from.dot(to).clamp(-1.0, 1.0).acos().to_degrees()
}

/// Scan every consecutive triple (wrapping) and report the first violation
pub fn first_violation(
    points: &[Vec2],
    min_segment_distance: f32,
    min_corner_angle_degrees: f32,
) -> Option<Violation> {
    let n = points.len();
    if n < 3 {
        return Some(Violation::TooFewPoints(n));
    }

    let min_sq = min_segment_distance * min_segment_distance;
    for i in 0..n {
        let p0 = points[i];
        let p1 = points[(i + 1) % n];
        let p2 = points[(i + 2) % n];

        let dist_sq = p0.distance_squared(p1);
        if dist_sq < min_sq {
            return Some(Violation::SegmentTooShort {
                index: i,
                distance: dist_sq.sqrt(),
            });
        }

        let angle = corner_angle_degrees(p0, p1, p2);
        // NaN fails too
        if !(angle >= min_corner_angle_degrees) {
            return Some(Violation::CornerTooSharp {
                index: (i + 1) % n,
                angle,
            });
        }
    }
    None
}

/// Whether the loop satisfies both constraints everywhere
#[inline]
pub fn check_constraints(
    points: &[Vec2],
    min_segment_distance: f32,
    min_corner_angle_degrees: f32,
) -> bool {
    first_violation(points, min_segment_distance, min_corner_angle_degrees).is_none()
}
