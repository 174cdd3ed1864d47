//! Convex hull by gift wrapping (Jarvis march)

use glam::Vec2;

use super::error::{GenerationFailed, Stage};

/// Index of the lowest point, ties broken by lowest x
///
/// The lexicographic minimum is always a hull vertex.
pub fn lowest_point_index(points: &[Vec2]) -> Option<usize> {
    points
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| a.y.total_cmp(&b.y).then(a.x.total_cmp(&b.x)))
        .map(|(i, _)| i)
}

/// Write the hull vertex loop of `points` into `out`
///
/// Walks from the lowest point, each step taking the candidate every other
/// point lies to the right of, so the loop winds clockwise. Points lying
/// exactly on a hull edge are kept, ordered by distance from the edge
/// start. Each step counts against `max_iterations`; `collinear` is scratch
/// space.
pub fn convex_hull(
    points: &[Vec2],
    max_iterations: u32,
    collinear: &mut Vec<Vec2>,
    out: &mut Vec<Vec2>,
) -> Result<(), GenerationFailed> {
    out.clear();
    if points.len() < 3 {
        return Err(GenerationFailed::new(
            Stage::ConvexHull,
            format!("need at least 3 points, got {}", points.len()),
        ));
    }

    // Non-empty by the check above
    let start = points[lowest_point_index(points).unwrap_or(0)];
    out.push(start);
    let mut current = start;
    let mut iteration = 0;

    loop {
        iteration += 1;
        if iteration > max_iterations {
            return Err(GenerationFailed::new(
                Stage::ConvexHull,
                format!("hull did not close within {max_iterations} iterations"),
            ));
        }

        collinear.clear();
        let mut next: Option<Vec2> = None;
        for &candidate in points {
            if candidate == current {
                continue;
            }
            let Some(target) = next else {
                next = Some(candidate);
                continue;
            };

            let to_target = target - current;
            let to_candidate = candidate - current;
            let turn = to_target.perp_dot(to_candidate);
            if turn > 0.0 {
                next = Some(candidate);
                collinear.clear();
            } else if turn == 0.0 && to_target.dot(to_candidate) > 0.0 {
                if to_target.length_squared() < to_candidate.length_squared() {
                    collinear.push(target);
                    next = Some(candidate);
                } else {
                    collinear.push(candidate);
                }
            }
        }

        let Some(next) = next else {
            return Err(GenerationFailed::new(
                Stage::ConvexHull,
                "all points coincide",
            ));
        };

        collinear.sort_by(|a, b| {
            current
                .distance_squared(*a)
                .total_cmp(&current.distance_squared(*b))
        });
        out.extend_from_slice(collinear);

        if next == start {
            break;
        }
        out.push(next);
        current = next;
    }

    log::trace!("Convex hull closed with {} vertices in {iteration} steps", out.len());
    Ok(())
}
