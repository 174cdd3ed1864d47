//! Midpoint displacement on every hull edge

use glam::Vec2;
use rand::Rng;

use super::error::{GenerationFailed, Stage};
use crate::config::TrackConfig;

/// Interleave `hull` with a randomly displaced midpoint per edge
///
/// Produces `[p0, m0, p1, m1, ..]` with twice as many points. Each midpoint
/// offset is redrawn until it lands inside the bounds, up to
/// `max_displacement_iterations` draws per edge.
pub fn subdivide_and_displace<R: Rng>(
    hull: &[Vec2],
    config: &TrackConfig,
    rng: &mut R,
    out: &mut Vec<Vec2>,
) -> Result<(), GenerationFailed> {
    out.clear();
    let n = hull.len();
    let max = Vec2::new(config.max_x_displacement, config.max_y_displacement);

    for (i, &p0) in hull.iter().enumerate() {
        let p1 = hull[(i + 1) % n];
        let midpoint = p0.lerp(p1, 0.5);

        let mut displaced = None;
        for _ in 0..config.max_displacement_iterations {
            let candidate = midpoint
                + Vec2::new(
                    rng.random_range(-max.x..=max.x),
                    rng.random_range(-max.y..=max.y),
                );
            if config.contains(candidate) {
                displaced = Some(candidate);
                break;
            }
        }

        let Some(displaced) = displaced else {
            return Err(GenerationFailed::new(
                Stage::Displacement,
                format!(
                    "edge {i}: no in-bounds midpoint within {} draws",
                    config.max_displacement_iterations
                ),
            ));
        };

        out.push(p0);
        out.push(displaced);
    }

    Ok(())
}
