//! Random point sampling with a minimum pairwise distance

use glam::Vec2;
use rand::Rng;

use super::error::{GenerationFailed, Stage};
use crate::config::TrackConfig;

/// Fewest random points the pipeline accepts
pub const MIN_RANDOM_POINTS: usize = 4;

/// Fill `out` with `num_random_points` points inside the config bounds
///
/// A set with any pair closer than `min_random_point_distance` is thrown
/// away whole and resampled. Fails without touching `rng` when fewer than
/// [`MIN_RANDOM_POINTS`] points are requested.
pub fn generate_random_points<R: Rng>(
    config: &TrackConfig,
    rng: &mut R,
    out: &mut Vec<Vec2>,
) -> Result<(), GenerationFailed> {
    if config.num_random_points < MIN_RANDOM_POINTS {
        return Err(GenerationFailed::new(
            Stage::RandomPoints,
            format!(
                "need at least {MIN_RANDOM_POINTS} random points, got {}",
                config.num_random_points
            ),
        ));
    }

    let half = config.half_bounds();
    for attempt in 1..=config.max_random_point_iterations {
        out.clear();
        out.extend((0..config.num_random_points).map(|_| {
            Vec2::new(
                rng.random_range(-half.x..=half.x),
                rng.random_range(-half.y..=half.y),
            )
        }));

        if min_pairwise_distance_ok(out, config.min_random_point_distance) {
            log::trace!("Random points accepted after {attempt} attempt(s)");
            return Ok(());
        }
    }

    Err(GenerationFailed::new(
        Stage::RandomPoints,
        "distance constraint unsatisfiable",
    ))
}

/// Every pair of points is at least `min_distance` apart
pub fn min_pairwise_distance_ok(points: &[Vec2], min_distance: f32) -> bool {
    let min_sq = min_distance * min_distance;
    points.iter().enumerate().all(|(i, a)| {
        points[i + 1..]
            .iter()
            .all(|b| a.distance_squared(*b) >= min_sq)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{RngCore, SeedableRng};
    use rand_pcg::Pcg32;

    fn config(num: usize) -> TrackConfig {
        TrackConfig {
            num_random_points: num,
            bounds: Vec2::new(100.0, 100.0),
            min_random_point_distance: 5.0,
            ..Default::default()
        }
    }

    #[test]
    fn test_points_within_bounds_and_spaced() {
        let config = config(8);
        let mut rng = Pcg32::seed_from_u64(1);
        let mut points = Vec::new();
        generate_random_points(&config, &mut rng, &mut points).unwrap();

        assert_eq!(points.len(), 8);
        assert!(points.iter().all(|p| config.contains(*p)));
        assert!(min_pairwise_distance_ok(&points, 5.0));
    }

    #[test]
    fn test_too_few_points_fails_without_draws() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut untouched = rng.clone();
        let mut points = Vec::new();

        let err = generate_random_points(&config(2), &mut rng, &mut points).unwrap_err();
        assert_eq!(err.stage, Stage::RandomPoints);
        assert!(points.is_empty());
        assert_eq!(rng.next_u32(), untouched.next_u32());
    }

    #[test]
    fn test_unsatisfiable_distance_gives_up() {
        let config = TrackConfig {
            num_random_points: 10,
            bounds: Vec2::new(1.0, 1.0),
            min_random_point_distance: 50.0,
            max_random_point_iterations: 20,
            ..Default::default()
        };
        let mut rng = Pcg32::seed_from_u64(3);
        let err = generate_random_points(&config, &mut rng, &mut Vec::new()).unwrap_err();
        assert_eq!(err.stage, Stage::RandomPoints);
        assert_eq!(err.reason, "distance constraint unsatisfiable");
    }

    #[test]
    fn test_pairwise_distance_check() {
        let points = [Vec2::ZERO, Vec2::new(3.0, 0.0), Vec2::new(0.0, 4.0)];
        assert!(min_pairwise_distance_ok(&points, 3.0));
        assert!(!min_pairwise_distance_ok(&points, 3.5));
        assert!(min_pairwise_distance_ok(&[], 100.0));
    }
}
