//! Reusable working buffers for the generation pipeline
//!
//! The outer retry loop reruns every stage from scratch. Allocating the
//! buffers once per `generate` call (sized from the config) and clearing
//! them between attempts keeps retries allocation-free.

use glam::Vec2;

#[derive(Debug, Default)]
pub struct Scratch {
    /// Sampled random points
    pub points: Vec<Vec2>,
    /// Hull vertex loop
    pub hull: Vec<Vec2>,
    /// Collinear candidates found during one hull step
    pub collinear: Vec<Vec2>,
    /// Hull vertices interleaved with displaced midpoints
    pub subdivided: Vec<Vec2>,
}

impl Scratch {
    /// Buffers large enough that no stage reallocates for `num_points` input points
    pub fn with_capacity(num_points: usize) -> Self {
        Self {
            points: Vec::with_capacity(num_points),
            hull: Vec::with_capacity(num_points),
            collinear: Vec::with_capacity(num_points),
            subdivided: Vec::with_capacity(num_points * 2),
        }
    }
}
