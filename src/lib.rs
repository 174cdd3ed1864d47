//! Racetrack Gen - Seeded procedural race track generation
//!
//! Core modules:
//! - `generator`: Deterministic closed-loop generation (points, hull, displacement, validation)
//! - `spline`: Closed Catmull-Rom curve through the track points
//! - `geometry`: Edge splines, surface mesh and collision quads
//! - `track`: Immutable published tracks and the store that swaps them
//! - `config`: Generation parameters and presets

pub mod config;
pub mod generator;
pub mod geometry;
pub mod spline;
pub mod track;

pub use config::{TrackConfig, TrackPreset};
pub use generator::{GenerationFailed, GenerationResult, Stage, generate};
pub use geometry::{TrackGeometry, TrackGeometryBuilder};
pub use spline::Spline;
pub use track::{Knot, Track, TrackStore};

/// Generation constants
pub mod consts {
    /// Centripetal Catmull-Rom
    pub const DEFAULT_ALPHA: f32 = 0.5;
    /// Boundary samples per edge
    pub const DEFAULT_RESOLUTION: u32 = 64;
    /// Parameter step for the central-difference tangent
    pub const NORMAL_EPSILON: f32 = 1e-4;
}
