//! Deterministic track loop generation
//!
//! Random points -> convex hull -> midpoint displacement -> validation,
//! retried as a whole until the loop passes or a budget runs out.
//! Everything here is pure:
//! - One seeded PRNG per `generate` call, passed down explicitly
//! - Every retry loop has an iteration bound
//! - No rendering, storage or global state

pub mod assembler;
pub mod constraints;
pub mod error;
pub mod hull;
pub mod points;
pub mod scratch;
pub mod subdivide;

pub use assembler::{GenerationResult, generate, generate_with_rng};
pub use constraints::{Violation, check_constraints, corner_angle_degrees, first_violation};
pub use error::{GenerationFailed, Stage};
pub use hull::convex_hull;
pub use points::{MIN_RANDOM_POINTS, generate_random_points};
pub use subdivide::subdivide_and_displace;
