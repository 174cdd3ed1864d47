//! Track geometry derived from a centre spline
//!
//! - `builder`: left/right edge splines and their samples
//! - `mesh`: closed triangle ribbon between the edges
//! - `collision`: one convex quad per sample step

pub mod builder;
pub mod collision;
pub mod mesh;

pub use builder::{TrackGeometry, TrackGeometryBuilder};
pub use collision::CollisionPolygon;
pub use mesh::{TrackVertex, ribbon_triangles, ribbon_vertices};
