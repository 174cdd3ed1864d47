//! Generation failure taxonomy
//!
//! Every bounded retry loop in the pipeline surfaces exhaustion through a
//! single error type tagged with the stage that gave up.

use std::fmt;

use thiserror::Error;

/// Pipeline stage that produced a [`GenerationFailed`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Malformed config rejected before any random draw
    Config,
    /// Random point sampling could not satisfy the pairwise distance
    RandomPoints,
    /// Gift-wrapping did not close the hull within its iteration budget
    ConvexHull,
    /// A displaced midpoint never landed inside the bounds
    Displacement,
    /// The whole pipeline never produced a loop passing validation
    Outer,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Config => "config",
            Stage::RandomPoints => "random points",
            Stage::ConvexHull => "convex hull",
            Stage::Displacement => "displacement",
            Stage::Outer => "outer",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Track generation gave up
///
/// Recoverable: callers should log it and keep whatever track they already
/// published.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("track generation failed at {stage} stage: {reason}")]
pub struct GenerationFailed {
    pub stage: Stage,
    pub reason: String,
}

impl GenerationFailed {
    pub fn new(stage: Stage, reason: impl Into<String>) -> Self {
        Self {
            stage,
            reason: reason.into(),
        }
    }
}
