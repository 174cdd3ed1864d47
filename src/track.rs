//! Published tracks
//!
//! A [`Track`] bundles the generated knots with the centre spline and the
//! derived geometry. It never changes after construction; regeneration
//! builds a new one and swaps it into the [`TrackStore`] in one step, so
//! readers holding the old `Arc` keep a consistent snapshot.

use std::sync::{Arc, PoisonError, RwLock};

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::TrackConfig;
use crate::generator::{GenerationFailed, GenerationResult, generate};
use crate::geometry::{TrackGeometry, TrackGeometryBuilder};
use crate::spline::Spline;

/// Track control point with the track width there
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Knot {
    pub position: Vec2,
    pub width: f32,
}

impl Knot {
    pub const fn new(position: Vec2, width: f32) -> Self {
        Self { position, width }
    }
}

/// Immutable generated track
#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    seed: u32,
    knots: Vec<Knot>,
    reversed: bool,
    start_index: usize,
    centre: Spline,
    geometry: TrackGeometry,
}

impl Track {
    /// Run the full pipeline for `config`
    pub fn build(config: &TrackConfig) -> Result<Self, GenerationFailed> {
        let result = generate(config)?;
        Ok(Self::from_result(
            config.seed,
            result,
            config.alpha,
            config.resolution as usize,
        ))
    }

    /// Wrap an existing generation result
    pub fn from_result(seed: u32, result: GenerationResult, alpha: f32, resolution: usize) -> Self {
        let knots = result.knots().collect();
        let centre = Spline::new(result.points, alpha);
        let geometry = TrackGeometryBuilder::build(&centre, &result.widths, resolution);
        Self {
            seed,
            knots,
            reversed: result.reversed,
            start_index: result.start_index,
            centre,
            geometry,
        }
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    pub fn knots(&self) -> &[Knot] {
        &self.knots
    }

    pub fn len(&self) -> usize {
        self.knots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.knots.is_empty()
    }

    /// Centre points in loop order
    pub fn points(&self) -> &[Vec2] {
        self.centre.points()
    }

    pub fn widths(&self) -> impl Iterator<Item = f32> + '_ {
        self.knots.iter().map(|k| k.width)
    }

    pub fn reversed(&self) -> bool {
        self.reversed
    }

    pub fn start_index(&self) -> usize {
        self.start_index
    }

    pub fn centre(&self) -> &Spline {
        &self.centre
    }

    pub fn geometry(&self) -> &TrackGeometry {
        &self.geometry
    }
}

/// The current track: one writer, any number of readers
#[derive(Debug, Default)]
pub struct TrackStore {
    current: RwLock<Option<Arc<Track>>>,
}

impl TrackStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the published track, if any
    pub fn current(&self) -> Option<Arc<Track>> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Replace the published track
    pub fn publish(&self, track: Track) -> Arc<Track> {
        let track = Arc::new(track);
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = Some(track.clone());
        track
    }

    /// Build a track for `config` and publish it
    ///
    /// On failure the previous track stays published and the error is
    /// returned for the caller to report.
    pub fn regenerate(&self, config: &TrackConfig) -> Result<Arc<Track>, GenerationFailed> {
        match Track::build(config) {
            Ok(track) => {
                log::info!("Publishing track for seed {}", config.seed);
                Ok(self.publish(track))
            }
            Err(err) => {
                log::warn!("Keeping previous track: {err}");
                Err(err)
            }
        }
    }

    /// Pick a new seed for `config`, then [`regenerate`](Self::regenerate)
    pub fn regenerate_random<R: Rng>(
        &self,
        config: &mut TrackConfig,
        rng: &mut R,
    ) -> Result<Arc<Track>, GenerationFailed> {
        config.randomize_seed(rng);
        self.regenerate(config)
    }
}
