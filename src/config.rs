//! Track generation config and presets
//!
//! The config is the only persisted piece of the system: every track,
//! spline and mesh is regenerated from it on demand.

use std::fs;
use std::path::Path;

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::{DEFAULT_ALPHA, DEFAULT_RESOLUTION};
use crate::generator::{GenerationFailed, Stage};

/// Named starting points for a config
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum TrackPreset {
    Compact,
    #[default]
    Standard,
    Sprawling,
}

impl TrackPreset {
    pub const ALL: [TrackPreset; 3] = [
        TrackPreset::Compact,
        TrackPreset::Standard,
        TrackPreset::Sprawling,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TrackPreset::Compact => "Compact",
            TrackPreset::Standard => "Standard",
            TrackPreset::Sprawling => "Sprawling",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "compact" | "small" => Some(TrackPreset::Compact),
            "standard" | "std" => Some(TrackPreset::Standard),
            "sprawling" | "large" => Some(TrackPreset::Sprawling),
            _ => None,
        }
    }
}

/// Failure to load or save a config file
#[derive(Debug, Error)]
pub enum PresetError {
    #[error("config I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("config JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Everything `generate` needs, seed included
///
/// Generation is a pure function of this value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackConfig {
    /// PRNG seed
    pub seed: u32,
    /// Full extents of the axis-aligned area centred on the origin
    pub bounds: Vec2,

    // === Width ===
    pub min_width: f32,
    pub max_width: f32,

    // === Random points ===
    /// Must be at least 4
    pub num_random_points: usize,
    pub min_random_point_distance: f32,

    // === Midpoint displacement ===
    pub max_x_displacement: f32,
    pub max_y_displacement: f32,

    // === Constraints ===
    pub min_segment_distance: f32,
    pub min_corner_angle_degrees: f32,

    // === Iteration budgets ===
    pub max_outer_iterations: u32,
    pub max_random_point_iterations: u32,
    pub max_hull_iterations: u32,
    pub max_displacement_iterations: u32,

    // === Spline ===
    /// Catmull-Rom knot exponent (0 uniform, 0.5 centripetal, 1 chordal)
    pub alpha: f32,
    /// Samples per boundary when building the mesh
    pub resolution: u32,
}

impl Default for TrackConfig {
    fn default() -> Self {
        Self::from_preset(TrackPreset::Standard)
    }
}

impl TrackConfig {
    /// Build a config from preset defaults
    pub fn from_preset(preset: TrackPreset) -> Self {
        let base = Self {
            seed: 0,
            bounds: Vec2::new(100.0, 100.0),
            min_width: 4.0,
            max_width: 8.0,
            num_random_points: 8,
            min_random_point_distance: 10.0,
            max_x_displacement: 10.0,
            max_y_displacement: 10.0,
            min_segment_distance: 5.0,
            min_corner_angle_degrees: 60.0,
            max_outer_iterations: 1000,
            max_random_point_iterations: 1000,
            max_hull_iterations: 100,
            max_displacement_iterations: 100,
            alpha: DEFAULT_ALPHA,
            resolution: DEFAULT_RESOLUTION,
        };

        match preset {
            TrackPreset::Standard => base,
            TrackPreset::Compact => Self {
                bounds: Vec2::new(60.0, 60.0),
                min_width: 3.0,
                max_width: 5.0,
                num_random_points: 6,
                min_random_point_distance: 8.0,
                max_x_displacement: 6.0,
                max_y_displacement: 6.0,
                min_segment_distance: 4.0,
                min_corner_angle_degrees: 50.0,
                resolution: 48,
                ..base
            },
            TrackPreset::Sprawling => Self {
                bounds: Vec2::new(200.0, 150.0),
                min_width: 6.0,
                max_width: 12.0,
                num_random_points: 14,
                min_random_point_distance: 15.0,
                max_x_displacement: 20.0,
                max_y_displacement: 15.0,
                min_segment_distance: 10.0,
                max_hull_iterations: 200,
                resolution: 128,
                ..base
            },
        }
    }

    /// Same config with a different seed
    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = seed;
        self
    }

    /// Pick a fresh seed (the "new random track" action)
    pub fn randomize_seed<R: Rng>(&mut self, rng: &mut R) {
        self.seed = rng.random_range(0..i32::MAX as u32);
    }

    /// Half extents; points must satisfy `|x| <= half.x` and `|y| <= half.y`
    #[inline]
    pub fn half_bounds(&self) -> Vec2 {
        self.bounds / 2.0
    }

    /// Corners of the bounds rectangle, counter-clockwise from bottom-left
    pub fn bounds_outline(&self) -> [Vec2; 4] {
        let h = self.half_bounds();
        [
            Vec2::new(-h.x, -h.y),
            Vec2::new(h.x, -h.y),
            Vec2::new(h.x, h.y),
            Vec2::new(-h.x, h.y),
        ]
    }

    /// Whether `p` lies inside the bounds (edges included)
    #[inline]
    pub fn contains(&self, p: Vec2) -> bool {
        let h = self.half_bounds();
        p.x >= -h.x && p.x <= h.x && p.y >= -h.y && p.y <= h.y
    }

    /// Reject values no amount of retrying can fix
    ///
    /// The random point count is checked by the point sampler itself.
    pub fn validate(&self) -> Result<(), GenerationFailed> {
        let fail = |reason: &str| Err(GenerationFailed::new(Stage::Config, reason));

        if !self.bounds.is_finite() || self.bounds.x < 0.0 || self.bounds.y < 0.0 {
            return fail("bounds must be finite and non-negative");
        }
        if !(self.min_width.is_finite() && self.max_width.is_finite()) || self.min_width < 0.0 {
            return fail("widths must be finite and non-negative");
        }
        if self.min_width > self.max_width {
            return fail("min width exceeds max width");
        }
        let non_negative = [
            self.min_random_point_distance,
            self.max_x_displacement,
            self.max_y_displacement,
            self.min_segment_distance,
            self.min_corner_angle_degrees,
        ];
        if non_negative.iter().any(|v| !v.is_finite() || *v < 0.0) {
            return fail("distances, displacements and angles must be finite and non-negative");
        }
        // Sampling ranges span twice the displacement; that span must not overflow
        let spans = [
            2.0 * self.max_x_displacement,
            2.0 * self.max_y_displacement,
            self.max_width - self.min_width,
        ];
        if spans.iter().any(|v| !v.is_finite()) {
            return fail("displacement and width ranges must have a finite span");
        }
        if !(0.0..=1.0).contains(&self.alpha) {
            return fail("alpha must be within [0, 1]");
        }
        if self.resolution == 0 {
            return fail("resolution must be positive");
        }
        Ok(())
    }

    pub fn to_json(&self) -> Result<String, PresetError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, PresetError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a config saved with [`TrackConfig::save`]
    pub fn load(path: impl AsRef<Path>) -> Result<Self, PresetError> {
        let path = path.as_ref();
        let config = Self::from_json(&fs::read_to_string(path)?)?;
        log::info!("Loaded track config from {}", path.display());
        Ok(config)
    }

    /// Save as pretty JSON
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), PresetError> {
        let path = path.as_ref();
        fs::write(path, self.to_json()?)?;
        log::info!("Track config saved to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_presets_are_valid() {
        for preset in TrackPreset::ALL {
            let config = TrackConfig::from_preset(preset);
            assert!(config.validate().is_ok(), "{} preset", preset.as_str());
            assert!(config.num_random_points >= 4);
        }
    }

    #[test]
    fn test_preset_from_str() {
        assert_eq!(TrackPreset::from_str("COMPACT"), Some(TrackPreset::Compact));
        assert_eq!(TrackPreset::from_str("std"), Some(TrackPreset::Standard));
        assert_eq!(TrackPreset::from_str("large"), Some(TrackPreset::Sprawling));
        assert_eq!(TrackPreset::from_str("huge"), None);
    }

    #[test]
    fn test_json_roundtrip_keeps_every_field() {
        let config = TrackConfig::from_preset(TrackPreset::Sprawling).with_seed(77);
        let json = config.to_json().unwrap();
        assert_eq!(TrackConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn test_missing_fields_fall_back_to_defaults() {
        let config = TrackConfig::from_json(r#"{ "seed": 9, "num_random_points": 12 }"#).unwrap();
        assert_eq!(config.seed, 9);
        assert_eq!(config.num_random_points, 12);
        assert_eq!(config.bounds, TrackConfig::default().bounds);
    }

    #[test]
    fn test_save_and_load() {
        let path = std::env::temp_dir().join(format!("racetrack_gen_cfg_{}.json", std::process::id()));
        let config = TrackConfig::default().with_seed(1234);
        config.save(&path).unwrap();
        let loaded = TrackConfig::load(&path).unwrap();
        let _ = fs::remove_file(&path);
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let err = TrackConfig::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, PresetError::Io(_)));
    }

    #[test]
    fn test_validate_rejects_inverted_widths() {
        let config = TrackConfig {
            min_width: 10.0,
            max_width: 2.0,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert_eq!(err.stage, Stage::Config);
    }

    #[test]
    fn test_validate_rejects_bad_alpha_and_negative_bounds() {
        let config = TrackConfig {
            alpha: 1.5,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = TrackConfig {
            bounds: Vec2::new(-1.0, 10.0),
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = TrackConfig {
            resolution: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_overflowing_displacement_span() {
        for config in [
            TrackConfig {
                max_x_displacement: 3.0e38,
                ..Default::default()
            },
            TrackConfig {
                max_y_displacement: f32::MAX,
                ..Default::default()
            },
        ] {
            let err = config.validate().unwrap_err();
            assert_eq!(err.stage, Stage::Config);
            // Fails cleanly instead of panicking in the sampler
            assert_eq!(crate::generate(&config).unwrap_err().stage, Stage::Config);
        }

        let config = TrackConfig {
            max_x_displacement: 1.0e38,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_randomize_seed_is_reproducible_per_rng() {
        let mut a = TrackConfig::default();
        let mut b = TrackConfig::default();
        a.randomize_seed(&mut Pcg32::seed_from_u64(5));
        b.randomize_seed(&mut Pcg32::seed_from_u64(5));
        assert_eq!(a.seed, b.seed);
        assert!(a.seed < i32::MAX as u32);
    }

    #[test]
    fn test_bounds_helpers() {
        let config = TrackConfig {
            bounds: Vec2::new(10.0, 4.0),
            ..Default::default()
        };
        assert_eq!(config.half_bounds(), Vec2::new(5.0, 2.0));
        assert!(config.contains(Vec2::new(5.0, -2.0)));
        assert!(!config.contains(Vec2::new(5.01, 0.0)));
        let outline = config.bounds_outline();
        assert_eq!(outline[0], Vec2::new(-5.0, -2.0));
        assert_eq!(outline[2], Vec2::new(5.0, 2.0));
    }
}
