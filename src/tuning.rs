//! Game tuning and startup validation
//!
//! Defaults reproduce the contract constants in [`crate::consts`]. Overrides are
//! loaded from JSON and validated once before a simulation is built.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Errors raised while loading or validating tuning
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to read tuning file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse tuning: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("`{field}` must be positive")]
    NonPositive { field: &'static str },
    #[error("`{field}` must be finite")]
    NonFinite { field: &'static str },
    #[error("flap velocity {0} must be negative (upward)")]
    FlapNotUpward(f32),
    #[error("gap margin {margin} must exceed half the gap height ({half_gap})")]
    GapMarginTooSmall { margin: f32, half_gap: f32 },
    #[error("gap range [{min}, {max}] is empty")]
    EmptyGapRange { min: f32, max: f32 },
    #[error("bird start ({x}, {y}) lies outside the playfield")]
    BirdOutOfBounds { x: f32, y: f32 },
}

/// All game constants in one place
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub playfield_width: f32,
    pub playfield_height: f32,
    pub ground_height: f32,

    // === Bird ===
    pub gravity: f32,
    /// Velocity set by a flap (negative = upward)
    pub flap_velocity: f32,
    pub bird_radius: f32,
    pub bird_start_x: f32,
    pub bird_start_y: f32,

    // === Pipes ===
    pub pipe_width: f32,
    pub gap_height: f32,
    pub pipe_speed: f32,
    pub spawn_distance: f32,
    /// Minimum distance from the ceiling/floor to a gap center
    pub gap_margin: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            playfield_width: PLAYFIELD_WIDTH,
            playfield_height: PLAYFIELD_HEIGHT,
            ground_height: GROUND_HEIGHT,

            gravity: GRAVITY,
            flap_velocity: FLAP_VELOCITY,
            bird_radius: BIRD_RADIUS,
            bird_start_x: BIRD_START_X,
            bird_start_y: BIRD_START_Y,

            pipe_width: PIPE_WIDTH,
            gap_height: GAP_HEIGHT,
            pipe_speed: PIPE_SPEED,
            spawn_distance: SPAWN_DISTANCE,
            gap_margin: GAP_MARGIN,
        }
    }
}

impl Tuning {
    /// Parse tuning from JSON. Missing fields fall back to defaults.
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Self = serde_json::from_str(json)?;
        if tuning != Self::default() {
            log::warn!("Tuning overrides differ from the default constants");
        }
        Ok(tuning)
    }

    /// Load tuning from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        log::info!("Loaded tuning from {}", path.display());
        Self::from_json(&json)
    }

    /// Y coordinate of the ground line (top of the ground band)
    #[inline]
    pub fn field_floor(&self) -> f32 {
        self.playfield_height - self.ground_height
    }

    /// Inclusive range gap centers are drawn from
    #[inline]
    pub fn gap_range(&self) -> (f32, f32) {
        (self.gap_margin, self.field_floor() - self.gap_margin)
    }

    /// Check the startup preconditions. A failure here is fatal for the host.
    pub fn validate(&self) -> Result<(), TuningError> {
        let fields = [
            ("playfield_width", self.playfield_width),
            ("playfield_height", self.playfield_height),
            ("ground_height", self.ground_height),
            ("gravity", self.gravity),
            ("flap_velocity", self.flap_velocity),
            ("bird_radius", self.bird_radius),
            ("bird_start_x", self.bird_start_x),
            ("bird_start_y", self.bird_start_y),
            ("pipe_width", self.pipe_width),
            ("gap_height", self.gap_height),
            ("pipe_speed", self.pipe_speed),
            ("spawn_distance", self.spawn_distance),
            ("gap_margin", self.gap_margin),
        ];
        for (field, value) in fields {
            if !value.is_finite() {
                return Err(TuningError::NonFinite { field });
            }
        }

        // flap_velocity is the only signed value
        let positive = fields.iter().filter(|(f, _)| *f != "flap_velocity");
        for &(field, value) in positive {
            if value <= 0.0 {
                return Err(TuningError::NonPositive { field });
            }
        }
        if self.flap_velocity >= 0.0 {
            return Err(TuningError::FlapNotUpward(self.flap_velocity));
        }
        if self.field_floor() <= 0.0 {
            return Err(TuningError::NonPositive {
                field: "playfield_height - ground_height",
            });
        }

        let half_gap = self.gap_height / 2.0;
        if self.gap_margin <= half_gap {
            return Err(TuningError::GapMarginTooSmall {
                margin: self.gap_margin,
                half_gap,
            });
        }
        let (min, max) = self.gap_range();
        if min > max {
            return Err(TuningError::EmptyGapRange { min, max });
        }

        // Starting on a boundary would end the run on the first tick
        let top = self.bird_start_y - self.bird_radius;
        let bottom = self.bird_start_y + self.bird_radius;
        if self.bird_start_x > self.playfield_width || top <= 0.0 || bottom >= self.field_floor() {
            return Err(TuningError::BirdOutOfBounds {
                x: self.bird_start_x,
                y: self.bird_start_y,
            });
        }

        Ok(())
    }
}
