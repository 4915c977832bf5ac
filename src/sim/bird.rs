//! The player-controlled bird

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::BirdShape;
use crate::tuning::Tuning;

/// The bird. `pos.x` never changes; the world scrolls past it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bird {
    pub pos: Vec2,
    /// Vertical velocity in units/tick (positive = downward)
    pub velocity: f32,
    pub radius: f32,
}

impl Bird {
    /// Bird at the start position, at rest
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            pos: Vec2::new(tuning.bird_start_x, tuning.bird_start_y),
            velocity: 0.0,
            radius: tuning.bird_radius,
        }
    }

    /// Overwrite velocity with the flap velocity (not additive)
    pub fn flap(&mut self, tuning: &Tuning) {
        self.velocity = tuning.flap_velocity;
    }

    /// One Euler step: gravity into velocity, velocity into position.
    /// The ceiling is a hard stop with no bounce.
    pub fn advance(&mut self, tuning: &Tuning) {
        self.velocity += tuning.gravity;
        self.pos.y += self.velocity;

        if self.pos.y < 0.0 {
            self.pos.y = 0.0;
            self.velocity = 0.0;
        }
    }

    /// Lower edge at or below the ground line
    pub fn hits_ground(&self, tuning: &Tuning) -> bool {
        self.pos.y + self.radius >= tuning.field_floor()
    }

    /// Upper edge at or above the ceiling
    pub fn hits_ceiling(&self) -> bool {
        self.pos.y - self.radius <= 0.0
    }

    /// Ground or ceiling contact. Independent of the clamp in [`Bird::advance`].
    pub fn boundary_violation(&self, tuning: &Tuning) -> bool {
        self.hits_ground(tuning) || self.hits_ceiling()
    }

    pub fn bounding_shape(&self) -> BirdShape {
        BirdShape::new(self.pos, self.radius)
    }
}
