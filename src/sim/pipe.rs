//! Pipe obstacles
//!
//! A pipe is one column with a vertical gap. The upper segment runs from the
//! ceiling to the gap, the lower segment from the gap to the ground line.

use serde::{Deserialize, Serialize};

use super::gap::GapSource;
use super::geometry::{BirdShape, Rect};
use crate::tuning::Tuning;

/// A pipe pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pipe {
    /// Leading (left) edge
    pub x: f32,
    pub width: f32,
    /// Fixed for the pipe's lifetime
    pub gap_center: f32,
    /// Whether the bird has cleared this pipe. Not consumed by the core.
    #[serde(default)]
    pub passed: bool,
}

/// What a presentation layer needs to draw a pipe
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PipeView {
    pub x: f32,
    pub width: f32,
    pub gap_center: f32,
}

impl Pipe {
    /// Spawn a pipe at `x` with a gap center drawn from `gaps`
    pub fn spawn<G: GapSource + ?Sized>(x: f32, tuning: &Tuning, gaps: &mut G) -> Self {
        let (min, max) = tuning.gap_range();
        Self::with_gap_center(x, tuning, gaps.next_gap_center(min, max))
    }

    pub fn with_gap_center(x: f32, tuning: &Tuning, gap_center: f32) -> Self {
        Self {
            x,
            width: tuning.pipe_width,
            gap_center,
            passed: false,
        }
    }

    /// Scroll left at constant speed
    pub fn advance(&mut self, tuning: &Tuning) {
        self.x -= tuning.pipe_speed;
    }

    /// Trailing edge has left the playfield
    pub fn is_expired(&self) -> bool {
        self.x + self.width < 0.0
    }

    pub fn upper_segment(&self, tuning: &Tuning) -> Rect {
        let bottom = self.gap_center - tuning.gap_height / 2.0;
        Rect::new(self.x, 0.0, self.width, bottom)
    }

    pub fn lower_segment(&self, tuning: &Tuning) -> Rect {
        let top = self.gap_center + tuning.gap_height / 2.0;
        Rect::new(self.x, top, self.width, tuning.field_floor() - top)
    }

    /// Bird's bounding square touches or overlaps either segment
    pub fn intersects(&self, shape: &BirdShape, tuning: &Tuning) -> bool {
        shape.bounds.intersects(&self.upper_segment(tuning))
            || shape.bounds.intersects(&self.lower_segment(tuning))
    }

    pub fn view(&self) -> PipeView {
        PipeView {
            x: self.x,
            width: self.width,
            gap_center: self.gap_center,
        }
    }
}
