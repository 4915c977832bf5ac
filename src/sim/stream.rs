//! Ordered stream of live pipes
//!
//! Pipes spawn at the right edge and scroll left, so insertion order is also
//! ascending `x` order. Retired pipes are never re-inserted.

use serde::{Deserialize, Serialize};

use super::gap::GapSource;
use super::geometry::BirdShape;
use super::pipe::{Pipe, PipeView};
use crate::tuning::Tuning;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PipeStream {
    pipes: Vec<Pipe>,
}

impl PipeStream {
    pub fn new() -> Self {
        Self { pipes: Vec::new() }
    }

    /// Stream holding a single pipe at the right edge of the playfield
    pub fn starting<G: GapSource + ?Sized>(tuning: &Tuning, gaps: &mut G) -> Self {
        let mut stream = Self::new();
        stream.push(Pipe::spawn(tuning.playfield_width, tuning, gaps));
        stream
    }

    /// Append a pipe. Callers keep the ascending-`x` order.
    pub fn push(&mut self, pipe: Pipe) {
        debug_assert!(self.pipes.last().is_none_or(|last| last.x <= pipe.x));
        self.pipes.push(pipe);
    }

    /// Spawn at `playfield_width` when the stream is empty or the newest pipe
    /// has travelled past `playfield_width - spawn_distance`. At most one
    /// spawn per call. Returns the spawned pipe.
    pub fn spawn_if_needed<G: GapSource + ?Sized>(
        &mut self,
        tuning: &Tuning,
        gaps: &mut G,
    ) -> Option<&Pipe> {
        let threshold = tuning.playfield_width - tuning.spawn_distance;
        let needed = self.pipes.last().is_none_or(|last| last.x < threshold);
        if !needed {
            return None;
        }

        let pipe = Pipe::spawn(tuning.playfield_width, tuning, gaps);
        log::debug!("Pipe spawned at x={} gap_center={}", pipe.x, pipe.gap_center);
        self.pipes.push(pipe);
        self.pipes.last()
    }

    pub fn advance_all(&mut self, tuning: &Tuning) {
        for pipe in &mut self.pipes {
            pipe.advance(tuning);
        }
    }

    /// Drop every expired pipe, keeping survivors in order. Returns how many
    /// were removed.
    pub fn retire_expired(&mut self) -> usize {
        let before = self.pipes.len();
        self.pipes.retain(|p| !p.is_expired());
        let retired = before - self.pipes.len();
        if retired > 0 {
            log::debug!("Retired {} pipe(s), {} live", retired, self.pipes.len());
        }
        retired
    }

    /// Short-circuits on the first hit
    pub fn any_intersects(&self, shape: &BirdShape, tuning: &Tuning) -> bool {
        self.pipes.iter().any(|p| p.intersects(shape, tuning))
    }

    pub fn pipes(&self) -> &[Pipe] {
        &self.pipes
    }

    pub fn views(&self) -> Vec<PipeView> {
        self.pipes.iter().map(Pipe::view).collect()
    }

    pub fn len(&self) -> usize {
        self.pipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pipes.is_empty()
    }
}
