//! Game state and core simulation types
//!
//! Everything a tick mutates lives in [`SimulationState`]. A restart replaces it
//! wholesale.

use serde::{Deserialize, Serialize};

use super::bird::Bird;
use super::gap::GapSource;
use super::geometry::Circle;
use super::pipe::PipeView;
use super::stream::PipeStream;
use crate::tuning::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Bird is flying, ticks advance the world
    #[default]
    Active,
    /// Game over. Absorbing until a reset.
    Terminal,
}

/// What ended the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CrashCause {
    Pipe,
    Ground,
    Ceiling,
}

/// Things that happened since the host last drained events
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Flapped,
    PipeSpawned { x: f32, gap_center: f32 },
    PipesRetired { count: usize },
    Crashed { cause: CrashCause, tick: u64 },
    Reset,
}

/// Complete mutable state of one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationState {
    pub bird: Bird,
    pub pipes: PipeStream,
    pub phase: GamePhase,
    /// Set when the phase becomes Terminal
    pub cause: Option<CrashCause>,
    /// Ticks executed while Active
    pub time_ticks: u64,
}

impl SimulationState {
    /// Fresh run: bird at rest at its start position, one pipe at the right edge
    pub fn new<G: GapSource + ?Sized>(tuning: &Tuning, gaps: &mut G) -> Self {
        Self {
            bird: Bird::new(tuning),
            pipes: PipeStream::starting(tuning, gaps),
            phase: GamePhase::Active,
            cause: None,
            time_ticks: 0,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.phase == GamePhase::Terminal
    }
}

/// Read-only view handed to a presentation layer each frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub tick: u64,
    pub phase: GamePhase,
    pub bird: Circle,
    pub velocity: f32,
    pub pipes: Vec<PipeView>,
    pub cause: Option<CrashCause>,
}

impl Snapshot {
    pub fn of(state: &SimulationState) -> Self {
        Self {
            tick: state.time_ticks,
            phase: state.phase,
            bird: state.bird.bounding_shape().circle,
            velocity: state.bird.velocity,
            pipes: state.pipes.views(),
            cause: state.cause,
        }
    }
}
