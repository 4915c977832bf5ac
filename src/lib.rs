//! Flappy Sim - A fixed-timestep Flappy Bird style arcade core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (bird physics, pipe stream, collisions, game state)
//! - `tuning`: Data-driven game constants with startup validation
//!
//! Rendering, input polling and the frame clock belong to the host. The host
//! calls [`sim::Simulation::tick`] once per frame and routes two input events
//! (flap, reset) to the simulation.

pub mod sim;
pub mod tuning;

pub use sim::{GamePhase, Simulation, Snapshot};
pub use tuning::{Tuning, TuningError};

/// Game configuration constants
///
/// These form the behavioral contract: a host that uses the defaults gets the
/// same trajectories tick for tick.
pub mod consts {
    /// Target simulation rate. One tick per rendered frame.
    pub const TICK_RATE_HZ: u32 = 60;

    /// Playfield dimensions
    pub const PLAYFIELD_WIDTH: f32 = 400.0;
    pub const PLAYFIELD_HEIGHT: f32 = 600.0;
    /// Height of the ground band at the bottom of the playfield
    pub const GROUND_HEIGHT: f32 = 100.0;

    /// Bird defaults
    pub const GRAVITY: f32 = 0.5; // units/tick²
    pub const FLAP_VELOCITY: f32 = -10.0; // units/tick, negative is up
    pub const BIRD_RADIUS: f32 = 15.0;
    pub const BIRD_START_X: f32 = 100.0;
    pub const BIRD_START_Y: f32 = PLAYFIELD_HEIGHT / 2.0;

    /// Pipe defaults
    pub const PIPE_WIDTH: f32 = 60.0;
    pub const GAP_HEIGHT: f32 = 150.0;
    pub const PIPE_SPEED: f32 = 3.0; // units/tick
    /// Distance the newest pipe must travel before the next one spawns
    pub const SPAWN_DISTANCE: f32 = 200.0;
    /// Gap centers are drawn from [GAP_MARGIN, floor - GAP_MARGIN]
    pub const GAP_MARGIN: f32 = 150.0;
}
