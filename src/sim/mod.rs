//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only, one tick per frame, no delta-time scaling
//! - Seeded gap placement only
//! - Stable iteration order (pipes in ascending `x`)
//! - No rendering or platform dependencies

pub mod bird;
pub mod gap;
pub mod geometry;
pub mod pipe;
pub mod state;
pub mod stream;
pub mod tick;

pub use bird::Bird;
pub use gap::{FixedGap, GapSource, SeededGaps};
pub use geometry::{BirdShape, Circle, Rect};
pub use pipe::{Pipe, PipeView};
pub use state::{CrashCause, GameEvent, GamePhase, SimulationState, Snapshot};
pub use stream::PipeStream;
pub use tick::{MAX_PENDING_EVENTS, Simulation};
