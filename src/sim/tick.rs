//! Fixed timestep simulation tick
//!
//! [`Simulation`] owns the run state and is the only thing that mutates it.
//! The host calls `tick`, `handle_flap` and `handle_reset` strictly in
//! sequence from one thread.

use super::gap::{GapSource, SeededGaps};
use super::geometry::Circle;
use super::pipe::PipeView;
use super::state::{CrashCause, GameEvent, GamePhase, SimulationState, Snapshot};
use crate::tuning::{Tuning, TuningError};

/// Maximum undrained events kept. Oldest are dropped first.
pub const MAX_PENDING_EVENTS: usize = 64;

/// The game loop core
#[derive(Debug, Clone)]
pub struct Simulation<G: GapSource = SeededGaps> {
    tuning: Tuning,
    gaps: G,
    state: SimulationState,
    events: Vec<GameEvent>,
}

impl Simulation<SeededGaps> {
    /// Default tuning with seeded gap placement
    pub fn new(seed: u64) -> Self {
        Self::build(Tuning::default(), SeededGaps::new(seed))
    }
}

impl<G: GapSource> Simulation<G> {
    /// Validate `tuning` and build a simulation drawing gaps from `gaps`
    pub fn with_tuning(tuning: Tuning, gaps: G) -> Result<Self, TuningError> {
        tuning.validate()?;
        Ok(Self::build(tuning, gaps))
    }

    fn build(tuning: Tuning, mut gaps: G) -> Self {
        let state = SimulationState::new(&tuning, &mut gaps);
        match gaps.seed() {
            Some(seed) => log::info!("Simulation created (seed={})", seed),
            None => log::info!("Simulation created (unseeded gap source)"),
        }
        Self {
            tuning,
            gaps,
            state,
            events: Vec::new(),
        }
    }

    /// Advance the world by one tick. No-op once Terminal.
    ///
    /// Order: bird, pipes, pipe collisions, retirement, spawning, boundaries.
    /// A pipe collision ends the tick immediately.
    pub fn tick(&mut self) {
        let Self {
            tuning,
            gaps,
            state,
            events,
        } = self;

        if state.is_terminal() {
            return;
        }

        state.time_ticks += 1;

        state.bird.advance(tuning);
        state.pipes.advance_all(tuning);

        if state.pipes.any_intersects(&state.bird.bounding_shape(), tuning) {
            game_over(state, events, CrashCause::Pipe);
            return;
        }

        let retired = state.pipes.retire_expired();
        if retired > 0 {
            record(events, GameEvent::PipesRetired { count: retired });
        }

        if let Some(pipe) = state.pipes.spawn_if_needed(tuning, gaps) {
            let spawned = GameEvent::PipeSpawned {
                x: pipe.x,
                gap_center: pipe.gap_center,
            };
            record(events, spawned);
        }

        if state.bird.hits_ground(tuning) {
            game_over(state, events, CrashCause::Ground);
        } else if state.bird.hits_ceiling() {
            game_over(state, events, CrashCause::Ceiling);
        }
    }

    /// Flap input. Ignored after game over.
    pub fn handle_flap(&mut self) {
        if self.state.is_terminal() {
            log::debug!("Flap ignored: game over");
            return;
        }
        self.state.bird.flap(&self.tuning);
        record(&mut self.events, GameEvent::Flapped);
        log::debug!("Flap at tick {}", self.state.time_ticks);
    }

    /// Restart input. Ignored while the run is still active.
    pub fn handle_reset(&mut self) {
        if !self.state.is_terminal() {
            log::debug!("Reset ignored: game in progress");
            return;
        }
        self.reset();
    }

    /// Replace the run state with a fresh one. The gap source keeps its
    /// position, so successive runs see different pipes.
    pub fn reset(&mut self) {
        self.state = SimulationState::new(&self.tuning, &mut self.gaps);
        record(&mut self.events, GameEvent::Reset);
        log::info!("Simulation reset");
    }

    pub fn is_terminal(&self) -> bool {
        self.state.is_terminal()
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn crash_cause(&self) -> Option<CrashCause> {
        self.state.cause
    }

    /// Ticks executed since the last reset
    pub fn tick_count(&self) -> u64 {
        self.state.time_ticks
    }

    /// Bird circle for drawing
    pub fn bird_shape(&self) -> Circle {
        self.state.bird.bounding_shape().circle
    }

    /// Live pipes, ascending `x`
    pub fn pipes(&self) -> Vec<PipeView> {
        self.state.pipes.views()
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::of(&self.state)
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    #[cfg(test)]
    fn state_mut(&mut self) -> &mut SimulationState {
        &mut self.state
    }

    /// Seed of the gap source, when it is seeded
    pub fn seed(&self) -> Option<u64> {
        self.gaps.seed()
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    /// Take the events recorded since the previous call, at most
    /// [`MAX_PENDING_EVENTS`] of the newest
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

fn game_over(state: &mut SimulationState, events: &mut Vec<GameEvent>, cause: CrashCause) {
    state.phase = GamePhase::Terminal;
    state.cause = Some(cause);
    let crashed = GameEvent::Crashed {
        cause,
        tick: state.time_ticks,
    };
    record(events, crashed);
    log::info!("Game over: {:?} at tick {}", cause, state.time_ticks);
}

/// Append an event, dropping the oldest once the queue is full
fn record(events: &mut Vec<GameEvent>, event: GameEvent) {
    if events.len() >= MAX_PENDING_EVENTS {
        events.remove(0);
    }
    events.push(event);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::gap::FixedGap;
    use crate::sim::pipe::Pipe;

    fn fixed(gap_center: f32) -> Simulation<FixedGap> {
        Simulation::with_tuning(Tuning::default(), FixedGap(gap_center)).unwrap()
    }

    #[test]
    fn test_new_simulation() {
        let sim = Simulation::new(12345);
        assert_eq!(sim.phase(), GamePhase::Active);
        assert_eq!(sim.pipes().len(), 1);
        assert_eq!(sim.pipes()[0].x, 400.0);
        assert_eq!(sim.bird_shape().center.x, 100.0);
        assert_eq!(sim.bird_shape().center.y, 300.0);
    }

    #[test]
    fn test_seed_reported_for_custom_tuning() {
        let sim = Simulation::with_tuning(Tuning::default(), SeededGaps::new(9)).unwrap();
        assert_eq!(sim.seed(), Some(9));
        assert_eq!(Simulation::new(4).seed(), Some(4));
        assert_eq!(fixed(250.0).seed(), None);
    }

    #[test]
    fn test_free_fall_hits_ground_on_tick_27() {
        let mut sim = fixed(250.0);
        for _ in 0..26 {
            sim.tick();
            assert!(!sim.is_terminal());
        }
        sim.tick();
        assert!(sim.is_terminal());
        assert_eq!(sim.crash_cause(), Some(CrashCause::Ground));
        assert_eq!(sim.tick_count(), 27);
        assert_eq!(sim.bird_shape().center.y, 489.0);
    }

    #[test]
    fn test_tick_is_noop_when_terminal() {
        let mut sim = fixed(250.0);
        while !sim.is_terminal() {
            sim.tick();
        }
        let before = sim.snapshot();
        sim.tick();
        sim.tick();
        assert_eq!(sim.snapshot(), before);
    }

    #[test]
    fn test_flap_ignored_when_terminal() {
        let mut sim = fixed(250.0);
        while !sim.is_terminal() {
            sim.tick();
        }
        let velocity = sim.state().bird.velocity;
        sim.handle_flap();
        assert_eq!(sim.state().bird.velocity, velocity);
    }

    #[test]
    fn test_reset_ignored_when_active() {
        let mut sim = fixed(250.0);
        sim.tick();
        sim.handle_reset();
        assert_eq!(sim.tick_count(), 1);
        assert!(!sim.drain_events().contains(&GameEvent::Reset));
    }

    #[test]
    fn test_pipe_collision_skips_rest_of_tick() {
        let mut sim = fixed(250.0);
        let tuning = sim.tuning().clone();
        {
            let state = sim.state_mut();
            // Bird level with the lower segment, which reaches it this tick. The
            // bird also crosses the ground line and the first pipe expires, so
            // the later steps would change state if they ran.
            state.bird.pos.y = 485.0;
            state.bird.velocity = 0.0;
            state.pipes = Default::default();
            state.pipes.push(Pipe::with_gap_center(-62.0, &tuning, 250.0));
            state.pipes.push(Pipe::with_gap_center(118.0, &tuning, 250.0));
        }
        sim.tick();
        assert!(sim.is_terminal());
        assert_eq!(sim.crash_cause(), Some(CrashCause::Pipe));
        // Retirement and spawning did not run
        assert_eq!(sim.pipes().len(), 2);
    }

    #[test]
    fn test_ceiling_crash() {
        let mut sim = fixed(250.0);
        // Keep flapping until the ceiling is reached
        for _ in 0..100 {
            sim.handle_flap();
            sim.tick();
            if sim.is_terminal() {
                break;
            }
        }
        assert_eq!(sim.crash_cause(), Some(CrashCause::Ceiling));
        assert!(sim.bird_shape().center.y - 15.0 <= 0.0);
    }

    #[test]
    fn test_events_recorded() {
        let mut sim = fixed(250.0);
        sim.handle_flap();
        for _ in 0..200 {
            sim.tick();
        }
        let events = sim.drain_events();
        assert_eq!(events[0], GameEvent::Flapped);
        assert!(matches!(
            events.last(),
            Some(GameEvent::Crashed { cause: CrashCause::Ground, .. })
        ));
        assert!(sim.drain_events().is_empty());
    }

    #[test]
    fn test_undrained_events_stay_bounded() {
        let mut sim = Simulation::new(3);
        for i in 0..100_000u32 {
            if sim.is_terminal() {
                sim.handle_reset();
            }
            if i % 18 == 0 {
                sim.handle_flap();
            }
            sim.tick();
            assert!(sim.events.len() <= MAX_PENDING_EVENTS);
        }
        let events = sim.drain_events();
        assert_eq!(events.len(), MAX_PENDING_EVENTS);
        assert!(sim.drain_events().is_empty());
    }

    /// Pin the bird at y=300 at rest so only the pipes move
    fn hover(sim: &mut Simulation<FixedGap>) {
        let bird = &mut sim.state_mut().bird;
        bird.pos.y = 300.0;
        bird.velocity = -0.5;
    }

    #[test]
    fn test_spawn_and_retire_cadence() {
        let mut sim = fixed(300.0);
        let mut spawned = Vec::new();
        let mut retired = Vec::new();

        for i in 1..=300u64 {
            hover(&mut sim);
            sim.tick();
            assert!(!sim.is_terminal(), "crashed at tick {}", i);
            for event in sim.drain_events() {
                match event {
                    GameEvent::PipeSpawned { x, .. } => {
                        assert_eq!(x, 400.0);
                        spawned.push(i);
                    }
                    GameEvent::PipesRetired { count } => {
                        assert_eq!(count, 1);
                        retired.push(i);
                    }
                    _ => {}
                }
            }
            let xs: Vec<f32> = sim.pipes().iter().map(|p| p.x).collect();
            assert!(xs.windows(2).all(|w| w[0] < w[1]));
            assert!(!xs.is_empty());
        }

        assert_eq!(spawned, vec![67, 134, 201, 268]);
        assert_eq!(retired, vec![154, 221, 288]);
    }

    #[test]
    fn test_crash_into_pipe() {
        // Gap at the top, bird hovering at 300 hits the lower segment
        let mut sim = fixed(150.0);
        let mut crashed_at = 0;
        for i in 1..=200u64 {
            hover(&mut sim);
            sim.tick();
            if sim.is_terminal() {
                crashed_at = i;
                break;
            }
        }
        // Leading edge reaches the bird's right edge (x=115) after 95 ticks
        assert_eq!(crashed_at, 95);
        assert_eq!(sim.crash_cause(), Some(CrashCause::Pipe));
    }

    #[test]
    fn test_invalid_tuning_rejected() {
        let tuning = Tuning {
            gap_height: 400.0,
            ..Default::default()
        };
        assert!(Simulation::with_tuning(tuning, FixedGap(250.0)).is_err());
    }

    #[test]
    fn test_determinism() {
        let mut a = Simulation::new(99999);
        let mut b = Simulation::new(99999);
        for i in 0..300 {
            if i % 18 == 0 {
                a.handle_flap();
                b.handle_flap();
            }
            a.tick();
            b.tick();
        }
        assert_eq!(a.snapshot(), b.snapshot());
    }
}
