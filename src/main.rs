//! Flappy Sim headless host
//!
//! Plays the role of the window/event loop: owns the tick clock, feeds flap and
//! reset events into the simulation, and logs what happens.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use flappy_sim::consts::TICK_RATE_HZ;
use flappy_sim::sim::{GameEvent, GapSource, SeededGaps, Simulation};
use flappy_sim::Tuning;

#[derive(Parser, Debug)]
#[command(name = "flappy-sim", about = "Run the Flappy Bird core without a window")]
struct Args {
    /// Seed for pipe gap placement
    #[arg(long, default_value_t = 0)]
    seed: u64,
    /// Number of frames to run
    #[arg(long, default_value_t = 600)]
    ticks: u64,
    /// JSON tuning overrides
    #[arg(long)]
    tuning: Option<PathBuf>,
    /// Flap automatically to steer through gaps
    #[arg(long)]
    autopilot: bool,
    /// Restart after game over this many times
    #[arg(long, default_value_t = 0)]
    restarts: u32,
    /// Print the final snapshot as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let tuning = match &args.tuning {
        Some(path) => Tuning::load(path)
            .with_context(|| format!("loading tuning from {}", path.display()))?,
        None => Tuning::default(),
    };
    let mut sim = Simulation::with_tuning(tuning, SeededGaps::new(args.seed))
        .context("invalid tuning")?;
    log::info!(
        "Flappy Sim (headless) starting: seed={} ticks={} ({:.1}s at {} Hz)",
        args.seed,
        args.ticks,
        args.ticks as f32 / TICK_RATE_HZ as f32,
        TICK_RATE_HZ
    );

    let mut crashes = 0u32;
    let mut restarts_left = args.restarts;
    let mut frames = 0u64;

    while frames < args.ticks {
        if sim.is_terminal() {
            if restarts_left == 0 {
                break;
            }
            restarts_left -= 1;
            sim.handle_reset();
        }

        if args.autopilot && wants_flap(&sim) {
            sim.handle_flap();
        }
        sim.tick();
        frames += 1;

        for event in sim.drain_events() {
            match event {
                GameEvent::Crashed { cause, tick } => {
                    crashes += 1;
                    log::info!("Crash #{}: {:?} after {} ticks", crashes, cause, tick);
                }
                GameEvent::PipeSpawned { x, gap_center } => {
                    log::debug!("Pipe at x={} gap_center={}", x, gap_center);
                }
                other => log::trace!("{:?}", other),
            }
        }
    }

    println!(
        "frames={} crashes={} phase={:?} run_ticks={}",
        frames,
        crashes,
        sim.phase(),
        sim.tick_count()
    );
    if args.json {
        let json = serde_json::to_string_pretty(&sim.snapshot())?;
        println!("{}", json);
    }
    Ok(())
}

/// Flap when falling and below the gap of the next pipe ahead of the bird
fn wants_flap<G: GapSource>(sim: &Simulation<G>) -> bool {
    let state = sim.state();
    let bird = &state.bird;
    if bird.velocity < 0.0 {
        return false;
    }

    let target = state
        .pipes
        .pipes()
        .iter()
        .find(|p| p.x + p.width >= bird.pos.x - bird.radius)
        .map(|p| p.gap_center)
        .unwrap_or(sim.tuning().field_floor() / 2.0);

    // Aim slightly below center so a flap's rise stays inside the gap
    bird.pos.y > target + sim.tuning().gap_height / 6.0
}
