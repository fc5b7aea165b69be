//! blocks — batched crossing-paths demo for the rust_ca workspace.
//!
//! Runs a batch of two-agent encounters: each run samples two straight-line
//! paths that cross somewhere in the arena, then lets the agents steer
//! directly at their goals until both arrive.  All runs append to one
//! plain-text trace, separated per run, which makes the batch easy to feed
//! into trajectory-analysis tooling.

use std::path::Path;
use std::time::Instant;

use anyhow::Result;

use ca_core::{SimConfig, SimRng, Vec2};
use ca_engine::geometry::segments_intersect;
use ca_engine::{AgentDefaults, CrowdEngine, KinematicEngine};
use ca_output::{TextTraceWriter, TraceObserver, TraceWriter};
use ca_roadmap::DirectSteering;
use ca_sim::SimBuilder;

// ── Constants ─────────────────────────────────────────────────────────────────

const RUNS:              usize = 50;
const SEED:              u64   = 42;
const ARENA_HALF:        f32   = 100.0;
const TIME_STEP_SECS:    f32   = 0.05;
const MAX_TICKS:         u64   = 50_000;
const ARRIVAL_THRESHOLD: f32   = 5.0;
const AGENT_RADIUS:      f32   = 15.0;
const MAX_SPEED:         f32   = 20.0;
const MIN_PATH_LEN:      f32   = 150.0;

// ── Scenario sampling ─────────────────────────────────────────────────────────

/// Two start/goal pairs whose paths cross.
struct Encounter {
    starts: [Vec2; 2],
    goals:  [Vec2; 2],
}

fn endpoints_too_close(a: Vec2, b: Vec2) -> bool {
    a.distance_sq(b) <= 2.0 * AGENT_RADIUS
}

/// Rejection-sample until the two paths cross, are long enough, and keep
/// the paired endpoints apart.
fn sample_encounter(rng: &mut SimRng) -> Encounter {
    loop {
        let a = rng.square_offset(ARENA_HALF);
        let b = rng.square_offset(ARENA_HALF);
        let c = rng.square_offset(ARENA_HALF);
        let d = rng.square_offset(ARENA_HALF);

        if !segments_intersect(a, b, c, d)
            || endpoints_too_close(a, c)
            || endpoints_too_close(b, d)
            || a.distance(b) < MIN_PATH_LEN
            || c.distance(d) < MIN_PATH_LEN
        {
            continue;
        }
        return Encounter { starts: [a, c], goals: [b, d] };
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    println!("=== blocks — rust_ca crossing-paths batch ===");
    println!("Runs: {RUNS}  |  Seed: {SEED}");

    std::fs::create_dir_all("output/blocks")?;
    let mut writer = TextTraceWriter::create(Path::new("output/blocks/trace.txt"))?;
    let mut rng = SimRng::new(SEED);

    let t0 = Instant::now();
    let mut converged = 0usize;

    for run in 0..RUNS {
        let encounter = sample_encounter(&mut rng);
        println!(
            "run {run:>2}: {} -> {}  crossing  {} -> {}",
            encounter.starts[0], encounter.goals[0], encounter.starts[1], encounter.goals[1],
        );

        let mut engine = KinematicEngine::new(TIME_STEP_SECS);
        engine.set_defaults(AgentDefaults { radius: AGENT_RADIUS, max_speed: MAX_SPEED });
        for start in encounter.starts {
            engine.add_agent(start);
        }
        let steering = DirectSteering::new(encounter.goals.to_vec());

        let mut config = SimConfig::new(TIME_STEP_SECS);
        config.seed = SEED.wrapping_add(run as u64);
        config.max_ticks = MAX_TICKS;
        config.arrival_threshold = ARRIVAL_THRESHOLD;
        let mut sim = SimBuilder::new(config, engine, steering).build()?;

        let mut obs = TraceObserver::new(writer);
        let outcome = sim.run(&mut obs)?;
        if let Some(e) = obs.take_error() {
            eprintln!("trace error in run {run}: {e}");
        }
        writer = obs.into_writer();

        if outcome.converged() {
            converged += 1;
        }
    }

    writer.finish()?;
    println!();
    println!("{converged}/{RUNS} runs converged in {:.1?}", t0.elapsed());
    println!("Trace written to output/blocks/trace.txt");
    Ok(())
}
