//! corridor — roadmap routing demo for the rust_ca workspace.
//!
//! Four square obstacles form a plus-shaped corridor system.  One hundred
//! agents start in 5×5 grids at the four outer corners and each crowd
//! routes to the diagonally opposite corner, funnelling through the
//! corridors via a visibility roadmap.

use std::path::Path;
use std::time::Instant;

use anyhow::Result;

use ca_core::{GoalId, SimConfig, Vec2};
use ca_engine::{AgentDefaults, CrowdEngine, KinematicEngine};
use ca_output::{CsvTraceWriter, TraceObserver};
use ca_roadmap::{Roadmap, RoadmapBuilder, RoadmapSteering};
use ca_sim::SimBuilder;

// ── Constants ─────────────────────────────────────────────────────────────────

const SEED:              u64 = 42;
const TIME_STEP_SECS:    f32 = 2.25;
const MAX_TICKS:         u64 = 5_000;
const ARRIVAL_THRESHOLD: f32 = 20.0;
const AGENT_RADIUS:      f32 = 2.0;
const MAX_SPEED:         f32 = 2.0;

// ── Scenario ──────────────────────────────────────────────────────────────────

/// The four 30×30 obstacle blocks, vertices counterclockwise.
fn add_obstacles(engine: &mut KinematicEngine) -> Result<()> {
    engine.add_obstacle(&[
        Vec2::new(-10.0, 40.0),
        Vec2::new(-40.0, 40.0),
        Vec2::new(-40.0, 10.0),
        Vec2::new(-10.0, 10.0),
    ])?;
    engine.add_obstacle(&[
        Vec2::new(10.0, 40.0),
        Vec2::new(10.0, 10.0),
        Vec2::new(40.0, 10.0),
        Vec2::new(40.0, 40.0),
    ])?;
    engine.add_obstacle(&[
        Vec2::new(10.0, -40.0),
        Vec2::new(40.0, -40.0),
        Vec2::new(40.0, -10.0),
        Vec2::new(10.0, -10.0),
    ])?;
    engine.add_obstacle(&[
        Vec2::new(-10.0, -40.0),
        Vec2::new(-10.0, -10.0),
        Vec2::new(-40.0, -10.0),
        Vec2::new(-40.0, -40.0),
    ])?;
    Ok(())
}

/// Four corner goals plus sixteen waypoints hugging the obstacle corners.
fn build_roadmap(engine: &KinematicEngine) -> Result<Roadmap> {
    let mut b = RoadmapBuilder::with_capacity(20);

    b.add_goal(Vec2::new(-75.0, -75.0));
    b.add_goal(Vec2::new(75.0, -75.0));
    b.add_goal(Vec2::new(-75.0, 75.0));
    b.add_goal(Vec2::new(75.0, 75.0));

    // Waypoints sit just outside the corridor mouths, 2 units clear of
    // the obstacle edges at ±10 and ±40.
    for x in [-42.0, -8.0, 8.0, 42.0] {
        for y in [-42.0, -8.0, 8.0, 42.0] {
            b.add_waypoint(Vec2::new(x, y));
        }
    }

    Ok(b.build(engine, AGENT_RADIUS)?)
}

/// 5×5 agent grids at the four outer corners, each aimed at the opposite
/// corner's goal.
fn add_agents(engine: &mut KinematicEngine) -> Vec<GoalId> {
    let mut goals = Vec::with_capacity(100);
    for i in 0..5 {
        for j in 0..5 {
            let (dx, dy) = (i as f32 * 10.0, j as f32 * 10.0);

            engine.add_agent(Vec2::new(55.0 + dx, 55.0 + dy));
            goals.push(GoalId(0));

            engine.add_agent(Vec2::new(-55.0 - dx, 55.0 + dy));
            goals.push(GoalId(1));

            engine.add_agent(Vec2::new(55.0 + dx, -55.0 - dy));
            goals.push(GoalId(2));

            engine.add_agent(Vec2::new(-55.0 - dx, -55.0 - dy));
            goals.push(GoalId(3));
        }
    }
    goals
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    println!("=== corridor — rust_ca roadmap demo ===");

    // 1. Engine with obstacles and agents.
    let mut engine = KinematicEngine::new(TIME_STEP_SECS);
    engine.set_defaults(AgentDefaults { radius: AGENT_RADIUS, max_speed: MAX_SPEED });
    add_obstacles(&mut engine)?;
    let goals = add_agents(&mut engine);
    println!(
        "Agents: {}  |  Obstacle segments: {}",
        engine.agent_count(),
        engine.obstacle_count()
    );

    // 2. Roadmap over the engine's obstacle set.
    let t0 = Instant::now();
    let roadmap = build_roadmap(&engine)?;
    println!(
        "Roadmap: {} vertices ({} goals), built in {:.1?}",
        roadmap.vertex_count(),
        roadmap.goal_count(),
        t0.elapsed()
    );
    let steering = RoadmapSteering::new(roadmap, goals)?;

    // 3. Sim config.
    let mut config = SimConfig::new(TIME_STEP_SECS);
    config.seed = SEED;
    config.max_ticks = MAX_TICKS;
    config.arrival_threshold = ARRIVAL_THRESHOLD;
    let mut sim = SimBuilder::new(config, engine, steering).build()?;

    // 4. Trace output.
    std::fs::create_dir_all("output/corridor")?;
    let writer = CsvTraceWriter::new(Path::new("output/corridor/trace.csv"))?;
    let mut obs = TraceObserver::new(writer);

    // 5. Run.
    let t0 = Instant::now();
    let outcome = sim.run(&mut obs)?;
    if let Some(e) = obs.take_error() {
        eprintln!("trace error: {e}");
    }

    println!(
        "Run: {:?} after {} ticks ({:.1} sim-seconds) in {:.1?}",
        outcome,
        outcome.final_tick().0,
        sim.clock.global_time_secs(),
        t0.elapsed()
    );
    println!("Trace written to output/corridor/trace.csv");
    Ok(())
}
