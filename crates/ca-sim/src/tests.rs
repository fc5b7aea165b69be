//! Integration tests for ca-sim.
//!
//! All scenarios use the kinematic reference engine so outcomes are a pure
//! function of the routing layer.

use ca_core::{AgentId, GoalId, SimConfig, Tick, Vec2, VertexId};
use ca_engine::{AgentDefaults, CrowdEngine, KinematicEngine};
use ca_roadmap::{DirectSteering, RoadmapBuilder, RoadmapSteering};

use crate::{NoopObserver, RunOutcome, SimBuilder, SimError, SimObserver};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Deterministic config: no jitter, fixed seed, fine time step.
fn test_config(max_ticks: u64, arrival_threshold: f32) -> SimConfig {
    let mut config = SimConfig::new(0.25);
    config.max_ticks = max_ticks;
    config.seed = 42;
    config.jitter = 0.0;
    config.arrival_threshold = arrival_threshold;
    config
}

/// One agent at `start`, steered straight at `goal`.
fn single_agent(start: Vec2, goal: Vec2) -> (KinematicEngine, DirectSteering) {
    let mut engine = KinematicEngine::new(0.25);
    engine.add_agent(start);
    (engine, DirectSteering::new(vec![goal]))
}

/// Observer counting hook invocations and recording snapshot ticks.
#[derive(Default)]
struct CountingObserver {
    tick_starts:    usize,
    tick_ends:      usize,
    snapshot_ticks: Vec<Tick>,
    last_positions: Vec<Vec2>,
    run_ends:       usize,
}

impl SimObserver for CountingObserver {
    fn on_tick_start(&mut self, _tick: Tick) {
        self.tick_starts += 1;
    }

    fn on_snapshot(&mut self, tick: Tick, _time_secs: f32, positions: &[Vec2]) {
        self.snapshot_ticks.push(tick);
        self.last_positions = positions.to_vec();
    }

    fn on_tick_end(&mut self, _tick: Tick) {
        self.tick_ends += 1;
    }

    fn on_run_end(&mut self, _final_tick: Tick, _outcome: &RunOutcome) {
        self.run_ends += 1;
    }
}

// ── SimBuilder validation ─────────────────────────────────────────────────────

#[cfg(test)]
mod builder_tests {
    use super::*;

    #[test]
    fn agent_count_mismatch_rejected() {
        let mut engine = KinematicEngine::new(0.25);
        engine.add_agent(Vec2::ZERO);
        engine.add_agent(Vec2::new(1.0, 0.0));
        let steering = DirectSteering::new(vec![Vec2::new(10.0, 0.0)]);

        let result = SimBuilder::new(test_config(10, 0.5), engine, steering).build();
        assert!(matches!(
            result,
            Err(SimError::AgentCountMismatch { expected: 2, got: 1, .. })
        ));
    }

    #[test]
    fn non_positive_time_step_rejected() {
        let (engine, steering) = single_agent(Vec2::ZERO, Vec2::new(10.0, 0.0));
        let mut config = test_config(10, 0.5);
        config.time_step_secs = 0.0;

        let result = SimBuilder::new(config, engine, steering).build();
        assert!(matches!(result, Err(SimError::Config(_))));
    }

    #[test]
    fn negative_arrival_threshold_rejected() {
        let (engine, steering) = single_agent(Vec2::ZERO, Vec2::new(10.0, 0.0));
        let result = SimBuilder::new(test_config(10, -1.0), engine, steering).build();
        assert!(matches!(result, Err(SimError::Config(_))));
    }
}

// ── End-to-end runs ───────────────────────────────────────────────────────────

#[cfg(test)]
mod run_tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn direct_steering_converges_deterministically() {
        let run_once = || {
            let (engine, steering) = single_agent(Vec2::ZERO, Vec2::new(10.0, 0.0));
            let mut sim = SimBuilder::new(test_config(200, 0.5), engine, steering)
                .build()
                .unwrap();
            sim.run(&mut NoopObserver).unwrap()
        };

        let outcome = run_once();
        assert!(outcome.converged(), "straight shot must converge, got {outcome:?}");
        // 10 units at unit preferred speed, 0.25 s steps, plus the decaying
        // final approach: comfortably under 60 ticks.
        assert!(outcome.final_tick() < Tick(60));
        // Zero jitter: reruns are bit-identical.
        assert_eq!(outcome, run_once());
    }

    #[test]
    fn tick_limit_reported_when_goal_out_of_reach() {
        let (engine, steering) = single_agent(Vec2::ZERO, Vec2::new(1_000.0, 0.0));
        let mut sim = SimBuilder::new(test_config(10, 0.5), engine, steering)
            .build()
            .unwrap();

        let outcome = sim.run(&mut NoopObserver).unwrap();
        assert_eq!(outcome, RunOutcome::TickLimit { tick: Tick(10) });
    }

    #[test]
    fn roadmap_square_heads_down_the_diagonal() {
        let mut engine = KinematicEngine::new(0.25);
        let agent = engine.add_agent(Vec2::new(10.0, 10.0));

        let mut b = RoadmapBuilder::new();
        b.add_goal(Vec2::new(0.0, 0.0));
        b.add_waypoint(Vec2::new(10.0, 0.0));
        b.add_waypoint(Vec2::new(0.0, 10.0));
        b.add_waypoint(Vec2::new(10.0, 10.0));
        let roadmap = b.build(&engine, engine.defaults().radius).unwrap();
        let steering = RoadmapSteering::new(roadmap, vec![GoalId(0)]).unwrap();

        let mut sim = SimBuilder::new(test_config(400, 0.5), engine, steering)
            .build()
            .unwrap();
        let outcome = sim.run(&mut NoopObserver).unwrap();
        assert!(outcome.converged());

        // Nothing blocks the sight line, so the path is the straight
        // diagonal: x stays equal to y all the way down.
        let end = sim.engine.agent_position(agent);
        assert!(end.distance(Vec2::ZERO) <= 0.5 + 1e-4);
        assert_relative_eq!(end.x, end.y, max_relative = 1e-3);
    }

    #[test]
    fn wall_forces_detour_through_waypoint() {
        let mut engine = KinematicEngine::new(0.25);
        engine.set_defaults(AgentDefaults { radius: 1.0, max_speed: 2.0 });
        engine
            .add_obstacle(&[Vec2::new(5.0, -10.0), Vec2::new(5.0, 10.0)])
            .unwrap();
        let agent = engine.add_agent(Vec2::new(10.0, 0.0));

        let mut b = RoadmapBuilder::new();
        b.add_goal(Vec2::new(0.0, 0.0));
        b.add_waypoint(Vec2::new(5.0, 13.0)); // above the wall's top end
        let roadmap = b.build(&engine, 1.0).unwrap();

        // Sanity: the detour vertex routes to the goal, so the graph is
        // connected around the wall.
        assert_eq!(roadmap.dist_to_goal(VertexId(0), GoalId(0)), 0.0);
        assert!(roadmap.dist_to_goal(VertexId(1), GoalId(0)).is_finite());

        let steering = RoadmapSteering::new(roadmap, vec![GoalId(0)]).unwrap();
        let mut sim = SimBuilder::new(test_config(800, 0.5), engine, steering)
            .build()
            .unwrap();

        let outcome = sim.run(&mut NoopObserver).unwrap();
        assert!(outcome.converged(), "detour run must converge, got {outcome:?}");
        // The detour is strictly longer than the 10-unit straight line.
        assert!(outcome.final_tick() > Tick(40));
        let end = sim.engine.agent_position(agent);
        assert!(end.distance(Vec2::ZERO) <= 0.5 + 1e-4);
    }

    #[test]
    fn same_seed_same_trajectory_with_jitter() {
        let run = || {
            let mut engine = KinematicEngine::new(0.25);
            engine.add_agent(Vec2::ZERO);
            engine.add_agent(Vec2::new(0.0, 5.0));
            let steering =
                DirectSteering::new(vec![Vec2::new(50.0, 0.0), Vec2::new(50.0, 5.0)]);

            let mut config = test_config(40, 0.5);
            config.jitter = 1e-4;
            let mut sim = SimBuilder::new(config, engine, steering).build().unwrap();
            sim.run(&mut NoopObserver).unwrap();
            (
                sim.engine.agent_position(AgentId(0)),
                sim.engine.agent_position(AgentId(1)),
            )
        };
        assert_eq!(run(), run());
    }
}

// ── Observer hooks ────────────────────────────────────────────────────────────

#[cfg(test)]
mod observer_tests {
    use super::*;

    #[test]
    fn snapshot_cadence_follows_interval() {
        let (engine, steering) = single_agent(Vec2::ZERO, Vec2::new(1_000.0, 0.0));
        let mut config = test_config(10, 0.5);
        config.output_interval_ticks = 2;
        let mut sim = SimBuilder::new(config, engine, steering).build().unwrap();

        let mut obs = CountingObserver::default();
        sim.run(&mut obs).unwrap();

        assert_eq!(obs.tick_starts, 10);
        assert_eq!(obs.tick_ends, 10);
        assert_eq!(obs.run_ends, 1);
        assert_eq!(
            obs.snapshot_ticks,
            vec![Tick(0), Tick(2), Tick(4), Tick(6), Tick(8)]
        );
        assert_eq!(obs.last_positions.len(), 1);
    }

    #[test]
    fn zero_interval_disables_snapshots() {
        let (engine, steering) = single_agent(Vec2::ZERO, Vec2::new(1_000.0, 0.0));
        let mut config = test_config(5, 0.5);
        config.output_interval_ticks = 0;
        let mut sim = SimBuilder::new(config, engine, steering).build().unwrap();

        let mut obs = CountingObserver::default();
        sim.run(&mut obs).unwrap();
        assert!(obs.snapshot_ticks.is_empty());
    }
}
