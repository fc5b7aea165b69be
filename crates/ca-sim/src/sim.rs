//! The `Sim` struct and its tick loop.

use ca_core::{AgentId, AgentRngs, SimClock, SimConfig, Tick, Vec2};
use ca_engine::CrowdEngine;
use ca_roadmap::{Steering, VisibilityOracle};

use crate::{SimObserver, SimResult};

// ── RunOutcome ────────────────────────────────────────────────────────────────

/// How a run ended.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RunOutcome {
    /// Every agent came within `arrival_threshold` of its goal at `tick`.
    Converged { tick: Tick },
    /// The `max_ticks` cutoff fired first.
    TickLimit { tick: Tick },
}

impl RunOutcome {
    pub fn converged(&self) -> bool {
        matches!(self, RunOutcome::Converged { .. })
    }

    pub fn final_tick(&self) -> Tick {
        match *self {
            RunOutcome::Converged { tick } | RunOutcome::TickLimit { tick } => tick,
        }
    }
}

// ── Sim ───────────────────────────────────────────────────────────────────────

/// The main simulation runner.
///
/// `Sim<S, E>` pairs a steering model with an engine and drives the
/// snapshot → steering → apply → arrival loop described in the crate docs.
/// Create via [`SimBuilder`][crate::SimBuilder], which validates that the
/// steering's goal assignments cover exactly the engine's agents.
pub struct Sim<S: Steering, E: CrowdEngine> {
    /// Global configuration (tick cutoff, seed, jitter, …).
    pub config: SimConfig,

    /// Tick counter; the engine keeps its own float clock in lockstep.
    pub clock: SimClock,

    /// The collision-avoidance engine (or the kinematic reference engine).
    pub engine: E,

    /// Per-agent goal assignments and the routing model over them.
    pub steering: S,

    /// Per-agent deterministic RNGs for the steering jitter, separated
    /// from the rest of the state for the split-borrow parallel pattern.
    pub rngs: AgentRngs,
}

impl<S: Steering, E: CrowdEngine> Sim<S, E> {
    /// Run until every agent has arrived or `config.max_ticks` is reached.
    ///
    /// Calls observer hooks at every tick boundary; use
    /// [`NoopObserver`][crate::NoopObserver] if you don't need callbacks.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<RunOutcome> {
        let outcome = loop {
            let now = self.clock.current_tick;
            if now >= self.config.end_tick() {
                break RunOutcome::TickLimit { tick: now };
            }
            observer.on_tick_start(now);

            // ── Phase 1: snapshot ─────────────────────────────────────────
            //
            // One coherent copy of all pre-step positions.  Both the trace
            // snapshot and every agent's steering decision read this copy,
            // so no decision can see another agent's same-tick movement.
            let (positions, radii) = self.snapshot();

            if self.config.output_interval_ticks > 0
                && now.0.is_multiple_of(self.config.output_interval_ticks)
            {
                observer.on_snapshot(now, self.engine.global_time_secs(), &positions);
            }

            // ── Phase 2: steering ─────────────────────────────────────────
            let velocities = self.preferred_velocities(&positions, &radii);

            // ── Phase 3: apply and step ───────────────────────────────────
            for (i, &v) in velocities.iter().enumerate() {
                self.engine.set_preferred_velocity(AgentId(i as u32), v);
            }
            self.engine.step();
            self.clock.advance();
            observer.on_tick_end(now);

            // ── Phase 4: arrival check ────────────────────────────────────
            if self.all_arrived() {
                break RunOutcome::Converged { tick: self.clock.current_tick };
            }
        };

        observer.on_run_end(outcome.final_tick(), &outcome);
        Ok(outcome)
    }

    /// `true` when every agent is within `arrival_threshold` of its goal.
    /// Squared-distance comparison — the loop never takes a square root.
    pub fn all_arrived(&self) -> bool {
        let threshold_sq = self.config.arrival_threshold * self.config.arrival_threshold;
        (0..self.engine.agent_count()).all(|i| {
            let agent = AgentId(i as u32);
            let goal = self.steering.goal_position(agent);
            self.engine.agent_position(agent).distance_sq(goal) <= threshold_sq
        })
    }

    // ── Internals ─────────────────────────────────────────────────────────

    fn snapshot(&self) -> (Vec<Vec2>, Vec<f32>) {
        let count = self.engine.agent_count();
        let mut positions = Vec::with_capacity(count);
        let mut radii = Vec::with_capacity(count);
        for i in 0..count {
            let agent = AgentId(i as u32);
            positions.push(self.engine.agent_position(agent));
            radii.push(self.engine.agent_radius(agent));
        }
        (positions, radii)
    }

    /// Preferred velocity per agent from the position snapshot, with the
    /// per-agent jitter added.  With the `parallel` feature all agents are
    /// evaluated on Rayon's thread pool; the per-agent RNGs make the result
    /// identical either way.
    fn preferred_velocities(&mut self, positions: &[Vec2], radii: &[f32]) -> Vec<Vec2> {
        // Explicit field borrows so the borrow checker sees disjoint access.
        let steering = &self.steering;
        let oracle: &dyn VisibilityOracle = &self.engine;
        let jitter = self.config.jitter;
        let rngs = &mut self.rngs;

        #[cfg(not(feature = "parallel"))]
        {
            positions
                .iter()
                .zip(radii)
                .zip(rngs.inner.iter_mut())
                .enumerate()
                .map(|(i, ((&position, &radius), rng))| {
                    let v =
                        steering.preferred_velocity(AgentId(i as u32), position, radius, oracle);
                    v + rng.jitter_vec(jitter)
                })
                .collect()
        }

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;

            positions
                .par_iter()
                .zip(radii.par_iter())
                .zip(rngs.inner.par_iter_mut())
                .enumerate()
                .map(|(i, ((&position, &radius), rng))| {
                    let v =
                        steering.preferred_velocity(AgentId(i as u32), position, radius, oracle);
                    v + rng.jitter_vec(jitter)
                })
                .collect()
        }
    }
}
