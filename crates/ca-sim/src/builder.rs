//! Fluent builder for constructing a [`Sim`].

use ca_core::{AgentRngs, SimConfig};
use ca_engine::CrowdEngine;
use ca_roadmap::Steering;

use crate::{Sim, SimError, SimResult};

/// Builder for [`Sim<S, E>`].
///
/// The engine arrives fully populated (agents added, obstacles registered,
/// roadmap already built against it) and the steering model carries one goal
/// assignment per agent; `build` validates the two agree before any tick
/// can run.
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::new(config, engine, steering).build()?;
/// let outcome = sim.run(&mut NoopObserver)?;
/// ```
pub struct SimBuilder<S: Steering, E: CrowdEngine> {
    config:   SimConfig,
    engine:   E,
    steering: S,
}

impl<S: Steering, E: CrowdEngine> SimBuilder<S, E> {
    pub fn new(config: SimConfig, engine: E, steering: S) -> Self {
        Self { config, engine, steering }
    }

    /// Validate inputs, seed the per-agent RNGs, and return a ready-to-run
    /// [`Sim`].
    pub fn build(self) -> SimResult<Sim<S, E>> {
        if !(self.config.time_step_secs > 0.0) {
            return Err(SimError::Config(format!(
                "time step must be positive, got {}",
                self.config.time_step_secs
            )));
        }
        if self.config.arrival_threshold < 0.0 {
            return Err(SimError::Config(format!(
                "arrival threshold must be non-negative, got {}",
                self.config.arrival_threshold
            )));
        }

        let expected = self.engine.agent_count();
        let got = self.steering.agent_count();
        if got != expected {
            return Err(SimError::AgentCountMismatch {
                expected,
                got,
                what: "goal assignments",
            });
        }

        let rngs = AgentRngs::new(expected, self.config.seed);

        Ok(Sim {
            clock:    self.config.make_clock(),
            config:   self.config,
            engine:   self.engine,
            steering: self.steering,
            rngs,
        })
    }
}
