//! The `CrowdEngine` trait — everything the routing layer consumes from the
//! external simulation engine.

use ca_core::{AgentId, Vec2};
use ca_roadmap::VisibilityOracle;

/// The interface of the local collision-avoidance engine.
///
/// A `CrowdEngine` owns the agents: their positions, radii, and current
/// preferred velocities.  One call to [`step`](Self::step) advances the
/// world by one fixed time step, moving every agent according to whatever
/// velocity-selection scheme the engine implements.  Line-of-sight queries
/// come from the [`VisibilityOracle`] supertrait so the roadmap builder and
/// the steering phase can borrow the engine directly as their oracle.
pub trait CrowdEngine: VisibilityOracle {
    /// Add an agent at `position` using the engine's current defaults and
    /// return its handle.  IDs are sequential from zero.
    fn add_agent(&mut self, position: Vec2) -> AgentId;

    fn agent_count(&self) -> usize;

    fn agent_position(&self, agent: AgentId) -> Vec2;

    fn agent_radius(&self, agent: AgentId) -> f32;

    /// Set the preferred velocity consumed by the next [`step`](Self::step).
    fn set_preferred_velocity(&mut self, agent: AgentId, velocity: Vec2);

    /// Advance the world by one time step.
    fn step(&mut self);

    /// Accumulated simulated time in seconds.
    fn global_time_secs(&self) -> f32;
}
