//! Steering trait and the two preferred-velocity models.
//!
//! # Pluggability
//!
//! The tick loop in `ca-sim` calls steering via the [`Steering`] trait, so
//! scenarios can swap models without touching the loop: [`RoadmapSteering`]
//! routes through a visibility roadmap, [`DirectSteering`] heads straight
//! for a fixed goal coordinate.  Both are pure functions of the position
//! snapshot — the symmetry-breaking perturbation is applied by the caller,
//! which owns the per-agent RNGs.

use ca_core::{AgentId, GoalId, Vec2, VertexId};

use crate::roadmap::Roadmap;
use crate::visibility::VisibilityOracle;
use crate::{RoadmapError, RoadmapResult};

// ── Steering trait ────────────────────────────────────────────────────────────

/// Per-agent preferred-velocity model.
///
/// # Thread safety
///
/// Implementations must be `Send + Sync`: the tick loop may evaluate
/// `preferred_velocity` for many agents in parallel against a shared model.
/// Anything that varies per agent belongs in the arguments, not in `self`.
pub trait Steering: Send + Sync {
    /// Number of agents this model carries goal assignments for.
    fn agent_count(&self) -> usize;

    /// The fixed goal position assigned to `agent`.
    fn goal_position(&self, agent: AgentId) -> Vec2;

    /// Preferred velocity (unit magnitude or shorter) for `agent` at
    /// `position` this tick.  `radius` is the agent's clearance for
    /// visibility queries.  Returns `Vec2::ZERO` when the agent has arrived
    /// or has no usable route — never fails.
    fn preferred_velocity(
        &self,
        agent: AgentId,
        position: Vec2,
        radius: f32,
        oracle: &dyn VisibilityOracle,
    ) -> Vec2;
}

// ── RoadmapSteering ───────────────────────────────────────────────────────────

/// Greedy roadmap routing: each tick the agent heads for the visible vertex
/// minimizing `distance(position, vertex) + dist_to_goal[vertex][goal]`.
///
/// Ties resolve to the first minimum in vertex order (stable linear scan).
/// A waypoint whose distance table holds the `INFINITY` sentinel can never
/// win against any finite-cost candidate, so unreachable vertices are
/// excluded without special-casing.
pub struct RoadmapSteering {
    roadmap: Roadmap,
    /// Goal-vertex assignment per agent, fixed for the run.
    goals: Vec<GoalId>,
}

impl RoadmapSteering {
    /// Validates every assignment against the roadmap's goal prefix —
    /// a bad goal index is a scenario bug and is rejected here rather than
    /// surfacing as a panic mid-simulation.
    pub fn new(roadmap: Roadmap, goals: Vec<GoalId>) -> RoadmapResult<Self> {
        let goal_count = roadmap.goal_count();
        for &goal in &goals {
            if goal.index() >= goal_count {
                return Err(RoadmapError::GoalOutOfRange { goal, goal_count });
            }
        }
        Ok(Self { roadmap, goals })
    }

    pub fn roadmap(&self) -> &Roadmap {
        &self.roadmap
    }

    #[inline]
    pub fn goal_of(&self, agent: AgentId) -> GoalId {
        self.goals[agent.index()]
    }

    /// The visible vertex minimizing candidate cost, or `None` when no
    /// vertex is visible from `position`.
    ///
    /// The cost comparison runs before the oracle query so occluded vertices
    /// that cannot improve the minimum are skipped without a visibility test.
    fn best_vertex(
        &self,
        position: Vec2,
        radius: f32,
        goal: GoalId,
        oracle: &dyn VisibilityOracle,
    ) -> Option<VertexId> {
        let mut min_cost = f32::INFINITY;
        let mut best = None;

        for (j, wp) in self.roadmap.waypoints().iter().enumerate() {
            let cost = position.distance(wp.position) + wp.dist_to_goal[goal.index()];
            if cost < min_cost && oracle.query_visibility(position, wp.position, radius) {
                min_cost = cost;
                best = Some(VertexId(j as u32));
            }
        }

        best
    }
}

impl Steering for RoadmapSteering {
    fn agent_count(&self) -> usize {
        self.goals.len()
    }

    fn goal_position(&self, agent: AgentId) -> Vec2 {
        self.roadmap.goal_position(self.goal_of(agent))
    }

    fn preferred_velocity(
        &self,
        agent: AgentId,
        position: Vec2,
        radius: f32,
        oracle: &dyn VisibilityOracle,
    ) -> Vec2 {
        let goal = self.goal_of(agent);

        let Some(vertex) = self.best_vertex(position, radius, goal, oracle) else {
            // No roadmap vertex visible; the agent stalls this tick rather
            // than crashing the run.
            return Vec2::ZERO;
        };

        let target = self.roadmap.waypoint(vertex).position;
        if position.distance_sq(target) == 0.0 {
            if vertex == goal.vertex() {
                // Arrived at the assigned goal vertex.
                Vec2::ZERO
            } else {
                // Sitting exactly on an intermediate waypoint: head for the
                // true goal position instead of re-selecting this vertex.
                (self.roadmap.goal_position(goal) - position).normalize()
            }
        } else {
            (target - position).normalize()
        }
    }
}

// ── DirectSteering ────────────────────────────────────────────────────────────

/// Straight-line seeking toward a fixed goal coordinate per agent — the
/// non-roadmap scenario.  The goal vector is normalized only beyond unit
/// distance, so the preferred speed decays smoothly on final approach
/// instead of oscillating across the goal point.
pub struct DirectSteering {
    goals: Vec<Vec2>,
}

impl DirectSteering {
    pub fn new(goals: Vec<Vec2>) -> Self {
        Self { goals }
    }
}

impl Steering for DirectSteering {
    fn agent_count(&self) -> usize {
        self.goals.len()
    }

    fn goal_position(&self, agent: AgentId) -> Vec2 {
        self.goals[agent.index()]
    }

    fn preferred_velocity(
        &self,
        agent: AgentId,
        position: Vec2,
        _radius: f32,
        _oracle: &dyn VisibilityOracle,
    ) -> Vec2 {
        let goal_vector = self.goals[agent.index()] - position;
        if goal_vector.length_sq() > 1.0 {
            goal_vector.normalize()
        } else {
            goal_vector
        }
    }
}
