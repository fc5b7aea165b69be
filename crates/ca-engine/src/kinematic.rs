//! The reference engine: straight-line integration of preferred velocities.
//!
//! # Data layout
//!
//! Agent state is struct-of-arrays (`positions`, `radii`, `max_speeds`,
//! `pref_velocities`), all indexed by `AgentId`.  Obstacles are stored as
//! bare line segments; a registered polygon is decomposed into its edges at
//! insertion time so visibility queries are a flat scan over segments.
//!
//! # What this engine does *not* do
//!
//! No collision response of any kind: agents move exactly along their
//! clamped preferred velocity and may pass through each other.  Obstacles
//! affect visibility queries only.  This keeps scenario behavior a pure
//! function of the routing layer, which is what the workspace's tests need
//! to observe.

use ca_core::{AgentId, Vec2};
use ca_roadmap::VisibilityOracle;

use crate::engine::CrowdEngine;
use crate::geometry::dist_sq_segment_segment;
use crate::{EngineError, EngineResult};

// ── Obstacles ─────────────────────────────────────────────────────────────────

/// One obstacle edge.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Segment {
    pub a: Vec2,
    pub b: Vec2,
}

// ── Agent defaults ────────────────────────────────────────────────────────────

/// Parameters applied to agents added after [`KinematicEngine::set_defaults`].
#[derive(Copy, Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AgentDefaults {
    /// Agent disc radius, also the clearance for its visibility queries.
    pub radius: f32,
    /// Upper bound on realized speed in units per second.
    pub max_speed: f32,
}

impl Default for AgentDefaults {
    fn default() -> Self {
        Self { radius: 2.0, max_speed: 2.0 }
    }
}

// ── KinematicEngine ───────────────────────────────────────────────────────────

/// Reference [`CrowdEngine`]: kinematic integration plus segment-based
/// visibility, no collision avoidance.
pub struct KinematicEngine {
    time_step_secs: f32,
    steps: u64,
    defaults: AgentDefaults,

    positions: Vec<Vec2>,
    radii: Vec<f32>,
    max_speeds: Vec<f32>,
    pref_velocities: Vec<Vec2>,

    obstacles: Vec<Segment>,
}

impl KinematicEngine {
    pub fn new(time_step_secs: f32) -> Self {
        Self {
            time_step_secs,
            steps: 0,
            defaults: AgentDefaults::default(),
            positions: Vec::new(),
            radii: Vec::new(),
            max_speeds: Vec::new(),
            pref_velocities: Vec::new(),
            obstacles: Vec::new(),
        }
    }

    /// Set the parameters for agents added from now on.  Already-added
    /// agents keep the defaults they were created with.
    pub fn set_defaults(&mut self, defaults: AgentDefaults) {
        self.defaults = defaults;
    }

    pub fn defaults(&self) -> AgentDefaults {
        self.defaults
    }

    /// Register a polygonal obstacle given as its vertex loop.  The polygon
    /// is closed automatically (last vertex connects back to the first); a
    /// two-vertex input registers a single wall segment.
    pub fn add_obstacle(&mut self, vertices: &[Vec2]) -> EngineResult<()> {
        if vertices.len() < 2 {
            return Err(EngineError::DegenerateObstacle { vertices: vertices.len() });
        }
        for i in 0..vertices.len() {
            let j = (i + 1) % vertices.len();
            // A 2-vertex "polygon" would close into a duplicate edge.
            if vertices.len() == 2 && i == 1 {
                break;
            }
            self.obstacles.push(Segment { a: vertices[i], b: vertices[j] });
        }
        Ok(())
    }

    pub fn obstacle_count(&self) -> usize {
        self.obstacles.len()
    }

    pub fn time_step_secs(&self) -> f32 {
        self.time_step_secs
    }
}

impl VisibilityOracle for KinematicEngine {
    /// A sight line is clear when every obstacle segment stays at least
    /// `clearance` away from it.
    fn query_visibility(&self, a: Vec2, b: Vec2, clearance: f32) -> bool {
        let clearance_sq = clearance * clearance;
        self.obstacles
            .iter()
            .all(|s| dist_sq_segment_segment(a, b, s.a, s.b) >= clearance_sq)
    }
}

impl CrowdEngine for KinematicEngine {
    fn add_agent(&mut self, position: Vec2) -> AgentId {
        let id = AgentId(self.positions.len() as u32);
        self.positions.push(position);
        self.radii.push(self.defaults.radius);
        self.max_speeds.push(self.defaults.max_speed);
        self.pref_velocities.push(Vec2::ZERO);
        id
    }

    fn agent_count(&self) -> usize {
        self.positions.len()
    }

    fn agent_position(&self, agent: AgentId) -> Vec2 {
        self.positions[agent.index()]
    }

    fn agent_radius(&self, agent: AgentId) -> f32 {
        self.radii[agent.index()]
    }

    fn set_preferred_velocity(&mut self, agent: AgentId, velocity: Vec2) {
        self.pref_velocities[agent.index()] = velocity;
    }

    fn step(&mut self) {
        for i in 0..self.positions.len() {
            let pref = self.pref_velocities[i];
            let speed_sq = pref.length_sq();
            let max = self.max_speeds[i];
            let velocity = if speed_sq > max * max {
                pref.normalize() * max
            } else {
                pref
            };
            self.positions[i] += velocity * self.time_step_secs;
        }
        self.steps += 1;
    }

    fn global_time_secs(&self) -> f32 {
        // Derived, not accumulated: immune to f32 summation drift.
        self.steps as f32 * self.time_step_secs
    }
}
