//! The visibility roadmap: waypoints, goal-distance tables, and the builder.
//!
//! # Data layout
//!
//! The roadmap is a flat `Vec<Waypoint>` where the first `goal_count`
//! vertices are the goal vertices.  Each waypoint carries its outgoing
//! neighbor list and a dense distance table with one `f32` per goal;
//! `f32::INFINITY` marks a goal unreachable from that waypoint.  Both are
//! populated exactly once by [`RoadmapBuilder::build`] and never mutated
//! afterwards.
//!
//! # Build pipeline
//!
//! 1. **Visibility graph** — every ordered vertex pair `(i, j)`, `i != j`,
//!    is tested against the oracle at the reference clearance; unobstructed
//!    pairs become directed edges.  Each source's neighbor list is
//!    independent of every other's, so with the `parallel` feature the scan
//!    runs across Rayon workers.
//! 2. **Goal distances** — one Dijkstra pass per goal, seeded at the goal's
//!    own vertex with Euclidean edge weights.  The passes write disjoint
//!    distance columns and likewise parallelize over goals.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use ordered_float::OrderedFloat;

use ca_core::{GoalId, Vec2, VertexId};

use crate::visibility::VisibilityOracle;
use crate::{RoadmapError, RoadmapResult};

// ── Waypoint ──────────────────────────────────────────────────────────────────

/// One roadmap vertex.  Immutable after [`RoadmapBuilder::build`].
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Waypoint {
    /// Fixed position of this vertex.
    pub position: Vec2,
    /// Vertices visible from this one at the build clearance (outgoing edges).
    pub neighbors: Vec<VertexId>,
    /// Shortest obstacle-respecting distance to each goal vertex, indexed by
    /// `GoalId`.  `f32::INFINITY` = unreachable via the roadmap.
    pub dist_to_goal: Vec<f32>,
}

// ── Roadmap ───────────────────────────────────────────────────────────────────

/// A built visibility roadmap.  Read-only for the remainder of the run.
///
/// Construct via [`RoadmapBuilder`]; there is no way to obtain a `Roadmap`
/// with unpopulated neighbor lists or distance tables.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Roadmap {
    waypoints: Vec<Waypoint>,
    goal_count: usize,
}

impl Roadmap {
    /// All vertices, goal prefix first.
    #[inline]
    pub fn waypoints(&self) -> &[Waypoint] {
        &self.waypoints
    }

    #[inline]
    pub fn waypoint(&self, vertex: VertexId) -> &Waypoint {
        &self.waypoints[vertex.index()]
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.waypoints.len()
    }

    /// Number of goal vertices (the length of every distance table).
    #[inline]
    pub fn goal_count(&self) -> usize {
        self.goal_count
    }

    #[inline]
    pub fn is_goal(&self, vertex: VertexId) -> bool {
        vertex.index() < self.goal_count
    }

    /// Position of a goal's own vertex.
    #[inline]
    pub fn goal_position(&self, goal: GoalId) -> Vec2 {
        self.waypoints[goal.vertex().index()].position
    }

    /// Precomputed shortest distance from `vertex` to `goal`.
    #[inline]
    pub fn dist_to_goal(&self, vertex: VertexId, goal: GoalId) -> f32 {
        self.waypoints[vertex.index()].dist_to_goal[goal.index()]
    }
}

// ── RoadmapBuilder ────────────────────────────────────────────────────────────

/// Collect waypoint positions, then call [`build`](Self::build) with the
/// engine's visibility oracle.
///
/// Goal vertices must all be added before ordinary waypoints so they form
/// the vertex prefix; `build` rejects out-of-order insertion rather than
/// silently renumbering.
///
/// # Example
///
/// ```
/// use ca_core::Vec2;
/// use ca_roadmap::{OpenField, RoadmapBuilder};
///
/// let mut b = RoadmapBuilder::new();
/// let goal = b.add_goal(Vec2::new(0.0, 0.0));
/// b.add_waypoint(Vec2::new(10.0, 0.0));
/// let roadmap = b.build(&OpenField, 2.0).unwrap();
/// assert_eq!(roadmap.goal_count(), 1);
/// assert_eq!(roadmap.goal_position(goal), Vec2::ZERO);
/// ```
pub struct RoadmapBuilder {
    positions: Vec<Vec2>,
    goal_count: usize,
    goal_after_waypoint: bool,
}

impl RoadmapBuilder {
    pub fn new() -> Self {
        Self {
            positions: Vec::new(),
            goal_count: 0,
            goal_after_waypoint: false,
        }
    }

    /// Pre-allocate for the expected vertex count.
    pub fn with_capacity(vertices: usize) -> Self {
        Self {
            positions: Vec::with_capacity(vertices),
            goal_count: 0,
            goal_after_waypoint: false,
        }
    }

    /// Add a goal vertex and return its `GoalId` (sequential from 0).
    ///
    /// Must precede every `add_waypoint` call; violations are reported by
    /// `build` as [`RoadmapError::GoalAfterWaypoint`].
    pub fn add_goal(&mut self, position: Vec2) -> GoalId {
        if self.positions.len() > self.goal_count {
            self.goal_after_waypoint = true;
        }
        let id = GoalId(self.goal_count as u16);
        self.positions.push(position);
        self.goal_count += 1;
        id
    }

    /// Add an ordinary (non-goal) waypoint and return its `VertexId`.
    pub fn add_waypoint(&mut self, position: Vec2) -> VertexId {
        let id = VertexId(self.positions.len() as u32);
        self.positions.push(position);
        id
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Run both build steps and produce a [`Roadmap`].
    ///
    /// `clearance` is the reference agent radius used for every edge
    /// visibility test.  Deterministic: the same positions, oracle, and
    /// clearance always yield identical neighbor lists and distance tables.
    pub fn build<O: VisibilityOracle>(
        self,
        oracle: &O,
        clearance: f32,
    ) -> RoadmapResult<Roadmap> {
        if self.goal_count == 0 {
            return Err(RoadmapError::NoGoals);
        }
        if self.goal_after_waypoint {
            return Err(RoadmapError::GoalAfterWaypoint);
        }

        let neighbors = visibility_scan(&self.positions, oracle, clearance);
        let columns = goal_distance_columns(&self.positions, &neighbors, self.goal_count);

        let waypoints = self
            .positions
            .into_iter()
            .enumerate()
            .zip(neighbors)
            .map(|((i, position), neighbors)| Waypoint {
                position,
                neighbors,
                dist_to_goal: columns.iter().map(|col| col[i]).collect(),
            })
            .collect();

        Ok(Roadmap {
            waypoints,
            goal_count: self.goal_count,
        })
    }
}

impl Default for RoadmapBuilder {
    fn default() -> Self {
        Self::new()
    }
}

// ── Build step 1: visibility graph ────────────────────────────────────────────

/// Neighbor list for every source vertex: all other vertices the oracle
/// reports visible at `clearance`.  O(N²) oracle queries.
fn visibility_scan<O: VisibilityOracle>(
    positions: &[Vec2],
    oracle: &O,
    clearance: f32,
) -> Vec<Vec<VertexId>> {
    let scan_source = |i: usize| -> Vec<VertexId> {
        positions
            .iter()
            .enumerate()
            .filter(|&(j, &p)| j != i && oracle.query_visibility(positions[i], p, clearance))
            .map(|(j, _)| VertexId(j as u32))
            .collect()
    };

    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        (0..positions.len()).into_par_iter().map(scan_source).collect()
    }

    #[cfg(not(feature = "parallel"))]
    {
        (0..positions.len()).map(scan_source).collect()
    }
}

// ── Build step 2: per-goal Dijkstra ───────────────────────────────────────────

/// One distance column per goal; column `g` holds the shortest distance from
/// every vertex to goal `g`.
fn goal_distance_columns(
    positions: &[Vec2],
    neighbors: &[Vec<VertexId>],
    goal_count: usize,
) -> Vec<Vec<f32>> {
    let run = |g: usize| dijkstra_to_goal(positions, neighbors, GoalId(g as u16));

    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        (0..goal_count).into_par_iter().map(run).collect()
    }

    #[cfg(not(feature = "parallel"))]
    {
        (0..goal_count).map(run).collect()
    }
}

/// Single-source Dijkstra seeded at the goal's own vertex, Euclidean edge
/// weights.  Unreached vertices keep the `INFINITY` sentinel.
///
/// Distances are computed *from* the goal outward over the edges as stored.
/// For a symmetric oracle the graph is symmetric and this equals the
/// vertex-to-goal distance; see the module docs on asymmetric oracles.
fn dijkstra_to_goal(
    positions: &[Vec2],
    neighbors: &[Vec<VertexId>],
    goal: GoalId,
) -> Vec<f32> {
    let mut dist = vec![f32::INFINITY; positions.len()];
    let source = goal.vertex();
    dist[source.index()] = 0.0;

    // Min-heap: (cost, vertex). Reverse makes BinaryHeap (max) behave as
    // min-heap. Secondary key VertexId gives deterministic tie-breaking.
    let mut heap: BinaryHeap<Reverse<(OrderedFloat<f32>, VertexId)>> = BinaryHeap::new();
    heap.push(Reverse((OrderedFloat(0.0), source)));

    while let Some(Reverse((cost, u))) = heap.pop() {
        // Skip stale heap entries superseded by a shorter relaxation.
        if cost.0 > dist[u.index()] {
            continue;
        }

        for &v in &neighbors[u.index()] {
            let new_cost = cost.0 + positions[u.index()].distance(positions[v.index()]);
            if new_cost < dist[v.index()] {
                dist[v.index()] = new_cost;
                heap.push(Reverse((OrderedFloat(new_cost), v)));
            }
        }
    }

    dist
}
