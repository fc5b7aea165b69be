//! Roadmap-subsystem error type.

use thiserror::Error;

use ca_core::GoalId;

/// Errors produced by `ca-roadmap`.
///
/// All are setup-time errors: once a `Roadmap` or a steering model exists,
/// routing itself cannot fail — degenerate conditions (no visible waypoint,
/// unreachable goal) degrade to a zero preferred velocity instead.
#[derive(Debug, Error)]
pub enum RoadmapError {
    #[error("roadmap has no goal vertices")]
    NoGoals,

    #[error("goal vertex added after an ordinary waypoint; goals must form the vertex prefix")]
    GoalAfterWaypoint,

    #[error("assigned goal {goal} out of range (roadmap has {goal_count} goals)")]
    GoalOutOfRange { goal: GoalId, goal_count: usize },
}

pub type RoadmapResult<T> = Result<T, RoadmapError>;
