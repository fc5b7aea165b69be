//! `ca-engine` — the simulation-engine seam and a reference implementation.
//!
//! The collision-avoidance solver this workspace was designed around is an
//! external component: the routing and orchestration crates only ever talk
//! to it through the [`CrowdEngine`] trait (agent storage, time stepping)
//! and the [`VisibilityOracle`] it inherits (line-of-sight queries).
//!
//! [`KinematicEngine`] is the bundled reference implementation: it
//! integrates preferred velocities directly with no collision response, and
//! answers visibility queries from registered polygonal obstacles via plain
//! segment geometry.  That is enough to run and test every scenario in this
//! workspace end-to-end; production deployments implement [`CrowdEngine`]
//! over a full reciprocal-collision-avoidance solver instead.
//!
//! | Module        | Contents                                          |
//! |---------------|---------------------------------------------------|
//! | [`engine`]    | `CrowdEngine` trait                               |
//! | [`geometry`]  | segment distance / intersection helpers           |
//! | [`kinematic`] | `KinematicEngine`, `AgentDefaults`, `Segment`     |
//! | [`error`]     | `EngineError`, `EngineResult<T>`                  |

pub mod engine;
pub mod error;
pub mod geometry;
pub mod kinematic;

#[cfg(test)]
mod tests;

pub use engine::CrowdEngine;
pub use error::{EngineError, EngineResult};
pub use kinematic::{AgentDefaults, KinematicEngine, Segment};
