//! `ca-core` — foundational types for the `rust_ca` crowd-routing workspace.
//!
//! This crate is a dependency of every other `ca-*` crate.  It intentionally
//! has no `ca-*` dependencies and minimal external ones (only `rand`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module   | Contents                                      |
//! |----------|-----------------------------------------------|
//! | [`vec2`] | `Vec2` single-precision 2-D vector            |
//! | [`ids`]  | `AgentId`, `VertexId`, `GoalId`               |
//! | [`time`] | `Tick`, `SimClock`, `SimConfig`               |
//! | [`rng`]  | `AgentRng`/`AgentRngs` (per-agent), `SimRng`  |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                              |
//! |---------|-----------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types. |

pub mod ids;
pub mod rng;
pub mod time;
pub mod vec2;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use ids::{AgentId, GoalId, VertexId};
pub use rng::{AgentRng, AgentRngs, SimRng};
pub use time::{SimClock, SimConfig, Tick};
pub use vec2::Vec2;
