//! `ca-roadmap` — visibility roadmap and goal-directed steering.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                  |
//! |----------------|-----------------------------------------------------------|
//! | [`visibility`] | `VisibilityOracle` trait, `OpenField`                     |
//! | [`roadmap`]    | `Waypoint`, `Roadmap`, `RoadmapBuilder`                   |
//! | [`steering`]   | `Steering` trait, `RoadmapSteering`, `DirectSteering`     |
//! | [`error`]      | `RoadmapError`, `RoadmapResult<T>`                        |
//!
//! # Lifecycle
//!
//! The roadmap is built exactly once, after the scenario has registered its
//! obstacles with whatever supplies the [`VisibilityOracle`], and is
//! read-only for the rest of the run.  Steering consumes the built roadmap
//! every tick; the type flow makes it impossible to route against a roadmap
//! whose distance tables were never computed.
//!
//! # Feature flags
//!
//! | Flag       | Effect                                                     |
//! |------------|------------------------------------------------------------|
//! | `parallel` | Rayon-parallel visibility scan and per-goal Dijkstra runs. |
//! | `serde`    | Derives `Serialize`/`Deserialize` on public types.         |

pub mod error;
pub mod roadmap;
pub mod steering;
pub mod visibility;


pub use error::{RoadmapError, RoadmapResult};
pub use roadmap::{Roadmap, RoadmapBuilder, Waypoint};
pub use steering::{DirectSteering, RoadmapSteering, Steering};
pub use visibility::{OpenField, VisibilityOracle};
