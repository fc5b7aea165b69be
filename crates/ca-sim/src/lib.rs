//! `ca-sim` — tick loop orchestrator for the rust_ca workspace.
//!
//! # Tick loop
//!
//! ```text
//! loop:
//!   ① Snapshot  — copy all agent positions (and radii) out of the engine.
//!   ② Steering  — preferred velocity per agent from the *same* snapshot
//!                 (parallel with the `parallel` feature), plus the
//!                 per-agent symmetry-breaking jitter.
//!   ③ Apply     — write velocities into the engine, engine.step().
//!   ④ Arrival   — stop when every agent is within arrival_threshold of
//!                 its goal (squared comparison), or at max_ticks.
//! ```
//!
//! The snapshot in ① is what makes ② safe to parallelize and the outcome
//! independent of agent iteration order: no agent's decision can observe
//! another agent's same-tick update.
//!
//! # Cargo features
//!
//! | Feature    | Effect                                            |
//! |------------|---------------------------------------------------|
//! | `parallel` | Runs the steering phase on Rayon's thread pool.   |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use ca_engine::KinematicEngine;
//! use ca_roadmap::{RoadmapBuilder, RoadmapSteering};
//! use ca_sim::{NoopObserver, SimBuilder};
//!
//! let roadmap = builder.build(&engine, clearance)?;
//! let steering = RoadmapSteering::new(roadmap, goals)?;
//! let mut sim = SimBuilder::new(config, engine, steering).build()?;
//! let outcome = sim.run(&mut NoopObserver)?;
//! ```

pub mod builder;
pub mod error;
pub mod observer;
pub mod sim;

#[cfg(test)]
mod tests;

pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver};
pub use sim::{RunOutcome, Sim};
