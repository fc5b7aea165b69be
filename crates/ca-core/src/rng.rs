//! Deterministic per-agent and scenario-level RNG wrappers.
//!
//! # Determinism strategy
//!
//! Each agent gets its own independent `SmallRng` seeded by:
//!
//!   seed = global_seed XOR (agent_id * MIXING_CONSTANT)
//!
//! The mixing constant is the 64-bit fractional part of the golden ratio,
//! which spreads consecutive agent IDs uniformly across the seed space.
//! This means:
//!
//! - Agents never share RNG state (no contention, no ordering dependency).
//! - A run's perturbation sequence is a pure function of the seed, so two
//!   runs with the same seed produce bit-identical trajectories — and a
//!   `jitter` bound of zero removes the perturbation without touching the
//!   RNG plumbing.
//! - All RNG calls are local to the owning thread; no synchronisation needed.

use std::f32::consts::TAU;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::{AgentId, Vec2};

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

// ── AgentRng ──────────────────────────────────────────────────────────────────

/// Per-agent deterministic RNG.
///
/// Created in bulk by [`AgentRngs`] at simulation init.  The type is `!Sync`
/// to prevent accidental sharing across threads — each Rayon worker must
/// hold its own exclusive reference.
pub struct AgentRng(SmallRng);

impl AgentRng {
    /// Seed deterministically from the run's global seed and an agent ID.
    pub fn new(global_seed: u64, agent: AgentId) -> Self {
        let seed = global_seed ^ (agent.0 as u64).wrapping_mul(MIXING_CONSTANT);
        AgentRng(SmallRng::seed_from_u64(seed))
    }

    /// The symmetry-breaking perturbation: a vector with uniform random
    /// angle in `[0, 2π)` and uniform magnitude in `[0, epsilon)`.
    ///
    /// Returns `Vec2::ZERO` when `epsilon <= 0` — but still consumes the
    /// same two samples, so toggling the perturbation on or off does not
    /// shift the RNG stream of later ticks.
    pub fn jitter_vec(&mut self, epsilon: f32) -> Vec2 {
        let angle: f32 = self.0.gen_range(0.0..TAU);
        let unit: f32 = self.0.r#gen();
        if epsilon > 0.0 {
            Vec2::from_angle(angle) * (unit * epsilon)
        } else {
            Vec2::ZERO
        }
    }

    /// Generate a value uniformly in `range`.
    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }
}

// ── AgentRngs ─────────────────────────────────────────────────────────────────

/// Per-agent RNG state, kept apart from the rest of the simulation state so
/// the tick loop can hold `&mut AgentRngs` and a shared borrow of everything
/// else at the same time (the split-borrow pattern the parallel steering
/// phase relies on).
pub struct AgentRngs {
    pub inner: Vec<AgentRng>,
}

impl AgentRngs {
    /// Allocate and seed `count` per-agent RNGs from `global_seed`.
    pub fn new(count: usize, global_seed: u64) -> Self {
        let inner = (0..count as u32)
            .map(|i| AgentRng::new(global_seed, AgentId(i)))
            .collect();
        Self { inner }
    }

    /// Mutable reference to one agent's RNG.
    #[inline]
    pub fn get_mut(&mut self, agent: AgentId) -> &mut AgentRng {
        &mut self.inner[agent.index()]
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

// ── SimRng ────────────────────────────────────────────────────────────────────

/// Scenario-level RNG for setup-time randomness (start-position offsets,
/// randomized scenario geometry, etc.).
///
/// Used only in single-threaded contexts.  Per-tick randomness belongs to
/// [`AgentRng`], never to this type.
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    /// A point uniformly distributed in the square `[-half, half]²`.
    /// Scenario drivers use this for randomized start and goal placement.
    pub fn square_offset(&mut self, half: f32) -> Vec2 {
        Vec2::new(self.gen_range(-half..=half), self.gen_range(-half..=half))
    }
}
