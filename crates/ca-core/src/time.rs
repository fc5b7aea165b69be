//! Simulation time model.
//!
//! # Design
//!
//! Time is represented as a monotonically increasing `Tick` counter.  The
//! mapping to the engine's floating-point global clock is held in `SimClock`:
//!
//!   global_time_secs = tick * time_step_secs
//!
//! Using an integer tick as the canonical time unit means loop bounds and
//! output cadence checks are exact; the float clock is derived, never
//! accumulated, so it cannot drift across long runs.

use std::fmt;

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute simulation tick counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// Return the tick `n` steps after `self`.
    #[inline]
    pub fn offset(self, n: u64) -> Tick {
        Tick(self.0 + n)
    }
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0 + rhs)
    }
}

impl std::ops::Sub for Tick {
    type Output = u64;
    #[inline]
    fn sub(self, rhs: Tick) -> u64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// Converts between tick counts and the engine's float global time.
///
/// `SimClock` is cheap to copy and intentionally holds no heap data.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimClock {
    /// Simulated seconds per tick.
    pub time_step_secs: f32,
    /// The current tick — advanced by `SimClock::advance()` each iteration.
    pub current_tick: Tick,
}

impl SimClock {
    pub fn new(time_step_secs: f32) -> Self {
        Self { time_step_secs, current_tick: Tick::ZERO }
    }

    /// Advance the clock by one tick.
    #[inline]
    pub fn advance(&mut self) {
        self.current_tick = Tick(self.current_tick.0 + 1);
    }

    /// Global simulated time in seconds, derived (not accumulated) from the
    /// tick counter.
    #[inline]
    pub fn global_time_secs(&self) -> f32 {
        self.current_tick.0 as f32 * self.time_step_secs
    }

    /// Global time at an arbitrary tick — used by observers recording
    /// snapshots for ticks other than the current one.
    #[inline]
    pub fn time_at(&self, tick: Tick) -> f32 {
        tick.0 as f32 * self.time_step_secs
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:.2}s)", self.current_tick, self.global_time_secs())
    }
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Top-level simulation configuration.
///
/// Owned by the driver and passed to `SimBuilder`; the framework crates have
/// no config-file layer — scenario code constructs this directly.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimConfig {
    /// Simulated seconds per tick.  Must be positive.
    pub time_step_secs: f32,

    /// Hard upper bound on ticks per run.  The loop normally ends earlier,
    /// when every agent is within `arrival_threshold` of its goal.
    pub max_ticks: u64,

    /// Master RNG seed.  The same seed always produces identical results.
    pub seed: u64,

    /// Magnitude bound ε of the per-tick preferred-velocity perturbation
    /// that breaks exact symmetry between agents with identical headings.
    /// `0.0` disables the perturbation entirely (deterministic headings —
    /// what the routing tests rely on).
    pub jitter: f32,

    /// An agent counts as arrived when within this distance of its goal.
    /// Compared squared, so the run loop never takes a square root.
    pub arrival_threshold: f32,

    /// Emit a position snapshot to the observer every N ticks.
    /// `0` disables snapshots.
    pub output_interval_ticks: u64,
}

/// Default perturbation bound ε.
pub const DEFAULT_JITTER: f32 = 1e-4;

impl SimConfig {
    /// A config with the given time step and conservative defaults
    /// (`jitter = 1e-4`, `arrival_threshold = 1.0`, snapshots every tick).
    pub fn new(time_step_secs: f32) -> Self {
        Self {
            time_step_secs,
            max_ticks: 100_000,
            seed: 0,
            jitter: DEFAULT_JITTER,
            arrival_threshold: 1.0,
            output_interval_ticks: 1,
        }
    }

    /// The tick at which the run is cut off (exclusive upper bound).
    #[inline]
    pub fn end_tick(&self) -> Tick {
        Tick(self.max_ticks)
    }

    /// Construct a `SimClock` pre-configured for this run.
    pub fn make_clock(&self) -> SimClock {
        SimClock::new(self.time_step_secs)
    }
}
