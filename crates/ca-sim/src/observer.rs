//! Simulation observer trait for progress reporting and trace collection.

use ca_core::{Tick, Vec2};

use crate::sim::RunOutcome;

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] at key points in the
/// tick loop.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example — progress printer
///
/// ```rust,ignore
/// struct ProgressPrinter { interval: u64 }
///
/// impl SimObserver for ProgressPrinter {
///     fn on_tick_start(&mut self, tick: Tick) {
///         if tick.0 % self.interval == 0 {
///             println!("{tick}");
///         }
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each tick, before any processing.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called at snapshot intervals (every `config.output_interval_ticks`
    /// ticks) with the pre-step positions of all agents and the engine's
    /// global time — the data a trace writer records.
    fn on_snapshot(&mut self, _tick: Tick, _time_secs: f32, _positions: &[Vec2]) {}

    /// Called at the end of each tick, after the engine has stepped.
    fn on_tick_end(&mut self, _tick: Tick) {}

    /// Called once when the run stops, whether converged or cut off.
    fn on_run_end(&mut self, _final_tick: Tick, _outcome: &RunOutcome) {}
}

/// A [`SimObserver`] that does nothing.  Use when you need to call `run`
/// but don't want progress callbacks.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
