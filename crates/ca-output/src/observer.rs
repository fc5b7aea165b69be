//! `TraceObserver<W>` — bridges `SimObserver` to a `TraceWriter`.

use ca_core::{Tick, Vec2};
use ca_sim::{RunOutcome, SimObserver};

use crate::row::PositionRow;
use crate::writer::TraceWriter;
use crate::OutputError;

/// A [`SimObserver`] that records every position snapshot into any
/// [`TraceWriter`] backend.
///
/// Writer errors are stored internally because `SimObserver` methods have
/// no return value.  After `sim.run()` returns, check for the first error
/// with [`take_error`][Self::take_error].
///
/// Constructing the observer marks the start of a run on the writer, so a
/// batch driver can move one writer through a sequence of observers.
pub struct TraceObserver<W: TraceWriter> {
    writer:     W,
    last_error: Option<OutputError>,
}

impl<W: TraceWriter> TraceObserver<W> {
    pub fn new(mut writer: W) -> Self {
        let begin = writer.begin_run();
        let mut obs = Self { writer, last_error: None };
        obs.store_err(begin);
        obs
    }

    /// Take the stored write error (if any) after `sim.run()` returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer, e.g. to hand it to the next run in a batch.
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: crate::OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: TraceWriter> SimObserver for TraceObserver<W> {
    fn on_snapshot(&mut self, tick: Tick, time_secs: f32, positions: &[Vec2]) {
        let rows: Vec<PositionRow> = positions
            .iter()
            .enumerate()
            .map(|(i, p)| PositionRow {
                agent_id: i as u32,
                tick: tick.0,
                time_secs,
                x: p.x,
                y: p.y,
            })
            .collect();

        if !rows.is_empty() {
            let result = self.writer.write_positions(&rows);
            self.store_err(result);
        }
    }

    fn on_run_end(&mut self, _final_tick: Tick, _outcome: &RunOutcome) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
