//! Plain-text trace backend.
//!
//! One line per snapshot: the global time followed by every agent's
//! `(x, y)` position, in agent order.  Runs are separated by a `---` line,
//! so a batch of runs stays human-diffable.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::writer::TraceWriter;
use crate::{OutputResult, PositionRow};

/// Writes position snapshots as human-readable lines.
pub struct TextTraceWriter<W: Write> {
    out:      W,
    begun:    bool,
    finished: bool,
}

impl TextTraceWriter<BufWriter<File>> {
    /// Create (or truncate) the trace file at `path`.
    pub fn create(path: &Path) -> OutputResult<Self> {
        Ok(Self::from_writer(BufWriter::new(File::create(path)?)))
    }
}

impl<W: Write> TextTraceWriter<W> {
    /// Wrap any `io::Write` sink (stdout, an in-memory buffer, …).
    pub fn from_writer(out: W) -> Self {
        Self {
            out,
            begun: false,
            finished: false,
        }
    }

    /// Unwrap the sink, e.g. to inspect an in-memory buffer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> TraceWriter for TextTraceWriter<W> {
    fn begin_run(&mut self) -> OutputResult<()> {
        if self.begun {
            writeln!(self.out, "---")?;
        }
        self.begun = true;
        self.finished = false;
        Ok(())
    }

    fn write_positions(&mut self, rows: &[PositionRow]) -> OutputResult<()> {
        if let Some(first) = rows.first() {
            write!(self.out, "{:.3}", first.time_secs)?;
            for row in rows {
                write!(self.out, " ({:.3}, {:.3})", row.x, row.y)?;
            }
            writeln!(self.out)?;
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.out.flush()?;
        Ok(())
    }
}
