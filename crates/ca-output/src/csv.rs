//! CSV trace backend.
//!
//! One row per agent per snapshot.  A `run` column distinguishes runs when
//! a batch driver reuses the writer.

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::TraceWriter;
use crate::{OutputResult, PositionRow};

/// Writes position snapshots to a single CSV file.
pub struct CsvTraceWriter {
    out:      Writer<File>,
    run:      u64,
    begun:    bool,
    finished: bool,
}

impl CsvTraceWriter {
    /// Create (or truncate) the CSV file at `path` and write the header row.
    pub fn new(path: &Path) -> OutputResult<Self> {
        let mut out = Writer::from_path(path)?;
        out.write_record(["run", "agent_id", "tick", "time_secs", "x", "y"])?;
        Ok(Self {
            out,
            run: 0,
            begun: false,
            finished: false,
        })
    }
}

impl TraceWriter for CsvTraceWriter {
    fn begin_run(&mut self) -> OutputResult<()> {
        if self.begun {
            self.run += 1;
        }
        self.begun = true;
        self.finished = false;
        Ok(())
    }

    fn write_positions(&mut self, rows: &[PositionRow]) -> OutputResult<()> {
        for row in rows {
            self.out.write_record(&[
                self.run.to_string(),
                row.agent_id.to_string(),
                row.tick.to_string(),
                row.time_secs.to_string(),
                row.x.to_string(),
                row.y.to_string(),
            ])?;
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
