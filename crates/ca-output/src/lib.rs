//! `ca-output` — trajectory trace writers for the rust_ca workspace.
//!
//! Two backends are provided:
//!
//! | Backend                      | Shape                                              |
//! |------------------------------|----------------------------------------------------|
//! | [`CsvTraceWriter`]           | One row per agent per snapshot, with a run column  |
//! | [`TextTraceWriter`]          | One line per snapshot: time then all positions     |
//!
//! Both implement [`TraceWriter`] and are driven by [`TraceObserver`],
//! which implements `ca_sim::SimObserver` and records every position
//! snapshot the tick loop emits.
//!
//! # Usage
//!
//! ```rust,ignore
//! use ca_output::{CsvTraceWriter, TraceObserver};
//!
//! let writer = CsvTraceWriter::new(Path::new("trace.csv"))?;
//! let mut obs = TraceObserver::new(writer);
//! sim.run(&mut obs)?;
//! if let Some(e) = obs.take_error() {
//!     eprintln!("trace error: {e}");
//! }
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod text;
pub mod writer;


pub use csv::CsvTraceWriter;
pub use error::{OutputError, OutputResult};
pub use observer::TraceObserver;
pub use row::PositionRow;
pub use text::TextTraceWriter;
pub use writer::TraceWriter;
