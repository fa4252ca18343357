//! Core parsing modules
//!
//! - `grid`: the raw table handed over by the extraction step
//! - `time`: `HH:MM` ranges and the patterns that find them in cell text
//! - `schedule`: header classification, cell extraction, accumulation and overlap resolution

pub mod grid;
pub mod schedule;
pub mod time;

pub use grid::{Cell, Grid};
pub use schedule::{
    parse_timetable, parse_timetable_with_diagnostics, Lesson, ParseOptions, Schedule,
};
pub use time::{TimeRange, TimeScan};
