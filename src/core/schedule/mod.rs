//! Timetable Grid Parser
//!
//! Turns the table grid of an exported school or university timetable into a
//! weekly schedule of lessons.
//!
//! # Architecture
//!
//! ```text
//! Grid -> Column Classifier -> Cell Extractor (per day cell) -> Resolver -> Schedule
//! ```
//!
//! - The header row decides which columns are weekdays.
//! - Every populated day cell yields at most one candidate lesson. Its
//!   subject and time come from ordered matcher tables.
//! - Each candidate is checked against the lessons already collected for
//!   that day, so the same block printed across several rows is kept once
//!   and the most specific reading of an overlapping subject wins.
//!
//! # Example
//!
//! ```rust
//! use timegrid::{parse_timetable, Grid, Lesson, ParseOptions, Weekday};
//!
//! let grid = Grid::from_text_rows([
//!     vec!["", "Mo.", "Di."],
//!     vec!["", "En", "Math - R1 08:00-09:45"],
//!     vec!["", "R 12", ""],
//!     vec!["", "08:00-09:45", ""],
//! ]);
//! let schedule = parse_timetable(&grid, &ParseOptions::default()).unwrap();
//!
//! assert_eq!(schedule.lessons(Weekday::Monday), [Lesson::parse("En", "08:00", "09:45").unwrap()]);
//! assert_eq!(schedule.lessons(Weekday::Tuesday)[0].subject(), "Math");
//! ```

mod accumulator;
pub mod classifier;
pub mod extractor;
mod model;
pub mod options;
pub mod resolver;


// Re-export public API
pub use accumulator::{parse_timetable, parse_timetable_with_diagnostics};
pub use classifier::{classify_header, DayColumns};
pub use extractor::{extract_cell, extract_cell_lessons, CellContext, CellRejection, TimeSource};
pub use model::{Lesson, Schedule};
pub use options::ParseOptions;
pub use resolver::{resolve, Resolution, Resolver};
