//! # timegrid
//!
//! Timetable grid parser: turns the table of an exported school or
//! university timetable into a weekly schedule of lessons.
//!
//! ## Features
//!
//! - **Header classification**: day columns are found by locale tokens (`Mo.`, `Di.`, ...)
//! - **Layered extraction**: subjects and times are read from the cell, the row's
//!   time column, the rows below, or a configured default
//! - **Overlap resolution**: repeated blocks are kept once, the most specific reading wins
//! - **Diagnostics**: everything that was dropped is reported, nothing fails per cell
//! - **Documents**: schedules are saved as JSON with per-subject resources
//!
//! ## Usage Examples
//!
//! ```rust
//! use timegrid::{parse_timetable, Grid, ParseOptions, Weekday};
//!
//! let grid = Grid::from_text_rows([
//!     vec!["Zeit", "Mo.", "Di.", "Notes"],
//!     vec!["08:00-09:30", "Mathe - R1", "Bio - Labor", ""],
//!     vec!["10:00", "Deutsch - R2", "", "bring books"],
//! ]);
//!
//! let schedule = parse_timetable(&grid, &ParseOptions::german()).unwrap();
//! assert_eq!(schedule.lessons(Weekday::Monday).len(), 2);
//! assert_eq!(schedule.lessons(Weekday::Tuesday)[0].to_string(), "08:00 - 09:30: Bio");
//! ```

/// Core parsing modules
pub mod core;

/// Data layer - static tables and constants
pub mod data;

/// Feature modules - ingestion and documents
pub mod features;

/// Utility modules
pub mod utils;

// Re-export core parsing functions
pub use crate::core::grid::{Cell, Grid};
pub use crate::core::schedule::{
    parse_timetable, parse_timetable_with_diagnostics, Lesson, ParseOptions, Schedule,
};
pub use crate::core::time::TimeRange;

// Re-export data modules
pub use data::constants;
pub use data::weekdays::Weekday;

// Re-export feature modules
#[cfg(feature = "data-loading")]
pub use features::document::{Resources, ScheduledLesson, TimetableDocument};
#[cfg(feature = "data-loading")]
pub use features::ingest;

// Re-export utilities
pub use utils::diagnostics;
pub use utils::error::{ParseOutput, ScheduleError, ScheduleResult};

/// Parse a timetable with the default (German) options
pub fn parse_timetable_default(grid: &Grid) -> ScheduleResult<Schedule> {
    parse_timetable(grid, &ParseOptions::default())
}

/// Parse with `default_start` as the last-resort start time for subjects
/// that have no time anywhere in the table
pub fn parse_timetable_with_default_start(
    grid: &Grid,
    default_start: chrono::NaiveTime,
) -> ScheduleResult<Schedule> {
    parse_timetable(grid, &ParseOptions::default().with_default_start(default_start))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_timetable_default() {
        let grid = Grid::from_text_rows([vec!["", "Do."], vec!["", "Sport - Halle 13:00-14:30"]]);
        let schedule = parse_timetable_default(&grid).unwrap();
        assert_eq!(schedule.lessons(Weekday::Thursday)[0].subject(), "Sport");
    }

    #[test]
    fn test_parse_with_default_start() {
        let grid = Grid::from_text_rows([vec!["", "Do."], vec!["", "Sport - Halle"]]);
        let start = chrono::NaiveTime::from_hms_opt(9, 0, 0).unwrap();
        let schedule = parse_timetable_with_default_start(&grid, start).unwrap();
        assert_eq!(
            schedule.lessons(Weekday::Thursday)[0].to_string(),
            "09:00 - 10:30: Sport"
        );
    }
}
