//! Feature modules - Input and output around the parser
//!
//! - Grid ingestion from JSON and CSV table dumps
//! - Saved timetable documents with per-subject resources

#[cfg(feature = "data-loading")]
pub mod document;
#[cfg(feature = "data-loading")]
pub mod ingest;

// Re-export commonly used types
#[cfg(feature = "data-loading")]
pub use document::{Resources, ScheduledLesson, TimetableDocument};
#[cfg(feature = "data-loading")]
pub use ingest::load_grid;
