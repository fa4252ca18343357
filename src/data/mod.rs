//! Data layer - Static tables and constants
//!
//! - Weekday names and the per-locale header token tables
//! - Parser defaults and document format constants

pub mod constants;
pub mod weekdays;

// Re-export commonly used items
pub use weekdays::{UnknownWeekday, Weekday, ENGLISH_DAY_TOKENS, GERMAN_DAY_TOKENS};
