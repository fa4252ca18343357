//! Constants for timetable parsing
//!
//! Numeric defaults used by `ParseOptions` and the document schema.

/// Lesson length assumed when only a start time is known
pub const DEFAULT_LESSON_MINUTES: u32 = 90;

/// How many rows below a subject cell are searched for its time range
pub const DEFAULT_LOOKAHEAD_ROWS: usize = 3;

/// Column holding one shared time slot per row in compact exports
pub const DEFAULT_TIME_COLUMN: usize = 0;

/// Minimum subject length after trailing punctuation is removed
pub const MIN_SUBJECT_LEN: usize = 2;

/// Trailing characters stripped from extracted subjects
pub const SUBJECT_TRAILING_PUNCTUATION: &[char] = &['.', ',', ':', ';', '!', '?', '-', '–'];

/// Schema version written into timetable documents
pub const DOCUMENT_SCHEMA_VERSION: &str = "1.0";

/// Timestamp format of `created_at` in timetable documents
pub const DOCUMENT_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Wall-clock format used for lesson times everywhere
pub const TIME_FORMAT: &str = "%H:%M";
