//! Cell lesson extraction
//!
//! Turns one populated day-column cell into at most one candidate lesson.
//! Subject and time detection are each an ordered list of matchers; the
//! first matcher that succeeds decides.
//!
//! ```text
//! subject:  dash-delimited ("Biology - room 12") -> short code ("En", "S-a")
//! time:     in-cell range -> time column of the row -> lookahead rows -> default start
//! ```

use chrono::{Duration, NaiveTime};
use lazy_static::lazy_static;
use regex::Regex;

use super::classifier::DayColumns;
use super::model::Lesson;
use super::options::ParseOptions;
use crate::core::grid::{Cell, Grid};
use crate::core::time::{self, TimeRange, TimeScan};
use crate::data::constants::{MIN_SUBJECT_LEN, SUBJECT_TRAILING_PUNCTUATION};

lazy_static! {
    /// Subject followed by a dash, optionally with `(` or `!` in between
    static ref DASH_SUBJECT: Regex = Regex::new(r"^([\p{L}\d&\s]+?)\s*[(!]*\s*[-–]").unwrap();

    /// Abbreviated subject on a line of its own: `En`, `S-a`, `Ph2`, `Bio.`
    static ref SHORT_CODE: Regex = Regex::new(r"^(\p{L}{1,4}\d*(?:-\p{L}{1,4})?)\.?$").unwrap();

    static ref WHITESPACE_RUN: Regex = Regex::new(r"\s+").unwrap();
}

/// A subject detection strategy
pub type SubjectMatcher = fn(&str) -> Option<String>;

/// Subject strategies in priority order
pub const SUBJECT_MATCHERS: &[(&str, SubjectMatcher)] = &[
    ("dash-delimited", dash_delimited_subject),
    ("short code", short_code_subject),
];

/// A time detection strategy
pub type TimeMatcher = fn(&CellContext<'_>) -> Option<TimeHit>;

/// Time strategies in priority order
pub const TIME_MATCHERS: &[(&str, TimeMatcher)] = &[
    ("in-cell range", time_in_cell),
    ("time column", time_from_time_column),
    ("lookahead", time_from_lookahead),
    ("default start", time_from_default_start),
];

/// Where a candidate's time range was found
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeSource {
    /// In the subject cell itself
    InCell,
    /// In the row's shared time-slot column
    TimeColumn { column: usize },
    /// In a time-only cell further down the same column
    Lookahead { row: usize },
    /// Configured default start plus default lesson length
    DefaultStart,
}

/// What a time matcher reported
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeHit {
    pub scan: TimeScan,
    pub source: TimeSource,
}

/// Everything a matcher may look at for one cell
#[derive(Debug, Clone, Copy)]
pub struct CellContext<'a> {
    pub grid: &'a Grid,
    pub cell: Cell<'a>,
    pub day_columns: &'a DayColumns,
    pub options: &'a ParseOptions,
}

/// An accepted candidate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    pub lesson: Lesson,
    pub source: TimeSource,
}

impl Extraction {
    /// The lookahead row whose time this candidate used, if any
    pub fn consumed_row(&self) -> Option<usize> {
        match self.source {
            TimeSource::Lookahead { row } => Some(row),
            _ => None,
        }
    }
}

/// Why a cell produced no candidate
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellRejection {
    /// Too short, or only a time range (usable only as a lookahead target)
    NotCandidateStart,
    /// No subject pattern matched
    NoSubject,
    /// A subject was found but no matcher produced a time
    NoTime { subject: String },
    /// The first time found has `start >= end`
    InvertedTime {
        subject: String,
        start: NaiveTime,
        end: NaiveTime,
    },
}

/// Result of extracting one cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellExtraction {
    pub outcome: Result<Extraction, CellRejection>,
    /// Time-like texts that failed to parse along the way
    pub malformed: Vec<String>,
}

/// Whether a cell may start a lesson on its own
pub fn is_candidate_start(text: &str) -> bool {
    let text = text.trim();
    text.chars().count() >= MIN_SUBJECT_LEN && !time::is_time_range_only(text)
}

/// Extract a candidate lesson from one cell
pub fn extract_cell(ctx: &CellContext<'_>) -> CellExtraction {
    let text = ctx.cell.trimmed();
    let mut malformed = Vec::new();

    if !is_candidate_start(text) {
        return CellExtraction {
            outcome: Err(CellRejection::NotCandidateStart),
            malformed,
        };
    }

    let Some(subject) = detect_subject(text) else {
        return CellExtraction {
            outcome: Err(CellRejection::NoSubject),
            malformed,
        };
    };

    for (name, matcher) in TIME_MATCHERS {
        let Some(hit) = matcher(ctx) else {
            continue;
        };
        match hit.scan {
            TimeScan::Found(range) => {
                tracing::trace!(matcher = name, %subject, %range, "time found");
                return CellExtraction {
                    outcome: Ok(Extraction {
                        lesson: Lesson::new(subject, range),
                        source: hit.source,
                    }),
                    malformed,
                };
            }
            TimeScan::Inverted { start, end } => {
                return CellExtraction {
                    outcome: Err(CellRejection::InvertedTime {
                        subject,
                        start,
                        end,
                    }),
                    malformed,
                };
            }
            TimeScan::Malformed(bad) => {
                tracing::warn!(
                    matcher = name,
                    row = ctx.cell.row,
                    column = ctx.cell.column,
                    text = %bad,
                    "malformed time skipped"
                );
                malformed.push(bad);
            }
            TimeScan::Absent => {}
        }
    }

    CellExtraction {
        outcome: Err(CellRejection::NoTime { subject }),
        malformed,
    }
}

/// Run the subject matchers in order; the first valid subject wins
pub fn detect_subject(text: &str) -> Option<String> {
    SUBJECT_MATCHERS
        .iter()
        .filter_map(|(_, matcher)| matcher(text))
        .find(|subject| is_valid_subject(subject))
}

/// `"Biology - room 12"` → `"Biology"`
pub fn dash_delimited_subject(text: &str) -> Option<String> {
    let caps = DASH_SUBJECT.captures(text)?;
    Some(normalize_subject(&caps[1]))
}

/// `"En"`, `"S-a"`, `"Bio."` on the first line
pub fn short_code_subject(text: &str) -> Option<String> {
    let first_line = text.lines().next()?.trim();
    let caps = SHORT_CODE.captures(first_line)?;
    Some(normalize_subject(&caps[1]))
}

/// Collapse inner whitespace and strip trailing punctuation
pub fn normalize_subject(raw: &str) -> String {
    let collapsed = WHITESPACE_RUN.replace_all(raw.trim(), " ");
    collapsed
        .trim_end_matches(SUBJECT_TRAILING_PUNCTUATION)
        .trim()
        .to_string()
}

/// At least two characters and not purely numeric
pub fn is_valid_subject(subject: &str) -> bool {
    subject.chars().count() >= MIN_SUBJECT_LEN
        && !subject
            .chars()
            .all(|c| c.is_ascii_digit() || c.is_whitespace())
}

fn time_in_cell(ctx: &CellContext<'_>) -> Option<TimeHit> {
    Some(TimeHit {
        scan: time::find_range(ctx.cell.text),
        source: TimeSource::InCell,
    })
}

fn time_from_time_column(ctx: &CellContext<'_>) -> Option<TimeHit> {
    let column = ctx.options.time_column?;
    if column == ctx.cell.column || ctx.day_columns.contains_key(&column) {
        return None;
    }
    let sibling = ctx.grid.cell(ctx.cell.row, column)?;

    let scan = match time::find_range(sibling.text) {
        TimeScan::Absent => match time::find_time(sibling.text)? {
            Ok(start) => range_from_start(start, ctx.options.default_lesson_minutes),
            Err(bad) => TimeScan::Malformed(bad),
        },
        scan => scan,
    };
    Some(TimeHit {
        scan,
        source: TimeSource::TimeColumn { column },
    })
}

fn time_from_lookahead(ctx: &CellContext<'_>) -> Option<TimeHit> {
    let first = ctx.cell.row.saturating_add(1);
    let last = ctx
        .cell
        .row
        .saturating_add(ctx.options.lookahead_rows)
        .min(ctx.grid.height().saturating_sub(1));

    // A malformed slot below is reported only if no valid one follows in the window
    let mut malformed = None;
    for row in first..=last {
        let Some(below) = ctx.grid.cell(row, ctx.cell.column) else {
            continue;
        };
        if !time::is_time_range_only(below.text) {
            continue;
        }
        let hit = TimeHit {
            scan: time::exact_range(below.text),
            source: TimeSource::Lookahead { row },
        };
        if !matches!(hit.scan, TimeScan::Malformed(_)) {
            return Some(hit);
        }
        malformed.get_or_insert(hit);
    }
    malformed
}

fn time_from_default_start(ctx: &CellContext<'_>) -> Option<TimeHit> {
    let start = ctx.options.default_start?;
    Some(TimeHit {
        scan: range_from_start(start, ctx.options.default_lesson_minutes),
        source: TimeSource::DefaultStart,
    })
}

/// `start + minutes`, reported as inverted when it wraps past midnight
fn range_from_start(start: NaiveTime, minutes: u32) -> TimeScan {
    match TimeRange::from_start(start, minutes) {
        Some(range) => TimeScan::Found(range),
        None => TimeScan::Inverted {
            start,
            end: start.overflowing_add_signed(Duration::minutes(i64::from(minutes))).0,
        },
    }
}

/// Split a cell listing several subjects into one lesson per attached time range.
///
/// A line with a dash-delimited subject opens a new subject; a line that is
/// only a time range attaches to the current subject. Earlier subjects with
/// no range are dropped; the last one falls back to `default_start`.
pub fn extract_cell_lessons(
    text: &str,
    default_start: Option<NaiveTime>,
    default_minutes: u32,
) -> Vec<Lesson> {
    let mut lessons = Vec::new();
    let mut current: Option<(String, Vec<TimeRange>)> = None;

    for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
        if time::is_time_range_only(line) {
            if let (Some((_, ranges)), Some(range)) =
                (current.as_mut(), time::exact_range(line).found())
            {
                ranges.push(range);
            }
            continue;
        }

        let Some(subject) = dash_delimited_subject(line).filter(|s| is_valid_subject(s)) else {
            continue;
        };
        if let Some((prev, ranges)) = current.take() {
            lessons.extend(ranges.into_iter().map(|r| Lesson::new(prev.clone(), r)));
        }
        let ranges = time::find_range(line).found().into_iter().collect();
        current = Some((subject, ranges));
    }

    if let Some((subject, ranges)) = current {
        if ranges.is_empty() {
            if let Some(range) = default_start.and_then(|s| TimeRange::from_start(s, default_minutes)) {
                lessons.push(Lesson::new(subject, range));
            }
        } else {
            lessons.extend(ranges.into_iter().map(|r| Lesson::new(subject.clone(), r)));
        }
    }

    lessons
}
