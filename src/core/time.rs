//! Time-of-day parsing for timetable cells
//!
//! Cells carry times as `HH:MM - HH:MM` (hyphen, en or em dash, optional
//! spaces). Single-digit hours are accepted on input; output is always
//! zero-padded 24-hour `HH:MM`.

use chrono::{Duration, NaiveTime};
use lazy_static::lazy_static;
use regex::{Captures, Regex};
use std::fmt;

use crate::data::constants::TIME_FORMAT;

lazy_static! {
    /// A time range anywhere in the text, not glued to surrounding digits
    static ref RANGE_PATTERN: Regex =
        Regex::new(r"\b(\d{1,2}):(\d{2})\s*[-–—]\s*(\d{1,2}):(\d{2})\b").unwrap();

    /// A text that is nothing but a time range
    static ref EXACT_RANGE_PATTERN: Regex =
        Regex::new(r"^\s*(\d{1,2}):(\d{2})\s*[-–—]\s*(\d{1,2}):(\d{2})\s*$").unwrap();

    /// A single time of day
    static ref SINGLE_TIME_PATTERN: Regex = Regex::new(r"\b(\d{1,2}):(\d{2})\b").unwrap();
}

/// A half-open `[start, end)` interval within one day. `start < end` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "data-loading", derive(serde::Serialize))]
pub struct TimeRange {
    #[cfg_attr(feature = "data-loading", serde(with = "hhmm"))]
    start: NaiveTime,
    #[cfg_attr(feature = "data-loading", serde(with = "hhmm"))]
    end: NaiveTime,
}

impl TimeRange {
    /// Create a range, rejecting empty and inverted intervals
    pub fn new(start: NaiveTime, end: NaiveTime) -> Option<Self> {
        (start < end).then_some(TimeRange { start, end })
    }

    /// Create a range of `minutes` length. Returns `None` when the end would
    /// wrap past midnight.
    pub fn from_start(start: NaiveTime, minutes: u32) -> Option<Self> {
        let (end, wrapped) = start.overflowing_add_signed(Duration::minutes(i64::from(minutes)));
        if wrapped != 0 {
            return None;
        }
        TimeRange::new(start, end)
    }

    pub fn start(&self) -> NaiveTime {
        self.start
    }

    pub fn end(&self) -> NaiveTime {
        self.end
    }

    /// Length in minutes
    pub fn duration_minutes(&self) -> i64 {
        self.end.signed_duration_since(self.start).num_minutes()
    }

    /// Whether two `[start, end)` intervals share at least one instant
    pub fn overlaps(&self, other: &TimeRange) -> bool {
        self.start < other.end && other.start < self.end
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", format_time(self.start), format_time(self.end))
    }
}

/// Outcome of looking for a time range in a piece of text
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimeScan {
    /// A valid range
    Found(TimeRange),
    /// Both times are valid but `start >= end`
    Inverted { start: NaiveTime, end: NaiveTime },
    /// Something time-shaped that is not a real time (e.g. `25:00`)
    Malformed(String),
    /// Nothing time-shaped at all
    Absent,
}

impl TimeScan {
    pub fn found(&self) -> Option<TimeRange> {
        match self {
            TimeScan::Found(range) => Some(*range),
            _ => None,
        }
    }
}

/// Format a time as `HH:MM`
pub fn format_time(time: NaiveTime) -> String {
    time.format(TIME_FORMAT).to_string()
}

/// Parse a strict `H:MM`/`HH:MM` string
pub fn parse_hhmm(text: &str) -> Option<NaiveTime> {
    let caps = SINGLE_TIME_PATTERN.captures(text.trim())?;
    if caps.get(0).map(|m| m.as_str().len()) != Some(text.trim().len()) {
        return None;
    }
    time_from_parts(&caps[1], &caps[2])
}

fn time_from_parts(hour: &str, minute: &str) -> Option<NaiveTime> {
    let h: u32 = hour.parse().ok()?;
    let m: u32 = minute.parse().ok()?;
    NaiveTime::from_hms_opt(h, m, 0)
}

fn scan_captures(caps: &Captures<'_>) -> TimeScan {
    let start = time_from_parts(&caps[1], &caps[2]);
    let end = time_from_parts(&caps[3], &caps[4]);
    match (start, end) {
        (Some(start), Some(end)) => match TimeRange::new(start, end) {
            Some(range) => TimeScan::Found(range),
            None => TimeScan::Inverted { start, end },
        },
        _ => TimeScan::Malformed(caps[0].to_string()),
    }
}

/// Find the first time range anywhere in `text`
pub fn find_range(text: &str) -> TimeScan {
    RANGE_PATTERN
        .captures(text)
        .map(|caps| scan_captures(&caps))
        .unwrap_or(TimeScan::Absent)
}

/// Find every time range in `text`, in order of appearance
pub fn find_all_ranges(text: &str) -> Vec<TimeScan> {
    RANGE_PATTERN
        .captures_iter(text)
        .map(|caps| scan_captures(&caps))
        .collect()
}

/// Match `text` only if it is exclusively a time range
pub fn exact_range(text: &str) -> TimeScan {
    EXACT_RANGE_PATTERN
        .captures(text)
        .map(|caps| scan_captures(&caps))
        .unwrap_or(TimeScan::Absent)
}

/// Whether `text` is nothing but a time range (valid or not)
pub fn is_time_range_only(text: &str) -> bool {
    EXACT_RANGE_PATTERN.is_match(text)
}

/// Find the first single time of day in `text`.
/// `Some(Err(_))` carries the offending text when it is not a real time.
pub fn find_time(text: &str) -> Option<Result<NaiveTime, String>> {
    let caps = SINGLE_TIME_PATTERN.captures(text)?;
    Some(time_from_parts(&caps[1], &caps[2]).ok_or_else(|| caps[0].to_string()))
}

/// Serde adapter writing times as `HH:MM`
#[cfg(feature = "data-loading")]
pub mod hhmm {
    use super::{format_time, parse_hhmm};
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format_time(*time))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let text = String::deserialize(deserializer)?;
        parse_hhmm(&text).ok_or_else(|| {
            serde::de::Error::custom(format!("invalid time '{}', expected HH:MM", text))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn test_find_range_variants() {
        for text in ["08:00-09:45", "08:00 - 09:45", "08:00 – 09:45", "Room 4\n8:00—9:45"] {
            let range = find_range(text).found().expect(text);
            assert_eq!(range.start(), t(8, 0));
            assert_eq!(range.end(), t(9, 45));
        }
        assert_eq!(find_range("Biology"), TimeScan::Absent);
    }

    #[test]
    fn test_times_glued_to_digits_are_ignored() {
        assert_eq!(find_range("Raum 108:00-09:45"), TimeScan::Absent);
        assert_eq!(find_range("08:00-09:455"), TimeScan::Absent);
        let range = find_range("Raum 108 08:00-09:45").found().unwrap();
        assert_eq!(range.start(), t(8, 0));
        assert_eq!(find_time("Tel. 0711:2345"), None);
    }

    #[test]
    fn test_malformed_and_inverted() {
        assert!(matches!(find_range("25:00-26:00"), TimeScan::Malformed(_)));
        assert!(matches!(
            find_range("10:00-09:00"),
            TimeScan::Inverted { .. }
        ));
        assert!(matches!(find_range("10:00-10:00"), TimeScan::Inverted { .. }));
    }

    #[test]
    fn test_exact_range() {
        assert!(exact_range("  12:00-13:00 ").found().is_some());
        assert_eq!(exact_range("12:00-13:00 Gym"), TimeScan::Absent);
        assert!(is_time_range_only("12:00 – 13:00"));
        assert!(!is_time_range_only("En 12:00-13:00"));
    }

    #[test]
    fn test_range_arithmetic() {
        let a = TimeRange::new(t(8, 0), t(9, 45)).unwrap();
        let b = TimeRange::new(t(9, 0), t(10, 0)).unwrap();
        let c = TimeRange::new(t(9, 45), t(11, 0)).unwrap();
        assert_eq!(a.duration_minutes(), 105);
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
        // Touching intervals do not overlap
        assert!(!a.overlaps(&c));
        assert_eq!(a.to_string(), "08:00 - 09:45");
    }

    #[test]
    fn test_from_start() {
        let range = TimeRange::from_start(t(8, 0), 90).unwrap();
        assert_eq!(range.end(), t(9, 30));
        assert!(TimeRange::from_start(t(23, 30), 90).is_none());
        assert!(TimeRange::from_start(t(8, 0), 0).is_none());
    }

    #[test]
    fn test_single_time() {
        assert_eq!(parse_hhmm("7:05"), Some(t(7, 5)));
        assert_eq!(parse_hhmm("07:05 "), Some(t(7, 5)));
        assert_eq!(parse_hhmm("07:05x"), None);
        assert_eq!(parse_hhmm("24:00"), None);
        assert_eq!(find_time("Slot 3 (10:15)"), Some(Ok(t(10, 15))));
        assert_eq!(find_time("99:99"), Some(Err("99:99".to_string())));
        assert_eq!(find_time("none"), None);
    }
}
