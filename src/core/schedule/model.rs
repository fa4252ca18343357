//! Lesson and schedule types

use chrono::NaiveTime;
use indexmap::IndexMap;
use std::fmt;

use crate::core::time::{parse_hhmm, TimeRange};
use crate::data::weekdays::Weekday;

/// One lesson: a subject with a `[start, end)` time slot
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "data-loading", derive(serde::Serialize))]
pub struct Lesson {
    subject: String,
    #[cfg_attr(feature = "data-loading", serde(flatten))]
    range: TimeRange,
}

impl Lesson {
    /// Create a lesson from an already validated range
    pub fn new(subject: impl Into<String>, range: TimeRange) -> Self {
        Lesson {
            subject: subject.into(),
            range,
        }
    }

    /// Build a lesson from `HH:MM` strings. Returns `None` for invalid times
    /// or when `start >= end`.
    pub fn parse(subject: impl Into<String>, start: &str, end: &str) -> Option<Self> {
        let range = TimeRange::new(parse_hhmm(start)?, parse_hhmm(end)?)?;
        Some(Lesson::new(subject, range))
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn start(&self) -> NaiveTime {
        self.range.start()
    }

    pub fn end(&self) -> NaiveTime {
        self.range.end()
    }

    pub fn range(&self) -> TimeRange {
        self.range
    }

    /// Lesson length in minutes
    pub fn duration_minutes(&self) -> i64 {
        self.range().duration_minutes()
    }

    /// Whether the two lessons' time slots overlap (subjects are not compared)
    pub fn overlaps(&self, other: &Lesson) -> bool {
        self.range().overlaps(&other.range())
    }
}

impl fmt::Display for Lesson {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.range, self.subject)
    }
}

/// A weekly schedule: Monday through Friday, each with its lessons in source-row order
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "data-loading", derive(serde::Serialize))]
#[cfg_attr(feature = "data-loading", serde(transparent))]
pub struct Schedule {
    days: IndexMap<Weekday, Vec<Lesson>>,
}

impl Default for Schedule {
    fn default() -> Self {
        Schedule {
            days: Weekday::SCHOOL_DAYS
                .iter()
                .map(|day| (*day, Vec::new()))
                .collect(),
        }
    }
}

impl Schedule {
    /// Create an empty schedule with all five school days present
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a schedule from per-day lesson lists. Days outside Monday..Friday are dropped.
    pub(crate) fn from_days(days: impl IntoIterator<Item = (Weekday, Vec<Lesson>)>) -> Self {
        let mut schedule = Schedule::new();
        for (day, lessons) in days {
            if let Some(slot) = schedule.days.get_mut(&day) {
                *slot = lessons;
            }
        }
        schedule
    }

    /// Lessons of one day. Weekend days are always empty.
    pub fn lessons(&self, day: Weekday) -> &[Lesson] {
        self.days.get(&day).map(Vec::as_slice).unwrap_or(&[])
    }

    pub(crate) fn day_mut(&mut self, day: Weekday) -> &mut Vec<Lesson> {
        self.days.entry(day).or_default()
    }

    /// Iterate days in weekday order
    pub fn iter(&self) -> impl Iterator<Item = (Weekday, &[Lesson])> {
        self.days.iter().map(|(day, lessons)| (*day, lessons.as_slice()))
    }

    /// Number of lessons across all days
    pub fn total_lessons(&self) -> usize {
        self.days.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total_lessons() == 0
    }

    /// Consume the schedule into its per-day lists
    pub fn into_days(self) -> IndexMap<Weekday, Vec<Lesson>> {
        self.days
    }
}

impl fmt::Display for Schedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (day, lessons)) in self.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            writeln!(f, "{}:", day)?;
            if lessons.is_empty() {
                writeln!(f, "  (no lessons)")?;
            }
            for lesson in lessons {
                writeln!(f, "  {}", lesson)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lesson_parse() {
        let lesson = Lesson::parse("Math", "08:00", "09:45").unwrap();
        assert_eq!(lesson.subject(), "Math");
        assert_eq!(lesson.duration_minutes(), 105);
        assert_eq!(lesson.to_string(), "08:00 - 09:45: Math");

        assert!(Lesson::parse("Math", "09:45", "08:00").is_none());
        assert!(Lesson::parse("Math", "08:00", "08:00").is_none());
        assert!(Lesson::parse("Math", "8h", "09:00").is_none());
    }

    #[test]
    fn test_schedule_has_five_days() {
        let schedule = Schedule::new();
        let days: Vec<Weekday> = schedule.iter().map(|(day, _)| day).collect();
        assert_eq!(days, Weekday::SCHOOL_DAYS.to_vec());
        assert!(schedule.is_empty());
        assert!(schedule.lessons(Weekday::Saturday).is_empty());
    }

    #[test]
    fn test_schedule_display() {
        let schedule = Schedule::from_days([(
            Weekday::Monday,
            vec![Lesson::parse("Math", "08:00", "09:45").unwrap()],
        )]);
        let text = schedule.to_string();
        assert!(text.starts_with("Monday:\n  08:00 - 09:45: Math\n"));
        assert!(text.contains("Tuesday:\n  (no lessons)"));
        assert_eq!(schedule.total_lessons(), 1);
    }
}
