//! Saved timetable documents
//!
//! A parsed [`Schedule`] is persisted as a JSON document with a creation
//! timestamp and a schema version. Every lesson can carry resources (web
//! pages and applications) that downstream tools open when it starts.
//!
//! ```json
//! {
//!   "created_at": "2026-09-01 07:30:00",
//!   "version": "1.0",
//!   "timetable": {
//!     "Monday": [
//!       {
//!         "subject": "Math",
//!         "start": "08:00",
//!         "end": "09:45",
//!         "resources": { "websites": [], "applications": [] }
//!       }
//!     ]
//!   }
//! }
//! ```
//!
//! Documents written with German keys (`erstellt_am`, `stundenplan`, `fach`,
//! `ende`, ...) and German day names are read as well.

use std::path::Path;

use chrono::{Local, NaiveDateTime, NaiveTime, SubsecRound};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::schedule::{Lesson, Schedule};
use crate::core::time::{hhmm, TimeRange};
use crate::data::constants::{DOCUMENT_SCHEMA_VERSION, DOCUMENT_TIMESTAMP_FORMAT};
use crate::data::weekdays::Weekday;
use crate::utils::error::{ScheduleError, ScheduleResult};

/// Things to open for a lesson
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resources {
    #[serde(default, alias = "webseiten")]
    pub websites: Vec<String>,
    #[serde(default, alias = "anwendungen")]
    pub applications: Vec<String>,
}

impl Resources {
    pub fn is_empty(&self) -> bool {
        self.websites.is_empty() && self.applications.is_empty()
    }
}

/// A lesson as stored in a document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledLesson {
    #[serde(alias = "fach")]
    pub subject: String,
    #[serde(with = "hhmm")]
    pub start: NaiveTime,
    #[serde(with = "hhmm", alias = "ende")]
    pub end: NaiveTime,
    #[serde(default, alias = "ressourcen")]
    pub resources: Resources,
}

impl From<&Lesson> for ScheduledLesson {
    fn from(lesson: &Lesson) -> Self {
        ScheduledLesson {
            subject: lesson.subject().to_string(),
            start: lesson.start(),
            end: lesson.end(),
            resources: Resources::default(),
        }
    }
}

/// A persisted timetable
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimetableDocument {
    #[serde(with = "timestamp", alias = "erstellt_am")]
    pub created_at: NaiveDateTime,
    pub version: String,
    #[serde(alias = "stundenplan")]
    pub timetable: IndexMap<Weekday, Vec<ScheduledLesson>>,
}

impl TimetableDocument {
    /// Wrap a schedule, stamped with the local time (whole seconds)
    pub fn new(schedule: &Schedule) -> Self {
        Self::from_schedule(schedule, Local::now().naive_local().trunc_subsecs(0))
    }

    /// Wrap a schedule with an explicit creation time
    pub fn from_schedule(schedule: &Schedule, created_at: NaiveDateTime) -> Self {
        TimetableDocument {
            created_at,
            version: DOCUMENT_SCHEMA_VERSION.to_string(),
            timetable: schedule
                .iter()
                .map(|(day, lessons)| (day, lessons.iter().map(ScheduledLesson::from).collect()))
                .collect(),
        }
    }

    /// Distinct subjects in order of first appearance
    pub fn subjects(&self) -> Vec<&str> {
        let mut subjects: Vec<&str> = Vec::new();
        for lesson in self.timetable.values().flatten() {
            if !subjects.contains(&lesson.subject.as_str()) {
                subjects.push(&lesson.subject);
            }
        }
        subjects
    }

    /// Give every lesson of `subject` the same resources. Returns the number of lessons updated.
    pub fn attach_resources(&mut self, subject: &str, resources: Resources) -> usize {
        let mut updated = 0;
        for lesson in self
            .timetable
            .values_mut()
            .flatten()
            .filter(|lesson| lesson.subject == subject)
        {
            lesson.resources = resources.clone();
            updated += 1;
        }
        tracing::debug!(subject, updated, "attached resources");
        updated
    }

    pub fn to_json_pretty(&self) -> ScheduleResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| ScheduleError::document(e.to_string()))
    }

    /// Parse a document. Documents from a different major schema version are rejected.
    pub fn from_json(text: &str) -> ScheduleResult<Self> {
        let document: TimetableDocument =
            serde_json::from_str(text).map_err(|e| ScheduleError::document(e.to_string()))?;
        if major(&document.version) != major(DOCUMENT_SCHEMA_VERSION) {
            return Err(ScheduleError::UnsupportedVersion {
                found: document.version,
                supported: DOCUMENT_SCHEMA_VERSION.to_string(),
            });
        }
        Ok(document)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> ScheduleResult<()> {
        let path = path.as_ref();
        std::fs::write(path, self.to_json_pretty()?)?;
        tracing::info!(path = %path.display(), "saved timetable document");
        Ok(())
    }

    pub fn load(path: impl AsRef<Path>) -> ScheduleResult<Self> {
        Self::from_json(&std::fs::read_to_string(path)?)
    }

    /// The plain schedule, without resources. Lessons with `start >= end` are dropped.
    pub fn to_schedule(&self) -> Schedule {
        Schedule::from_days(self.timetable.iter().map(|(day, lessons)| {
            let lessons = lessons
                .iter()
                .filter_map(|lesson| {
                    TimeRange::new(lesson.start, lesson.end)
                        .map(|range| Lesson::new(lesson.subject.clone(), range))
                })
                .collect();
            (*day, lessons)
        }))
    }
}

fn major(version: &str) -> &str {
    version.split('.').next().unwrap_or(version).trim()
}

/// `created_at` as `%Y-%m-%d %H:%M:%S`
mod timestamp {
    use super::DOCUMENT_TIMESTAMP_FORMAT;
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(time: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&time.format(DOCUMENT_TIMESTAMP_FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
        let text = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&text, DOCUMENT_TIMESTAMP_FORMAT).map_err(serde::de::Error::custom)
    }
}
