//! Deduplication and overlap resolution for one weekday's lesson list
//!
//! The same lesson block often spans several physical table rows, and a
//! failed lookahead can attach a too-long time range to a subject. When two
//! readings of the same subject overlap, the shorter one is kept.

use chrono::NaiveTime;
use fxhash::FxHashSet;

use super::model::Lesson;
use crate::data::weekdays::Weekday;

/// Decision for one candidate against a day's current list
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// No conflicting entry: append
    Accept,
    /// Strictly shorter than every overlapping same-subject entry: evict those, then append
    Replace { evicted: Vec<usize> },
    /// Same subject, start and end as an accepted lesson
    RejectDuplicate,
    /// Overlaps a same-subject entry that is as short or shorter
    RejectSubsumed { by: usize },
}

impl Resolution {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Resolution::Accept | Resolution::Replace { .. })
    }
}

/// Decide what to do with `candidate` without touching `existing`
pub fn resolve(existing: &[Lesson], candidate: &Lesson) -> Resolution {
    let same_subject = || {
        existing
            .iter()
            .enumerate()
            .filter(|(_, lesson)| lesson.subject() == candidate.subject())
    };

    if same_subject().any(|(_, lesson)| lesson.range() == candidate.range()) {
        return Resolution::RejectDuplicate;
    }

    let overlapping: Vec<(usize, &Lesson)> = same_subject()
        .filter(|(_, lesson)| lesson.overlaps(candidate))
        .collect();

    if overlapping.is_empty() {
        return Resolution::Accept;
    }

    let duration = candidate.duration_minutes();
    match overlapping
        .iter()
        .find(|(_, lesson)| duration >= lesson.duration_minutes())
    {
        Some((idx, _)) => Resolution::RejectSubsumed { by: *idx },
        None => Resolution::Replace {
            evicted: overlapping.iter().map(|(idx, _)| *idx).collect(),
        },
    }
}

/// Apply a decision computed by [`resolve`]. Returns the evicted lessons.
pub fn apply(lessons: &mut Vec<Lesson>, candidate: Lesson, resolution: &Resolution) -> Vec<Lesson> {
    match resolution {
        Resolution::Accept => {
            lessons.push(candidate);
            Vec::new()
        }
        Resolution::Replace { evicted } => {
            let mut indices = evicted.clone();
            indices.sort_unstable_by(|a, b| b.cmp(a));
            let mut removed: Vec<Lesson> = indices.into_iter().map(|idx| lessons.remove(idx)).collect();
            removed.reverse();
            lessons.push(candidate);
            removed
        }
        Resolution::RejectDuplicate | Resolution::RejectSubsumed { .. } => Vec::new(),
    }
}

type SeenKey = (Weekday, String, NaiveTime, NaiveTime);

/// Per-parse resolver state: the seen-set of every accepted candidate.
///
/// Evicted readings stay in the set, so a less specific reading repeated on a
/// later row is reported as a duplicate of what replaced it. Once nothing of
/// the same subject overlaps it any more, it is resolved like a new candidate.
#[derive(Debug, Default)]
pub struct Resolver {
    seen: FxHashSet<SeenKey>,
}

impl Resolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve `candidate` against `lessons` (the list for `day`) and apply the result
    pub fn insert(&mut self, day: Weekday, lessons: &mut Vec<Lesson>, candidate: Lesson) -> Outcome {
        let key = (
            day,
            candidate.subject().to_string(),
            candidate.start(),
            candidate.end(),
        );
        // A reading seen before is only a repeat while it still conflicts with the list
        let conflicts = || {
            lessons
                .iter()
                .any(|lesson| lesson.subject() == candidate.subject() && lesson.overlaps(&candidate))
        };
        if self.seen.contains(&key) && conflicts() {
            return Outcome {
                resolution: Resolution::RejectDuplicate,
                evicted: Vec::new(),
            };
        }

        let resolution = resolve(lessons, &candidate);
        if resolution.is_accepted() {
            self.seen.insert(key);
        }
        let evicted = apply(lessons, candidate, &resolution);
        Outcome {
            resolution,
            evicted,
        }
    }
}

/// What [`Resolver::insert`] did
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub resolution: Resolution,
    pub evicted: Vec<Lesson>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn lesson(subject: &str, start: &str, end: &str) -> Lesson {
        Lesson::parse(subject, start, end).unwrap()
    }

    #[test]
    fn test_shorter_overlapping_candidate_replaces() {
        let mut lessons = vec![lesson("Math", "08:00", "09:45")];
        let candidate = lesson("Math", "08:00", "09:00");

        let resolution = resolve(&lessons, &candidate);
        assert_eq!(resolution, Resolution::Replace { evicted: vec![0] });

        let evicted = apply(&mut lessons, candidate.clone(), &resolution);
        assert_eq!(lessons, vec![candidate]);
        assert_eq!(evicted, vec![lesson("Math", "08:00", "09:45")]);
    }

    #[test]
    fn test_exact_duplicate_rejected() {
        let lessons = vec![lesson("Math", "08:00", "09:45")];
        assert_eq!(
            resolve(&lessons, &lesson("Math", "08:00", "09:45")),
            Resolution::RejectDuplicate
        );
    }

    #[test]
    fn test_equal_or_longer_overlap_rejected() {
        let lessons = vec![lesson("Math", "08:00", "09:00")];
        assert_eq!(
            resolve(&lessons, &lesson("Math", "08:30", "09:30")),
            Resolution::RejectSubsumed { by: 0 }
        );
        assert_eq!(
            resolve(&lessons, &lesson("Math", "07:30", "09:30")),
            Resolution::RejectSubsumed { by: 0 }
        );
    }

    #[test]
    fn test_other_subjects_and_disjoint_slots_accepted() {
        let lessons = vec![lesson("Math", "08:00", "09:45")];
        assert_eq!(resolve(&lessons, &lesson("Bio", "08:00", "09:45")), Resolution::Accept);
        assert_eq!(resolve(&lessons, &lesson("Math", "09:45", "11:00")), Resolution::Accept);
        assert_eq!(resolve(&[], &lesson("Math", "08:00", "09:45")), Resolution::Accept);
    }

    #[test]
    fn test_replacement_must_beat_every_overlap() {
        let mut lessons = vec![
            lesson("Math", "08:00", "09:00"),
            lesson("Bio", "08:00", "12:00"),
            lesson("Math", "09:30", "12:00"),
        ];

        // Overlaps both Math entries but is not shorter than the first
        let too_long = lesson("Math", "08:30", "10:00");
        assert_eq!(resolve(&lessons, &too_long), Resolution::RejectSubsumed { by: 0 });

        // Shorter than both Math entries it touches
        let precise = lesson("Math", "08:50", "09:40");
        let resolution = resolve(&lessons, &precise);
        assert_eq!(resolution, Resolution::Replace { evicted: vec![0, 2] });

        let evicted = apply(&mut lessons, precise.clone(), &resolution);
        assert_eq!(evicted.len(), 2);
        assert_eq!(lessons, vec![lesson("Bio", "08:00", "12:00"), precise]);
    }

    #[test]
    fn test_resolver_seen_set_remembers_evicted_entries() {
        let mut resolver = Resolver::new();
        let mut lessons = Vec::new();

        let long = lesson("Math", "08:00", "09:45");
        let short = lesson("Math", "08:00", "09:00");

        assert!(resolver
            .insert(Weekday::Monday, &mut lessons, long.clone())
            .resolution
            .is_accepted());
        let outcome = resolver.insert(Weekday::Monday, &mut lessons, short.clone());
        assert_eq!(outcome.evicted, vec![long.clone()]);

        let again = resolver.insert(Weekday::Monday, &mut lessons, long.clone());
        assert_eq!(again.resolution, Resolution::RejectDuplicate);
        assert_eq!(lessons, vec![short]);

        // Same lesson on another day is independent
        let mut tuesday = Vec::new();
        assert!(resolver
            .insert(Weekday::Tuesday, &mut tuesday, long)
            .resolution
            .is_accepted());
    }

    #[test]
    fn test_evicted_reading_returns_once_it_no_longer_conflicts() {
        let mut resolver = Resolver::new();
        let mut lessons = Vec::new();

        let long = lesson("Math", "09:00", "12:00");
        for candidate in [
            long.clone(),
            lesson("Math", "08:30", "09:30"),
            lesson("Math", "08:00", "08:45"),
        ] {
            assert!(resolver
                .insert(Weekday::Monday, &mut lessons, candidate)
                .resolution
                .is_accepted());
        }
        assert_eq!(lessons, vec![lesson("Math", "08:00", "08:45")]);

        let again = resolver.insert(Weekday::Monday, &mut lessons, long.clone());
        assert_eq!(again.resolution, Resolution::Accept);
        assert_eq!(lessons, vec![lesson("Math", "08:00", "08:45"), long.clone()]);

        let repeat = resolver.insert(Weekday::Monday, &mut lessons, long);
        assert_eq!(repeat.resolution, Resolution::RejectDuplicate);
    }
}
