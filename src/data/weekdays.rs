//! Weekday type and header token tables
//!
//! Timetable exports label their day columns with short locale-specific
//! tokens ("Mo.", "Di.", ...). The tables here are the built-in presets;
//! callers can supply their own through `ParseOptions::with_day_tokens`.

use phf::phf_ordered_map;
use std::fmt;
use std::str::FromStr;

/// Day of the week
///
/// Saturday and Sunday exist so consuming code can represent them, but the
/// parser only ever produces Monday through Friday. Serialized documents use
/// the English names; German names are read as well.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "data-loading", derive(serde::Serialize, serde::Deserialize))]
pub enum Weekday {
    #[cfg_attr(feature = "data-loading", serde(alias = "Montag"))]
    Monday,
    #[cfg_attr(feature = "data-loading", serde(alias = "Dienstag"))]
    Tuesday,
    #[cfg_attr(feature = "data-loading", serde(alias = "Mittwoch"))]
    Wednesday,
    #[cfg_attr(feature = "data-loading", serde(alias = "Donnerstag"))]
    Thursday,
    #[cfg_attr(feature = "data-loading", serde(alias = "Freitag"))]
    Friday,
    #[cfg_attr(feature = "data-loading", serde(alias = "Samstag"))]
    Saturday,
    #[cfg_attr(feature = "data-loading", serde(alias = "Sonntag"))]
    Sunday,
}

impl Weekday {
    /// The five days a parsed schedule always contains, in order
    pub const SCHOOL_DAYS: [Weekday; 5] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
    ];

    /// English day name
    pub fn name(&self) -> &'static str {
        match self {
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
            Weekday::Saturday => "Saturday",
            Weekday::Sunday => "Sunday",
        }
    }

    /// Whether the day is one of Monday..Friday
    pub fn is_school_day(&self) -> bool {
        !matches!(self, Weekday::Saturday | Weekday::Sunday)
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<chrono::Weekday> for Weekday {
    fn from(day: chrono::Weekday) -> Self {
        match day {
            chrono::Weekday::Mon => Weekday::Monday,
            chrono::Weekday::Tue => Weekday::Tuesday,
            chrono::Weekday::Wed => Weekday::Wednesday,
            chrono::Weekday::Thu => Weekday::Thursday,
            chrono::Weekday::Fri => Weekday::Friday,
            chrono::Weekday::Sat => Weekday::Saturday,
            chrono::Weekday::Sun => Weekday::Sunday,
        }
    }
}

/// Error returned when a weekday name cannot be recognized
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownWeekday(pub String);

impl fmt::Display for UnknownWeekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown weekday '{}'", self.0)
    }
}

impl std::error::Error for UnknownWeekday {}

impl FromStr for Weekday {
    type Err = UnknownWeekday;

    /// Accepts English and German full names, case-insensitive
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        WEEKDAY_NAMES
            .get(lower.as_str())
            .copied()
            .ok_or_else(|| UnknownWeekday(s.to_string()))
    }
}

/// Full day names accepted in option files
static WEEKDAY_NAMES: phf::Map<&'static str, Weekday> = phf::phf_map! {
    "monday" => Weekday::Monday,
    "tuesday" => Weekday::Tuesday,
    "wednesday" => Weekday::Wednesday,
    "thursday" => Weekday::Thursday,
    "friday" => Weekday::Friday,
    "saturday" => Weekday::Saturday,
    "sunday" => Weekday::Sunday,
    "montag" => Weekday::Monday,
    "dienstag" => Weekday::Tuesday,
    "mittwoch" => Weekday::Wednesday,
    "donnerstag" => Weekday::Thursday,
    "freitag" => Weekday::Friday,
    "samstag" => Weekday::Saturday,
    "sonntag" => Weekday::Sunday,
};

/// German header tokens, as printed by the timetable exports this parser was built for.
/// Order matters: the first token contained in a header cell wins.
pub static GERMAN_DAY_TOKENS: phf::OrderedMap<&'static str, Weekday> = phf_ordered_map! {
    "Mo" => Weekday::Monday,
    "Di" => Weekday::Tuesday,
    "Mi" => Weekday::Wednesday,
    "Do" => Weekday::Thursday,
    "Fr" => Weekday::Friday,
};

/// English header tokens
pub static ENGLISH_DAY_TOKENS: phf::OrderedMap<&'static str, Weekday> = phf_ordered_map! {
    "Mo" => Weekday::Monday,
    "Tu" => Weekday::Tuesday,
    "We" => Weekday::Wednesday,
    "Th" => Weekday::Thursday,
    "Fr" => Weekday::Friday,
};
