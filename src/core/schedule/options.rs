//! Parser configuration

use chrono::NaiveTime;
use indexmap::IndexMap;

use crate::data::constants::{DEFAULT_LESSON_MINUTES, DEFAULT_LOOKAHEAD_ROWS, DEFAULT_TIME_COLUMN};
use crate::data::weekdays::{Weekday, ENGLISH_DAY_TOKENS, GERMAN_DAY_TOKENS};
use crate::utils::error::{ScheduleError, ScheduleResult};

/// Options controlling how a timetable grid is read
#[derive(Debug, Clone, PartialEq)]
pub struct ParseOptions {
    /// Header token → weekday, tried in insertion order (first contained token wins)
    /// Default: German `Mo, Di, Mi, Do, Fr`
    pub day_tokens: IndexMap<String, Weekday>,

    /// Lesson length used when only a start time is known
    /// Default: 90
    pub default_lesson_minutes: u32,

    /// Rows below a subject cell searched for a time-only cell
    /// Default: 3
    pub lookahead_rows: usize,

    /// Column holding a shared time slot per row; `None` disables that fallback
    /// Default: Some(0)
    pub time_column: Option<usize>,

    /// Last-resort start time for subjects with no discoverable time
    /// Default: None
    pub default_start: Option<NaiveTime>,

    /// Split cells that list several subjects, each with its own time range
    /// Default: false
    pub split_multi_lesson_cells: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self::german()
    }
}

impl ParseOptions {
    /// Create new options with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Options for German exports (`Mo., Di., Mi., Do., Fr.`)
    pub fn german() -> Self {
        Self::with_token_table(&GERMAN_DAY_TOKENS)
    }

    /// Options for English exports (`Mon, Tue, Wed, Thu, Fri`)
    pub fn english() -> Self {
        Self::with_token_table(&ENGLISH_DAY_TOKENS)
    }

    fn with_token_table(table: &phf::OrderedMap<&'static str, Weekday>) -> Self {
        Self {
            day_tokens: table
                .entries()
                .map(|(token, day)| (token.to_string(), *day))
                .collect(),
            default_lesson_minutes: DEFAULT_LESSON_MINUTES,
            lookahead_rows: DEFAULT_LOOKAHEAD_ROWS,
            time_column: Some(DEFAULT_TIME_COLUMN),
            default_start: None,
            split_multi_lesson_cells: false,
        }
    }

    pub fn with_default_start(mut self, start: NaiveTime) -> Self {
        self.default_start = Some(start);
        self
    }

    pub fn with_lookahead_rows(mut self, rows: usize) -> Self {
        self.lookahead_rows = rows;
        self
    }

    pub fn with_time_column(mut self, column: Option<usize>) -> Self {
        self.time_column = column;
        self
    }

    pub fn with_default_lesson_minutes(mut self, minutes: u32) -> Self {
        self.default_lesson_minutes = minutes;
        self
    }

    pub fn with_split_multi_lesson_cells(mut self, split: bool) -> Self {
        self.split_multi_lesson_cells = split;
        self
    }

    /// Replace the header token table
    pub fn with_day_tokens<I, S>(mut self, tokens: I) -> Self
    where
        I: IntoIterator<Item = (S, Weekday)>,
        S: Into<String>,
    {
        self.day_tokens = tokens
            .into_iter()
            .map(|(token, day)| (token.into(), day))
            .collect();
        self
    }

    /// Whether the token table is something other than a built-in preset
    pub fn has_custom_day_tokens(&self) -> bool {
        self.day_tokens != Self::german().day_tokens && self.day_tokens != Self::english().day_tokens
    }

    /// Check that the options describe a usable parser
    pub fn validate(&self) -> ScheduleResult<()> {
        if self.day_tokens.is_empty() {
            return Err(ScheduleError::config("day token table is empty"));
        }
        for (token, day) in &self.day_tokens {
            if token.trim().is_empty() {
                return Err(ScheduleError::config("day tokens must not be blank"));
            }
            if !day.is_school_day() {
                return Err(ScheduleError::config(format!(
                    "token '{}' maps to {}, only Monday to Friday are supported",
                    token, day
                )));
            }
        }
        if self.default_lesson_minutes == 0 {
            return Err(ScheduleError::config(
                "default lesson length must be at least one minute",
            ));
        }
        if self.lookahead_rows == 0 {
            return Err(ScheduleError::config("lookahead must cover at least one row"));
        }
        Ok(())
    }
}

#[cfg(feature = "data-loading")]
mod file {
    use super::*;
    use crate::core::time::parse_hhmm;
    use serde::Deserialize;
    use std::path::Path;

    /// On-disk layout of an options file; absent keys keep their defaults
    #[derive(Debug, Default, Deserialize)]
    #[serde(default, deny_unknown_fields)]
    struct OptionsFile {
        locale: Option<String>,
        default_lesson_minutes: Option<u32>,
        lookahead_rows: Option<usize>,
        time_column: Option<TimeColumn>,
        default_start: Option<String>,
        split_multi_lesson_cells: Option<bool>,
        day_tokens: Option<IndexMap<String, String>>,
    }

    /// `time_column = 0` or `time_column = "none"`
    #[derive(Debug, Deserialize)]
    #[serde(untagged)]
    enum TimeColumn {
        Index(usize),
        Keyword(String),
    }

    impl ParseOptions {
        /// Parse options from TOML text and validate them
        ///
        /// ```toml
        /// locale = "english"
        /// lookahead_rows = 5
        /// time_column = "none"
        /// default_start = "08:00"
        ///
        /// [day_tokens]
        /// Lu = "monday"
        /// ```
        pub fn from_toml_str(text: &str) -> ScheduleResult<Self> {
            let file: OptionsFile = toml::from_str(text)?;

            let mut options = match file.locale.as_deref().map(str::to_lowercase) {
                None => ParseOptions::default(),
                Some(locale) if locale == "german" || locale == "de" => ParseOptions::german(),
                Some(locale) if locale == "english" || locale == "en" => ParseOptions::english(),
                Some(other) => {
                    return Err(ScheduleError::config(format!("unknown locale '{}'", other)))
                }
            };

            if let Some(minutes) = file.default_lesson_minutes {
                options.default_lesson_minutes = minutes;
            }
            if let Some(rows) = file.lookahead_rows {
                options.lookahead_rows = rows;
            }
            match file.time_column {
                Some(TimeColumn::Index(column)) => options.time_column = Some(column),
                Some(TimeColumn::Keyword(word)) if word.eq_ignore_ascii_case("none") => {
                    options.time_column = None
                }
                Some(TimeColumn::Keyword(word)) => {
                    return Err(ScheduleError::config(format!(
                        "time_column must be an index or \"none\", got '{}'",
                        word
                    )))
                }
                None => {}
            }
            if let Some(start) = file.default_start {
                let time = parse_hhmm(&start).ok_or_else(|| {
                    ScheduleError::config(format!("default_start '{}' is not HH:MM", start))
                })?;
                options.default_start = Some(time);
            }
            if let Some(split) = file.split_multi_lesson_cells {
                options.split_multi_lesson_cells = split;
            }
            if let Some(tokens) = file.day_tokens {
                let mut table = IndexMap::new();
                for (token, name) in tokens {
                    let day: Weekday = name
                        .parse()
                        .map_err(|e: crate::data::weekdays::UnknownWeekday| {
                            ScheduleError::config(e.to_string())
                        })?;
                    table.insert(token, day);
                }
                options.day_tokens = table;
            }

            options.validate()?;
            Ok(options)
        }

        /// Read and parse an options file
        pub fn from_toml_file(path: impl AsRef<Path>) -> ScheduleResult<Self> {
            let text = std::fs::read_to_string(path)?;
            Self::from_toml_str(&text)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let opts = ParseOptions::default();
        assert_eq!(opts.default_lesson_minutes, 90);
        assert_eq!(opts.lookahead_rows, 3);
        assert_eq!(opts.time_column, Some(0));
        assert!(opts.default_start.is_none());
        assert_eq!(opts.day_tokens.get("Di"), Some(&Weekday::Tuesday));
        assert!(opts.validate().is_ok());
    }

    #[test]
    fn test_custom_day_tokens_detected() {
        assert!(!ParseOptions::german().has_custom_day_tokens());
        assert!(!ParseOptions::english().has_custom_day_tokens());
        let custom = ParseOptions::default().with_day_tokens([("Lun", Weekday::Monday)]);
        assert!(custom.has_custom_day_tokens());
    }

    #[test]
    fn test_preset_english() {
        let opts = ParseOptions::english();
        assert_eq!(opts.day_tokens.get("Th"), Some(&Weekday::Thursday));
        assert!(!opts.day_tokens.contains_key("Di"));
    }

    #[test]
    fn test_validate_rejects_weekend_tokens() {
        let opts = ParseOptions::new().with_day_tokens([("Sa", Weekday::Saturday)]);
        assert!(matches!(
            opts.validate(),
            Err(ScheduleError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_degenerate_values() {
        assert!(ParseOptions::new()
            .with_lookahead_rows(0)
            .validate()
            .is_err());
        assert!(ParseOptions::new()
            .with_default_lesson_minutes(0)
            .validate()
            .is_err());
        assert!(ParseOptions::new()
            .with_day_tokens(Vec::<(String, Weekday)>::new())
            .validate()
            .is_err());
    }

    #[cfg(feature = "data-loading")]
    #[test]
    fn test_from_toml() {
        let opts = ParseOptions::from_toml_str(
            r#"
            locale = "english"
            lookahead_rows = 5
            time_column = "none"
            default_start = "08:15"

            [day_tokens]
            Lu = "monday"
            Ma = "Tuesday"
            "#,
        )
        .unwrap();
        assert_eq!(opts.lookahead_rows, 5);
        assert_eq!(opts.time_column, None);
        assert_eq!(opts.default_start, NaiveTime::from_hms_opt(8, 15, 0));
        let tokens: Vec<&str> = opts.day_tokens.keys().map(String::as_str).collect();
        assert_eq!(tokens, vec!["Lu", "Ma"]);
    }

    #[cfg(feature = "data-loading")]
    #[test]
    fn test_from_toml_errors() {
        assert!(ParseOptions::from_toml_str("locale = \"klingon\"").is_err());
        assert!(ParseOptions::from_toml_str("default_start = \"8 o'clock\"").is_err());
        assert!(ParseOptions::from_toml_str("[day_tokens]\nSa = \"saturday\"").is_err());
        assert!(ParseOptions::from_toml_str("unknown_key = 1").is_err());
    }
}
