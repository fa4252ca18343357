//! Error handling for timetable parsing
//!
//! Only structural problems with the input table are errors. Per-cell
//! problems are absorbed by the parser and reported as diagnostics.

use thiserror::Error;

use crate::core::schedule::Schedule;
use crate::utils::diagnostics::CheckResult;

/// Timetable error type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScheduleError {
    /// The source contained no table at all
    #[error("no table found")]
    NoTable,

    /// The header row named no weekday the token table knows
    #[error("header has no weekday columns (header: {})", format_header(.header))]
    NoWeekdayColumns { header: Vec<String> },

    /// Parser options are unusable
    #[error("invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// Input could not be read as a grid
    #[error("invalid input: {message}")]
    InvalidInput { message: String },

    /// IO error (for file operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// A timetable document could not be read or written
    #[error("document error: {message}")]
    Document { message: String },

    /// A timetable document was written by an incompatible schema
    #[error("unsupported document version {found} (supported: {supported})")]
    UnsupportedVersion { found: String, supported: String },
}

fn format_header(header: &[String]) -> String {
    if header.is_empty() {
        "empty".to_string()
    } else {
        header
            .iter()
            .map(|cell| format!("'{}'", cell))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl From<std::io::Error> for ScheduleError {
    fn from(err: std::io::Error) -> Self {
        ScheduleError::Io {
            message: err.to_string(),
        }
    }
}

#[cfg(feature = "data-loading")]
impl From<serde_json::Error> for ScheduleError {
    fn from(err: serde_json::Error) -> Self {
        ScheduleError::InvalidInput {
            message: err.to_string(),
        }
    }
}

#[cfg(feature = "data-loading")]
impl From<csv::Error> for ScheduleError {
    fn from(err: csv::Error) -> Self {
        ScheduleError::InvalidInput {
            message: err.to_string(),
        }
    }
}

#[cfg(feature = "data-loading")]
impl From<toml::de::Error> for ScheduleError {
    fn from(err: toml::de::Error) -> Self {
        ScheduleError::InvalidConfig {
            message: err.to_string(),
        }
    }
}

/// Result type for timetable operations
pub type ScheduleResult<T> = Result<T, ScheduleError>;

// Convenience constructors for errors
impl ScheduleError {
    pub fn config(message: impl Into<String>) -> Self {
        ScheduleError::InvalidConfig {
            message: message.into(),
        }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        ScheduleError::InvalidInput {
            message: message.into(),
        }
    }

    pub fn document(message: impl Into<String>) -> Self {
        ScheduleError::Document {
            message: message.into(),
        }
    }

    /// Whether the error describes the table's shape (as opposed to IO or configuration)
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            ScheduleError::NoTable | ScheduleError::NoWeekdayColumns { .. }
        )
    }
}

/// Parse output with the data-quality diagnostics collected along the way
#[derive(Debug, Clone)]
pub struct ParseOutput {
    /// The parsed schedule
    pub schedule: Schedule,
    /// Cells and candidates that did not make it into the schedule
    pub diagnostics: CheckResult,
}

impl ParseOutput {
    pub fn new(schedule: Schedule) -> Self {
        Self {
            schedule,
            diagnostics: CheckResult::new(),
        }
    }

    pub fn with_diagnostics(schedule: Schedule, diagnostics: CheckResult) -> Self {
        Self {
            schedule,
            diagnostics,
        }
    }

    pub fn has_warnings(&self) -> bool {
        self.diagnostics.warnings > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_structural_error_display() {
        assert_eq!(ScheduleError::NoTable.to_string(), "no table found");

        let err = ScheduleError::NoWeekdayColumns {
            header: vec!["Zeit".to_string(), "Notes".to_string()],
        };
        let msg = err.to_string();
        assert!(msg.contains("no weekday columns"));
        assert!(msg.contains("'Notes'"));
        assert!(err.is_structural());
    }

    #[test]
    fn test_config_error() {
        let err = ScheduleError::config("lookahead must cover at least one row");
        assert!(err.to_string().starts_with("invalid configuration"));
        assert!(!err.is_structural());
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.csv");
        let err = ScheduleError::from(io);
        assert!(matches!(err, ScheduleError::Io { .. }));
        assert!(err.to_string().contains("missing.csv"));
    }

    #[test]
    fn test_parse_output() {
        let output = ParseOutput::new(Schedule::new());
        assert!(!output.has_warnings());
    }
}
