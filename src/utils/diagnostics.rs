//! Data-quality diagnostics for timetable grids
//!
//! The parser never fails on individual cells. Instead it records what it
//! skipped and why, so a caller can tell a clean parse from one that
//! silently lost lessons:
//!
//! - Subject cells with no discoverable time
//! - Time-like text that is not a real time
//! - Candidates rejected as duplicates or replaced by a more specific reading
//!
//! ## Example
//!
//! ```rust
//! use timegrid::diagnostics::check_grid;
//! use timegrid::{Grid, ParseOptions};
//!
//! let grid = Grid::from_text_rows([vec!["", "Mo."], vec!["", "Chemie - Labor"]]);
//! let result = check_grid(&grid, &ParseOptions::default());
//! assert_eq!(result.warnings, 1);
//! ```

use std::collections::BTreeMap;
use std::fmt;

use crate::core::grid::Grid;
use crate::core::schedule::{parse_timetable_with_diagnostics, ParseOptions};

/// Diagnostic severity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum DiagnosticLevel {
    /// Informational note
    Info,
    /// Warning - a lesson was probably lost
    Warning,
    /// Error - the table could not be parsed at all
    Error,
}

impl fmt::Display for DiagnosticLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticLevel::Info => write!(f, "info"),
            DiagnosticLevel::Warning => write!(f, "warning"),
            DiagnosticLevel::Error => write!(f, "error"),
        }
    }
}

/// A single diagnostic message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Severity level
    pub level: DiagnosticLevel,
    /// Human-readable message
    pub message: String,
    /// Table row (0 is the header)
    pub row: Option<usize>,
    /// Table column
    pub column: Option<usize>,
    /// Relevant cell text
    pub source_text: Option<String>,
    /// Suggested fix
    pub suggestion: Option<String>,
}

impl Diagnostic {
    /// Create a new diagnostic
    pub fn new(level: DiagnosticLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            row: None,
            column: None,
            source_text: None,
            suggestion: None,
        }
    }

    /// Add cell location
    pub fn with_location(mut self, row: usize, column: usize) -> Self {
        self.row = Some(row);
        self.column = Some(column);
        self
    }

    /// Add source text
    pub fn with_source(mut self, text: impl Into<String>) -> Self {
        self.source_text = Some(text.into());
        self
    }

    /// Add suggestion
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Format: level: message
        //         --> row R, column C
        //         |
        //         | cell text
        //         = help: suggestion

        write!(f, "{}: {}", self.level, self.message)?;

        if let (Some(row), Some(column)) = (self.row, self.column) {
            write!(f, "\n  --> row {}, column {}", row, column)?;
        }

        if let Some(ref source) = self.source_text {
            write!(f, "\n  |")?;
            for line in source.lines() {
                write!(f, "\n  | {}", line)?;
            }
        }

        if let Some(ref suggestion) = self.suggestion {
            write!(f, "\n  = help: {}", suggestion)?;
        }

        Ok(())
    }
}

/// Check result with summary
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckResult {
    /// All diagnostics
    pub diagnostics: Vec<Diagnostic>,
    /// Number of errors
    pub errors: usize,
    /// Number of warnings
    pub warnings: usize,
    /// Number of info messages
    pub infos: usize,
}

impl CheckResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a diagnostic
    pub fn add(&mut self, diag: Diagnostic) {
        match diag.level {
            DiagnosticLevel::Error => self.errors += 1,
            DiagnosticLevel::Warning => self.warnings += 1,
            DiagnosticLevel::Info => self.infos += 1,
        }
        self.diagnostics.push(diag);
    }

    /// Check if there are any errors
    pub fn has_errors(&self) -> bool {
        self.errors > 0
    }

    /// Check if there are any issues at all
    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Diagnostics at or above `level`
    pub fn at_least(&self, level: DiagnosticLevel) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(move |d| d.level >= level)
    }

    /// Get summary string
    pub fn summary(&self) -> String {
        let mut parts = Vec::new();
        if self.errors > 0 {
            parts.push(plural(self.errors, "error"));
        }
        if self.warnings > 0 {
            parts.push(plural(self.warnings, "warning"));
        }
        if self.infos > 0 {
            parts.push(plural(self.infos, "note"));
        }
        if parts.is_empty() {
            "no issues found".to_string()
        } else {
            parts.join(", ")
        }
    }
}

fn plural(count: usize, noun: &str) -> String {
    format!("{} {}{}", count, noun, if count == 1 { "" } else { "s" })
}

/// Parse `grid` and report everything that did not end up in the schedule.
/// Structural failures become a single error diagnostic.
pub fn check_grid(grid: &Grid, options: &ParseOptions) -> CheckResult {
    match parse_timetable_with_diagnostics(grid, options) {
        Ok(output) => output.diagnostics,
        Err(err) => {
            let mut result = CheckResult::new();
            let diag = Diagnostic::new(DiagnosticLevel::Error, err.to_string());
            let diag = if err.is_structural() {
                diag.with_suggestion("check that row 0 is the header with day names like 'Mo.'")
            } else {
                diag
            };
            result.add(diag);
            result
        }
    }
}

const RESET: &str = "\x1b[0m";

fn level_color(level: DiagnosticLevel) -> &'static str {
    match level {
        DiagnosticLevel::Error => "\x1b[31m",
        DiagnosticLevel::Warning => "\x1b[33m",
        DiagnosticLevel::Info => "\x1b[34m",
    }
}

fn paint(text: &str, color: &str, use_color: bool) -> String {
    if use_color {
        format!("{}{}{}", color, text, RESET)
    } else {
        text.to_string()
    }
}

/// Render diagnostics for a terminal, grouped by table row.
///
/// Diagnostics without a location (structural failures) come first. The last
/// line counts the lessons that were probably lost.
pub fn format_diagnostics(result: &CheckResult, use_color: bool) -> String {
    let mut by_row: BTreeMap<Option<usize>, Vec<&Diagnostic>> = BTreeMap::new();
    for diag in &result.diagnostics {
        by_row.entry(diag.row).or_default().push(diag);
    }

    let mut output = String::new();
    for (row, diags) in &by_row {
        let heading = match row {
            Some(row) => format!("== row {} ==", row),
            None => "== table ==".to_string(),
        };
        output.push_str(&paint(&heading, "\x1b[1m", use_color));
        output.push('\n');
        for diag in diags {
            output.push_str(&paint(&diag.to_string(), level_color(diag.level), use_color));
            output.push_str("\n\n");
        }
    }

    let (color, verdict) = if result.has_errors() {
        (level_color(DiagnosticLevel::Error), "table not parsed")
    } else if result.warnings > 0 {
        (level_color(DiagnosticLevel::Warning), "lessons may be missing")
    } else {
        ("\x1b[32m", "schedule complete")
    };
    let summary = format!("Summary: {} ({})", result.summary(), verdict);
    output.push_str(&paint(&summary, color, use_color));

    output
}
