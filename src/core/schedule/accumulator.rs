//! Row-by-row schedule accumulation

use super::classifier::{classify_header, DayColumns};
use super::extractor::{extract_cell, extract_cell_lessons, CellContext, CellRejection};
use super::model::{Lesson, Schedule};
use super::options::ParseOptions;
use super::resolver::{Outcome, Resolution, Resolver};
use crate::core::grid::{Cell, Grid};
use crate::core::time::{self, format_time};
use crate::data::weekdays::Weekday;
use crate::utils::diagnostics::{CheckResult, Diagnostic, DiagnosticLevel};
use crate::utils::error::{ParseOutput, ScheduleError, ScheduleResult};

/// Parse a timetable grid into a weekly schedule
pub fn parse_timetable(grid: &Grid, options: &ParseOptions) -> ScheduleResult<Schedule> {
    parse_timetable_with_diagnostics(grid, options).map(|output| output.schedule)
}

/// Parse a timetable grid and keep a record of every cell and candidate that was dropped
pub fn parse_timetable_with_diagnostics(
    grid: &Grid,
    options: &ParseOptions,
) -> ScheduleResult<ParseOutput> {
    options.validate()?;

    let header = grid.header().ok_or(ScheduleError::NoTable)?;
    let day_columns = classify_header(header, &options.day_tokens);
    if day_columns.is_empty() {
        return Err(ScheduleError::NoWeekdayColumns {
            header: header
                .iter()
                .flatten()
                .map(|cell| cell.trim().to_string())
                .filter(|cell| !cell.is_empty())
                .collect(),
        });
    }

    let mut acc = Accumulator::new(grid, &day_columns, options);
    for row in 1..grid.height() {
        for (&column, &day) in &day_columns {
            if let Some(cell) = grid.cell(row, column) {
                acc.visit(day, cell);
            }
        }
    }

    let output = acc.finish();
    tracing::info!(
        rows = grid.height().saturating_sub(1),
        day_columns = day_columns.len(),
        lessons = output.schedule.total_lessons(),
        issues = %output.diagnostics.summary(),
        "parsed timetable"
    );
    Ok(output)
}

struct Accumulator<'a> {
    grid: &'a Grid,
    day_columns: &'a DayColumns,
    options: &'a ParseOptions,
    schedule: Schedule,
    resolver: Resolver,
    diagnostics: CheckResult,
}

impl<'a> Accumulator<'a> {
    fn new(grid: &'a Grid, day_columns: &'a DayColumns, options: &'a ParseOptions) -> Self {
        Self {
            grid,
            day_columns,
            options,
            schedule: Schedule::new(),
            resolver: Resolver::new(),
            diagnostics: CheckResult::new(),
        }
    }

    fn visit(&mut self, day: Weekday, cell: Cell<'a>) {
        if self.options.split_multi_lesson_cells && has_several_ranges(cell.text) {
            let lessons = extract_cell_lessons(
                cell.text,
                self.options.default_start,
                self.options.default_lesson_minutes,
            );
            if !lessons.is_empty() {
                tracing::debug!(row = cell.row, column = cell.column, count = lessons.len(), "split cell");
                for lesson in lessons {
                    self.offer(day, cell, lesson);
                }
                return;
            }
        }

        let extraction = extract_cell(&CellContext {
            grid: self.grid,
            cell,
            day_columns: self.day_columns,
            options: self.options,
        });

        for bad in extraction.malformed {
            self.diagnostics.add(
                Diagnostic::new(
                    DiagnosticLevel::Warning,
                    format!("'{}' is not a valid time range", bad),
                )
                .with_location(cell.row, cell.column)
                .with_source(cell.trimmed()),
            );
        }

        match extraction.outcome {
            Ok(found) => self.offer(day, cell, found.lesson),
            Err(rejection) => self.reject_cell(cell, rejection),
        }
    }

    fn reject_cell(&mut self, cell: Cell<'_>, rejection: CellRejection) {
        tracing::debug!(row = cell.row, column = cell.column, ?rejection, "cell rejected");
        let diag = match rejection {
            CellRejection::NotCandidateStart | CellRejection::NoSubject => return,
            CellRejection::NoTime { subject } => Diagnostic::new(
                DiagnosticLevel::Warning,
                format!("subject '{}' has no discoverable time", subject),
            )
            .with_suggestion("set a default start time or put the time range in the cell"),
            CellRejection::InvertedTime {
                subject,
                start,
                end,
            } => Diagnostic::new(
                DiagnosticLevel::Warning,
                format!(
                    "subject '{}' has a time range that does not move forward ({} - {})",
                    subject,
                    format_time(start),
                    format_time(end)
                ),
            ),
        };
        self.diagnostics
            .add(diag.with_location(cell.row, cell.column).with_source(cell.trimmed()));
    }

    fn offer(&mut self, day: Weekday, cell: Cell<'_>, lesson: Lesson) {
        let shown = lesson.to_string();
        let Outcome {
            resolution,
            evicted,
        } = self
            .resolver
            .insert(day, self.schedule.day_mut(day), lesson);
        tracing::debug!(%day, row = cell.row, lesson = %shown, ?resolution, "candidate resolved");

        let note = |message: String| {
            Diagnostic::new(DiagnosticLevel::Info, message).with_location(cell.row, cell.column)
        };
        match resolution {
            Resolution::Accept => {}
            Resolution::Replace { .. } => {
                for old in evicted {
                    self.diagnostics.add(note(format!(
                        "{}: '{}' replaced by the shorter '{}'",
                        day, old, shown
                    )));
                }
            }
            Resolution::RejectDuplicate => {
                self.diagnostics
                    .add(note(format!("{}: duplicate '{}' skipped", day, shown)));
            }
            Resolution::RejectSubsumed { by } => {
                let kept = self
                    .schedule
                    .lessons(day)
                    .get(by)
                    .map(ToString::to_string)
                    .unwrap_or_default();
                self.diagnostics.add(note(format!(
                    "{}: '{}' overlaps the shorter or equal '{}' and was skipped",
                    day, shown, kept
                )));
            }
        }
    }

    fn finish(self) -> ParseOutput {
        ParseOutput::with_diagnostics(self.schedule, self.diagnostics)
    }
}

fn has_several_ranges(text: &str) -> bool {
    time::find_all_ranges(text)
        .iter()
        .filter(|scan| scan.found().is_some())
        .nth(1)
        .is_some()
}
