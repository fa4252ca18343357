//! Grid ingestion from table-extraction output
//!
//! The parser does not read PDFs itself. An extraction tool dumps the tables
//! it found, and these adapters turn that dump into a [`Grid`]:
//!
//! - JSON: one table as an array of rows (`[["", "Mo."], [null, "En"]]`),
//!   or an array of such tables
//! - CSV: one table, rows of any width, quoted multi-line cells allowed

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::core::grid::Grid;
use crate::utils::error::{ScheduleError, ScheduleResult};

type RawTable = Vec<Vec<Option<String>>>;

/// Parse one table from JSON
pub fn grid_from_json(text: &str) -> ScheduleResult<Grid> {
    let rows: RawTable = serde_json::from_str(text)?;
    Ok(normalize(rows))
}

/// Parse every table of an extraction dump
pub fn tables_from_json(text: &str) -> ScheduleResult<Vec<Grid>> {
    let tables: Vec<RawTable> = serde_json::from_str(text)?;
    Ok(tables.into_iter().map(normalize).collect())
}

/// The first extracted table. Timetable exports put the grid first.
pub fn first_table(tables: Vec<Grid>) -> ScheduleResult<Grid> {
    tables
        .into_iter()
        .find(|grid| !grid.is_empty())
        .ok_or(ScheduleError::NoTable)
}

/// Read a JSON document holding either one table or a list of tables
pub fn grid_from_json_any(text: &str) -> ScheduleResult<Grid> {
    let value: serde_json::Value = serde_json::from_str(text)?;
    let is_table_list = value
        .as_array()
        .and_then(|rows| rows.iter().find(|row| !is_empty_array(row)))
        .and_then(|row| row.as_array())
        .and_then(|cells| cells.first())
        .is_some_and(|cell| cell.is_array());

    if is_table_list {
        let tables: Vec<RawTable> = serde_json::from_value(value)?;
        first_table(tables.into_iter().map(normalize).collect())
    } else {
        let rows: RawTable = serde_json::from_value(value)?;
        Ok(normalize(rows))
    }
}

fn is_empty_array(value: &serde_json::Value) -> bool {
    value.as_array().is_some_and(Vec::is_empty)
}

/// Read one table from CSV. There is no header handling; row 0 is the timetable header.
pub fn grid_from_csv_reader<R: Read>(reader: R) -> ScheduleResult<Grid> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut rows = Vec::new();
    for record in csv_reader.records() {
        let record = record?;
        rows.push(record.iter().map(|field| Some(field.to_string())).collect());
    }
    Ok(normalize(rows))
}

/// Load a grid from a `.json` or `.csv` file
pub fn load_grid(path: impl AsRef<Path>) -> ScheduleResult<Grid> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    tracing::debug!(path = %path.display(), "loading grid");
    match extension.as_deref() {
        Some("json") => grid_from_json_any(&std::fs::read_to_string(path)?),
        Some("csv") => grid_from_csv_reader(File::open(path)?),
        _ => Err(ScheduleError::invalid(format!(
            "unsupported input '{}' (expected .json or .csv)",
            path.display()
        ))),
    }
}

/// Blank cells become absent cells
fn normalize(rows: RawTable) -> Grid {
    Grid::from_rows(
        rows.into_iter()
            .map(|row| {
                row.into_iter()
                    .map(|cell| cell.filter(|text| !text.trim().is_empty()))
                    .collect()
            })
            .collect(),
    )
}
